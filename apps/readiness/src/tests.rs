//! Unit tests for the readiness binary.

#[cfg(test)]
mod cli_tests {
    use clap::Parser;

    use rr_spatial::CorridorMode;

    use crate::cli::{Cli, Command, LocatorKind};
    use crate::route_request;

    #[test]
    fn parses_route_with_negative_longitude() {
        let cli = Cli::try_parse_from([
            "readiness", "--data", "segments.json", "route",
            "--start-lat", "51.5074", "--start-lon", "-0.1278",
            "--end-lat", "52.4862", "--end-lon", "-1.8904",
            "--geodesic", "--max-samples", "20",
        ])
        .unwrap();

        assert_eq!(cli.locator, LocatorKind::Indexed);
        let Command::Route(args) = &cli.command else {
            panic!("expected route subcommand");
        };
        let req = route_request(args);
        assert_eq!(req.start.lon, -0.1278);
        assert_eq!(req.corridor_mode, Some(CorridorMode::Geodesic));
        assert_eq!(req.max_sample_count, Some(20));
        assert_eq!(req.corridor_width_km, None);
    }

    #[test]
    fn global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "readiness", "location", "--lat", "51.0", "--lon", "0.5",
            "--data", "d.json", "--locator", "linear",
        ])
        .unwrap();
        assert_eq!(cli.locator, LocatorKind::Linear);
        assert!(cli.data.is_some());
        assert!(matches!(cli.command, Command::Location(_)));
    }

    #[test]
    fn planar_unless_flagged() {
        let cli = Cli::try_parse_from([
            "readiness", "route", "--start-lat", "51", "--start-lon", "0",
            "--end-lat", "52", "--end-lon", "0",
        ])
        .unwrap();
        let Command::Route(args) = &cli.command else {
            panic!("expected route subcommand");
        };
        assert_eq!(route_request(args).corridor_mode, None);
    }
}

#[cfg(test)]
mod report_tests {
    use crate::report::{round_to, NotFound};

    #[test]
    fn rounding() {
        assert_eq!(round_to(111.194_926, 2), 111.19);
        assert_eq!(round_to(59.96, 1), 60.0);
        assert_eq!(round_to(0.25, 1), 0.3);
    }

    #[test]
    fn matched_segments_only_on_request() {
        use chrono::NaiveDate;
        use rr_assess::{Assessor, EngineConfig, RouteRequest};
        use rr_core::{GeoPoint, Segment};
        use rr_spatial::SegmentStore;

        use crate::report::RouteReport;

        let ts = NaiveDate::from_ymd_opt(2025, 3, 1)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .unwrap();
        let segments = (0..10)
            .map(|i| Segment::new(format!("s{i}"), GeoPoint::new(51.0 + i as f64 * 0.1, 0.0), 70.0, ts))
            .collect();
        let store = SegmentStore::load(segments).unwrap();
        let assessor = Assessor::new(&store, EngineConfig::default());
        let request = RouteRequest::new(GeoPoint::new(51.0, 0.0), GeoPoint::new(52.0, 0.0))
            .max_sample_count(3);
        let assessment = assessor.assess_route(&request).unwrap();

        let sampled = serde_json::to_value(RouteReport::from(&assessment)).unwrap();
        assert_eq!(sampled["segments"].as_array().unwrap().len(), 3);
        assert!(sampled.get("matched_segments").is_none());
        assert_eq!(sampled["matched_segment_count"], 10);

        let full = serde_json::to_value(RouteReport::from(&assessment).with_matched_segments(&assessment))
            .unwrap();
        assert_eq!(full["matched_segments"].as_array().unwrap().len(), 10);
        assert_eq!(full["segments"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn not_found_shape() {
        let json = serde_json::to_value(NotFound::new("nothing here")).unwrap();
        assert_eq!(json["error"], "not_found");
        assert_eq!(json["detail"], "nothing here");
    }
}

#[cfg(test)]
mod config_tests {
    use rr_assess::EngineConfig;
    use rr_spatial::CorridorMode;

    #[test]
    fn partial_config_keeps_defaults() {
        let json = r#"{
            "query": { "corridor_width_km": 2.0 },
            "recommendations": { "max_roundabouts": 5 },
            "corridor_mode": "geodesic"
        }"#;
        let cfg: EngineConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.query.corridor_width_km, 2.0);
        assert_eq!(cfg.query.radius_km, 0.5);
        assert_eq!(cfg.recommendations.max_roundabouts, 5);
        assert_eq!(cfg.recommendations.lane_marking_min, 0.6);
        assert_eq!(cfg.corridor_mode, CorridorMode::Geodesic);
        assert_eq!(cfg.thresholds.compliant_min, 75.0);
        assert!(cfg.validate().is_ok());
    }
}
