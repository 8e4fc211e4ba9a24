//! Unit tests for rr-core primitives.

#[cfg(test)]
mod helpers {
    use chrono::{NaiveDate, NaiveDateTime};

    pub fn ts() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 1)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .unwrap()
    }
}

#[cfg(test)]
mod ids {
    use crate::{SegmentId, SegmentIdx};

    #[test]
    fn index_roundtrip() {
        let idx = SegmentIdx(42);
        assert_eq!(idx.index(), 42);
        assert_eq!(SegmentIdx::try_from(42usize).unwrap(), idx);
    }

    #[test]
    fn display() {
        assert_eq!(SegmentIdx(7).to_string(), "SegmentIdx(7)");
        assert_eq!(SegmentId::from("M1_12").to_string(), "M1_12");
    }
}

#[cfg(test)]
mod geo {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use crate::{cross_track_km, point_to_segment_deg, GeoBounds, GeoPoint};

    fn random_point(rng: &mut SmallRng) -> GeoPoint {
        GeoPoint::new(rng.gen_range(-90.0..=90.0), rng.gen_range(-180.0..=180.0))
    }

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(51.1279, 1.3134);
        assert_eq!(p.distance_km(p), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..500 {
            let a = random_point(&mut rng);
            let b = random_point(&mut rng);
            assert_eq!(a.distance_km(b), b.distance_km(a), "{a} vs {b}");
        }
    }

    #[test]
    fn one_degree_latitude() {
        let a = GeoPoint::new(51.0, 0.0);
        let b = GeoPoint::new(52.0, 0.0);
        let d = a.distance_km(b);
        assert!((d - 111.195).abs() < 0.01, "got {d}");
    }

    #[test]
    fn london_birmingham_approx() {
        let london = GeoPoint::new(51.5074, -0.1278);
        let birmingham = GeoPoint::new(52.4862, -1.8904);
        let d = london.distance_km(birmingham);
        assert!((160.0..167.0).contains(&d), "got {d}");
    }

    #[test]
    fn validity_ranges() {
        assert!(GeoPoint::new(90.0, -180.0).is_valid());
        assert!(!GeoPoint::new(90.1, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, 180.5).is_valid());
        assert!(!GeoPoint::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn degenerate_segment_is_point_distance() {
        let a = GeoPoint::new(51.0, 0.0);
        let p = GeoPoint::new(51.3, 0.4);
        assert_eq!(point_to_segment_deg(p, a, a), p.planar_distance_deg(a));
        assert!((point_to_segment_deg(p, a, a) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn projection_inside_segment() {
        let a = GeoPoint::new(51.0, 0.0);
        let b = GeoPoint::new(52.0, 0.0);
        let p = GeoPoint::new(51.5, 0.02);
        assert!((point_to_segment_deg(p, a, b) - 0.02).abs() < 1e-12);
    }

    #[test]
    fn projection_clamped_to_endpoints() {
        let a = GeoPoint::new(51.0, 0.0);
        let b = GeoPoint::new(52.0, 0.0);
        // Beyond `b` on the infinite line: distance is to `b`, not the line.
        let p = GeoPoint::new(52.3, 0.4);
        assert!((point_to_segment_deg(p, a, b) - 0.5).abs() < 1e-12);
        // Behind `a`.
        let q = GeoPoint::new(50.7, 0.0);
        assert!((point_to_segment_deg(q, a, b) - 0.3).abs() < 1e-12);
    }

    #[test]
    fn cross_track_on_arc_is_zero() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 10.0);
        let p = GeoPoint::new(0.0, 4.0);
        assert!(cross_track_km(p, a, b) < 1e-6);
    }

    #[test]
    fn cross_track_perpendicular_offset() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 10.0);
        let p = GeoPoint::new(0.1, 5.0);
        let d = cross_track_km(p, a, b);
        assert!((d - 11.1195).abs() < 0.01, "got {d}");
    }

    #[test]
    fn cross_track_beyond_endpoints() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 10.0);
        let past_b = GeoPoint::new(0.0, 12.0);
        assert!((cross_track_km(past_b, a, b) - past_b.distance_km(b)).abs() < 1e-9);
        let before_a = GeoPoint::new(0.5, -1.0);
        assert!((cross_track_km(before_a, a, b) - before_a.distance_km(a)).abs() < 1e-9);
    }

    #[test]
    fn cross_track_degenerate() {
        let a = GeoPoint::new(53.48, -2.24);
        let p = GeoPoint::new(53.80, -1.55);
        assert_eq!(cross_track_km(p, a, a), p.distance_km(a));
    }

    #[test]
    fn midpoint_on_equator() {
        let m = GeoPoint::new(0.0, 0.0).midpoint(GeoPoint::new(0.0, 10.0));
        assert!(m.lat.abs() < 1e-9);
        assert!((m.lon - 5.0).abs() < 1e-9);
    }

    #[test]
    fn bounds_are_inclusive() {
        let b = GeoBounds::from_corners(GeoPoint::new(52.0, 1.0), GeoPoint::new(51.0, 0.0));
        assert!(b.contains(GeoPoint::new(51.0, 0.0)));
        assert!(b.contains(GeoPoint::new(52.0, 1.0)));
        assert!(!b.contains(GeoPoint::new(52.0001, 0.5)));

        let grown = b.expand_deg(0.5);
        assert!(grown.contains(GeoPoint::new(52.5, -0.5)));
    }
}

#[cfg(test)]
mod risk {
    use crate::{RiskColor, RiskLevel, RiskThresholds};

    #[test]
    fn tier_boundaries() {
        let t = RiskThresholds::default();
        assert_eq!(t.classify(75.0), RiskLevel::Compliant);
        assert_eq!(t.classify(74.999_999), RiskLevel::Moderate);
        assert_eq!(t.classify(50.0), RiskLevel::Moderate);
        assert_eq!(t.classify(49.999_999), RiskLevel::Critical);
        assert_eq!(t.classify(100.0), RiskLevel::Compliant);
        assert_eq!(t.classify(0.0), RiskLevel::Critical);
    }

    #[test]
    fn nan_is_critical() {
        assert_eq!(RiskThresholds::default().classify(f64::NAN), RiskLevel::Critical);
    }

    #[test]
    fn every_score_has_exactly_one_tier() {
        let t = RiskThresholds::default();
        for i in 0..=10_000 {
            let score = i as f64 / 100.0;
            let tier = t.classify(score);
            let expected = if score >= 75.0 {
                RiskLevel::Compliant
            } else if score >= 50.0 {
                RiskLevel::Moderate
            } else {
                RiskLevel::Critical
            };
            assert_eq!(tier, expected, "score {score}");
        }
    }

    #[test]
    fn custom_thresholds() {
        let t = RiskThresholds { compliant_min: 90.0, moderate_min: 60.0 };
        assert_eq!(t.classify(80.0), RiskLevel::Moderate);
        assert_eq!(t.classify(55.0), RiskLevel::Critical);
    }

    #[test]
    fn colors_and_labels() {
        assert_eq!(RiskLevel::Compliant.color(), RiskColor::Green);
        assert_eq!(RiskLevel::Moderate.color(), RiskColor::Yellow);
        assert_eq!(RiskLevel::Critical.color(), RiskColor::Red);
        assert_eq!(RiskLevel::Critical.to_string(), "CRITICAL");
        assert_eq!(RiskColor::Yellow.to_string(), "yellow");
    }
}

#[cfg(test)]
mod segment {
    use super::helpers::ts;
    use crate::{
        CoreError, FeatureTag, GeoPoint, InfrastructureQuality, RiskColor, RiskLevel,
        RiskThresholds, Segment,
    };

    fn seg(score: f64) -> Segment {
        Segment::new("s0", GeoPoint::new(51.5, -0.1), score, ts())
    }

    #[test]
    fn derived_risk_ignores_stored_label() {
        let s = seg(40.0).with_stored_risk(RiskLevel::Compliant, RiskColor::Green);
        assert_eq!(s.risk_level(&RiskThresholds::default()), RiskLevel::Critical);
    }

    #[test]
    fn no_drift_when_labels_match_or_missing() {
        let t = RiskThresholds::default();
        assert!(seg(80.0).risk_drift(&t).is_none());
        let labelled = seg(60.0).with_stored_risk(RiskLevel::Moderate, RiskColor::Yellow);
        assert!(labelled.risk_drift(&t).is_none());
    }

    #[test]
    fn drift_reported_on_mismatch() {
        let t = RiskThresholds::default();
        let s = seg(74.9).with_stored_risk(RiskLevel::Compliant, RiskColor::Green);
        let drift = s.risk_drift(&t).unwrap();
        assert_eq!(drift.derived, RiskLevel::Moderate);
        assert_eq!(drift.stored_level, Some(RiskLevel::Compliant));

        // Colour alone can drift too.
        let s = seg(30.0).with_stored_risk(RiskLevel::Critical, RiskColor::Yellow);
        assert!(s.risk_drift(&t).is_some());
    }

    #[test]
    fn features_are_a_set() {
        let s = seg(70.0).with_features([
            FeatureTag::Roundabout,
            FeatureTag::Junction,
            FeatureTag::Roundabout,
        ]);
        assert_eq!(s.detected_features.len(), 2);
        assert!(s.has_feature(FeatureTag::Junction));
        assert!(!s.has_feature(FeatureTag::ConstructionZone));
    }

    #[test]
    fn validate_accepts_well_formed() {
        let s = seg(75.0)
            .with_quality(InfrastructureQuality::new(0.4, 0.6, 0.9))
            .with_weather_impact(0.3);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn validate_rejects_out_of_range() {
        assert!(matches!(seg(100.5).validate(), Err(CoreError::InvalidSegment { .. })));
        assert!(seg(f64::NAN).validate().is_err());
        assert!(seg(50.0).with_weather_impact(1.2).validate().is_err());
        assert!(seg(50.0)
            .with_quality(InfrastructureQuality::new(-0.1, 0.5, 0.5))
            .validate()
            .is_err());

        let mut off_map = seg(50.0);
        off_map.latitude = 91.0;
        let err = off_map.validate().unwrap_err();
        assert!(err.to_string().contains("s0"));
    }

    #[test]
    fn feature_tag_names_parse_back() {
        for &tag in FeatureTag::ALL {
            assert_eq!(tag.as_str().parse::<FeatureTag>().unwrap(), tag);
        }
        assert_eq!(FeatureTag::ALL.len(), 22);
        assert!(matches!(
            "hovercraft_lane".parse::<FeatureTag>(),
            Err(CoreError::UnknownFeature(_))
        ));
    }
}
