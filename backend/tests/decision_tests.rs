//! Tests for the stress decision table
//! Verifies that every classifier label maps to exactly one stress tier

use proptest::prelude::*;
use shared::{Severity, StressAssessment, StressTier};

// =============================================================================
// Tier Output Tests
// =============================================================================

mod tier_outputs {
    use super::*;

    #[test]
    fn severe_stress_output() {
        let assessment = StressAssessment::new("Severe Stress", 0.87);

        assert_eq!(assessment.tier, StressTier::Severe);
        assert_eq!(assessment.severity, Severity::Error);
        assert!(assessment.headline.contains("Severe Plant Stress Detected"));
        assert!(assessment.headline.contains("0.87"));
        assert_eq!(assessment.recommendations.len(), 4);
        assert_eq!(
            assessment.recommendations[0],
            "Increase irrigation immediately"
        );
    }

    #[test]
    fn mild_stress_output() {
        let assessment = StressAssessment::new("Mild Stress", 0.55);

        assert_eq!(assessment.tier, StressTier::Mild);
        assert_eq!(assessment.severity, Severity::Warning);
        assert!(assessment.headline.contains("Mild Plant Stress Detected"));
        assert!(assessment.headline.contains("0.55"));
        assert_eq!(assessment.recommendations.len(), 3);
    }

    #[test]
    fn unrecognized_label_output() {
        let assessment = StressAssessment::new("Unknown/Healthy", 0.99);

        assert_eq!(assessment.tier, StressTier::Healthy);
        assert_eq!(assessment.severity, Severity::Success);
        assert!(assessment.headline.contains("Healthy Conditions"));
        assert!(assessment.headline.contains("0.99"));
        assert_eq!(assessment.recommendations.len(), 3);
        assert_eq!(
            assessment.recommendations[0],
            "Climate conditions are favorable"
        );
    }

    #[test]
    fn confidence_rounds_to_two_places() {
        let assessment = StressAssessment::new("Mild Stress", 0.4972);
        assert!(assessment.headline.ends_with("Confidence: 0.50"));
    }

    #[test]
    fn matching_is_exact() {
        // Case, whitespace and abbreviations do not match
        for label in ["severe stress", "Severe Stress ", " Mild Stress", "Mild", "Severe"] {
            assert_eq!(StressTier::from_label(label), StressTier::Healthy, "{label}");
        }
    }

    #[test]
    fn recommendations_are_static_per_tier() {
        let low = StressAssessment::new("Severe Stress", 0.34);
        let high = StressAssessment::new("Severe Stress", 0.99);
        assert_eq!(low.recommendations, high.recommendations);
        assert_ne!(low.headline, high.headline);
    }
}

// =============================================================================
// Totality Property Tests
// =============================================================================

mod totality {
    use super::*;

    proptest! {
        #[test]
        fn any_other_label_is_healthy(label in ".*") {
            prop_assume!(label != "Severe Stress" && label != "Mild Stress");
            prop_assert_eq!(StressTier::from_label(&label), StressTier::Healthy);
            prop_assert!(!StressTier::is_known_label(&label));
        }

        #[test]
        fn headline_carries_two_decimal_confidence(confidence in 0.0f64..=1.0) {
            let formatted = format!("{:.2}", confidence);
            for label in ["Severe Stress", "Mild Stress", "Healthy"] {
                let assessment = StressAssessment::new(label, confidence);
                prop_assert!(assessment.headline.ends_with(&formatted));
            }
        }
    }
}
