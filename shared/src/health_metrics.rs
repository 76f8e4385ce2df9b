//! Health metrics calculations module
//!
//! BMI and its category bands, computed from the profile's height and
//! weight. All calculations are pure functions.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// BMI Calculations
// ============================================================================

/// BMI category classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Get the half-open BMI range `[low, high)` for this category
    pub fn range(&self) -> (f64, f64) {
        match self {
            BmiCategory::Underweight => (0.0, 18.5),
            BmiCategory::Normal => (18.5, 25.0),
            BmiCategory::Overweight => (25.0, 30.0),
            BmiCategory::Obese => (30.0, f64::INFINITY),
        }
    }

    /// Get the label shown next to the BMI value
    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Calculate BMI from weight and height
///
/// Formula: BMI = weight(kg) / height(m)²
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// Classify BMI into category
pub fn classify_bmi(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 25.0 {
        BmiCategory::Normal
    } else if bmi < 30.0 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[test]
    fn test_bmi_calculation() {
        // 70kg, 175cm -> BMI ~22.86
        let bmi = calculate_bmi(70.0, 175.0);
        assert!((bmi - 22.86).abs() < 0.01);
        assert_eq!(classify_bmi(bmi), BmiCategory::Normal);

        // 90kg, 160cm -> BMI ~35.16
        let bmi = calculate_bmi(90.0, 160.0);
        assert!((bmi - 35.16).abs() < 0.01);
        assert_eq!(classify_bmi(bmi), BmiCategory::Obese);
    }

    #[rstest]
    #[case(10.0, BmiCategory::Underweight)]
    #[case(18.49, BmiCategory::Underweight)]
    #[case(18.5, BmiCategory::Normal)]
    #[case(24.99, BmiCategory::Normal)]
    #[case(25.0, BmiCategory::Overweight)]
    #[case(29.99, BmiCategory::Overweight)]
    #[case(30.0, BmiCategory::Obese)]
    #[case(45.0, BmiCategory::Obese)]
    fn test_bmi_category_bands(#[case] bmi: f64, #[case] expected: BmiCategory) {
        assert_eq!(classify_bmi(bmi), expected);
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(BmiCategory::Normal.to_string(), "Normal");
        assert_eq!(BmiCategory::Obese.label(), "Obese");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: BMI is always positive for valid inputs
        #[test]
        fn prop_bmi_positive(weight in 20.0f64..500.0, height in 100.0f64..250.0) {
            let bmi = calculate_bmi(weight, height);
            prop_assert!(bmi > 0.0);
        }

        /// Property: Heavier weight = higher BMI (same height)
        #[test]
        fn prop_bmi_increases_with_weight(
            weight1 in 50.0f64..100.0,
            weight2 in 100.0f64..150.0,
            height in 150.0f64..200.0
        ) {
            let bmi1 = calculate_bmi(weight1, height);
            let bmi2 = calculate_bmi(weight2, height);
            prop_assert!(bmi2 > bmi1);
        }

        /// Property: every BMI falls inside the range of its own category
        #[test]
        fn prop_category_range_contains_bmi(bmi in 0.0f64..80.0) {
            let (low, high) = classify_bmi(bmi).range();
            prop_assert!(bmi >= low && bmi < high,
                "BMI {} outside [{}, {})", bmi, low, high);
        }
    }
}
