use crate::Category;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Classification {
    /// Body mass index rounded to 2 decimal places.
    pub bmi: f64,
    pub category: Category,
}

impl Category {
    /// Maps a BMI value onto a category.
    ///
    /// Values in `[24.9, 25)` fall through to `Obesity`. This gap between the
    /// normal and overweight ranges is kept as-is so that existing histories
    /// stay consistent with newly recorded ones.
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            Category::Underweight
        } else if (18.5..24.9).contains(&bmi) {
            Category::NormalWeight
        } else if (25.0..29.9).contains(&bmi) {
            Category::Overweight
        } else {
            Category::Obesity
        }
    }
}

/// Computes BMI from weight in kilograms and height in meters.
///
/// The category is chosen from the exact value, the returned `bmi` is rounded.
/// Both arguments are expected to be positive, see [`crate::Measurement`].
pub fn classify(weight: f64, height: f64) -> Classification {
    let bmi = weight / height.powi(2);
    Classification {
        bmi: round_2(bmi),
        category: Category::from_bmi(bmi),
    }
}

/// Rounds the exact binary value to 2 decimal places, ties to even.
fn round_2(x: f64) -> f64 {
    format!("{:.2}", x).parse().unwrap_or(x)
}
