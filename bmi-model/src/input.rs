use std::str::FromStr;

use strum::Display;

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[strum(serialize_all = "lowercase")]
pub enum Field {
    Weight,
    Height,
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("please enter a username")]
    EmptyUsername,
    #[error("could not convert {field} to a number: '{value}'")]
    NotANumber { field: Field, value: String },
    #[error("Weight and height must be positive numbers.")]
    NotPositive,
}

/// Weight (kg) and height (m), both finite and strictly positive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Measurement {
    weight: f64,
    height: f64,
}

impl Measurement {
    pub fn new(weight: f64, height: f64) -> Result<Self, ValidationError> {
        if !is_positive(weight) || !is_positive(height) {
            return Err(ValidationError::NotPositive);
        }
        Ok(Self { weight, height })
    }

    /// Parses form text. Weight is checked before height.
    pub fn parse(weight: &str, height: &str) -> Result<Self, ValidationError> {
        let weight = parse_field(Field::Weight, weight)?;
        let height = parse_field(Field::Height, height)?;
        Self::new(weight, height)
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

fn is_positive(x: f64) -> bool {
    x.is_finite() && x > 0.0
}

fn parse_field(field: Field, value: &str) -> Result<f64, ValidationError> {
    f64::from_str(value.trim()).map_err(|_| ValidationError::NotANumber {
        field,
        value: value.to_owned(),
    })
}

/// Rejects blank usernames. A valid username is returned as typed, so
/// `" alice"` and `"alice"` are different users.
pub fn validate_username(username: &str) -> Result<&str, ValidationError> {
    if username.trim().is_empty() {
        Err(ValidationError::EmptyUsername)
    } else {
        Ok(username)
    }
}
