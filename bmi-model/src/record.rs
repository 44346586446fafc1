use chrono::NaiveDateTime;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::{Classification, Measurement};

#[derive(Clone, Copy, Debug, Display, EnumString, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Category {
    #[strum(serialize = "Underweight")]
    #[cfg_attr(feature = "serde", serde(rename = "Underweight"))]
    Underweight,
    #[strum(serialize = "Normal weight")]
    #[cfg_attr(feature = "serde", serde(rename = "Normal weight"))]
    NormalWeight,
    #[strum(serialize = "Overweight")]
    #[cfg_attr(feature = "serde", serde(rename = "Overweight"))]
    Overweight,
    #[strum(serialize = "Obesity")]
    #[cfg_attr(feature = "serde", serde(rename = "Obesity"))]
    Obesity,
}

/// A measurement that has not been stored yet.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NewRecord {
    pub username: String,
    pub weight: f64,
    pub height: f64,
    pub bmi: f64,
    pub category: Category,
}

impl NewRecord {
    pub fn new(username: &str, measurement: Measurement, classification: Classification) -> Self {
        Self {
            username: username.to_owned(),
            weight: measurement.weight(),
            height: measurement.height(),
            bmi: classification.bmi,
            category: classification.category,
        }
    }
}

/// A stored measurement. `id` and `date` are assigned by the store.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BmiRecord {
    pub id: i64,
    pub username: String,
    pub weight: f64,
    pub height: f64,
    pub bmi: f64,
    pub category: Category,
    pub date: NaiveDateTime,
}
