use serde::{Deserialize, Serialize};

/// A city as returned by search and stored in favourites.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct City {
    pub id: i64,
    pub name: String,
    pub country: String,
}

impl City {
    pub fn new(id: i64, name: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            country: country.into(),
        }
    }
}

/// Weather at one point in time (current conditions or one forecast day).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    pub temp_c: f32,
    pub condition_text: String,
    pub condition_url: String,
    /// ISO date (`YYYY-MM-DD`) or local timestamp as reported upstream.
    pub date: String,
}

/// Current weather plus the upcoming days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub current_weather: Weather,
    pub upcoming: Vec<Weather>,
}
