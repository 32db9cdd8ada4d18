//! weatherapi.com response shapes and their mapping to domain entities.

use serde::Deserialize;

use crate::domain::{City, Forecast, Weather};

#[derive(Debug, Deserialize)]
pub(crate) struct CityDto {
    pub id: i64,
    pub name: String,
    pub country: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ConditionDto {
    pub text: String,
    pub icon: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CurrentDto {
    pub last_updated: String,
    pub temp_c: f32,
    pub condition: ConditionDto,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CurrentResponseDto {
    pub current: CurrentDto,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DayWeatherDto {
    pub avgtemp_c: f32,
    pub condition: ConditionDto,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DayDto {
    pub date: String,
    pub day: DayWeatherDto,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ForecastDaysDto {
    #[serde(rename = "forecastday")]
    pub forecast_day: Vec<DayDto>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ForecastResponseDto {
    pub current: CurrentDto,
    pub forecast: ForecastDaysDto,
}

/// Icons come back protocol-relative at 64x64; ask for the larger variant.
fn icon_url(icon: &str) -> String {
    let url = if icon.starts_with("//") {
        format!("https:{icon}")
    } else {
        icon.to_string()
    };
    url.replace("64x64", "128x128")
}

impl From<CityDto> for City {
    fn from(dto: CityDto) -> Self {
        City::new(dto.id, dto.name, dto.country)
    }
}

impl From<CurrentDto> for Weather {
    fn from(dto: CurrentDto) -> Self {
        Weather {
            temp_c: dto.temp_c,
            condition_url: icon_url(&dto.condition.icon),
            condition_text: dto.condition.text,
            date: dto.last_updated,
        }
    }
}

impl From<DayDto> for Weather {
    fn from(dto: DayDto) -> Self {
        Weather {
            temp_c: dto.day.avgtemp_c,
            condition_url: icon_url(&dto.day.condition.icon),
            condition_text: dto.day.condition.text,
            date: dto.date,
        }
    }
}

impl From<ForecastResponseDto> for Forecast {
    fn from(dto: ForecastResponseDto) -> Self {
        // The first forecast day is today, already covered by `current`.
        let upcoming = dto
            .forecast
            .forecast_day
            .into_iter()
            .skip(1)
            .map(Weather::from)
            .collect();
        Forecast {
            current_weather: dto.current.into(),
            upcoming,
        }
    }
}
