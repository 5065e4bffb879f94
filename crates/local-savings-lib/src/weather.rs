use crate::error::WeatherError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeatherCondition {
    Sunny,
    Cloudy,
    PartlyCloudy,
}

impl WeatherCondition {
    pub const ALL: [WeatherCondition; 3] = [
        WeatherCondition::Sunny,
        WeatherCondition::Cloudy,
        WeatherCondition::PartlyCloudy,
    ];

    pub fn icon_class(&self) -> &'static str {
        match self {
            WeatherCondition::Sunny => "fas fa-sun",
            WeatherCondition::Cloudy => "fas fa-cloud",
            WeatherCondition::PartlyCloudy => "fas fa-cloud-sun",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WeatherCondition::Sunny => "Sunny",
            WeatherCondition::Cloudy => "Cloudy",
            WeatherCondition::PartlyCloudy => "Partly cloudy",
        }
    }
}

impl FromStr for WeatherCondition {
    type Err = WeatherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sunny" => Ok(WeatherCondition::Sunny),
            "cloudy" => Ok(WeatherCondition::Cloudy),
            "partly-cloudy" => Ok(WeatherCondition::PartlyCloudy),
            other => Err(WeatherError::UnknownCondition(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherReading {
    temperature_f: i32,
    condition: WeatherCondition,
}

impl WeatherReading {
    pub fn new(temperature_f: i32, condition: WeatherCondition) -> Self {
        Self {
            temperature_f,
            condition,
        }
    }

    pub fn temperature_f(&self) -> i32 {
        self.temperature_f
    }

    pub fn condition(&self) -> WeatherCondition {
        self.condition
    }

    pub fn temperature_label(&self) -> String {
        format!("{}°F", self.temperature_f)
    }
}

pub trait WeatherProvider {
    fn fetch(&mut self) -> Result<WeatherReading, WeatherError>;
}

/// Stand-in for a real forecast API: 65-90°F and a random sky.
pub struct MockWeather {
    rng: StdRng,
}

impl MockWeather {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for MockWeather {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherProvider for MockWeather {
    fn fetch(&mut self) -> Result<WeatherReading, WeatherError> {
        let temperature = (65.0 + self.rng.gen::<f64>() * 25.0).round() as i32;
        let condition = WeatherCondition::ALL[self.rng.gen_range(0..WeatherCondition::ALL.len())];
        Ok(WeatherReading::new(temperature, condition))
    }
}
