use serde::{Deserialize, Serialize};
use std::{error::Error, fmt};

use crate::constants::{DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, MAX_GRID_DIM};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimConfig {
    /// Deterministic seed for reproducible grid generation.
    pub seed: u64,
    /// Grid height in cells (toroidal rows).
    pub grid_height: usize,
    /// Grid width in cells (toroidal columns).
    pub grid_width: usize,
    /// Temperature at or above which an iceberg turns to sea.
    pub melting_point: f64,
    /// Pollution added by a city cell each day.
    pub pollution_change: f64,
    /// Upper clamp for per-cell pollution.
    pub pollution_threshold: f64,
    /// Divisor applied to pollution carried downwind.
    pub pollution_factor: f64,
    /// Passive per-day pollution decay, floored at 0.
    pub pollution_downage: f64,
    /// Temperature drop when rain falls.
    pub rain_temperature_change: f64,
    /// Pollution washed out when rain falls.
    pub rain_pollution_reduction: f64,
    /// Divisor in the rain-trigger score.
    pub rain_chance: f64,
    /// Elevation divisor in the rain-trigger score.
    pub rain_height_factor: u32,
    /// Temperature divisor in the rain-trigger score.
    pub rain_temperature_factor: f64,
    /// Rain falls once the trigger score exceeds this value.
    pub rain_threshold: f64,
    /// Full lifetime (days) of a wind vector.
    pub wind_ttl: u32,
    /// Winds with more remaining days than this propagate downwind.
    pub strong_wind_threshold: u32,
    /// Full lifetime (days) of a cloud.
    pub cloud_ttl: u32,
    /// Upper clamp for per-cell temperature.
    pub max_temperature: f64,
    /// Lower clamp for per-cell temperature.
    pub min_temperature: f64,
    /// Maximum cell elevation (metres) drawn at generation.
    pub max_height: u32,
    /// A generated cell is cloudy with probability 1 / (cloudy_chance + 1).
    pub cloudy_chance: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            grid_height: DEFAULT_GRID_HEIGHT,
            grid_width: DEFAULT_GRID_WIDTH,
            melting_point: 20.0,
            pollution_change: 0.001,
            pollution_threshold: 0.05,
            pollution_factor: 3.0,
            pollution_downage: 0.0005,
            rain_temperature_change: 2.5,
            rain_pollution_reduction: 0.01,
            rain_chance: 4.0,
            rain_height_factor: 20,
            rain_temperature_factor: 20.0,
            rain_threshold: 8.5,
            wind_ttl: 3,
            strong_wind_threshold: 2,
            cloud_ttl: 2,
            max_temperature: 45.0,
            min_temperature: -10.0,
            max_height: 100,
            cloudy_chance: 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimConfigError {
    InvalidGridHeight,
    InvalidGridWidth,
    GridTooLarge { max: usize, actual: usize },
    InvalidPollutionChange,
    InvalidPollutionThreshold,
    InvalidPollutionFactor,
    InvalidPollutionDownage,
    InvalidRainChance,
    InvalidRainHeightFactor,
    InvalidRainTemperatureFactor,
    InvalidRainThreshold,
    InvalidRainTemperatureChange,
    InvalidRainPollutionReduction,
    InvalidTemperatureRange,
    InvalidMeltingPoint,
}

impl fmt::Display for SimConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimConfigError::InvalidGridHeight => {
                write!(f, "grid_height must be greater than 0")
            }
            SimConfigError::InvalidGridWidth => {
                write!(f, "grid_width must be greater than 0")
            }
            SimConfigError::GridTooLarge { max, actual } => {
                write!(f, "grid dimension ({actual}) exceeds supported maximum ({max})")
            }
            SimConfigError::InvalidPollutionChange => {
                write!(f, "pollution_change must be finite and non-negative")
            }
            SimConfigError::InvalidPollutionThreshold => {
                write!(f, "pollution_threshold must be finite and non-negative")
            }
            SimConfigError::InvalidPollutionFactor => {
                write!(f, "pollution_factor must be finite and positive")
            }
            SimConfigError::InvalidPollutionDownage => {
                write!(f, "pollution_downage must be finite and non-negative")
            }
            SimConfigError::InvalidRainChance => {
                write!(f, "rain_chance must be finite and positive")
            }
            SimConfigError::InvalidRainHeightFactor => {
                write!(f, "rain_height_factor must be greater than 0")
            }
            SimConfigError::InvalidRainTemperatureFactor => {
                write!(f, "rain_temperature_factor must be finite and positive")
            }
            SimConfigError::InvalidRainThreshold => {
                write!(f, "rain_threshold must be finite")
            }
            SimConfigError::InvalidRainTemperatureChange => {
                write!(f, "rain_temperature_change must be finite and non-negative")
            }
            SimConfigError::InvalidRainPollutionReduction => {
                write!(f, "rain_pollution_reduction must be finite and non-negative")
            }
            SimConfigError::InvalidTemperatureRange => {
                write!(f, "min_temperature must be finite and below max_temperature")
            }
            SimConfigError::InvalidMeltingPoint => {
                write!(f, "melting_point must be finite")
            }
        }
    }
}

impl Error for SimConfigError {}

impl SimConfig {
    pub const MAX_GRID_DIM: usize = MAX_GRID_DIM;

    pub fn validate(&self) -> Result<(), SimConfigError> {
        self.validate_grid()?;
        self.validate_pollution()?;
        self.validate_rain()?;
        self.validate_temperature()?;
        Ok(())
    }

    fn validate_grid(&self) -> Result<(), SimConfigError> {
        if self.grid_height == 0 {
            return Err(SimConfigError::InvalidGridHeight);
        }
        if self.grid_width == 0 {
            return Err(SimConfigError::InvalidGridWidth);
        }
        let largest = self.grid_height.max(self.grid_width);
        if largest > Self::MAX_GRID_DIM {
            return Err(SimConfigError::GridTooLarge {
                max: Self::MAX_GRID_DIM,
                actual: largest,
            });
        }
        Ok(())
    }

    fn validate_pollution(&self) -> Result<(), SimConfigError> {
        if !self.pollution_change.is_finite() || self.pollution_change < 0.0 {
            return Err(SimConfigError::InvalidPollutionChange);
        }
        if !self.pollution_threshold.is_finite() || self.pollution_threshold < 0.0 {
            return Err(SimConfigError::InvalidPollutionThreshold);
        }
        if !self.pollution_factor.is_finite() || self.pollution_factor <= 0.0 {
            return Err(SimConfigError::InvalidPollutionFactor);
        }
        if !self.pollution_downage.is_finite() || self.pollution_downage < 0.0 {
            return Err(SimConfigError::InvalidPollutionDownage);
        }
        Ok(())
    }

    fn validate_rain(&self) -> Result<(), SimConfigError> {
        if !self.rain_chance.is_finite() || self.rain_chance <= 0.0 {
            return Err(SimConfigError::InvalidRainChance);
        }
        if self.rain_height_factor == 0 {
            return Err(SimConfigError::InvalidRainHeightFactor);
        }
        if !self.rain_temperature_factor.is_finite() || self.rain_temperature_factor <= 0.0 {
            return Err(SimConfigError::InvalidRainTemperatureFactor);
        }
        if !self.rain_threshold.is_finite() {
            return Err(SimConfigError::InvalidRainThreshold);
        }
        if !self.rain_temperature_change.is_finite() || self.rain_temperature_change < 0.0 {
            return Err(SimConfigError::InvalidRainTemperatureChange);
        }
        if !self.rain_pollution_reduction.is_finite() || self.rain_pollution_reduction < 0.0 {
            return Err(SimConfigError::InvalidRainPollutionReduction);
        }
        Ok(())
    }

    fn validate_temperature(&self) -> Result<(), SimConfigError> {
        if !self.min_temperature.is_finite()
            || !self.max_temperature.is_finite()
            || self.min_temperature >= self.max_temperature
        {
            return Err(SimConfigError::InvalidTemperatureRange);
        }
        if !self.melting_point.is_finite() {
            return Err(SimConfigError::InvalidMeltingPoint);
        }
        Ok(())
    }
}
