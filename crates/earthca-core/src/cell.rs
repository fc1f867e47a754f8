use serde::{Deserialize, Serialize};
use std::{error::Error, fmt};

/// Terrain of a single grid cell. The only legal transition is
/// `Iceberg -> Sea`, performed by the evolution engine when a cell
/// reaches the melting point; every other kind is stable.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TerrainKind {
    Land,
    Sea,
    Iceberg,
    Forest,
    City,
}

impl TerrainKind {
    /// Display color key used by external renderers.
    pub fn color_key(self) -> &'static str {
        match self {
            TerrainKind::Land => "brown",
            TerrainKind::Sea => "blue",
            TerrainKind::Iceberg => "white",
            TerrainKind::Forest => "green",
            TerrainKind::City => "gray",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidWindEncoding {
    pub dx: i8,
    pub dy: i8,
}

impl fmt::Display for InvalidWindEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "wind components ({}, {}) outside {{-1, 0, 1}}",
            self.dx, self.dy
        )
    }
}

impl Error for InvalidWindEncoding {}

/// A wind vector: per-axis direction components in {-1, 0, 1} and a
/// remaining-lifetime counter in days.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Wind {
    pub dx: i8,
    pub dy: i8,
    pub ttl: u32,
}

impl Wind {
    pub fn new(dx: i8, dy: i8, ttl: u32) -> Result<Self, InvalidWindEncoding> {
        if !(-1..=1).contains(&dx) || !(-1..=1).contains(&dy) {
            return Err(InvalidWindEncoding { dx, dy });
        }
        Ok(Self { dx, dy, ttl })
    }

    pub fn calm() -> Self {
        Self { dx: 0, dy: 0, ttl: 0 }
    }

    /// Compass glyph for the direction: 8 arrows keyed on the sign pair,
    /// `[]` for a calm or expired wind.
    ///
    /// Only the 9 enumerated encodings are representable; anything else is
    /// an invariant violation and aborts.
    pub fn glyph(&self) -> &'static str {
        if self.ttl == 0 {
            return "[]";
        }
        match (self.dx, self.dy) {
            (0, 0) => "[]",
            (-1, -1) => "\u{2196}",
            (0, -1) => "\u{2191}",
            (1, -1) => "\u{2197}",
            (-1, 0) => "\u{2190}",
            (1, 0) => "\u{2192}",
            (-1, 1) => "\u{2199}",
            (0, 1) => "\u{2193}",
            (1, 1) => "\u{2198}",
            (dx, dy) => panic!("invalid wind encoding: ({dx}, {dy})"),
        }
    }

    /// Remaining strength, rendered after the glyph.
    pub fn strength(&self) -> u32 {
        self.ttl
    }
}

/// Cloud cover: a flag plus a remaining-lifetime counter in days.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cloud {
    pub active: bool,
    pub ttl: u32,
}

/// A change computed by a neighbor during the evaluate phase, applied to the
/// owning cell only during the commit phase.
#[derive(Clone, Debug, PartialEq)]
pub struct Delta {
    pub pollution: f64,
    pub cloud: bool,
    pub wind: Option<Wind>,
}

/// One grid location's state. Pure state holder: all mutation beyond the
/// formatting projections lives in the evolution engine.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Cell {
    pub terrain: TerrainKind,
    pub elevation: u32,
    pub wind: Wind,
    pub cloud: Cloud,
    pub pollution: f64,
    pub temperature: f64,
    pub days_since_rain: u32,
    /// Transient delta queue. Empty outside the evaluate/commit window of a
    /// single step; owned exclusively by this cell.
    #[serde(skip)]
    pub(crate) inbox: Vec<Delta>,
}

/// Read-only projection of a cell for external consumers.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CellSummary {
    pub terrain: TerrainKind,
    pub elevation: u32,
    pub wind_glyph: String,
    pub wind_strength: u32,
    pub cloud_flag: bool,
    pub cloud_ticks: u32,
    pub pollution: f64,
    pub temperature: f64,
}

impl Cell {
    pub fn summary(&self) -> CellSummary {
        CellSummary {
            terrain: self.terrain,
            elevation: self.elevation,
            wind_glyph: self.wind.glyph().to_string(),
            wind_strength: self.wind.strength(),
            cloud_flag: self.cloud.active,
            cloud_ticks: self.cloud.ttl,
            pollution: self.pollution,
            temperature: self.temperature,
        }
    }

    /// Multi-line text rendering of elevation, wind, cloud, pollution and
    /// temperature, for external renderers.
    pub fn info(&self) -> String {
        format!(
            "{}m\n{}{} {} {}\n{:.2}p {:.2}c",
            self.elevation,
            self.wind.glyph(),
            self.wind.strength(),
            if self.cloud.active { "cloudy" } else { "clear" },
            self.cloud.ttl,
            self.pollution,
            self.temperature,
        )
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} {}m {}{} {} {} {} {}c",
            self.terrain,
            self.elevation,
            self.wind.glyph(),
            self.wind.strength(),
            if self.cloud.active { "cloudy" } else { "clear" },
            self.cloud.ttl,
            self.pollution,
            self.temperature,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wind_glyph_covers_all_nine_cases() {
        let cases = [
            ((-1, -1), "\u{2196}"),
            ((0, -1), "\u{2191}"),
            ((1, -1), "\u{2197}"),
            ((-1, 0), "\u{2190}"),
            ((0, 0), "[]"),
            ((1, 0), "\u{2192}"),
            ((-1, 1), "\u{2199}"),
            ((0, 1), "\u{2193}"),
            ((1, 1), "\u{2198}"),
        ];
        for ((dx, dy), expected) in cases {
            let wind = Wind::new(dx, dy, 2).unwrap();
            assert_eq!(wind.glyph(), expected, "direction ({dx}, {dy})");
        }
    }

    #[test]
    fn expired_wind_renders_calm_regardless_of_direction() {
        let wind = Wind::new(1, 1, 0).unwrap();
        assert_eq!(wind.glyph(), "[]");
    }

    #[test]
    fn out_of_range_components_are_rejected() {
        assert_eq!(
            Wind::new(2, 0, 1),
            Err(InvalidWindEncoding { dx: 2, dy: 0 })
        );
        assert_eq!(
            Wind::new(0, -2, 1),
            Err(InvalidWindEncoding { dx: 0, dy: -2 })
        );
    }

    #[test]
    #[should_panic(expected = "invalid wind encoding")]
    fn unrepresentable_vector_reaching_glyph_aborts() {
        // Bypasses `Wind::new` deliberately; the glyph projection treats
        // this as a fatal invariant violation.
        let wind = Wind { dx: 2, dy: 0, ttl: 1 };
        let _ = wind.glyph();
    }

    #[test]
    fn summary_projects_current_state() {
        let cell = Cell {
            terrain: TerrainKind::City,
            elevation: 42,
            wind: Wind::new(1, -1, 3).unwrap(),
            cloud: Cloud { active: true, ttl: 2 },
            pollution: 0.03,
            temperature: 21.5,
            days_since_rain: 4,
            inbox: Vec::new(),
        };
        let summary = cell.summary();
        assert_eq!(summary.terrain, TerrainKind::City);
        assert_eq!(summary.elevation, 42);
        assert_eq!(summary.wind_glyph, "\u{2197}");
        assert_eq!(summary.wind_strength, 3);
        assert!(summary.cloud_flag);
        assert_eq!(summary.cloud_ticks, 2);
    }

    #[test]
    fn info_renders_three_lines() {
        let cell = Cell {
            terrain: TerrainKind::Land,
            elevation: 10,
            wind: Wind::calm(),
            cloud: Cloud { active: false, ttl: 0 },
            pollution: 0.0,
            temperature: 5.0,
            days_since_rain: 0,
            inbox: Vec::new(),
        };
        assert_eq!(cell.info(), "10m\n[]0 clear 0\n0.00p 5.00c");
    }

    #[test]
    fn color_keys_match_terrain() {
        assert_eq!(TerrainKind::Land.color_key(), "brown");
        assert_eq!(TerrainKind::Sea.color_key(), "blue");
        assert_eq!(TerrainKind::Iceberg.color_key(), "white");
        assert_eq!(TerrainKind::Forest.color_key(), "green");
        assert_eq!(TerrainKind::City.color_key(), "gray");
    }
}
