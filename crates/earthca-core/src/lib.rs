pub mod cell;
pub mod config;
pub mod constants;
pub mod grid;
pub mod history;
pub mod rng;
pub mod stats;
pub mod world;

pub use cell::{Cell, CellSummary, Cloud, InvalidWindEncoding, TerrainKind, Wind};
pub use config::{SimConfig, SimConfigError};
pub use grid::Grid;
pub use history::{HistoryError, SimulationHistory};
pub use stats::{DayAggregate, RunStatistics, StatsError};
pub use world::{RunError, Simulation};
