use std::{error::Error, fmt};

use crate::config::{SimConfig, SimConfigError};
use crate::grid::Grid;
use crate::history::SimulationHistory;
use crate::rng;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    TooManyDays { max: usize, actual: usize },
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::TooManyDays { max, actual } => {
                write!(f, "days ({actual}) exceed supported maximum ({max})")
            }
        }
    }
}

impl Error for RunError {}

/// The evolution engine: owns the grid and advances it one day at a time.
///
/// Each day runs two strictly ordered phases. The evaluate sweeps read only
/// the cell they mutate; any cross-cell effect is enqueued into the target
/// cell's inbox. The commit sweep runs once every cell has been evaluated and
/// drains the inboxes, so results never depend on cell-processing order.
pub struct Simulation {
    grid: Grid,
    config: SimConfig,
    day: usize,
}

impl Simulation {
    pub const MAX_RUN_DAYS: usize = 1_000_000;

    /// Validate the config and generate the day-0 grid from its seed.
    pub fn new(config: SimConfig) -> Result<Self, SimConfigError> {
        config.validate()?;
        let mut rng = rng::create_rng(config.seed);
        let grid = Grid::generate(&config, &mut rng);
        Ok(Self {
            grid,
            config,
            day: 0,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Days advanced since generation.
    pub fn day(&self) -> usize {
        self.day
    }

    /// Advance the grid by exactly one day.
    pub fn step(&mut self) {
        self.day = self.day.saturating_add(1);

        // Phase 1: evaluate. Sweep order mirrors the per-cell rule order;
        // each sweep touches only the visited cell's own state, except the
        // wind sweep which appends to the downwind neighbor's inbox.
        self.step_thermal_phase();
        self.step_wind_phase();
        self.step_rain_phase();
        self.step_decay_phase();

        // Phase 2: commit all enqueued deltas.
        self.step_commit_phase();
    }

    /// Step `days` times, recording the initial state and one snapshot after
    /// each day. The returned history holds `days + 1` entries; entry `d` is
    /// the state after `d` days.
    pub fn run(&mut self, days: usize) -> Result<SimulationHistory, RunError> {
        if days > Self::MAX_RUN_DAYS {
            return Err(RunError::TooManyDays {
                max: Self::MAX_RUN_DAYS,
                actual: days,
            });
        }
        let mut history = SimulationHistory::new();
        history.record_snapshot(&self.grid);
        for _ in 0..days {
            self.step();
            history.record_snapshot(&self.grid);
        }
        Ok(history)
    }
}

mod phases;
