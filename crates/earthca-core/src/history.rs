use std::{error::Error, fmt};

use crate::grid::Grid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryError {
    OutOfRangeDay { day: usize, recorded: usize },
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryError::OutOfRangeDay { day, recorded } => {
                write!(f, "day {day} not recorded (history holds {recorded} days)")
            }
        }
    }
}

impl Error for HistoryError {}

/// Append-only sequence of independent deep snapshots of the grid, one per
/// day. A later mutation of the live grid never alters a recorded entry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimulationHistory {
    snapshots: Vec<Grid>,
}

impl SimulationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_snapshot(&mut self, grid: &Grid) {
        self.snapshots.push(grid.clone());
    }

    pub fn snapshot_at(&self, day: usize) -> Result<&Grid, HistoryError> {
        self.snapshots.get(day).ok_or(HistoryError::OutOfRangeDay {
            day,
            recorded: self.snapshots.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::rng::create_rng;

    fn grid() -> Grid {
        let config = SimConfig {
            grid_height: 2,
            grid_width: 2,
            ..SimConfig::default()
        };
        Grid::generate(&config, &mut create_rng(0))
    }

    #[test]
    fn snapshot_at_returns_recorded_entries_in_order() {
        let mut history = SimulationHistory::new();
        let g = grid();
        history.record_snapshot(&g);
        history.record_snapshot(&g);
        assert_eq!(history.len(), 2);
        assert_eq!(history.snapshot_at(0).unwrap(), &g);
        assert_eq!(history.snapshot_at(1).unwrap(), &g);
    }

    #[test]
    fn unrecorded_day_is_a_typed_error() {
        let mut history = SimulationHistory::new();
        assert_eq!(
            history.snapshot_at(0),
            Err(HistoryError::OutOfRangeDay { day: 0, recorded: 0 })
        );
        history.record_snapshot(&grid());
        assert_eq!(
            history.snapshot_at(3),
            Err(HistoryError::OutOfRangeDay { day: 3, recorded: 1 })
        );
    }

    #[test]
    fn snapshots_are_independent_of_the_live_grid() {
        let mut history = SimulationHistory::new();
        let mut g = grid();
        history.record_snapshot(&g);
        let before = history.snapshot_at(0).unwrap().clone();

        g.get_mut(0, 0).pollution = 1.0;
        g.get_mut(1, 1).temperature = -5.0;

        assert_eq!(history.snapshot_at(0).unwrap(), &before);
    }
}
