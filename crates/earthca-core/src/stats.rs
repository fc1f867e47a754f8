use serde::{Deserialize, Serialize};
use std::{error::Error, fmt};

use crate::grid::Grid;
use crate::history::{HistoryError, SimulationHistory};

/// Per-day aggregate: pollution and temperature averaged over all cells.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct DayAggregate {
    pub mean_temperature: f64,
    pub mean_pollution: f64,
}

/// Whole-run aggregate: mean and population standard deviation of the
/// per-day aggregates, plus a z-score per recorded day.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RunStatistics {
    pub mean_pollution: f64,
    pub mean_temperature: f64,
    pub stddev_pollution: f64,
    pub stddev_temperature: f64,
    pub pollution_z_scores: Vec<f64>,
    pub temperature_z_scores: Vec<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatMetric {
    Pollution,
    Temperature,
}

impl fmt::Display for StatMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatMetric::Pollution => write!(f, "pollution"),
            StatMetric::Temperature => write!(f, "temperature"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    EmptyHistory,
    /// The per-day aggregate is constant, so z-scores are undefined.
    DegenerateStatistics { metric: StatMetric },
}

impl fmt::Display for StatsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatsError::EmptyHistory => write!(f, "history holds no recorded days"),
            StatsError::DegenerateStatistics { metric } => {
                write!(f, "{metric} standard deviation is zero; z-scores undefined")
            }
        }
    }
}

impl Error for StatsError {}

fn grid_means(grid: &Grid) -> (f64, f64) {
    let (height, width) = grid.dimensions();
    let mut pollution_sum = 0.0;
    let mut temperature_sum = 0.0;
    grid.for_each_cell(|_, _, cell| {
        pollution_sum += cell.pollution;
        temperature_sum += cell.temperature;
    });
    let cell_count = (height * width) as f64;
    (pollution_sum / cell_count, temperature_sum / cell_count)
}

/// Average pollution and temperature across all cells of one recorded day.
pub fn aggregate_for_day(
    history: &SimulationHistory,
    day: usize,
) -> Result<DayAggregate, HistoryError> {
    let grid = history.snapshot_at(day)?;
    let (mean_pollution, mean_temperature) = grid_means(grid);
    Ok(DayAggregate {
        mean_temperature,
        mean_pollution,
    })
}

fn population_stddev(values: &[f64], mean: f64) -> f64 {
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Mean, population standard deviation and per-day z-scores of the per-day
/// aggregates across every recorded day.
pub fn run_statistics(history: &SimulationHistory) -> Result<RunStatistics, StatsError> {
    if history.is_empty() {
        return Err(StatsError::EmptyHistory);
    }

    let mut day_pollution = Vec::with_capacity(history.len());
    let mut day_temperature = Vec::with_capacity(history.len());
    for day in 0..history.len() {
        // Days 0..len are recorded by construction.
        let grid = history
            .snapshot_at(day)
            .unwrap_or_else(|e| panic!("history invariant broken: {e}"));
        let (pollution, temperature) = grid_means(grid);
        day_pollution.push(pollution);
        day_temperature.push(temperature);
    }

    let day_count = history.len() as f64;
    let mean_pollution = day_pollution.iter().sum::<f64>() / day_count;
    let mean_temperature = day_temperature.iter().sum::<f64>() / day_count;

    let stddev_pollution = population_stddev(&day_pollution, mean_pollution);
    if stddev_pollution == 0.0 {
        return Err(StatsError::DegenerateStatistics {
            metric: StatMetric::Pollution,
        });
    }
    let stddev_temperature = population_stddev(&day_temperature, mean_temperature);
    if stddev_temperature == 0.0 {
        return Err(StatsError::DegenerateStatistics {
            metric: StatMetric::Temperature,
        });
    }

    let pollution_z_scores = day_pollution
        .iter()
        .map(|v| (v - mean_pollution) / stddev_pollution)
        .collect();
    let temperature_z_scores = day_temperature
        .iter()
        .map(|v| (v - mean_temperature) / stddev_temperature)
        .collect();

    Ok(RunStatistics {
        mean_pollution,
        mean_temperature,
        stddev_pollution,
        stddev_temperature,
        pollution_z_scores,
        temperature_z_scores,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::grid::Grid;
    use crate::rng::create_rng;

    fn grid_with_uniform(pollution: f64, temperature: f64) -> Grid {
        let config = SimConfig {
            grid_height: 2,
            grid_width: 2,
            ..SimConfig::default()
        };
        let mut grid = Grid::generate(&config, &mut create_rng(0));
        for row in 0..2 {
            for col in 0..2 {
                let cell = grid.get_mut(row, col);
                cell.pollution = pollution;
                cell.temperature = temperature;
            }
        }
        grid
    }

    #[test]
    fn aggregate_for_day_averages_over_cells() {
        let mut history = SimulationHistory::new();
        history.record_snapshot(&grid_with_uniform(0.04, 20.0));
        let agg = aggregate_for_day(&history, 0).unwrap();
        assert!((agg.mean_pollution - 0.04).abs() < 1e-12);
        assert!((agg.mean_temperature - 20.0).abs() < 1e-12);
    }

    #[test]
    fn aggregate_for_unrecorded_day_fails() {
        let history = SimulationHistory::new();
        assert_eq!(
            aggregate_for_day(&history, 5),
            Err(HistoryError::OutOfRangeDay { day: 5, recorded: 0 })
        );
    }

    #[test]
    fn run_statistics_computes_population_stddev_and_z_scores() {
        let mut history = SimulationHistory::new();
        history.record_snapshot(&grid_with_uniform(0.01, 10.0));
        history.record_snapshot(&grid_with_uniform(0.03, 30.0));
        let stats = run_statistics(&history).unwrap();

        assert!((stats.mean_pollution - 0.02).abs() < 1e-12);
        assert!((stats.mean_temperature - 20.0).abs() < 1e-12);
        // Population stddev over {10, 30} is 10.
        assert!((stats.stddev_temperature - 10.0).abs() < 1e-12);
        assert!((stats.stddev_pollution - 0.01).abs() < 1e-12);
        assert_eq!(stats.pollution_z_scores.len(), 2);
        assert!((stats.temperature_z_scores[0] - (-1.0)).abs() < 1e-12);
        assert!((stats.temperature_z_scores[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn constant_aggregate_reports_degenerate_statistics_not_nan() {
        let mut history = SimulationHistory::new();
        for _ in 0..3 {
            history.record_snapshot(&grid_with_uniform(0.02, 15.0));
        }
        assert_eq!(
            run_statistics(&history),
            Err(StatsError::DegenerateStatistics {
                metric: StatMetric::Pollution
            })
        );
    }

    #[test]
    fn empty_history_is_rejected() {
        assert_eq!(
            run_statistics(&SimulationHistory::new()),
            Err(StatsError::EmptyHistory)
        );
    }
}
