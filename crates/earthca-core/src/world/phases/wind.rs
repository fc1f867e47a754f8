use super::super::Simulation;
use crate::cell::{Delta, Wind};

impl Simulation {
    /// Diffuse pollution, cloud cover and strong winds downwind.
    ///
    /// Only winds with both axis components non-zero carry anything; a
    /// single-axis wind diffuses nothing. The computed delta is enqueued
    /// into the neighbor's inbox, never applied to its live state.
    pub(in crate::world) fn step_wind_phase(&mut self) {
        let (height, width) = self.grid.dimensions();
        let config = &self.config;
        let grid = &mut self.grid;

        for row in 0..height {
            for col in 0..width {
                let source = grid.get(row, col);
                if source.wind.dx == 0 || source.wind.dy == 0 {
                    continue;
                }

                let delta = Delta {
                    pollution: source.pollution / config.pollution_factor,
                    cloud: source.cloud.active,
                    // A strong wind passes itself on with a fresh lifetime.
                    wind: (source.wind.ttl > config.strong_wind_threshold).then_some(Wind {
                        dx: source.wind.dx,
                        dy: source.wind.dy,
                        ttl: config.wind_ttl,
                    }),
                };
                let (target_row, target_col) =
                    grid.neighbor(row, col, source.wind.dy, source.wind.dx);
                grid.get_mut(target_row, target_col).inbox.push(delta);
            }
        }
    }
}
