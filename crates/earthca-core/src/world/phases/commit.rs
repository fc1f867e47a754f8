use super::super::Simulation;
use crate::cell::Cloud;

impl Simulation {
    /// Drain every cell's inbox in arrival order, applying the deltas
    /// enqueued during the evaluate phase. Runs only after every cell has
    /// been evaluated, leaving all inboxes empty.
    pub(in crate::world) fn step_commit_phase(&mut self) {
        let (height, width) = self.grid.dimensions();
        let config = &self.config;
        let grid = &mut self.grid;

        for row in 0..height {
            for col in 0..width {
                let cell = grid.get_mut(row, col);
                for delta in std::mem::take(&mut cell.inbox) {
                    if let Some(wind) = delta.wind {
                        cell.wind = wind;
                    }
                    cell.pollution =
                        (cell.pollution + delta.pollution).min(config.pollution_threshold);
                    if delta.cloud {
                        cell.cloud = Cloud {
                            active: true,
                            ttl: config.cloud_ttl,
                        };
                    }
                }
            }
        }
    }
}
