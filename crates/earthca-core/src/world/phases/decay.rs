use super::super::Simulation;

impl Simulation {
    /// Tick down transient effects: cloud and wind lifetimes, passive
    /// pollution decay.
    pub(in crate::world) fn step_decay_phase(&mut self) {
        let (height, width) = self.grid.dimensions();
        let config = &self.config;
        let grid = &mut self.grid;

        for row in 0..height {
            for col in 0..width {
                let cell = grid.get_mut(row, col);
                cell.cloud.ttl = cell.cloud.ttl.saturating_sub(1);
                cell.wind.ttl = cell.wind.ttl.saturating_sub(1);
                cell.pollution = (cell.pollution - config.pollution_downage).max(0.0);
            }
        }
    }
}
