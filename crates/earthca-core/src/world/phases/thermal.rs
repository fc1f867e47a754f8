use super::super::Simulation;
use crate::cell::TerrainKind;

impl Simulation {
    /// Pollution-driven warming, iceberg melt and city emission.
    ///
    /// Melt is the terrain machine's only transition and never reverses.
    pub(in crate::world) fn step_thermal_phase(&mut self) {
        let (height, width) = self.grid.dimensions();
        let config = &self.config;
        let grid = &mut self.grid;

        for row in 0..height {
            for col in 0..width {
                let cell = grid.get_mut(row, col);
                cell.temperature = (cell.pollution + cell.temperature).min(config.max_temperature);

                if cell.terrain == TerrainKind::Iceberg
                    && cell.temperature >= config.melting_point
                {
                    cell.terrain = TerrainKind::Sea;
                } else if cell.terrain == TerrainKind::City {
                    cell.pollution =
                        (cell.pollution + config.pollution_change).min(config.pollution_threshold);
                }
            }
        }
    }
}
