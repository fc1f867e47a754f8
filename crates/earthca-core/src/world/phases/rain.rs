use super::super::Simulation;

impl Simulation {
    /// Advance the dry-day counter and resolve the deterministic rain
    /// trigger for cloudy cells.
    ///
    /// The trigger grows with days since the last rain and shrinks with
    /// elevation and temperature (floor division on both, matching the
    /// counter variant). After the check the cloud flag stays set only
    /// while its remaining ticks are non-zero.
    pub(in crate::world) fn step_rain_phase(&mut self) {
        let (height, width) = self.grid.dimensions();
        let config = &self.config;
        let grid = &mut self.grid;

        for row in 0..height {
            for col in 0..width {
                let cell = grid.get_mut(row, col);
                cell.days_since_rain = cell.days_since_rain.saturating_add(1);
                if !cell.cloud.active {
                    continue;
                }

                let elevation_relief = f64::from(cell.elevation / config.rain_height_factor);
                let warmth_relief = (cell.temperature / config.rain_temperature_factor).floor();
                let score = (f64::from(cell.days_since_rain) - elevation_relief - warmth_relief)
                    / config.rain_chance;
                if score > config.rain_threshold {
                    cell.temperature = (cell.temperature - config.rain_temperature_change)
                        .clamp(config.min_temperature, config.max_temperature);
                    cell.pollution = (cell.pollution - config.rain_pollution_reduction).max(0.0);
                    cell.days_since_rain = 0;
                }

                cell.cloud.active = cell.cloud.ttl != 0;
            }
        }
    }
}
