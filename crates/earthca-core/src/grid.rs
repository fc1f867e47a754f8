use rand::Rng;
use rand_chacha::ChaCha12Rng;
use serde::{Deserialize, Serialize};

use crate::cell::{Cell, Cloud, TerrainKind, Wind};
use crate::config::SimConfig;

/// Fixed-size toroidal grid of cells, row-major. All neighbor addressing
/// wraps, so no out-of-bounds coordinate is representable after the wrap.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Grid {
    height: usize,
    width: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Generate a grid from an explicitly seeded RNG. Draw order per cell is
    /// fixed (terrain, elevation, cloud, wind, temperature) so a given seed
    /// always yields the same world.
    pub fn generate(config: &SimConfig, rng: &mut ChaCha12Rng) -> Self {
        let height = config.grid_height;
        let width = config.grid_width;
        let mut cells = Vec::with_capacity(height * width);
        for _ in 0..height * width {
            cells.push(Self::generate_cell(config, rng));
        }
        Self {
            height,
            width,
            cells,
        }
    }

    fn generate_cell(config: &SimConfig, rng: &mut ChaCha12Rng) -> Cell {
        let terrain = match rng.random_range(0..5) {
            0 => TerrainKind::Land,
            1 => TerrainKind::Sea,
            2 => TerrainKind::Iceberg,
            3 => TerrainKind::Forest,
            _ => TerrainKind::City,
        };
        let elevation = rng.random_range(0..=config.max_height);
        let cloud = Cloud {
            active: rng.random_range(0..=config.cloudy_chance) == 0,
            ttl: config.cloud_ttl,
        };
        let wind = Wind {
            dx: rng.random_range(-1i8..=1),
            dy: rng.random_range(-1i8..=1),
            ttl: rng.random_range(0..=config.wind_ttl),
        };
        let temperature = rng.random_range(config.min_temperature..=config.max_temperature);
        Cell {
            terrain,
            elevation,
            wind,
            cloud,
            pollution: 0.0,
            temperature,
            days_since_rain: 0,
            inbox: Vec::new(),
        }
    }

    /// (height, width) in cells.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn get(&self, row: usize, col: usize) -> &Cell {
        debug_assert!(row < self.height && col < self.width);
        &self.cells[row * self.width + col]
    }

    pub(crate) fn get_mut(&mut self, row: usize, col: usize) -> &mut Cell {
        debug_assert!(row < self.height && col < self.width);
        &mut self.cells[row * self.width + col]
    }

    /// Toroidal neighbor address: `((row + dy) mod H, (col + dx) mod W)`.
    pub fn neighbor(&self, row: usize, col: usize, dy: i8, dx: i8) -> (usize, usize) {
        let wrapped_row = (row as isize + dy as isize).rem_euclid(self.height as isize) as usize;
        let wrapped_col = (col as isize + dx as isize).rem_euclid(self.width as isize) as usize;
        debug_assert!(wrapped_row < self.height && wrapped_col < self.width);
        (wrapped_row, wrapped_col)
    }

    /// Visit every cell in row-major order.
    pub fn for_each_cell(&self, mut visit: impl FnMut(usize, usize, &Cell)) {
        for row in 0..self.height {
            for col in 0..self.width {
                visit(row, col, self.get(row, col));
            }
        }
    }
}
