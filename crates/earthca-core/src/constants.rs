/// Largest valid grid dimension (cells per axis). Keeps `width * height`
/// and snapshot memory far away from any usize overflow.
pub const MAX_GRID_DIM: usize = 512;

/// Default grid height in cells.
pub const DEFAULT_GRID_HEIGHT: usize = 10;

/// Default grid width in cells.
pub const DEFAULT_GRID_WIDTH: usize = 10;
