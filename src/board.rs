use rand::distributions::uniform::SampleRange;
use rand::Rng;

use crate::basic::Cell;
use crate::snake::Snake;

/// A uniformly chosen cell the snake does not occupy, None if the grid is full
///
/// Meant for whoever places the food, the snake itself never calls this.
pub fn random_free_cell(snake: &Snake, rng: &mut impl Rng) -> Option<Cell> {
    let grid_dim = snake.grid_dim();
    let mut occupied_cells: Vec<_> = snake.segments().collect();
    // row-major order, the same order as Cell::index
    occupied_cells.sort_unstable();

    let free_cells = grid_dim.area() - occupied_cells.len();
    if free_cells == 0 {
        return None;
    }

    let mut new_idx = (0..free_cells).sample_single(rng);
    for cell in occupied_cells {
        if cell.index(grid_dim) <= new_idx {
            new_idx += 1;
        }
    }

    assert!(new_idx < grid_dim.area());
    Some(Cell::from_index(new_idx, grid_dim))
}
