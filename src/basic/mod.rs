pub use cell::{Cell, GridDim};
pub use dir::Dir;

mod cell;
mod dir;
