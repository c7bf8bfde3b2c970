//! Grid dimensions and the layouts they come from

use crate::basic::GridDim;
use serde::{Deserialize, Serialize};
use static_assertions::const_assert;
use std::fmt::{Display, Formatter};

pub const ROW_LENGTH: isize = 27;
pub const COL_LENGTH: isize = 55;

/// Viewports at most this wide (in pixels) get the square mobile grid
pub const MOBILE_MAX_WIDTH: u32 = 640;

/// Number of segments a freshly constructed snake has
pub const INITIAL_LEN: usize = 3;

const_assert!(ROW_LENGTH > 0);
const_assert!(COL_LENGTH > 0);
// the initial body sits in columns 0..INITIAL_LEN of the center row
const_assert!(COL_LENGTH >= INITIAL_LEN as isize);

#[derive(Debug)]
#[must_use]
pub struct ConfigError(pub GridDim, pub &'static str);

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "config error: {} (grid: {:?})", self.1, self.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Layout {
    Desktop,
    Mobile,
}

impl Layout {
    pub fn for_viewport_width(width: u32) -> Self {
        if width <= MOBILE_MAX_WIDTH {
            Self::Mobile
        } else {
            Self::Desktop
        }
    }

    pub fn grid_dim(self) -> GridDim {
        match self {
            Self::Desktop => GridDim::new(ROW_LENGTH, COL_LENGTH),
            Self::Mobile => GridDim::new(ROW_LENGTH, ROW_LENGTH),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub grid_dim: GridDim,
}

impl Default for Config {
    fn default() -> Self {
        Self::for_layout(Layout::Desktop)
    }
}

impl Config {
    pub fn for_layout(layout: Layout) -> Self {
        Self { grid_dim: layout.grid_dim() }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let GridDim { row, col } = self.grid_dim;
        if row <= 0 || col <= 0 {
            return Err(ConfigError(self.grid_dim, "grid extents must be positive"));
        }
        if col < INITIAL_LEN as isize {
            return Err(ConfigError(
                self.grid_dim,
                "grid is too narrow for the initial snake",
            ));
        }
        if self.grid_dim.checked_area().is_none() {
            return Err(ConfigError(self.grid_dim, "grid has too many cells"));
        }
        Ok(())
    }
}
