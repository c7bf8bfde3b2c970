use super::*;
use std::fmt::{Display, Formatter};
use tracing::debug;

#[derive(Debug, Error)]
#[must_use]
pub struct BuilderError(pub Box<Builder>, pub &'static str);

impl Display for BuilderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "snake builder error: {}", self.1)?;
        write!(f, "builder: {:?}", self.0)
    }
}

/// Builds a straight snake, the body trails behind the head
/// (opposite to `dir`) and wraps around the grid edges
#[derive(Default, Clone, Debug)]
pub struct Builder {
    pub grid_dim: Option<GridDim>,
    pub head: Option<Cell>,
    pub dir: Option<Dir>,
    pub len: Option<usize>,
}

impl Builder {
    #[inline(always)]
    #[must_use]
    pub fn grid_dim(mut self, value: GridDim) -> Self {
        self.grid_dim = Some(value);
        self
    }

    #[inline(always)]
    #[must_use]
    pub fn head(mut self, value: Cell) -> Self {
        self.head = Some(value);
        self
    }

    #[inline(always)]
    #[must_use]
    pub fn dir(mut self, value: Dir) -> Self {
        self.dir = Some(value);
        self
    }

    #[inline(always)]
    #[must_use]
    pub fn len(mut self, value: usize) -> Self {
        self.len = Some(value);
        self
    }

    fn error(&self, message: &'static str) -> BuilderError {
        BuilderError(Box::new(self.clone()), message)
    }

    pub fn build(&self) -> std::result::Result<Snake, BuilderError> {
        let grid_dim = self
            .grid_dim
            .ok_or_else(|| self.error("missing field `grid_dim`"))?;
        let head = self.head.ok_or_else(|| self.error("missing field `head`"))?;
        let dir = self.dir.ok_or_else(|| self.error("missing field `dir`"))?;
        let len = self.len.ok_or_else(|| self.error("missing field `len`"))?;

        if grid_dim.row <= 0 || grid_dim.col <= 0 {
            return Err(self.error("grid extents must be positive"));
        }
        if grid_dim.checked_area().is_none() {
            return Err(self.error("grid has too many cells"));
        }
        if !grid_dim.contains(head) {
            return Err(self.error("head is outside the grid"));
        }
        if len == 0 {
            return Err(self.error("a snake needs at least one segment"));
        }
        let room = if dir.is_horizontal() { grid_dim.col } else { grid_dim.row };
        if len > room as usize {
            return Err(self.error("snake is too long to fit without overlapping itself"));
        }

        debug!(
            "spawn snake at {:?} coming from {:?} going to {:?} (len: {})",
            head, -dir, dir, len
        );

        let segments = (0..len).map(|i| head.wrapping_translate(-dir, i, grid_dim));
        Ok(Snake::from_parts(grid_dim, dir, segments))
    }
}
