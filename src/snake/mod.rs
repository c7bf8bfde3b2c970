use std::collections::{HashSet, VecDeque};

use itertools::Itertools;
use serde::Serialize;
use tracing::{info, trace, warn};

pub use builder::{Builder, BuilderError};

use crate::basic::{Cell, Dir, GridDim};
use crate::config::{Config, INITIAL_LEN};
use crate::error::{Error, ErrorConversion, ErrorType, Result};

pub mod builder;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum State {
    Living,
    Crashed,
}

/// What the renderer gets back after every successful step
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Step {
    /// Every cell occupied after the step, an owned copy
    pub body: HashSet<Cell>,
    pub length: usize,
    pub food_eaten: bool,
    pub head: Cell,
}

// INVARIANT: `occupied` holds exactly the cells in `segments`
#[derive(Clone, Debug)]
struct Body {
    /// Head at the front, tail at the back
    segments: VecDeque<Cell>,
    occupied: HashSet<Cell>,
}

impl Body {
    fn from_segments(segments: impl IntoIterator<Item = Cell>) -> Self {
        let segments: VecDeque<_> = segments.into_iter().collect();
        let occupied = segments.iter().copied().collect();
        Self { segments, occupied }
    }

    // O(n), only used for checking
    fn is_consistent(&self, grid_dim: GridDim) -> bool {
        self.segments.len() == self.occupied.len()
            && self.segments.iter().all_unique()
            && self.segments.iter().all(|cell| self.occupied.contains(cell))
            && self
                .segments
                .iter()
                .tuple_windows()
                .all(|(a, b)| a.wrapping_dir_to(*b, grid_dim).is_some())
    }
}

/// A snake on a wrap-around grid
///
/// The body can only change through [`Snake::move_one_step`]:
///
/// ```compile_fail
/// let mut snake = wrap_snake::Snake::default();
/// snake.append_head(wrap_snake::Cell::new(13, 1));
/// ```
///
/// ```compile_fail
/// let mut snake = wrap_snake::Snake::default();
/// snake.remove_tail();
/// ```
#[derive(Clone, Debug)]
pub struct Snake {
    body: Body,
    dir: Dir,
    state: State,
    grid_dim: GridDim,
}

impl Default for Snake {
    /// The fixed starting position on the default grid
    fn default() -> Self {
        Self::initial(Config::default().grid_dim)
    }
}

impl Snake {
    /// The fixed starting position on the configured grid: three cells in
    /// the center row, occupying columns 2, 1 and 0, heading right
    pub fn new(config: &Config) -> Result<Self> {
        config
            .validate()
            .map_err(Error::from)
            .with_trace_step("Snake::new")?;
        Ok(Self::initial(config.grid_dim))
    }

    fn initial(grid_dim: GridDim) -> Self {
        let row = grid_dim.center_row();
        let segments = (0..INITIAL_LEN as isize)
            .rev()
            .map(|col| Cell::new(row, col));
        Self::from_parts(grid_dim, Dir::R, segments)
    }

    fn from_parts(grid_dim: GridDim, dir: Dir, segments: impl IntoIterator<Item = Cell>) -> Self {
        Self {
            body: Body::from_segments(segments),
            dir,
            state: State::Living,
            grid_dim,
        }
    }

    pub fn len(&self) -> usize {
        self.body.segments.len()
    }

    // never true for a snake built through `new`, `default` or `Builder`
    pub fn is_empty(&self) -> bool {
        self.body.segments.is_empty()
    }

    /// The direction of the last successful step
    pub fn dir(&self) -> Dir {
        self.dir
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn grid_dim(&self) -> GridDim {
        self.grid_dim
    }

    pub fn head(&self) -> Cell {
        self.body.segments[0]
    }

    pub fn tail(&self) -> Cell {
        self.body.segments[self.len() - 1]
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.occupied.contains(&cell)
    }

    /// Head to tail
    pub fn segments(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.segments.iter().copied()
    }

    /// Uniqueness, set/sequence agreement and adjacency of consecutive segments
    pub fn is_consistent(&self) -> bool {
        self.body.is_consistent(self.grid_dim)
    }

    /// Prepend a new head, no checks are made
    pub(crate) fn append_head(&mut self, cell: Cell) {
        self.body.segments.push_front(cell);
        self.body.occupied.insert(cell);
    }

    /// Drop the last segment unless it is also the head
    pub(crate) fn remove_tail(&mut self) {
        if self.len() > 1 {
            if let Some(tail) = self.body.segments.pop_back() {
                self.body.occupied.remove(&tail);
            }
        }
    }

    /// Advance by one cell in `dir`, growing if the new head lands on `food`
    ///
    /// The tail is removed before the collision check so the head may move
    /// into the cell the tail is leaving. A self-collision crashes the snake,
    /// any further call returns `ErrorType::Crashed`.
    pub fn move_one_step(&mut self, dir: Dir, food: Cell) -> Result<Step> {
        if self.state == State::Crashed {
            return Err(Error::from(ErrorType::Crashed)).with_trace_step("move_one_step");
        }

        self.check_food(food);

        let next_head = self.head().wrapping_translate(dir, 1, self.grid_dim);
        let food_eaten = next_head == food;
        if !food_eaten {
            self.remove_tail();
        }

        if self.contains(next_head) {
            info!(head = ?self.head(), ?next_head, ?dir, "snake crashed into itself");
            self.crash();
            return Err(Error::from(ErrorType::SelfCollision(next_head)))
                .with_trace_step("move_one_step");
        }

        self.append_head(next_head);
        self.dir = dir;
        debug_assert!(self.is_consistent(), "inconsistent snake: {:?}", self);

        if food_eaten {
            info!(?food, len = self.len(), "food eaten");
        }
        trace!(?next_head, ?dir, len = self.len(), "step");

        Ok(Step {
            body: self.body.occupied.clone(),
            length: self.len(),
            food_eaten,
            head: next_head,
        })
    }

    // food is expected on a free cell inside the grid, anything else
    // is tolerated but reported
    fn check_food(&self, food: Cell) {
        if !self.grid_dim.contains(food) {
            warn!(?food, grid_dim = ?self.grid_dim, "food is outside the grid");
        } else if self.contains(food) {
            warn!(?food, "food is on a cell occupied by the snake");
        }
    }

    fn crash(&mut self) {
        self.state = State::Crashed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Layout;
    use Dir::*;

    // far away from anything the tests walk over
    const NO_FOOD: Cell = Cell::new(0, 40);

    fn straight(head: Cell, dir: Dir, len: usize) -> Snake {
        Builder::default()
            .grid_dim(Config::default().grid_dim)
            .head(head)
            .dir(dir)
            .len(len)
            .build()
            .unwrap()
    }

    #[test]
    fn test_initial_snake() {
        let snake = Snake::default();
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.dir(), R);
        assert_eq!(snake.state(), State::Living);
        assert_eq!(
            snake.segments().collect::<Vec<_>>(),
            vec![Cell::new(13, 2), Cell::new(13, 1), Cell::new(13, 0)]
        );
        assert!(snake.is_consistent());
    }

    #[test]
    fn test_initial_snake_on_other_grids() {
        for rows in [1, 2, 4, 27, 30] {
            let config = Config { grid_dim: GridDim::new(rows, 3) };
            let snake = Snake::new(&config).unwrap();
            let center = rows / 2;
            assert_eq!(snake.head(), Cell::new(center, 2));
            assert_eq!(snake.tail(), Cell::new(center, 0));
            assert_eq!(snake.len(), 3);
        }

        let mobile = Snake::new(&Config::for_layout(Layout::Mobile)).unwrap();
        assert_eq!(mobile.head(), Cell::new(13, 2));
    }

    #[test]
    fn test_new_rejects_narrow_grid() {
        let config = Config { grid_dim: GridDim::new(10, 2) };
        let err = Snake::new(&config).unwrap_err();
        assert!(matches!(err.error_type(), ErrorType::ConfigError(_)));
        assert_eq!(err.trace().collect::<Vec<_>>(), vec!["Snake::new"]);
    }

    #[test]
    fn test_eat_food_in_front() {
        let mut snake = Snake::default();
        let step = snake.move_one_step(R, Cell::new(13, 3)).unwrap();
        assert_eq!(step.length, 4);
        assert!(step.food_eaten);
        assert!(step.body.contains(&Cell::new(13, 3)));
        assert!(step.body.contains(&Cell::new(13, 0)));
        assert_eq!(step.head, Cell::new(13, 3));
        assert_eq!(snake.len(), 4);
    }

    #[test]
    fn test_plain_step_keeps_length() {
        let mut snake = Snake::default();
        let step = snake.move_one_step(D, NO_FOOD).unwrap();
        assert!(!step.food_eaten);
        assert_eq!(step.length, 3);
        assert_eq!(snake.dir(), D);
        assert_eq!(
            snake.segments().collect::<Vec<_>>(),
            vec![Cell::new(14, 2), Cell::new(13, 2), Cell::new(13, 1)]
        );
        assert!(!snake.contains(Cell::new(13, 0)));
    }

    #[test]
    fn test_wraps_on_every_edge() {
        let mut snake = straight(Cell::new(13, 54), R, 3);
        snake.move_one_step(R, NO_FOOD).unwrap();
        assert_eq!(snake.head(), Cell::new(13, 0));

        let mut snake = straight(Cell::new(13, 0), L, 3);
        snake.move_one_step(L, NO_FOOD).unwrap();
        assert_eq!(snake.head(), Cell::new(13, 54));

        let mut snake = straight(Cell::new(0, 20), U, 3);
        snake.move_one_step(U, NO_FOOD).unwrap();
        assert_eq!(snake.head(), Cell::new(26, 20));

        let mut snake = straight(Cell::new(26, 20), D, 3);
        snake.move_one_step(D, NO_FOOD).unwrap();
        assert_eq!(snake.head(), Cell::new(0, 20));
        assert!(snake.is_consistent());
    }

    #[test]
    fn test_self_collision() {
        // (5,5) (5,4) (5,3) (5,2) (5,1)
        let mut snake = straight(Cell::new(5, 5), R, 5);
        snake.move_one_step(D, NO_FOOD).unwrap();
        snake.move_one_step(L, NO_FOOD).unwrap();
        // (5,4) is still part of the body after the tail moves on
        let err = snake.move_one_step(U, NO_FOOD).unwrap_err();
        assert!(err.is_self_collision());
        assert!(matches!(
            err.error_type(),
            ErrorType::SelfCollision(cell) if *cell == Cell::new(5, 4)
        ));
        assert_eq!(snake.state(), State::Crashed);
        assert_eq!(snake.dir(), L);
    }

    #[test]
    fn test_crashed_snake_refuses_steps() {
        let mut snake = Snake::default();
        // reversing runs into the neck
        assert!(snake.move_one_step(L, NO_FOOD).unwrap_err().is_self_collision());
        let len = snake.len();
        let err = snake.move_one_step(R, NO_FOOD).unwrap_err();
        assert!(matches!(err.error_type(), ErrorType::Crashed));
        assert_eq!(snake.len(), len);
    }

    #[test]
    fn test_head_may_follow_tail() {
        // (5,5) (5,4) (5,3) (5,2)
        let mut snake = straight(Cell::new(5, 5), R, 4);
        snake.move_one_step(D, NO_FOOD).unwrap();
        snake.move_one_step(L, NO_FOOD).unwrap();
        assert_eq!(snake.tail(), Cell::new(5, 4));

        let step = snake.move_one_step(U, NO_FOOD).unwrap();
        assert_eq!(step.head, Cell::new(5, 4));
        assert_eq!(step.length, 4);

        // and it can keep circling forever
        for dir in [R, D, L, U].iter().cycle().take(40) {
            snake.move_one_step(*dir, NO_FOOD).unwrap();
        }
        assert_eq!(snake.len(), 4);
        assert!(snake.is_consistent());
    }

    #[test]
    fn test_food_on_the_leaving_tail_crashes() {
        // (5,5) (5,4) (5,3) (5,2)
        let mut snake = straight(Cell::new(5, 5), R, 4);
        snake.move_one_step(D, NO_FOOD).unwrap();
        snake.move_one_step(L, NO_FOOD).unwrap();
        assert_eq!(snake.tail(), Cell::new(5, 4));

        // eating keeps the tail in place, so the head runs into it
        let err = snake.move_one_step(U, Cell::new(5, 4)).unwrap_err();
        assert!(err.is_self_collision());
        assert!(matches!(
            err.error_type(),
            ErrorType::SelfCollision(cell) if *cell == Cell::new(5, 4)
        ));
        assert_eq!(snake.state(), State::Crashed);
        assert_eq!(snake.len(), 4);
    }

    #[test]
    fn test_step_body_is_a_copy() {
        let mut snake = Snake::default();
        let mut step = snake.move_one_step(R, NO_FOOD).unwrap();
        step.body.clear();
        step.body.insert(Cell::new(20, 20));
        assert!(!snake.contains(Cell::new(20, 20)));
        assert_eq!(snake.len(), 3);

        let next = snake.move_one_step(R, NO_FOOD).unwrap();
        assert_eq!(next.body.len(), 3);
        assert!(next.body.contains(&Cell::new(13, 4)));
    }

    #[test]
    fn test_append_and_remove_primitives() {
        let mut snake = straight(Cell::new(3, 3), R, 1);
        snake.remove_tail();
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Cell::new(3, 3));

        snake.append_head(Cell::new(3, 4));
        assert_eq!(snake.len(), 2);
        assert!(snake.contains(Cell::new(3, 4)));
        assert_eq!(snake.tail(), Cell::new(3, 3));

        snake.remove_tail();
        assert_eq!(snake.len(), 1);
        assert!(!snake.contains(Cell::new(3, 3)));
        assert_eq!(snake.head(), Cell::new(3, 4));
    }

    #[test]
    fn test_food_on_the_body_is_tolerated() {
        let mut snake = Snake::default();
        let step = snake.move_one_step(D, Cell::new(13, 1)).unwrap();
        assert!(!step.food_eaten);
        assert_eq!(step.length, 3);

        let step = snake.move_one_step(D, Cell::new(100, 100)).unwrap();
        assert!(!step.food_eaten);
    }
}
