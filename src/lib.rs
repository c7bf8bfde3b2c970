//! Movement and growth of a snake on a wrap-around grid
//!
//! The game loop builds a [`Snake`], then calls [`Snake::move_one_step`] once
//! per tick with the requested direction and the current food cell. A
//! self-collision comes back as an error for which
//! [`Error::is_self_collision`] is true.

#[macro_use]
extern crate derive_more;

pub use basic::{Cell, Dir, GridDim};
pub use config::{Config, Layout};
pub use error::{Error, ErrorType, Result};
pub use snake::{Snake, State, Step};

pub mod basic;
pub mod board;
pub mod config;
pub mod error;
pub mod snake;
