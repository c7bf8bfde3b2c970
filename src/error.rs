use crate::basic::Cell;
use crate::config::ConfigError;
use crate::snake;
use std::fmt::{Debug, Display, Formatter};
use std::{fmt, result};

#[derive(Debug)]
pub enum ErrorType {
    /// The next head would land on a cell the body still occupies
    SelfCollision(Cell),
    /// A step was requested from a snake that already crashed
    Crashed,
    InvalidDirection(u8),
    SnakeBuilderError(snake::BuilderError),
    ConfigError(ConfigError),
}

/// The second member contains a trace in reverse order
#[must_use]
pub struct Error(ErrorType, Vec<String>);

impl From<ErrorType> for Error {
    fn from(t: ErrorType) -> Self {
        Self(t, vec![])
    }
}

impl From<snake::BuilderError> for Error {
    fn from(e: snake::BuilderError) -> Self {
        Self(ErrorType::SnakeBuilderError(e), vec![])
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self(ErrorType::ConfigError(e), vec![])
    }
}

impl Error {
    pub fn with_trace_step<S: ToString>(mut self, s: S) -> Self {
        self.1.push(s.to_string());
        self
    }

    pub fn error_type(&self) -> &ErrorType {
        &self.0
    }

    /// Game over, the caller should discard the snake
    pub fn is_self_collision(&self) -> bool {
        matches!(self.0, ErrorType::SelfCollision(_))
    }

    pub fn trace(&self) -> impl Iterator<Item = &str> {
        self.1.iter().rev().map(String::as_str)
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Error:\n{:?}\nTrace:", self.0)?;
        for t in self.trace() {
            writeln!(f, " in {}", t)?;
        }
        Ok(())
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.0 {
            ErrorType::SelfCollision(cell) => write!(f, "snake ran into itself at {:?}", cell)?,
            ErrorType::Crashed => write!(f, "snake has already crashed")?,
            ErrorType::InvalidDirection(code) => write!(f, "invalid direction code {}", code)?,
            ErrorType::SnakeBuilderError(e) => write!(f, "{}", e)?,
            ErrorType::ConfigError(e) => write!(f, "{}", e)?,
        }
        for t in self.trace() {
            write!(f, " (in {})", t)?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {}

pub type Result<T = ()> = result::Result<T, Error>;

pub trait ErrorConversion {
    fn with_trace_step<S: ToString>(self, s: S) -> Self;
}

impl<T> ErrorConversion for Result<T> {
    fn with_trace_step<S: ToString>(self, s: S) -> Self {
        self.map_err(|e| e.with_trace_step(s.to_string()))
    }
}
