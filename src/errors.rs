//! All errors that can occur in the stepwise library.

use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum StepwiseError {
    InitializationError(String),
    NumericalError(String),
}

impl fmt::Display for StepwiseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StepwiseError::InitializationError(message) => {
                write!(f, "InitializationError: {}", message)
            }
            StepwiseError::NumericalError(message) => {
                write!(f, "NumericalError: {}", message)
            }
        }
    }
}

impl std::error::Error for StepwiseError {}

pub type Result<T> = std::result::Result<T, StepwiseError>;
