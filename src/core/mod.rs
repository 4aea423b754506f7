//! This module contains the core datatypes of the library.

pub mod model;
pub mod sampling;

pub use model::{Model, StateVector, integrate, integrate_checked};
pub use sampling::TruncatedNormal;
