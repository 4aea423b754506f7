//! Fixed-step explicit Euler integration.
//!
//! A [`Model`] maps the state at step `t` to the state at step `t + 1`. The
//! next state is always built in full from the previous one, so no component
//! of an update ever sees a partially advanced state.

use std::fmt::Debug;

use crate::errors::{Result, StepwiseError};

/// A fixed-size vector of real-valued state variables.
pub trait StateVector: Copy + Debug {
    /// Components of the state in their canonical order.
    fn components(&self) -> Vec<f64>;

    fn is_finite(&self) -> bool {
        self.components().iter().all(|value| value.is_finite())
    }
}

/// A difference system advanced by one explicit Euler step at a time.
pub trait Model {
    type State: StateVector;

    /// Name used in log messages.
    fn name(&self) -> &'static str;

    /// Compute the next state from `state`.
    fn step(&self, state: &Self::State) -> Self::State;
}

/// Apply `model.step` exactly `n_steps` times, starting from `initial`.
pub fn integrate<M: Model>(model: &M, initial: M::State, n_steps: usize) -> M::State {
    let mut state = initial;
    for step in 0..n_steps {
        state = model.step(&state);
        log::trace!("{} step={} state={:?}", model.name(), step + 1, state);
    }
    state
}

/// Like [`integrate`], but fails at the first step that leaves a NaN or infinite component.
pub fn integrate_checked<M: Model>(model: &M, initial: M::State, n_steps: usize) -> Result<M::State> {
    if !initial.is_finite() {
        return Err(StepwiseError::NumericalError(format!(
            "{}: initial state is not finite: {:?}",
            model.name(),
            initial
        )));
    }

    let mut state = initial;
    for step in 0..n_steps {
        state = model.step(&state);
        log::trace!("{} step={} state={:?}", model.name(), step + 1, state);
        if !state.is_finite() {
            return Err(StepwiseError::NumericalError(format!(
                "{}: state is not finite after step {}: {:?}",
                model.name(),
                step + 1,
                state
            )));
        }
    }
    Ok(state)
}
