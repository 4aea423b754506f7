//! SEIR epidemic with a cumulative-infection counter.
//!
//! All compartments are population fractions. The mass-action system
//!
//! ```text
//! dS/dt = -β S I
//! dE/dt =  β S I - σ E
//! dI/dt =  σ E - γ I
//! dR/dt =  γ I
//! dC/dt =  σ E
//! ```
//!
//! is advanced with explicit Euler steps of size `dt`.

use rand::Rng;
use rand::distr::Uniform;
use rand_distr::Distribution;
use serde::{Deserialize, Serialize};

use crate::core::sampling::TruncatedNormalParameters;
use crate::core::{Model, StateVector, integrate};
use crate::errors::{Result, StepwiseError};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct EpidemicState {
    pub susceptible: f64,
    pub exposed: f64,
    pub infectious: f64,
    pub recovered: f64,
    /// Cumulative fraction that has become infectious.
    pub cumulative: f64,
}

impl StateVector for EpidemicState {
    fn components(&self) -> Vec<f64> {
        vec![
            self.susceptible,
            self.exposed,
            self.infectious,
            self.recovered,
            self.cumulative,
        ]
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct EpidemicRates {
    /// Transmission rate β.
    pub transmission: f64,
    /// Incubation rate σ, the flow E -> I.
    pub incubation: f64,
    /// Recovery rate γ, the flow I -> R.
    pub recovery: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub low: f64,
    pub high: f64,
}

impl Interval {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<f64> {
        let uniform = Uniform::new_inclusive(self.low, self.high).map_err(|err| {
            StepwiseError::InitializationError(format!(
                "invalid uniform interval [{}, {}]: {err}",
                self.low, self.high
            ))
        })?;
        Ok(uniform.sample(rng))
    }
}

/// Distribution of the initial state of a randomized run.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct EpidemicPrior {
    pub susceptible: TruncatedNormalParameters,
    pub exposed: Interval,
    pub infectious: Interval,
    pub recovered: Interval,
    pub cumulative: Interval,
}

impl Default for EpidemicPrior {
    fn default() -> Self {
        Self {
            susceptible: TruncatedNormalParameters {
                mean: 0.7,
                sigma: 0.02,
                low: 0.6,
                high: 0.8,
            },
            exposed: Interval::new(0.2, 0.4),
            infectious: Interval::new(0.0, 0.04),
            recovered: Interval::new(0.0, 0.04),
            cumulative: Interval::new(0.0, 0.04),
        }
    }
}

impl EpidemicPrior {
    /// Draw an initial state. Compartments are drawn in the order S, E, I, R, C.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<EpidemicState> {
        let susceptible = self.susceptible.distribution()?.sample(rng);
        let exposed = self.exposed.sample(rng)?;
        let infectious = self.infectious.sample(rng)?;
        let recovered = self.recovered.sample(rng)?;
        let cumulative = self.cumulative.sample(rng)?;
        Ok(EpidemicState {
            susceptible,
            exposed,
            infectious,
            recovered,
            cumulative,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub enum EpidemicInitial {
    Fixed(EpidemicState),
    Random(EpidemicPrior),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Epidemic {
    pub rates: EpidemicRates,
    pub dt: f64,
    pub initial: EpidemicInitial,
}

impl Epidemic {
    /// Parameter set of the randomized run.
    pub fn random_run() -> Self {
        Self {
            rates: EpidemicRates {
                transmission: 0.35,
                incubation: 0.28,
                recovery: 0.29,
            },
            dt: 0.5,
            initial: EpidemicInitial::Random(EpidemicPrior::default()),
        }
    }

    /// Parameter set of the deterministic run.
    ///
    /// The recovery flow shares the incubation constant 0.22. The nominal recovery constant 0.1
    /// of this parameter set does not enter the update.
    pub fn deterministic() -> Self {
        Self {
            rates: EpidemicRates {
                transmission: 0.11,
                incubation: 0.22,
                recovery: 0.22,
            },
            dt: 0.5,
            initial: EpidemicInitial::Fixed(Self::DETERMINISTIC_INITIAL),
        }
    }

    const DETERMINISTIC_INITIAL: EpidemicState = EpidemicState {
        susceptible: 0.7,
        exposed: 0.3,
        infectious: 0.02,
        recovered: 0.02,
        cumulative: 0.02,
    };

    /// Produce the initial state. Only randomized models consume entropy from `rng`.
    pub fn initialize<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<EpidemicState> {
        match &self.initial {
            EpidemicInitial::Fixed(state) => Ok(*state),
            EpidemicInitial::Random(prior) => prior.sample(rng),
        }
    }

    /// Initialize and advance `n_steps` steps.
    pub fn run<R: Rng + ?Sized>(&self, n_steps: usize, rng: &mut R) -> Result<EpidemicState> {
        let initial = self.initialize(rng)?;
        Ok(integrate(self, initial, n_steps))
    }

    /// Run the randomized parameter set and return the final `(I, E)`.
    pub fn run_random<R: Rng + ?Sized>(n_steps: usize, rng: &mut R) -> Result<(f64, f64)> {
        let state = Self::random_run().run(n_steps, rng)?;
        Ok((state.infectious, state.exposed))
    }

    /// Run the deterministic parameter set and return the final `I`.
    pub fn run_deterministic(n_steps: usize) -> f64 {
        integrate(&Self::deterministic(), Self::DETERMINISTIC_INITIAL, n_steps).infectious
    }
}

impl Model for Epidemic {
    type State = EpidemicState;

    fn name(&self) -> &'static str {
        "epidemic"
    }

    fn step(&self, state: &EpidemicState) -> EpidemicState {
        let EpidemicRates {
            transmission,
            incubation,
            recovery,
        } = self.rates;
        let dt = self.dt;

        let infection = state.susceptible * transmission * state.infectious;
        let onset = incubation * state.exposed;
        let removal = recovery * state.infectious;

        EpidemicState {
            susceptible: state.susceptible - infection * dt,
            exposed: state.exposed + (infection - onset) * dt,
            infectious: state.infectious + (onset - removal) * dt,
            recovered: state.recovered + removal * dt,
            cumulative: state.cumulative + onset * dt,
        }
    }
}
