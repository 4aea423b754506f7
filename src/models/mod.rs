//! The simulated models and their dispatch by [`ModelKind`].

pub mod apiary;
pub mod epidemic;
pub mod oscillator;

use rand::Rng;
use std::fmt;

use crate::core::integrate_checked;
use crate::errors::Result;

pub use crate::args::ModelKind;
pub use apiary::{Apiary, ApiaryRates, ApiaryState};
pub use epidemic::{Epidemic, EpidemicInitial, EpidemicPrior, EpidemicRates, EpidemicState};
pub use oscillator::{LaubLoomis, LaubLoomisRates, OscillatorState};

/// Projection of the final state of a single run.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub model: ModelKind,
    pub steps: usize,
    pub values: Vec<(&'static str, f64)>,
}

impl ModelKind {
    pub const ALL: [ModelKind; 4] = [
        ModelKind::Epidemic,
        ModelKind::EpidemicRandom,
        ModelKind::Apiary,
        ModelKind::Oscillator,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::Epidemic => "epidemic",
            ModelKind::EpidemicRandom => "epidemic-random",
            ModelKind::Apiary => "apiary",
            ModelKind::Oscillator => "oscillator",
        }
    }

    /// Whether a run of this model draws from the random number generator.
    pub fn is_random(&self) -> bool {
        matches!(self, ModelKind::EpidemicRandom)
    }

    /// Parameters of the model as yaml, for logging.
    pub fn describe(&self) -> String {
        let description = match self {
            ModelKind::Epidemic => serde_yaml::to_string(&Epidemic::deterministic()),
            ModelKind::EpidemicRandom => serde_yaml::to_string(&Epidemic::random_run()),
            ModelKind::Apiary => serde_yaml::to_string(&Apiary::reference()),
            ModelKind::Oscillator => serde_yaml::to_string(&LaubLoomis::reference()),
        };
        description.unwrap_or_else(|err| format!("<unable to serialize parameters: {err}>"))
    }

    /// Run the model for `steps` steps and project its observables.
    pub fn evaluate<R: Rng + ?Sized>(&self, steps: usize, rng: &mut R) -> Result<Outcome> {
        let values = match self {
            ModelKind::Epidemic => {
                let model = Epidemic::deterministic();
                let state = integrate_checked(&model, model.initialize(rng)?, steps)?;
                vec![("I", state.infectious)]
            }
            ModelKind::EpidemicRandom => {
                let model = Epidemic::random_run();
                let state = integrate_checked(&model, model.initialize(rng)?, steps)?;
                vec![("I", state.infectious), ("E", state.exposed)]
            }
            ModelKind::Apiary => {
                let model = Apiary::reference();
                let state = integrate_checked(&model, model.initial, steps)?;
                vec![("mites_1", state.mites_1), ("mites_2", state.mites_2)]
            }
            ModelKind::Oscillator => {
                let model = LaubLoomis::reference();
                let state = integrate_checked(&model, model.initial, steps)?;
                vec![("x1", state[0]), ("x2", state[1])]
            }
        };
        Ok(Outcome {
            model: *self,
            steps,
            values,
        })
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
