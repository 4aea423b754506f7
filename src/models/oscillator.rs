//! Laub-Loomis model of the cAMP oscillations in aggregating Dictyostelium cells.
//!
//! Seven species in a negative feedback loop, advanced with explicit Euler steps. Rate constants
//! keep their conventional names; `p4` does not appear in this variant of the system.

use derive_more::{Deref, From};
use serde::{Deserialize, Serialize};

use crate::core::{Model, StateVector, integrate};

#[derive(Serialize, Deserialize, Deref, From, Debug, Clone, Copy, PartialEq)]
pub struct OscillatorState(pub [f64; 7]);

impl StateVector for OscillatorState {
    fn components(&self) -> Vec<f64> {
        self.0.to_vec()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct LaubLoomisRates {
    pub p1: f64,
    pub p2: f64,
    pub p3: f64,
    pub p5: f64,
    pub p6: f64,
    pub p7: f64,
    pub p8: f64,
    pub p9: f64,
    pub p10: f64,
    pub p11: f64,
    pub p12: f64,
    pub p13: f64,
    pub p14: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LaubLoomis {
    pub initial: OscillatorState,
    pub rates: LaubLoomisRates,
    pub dt: f64,
}

impl LaubLoomis {
    pub fn reference() -> Self {
        Self {
            initial: OscillatorState([1.1, 0.95, 1.4, 2.3, 0.5, -0.1, 0.3]),
            rates: LaubLoomisRates {
                p1: 0.14,
                p2: 0.09,
                p3: 0.25,
                p5: 0.06,
                p6: 0.08,
                p7: 0.2,
                p8: 0.13,
                p9: 0.07,
                p10: 0.1,
                p11: 0.03,
                p12: 0.31,
                p13: 0.18,
                p14: 0.15,
            },
            dt: 1.,
        }
    }

    pub fn simulate(&self, n_steps: usize) -> OscillatorState {
        integrate(self, self.initial, n_steps)
    }

    /// Final `(x1, x2)` after `n_steps` steps.
    pub fn run(&self, n_steps: usize) -> (f64, f64) {
        let state = self.simulate(n_steps);
        (state[0], state[1])
    }
}

impl Model for LaubLoomis {
    type State = OscillatorState;

    fn name(&self) -> &'static str {
        "oscillator"
    }

    fn step(&self, state: &OscillatorState) -> OscillatorState {
        let r = &self.rates;
        let [x1, x2, x3, x4, x5, x6, x7] = state.0;
        let dt = self.dt;

        OscillatorState([
            x1 + dt * r.p1 * x3 - dt * r.p2 * x1,
            x2 + dt * r.p3 * x5 - dt * r.p2 * x2,
            x3 + dt * r.p5 * x7 - dt * r.p6 * x2 * x3,
            x4 + dt * r.p7 - dt * r.p8 * x3 * x4,
            x5 + dt * r.p9 * x1 - dt * r.p10 * x4 * x5,
            x6 + dt * r.p11 * x1 - dt * r.p12 * x6,
            x7 + dt * r.p13 * x6 - dt * r.p14 * x2 * x7,
        ])
    }
}
