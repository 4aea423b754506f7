//! Two honeybee colonies sharing a parasitic mite population.
//!
//! The colony population `x` declines through contact with healthy bees of both colonies. Each
//! healthy bee population `y_i` grows from that contact and from mite exposure, and loses bees to
//! mortality; the mortality flow feeds the mite population `z_i` of the same colony. Mites are
//! removed by contact with the bees of their own colony (`own_infestation`) and of the other
//! colony (`cross_infestation`). Bilinear terms are scaled by `coupling`.

use serde::{Deserialize, Serialize};

use crate::core::{Model, StateVector, integrate};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ApiaryState {
    pub colony: f64,
    pub healthy_1: f64,
    pub healthy_2: f64,
    pub mites_1: f64,
    pub mites_2: f64,
}

impl StateVector for ApiaryState {
    fn components(&self) -> Vec<f64> {
        vec![
            self.colony,
            self.healthy_1,
            self.healthy_2,
            self.mites_1,
            self.mites_2,
        ]
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ApiaryRates {
    pub mortality: f64,
    pub own_infestation: f64,
    pub cross_infestation: f64,
    pub coupling: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Apiary {
    pub initial: ApiaryState,
    pub rates: ApiaryRates,
    pub dt: f64,
}

impl Apiary {
    pub fn reference() -> Self {
        Self {
            initial: ApiaryState {
                colony: 475.,
                healthy_1: 352.,
                healthy_2: 110.,
                mites_1: 30.,
                mites_2: 40.,
            },
            rates: ApiaryRates {
                mortality: 0.3,
                own_infestation: 0.5,
                cross_infestation: 0.6,
                coupling: 0.001,
            },
            dt: 0.1,
        }
    }

    /// Advance the initial state `n_steps` steps.
    pub fn simulate(&self, n_steps: usize) -> ApiaryState {
        integrate(self, self.initial, n_steps)
    }

    /// Final mite populations `(z1, z2)` after `n_steps` steps.
    pub fn run(&self, n_steps: usize) -> (f64, f64) {
        let state = self.simulate(n_steps);
        (state.mites_1, state.mites_2)
    }
}

impl Model for Apiary {
    type State = ApiaryState;

    fn name(&self) -> &'static str {
        "apiary"
    }

    fn step(&self, state: &ApiaryState) -> ApiaryState {
        let ApiaryRates {
            mortality: p1,
            own_infestation: p2,
            cross_infestation: p3,
            coupling: k,
        } = self.rates;
        let ApiaryState {
            colony: x,
            healthy_1: y1,
            healthy_2: y2,
            mites_1: z1,
            mites_2: z2,
        } = *state;
        let dt = self.dt;

        ApiaryState {
            colony: x + dt * (-k * x * y1 - k * x * y2),
            healthy_1: y1 + dt * (k * x * y1 - p1 * y1 + p2 * k * y1 * z1 + p3 * k * y1 * z2),
            healthy_2: y2 + dt * (k * x * y2 - p1 * y2 + p2 * k * y2 * z2 + p3 * k * y2 * z1),
            mites_1: z1 + dt * (p1 * y1 - p2 * k * y1 * z1 - p3 * k * y2 * z1),
            mites_2: z2 + dt * (p1 * y2 - p2 * k * y2 * z2 - p3 * k * y1 * z2),
        }
    }
}
