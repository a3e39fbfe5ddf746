//! Discretization of continuous PI and PID control laws.
//!
//! The PI filter is the Tustin (bilinear) discretization of
//! `C(s) = Kp + Ki / s`, substituting `s = (2 / Ts) (z - 1) / (z + 1)`.
//!
//! The PID filter adds a derivative term `Kd Kn s / (s + Kn)` on top of the
//! same PI numerator terms. Its filter pole is not mapped by Tustin: it is
//! placed at `z = 1 - Kn Ts`, the forward-Euler image of `s = -Kn`, so the
//! denominator is `(z - 1)(z - 1 + Kn Ts)`.
//!
//! The closed forms below are evaluated term by term in a fixed order.
//! Reference vectors are compared at eight decimals, so the expressions must
//! not be rearranged or simplified.

use pv_core::Real;
use serde::{Deserialize, Serialize};

use crate::error::{ControlError, ControlResult};
use crate::params::{ControllerGains, SimulationParameters};
use crate::transfer::DiscreteTransferFunction;

/// Discretized PI and PID controllers for one parameter set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedControllers {
    pub pi: DiscreteTransferFunction,
    pub pid: DiscreteTransferFunction,
}

fn check_sample_period(ts: Real) -> ControlResult<()> {
    if !ts.is_finite() || ts <= 0.0 {
        return Err(ControlError::InvalidParameter {
            name: "ts",
            value: ts,
            reason: "sample period must be positive",
        });
    }
    Ok(())
}

/// `(a1, a0)` of the Tustin PI numerator `a1 z + a0`.
fn pi_terms(gains: &ControllerGains, ts: Real) -> (Real, Real) {
    let a1 = gains.kp + gains.ki * ts / 2.0;
    let a0 = gains.ki * ts / 2.0 - gains.kp;
    (a1, a0)
}

pub fn pi_transfer_function(
    gains: &ControllerGains,
    ts: Real,
) -> ControlResult<DiscreteTransferFunction> {
    check_sample_period(ts)?;
    let (a1, a0) = pi_terms(gains, ts);
    DiscreteTransferFunction::new(vec![a1, a0], vec![1.0, -1.0], ts)
}

pub fn pid_transfer_function(
    gains: &ControllerGains,
    ts: Real,
) -> ControlResult<DiscreteTransferFunction> {
    check_sample_period(ts)?;
    let (a1, a0) = pi_terms(gains, ts);
    let ControllerGains { kd, kn, .. } = *gains;

    let numerator = vec![
        a1 + kd * kn,
        -a1 + kn * ts * a1 + a0 - 2.0 * kd * kn,
        -a0 + kn * ts * a0 + kd * kn,
    ];
    let denominator = vec![1.0, kn * ts - 2.0, -kn * ts + 1.0];
    DiscreteTransferFunction::new(numerator, denominator, ts)
}

/// Derive both recursive controllers for `params`.
pub fn derive_all(params: &SimulationParameters) -> ControlResult<DerivedControllers> {
    Ok(DerivedControllers {
        pi: pi_transfer_function(&params.gains, params.ts)?,
        pid: pid_transfer_function(&params.gains, params.ts)?,
    })
}
