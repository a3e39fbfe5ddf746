//! Proportional controller output.
//!
//! A static gain has no dynamics, so `y_P[n] = Kp * e[n]` is computed directly
//! instead of through [`crate::filter`].

use pv_core::Real;

use crate::excitation::ExcitationSequence;
use crate::filter::ForcedResponse;

pub fn proportional_response(kp: Real, input: &ExcitationSequence) -> ForcedResponse {
    ForcedResponse {
        time: input.time().to_vec(),
        output: input.values().iter().map(|&e| kp * e).collect(),
    }
}
