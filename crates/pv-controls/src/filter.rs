//! Recursive (IIR) filter simulation.
//!
//! Evaluates
//!
//! ```text
//! y[n] = ( sum_i b[i] e[n-i] - sum_{j>=1} a[j] y[n-j] ) / a[0]
//! ```
//!
//! from zero initial state. Samples before index 0 contribute nothing.

use pv_core::{Real, TimeGrid};

use crate::error::{ControlError, ControlResult};
use crate::excitation::ExcitationSequence;
use crate::transfer::DiscreteTransferFunction;

/// Delay line for a single run of one transfer function.
///
/// Borrowing the transfer function ties the state to exactly one filter; a new
/// state starts from zero for every run.
#[derive(Debug, Clone)]
pub struct FilterState<'a> {
    tf: &'a DiscreteTransferFunction,
    /// `e[n-1], e[n-2], ...`
    past_inputs: Vec<Real>,
    /// `y[n-1], y[n-2], ...`
    past_outputs: Vec<Real>,
}

impl<'a> FilterState<'a> {
    pub fn new(tf: &'a DiscreteTransferFunction) -> Self {
        Self {
            tf,
            past_inputs: vec![0.0; tf.order()],
            past_outputs: vec![0.0; tf.order()],
        }
    }

    /// Advance one sample and return the output.
    pub fn step(&mut self, input: Real) -> Real {
        let b = self.tf.numerator();
        let a = self.tf.denominator();

        let mut forward = b[0] * input;
        for (coeff, past) in b[1..].iter().zip(&self.past_inputs) {
            forward += coeff * past;
        }

        let mut feedback = 0.0;
        for (coeff, past) in a[1..].iter().zip(&self.past_outputs) {
            feedback += coeff * past;
        }

        let output = (forward - feedback) / a[0];
        push_front(&mut self.past_inputs, input);
        push_front(&mut self.past_outputs, output);
        output
    }
}

fn push_front(line: &mut [Real], newest: Real) {
    if line.is_empty() {
        return;
    }
    line.rotate_right(1);
    line[0] = newest;
}

/// Output sequence together with the time vector it is indexed by.
#[derive(Debug, Clone, PartialEq)]
pub struct ForcedResponse {
    pub time: Vec<Real>,
    pub output: Vec<Real>,
}

impl ForcedResponse {
    pub fn len(&self) -> usize {
        self.output.len()
    }

    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }
}

/// Forced response of `tf` to `input` from zero initial state.
///
/// The input's time vector must be the grid `t[0] + n * Ts` implied by the
/// transfer function's sample period; any disagreement aborts the run.
pub fn forced_response(
    tf: &DiscreteTransferFunction,
    input: &ExcitationSequence,
) -> ControlResult<ForcedResponse> {
    let time = input.time();
    let Some(&t0) = time.first() else {
        return Ok(ForcedResponse {
            time: Vec::new(),
            output: Vec::new(),
        });
    };

    let grid = TimeGrid::with_len(t0, tf.sample_period(), time.len())?;
    if let Some(index) = grid.first_mismatch(time) {
        return Err(ControlError::TimebaseMismatch {
            what: "forced response",
            index,
            detail: format!(
                "excitation sample at t = {} but a filter with period {} expects t = {}",
                time[index],
                tf.sample_period(),
                grid.time_at(index)
            ),
        });
    }

    let mut state = FilterState::new(tf);
    let output = input.values().iter().map(|&e| state.step(e)).collect();
    Ok(ForcedResponse {
        time: grid.samples(),
        output,
    })
}
