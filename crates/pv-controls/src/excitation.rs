//! Excitation signal generation.
//!
//! The excitation `e(t)` drives all three controllers. It is sampled on the
//! run's [`TimeGrid`] and is a pure function of the simulation parameters:
//! no randomness and no state carried between calls.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use pv_core::{Real, TimeGrid, ensure_finite};
use serde::{Deserialize, Serialize};

use crate::error::{ControlError, ControlResult};
use crate::params::SimulationParameters;

/// Tag identifying an excitation variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExcitationMode {
    Step,
    Sinusoid,
    TwoAddedSines,
}

impl ExcitationMode {
    pub const ALL: [ExcitationMode; 3] = [Self::Step, Self::Sinusoid, Self::TwoAddedSines];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Step => "step",
            Self::Sinusoid => "sinusoid",
            Self::TwoAddedSines => "two_added_sines",
        }
    }
}

impl fmt::Display for ExcitationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExcitationMode {
    type Err = ControlError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.trim() {
            "step" => Ok(Self::Step),
            "sinusoid" | "sinus" => Ok(Self::Sinusoid),
            "two_added_sines" => Ok(Self::TwoAddedSines),
            other => Err(ControlError::InvalidMode {
                tag: other.to_string(),
            }),
        }
    }
}

fn unit_frequency() -> Real {
    1.0
}

/// Excitation signal with its mode-specific parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Excitation {
    /// Heaviside step at `step_time`, taking the value 0.5 exactly at the step.
    Step { step_time: Real },

    /// `amplitude * sin(frequency * t + phase)`.
    Sinusoid {
        amplitude: Real,
        #[serde(default = "unit_frequency")]
        frequency: Real,
        #[serde(default)]
        phase: Real,
    },

    /// `amplitude1 * sin(t + phase1) + amplitude2 * sin(frequency2 * t + phase2)`.
    TwoAddedSines {
        amplitude1: Real,
        phase1: Real,
        amplitude2: Real,
        frequency2: Real,
        phase2: Real,
    },
}

impl Excitation {
    pub fn step(step_time: Real) -> Self {
        Self::Step { step_time }
    }

    /// Unit-frequency sinusoid with zero phase.
    pub fn sinusoid(amplitude: Real) -> Self {
        Self::Sinusoid {
            amplitude,
            frequency: 1.0,
            phase: 0.0,
        }
    }

    /// `sin(t + pi/4) + 2 sin(t/4)`, the stock two-tone excitation.
    pub fn two_added_sines() -> Self {
        Self::TwoAddedSines {
            amplitude1: 1.0,
            phase1: std::f64::consts::FRAC_PI_4,
            amplitude2: 2.0,
            frequency2: 0.25,
            phase2: 0.0,
        }
    }

    pub fn mode(&self) -> ExcitationMode {
        match self {
            Self::Step { .. } => ExcitationMode::Step,
            Self::Sinusoid { .. } => ExcitationMode::Sinusoid,
            Self::TwoAddedSines { .. } => ExcitationMode::TwoAddedSines,
        }
    }

    /// Reject NaN and infinite parameters.
    pub fn validate(&self) -> ControlResult<()> {
        match *self {
            Self::Step { step_time } => {
                ensure_finite(step_time, "step_time")?;
            }
            Self::Sinusoid {
                amplitude,
                frequency,
                phase,
            } => {
                ensure_finite(amplitude, "amplitude")?;
                ensure_finite(frequency, "frequency")?;
                ensure_finite(phase, "phase")?;
            }
            Self::TwoAddedSines {
                amplitude1,
                phase1,
                amplitude2,
                frequency2,
                phase2,
            } => {
                ensure_finite(amplitude1, "amplitude1")?;
                ensure_finite(phase1, "phase1")?;
                ensure_finite(amplitude2, "amplitude2")?;
                ensure_finite(frequency2, "frequency2")?;
                ensure_finite(phase2, "phase2")?;
            }
        }
        Ok(())
    }

    /// Signal value at time `t`.
    pub fn value_at(&self, t: Real) -> Real {
        match *self {
            Self::Step { step_time } => match t.partial_cmp(&step_time) {
                Some(Ordering::Less) => 0.0,
                Some(Ordering::Equal) => 0.5,
                _ => 1.0,
            },
            Self::Sinusoid {
                amplitude,
                frequency,
                phase,
            } => amplitude * (frequency * t + phase).sin(),
            Self::TwoAddedSines {
                amplitude1,
                phase1,
                amplitude2,
                frequency2,
                phase2,
            } => amplitude1 * (t + phase1).sin() + amplitude2 * (frequency2 * t + phase2).sin(),
        }
    }

    /// Sample the signal on `grid`.
    pub fn sample(&self, grid: &TimeGrid) -> ExcitationSequence {
        let time = grid.samples();
        let values = time.iter().map(|&t| self.value_at(t)).collect();
        ExcitationSequence { time, values }
    }
}

/// Excitation samples paired one-to-one with their sample times.
#[derive(Debug, Clone, PartialEq)]
pub struct ExcitationSequence {
    time: Vec<Real>,
    values: Vec<Real>,
}

impl ExcitationSequence {
    /// Pair explicit time and value vectors. Lengths must agree.
    pub fn new(time: Vec<Real>, values: Vec<Real>) -> ControlResult<Self> {
        if time.len() != values.len() {
            return Err(ControlError::TimebaseMismatch {
                what: "excitation sequence",
                index: time.len().min(values.len()),
                detail: format!(
                    "{} time samples but {} excitation values",
                    time.len(),
                    values.len()
                ),
            });
        }
        Ok(Self { time, values })
    }

    pub fn time(&self) -> &[Real] {
        &self.time
    }

    pub fn values(&self) -> &[Real] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Generate the excitation sequence for a run.
pub fn generate(params: &SimulationParameters) -> ControlResult<ExcitationSequence> {
    params.excitation.validate()?;
    let grid = params.time_grid()?;
    Ok(params.excitation.sample(&grid))
}
