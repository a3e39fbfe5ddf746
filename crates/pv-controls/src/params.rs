//! Simulation parameters for one vector-generation run.

use pv_core::{Real, TimeGrid, ensure_finite};
use serde::{Deserialize, Serialize};

use crate::error::ControlResult;
use crate::excitation::Excitation;

/// Continuous-time controller gains.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControllerGains {
    /// Proportional gain.
    pub kp: Real,
    /// Integral gain (1/s).
    pub ki: Real,
    /// Derivative gain (s).
    pub kd: Real,
    /// Derivative filter pole (1/s).
    pub kn: Real,
}

impl ControllerGains {
    pub fn new(kp: Real, ki: Real, kd: Real, kn: Real) -> Self {
        Self { kp, ki, kd, kn }
    }

    /// Kp = 2, Ki = 0.5, Kd = 2, Kn = 0.5.
    pub fn reference() -> Self {
        Self::new(2.0, 0.5, 2.0, 0.5)
    }

    pub fn validate(&self) -> ControlResult<()> {
        ensure_finite(self.kp, "kp")?;
        ensure_finite(self.ki, "ki")?;
        ensure_finite(self.kd, "kd")?;
        ensure_finite(self.kn, "kn")?;
        Ok(())
    }
}

/// Everything needed to produce one test-vector table.
///
/// Built once through [`SimulationParameters::new`] and then only borrowed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// Start time (s).
    pub t0: Real,
    /// End time (s), inclusive when it falls on a sample.
    pub tf: Real,
    /// Sample period (s).
    pub ts: Real,
    pub gains: ControllerGains,
    pub excitation: Excitation,
}

impl SimulationParameters {
    pub fn new(
        t0: Real,
        tf: Real,
        ts: Real,
        gains: ControllerGains,
        excitation: Excitation,
    ) -> ControlResult<Self> {
        let params = Self {
            t0,
            tf,
            ts,
            gains,
            excitation,
        };
        params.validate()?;
        Ok(params)
    }

    /// The settings of the stock generator: 0..30 s at 0.5 s, step at 2 s.
    pub fn reference() -> Self {
        Self {
            t0: 0.0,
            tf: 30.0,
            ts: 0.5,
            gains: ControllerGains::reference(),
            excitation: Excitation::step(2.0),
        }
    }

    pub fn validate(&self) -> ControlResult<()> {
        self.time_grid()?;
        self.gains.validate()?;
        self.excitation.validate()
    }

    pub fn time_grid(&self) -> ControlResult<TimeGrid> {
        Ok(TimeGrid::new(self.t0, self.tf, self.ts)?)
    }
}
