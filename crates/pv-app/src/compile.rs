//! Compile configuration scenarios into simulation parameters.

use pv_controls::{ControllerGains, Excitation, ExcitationMode, SimulationParameters};
use pv_project::{ExcitationDef, Project, ScenarioDef};

use crate::error::{AppError, AppResult};

fn required(value: Option<f64>, field: &str, mode: ExcitationMode) -> AppResult<f64> {
    value.ok_or_else(|| {
        AppError::Validation(format!("excitation.{field} is required for mode {mode}"))
    })
}

/// Resolve the mode tag and fill in mode-specific parameters.
///
/// Unknown tags fail with [`pv_controls::ControlError::InvalidMode`].
/// Optional sinusoid parameters fall back to unit frequency and zero phase;
/// two-tone parameters fall back to the stock two-tone excitation.
pub fn compile_excitation(def: &ExcitationDef) -> AppResult<Excitation> {
    let mode: ExcitationMode = def.mode.parse()?;
    let excitation = match mode {
        ExcitationMode::Step => Excitation::Step {
            step_time: required(def.step_time, "step_time", mode)?,
        },
        ExcitationMode::Sinusoid => Excitation::Sinusoid {
            amplitude: required(def.amplitude, "amplitude", mode)?,
            frequency: def.frequency.unwrap_or(1.0),
            phase: def.phase.unwrap_or(0.0),
        },
        ExcitationMode::TwoAddedSines => Excitation::TwoAddedSines {
            amplitude1: def.amplitude1.unwrap_or(1.0),
            phase1: def.phase1.unwrap_or(std::f64::consts::FRAC_PI_4),
            amplitude2: def.amplitude2.unwrap_or(2.0),
            frequency2: def.frequency2.unwrap_or(0.25),
            phase2: def.phase2.unwrap_or(0.0),
        },
    };
    Ok(excitation)
}

/// Project timebase and gains combined with one scenario's excitation.
pub fn compile_scenario(
    project: &Project,
    scenario: &ScenarioDef,
) -> AppResult<SimulationParameters> {
    let excitation = compile_excitation(&scenario.excitation).map_err(|e| match e {
        AppError::Validation(msg) => {
            AppError::Validation(format!("scenario '{}': {}", scenario.id, msg))
        }
        other => other,
    })?;
    Ok(SimulationParameters::new(
        project.timebase.t0,
        project.timebase.tf,
        project.timebase.ts,
        project_gains(project),
        excitation,
    )?)
}

pub fn project_gains(project: &Project) -> ControllerGains {
    ControllerGains::new(
        project.gains.kp,
        project.gains.ki,
        project.gains.kd,
        project.gains.kn,
    )
}
