//! Configuration validation.
//!
//! Structural and numeric checks only. Mode tags and mode-specific parameters
//! are checked when a scenario is compiled into simulation parameters.

use crate::schema::{GainsDef, Project, ScenarioDef, TimebaseDef};
use std::collections::HashSet;

pub const LATEST_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing field: {field} in {context}")]
    MissingField { field: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.version == 0 || project.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    validate_timebase(&project.timebase)?;
    validate_gains(&project.gains)?;

    if project.scenarios.is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "scenarios".to_string(),
            value: "[]".to_string(),
            reason: "at least one scenario is required".to_string(),
        });
    }

    let mut scenario_ids = HashSet::new();
    let mut output_paths = HashSet::new();
    for scenario in &project.scenarios {
        if !scenario_ids.insert(&scenario.id) {
            return Err(ValidationError::DuplicateId {
                id: scenario.id.clone(),
                context: "scenarios".to_string(),
            });
        }
        validate_scenario(scenario)?;
        for output in &scenario.outputs {
            if !output_paths.insert(output) {
                return Err(ValidationError::DuplicateId {
                    id: output.clone(),
                    context: "scenario outputs".to_string(),
                });
            }
        }
    }

    Ok(())
}

fn finite(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: "must be finite".to_string(),
        })
    }
}

fn validate_timebase(timebase: &TimebaseDef) -> Result<(), ValidationError> {
    finite("timebase.t0", timebase.t0)?;
    finite("timebase.tf", timebase.tf)?;
    finite("timebase.ts", timebase.ts)?;
    if timebase.ts <= 0.0 {
        return Err(ValidationError::InvalidValue {
            field: "timebase.ts".to_string(),
            value: timebase.ts.to_string(),
            reason: "sample period must be positive".to_string(),
        });
    }
    if timebase.tf < timebase.t0 {
        return Err(ValidationError::InvalidValue {
            field: "timebase.tf".to_string(),
            value: timebase.tf.to_string(),
            reason: format!("end time precedes start time {}", timebase.t0),
        });
    }
    Ok(())
}

fn validate_gains(gains: &GainsDef) -> Result<(), ValidationError> {
    finite("gains.kp", gains.kp)?;
    finite("gains.ki", gains.ki)?;
    finite("gains.kd", gains.kd)?;
    finite("gains.kn", gains.kn)
}

fn validate_scenario(scenario: &ScenarioDef) -> Result<(), ValidationError> {
    if scenario.id.trim().is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "scenario id".to_string(),
            value: format!("'{}'", scenario.id),
            reason: "must not be blank".to_string(),
        });
    }
    if scenario.excitation.mode.trim().is_empty() {
        return Err(ValidationError::MissingField {
            field: "excitation.mode".to_string(),
            context: format!("scenario '{}'", scenario.id),
        });
    }
    if scenario.excitation.mode == "step" && scenario.excitation.step_time.is_none() {
        return Err(ValidationError::MissingField {
            field: "excitation.step_time".to_string(),
            context: format!("scenario '{}'", scenario.id),
        });
    }
    for (name, value) in scenario.excitation.present_values() {
        finite(&format!("scenario '{}' excitation.{}", scenario.id, name), value)?;
    }
    if scenario.outputs.is_empty() {
        return Err(ValidationError::MissingField {
            field: "outputs".to_string(),
            context: format!("scenario '{}'", scenario.id),
        });
    }
    if let Some(blank) = scenario.outputs.iter().find(|o| o.trim().is_empty()) {
        return Err(ValidationError::InvalidValue {
            field: format!("scenario '{}' outputs", scenario.id),
            value: format!("'{blank}'"),
            reason: "output path must not be blank".to_string(),
        });
    }
    Ok(())
}
