//! Project loading, saving, validation, and introspection.

use std::path::Path;

use pv_project::{Project, ScenarioDef};
use tracing::debug;

use crate::compile::compile_scenario;
use crate::error::{AppError, AppResult};

/// Summary of a scenario for listing.
#[derive(Debug, Clone)]
pub struct ScenarioSummary {
    pub id: String,
    pub mode: String,
    pub rows: usize,
    pub outputs: Vec<String>,
}

/// Load a project from YAML or JSON (by extension) and check its structure.
pub fn load_project(path: &Path) -> AppResult<Project> {
    debug!(path = %path.display(), "loading project");
    Ok(pv_project::load(path)?)
}

/// Save a project as YAML or JSON (by extension).
pub fn save_project(path: &Path, project: &Project) -> AppResult<()> {
    pv_project::save(path, project)?;
    Ok(())
}

/// Structural checks plus a dry compile of every scenario.
pub fn validate_project(project: &Project) -> AppResult<()> {
    pv_project::validate_project(project).map_err(|e| AppError::Validation(e.to_string()))?;
    for scenario in &project.scenarios {
        let params = compile_scenario(project, scenario)?;
        params.validate()?;
    }
    Ok(())
}

pub fn list_scenarios(project: &Project) -> AppResult<Vec<ScenarioSummary>> {
    project
        .scenarios
        .iter()
        .map(|scenario| -> AppResult<ScenarioSummary> {
            let params = compile_scenario(project, scenario)?;
            Ok(ScenarioSummary {
                id: scenario.id.clone(),
                mode: params.excitation.mode().to_string(),
                rows: params.time_grid()?.len(),
                outputs: scenario.outputs.clone(),
            })
        })
        .collect()
}

pub fn get_scenario<'a>(project: &'a Project, scenario_id: &str) -> AppResult<&'a ScenarioDef> {
    project
        .scenario(scenario_id)
        .ok_or_else(|| AppError::ScenarioNotFound(scenario_id.to_string()))
}
