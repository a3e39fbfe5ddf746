//! Vector generation service.
//!
//! Every selected scenario is simulated and rendered in memory before any
//! file is touched, and all files of a run are committed together, so a
//! failing run leaves no output behind.

use std::path::{Path, PathBuf};

use pv_controls::excitation::generate as generate_excitation;
use pv_controls::{
    DerivedControllers, SimulationParameters, TestVectorTable, assemble, derive_all,
    forced_response, proportional_response,
};
use pv_project::{Project, ScenarioDef};
use pv_results::{
    OutputBatch, VectorManifest, compute_vector_id, digest, format_table, manifest_json,
    manifest_path,
};
use tracing::{debug, info};

use crate::compile::compile_scenario;
use crate::error::{AppError, AppResult};
use crate::project_service::{get_scenario, load_project, validate_project};

pub const GENERATOR_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Options for generating vectors.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub write_manifest: bool,
    pub generator_version: String,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            write_manifest: false,
            generator_version: GENERATOR_VERSION.to_string(),
        }
    }
}

/// Request to generate vectors from a project file.
pub struct GenerateRequest<'a> {
    pub project_path: &'a Path,
    /// Only this scenario; all scenarios when `None`.
    pub scenario_id: Option<&'a str>,
    /// Directory relative outputs resolve against; the project's directory when `None`.
    pub output_dir: Option<&'a Path>,
    pub options: GenerateOptions,
}

/// One scenario's written files.
#[derive(Debug, Clone)]
pub struct GeneratedVector {
    pub scenario_id: String,
    pub vector_id: String,
    pub rows: usize,
    pub sha256: String,
    pub outputs: Vec<PathBuf>,
    pub manifests: Vec<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct GenerateResponse {
    pub controllers: DerivedControllers,
    pub vectors: Vec<GeneratedVector>,
}

/// Derived controllers and the assembled table for one parameter set.
#[derive(Debug, Clone)]
pub struct SimulationOutput {
    pub controllers: DerivedControllers,
    pub table: TestVectorTable,
}

/// Run the full pipeline for `params` without touching the filesystem.
pub fn simulate(params: &SimulationParameters) -> AppResult<SimulationOutput> {
    let grid = params.time_grid()?;
    let excitation = generate_excitation(params)?;
    debug!(
        mode = %params.excitation.mode(),
        samples = excitation.len(),
        "excitation generated"
    );

    let controllers = derive_all(params)?;
    debug!(
        pi_numerator = ?controllers.pi.numerator(),
        pid_numerator = ?controllers.pid.numerator(),
        pid_denominator = ?controllers.pid.denominator(),
        "controllers derived"
    );

    let y_p = proportional_response(params.gains.kp, &excitation);
    let y_pi = forced_response(&controllers.pi, &excitation)?;
    let y_pid = forced_response(&controllers.pid, &excitation)?;
    let table = assemble(&grid, &excitation, &y_p, &y_pi, &y_pid)?;

    Ok(SimulationOutput { controllers, table })
}

/// PI and PID transfer functions for the project's gains and sample period.
///
/// Gains and period are shared by all scenarios, so the first one is used.
pub fn coefficients(project: &Project) -> AppResult<DerivedControllers> {
    let scenario = project.scenarios.first().ok_or_else(|| {
        AppError::Validation("at least one scenario is required".to_string())
    })?;
    let params = compile_scenario(project, scenario)?;
    Ok(derive_all(&params)?)
}

/// Load, validate and generate.
pub fn generate(request: &GenerateRequest) -> AppResult<GenerateResponse> {
    let project = load_project(request.project_path)?;
    let base_dir = match request.output_dir {
        Some(dir) => dir.to_path_buf(),
        None => request
            .project_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default(),
    };
    generate_project(&project, &base_dir, request.scenario_id, &request.options)
}

struct RenderedScenario<'a> {
    scenario: &'a ScenarioDef,
    params: SimulationParameters,
    controllers: DerivedControllers,
    rows: usize,
    text: String,
}

/// Generate vectors for an in-memory project, resolving outputs against `base_dir`.
///
/// Outputs and manifests are staged and moved into place together; a failed
/// write leaves every target untouched.
pub fn generate_project(
    project: &Project,
    base_dir: &Path,
    scenario_id: Option<&str>,
    options: &GenerateOptions,
) -> AppResult<GenerateResponse> {
    validate_project(project)?;

    let selected: Vec<&ScenarioDef> = match scenario_id {
        Some(id) => vec![get_scenario(project, id)?],
        None => project.scenarios.iter().collect(),
    };

    let mut rendered = Vec::with_capacity(selected.len());
    for scenario in selected {
        info!(scenario = %scenario.id, "generating test vectors");
        let params = compile_scenario(project, scenario)?;
        let output = simulate(&params)?;
        let text = format_table(&output.table)?;
        debug!(scenario = %scenario.id, rows = output.table.len(), "table rendered");
        rendered.push(RenderedScenario {
            scenario,
            params,
            controllers: output.controllers,
            rows: output.table.len(),
            text,
        });
    }

    let controllers = match rendered.first() {
        Some(item) => item.controllers.clone(),
        None => coefficients(project)?,
    };

    let mut batch = OutputBatch::new();
    let mut vectors = Vec::with_capacity(rendered.len());
    for item in &rendered {
        let vector_id =
            compute_vector_id(&item.scenario.id, &item.params, &options.generator_version)?;
        let mut generated = GeneratedVector {
            scenario_id: item.scenario.id.clone(),
            vector_id,
            rows: item.rows,
            sha256: digest(item.text.as_bytes()),
            outputs: Vec::new(),
            manifests: Vec::new(),
        };

        for output in &item.scenario.outputs {
            let path = base_dir.join(output);
            batch.stage(&path, &item.text)?;

            if options.write_manifest {
                let file_name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| output.clone());
                let manifest = VectorManifest::new(
                    generated.vector_id.clone(),
                    &item.scenario.id,
                    &file_name,
                    &item.params,
                    item.rows,
                    &item.text,
                    &options.generator_version,
                );
                let manifest_path = manifest_path(&path);
                batch.stage(&manifest_path, &manifest_json(&manifest)?)?;
                generated.manifests.push(manifest_path);
            }
            generated.outputs.push(path);
        }
        vectors.push(generated);
    }

    debug!(files = batch.len(), "all outputs staged");
    batch.commit()?;
    for vector in &vectors {
        for path in &vector.outputs {
            info!(path = %path.display(), rows = vector.rows, "wrote test vectors");
        }
        for path in &vector.manifests {
            debug!(path = %path.display(), "wrote manifest");
        }
    }

    Ok(GenerateResponse {
        controllers,
        vectors,
    })
}
