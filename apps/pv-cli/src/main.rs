use clap::{Parser, Subcommand};
use pv_app::{
    AppError, AppResult, GenerateOptions, GenerateRequest, compare_service, generate_service,
    project_service,
};
use pv_project::Project;
use pv_results::{CompareOptions, ComparisonReport};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pidvec")]
#[command(about = "pidvec - golden test vectors for digital P/PI/PID controllers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the reference configuration
    Init {
        /// Destination (.yaml or .json)
        #[arg(default_value = "pidvec.yaml")]
        project_path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Validate configuration syntax, structure and scenarios
    Validate {
        /// Path to the configuration file
        project_path: PathBuf,
    },
    /// List scenarios in a configuration
    Scenarios {
        /// Path to the configuration file
        project_path: PathBuf,
    },
    /// Print the discretized PI and PID transfer functions
    Coefficients {
        /// Path to the configuration file
        project_path: PathBuf,
    },
    /// Generate test-vector files
    Generate {
        /// Path to the configuration file
        project_path: PathBuf,
        /// Only generate this scenario
        #[arg(long)]
        scenario: Option<String>,
        /// Directory for relative output paths (defaults to the configuration's directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
        /// Write a `<file>.manifest.json` next to every vector file
        #[arg(long)]
        manifest: bool,
    },
    /// Compare two test-vector files
    Compare {
        /// Reference vector file
        left: PathBuf,
        /// Vector file under test
        right: PathBuf,
        /// Largest accepted absolute deviation
        #[arg(long, default_value_t = CompareOptions::default().tolerance)]
        tolerance: f64,
        /// Largest accepted per-column variance
        #[arg(long, default_value_t = CompareOptions::default().variance_threshold)]
        variance_threshold: f64,
    },
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init {
            project_path,
            force,
        } => cmd_init(&project_path, force),
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Scenarios { project_path } => cmd_scenarios(&project_path),
        Commands::Coefficients { project_path } => cmd_coefficients(&project_path),
        Commands::Generate {
            project_path,
            scenario,
            output_dir,
            manifest,
        } => cmd_generate(
            &project_path,
            scenario.as_deref(),
            output_dir.as_deref(),
            manifest,
        ),
        Commands::Compare {
            left,
            right,
            tolerance,
            variance_threshold,
        } => cmd_compare(
            &left,
            &right,
            CompareOptions {
                tolerance,
                variance_threshold,
            },
        ),
    }
}

fn cmd_init(project_path: &Path, force: bool) -> AppResult<()> {
    if project_path.exists() && !force {
        return Err(AppError::Project(format!(
            "{} already exists (use --force to overwrite)",
            project_path.display()
        )));
    }
    project_service::save_project(project_path, &Project::reference())?;
    println!("✓ Wrote reference configuration: {}", project_path.display());
    Ok(())
}

fn cmd_validate(project_path: &Path) -> AppResult<()> {
    println!("Validating configuration: {}", project_path.display());
    let project = project_service::load_project(project_path)?;
    project_service::validate_project(&project)?;
    println!("✓ Configuration is valid");
    Ok(())
}

fn cmd_scenarios(project_path: &Path) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let scenarios = project_service::list_scenarios(&project)?;

    println!("Scenarios in {}:", project.name);
    for scenario in scenarios {
        println!(
            "  {} - {} ({} rows) -> {}",
            scenario.id,
            scenario.mode,
            scenario.rows,
            scenario.outputs.join(", ")
        );
    }
    Ok(())
}

fn cmd_coefficients(project_path: &Path) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let controllers = generate_service::coefficients(&project)?;
    println!("PI controller:\n\n{}\n", controllers.pi);
    println!("PID controller:\n\n{}", controllers.pid);
    Ok(())
}

fn cmd_generate(
    project_path: &Path,
    scenario: Option<&str>,
    output_dir: Option<&Path>,
    manifest: bool,
) -> AppResult<()> {
    let request = GenerateRequest {
        project_path,
        scenario_id: scenario,
        output_dir,
        options: GenerateOptions {
            write_manifest: manifest,
            ..GenerateOptions::default()
        },
    };
    let response = generate_service::generate(&request)?;

    println!("PI controller:\n\n{}\n", response.controllers.pi);
    println!("PID controller:\n\n{}\n", response.controllers.pid);

    for vector in &response.vectors {
        let short_id = vector.vector_id.get(..12).unwrap_or(&vector.vector_id);
        println!("✓ {} ({} rows, id {})", vector.scenario_id, vector.rows, short_id);
        for output in &vector.outputs {
            println!("  wrote {}", output.display());
        }
        for manifest in &vector.manifests {
            println!("  wrote {}", manifest.display());
        }
    }
    Ok(())
}

fn cmd_compare(left: &Path, right: &Path, options: CompareOptions) -> AppResult<()> {
    let report = compare_service::compare_vectors(left, right, &options)?;
    print_report(&report);
    compare_service::ensure_passed(&report)?;
    println!("✓ Vectors agree");
    Ok(())
}

fn print_report(report: &ComparisonReport) {
    println!("Rows: {}", report.rows);
    println!("Identical: {}", if report.identical { "yes" } else { "no" });
    println!(
        "\n{:<6} {:>14} {:>6} {:>14} {:>14}",
        "column", "max |dev|", "row", "sq. error sum", "variance"
    );
    for stats in &report.columns {
        let row = stats
            .max_deviation_row
            .map(|r| r.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<6} {:>14.3e} {:>6} {:>14.3e} {:>14.3e}",
            stats.column.name(),
            stats.max_abs_deviation,
            row,
            stats.squared_error_sum,
            stats.variance
        );
    }
    println!(
        "\nTolerance {:e}, variance threshold {:e}",
        report.options.tolerance, report.options.variance_threshold
    );
}
