//! End-to-end generation through the service layer.

use std::path::PathBuf;

use pv_app::{
    AppError, GenerateOptions, GenerateRequest, compare_vectors, ensure_passed, generate,
    generate_project, save_project,
};
use pv_controls::ControlError;
use pv_project::Project;
use pv_results::{CompareOptions, ResultsError, load_manifest, read_table, verify_output};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("pv_app_{}_{}", std::process::id(), name));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn reference_project_writes_all_scenarios() {
    let dir = scratch_dir("reference");
    let project_path = dir.join("pidvec.yaml");
    save_project(&project_path, &Project::reference()).unwrap();

    let response = generate(&GenerateRequest {
        project_path: &project_path,
        scenario_id: None,
        output_dir: None,
        options: GenerateOptions::default(),
    })
    .unwrap();

    assert_eq!(response.vectors.len(), 3);
    assert_eq!(response.controllers.pi.numerator(), &[2.125, -1.875]);

    let step = &response.vectors[0];
    assert_eq!(step.scenario_id, "step");
    assert_eq!(step.outputs, vec![dir.join("PIDControlTestData.txt")]);
    assert!(step.manifests.is_empty());

    let text = std::fs::read_to_string(&step.outputs[0]).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 61);
    assert_eq!(
        lines[0],
        "0.00000000\t0.00000000\t0.00000000\t0.00000000\t0.00000000"
    );
    assert_eq!(
        lines[4],
        "2.00000000\t0.50000000\t1.00000000\t1.06250000\t1.56250000"
    );
    assert_eq!(
        lines[5],
        "2.50000000\t1.00000000\t2.00000000\t2.25000000\t3.12500000"
    );
    assert!(lines[60].starts_with("30.00000000\t1.00000000\t2.00000000\t16.00000000\t16.0000"));
}

#[test]
fn sinusoid_scenario_matches_closed_form_head() {
    let dir = scratch_dir("sinusoid");
    let response = generate_project(
        &Project::reference(),
        &dir,
        Some("sinusoid"),
        &GenerateOptions::default(),
    )
    .unwrap();
    assert_eq!(response.vectors.len(), 1);

    let table = read_table(&response.vectors[0].outputs[0]).unwrap();
    let row = table.rows()[1];
    assert_eq!(row.t, 0.5);
    assert!((row.e - 1.19856385).abs() < 1e-12);
    assert!((row.y_pid - 3.74551202).abs() < 1e-12);
}

#[test]
fn generation_is_byte_identical_across_runs() {
    let first = scratch_dir("idempotent_a");
    let second = scratch_dir("idempotent_b");
    let project = Project::reference();
    let a = generate_project(&project, &first, None, &GenerateOptions::default()).unwrap();
    let b = generate_project(&project, &second, None, &GenerateOptions::default()).unwrap();

    for (va, vb) in a.vectors.iter().zip(&b.vectors) {
        assert_eq!(va.sha256, vb.sha256);
        assert_eq!(va.vector_id, vb.vector_id);
        let bytes_a = std::fs::read(&va.outputs[0]).unwrap();
        let bytes_b = std::fs::read(&vb.outputs[0]).unwrap();
        assert_eq!(bytes_a, bytes_b);

        let report =
            compare_vectors(&va.outputs[0], &vb.outputs[0], &CompareOptions::default()).unwrap();
        assert!(report.identical);
        ensure_passed(&report).unwrap();
    }
}

#[test]
fn manifests_describe_written_files() {
    let dir = scratch_dir("manifest");
    let options = GenerateOptions {
        write_manifest: true,
        ..GenerateOptions::default()
    };
    let response = generate_project(&Project::reference(), &dir, Some("step"), &options).unwrap();
    let vector = &response.vectors[0];
    assert_eq!(vector.manifests.len(), 1);

    let manifest = load_manifest(&vector.outputs[0]).unwrap();
    assert_eq!(manifest.scenario_id, "step");
    assert_eq!(manifest.output, "PIDControlTestData.txt");
    assert_eq!(manifest.rows, 61);
    assert_eq!(manifest.sha256, vector.sha256);
    assert_eq!(manifest.vector_id, vector.vector_id);
    assert!(verify_output(&vector.outputs[0]).unwrap());
}

#[test]
fn unknown_mode_writes_nothing() {
    let dir = scratch_dir("bad_mode");
    let mut project = Project::reference();
    project.scenarios[2].excitation.mode = "square".to_string();

    let err = generate_project(&project, &dir, None, &GenerateOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        AppError::Control(ControlError::InvalidMode { .. })
    ));
    assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 0);
}

#[test]
fn unknown_scenario_is_reported() {
    let dir = scratch_dir("unknown_scenario");
    let err = generate_project(
        &Project::reference(),
        &dir,
        Some("ramp"),
        &GenerateOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, AppError::ScenarioNotFound(id) if id == "ramp"));
}

#[test]
fn missing_output_directory_is_a_typed_file_write_error() {
    let dir = scratch_dir("missing_output_dir");
    let mut project = Project::reference();
    project.scenarios.truncate(1);
    project.scenarios[0].outputs = vec!["no_such_dir/out.txt".to_string()];
    let err = generate_project(&project, &dir, None, &GenerateOptions::default()).unwrap_err();
    match err {
        AppError::Results(ResultsError::FileWrite { path, .. }) => {
            assert_eq!(path, dir.join("no_such_dir/out.txt"))
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn failed_later_output_leaves_earlier_scenarios_unwritten() {
    let dir = scratch_dir("later_output_fails");
    let mut project = Project::reference();
    project.scenarios[1].outputs = vec!["no_such_dir/b.txt".to_string()];
    let options = GenerateOptions {
        write_manifest: true,
        ..GenerateOptions::default()
    };

    let err = generate_project(&project, &dir, None, &options).unwrap_err();
    assert!(matches!(
        err,
        AppError::Results(ResultsError::FileWrite { .. })
    ));
    assert!(!dir.join("PIDControlTestData.txt").exists());
    assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 0);
}

#[test]
fn failed_run_keeps_previous_outputs() {
    let dir = scratch_dir("keeps_previous");
    let mut project = Project::reference();
    project.scenarios.truncate(2);
    generate_project(&project, &dir, None, &GenerateOptions::default()).unwrap();
    let before = std::fs::read(dir.join("PIDControlTestData.txt")).unwrap();

    project.gains.kp = 3.0;
    project.scenarios[1].outputs = vec!["no_such_dir/b.txt".to_string()];
    assert!(generate_project(&project, &dir, None, &GenerateOptions::default()).is_err());

    let after = std::fs::read(dir.join("PIDControlTestData.txt")).unwrap();
    assert_eq!(before, after);
    assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 2);
}

#[test]
fn oversized_timebase_is_rejected_without_output() {
    let dir = scratch_dir("oversized_timebase");
    for (t0, tf, ts) in [(-1e308, 1e308, 1.0), (0.0, 1e15, 1e-3)] {
        let mut project = Project::reference();
        project.timebase.t0 = t0;
        project.timebase.tf = tf;
        project.timebase.ts = ts;
        let err = generate_project(&project, &dir, None, &GenerateOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            AppError::Control(ControlError::InvalidParameter { name: "tf", .. })
        ));
    }
    assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 0);
}

#[test]
fn perturbed_vector_fails_comparison() {
    let dir = scratch_dir("perturbed");
    let response =
        generate_project(&Project::reference(), &dir, Some("step"), &GenerateOptions::default())
            .unwrap();
    let original = &response.vectors[0].outputs[0];
    let text = std::fs::read_to_string(original).unwrap();
    let perturbed = dir.join("perturbed.txt");
    std::fs::write(
        &perturbed,
        text.replacen("3.12500000", "3.12600000", 1),
    )
    .unwrap();

    let report = compare_vectors(original, &perturbed, &CompareOptions::default()).unwrap();
    assert!(!report.passed());
    match ensure_passed(&report) {
        Err(AppError::ComparisonFailed { columns }) => assert_eq!(columns, "y_PID"),
        other => panic!("unexpected result: {other:?}"),
    }
}
