use pv_project::{
    ExcitationDef, Project, ScenarioDef, ValidationError, validate_project,
};

fn step_scenario(id: &str, output: &str) -> ScenarioDef {
    ScenarioDef {
        id: id.to_string(),
        excitation: ExcitationDef {
            mode: "step".to_string(),
            step_time: Some(1.0),
            ..Default::default()
        },
        outputs: vec![output.to_string()],
    }
}

#[test]
fn reference_project_is_valid() {
    validate_project(&Project::reference()).unwrap();
}

#[test]
fn future_version_is_unsupported() {
    let mut project = Project::reference();
    project.version = 99;
    assert!(matches!(
        validate_project(&project),
        Err(ValidationError::UnsupportedVersion { version: 99 })
    ));
}

#[test]
fn duplicate_scenario_id_is_rejected() {
    let mut project = Project::reference();
    project.scenarios = vec![step_scenario("a", "a.txt"), step_scenario("a", "b.txt")];
    match validate_project(&project) {
        Err(ValidationError::DuplicateId { id, context }) => {
            assert_eq!(id, "a");
            assert_eq!(context, "scenarios");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn shared_output_path_is_rejected() {
    let mut project = Project::reference();
    project.scenarios = vec![step_scenario("a", "same.txt"), step_scenario("b", "same.txt")];
    assert!(matches!(
        validate_project(&project),
        Err(ValidationError::DuplicateId { .. })
    ));
}

#[test]
fn empty_scenario_list_is_rejected() {
    let mut project = Project::reference();
    project.scenarios.clear();
    assert!(matches!(
        validate_project(&project),
        Err(ValidationError::InvalidValue { .. })
    ));
}

#[test]
fn scenario_without_outputs_is_rejected() {
    let mut project = Project::reference();
    project.scenarios[0].outputs.clear();
    assert!(matches!(
        validate_project(&project),
        Err(ValidationError::MissingField { .. })
    ));
}

#[test]
fn non_positive_period_is_rejected() {
    let mut project = Project::reference();
    project.timebase.ts = 0.0;
    match validate_project(&project) {
        Err(ValidationError::InvalidValue { field, .. }) => assert_eq!(field, "timebase.ts"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn reversed_timebase_is_rejected() {
    let mut project = Project::reference();
    project.timebase.t0 = 5.0;
    project.timebase.tf = 1.0;
    assert!(validate_project(&project).is_err());
}

#[test]
fn degenerate_timebase_is_accepted() {
    let mut project = Project::reference();
    project.timebase.t0 = 3.0;
    project.timebase.tf = 3.0;
    validate_project(&project).unwrap();
}

#[test]
fn non_finite_gain_is_rejected() {
    let mut project = Project::reference();
    project.gains.ki = f64::NAN;
    match validate_project(&project) {
        Err(ValidationError::InvalidValue { field, .. }) => assert_eq!(field, "gains.ki"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn non_finite_excitation_parameter_is_rejected() {
    let mut project = Project::reference();
    project.scenarios[1].excitation.amplitude = Some(f64::INFINITY);
    assert!(validate_project(&project).is_err());
}

#[test]
fn blank_mode_is_missing() {
    let mut project = Project::reference();
    project.scenarios[0].excitation.mode = "  ".to_string();
    assert!(matches!(
        validate_project(&project),
        Err(ValidationError::MissingField { .. })
    ));
}

#[test]
fn step_without_step_time_is_missing() {
    let mut project = Project::reference();
    project.scenarios[0].excitation.step_time = None;
    match validate_project(&project) {
        Err(ValidationError::MissingField { field, context }) => {
            assert_eq!(field, "excitation.step_time");
            assert_eq!(context, "scenario 'step'");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}
