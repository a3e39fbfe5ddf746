use pv_project::{Project, load, load_json, load_yaml, save, save_json, save_yaml};
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("pv_project_{}_{}", std::process::id(), name))
}

#[test]
fn yaml_roundtrip_preserves_reference() {
    let project = Project::reference();
    let path = temp_path("reference.yaml");
    save_yaml(&path, &project).unwrap();
    let loaded = load_yaml(&path).unwrap();
    assert_eq!(loaded, project);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn json_roundtrip_preserves_reference() {
    let project = Project::reference();
    let path = temp_path("reference.json");
    save_json(&path, &project).unwrap();
    let loaded = load_json(&path).unwrap();
    assert_eq!(loaded, project);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn load_dispatches_on_extension() {
    let project = Project::reference();
    let json = temp_path("dispatch.JSON");
    let yaml = temp_path("dispatch.yml");
    save(&json, &project).unwrap();
    save(&yaml, &project).unwrap();
    assert!(std::fs::read_to_string(&json).unwrap().trim_start().starts_with('{'));
    assert_eq!(load(&json).unwrap(), load(&yaml).unwrap());
    let _ = std::fs::remove_file(&json);
    let _ = std::fs::remove_file(&yaml);
}

#[test]
fn hand_written_yaml_parses() {
    let yaml = r#"
version: 1
name: reference
timebase: { tf: 30.0, ts: 0.5 }
gains: { kp: 2.0, ki: 0.5, kd: 2.0, kn: 0.5 }
scenarios:
  - id: step
    excitation: { mode: step, step_time: 2.0 }
    outputs: [PIDControlTestData.txt]
  - id: sine
    excitation: { mode: sinus, amplitude: 2.5 }
    outputs: [sine.txt]
"#;
    let project: Project = serde_yaml::from_str(yaml).unwrap();
    pv_project::validate_project(&project).unwrap();
    assert_eq!(project.timebase.t0, 0.0);
    assert_eq!(project.scenarios.len(), 2);
    let sine = project.scenario("sine").unwrap();
    assert_eq!(sine.excitation.mode, "sinus");
    assert_eq!(sine.excitation.amplitude, Some(2.5));
    assert_eq!(sine.excitation.frequency, None);
}

#[test]
fn unset_parameters_are_not_serialized() {
    let yaml = serde_yaml::to_string(&Project::reference()).unwrap();
    let step_block = yaml.split("- id: sinusoid").next().unwrap();
    assert!(step_block.contains("step_time"));
    assert!(!step_block.contains("amplitude"));
}

#[test]
fn missing_file_is_io_error() {
    let err = load_yaml(&temp_path("does_not_exist.yaml")).unwrap_err();
    assert!(matches!(err, pv_project::ProjectError::Io(_)));
}
