//! Generator configuration schema.
//!
//! These types mirror the file layout one to one. Mode tags are kept as plain
//! strings here and resolved into typed excitations by the service layer.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub version: u32,
    pub name: String,
    pub timebase: TimebaseDef,
    pub gains: GainsDef,
    #[serde(default)]
    pub scenarios: Vec<ScenarioDef>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TimebaseDef {
    #[serde(default)]
    pub t0: f64,
    pub tf: f64,
    pub ts: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GainsDef {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
    pub kn: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScenarioDef {
    pub id: String,
    pub excitation: ExcitationDef,
    #[serde(default)]
    pub outputs: Vec<String>,
}

/// Excitation as written in the file: a mode tag plus whichever parameters
/// that mode reads.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExcitationDef {
    pub mode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amplitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amplitude1: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase1: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amplitude2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase2: Option<f64>,
}

impl ExcitationDef {
    /// Every numeric parameter that is present, with its field name.
    pub fn present_values(&self) -> Vec<(&'static str, f64)> {
        [
            ("step_time", self.step_time),
            ("amplitude", self.amplitude),
            ("frequency", self.frequency),
            ("phase", self.phase),
            ("amplitude1", self.amplitude1),
            ("phase1", self.phase1),
            ("amplitude2", self.amplitude2),
            ("frequency2", self.frequency2),
            ("phase2", self.phase2),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .collect()
    }
}

impl Project {
    /// The stock configuration: 0..30 s at 0.5 s, Kp = 2, Ki = 0.5, Kd = 2,
    /// Kn = 0.5, one scenario per excitation mode.
    pub fn reference() -> Self {
        Self {
            version: crate::validate::LATEST_VERSION,
            name: "PID reference vectors".to_string(),
            timebase: TimebaseDef {
                t0: 0.0,
                tf: 30.0,
                ts: 0.5,
            },
            gains: GainsDef {
                kp: 2.0,
                ki: 0.5,
                kd: 2.0,
                kn: 0.5,
            },
            scenarios: vec![
                ScenarioDef {
                    id: "step".to_string(),
                    excitation: ExcitationDef {
                        mode: "step".to_string(),
                        step_time: Some(2.0),
                        ..Default::default()
                    },
                    outputs: vec!["PIDControlTestData.txt".to_string()],
                },
                ScenarioDef {
                    id: "sinusoid".to_string(),
                    excitation: ExcitationDef {
                        mode: "sinusoid".to_string(),
                        amplitude: Some(2.5),
                        ..Default::default()
                    },
                    outputs: vec!["PIDControlTestData_sinusoid.txt".to_string()],
                },
                ScenarioDef {
                    id: "two_added_sines".to_string(),
                    excitation: ExcitationDef {
                        mode: "two_added_sines".to_string(),
                        amplitude1: Some(1.0),
                        phase1: Some(std::f64::consts::FRAC_PI_4),
                        amplitude2: Some(2.0),
                        frequency2: Some(0.25),
                        phase2: Some(0.0),
                        ..Default::default()
                    },
                    outputs: vec!["PIDControlTestData_two_added_sines.txt".to_string()],
                },
            ],
        }
    }

    pub fn scenario(&self, id: &str) -> Option<&ScenarioDef> {
        self.scenarios.iter().find(|s| s.id == id)
    }
}
