//! Controller derivation and simulation for pidvec.
//!
//! This crate turns one [`SimulationParameters`] value into the columns of a
//! golden test-vector table:
//!
//! - [`excitation`] samples the excitation `e(t)` on the run's time grid
//! - [`discretize`] maps continuous gains to Tustin PI / PID filters
//! - [`filter`] evaluates a discrete transfer function from zero state
//! - [`proportional`] computes the static-gain P output directly
//! - [`vector`] joins the columns into rows and checks their timebase
//!
//! Everything here is pure and deterministic; identical parameters always
//! produce identical tables.

pub mod discretize;
pub mod error;
pub mod excitation;
pub mod filter;
pub mod params;
pub mod proportional;
pub mod transfer;
pub mod vector;

pub use discretize::{DerivedControllers, derive_all, pi_transfer_function, pid_transfer_function};
pub use error::{ControlError, ControlResult};
pub use excitation::{Excitation, ExcitationMode, ExcitationSequence};
pub use filter::{FilterState, ForcedResponse, forced_response};
pub use params::{ControllerGains, SimulationParameters};
pub use proportional::proportional_response;
pub use transfer::DiscreteTransferFunction;
pub use vector::{Column, TestVectorRow, TestVectorTable, assemble};
