//! pv-core: shared foundation for pidvec.
//!
//! Contains:
//! - numeric (Real + tolerances + float helpers)
//! - timebase (the canonical sampled time grid)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod timebase;

pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use timebase::{MAX_SAMPLES, TimeGrid};
