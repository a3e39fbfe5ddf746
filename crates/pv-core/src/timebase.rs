//! Sampled time grid shared by every stage of vector generation.
//!
//! A grid is fully described by its start time, sample period and length.
//! Sample `n` sits at `t0 + n * ts`; every component that produces a time
//! column uses [`TimeGrid::time_at`] so independently built columns agree
//! bit for bit.

use crate::error::{CoreError, CoreResult};
use crate::numeric::{Real, ensure_finite};

/// Ratios this close to an integer count as exact multiples of the period.
const COUNT_SNAP: Real = 1e-9;

/// Largest number of samples [`TimeGrid::new`] accepts.
pub const MAX_SAMPLES: usize = 10_000_000;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeGrid {
    t0: Real,
    ts: Real,
    len: usize,
}

impl TimeGrid {
    /// Grid covering `[t0, tf]` with period `ts`.
    ///
    /// The sample count is `floor((tf - t0) / ts) + 1` and may not exceed
    /// [`MAX_SAMPLES`].
    pub fn new(t0: Real, tf: Real, ts: Real) -> CoreResult<Self> {
        ensure_finite(t0, "t0")?;
        ensure_finite(tf, "tf")?;
        check_period(ts)?;
        if tf < t0 {
            return Err(CoreError::InvalidParameter {
                name: "tf",
                value: tf,
                reason: "end time precedes start time",
            });
        }
        Ok(Self {
            t0,
            ts,
            len: sample_count(t0, tf, ts)?,
        })
    }

    /// Grid with an explicit number of samples.
    pub fn with_len(t0: Real, ts: Real, len: usize) -> CoreResult<Self> {
        ensure_finite(t0, "t0")?;
        check_period(ts)?;
        Ok(Self { t0, ts, len })
    }

    pub fn t0(&self) -> Real {
        self.t0
    }

    pub fn ts(&self) -> Real {
        self.ts
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Time of sample `n`. Defined for any `n`, not only `n < len`.
    pub fn time_at(&self, n: usize) -> Real {
        self.t0 + n as Real * self.ts
    }

    /// All sample times in order.
    pub fn samples(&self) -> Vec<Real> {
        (0..self.len).map(|n| self.time_at(n)).collect()
    }

    /// First index at which `times` departs from this grid.
    ///
    /// A length difference reports the index one past the shorter sequence.
    pub fn first_mismatch(&self, times: &[Real]) -> Option<usize> {
        if let Some(n) = times
            .iter()
            .enumerate()
            .take(self.len)
            .position(|(n, &t)| t != self.time_at(n))
        {
            return Some(n);
        }
        if times.len() != self.len {
            return Some(times.len().min(self.len));
        }
        None
    }
}

fn check_period(ts: Real) -> CoreResult<()> {
    ensure_finite(ts, "ts")?;
    if ts <= 0.0 {
        return Err(CoreError::InvalidParameter {
            name: "ts",
            value: ts,
            reason: "sample period must be positive",
        });
    }
    Ok(())
}

fn sample_count(t0: Real, tf: Real, ts: Real) -> CoreResult<usize> {
    let too_long = || CoreError::InvalidParameter {
        name: "tf",
        value: tf,
        reason: "time span exceeds the maximum sample count",
    };

    let ratio = (tf - t0) / ts;
    if !ratio.is_finite() || ratio >= MAX_SAMPLES as Real {
        return Err(too_long());
    }
    let nearest = ratio.round();
    let whole = if (ratio - nearest).abs() <= COUNT_SNAP * nearest.max(1.0) {
        nearest
    } else {
        ratio.floor()
    };

    // 0 <= whole <= MAX_SAMPLES here, so the cast is exact.
    let count = whole as usize + 1;
    if count > MAX_SAMPLES {
        return Err(too_long());
    }
    Ok(count)
}
