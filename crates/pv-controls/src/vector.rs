//! Test-vector rows and table assembly.

use std::fmt;

use pv_core::{Real, TimeGrid};
use serde::{Deserialize, Serialize};

use crate::error::{ControlError, ControlResult};
use crate::excitation::ExcitationSequence;
use crate::filter::ForcedResponse;

/// Columns of a test-vector table, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    Time,
    Excitation,
    P,
    PI,
    PID,
}

impl Column {
    pub const ALL: [Column; 5] = [
        Self::Time,
        Self::Excitation,
        Self::P,
        Self::PI,
        Self::PID,
    ];

    pub fn index(&self) -> usize {
        match self {
            Self::Time => 0,
            Self::Excitation => 1,
            Self::P => 2,
            Self::PI => 3,
            Self::PID => 4,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Time => "t",
            Self::Excitation => "e",
            Self::P => "y_P",
            Self::PI => "y_PI",
            Self::PID => "y_PID",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One sample of every column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TestVectorRow {
    pub t: Real,
    pub e: Real,
    pub y_p: Real,
    pub y_pi: Real,
    pub y_pid: Real,
}

impl TestVectorRow {
    pub fn values(&self) -> [Real; 5] {
        [self.t, self.e, self.y_p, self.y_pi, self.y_pid]
    }

    pub fn from_values([t, e, y_p, y_pi, y_pid]: [Real; 5]) -> Self {
        Self {
            t,
            e,
            y_p,
            y_pi,
            y_pid,
        }
    }

    pub fn get(&self, column: Column) -> Real {
        self.values()[column.index()]
    }
}

/// Ordered rows of a test-vector table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TestVectorTable {
    rows: Vec<TestVectorRow>,
}

impl TestVectorTable {
    pub fn from_rows(rows: Vec<TestVectorRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[TestVectorRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column(&self, column: Column) -> Vec<Real> {
        self.rows.iter().map(|row| row.get(column)).collect()
    }
}

fn check_column(
    grid: &TimeGrid,
    what: &'static str,
    time: &[Real],
    len: usize,
) -> ControlResult<()> {
    if len != grid.len() {
        return Err(ControlError::TimebaseMismatch {
            what,
            index: len.min(grid.len()),
            detail: format!("expected {} samples, found {}", grid.len(), len),
        });
    }
    if let Some(index) = grid.first_mismatch(time) {
        return Err(ControlError::TimebaseMismatch {
            what,
            index,
            detail: format!(
                "time {} does not match canonical time {}",
                time.get(index).copied().unwrap_or(Real::NAN),
                grid.time_at(index)
            ),
        });
    }
    Ok(())
}

/// Join the excitation and the three controller outputs into rows.
///
/// Every column must have exactly `grid.len()` samples on the grid's time
/// vector; nothing is truncated or padded.
pub fn assemble(
    grid: &TimeGrid,
    excitation: &ExcitationSequence,
    p: &ForcedResponse,
    pi: &ForcedResponse,
    pid: &ForcedResponse,
) -> ControlResult<TestVectorTable> {
    check_column(grid, "e column", excitation.time(), excitation.len())?;
    check_column(grid, "y_P column", &p.time, p.output.len())?;
    check_column(grid, "y_PI column", &pi.time, pi.output.len())?;
    check_column(grid, "y_PID column", &pid.time, pid.output.len())?;

    let rows = excitation
        .time()
        .iter()
        .zip(excitation.values())
        .zip(&p.output)
        .zip(&pi.output)
        .zip(&pid.output)
        .map(|((((&t, &e), &y_p), &y_pi), &y_pid)| TestVectorRow {
            t,
            e,
            y_p,
            y_pi,
            y_pid,
        })
        .collect();
    Ok(TestVectorTable { rows })
}
