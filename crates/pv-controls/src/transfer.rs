//! Discrete-time transfer functions.
//!
//! Coefficients are stored highest power of `z` first. After construction the
//! leading denominator coefficient is exactly 1 and the numerator has the same
//! length as the denominator, so `numerator[i]` multiplies `e[n - i]` and
//! `denominator[j]` multiplies `y[n - j]`.

use std::fmt;

use pv_core::Real;
use serde::{Deserialize, Serialize};

use crate::error::{ControlError, ControlResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscreteTransferFunction {
    numerator: Vec<Real>,
    denominator: Vec<Real>,
    sample_period: Real,
}

impl DiscreteTransferFunction {
    /// Build a causal transfer function.
    ///
    /// The denominator is normalized so its leading coefficient is 1 and a
    /// shorter numerator is left-padded with zeros.
    pub fn new(
        numerator: Vec<Real>,
        denominator: Vec<Real>,
        sample_period: Real,
    ) -> ControlResult<Self> {
        if !sample_period.is_finite() || sample_period <= 0.0 {
            return Err(ControlError::InvalidParameter {
                name: "ts",
                value: sample_period,
                reason: "sample period must be positive",
            });
        }
        if numerator.is_empty() || denominator.is_empty() {
            return Err(ControlError::InvalidTransferFunction {
                what: "numerator and denominator must be non-empty",
            });
        }
        if numerator.len() > denominator.len() {
            return Err(ControlError::InvalidTransferFunction {
                what: "numerator degree exceeds denominator degree (non-causal)",
            });
        }
        if numerator.iter().chain(&denominator).any(|c| !c.is_finite()) {
            return Err(ControlError::InvalidTransferFunction {
                what: "coefficients must be finite",
            });
        }

        let lead = denominator[0];
        if lead == 0.0 {
            return Err(ControlError::InvalidTransferFunction {
                what: "leading denominator coefficient is zero",
            });
        }

        let (numerator, denominator) = if lead == 1.0 {
            (numerator, denominator)
        } else {
            (
                numerator.iter().map(|c| c / lead).collect(),
                denominator.iter().map(|c| c / lead).collect(),
            )
        };

        let mut padded = vec![0.0; denominator.len() - numerator.len()];
        padded.extend(numerator);

        Ok(Self {
            numerator: padded,
            denominator,
            sample_period,
        })
    }

    pub fn numerator(&self) -> &[Real] {
        &self.numerator
    }

    pub fn denominator(&self) -> &[Real] {
        &self.denominator
    }

    pub fn sample_period(&self) -> Real {
        self.sample_period
    }

    /// Number of past samples the recurrence looks back.
    pub fn order(&self) -> usize {
        self.denominator.len() - 1
    }
}

/// Render a polynomial in `z`, e.g. `2.125 z - 1.875`.
fn polynomial(coeffs: &[Real]) -> String {
    let degree = coeffs.len().saturating_sub(1);
    let mut out = String::new();
    for (i, &c) in coeffs.iter().enumerate() {
        if c == 0.0 {
            continue;
        }
        let power = degree - i;
        if out.is_empty() {
            if c < 0.0 {
                out.push('-');
            }
        } else {
            out.push_str(if c < 0.0 { " - " } else { " + " });
        }

        let magnitude = c.abs();
        let variable = match power {
            0 => String::new(),
            1 => "z".to_string(),
            p => format!("z^{p}"),
        };
        match (magnitude == 1.0 && power > 0, variable.is_empty()) {
            (true, _) => out.push_str(&variable),
            (false, true) => out.push_str(&magnitude.to_string()),
            (false, false) => out.push_str(&format!("{magnitude} {variable}")),
        }
    }
    if out.is_empty() { "0".to_string() } else { out }
}

impl fmt::Display for DiscreteTransferFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let num = polynomial(&self.numerator);
        let den = polynomial(&self.denominator);
        let width = num.len().max(den.len());
        writeln!(f, "{num:^width$}")?;
        writeln!(f, "{}", "-".repeat(width))?;
        writeln!(f, "{den:^width$}")?;
        writeln!(f)?;
        write!(f, "dt = {}", self.sample_period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_denominator_is_normalized() {
        let tf = DiscreteTransferFunction::new(vec![2.0, 4.0], vec![2.0, -1.0], 0.5).unwrap();
        assert_eq!(tf.denominator(), &[1.0, -0.5]);
        assert_eq!(tf.numerator(), &[1.0, 2.0]);
    }

    #[test]
    fn short_numerator_is_left_padded() {
        let tf = DiscreteTransferFunction::new(vec![3.0], vec![1.0, -0.5, 0.25], 1.0).unwrap();
        assert_eq!(tf.numerator(), &[0.0, 0.0, 3.0]);
        assert_eq!(tf.order(), 2);
    }

    #[test]
    fn non_causal_is_rejected() {
        let err = DiscreteTransferFunction::new(vec![1.0, 2.0], vec![1.0], 1.0).unwrap_err();
        assert!(matches!(err, ControlError::InvalidTransferFunction { .. }));
    }

    #[test]
    fn zero_leading_denominator_is_rejected() {
        assert!(DiscreteTransferFunction::new(vec![1.0], vec![0.0, 1.0], 1.0).is_err());
    }

    #[test]
    fn sample_period_must_be_positive() {
        let err = DiscreteTransferFunction::new(vec![1.0], vec![1.0], -0.5).unwrap_err();
        assert!(matches!(
            err,
            ControlError::InvalidParameter { name: "ts", .. }
        ));
    }

    #[test]
    fn display_matches_control_toolbox_layout() {
        let tf = DiscreteTransferFunction::new(vec![2.125, -1.875], vec![1.0, -1.0], 0.5).unwrap();
        let text = tf.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "2.125 z - 1.875");
        assert_eq!(lines[1], "---------------");
        assert_eq!(lines[2].trim(), "z - 1");
        assert_eq!(lines[4], "dt = 0.5");
    }

    #[test]
    fn polynomial_rendering() {
        assert_eq!(polynomial(&[1.0, -1.75, 0.75]), "z^2 - 1.75 z + 0.75");
        assert_eq!(polynomial(&[-1.0, 0.0]), "-z");
        assert_eq!(polynomial(&[0.0, 0.0]), "0");
    }
}
