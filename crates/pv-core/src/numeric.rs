use crate::CoreError;

/// Floating point type used throughout system
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Bitwise equality of two slices; `-0.0` and `0.0` are distinct, NaNs never match.
pub fn slices_identical(a: &[Real], b: &[Real]) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .zip(b)
            .all(|(x, y)| x == y && x.is_sign_negative() == y.is_sign_negative())
}
