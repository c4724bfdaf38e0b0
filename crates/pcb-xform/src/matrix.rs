//! Affine matrix helpers on [`DMat3`].
//!
//! Column-vector convention: a point `p` maps to `m * p`, translation lives in
//! the third column. The builders compose the way a retained-mode matrix does:
//! each new operation is multiplied on the right, so it is applied to points
//! before everything already in `m`.

use glam::{DMat3, DVec2};

use crate::{Result, Tolerances, XformError};

/// `m * T(offset)`
pub fn translate(m: DMat3, offset: DVec2) -> DMat3 {
    m * DMat3::from_translation(offset)
}

/// `m * R(degrees)`, counter-clockwise for positive angles in a Y-up frame.
pub fn rotate(m: DMat3, degrees: f64) -> DMat3 {
    m * DMat3::from_angle(degrees.to_radians())
}

/// `m * S(factors)`
pub fn scale(m: DMat3, factors: DVec2) -> DMat3 {
    m * DMat3::from_scale(factors)
}

/// Map a point through the affine part of `m`.
///
/// The bottom row is ignored; projective matrices are not supported.
pub fn map_point(m: &DMat3, p: DVec2) -> DVec2 {
    let x = m.x_axis.x * p.x + m.y_axis.x * p.y + m.z_axis.x;
    let y = m.x_axis.y * p.x + m.y_axis.y * p.y + m.z_axis.y;
    DVec2::new(x, y)
}

/// Invert `m`, failing if its determinant is within `singular_epsilon` of zero.
pub fn try_inverse(m: &DMat3, tolerances: &Tolerances) -> Result<DMat3> {
    let determinant = m.determinant();
    if !determinant.is_finite() || determinant.abs() <= tolerances.singular_epsilon {
        return Err(XformError::NonInvertible { determinant });
    }
    Ok(m.inverse())
}

/// Row-major view of `m`: `[[a, c, tx], [b, d, ty], [0, 0, 1]]` for an affine matrix.
pub fn to_rows(m: &DMat3) -> [[f64; 3]; 3] {
    m.transpose().to_cols_array_2d()
}

/// Inverse of [`to_rows`].
pub fn from_rows(rows: [[f64; 3]; 3]) -> DMat3 {
    DMat3::from_cols_array_2d(&rows).transpose()
}

/// Cosine of the angle between the mapped x and y basis vectors.
///
/// Zero for a shear-free matrix. Returns `None` when either basis vector
/// collapses to zero length.
pub fn basis_cosine(m: &DMat3) -> Option<f64> {
    let bx = m.x_axis.truncate();
    let by = m.y_axis.truncate();
    let len = bx.length() * by.length();
    if len == 0.0 || !len.is_finite() {
        return None;
    }
    Some(bx.dot(by) / len)
}
