//! Recover position, scale and rotation from an affine matrix.
//!
//! The basis vectors are mapped through the matrix and measured: the image of
//! the origin is the position, the lengths of the mapped x and y basis vectors
//! are the scale, and the direction of the mapped x basis is the rotation.
//!
//! This is exact for matrices that are themselves `T * R * S` with a
//! non-negative scale. For anything else it is a best-effort approximation:
//! shear is dropped and a reflection loses its sign. Both cases are logged
//! rather than rejected.

use glam::{DMat3, DVec2};
use log::{debug, warn};

use crate::matrix::{basis_cosine, map_point};
use crate::{Tolerances, XformState};

pub fn decompose(m: &DMat3, tolerances: &Tolerances) -> XformState {
    let p1 = map_point(m, DVec2::ZERO);
    let dp2 = map_point(m, DVec2::X) - p1;
    let dp3 = map_point(m, DVec2::Y) - p1;

    let state = XformState {
        position: p1,
        scale: DVec2::new(dp2.length(), dp3.length()),
        angle_degrees: dp2.y.atan2(dp2.x).to_degrees(),
    };

    if let Some(cos) = basis_cosine(m)
        && cos.abs() > tolerances.orthogonality_epsilon
    {
        warn!(
            "Decomposing a sheared matrix (basis cosine {cos:.3e}); shear is discarded"
        );
    }
    if dp2.perp_dot(dp3) < 0.0 {
        warn!("Decomposing a reflected matrix; the reflection is discarded");
    }

    debug!(
        "Decomposed matrix into position={} scale={} angle={}",
        state.position, state.scale, state.angle_degrees
    );
    state
}
