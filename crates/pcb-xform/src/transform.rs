use std::fmt;

use glam::{DMat3, DVec2};
use log::debug;
use serde_json::Value;

use crate::decompose::decompose;
use crate::{Result, Tolerances, XformState, matrix};

/// A 2D transform that is always `translate * rotate * scale`, with no shear.
///
/// The components are the source of truth. The matrix is a cache rebuilt
/// synchronously by every mutator, so reading [`matrix`](Self::matrix) right
/// after a mutation always reflects it.
///
/// Vector arguments take anything convertible into a [`DVec2`]: a `DVec2`,
/// an `(x, y)` tuple or an `[x, y]` array.
#[derive(Debug, Clone, PartialEq)]
pub struct DecomposedTransform {
    state: XformState,
    matrix: DMat3,
}

impl Default for DecomposedTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl DecomposedTransform {
    /// Identity: position (0, 0), scale (1, 1), angle 0.
    pub fn new() -> Self {
        Self::from_state(XformState::IDENTITY)
    }

    pub fn from_state(state: XformState) -> Self {
        let mut t = Self {
            state,
            matrix: DMat3::IDENTITY,
        };
        t.update();
        t
    }

    /// Build from an untyped state dictionary, see [`XformState::from_value`].
    pub fn from_state_value(value: &Value) -> Result<Self> {
        Ok(Self::from_state(XformState::from_value(value)?))
    }

    /// Decompose an arbitrary affine matrix.
    ///
    /// The cached matrix is re-synthesized from the decomposed components, so
    /// it differs from `m` when `m` has shear or a reflection.
    pub fn from_matrix(m: DMat3) -> Self {
        Self::from_matrix_with(m, &Tolerances::default())
    }

    pub fn from_matrix_with(m: DMat3, tolerances: &Tolerances) -> Self {
        Self::from_state(decompose(&m, tolerances))
    }

    pub fn reset(&mut self) {
        self.state = XformState::IDENTITY;
        self.update();
    }

    pub fn set_translate(&mut self, position: impl Into<DVec2>) {
        self.state.position = position.into();
        self.update();
    }

    pub fn translate(&mut self, offset: impl Into<DVec2>) {
        self.set_translate(self.state.position + offset.into());
    }

    pub fn set_scale(&mut self, factors: impl Into<DVec2>) {
        self.state.scale = factors.into();
        self.update();
    }

    /// Multiply the current scale component-wise.
    pub fn scale(&mut self, factors: impl Into<DVec2>) {
        self.set_scale(self.state.scale * factors.into());
    }

    pub fn set_rotate(&mut self, degrees: f64) {
        self.state.angle_degrees = degrees;
        self.update();
    }

    pub fn rotate(&mut self, degrees: f64) {
        self.set_rotate(self.state.angle_degrees + degrees);
    }

    pub fn position(&self) -> DVec2 {
        self.state.position
    }

    pub fn scale_factors(&self) -> DVec2 {
        self.state.scale
    }

    pub fn angle_degrees(&self) -> f64 {
        self.state.angle_degrees
    }

    pub fn state(&self) -> &XformState {
        &self.state
    }

    pub fn matrix(&self) -> DMat3 {
        self.matrix
    }

    /// Row-major export, see [`matrix::to_rows`].
    pub fn to_rows(&self) -> [[f64; 3]; 3] {
        matrix::to_rows(&self.matrix)
    }

    pub fn map_point(&self, p: impl Into<DVec2>) -> DVec2 {
        matrix::map_point(&self.matrix, p.into())
    }

    pub fn save_state(&self) -> XformState {
        self.state
    }

    pub fn restore_state(&mut self, state: XformState) {
        self.state = state;
        self.update();
    }

    /// Restore from an untyped state dictionary.
    ///
    /// The dictionary is fully validated first; on error `self` is unchanged.
    pub fn restore_state_value(&mut self, value: &Value) -> Result<()> {
        let state = XformState::from_value(value)?;
        self.restore_state(state);
        Ok(())
    }

    /// `self * other`: `other` is applied to points first.
    ///
    /// The product is re-decomposed, so it is only exact when the product
    /// itself is shear-free.
    pub fn multiply(&self, other: &Self) -> Self {
        Self::from_matrix(self.matrix * other.matrix)
    }

    /// The transform `d` with `d.multiply(divisor) == self`.
    ///
    /// That is `self * divisor⁻¹`, or `divisor⁻¹ * self` written with
    /// row vectors.
    pub fn divide_by(&self, divisor: &Self) -> Result<Self> {
        self.divide_by_with(divisor, &Tolerances::default())
    }

    pub fn divide_by_with(&self, divisor: &Self, tolerances: &Tolerances) -> Result<Self> {
        let inverse = matrix::try_inverse(&divisor.matrix, tolerances).inspect_err(|e| {
            debug!("Cannot divide {self} by {divisor}: {e}");
        })?;
        Ok(Self::from_matrix_with(self.matrix * inverse, tolerances))
    }

    pub fn inverted(&self) -> Result<Self> {
        self.inverted_with(&Tolerances::default())
    }

    pub fn inverted_with(&self, tolerances: &Tolerances) -> Result<Self> {
        let inverse = matrix::try_inverse(&self.matrix, tolerances)?;
        Ok(Self::from_matrix_with(inverse, tolerances))
    }

    // Never deferred: every mutator calls this before returning.
    fn update(&mut self) {
        let m = matrix::translate(DMat3::IDENTITY, self.state.position);
        let m = matrix::rotate(m, self.state.angle_degrees);
        self.matrix = matrix::scale(m, self.state.scale);
    }
}

impl From<DMat3> for DecomposedTransform {
    fn from(m: DMat3) -> Self {
        Self::from_matrix(m)
    }
}

impl From<XformState> for DecomposedTransform {
    fn from(state: XformState) -> Self {
        Self::from_state(state)
    }
}

impl fmt::Display for DecomposedTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let XformState {
            position: p,
            scale: s,
            angle_degrees,
        } = self.state;
        write!(
            f,
            "{{position: ({}, {}), scale: ({}, {}), angle: {}}}",
            p.x, p.y, s.x, s.y, angle_degrees
        )
    }
}
