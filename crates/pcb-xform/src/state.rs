use glam::DVec2;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Result, XformError};

/// Position, per-axis scale and rotation of a [`DecomposedTransform`].
///
/// Serializes as `{"position": [x, y], "scale": [x, y], "angleDegrees": a}`.
/// Missing keys restore as zero, including `scale`, so a state with no `scale`
/// key produces a degenerate transform rather than an identity one.
///
/// [`DecomposedTransform`]: crate::DecomposedTransform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XformState {
    #[serde(default)]
    pub position: DVec2,
    #[serde(default)]
    pub scale: DVec2,
    /// Degrees, not normalized.
    #[serde(default)]
    pub angle_degrees: f64,
}

impl XformState {
    pub const IDENTITY: Self = Self {
        position: DVec2::ZERO,
        scale: DVec2::ONE,
        angle_degrees: 0.0,
    };

    /// Validate an untyped state dictionary.
    ///
    /// Absent keys take their defaults; present keys must be numeric with the
    /// right arity. Nothing is returned unless every field is valid.
    pub fn from_value(value: &Value) -> Result<Self> {
        let Some(map) = value.as_object() else {
            return Err(XformError::InvalidState {
                field: "state",
                reason: format!("expected an object, got {}", kind(value)),
            });
        };

        Ok(Self {
            position: pair_field(map, "position")?.unwrap_or(DVec2::ZERO),
            scale: pair_field(map, "scale")?.unwrap_or(DVec2::ZERO),
            angle_degrees: number_field(map, "angleDegrees")?.unwrap_or(0.0),
        })
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(s)?;
        Self::from_value(&value)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

fn number_field(map: &Map<String, Value>, field: &'static str) -> Result<Option<f64>> {
    let Some(value) = map.get(field) else {
        return Ok(None);
    };
    value
        .as_f64()
        .map(Some)
        .ok_or_else(|| XformError::InvalidState {
            field,
            reason: format!("expected a number, got {}", kind(value)),
        })
}

fn pair_field(map: &Map<String, Value>, field: &'static str) -> Result<Option<DVec2>> {
    let Some(value) = map.get(field) else {
        return Ok(None);
    };
    let invalid = |reason: String| XformError::InvalidState { field, reason };

    let Some(items) = value.as_array() else {
        return Err(invalid(format!("expected [x, y], got {}", kind(value))));
    };
    if items.len() != 2 {
        return Err(invalid(format!("expected 2 numbers, got {}", items.len())));
    }

    let mut xy = [0.0; 2];
    for (slot, item) in xy.iter_mut().zip(items) {
        *slot = item
            .as_f64()
            .ok_or_else(|| invalid(format!("expected a number, got {}", kind(item))))?;
    }
    Ok(Some(DVec2::from(xy)))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_keys_default_to_zero() {
        let state = XformState::from_value(&json!({})).unwrap();
        assert_eq!(state.position, DVec2::ZERO);
        assert_eq!(state.scale, DVec2::ZERO);
        assert_eq!(state.angle_degrees, 0.0);
    }

    #[test]
    fn integers_are_accepted() {
        let state =
            XformState::from_value(&json!({"position": [1, 2], "scale": [3, 4], "angleDegrees": 90}))
                .unwrap();
        assert_eq!(state.position, DVec2::new(1.0, 2.0));
        assert_eq!(state.scale, DVec2::new(3.0, 4.0));
        assert_eq!(state.angle_degrees, 90.0);
    }

    #[test]
    fn unrelated_keys_are_ignored() {
        let state = XformState::from_value(&json!({"angleDegrees": 5, "label": "x"})).unwrap();
        assert_eq!(state.angle_degrees, 5.0);
    }

    #[test]
    fn rejects_non_object() {
        let err = XformState::from_value(&json!([1, 2])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid state field 'state': expected an object, got an array"
        );
    }

    #[test]
    fn rejects_wrong_arity() {
        let err = XformState::from_value(&json!({"scale": [1, 2, 3]})).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid state field 'scale': expected 2 numbers, got 3"
        );
    }

    #[test]
    fn rejects_non_numeric_component() {
        let err = XformState::from_value(&json!({"position": [1, "2"]})).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid state field 'position': expected a number, got a string"
        );
    }

    #[test]
    fn rejects_null_angle() {
        let err = XformState::from_value(&json!({"angleDegrees": null})).unwrap_err();
        assert!(
            matches!(err, XformError::InvalidState { field: "angleDegrees", .. }),
            "{err}"
        );
    }

    #[test]
    fn json_text() {
        let state = XformState {
            position: DVec2::new(20.0, 0.0),
            scale: DVec2::ONE,
            angle_degrees: 45.0,
        };
        let text = state.to_json_string().unwrap();
        assert_eq!(
            text,
            r#"{"position":[20.0,0.0],"scale":[1.0,1.0],"angleDegrees":45.0}"#
        );
        assert_eq!(XformState::from_json_str(&text).unwrap(), state);
    }

    #[test]
    fn malformed_json_text() {
        let err = XformState::from_json_str("{position: ").unwrap_err();
        assert!(matches!(err, XformError::Json(_)), "{err}");
    }

    #[test]
    fn serde_derive_matches_dictionary_defaults() {
        let state: XformState = serde_json::from_str(r#"{"angleDegrees": 10.0}"#).unwrap();
        assert_eq!(state, XformState::from_json_str(r#"{"angleDegrees": 10}"#).unwrap());
    }
}
