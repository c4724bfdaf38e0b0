use serde::{Deserialize, Serialize};

use crate::Result;

/// Numeric thresholds used by inversion and decomposition.
///
/// Can be embedded in a host's TOML config; missing keys keep their defaults:
///
/// ```toml
/// singular_epsilon = 1e-9
/// orthogonality_epsilon = 1e-6
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tolerances {
    /// A matrix whose determinant magnitude is at or below this is singular.
    pub singular_epsilon: f64,
    /// Decomposition inputs whose basis-vector cosine exceeds this are
    /// reported as sheared.
    pub orthogonality_epsilon: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            singular_epsilon: 1e-12,
            orthogonality_epsilon: 1e-9,
        }
    }
}

impl Tolerances {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::XformError;

    #[test]
    fn empty_config_uses_defaults() {
        assert_eq!(Tolerances::from_toml_str("").unwrap(), Tolerances::default());
    }

    #[test]
    fn partial_override() {
        let t = Tolerances::from_toml_str("singular_epsilon = 1e-6").unwrap();
        assert_eq!(t.singular_epsilon, 1e-6);
        assert_eq!(t.orthogonality_epsilon, 1e-9);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = Tolerances::from_toml_str("epsilon = 1.0").unwrap_err();
        assert!(matches!(err, XformError::Config(_)), "{err}");
    }

    #[test]
    fn wrong_type_is_rejected() {
        let err = Tolerances::from_toml_str("singular_epsilon = \"tiny\"").unwrap_err();
        assert!(matches!(err, XformError::Config(_)), "{err}");
    }
}
