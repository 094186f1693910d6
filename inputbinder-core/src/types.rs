//! Core types for the input binder library
//!
//! This module defines the error taxonomy, the expected value kinds an action
//! can declare, and the control snapshot the host hands in every update. The
//! host resolves raw hardware events into named control paths; the library
//! only ever sees those paths and their current values.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

/// Result type for binder operations
pub type Result<T> = std::result::Result<T, BinderError>;

/// Errors that can occur while managing actions and bindings
#[derive(Debug, thiserror::Error)]
pub enum BinderError {
    /// Raised by `ActionRegistry::create`; `add` swallows it.
    #[error("Action already registered: {0}")]
    DuplicateActionError(String),

    #[error("Action not found: {0}")]
    NotFoundError(String),

    #[error("Corrupt bindings file {path:?}: {reason}")]
    CorruptFileError { path: PathBuf, reason: String },

    #[error("Host offers no hook to disable automatic rebinding")]
    RebindingHookUnavailable,

    #[error("Host already finished its startup binding pass")]
    RebindingTooLate,

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A composite binding that cannot produce a value: required parts are
/// missing, or its kind is unknown to this version.
///
/// This is not an error: the binding reads as zero and the rest of the action
/// keeps working.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InertBindingWarning {
    /// Identifier of the action owning the binding
    pub action: String,
    /// Index of the binding in the action's binding list
    pub index: usize,
}

impl fmt::Display for InertBindingWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Composite binding {} of action '{}' is incomplete or of an unknown kind and reads as zero",
            self.index, self.action
        )
    }
}

/// The kind of value an action is expected to produce
///
/// Kinds written by a newer version are kept as `Other` so the bindings file
/// still loads and writes them back unchanged; such actions read as zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ValueKind {
    /// Edge-triggered press
    Button,
    /// Signed scalar axis
    Axis,
    /// Two-dimensional stick, resolved per binding like a scalar axis
    Vector2,
    /// Unsigned analog control such as a trigger
    Analog,
    /// A kind this version does not know
    Other(String),
}

impl ValueKind {
    /// Check if this version can resolve values of this kind
    pub fn is_known(&self) -> bool {
        !matches!(self, ValueKind::Other(_))
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Button => write!(f, "Button"),
            ValueKind::Axis => write!(f, "Axis"),
            ValueKind::Vector2 => write!(f, "Vector2"),
            ValueKind::Analog => write!(f, "Analog"),
            ValueKind::Other(name) => write!(f, "{}", name),
        }
    }
}

impl From<String> for ValueKind {
    fn from(name: String) -> Self {
        match name.as_str() {
            "Button" => ValueKind::Button,
            "Axis" => ValueKind::Axis,
            "Vector2" => ValueKind::Vector2,
            "Analog" => ValueKind::Analog,
            _ => ValueKind::Other(name),
        }
    }
}

impl From<ValueKind> for String {
    fn from(kind: ValueKind) -> Self {
        kind.to_string()
    }
}

/// Current value of one physical control, as resolved by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlValue {
    /// Key or button (pressed / released)
    Digital(bool),
    /// Continuous axis value
    Analog(f32),
}

impl ControlValue {
    /// Convert the control value to a scalar
    pub fn as_f32(&self) -> f32 {
        match self {
            ControlValue::Digital(pressed) => if *pressed { 1.0 } else { 0.0 },
            ControlValue::Analog(v) => *v,
        }
    }

    /// Check if the control is actuated (away from rest)
    pub fn is_pressed(&self) -> bool {
        !is_at_rest(self.as_f32())
    }

    pub fn is_analog(&self) -> bool {
        matches!(self, ControlValue::Analog(_))
    }
}

/// Snapshot of all control values the host knows about for one update
///
/// Controls that are absent read as released / zero.
#[derive(Debug, Clone, Default)]
pub struct ControlSnapshot {
    values: HashMap<String, ControlValue>,
}

impl ControlSnapshot {
    /// Create an empty snapshot (everything at rest)
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: mark a digital control as pressed
    pub fn with_pressed(mut self, path: impl Into<String>) -> Self {
        self.set(path, ControlValue::Digital(true));
        self
    }

    /// Builder method: set an analog control value
    pub fn with_axis(mut self, path: impl Into<String>, value: f32) -> Self {
        self.set(path, ControlValue::Analog(value));
        self
    }

    /// Set the value of a control path
    pub fn set(&mut self, path: impl Into<String>, value: ControlValue) {
        self.values.insert(path.into(), value);
    }

    /// Remove a control from the snapshot (it reads as released afterwards)
    pub fn release(&mut self, path: &str) {
        self.values.remove(path);
    }

    /// Get the value of a control path, if the host reported one
    pub fn get(&self, path: &str) -> Option<ControlValue> {
        if path.is_empty() {
            return None;
        }
        self.values.get(path).copied()
    }

    /// Scalar value of a control path (0.0 if missing)
    pub fn read(&self, path: &str) -> f32 {
        self.get(path).map(|v| v.as_f32()).unwrap_or(0.0)
    }
}

/// Check if a resolved value counts as "at rest"
pub(crate) fn is_at_rest(value: f32) -> bool {
    value.abs() <= f32::EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_value_conversions() {
        assert_eq!(ControlValue::Digital(true).as_f32(), 1.0);
        assert_eq!(ControlValue::Digital(false).as_f32(), 0.0);
        assert_eq!(ControlValue::Analog(-0.5).as_f32(), -0.5);

        assert!(ControlValue::Analog(-0.5).is_pressed());
        assert!(!ControlValue::Analog(0.0).is_pressed());
        assert!(ControlValue::Analog(0.0).is_analog());
        assert!(!ControlValue::Digital(true).is_analog());
    }

    #[test]
    fn test_snapshot_lookup() {
        let mut snapshot = ControlSnapshot::new()
            .with_pressed("<Keyboard>/a")
            .with_axis("<Joystick>/z", 0.25);

        assert_eq!(snapshot.read("<Keyboard>/a"), 1.0);
        assert_eq!(snapshot.read("<Joystick>/z"), 0.25);
        assert_eq!(snapshot.read("<Keyboard>/b"), 0.0);
        // Empty path means unbound, never a control
        assert_eq!(snapshot.get(""), None);

        snapshot.release("<Keyboard>/a");
        assert_eq!(snapshot.read("<Keyboard>/a"), 0.0);
    }

    #[test]
    fn test_value_kind_display() {
        assert_eq!(format!("{}", ValueKind::Axis), "Axis");
        assert_eq!(format!("{}", ValueKind::Button), "Button");
    }

    #[test]
    fn test_unknown_value_kind_is_kept() {
        let kind: ValueKind = serde_json::from_str("\"Quaternion\"").unwrap();
        assert_eq!(kind, ValueKind::Other("Quaternion".to_string()));
        assert!(!kind.is_known());
        assert_eq!(serde_json::to_string(&kind).unwrap(), "\"Quaternion\"");

        let kind: ValueKind = serde_json::from_str("\"Vector2\"").unwrap();
        assert_eq!(kind, ValueKind::Vector2);
        assert!(kind.is_known());
    }

    #[test]
    fn test_inert_warning_display() {
        let warning = InertBindingWarning { action: "pitch-trim".to_string(), index: 0 };
        assert!(warning.to_string().contains("pitch-trim"));
    }
}
