//! Binding model
//!
//! A binding associates an action with physical control paths. Simple bindings
//! point at a single control; composite bindings combine several named parts
//! into one logical value. The variant of a binding never changes once it is
//! built: only the contained paths can be edited.

use crate::types::{ControlSnapshot, ControlValue};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Part name of the negative half of a 1-D axis composite
pub const NEGATIVE_PART: &str = "negative";

/// Part name of the positive half of a 1-D axis composite
pub const POSITIVE_PART: &str = "positive";

/// Display name given to placeholder bindings
pub const DEFAULT_BINDING_NAME: &str = "binding";

/// A binding between an action and one or more control paths
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Binding {
    /// One control path
    Simple(SimpleBinding),
    /// Several named parts combined into one value
    Composite(CompositeBinding),
}

/// A binding to a single control path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleBinding {
    /// Control path (empty = unbound)
    #[serde(default)]
    path: String,
    /// Optional display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

/// Kinds of composite bindings
///
/// Kinds this version does not know are kept as `Other`: the binding is
/// inert but survives a load/save cycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CompositeKind {
    /// Signed axis built from a "negative" and a "positive" part
    Axis1D,
    Other(String),
}

impl fmt::Display for CompositeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompositeKind::Axis1D => write!(f, "1DAxis"),
            CompositeKind::Other(name) => write!(f, "{}", name),
        }
    }
}

impl From<String> for CompositeKind {
    fn from(name: String) -> Self {
        match name.as_str() {
            "1DAxis" => CompositeKind::Axis1D,
            _ => CompositeKind::Other(name),
        }
    }
}

impl From<CompositeKind> for String {
    fn from(kind: CompositeKind) -> Self {
        kind.to_string()
    }
}

/// A composite binding: part name → control path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeBinding {
    kind: CompositeKind,
    #[serde(default)]
    parts: IndexMap<String, String>,
}

impl Binding {
    /// Create a simple binding to `path` with an optional display name
    pub fn simple(path: impl Into<String>, name: Option<&str>) -> Self {
        Binding::Simple(SimpleBinding {
            path: path.into(),
            name: name.map(str::to_string),
        })
    }

    /// Unbound simple binding, used so an action always has something to assign
    pub fn placeholder() -> Self {
        Self::simple("", Some(DEFAULT_BINDING_NAME))
    }

    /// Start building a composite binding; chain `with_part` for each part
    pub fn composite(kind: CompositeKind) -> CompositeBinding {
        CompositeBinding {
            kind,
            parts: IndexMap::new(),
        }
    }

    /// Check if this is a composite binding
    pub fn is_composite(&self) -> bool {
        matches!(self, Binding::Composite(_))
    }

    /// Check if the binding cannot produce a value (composite with missing parts)
    pub fn is_inert(&self) -> bool {
        match self {
            Binding::Simple(_) => false,
            Binding::Composite(composite) => composite.is_inert(),
        }
    }

    /// Check if at least one control path is assigned
    pub fn is_bound(&self) -> bool {
        self.paths().iter().any(|path| !path.is_empty())
    }

    /// All control paths referenced by this binding, in part order
    pub fn paths(&self) -> Vec<&str> {
        match self {
            Binding::Simple(simple) => vec![simple.path.as_str()],
            Binding::Composite(composite) => composite.parts.values().map(String::as_str).collect(),
        }
    }

    /// Resolve the binding to a scalar against the current control snapshot
    pub fn resolve(&self, controls: &ControlSnapshot) -> f32 {
        match self {
            Binding::Simple(simple) => controls.read(&simple.path),
            Binding::Composite(composite) => composite.resolve(controls),
        }
    }
}

impl SimpleBinding {
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Rebind to a new control path (empty = unbind)
    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = path.into();
    }
}

impl CompositeBinding {
    /// Builder method: add (or replace) a named part
    pub fn with_part(mut self, part: impl Into<String>, path: impl Into<String>) -> Self {
        self.parts.insert(part.into(), path.into());
        self
    }

    pub fn kind(&self) -> &CompositeKind {
        &self.kind
    }

    /// Get the control path of a named part
    pub fn part(&self, part: &str) -> Option<&str> {
        self.parts.get(part).map(String::as_str)
    }

    /// Iterate over (part name, path) in insertion order
    pub fn parts(&self) -> impl Iterator<Item = (&str, &str)> {
        self.parts.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Change the path of an existing part
    ///
    /// Returns false if the part does not exist; parts cannot be added after
    /// construction.
    pub fn set_part_path(&mut self, part: &str, path: impl Into<String>) -> bool {
        match self.parts.get_mut(part) {
            Some(existing) => {
                *existing = path.into();
                true
            }
            None => false,
        }
    }

    /// Check if the binding cannot be resolved: required parts are missing
    /// or the kind is unknown
    pub fn is_inert(&self) -> bool {
        match &self.kind {
            CompositeKind::Axis1D => {
                self.parts.len() != 2
                    || !self.parts.contains_key(NEGATIVE_PART)
                    || !self.parts.contains_key(POSITIVE_PART)
            }
            CompositeKind::Other(_) => true,
        }
    }

    fn resolve(&self, controls: &ControlSnapshot) -> f32 {
        if self.is_inert() {
            return 0.0;
        }

        match &self.kind {
            CompositeKind::Axis1D => {
                let negative = self.part(NEGATIVE_PART).and_then(|p| controls.get(p));
                let positive = self.part(POSITIVE_PART).and_then(|p| controls.get(p));
                resolve_axis_1d(negative, positive)
            }
            CompositeKind::Other(_) => 0.0,
        }
    }
}

impl From<CompositeBinding> for Binding {
    fn from(composite: CompositeBinding) -> Self {
        Binding::Composite(composite)
    }
}

impl From<SimpleBinding> for Binding {
    fn from(simple: SimpleBinding) -> Self {
        Binding::Simple(simple)
    }
}

/// Combine the two halves of a 1-D axis
///
/// Digital halves count as -1/+1 and the sum is clamped; if either half is
/// analog the values pass through as `positive - negative`.
fn resolve_axis_1d(negative: Option<ControlValue>, positive: Option<ControlValue>) -> f32 {
    let any_analog = negative.map_or(false, |v| v.is_analog())
        || positive.map_or(false, |v| v.is_analog());

    if any_analog {
        let pos = positive.map(|v| v.as_f32()).unwrap_or(0.0);
        let neg = negative.map(|v| v.as_f32()).unwrap_or(0.0);
        return pos - neg;
    }

    let mut value = 0.0;
    if positive.map_or(false, |v| v.is_pressed()) {
        value += 1.0;
    }
    if negative.map_or(false, |v| v.is_pressed()) {
        value -= 1.0;
    }
    f32::clamp(value, -1.0, 1.0)
}
