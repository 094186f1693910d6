//! Actions
//!
//! An action is a named, device-independent input ("throttle", "pitch-trim")
//! with an expected value kind and an ordered list of bindings.

use crate::binding::Binding;
use crate::types::{ControlSnapshot, ValueKind};
use serde_json::{Map, Value};

/// A named abstract input
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    /// Stable identifier, unique within a registry
    id: String,
    /// Display name
    name: String,
    /// Expected value kind
    kind: ValueKind,
    /// Ordered bindings
    bindings: Vec<Binding>,
    /// Disabled actions read as zero and produce no events
    enabled: bool,
    /// Fields from the bindings file this version does not understand
    pub(crate) extra: Map<String, Value>,
    /// Bindings as supplied by the host, for actions added as defaults
    pub(crate) baseline: Option<Vec<Binding>>,
    /// Last value seen by dispatch
    pub(crate) last_value: f32,
}

impl Action {
    /// Create a new disabled action with no bindings
    ///
    /// The display name defaults to the identifier.
    pub fn new(id: impl Into<String>, kind: ValueKind) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            kind,
            bindings: Vec::new(),
            enabled: false,
            extra: Map::new(),
            baseline: None,
            last_value: 0.0,
        }
    }

    /// Builder method: set the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Builder method: append a binding
    pub fn with_binding(mut self, binding: impl Into<Binding>) -> Self {
        self.bindings.push(binding.into());
        self
    }

    /// Builder method: set the enabled flag
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn kind(&self) -> &ValueKind {
        &self.kind
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn binding(&self, index: usize) -> Option<&Binding> {
        self.bindings.get(index)
    }

    /// Append a new binding (e.g. a second key for the same action)
    pub fn add_binding(&mut self, binding: impl Into<Binding>) {
        self.bindings.push(binding.into());
    }

    /// Rebind the simple binding at `index`
    ///
    /// Returns false if there is no binding at `index` or it is a composite.
    pub fn set_binding_path(&mut self, index: usize, path: impl Into<String>) -> bool {
        match self.bindings.get_mut(index) {
            Some(Binding::Simple(simple)) => {
                simple.set_path(path);
                true
            }
            _ => false,
        }
    }

    /// Rebind one part of the composite binding at `index`
    ///
    /// Returns false if there is no composite at `index` or it has no such part.
    pub fn set_part_path(&mut self, index: usize, part: &str, path: impl Into<String>) -> bool {
        match self.bindings.get_mut(index) {
            Some(Binding::Composite(composite)) => composite.set_part_path(part, path),
            _ => false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Disable the action; its dispatch state is reset without firing events
    pub fn disable(&mut self) {
        self.enabled = false;
        self.last_value = 0.0;
    }

    /// Check if the bindings differ from what the host supplied
    ///
    /// Actions that were not added as host defaults always count as customized.
    pub fn is_customized(&self) -> bool {
        match &self.baseline {
            Some(baseline) => *baseline != self.bindings,
            None => true,
        }
    }

    /// Check if the action was supplied by the host as a default
    pub fn is_default(&self) -> bool {
        self.baseline.is_some()
    }

    /// Indices of composite bindings that are missing required parts
    pub fn inert_bindings(&self) -> Vec<usize> {
        self.bindings
            .iter()
            .enumerate()
            .filter(|(_, binding)| binding.is_inert())
            .map(|(index, _)| index)
            .collect()
    }

    /// Resolve the current value of the action
    ///
    /// Disabled actions and actions of an unknown kind read as zero. With
    /// several bindings the one with the largest magnitude wins; ties go to
    /// the earlier binding.
    pub fn read_value(&self, controls: &ControlSnapshot) -> f32 {
        if !self.enabled || !self.kind.is_known() {
            return 0.0;
        }

        let mut best = 0.0f32;
        for binding in &self.bindings {
            let value = binding.resolve(controls);
            if value.abs() > best.abs() {
                best = value;
            }
        }
        best
    }

    /// Add an unbound placeholder if the action has no bindings at all
    pub(crate) fn ensure_placeholder(&mut self) {
        if self.bindings.is_empty() {
            self.bindings.push(Binding::placeholder());
        }
    }

    /// Reassemble an action read from a bindings file
    pub(crate) fn from_parts(
        id: String,
        name: String,
        kind: ValueKind,
        enabled: bool,
        bindings: Vec<Binding>,
        extra: Map<String, Value>,
    ) -> Self {
        Self {
            id,
            name,
            kind,
            bindings,
            enabled,
            extra,
            baseline: None,
            last_value: 0.0,
        }
    }
}
