//! Action registry
//!
//! The registry exclusively owns every action and binding. Actions are kept in
//! insertion order so that the bindings file is written deterministically. The
//! registry also holds the callback table used by dispatch.

use crate::action::Action;
use crate::dispatch::{phases_for, ActionContext, Phase, Subscriptions};
use crate::types::{BinderError, ControlSnapshot, InertBindingWarning, Result, ValueKind};
use indexmap::IndexMap;
use std::path::{Path, PathBuf};

/// Registry of actions keyed by identifier
///
/// `C` is the context handed to callbacks on dispatch: whatever the
/// application wants its callbacks to mutate.
pub struct ActionRegistry<C = ()> {
    /// All actions, in insertion order
    actions: IndexMap<String, Action>,
    /// File the registry was loaded from / will be saved to
    path: Option<PathBuf>,
    /// (action identifier, phase) → callbacks
    subscriptions: Subscriptions<C>,
}

impl<C> ActionRegistry<C> {
    /// Create a new empty registry with no backing file
    pub fn new() -> Self {
        Self {
            actions: IndexMap::new(),
            path: None,
            subscriptions: Subscriptions::new(),
        }
    }

    /// Create a new empty registry backed by `path`
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        let mut registry = Self::new();
        registry.path = Some(path.into());
        registry
    }

    /// File the registry is backed by, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = Some(path.into());
    }

    /// Create and register a new action with a placeholder binding
    ///
    /// Fails with `DuplicateActionError` if the identifier is taken.
    pub fn create(&mut self, id: &str, kind: ValueKind) -> Result<&mut Action> {
        self.insert(Action::new(id, kind))
    }

    /// Register an action unless its identifier is already present
    ///
    /// Adding an existing identifier is a no-op, so host defaults can be merged
    /// over user-saved state any number of times. With `as_default` the
    /// action's bindings are remembered as the host's, so it only counts as
    /// customized once they change.
    ///
    /// Returns true if the action was inserted.
    pub fn add(&mut self, mut action: Action, as_default: bool) -> bool {
        action.ensure_placeholder();
        if as_default {
            action.baseline = Some(action.bindings().to_vec());
        }

        match self.insert(action) {
            Ok(_) => true,
            Err(e) => {
                log::debug!("{}, keeping the registered action", e);
                false
            }
        }
    }

    fn insert(&mut self, mut action: Action) -> Result<&mut Action> {
        if self.actions.contains_key(action.id()) {
            return Err(BinderError::DuplicateActionError(action.id().to_string()));
        }

        action.ensure_placeholder();
        let id = action.id().to_string();
        log::trace!("Registering action '{}' ({})", id, action.kind());
        Ok(self.actions.entry(id).or_insert(action))
    }

    /// Get mutable access to an action
    pub fn get(&mut self, id: &str) -> Result<&mut Action> {
        self.actions
            .get_mut(id)
            .ok_or_else(|| BinderError::NotFoundError(id.to_string()))
    }

    /// Get read-only access to an action, if registered
    pub fn find(&self, id: &str) -> Option<&Action> {
        self.actions.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.actions.contains_key(id)
    }

    /// Number of registered actions
    pub fn count(&self) -> usize {
        self.actions.len()
    }

    /// Iterate over all actions in insertion order
    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.actions.values()
    }

    /// All identifiers in insertion order
    pub fn ids(&self) -> Vec<&str> {
        self.actions.keys().map(String::as_str).collect()
    }

    /// Enable an action so it resolves values and dispatches events
    pub fn enable(&mut self, id: &str) -> Result<()> {
        self.get(id)?.enable();
        Ok(())
    }

    /// Disable an action (no events, reads as zero)
    pub fn disable(&mut self, id: &str) -> Result<()> {
        self.get(id)?.disable();
        Ok(())
    }

    /// Register a callback for one phase of an action
    ///
    /// Callbacks of the same phase run in registration order.
    pub fn subscribe<F>(&mut self, id: &str, phase: Phase, callback: F) -> Result<()>
    where
        F: Fn(&ActionContext<'_>, &mut C) + 'static,
    {
        if !self.contains(id) {
            return Err(BinderError::NotFoundError(id.to_string()));
        }
        self.subscriptions.subscribe(id, phase, callback);
        Ok(())
    }

    /// Number of callbacks registered for (action, phase)
    pub fn subscriber_count(&self, id: &str, phase: Phase) -> usize {
        self.subscriptions.count(id, phase)
    }

    /// Sample the current value of an action
    ///
    /// Used by per-tick polling; independent of event dispatch.
    pub fn read_value(&self, id: &str, controls: &ControlSnapshot) -> Result<f32> {
        self.find(id)
            .map(|action| action.read_value(controls))
            .ok_or_else(|| BinderError::NotFoundError(id.to_string()))
    }

    /// Resolve every enabled action and fire the phases its value change implies
    ///
    /// Never fails: disabled actions and actions without callbacks simply
    /// produce nothing. Returns the number of callbacks invoked.
    pub fn update(&mut self, controls: &ControlSnapshot, context: &mut C) -> usize {
        let mut invoked = 0;

        for (id, action) in self.actions.iter_mut() {
            if !action.is_enabled() {
                continue;
            }

            let current = action.read_value(controls);
            let previous = action.last_value;
            action.last_value = current;

            for phase in phases_for(action.kind(), previous, current) {
                log::trace!("Dispatching {} for '{}' (value {:.3})", phase, id, current);
                invoked += self.subscriptions.invoke(id, phase, current, context);
            }
        }

        invoked
    }

    /// Composite bindings that are missing required parts
    pub fn inert_bindings(&self) -> Vec<InertBindingWarning> {
        self.actions
            .values()
            .flat_map(|action| {
                action.inert_bindings().into_iter().map(move |index| InertBindingWarning {
                    action: action.id().to_string(),
                    index,
                })
            })
            .collect()
    }

    /// Get registry statistics
    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            num_actions: self.actions.len(),
            num_enabled: self.actions.values().filter(|a| a.is_enabled()).count(),
            num_bindings: self.actions.values().map(|a| a.bindings().len()).sum(),
            num_defaults: self.actions.values().filter(|a| a.is_default()).count(),
        }
    }
}

impl<C> Default for ActionRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Registry statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryStats {
    /// Total number of actions
    pub num_actions: usize,
    /// Actions currently enabled
    pub num_enabled: usize,
    /// Total number of bindings across all actions
    pub num_bindings: usize,
    /// Actions supplied by the host as defaults
    pub num_defaults: usize,
}
