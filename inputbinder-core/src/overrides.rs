//! Override resolver
//!
//! Strips bindings from a foreign action set (the host's own actions) whose
//! effective control path belongs to a disallowed hardware class, and asks the
//! host to stop rebuilding those bindings on its own.
//!
//! The resolver never owns the foreign actions; it only mutates the bindings
//! it is handed through [`ForeignActionSource`].

use crate::config::BinderConfig;
use crate::types::{BinderError, Result};

/// One host action as seen by the resolver
pub trait ForeignAction {
    /// Name of the action (for logging)
    fn name(&self) -> &str;

    /// Number of bindings on the action
    fn binding_count(&self) -> usize;

    /// Path the host would actually use for the binding at `index`
    /// (the override path if one is set, the raw binding path otherwise)
    fn effective_path(&self, index: usize) -> Option<&str>;

    /// Rewrite the raw binding path at `index`
    fn set_binding_path(&mut self, index: usize, path: &str);

    /// Set an explicit override path at `index`, on top of the raw path
    fn apply_binding_override(&mut self, index: usize, path: &str);
}

/// An enumerable, mutable set of host actions
pub trait ForeignActionSource {
    fn actions_mut(&mut self) -> Box<dyn Iterator<Item = &mut dyn ForeignAction> + '_>;
}

/// Host extension point for its automatic device-list maintenance
///
/// A host that rebuilds bindings when devices change would otherwise put back
/// what the resolver removed.
pub trait RebindingHook {
    /// Whether the host has already run its own startup binding pass
    fn startup_binding_pass_complete(&self) -> bool;

    /// Turn off automatic rebinding on device change
    ///
    /// Returns false if the host has no way to do this.
    fn disable_automatic_rebinding(&mut self) -> bool;
}

/// A binding that was stripped during a pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideEntry {
    /// Name of the foreign action
    pub action: String,
    /// Index of the stripped binding
    pub index: usize,
    /// Effective path before stripping
    pub previous_path: String,
}

/// Strips disallowed hardware bindings from foreign actions
#[derive(Debug, Clone)]
pub struct OverrideResolver {
    config: BinderConfig,
    rebinding_suppressed: bool,
}

impl OverrideResolver {
    /// Create a resolver using the disallowed patterns of `config`
    pub fn new(config: &BinderConfig) -> Self {
        Self {
            config: config.clone(),
            rebinding_suppressed: false,
        }
    }

    /// Check if a control path belongs to a disallowed hardware class
    pub fn is_disallowed(&self, path: &str) -> bool {
        self.config.is_disallowed(path)
    }

    /// Whether automatic rebinding was successfully turned off
    pub fn rebinding_suppressed(&self) -> bool {
        self.rebinding_suppressed
    }

    /// Clear every foreign binding whose effective path is disallowed
    ///
    /// Each hit gets its raw path cleared and an empty override applied, since
    /// the host may re-resolve an empty raw path from a cached default. Running
    /// the pass again finds nothing to do.
    pub fn strip(&self, source: &mut dyn ForeignActionSource) -> Vec<OverrideEntry> {
        log::info!("Removing host gamepad bindings...");
        let mut entries = Vec::new();

        for action in source.actions_mut() {
            for index in 0..action.binding_count() {
                let Some(path) = action.effective_path(index) else {
                    continue;
                };
                if !self.is_disallowed(path) {
                    continue;
                }

                let previous_path = path.to_string();
                log::info!("Hit {} {}", action.name(), previous_path);

                action.set_binding_path(index, "");
                action.apply_binding_override(index, "");

                entries.push(OverrideEntry {
                    action: action.name().to_string(),
                    index,
                    previous_path,
                });
            }
        }

        log::debug!("Strip pass removed {} bindings", entries.len());
        entries
    }

    /// Stop the host from rebuilding stripped bindings on device change
    ///
    /// Must run before the host finishes its startup binding pass. Calling it
    /// again after it succeeded does nothing.
    pub fn suppress_automatic_rebinding(&mut self, hook: &mut dyn RebindingHook) -> Result<()> {
        if self.rebinding_suppressed {
            return Ok(());
        }

        log::info!("Stopping host from automatically removing gamepads...");
        if hook.startup_binding_pass_complete() {
            return Err(BinderError::RebindingTooLate);
        }
        if !hook.disable_automatic_rebinding() {
            return Err(BinderError::RebindingHookUnavailable);
        }

        self.rebinding_suppressed = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct HostBinding {
        path: String,
        override_path: Option<String>,
    }

    struct HostAction {
        name: String,
        bindings: Vec<HostBinding>,
        writes: usize,
    }

    impl ForeignAction for HostAction {
        fn name(&self) -> &str {
            &self.name
        }

        fn binding_count(&self) -> usize {
            self.bindings.len()
        }

        fn effective_path(&self, index: usize) -> Option<&str> {
            self.bindings
                .get(index)
                .map(|b| b.override_path.as_deref().unwrap_or(&b.path))
        }

        fn set_binding_path(&mut self, index: usize, path: &str) {
            self.bindings[index].path = path.to_string();
            self.writes += 1;
        }

        fn apply_binding_override(&mut self, index: usize, path: &str) {
            self.bindings[index].override_path = Some(path.to_string());
            self.writes += 1;
        }
    }

    struct HostInput {
        actions: Vec<HostAction>,
    }

    impl ForeignActionSource for HostInput {
        fn actions_mut(&mut self) -> Box<dyn Iterator<Item = &mut dyn ForeignAction> + '_> {
            Box::new(self.actions.iter_mut().map(|a| a as &mut dyn ForeignAction))
        }
    }

    fn action(name: &str, paths: &[&str]) -> HostAction {
        HostAction {
            name: name.to_string(),
            bindings: paths
                .iter()
                .map(|p| HostBinding { path: p.to_string(), override_path: None })
                .collect(),
            writes: 0,
        }
    }

    fn host() -> HostInput {
        HostInput {
            actions: vec![
                action("Pitch", &["<Keyboard>/s", "<Gamepad>/leftStick/y"]),
                action("Stage", &["<Keyboard>/space", "<XInputController>/buttonSouth"]),
                action("ToggleSAS", &["<Keyboard>/t"]),
            ],
        }
    }

    #[test]
    fn test_strip_clears_path_and_overrides() {
        let resolver = OverrideResolver::new(&BinderConfig::new());
        let mut input = host();

        let entries = resolver.strip(&mut input);
        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries[0],
            OverrideEntry {
                action: "Pitch".to_string(),
                index: 1,
                previous_path: "<Gamepad>/leftStick/y".to_string(),
            }
        );

        let pitch = &input.actions[0];
        assert_eq!(pitch.bindings[1].path, "");
        assert_eq!(pitch.bindings[1].override_path.as_deref(), Some(""));
        // Keyboard binding untouched
        assert_eq!(pitch.bindings[0].path, "<Keyboard>/s");
        assert!(pitch.bindings[0].override_path.is_none());
        assert_eq!(input.actions[2].writes, 0);
    }

    #[test]
    fn test_strip_uses_effective_path() {
        let resolver = OverrideResolver::new(&BinderConfig::new());
        let mut input = HostInput {
            actions: vec![HostAction {
                name: "Yaw".to_string(),
                bindings: vec![HostBinding {
                    path: "<Keyboard>/a".to_string(),
                    override_path: Some("<Gamepad>/leftStick/x".to_string()),
                }],
                writes: 0,
            }],
        };

        assert_eq!(resolver.strip(&mut input).len(), 1);
        assert_eq!(input.actions[0].effective_path(0), Some(""));
    }

    #[test]
    fn test_strip_is_idempotent() {
        let resolver = OverrideResolver::new(&BinderConfig::new());
        let mut input = host();

        resolver.strip(&mut input);
        let writes: Vec<usize> = input.actions.iter().map(|a| a.writes).collect();

        let second = resolver.strip(&mut input);
        assert!(second.is_empty());
        let writes_after: Vec<usize> = input.actions.iter().map(|a| a.writes).collect();
        assert_eq!(writes, writes_after);
    }

    struct Hook {
        supported: bool,
        startup_done: bool,
        disabled: usize,
    }

    impl RebindingHook for Hook {
        fn startup_binding_pass_complete(&self) -> bool {
            self.startup_done
        }

        fn disable_automatic_rebinding(&mut self) -> bool {
            if self.supported {
                self.disabled += 1;
            }
            self.supported
        }
    }

    #[test]
    fn test_suppress_rebinding_once() {
        let mut resolver = OverrideResolver::new(&BinderConfig::new());
        let mut hook = Hook { supported: true, startup_done: false, disabled: 0 };

        resolver.suppress_automatic_rebinding(&mut hook).unwrap();
        resolver.suppress_automatic_rebinding(&mut hook).unwrap();
        assert!(resolver.rebinding_suppressed());
        assert_eq!(hook.disabled, 1);
    }

    #[test]
    fn test_suppress_rebinding_failures() {
        let mut resolver = OverrideResolver::new(&BinderConfig::new());

        let mut late = Hook { supported: true, startup_done: true, disabled: 0 };
        assert!(matches!(
            resolver.suppress_automatic_rebinding(&mut late),
            Err(BinderError::RebindingTooLate)
        ));

        let mut missing = Hook { supported: false, startup_done: false, disabled: 0 };
        assert!(matches!(
            resolver.suppress_automatic_rebinding(&mut missing),
            Err(BinderError::RebindingHookUnavailable)
        ));
        assert!(!resolver.rebinding_suppressed());
    }
}
