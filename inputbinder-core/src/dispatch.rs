//! Event dispatch
//!
//! Callbacks are stored in a table keyed by action identifier and phase.
//! Dispatch is a lookup followed by invoking the callbacks in registration
//! order; callbacks never capture the state they mutate, it is handed to them
//! as the context argument `C` on every call.

use crate::types::{is_at_rest, ValueKind};
use std::collections::HashMap;
use std::fmt;

/// Lifecycle phase of an action value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Value moved away from rest
    Started,
    /// Value sampled while actuated (or a button was triggered)
    Performed,
    /// Value returned to rest
    Canceled,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Started => write!(f, "started"),
            Phase::Performed => write!(f, "performed"),
            Phase::Canceled => write!(f, "canceled"),
        }
    }
}

/// What a callback gets to see about the event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionContext<'a> {
    /// Identifier of the action that fired
    pub action: &'a str,
    /// Phase being dispatched
    pub phase: Phase,
    /// Current resolved value
    pub value: f32,
}

/// A registered callback
pub type Callback<C> = Box<dyn Fn(&ActionContext<'_>, &mut C)>;

/// Callbacks of one action, one list per phase
struct PhaseTable<C> {
    started: Vec<Callback<C>>,
    performed: Vec<Callback<C>>,
    canceled: Vec<Callback<C>>,
}

impl<C> PhaseTable<C> {
    fn new() -> Self {
        Self {
            started: Vec::new(),
            performed: Vec::new(),
            canceled: Vec::new(),
        }
    }

    fn get(&self, phase: Phase) -> &Vec<Callback<C>> {
        match phase {
            Phase::Started => &self.started,
            Phase::Performed => &self.performed,
            Phase::Canceled => &self.canceled,
        }
    }

    fn get_mut(&mut self, phase: Phase) -> &mut Vec<Callback<C>> {
        match phase {
            Phase::Started => &mut self.started,
            Phase::Performed => &mut self.performed,
            Phase::Canceled => &mut self.canceled,
        }
    }
}

/// Publish/subscribe table: (action identifier, phase) → callbacks
pub(crate) struct Subscriptions<C> {
    table: HashMap<String, PhaseTable<C>>,
}

impl<C> Subscriptions<C> {
    pub(crate) fn new() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    pub(crate) fn subscribe<F>(&mut self, action: &str, phase: Phase, callback: F)
    where
        F: Fn(&ActionContext<'_>, &mut C) + 'static,
    {
        self.table
            .entry(action.to_string())
            .or_insert_with(PhaseTable::new)
            .get_mut(phase)
            .push(Box::new(callback));
    }

    /// Number of callbacks registered for (action, phase)
    pub(crate) fn count(&self, action: &str, phase: Phase) -> usize {
        self.table
            .get(action)
            .map(|phases| phases.get(phase).len())
            .unwrap_or(0)
    }

    /// Invoke callbacks for (action, phase) in registration order
    ///
    /// Returns the number of callbacks invoked.
    pub(crate) fn invoke(&self, action: &str, phase: Phase, value: f32, context: &mut C) -> usize {
        let Some(phases) = self.table.get(action) else {
            return 0;
        };

        let callbacks = phases.get(phase);
        let event = ActionContext { action, phase, value };
        for callback in callbacks {
            callback(&event, context);
        }
        callbacks.len()
    }
}

/// Phases to fire for a value change, in firing order
///
/// Buttons are triggers: only the press fires, as a single `Performed`.
/// Every other kind fires `Started` + `Performed` when leaving rest,
/// `Performed` on every sample while actuated and `Canceled` on return to rest.
/// Unknown kinds fire nothing.
pub(crate) fn phases_for(kind: &ValueKind, previous: f32, current: f32) -> Vec<Phase> {
    let was_active = !is_at_rest(previous);
    let is_active = !is_at_rest(current);

    match kind {
        ValueKind::Button => {
            if !was_active && is_active {
                vec![Phase::Performed]
            } else {
                Vec::new()
            }
        }
        ValueKind::Axis | ValueKind::Vector2 | ValueKind::Analog => match (was_active, is_active) {
            (false, true) => vec![Phase::Started, Phase::Performed],
            (true, true) => vec![Phase::Performed],
            (true, false) => vec![Phase::Canceled],
            (false, false) => Vec::new(),
        },
        ValueKind::Other(_) => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_phase_sequence() {
        assert_eq!(
            phases_for(&ValueKind::Axis, 0.0, 0.5),
            vec![Phase::Started, Phase::Performed]
        );
        assert_eq!(phases_for(&ValueKind::Axis, 0.5, 0.5), vec![Phase::Performed]);
        assert_eq!(phases_for(&ValueKind::Axis, 0.5, -0.2), vec![Phase::Performed]);
        assert_eq!(phases_for(&ValueKind::Axis, 0.5, 0.0), vec![Phase::Canceled]);
        assert!(phases_for(&ValueKind::Axis, 0.0, 0.0).is_empty());
    }

    #[test]
    fn test_button_fires_performed_once() {
        assert_eq!(phases_for(&ValueKind::Button, 0.0, 1.0), vec![Phase::Performed]);
        assert!(phases_for(&ValueKind::Button, 1.0, 1.0).is_empty());
        assert!(phases_for(&ValueKind::Button, 1.0, 0.0).is_empty());
        assert!(phases_for(&ValueKind::Other("Chord".to_string()), 0.0, 1.0).is_empty());
    }

    #[test]
    fn test_invoke_in_registration_order() {
        let mut subs: Subscriptions<Vec<String>> = Subscriptions::new();
        subs.subscribe("throttle", Phase::Performed, |_, log: &mut Vec<String>| log.push("first".into()));
        subs.subscribe("throttle", Phase::Performed, |_, log: &mut Vec<String>| log.push("second".into()));
        subs.subscribe("throttle", Phase::Canceled, |_, log: &mut Vec<String>| log.push("cancel".into()));

        let mut log = Vec::new();
        let invoked = subs.invoke("throttle", Phase::Performed, 0.3, &mut log);
        assert_eq!(invoked, 2);
        assert_eq!(log, vec!["first", "second"]);

        assert_eq!(subs.count("throttle", Phase::Canceled), 1);
        assert_eq!(subs.count("throttle", Phase::Started), 0);
        assert_eq!(subs.invoke("unknown", Phase::Performed, 1.0, &mut log), 0);
    }

    #[test]
    fn test_callback_sees_value_and_phase() {
        let mut subs: Subscriptions<Vec<(String, Phase, f32)>> = Subscriptions::new();
        subs.subscribe(
            "throttle",
            Phase::Started,
            |event: &ActionContext<'_>, seen: &mut Vec<(String, Phase, f32)>| {
                seen.push((event.action.to_string(), event.phase, event.value))
            },
        );

        let mut seen = Vec::new();
        subs.invoke("throttle", Phase::Started, 0.8, &mut seen);
        assert_eq!(seen, vec![("throttle".to_string(), Phase::Started, 0.8)]);
    }
}
