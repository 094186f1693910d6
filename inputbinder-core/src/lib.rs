//! Input Binder Core Library
//!
//! A host-agnostic library for exposing named, device-independent actions that
//! users can bind to arbitrary control paths, persist to disk, and receive
//! typed runtime events from.
//!
//! # Architecture
//!
//! - Binding model: simple bindings (one control path) and composite bindings
//!   (named parts such as "negative"/"positive" forming a 1-D axis)
//! - Action registry: ordered, identifier-unique set of actions with
//!   add-if-absent merge semantics and a per-(action, phase) callback table
//! - Persistence codec: JSON bindings file, merged over a baseline action set
//!   on load and written atomically on save
//! - Override resolver: strips disallowed hardware bindings from the host's own
//!   action set
//!
//! The library does NOT:
//! - Poll devices or enumerate hardware (the host resolves control paths)
//! - Own any host state (callbacks get it handed in as a context)
//! - Draw any binding UI
//!
//! Flight-control wiring lives in the application layer (inputbinder-flight).
//!
//! # Example Usage
//!
//! ```no_run
//! use inputbinder_core::{
//!     codec, Action, ActionRegistry, Binding, CompositeKind, ControlSnapshot, Phase, ValueKind,
//! };
//! use std::path::Path;
//!
//! let baseline = vec![Action::new("pitch-trim", ValueKind::Axis)
//!     .with_name("Pitch Trim")
//!     .with_binding(
//!         Binding::composite(CompositeKind::Axis1D)
//!             .with_part("negative", "<Keyboard>/s")
//!             .with_part("positive", "<Keyboard>/w"),
//!     )];
//!
//! let mut registry: ActionRegistry<Vec<f32>> =
//!     codec::load(Path::new("input.json"), baseline).unwrap();
//! registry.enable("pitch-trim").unwrap();
//! registry
//!     .subscribe("pitch-trim", Phase::Performed, |event, seen: &mut Vec<f32>| {
//!         seen.push(event.value)
//!     })
//!     .unwrap();
//!
//! let mut seen = Vec::new();
//! let controls = ControlSnapshot::new().with_pressed("<Keyboard>/w");
//! registry.update(&controls, &mut seen);
//! ```

// Public modules
pub mod action;
pub mod binding;
pub mod codec;
pub mod config;
pub mod dispatch;
pub mod overrides;
pub mod registry;
pub mod types;

// Re-export main types for convenience
pub use action::Action;
pub use binding::{
    Binding, CompositeBinding, CompositeKind, SimpleBinding, NEGATIVE_PART, POSITIVE_PART,
};
pub use config::BinderConfig;
pub use dispatch::{ActionContext, Callback, Phase};
pub use overrides::{
    ForeignAction, ForeignActionSource, OverrideEntry, OverrideResolver, RebindingHook,
};
pub use registry::{ActionRegistry, RegistryStats};
pub use types::{
    BinderError, ControlSnapshot, ControlValue, InertBindingWarning, Result, ValueKind,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
