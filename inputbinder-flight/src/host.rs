//! Host contract
//!
//! Everything the application needs from the game it runs inside. The host
//! owns its input system, its vessels and the binding UI; this crate only
//! reaches them through these traits.

use crate::state::Vessel;
use inputbinder_core::{Action, ForeignActionSource, RebindingHook};

/// Host-assigned identifier of a vessel
pub type VesselId = u64;

/// The host game
///
/// Its own action set is stripped through [`ForeignActionSource`]; its
/// automatic rebinding is disabled through [`RebindingHook`].
pub trait InputHost: ForeignActionSource + RebindingHook {
    /// Host-defined actions offered for rebinding, as host defaults
    fn baseline_actions(&self) -> Vec<Action>;

    /// The vessel currently under control, if any
    fn active_vessel(&self) -> Option<VesselId>;

    /// Mutable access to a vessel; None once the vessel is gone
    fn vessel_mut(&mut self, id: VesselId) -> Option<&mut dyn Vessel>;
}

/// The binding UI and its launcher button
pub trait BindingSurface {
    /// Whether the UI was built (or is being built)
    fn is_initialized(&self) -> bool;

    /// Build the UI
    fn initialize(&mut self);

    /// Hide the UI window
    fn hide(&mut self);

    /// Show or remove the launcher button; `open` mirrors whether the window is open
    fn set_launcher(&mut self, present: bool, open: bool);

    /// Whether the UI window is open
    fn is_open(&self) -> bool;
}
