//! Flight callbacks
//!
//! Wires the application's own actions to flight control updates. Callbacks
//! queue updates into [`PendingControls`]; they never hold on to a vessel.

use crate::baseline::{ACTION_THROTTLE, ACTION_TRIM_RESET, OWN_ACTIONS};
use crate::state::{FlightCtrlStateIncremental, PendingControls};
use inputbinder_core::{ActionContext, ActionRegistry, Phase, Result};

fn set_throttle(event: &ActionContext<'_>, pending: &mut PendingControls) {
    pending.push(FlightCtrlStateIncremental::throttle(event.value.clamp(0.0, 1.0)));
}

fn reset_trim(_event: &ActionContext<'_>, pending: &mut PendingControls) {
    log::debug!("Resetting trim");
    pending.push(FlightCtrlStateIncremental::trims(0.0, 0.0, 0.0));
}

/// Register the throttle and trim-reset callbacks, then enable the own actions
pub fn register_flight_callbacks(registry: &mut ActionRegistry<PendingControls>) -> Result<()> {
    registry.subscribe(ACTION_THROTTLE, Phase::Performed, set_throttle)?;
    registry.subscribe(ACTION_THROTTLE, Phase::Started, set_throttle)?;
    registry.subscribe(ACTION_THROTTLE, Phase::Canceled, set_throttle)?;
    registry.subscribe(ACTION_TRIM_RESET, Phase::Performed, reset_trim)?;

    for id in OWN_ACTIONS {
        registry.enable(id)?;
    }
    Ok(())
}
