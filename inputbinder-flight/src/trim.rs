//! Per-tick trim integration
//!
//! Trim actions are rates, not positions: every tick their value is sampled,
//! multiplied by the elapsed time and added to the vessel's trim. This polls
//! unconditionally and does not depend on dispatch events.

use crate::baseline::{ACTION_PITCH_TRIM, ACTION_ROLL_TRIM, ACTION_YAW_TRIM};
use crate::state::{FlightCtrlStateIncremental, Vessel};
use inputbinder_core::{ActionRegistry, ControlSnapshot};

/// Trim change for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrimDelta {
    pub pitch: f32,
    pub roll: f32,
    pub yaw: f32,
}

/// Integrates trim rate actions into vessel trim
#[derive(Debug, Clone)]
pub struct TrimIntegrator {
    pitch: String,
    roll: String,
    yaw: String,
    /// Trims are kept within [-limit, limit]
    limit: f32,
}

impl TrimIntegrator {
    /// Integrator over the application's own trim actions
    pub fn new() -> Self {
        Self::with_actions(ACTION_PITCH_TRIM, ACTION_ROLL_TRIM, ACTION_YAW_TRIM)
    }

    /// Integrator over arbitrary pitch/roll/yaw rate actions
    pub fn with_actions(pitch: &str, roll: &str, yaw: &str) -> Self {
        Self {
            pitch: pitch.to_string(),
            roll: roll.to_string(),
            yaw: yaw.to_string(),
            limit: 1.0,
        }
    }

    /// Builder method: set the trim limit
    pub fn with_limit(mut self, limit: f32) -> Self {
        self.limit = limit.abs();
        self
    }

    pub fn limit(&self) -> f32 {
        self.limit
    }

    /// Sample the trim rates and scale them by the elapsed time
    pub fn sample<C>(&self, registry: &ActionRegistry<C>, controls: &ControlSnapshot, dt: f32) -> TrimDelta {
        let rate = |id: &str| match registry.read_value(id, controls) {
            Ok(value) => value,
            Err(e) => {
                log::trace!("{}, trim rate reads as zero", e);
                0.0
            }
        };

        TrimDelta {
            pitch: rate(&self.pitch) * dt,
            roll: rate(&self.roll) * dt,
            yaw: rate(&self.yaw) * dt,
        }
    }

    /// Run one tick: add the sampled delta to the vessel's trim
    ///
    /// The result is clamped to the trim limit before it reaches the vessel.
    /// Returns the update that was applied.
    pub fn tick<C>(
        &self,
        registry: &ActionRegistry<C>,
        controls: &ControlSnapshot,
        dt: f32,
        vessel: &mut dyn Vessel,
    ) -> FlightCtrlStateIncremental {
        let delta = self.sample(registry, controls, dt);
        let state = vessel.flight_ctrl_state();
        let limit = self.limit;
        let update = FlightCtrlStateIncremental::trims(
            (state.pitch_trim + delta.pitch).clamp(-limit, limit),
            (state.roll_trim + delta.roll).clamp(-limit, limit),
            (state.yaw_trim + delta.yaw).clamp(-limit, limit),
        );
        vessel.apply_flight_ctrl_state(&update);
        update
    }
}

impl Default for TrimIntegrator {
    fn default() -> Self {
        Self::new()
    }
}
