//! Flight control state
//!
//! The vessel owns its control state (throttle and trim accumulators); this
//! crate only ever hands it incremental updates. Callbacks do not touch a
//! vessel directly: they queue updates in [`PendingControls`], which the
//! application applies to whatever vessel is active after dispatch.

/// Control state of a vessel
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlightCtrlState {
    /// Main throttle, 0.0 to 1.0
    pub main_throttle: f32,
    pub pitch_trim: f32,
    pub roll_trim: f32,
    pub yaw_trim: f32,
}

/// Partial update of a vessel's control state; unset fields are left alone
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlightCtrlStateIncremental {
    pub main_throttle: Option<f32>,
    pub pitch_trim: Option<f32>,
    pub roll_trim: Option<f32>,
    pub yaw_trim: Option<f32>,
}

impl FlightCtrlStateIncremental {
    /// Update setting the main throttle
    pub fn throttle(value: f32) -> Self {
        Self {
            main_throttle: Some(value),
            ..Self::default()
        }
    }

    /// Update setting all three trims
    pub fn trims(pitch: f32, roll: f32, yaw: f32) -> Self {
        Self {
            pitch_trim: Some(pitch),
            roll_trim: Some(roll),
            yaw_trim: Some(yaw),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl FlightCtrlState {
    /// Apply an incremental update, field by field
    pub fn apply(&mut self, update: &FlightCtrlStateIncremental) {
        if let Some(v) = update.main_throttle {
            self.main_throttle = v;
        }
        if let Some(v) = update.pitch_trim {
            self.pitch_trim = v;
        }
        if let Some(v) = update.roll_trim {
            self.roll_trim = v;
        }
        if let Some(v) = update.yaw_trim {
            self.yaw_trim = v;
        }
    }
}

/// A controllable vessel owned by the host
pub trait Vessel {
    /// Current control state
    fn flight_ctrl_state(&self) -> FlightCtrlState;

    /// Apply an incremental control update
    ///
    /// The vessel is responsible for clamping to its own limits.
    fn apply_flight_ctrl_state(&mut self, update: &FlightCtrlStateIncremental);
}

/// In-memory vessel that clamps throttle to [0, 1] and trims to [-limit, limit]
#[derive(Debug, Clone, PartialEq)]
pub struct SimVessel {
    state: FlightCtrlState,
    trim_limit: f32,
}

impl SimVessel {
    pub fn new(trim_limit: f32) -> Self {
        Self {
            state: FlightCtrlState::default(),
            trim_limit: trim_limit.abs(),
        }
    }

    pub fn state(&self) -> &FlightCtrlState {
        &self.state
    }
}

impl Default for SimVessel {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Vessel for SimVessel {
    fn flight_ctrl_state(&self) -> FlightCtrlState {
        self.state
    }

    fn apply_flight_ctrl_state(&mut self, update: &FlightCtrlStateIncremental) {
        self.state.apply(update);

        let limit = self.trim_limit;
        self.state.main_throttle = self.state.main_throttle.clamp(0.0, 1.0);
        self.state.pitch_trim = self.state.pitch_trim.clamp(-limit, limit);
        self.state.roll_trim = self.state.roll_trim.clamp(-limit, limit);
        self.state.yaw_trim = self.state.yaw_trim.clamp(-limit, limit);
    }
}

/// Control updates queued by callbacks during one dispatch
#[derive(Debug, Clone, Default)]
pub struct PendingControls {
    updates: Vec<FlightCtrlStateIncremental>,
}

impl PendingControls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an update
    pub fn push(&mut self, update: FlightCtrlStateIncremental) {
        if !update.is_empty() {
            self.updates.push(update);
        }
    }

    pub fn len(&self) -> usize {
        self.updates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }

    /// Queued updates in the order they were pushed
    pub fn updates(&self) -> &[FlightCtrlStateIncremental] {
        &self.updates
    }

    /// Apply queued updates in order to `vessel`, or drop them if there is none
    ///
    /// Returns the number of updates applied.
    pub fn flush(&mut self, vessel: Option<&mut dyn Vessel>) -> usize {
        let updates = std::mem::take(&mut self.updates);
        match vessel {
            Some(vessel) => {
                for update in &updates {
                    vessel.apply_flight_ctrl_state(update);
                }
                updates.len()
            }
            None => {
                if !updates.is_empty() {
                    log::trace!("No active vessel, dropping {} control updates", updates.len());
                }
                0
            }
        }
    }
}
