//! Baseline action set
//!
//! The application's own actions and the names of the host actions it offers
//! for rebinding. All of them are added with add-if-absent semantics, so
//! whatever the user saved wins.

use inputbinder_core::{Action, Binding, CompositeKind, ValueKind, NEGATIVE_PART, POSITIVE_PART};

pub const ACTION_THROTTLE: &str = "throttle";
pub const ACTION_PITCH_TRIM: &str = "pitch-trim";
pub const ACTION_ROLL_TRIM: &str = "roll-trim";
pub const ACTION_YAW_TRIM: &str = "yaw-trim";
pub const ACTION_TRIM_RESET: &str = "trim-reset";

/// Identifiers of the application's own actions
pub const OWN_ACTIONS: [&str; 5] = [
    ACTION_THROTTLE,
    ACTION_PITCH_TRIM,
    ACTION_ROLL_TRIM,
    ACTION_YAW_TRIM,
    ACTION_TRIM_RESET,
];

/// Host actions offered for rebinding, by host name
pub const HOST_ACTIONS: [&str; 39] = [
    "ThrottleDelta",
    "ThrottleCutoff",
    "ThrottleMax",
    "Pitch",
    "Roll",
    "Yaw",
    "TogglePrecisionMode",
    "WheelSteer",
    "WheelBrakes",
    "WheelThrottle",
    "Stage",
    "ToggleLandingGear",
    "ToggleLights",
    "ToggleSAS",
    "ToggleRCS",
    "TranslateX",
    "TranslateY",
    "TranslateZ",
    "TriggerActionGroup1",
    "TriggerActionGroup2",
    "TriggerActionGroup3",
    "TriggerActionGroup4",
    "TriggerActionGroup5",
    "TriggerActionGroup6",
    "TriggerActionGroup7",
    "TriggerActionGroup8",
    "TriggerActionGroup9",
    "TriggerActionGroup10",
    "CameraPitchGamepad",
    "CameraYawGamepad",
    "ShowMap",
    "ConfirmDialogue",
    "MenuGoBack",
    "QuickSave",
    "TimeWarpDecrease",
    "TimeWarpIncrease",
    "TimeWarpStop",
    "TogglePauseMenu",
    "ToggleUIVisibility",
];

fn unbound_axis_1d() -> Binding {
    Binding::composite(CompositeKind::Axis1D)
        .with_part(NEGATIVE_PART, "")
        .with_part(POSITIVE_PART, "")
        .into()
}

fn trim_action(id: &str, name: &str) -> Action {
    Action::new(id, ValueKind::Axis)
        .with_name(name)
        .with_binding(unbound_axis_1d())
}

/// The application's own actions, all unbound
pub fn own_actions() -> Vec<Action> {
    vec![
        Action::new(ACTION_THROTTLE, ValueKind::Axis)
            .with_name("Throttle Axis")
            .with_binding(Binding::placeholder()),
        trim_action(ACTION_PITCH_TRIM, "Pitch Trim"),
        trim_action(ACTION_ROLL_TRIM, "Roll Trim"),
        trim_action(ACTION_YAW_TRIM, "Yaw Trim"),
        Action::new(ACTION_TRIM_RESET, ValueKind::Button)
            .with_name("Reset Trim")
            .with_binding(Binding::placeholder()),
    ]
}

/// Keep only the host actions this application offers for rebinding
pub fn select_host_actions(actions: Vec<Action>) -> Vec<Action> {
    actions
        .into_iter()
        .filter(|action| HOST_ACTIONS.contains(&action.id()))
        .collect()
}

/// Full baseline: own actions first, then the offered host actions
pub fn baseline_actions(host_actions: Vec<Action>) -> Vec<Action> {
    let mut actions = own_actions();
    actions.extend(select_host_actions(host_actions));
    actions
}
