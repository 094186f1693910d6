//! Host lifecycle signals

use std::fmt;

/// Coarse game states the host reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    Loading,
    MainMenu,
    SpaceCenter,
    Editor,
    TrackingStation,
    Flight,
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GameState::Loading => "Loading",
            GameState::MainMenu => "MainMenu",
            GameState::SpaceCenter => "SpaceCenter",
            GameState::Editor => "Editor",
            GameState::TrackingStation => "TrackingStation",
            GameState::Flight => "Flight",
        };
        write!(f, "{}", name)
    }
}

/// Notifications the host delivers to the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostSignal {
    /// The game entered a new state
    GameStateEntered(GameState),
    /// The active vessel is about to change
    VesselChanging,
    /// The active vessel changed
    VesselChanged,
}

impl HostSignal {
    /// Whether the signal can change which vessel is active
    pub fn affects_vessel(&self) -> bool {
        matches!(self, HostSignal::VesselChanging | HostSignal::VesselChanged)
    }
}
