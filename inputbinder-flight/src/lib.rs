//! Inputbinder Flight
//!
//! Flight-control application built on inputbinder-core. It adds:
//! - A baseline action set (throttle, trims, trim reset, host actions)
//! - Callbacks turning those actions into vessel control updates
//! - Per-tick trim integration
//! - Host lifecycle handling (startup strip, main-menu load, vessel changes)
//! - TOML configuration and logging setup
//!
//! The host implements [`InputHost`] and [`BindingSurface`]; everything else
//! is driven through [`Inputbinder`].

pub mod app;
pub mod baseline;
pub mod callbacks;
pub mod config;
pub mod events;
pub mod host;
pub mod logging;
pub mod state;
pub mod trim;

pub use app::{Inputbinder, InputbinderSlot};
pub use config::{load_config, AppConfig};
pub use events::{GameState, HostSignal};
pub use host::{BindingSurface, InputHost, VesselId};
pub use state::{FlightCtrlState, FlightCtrlStateIncremental, PendingControls, SimVessel, Vessel};
pub use trim::TrimIntegrator;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
