//! Application orchestration
//!
//! Ties the core registry to the host: strips host gamepad bindings at
//! startup, loads the bindings file once the main menu is reached, and each
//! tick dispatches events into [`PendingControls`] before flushing them and
//! integrating trim on whatever vessel is active.

use crate::baseline::baseline_actions;
use crate::callbacks::register_flight_callbacks;
use crate::config::AppConfig;
use crate::events::{GameState, HostSignal};
use crate::host::{BindingSurface, InputHost, VesselId};
use crate::state::PendingControls;
use crate::trim::TrimIntegrator;
use anyhow::{Context, Result};
use inputbinder_core::{codec, ActionRegistry, BinderError, ControlSnapshot, OverrideResolver};
use std::fs;
use std::path::{Path, PathBuf};

/// Where a corrupt bindings file is moved before it is replaced
pub fn corrupt_backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".corrupt");
    PathBuf::from(name)
}

/// The running application
pub struct Inputbinder {
    config: AppConfig,
    resolver: OverrideResolver,
    registry: ActionRegistry<PendingControls>,
    pending: PendingControls,
    trim: TrimIntegrator,
    initialized: bool,
    main_menu_seen: bool,
    active_vessel: Option<VesselId>,
    corrupt_backup_pending: bool,
}

impl Inputbinder {
    /// Early startup: turn off host rebinding, then strip host gamepad bindings
    ///
    /// Must run before the host's own startup binding pass. Failing to turn
    /// off rebinding is logged and startup continues.
    pub fn start<H: InputHost>(config: AppConfig, host: &mut H) -> Self {
        log::info!("Inputbinder v{}", env!("CARGO_PKG_VERSION"));
        log::info!("Using binder library v{}", inputbinder_core::VERSION);

        let mut resolver = OverrideResolver::new(&config.binder);
        if let Err(e) = resolver.suppress_automatic_rebinding(host) {
            log::warn!("{}; stripped bindings may come back on device change", e);
        }
        resolver.strip(host);

        let registry = ActionRegistry::with_path(config.bindings_path());

        Self {
            trim: TrimIntegrator::new().with_limit(config.trim.limit),
            config,
            resolver,
            registry,
            pending: PendingControls::new(),
            initialized: false,
            main_menu_seen: false,
            active_vessel: None,
            corrupt_backup_pending: false,
        }
    }

    /// Load the bindings file over the baseline actions and wire callbacks
    ///
    /// Runs once; later calls do nothing. A corrupt file is reported and the
    /// baseline used in its place. A missing file is created.
    pub fn initialize<H: InputHost>(&mut self, host: &mut H) -> Result<()> {
        if self.initialized {
            return Ok(());
        }

        // The host may have put bindings back between start and now
        self.resolver.strip(host);

        let path = self.config.bindings_path();
        let existed = path.exists();
        let baseline = baseline_actions(host.baseline_actions());

        self.registry = match codec::load(&path, baseline.clone()) {
            Ok(registry) => registry,
            Err(e @ BinderError::CorruptFileError { .. }) => {
                log::error!("{}; using default bindings", e);
                self.corrupt_backup_pending = true;
                let mut registry = ActionRegistry::with_path(&path);
                codec::merge_baseline(&mut registry, baseline);
                registry
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to load bindings: {:?}", path))
            }
        };

        if !existed {
            self.save()?;
        }

        register_flight_callbacks(&mut self.registry)
            .context("Failed to register flight callbacks")?;

        self.active_vessel = host.active_vessel();
        self.initialized = true;
        log::info!("Inputbinder initialized with {} actions", self.registry.count());
        Ok(())
    }

    /// React to a host lifecycle signal
    pub fn handle_signal<H: InputHost, S: BindingSurface>(
        &mut self,
        signal: HostSignal,
        host: &mut H,
        surface: &mut S,
    ) -> Result<()> {
        match signal {
            HostSignal::GameStateEntered(GameState::MainMenu) => {
                if !self.main_menu_seen {
                    self.main_menu_seen = true;
                    self.initialize(host)?;
                }
            }
            HostSignal::GameStateEntered(state) => {
                log::debug!("Entered {}", state);
            }
            signal if signal.affects_vessel() => {
                self.refresh_vessel(host, surface);
            }
            _ => {}
        }
        Ok(())
    }

    fn refresh_vessel<H: InputHost, S: BindingSurface>(&mut self, host: &H, surface: &mut S) {
        self.active_vessel = host.active_vessel();

        match self.active_vessel {
            Some(id) => {
                log::debug!("Active vessel is {}", id);
                if !surface.is_initialized() {
                    surface.initialize();
                }
                let open = surface.is_open();
                surface.set_launcher(true, open);
            }
            None => {
                log::debug!("No active vessel");
                surface.set_launcher(false, false);
                surface.hide();
            }
        }
    }

    /// One tick: dispatch, apply queued controls, integrate trim
    ///
    /// Returns the number of callbacks invoked. Does nothing before
    /// initialization.
    pub fn update<H: InputHost>(&mut self, host: &mut H, controls: &ControlSnapshot, dt: f32) -> usize {
        if !self.initialized {
            return 0;
        }

        let fired = self.registry.update(controls, &mut self.pending);

        let Some(id) = self.active_vessel else {
            self.pending.flush(None);
            return fired;
        };

        self.pending.flush(host.vessel_mut(id));
        if let Some(vessel) = host.vessel_mut(id) {
            self.trim.tick(&self.registry, controls, dt, vessel);
        }

        fired
    }

    /// Persist the registry to the bindings file
    pub fn save(&mut self) -> Result<()> {
        let path = self.config.bindings_path();

        if self.corrupt_backup_pending && path.exists() {
            let backup = corrupt_backup_path(&path);
            fs::rename(&path, &backup)
                .with_context(|| format!("Failed to move corrupt bindings file to {:?}", backup))?;
            log::warn!("Moved corrupt bindings file to {:?}", backup);
        }
        self.corrupt_backup_pending = false;

        codec::save(&self.registry, &path, &self.config.binder)
            .with_context(|| format!("Failed to save bindings: {:?}", path))
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn resolver(&self) -> &OverrideResolver {
        &self.resolver
    }

    pub fn registry(&self) -> &ActionRegistry<PendingControls> {
        &self.registry
    }

    /// Mutable registry, for a binding UI to edit
    pub fn registry_mut(&mut self) -> &mut ActionRegistry<PendingControls> {
        &mut self.registry
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn active_vessel(&self) -> Option<VesselId> {
        self.active_vessel
    }
}

/// Holds the single application instance
#[derive(Default)]
pub struct InputbinderSlot {
    instance: Option<Inputbinder>,
}

impl InputbinderSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the application on first call; later calls return the same instance
    ///
    /// `config` is only used by the first call.
    pub fn get_or_start<H: InputHost>(&mut self, config: AppConfig, host: &mut H) -> &mut Inputbinder {
        if self.instance.is_some() {
            log::debug!("Inputbinder already started");
        }
        self.instance
            .get_or_insert_with(|| Inputbinder::start(config, host))
    }

    pub fn get(&self) -> Option<&Inputbinder> {
        self.instance.as_ref()
    }

    pub fn get_mut(&mut self) -> Option<&mut Inputbinder> {
        self.instance.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corrupt_backup_path_appends_suffix() {
        assert_eq!(
            corrupt_backup_path(Path::new("GameData/input.json")),
            PathBuf::from("GameData/input.json.corrupt")
        );
    }

    #[test]
    fn test_empty_slot() {
        let mut slot = InputbinderSlot::new();
        assert!(slot.get().is_none());
        assert!(slot.get_mut().is_none());
    }
}
