//! Persistence codec
//!
//! Reads and writes the bindings file (JSON) and merges a baseline action set
//! over what the user saved. The file is a single object whose keys are action
//! identifiers, in registry order:
//!
//! ```json
//! {
//!   "pitch-trim": {
//!     "name": "Pitch Trim",
//!     "expected_kind": "Axis",
//!     "enabled": true,
//!     "bindings": [
//!       { "type": "composite", "kind": "1DAxis",
//!         "parts": { "negative": "<Keyboard>/s", "positive": "<Keyboard>/w" } }
//!     ]
//!   }
//! }
//! ```
//!
//! Fields this version does not know are kept on the action and written back.

use crate::action::Action;
use crate::binding::Binding;
use crate::config::BinderConfig;
use crate::registry::ActionRegistry;
use crate::types::{BinderError, Result, ValueKind};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// On-disk form of one action
#[derive(Debug, Serialize, Deserialize)]
struct ActionRecord {
    #[serde(default)]
    name: String,
    expected_kind: ValueKind,
    #[serde(default)]
    enabled: bool,
    #[serde(default)]
    bindings: Vec<Binding>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

type BindingsFile = IndexMap<String, ActionRecord>;

/// Load the registry backed by `path`, merging `baseline` over it
///
/// Baseline actions whose identifier is already in the file are left as the
/// user saved them; the rest are added as host defaults. A missing file gives
/// a registry of baseline actions only, which the caller is expected to save.
/// A file that exists but cannot be parsed fails with `CorruptFileError`.
pub fn load<C>(path: &Path, baseline: Vec<Action>) -> Result<ActionRegistry<C>> {
    let mut registry = if path.exists() {
        log::info!("Loading bindings file: {:?}", path);
        let content = fs::read(path)?;
        from_slice(&content).map_err(|e| match e {
            BinderError::CorruptFileError { reason, .. } => BinderError::CorruptFileError {
                path: path.to_path_buf(),
                reason,
            },
            other => other,
        })?
    } else {
        log::info!("No bindings file at {:?}, starting from baseline actions", path);
        ActionRegistry::new()
    };

    registry.set_path(path);
    let loaded = registry.count();
    merge_baseline(&mut registry, baseline);

    for warning in registry.inert_bindings() {
        log::warn!("{}", warning);
    }
    for action in registry.actions().filter(|a| !a.kind().is_known()) {
        log::warn!(
            "Action '{}' has unknown kind '{}' and reads as zero",
            action.id(),
            action.kind()
        );
    }

    log::info!(
        "Bindings loaded: {} from file, {} total",
        loaded,
        registry.count()
    );
    Ok(registry)
}

/// Add every baseline action that is not registered yet
///
/// Actions already present only get the host's bindings remembered, so they
/// count as customized exactly when they differ from the host default.
pub fn merge_baseline<C>(registry: &mut ActionRegistry<C>, baseline: Vec<Action>) {
    for mut action in baseline {
        action.ensure_placeholder();

        match registry.get(action.id()) {
            Ok(existing) => {
                if existing.baseline.is_none() {
                    existing.baseline = Some(action.bindings().to_vec());
                }
            }
            Err(_) => {
                log::debug!("Adding baseline action '{}'", action.id());
                registry.add(action, true);
            }
        }
    }
}

/// Parse a bindings document into a registry without a backing file
pub fn from_str<C>(content: &str) -> Result<ActionRegistry<C>> {
    from_slice(content.as_bytes())
}

/// Parse raw file bytes; invalid UTF-8 counts as a corrupt document
pub fn from_slice<C>(content: &[u8]) -> Result<ActionRegistry<C>> {
    let file: BindingsFile =
        serde_json::from_slice(content).map_err(|e| BinderError::CorruptFileError {
            path: Default::default(),
            reason: e.to_string(),
        })?;

    let mut registry = ActionRegistry::new();
    for (id, record) in file {
        let name = if record.name.is_empty() { id.clone() } else { record.name };
        let action = Action::from_parts(
            id,
            name,
            record.expected_kind,
            record.enabled,
            record.bindings,
            record.extra,
        );
        registry.add(action, false);
    }
    Ok(registry)
}

/// Render the registry as a bindings document
pub fn to_string<C>(registry: &ActionRegistry<C>, config: &BinderConfig) -> Result<String> {
    let mut file = BindingsFile::new();

    for action in registry.actions() {
        if !config.persist_baseline && action.is_default() && !action.is_customized() {
            log::trace!("Skipping unmodified default '{}'", action.id());
            continue;
        }

        file.insert(
            action.id().to_string(),
            ActionRecord {
                name: action.name().to_string(),
                expected_kind: action.kind().clone(),
                enabled: action.is_enabled(),
                bindings: action.bindings().to_vec(),
                extra: action.extra.clone(),
            },
        );
    }

    let rendered = if config.pretty {
        serde_json::to_string_pretty(&file)
    } else {
        serde_json::to_string(&file)
    };
    rendered.map_err(|e| BinderError::SerializationError(e.to_string()))
}

/// Write the registry to `path`
///
/// The document goes to a temporary file in the same directory which then
/// replaces `path`, so the previous file stays intact if writing fails.
pub fn save<C>(registry: &ActionRegistry<C>, path: &Path, config: &BinderConfig) -> Result<()> {
    let content = to_string(registry, config)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(content.as_bytes())?;
    // Temp files are private; keep the mode of the file being replaced
    if let Ok(existing) = fs::metadata(path) {
        temp.as_file().set_permissions(existing.permissions())?;
    }
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| BinderError::IoError(e.error))?;

    log::info!("Saved {} actions to {:?}", registry.count(), path);
    Ok(())
}

/// Write the registry to the file it is backed by
pub fn save_registry<C>(registry: &ActionRegistry<C>, config: &BinderConfig) -> Result<()> {
    let path = registry.path().ok_or_else(|| {
        BinderError::IoError(io::Error::new(
            io::ErrorKind::NotFound,
            "registry has no backing file",
        ))
    })?;
    save(registry, path, config)
}
