// Save/load behavior of the bindings file
use inputbinder_core::{
    codec, Action, ActionRegistry, BinderConfig, BinderError, Binding, CompositeKind, ValueKind,
    NEGATIVE_PART, POSITIVE_PART,
};
use std::fs;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn trim(id: &str, name: &str, negative: &str, positive: &str) -> Action {
    Action::new(id, ValueKind::Axis).with_name(name).with_binding(
        Binding::composite(CompositeKind::Axis1D)
            .with_part(NEGATIVE_PART, negative)
            .with_part(POSITIVE_PART, positive),
    )
}

fn baseline() -> Vec<Action> {
    vec![
        Action::new("throttle", ValueKind::Axis)
            .with_name("Throttle Axis")
            .with_binding(Binding::simple("", Some("binding"))),
        trim("pitch-trim", "Pitch Trim", "", ""),
        trim("roll-trim", "Roll Trim", "", ""),
        Action::new("trim-reset", ValueKind::Button)
            .with_name("Reset Trim")
            .with_binding(Binding::simple("", Some("binding"))),
    ]
}

#[test]
fn save_then_load_round_trips() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("input.json");

    let mut registry: ActionRegistry = ActionRegistry::with_path(&path);
    registry.add(
        Action::new("throttle", ValueKind::Axis)
            .with_name("Throttle Axis")
            .with_binding(Binding::simple("<Joystick>/z", Some("binding")))
            .with_binding(Binding::simple("", None))
            .with_enabled(true),
        false,
    );
    registry.add(trim("pitch-trim", "Pitch Trim", "<Keyboard>/s", "<Keyboard>/w"), false);
    registry.add(trim("yaw-trim", "Yaw Trim", "", "<Keyboard>/e"), true);
    registry.add(Action::new("trim-reset", ValueKind::Button), false);

    codec::save_registry(&registry, &BinderConfig::new()).unwrap();

    let loaded: ActionRegistry = codec::load(&path, Vec::new()).unwrap();
    assert_eq!(loaded.ids(), registry.ids());
    for original in registry.actions() {
        let restored = loaded.find(original.id()).unwrap();
        assert_eq!(restored.name(), original.name());
        assert_eq!(restored.kind(), original.kind());
        assert_eq!(restored.is_enabled(), original.is_enabled());
        assert_eq!(restored.bindings(), original.bindings());
    }
    assert_eq!(loaded.path(), Some(path.as_path()));
}

#[test]
fn missing_file_gives_baseline_only() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("input.json");

    let registry: ActionRegistry = codec::load(&path, baseline()).unwrap();
    assert_eq!(registry.ids(), vec!["throttle", "pitch-trim", "roll-trim", "trim-reset"]);
    assert_eq!(registry.stats().num_defaults, 4);
    assert!(!path.exists());

    codec::save_registry(&registry, &BinderConfig::new()).unwrap();
    assert!(path.exists());
}

#[test]
fn loading_a_subset_merges_missing_baseline_actions() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("input.json");

    let mut saved: ActionRegistry = ActionRegistry::new();
    saved.add(trim("pitch-trim", "My Pitch", "<Keyboard>/s", "<Keyboard>/w"), false);
    saved.add(Action::new("custom", ValueKind::Button), false);
    codec::save(&saved, &path, &BinderConfig::new()).unwrap();

    let registry: ActionRegistry = codec::load(&path, baseline()).unwrap();

    // File order first, then missing baseline actions in baseline order
    assert_eq!(
        registry.ids(),
        vec!["pitch-trim", "custom", "throttle", "roll-trim", "trim-reset"]
    );

    // File-provided bindings are kept verbatim
    let pitch = registry.find("pitch-trim").unwrap();
    assert_eq!(pitch.name(), "My Pitch");
    assert_eq!(pitch.bindings(), saved.find("pitch-trim").unwrap().bindings());
    assert!(pitch.is_customized());

    // Missing baseline actions are inserted unchanged
    let expected = baseline();
    for id in ["throttle", "roll-trim", "trim-reset"] {
        let merged = registry.find(id).unwrap();
        let original = expected.iter().find(|a| a.id() == id).unwrap();
        assert_eq!(merged.name(), original.name());
        assert_eq!(merged.bindings(), original.bindings());
        assert!(!merged.is_customized());
    }
}

#[test]
fn loading_twice_is_stable() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("input.json");

    let first: ActionRegistry = codec::load(&path, baseline()).unwrap();
    codec::save_registry(&first, &BinderConfig::new()).unwrap();
    let written = fs::read_to_string(&path).unwrap();

    let second: ActionRegistry = codec::load(&path, baseline()).unwrap();
    assert_eq!(second.count(), first.count());
    codec::save_registry(&second, &BinderConfig::new()).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), written);
}

#[test]
fn corrupt_file_is_reported() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("input.json");
    fs::write(&path, "{ \"throttle\": { \"expected_kind\": ").unwrap();

    let result: Result<ActionRegistry, BinderError> = codec::load(&path, baseline());
    match result {
        Err(BinderError::CorruptFileError { path: reported, .. }) => assert_eq!(reported, path),
        Err(other) => panic!("expected CorruptFileError, got {}", other),
        Ok(_) => panic!("expected CorruptFileError, got a registry"),
    }

    // The user's file is left untouched
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "{ \"throttle\": { \"expected_kind\": "
    );
}

#[test]
fn save_replaces_file_without_leftovers() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("input.json");
    fs::write(&path, "old contents").unwrap();

    let registry: ActionRegistry = codec::load(&dir.path().join("absent.json"), baseline()).unwrap();
    codec::save(&registry, &path, &BinderConfig::new()).unwrap();

    let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);

    let reloaded: ActionRegistry = codec::load(&path, Vec::new()).unwrap();
    assert_eq!(reloaded.count(), 4);
}
