//! Integration tests: the settings manager against real files in a temp dir.

use std::fs;
use std::time::Duration;

use kotato_settings::application::lifecycle::SettingsService;
use kotato_settings::application::settings_manager::SettingsManager;
use kotato_settings::infrastructure::storage::files::{FileStorage, CUSTOM_TEMPLATE};
use kotato_settings_core::{parse_document, ManagerConfig, NetBoost, APP_VERSION};
use serde_json::json;
use uuid::Uuid;

struct TempWorkspace {
    config: ManagerConfig,
}

impl TempWorkspace {
    fn new() -> Self {
        let dir = std::env::temp_dir().join(format!("ktg_manager_test_{}", Uuid::new_v4()));
        Self {
            config: ManagerConfig::with_working_dir(dir),
        }
    }

    fn write_custom(&self, contents: &str) {
        fs::create_dir_all(self.config.data_dir()).unwrap();
        fs::write(self.config.custom_file_path(), contents).unwrap();
    }

    fn write_default(&self, contents: &str) {
        fs::create_dir_all(self.config.data_dir()).unwrap();
        fs::write(self.config.default_file_path(), contents).unwrap();
    }

    fn read_custom(&self) -> String {
        fs::read_to_string(self.config.custom_file_path()).unwrap()
    }

    fn read_default(&self) -> String {
        fs::read_to_string(self.config.default_file_path()).unwrap()
    }

    fn started(&self) -> SettingsManager<FileStorage> {
        let mut manager = SettingsManager::new(FileStorage::new(&self.config), &self.config);
        manager.fill();
        manager
    }
}

impl Drop for TempWorkspace {
    fn drop(&mut self) {
        fs::remove_dir_all(&self.config.working_dir).ok();
    }
}

// ── First run ─────────────────────────────────────────────────────────────────

#[test]
fn test_first_run_creates_default_and_seeds_custom() {
    // Arrange
    let ws = TempWorkspace::new();

    // Act
    let manager = ws.started();

    // Assert
    let default = parse_document(ws.read_default().as_bytes()).expect("default must parse");
    assert_eq!(default["version"], json!(APP_VERSION));
    assert_eq!(default["fonts"]["main"], json!("Open Sans"));
    assert_eq!(default["net_speed_boost"], json!(null));
    assert_eq!(ws.read_custom(), CUSTOM_TEMPLATE);
    assert_eq!(manager.state(), &Default::default());
}

#[test]
fn test_default_file_is_regenerated_when_version_differs() {
    let ws = TempWorkspace::new();
    ws.write_default("{\"version\": 1004008}");

    ws.started();

    let default = parse_document(ws.read_default().as_bytes()).unwrap();
    assert_eq!(default["version"], json!(APP_VERSION));
    assert!(ws.read_default().contains("Please don't modify it"));
}

#[test]
fn test_default_file_is_regenerated_when_malformed() {
    let ws = TempWorkspace::new();
    ws.write_default("{ broken");

    ws.started();

    let default = parse_document(ws.read_default().as_bytes()).unwrap();
    assert_eq!(default["version"], json!(APP_VERSION));
}

#[test]
fn test_current_default_file_is_left_byte_for_byte() {
    let ws = TempWorkspace::new();
    let hand_written = format!("// mine\n{{ \"version\": {APP_VERSION}, \"extra\": 1 }}\n");
    ws.write_default(&hand_written);

    ws.started();

    assert_eq!(ws.read_default(), hand_written);
}

// ── Custom document ───────────────────────────────────────────────────────────

#[test]
fn test_custom_values_are_applied_including_aliases() {
    // Arrange
    let ws = TempWorkspace::new();
    ws.write_custom(
        r#"
        // user edits
        {
            "fonts": { "main": "Inter", "semibold_is_bold": true },
            "sticker_height": 128,
            "adaptive_baloons": true,
            "net_speed_boost": "medium",
            "scales": [110, 135],
            "replaces": [["teh", "the"], ["bad"]],
            "chat_list_lines": 1
        }
        "#,
    );

    // Act
    let manager = ws.started();

    // Assert
    let state = manager.state();
    assert_eq!(state.main_font(), "Inter");
    assert!(state.semibold_font_is_bold());
    assert_eq!(state.sticker_height(), 128);
    assert!(state.adaptive_bubbles());
    assert_eq!(state.net_boost(), NetBoost::Medium);
    assert_eq!(state.interface_scales(), &[110, 135]);
    assert_eq!(state.custom_replaces().len(), 1);
    assert_eq!(state.custom_replaces()["teh"], "the");
    assert_eq!(state.chat_list_lines(), 1);
}

#[test]
fn test_malformed_custom_file_is_not_overwritten() {
    let ws = TempWorkspace::new();
    let broken = "{ \"show_chat_id\": true, ";
    ws.write_custom(broken);

    let manager = ws.started();

    assert!(!manager.state().show_chat_id());
    assert_eq!(ws.read_custom(), broken);
}

#[test]
fn test_out_of_range_values_keep_defaults() {
    let ws = TempWorkspace::new();
    ws.write_custom(r#"{ "sticker_height": 512, "chat_list_lines": 3, "show_chat_id": true }"#);

    let manager = ws.started();

    assert_eq!(manager.state().sticker_height(), 170);
    assert_eq!(manager.state().chat_list_lines(), 2);
    assert!(manager.state().show_chat_id());
}

// ── Writer ────────────────────────────────────────────────────────────────────

#[test]
fn test_flush_rewrites_custom_and_reload_matches() {
    // Arrange
    let ws = TempWorkspace::new();
    let mut manager = ws.started();

    // Act
    manager.update(|state| {
        state.set_monospace_font("Fira Code".into());
        state.set_sticker_height(96);
        state.set_net_boost(NetBoost::Slight);
        state.add_custom_scale(150);
        state.add_custom_replace("->".into(), "→".into());
    });
    manager.finish();
    let reloaded = ws.started();

    // Assert
    let written = ws.read_custom();
    assert!(written.contains("automatically generated"));
    assert_eq!(reloaded.state(), manager.state());
}

#[test]
fn test_unknown_keys_are_dropped_on_rewrite() {
    let ws = TempWorkspace::new();
    ws.write_custom(r#"{ "my_note": "keep?", "show_chat_id": true }"#);
    let mut manager = ws.started();

    manager.write(false);
    manager.finish();

    let document = parse_document(ws.read_custom().as_bytes()).unwrap();
    assert!(!document.contains_key("my_note"));
    assert_eq!(document["show_chat_id"], json!(true));
}

#[tokio::test(start_paused = true)]
async fn test_debounced_write_lands_after_delay() {
    // Arrange
    let ws = TempWorkspace::new();
    let mut service = SettingsService::new();
    service.start(FileStorage::new(&ws.config), &ws.config);
    let manager = service.manager_mut().unwrap();

    // Act
    manager.update(|state| state.set_disable_up_edit(true));
    tokio::time::advance(Duration::from_millis(4000)).await;
    let early = ws.read_custom();
    service.tick().await;

    // Assert
    assert_eq!(early, CUSTOM_TEMPLATE);
    let document = parse_document(ws.read_custom().as_bytes()).unwrap();
    assert_eq!(document["disable_up_edit"], json!(true));
}
