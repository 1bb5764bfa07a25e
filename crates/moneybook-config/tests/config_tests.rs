use moneybook_config::{Config, ConfigManager};
use tempfile::tempdir;

#[test]
fn missing_file_loads_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");

    let cfg = manager.load().expect("load config");

    assert_eq!(cfg, Config::default());
    assert_eq!(cfg.palette.len(), 7);
    assert_eq!(cfg.window_half_width, 2);
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");

    let mut cfg = Config::default();
    cfg.set("currency", "eur").expect("currency");
    cfg.set("group", "Household").expect("group");
    cfg.set("window", "3").expect("window");

    manager.save(&cfg).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded, cfg);
    assert!(manager.config_path().ends_with("config/config.json"));
    assert!(!manager.config_path().with_extension("json.tmp").exists());
}

#[test]
fn older_files_fill_new_fields_with_defaults() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "locale": "en-US", "currency": "USD" }"#).expect("write");

    let cfg = ConfigManager::new(path).load().expect("load config");

    assert_eq!(cfg.currency, "USD");
    assert_eq!(cfg.current_group, None);
    assert_eq!(cfg.palette, Config::default_palette());
    assert!(cfg.ui_color_enabled);
}
