use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::tempdir;
use vscache::config::{Config, ENV_PREFIX};

// Tests in this file touch process-wide environment variables.
static ENV_LOCK: Mutex<()> = Mutex::new(());

#[test]
fn test_config_load_defaults() {
    // Use figment directly without Env to avoid interference from other tests
    let figment = Figment::from(Serialized::defaults(Config::default()));
    let config: Config = figment.extract().unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.variants, vec!["Code", "Code - OSS"]);
}

#[test]
fn test_config_load_from_toml() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    let toml_content = r#"
base_dir = "/home/someone/.config"
variants = ["Code - Insiders"]
dry_run = true
"#;
    fs::write(&config_path, toml_content).unwrap();

    let figment =
        Figment::from(Serialized::defaults(Config::default())).merge(Toml::file(&config_path));
    let config: Config = figment.extract().unwrap();

    assert_eq!(config.base_dir, Some(PathBuf::from("/home/someone/.config")));
    assert_eq!(config.variants, vec!["Code - Insiders"]);
    assert!(config.dry_run);
    // Keys not in the file keep their defaults
    assert_eq!(config.sidecar_file, "workspace.json");
}

#[test]
fn test_config_load_from_env() {
    let _guard = ENV_LOCK.lock().unwrap();
    std::env::set_var("VSCACHE_SIDECAR_FILE", "meta.json");
    std::env::set_var("VSCACHE_DRY_RUN", "true");

    let figment =
        Figment::from(Serialized::defaults(Config::default())).merge(Env::prefixed(ENV_PREFIX));
    let config: Config = figment.extract().unwrap();

    std::env::remove_var("VSCACHE_SIDECAR_FILE");
    std::env::remove_var("VSCACHE_DRY_RUN");

    assert_eq!(config.sidecar_file, "meta.json");
    assert!(config.dry_run);
}

#[test]
fn test_env_overrides_toml() {
    let _guard = ENV_LOCK.lock().unwrap();
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "sidecar_file = \"from-file.json\"\n").unwrap();

    std::env::set_var("VSCACHE_SIDECAR_FILE", "from-env.json");
    let result = Config::load(Some(&config_path));
    std::env::remove_var("VSCACHE_SIDECAR_FILE");

    assert_eq!(result.unwrap().sidecar_file, "from-env.json");
}

#[test]
fn test_load_explicit_file() {
    let _guard = ENV_LOCK.lock().unwrap();
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("vscache.toml");
    fs::write(&config_path, "variants = [\"VSCodium\"]\n").unwrap();

    let config = Config::load(Some(&config_path)).unwrap();
    assert_eq!(config.variants, vec!["VSCodium"]);
}

#[test]
fn test_load_rejects_invalid_values() {
    let _guard = ENV_LOCK.lock().unwrap();
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "dry_run = \"sometimes\"\n").unwrap();

    assert!(Config::load(Some(&config_path)).is_err());
}

#[test]
fn test_load_rejects_empty_sidecar() {
    let _guard = ENV_LOCK.lock().unwrap();
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "sidecar_file = \"\"\n").unwrap();

    let err = Config::load(Some(&config_path)).unwrap_err();
    assert!(err.to_string().contains("sidecar_file"));
}

#[test]
fn test_load_missing_explicit_file() {
    let temp_dir = tempdir().unwrap();
    let err = Config::load(Some(&temp_dir.path().join("missing.toml"))).unwrap_err();
    assert!(err.to_string().contains("config file not found"));
}
