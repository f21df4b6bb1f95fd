//! Configuration loading
//!
//! Settings come from two layered sources: an optional `config/default`
//! file and environment variables. Whatever a deployment does not specify
//! falls back to `Settings::default()`.

pub mod settings;

use config::{Config, ConfigError, Environment, File};

use crate::settings::PartialSettings;

pub use settings::{LogSettings, Settings, SinkSettings, StoreSettings};

pub fn load_config() -> Result<Settings, ConfigError> {
    let builder = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(Environment::default().separator("_"));

    let config = builder.build()?;
    let partial: PartialSettings = config.try_deserialize()?;
    let default = Settings::default();

    Ok(Settings {
        store: StoreSettings {
            path: partial
                .store
                .as_ref()
                .and_then(|s| s.path.clone())
                .unwrap_or(default.store.path),
            namespace: partial
                .store
                .as_ref()
                .and_then(|s| s.namespace.clone())
                .unwrap_or(default.store.namespace),
        },
        sink: SinkSettings {
            buffer_capacity: partial
                .sink
                .as_ref()
                .and_then(|s| s.buffer_capacity)
                .unwrap_or(default.sink.buffer_capacity),
        },
        log: LogSettings {
            level: partial
                .log
                .as_ref()
                .and_then(|l| l.level.clone())
                .unwrap_or(default.log.level),
        },
    })
}

#[cfg(test)]
mod env_tests {
    use super::*;
    use std::env;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn load_config_from_file_overrides_defaults() {
        // Create a temporary directory and set it as current dir so
        // load_config picks up config/default.toml from there.
        let tmp = TempDir::new().expect("create tempdir");
        let orig = env::current_dir().expect("current_dir");
        env::set_current_dir(tmp.path()).expect("set current dir");

        fs::create_dir_all("config").expect("create config dir");
        let toml = r#"
            [store]
            path = "/var/lib/courier"
            namespace = "staging"

            [sink]
            buffer_capacity = 32

            [log]
            level = "debug"
        "#;
        fs::write("config/default.toml", toml).expect("write config file");

        let cfg = load_config().expect("load_config failed");
        assert_eq!(cfg.store.path, "/var/lib/courier");
        assert_eq!(cfg.store.namespace, "staging");
        assert_eq!(cfg.sink.buffer_capacity, 32);
        assert_eq!(cfg.log.level, "debug");

        // restore cwd
        env::set_current_dir(orig).expect("restore cwd");
    }

    #[test]
    fn default_settings_are_sane() {
        let cfg = Settings::default();
        assert_eq!(cfg.store.path, "courier_db");
        assert_eq!(cfg.store.namespace, "messages");
        assert_eq!(cfg.sink.buffer_capacity, 128);
        assert_eq!(cfg.log.level, "info");
    }
}
