//! Startup configuration: file, command-line overrides and environment.

use anyhow::Context;
use retail_types::{RunConfig, SeedCatalog};
use std::path::Path;
use tracing::{info, warn};

pub const DEFAULT_CONFIG_PATH: &str = "dev_app.json";

pub const SASL_USERNAME_ENV: &str = "SASL_USERNAME";
pub const SASL_PASSWORD_ENV: &str = "SASL_PASSWORD";

/// Values given on the command line that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub seed: Option<u64>,
    pub test_size: Option<u64>,
}

/// Load, complete and validate the run configuration.
pub fn load_config(path: &Path, overrides: &Overrides) -> anyhow::Result<RunConfig> {
    let mut config = RunConfig::from_file(path)
        .with_context(|| format!("Failed to load configuration from {path:?}"))?;

    apply_overrides(&mut config, overrides);
    apply_sasl_credentials(
        &mut config,
        std::env::var(SASL_USERNAME_ENV).ok(),
        std::env::var(SASL_PASSWORD_ENV).ok(),
    );
    if config.kafka.client_id.is_none() {
        config.kafka.client_id = local_hostname();
    }

    config
        .validate()
        .with_context(|| format!("Invalid configuration in {path:?}"))?;
    Ok(config)
}

pub fn apply_overrides(config: &mut RunConfig, overrides: &Overrides) {
    if let Some(seed) = overrides.seed {
        config.seed = Some(seed);
    }
    if let Some(test_size) = overrides.test_size {
        config.test_size = test_size;
    }
}

/// Fill SASL credentials from the environment.
///
/// Credentials only apply when the file configures a SASL section.
pub fn apply_sasl_credentials(
    config: &mut RunConfig,
    username: Option<String>,
    password: Option<String>,
) {
    if username.is_none() && password.is_none() {
        return;
    }
    let Some(sasl) = config.kafka.sasl.as_mut() else {
        warn!("SASL credentials found in the environment but no kafka.sasl section is configured");
        return;
    };
    if let Some(username) = username {
        sasl.username = username;
    }
    if let Some(password) = password {
        sasl.password = password;
    }
}

fn local_hostname() -> Option<String> {
    hostname::get()
        .ok()
        .map(|h| h.to_string_lossy().to_string())
        .filter(|h| !h.is_empty())
}

pub fn load_catalog(path: &Path) -> anyhow::Result<SeedCatalog> {
    SeedCatalog::from_file(path).with_context(|| format!("Failed to load seed catalog from {path:?}"))
}

/// Log the effective configuration with secrets masked.
pub fn echo_config(config: &RunConfig) -> anyhow::Result<()> {
    let rendered = serde_json::to_string_pretty(&config.redacted())?;
    info!("Effective configuration:\n{}", rendered);
    Ok(())
}

pub fn echo_catalog(catalog: &SeedCatalog) -> anyhow::Result<()> {
    let rendered = serde_json::to_string_pretty(catalog)?;
    info!(
        "Seed catalog ({} stores, {} clerks, {} products):\n{}",
        catalog.stores.len(),
        catalog.clerks.len(),
        catalog.products.len(),
        rendered
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use retail_types::SaslSettings;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, body: &str) -> std::path::PathBuf {
        let path = dir.path().join("app.json");
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_overrides_take_precedence() {
        let mut config = RunConfig {
            test_size: 10,
            seed: Some(1),
            ..RunConfig::default()
        };
        apply_overrides(
            &mut config,
            &Overrides {
                seed: Some(99),
                test_size: Some(0),
            },
        );
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.test_size, 0);
    }

    #[test]
    fn test_empty_overrides_keep_file_values() {
        let mut config = RunConfig {
            test_size: 10,
            seed: Some(1),
            ..RunConfig::default()
        };
        apply_overrides(&mut config, &Overrides::default());
        assert_eq!(config.seed, Some(1));
        assert_eq!(config.test_size, 10);
    }

    #[test]
    fn test_sasl_credentials_from_environment() {
        let mut config = RunConfig::default();
        config.kafka.sasl = Some(SaslSettings {
            mechanisms: "PLAIN".to_string(),
            security_protocol: "SASL_SSL".to_string(),
            username: "file-user".to_string(),
            password: String::new(),
        });

        apply_sasl_credentials(&mut config, None, Some("s3cret".to_string()));

        let sasl = config.kafka.sasl.unwrap();
        assert_eq!(sasl.username, "file-user");
        assert_eq!(sasl.password, "s3cret");
    }

    #[test]
    fn test_sasl_credentials_ignored_without_section() {
        let mut config = RunConfig::default();
        apply_sasl_credentials(&mut config, Some("u".to_string()), Some("p".to_string()));
        assert!(config.kafka.sasl.is_none());
    }

    #[test]
    fn test_load_config_resolves_and_validates() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"{"testSize": 5, "seedFile": "seed.json", "kafka": {"clientId": "fixed"}}"#,
        );

        let config = load_config(
            &path,
            &Overrides {
                seed: Some(3),
                test_size: None,
            },
        )
        .unwrap();

        assert_eq!(config.test_size, 5);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.seed_file, dir.path().join("seed.json"));
        assert_eq!(config.kafka.client_id.as_deref(), Some("fixed"));
    }

    #[test]
    fn test_load_config_rejects_invalid_values() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, r#"{"maxQuantity": 0}"#);

        let err = load_config(&path, &Overrides::default()).unwrap_err();
        assert!(format!("{err:#}").contains("maxQuantity"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_config(&dir.path().join("absent.json"), &Overrides::default()).unwrap_err();
        assert!(err.to_string().contains("Failed to load configuration"));
    }

    #[test]
    fn test_load_catalog_reports_empty_sequence() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("seed.json");
        fs::write(
            &path,
            r#"{"stores": [{"id": "s1", "name": "A"}], "clerks": [], "products": []}"#,
        )
        .unwrap();

        let err = load_catalog(&path).unwrap_err();
        assert!(format!("{err:#}").contains("clerks"));
    }
}
