use crate::cli::InspectArgs;
use crate::error::{CliError, Result};
use fahview::config::{InspectConfig, InspectConfigBuilder};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialConnectionConfig {
    host: Option<String>,
    port: Option<u16>,
    password: Option<String>,
    #[serde(rename = "read-timeout-secs")]
    read_timeout_secs: Option<u64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialAnalysisConfig {
    #[serde(rename = "bond-length")]
    bond_length: Option<f64>,
    reassemble: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialInspectConfig {
    connection: Option<PartialConnectionConfig>,
    analysis: Option<PartialAnalysisConfig>,
}

impl PartialInspectConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Loads the file named by `--config`, or starts empty when none is given.
    pub fn load(args: &InspectArgs) -> Result<Self> {
        match &args.config {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Combines the file values with the command-line overrides.
    ///
    /// A flag always wins over the file, and the file wins over the library
    /// defaults.
    pub fn merge_with_cli(mut self, args: &InspectArgs) -> Result<InspectConfig> {
        let connection = self.connection.take().unwrap_or_default();
        let analysis = self.analysis.take().unwrap_or_default();

        let mut builder = InspectConfigBuilder::new();

        if let Some(host) = args.host.clone().or(connection.host) {
            builder = builder.host(host);
        }
        if let Some(port) = args.port.or(connection.port) {
            builder = builder.port(port);
        }
        if let Some(password) = args.password.clone().or(connection.password) {
            builder = builder.password(password);
        }
        if let Some(secs) = args.read_timeout.or(connection.read_timeout_secs) {
            builder = builder.read_timeout(Duration::from_secs(secs));
        }
        if let Some(length) = args.bond_length.or(analysis.bond_length) {
            builder = builder.bond_length(length);
        }

        let reassemble = if args.no_reassemble {
            false
        } else {
            analysis.reassemble.unwrap_or(true)
        };
        builder = builder.reassemble(reassemble);

        Ok(builder.build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fahview::config::{DEFAULT_BOND_LENGTH, DEFAULT_HOST, DEFAULT_PORT};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::{TempDir, tempdir};

    fn write_config_file(dir: &TempDir, content: &str) -> PathBuf {
        let file_path = dir.path().join("fahview.toml");
        fs::write(&file_path, content).unwrap();
        file_path
    }

    #[test]
    fn empty_config_merges_to_library_defaults() {
        let config = PartialInspectConfig::default()
            .merge_with_cli(&InspectArgs::default())
            .unwrap();

        assert_eq!(config.client.host, DEFAULT_HOST);
        assert_eq!(config.client.port, DEFAULT_PORT);
        assert!(config.client.password.is_none());
        assert!(config.client.read_timeout.is_none());
        assert_eq!(config.clustering.bond_length, DEFAULT_BOND_LENGTH);
        assert!(config.clustering.reassemble);
    }

    #[test]
    fn file_values_are_loaded() {
        let dir = tempdir().unwrap();
        let path = write_config_file(
            &dir,
            r#"
            [connection]
            host = "192.168.1.20"
            port = 36331
            password = "secret"
            read-timeout-secs = 30

            [analysis]
            bond-length = 2.5
            reassemble = false
            "#,
        );

        let config = PartialInspectConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&InspectArgs::default())
            .unwrap();

        assert_eq!(config.client.host, "192.168.1.20");
        assert_eq!(config.client.port, 36331);
        assert_eq!(config.client.password.as_deref(), Some("secret"));
        assert_eq!(config.client.read_timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.clustering.bond_length, 2.5);
        assert!(!config.clustering.reassemble);
    }

    #[test]
    fn cli_args_override_file_values() {
        let dir = tempdir().unwrap();
        let path = write_config_file(
            &dir,
            r#"
            [connection]
            host = "192.168.1.20"
            port = 36331

            [analysis]
            bond-length = 2.5
            reassemble = true
            "#,
        );
        let args = InspectArgs {
            host: Some("localhost".to_string()),
            bond_length: Some(3.0),
            no_reassemble: true,
            config: Some(path.clone()),
            ..InspectArgs::default()
        };

        let config = PartialInspectConfig::load(&args)
            .unwrap()
            .merge_with_cli(&args)
            .unwrap();

        assert_eq!(config.client.host, "localhost");
        assert_eq!(config.client.port, 36331);
        assert_eq!(config.clustering.bond_length, 3.0);
        assert!(!config.clustering.reassemble);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let path = write_config_file(&dir, "[connection]\nhostname = \"x\"\n");

        let result = PartialInspectConfig::from_file(&path);

        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let result = PartialInspectConfig::from_file(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(CliError::Io(_))));
    }

    #[test]
    fn invalid_values_are_config_errors() {
        let args = InspectArgs {
            bond_length: Some(-1.0),
            ..InspectArgs::default()
        };
        let result = PartialInspectConfig::default().merge_with_cli(&args);
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
