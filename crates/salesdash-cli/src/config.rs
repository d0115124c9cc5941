use std::path::{Path, PathBuf};

use serde::Deserialize;

use salesdash_core::health::HealthThresholds;

use crate::input;

/// Optional settings file (`--config`, YAML or JSON).
///
/// ```yaml
/// export_dir: reports
/// thresholds:
///   cash_strong: 5000000
///   cash_fair: 2500000
///   receivables_low: 1000000
///   receivables_moderate: 2500000
///   profit_strong: 800000
///   profit_fair: 400000
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Health score threshold overrides applied when the input carries none
    #[serde(default)]
    pub thresholds: Option<HealthThresholds>,
    /// Directory for exported CSV files (default: working directory)
    #[serde(default)]
    pub export_dir: Option<PathBuf>,
}

impl CliConfig {
    pub fn load(path: Option<&str>) -> Result<Self, Box<dyn std::error::Error>> {
        let config: CliConfig = match path {
            Some(p) => input::file::read_yaml(p)?,
            None => CliConfig::default(),
        };
        if let Some(t) = &config.thresholds {
            t.validate()?;
        }
        Ok(config)
    }

    /// Where an export named `file_name` lands when no explicit path is given.
    pub fn export_path(&self, file_name: &str) -> PathBuf {
        match &self.export_dir {
            Some(dir) => dir.join(file_name),
            None => Path::new(file_name).to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_yaml_config() {
        let yaml = "export_dir: out\nthresholds:\n  cash_strong: 100\n  cash_fair: 50\n  receivables_low: 10\n  receivables_moderate: 20\n  profit_strong: 8\n  profit_fair: 4\n";
        let config: CliConfig = serde_yaml::from_str(yaml).unwrap();
        let t = config.thresholds.as_ref().unwrap();
        assert_eq!(t.cash_strong, dec!(100));
        assert_eq!(
            config.export_path("a.csv"),
            PathBuf::from("out").join("a.csv")
        );
    }

    #[test]
    fn test_default_export_path() {
        assert_eq!(
            CliConfig::default().export_path("a.csv"),
            PathBuf::from("a.csv")
        );
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(serde_yaml::from_str::<CliConfig>("bogus: 1\n").is_err());
    }
}
