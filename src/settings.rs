//! Runtime settings.
//!
//! Read from an optional `settings.toml` in the working directory, then from
//! `FUND_MATCHER__*` environment variables, e.g.
//! `FUND_MATCHER__LIMITS__MAX_DONATION=10000`.

use config::{Config, ConfigError, Environment, File};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::Result;
use crate::types::{DonationLimits, MAX_DONATION, MIN_DONATION};

#[derive(Debug, Clone, Deserialize)]
pub struct Limits {
    pub min_donation: Decimal,
    pub max_donation: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Log {
    /// `tracing_subscriber::EnvFilter` directive, used when `RUST_LOG` is unset.
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub limits: Limits,
    pub log: Log,
}

impl Settings {
    pub fn new() -> std::result::Result<Self, ConfigError> {
        Self::from_file("settings")
    }

    /// Load from `name` (any format `config` understands, extension optional)
    /// layered under the environment.
    pub fn from_file(name: &str) -> std::result::Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("limits.min_donation", MIN_DONATION.to_string())?
            .set_default("limits.max_donation", MAX_DONATION.to_string())?
            .set_default("log.level", "info")?
            .add_source(File::with_name(name).required(false))
            .add_source(Environment::with_prefix("FUND_MATCHER").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Donation bounds as configured.
    pub fn donation_limits(&self) -> Result<DonationLimits> {
        DonationLimits::new(self.limits.min_donation, self.limits.max_donation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;

    #[test]
    fn test_defaults_without_file() {
        let settings = Settings::from_file("definitely-not-a-settings-file").unwrap();
        let limits = settings.donation_limits().unwrap();

        assert_eq!(limits.min(), dec!(5));
        assert_eq!(limits.max(), dec!(25000));
    }

    #[test]
    fn test_file_overrides_defaults() {
        let path = std::env::temp_dir().join(format!("fund-matcher-settings-{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[limits]\nmin_donation = \"1.00\"\nmax_donation = \"500\"\n[log]\nlevel = \"debug\"").unwrap();

        let settings = Settings::from_file(path.to_str().unwrap()).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(settings.limits.min_donation, dec!(1));
        assert_eq!(settings.limits.max_donation, dec!(500));
        assert_eq!(settings.log.level, "debug");
    }

    #[test]
    fn test_inverted_limits_rejected() {
        let settings = Settings {
            limits: Limits {
                min_donation: dec!(100),
                max_donation: dec!(10),
            },
            log: Log {
                level: "info".to_string(),
            },
        };
        assert!(settings.donation_limits().is_err());
    }
}
