// src/config.rs

use crate::error::CriticalityError;
use crate::types::Config;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let contents =
            fs::read_to_string(path).with_context(|| format!("reading config from {path}"))?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`, falling back to defaults only when no file exists.
    /// A file that is present but fails to parse or validate stays fatal.
    pub fn load_or_default(path: &str) -> Result<Self> {
        if Path::new(path).exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Setup-time validation. Errors here are fatal; everything downstream
    /// assumes a sane configuration.
    pub fn validate(&self) -> Result<(), CriticalityError> {
        if self.braking.max_deceleration <= 0.0 {
            return Err(CriticalityError::Config(format!(
                "braking.max_deceleration must be positive, got {}",
                self.braking.max_deceleration
            )));
        }
        if self.rounding.precision > 12 {
            return Err(CriticalityError::Config(format!(
                "rounding.precision {} is out of range (0..=12)",
                self.rounding.precision
            )));
        }
        Ok(())
    }
}
