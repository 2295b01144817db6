use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::slots::Density;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub api: ApiConfig,
    pub schedule: ScheduleConfig,
    pub clinics: ClinicsConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub auth_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleConfig {
    pub work_start_hour: u32,
    pub work_end_hour: u32,
    pub slot_minutes: u32,
    pub reminder_lead_minutes: i64,
}

/// Leave and holiday fetches fan out over these clinics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClinicsConfig {
    pub doctor_id: i64,
    pub clinic_ids: Vec<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UiConfig {
    pub first_day_of_week: String,
    pub time_format: String,
    pub default_view: String,
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }

    pub fn load_or_create() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("staffcal")
            .join("config.toml")
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .expect("Failed to serialize config");
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Unrecognized slot widths in the file fall back to the default.
    pub fn density(&self) -> Density {
        Density::from_minutes(self.schedule.slot_minutes).unwrap_or_default()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "http://localhost:8000/api".to_string(),
                auth_token: String::new(),
            },
            schedule: ScheduleConfig {
                work_start_hour: 9,
                work_end_hour: 21,
                slot_minutes: 15,
                reminder_lead_minutes: 10,
            },
            clinics: ClinicsConfig {
                doctor_id: 0,
                clinic_ids: Vec::new(),
            },
            ui: UiConfig {
                first_day_of_week: "Monday".to_string(),
                time_format: "24h".to_string(),
                default_view: "Day".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_complete_config() {
        let content = r#"
            [api]
            base_url = "https://clinic.example.com/api"
            auth_token = "secret"

            [schedule]
            work_start_hour = 8
            work_end_hour = 18
            slot_minutes = 10
            reminder_lead_minutes = 10

            [clinics]
            doctor_id = 17
            clinic_ids = [1, 3]

            [ui]
            first_day_of_week = "Monday"
            time_format = "24h"
            default_view = "Week"
        "#;

        let config = Config::from_toml(content).unwrap();

        assert_eq!(config.api.base_url, "https://clinic.example.com/api");
        assert_eq!(config.schedule.work_start_hour, 8);
        assert_eq!(config.clinics.clinic_ids, vec![1, 3]);
        assert_eq!(config.density(), Density::Ten);
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        assert!(matches!(
            Config::from_toml("not toml at all ["),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = Config::default();
        let content = toml::to_string_pretty(&config).unwrap();

        assert_eq!(Config::from_toml(&content).unwrap(), config);
    }

    #[test]
    fn unsupported_slot_width_falls_back_to_default_density() {
        let mut config = Config::default();
        config.schedule.slot_minutes = 7;

        assert_eq!(config.density(), Density::Fifteen);
    }

    #[test]
    fn default_working_day_is_nine_to_nine() {
        let config = Config::default();
        assert_eq!(config.schedule.work_start_hour, 9);
        assert_eq!(config.schedule.work_end_hour, 21);
    }
}
