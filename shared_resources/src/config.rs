use std::fs;
use std::io;
use std::time::Duration;

use log::{info, warn};

use crate::error::ConfigError;
use crate::floor::{Floor, FloorRange, DEFAULT_MAX_FLOOR, DEFAULT_MIN_FLOOR};

const CONFIG_FILE_PATH: &str = "config.json";
const FALLBACK_CONFIG_FILE_PATH: &str = "_config.json";

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ConfigFile {
    pub building: BuildingConfigFile,
    pub timing: TimingConfig,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct BuildingConfigFile {
    pub min_floor: i32,
    pub max_floor: i32,
    pub initial_floor: i32,
}

impl Default for BuildingConfigFile {
    fn default() -> Self {
        BuildingConfigFile {
            min_floor: DEFAULT_MIN_FLOOR,
            max_floor: DEFAULT_MAX_FLOOR,
            initial_floor: DEFAULT_MIN_FLOOR,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct TimingConfig {
    pub floor_travel_ms: u64,
    pub door_open_ms: u64,
    pub stall_timeout_ms: u64,
    pub idle_wait_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        TimingConfig {
            floor_travel_ms: 300,
            door_open_ms: 1000,
            stall_timeout_ms: 10_000,
            idle_wait_ms: 2000,
        }
    }
}

impl TimingConfig {
    pub fn floor_travel(&self) -> Duration {
        Duration::from_millis(self.floor_travel_ms)
    }

    pub fn door_open(&self) -> Duration {
        Duration::from_millis(self.door_open_ms)
    }

    pub fn stall_timeout(&self) -> Duration {
        Duration::from_millis(self.stall_timeout_ms)
    }

    pub fn idle_wait(&self) -> Duration {
        Duration::from_millis(self.idle_wait_ms)
    }

    /// A zero travel step or idle wait would leave the worker spinning.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.floor_travel_ms == 0 {
            return Err(ConfigError::ZeroTiming { field: "floor_travel_ms" });
        }
        if self.idle_wait_ms == 0 {
            return Err(ConfigError::ZeroTiming { field: "idle_wait_ms" });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildingConfig {
    pub range: FloorRange,
    pub initial_floor: Floor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub building: BuildingConfig,
    pub timing: TimingConfig,
}

impl Config {
    /// Loads `config.json`, then `_config.json`, then built-in defaults.
    /// `--config <path>` names the only file to read; `--floor <n>` overrides
    /// the initial floor.
    pub fn get(args: &[String]) -> Result<Self, ConfigError> {
        let overrides = parse_env_args(args);
        let config_file = match overrides.config_path {
            Some(path) => read_config_file(&path)?,
            None => match try_read_config_file(CONFIG_FILE_PATH)? {
                Some(file) => file,
                None => {
                    info!("No configuration file provided, using default settings...");
                    try_read_config_file(FALLBACK_CONFIG_FILE_PATH)?.unwrap_or_default()
                }
            },
        };
        Config::from_file(config_file, overrides.initial_floor)
    }

    pub fn from_file(config_file: ConfigFile, initial_floor: Option<i32>) -> Result<Self, ConfigError> {
        let range = FloorRange::new(config_file.building.min_floor, config_file.building.max_floor)?;
        let initial_floor = range.floor(initial_floor.unwrap_or(config_file.building.initial_floor))?;
        config_file.timing.validate()?;
        Ok(Config {
            building: BuildingConfig { range, initial_floor },
            timing: config_file.timing,
        })
    }
}

pub fn parse_config(path: &str, contents: &str) -> Result<ConfigFile, ConfigError> {
    serde_json::from_str(contents).map_err(|source| ConfigError::Parse {
        path: path.to_string(),
        source,
    })
}

fn read_config_file(path: &str) -> Result<ConfigFile, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_string(),
        source,
    })?;
    parse_config(path, &contents)
}

fn try_read_config_file(path: &str) -> Result<Option<ConfigFile>, ConfigError> {
    match fs::read_to_string(path) {
        Ok(contents) => parse_config(path, &contents).map(Some),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(ConfigError::Read {
            path: path.to_string(),
            source,
        }),
    }
}

#[derive(Debug, Default, PartialEq)]
struct ArgOverrides {
    config_path: Option<String>,
    initial_floor: Option<i32>,
}

fn parse_env_args(args: &[String]) -> ArgOverrides {
    let mut overrides = ArgOverrides::default();

    // args[0] is the program name
    for arg_pair in args.get(1..).unwrap_or_default().chunks_exact(2) {
        match arg_pair[0].as_str() {
            "--config" => {
                overrides.config_path = Some(arg_pair[1].clone());
            },
            "--floor" => {
                overrides.initial_floor = match arg_pair[1].parse::<i32>() {
                    Ok(floor) => Some(floor),
                    Err(_) => {
                        warn!("floor {} is not a number, skipping...", arg_pair[1]);
                        overrides.initial_floor
                    },
                };
            },
            _ => {warn!("illegal argument {}, skipping...", arg_pair[0]);},
        }
    }
    overrides
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FloorError;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("elevator").chain(list.iter().copied()).map(String::from).collect()
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let file = parse_config("inline", r#"{ "timing": { "door_open_ms": 50 } }"#).unwrap();
        assert_eq!(file.building, BuildingConfigFile::default());
        assert_eq!(file.timing.door_open_ms, 50);
        assert_eq!(file.timing.floor_travel_ms, TimingConfig::default().floor_travel_ms);
    }

    #[test]
    fn building_section_sets_range_and_initial_floor() {
        let file = parse_config(
            "inline",
            r#"{ "building": { "min_floor": -1, "max_floor": 4, "initial_floor": 0 } }"#,
        )
        .unwrap();
        let config = Config::from_file(file, None).unwrap();
        assert_eq!(config.building.range.lowest().value(), -1);
        assert_eq!(config.building.range.highest().value(), 4);
        assert_eq!(config.building.initial_floor.value(), 0);
    }

    #[test]
    fn initial_floor_must_be_inside_the_building() {
        let result = Config::from_file(ConfigFile::default(), Some(11));
        assert!(matches!(
            result,
            Err(ConfigError::Building(FloorError::OutOfRange { floor: 11, .. }))
        ));
    }

    #[test]
    fn empty_building_is_rejected() {
        let mut file = ConfigFile::default();
        file.building.min_floor = 3;
        file.building.max_floor = 2;
        assert!(matches!(
            Config::from_file(file, None),
            Err(ConfigError::Building(FloorError::EmptyRange { .. }))
        ));
    }

    #[test]
    fn zero_timings_are_rejected() {
        let mut file = ConfigFile::default();
        file.timing.idle_wait_ms = 0;
        assert!(matches!(
            Config::from_file(file.clone(), None),
            Err(ConfigError::ZeroTiming { field: "idle_wait_ms" })
        ));

        file.timing.idle_wait_ms = 2000;
        file.timing.floor_travel_ms = 0;
        assert!(matches!(
            Config::from_file(file, None),
            Err(ConfigError::ZeroTiming { field: "floor_travel_ms" })
        ));
    }

    #[test]
    fn malformed_json_reports_the_path() {
        let error = parse_config("broken.json", "{ nope").unwrap_err();
        assert!(error.to_string().contains("broken.json"));
    }

    #[test]
    fn argument_pairs_override() {
        let overrides = parse_env_args(&args(&["--floor", "4", "--config", "lobby.json"]));
        assert_eq!(overrides.initial_floor, Some(4));
        assert_eq!(overrides.config_path.as_deref(), Some("lobby.json"));
    }

    #[test]
    fn bad_arguments_are_skipped() {
        let overrides = parse_env_args(&args(&["--floor", "four", "--speed", "9"]));
        assert_eq!(overrides, ArgOverrides::default());
    }
}
