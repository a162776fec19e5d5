use chrono::Month;
use serde::Deserialize;
use serde_with::{serde_as, DurationMilliSeconds};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::agenda::{Category, EventMap};
use crate::datetime::{DateKey, MonthIndex};
use crate::error::{Error, ErrorKind, Result};
use crate::locale::Locale;

const CONFIG_PATH_ENV_VAR: &str = "MONTHCAL_CONFIG_FILE";

pub fn find_configfile_locations() -> Vec<PathBuf> {
    let config_env = env::var(CONFIG_PATH_ENV_VAR).ok().map(PathBuf::from);

    let config_xdg = dirs::config_dir().map(|dir| dir.join("monthcal").join("config.toml"));

    let home_config = dirs::home_dir().map(|dir| dir.join(".monthcal.toml"));

    config_env
        .into_iter()
        .chain(config_xdg)
        .chain(home_config)
        .collect()
}

/// Loads `path` if given, otherwise the first existing file of
/// [`find_configfile_locations`], otherwise the built-in defaults.
pub fn load_suitable_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        return Config::from_file(path);
    }

    match find_configfile_locations()
        .into_iter()
        .find(|location| location.is_file())
    {
        Some(location) => Config::from_file(&location),
        None => {
            log::info!("No configuration file found, using defaults");
            Ok(Config::default())
        }
    }
}

#[serde_as]
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub locale: Locale,
    pub initial_month: MonthIndex,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub tick_rate: Duration,
    pub events: BTreeMap<DateKey, Category>,
}

impl Default for Config {
    fn default() -> Config {
        let events = [
            ((2026, Month::February, 7), Category::Collect),
            ((2026, Month::February, 14), Category::Deadline),
            ((2026, Month::February, 21), Category::Exam),
            ((2026, Month::February, 28), Category::Collect),
            ((2026, Month::March, 7), Category::Collect),
            ((2026, Month::March, 14), Category::Deadline),
            ((2026, Month::March, 18), Category::Exam),
            ((2026, Month::March, 28), Category::Collect),
            ((2026, Month::April, 4), Category::Collect),
            ((2026, Month::April, 11), Category::Deadline),
        ]
        .iter()
        .map(|&((year, month, day), category)| (DateKey::new(year, month, day), category))
        .collect();

        Config {
            locale: Locale::default(),
            initial_month: MonthIndex::new(Month::February, 2026),
            tick_rate: Duration::from_millis(40),
            events,
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Config> {
        log::info!("Loading configuration from '{}'", path.display());

        let content = fs::read_to_string(path).map_err(|err| {
            Error::new(
                ErrorKind::IOError(err),
                &format!("could not read '{}'", path.display()),
            )
        })?;

        content.parse()
    }

    pub fn event_map(&self) -> EventMap {
        EventMap::from(&self.events)
    }
}

impl std::str::FromStr for Config {
    type Err = Error;

    fn from_str(s: &str) -> Result<Config> {
        Ok(toml::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    #[test]
    fn default_config_carries_course_term() {
        let config = Config::default();
        assert_eq!(config.initial_month, MonthIndex::new(Month::February, 2026));
        assert_eq!(config.locale.code(), "id");
        assert_eq!(config.events.len(), 10);
        assert_eq!(
            config.event_map().event_for(2026, Month::March, 18),
            Some(Category::Exam)
        );
    }

    #[test]
    fn parse_full_config() {
        let config: Config = r#"
            locale = "de"
            initial_month = "2027-1"
            tick_rate = 100

            [events]
            "2027-1-15" = "deadline"
            "2027-2-1" = "collect"
        "#
        .parse()
        .unwrap();

        assert_eq!(config.locale.week_start(), Weekday::Mon);
        assert_eq!(config.initial_month, MonthIndex::new(Month::January, 2027));
        assert_eq!(config.tick_rate, Duration::from_millis(100));

        let events = config.event_map();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events.event_for(2027, Month::January, 15),
            Some(Category::Deadline)
        );
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config: Config = "locale = \"en\"".parse().unwrap();
        assert_eq!(config.locale.code(), "en");
        assert_eq!(config.initial_month, MonthIndex::new(Month::February, 2026));
        assert_eq!(config.events.len(), 10);
    }

    #[test]
    fn reject_bad_event_tables() {
        assert!("[events]\n\"2026-02-14\" = \"deadline\"".parse::<Config>().is_err());
        assert!("[events]\n\"2026-2-30\" = \"deadline\"".parse::<Config>().is_err());
        assert!("[events]\n\"2026-2-14\" = \"party\"".parse::<Config>().is_err());
    }

    #[test]
    fn reject_bad_settings() {
        assert!("locale = \"fr\"".parse::<Config>().is_err());
        assert!("initial_month = \"2026-13\"".parse::<Config>().is_err());
        assert!("colour = \"blue\"".parse::<Config>().is_err());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let err =
            load_suitable_config(Some(Path::new("/nonexistent/monthcal.toml"))).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::IOError(_)));
    }
}
