//! Environment parsing and defaults.
//!
//! Runs before the Bevy app exists, so problems go to stderr instead of the log.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::content::SheetsConfig;
use crate::pages::Page;

pub const DEFAULT_SPREADSHEET_ID: &str = "1zVPwf9DwpLrcYqdkvTfAN7xByzEfQq9t5xKlMsX_4FE";
pub const DEFAULT_SHEETS_BASE: &str = "https://sheets.googleapis.com";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn default_base_url() -> Url {
    Url::parse(DEFAULT_SHEETS_BASE).unwrap_or_else(|err| {
        unreachable!("default Sheets base {DEFAULT_SHEETS_BASE:?} is invalid: {err}")
    })
}

/// Reads `SHEETS_API_KEY`, `SHEETS_SPREADSHEET_ID`, `SHEETS_BASE_URL` and
/// `SHEETS_TIMEOUT_SECS`. Invalid values are reported and replaced by defaults.
pub fn content_config() -> SheetsConfig {
    let api_key = non_empty_var("SHEETS_API_KEY").unwrap_or_else(|| {
        eprintln!("jaringan: SHEETS_API_KEY is not set, content requests will be rejected");
        String::new()
    });
    let spreadsheet_id =
        non_empty_var("SHEETS_SPREADSHEET_ID").unwrap_or_else(|| DEFAULT_SPREADSHEET_ID.to_string());

    let base_url = match non_empty_var("SHEETS_BASE_URL") {
        Some(raw) => raw.parse::<Url>().unwrap_or_else(|err| {
            eprintln!("jaringan: invalid URL in SHEETS_BASE_URL {raw:?}: {err}");
            default_base_url()
        }),
        None => default_base_url(),
    };

    let timeout_secs = match non_empty_var("SHEETS_TIMEOUT_SECS") {
        Some(raw) => raw.trim().parse::<u64>().unwrap_or_else(|err| {
            eprintln!("jaringan: invalid SHEETS_TIMEOUT_SECS {raw:?}: {err}");
            DEFAULT_TIMEOUT_SECS
        }),
        None => DEFAULT_TIMEOUT_SECS,
    };

    SheetsConfig {
        spreadsheet_id,
        api_key,
        base_url,
        timeout: Duration::from_secs(timeout_secs),
    }
}

/// `CONTENT_FIXTURE`: replay content from this JSON file instead of Sheets.
pub fn content_fixture() -> Option<PathBuf> {
    non_empty_var("CONTENT_FIXTURE").map(PathBuf::from)
}

/// `CONTENT_RECORD`: write each fetched record to this JSON file.
pub fn content_record() -> Option<PathBuf> {
    non_empty_var("CONTENT_RECORD").map(PathBuf::from)
}

/// Start page from the CLI argument, then `JARINGAN_ROUTE`, then the default.
pub fn initial_page(cli_route: Option<&str>) -> Page {
    let env_route = non_empty_var("JARINGAN_ROUTE");
    let Some(route) = cli_route.map(str::to_string).or(env_route) else {
        return Page::default();
    };
    route.parse::<Page>().unwrap_or_else(|err| {
        eprintln!("jaringan: {err}, opening {}", Page::default().route());
        Page::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn lock_env() -> std::sync::MutexGuard<'static, ()> {
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
    }

    struct EnvGuard {
        snapshot: Vec<(&'static str, Option<String>)>,
    }

    impl EnvGuard {
        fn capture(keys: &[&'static str]) -> Self {
            let snapshot = keys
                .iter()
                .map(|&key| (key, std::env::var(key).ok()))
                .collect();
            for key in keys {
                std::env::remove_var(key);
            }
            Self { snapshot }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, value) in &self.snapshot {
                match value {
                    Some(val) => std::env::set_var(key, val),
                    None => std::env::remove_var(key),
                }
            }
        }
    }

    const ENV_KEYS: [&str; 7] = [
        "SHEETS_API_KEY",
        "SHEETS_SPREADSHEET_ID",
        "SHEETS_BASE_URL",
        "SHEETS_TIMEOUT_SECS",
        "CONTENT_FIXTURE",
        "CONTENT_RECORD",
        "JARINGAN_ROUTE",
    ];

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let _lock = lock_env();
        let _guard = EnvGuard::capture(&ENV_KEYS);

        let config = content_config();

        assert_eq!(config.spreadsheet_id, DEFAULT_SPREADSHEET_ID);
        assert_eq!(config.base_url.as_str(), "https://sheets.googleapis.com/");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.api_key.is_empty());
        assert!(content_fixture().is_none());
        assert!(content_record().is_none());
    }

    #[test]
    fn env_overrides_are_used() {
        let _lock = lock_env();
        let _guard = EnvGuard::capture(&ENV_KEYS);

        std::env::set_var("SHEETS_API_KEY", "secret");
        std::env::set_var("SHEETS_SPREADSHEET_ID", "sheet-123");
        std::env::set_var("SHEETS_BASE_URL", "http://127.0.0.1:8080");
        std::env::set_var("SHEETS_TIMEOUT_SECS", "3");
        std::env::set_var("CONTENT_FIXTURE", "fixtures/content.json");

        let config = content_config();

        assert_eq!(config.api_key, "secret");
        assert_eq!(config.spreadsheet_id, "sheet-123");
        assert_eq!(config.base_url.as_str(), "http://127.0.0.1:8080/");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(content_fixture(), Some(PathBuf::from("fixtures/content.json")));
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let _lock = lock_env();
        let _guard = EnvGuard::capture(&ENV_KEYS);

        std::env::set_var("SHEETS_BASE_URL", "not a url");
        std::env::set_var("SHEETS_TIMEOUT_SECS", "soon");

        let config = content_config();

        assert_eq!(config.base_url.as_str(), "https://sheets.googleapis.com/");
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn cli_route_beats_env_route() {
        let _lock = lock_env();
        let _guard = EnvGuard::capture(&ENV_KEYS);

        std::env::set_var("JARINGAN_ROUTE", "/osilayer");

        assert_eq!(initial_page(None), Page::OsiLayer);
        assert_eq!(initial_page(Some("/transmisijaringan")), Page::Transmission);
        assert_eq!(initial_page(Some("/nowhere")), Page::Topology);
    }
}
