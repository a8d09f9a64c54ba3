use std::{env, path::PathBuf, str::FromStr, time::Duration};

use tracing::warn;

/// Settings read from the environment at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub cors_allowed_origins: Vec<String>,
    pub high_score_path: PathBuf,
    pub cleanup_interval: Duration,
    pub inactive_timeout: Duration,
    /// Send mine and count of hidden cells to clients.
    pub expose_hidden_cells: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            cors_allowed_origins: vec!["http://localhost:5173".to_string()],
            high_score_path: PathBuf::from("high_score.txt"),
            cleanup_interval: Duration::from_secs(60),
            inactive_timeout: Duration::from_secs(600),
            expose_hidden_cells: false,
        }
    }
}

fn parse_or<T: FromStr>(name: &str, value: Option<String>, fallback: T) -> T {
    match value {
        None => fallback,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring unparsable {}={:?}", name, raw);
            fallback
        }),
    }
}

fn parse_flag(name: &str, value: Option<String>) -> bool {
    match value.as_deref().map(str::trim) {
        None => false,
        Some("1" | "true" | "yes" | "on") => true,
        Some("0" | "false" | "no" | "off" | "") => false,
        Some(raw) => {
            warn!("Ignoring unparsable {}={:?}", name, raw);
            false
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any variable source; missing or malformed values keep their
    /// defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let cors_allowed_origins = match lookup("CORS_ALLOWED_ORIGINS") {
            Some(origins) => origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            None => defaults.cors_allowed_origins,
        };

        let high_score_path = lookup("HIGH_SCORE_PATH")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.high_score_path);

        let cleanup_interval = Duration::from_secs(parse_or(
            "CLEANUP_INTERVAL_SECONDS",
            lookup("CLEANUP_INTERVAL_SECONDS"),
            defaults.cleanup_interval.as_secs(),
        ));

        let inactive_timeout = Duration::from_secs(parse_or(
            "INACTIVE_GAME_TIMEOUT_SECONDS",
            lookup("INACTIVE_GAME_TIMEOUT_SECONDS"),
            defaults.inactive_timeout.as_secs(),
        ));

        Self {
            cors_allowed_origins,
            high_score_path,
            cleanup_interval,
            inactive_timeout,
            expose_hidden_cells: parse_flag("EXPOSE_HIDDEN_CELLS", lookup("EXPOSE_HIDDEN_CELLS")),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(config_from(&[]), ServerConfig::default());
    }

    #[test]
    fn variables_override_defaults() {
        let config = config_from(&[
            ("CORS_ALLOWED_ORIGINS", "https://a.example, ,https://b.example"),
            ("HIGH_SCORE_PATH", "/var/lib/minesweeper/best"),
            ("CLEANUP_INTERVAL_SECONDS", "5"),
            ("INACTIVE_GAME_TIMEOUT_SECONDS", " 30 "),
            ("EXPOSE_HIDDEN_CELLS", "true"),
        ]);

        assert_eq!(
            config.cors_allowed_origins,
            ["https://a.example", "https://b.example"]
        );
        assert_eq!(
            config.high_score_path,
            PathBuf::from("/var/lib/minesweeper/best")
        );
        assert_eq!(config.cleanup_interval, Duration::from_secs(5));
        assert_eq!(config.inactive_timeout, Duration::from_secs(30));
        assert!(config.expose_hidden_cells);
    }

    #[test]
    fn malformed_values_keep_defaults() {
        let config = config_from(&[
            ("CLEANUP_INTERVAL_SECONDS", "soon"),
            ("INACTIVE_GAME_TIMEOUT_SECONDS", "-1"),
            ("EXPOSE_HIDDEN_CELLS", "maybe"),
            ("HIGH_SCORE_PATH", ""),
        ]);

        assert_eq!(config, ServerConfig::default());
    }
}
