use std::{env, path::PathBuf};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_PATH: &str = "data/board.json";
const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8081";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub backend_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let data_path = lookup("APP_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));
        let backend_url = lookup("BACKEND_URL")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());

        Self {
            port,
            data_path,
            backend_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.port, 8080);
        assert_eq!(config.data_path, PathBuf::from("data/board.json"));
        assert_eq!(config.backend_url, "http://127.0.0.1:8081");
    }

    #[test]
    fn reads_overrides_and_ignores_bad_port() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("PORT", "not-a-port"),
            ("APP_DATA_PATH", "/tmp/board.json"),
            ("BACKEND_URL", "http://tracker:9000"),
        ]);
        let config = Config::from_lookup(|key| vars.get(key).map(|value| value.to_string()));
        assert_eq!(config.port, 8080);
        assert_eq!(config.data_path, PathBuf::from("/tmp/board.json"));
        assert_eq!(config.backend_url, "http://tracker:9000");
    }
}
