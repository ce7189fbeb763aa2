use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    /// Include error debug output in `error.details` of error responses
    #[serde(default = "default_false")]
    pub expose_error_details: bool,

    /// log4rs configuration file, read at startup
    #[serde(default = "default_log_config")]
    pub log_config: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    /// Overridden by the `PORT` environment variable
    #[serde(default = "default_port")]
    pub port: u16,

    /// actix worker count; actix picks one per core when unset
    #[serde(default)]
    pub workers: Option<usize>,
}

fn default_false() -> bool { false }
fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 3000 }
fn default_log_config() -> String { "log4rs.yml".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            expose_error_details: false,
            log_config: default_log_config(),
        }
    }
}

impl Config {
    /// Load `config.toml` from the working directory, then apply `PORT`
    pub fn load() -> Self {
        let mut cfg = Self::load_from(Path::new("config.toml"));
        cfg.apply_port_override(std::env::var("PORT").ok().as_deref());
        cfg
    }

    /// Read a config file, falling back to defaults when it is missing or invalid
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<Config>(&content) {
                Ok(cfg) => cfg,
                Err(e) => {
                    log::warn!("Ignoring invalid {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    fn apply_port_override(&mut self, port: Option<&str>) {
        if let Some(raw) = port {
            match raw.trim().parse::<u16>() {
                Ok(p) => self.server.port = p,
                Err(_) => log::warn!("Ignoring invalid PORT value {:?}", raw),
            }
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.bind_address(), "0.0.0.0:3000");
        assert!(!cfg.expose_error_details);
        assert_eq!(cfg.log_config, "log4rs.yml");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let cfg: Config = toml::from_str(
            r#"
            expose_error_details = true
            [server]
            port = 8080
            "#,
        )
        .unwrap();
        assert!(cfg.expose_error_details);
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.workers, None);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let cfg = Config::load_from(Path::new("definitely/not/here.toml"));
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn test_port_override() {
        let mut cfg = Config::default();
        cfg.apply_port_override(Some("4000"));
        assert_eq!(cfg.server.port, 4000);
        cfg.apply_port_override(Some("not-a-port"));
        assert_eq!(cfg.server.port, 4000);
        cfg.apply_port_override(None);
        assert_eq!(cfg.server.port, 4000);
    }
}
