use std::env;
use std::path::PathBuf;

use registry_types::EntityKind;

/// Environment variable names - single source of truth
pub mod env_vars {
    pub const PORT: &str = "REGISTRY_PORT";
    pub const HOST: &str = "REGISTRY_HOST";
    /// Directory holding both CSV files
    pub const DATA_DIR: &str = "REGISTRY_DATA_DIR";
    pub const CLIENTS_FILE: &str = "REGISTRY_CLIENTS_FILE";
    pub const EMPLOYEES_FILE: &str = "REGISTRY_EMPLOYEES_FILE";
}

/// Default values
pub mod defaults {
    pub const PORT: u16 = 9110;
    pub const HOST: &str = "127.0.0.1";
    pub const DATA_DIR: &str = "./data";
    pub const CLIENTS_FILE: &str = "clients.csv";
    pub const EMPLOYEES_FILE: &str = "employees.csv";
}

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub clients_file: String,
    pub employees_file: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup (the process environment in production)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = match lookup(env_vars::PORT) {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                log::warn!(
                    "{} is not a valid port ({:?}), using {}",
                    env_vars::PORT,
                    raw,
                    defaults::PORT
                );
                defaults::PORT
            }),
            None => defaults::PORT,
        };

        Self {
            host: lookup(env_vars::HOST).unwrap_or_else(|| defaults::HOST.to_string()),
            port,
            data_dir: PathBuf::from(
                lookup(env_vars::DATA_DIR).unwrap_or_else(|| defaults::DATA_DIR.to_string()),
            ),
            clients_file: lookup(env_vars::CLIENTS_FILE)
                .unwrap_or_else(|| defaults::CLIENTS_FILE.to_string()),
            employees_file: lookup(env_vars::EMPLOYEES_FILE)
                .unwrap_or_else(|| defaults::EMPLOYEES_FILE.to_string()),
        }
    }

    /// Defaults, rooted at the given data directory
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        let mut config = Self::from_lookup(|_| None);
        config.data_dir = data_dir.into();
        config
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn file_name(&self, kind: EntityKind) -> &str {
        match kind {
            EntityKind::Clients => &self.clients_file,
            EntityKind::Employees => &self.employees_file,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.port, defaults::PORT);
        assert_eq!(config.bind_addr(), "127.0.0.1:9110");
        assert_eq!(config.file_name(EntityKind::Clients), "clients.csv");
        assert_eq!(config.file_name(EntityKind::Employees), "employees.csv");
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            (env_vars::PORT, "8088"),
            (env_vars::HOST, "0.0.0.0"),
            (env_vars::DATA_DIR, "/srv/registry"),
            (env_vars::CLIENTS_FILE, "clientes.csv"),
        ]
        .into_iter()
        .collect();
        let config = Config::from_lookup(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.bind_addr(), "0.0.0.0:8088");
        assert_eq!(config.data_dir, PathBuf::from("/srv/registry"));
        assert_eq!(config.file_name(EntityKind::Clients), "clientes.csv");
        assert_eq!(config.file_name(EntityKind::Employees), "employees.csv");
    }

    #[test]
    fn test_invalid_port_falls_back() {
        let config = Config::from_lookup(|k| (k == env_vars::PORT).then(|| "eighty".to_string()));
        assert_eq!(config.port, defaults::PORT);
    }
}
