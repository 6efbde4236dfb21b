use std::net::IpAddr;

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub database_url: String,
    pub db_max_connections: u32,
    pub host: IpAddr,
    pub port: u16,
    pub allowed_hosts: Vec<String>,
    pub cors: CorsPolicy,
    pub max_body_size: usize,
    pub static_dir: String,
    pub static_url: String,
    pub log_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CorsPolicy {
    AllowAll,
    Origins(Vec<String>),
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let environment = match env_or("FORMBUILDER_ENV", "development").as_str() {
            "development" | "dev" => Environment::Development,
            "production" | "prod" => Environment::Production,
            other => return Err(format!("Invalid FORMBUILDER_ENV: {other}")),
        };
        let production = environment == Environment::Production;

        let database_url = env_required("DATABASE_URL")?;

        let db_max_connections: u32 = env_or("FORMBUILDER_DB_MAX_CONNECTIONS", "10")
            .parse()
            .map_err(|e| format!("Invalid FORMBUILDER_DB_MAX_CONNECTIONS: {e}"))?;

        let host: IpAddr = env_or("FORMBUILDER_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid FORMBUILDER_HOST: {e}"))?;

        let port: u16 = env_or("FORMBUILDER_PORT", "8000")
            .parse()
            .map_err(|e| format!("Invalid FORMBUILDER_PORT: {e}"))?;

        let allowed_hosts = if production {
            split_list(&env_required("FORMBUILDER_ALLOWED_HOSTS")?)
        } else {
            split_list(&env_or(
                "FORMBUILDER_ALLOWED_HOSTS",
                "localhost,127.0.0.1,0.0.0.0",
            ))
        };

        // Development accepts any origin so the vite dev server can reach the API.
        let cors = match std::env::var("FORMBUILDER_CORS_ALLOWED_ORIGINS").ok() {
            Some(origins) => CorsPolicy::Origins(split_list(&origins)),
            None if production => {
                return Err(
                    "Missing required environment variable: FORMBUILDER_CORS_ALLOWED_ORIGINS"
                        .to_string(),
                );
            }
            None => CorsPolicy::AllowAll,
        };

        let max_body_size: usize = env_or("FORMBUILDER_MAX_BODY_SIZE", "5242880")
            .parse()
            .map_err(|e| format!("Invalid FORMBUILDER_MAX_BODY_SIZE: {e}"))?;

        let static_dir = env_or("FORMBUILDER_STATIC_DIR", "frontend/dist");

        let mut static_url = env_or("FORMBUILDER_STATIC_URL", "/static/");
        if !static_url.ends_with('/') {
            static_url.push('/');
        }

        let log_level = env_or(
            "FORMBUILDER_LOG_LEVEL",
            if production { "error" } else { "debug" },
        );

        Ok(Config {
            environment,
            database_url,
            db_max_connections,
            host,
            port,
            allowed_hosts,
            cors,
            max_body_size,
            static_dir,
            static_url,
            log_level,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Matches a request `Host` header against `allowed_hosts`.
    ///
    /// `*` allows everything; `.example.com` allows `example.com` and any
    /// subdomain of it. The port, if any, is ignored.
    pub fn host_allowed(&self, host_header: &str) -> bool {
        let host = strip_port(host_header).to_ascii_lowercase();

        self.allowed_hosts.iter().any(|pattern| {
            let pattern = pattern.to_ascii_lowercase();
            if pattern == "*" {
                true
            } else if let Some(domain) = pattern.strip_prefix('.') {
                host == domain || host.ends_with(&pattern)
            } else {
                host == pattern
            }
        })
    }
}

fn strip_port(host: &str) -> &str {
    // Bracketed IPv6 literal, e.g. `[::1]:8000`
    if let Some(rest) = host.strip_prefix('[') {
        return rest.split(']').next().unwrap_or(rest);
    }
    match host.rsplit_once(':') {
        Some((name, port)) if port.chars().all(|c| c.is_ascii_digit()) => name,
        _ => host,
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
