use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub cors: CorsConfig,
    pub safety: SafetyConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub api_key: String,
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origin: String,
}

#[derive(Debug, Clone)]
pub struct SafetyConfig {
    /// Over-current cutoff in amps. Readings above this trip the SSR off.
    pub over_current_limit: f64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        // Fallbacks mirror the hosted deployment's local-development defaults.
        let api_key = env::var("API_KEY").unwrap_or_else(|_| "Kunci_Surga".to_string());

        let host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let allowed_origin = env::var("CORS_ORIGIN")
            .unwrap_or_else(|_| "https://powerhousemeter.tk2b.my.id".to_string());

        let over_current_limit = env::var("OVER_CURRENT_LIMIT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10.0);

        Ok(Config {
            server: ServerConfig { host, port },
            auth: AuthConfig { api_key },
            cors: CorsConfig { allowed_origin },
            safety: SafetyConfig { over_current_limit },
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Key preview safe to log at startup.
    pub fn masked_api_key(&self) -> String {
        let key = &self.auth.api_key;
        if key.len() <= 6 {
            "***".to_string()
        } else {
            format!("{}...{}", &key[..3], &key[key.len() - 3..])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_address_joins_host_and_port() {
        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            auth: AuthConfig {
                api_key: "secret".to_string(),
            },
            cors: CorsConfig {
                allowed_origin: "*".to_string(),
            },
            safety: SafetyConfig {
                over_current_limit: 10.0,
            },
        };

        assert_eq!(config.bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_masked_api_key_hides_middle() {
        let config = Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            auth: AuthConfig {
                api_key: "Kunci_Surga".to_string(),
            },
            cors: CorsConfig {
                allowed_origin: "*".to_string(),
            },
            safety: SafetyConfig {
                over_current_limit: 10.0,
            },
        };

        assert_eq!(config.masked_api_key(), "Kun...rga");
    }

    #[test]
    fn test_masked_api_key_short_keys_fully_hidden() {
        let config = Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            auth: AuthConfig {
                api_key: "abc".to_string(),
            },
            cors: CorsConfig {
                allowed_origin: "*".to_string(),
            },
            safety: SafetyConfig {
                over_current_limit: 10.0,
            },
        };

        assert_eq!(config.masked_api_key(), "***");
    }
}
