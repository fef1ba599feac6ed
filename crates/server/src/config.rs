//! Server configuration.

use learnpath_core::Identifier;

/// Caller used when neither the command line nor `initialize` names one.
pub const DEFAULT_CALLER: &str = "anonymous";

/// Tool server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server name reported by `initialize`
    pub server_name: String,
    /// Server version
    pub version: String,
    /// Identity of connections that do not announce one
    pub default_caller: Identifier,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server_name: "learnpath".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            default_caller: Identifier::new(DEFAULT_CALLER),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();
        assert_eq!(config.server_name, "learnpath");
        assert_eq!(config.default_caller.as_str(), DEFAULT_CALLER);
        assert!(!config.version.is_empty());
    }
}
