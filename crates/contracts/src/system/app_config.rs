//! Static application configuration: names, role sets and the abilities each role set grants.
//!
//! The configuration is embedded at compile time from `config/app.toml`.

use once_cell::sync::Lazy;
use serde::Deserialize;

use super::auth::Ability;

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = include_str!("../../config/app.toml");

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    pub application_name: String,
    pub tenant_name: String,
    #[serde(default)]
    pub get_quote_url: Option<String>,
    #[serde(default)]
    pub add_ons: Vec<String>,
    #[serde(default)]
    pub roles: RolesConfig,
    #[serde(default)]
    pub abilities: AbilitiesConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct RolesConfig {
    #[serde(default)]
    pub owner: Vec<String>,
    #[serde(default)]
    pub customer: Vec<String>,
    #[serde(default)]
    pub tenant: Vec<String>,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct AbilitiesConfig {
    #[serde(default)]
    pub owner: Vec<String>,
    #[serde(default)]
    pub customer: Vec<String>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    #[serde(default = "default_api_port")]
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: default_api_port(),
        }
    }
}

fn default_api_port() -> u16 {
    3000
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct UiConfig {
    #[serde(default)]
    pub theme: Option<String>,
}

impl AppConfig {
    /// Abilities granted to an actor holding `roles`.
    ///
    /// Owner roles receive the owner abilities, customer roles the customer
    /// abilities. A role in both sets receives both. Duplicates are removed.
    pub fn abilities_for_roles(&self, roles: &[String]) -> Vec<Ability> {
        let has_any = |set: &[String]| roles.iter().any(|r| set.contains(r));

        let mut phrases: Vec<&String> = Vec::new();
        if has_any(&self.roles.owner) {
            phrases.extend(self.abilities.owner.iter());
        }
        if has_any(&self.roles.customer) {
            phrases.extend(self.abilities.customer.iter());
        }
        phrases.sort();
        phrases.dedup();

        phrases.into_iter().map(|p| Ability::parse(p)).collect()
    }

    /// Whether any of `roles` is a tenant role (member of a supplier)
    pub fn is_tenant_member(&self, roles: &[String]) -> bool {
        roles.iter().any(|r| self.roles.tenant.contains(r))
    }
}

/// Parse a configuration document
pub fn parse_app_config(contents: &str) -> anyhow::Result<AppConfig> {
    let config: AppConfig = toml::from_str(contents)?;
    if config.application_name.trim().is_empty() {
        anyhow::bail!("application_name must not be empty");
    }
    Ok(config)
}

/// Load the embedded configuration
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    parse_app_config(DEFAULT_CONFIG)
}

static APP_CONFIG: Lazy<AppConfig> = Lazy::new(|| match load_app_config() {
    Ok(config) => config,
    Err(e) => {
        log::error!("Failed to load embedded app config: {}", e);
        AppConfig::default()
    }
});

/// Process-wide configuration, loaded on first use
pub fn app_config() -> &'static AppConfig {
    &APP_CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::auth::{AccessOperation, AccessRequirement};

    #[test]
    fn test_default_config_loads() {
        let config = load_app_config().unwrap();
        assert_eq!(config.application_name, "Construction tool rental");
        assert_eq!(config.tenant_name, "Supplier");
        assert_eq!(config.roles.owner, vec!["Store Manager".to_string()]);
        assert_eq!(config.api.port, 3000);
        assert_eq!(config.add_ons.len(), 4);
    }

    #[test]
    fn test_store_manager_can_create_store() {
        let config = load_app_config().unwrap();
        let abilities = config.abilities_for_roles(&["Store Manager".to_string()]);
        let requirement = AccessRequirement::project("store", AccessOperation::Create);
        assert!(abilities.iter().any(|a| a.grants(&requirement)));
    }

    #[test]
    fn test_customer_cannot_create_store() {
        let config = load_app_config().unwrap();
        let abilities = config.abilities_for_roles(&["Customer".to_string()]);
        let create = AccessRequirement::project("store", AccessOperation::Create);
        let read = AccessRequirement::project("store", AccessOperation::Read);
        assert!(!abilities.iter().any(|a| a.grants(&create)));
        assert!(abilities.iter().any(|a| a.grants(&read)));
    }

    #[test]
    fn test_unknown_role_has_no_abilities() {
        let config = load_app_config().unwrap();
        assert!(config.abilities_for_roles(&["Visitor".to_string()]).is_empty());
        assert!(config.is_tenant_member(&["Store Employee".to_string()]));
    }

    #[test]
    fn test_missing_sections_default() {
        let config = parse_app_config("application_name = \"x\"\ntenant_name = \"t\"\n").unwrap();
        assert_eq!(config.api.port, 3000);
        assert!(config.roles.owner.is_empty());
        assert!(parse_app_config("application_name = \"\"\ntenant_name = \"t\"\n").is_err());
    }
}
