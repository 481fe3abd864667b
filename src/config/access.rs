//! Access policy configuration

use serde::Deserialize;

use crate::domain::entitlement::UngatedPolicy;

/// Access decisions not covered by bundle purchases
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccessConfig {
    /// What callers get for products outside any bundle
    #[serde(default)]
    pub ungated_policy: UngatedPolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_config_defaults_to_deny() {
        assert_eq!(AccessConfig::default().ungated_policy, UngatedPolicy::Deny);
    }
}
