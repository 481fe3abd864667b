//! Policy for products that carry no bundle in their slug.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// How to decide entitlement for a product without a governing bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UngatedPolicy {
    /// Never reveal the restricted file.
    #[default]
    Deny,
    /// Reveal it to any caller with a valid credential and a customer record.
    Grant,
    /// Reveal it to customers holding a completed order for the product itself.
    DirectPurchase,
}

impl fmt::Display for UngatedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UngatedPolicy::Deny => "deny",
            UngatedPolicy::Grant => "grant",
            UngatedPolicy::DirectPurchase => "direct_purchase",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for UngatedPolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "deny" => Ok(UngatedPolicy::Deny),
            "grant" => Ok(UngatedPolicy::Grant),
            "direct_purchase" => Ok(UngatedPolicy::DirectPurchase),
            other => Err(ValidationError::invalid_format(
                "ungated_policy",
                format!("unknown policy '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_deny() {
        assert_eq!(UngatedPolicy::default(), UngatedPolicy::Deny);
    }

    #[test]
    fn parses_and_displays_symmetrically() {
        for policy in [
            UngatedPolicy::Deny,
            UngatedPolicy::Grant,
            UngatedPolicy::DirectPurchase,
        ] {
            assert_eq!(policy.to_string().parse::<UngatedPolicy>().unwrap(), policy);
        }
        assert!("allow".parse::<UngatedPolicy>().is_err());
    }

    #[test]
    fn deserializes_snake_case() {
        let policy: UngatedPolicy = serde_json::from_str("\"direct_purchase\"").unwrap();
        assert_eq!(policy, UngatedPolicy::DirectPurchase);
    }
}
