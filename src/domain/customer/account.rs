//! Commerce account naming for verified identities.

use secrecy::SecretString;
use uuid::Uuid;

use crate::domain::foundation::SubjectId;

/// Domain used when deriving customer emails, unless configured otherwise.
pub const DEFAULT_EMAIL_DOMAIN: &str = "bbs.network";

/// Username and email under which a subject is known to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerAccount {
    pub username: String,
    pub email: String,
}

impl CustomerAccount {
    /// Derives the account for a subject: `{subject}@{email_domain}`.
    pub fn for_subject(subject: &SubjectId, email_domain: &str) -> Self {
        Self {
            username: subject.as_str().to_string(),
            email: format!("{}@{}", subject.as_str(), email_domain),
        }
    }
}

/// Creates a fresh random password.
///
/// Rotated on every login-link issuance and never stored.
pub fn generate_password() -> SecretString {
    SecretString::new(Uuid::new_v4().simple().to_string())
}
