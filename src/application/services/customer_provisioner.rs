//! CustomerProvisioner - Maps verified identities onto store customers.

use std::sync::Arc;

use secrecy::SecretString;

use crate::domain::customer::{generate_password, CustomerAccount};
use crate::domain::foundation::SubjectId;
use crate::ports::{CommerceBackend, CommerceCustomer, CommerceError, CreateCustomerRequest};

/// A customer together with the password it was just given.
#[derive(Debug)]
pub struct ProvisionedCustomer {
    pub customer: CommerceCustomer,
    /// Username to log in with; the store's value, or the derived one if blank.
    pub username: String,
    pub password: SecretString,
}

#[derive(Clone)]
pub struct CustomerProvisioner {
    commerce: Arc<dyn CommerceBackend>,
    email_domain: String,
}

impl CustomerProvisioner {
    pub fn new(commerce: Arc<dyn CommerceBackend>, email_domain: impl Into<String>) -> Self {
        Self {
            commerce,
            email_domain: email_domain.into(),
        }
    }

    pub fn account_for(&self, subject: &SubjectId) -> CustomerAccount {
        CustomerAccount::for_subject(subject, &self.email_domain)
    }

    /// Looks up the customer for a subject without creating one.
    pub async fn find_customer(
        &self,
        subject: &SubjectId,
    ) -> Result<Option<CommerceCustomer>, CommerceError> {
        let account = self.account_for(subject);
        let customers = self.commerce.find_customers_by_email(&account.email).await?;
        Ok(customers.into_iter().next())
    }

    /// Ensures a customer exists for the subject and rotates its password.
    ///
    /// An existing customer gets exactly one password update; a new customer
    /// is created with the password and nothing else is written.
    pub async fn upsert_customer(
        &self,
        subject: &SubjectId,
    ) -> Result<ProvisionedCustomer, CommerceError> {
        let account = self.account_for(subject);
        let password = generate_password();

        let existing = self
            .commerce
            .find_customers_by_email(&account.email)
            .await?
            .into_iter()
            .next();

        let customer = match existing {
            Some(customer) => {
                tracing::debug!(customer_id = %customer.id, "Rotating customer password");
                self.commerce
                    .update_customer_password(customer.id, &password)
                    .await?
            }
            None => {
                tracing::info!(email = %account.email, "Creating customer");
                self.commerce
                    .create_customer(CreateCustomerRequest {
                        email: account.email.clone(),
                        username: account.username.clone(),
                        password: password.clone(),
                    })
                    .await?
            }
        };

        let username = if customer.username.is_empty() {
            account.username
        } else {
            customer.username.clone()
        };

        Ok(ProvisionedCustomer {
            customer,
            username,
            password,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::commerce::InMemoryCommerceBackend;
    use crate::domain::foundation::CustomerId;
    use crate::ports::CommerceErrorCode;
    use secrecy::ExposeSecret;

    fn subject() -> SubjectId {
        SubjectId::new("0xabc").unwrap()
    }

    fn provisioner(store: &InMemoryCommerceBackend) -> CustomerProvisioner {
        CustomerProvisioner::new(Arc::new(store.clone()), "bbs.network")
    }

    fn existing_customer() -> CommerceCustomer {
        CommerceCustomer {
            id: CustomerId::new(3),
            email: "0xabc@bbs.network".into(),
            username: "0xabc".into(),
        }
    }

    #[tokio::test]
    async fn existing_customer_gets_one_password_update_and_no_create() {
        let store = InMemoryCommerceBackend::new().with_customer(existing_customer());

        let provisioned = provisioner(&store).upsert_customer(&subject()).await.unwrap();

        assert_eq!(provisioned.customer.id, CustomerId::new(3));
        assert_eq!(store.call_count("update_customer_password"), 1);
        assert_eq!(store.call_count("create_customer"), 0);
        assert_eq!(
            store.password_of(CustomerId::new(3)).as_deref(),
            Some(provisioned.password.expose_secret().as_str())
        );
    }

    #[tokio::test]
    async fn new_customer_gets_one_create_and_no_update() {
        let store = InMemoryCommerceBackend::new();

        let provisioned = provisioner(&store).upsert_customer(&subject()).await.unwrap();

        assert_eq!(store.call_count("create_customer"), 1);
        assert_eq!(store.call_count("update_customer_password"), 0);
        assert_eq!(provisioned.customer.email, "0xabc@bbs.network");
        assert_eq!(provisioned.username, "0xabc");
        assert_eq!(store.customers().len(), 1);
    }

    #[tokio::test]
    async fn every_upsert_rotates_the_password() {
        let store = InMemoryCommerceBackend::new().with_customer(existing_customer());
        let provisioner = provisioner(&store);

        let first = provisioner.upsert_customer(&subject()).await.unwrap();
        let second = provisioner.upsert_customer(&subject()).await.unwrap();

        assert_ne!(first.password.expose_secret(), second.password.expose_secret());
    }

    #[tokio::test]
    async fn find_customer_never_creates() {
        let store = InMemoryCommerceBackend::new();

        let found = provisioner(&store).find_customer(&subject()).await.unwrap();

        assert!(found.is_none());
        assert!(!store.was_called("create_customer"));
    }

    #[tokio::test]
    async fn lookup_failure_propagates() {
        let store = InMemoryCommerceBackend::new();
        store.set_method_error("find_customers_by_email", CommerceError::network("down"));

        let err = provisioner(&store).upsert_customer(&subject()).await.unwrap_err();
        assert_eq!(err.code, CommerceErrorCode::NetworkError);
        assert!(!store.was_called("create_customer"));
    }
}
