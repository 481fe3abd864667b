//! Customer domain module.
//!
//! How a verified identity maps onto a commerce customer account, and the
//! one-time passwords used to log that account into the store.

mod account;

pub use account::{generate_password, CustomerAccount, DEFAULT_EMAIL_DOMAIN};
