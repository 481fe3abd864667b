//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod access;

pub use access::{
    GetLoginUrlCommand, GetLoginUrlHandler, GetLoginUrlResult, GetProductAccessHandler,
    GetProductAccessQuery, GetProductAccessResult, GetProductLinkHandler, GetProductLinkQuery,
    GetProductLinkResult,
};
