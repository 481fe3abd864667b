//! StoreLinks - Builds storefront and autologin URLs.

use reqwest::Url;
use secrecy::{ExposeSecret, SecretString};

use crate::domain::catalog::ProductSlug;
use crate::domain::foundation::ValidationError;

#[derive(Debug, Clone)]
pub struct StoreLinks {
    store_url: Url,
    autologin_url: Url,
}

impl StoreLinks {
    /// Both URLs must be hierarchical (http/https), so paths can be appended.
    pub fn new(store_url: Url, autologin_url: Url) -> Result<Self, ValidationError> {
        if store_url.cannot_be_a_base() {
            return Err(ValidationError::invalid_format(
                "store_url",
                "must be an http(s) URL",
            ));
        }
        if autologin_url.cannot_be_a_base() {
            return Err(ValidationError::invalid_format(
                "autologin_url",
                "must be an http(s) URL",
            ));
        }
        Ok(Self {
            store_url,
            autologin_url,
        })
    }

    /// Derives the autologin URL from a path relative to the store.
    pub fn with_autologin_path(store_url: Url, autologin_path: &str) -> Result<Self, ValidationError> {
        let mut autologin_url = store_url.clone();
        autologin_url
            .path_segments_mut()
            .map_err(|_| ValidationError::invalid_format("store_url", "must be an http(s) URL"))?
            .pop_if_empty()
            .extend(autologin_path.split('/').filter(|segment| !segment.is_empty()));
        Self::new(store_url, autologin_url)
    }

    pub fn store_url(&self) -> &Url {
        &self.store_url
    }

    /// The public product page: `{store_url}/product/{slug}/`.
    pub fn product_page(&self, slug: &ProductSlug) -> String {
        let mut url = self.store_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["product", slug.as_str(), ""]);
        }
        url.to_string()
    }

    /// The product page for a raw slug, or the store front if the slug is unusable.
    pub fn product_page_or_store(&self, raw_slug: &str) -> String {
        match ProductSlug::new(raw_slug) {
            Ok(slug) => self.product_page(&slug),
            Err(_) => self.store_url.to_string(),
        }
    }

    /// Logs the holder of `jwt` in, then redirects to `redirect_url`.
    pub fn autologin(&self, jwt: &SecretString, redirect_url: &str) -> String {
        let mut url = self.autologin_url.clone();
        url.query_pairs_mut()
            .append_pair("JWT", jwt.expose_secret())
            .append_pair("redirectUrl", redirect_url);
        url.to_string()
    }
}
