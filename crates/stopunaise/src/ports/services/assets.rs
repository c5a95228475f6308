//! Static Asset Port
//!
//! Resolves storefront images to public URLs.

use crate::domain::errors::DomainError;

/// Image shown when an asset cannot be resolved
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/200x200?text=Sniper+DDVP";

/// Asset resolution interface
pub trait AssetResolver: Send + Sync {
    /// Public URL of `path` inside `bucket`
    fn public_url(&self, bucket: &str, path: &str) -> Result<String, DomainError>;
}

/// Resolve an asset, falling back to the placeholder image.
///
/// Failures are logged and never propagated.
pub fn resolve_or_placeholder(resolver: &dyn AssetResolver, bucket: &str, path: &str) -> String {
    match resolver.public_url(bucket, path) {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!(bucket, path, error = %e, "Asset resolution failed, using placeholder");
            PLACEHOLDER_IMAGE_URL.to_string()
        }
    }
}
