//! Server configuration
//!
//! Read from Shuttle secrets through a lookup closure so it can be built from
//! any key/value source.

use anyhow::{Context, Result};
use std::fs;

use stopunaise::Catalog;

/// Default fulfillment number for the WhatsApp handoff
pub const DEFAULT_WHATSAPP_PHONE: &str = "+2250556520604";

/// Supabase project credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// When set, orders go through Supabase REST and assets through Supabase Storage
    pub supabase: Option<SupabaseConfig>,
    pub whatsapp_phone: String,
    /// Optional TOML catalog replacing the built-in one
    pub catalog_path: Option<String>,
}

impl ServerConfig {
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let supabase = match (non_empty("SUPABASE_URL"), non_empty("SUPABASE_ANON_KEY")) {
            (Some(url), Some(anon_key)) => Some(SupabaseConfig {
                url: url.trim_end_matches('/').to_string(),
                anon_key,
            }),
            _ => None,
        };

        Self {
            supabase,
            whatsapp_phone: non_empty("WHATSAPP_PHONE")
                .unwrap_or_else(|| DEFAULT_WHATSAPP_PHONE.to_string()),
            catalog_path: non_empty("CATALOG_PATH"),
        }
    }

    /// Load the catalog once at startup
    pub fn load_catalog(&self) -> Result<Catalog> {
        let Some(path) = &self.catalog_path else {
            return Ok(Catalog::standard().clone());
        };

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog from {:?}", path))?;

        Catalog::from_toml_str(&content).with_context(|| format!("Invalid catalog {:?}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> ServerConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]);
        assert!(config.supabase.is_none());
        assert_eq!(config.whatsapp_phone, DEFAULT_WHATSAPP_PHONE);
        assert!(config.catalog_path.is_none());
        assert_eq!(config.load_catalog().unwrap().zones.len(), 14);
    }

    #[test]
    fn test_supabase_needs_both_keys() {
        let config = config(&[("SUPABASE_URL", "https://abc.supabase.co")]);
        assert!(config.supabase.is_none());

        let config = config_with_key();
        let supabase = config.supabase.unwrap();
        assert_eq!(supabase.url, "https://abc.supabase.co");
        assert_eq!(supabase.anon_key, "anon");
    }

    fn config_with_key() -> ServerConfig {
        config(&[
            ("SUPABASE_URL", "https://abc.supabase.co/"),
            ("SUPABASE_ANON_KEY", "anon"),
            ("WHATSAPP_PHONE", " "),
        ])
    }

    #[test]
    fn test_blank_values_are_ignored() {
        assert_eq!(config_with_key().whatsapp_phone, DEFAULT_WHATSAPP_PHONE);
    }

    #[test]
    fn test_missing_catalog_file_is_an_error() {
        let config = config(&[("CATALOG_PATH", "/nonexistent/catalog.toml")]);
        assert!(config.load_catalog().is_err());
    }
}
