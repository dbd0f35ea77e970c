//! Client Settings
//!
//! Defines the configuration schema for the request client.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Default API prefix used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "https://your-api-domain.com/api";

/// Default per-request timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Route the unauthorized handler relaunches into
pub const DEFAULT_LOGIN_ROUTE: &str = "/pages/login/login";

/// Fixed settings of a request client, set once at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSettings {
    /// Prefix prepended verbatim to every request path
    pub base_url: String,

    /// Default timeout for requests that do not set their own
    pub timeout_ms: u64,

    /// Headers sent with every JSON request; per-call headers win on conflict
    pub default_headers: BTreeMap<String, String>,

    /// Login entry point used on forced re-authentication
    pub login_route: String,

    /// Loading indicator text for regular requests
    pub loading_text: String,

    /// Loading indicator text for uploads
    pub upload_loading_text: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        let mut default_headers = BTreeMap::new();
        default_headers.insert("Content-Type".to_string(), "application/json".to_string());

        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            default_headers,
            login_route: DEFAULT_LOGIN_ROUTE.to_string(),
            loading_text: "loading...".to_string(),
            upload_loading_text: "uploading...".to_string(),
        }
    }
}

impl ClientSettings {
    /// Settings with a custom base URL and everything else defaulted
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Default timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Compose the absolute URL for an API path
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Apply a partial override on top of these settings
    pub fn apply(&mut self, overlay: SettingsOverlay) {
        if let Some(base_url) = overlay.base_url {
            self.base_url = base_url;
        }
        if let Some(timeout_ms) = overlay.timeout_ms {
            self.timeout_ms = timeout_ms;
        }
        for (name, value) in overlay.default_headers {
            self.default_headers.insert(name, value);
        }
        if let Some(route) = overlay.login_route {
            self.login_route = route;
        }
        if let Some(text) = overlay.loading_text {
            self.loading_text = text;
        }
        if let Some(text) = overlay.upload_loading_text {
            self.upload_loading_text = text;
        }
    }
}

/// Partial settings as read from a config file or the environment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsOverlay {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,

    /// Merged into the default header set rather than replacing it
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub default_headers: BTreeMap<String, String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_route: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub loading_text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload_loading_text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = ClientSettings::default();
        assert_eq!(settings.base_url, "https://your-api-domain.com/api");
        assert_eq!(settings.timeout(), Duration::from_millis(10_000));
        assert_eq!(
            settings.default_headers.get("Content-Type"),
            Some(&"application/json".to_string())
        );
        assert_eq!(settings.url_for("/posts"), "https://your-api-domain.com/api/posts");
    }

    #[test]
    fn test_deserialize_overlay() {
        let json = r#"{
            "base_url": "https://staging.example.com/api",
            "timeout_ms": 2500,
            "default_headers": {
                "X-Client": "miniapp"
            }
        }"#;

        let overlay: SettingsOverlay = serde_json::from_str(json).unwrap();
        assert_eq!(overlay.timeout_ms, Some(2500));
        assert!(overlay.login_route.is_none());

        let mut settings = ClientSettings::default();
        settings.apply(overlay);
        assert_eq!(settings.base_url, "https://staging.example.com/api");
        assert_eq!(settings.timeout_ms, 2500);
        assert_eq!(settings.default_headers.len(), 2);
        assert_eq!(settings.login_route, DEFAULT_LOGIN_ROUTE);
    }
}
