//! # Client configuration: `univloop.toml`
//!
//! Defines the TOML document that tells the client where the backend and the
//! media host live and how often background refreshes run. A missing or empty
//! file is equivalent to the default configuration, which targets a backend on
//! `http://localhost:8001`.
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! backend_url = "http://localhost:8001"   # REST routes live under <backend_url>/api
//! timeout_secs = 30                        # 0 disables the request timeout
//!
//! [upload]
//! upload_url = "https://api.cloudinary.com/v1_1"
//! cloud_name = "univloop"
//! upload_preset = "univloop_unsigned"
//!
//! [notifications]
//! poll_interval_secs = 30                  # 0 disables polling
//! ```
//!
//! ## Types
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`ClientConfig`] | Top-level config with builder helpers and TOML (de)serialisation. |
//! | [`ApiSection`] | Backend location and request timeout. |
//! | [`UploadSection`] | Media host endpoint, account and unsigned upload preset. |
//! | [`NotificationSection`] | Notification polling interval. |

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level configuration stored in `univloop.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub upload: UploadSection,
    #[serde(default)]
    pub notifications: NotificationSection,
}

/// REST backend settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiSection {
    /// Origin of the backend, without the `/api` prefix.
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    /// Per-request timeout in seconds. 0 disables it.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_backend_url() -> String {
    "http://localhost:8001".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Media host settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UploadSection {
    #[serde(default = "default_upload_url")]
    pub upload_url: String,
    #[serde(default)]
    pub cloud_name: String,
    #[serde(default)]
    pub upload_preset: String,
}

fn default_upload_url() -> String {
    "https://api.cloudinary.com/v1_1".to_string()
}

impl Default for UploadSection {
    fn default() -> Self {
        Self {
            upload_url: default_upload_url(),
            cloud_name: String::new(),
            upload_preset: String::new(),
        }
    }
}

/// Notification refresh settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NotificationSection {
    /// Poll interval in seconds. 0 disables polling.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u32,
}

fn default_poll_interval() -> u32 {
    30
}

impl Default for NotificationSection {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval(),
        }
    }
}

impl ClientConfig {
    /// Create a config pointing at the given backend origin.
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self {
            api: ApiSection {
                backend_url: backend_url.into(),
                ..ApiSection::default()
            },
            ..Self::default()
        }
    }

    /// Builder method to set the media host account.
    pub fn with_upload(mut self, cloud_name: &str, upload_preset: &str) -> Self {
        self.upload.cloud_name = cloud_name.to_string();
        self.upload.upload_preset = upload_preset.to_string();
        self
    }

    /// Builder method to set the notification poll interval.
    pub fn with_poll_interval(mut self, secs: u32) -> Self {
        self.notifications.poll_interval_secs = secs;
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "univloop.toml"
    }

    /// Base URL of the REST routes: `<backend_url>/api`.
    pub fn api_base(&self) -> String {
        format!("{}/api", self.api.backend_url.trim_end_matches('/'))
    }

    /// Request timeout, or `None` when disabled.
    pub fn timeout(&self) -> Option<Duration> {
        match self.api.timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    /// Notification poll interval, or `None` when polling is disabled.
    pub fn poll_interval(&self) -> Option<Duration> {
        match self.notifications.poll_interval_secs {
            0 => None,
            secs => Some(Duration::from_secs(u64::from(secs))),
        }
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
