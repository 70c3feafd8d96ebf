//! Configuration
//!
//! Endpoint, timing and shortcut settings plus the user-facing message table.
//! Values can be overridden by a JSON block in the page:
//! `<script id="app-config" type="application/json">{ ... }</script>`.

use std::fmt;

use serde::Deserialize;

use crate::models::TodoId;

const CONFIG_ELEMENT_ID: &str = "app-config";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    /// 0 disables the deadline
    pub request_timeout_ms: u32,
    pub toast_visible_ms: u32,
    pub toast_fade_ms: u32,
    pub cache_ttl_ms: u32,
    pub create_shortcut: Shortcut,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3000".to_string(),
            request_timeout_ms: 10_000,
            toast_visible_ms: 3_000,
            toast_fade_ms: 500,
            cache_ttl_ms: 30_000,
            create_shortcut: Shortcut::default(),
        }
    }
}

impl AppConfig {
    /// Parse overrides from JSON; fields not present keep their defaults.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Read the config block from the document, falling back to defaults.
    pub fn load() -> Self {
        let raw = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        match raw {
            Some(raw) if !raw.trim().is_empty() => match Self::from_json(&raw) {
                Ok(config) => {
                    log::debug!("[CONFIG] Loaded overrides: {:?}", config);
                    config
                }
                Err(e) => {
                    log::warn!("[CONFIG] Ignoring malformed #{}: {}", CONFIG_ELEMENT_ID, e);
                    Self::default()
                }
            },
            _ => Self::default(),
        }
    }
}

/// Keyboard chord, e.g. Ctrl+Alt+N.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Shortcut {
    pub key: String,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Default for Shortcut {
    fn default() -> Self {
        Self {
            key: "n".to_string(),
            ctrl: true,
            alt: true,
            shift: false,
            meta: false,
        }
    }
}

impl Shortcut {
    pub fn matches(&self, key: &str, ctrl: bool, alt: bool, shift: bool, meta: bool) -> bool {
        self.key.eq_ignore_ascii_case(key)
            && self.ctrl == ctrl
            && self.alt == alt
            && self.shift == shift
            && self.meta == meta
    }

    pub fn matches_event(&self, ev: &web_sys::KeyboardEvent) -> bool {
        self.matches(&ev.key(), ev.ctrl_key(), ev.alt_key(), ev.shift_key(), ev.meta_key())
    }
}

impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let modifiers = [
            (self.ctrl, "Ctrl"),
            (self.alt, "Alt"),
            (self.shift, "Shift"),
            (self.meta, "Meta"),
        ];
        for (on, name) in modifiers {
            if on {
                write!(f, "{}+", name)?;
            }
        }
        f.write_str(&self.key.to_uppercase())
    }
}

// ========================
// Endpoints
// ========================

pub mod endpoints {
    use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

    use super::TodoId;

    pub const TODOS_PATH: &str = "/todos";

    pub fn todos_url(base: &str) -> String {
        format!("{}{}", base.trim_end_matches('/'), TODOS_PATH)
    }

    pub fn todo_url(base: &str, id: &TodoId) -> String {
        let id = id.canonical();
        format!("{}/{}", todos_url(base), utf8_percent_encode(&id, NON_ALPHANUMERIC))
    }
}

// ========================
// Message table
// ========================

pub mod messages {
    pub const LOAD_FAILED: &str = "Failed to load todos";
    pub const CREATE_FAILED: &str = "Failed to create todo";
    pub const UPDATE_FAILED: &str = "Failed to update todo";
    pub const DELETE_FAILED: &str = "Failed to delete todo";
    pub const NETWORK: &str = "Network error. Please check your connection.";
    pub const TIMEOUT: &str = "The request timed out. Please try again.";
    pub const SERVER: &str = "Server error. Please try again later.";
    pub const GENERIC: &str = "Something went wrong";
    pub const EMPTY_TITLE: &str = "Please enter a todo title";
    pub const INVALID_RESPONSE: &str = "Unexpected response from server";
    pub const CONFIRM_DELETE: &str = "Delete this todo?";
    pub const CREATED: &str = "Todo added";
    pub const DELETED: &str = "Todo deleted";
}
