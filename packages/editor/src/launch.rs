//! Page launch options and the settings surface.
//!
//! Covers the small amount of URL plumbing around the editor: the
//! `admin=1` auto-enable flag, the `return=<path>` parameter the
//! settings page uses to link back, and the launcher link every other
//! page shows.

use backstage_common::KeyValueStore;

use crate::auth;

/// Options read from a page's query string at load time
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LaunchOptions {
    /// `admin=1` was present: auto-enter edit mode if authenticated
    pub admin: bool,

    /// `return=<path>`: where the settings page should link back to
    pub return_to: Option<String>,
}

impl LaunchOptions {
    /// Parse a raw query string, with or without the leading `?`.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut options = Self::default();

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (name, value) = match pair.split_once('=') {
                Some((n, v)) => (n, percent_decode(v)),
                None => (pair, String::new()),
            };
            match name {
                "admin" => options.admin = value == "1",
                "return" => options.return_to = Some(value),
                _ => {}
            }
        }

        options
    }

    /// The settings page's link back to the originating page, with edit
    /// mode requested.
    pub fn return_link(&self) -> String {
        let target = self
            .return_to
            .as_deref()
            .filter(|r| !r.is_empty())
            .unwrap_or("index.html");
        format!("{}?admin=1", target)
    }
}

/// Href for the floating settings launcher appended to every page
pub fn settings_launcher_href(current_page: &str) -> String {
    let page = current_page
        .rsplit('/')
        .next()
        .filter(|p| !p.is_empty())
        .unwrap_or("index.html");
    format!("settings.html?return={}", percent_encode(page))
}

/// Status line shown on the settings page
pub fn settings_status(store: &dyn KeyValueStore) -> &'static str {
    if auth::is_authenticated(store) {
        "Logged in. You can now open any page in edit mode."
    } else {
        "Logged out. Click login to enable editing."
    }
}

fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' if i + 2 < bytes.len() => {
                let hi = (bytes[i + 1] as char).to_digit(16);
                let lo = (bytes[i + 2] as char).to_digit(16);
                match (hi, lo) {
                    (Some(hi), Some(lo)) => {
                        out.push((hi * 16 + lo) as u8);
                        i += 3;
                    }
                    _ => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            other => {
                out.push(other);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}
