//! Key Rotator — hands out provider API keys round-robin.
//!
//! Built once at startup from `CredentialConfig` and shared behind an `Arc`.
//! The cursor is an atomic counter, so concurrent callers each get their own
//! slot in the rotation.

use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::{info, warn};

use crate::config::CredentialConfig;

const KEY_DELIMITER: char = ',';

#[derive(Debug, Default)]
pub struct KeyRotator {
    keys: Vec<String>,
    cursor: AtomicUsize,
}

impl KeyRotator {
    pub fn new(keys: Vec<String>) -> Self {
        Self {
            keys,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Builds the pool from the key list, falling back to the legacy single key
    /// when the list is absent or yields no usable entries.
    pub fn from_config(config: &CredentialConfig) -> Self {
        let mut keys = config
            .key_list
            .as_deref()
            .map(parse_key_list)
            .unwrap_or_default();

        if keys.is_empty() {
            if let Some(legacy) = config.legacy_key.as_deref().map(str::trim) {
                if !legacy.is_empty() {
                    keys.push(legacy.to_string());
                }
            }
        }

        if keys.is_empty() {
            warn!("No AI provider API keys configured; AI requests will fail until GEMINI_API_KEYS or GEMINI_API_KEY is set");
        } else {
            info!("Key rotator initialized with {} API key(s)", keys.len());
        }

        Self::new(keys)
    }

    /// Returns the key at the cursor and advances it. Empty string when the
    /// pool is empty.
    pub fn next_key(&self) -> String {
        if self.keys.is_empty() {
            return String::new();
        }
        let slot = self.cursor.fetch_add(1, Ordering::Relaxed);
        self.keys[slot % self.keys.len()].clone()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Splits a delimited key list into trimmed, non-empty keys.
pub fn parse_key_list(raw: &str) -> Vec<String> {
    raw.split(KEY_DELIMITER)
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}
