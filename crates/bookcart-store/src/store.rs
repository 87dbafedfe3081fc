//! # Cart Store
//!
//! The persistence capability the cart manager is parameterized by.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  save(key, value, ttl_days)   value expires ttl_days after the save     │
//! │  load(key) -> Some(value)     exact bytes from the last save            │
//! │  load(key) -> None            never saved, or expired                   │
//! │                                                                         │
//! │  Each save replaces the value AND restarts the expiry clock.           │
//! │  ttl_days = 0 stores an entry that is already expired.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Store Trait
// =============================================================================

/// Key-value persistence with per-entry expiry.
pub trait CartStore {
    /// Returns the value saved under `key`, or `None` if absent or expired.
    fn load(&self, key: &str) -> StoreResult<Option<String>>;

    /// Saves `value` under `key` for `ttl_days` days.
    fn save(&self, key: &str, value: &str, ttl_days: u32) -> StoreResult<()>;
}

impl<S: CartStore + ?Sized> CartStore for &S {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str, ttl_days: u32) -> StoreResult<()> {
        (**self).save(key, value, ttl_days)
    }
}

impl<S: CartStore + ?Sized> CartStore for Arc<S> {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str, ttl_days: u32) -> StoreResult<()> {
        (**self).save(key, value, ttl_days)
    }
}

/// A stored value and the moment it stops being readable.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Envelope {
    value: String,
    expires_at: DateTime<Utc>,
}

impl Envelope {
    fn new(value: &str, ttl_days: u32) -> Self {
        Envelope {
            value: value.to_string(),
            expires_at: Utc::now()
                .checked_add_signed(Duration::days(i64::from(ttl_days)))
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

// =============================================================================
// Memory Store
// =============================================================================

/// Process-local store. Used by tests and by embedders that bring their own
/// persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Envelope>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStore for MemoryStore {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        validate_key(key)?;
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

        let expired = match entries.get(key) {
            Some(entry) => entry.is_expired(Utc::now()),
            None => return Ok(None),
        };

        if expired {
            debug!(key, "Entry expired");
            entries.remove(key);
            return Ok(None);
        }

        Ok(entries.get(key).map(|entry| entry.value.clone()))
    }

    fn save(&self, key: &str, value: &str, ttl_days: u32) -> StoreResult<()> {
        validate_key(key)?;
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), Envelope::new(value, ttl_days));
        Ok(())
    }
}

// =============================================================================
// File Store
// =============================================================================

/// Directory-backed store: one `<key>.json` envelope per key.
///
/// ## File Format
/// ```json
/// { "value": "[{\"isbn\":\"...\",\"keyid\":\"...\"}]", "expires_at": "2026-10-20T09:00:00Z" }
/// ```
///
/// Writes go to a temporary file first and are renamed into place, so a
/// crash mid-write leaves the previous cart intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl FileStore {
    /// Creates a store rooted at `dir`. The directory is created on first
    /// save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore {
            dir: dir.into(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Root directory of the store.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> StoreResult<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl CartStore for FileStore {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.path_for(key)?;
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let envelope: Envelope = serde_json::from_str(&contents)?;
        if envelope.is_expired(Utc::now()) {
            debug!(path = %path.display(), "Entry expired, removing");
            if let Err(e) = std::fs::remove_file(&path) {
                warn!(path = %path.display(), error = %e, "Failed to remove expired entry");
            }
            return Ok(None);
        }

        Ok(Some(envelope.value))
    }

    fn save(&self, key: &str, value: &str, ttl_days: u32) -> StoreResult<()> {
        let path = self.path_for(key)?;
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        std::fs::create_dir_all(&self.dir)?;

        let contents = serde_json::to_string(&Envelope::new(value, ttl_days))?;
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        std::fs::write(&tmp, contents)?;
        std::fs::rename(&tmp, &path)?;

        debug!(path = %path.display(), ttl_days, "Entry saved");
        Ok(())
    }
}

/// Checks that `key` is usable by every store: non-empty, no leading `.`,
/// only `[A-Za-z0-9._-]`.
pub fn validate_key(key: &str) -> StoreResult<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));

    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
