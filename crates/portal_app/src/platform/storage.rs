use std::collections::BTreeMap;
use std::path::Path;

use chrono::Utc;
use portal_core::Page;
use portal_engine::{AuthData, Job, PersistError, StateFile};
use portal_logging::{portal_debug, portal_info, portal_warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const STATE_FILENAME: &str = ".portal_state.ron";

const KEY_TOKEN: &str = "token";
const KEY_LOGGED_IN: &str = "isLoggedIn";
const KEY_USERNAME: &str = "username";
const KEY_EMAIL: &str = "userEmail";
const KEY_USER_ID: &str = "userId";
const KEY_SELECTED_JOB: &str = "selectedJob";
const KEY_REDIRECT: &str = "redirectAfterLogin";

const AUTH_KEYS: [&str; 5] = [KEY_LOGGED_IN, KEY_TOKEN, KEY_USERNAME, KEY_EMAIL, KEY_USER_ID];

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to serialize store: {0}")]
    Serialize(#[from] ron::Error),
    #[error("failed to encode stored value: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PersistedStore {
    updated_utc: Option<String>,
    entries: BTreeMap<String, String>,
}

/// String key/value store kept in `{dir}/.portal_state.ron`. Every write is flushed to disk.
#[derive(Debug)]
pub struct LocalStore {
    file: StateFile,
    entries: BTreeMap<String, String>,
}

impl LocalStore {
    /// Loads the store, creating `dir` when missing. An unreadable or malformed file yields an
    /// empty store; an unusable directory is an error.
    pub fn open(dir: &Path) -> Result<Self, StoreError> {
        let file = StateFile::open(dir, STATE_FILENAME)?;
        let entries = match file.read() {
            Ok(Some(text)) => match ron::from_str::<PersistedStore>(&text) {
                Ok(stored) => {
                    portal_info!(
                        "Loaded {} stored keys from {:?}",
                        stored.entries.len(),
                        file.path()
                    );
                    stored.entries
                }
                Err(err) => {
                    portal_warn!("Failed to parse store at {:?}: {}", file.path(), err);
                    BTreeMap::new()
                }
            },
            Ok(None) => BTreeMap::new(),
            Err(err) => {
                portal_warn!("Failed to read store at {:?}: {}", file.path(), err);
                BTreeMap::new()
            }
        };
        Ok(Self { file, entries })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.into());
        self.save()
    }

    pub fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if self.entries.remove(key).is_some() {
            self.save()?;
        }
        Ok(())
    }

    pub fn is_logged_in(&self) -> bool {
        self.get(KEY_LOGGED_IN) == Some("true") && self.token().is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.get(KEY_TOKEN).filter(|token| !token.is_empty())
    }

    pub fn username(&self) -> Option<&str> {
        self.get(KEY_USERNAME)
    }

    pub fn user_email(&self) -> Option<&str> {
        self.get(KEY_EMAIL)
    }

    pub fn store_auth(&mut self, auth: &AuthData) -> Result<(), StoreError> {
        self.entries.insert(KEY_TOKEN.into(), auth.token.clone());
        self.entries.insert(KEY_LOGGED_IN.into(), "true".into());
        self.entries.insert(KEY_USERNAME.into(), auth.user.username.clone());
        self.entries.insert(KEY_EMAIL.into(), auth.user.email.clone());
        self.entries.insert(KEY_USER_ID.into(), auth.user.id.clone());
        self.save()
    }

    pub fn clear_auth(&mut self) -> Result<(), StoreError> {
        for key in AUTH_KEYS {
            self.entries.remove(key);
        }
        self.save()
    }

    /// The job picked from a listing, if one was stored and still parses.
    pub fn selected_job(&self) -> Option<Job> {
        let raw = self.get(KEY_SELECTED_JOB)?;
        match serde_json::from_str(raw) {
            Ok(job) => Some(job),
            Err(err) => {
                portal_warn!("Ignoring stored job that does not parse: {}", err);
                None
            }
        }
    }

    pub fn set_selected_job(&mut self, job: &Job) -> Result<(), StoreError> {
        let raw = serde_json::to_string(job)?;
        self.set(KEY_SELECTED_JOB, raw)
    }

    pub fn set_redirect_after_login(&mut self, page: Page) -> Result<(), StoreError> {
        self.set(KEY_REDIRECT, page.as_str())
    }

    /// Removes and returns the stored post-login page.
    pub fn take_redirect_after_login(&mut self) -> Result<Option<Page>, StoreError> {
        let page = self.get(KEY_REDIRECT).and_then(Page::parse);
        self.remove(KEY_REDIRECT)?;
        Ok(page)
    }

    fn save(&self) -> Result<(), StoreError> {
        let stored = PersistedStore {
            updated_utc: Some(Utc::now().to_rfc3339()),
            entries: self.entries.clone(),
        };
        let pretty = ron::ser::PrettyConfig::new();
        let content = ron::ser::to_string_pretty(&stored, pretty)?;
        self.file.replace(&content)?;
        portal_debug!("Saved {} stored keys to {:?}", self.entries.len(), self.file.path());
        Ok(())
    }
}
