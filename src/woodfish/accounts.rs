//! Local accounts for the wooden fish clicker
//!
//! Everything lives in the browser: a `users` map keyed by name and the
//! name of whoever is logged in. Logging in with an unknown name registers it.

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, de};

use crate::consts::KNOCKS_PER_LEVEL;
use crate::error::{AccountError, StoreError};
use crate::platform::{self, KeyValueStore};

/// LocalStorage key for the user map
pub const USERS_KEY: &str = "users";
/// LocalStorage key for the logged-in name
pub const CURRENT_USER_KEY: &str = "current_user";
/// Where an undecodable user map is kept before it gets overwritten
pub const USERS_BACKUP_KEY: &str = "users_unreadable";
/// Prefix for generated guest names ("visitor")
pub const GUEST_PREFIX: &str = "游客";

/// A registered player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub name: String,
    pub total_count: u64,
    pub level: u64,
    /// Unix timestamp (ms) of the last login
    #[serde(deserialize_with = "timestamp_ms")]
    pub last_login: f64,
}

/// Epoch milliseconds, or the ISO-8601 text older pages stored
fn timestamp_ms<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Stamp {
        Millis(f64),
        Iso(String),
    }

    match Stamp::deserialize(deserializer)? {
        Stamp::Millis(ms) => Ok(ms),
        Stamp::Iso(text) => platform::parse_timestamp(&text)
            .ok_or_else(|| de::Error::custom(format!("invalid timestamp `{}`", text))),
    }
}

impl User {
    pub fn new(name: impl Into<String>, now: f64) -> Self {
        Self {
            name: name.into(),
            total_count: 0,
            level: 1,
            last_login: now,
        }
    }

    /// One knock on the fish
    pub fn knock(&mut self) {
        self.total_count += 1;
        self.level = level_for(self.total_count);
    }
}

/// Level reached after `count` knocks
#[inline]
pub fn level_for(count: u64) -> u64 {
    count / KNOCKS_PER_LEVEL + 1
}

/// All accounts plus the current session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountBook {
    users: BTreeMap<String, User>,
    current: Option<String>,
    /// Raw user map that failed to decode, backed up on save
    unreadable: Option<String>,
}

impl AccountBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    pub fn user(&self, name: &str) -> Option<&User> {
        self.users.get(name)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Logged-in user, if the stored name still resolves
    pub fn current_user(&self) -> Option<&User> {
        self.current.as_deref().and_then(|name| self.users.get(name))
    }

    /// Log in, registering unknown names
    pub fn login(&mut self, name: &str, now: f64) -> Result<&User, AccountError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AccountError::EmptyName);
        }
        Ok(self.enter(name, now))
    }

    /// Log in as a random guest
    pub fn guest_login<R: Rng>(&mut self, rng: &mut R, now: f64) -> &User {
        let name = format!("{}{}", GUEST_PREFIX, rng.random_range(0..10_000u32));
        self.enter(&name, now)
    }

    fn enter(&mut self, name: &str, now: f64) -> &User {
        let user = self
            .users
            .entry(name.to_string())
            .and_modify(|u| u.last_login = now)
            .or_insert_with(|| {
                log::info!("Registered new user {}", name);
                User::new(name, now)
            });
        self.current = Some(user.name.clone());
        user
    }

    pub fn logout(&mut self) {
        if let Some(name) = self.current.take() {
            log::info!("{} logged out", name);
        }
    }

    /// Knock once for the current user; None when nobody is logged in
    pub fn knock(&mut self) -> Option<&User> {
        let name = self.current.as_deref()?;
        let user = self.users.get_mut(name)?;
        user.knock();
        Some(user)
    }

    /// Load accounts, starting empty when the stored map cannot be read
    pub fn load<S: KeyValueStore>(store: &S) -> Self {
        let (users, unreadable): (BTreeMap<String, User>, Option<String>) = match store.get(USERS_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(users) => (users, None),
                Err(e) => {
                    log::warn!("Unreadable user map, starting empty: {}", e);
                    (BTreeMap::new(), Some(json))
                }
            },
            Ok(None) => (BTreeMap::new(), None),
            Err(e) => {
                log::warn!("Could not read user map: {}", e);
                (BTreeMap::new(), None)
            }
        };
        let current = store.get(CURRENT_USER_KEY).ok().flatten();
        log::info!("Loaded {} users", users.len());
        Self {
            users,
            current,
            unreadable,
        }
    }

    /// Persist the user map and session
    pub fn save<S: KeyValueStore>(&self, store: &mut S) -> Result<(), StoreError> {
        if let Some(raw) = &self.unreadable {
            store.set(USERS_BACKUP_KEY, raw)?;
        }
        store.save_json(USERS_KEY, &self.users)?;
        match &self.current {
            Some(name) => store.set(CURRENT_USER_KEY, name),
            None => store.remove(CURRENT_USER_KEY),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStore;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_blank_name_rejected() {
        let mut book = AccountBook::new();
        assert_eq!(book.login("   ", 0.0).err(), Some(AccountError::EmptyName));
        assert!(book.is_empty());
        assert!(book.current_user().is_none());
    }

    #[test]
    fn test_register_then_login() {
        let mut book = AccountBook::new();
        book.login("ada", 10.0).unwrap();
        book.knock();
        book.logout();
        assert!(book.current_user().is_none());

        let user = book.login(" ada ", 20.0).unwrap();
        assert_eq!(user.total_count, 1);
        assert_eq!(user.last_login, 20.0);
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn test_knock_levels_every_ten() {
        let mut book = AccountBook::new();
        book.login("lin", 0.0).unwrap();
        for _ in 0..9 {
            book.knock();
        }
        assert_eq!(book.current_user().map(|u| u.level), Some(1));

        let user = book.knock().unwrap();
        assert_eq!(user.total_count, 10);
        assert_eq!(user.level, 2);
        assert_eq!(level_for(25), 3);
    }

    #[test]
    fn test_knock_without_login_is_noop() {
        let mut book = AccountBook::new();
        assert!(book.knock().is_none());
    }

    #[test]
    fn test_guest_login() {
        let mut book = AccountBook::new();
        let mut rng = Pcg32::seed_from_u64(5);
        let name = book.guest_login(&mut rng, 0.0).name.clone();
        assert!(name.starts_with(GUEST_PREFIX));
        let digits: u32 = name.trim_start_matches(GUEST_PREFIX).parse().unwrap();
        assert!(digits < 10_000);
        assert_eq!(book.current_user().map(|u| u.name.as_str()), Some(name.as_str()));
    }

    #[test]
    fn test_persist_roundtrip() {
        let mut store = MemoryStore::new();
        let mut book = AccountBook::new();
        book.login("mei", 1.0).unwrap();
        book.knock();
        book.save(&mut store).unwrap();

        let loaded = AccountBook::load(&store);
        assert_eq!(loaded, book);

        book.logout();
        book.save(&mut store).unwrap();
        assert!(store.get(CURRENT_USER_KEY).unwrap().is_none());
    }

    #[test]
    fn test_stored_format_is_camel_case() {
        let json = serde_json::to_string(&User::new("kai", 3.0)).unwrap();
        assert!(json.contains("\"totalCount\":0"));
        assert!(json.contains("\"lastLogin\":3.0"));
    }

    #[test]
    fn test_reads_iso_last_login() {
        let mut store = MemoryStore::new();
        store
            .set(
                USERS_KEY,
                r#"{"ada":{"name":"ada","totalCount":12,"level":2,"lastLogin":"2023-11-14T22:13:20.123Z"}}"#,
            )
            .unwrap();

        let book = AccountBook::load(&store);
        let user = book.user("ada").unwrap();
        assert_eq!(user.total_count, 12);
        assert_eq!(user.last_login, 1_700_000_000_123.0);
    }

    #[test]
    fn test_unreadable_map_is_backed_up() {
        let mut store = MemoryStore::new();
        store.set(USERS_KEY, r#"{"ada":{"name":"ada"}}"#).unwrap();

        let mut book = AccountBook::load(&store);
        assert!(book.is_empty());
        book.login("lin", 1.0).unwrap();
        book.save(&mut store).unwrap();

        assert_eq!(
            store.get(USERS_BACKUP_KEY).unwrap().as_deref(),
            Some(r#"{"ada":{"name":"ada"}}"#)
        );
        assert_eq!(AccountBook::load(&store).len(), 1);
    }
}
