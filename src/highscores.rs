//! Runner best score
//!
//! A single number under `dinoHighScore`. Older pages wrote it with a plain
//! `setItem`, so the stored text is just the digits, which is also valid JSON.

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::platform::KeyValueStore;

/// LocalStorage key
pub const STORAGE_KEY: &str = "dinoHighScore";

/// Best runner score seen on this device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighScore {
    best: u64,
}

impl HighScore {
    pub fn new(best: u64) -> Self {
        Self { best }
    }

    #[inline]
    pub fn best(&self) -> u64 {
        self.best
    }

    /// Offer a finished run; returns true when it sets a new best
    pub fn submit(&mut self, score: u64) -> bool {
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }

    /// Load the best score, starting from 0 on missing or corrupt data
    pub fn load<S: KeyValueStore>(store: &S) -> Self {
        match store.load_json::<HighScore>(STORAGE_KEY) {
            Ok(Some(score)) => {
                log::info!("Loaded high score {}", score.best);
                score
            }
            Ok(None) => Self::default(),
            Err(e) => {
                log::warn!("Discarding unreadable high score: {}", e);
                Self::default()
            }
        }
    }

    pub fn save<S: KeyValueStore>(&self, store: &mut S) -> Result<(), StoreError> {
        store.save_json(STORAGE_KEY, self)?;
        log::info!("High score saved ({})", self.best);
        Ok(())
    }
}
