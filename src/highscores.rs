//! High score persistence
//!
//! A single best score stored as a decimal integer string.

use crate::error::Error;
use crate::platform::KeyValueStore;

/// Best floored score across sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighScore(pub u32);

impl HighScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "hero_flight_high_score";

    /// Parse the stored value; anything unparsable counts as no record
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        trimmed
            .parse::<u32>()
            .or_else(|_| trimmed.parse::<f64>().map(|v| v.max(0.0).floor() as u32))
            .map(Self)
            .unwrap_or_default()
    }

    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Some(raw) => {
                let score = Self::parse(&raw);
                log::info!("Loaded high score {}", score.0);
                score
            }
            None => {
                log::info!("No high score found, starting fresh");
                Self::default()
            }
        }
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<(), Error> {
        store.set(Self::STORAGE_KEY, &self.0.to_string())?;
        log::info!("High score saved ({})", self.0);
        Ok(())
    }

    /// Whether `score` should replace this record
    pub fn beaten_by(&self, score: u32) -> bool {
        score > self.0
    }
}
