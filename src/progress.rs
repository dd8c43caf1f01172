use std::collections::BTreeMap;

use rusqlite::Result;

use crate::storage::KeyValueStore;

pub const PROGRESS_KEY: &str = "aksara-progress";

/// character -> best score
pub type ScriptProgress = BTreeMap<String, u8>;
/// script id -> per-character best scores
pub type ProgressTable = BTreeMap<String, ScriptProgress>;

/// Best score per (script, character), persisted as one JSON document.
///
/// Every call reads the stored table, so two stores over the same
/// backing storage always agree. Scores never decrease.
#[derive(Debug)]
pub struct ProgressStore<K: KeyValueStore> {
    store: K,
}

impl<K: KeyValueStore> ProgressStore<K> {
    pub fn new(store: K) -> Self {
        Self { store }
    }

    /// Merges `score` as `max(stored, score)` and returns the stored best.
    pub fn record_score(&self, script_id: &str, character: &str, score: u8) -> Result<u8> {
        let mut table = self.load()?;
        let best = table
            .entry(script_id.to_string())
            .or_default()
            .entry(character.to_string())
            .or_insert(0);
        *best = (*best).max(score.min(100));
        let best = *best;

        let data = serde_json::to_string(&table)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
        self.store.set(PROGRESS_KEY, &data)?;
        log::info!("progress {script_id}/{character}: scored {score}, best {best}");
        Ok(best)
    }

    pub fn get_score(&self, script_id: &str, character: &str) -> Result<u8> {
        Ok(self
            .load()?
            .get(script_id)
            .and_then(|chars| chars.get(character))
            .copied()
            .unwrap_or(0))
    }

    pub fn script_progress(&self, script_id: &str) -> Result<ScriptProgress> {
        Ok(self.load()?.remove(script_id).unwrap_or_default())
    }

    pub fn table(&self) -> Result<ProgressTable> {
        self.load()
    }

    fn load(&self) -> Result<ProgressTable> {
        let Some(raw) = self.store.get(PROGRESS_KEY)? else {
            return Ok(ProgressTable::new());
        };

        match serde_json::from_str::<ProgressTable>(&raw) {
            Ok(table) => Ok(table),
            Err(e) => {
                log::warn!("discarding unreadable progress table: {e}");
                Ok(ProgressTable::new())
            }
        }
    }
}
