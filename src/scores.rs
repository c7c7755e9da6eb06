use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum number of entries kept when recording new runs
pub const MAX_ENTRIES: usize = 10;

const DATE_FORMAT: &str = "%m-%d-%y";

#[derive(Error, Debug)]
pub enum ScoreError {
    #[error("score file {path:?} is corrupt")]
    DataCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not encode scores for {path:?}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not access score file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// One historical result. Stored on disk as `[score, "MM-DD-YY"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(u32, String)", into = "(u32, String)")]
pub struct ScoreEntry {
    pub score: u32,
    pub date: String,
}

impl ScoreEntry {
    pub fn new(score: u32, date: impl Into<String>) -> Self {
        ScoreEntry {
            score,
            date: date.into(),
        }
    }
}

impl From<(u32, String)> for ScoreEntry {
    fn from((score, date): (u32, String)) -> Self {
        ScoreEntry { score, date }
    }
}

impl From<ScoreEntry> for (u32, String) {
    fn from(entry: ScoreEntry) -> Self {
        (entry.score, entry.date)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScoreStore {
    entries: Vec<ScoreEntry>,
    // Set when the entries are the stand-in table, not recorded runs
    placeholder: bool,
}

/// Today's local date in the format used by the score file
pub fn today() -> String {
    chrono::Local::now().format(DATE_FORMAT).to_string()
}

impl ScoreStore {
    /// Read the score file. A missing file yields the default table; a file
    /// that exists but does not decode is reported as corrupt.
    pub fn load(path: &Path) -> Result<Self, ScoreError> {
        let data = match fs::read(path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No score file at {:?}, using defaults", path);
                return Ok(Self::defaults(&today()));
            }
            Err(source) => {
                return Err(ScoreError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let mut entries: Vec<ScoreEntry> =
            serde_json::from_slice(&data).map_err(|source| ScoreError::DataCorrupt {
                path: path.to_path_buf(),
                source,
            })?;
        // Stable: equal scores keep file order
        entries.sort_by(|a, b| b.score.cmp(&a.score));

        log::info!("Loaded {} scores from {:?}", entries.len(), path);
        Ok(ScoreStore {
            entries,
            placeholder: false,
        })
    }

    /// Table used when no score file exists yet. Left in this order on purpose:
    /// only loaded files are sorted.
    pub fn defaults(date: &str) -> Self {
        ScoreStore {
            entries: vec![
                ScoreEntry::new(100, date),
                ScoreEntry::new(20, date),
                ScoreEntry::new(30, date),
            ],
            placeholder: true,
        }
    }

    /// True when no score file existed and the default table is shown.
    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }

    /// The table a new run should be recorded into: the loaded entries, or
    /// an empty table when only the defaults are on display.
    pub fn for_recording(&self) -> Self {
        if self.is_placeholder() {
            Self::default()
        } else {
            self.clone()
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ScoreError> {
        let json = serde_json::to_string_pretty(&self.entries).map_err(|source| {
            ScoreError::Encode {
                path: path.to_path_buf(),
                source,
            }
        })?;
        fs::write(path, json).map_err(|source| ScoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Saved {} scores to {:?}", self.entries.len(), path);
        Ok(())
    }

    /// Insert a result ahead of the first lower score. Returns the 1-based
    /// rank, or None if the score is zero or did not make the table.
    pub fn record(&mut self, entry: ScoreEntry) -> Option<usize> {
        if entry.score == 0 {
            return None;
        }
        let pos = self
            .entries
            .iter()
            .position(|e| entry.score > e.score)
            .unwrap_or(self.entries.len());
        if pos >= MAX_ENTRIES {
            return None;
        }
        self.entries.insert(pos, entry);
        self.entries.truncate(MAX_ENTRIES);
        Some(pos + 1)
    }

    pub fn best_score(&self) -> u32 {
        self.entries.first().map(|e| e.score).unwrap_or(0)
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
