//! Persisted panel chrome state: the theme flag and per-section collapse.
//!
//! Persistence is best-effort by contract. Every read and write funnels
//! through helpers that swallow failures, so a broken storage layer (full
//! disk, denied access, corrupt file) degrades to in-memory defaults and
//! never reaches the inspector's functionality.

use anyhow::{Context as _, Result};
use log::warn;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

const THEME_KEY: &str = "loupe-theme";
const SECTION_KEY: &str = "loupe-section-";

/// A string key-value layer the host environment provides (browser local
/// storage, a dotfile, a test map).
pub trait Persistence {
    /// # Errors
    /// Returns an error when the underlying storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// # Errors
    /// Returns an error when the underlying storage cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory persistence for tests and ephemeral embeddings.
#[derive(Debug, Default)]
pub struct MemoryPersistence {
    map: HashMap<String, String>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Persistence for MemoryPersistence {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.map.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.map.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// File-backed persistence: one JSON object of string pairs.
#[derive(Debug)]
pub struct JsonFilePersistence {
    path: PathBuf,
}

impl JsonFilePersistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_map(&self) -> Result<HashMap<String, String>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("parsing {}", self.path.display()))
    }
}

impl Persistence for JsonFilePersistence {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_map()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut map = self.read_map().unwrap_or_default();
        map.insert(key.to_owned(), value.to_owned());
        let serialized = serde_json::to_string_pretty(&map)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("writing {}", self.path.display()))
    }
}

/// The two-valued theme flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    fn from_stored(value: &str) -> Option<Self> {
        match value {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

/// Panel chrome state with best-effort persistence behind it.
pub struct PanelState {
    persistence: Box<dyn Persistence>,
    theme: Theme,
    sections: HashMap<String, bool>,
}

impl PanelState {
    /// Load the persisted theme; failures fall back to the dark default.
    pub fn load(persistence: Box<dyn Persistence>) -> Self {
        let theme = match persistence.get(THEME_KEY) {
            Ok(Some(stored)) => Theme::from_stored(&stored).unwrap_or_default(),
            Ok(None) => Theme::default(),
            Err(error) => {
                warn!("theme read failed, using default: {error:#}");
                Theme::default()
            }
        };
        Self {
            persistence,
            theme,
            sections: HashMap::new(),
        }
    }

    #[inline]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Flip the theme and persist it best-effort.
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        if let Err(error) = self.persistence.set(THEME_KEY, self.theme.as_str()) {
            warn!("theme write failed, keeping in-memory value: {error:#}");
        }
        self.theme
    }

    /// Whether a collapsible section is open. Unknown sections default to
    /// open; the persisted flag wins when readable.
    pub fn section_open(&mut self, title: &str) -> bool {
        if let Some(cached) = self.sections.get(title) {
            return *cached;
        }
        let open = match self.persistence.get(&format!("{SECTION_KEY}{title}")) {
            Ok(Some(stored)) => stored == "1",
            Ok(None) => true,
            Err(error) => {
                warn!("section read failed, defaulting open: {error:#}");
                true
            }
        };
        self.sections.insert(title.to_owned(), open);
        open
    }

    /// Record a section's open/closed flag and persist it best-effort.
    pub fn set_section_open(&mut self, title: &str, open: bool) {
        self.sections.insert(title.to_owned(), open);
        let value = if open { "1" } else { "0" };
        if let Err(error) = self
            .persistence
            .set(&format!("{SECTION_KEY}{title}"), value)
        {
            warn!("section write failed, keeping in-memory value: {error:#}");
        }
    }
}
