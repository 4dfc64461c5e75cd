//! Font enumeration behind a lazy, process-wide cache.
//!
//! Enumerating system fonts is slow and the answer cannot change while the
//! process lives, so the merged list is computed once on first use and held
//! for the process's duration. The enumeration itself sits behind
//! [`FontSource`] so tests can mock it and embedders can wire whatever the
//! host platform offers; the web-safe fallback list is always merged in.

use once_cell::sync::OnceCell;

/// Families that render everywhere; the floor of every merged list.
pub const WEB_SAFE_FONTS: [&str; 27] = [
    "Arial",
    "Arial Black",
    "Brush Script MT",
    "Cambria",
    "Comic Sans MS",
    "Consolas",
    "Courier New",
    "Garamond",
    "Georgia",
    "Helvetica",
    "Impact",
    "Inter",
    "Lucida Console",
    "Monaco",
    "Palatino Linotype",
    "Roboto",
    "Segoe UI",
    "SF Pro Display",
    "Tahoma",
    "Times New Roman",
    "Trebuchet MS",
    "Verdana",
    "system-ui",
    "sans-serif",
    "serif",
    "monospace",
    "cursive",
];

/// Where font families come from in a given embedding.
pub trait FontSource: Send + Sync {
    /// Families installed on the host system.
    fn system_fonts(&self) -> Vec<String>;

    /// Families the current document loaded (webfonts).
    fn document_fonts(&self) -> Vec<String>;
}

/// A source with nothing beyond the web-safe floor.
#[derive(Debug, Default)]
pub struct NoExtraFonts;

impl FontSource for NoExtraFonts {
    fn system_fonts(&self) -> Vec<String> {
        Vec::new()
    }

    fn document_fonts(&self) -> Vec<String> {
        Vec::new()
    }
}

/// The lazy-once font list service.
pub struct FontService {
    source: Box<dyn FontSource>,
    cache: OnceCell<Vec<String>>,
}

impl FontService {
    pub fn new(source: Box<dyn FontSource>) -> Self {
        Self {
            source,
            cache: OnceCell::new(),
        }
    }

    /// The merged, deduplicated, case-insensitively sorted family list.
    /// The source is consulted exactly once; later calls return the cache.
    pub fn available(&self) -> &[String] {
        self.cache.get_or_init(|| {
            let mut families: Vec<String> = WEB_SAFE_FONTS
                .iter()
                .map(|family| (*family).to_owned())
                .chain(self.source.document_fonts())
                .chain(self.source.system_fonts())
                .collect();
            families.sort_by_key(|family| family.to_lowercase());
            families.dedup();
            families
        })
    }
}
