//! Static name-to-style lookup, built once at process start.

use std::collections::HashMap;

use histo_common::{HistoError, HistoResult};

use crate::styles::{
    ElegantCurves, Geometric, Minimal, NeonGlow, Original, RetroFilm, Style, Tron, Watercolor,
};

/// The eight registered style names, in registration order.
pub const STYLE_NAMES: [&str; 8] = [
    "elegant_curves",
    "neon_glow",
    "watercolor",
    "geometric",
    "minimal",
    "retro_film",
    "original",
    "tron",
];

/// Read-only style table. The only state shared across requests; freeze it
/// once at startup and hand out references.
pub struct StyleRegistry {
    styles: HashMap<&'static str, Box<dyn Style>>,
}

impl StyleRegistry {
    /// Build the full table. No runtime registration exists.
    pub fn new() -> Self {
        let mut styles: HashMap<&'static str, Box<dyn Style>> = HashMap::new();
        for style in [
            Box::new(ElegantCurves) as Box<dyn Style>,
            Box::new(NeonGlow),
            Box::new(Watercolor),
            Box::new(Geometric),
            Box::new(Minimal),
            Box::new(RetroFilm),
            Box::new(Original),
            Box::new(Tron),
        ] {
            styles.insert(style.name(), style);
        }
        debug_assert_eq!(styles.len(), STYLE_NAMES.len());
        Self { styles }
    }

    /// Exact, case-sensitive lookup. Never substitutes a default.
    pub fn resolve(&self, name: &str) -> HistoResult<&dyn Style> {
        self.styles
            .get(name)
            .map(|s| s.as_ref())
            .ok_or_else(|| HistoError::UnknownStyle(name.to_string()))
    }

    /// Registered names, sorted for stable listings.
    pub fn style_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.styles.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self::new()
    }
}
