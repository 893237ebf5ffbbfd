// Theme resolution
//
// An explicit document theme wins when it is exactly "light" or "dark".
// Anything else (absent, "auto", "Dark", ...) defers to the system
// preference.

use super::{Theme, ThemeBus};

/// Resolve a theme from raw inputs
pub fn resolve_theme(document_theme: Option<&str>, system_prefers_dark: bool) -> Theme {
    match document_theme {
        Some("light") => Theme::Light,
        Some("dark") => Theme::Dark,
        _ if system_prefers_dark => Theme::Dark,
        _ => Theme::Light,
    }
}

/// Per-instance view of the theme bus
#[derive(Debug, Clone)]
pub struct ThemeResolver {
    bus: ThemeBus,
}

impl ThemeResolver {
    pub fn new(bus: ThemeBus) -> Self {
        Self { bus }
    }

    /// Current theme. Pure read of the bus.
    pub fn resolve(&self) -> Theme {
        let document_theme = self.bus.document_theme();
        resolve_theme(document_theme.as_deref(), self.bus.system_prefers_dark())
    }
}
