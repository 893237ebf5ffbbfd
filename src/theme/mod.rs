// Theme module - theme keys, the shared theme bus and chrome colors
//
// The widget's own colors come from the palette store. The constants here
// color the surrounding terminal chrome (banner, status bar).

pub mod palette;
pub mod resolver;
pub mod system;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use ratatui::style::Color;

pub use palette::{HexColor, Palette, PaletteStore};
pub use resolver::ThemeResolver;
pub use system::{
    ColorFgBgPreference, FileThemeWatcher, PolledThemeWatcher, PreferenceSource,
    SystemThemeObserver,
};

/// Accent for borders and key hints
pub const SLATE_BLUE: Color = Color::Rgb(97, 114, 128);

/// Highlight for active toggles
pub const SIGNAL_GREEN: Color = Color::Rgb(25, 195, 125);

/// Neutral text
pub const MIST_WHITE: Color = Color::Rgb(201, 211, 221);

/// Quit hint
pub const ALERT_RED: Color = Color::Rgb(231, 0, 11);

/// Concrete palette key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Explicit theme choice broadcast to every widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ThemeOverride {
    /// Follow the system preference
    #[default]
    Auto,
    Light,
    Dark,
}

impl ThemeOverride {
    /// Value written to the document theme attribute (`None` clears it)
    pub fn attribute(self) -> Option<&'static str> {
        match self {
            ThemeOverride::Auto => None,
            ThemeOverride::Light => Some("light"),
            ThemeOverride::Dark => Some("dark"),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ThemeOverride::Auto => "auto",
            ThemeOverride::Light => "light",
            ThemeOverride::Dark => "dark",
        }
    }
}

#[derive(Debug, Default)]
struct ThemeSignals {
    /// Raw document-level theme attribute
    document_theme: Option<String>,
    /// Last known system dark-mode preference
    system_prefers_dark: bool,
}

/// Theme inputs shared between the app and every widget instance
///
/// Cloning yields another handle to the same signals. The app writes them;
/// widgets read them through their `ThemeResolver`.
#[derive(Debug, Clone, Default)]
pub struct ThemeBus {
    signals: Rc<RefCell<ThemeSignals>>,
}

impl ThemeBus {
    pub fn new(system_prefers_dark: bool) -> Self {
        Self {
            signals: Rc::new(RefCell::new(ThemeSignals {
                document_theme: None,
                system_prefers_dark,
            })),
        }
    }

    pub fn document_theme(&self) -> Option<String> {
        self.signals.borrow().document_theme.clone()
    }

    /// Set or clear the document theme attribute
    pub fn set_document_theme(&self, value: Option<&str>) {
        self.signals.borrow_mut().document_theme = value.map(str::to_string);
    }

    pub fn system_prefers_dark(&self) -> bool {
        self.signals.borrow().system_prefers_dark
    }

    /// Record the system preference, returning whether it flipped
    pub fn set_system_prefers_dark(&self, dark: bool) -> bool {
        let mut signals = self.signals.borrow_mut();
        let changed = signals.system_prefers_dark != dark;
        signals.system_prefers_dark = dark;
        changed
    }
}
