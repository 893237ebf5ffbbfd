// Application state management
//
// This module contains the main AppState struct: the widget registry, the
// system theme watcher and the pointer bookkeeping that turns terminal
// cells into widget coordinates.

pub mod config;
pub mod event;

pub use config::RemyConfig;

use config::MAX_INSTANCES;
use crate::theme::{
    ColorFgBgPreference, PolledThemeWatcher, SystemThemeObserver, ThemeBus, ThemeOverride,
};
use crate::widget::{InstanceRegistry, Mode, Point, WidgetEvent};
use std::time::Instant;
use tracing::info;

/// Startup options gathered from the command line and config file
pub struct AppSettings {
    pub config: RemyConfig,
    pub instances: usize,
    pub theme_override: ThemeOverride,
    pub mode: Mode,
    pub system_theme: Box<dyn SystemThemeObserver>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            config: RemyConfig::default(),
            instances: 1,
            theme_override: ThemeOverride::Auto,
            mode: Mode::Follow,
            system_theme: Box::new(PolledThemeWatcher::new(
                Box::new(ColorFgBgPreference),
                Instant::now(),
            )),
        }
    }
}

/// Main application state
pub struct AppState {
    /// Whether the application is running
    pub running: bool,

    /// Every widget on screen, plus the theme bus they share
    pub registry: InstanceRegistry,

    /// Last theme override applied through the keyboard or CLI
    pub theme_override: ThemeOverride,

    /// Last mode requested for all widgets
    pub mode: Mode,

    /// Last pointer position in terminal cells
    pub pointer: Option<(u16, u16)>,

    /// Reports system dark-mode preference changes
    system_theme: Box<dyn SystemThemeObserver>,

    /// Terminal cell size in pixels
    cell_width_px: f64,
    cell_height_px: f64,
}

impl AppState {
    /// Create the app with `settings.instances` widgets
    pub fn new(settings: AppSettings, now: Instant) -> Self {
        let system_theme = settings.system_theme;
        let mut registry = InstanceRegistry::new(ThemeBus::new(system_theme.prefers_dark()));

        let count = settings.instances.clamp(1, MAX_INSTANCES);
        for _ in 0..count {
            registry.spawn(settings.config.clone(), now);
        }
        if settings.theme_override != ThemeOverride::Auto {
            registry.broadcast_theme_override(settings.theme_override);
        }
        if settings.mode != Mode::Follow {
            registry.dispatch_all(WidgetEvent::SetMode(settings.mode));
        }

        info!(
            instances = count,
            theme = settings.theme_override.label(),
            mode = %settings.mode,
            "remy started"
        );

        Self {
            running: true,
            registry,
            theme_override: settings.theme_override,
            mode: settings.mode,
            pointer: None,
            system_theme,
            cell_width_px: settings.config.cell_width_px,
            cell_height_px: settings.config.cell_height_px,
        }
    }

    /// Advance timers and animations to `now` (called once per frame)
    pub fn on_tick(&mut self, now: Instant) {
        if let Some(dark) = self.system_theme.poll(now) {
            self.registry.system_preference_changed(dark);
        }
        self.registry.dispatch_all(WidgetEvent::Frame(now));
    }

    /// Put every widget in `mode`
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.registry.dispatch_all(WidgetEvent::SetMode(mode));
    }

    pub fn apply_theme_override(&mut self, theme_override: ThemeOverride) {
        self.theme_override = theme_override;
        self.registry.broadcast_theme_override(theme_override);
    }

    /// Flip the system preference by hand, as if the desktop had changed it
    pub fn toggle_system_preference(&mut self) {
        let dark = !self.registry.bus().system_prefers_dark();
        self.registry.system_preference_changed(dark);
    }

    pub fn system_prefers_dark(&self) -> bool {
        self.registry.bus().system_prefers_dark()
    }

    /// Blink every widget right away
    pub fn blink_all(&mut self, now: Instant) {
        self.registry.dispatch_all(WidgetEvent::Blink(now));
    }

    /// Forward a pointer move (terminal cell) to every widget
    pub fn pointer_moved(&mut self, column: u16, row: u16) {
        self.pointer = Some((column, row));
        let pointer = self.cell_to_px(f64::from(column) + 0.5, f64::from(row) + 0.5);
        self.registry.dispatch_all(WidgetEvent::PointerMoved(pointer));
    }

    /// Tell widget `id` where its visual center is, in (fractional) cells
    pub fn place_widget(&mut self, id: usize, column: f64, row: f64) {
        let center = self.cell_to_px(column, row);
        if let Some(widget) = self.registry.get_mut(id) {
            widget.place(center);
        }
    }

    fn cell_to_px(&self, column: f64, row: f64) -> Point {
        Point::new(column * self.cell_width_px, row * self.cell_height_px)
    }
}
