// Widget engine
//
// One `WidgetInstance` per eye icon on screen. It owns the mode, the live
// color and eye geometry, and the three time sources that animate them
// (color cycler, blink loop, pointer tracker). The renderer only ever sees
// a `WidgetSnapshot`.

pub mod blink;
pub mod cycle;
pub mod registry;
pub mod tracker;

use std::fmt;
use std::time::Instant;

use rand::rngs::StdRng;
use tracing::debug;

use crate::app::config::RemyConfig;
use crate::theme::{HexColor, Theme, ThemeBus, ThemeResolver};

pub use blink::BlinkAnimator;
pub use cycle::ColorCycler;
pub use registry::InstanceRegistry;
pub use tracker::{EyePair, Point, PointerTracker};

// Icon geometry in its 20x20 view box
pub const VIEW_BOX: f64 = 20.0;
pub const BORDER_CENTER: Point = Point::new(10.0, 10.0);
pub const BORDER_RADIUS: f64 = 8.0;
pub const BORDER_STROKE: f64 = 2.0;
pub const LEFT_EYE_BASE: Point = Point::new(7.0, 7.5);
pub const RIGHT_EYE_BASE: Point = Point::new(11.0, 7.5);
pub const EYE_WIDTH: f64 = 2.0;
pub const EYE_CORNER_RADIUS: f64 = 1.0;

/// Widget behavior mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Track the pointer and cycle colors (initial)
    #[default]
    Follow,
    /// Same engine behavior as follow, marked for styling
    Thinking,
    /// No tracking, no cycling, dimmed color
    Idle,
}

impl Mode {
    /// Map a mode name. Unknown names behave as follow.
    pub fn from_name(name: &str) -> Self {
        match name {
            "thinking" => Mode::Thinking,
            "idle" => Mode::Idle,
            _ => Mode::Follow,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Follow => "follow",
            Mode::Thinking => "thinking",
            Mode::Idle => "idle",
        }
    }

    /// Styling marker shown for this mode
    pub fn marker(self) -> Option<ModeMarker> {
        match self {
            Mode::Follow => None,
            Mode::Thinking => Some(ModeMarker::Thinking),
            Mode::Idle => Some(ModeMarker::Idle),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mode marker exposed for external styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeMarker {
    Thinking,
    Idle,
}

impl ModeMarker {
    pub fn class_name(self) -> &'static str {
        match self {
            ModeMarker::Thinking => "thinking",
            ModeMarker::Idle => "idle",
        }
    }
}

/// One eye as drawn, in view-box units (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EyeRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub radius: f64,
}

/// Everything a renderer needs to draw one widget
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetSnapshot {
    pub id: usize,
    pub mode: Mode,
    pub marker: Option<ModeMarker>,
    pub theme: Theme,
    /// Shared by the border and both eyes
    pub color: HexColor,
    pub left: EyeRect,
    pub right: EyeRect,
}

/// Input delivered to a widget
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WidgetEvent {
    /// Frame clock tick
    Frame(Instant),
    /// Pointer moved to this screen position (pixels)
    PointerMoved(Point),
    SetMode(Mode),
    ThemeChanged,
    /// Blink once, now
    Blink(Instant),
}

pub struct WidgetInstance {
    id: usize,
    config: RemyConfig,
    resolver: ThemeResolver,
    mode: Mode,
    theme: Theme,
    color: HexColor,
    cycler: ColorCycler,
    blink: BlinkAnimator,
    tracker: PointerTracker,
    eyes: EyePair,
    /// Visual center on screen in pixels, known once rendered
    center: Option<Point>,
}

impl WidgetInstance {
    /// Build a widget in follow mode with the current theme's base color
    pub fn new(id: usize, config: RemyConfig, bus: ThemeBus, rng: StdRng, now: Instant) -> Self {
        let resolver = ThemeResolver::new(bus);
        let theme = resolver.resolve();
        let color = config.palette.palette_for(theme).follow_color;

        Self {
            id,
            cycler: ColorCycler::new(config.cycle_interval(), now),
            blink: BlinkAnimator::new(config.eye_height, rng, now),
            tracker: PointerTracker::new(&config),
            eyes: EyePair::new(LEFT_EYE_BASE, RIGHT_EYE_BASE),
            config,
            resolver,
            mode: Mode::Follow,
            theme,
            color,
            center: None,
        }
    }

    #[allow(dead_code)]
    pub fn id(&self) -> usize {
        self.id
    }

    #[allow(dead_code)]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn color(&self) -> HexColor {
        self.color
    }

    #[allow(dead_code)]
    pub fn color_index(&self) -> usize {
        self.cycler.index()
    }

    #[allow(dead_code)]
    pub fn eyes(&self) -> &EyePair {
        &self.eyes
    }

    /// Single entry point for every input; one event is handled at a time
    pub fn dispatch(&mut self, event: WidgetEvent) {
        match event {
            WidgetEvent::Frame(now) => self.on_frame(now),
            WidgetEvent::PointerMoved(pointer) => self.on_pointer_move(pointer),
            WidgetEvent::SetMode(mode) => self.set_mode(mode),
            WidgetEvent::ThemeChanged => self.handle_theme_change(),
            WidgetEvent::Blink(now) => self.blink.blink_now(now),
        }
    }

    /// Switch mode and re-apply the base color for it
    pub fn set_mode(&mut self, mode: Mode) {
        if mode != self.mode {
            debug!(widget = self.id, from = %self.mode, to = %mode, "Mode change");
        }
        self.mode = mode;
        self.apply_base_color();
    }

    /// Re-resolve the theme and re-apply the base color
    pub fn handle_theme_change(&mut self) {
        let theme = self.resolver.resolve();
        if theme != self.theme {
            debug!(widget = self.id, from = %self.theme, to = %theme, "Theme change");
        }
        self.theme = theme;
        self.apply_base_color();
    }

    /// Record where the widget's visual center is on screen
    pub fn place(&mut self, center: Point) {
        self.center = Some(center);
    }

    pub fn snapshot(&self) -> WidgetSnapshot {
        let height = self.blink.height();
        let y_offset = self.blink.y_offset();
        let rect = |pos: Point| EyeRect {
            x: pos.x,
            y: pos.y + y_offset,
            width: EYE_WIDTH,
            height,
            radius: EYE_CORNER_RADIUS,
        };

        WidgetSnapshot {
            id: self.id,
            mode: self.mode,
            marker: self.mode.marker(),
            theme: self.theme,
            color: self.color,
            left: rect(self.eyes.left.pos),
            right: rect(self.eyes.right.pos),
        }
    }

    fn on_frame(&mut self, now: Instant) {
        let colors = &self.config.palette.palette_for(self.theme).cycle_colors;
        if let Some(color) = self.cycler.poll(now, self.mode, colors) {
            self.color = color;
        }

        self.blink.advance(now);
        self.tracker.on_frame(&mut self.eyes, self.mode);
    }

    fn on_pointer_move(&mut self, pointer: Point) {
        self.tracker
            .on_pointer_move(&mut self.eyes, self.mode, pointer, self.center);
    }

    fn apply_base_color(&mut self) {
        let palette = self.config.palette.palette_for(self.theme);
        self.color = match self.mode {
            Mode::Idle => palette.idle_color,
            Mode::Follow | Mode::Thinking => palette.follow_color,
        };
    }
}
