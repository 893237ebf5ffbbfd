// System dark-mode preference
//
// Two observers report the desktop color scheme to the app:
// - `FileThemeWatcher` watches a file holding `dark` or `light` with
//   `notify` and forwards each new reading over a channel.
// - `PolledThemeWatcher` re-reads a source with no change event (the
//   `COLORFGBG` variable) on a fixed interval.
// Either way a flip is reported to the registry, which fans the change out to
// every widget.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use thiserror::Error;
use tracing::{debug, warn};

use crate::app::config::SYSTEM_THEME_POLL_MS;
use crate::timer::IntervalTimer;

/// Reports the system dark-mode preference and its changes
pub trait SystemThemeObserver {
    /// Last known preference
    fn prefers_dark(&self) -> bool;

    /// New preference when it flipped since the last call
    fn poll(&mut self, now: Instant) -> Option<bool>;
}

/// Parse the content of a preference file: `dark` or `light`, any case
pub fn parse_preference(content: &str) -> Option<bool> {
    match content.trim().to_ascii_lowercase().as_str() {
        "dark" => Some(true),
        "light" => Some(false),
        _ => None,
    }
}

// ============================================================================
// File watcher
// ============================================================================

#[derive(Debug, Error)]
pub enum ThemeWatchError {
    #[error("system theme path {} has no file name", .0.display())]
    NoFileName(PathBuf),

    #[error("cannot watch system theme file: {0}")]
    Notify(#[from] notify::Error),
}

fn read_preference(path: &Path) -> Option<bool> {
    match fs::read_to_string(path) {
        Ok(content) => parse_preference(&content),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Cannot read system theme file");
            None
        }
    }
}

/// Watch the *parent directory* of `path` and send each readable preference
///
/// Editors often save by writing a temp file and renaming it over the
/// target, which a watch on the file itself would miss.
fn spawn_watcher(path: &Path, tx: Sender<bool>) -> Result<RecommendedWatcher, ThemeWatchError> {
    let target: OsString = path
        .file_name()
        .ok_or_else(|| ThemeWatchError::NoFileName(path.to_path_buf()))?
        .to_os_string();

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let watched = path.to_path_buf();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
        Ok(event) => {
            if !matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
                return;
            }

            let affects_target = event
                .paths
                .iter()
                .any(|p| p.file_name().is_some_and(|f| f == target));
            if !affects_target {
                return;
            }

            // A half-written file reads as neither value; skip it
            if let Some(dark) = read_preference(&watched) {
                // Receiver gone means the app is shutting down
                let _ = tx.send(dark);
            }
        }
        Err(e) => warn!(error = %e, "System theme watch error"),
    })?;

    watcher.watch(&parent, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}

/// Follows a preference file through filesystem events
pub struct FileThemeWatcher {
    _watcher: RecommendedWatcher,
    path: PathBuf,
    readings: Receiver<bool>,
    last: bool,
}

impl FileThemeWatcher {
    /// Start watching `path`. A missing or unreadable file counts as light
    /// until a valid reading arrives.
    pub fn start(path: impl Into<PathBuf>) -> Result<Self, ThemeWatchError> {
        let path = path.into();
        let (tx, readings) = mpsc::channel();
        let watcher = spawn_watcher(&path, tx)?;
        let last = read_preference(&path).unwrap_or(false);
        debug!(path = %path.display(), dark = last, "System theme file watcher started");

        Ok(Self {
            _watcher: watcher,
            path,
            readings,
            last,
        })
    }
}

impl SystemThemeObserver for FileThemeWatcher {
    fn prefers_dark(&self) -> bool {
        self.last
    }

    fn poll(&mut self, _now: Instant) -> Option<bool> {
        // Several saves between frames collapse into the latest reading
        let reading = self.readings.try_iter().last()?;
        if reading == self.last {
            return None;
        }

        debug!(path = %self.path.display(), dark = reading, "System theme preference changed");
        self.last = reading;
        Some(reading)
    }
}

// ============================================================================
// Polled sources
// ============================================================================

/// Something that can report whether the system prefers a dark scheme
///
/// `None` means "unknown right now"; the watcher keeps the last reading.
pub trait PreferenceSource {
    fn prefers_dark(&mut self) -> Option<bool>;

    fn describe(&self) -> String;
}

/// Reads the `COLORFGBG` variable many terminals export (`fg;bg`)
#[derive(Debug, Default)]
pub struct ColorFgBgPreference;

impl ColorFgBgPreference {
    /// Dark when the background is one of the dark ANSI indices
    pub fn parse(value: &str) -> Option<bool> {
        let background = value.rsplit(';').next()?.trim();
        let index: u8 = background.parse().ok()?;
        Some(matches!(index, 0..=6 | 8))
    }
}

impl PreferenceSource for ColorFgBgPreference {
    fn prefers_dark(&mut self) -> Option<bool> {
        let value = std::env::var("COLORFGBG").ok()?;
        Self::parse(&value)
    }

    fn describe(&self) -> String {
        "COLORFGBG".to_string()
    }
}

/// Polls a preference source on a fixed interval
pub struct PolledThemeWatcher {
    source: Box<dyn PreferenceSource>,
    timer: IntervalTimer,
    last: bool,
}

impl PolledThemeWatcher {
    /// Takes an initial reading; an unknown reading counts as light
    pub fn new(mut source: Box<dyn PreferenceSource>, now: Instant) -> Self {
        let last = source.prefers_dark().unwrap_or(false);
        debug!(source = %source.describe(), dark = last, "System theme watcher started");
        Self {
            source,
            timer: IntervalTimer::new(Duration::from_millis(SYSTEM_THEME_POLL_MS), now),
            last,
        }
    }
}

impl SystemThemeObserver for PolledThemeWatcher {
    fn prefers_dark(&self) -> bool {
        self.last
    }

    fn poll(&mut self, now: Instant) -> Option<bool> {
        if self.timer.poll(now) == 0 {
            return None;
        }

        let reading = self.source.prefers_dark()?;
        if reading == self.last {
            return None;
        }

        debug!(dark = reading, "System theme preference changed");
        self.last = reading;
        Some(reading)
    }
}
