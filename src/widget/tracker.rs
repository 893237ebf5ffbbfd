// Pointer tracking
//
// The eyes look toward the pointer: a dead zone around the widget keeps
// them centered, then the offset ramps up linearly over the falloff
// distance until it saturates at the maximum offset. Both eyes move by the
// same vector. In idle mode the pointer is ignored and the eyes drift back
// to center.

use super::Mode;
use crate::app::config::{IdleCentering, RemyConfig, IDLE_SMOOTHING};

/// A 2D coordinate (screen pixels or view-box units, depending on use)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[allow(dead_code)]
    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// One eye: its resting coordinate and where it is now
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Eye {
    pub base: Point,
    pub pos: Point,
}

impl Eye {
    pub fn new(base: Point) -> Self {
        Self { base, pos: base }
    }

    fn place(&mut self, offset: Point) {
        self.pos = Point::new(self.base.x + offset.x, self.base.y + offset.y);
    }

    fn smooth_toward_base(&mut self, t: f64) {
        self.pos = idle_step(self.pos, self.base, t);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EyePair {
    pub left: Eye,
    pub right: Eye,
}

impl EyePair {
    pub fn new(left: Point, right: Point) -> Self {
        Self {
            left: Eye::new(left),
            right: Eye::new(right),
        }
    }

    /// Move both eyes to `base + offset`
    pub fn offset_by(&mut self, offset: Point) {
        self.left.place(offset);
        self.right.place(offset);
    }

    pub fn center(&mut self) {
        self.offset_by(Point::default());
    }

    #[allow(dead_code)]
    pub fn is_centered(&self) -> bool {
        self.left.pos == self.left.base && self.right.pos == self.right.base
    }
}

/// One idle centering step: cover fraction `t` of the way back to `base`
pub fn idle_step(pos: Point, base: Point, t: f64) -> Point {
    Point::new(pos.x + (base.x - pos.x) * t, pos.y + (base.y - pos.y) * t)
}

/// Shaping parameters for the look-at offset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackingGeometry {
    pub dead_zone: f64,
    pub falloff: f64,
    pub max_offset: f64,
}

impl TrackingGeometry {
    /// Eye offset for a pointer at `pointer` looking out of `center`
    ///
    /// Zero inside the dead zone. A pointer exactly on the center counts as
    /// distance 1 so the direction never divides by zero.
    pub fn eye_offset(&self, pointer: Point, center: Point) -> Point {
        let dx = pointer.x - center.x;
        let dy = pointer.y - center.y;
        let dist = dx.hypot(dy).max(1.0);

        if dist < self.dead_zone {
            return Point::default();
        }

        let f = ((dist - self.dead_zone) / self.falloff).clamp(0.0, 1.0);
        Point::new(
            dx / dist * self.max_offset * f,
            dy / dist * self.max_offset * f,
        )
    }
}

/// Drives an `EyePair` from pointer moves and frame ticks
#[derive(Debug, Clone)]
pub struct PointerTracker {
    geometry: TrackingGeometry,
    idle_centering: IdleCentering,
}

impl PointerTracker {
    pub fn new(config: &RemyConfig) -> Self {
        Self {
            geometry: TrackingGeometry {
                dead_zone: config.dead_zone,
                falloff: config.falloff,
                max_offset: config.max_offset,
            },
            idle_centering: config.idle_centering,
        }
    }

    /// Handle a pointer move anywhere on screen
    ///
    /// `center` is the widget's visual center in the same pixel space as
    /// `pointer`; a widget that has not been placed yet ignores the move.
    pub fn on_pointer_move(
        &self,
        eyes: &mut EyePair,
        mode: Mode,
        pointer: Point,
        center: Option<Point>,
    ) {
        if mode == Mode::Idle {
            if self.idle_centering == IdleCentering::Pointer {
                eyes.left.smooth_toward_base(IDLE_SMOOTHING);
                eyes.right.smooth_toward_base(IDLE_SMOOTHING);
            }
            return;
        }

        let Some(center) = center else {
            return;
        };

        let offset = self.geometry.eye_offset(pointer, center);
        if offset == Point::default() {
            eyes.center();
        } else {
            eyes.offset_by(offset);
        }
    }

    /// Per-frame work: idle centering when it is frame driven
    pub fn on_frame(&self, eyes: &mut EyePair, mode: Mode) {
        if mode == Mode::Idle && self.idle_centering == IdleCentering::Frame {
            eyes.left.smooth_toward_base(IDLE_SMOOTHING);
            eyes.right.smooth_toward_base(IDLE_SMOOTHING);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f64::consts::TAU;

    const CENTER: Point = Point::new(100.0, 100.0);

    fn geometry() -> TrackingGeometry {
        TrackingGeometry {
            dead_zone: 40.0,
            falloff: 160.0,
            max_offset: 1.5,
        }
    }

    fn magnitude(p: Point) -> f64 {
        p.x.hypot(p.y)
    }

    fn eyes() -> EyePair {
        EyePair::new(Point::new(7.0, 7.5), Point::new(11.0, 7.5))
    }

    #[test]
    fn test_dead_zone_snaps_to_base() {
        let tracker = PointerTracker::new(&RemyConfig::default());
        let mut eyes = eyes();
        eyes.offset_by(Point::new(1.0, -1.0));

        tracker.on_pointer_move(&mut eyes, Mode::Follow, Point::new(120.0, 110.0), Some(CENTER));
        assert!(eyes.is_centered());
    }

    #[test]
    fn test_pointer_on_center_does_not_divide_by_zero() {
        let offset = geometry().eye_offset(CENTER, CENTER);
        assert_eq!(offset, Point::default());

        // Distance clamps to 1 even when the dead zone is tiny
        let tiny = TrackingGeometry {
            dead_zone: 0.5,
            ..geometry()
        };
        let offset = tiny.eye_offset(CENTER, CENTER);
        assert!(offset.x.is_finite() && offset.y.is_finite());
    }

    #[test]
    fn test_far_pointer_reaches_max_offset() {
        let offset = geometry().eye_offset(Point::new(400.0, 100.0), CENTER);
        assert!((offset.x - 1.5).abs() < 1e-12);
        assert_eq!(offset.y, 0.0);
    }

    #[test]
    fn test_eyes_move_in_lockstep() {
        let tracker = PointerTracker::new(&RemyConfig::default());
        let mut eyes = eyes();
        tracker.on_pointer_move(&mut eyes, Mode::Thinking, Point::new(100.0, 220.0), Some(CENTER));

        let left = Point::new(eyes.left.pos.x - 7.0, eyes.left.pos.y - 7.5);
        let right = Point::new(eyes.right.pos.x - 11.0, eyes.right.pos.y - 7.5);
        assert_eq!(left, right);
        // 120px down: (120 - 40) / 160 = half the max offset
        assert!((left.y - 0.75).abs() < 1e-12);
        assert_eq!(left.x, 0.0);
    }

    #[test]
    fn test_unplaced_widget_ignores_pointer() {
        let tracker = PointerTracker::new(&RemyConfig::default());
        let mut eyes = eyes();
        tracker.on_pointer_move(&mut eyes, Mode::Follow, Point::new(500.0, 500.0), None);
        assert!(eyes.is_centered());
    }

    #[test]
    fn test_idle_ignores_pointer_and_recenters() {
        let tracker = PointerTracker::new(&RemyConfig::default());
        let mut eyes = eyes();
        eyes.offset_by(Point::new(1.0, 0.0));

        tracker.on_pointer_move(&mut eyes, Mode::Idle, Point::new(500.0, 100.0), Some(CENTER));
        assert!((eyes.left.pos.x - 7.85).abs() < 1e-12);
        assert!((eyes.right.pos.x - 11.85).abs() < 1e-12);

        // Pointer-driven centering leaves the frame clock alone
        let before = eyes;
        tracker.on_frame(&mut eyes, Mode::Idle);
        assert_eq!(eyes, before);
    }

    #[test]
    fn test_frame_driven_idle_centering() {
        let config = RemyConfig {
            idle_centering: IdleCentering::Frame,
            ..RemyConfig::default()
        };
        let tracker = PointerTracker::new(&config);
        let mut eyes = eyes();
        eyes.offset_by(Point::new(0.0, 1.0));

        tracker.on_pointer_move(&mut eyes, Mode::Idle, Point::new(500.0, 100.0), Some(CENTER));
        assert_eq!(eyes.left.pos.y, 8.5);

        tracker.on_frame(&mut eyes, Mode::Idle);
        assert!((eyes.left.pos.y - 8.35).abs() < 1e-12);

        // Frame ticks never recenter outside idle
        let before = eyes;
        tracker.on_frame(&mut eyes, Mode::Follow);
        assert_eq!(eyes, before);
    }

    proptest! {
        #[test]
        fn prop_inside_dead_zone_is_zero(d in 0.0f64..39.0, angle in 0.0f64..TAU) {
            let pointer = Point::new(CENTER.x + d * angle.cos(), CENTER.y + d * angle.sin());
            prop_assert_eq!(geometry().eye_offset(pointer, CENTER), Point::default());
        }

        #[test]
        fn prop_falloff_is_monotone(a in 40.0f64..200.0, b in 40.0f64..200.0) {
            let (d1, d2) = if a <= b { (a, b) } else { (b, a) };
            let m1 = magnitude(geometry().eye_offset(Point::new(CENTER.x + d1, CENTER.y), CENTER));
            let m2 = magnitude(geometry().eye_offset(Point::new(CENTER.x + d2, CENTER.y), CENTER));
            prop_assert!(m2 >= m1);
        }

        #[test]
        fn prop_saturates_past_falloff(d in 201.0f64..5000.0, angle in 0.0f64..TAU) {
            let pointer = Point::new(CENTER.x + d * angle.cos(), CENTER.y + d * angle.sin());
            let m = magnitude(geometry().eye_offset(pointer, CENTER));
            prop_assert!((m - 1.5).abs() < 1e-9);
        }

        #[test]
        fn prop_idle_step_strictly_approaches_base(
            x in -10.0f64..10.0,
            y in -10.0f64..10.0,
            t in 0.01f64..0.99,
        ) {
            let base = Point::new(7.0, 7.5);
            let pos = Point::new(base.x + x, base.y + y);
            prop_assume!(pos.distance_to(base) > 1e-6);

            let next = idle_step(pos, base, t);
            prop_assert!(next.distance_to(base) < pos.distance_to(base));
            prop_assert!(next != base);
        }
    }
}
