use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

pub const MIN_ZOOM: f64 = 0.4;
pub const MAX_ZOOM: f64 = 2.5;
pub const ZOOM_STEP: f64 = 0.1;

/// A 2D point. Whether it is in screen pixels or world units depends on
/// where it came from.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Pan offset in screen pixels plus a multiplicative zoom.
///
/// `screen = world * zoom + (x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
        }
    }
}

impl Viewport {
    pub fn offset(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn screen_to_world(&self, p: Point) -> Point {
        Point::new((p.x - self.x) / self.zoom, (p.y - self.y) / self.zoom)
    }

    pub fn world_to_screen(&self, p: Point) -> Point {
        Point::new(p.x * self.zoom + self.x, p.y * self.zoom + self.y)
    }

    /// Length in world units as it appears on screen.
    pub fn scale(&self, len: f64) -> f64 {
        len * self.zoom
    }

    /// Move the pan offset to `origin + delta`. Screen space, so zoom has no
    /// effect.
    pub fn panned_from(self, origin: Point, delta: Point) -> Self {
        let offset = origin + delta;
        Self {
            x: offset.x,
            y: offset.y,
            ..self
        }
    }

    /// One wheel notch. Negative `direction` zooms in. Pan is untouched, so
    /// zoom anchors at the viewport origin rather than the cursor.
    pub fn zoomed(self, direction: f64) -> Self {
        if direction == 0.0 || direction.is_nan() {
            return self;
        }
        let step = if direction < 0.0 { ZOOM_STEP } else { -ZOOM_STEP };
        // keep to two decimals so repeated steps don't drift
        let zoom = ((self.zoom + step) * 100.0).round() / 100.0;
        Self { zoom, ..self }.clamped()
    }

    pub fn clamped(self) -> Self {
        let zoom = if self.zoom.is_finite() {
            self.zoom.clamp(MIN_ZOOM, MAX_ZOOM)
        } else {
            1.0
        };
        let x = if self.x.is_finite() { self.x } else { 0.0 };
        let y = if self.y.is_finite() { self.y } else { 0.0 };
        Self { x, y, zoom }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn screen_world_round_trip() {
        let vp = Viewport {
            x: 30.0,
            y: -12.0,
            zoom: 2.0,
        };
        let world = vp.screen_to_world(Point::new(130.0, 88.0));
        assert_eq!(world, Point::new(50.0, 50.0));
        assert_eq!(vp.world_to_screen(world), Point::new(130.0, 88.0));
    }

    #[test]
    fn pan_ignores_zoom() {
        let vp = Viewport {
            x: 0.0,
            y: 0.0,
            zoom: 2.5,
        };
        let panned = vp.panned_from(Point::new(10.0, 10.0), Point::new(5.0, -3.0));
        assert_eq!(panned.offset(), Point::new(15.0, 7.0));
        assert_eq!(panned.zoom, 2.5);
    }

    #[test]
    fn wheel_steps_and_keeps_pan() {
        let vp = Viewport {
            x: 4.0,
            y: 9.0,
            zoom: 1.0,
        };
        let zin = vp.zoomed(-1.0);
        assert_eq!(zin.zoom, 1.1);
        assert_eq!(zin.offset(), vp.offset());
        assert_eq!(vp.zoomed(120.0).zoom, 0.9);
        assert_eq!(vp.zoomed(0.0), vp);
    }

    #[test]
    fn zoom_clamps_at_limits() {
        let mut vp = Viewport::default();
        for _ in 0..50 {
            vp = vp.zoomed(-1.0);
        }
        assert_eq!(vp.zoom, MAX_ZOOM);
        for _ in 0..50 {
            vp = vp.zoomed(1.0);
        }
        assert_eq!(vp.zoom, MIN_ZOOM);
    }

    #[test]
    fn clamped_repairs_non_finite_values() {
        let vp = Viewport {
            x: f64::NAN,
            y: 3.0,
            zoom: f64::INFINITY,
        }
        .clamped();
        assert_eq!(vp, Viewport { x: 0.0, y: 3.0, zoom: 1.0 });
    }

    proptest! {
        #[test]
        fn zoom_stays_in_range(steps in proptest::collection::vec(-3.0f64..3.0, 0..200)) {
            let mut vp = Viewport::default();
            for delta in steps {
                vp = vp.zoomed(delta);
                prop_assert!((MIN_ZOOM..=MAX_ZOOM).contains(&vp.zoom));
            }
        }
    }
}
