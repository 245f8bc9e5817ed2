//! Screen-space geometry for overlay elements.
//!
//! Every draggable overlay element is positioned relative to an [`AnchorPoint`]
//! on the viewport.  Its absolute position is
//! `anchor.resolve(viewport) + relative_coordinates`, which keeps elements glued
//! to the same corner when the window is resized.

use serde::{Serialize, Serializer};

use crate::domain::choices::OrdinalEnum;

/// An integer `(x, y)` pair.
///
/// Used both for relative coordinates and for bar sizes (`x` = width,
/// `y` = height).  Serialized as a two-element array `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CoordsPair {
    pub x: i32,
    pub y: i32,
}

impl CoordsPair {
    /// The origin `(0, 0)`.
    pub const ORIGIN: CoordsPair = CoordsPair { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns this pair shifted by `(dx, dy)`, saturating at the `i32`
    /// bounds.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

impl Serialize for CoordsPair {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.x, self.y].serialize(serializer)
    }
}

/// A named reference position on the viewport.
///
/// The ordinal of each variant is persisted, so the order must never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnchorPoint {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    BottomMiddle,
}

impl OrdinalEnum for AnchorPoint {
    const VARIANTS: &'static [Self] = &[
        AnchorPoint::TopLeft,
        AnchorPoint::TopRight,
        AnchorPoint::BottomLeft,
        AnchorPoint::BottomRight,
        AnchorPoint::BottomMiddle,
    ];
}

impl AnchorPoint {
    /// Anchor used when neither the store nor the catalog provide one.
    pub const FALLBACK: AnchorPoint = AnchorPoint::BottomMiddle;

    /// X coordinate of this anchor in a viewport `max_x` pixels wide.
    pub fn x(self, max_x: i32) -> i32 {
        match self {
            AnchorPoint::TopRight | AnchorPoint::BottomRight => max_x,
            AnchorPoint::BottomMiddle => max_x / 2,
            AnchorPoint::TopLeft | AnchorPoint::BottomLeft => 0,
        }
    }

    /// Y coordinate of this anchor in a viewport `max_y` pixels tall.
    pub fn y(self, max_y: i32) -> i32 {
        match self {
            AnchorPoint::BottomLeft | AnchorPoint::BottomRight | AnchorPoint::BottomMiddle => max_y,
            AnchorPoint::TopLeft | AnchorPoint::TopRight => 0,
        }
    }

    /// Resolved anchor position for the given viewport.
    pub fn resolve(self, viewport: Viewport) -> CoordsPair {
        CoordsPair::new(self.x(viewport.width), self.y(viewport.height))
    }

    /// Returns the anchor whose resolved position is closest to `(x, y)`.
    ///
    /// Distance is Euclidean.  Ties go to the anchor that comes first in
    /// declaration order.
    pub fn closest_to(x: i32, y: i32, viewport: Viewport) -> AnchorPoint {
        let mut closest = AnchorPoint::FALLBACK;
        let mut shortest: Option<f64> = None;
        for &point in Self::VARIANTS {
            let resolved = point.resolve(viewport);
            let dx = (i64::from(x) - i64::from(resolved.x)) as f64;
            let dy = (i64::from(y) - i64::from(resolved.y)) as f64;
            let distance = dx.hypot(dy);
            if shortest.map_or(true, |best| distance < best) {
                closest = point;
                shortest = Some(distance);
            }
        }
        closest
    }
}

/// Dimensions of the (scaled) viewport overlay elements are drawn into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_ordinals_are_stable() {
        assert_eq!(AnchorPoint::TopLeft.ordinal(), 0);
        assert_eq!(AnchorPoint::TopRight.ordinal(), 1);
        assert_eq!(AnchorPoint::BottomLeft.ordinal(), 2);
        assert_eq!(AnchorPoint::BottomRight.ordinal(), 3);
        assert_eq!(AnchorPoint::BottomMiddle.ordinal(), 4);
        assert_eq!(AnchorPoint::from_ordinal(4), Some(AnchorPoint::BottomMiddle));
        assert_eq!(AnchorPoint::from_ordinal(5), None);
    }

    #[test]
    fn test_anchor_resolves_to_viewport_corners() {
        let viewport = Viewport::new(100, 80);
        assert_eq!(AnchorPoint::TopLeft.resolve(viewport), CoordsPair::new(0, 0));
        assert_eq!(AnchorPoint::TopRight.resolve(viewport), CoordsPair::new(100, 0));
        assert_eq!(AnchorPoint::BottomLeft.resolve(viewport), CoordsPair::new(0, 80));
        assert_eq!(AnchorPoint::BottomRight.resolve(viewport), CoordsPair::new(100, 80));
        assert_eq!(AnchorPoint::BottomMiddle.resolve(viewport), CoordsPair::new(50, 80));
    }

    #[test]
    fn test_closest_anchor_picks_top_left_near_origin() {
        let anchor = AnchorPoint::closest_to(5, 5, Viewport::new(100, 100));
        assert_eq!(anchor, AnchorPoint::TopLeft);
    }

    #[test]
    fn test_closest_anchor_picks_bottom_middle_near_bottom_center() {
        let anchor = AnchorPoint::closest_to(48, 95, Viewport::new(100, 100));
        assert_eq!(anchor, AnchorPoint::BottomMiddle);
    }

    #[test]
    fn test_closest_anchor_tie_goes_to_first_declared() {
        // (50, 0) is equidistant from TopLeft and TopRight.
        let anchor = AnchorPoint::closest_to(50, 0, Viewport::new(100, 100));
        assert_eq!(anchor, AnchorPoint::TopLeft);
    }

    #[test]
    fn test_coords_pair_serializes_as_array() {
        let json = serde_json::to_string(&CoordsPair::new(-3, 12)).expect("serialize");
        assert_eq!(json, "[-3,12]");
    }

    #[test]
    fn test_coords_pair_offset() {
        assert_eq!(CoordsPair::new(100, 50).offset(-91, -39), CoordsPair::new(9, 11));
    }

    #[test]
    fn test_coords_pair_offset_saturates_at_bounds() {
        assert_eq!(
            CoordsPair::new(i32::MIN, i32::MAX).offset(-91, 39),
            CoordsPair::new(i32::MIN, i32::MAX)
        );
    }

    #[test]
    fn test_closest_anchor_handles_extreme_points() {
        let viewport = Viewport::new(854, 480);
        assert_eq!(AnchorPoint::closest_to(i32::MIN, i32::MIN, viewport), AnchorPoint::TopLeft);
        assert_eq!(AnchorPoint::closest_to(i32::MAX, i32::MAX, viewport), AnchorPoint::BottomRight);
    }
}
