//! Axis-aligned bounding boxes with a cardinal yaw.
//!
//! The y axis grows downward (tile/screen convention), so `top` is the
//! minimum y and `bottom` the maximum.

use core::fmt;
use libm::{ceil, cos, fabs, floor, round, sin};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::position::{WorldDisplacement, WorldPosition};
use crate::{TileCoord, TileSpan, WorldBounds, normalize_degrees};

/// Largest difference from an exact multiple of 90° still accepted as cardinal.
const YAW_TOLERANCE: f64 = 1e-9;

/// One of the four yaws a bounding box may carry.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CardinalYaw {
    /// 0°
    #[default]
    Deg0,
    /// 90°
    Deg90,
    /// 180°
    Deg180,
    /// 270°
    Deg270,
}

impl CardinalYaw {
    /// Builds a yaw from an angle congruent to 0, 90, 180 or 270 mod 360.
    ///
    /// # Errors
    ///
    /// Returns `Err(GeometryError::NonCardinalYaw)` for any other angle.
    pub fn from_degrees(degrees: f64) -> Result<Self, GeometryError> {
        let normalized = normalize_degrees(degrees);
        let quarter = round(normalized / 90.0);
        if !(fabs(normalized - quarter * 90.0) <= YAW_TOLERANCE) {
            return Err(GeometryError::NonCardinalYaw("must be a multiple of 90 degrees"));
        }
        Ok(Self::from_quarter_turns(quarter as i64))
    }

    /// The cardinal yaw closest to `degrees`. Exact midpoints round away from
    /// zero, so 45° snaps to 90°.
    pub fn nearest(degrees: f64) -> Self {
        Self::from_quarter_turns(round(normalize_degrees(degrees) / 90.0) as i64)
    }

    fn from_quarter_turns(turns: i64) -> Self {
        match turns.rem_euclid(4) {
            0 => CardinalYaw::Deg0,
            1 => CardinalYaw::Deg90,
            2 => CardinalYaw::Deg180,
            _ => CardinalYaw::Deg270,
        }
    }

    /// Number of counter-clockwise quarter turns from 0°.
    pub fn quarter_turns(&self) -> u8 {
        match self {
            CardinalYaw::Deg0 => 0,
            CardinalYaw::Deg90 => 1,
            CardinalYaw::Deg180 => 2,
            CardinalYaw::Deg270 => 3,
        }
    }

    /// The yaw in degrees.
    pub fn degrees(&self) -> f64 {
        self.quarter_turns() as f64 * 90.0
    }

    /// The yaw obtained by turning further by `other`.
    #[must_use]
    pub fn rotated(&self, other: CardinalYaw) -> Self {
        Self::from_quarter_turns(self.quarter_turns() as i64 + other.quarter_turns() as i64)
    }

    /// True for 90° and 270°, the turns that swap width and height.
    pub fn is_sideways(&self) -> bool {
        matches!(self, CardinalYaw::Deg90 | CardinalYaw::Deg270)
    }
}

impl TryFrom<f64> for CardinalYaw {
    type Error = GeometryError;

    fn try_from(degrees: f64) -> Result<Self, Self::Error> {
        CardinalYaw::from_degrees(degrees)
    }
}

impl fmt::Display for CardinalYaw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.quarter_turns() as u32 * 90)
    }
}

fn expect_cardinal(yaw_degrees: f64) -> CardinalYaw {
    match CardinalYaw::from_degrees(yaw_degrees) {
        Ok(yaw) => yaw,
        Err(_) => panic!("bounding box yaw must be a multiple of 90 degrees, got {yaw_degrees}"),
    }
}

/// An axis-aligned rectangle `(left, top) .. (right, bottom)` with a cardinal yaw.
///
/// The yaw records which way the enclosed object faces; the rectangle itself
/// is always axis-aligned.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
    yaw: CardinalYaw,
}

impl BoundingBox {
    /// Construct a box from its top-left corner and size.
    ///
    /// # Panics
    ///
    /// Panics if `yaw_degrees` is not congruent to 0, 90, 180 or 270 mod 360.
    pub fn new(x: f64, y: f64, width: f64, height: f64, yaw_degrees: f64) -> Self {
        Self::with_yaw(x, y, width, height, expect_cardinal(yaw_degrees))
    }

    /// Construct a box from its top-left corner, size and an already validated yaw.
    /// Negative sizes are normalized so that `left <= right` and `top <= bottom`.
    pub fn with_yaw(x: f64, y: f64, width: f64, height: f64, yaw: CardinalYaw) -> Self {
        Self::from_corners_with_yaw((x, y), (x + width, y + height), yaw)
    }

    /// Construct a box from two opposite corners.
    ///
    /// # Panics
    ///
    /// Panics if `yaw_degrees` is not congruent to 0, 90, 180 or 270 mod 360.
    pub fn from_corners(top_left: (f64, f64), bottom_right: (f64, f64), yaw_degrees: f64) -> Self {
        Self::from_corners_with_yaw(top_left, bottom_right, expect_cardinal(yaw_degrees))
    }

    fn from_corners_with_yaw(a: (f64, f64), b: (f64, f64), yaw: CardinalYaw) -> Self {
        BoundingBox {
            left: a.0.min(b.0),
            top: a.1.min(b.1),
            right: a.0.max(b.0),
            bottom: a.1.max(b.1),
            yaw,
        }
    }

    /// Builds the box enclosing an object of `width` x `height` centred on
    /// `position` and rotated by `rotation_degrees`.
    ///
    /// The rotated rectangle is replaced by its axis-aligned envelope and the
    /// stored yaw is the cardinal value nearest to the rotation.
    pub fn from_object(position: &WorldPosition, width: f64, height: f64, rotation_degrees: f64) -> Self {
        let rad = rotation_degrees.to_radians();
        let (c, s) = (cos(rad), sin(rad));
        let (hw, hh) = (width / 2.0, height / 2.0);

        let corners = [(-hw, -hh), (hw, -hh), (hw, hh), (-hw, hh)];
        let mut min = (f64::INFINITY, f64::INFINITY);
        let mut max = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for (x, y) in corners {
            let rx = x * c - y * s;
            let ry = x * s + y * c;
            min = (min.0.min(rx), min.1.min(ry));
            max = (max.0.max(rx), max.1.max(ry));
        }

        BoundingBox {
            left: position.x() + min.0,
            top: position.y() + min.1,
            right: position.x() + max.0,
            bottom: position.y() + max.1,
            yaw: CardinalYaw::nearest(rotation_degrees),
        }
    }

    /// Minimum x.
    pub fn left(&self) -> f64 {
        self.left
    }

    /// Minimum y.
    pub fn top(&self) -> f64 {
        self.top
    }

    /// Maximum x.
    pub fn right(&self) -> f64 {
        self.right
    }

    /// Maximum y.
    pub fn bottom(&self) -> f64 {
        self.bottom
    }

    /// `(left, top)`.
    pub fn top_left(&self) -> (f64, f64) {
        (self.left, self.top)
    }

    /// `(right, bottom)`.
    pub fn bottom_right(&self) -> (f64, f64) {
        (self.right, self.bottom)
    }

    /// Extent along x.
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Extent along y.
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Width times height.
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Centre point `(x, y)`.
    pub fn center(&self) -> (f64, f64) {
        ((self.left + self.right) / 2.0, (self.top + self.bottom) / 2.0)
    }

    /// The snapped yaw.
    pub fn yaw(&self) -> CardinalYaw {
        self.yaw
    }

    /// True if the box has no area.
    pub fn is_empty(&self) -> bool {
        !(self.width() > 0.0) || !(self.height() > 0.0)
    }

    /// Checks whether a point lies inside the box. The right and bottom edges
    /// are exclusive.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }

    /// Smallest closed range of tile indices covering the box.
    ///
    /// The min corner uses `floor(v / tile)` and the max corner
    /// `ceil(v / tile) - 1`, so a border shared by two tiles belongs to the
    /// lower one. The max corner never goes below the min corner.
    pub fn bound_use_tile(&self, tile_width: f64, tile_height: f64) -> TileSpan {
        let min = TileCoord::new(
            floor(self.left / tile_width) as i32,
            floor(self.top / tile_height) as i32,
        );
        let max = TileCoord::new(
            (ceil(self.right / tile_width) as i32).saturating_sub(1).max(min.x),
            (ceil(self.bottom / tile_height) as i32).saturating_sub(1).max(min.y),
        );
        TileSpan::new(min, max)
    }

    /// [`bound_use_tile`](Self::bound_use_tile) with the tile size of `bounds`.
    pub fn tile_span(&self, bounds: &WorldBounds) -> TileSpan {
        self.bound_use_tile(bounds.tile_width(), bounds.tile_height())
    }

    /// Checks whether two boxes overlap with a non-zero area.
    ///
    /// Boxes that only touch along an edge or a corner do not intersect, and
    /// an empty box intersects nothing.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }

    /// Returns a copy moved by `(dx, dy)`.
    #[must_use]
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        BoundingBox {
            left: self.left + dx,
            top: self.top + dy,
            right: self.right + dx,
            bottom: self.bottom + dy,
            yaw: self.yaw,
        }
    }

    /// Returns a copy moved by `displacement`.
    #[must_use]
    pub fn translate_by(&self, displacement: &WorldDisplacement) -> Self {
        self.translate(displacement.dx, displacement.dy)
    }

    /// Returns a copy turned by `yaw_degrees` about its own centre.
    ///
    /// # Panics
    ///
    /// Panics if `yaw_degrees` is not congruent to 0, 90, 180 or 270 mod 360.
    #[must_use]
    pub fn rotate_around_center(&self, yaw_degrees: f64) -> Self {
        let turn = expect_cardinal(yaw_degrees);
        if !turn.is_sideways() {
            return BoundingBox {
                yaw: self.yaw.rotated(turn),
                ..*self
            };
        }
        let (cx, cy) = self.center();
        let (hw, hh) = (self.height() / 2.0, self.width() / 2.0);
        BoundingBox {
            left: cx - hw,
            top: cy - hh,
            right: cx + hw,
            bottom: cy + hh,
            yaw: self.yaw.rotated(turn),
        }
    }

    /// Returns true if the yaws match and every edge is within `tolerance`.
    pub fn approx_eq(&self, other: &BoundingBox, tolerance: f64) -> bool {
        self.yaw == other.yaw
            && fabs(self.left - other.left) <= tolerance
            && fabs(self.top - other.top) <= tolerance
            && fabs(self.right - other.right) <= tolerance
            && fabs(self.bottom - other.bottom) <= tolerance
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BoundingBox [({:.2}, {:.2}) .. ({:.2}, {:.2}), yaw: {}]",
            self.left, self.top, self.right, self.bottom, self.yaw
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    const EPSILON: f64 = 1e-6;

    #[test]
    fn test_cardinal_yaw_from_degrees() {
        assert_eq!(CardinalYaw::from_degrees(0.0), Ok(CardinalYaw::Deg0));
        assert_eq!(CardinalYaw::from_degrees(90.0), Ok(CardinalYaw::Deg90));
        assert_eq!(CardinalYaw::from_degrees(-90.0), Ok(CardinalYaw::Deg270));
        assert_eq!(CardinalYaw::from_degrees(540.0), Ok(CardinalYaw::Deg180));
        assert_eq!(CardinalYaw::from_degrees(360.0), Ok(CardinalYaw::Deg0));
        assert!(matches!(
            CardinalYaw::from_degrees(45.0),
            Err(GeometryError::NonCardinalYaw(_))
        ));
        assert!(CardinalYaw::try_from(89.5).is_err());
    }

    #[test]
    fn test_cardinal_yaw_nearest() {
        assert_eq!(CardinalYaw::nearest(10.0), CardinalYaw::Deg0);
        assert_eq!(CardinalYaw::nearest(45.0), CardinalYaw::Deg90);
        assert_eq!(CardinalYaw::nearest(200.0), CardinalYaw::Deg180);
        assert_eq!(CardinalYaw::nearest(350.0), CardinalYaw::Deg0);
        assert_eq!(CardinalYaw::nearest(-80.0), CardinalYaw::Deg270);
    }

    #[test]
    fn test_cardinal_yaw_rotated() {
        assert_eq!(CardinalYaw::Deg270.rotated(CardinalYaw::Deg180), CardinalYaw::Deg90);
        assert_eq!(CardinalYaw::Deg90.rotated(CardinalYaw::Deg270), CardinalYaw::Deg0);
        assert!((CardinalYaw::Deg180.degrees() - 180.0).abs() < EPSILON);
    }

    #[test]
    fn test_new_normalizes_corners() {
        let bb = BoundingBox::new(10.0, 10.0, -4.0, -6.0, 0.0);
        assert!((bb.left() - 6.0).abs() < EPSILON);
        assert!((bb.top() - 4.0).abs() < EPSILON);
        assert!((bb.width() - 4.0).abs() < EPSILON);
        assert!((bb.height() - 6.0).abs() < EPSILON);
        assert!((bb.area() - 24.0).abs() < EPSILON);
    }

    #[test]
    #[should_panic(expected = "multiple of 90 degrees")]
    fn test_non_cardinal_yaw_panics() {
        let _ = BoundingBox::new(0.0, 0.0, 10.0, 10.0, 45.0);
    }

    #[test]
    #[should_panic(expected = "multiple of 90 degrees")]
    fn test_from_corners_non_cardinal_yaw_panics() {
        let _ = BoundingBox::from_corners((0.0, 0.0), (1.0, 1.0), 100.0);
    }

    #[test]
    fn test_intersects_overlapping_and_disjoint() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0, 0.0);
        let b = BoundingBox::new(5.0, 5.0, 10.0, 10.0, 0.0);
        let c = BoundingBox::new(20.0, 20.0, 10.0, 10.0, 0.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
        assert!(!c.intersects(&a));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0, 0.0);
        let right = BoundingBox::new(10.0, 0.0, 10.0, 10.0, 0.0);
        let corner = BoundingBox::new(10.0, 10.0, 5.0, 5.0, 0.0);
        let flat = BoundingBox::new(2.0, 2.0, 0.0, 5.0, 0.0);
        assert!(!a.intersects(&right));
        assert!(!a.intersects(&corner));
        assert!(!a.intersects(&flat));
    }

    #[test]
    fn test_from_object_axis_aligned() {
        let pos = WorldPosition::new(50.0, 40.0, 0.0);
        let bb = BoundingBox::from_object(&pos, 20.0, 10.0, 0.0);
        assert!(bb.approx_eq(&BoundingBox::new(40.0, 35.0, 20.0, 10.0, 0.0), EPSILON));
    }

    #[test]
    fn test_from_object_quarter_turn_swaps_extent() {
        let pos = WorldPosition::new(50.0, 40.0, 0.0);
        let bb = BoundingBox::from_object(&pos, 20.0, 10.0, 90.0);
        assert_eq!(bb.yaw(), CardinalYaw::Deg90);
        assert!((bb.width() - 10.0).abs() < EPSILON);
        assert!((bb.height() - 20.0).abs() < EPSILON);
        let (cx, cy) = bb.center();
        assert!((cx - 50.0).abs() < EPSILON);
        assert!((cy - 40.0).abs() < EPSILON);
    }

    #[test]
    fn test_from_object_diagonal_envelope() {
        let pos = WorldPosition::new(0.0, 0.0, 0.0);
        let bb = BoundingBox::from_object(&pos, 20.0, 10.0, 45.0);
        let expected = 30.0 * core::f64::consts::FRAC_1_SQRT_2; // (w + h) * cos 45°
        assert!((bb.width() - expected).abs() < EPSILON);
        assert!((bb.height() - expected).abs() < EPSILON);
        assert_eq!(bb.yaw(), CardinalYaw::Deg90); // snapped, not rejected
    }

    #[test]
    fn test_bound_use_tile() {
        let single = BoundingBox::new(0.0, 0.0, 10.0, 10.0, 0.0).bound_use_tile(10.0, 10.0);
        assert_eq!(single, TileSpan::new(TileCoord::new(0, 0), TileCoord::new(0, 0)));

        let straddling = BoundingBox::new(5.0, 5.0, 10.0, 10.0, 0.0).bound_use_tile(10.0, 10.0);
        assert_eq!(straddling, TileSpan::new(TileCoord::new(0, 0), TileCoord::new(1, 1)));
        assert_eq!(straddling.tile_count(), 4);

        let negative = BoundingBox::new(-5.0, 12.0, 3.0, 3.0, 0.0).bound_use_tile(10.0, 10.0);
        assert_eq!(negative, TileSpan::new(TileCoord::new(-1, 1), TileCoord::new(-1, 1)));

        let point = BoundingBox::new(20.0, 20.0, 0.0, 0.0, 0.0).bound_use_tile(10.0, 10.0);
        assert_eq!(point.tile_count(), 1);
        assert_eq!(point.min, TileCoord::new(2, 2));
    }

    #[test]
    fn test_bound_use_tile_far_from_origin() {
        let far_negative = BoundingBox::new(-1e12, -1e12, 1.0, 1.0, 0.0).bound_use_tile(1.0, 1.0);
        assert_eq!(far_negative.min, TileCoord::new(i32::MIN, i32::MIN));
        assert_eq!(far_negative.max, TileCoord::new(i32::MIN, i32::MIN));
        assert_eq!(far_negative.tile_count(), 1);

        let far_positive = BoundingBox::new(1e12, 1e12, 1.0, 1.0, 0.0).bound_use_tile(1.0, 1.0);
        assert_eq!(far_positive.min, TileCoord::new(i32::MAX, i32::MAX));
        assert_eq!(far_positive.max, TileCoord::new(i32::MAX, i32::MAX));
    }

    #[test]
    fn test_translate_is_pure() {
        let bb = BoundingBox::new(0.0, 0.0, 10.0, 10.0, 90.0);
        let moved = bb.translate(5.0, -2.0);
        assert!((bb.left() - 0.0).abs() < EPSILON);
        assert!((moved.left() - 5.0).abs() < EPSILON);
        assert!((moved.top() - (-2.0)).abs() < EPSILON);
        assert_eq!(moved.yaw(), CardinalYaw::Deg90);
        assert_eq!(bb.translate_by(&WorldDisplacement::new(5.0, -2.0)), moved);
    }

    #[test]
    fn test_rotation_identity() {
        let bb = BoundingBox::new(3.0, 4.0, 8.0, 2.0, 90.0);
        assert_eq!(bb.rotate_around_center(0.0), bb);
        assert!(bb.rotate_around_center(360.0).approx_eq(&bb, EPSILON));
        assert!(bb.rotate_around_center(90.0).rotate_around_center(270.0).approx_eq(&bb, EPSILON));
    }

    #[test]
    fn test_rotation_quarter_turn() {
        let bb = BoundingBox::new(0.0, 0.0, 8.0, 2.0, 0.0);
        let turned = bb.rotate_around_center(90.0);
        assert_eq!(turned.yaw(), CardinalYaw::Deg90);
        assert!((turned.width() - 2.0).abs() < EPSILON);
        assert!((turned.height() - 8.0).abs() < EPSILON);
        assert_eq!(turned.center(), bb.center());

        let half = bb.rotate_around_center(-180.0);
        assert_eq!(half.yaw(), CardinalYaw::Deg180);
        assert!((half.width() - 8.0).abs() < EPSILON);
    }

    #[test]
    #[should_panic(expected = "multiple of 90 degrees")]
    fn test_rotation_non_cardinal_panics() {
        let bb = BoundingBox::new(0.0, 0.0, 8.0, 2.0, 0.0);
        let _ = bb.rotate_around_center(30.0);
    }

    #[test]
    fn test_contains_point() {
        let bb = BoundingBox::new(0.0, 0.0, 10.0, 10.0, 0.0);
        assert!(bb.contains_point(0.0, 0.0));
        assert!(bb.contains_point(9.9, 5.0));
        assert!(!bb.contains_point(10.0, 5.0));
    }
}
