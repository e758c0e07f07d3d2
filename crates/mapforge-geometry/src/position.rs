//! World positions and displacements.
//!
//! A [`WorldPosition`] is a point in continuous world coordinates with a
//! heading; a [`WorldDisplacement`] is a vector between two such points.
//! Neither stores the world it belongs to: operations that need the world's
//! extent or tile size take a [`WorldBounds`] argument.

use core::fmt;
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use libm::{atan2, cos, fabs, sin, sqrt};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{TileCoord, WorldBounds, normalize_degrees};

/// A position `(x, y)` in world units with a heading in degrees.
///
/// The heading is measured from the +x axis towards +y and is always kept
/// normalized to `[0, 360)`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WorldPosition {
    x: f64,
    y: f64,
    heading: f64,
}

impl WorldPosition {
    /// Construct a new position. The heading is normalized.
    pub fn new(x: f64, y: f64, heading: f64) -> Self {
        WorldPosition {
            x,
            y,
            heading: normalize_degrees(heading),
        }
    }

    /// Construct a position from a tile index.
    ///
    /// Each coordinate is `tile * tile_size + sign(tile) * tile_size / 2`,
    /// with `sign(0) == 0`. Positive indices land on the tile centre, index 0
    /// lands on the tile's top-left corner and negative indices land half a
    /// tile short of the centre. Use [`WorldBounds::tile_center`] for exact
    /// centres.
    pub fn from_tile(bounds: &WorldBounds, tile_x: i32, tile_y: i32, heading: f64) -> Self {
        let tw = bounds.tile_width();
        let th = bounds.tile_height();
        WorldPosition::new(
            tile_x as f64 * tw + tile_x.signum() as f64 * tw / 2.0,
            tile_y as f64 * th + tile_y.signum() as f64 * th / 2.0,
            heading,
        )
    }

    /// World x coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// World y coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Heading in degrees, within `[0, 360)`.
    pub fn heading(&self) -> f64 {
        self.heading
    }

    /// Sets the x coordinate.
    pub fn set_x(&mut self, x: f64) {
        self.x = x;
    }

    /// Sets the y coordinate.
    pub fn set_y(&mut self, y: f64) {
        self.y = y;
    }

    /// Sets both coordinates.
    pub fn set_xy(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    /// Sets the heading, normalizing it to `[0, 360)`.
    pub fn set_heading(&mut self, heading: f64) {
        self.heading = normalize_degrees(heading);
    }

    /// Points the heading at `target`.
    ///
    /// If the target coincides with this position the heading becomes 0.
    pub fn set_heading_towards(&mut self, target: &WorldPosition) {
        self.heading = self.relative_vector_to(target).angle();
    }

    /// Returns the vector from this position to `target`.
    pub fn relative_vector_to(&self, target: &WorldPosition) -> WorldDisplacement {
        WorldDisplacement::new(target.x - self.x, target.y - self.y)
    }

    /// Returns a copy moved by `(dx, dy)`, keeping the heading.
    #[must_use]
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        WorldPosition {
            x: self.x + dx,
            y: self.y + dy,
            heading: self.heading,
        }
    }

    /// Checks whether the position lies inside the world.
    pub fn is_valid(&self, bounds: &WorldBounds) -> bool {
        bounds.contains(self.x, self.y)
    }

    /// Index of the tile column containing this position.
    pub fn tile_x(&self, bounds: &WorldBounds) -> i32 {
        self.tile(bounds).x
    }

    /// Index of the tile row containing this position.
    pub fn tile_y(&self, bounds: &WorldBounds) -> i32 {
        self.tile(bounds).y
    }

    /// Index of the tile containing this position.
    pub fn tile(&self, bounds: &WorldBounds) -> TileCoord {
        bounds.tile_of(self.x, self.y)
    }

    /// Straight-line distance between two positions.
    pub fn euclidean_distance(a: &WorldPosition, b: &WorldPosition) -> f64 {
        a.relative_vector_to(b).magnitude()
    }

    /// Manhattan distance between the tiles containing two positions.
    pub fn manhattan_tile_distance(bounds: &WorldBounds, a: &WorldPosition, b: &WorldPosition) -> u32 {
        a.tile(bounds).manhattan_distance(&b.tile(bounds))
    }
}

impl fmt::Display for WorldPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(x: {:.2}, y: {:.2}, heading: {:.1}°)", self.x, self.y, self.heading)
    }
}

impl Add<WorldDisplacement> for WorldPosition {
    type Output = WorldPosition;

    fn add(self, rhs: WorldDisplacement) -> WorldPosition {
        self.translated(rhs.dx, rhs.dy)
    }
}

impl AddAssign<WorldDisplacement> for WorldPosition {
    fn add_assign(&mut self, rhs: WorldDisplacement) {
        self.x += rhs.dx;
        self.y += rhs.dy;
    }
}

impl Sub<WorldDisplacement> for WorldPosition {
    type Output = WorldPosition;

    fn sub(self, rhs: WorldDisplacement) -> WorldPosition {
        self.translated(-rhs.dx, -rhs.dy)
    }
}

impl SubAssign<WorldDisplacement> for WorldPosition {
    fn sub_assign(&mut self, rhs: WorldDisplacement) {
        self.x -= rhs.dx;
        self.y -= rhs.dy;
    }
}

/// `a - b` is the vector pointing from `b` to `a`.
impl Sub<WorldPosition> for WorldPosition {
    type Output = WorldDisplacement;

    fn sub(self, rhs: WorldPosition) -> WorldDisplacement {
        rhs.relative_vector_to(&self)
    }
}

/// A 2‑D vector `(dx, dy)` in world units.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WorldDisplacement {
    /// Change along x (world units).
    pub dx: f64,
    /// Change along y (world units).
    pub dy: f64,
}

impl WorldDisplacement {
    /// Construct a new displacement.
    pub const fn new(dx: f64, dy: f64) -> Self {
        WorldDisplacement { dx, dy }
    }

    /// The zero vector.
    pub const fn zero() -> Self {
        WorldDisplacement { dx: 0.0, dy: 0.0 }
    }

    /// Construct a displacement of `length` pointing at `angle` degrees.
    pub fn from_polar(angle: f64, length: f64) -> Self {
        let rad = angle.to_radians();
        WorldDisplacement::new(cos(rad) * length, sin(rad) * length)
    }

    /// The vector from the world origin to `position`.
    pub fn from_position(position: &WorldPosition) -> Self {
        WorldDisplacement::new(position.x(), position.y())
    }

    /// The position reached by applying this vector to the world origin.
    pub fn to_position(&self, heading: f64) -> WorldPosition {
        WorldPosition::new(self.dx, self.dy, heading)
    }

    /// Checks whether this vector, taken from the world origin, lands inside the world.
    pub fn is_valid(&self, bounds: &WorldBounds) -> bool {
        bounds.contains(self.dx, self.dy)
    }

    /// Euclidean length.
    pub fn magnitude(&self) -> f64 {
        sqrt(self.dx * self.dx + self.dy * self.dy)
    }

    /// Direction in degrees within `[0, 360)`. The zero vector has angle 0.
    pub fn angle(&self) -> f64 {
        normalize_degrees(atan2(self.dy, self.dx).to_degrees())
    }

    /// Dot product.
    pub fn dot(&self, other: &WorldDisplacement) -> f64 {
        self.dx * other.dx + self.dy * other.dy
    }

    /// Z component of the 3‑D cross product.
    pub fn cross(&self, other: &WorldDisplacement) -> f64 {
        self.dx * other.dy - self.dy * other.dx
    }

    /// Returns true if both components are exactly zero.
    pub fn is_zero(&self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }

    /// Scales this vector in place to unit length. The zero vector is left unchanged.
    pub fn normalize(&mut self) {
        *self = self.unit();
    }

    /// Returns the unit vector pointing the same way, or the zero vector for a
    /// zero-length input.
    #[must_use]
    pub fn unit(&self) -> Self {
        let len = self.magnitude();
        if len == 0.0 {
            WorldDisplacement::zero()
        } else {
            *self / len
        }
    }

    /// Returns a vector pointing the same way with the given length.
    #[must_use]
    pub fn scaled_to(&self, length: f64) -> Self {
        self.unit() * length
    }

    /// Returns a vector of `length` pointing from `from` towards `target`.
    ///
    /// When the two positions coincide the result is the zero vector.
    pub fn aim_at(from: &WorldPosition, target: &WorldPosition, length: f64) -> Self {
        from.relative_vector_to(target).scaled_to(length)
    }

    /// Returns true if both components are within `tolerance` of `other`'s.
    pub fn approx_eq(&self, other: &WorldDisplacement, tolerance: f64) -> bool {
        fabs(self.dx - other.dx) <= tolerance && fabs(self.dy - other.dy) <= tolerance
    }
}

impl fmt::Display for WorldDisplacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<dx: {:.2}, dy: {:.2}>", self.dx, self.dy)
    }
}

impl Add for WorldDisplacement {
    type Output = WorldDisplacement;

    fn add(self, rhs: WorldDisplacement) -> WorldDisplacement {
        WorldDisplacement::new(self.dx + rhs.dx, self.dy + rhs.dy)
    }
}

impl AddAssign for WorldDisplacement {
    fn add_assign(&mut self, rhs: WorldDisplacement) {
        self.dx += rhs.dx;
        self.dy += rhs.dy;
    }
}

impl Sub for WorldDisplacement {
    type Output = WorldDisplacement;

    fn sub(self, rhs: WorldDisplacement) -> WorldDisplacement {
        WorldDisplacement::new(self.dx - rhs.dx, self.dy - rhs.dy)
    }
}

impl SubAssign for WorldDisplacement {
    fn sub_assign(&mut self, rhs: WorldDisplacement) {
        self.dx -= rhs.dx;
        self.dy -= rhs.dy;
    }
}

impl Mul<f64> for WorldDisplacement {
    type Output = WorldDisplacement;

    fn mul(self, rhs: f64) -> WorldDisplacement {
        WorldDisplacement::new(self.dx * rhs, self.dy * rhs)
    }
}

impl MulAssign<f64> for WorldDisplacement {
    fn mul_assign(&mut self, rhs: f64) {
        self.dx *= rhs;
        self.dy *= rhs;
    }
}

impl Div<f64> for WorldDisplacement {
    type Output = WorldDisplacement;

    fn div(self, rhs: f64) -> WorldDisplacement {
        WorldDisplacement::new(self.dx / rhs, self.dy / rhs)
    }
}

impl DivAssign<f64> for WorldDisplacement {
    fn div_assign(&mut self, rhs: f64) {
        self.dx /= rhs;
        self.dy /= rhs;
    }
}

impl Neg for WorldDisplacement {
    type Output = WorldDisplacement;

    fn neg(self) -> WorldDisplacement {
        WorldDisplacement::new(-self.dx, -self.dy)
    }
}
