// Grounded on pathfinder_geometry's `Vector2F`, with the SIMD backing
// store dropped in favor of plain `f32` fields: the contour core does
// not sit in a per-pixel rasterization hot loop, so SIMD lanes would
// only obscure the arithmetic here (see DESIGN.md for the
// dependency-drop note).

use std::ops::{Add, Div, Mul, Neg, Sub};

/// A 2D point or vector with 32-bit floating point coordinates.
///
/// Used both for positions (`Point`) and directions (`Vector2`); the two
/// names are aliases of the same type, matching how curves and tangents
/// are interchangeably points-in-the-plane.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector2F {
    x: f32,
    y: f32,
}

/// A 2D position. Alias of [`Vector2F`].
pub type Point = Vector2F;

/// A 2D direction, conventionally unit length when it represents a tangent.
pub type Vector2 = Vector2F;

/// Shorthand constructor, matching `pathfinder_geometry`'s free
/// function `vec2f`.
#[inline]
pub fn vec2f(x: f32, y: f32) -> Vector2F {
    Vector2F::new(x, y)
}

impl Vector2F {
    #[inline]
    pub fn new(x: f32, y: f32) -> Vector2F {
        Vector2F { x, y }
    }

    #[inline]
    pub fn splat(value: f32) -> Vector2F {
        Vector2F::new(value, value)
    }

    #[inline]
    pub fn zero() -> Vector2F {
        Vector2F::default()
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn set_x(&mut self, x: f32) {
        self.x = x;
    }

    #[inline]
    pub fn set_y(&mut self, y: f32) {
        self.y = y;
    }

    #[inline]
    pub fn min(&self, other: Vector2F) -> Vector2F {
        Vector2F::new(self.x.min(other.x), self.y.min(other.y))
    }

    #[inline]
    pub fn max(&self, other: Vector2F) -> Vector2F {
        Vector2F::new(self.x.max(other.x), self.y.max(other.y))
    }

    /// The 2D cross product (a scalar): `self.x*other.y - self.y*other.x`.
    #[inline]
    pub fn det(&self, other: Vector2F) -> f32 {
        self.x * other.y - self.y * other.x
    }

    #[inline]
    pub fn dot(&self, other: Vector2F) -> f32 {
        self.x * other.x + self.y * other.y
    }

    #[inline]
    pub fn scale(&self, factor: f32) -> Vector2F {
        Vector2F::new(self.x * factor, self.y * factor)
    }

    /// Treats this point as a vector and calculates its squared length.
    #[inline]
    pub fn square_length(&self) -> f32 {
        self.dot(*self)
    }

    /// Treats this point as a vector and calculates its length.
    #[inline]
    pub fn length(&self) -> f32 {
        self.square_length().sqrt()
    }

    /// Treats this point as a vector and normalizes it. The zero vector
    /// normalizes to itself rather than producing NaNs.
    #[inline]
    pub fn normalize(&self) -> Vector2F {
        let len = self.length();
        if len == 0.0 {
            *self
        } else {
            self.scale(1.0 / len)
        }
    }

    /// The vector rotated 90 degrees counter-clockwise (in a y-down
    /// coordinate system, this points "left" of the direction of travel).
    #[inline]
    pub fn perp(&self) -> Vector2F {
        Vector2F::new(-self.y, self.x)
    }

    /// Swaps x and y.
    #[inline]
    pub fn yx(&self) -> Vector2F {
        Vector2F::new(self.y, self.x)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        *self == Vector2F::zero()
    }

    #[inline]
    pub fn lerp(&self, other: Vector2F, t: f32) -> Vector2F {
        *self + (other - *self).scale(t)
    }

    /// Euclidean distance between two points.
    #[inline]
    pub fn distance_to(&self, other: Vector2F) -> f32 {
        (*self - other).length()
    }

    #[inline]
    pub fn approx_eq(&self, other: Vector2F, epsilon: f32) -> bool {
        (self.x - other.x).abs() <= epsilon && (self.y - other.y).abs() <= epsilon
    }
}

impl Add<Vector2F> for Vector2F {
    type Output = Vector2F;
    #[inline]
    fn add(self, other: Vector2F) -> Vector2F {
        Vector2F::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub<Vector2F> for Vector2F {
    type Output = Vector2F;
    #[inline]
    fn sub(self, other: Vector2F) -> Vector2F {
        Vector2F::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f32> for Vector2F {
    type Output = Vector2F;
    #[inline]
    fn mul(self, factor: f32) -> Vector2F {
        self.scale(factor)
    }
}

impl Div<f32> for Vector2F {
    type Output = Vector2F;
    #[inline]
    fn div(self, factor: f32) -> Vector2F {
        self.scale(1.0 / factor)
    }
}

impl Neg for Vector2F {
    type Output = Vector2F;
    #[inline]
    fn neg(self) -> Vector2F {
        Vector2F::new(-self.x, -self.y)
    }
}
