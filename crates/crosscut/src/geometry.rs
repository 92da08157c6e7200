//! Core geometry types for crosscut.
//!
//! ## Rust Lesson #1: Structs & Derives
//!
//! In JS you'd write: `const point = { x: 1.0, y: 2.0 }`
//! In Rust, we define a `struct` with explicit types.
//!
//! The `#[derive(...)]` macro auto-generates common functionality:
//! - `Debug` = like console.log, lets you print with `{:?}`
//! - `Clone` = can duplicate the value (like spread: `{...obj}`)
//! - `Copy` = can copy implicitly (small stack values only)
//! - `PartialEq` = can compare with `==`
//! - `Serialize`/`Deserialize` = serde can turn it into JSON and back

use std::ops::{Add, Div, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// A 2D point with x,y coordinates.
///
/// Doubles as a 2D vector: the difference of two points is a `Point`
/// holding the displacement.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A 2x2 matrix stored row-major:
///
/// ```text
/// | a  b |
/// | c  d |
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat2 {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Magnitude of this point taken as a vector.
    ///
    /// `hypot` keeps tiny and huge components from underflowing or
    /// overflowing in the squares.
    #[inline]
    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        (*self - other).length()
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

// ============================================================================
// OPERATORS
// ============================================================================
//
// ## Rust Lesson #2: Operator Overloading
//
// JS has no operator overloading, so vector math reads `add(a, b)`.
// Rust lets a type implement `std::ops::Add` and friends, after which
// `a + b` just works. Because `Point` is `Copy`, the operands are copied
// in and nothing is moved away from the caller.

impl Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    #[inline]
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Point {
    type Output = Point;

    #[inline]
    fn div(self, rhs: f64) -> Point {
        Point::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Point {
    type Output = Point;

    #[inline]
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl Mat2 {
    #[inline]
    pub fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self { a, b, c, d }
    }

    /// Build a matrix whose columns are the two given vectors.
    #[inline]
    pub fn from_columns(c0: Point, c1: Point) -> Self {
        Self::new(c0.x, c1.x, c0.y, c1.y)
    }

    #[inline]
    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// Inverse of the matrix.
    ///
    /// ## Rust Lesson #3: Option<T>
    ///
    /// Rust has no `null` or `undefined`. A singular matrix has no inverse,
    /// so we return `None` and the caller is forced to handle it.
    ///
    /// Only an exactly-zero determinant counts as singular. Nearly parallel
    /// directions produce a huge (but finite) inverse.
    pub fn inverse(&self) -> Option<Mat2> {
        let det = self.determinant();
        if det == 0.0 {
            return None;
        }

        Some(Mat2::new(
            self.d / det,
            -self.b / det,
            -self.c / det,
            self.a / det,
        ))
    }

    #[inline]
    pub fn mul_point(&self, p: Point) -> Point {
        Point::new(self.a * p.x + self.b * p.y, self.c * p.x + self.d * p.y)
    }
}

/// Solve `m * x = rhs` for `x`, or `None` when `m` is singular.
pub fn solve(m: Mat2, rhs: Point) -> Option<Point> {
    m.inverse().map(|inv| inv.mul_point(rhs))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_distance() {
        let p1 = Point::new(0.0, 0.0);
        let p2 = Point::new(3.0, 4.0);
        assert_eq!(p1.distance(p2), 5.0); // 3-4-5 triangle
    }

    #[test]
    fn vector_arithmetic() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(4.0, 6.0);
        assert_eq!(a + b, Point::new(5.0, 8.0));
        assert_eq!(b - a, Point::new(3.0, 4.0));
        assert_eq!(a * 2.0, Point::new(2.0, 4.0));
        assert_eq!(b / 2.0, Point::new(2.0, 3.0));
        assert_eq!(-a, Point::new(-1.0, -2.0));
        assert_eq!((b - a).length(), 5.0);
    }

    #[test]
    fn inverse_of_identity() {
        let m = Mat2::new(1.0, 0.0, 0.0, 1.0);
        assert_eq!(m.inverse(), Some(m));
    }

    #[test]
    fn inverse_round_trips() {
        let m = Mat2::new(2.0, 1.0, 1.0, 3.0);
        let inv = m.inverse().unwrap();
        let p = Point::new(7.0, -2.0);
        let back = inv.mul_point(m.mul_point(p));
        assert!((back.x - p.x).abs() < 1e-12);
        assert!((back.y - p.y).abs() < 1e-12);
    }

    #[test]
    fn singular_matrix_has_no_inverse() {
        // Parallel columns
        let m = Mat2::from_columns(Point::new(1.0, 2.0), Point::new(2.0, 4.0));
        assert_eq!(m.determinant(), 0.0);
        assert!(m.inverse().is_none());
        assert!(solve(m, Point::new(1.0, 1.0)).is_none());
    }

    #[test]
    fn solve_two_unknowns() {
        // x + y = 3, x - y = 1  =>  x = 2, y = 1
        let m = Mat2::new(1.0, 1.0, 1.0, -1.0);
        let x = solve(m, Point::new(3.0, 1.0)).unwrap();
        assert_eq!(x, Point::new(2.0, 1.0));
    }

    #[test]
    fn from_columns_layout() {
        let m = Mat2::from_columns(Point::new(1.0, 2.0), Point::new(3.0, 4.0));
        assert_eq!(m, Mat2::new(1.0, 3.0, 2.0, 4.0));
    }
}
