// src/math/types/point.rs

use serde::{Deserialize, Serialize};
use spade::Point2;
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// 3D-Punkt bzw. Vektor mit `f32`-Koordinaten.
///
/// Für ebene Geometrie ist `z` 0. Texturkoordinaten verwenden denselben Typ
/// (siehe [`Coord3`]).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

/// Texturkoordinate (u, v, w)
pub type Coord3 = Point;

impl Point {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }

    pub const fn new_3d(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn length(&self) -> f32 {
        self.dot(*self).sqrt()
    }

    pub fn distance_to(&self, other: Point) -> f32 {
        (*self - other).length()
    }

    /// Einheitsvektor; der Nullvektor bleibt unverändert.
    pub fn normalize(&self) -> Point {
        let len = self.length();
        if len == 0.0 { *self } else { *self / len }
    }

    pub fn dot(&self, other: Point) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// z-Komponente des Kreuzprodukts in der Ebene
    pub fn cross(&self, other: Point) -> f32 {
        self.x * other.y - self.y * other.x
    }

    pub fn lerp(&self, other: Point, t: f32) -> Point {
        *self + (other - *self) * t
    }

    pub(crate) fn to_f64_pair(self) -> [f64; 2] {
        [self.x as f64, self.y as f64]
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.z == 0.0 {
            write!(f, "({}, {})", self.x, self.y)
        } else {
            write!(f, "({}, {}, {})", self.x, self.y, self.z)
        }
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

impl From<(f32, f32, f32)> for Point {
    fn from((x, y, z): (f32, f32, f32)) -> Self {
        Self::new_3d(x, y, z)
    }
}

impl From<[f32; 2]> for Point {
    fn from([x, y]: [f32; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<Point2<f64>> for Point {
    fn from(p: Point2<f64>) -> Self {
        Self::new(p.x as f32, p.y as f32)
    }
}

impl From<Point> for Point2<f64> {
    fn from(p: Point) -> Self {
        Point2::new(p.x as f64, p.y as f64)
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new_3d(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new_3d(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// Komponentenweise Multiplikation
impl Mul for Point {
    type Output = Point;
    fn mul(self, rhs: Point) -> Point {
        Point::new_3d(self.x * rhs.x, self.y * rhs.y, self.z * rhs.z)
    }
}

impl Mul<f32> for Point {
    type Output = Point;
    fn mul(self, rhs: f32) -> Point {
        Point::new_3d(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Mul<Point> for f32 {
    type Output = Point;
    fn mul(self, rhs: Point) -> Point {
        rhs * self
    }
}

/// Komponentenweise Division
impl Div for Point {
    type Output = Point;
    fn div(self, rhs: Point) -> Point {
        Point::new_3d(self.x / rhs.x, self.y / rhs.y, self.z / rhs.z)
    }
}

impl Div<f32> for Point {
    type Output = Point;
    fn div(self, rhs: f32) -> Point {
        Point::new_3d(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl Neg for Point {
    type Output = Point;
    fn neg(self) -> Point {
        Point::new_3d(-self.x, -self.y, -self.z)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        *self = *self + rhs;
    }
}

impl SubAssign for Point {
    fn sub_assign(&mut self, rhs: Point) {
        *self = *self - rhs;
    }
}

impl MulAssign<f32> for Point {
    fn mul_assign(&mut self, rhs: f32) {
        *self = *self * rhs;
    }
}

impl DivAssign<f32> for Point {
    fn div_assign(&mut self, rhs: f32) {
        *self = *self / rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_point_arithmetic() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new_3d(3.0, 4.0, 5.0);
        assert_eq!(a + b, Point::new_3d(4.0, 6.0, 5.0));
        assert_eq!(b - a, Point::new_3d(2.0, 2.0, 5.0));
        assert_eq!(a * 2.0, Point::new(2.0, 4.0));
        assert_eq!(2.0 * a, Point::new(2.0, 4.0));
        assert_eq!(b / 2.0, Point::new_3d(1.5, 2.0, 2.5));
        assert_eq!(-a, Point::new(-1.0, -2.0));

        let mut c = a;
        c += b;
        c -= a;
        assert_eq!(c, b);
    }

    #[test]
    fn test_point_length_and_normalize() {
        let p = Point::new(3.0, 4.0);
        assert_relative_eq!(p.length(), 5.0);
        assert_relative_eq!(p.normalize().length(), 1.0);
        assert_eq!(Point::ZERO.normalize(), Point::ZERO);
        assert_relative_eq!(Point::new(1.0, 0.0).cross(Point::new(0.0, 1.0)), 1.0);
    }

    #[test]
    fn test_point_serde() {
        let json = serde_json::to_string(&Point::new(1.0, 2.0)).unwrap();
        let back: Point = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Point::new(1.0, 2.0));

        let legacy: Point = serde_json::from_str(r#"{"x":1.0,"y":2.0}"#).unwrap();
        assert_eq!(legacy.z, 0.0);
    }
}
