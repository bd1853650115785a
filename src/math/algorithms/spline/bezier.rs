// src/math/algorithms/spline/bezier.rs

use super::traits::SplineBasis;
use crate::math::types::Point;

/// Kubische Bézier-Kurve, läuft von `p0` nach `p3`
#[derive(Debug, Clone, Copy, Default)]
pub struct BezierSpline;

impl SplineBasis for BezierSpline {
    fn evaluate(&self, [p0, p1, p2, p3]: &[Point; 4], t: f32) -> Point {
        let u = 1.0 - t;
        *p0 * (u * u * u) + *p1 * (3.0 * u * u * t) + *p2 * (3.0 * u * t * t) + *p3 * (t * t * t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_bezier_endpoints_and_midpoint() {
        let controls = [
            Point::new(0.0, 0.0),
            Point::new(0.0, 10.0),
            Point::new(10.0, 10.0),
            Point::new(10.0, 0.0),
        ];
        assert_eq!(BezierSpline.evaluate(&controls, 0.0), controls[0]);
        assert_eq!(BezierSpline.evaluate(&controls, 1.0), controls[3]);

        let mid = BezierSpline.evaluate(&controls, 0.5);
        assert_relative_eq!(mid.x, 5.0);
        assert_relative_eq!(mid.y, 7.5);
    }
}
