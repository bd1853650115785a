// src/math/algorithms/spline/catmull_rom.rs

use super::traits::SplineBasis;
use crate::math::types::Point;

/// Uniformer Catmull-Rom Spline; das Segment interpoliert von `p1` nach `p2`,
/// `p0` und `p3` bestimmen nur die Tangenten.
#[derive(Debug, Clone, Copy, Default)]
pub struct CatmullRomSpline;

impl SplineBasis for CatmullRomSpline {
    fn evaluate(&self, [p0, p1, p2, p3]: &[Point; 4], t: f32) -> Point {
        let (p0, p1, p2, p3) = (*p0, *p1, *p2, *p3);
        let t2 = t * t;
        let t3 = t2 * t;
        (p1 * 2.0
            + (p2 - p0) * t
            + (p0 * 2.0 - p1 * 5.0 + p2 * 4.0 - p3) * t2
            + (p1 * 3.0 - p0 - p2 * 3.0 + p3) * t3)
            * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_passes_through_inner_points() {
        let controls = [
            Point::new(-10.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(10.0, 5.0),
            Point::new(20.0, 5.0),
        ];
        let start = CatmullRomSpline.evaluate(&controls, 0.0);
        let end = CatmullRomSpline.evaluate(&controls, 1.0);
        assert_relative_eq!(start.x, 0.0);
        assert_relative_eq!(start.y, 0.0);
        assert_relative_eq!(end.x, 10.0);
        assert_relative_eq!(end.y, 5.0);
    }

    #[test]
    fn test_collinear_controls_stay_on_line() {
        let controls = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 2.0),
            Point::new(3.0, 3.0),
        ];
        for p in CatmullRomSpline.sample(&controls, 8) {
            assert_relative_eq!(p.x, p.y, epsilon = 1e-5);
        }
    }
}
