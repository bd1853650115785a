// src/math/algorithms/spline/hermite.rs

use super::traits::SplineBasis;
use crate::math::types::Point;

/// Kubischer Hermite-Spline: `[p0, p1, v0, v1]`, Positionen gefolgt von Tangenten
#[derive(Debug, Clone, Copy, Default)]
pub struct HermiteSpline;

impl SplineBasis for HermiteSpline {
    fn evaluate(&self, [p0, p1, v0, v1]: &[Point; 4], t: f32) -> Point {
        let t2 = t * t;
        let t3 = t2 * t;
        let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
        let h10 = t3 - 2.0 * t2 + t;
        let h01 = -2.0 * t3 + 3.0 * t2;
        let h11 = t3 - t2;
        *p0 * h00 + *v0 * h10 + *p1 * h01 + *v1 * h11
    }
}
