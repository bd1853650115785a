// src/math/algorithms/spline/traits.rs

use crate::math::types::Point;

/// Kubische Spline-Basis über genau vier Kontrollwerten.
///
/// Die Bedeutung der vier Werte hängt von der Basis ab: Bézier nutzt vier
/// Kontrollpunkte, Catmull-Rom läuft von `p1` nach `p2`, Hermite interpretiert
/// die letzten beiden Werte als Tangenten.
pub trait SplineBasis {
    /// Wertet das Segment bei `t` in [0, 1] aus
    fn evaluate(&self, controls: &[Point; 4], t: f32) -> Point;

    /// Tastet das Segment in `nsegment + 1` gleichmäßigen Schritten ab (inklusive beider Enden)
    fn sample(&self, controls: &[Point; 4], nsegment: usize) -> Vec<Point> {
        let n = nsegment.max(1);
        (0..=n)
            .map(|j| self.evaluate(controls, j as f32 / n as f32))
            .collect()
    }
}
