// src/math/algorithms/spline/mod.rs

pub mod bezier;
pub mod catmull_rom;
pub mod hermite;
pub mod traits;

pub use self::bezier::BezierSpline;
pub use self::catmull_rom::CatmullRomSpline;
pub use self::hermite::HermiteSpline;
pub use self::traits::SplineBasis;

use crate::math::{
    error::{MathError, MathResult},
    types::Point,
    utils::constants,
};

/// Auswahl der Spline-Basis zur Laufzeit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SplineType {
    Bezier,
    Hermite,
    CatmullRom,
}

impl SplineType {
    fn basis(self) -> &'static dyn SplineBasis {
        match self {
            SplineType::Bezier => &BezierSpline,
            SplineType::Hermite => &HermiteSpline,
            SplineType::CatmullRom => &CatmullRomSpline,
        }
    }

    pub fn evaluate(self, controls: &[Point; 4], t: f32) -> Point {
        self.basis().evaluate(controls, t)
    }
}

/// Tastet Gruppen von je vier Kontrollwerten ab und hängt alle Samples aneinander.
///
/// Jede Gruppe liefert `nsegment + 1` Punkte, `nsegment <= 0` wählt
/// [`constants::DEFAULT_SPLINE_SEGMENTS`].
pub fn sample_spline(kind: SplineType, points: &[Point], nsegment: i32) -> MathResult<Vec<Point>> {
    if points.len() % 4 != 0 {
        return Err(MathError::invalid_argument(format!(
            "spline points must come in groups of 4, got {}",
            points.len()
        )));
    }

    let nsegment = if nsegment <= 0 {
        constants::DEFAULT_SPLINE_SEGMENTS
    } else {
        nsegment
    } as usize;

    let basis = kind.basis();
    let mut result = Vec::with_capacity((nsegment + 1) * points.len() / 4);
    for group in points.chunks_exact(4) {
        let controls = [group[0], group[1], group[2], group[3]];
        result.extend(basis.sample(&controls, nsegment));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 10.0),
            Point::new(10.0, 10.0),
            Point::new(10.0, 0.0),
        ]
    }

    #[test]
    fn test_sample_counts() {
        assert_eq!(sample_spline(SplineType::Bezier, &square(), 0).unwrap().len(), 17);
        assert_eq!(sample_spline(SplineType::Bezier, &square(), 4).unwrap().len(), 5);

        let two_groups: Vec<Point> = square().into_iter().chain(square()).collect();
        assert_eq!(
            sample_spline(SplineType::CatmullRom, &two_groups, 3).unwrap().len(),
            8
        );
        assert!(sample_spline(SplineType::Hermite, &[], 3).unwrap().is_empty());
    }

    #[test]
    fn test_group_size_is_checked() {
        let err = sample_spline(SplineType::Bezier, &square()[..3], 4);
        assert!(matches!(err, Err(MathError::InvalidArgument { .. })));
    }

    #[test]
    fn test_dispatch_matches_basis() {
        let controls = [square()[0], square()[1], square()[2], square()[3]];
        assert_eq!(
            SplineType::Bezier.evaluate(&controls, 0.25),
            BezierSpline.evaluate(&controls, 0.25)
        );
        assert_eq!(
            SplineType::CatmullRom.evaluate(&controls, 0.25),
            CatmullRomSpline.evaluate(&controls, 0.25)
        );
    }
}
