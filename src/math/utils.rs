// src/math/utils.rs

/// Mathematische Konstanten
pub mod constants {
    pub const PI: f32 = std::f32::consts::PI;
    pub const PI_OVER_2: f32 = std::f32::consts::PI / 2.0;

    /// Standard-Segmentanzahl für einen vollen Kreis
    pub const DEFAULT_CIRCLE_SEGMENTS: i32 = 32;
    /// Standard-Segmentanzahl pro Splinegruppe
    pub const DEFAULT_SPLINE_SEGMENTS: i32 = 16;
    /// Standard Miter-Limit
    pub const DEFAULT_MITER_LIMIT: f32 = 2.0;
}

/// Winkel-Hilfsfunktionen
pub mod angles {
    use super::constants::PI;

    /// Konvertiert Grad zu Radiant
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * PI / 180.0
    }
}

/// Segmentierung von Bögen
pub mod segments {
    use super::constants::DEFAULT_CIRCLE_SEGMENTS;

    /// Anzahl der Segmente für einen Bogen von `angle_from` bis `angle_to` (Grad).
    ///
    /// `nsegment <= 0` wählt den Standardwert für einen Vollkreis, `minimum`
    /// ist die Untergrenze vor der Skalierung auf den Bogenanteil.
    pub fn for_angle(nsegment: i32, minimum: i32, angle_from: f32, angle_to: f32) -> usize {
        let mut n = if nsegment <= 0 {
            DEFAULT_CIRCLE_SEGMENTS
        } else {
            nsegment
        };
        if n < minimum {
            n = minimum;
        }
        let fraction = (angle_to - angle_from).abs() / 360.0;
        let scaled = (n as f32 * fraction) as i32;
        scaled.max(1) as usize
    }
}

/// Ringe und Punkt-in-Polygon Tests auf f64-Koordinaten
pub mod rings {
    /// Vorzeichenbehaftete Fläche (Shoelace)
    pub fn signed_area(ring: &[[f64; 2]]) -> f64 {
        let n = ring.len();
        if n < 3 {
            return 0.0;
        }
        let mut sum = 0.0;
        for i in 0..n {
            let a = ring[i];
            let b = ring[(i + 1) % n];
            sum += a[0] * b[1] - b[0] * a[1];
        }
        sum * 0.5
    }

    /// Even-odd Test, Kanten auf der Grenze zählen nicht sicher
    pub fn contains_point(ring: &[[f64; 2]], p: [f64; 2]) -> bool {
        let n = ring.len();
        if n < 3 {
            return false;
        }
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let (a, b) = (ring[i], ring[j]);
            if (a[1] > p[1]) != (b[1] > p[1]) {
                let x = (b[0] - a[0]) * (p[1] - a[1]) / (b[1] - a[1]) + a[0];
                if p[0] < x {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_segments_for_angle() {
        assert_eq!(segments::for_angle(0, 3, 0.0, 360.0), 32);
        assert_eq!(segments::for_angle(4, 3, 0.0, 360.0), 4);
        assert_eq!(segments::for_angle(2, 3, 0.0, 360.0), 3);
        assert_eq!(segments::for_angle(32, 3, 0.0, 90.0), 8);
        assert_eq!(segments::for_angle(1, 1, 0.0, 10.0), 1);
    }

    #[test]
    fn test_ring_helpers() {
        let square = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
        assert!((rings::signed_area(&square) - 1.0).abs() < 1e-12);
        assert!(rings::contains_point(&square, [0.5, 0.5]));
        assert!(!rings::contains_point(&square, [1.5, 0.5]));
    }

    #[test]
    fn test_angles() {
        assert_relative_eq!(angles::deg_to_rad(180.0), constants::PI);
        assert_relative_eq!(angles::deg_to_rad(90.0), constants::PI_OVER_2);
    }
}
