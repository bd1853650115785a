// src/math/geometry/polygon/operations/offset.rs

use super::clipping::{ClipTree, ClipperConfig, IntPoint, grouped_region};
use crate::math::geometry::polygon::{
    Polygon, Polyline,
    style::{CapType, JoinType},
};
use geo::{BooleanOps, MultiPolygon};
use std::f64::consts::PI;
use tracing::debug;

type Vec2d = [f64; 2];

/// Behandlung der Pfadenden beim Offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathEnd {
    /// Geschlossene Fläche, wird als Region erweitert bzw. geschrumpft
    ClosedPolygon,
    /// Geschlossener Linienzug, ergibt einen Ring
    ClosedLine,
    OpenButt,
    OpenRound,
    OpenSquare,
}

impl PathEnd {
    pub fn for_polyline(polyline: &Polyline, cap: CapType, fill: bool) -> Self {
        if polyline.closed() {
            return if fill {
                Self::ClosedPolygon
            } else {
                Self::ClosedLine
            };
        }
        match cap {
            CapType::Butt => Self::OpenButt,
            CapType::Round => Self::OpenRound,
            CapType::Square => Self::OpenSquare,
        }
    }

    pub fn is_closed(self) -> bool {
        matches!(self, Self::ClosedPolygon | Self::ClosedLine)
    }

    fn cap(self) -> Option<CapType> {
        match self {
            Self::OpenButt => Some(CapType::Butt),
            Self::OpenRound => Some(CapType::Round),
            Self::OpenSquare => Some(CapType::Square),
            Self::ClosedPolygon | Self::ClosedLine => None,
        }
    }
}

struct OffsetPath {
    points: Vec<IntPoint>,
    join: JoinType,
    end: PathEnd,
    hole: bool,
}

/// Offset von Pfaden im Ganzzahlraster.
///
/// Striche entstehen als Vereinigung einfacher Stücke: ein Viereck pro Segment,
/// ein Keil auf der Außenseite jeder Ecke und Kappen an offenen Enden.
/// Flächen (`ClosedPolygon`) werden um diese Stücke erweitert oder verkleinert;
/// die Fläche ist die Vereinigung jeder Außenkontur minus ihrer folgenden Löcher.
pub struct PolygonOffsetter {
    config: ClipperConfig,
    miter_limit: f64,
    paths: Vec<OffsetPath>,
}

impl PolygonOffsetter {
    pub fn new(config: ClipperConfig) -> Self {
        Self {
            config,
            miter_limit: 2.0,
            paths: Vec::new(),
        }
    }

    /// Werte unter 2 verhalten sich wie 2
    pub fn with_miter_limit(mut self, miter_limit: f64) -> Self {
        self.miter_limit = miter_limit;
        self
    }

    pub fn add_path(&mut self, points: Vec<IntPoint>, join: JoinType, end: PathEnd) {
        self.push_path(points, join, end, false);
    }

    /// Wie `add_path`, zieht den Pfad aber von der vorangehenden Außenkontur ab
    pub fn add_hole_path(&mut self, points: Vec<IntPoint>, join: JoinType, end: PathEnd) {
        self.push_path(points, join, end, true);
    }

    fn push_path(&mut self, points: Vec<IntPoint>, join: JoinType, end: PathEnd, hole: bool) {
        if points.is_empty() {
            return;
        }
        self.paths.push(OffsetPath {
            points,
            join,
            end,
            hole,
        });
    }

    /// Fügt einen Linienzug hinzu (Löcher umgekehrt); `false` wenn er leer ist
    pub fn add_polyline(&mut self, polyline: &Polyline, join: JoinType, end: PathEnd) -> bool {
        if !polyline.is_valid() {
            return false;
        }
        let path = self.config.polyline_path(polyline);
        self.push_path(path, join, end, polyline.hole());
        true
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Führt den Offset mit `delta` Rastereinheiten aus
    pub fn execute(&self, delta: f64) -> ClipTree {
        let region = grouped_region(
            self.paths
                .iter()
                .filter(|p| p.end == PathEnd::ClosedPolygon)
                .map(|p| (&p.points, p.hole)),
        );
        if delta == 0.0 {
            return ClipTree::from_multi_polygon(&region);
        }

        let stroker = Stroker::new(delta.abs(), self.miter_limit, self.config.arc_tolerance);
        let mut boundary = Vec::new();
        let mut strokes = Vec::new();
        for path in &self.paths {
            let points: Vec<Vec2d> = path.points.iter().map(|p| [p.x as f64, p.y as f64]).collect();
            let pieces = stroker.pieces(&points, path.end, path.join);
            if path.end == PathEnd::ClosedPolygon {
                boundary.extend(pieces);
            } else {
                strokes.extend(pieces);
            }
        }

        let piece_count = boundary.len() + strokes.len();
        let boundary = union_all(boundary);
        let mut result = if delta > 0.0 {
            region.union(&boundary)
        } else {
            region.difference(&boundary)
        };
        let strokes = union_all(strokes);
        if !strokes.0.is_empty() {
            result = result.union(&strokes);
        }

        let tree = ClipTree::from_multi_polygon(&result);
        debug!(
            delta,
            paths = self.paths.len(),
            pieces = piece_count,
            nodes = tree.node_count(),
            "polygon offset executed"
        );
        tree
    }
}

/// Offset mehrerer Linienzüge um `width` Welteinheiten.
///
/// `None` für `width == 0` oder wenn kein Linienzug Punkte hat.
pub(crate) fn expand_paths<'a, I>(
    paths: I,
    width: f32,
    join: JoinType,
    miter_limit: f32,
    config: &ClipperConfig,
) -> Option<Polygon>
where
    I: IntoIterator<Item = (&'a Polyline, PathEnd)>,
{
    if width == 0.0 {
        return None;
    }
    let mut offsetter = PolygonOffsetter::new(*config).with_miter_limit(miter_limit as f64);
    let mut added = false;
    for (polyline, end) in paths {
        added |= offsetter.add_polyline(polyline, join, end);
    }
    if !added {
        return None;
    }
    let tree = offsetter.execute(width as f64 * config.scale);
    Some(tree.to_polygon(config))
}

fn union_all(pieces: Vec<geo::Polygon<f64>>) -> MultiPolygon<f64> {
    let mut layer: Vec<MultiPolygon<f64>> = pieces
        .into_iter()
        .map(|piece| MultiPolygon::new(vec![piece]))
        .collect();
    while layer.len() > 1 {
        let mut next = Vec::with_capacity(layer.len().div_ceil(2));
        let mut iter = layer.into_iter();
        while let Some(a) = iter.next() {
            match iter.next() {
                Some(b) => next.push(a.union(&b)),
                None => next.push(a),
            }
        }
        layer = next;
    }
    layer.pop().unwrap_or_else(|| MultiPolygon::new(Vec::new()))
}

/// Erzeugt die einfachen Stücke eines Strichs mit halber Breite `half`
struct Stroker {
    half: f64,
    /// Grenzwert für `1 + n1·n2`, darunter wird aus Miter ein Square-Join
    miter_min: f64,
    step_angle: f64,
}

impl Stroker {
    fn new(half: f64, miter_limit: f64, arc_tolerance: f64) -> Self {
        let miter_min = if miter_limit > 2.0 {
            2.0 / (miter_limit * miter_limit)
        } else {
            0.5
        };
        let tolerance = arc_tolerance.min(half * 0.25);
        let step_angle = 2.0 * (1.0 - tolerance / half).clamp(-1.0, 1.0).acos();
        Self {
            half,
            miter_min,
            step_angle: if step_angle > 0.0 { step_angle } else { PI / 8.0 },
        }
    }

    fn pieces(&self, points: &[Vec2d], end: PathEnd, join: JoinType) -> Vec<geo::Polygon<f64>> {
        let mut pts = points.to_vec();
        pts.dedup();
        if end.is_closed() && pts.len() > 1 && pts.first() == pts.last() {
            pts.pop();
        }

        let mut rings: Vec<Vec<Vec2d>> = Vec::new();
        match pts.len() {
            0 => {}
            1 => {
                let round = match end.cap() {
                    Some(cap) => cap == CapType::Round,
                    None => join == JoinType::Round,
                };
                rings.push(if round {
                    self.circle(pts[0])
                } else {
                    self.square(pts[0])
                });
            }
            n => {
                let closed = end.is_closed();
                let segments = if closed { n } else { n - 1 };
                for i in 0..segments {
                    let (a, b) = (pts[i], pts[(i + 1) % n]);
                    rings.push(self.segment(a, b));
                }

                let joints = if closed { 0..n } else { 1..n - 1 };
                for i in joints {
                    let prev = pts[(i + n - 1) % n];
                    let next = pts[(i + 1) % n];
                    if let Some(wedge) = self.join(prev, pts[i], next, join) {
                        rings.push(wedge);
                    }
                }

                if let Some(cap) = end.cap() {
                    let start_dir = normalize(sub(pts[0], pts[1]));
                    let end_dir = normalize(sub(pts[n - 1], pts[n - 2]));
                    rings.extend(self.cap(pts[0], start_dir, cap));
                    rings.extend(self.cap(pts[n - 1], end_dir, cap));
                }
            }
        }

        rings
            .into_iter()
            .filter(|ring| ring.len() >= 3)
            .map(|ring| {
                let coords: Vec<(f64, f64)> = ring.iter().map(|p| (p[0], p[1])).collect();
                geo::Polygon::new(geo::LineString::from(coords), Vec::new())
            })
            .collect()
    }

    fn segment(&self, a: Vec2d, b: Vec2d) -> Vec<Vec2d> {
        let n = scale(normal(normalize(sub(b, a))), self.half);
        vec![add(a, n), add(b, n), sub(b, n), sub(a, n)]
    }

    /// Keil auf der Außenseite der Ecke bei `p`
    fn join(&self, prev: Vec2d, p: Vec2d, next: Vec2d, join: JoinType) -> Option<Vec<Vec2d>> {
        let d1 = normalize(sub(p, prev));
        let d2 = normalize(sub(next, p));
        let turn = cross(d1, d2);
        let dot_d = dot(d1, d2);

        if 1.0 + dot_d < 1e-9 {
            // Umkehr: wie eine Kappe in Laufrichtung
            let cap = match join {
                JoinType::Round => CapType::Round,
                JoinType::Miter | JoinType::Square => CapType::Square,
            };
            return self.cap(p, d1, cap);
        }
        if turn.abs() < 1e-12 {
            return None;
        }

        let side = if turn > 0.0 { -1.0 } else { 1.0 };
        let v1 = scale(normal(d1), side);
        let v2 = scale(normal(d2), side);
        let a = add(p, scale(v1, self.half));
        let b = add(p, scale(v2, self.half));
        let cos_phi = dot(v1, v2);

        let ring = match join {
            JoinType::Miter if 1.0 + cos_phi >= self.miter_min => {
                let tip = add(p, scale(add(v1, v2), self.half / (1.0 + cos_phi)));
                vec![p, a, tip, b]
            }
            JoinType::Round => {
                let mut ring = vec![p];
                ring.extend(self.arc(p, v1, cross(v1, v2).atan2(cos_phi)));
                ring
            }
            JoinType::Miter | JoinType::Square => {
                let phi = cos_phi.clamp(-1.0, 1.0).acos();
                let t = self.half * (phi / 4.0).tan();
                vec![p, a, add(a, scale(d1, t)), sub(b, scale(d2, t)), b]
            }
        };
        Some(ring)
    }

    /// Kappe am Ende `p`, `dir` zeigt vom Linienzug weg
    fn cap(&self, p: Vec2d, dir: Vec2d, cap: CapType) -> Option<Vec<Vec2d>> {
        let n = scale(normal(dir), self.half);
        match cap {
            CapType::Butt => None,
            CapType::Square => {
                let ext = scale(dir, self.half);
                Some(vec![add(p, n), add(add(p, n), ext), add(sub(p, n), ext), sub(p, n)])
            }
            CapType::Round => Some(self.arc(p, normal(dir), -PI)),
        }
    }

    /// Bogenpunkte um `center` ab Richtung `from` über den Winkel `sweep`
    fn arc(&self, center: Vec2d, from: Vec2d, sweep: f64) -> Vec<Vec2d> {
        let steps = ((sweep.abs() / self.step_angle).ceil() as usize).max(1);
        let start = from[1].atan2(from[0]);
        (0..=steps)
            .map(|i| {
                let angle = start + sweep * i as f64 / steps as f64;
                [
                    center[0] + self.half * angle.cos(),
                    center[1] + self.half * angle.sin(),
                ]
            })
            .collect()
    }

    fn circle(&self, center: Vec2d) -> Vec<Vec2d> {
        let mut ring = self.arc(center, [1.0, 0.0], 2.0 * PI);
        ring.pop();
        ring
    }

    fn square(&self, center: Vec2d) -> Vec<Vec2d> {
        let h = self.half;
        vec![
            [center[0] - h, center[1] - h],
            [center[0] + h, center[1] - h],
            [center[0] + h, center[1] + h],
            [center[0] - h, center[1] + h],
        ]
    }
}

fn add(a: Vec2d, b: Vec2d) -> Vec2d {
    [a[0] + b[0], a[1] + b[1]]
}

fn sub(a: Vec2d, b: Vec2d) -> Vec2d {
    [a[0] - b[0], a[1] - b[1]]
}

fn scale(a: Vec2d, s: f64) -> Vec2d {
    [a[0] * s, a[1] * s]
}

fn dot(a: Vec2d, b: Vec2d) -> f64 {
    a[0] * b[0] + a[1] * b[1]
}

fn cross(a: Vec2d, b: Vec2d) -> f64 {
    a[0] * b[1] - a[1] * b[0]
}

/// Linke Normale
fn normal(d: Vec2d) -> Vec2d {
    [-d[1], d[0]]
}

fn normalize(a: Vec2d) -> Vec2d {
    let len = dot(a, a).sqrt();
    if len == 0.0 { a } else { scale(a, 1.0 / len) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::types::{Bounds, Point};

    fn line(coords: &[f32], closed: bool) -> Polyline {
        Polyline::new(
            coords.chunks(2).map(|c| Point::new(c[0], c[1])).collect(),
            closed,
        )
    }

    fn stroke(polyline: &Polyline, cap: CapType, join: JoinType, limit: f32) -> Polygon {
        polyline.expand(1.0, cap, join, limit).unwrap()
    }

    #[test]
    fn test_path_end_selection() {
        let open = line(&[0.0, 0.0, 1.0, 0.0], false);
        let closed = line(&[0.0, 0.0, 1.0, 0.0, 1.0, 1.0], true);
        assert_eq!(PathEnd::for_polyline(&open, CapType::Round, true), PathEnd::OpenRound);
        assert_eq!(PathEnd::for_polyline(&closed, CapType::Round, true), PathEnd::ClosedPolygon);
        assert_eq!(PathEnd::for_polyline(&closed, CapType::Round, false), PathEnd::ClosedLine);
    }

    #[test]
    fn test_square_cap_extends_line() {
        let l = line(&[10.0, 10.0, 20.0, 10.0], false);
        let outline = stroke(&l, CapType::Square, JoinType::Miter, 2.0);
        assert_eq!(outline.len(), 1);
        assert_eq!(outline[0].len(), 4);
        assert_eq!(outline.bounds(), Bounds::new(9.0, 9.0, 12.0, 2.0));
    }

    #[test]
    fn test_round_cap_adds_arc_points() {
        let l = line(&[10.0, 10.0, 20.0, 10.0], false);
        let outline = stroke(&l, CapType::Round, JoinType::Miter, 2.0);
        assert_eq!(outline.len(), 1);
        assert!(outline[0].len() > 8);
        let b = outline.bounds();
        assert!((b.min.x - 9.0).abs() < 1e-2);
        assert!((b.max.x - 21.0).abs() < 1e-2);
    }

    #[test]
    fn test_miter_limit_falls_back_to_square() {
        // spitzer Winkel, Miter-Spitze weit außerhalb
        let sharp = line(&[0.0, 0.0, 20.0, 0.0, 0.0, 4.0], false);
        let limited = stroke(&sharp, CapType::Butt, JoinType::Miter, 2.0);
        let generous = stroke(&sharp, CapType::Butt, JoinType::Miter, 50.0);
        assert!(generous.bounds().max.x > limited.bounds().max.x + 1.0);
        assert!(limited.bounds().max.x < 21.2);

        // Square-Join liegt im Abstand der halben Breite entlang der äußeren Winkelhalbierenden
        let corner = Point::new(20.0, 0.0);
        let to_prev = (Point::new(0.0, 0.0) - corner).normalize();
        let to_next = (Point::new(0.0, 4.0) - corner).normalize();
        let bisector = Point::new(0.0, 0.0) - (to_prev + to_next).normalize();
        for p in limited[0].iter() {
            assert!((p - corner).dot(bisector) <= 1.0 + 1e-2);
        }
    }

    #[test]
    fn test_round_join_stays_within_radius() {
        let bent = line(&[0.0, 0.0, 10.0, 0.0, 10.0, 10.0], false);
        let outline = stroke(&bent, CapType::Butt, JoinType::Round, 2.0);
        assert_eq!(outline.len(), 1);
        let b = outline.bounds();
        assert!(b.max.x <= 11.0 + 1e-3);
        assert!(b.min.y >= -1.0 - 1e-3);
    }

    #[test]
    fn test_overlapping_outlines_merge() {
        let both = Polygon::from_polylines(vec![
            line(&[0.0, 0.0, 10.0, 0.0, 10.0, 10.0, 0.0, 10.0], true),
            line(&[5.0, 0.0, 15.0, 0.0, 15.0, 10.0, 5.0, 10.0], true),
        ])
        .unwrap();
        let grown = both.expand(1.0, CapType::Butt, JoinType::Miter, 2.0).unwrap();
        assert_eq!(grown.len(), 1);
        assert!(!grown[0].hole());
        assert_eq!(grown[0].len(), 4);
        assert_eq!(grown.bounds(), Bounds::new(-1.0, -1.0, 17.0, 12.0));
    }

    #[test]
    fn test_hole_shrinks_when_expanding() {
        let hole = Polyline::builder(
            [10.0, 10.0, 10.0, 20.0, 20.0, 20.0, 20.0, 10.0]
                .chunks(2)
                .map(|c| Point::new(c[0], c[1]))
                .collect(),
        )
        .closed(true)
        .hole(true)
        .build()
        .unwrap();
        let ring = Polygon::from_polylines(vec![
            line(&[0.0, 0.0, 30.0, 0.0, 30.0, 30.0, 0.0, 30.0], true),
            hole,
        ])
        .unwrap();
        let grown = ring.expand(1.0, CapType::Butt, JoinType::Miter, 2.0).unwrap();
        assert_eq!(grown.len(), 2);
        assert!(!grown[0].hole());
        assert!(grown[1].hole());
        assert_eq!(grown[0].bounds(), Bounds::new(-1.0, -1.0, 32.0, 32.0));
        assert_eq!(grown[1].bounds(), Bounds::new(11.0, 11.0, 8.0, 8.0));
    }

    #[test]
    fn test_offsetter_empty() {
        let offsetter = PolygonOffsetter::new(ClipperConfig::default());
        assert!(offsetter.is_empty());
        assert!(offsetter.execute(1000.0).is_empty());
    }

    #[test]
    fn test_closed_polygon_negative_delta() {
        let mut offsetter = PolygonOffsetter::new(ClipperConfig::default());
        offsetter.add_path(
            vec![
                IntPoint::new(0, 0),
                IntPoint::new(10_000, 0),
                IntPoint::new(10_000, 10_000),
                IntPoint::new(0, 10_000),
            ],
            JoinType::Miter,
            PathEnd::ClosedPolygon,
        );
        let tree = offsetter.execute(-2000.0);
        assert_eq!(tree.children.len(), 1);
        let polygon = tree.to_polygon(&ClipperConfig::default());
        assert_eq!(polygon.bounds(), Bounds::new(2.0, 2.0, 6.0, 6.0));

        assert!(offsetter.execute(-6000.0).is_empty());
    }
}
