// src/math/geometry/polygon/operations/clipping.rs

use super::boolean::BooleanOperation;
use crate::math::{
    error::{MathError, MathResult},
    geometry::polygon::{Polygon, Polyline},
    types::Point,
    utils::rings,
};
use geo::{BooleanOps, Coord, LineString, MultiLineString, MultiPolygon};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Parameter der Festkomma-Clipping-Engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipperConfig {
    /// Skalierung von Weltkoordinaten in das Ganzzahlraster
    pub scale: f64,
    /// Abstand (Rastereinheiten), unter dem Ergebnispunkte zusammenfallen
    pub clean_distance: f64,
    /// Maximale Sehnenabweichung (Rastereinheiten) für runde Joins und Caps
    pub arc_tolerance: f64,
}

impl ClipperConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_clean_distance(mut self, distance: f64) -> Self {
        self.clean_distance = distance;
        self
    }

    pub fn with_arc_tolerance(mut self, tolerance: f64) -> Self {
        self.arc_tolerance = tolerance;
        self
    }

    pub fn validate(&self) -> MathResult<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(MathError::InvalidConfiguration {
                message: "Clip scale must be a positive number".to_string(),
            });
        }

        if !self.clean_distance.is_finite() || self.clean_distance < 0.0 {
            return Err(MathError::InvalidConfiguration {
                message: "Clean distance must not be negative".to_string(),
            });
        }

        if !self.arc_tolerance.is_finite() || self.arc_tolerance <= 0.0 {
            return Err(MathError::InvalidConfiguration {
                message: "Arc tolerance must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    pub fn to_fixed(&self, p: Point) -> IntPoint {
        IntPoint::new(
            (p.x as f64 * self.scale).round() as i64,
            (p.y as f64 * self.scale).round() as i64,
        )
    }

    pub fn from_fixed(&self, p: IntPoint) -> Point {
        Point::new((p.x as f64 / self.scale) as f32, (p.y as f64 / self.scale) as f32)
    }

    /// Punkte eines Linienzugs im Raster, Löcher in umgekehrter Reihenfolge
    pub fn polyline_path(&self, polyline: &Polyline) -> Vec<IntPoint> {
        if polyline.hole() {
            polyline.iter().rev().map(|p| self.to_fixed(p)).collect()
        } else {
            polyline.iter().map(|p| self.to_fixed(p)).collect()
        }
    }
}

impl Default for ClipperConfig {
    fn default() -> Self {
        Self {
            scale: 1000.0,
            clean_distance: 1.415,
            arc_tolerance: 0.25,
        }
    }
}

/// Punkt im Ganzzahlraster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IntPoint {
    pub x: i64,
    pub y: i64,
}

impl IntPoint {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    fn to_coord(self) -> Coord<f64> {
        Coord {
            x: self.x as f64,
            y: self.y as f64,
        }
    }

    fn from_coord(c: Coord<f64>) -> Self {
        Self::new(c.x.round() as i64, c.y.round() as i64)
    }

    fn to_pair(self) -> [f64; 2] {
        [self.x as f64, self.y as f64]
    }
}

/// Rolle eines Pfades in der Boolean-Operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathRole {
    Subject,
    Clip,
}

/// Knoten des Ergebnisbaums
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClipNode {
    pub contour: Vec<IntPoint>,
    pub is_hole: bool,
    pub is_open: bool,
    pub children: Vec<ClipNode>,
}

impl ClipNode {
    fn closed(contour: Vec<IntPoint>, is_hole: bool) -> Self {
        Self {
            contour,
            is_hole,
            is_open: false,
            children: Vec::new(),
        }
    }

    fn ring(&self) -> Vec<[f64; 2]> {
        self.contour.iter().map(|p| p.to_pair()).collect()
    }

    fn contains(&self, p: [f64; 2]) -> bool {
        rings::contains_point(&self.ring(), p)
    }

    /// Punkt zum Testen der Verschachtelung: Mitte der ersten Kante
    fn sample_point(&self) -> [f64; 2] {
        let a = self.contour[0].to_pair();
        let b = self.contour[1 % self.contour.len()].to_pair();
        [(a[0] + b[0]) * 0.5, (a[1] + b[1]) * 0.5]
    }

    fn count(&self) -> usize {
        1 + self.children.iter().map(ClipNode::count).sum::<usize>()
    }
}

/// Ergebnisbaum einer Clip- oder Offset-Operation (Wurzel ohne Kontur)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClipTree {
    pub children: Vec<ClipNode>,
}

impl ClipTree {
    /// Baut den Baum aus einer Region: Außenkonturen positiv, Löcher negativ orientiert,
    /// Inseln in Löchern als Kinder des Lochs.
    pub fn from_multi_polygon(region: &MultiPolygon<f64>) -> Self {
        let mut outers: Vec<(f64, ClipNode)> = region
            .0
            .iter()
            .filter_map(|polygon| {
                let exterior = ring_points(polygon.exterior());
                if exterior.len() < 3 {
                    return None;
                }
                let area = fixed_area(&exterior);
                let mut node = ClipNode::closed(oriented(exterior, true), false);
                node.children = polygon
                    .interiors()
                    .iter()
                    .map(ring_points)
                    .filter(|ring| ring.len() >= 3)
                    .map(|ring| ClipNode::closed(oriented(ring, false), true))
                    .collect();
                Some((area.abs(), node))
            })
            .collect();

        outers.sort_by(|a, b| b.0.total_cmp(&a.0));

        let mut tree = Self::default();
        for (_, node) in outers {
            insert_outer(&mut tree.children, node);
        }
        tree
    }

    pub fn push_open(&mut self, contour: Vec<IntPoint>) {
        if contour.is_empty() {
            return;
        }
        self.children.push(ClipNode {
            contour,
            is_hole: false,
            is_open: true,
            children: Vec::new(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Anzahl aller Knoten
    pub fn node_count(&self) -> usize {
        self.children.iter().map(ClipNode::count).sum()
    }

    /// Wandelt den Baum in ein Polygon: jede Außenkontur gefolgt von ihren Löchern
    pub fn to_polygon(&self, config: &ClipperConfig) -> Polygon {
        let mut polylines = Vec::new();
        for node in &self.children {
            collect_node(node, config, &mut polylines);
        }
        Polygon::from_parts(polylines, Default::default())
    }
}

fn insert_outer(siblings: &mut Vec<ClipNode>, node: ClipNode) {
    let point = node.sample_point();
    for sibling in siblings.iter_mut() {
        if sibling.is_hole || sibling.is_open || !sibling.contains(point) {
            continue;
        }
        for hole in sibling.children.iter_mut() {
            if hole.is_hole && hole.contains(point) {
                insert_outer(&mut hole.children, node);
                return;
            }
        }
    }
    siblings.push(node);
}

fn collect_node(node: &ClipNode, config: &ClipperConfig, out: &mut Vec<Polyline>) {
    if append_outline(node, config, out) {
        append_holes(node, config, out);
    }
    for child in &node.children {
        collect_node(child, config, out);
    }
}

fn append_outline(node: &ClipNode, config: &ClipperConfig, out: &mut Vec<Polyline>) -> bool {
    if node.contour.is_empty() || node.is_hole {
        return false;
    }
    match create_polyline(&node.contour, !node.is_open, false, config) {
        Some(polyline) => {
            out.push(polyline);
            true
        }
        None => false,
    }
}

fn append_holes(node: &ClipNode, config: &ClipperConfig, out: &mut Vec<Polyline>) {
    for child in &node.children {
        if !child.is_hole {
            return;
        }
        if let Some(polyline) = create_polyline(&child.contour, !child.is_open, true, config) {
            out.push(polyline);
        }
    }
}

fn create_polyline(
    contour: &[IntPoint],
    closed: bool,
    hole: bool,
    config: &ClipperConfig,
) -> Option<Polyline> {
    let cleaned = clean_path(contour, config.clean_distance, closed);
    if cleaned.is_empty() {
        return None;
    }
    let mut points: Vec<Point> = cleaned.iter().map(|p| config.from_fixed(*p)).collect();
    if hole {
        points.reverse();
    }
    Polyline::builder(points)
        .closed(closed)
        .hole(hole)
        .build()
        .ok()
}

/// Entfernt nahe Duplikate, Spitzen und nahezu kollineare Punkte.
///
/// Geschlossene Pfade mit weniger als 3 verbleibenden Punkten werden leer,
/// offene behalten ihre Endpunkte.
pub fn clean_path(path: &[IntPoint], distance: f64, closed: bool) -> Vec<IntPoint> {
    let min_len = if closed { 3 } else { 2 };
    let dist_sq = distance * distance;
    let mut points = path.to_vec();
    points.dedup();
    if closed && points.len() > 1 && points.first() == points.last() {
        points.pop();
    }

    while points.len() >= min_len {
        match find_removable(&points, dist_sq, closed) {
            Some(index) => {
                points.remove(index);
            }
            None => break,
        }
    }

    if points.len() < min_len {
        return Vec::new();
    }
    points
}

fn find_removable(points: &[IntPoint], dist_sq: f64, closed: bool) -> Option<usize> {
    let n = points.len();
    (0..n).find(|&i| {
        if !closed && (i == 0 || i == n - 1) {
            return false;
        }
        let prev = points[(i + n - 1) % n].to_pair();
        let cur = points[i].to_pair();
        let next = points[(i + 1) % n].to_pair();
        distance_sq(prev, cur) <= dist_sq
            || distance_sq(cur, next) <= dist_sq
            || line_distance_sq(cur, prev, next) <= dist_sq
    })
}

fn distance_sq(a: [f64; 2], b: [f64; 2]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    dx * dx + dy * dy
}

/// Quadrierter Abstand von `p` zur Geraden durch `a` und `b`
fn line_distance_sq(p: [f64; 2], a: [f64; 2], b: [f64; 2]) -> f64 {
    let len_sq = distance_sq(a, b);
    if len_sq == 0.0 {
        return 0.0;
    }
    let cross = (b[0] - a[0]) * (p[1] - a[1]) - (b[1] - a[1]) * (p[0] - a[0]);
    cross * cross / len_sq
}

fn ring_points(ring: &LineString<f64>) -> Vec<IntPoint> {
    let mut points: Vec<IntPoint> = ring.0.iter().map(|c| IntPoint::from_coord(*c)).collect();
    points.dedup();
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    points
}

fn fixed_area(points: &[IntPoint]) -> f64 {
    let ring: Vec<[f64; 2]> = points.iter().map(|p| p.to_pair()).collect();
    rings::signed_area(&ring)
}

fn oriented(mut points: Vec<IntPoint>, positive: bool) -> Vec<IntPoint> {
    if (fixed_area(&points) > 0.0) != positive {
        points.reverse();
    }
    points
}

pub(crate) fn to_line_string(path: &[IntPoint], close: bool) -> LineString<f64> {
    let mut coords: Vec<Coord<f64>> = path.iter().map(|p| p.to_coord()).collect();
    if close {
        if let Some(first) = coords.first().copied() {
            coords.push(first);
        }
    }
    LineString::new(coords)
}

/// Geschlossene Pfade nach Even-Odd Regel zu einer Region zusammenfassen
pub(crate) fn even_odd_region<'a, I>(paths: I) -> MultiPolygon<f64>
where
    I: IntoIterator<Item = &'a Vec<IntPoint>>,
{
    let mut region = MultiPolygon::new(Vec::new());
    for ring in paths.into_iter().filter_map(|path| ring_region(path)) {
        region = region.xor(&ring);
    }
    region
}

/// Jede Außenkontur minus der direkt folgenden Löcher, die Gruppen vereinigt.
///
/// Überlappende Außenkonturen verschmelzen, statt sich wie bei Even-Odd
/// gegenseitig auszulöschen. Löcher ohne vorangehende Außenkontur entfallen.
pub(crate) fn grouped_region<'a, I>(paths: I) -> MultiPolygon<f64>
where
    I: IntoIterator<Item = (&'a Vec<IntPoint>, bool)>,
{
    let mut region = MultiPolygon::new(Vec::new());
    let mut group: Option<MultiPolygon<f64>> = None;
    for (path, hole) in paths {
        let Some(ring) = ring_region(path) else {
            continue;
        };
        if hole {
            if let Some(current) = group.as_mut() {
                *current = current.difference(&ring);
            }
        } else if let Some(done) = group.replace(ring) {
            region = region.union(&done);
        }
    }
    if let Some(done) = group {
        region = region.union(&done);
    }
    region
}

fn ring_region(path: &[IntPoint]) -> Option<MultiPolygon<f64>> {
    let mut ring = path.to_vec();
    ring.dedup();
    if ring.len() < 3 || fixed_area(&ring) == 0.0 {
        return None;
    }
    let polygon = geo::Polygon::new(to_line_string(&ring, true), Vec::new());
    Some(MultiPolygon::new(vec![polygon]))
}

struct ClipPath {
    points: Vec<IntPoint>,
    role: PathRole,
    closed: bool,
}

/// Sammelt Subject- und Clip-Pfade und führt Boolean-Operationen im Ganzzahlraster aus.
///
/// Geschlossene Pfade einer Rolle werden nach der Even-Odd Regel kombiniert.
/// Offene Subject-Pfade werden als Linien gegen die Clip-Region geschnitten,
/// offene Clip-Pfade ignoriert.
pub struct PolygonClipper {
    config: ClipperConfig,
    paths: Vec<ClipPath>,
}

impl PolygonClipper {
    pub fn new(config: ClipperConfig) -> Self {
        Self {
            config,
            paths: Vec::new(),
        }
    }

    pub fn config(&self) -> &ClipperConfig {
        &self.config
    }

    pub fn add_path(&mut self, points: Vec<IntPoint>, role: PathRole, closed: bool) {
        if points.is_empty() {
            return;
        }
        self.paths.push(ClipPath {
            points,
            role,
            closed,
        });
    }

    /// Fügt alle Konturen eines Polygons hinzu, Löcher umgekehrt
    pub fn add_polygon(&mut self, polygon: &Polygon, role: PathRole) {
        for polyline in polygon {
            if !polyline.is_valid() {
                continue;
            }
            let path = self.config.polyline_path(polyline);
            self.add_path(path, role, polyline.closed());
        }
    }

    pub fn execute(&self, operation: BooleanOperation) -> ClipTree {
        let closed = |role: PathRole| {
            self.paths
                .iter()
                .filter(move |p| p.role == role && p.closed)
                .map(|p| &p.points)
        };
        let subject = even_odd_region(closed(PathRole::Subject));
        let clip = even_odd_region(closed(PathRole::Clip));

        let region = match operation {
            BooleanOperation::Union => subject.union(&clip),
            BooleanOperation::Intersection => subject.intersection(&clip),
            BooleanOperation::Difference => subject.difference(&clip),
            BooleanOperation::Xor => subject.xor(&clip),
        };
        let mut tree = ClipTree::from_multi_polygon(&region);

        let lines: Vec<LineString<f64>> = self
            .paths
            .iter()
            .filter(|p| p.role == PathRole::Subject && !p.closed)
            .map(|p| to_line_string(&p.points, false))
            .collect();
        if !lines.is_empty() {
            let keep_outside = operation != BooleanOperation::Intersection;
            let kept = if clip.0.is_empty() {
                if keep_outside { lines } else { Vec::new() }
            } else {
                clip.clip(&MultiLineString::new(lines), keep_outside).0
            };
            for line in kept {
                tree.push_open(line.0.iter().map(|c| IntPoint::from_coord(*c)).collect());
            }
        }

        debug!(
            ?operation,
            paths = self.paths.len(),
            nodes = tree.node_count(),
            "polygon clip executed"
        );
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: i64, y: i64, size: i64) -> Vec<IntPoint> {
        vec![
            IntPoint::new(x, y),
            IntPoint::new(x + size, y),
            IntPoint::new(x + size, y + size),
            IntPoint::new(x, y + size),
        ]
    }

    #[test]
    fn test_config_validation() {
        assert!(ClipperConfig::default().validate().is_ok());
        assert!(ClipperConfig::new().with_scale(0.0).validate().is_err());
        assert!(ClipperConfig::new().with_arc_tolerance(-1.0).validate().is_err());
        assert!(ClipperConfig::new().with_clean_distance(-1.0).validate().is_err());
    }

    #[test]
    fn test_fixed_point_conversion() {
        let config = ClipperConfig::default();
        let fixed = config.to_fixed(Point::new(1.5, -2.25));
        assert_eq!(fixed, IntPoint::new(1500, -2250));
        assert_eq!(config.from_fixed(fixed), Point::new(1.5, -2.25));
    }

    #[test]
    fn test_clean_path_removes_collinear_and_duplicates() {
        let path = vec![
            IntPoint::new(0, 0),
            IntPoint::new(500, 0),
            IntPoint::new(1000, 0),
            IntPoint::new(1000, 0),
            IntPoint::new(1000, 1000),
            IntPoint::new(0, 1000),
        ];
        let cleaned = clean_path(&path, 1.415, true);
        assert_eq!(cleaned.len(), 4);
        assert!(!cleaned.contains(&IntPoint::new(500, 0)));
    }

    #[test]
    fn test_clean_path_degenerate() {
        let line = vec![IntPoint::new(0, 0), IntPoint::new(1000, 0), IntPoint::new(2000, 0)];
        assert!(clean_path(&line, 1.415, true).is_empty());

        let open = clean_path(&line, 1.415, false);
        assert_eq!(open, vec![IntPoint::new(0, 0), IntPoint::new(2000, 0)]);
    }

    #[test]
    fn test_union_of_overlapping_squares() {
        let mut clipper = PolygonClipper::new(ClipperConfig::default());
        clipper.add_path(square(0, 0, 10), PathRole::Subject, true);
        clipper.add_path(square(5, 0, 10), PathRole::Clip, true);
        let tree = clipper.execute(BooleanOperation::Union);
        assert_eq!(tree.children.len(), 1);
        assert!(!tree.children[0].is_hole);
        assert!(fixed_area(&tree.children[0].contour) > 0.0);
    }

    #[test]
    fn test_difference_produces_hole_node() {
        let mut clipper = PolygonClipper::new(ClipperConfig::default());
        clipper.add_path(square(0, 0, 30), PathRole::Subject, true);
        clipper.add_path(square(10, 10, 10), PathRole::Clip, true);
        let tree = clipper.execute(BooleanOperation::Difference);
        assert_eq!(tree.children.len(), 1);
        let outer = &tree.children[0];
        assert_eq!(outer.children.len(), 1);
        assert!(outer.children[0].is_hole);
        assert!(fixed_area(&outer.children[0].contour) < 0.0);
    }

    #[test]
    fn test_island_nests_inside_hole() {
        let mut clipper = PolygonClipper::new(ClipperConfig::default());
        clipper.add_path(square(0, 0, 100), PathRole::Subject, true);
        clipper.add_path(square(20, 20, 60), PathRole::Subject, true);
        clipper.add_path(square(40, 40, 20), PathRole::Subject, true);
        let tree = clipper.execute(BooleanOperation::Union);

        assert_eq!(tree.children.len(), 1);
        let hole = &tree.children[0].children[0];
        assert!(hole.is_hole);
        assert_eq!(hole.children.len(), 1);
        assert!(!hole.children[0].is_hole);
        assert_eq!(tree.node_count(), 3);
    }

    #[test]
    fn test_open_subject_lines() {
        let line = vec![IntPoint::new(-10, 5), IntPoint::new(20, 5)];

        let mut inside = PolygonClipper::new(ClipperConfig::default());
        inside.add_path(line.clone(), PathRole::Subject, false);
        inside.add_path(square(0, 0, 10), PathRole::Clip, true);
        let tree = inside.execute(BooleanOperation::Intersection);
        assert_eq!(tree.children.len(), 1);
        assert!(tree.children[0].is_open);

        let mut outside = PolygonClipper::new(ClipperConfig::default());
        outside.add_path(line, PathRole::Subject, false);
        outside.add_path(square(0, 0, 10), PathRole::Clip, true);
        let tree = outside.execute(BooleanOperation::Difference);
        assert_eq!(tree.children.len(), 2);
    }

    #[test]
    fn test_empty_input_gives_empty_tree() {
        let clipper = PolygonClipper::new(ClipperConfig::default());
        let tree = clipper.execute(BooleanOperation::Union);
        assert!(tree.is_empty());
        assert!(tree.to_polygon(&ClipperConfig::default()).is_empty());
    }
}
