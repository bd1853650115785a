// src/math/geometry/polygon/operations/triangulation.rs

use crate::math::{
    error::{MathError, MathResult},
    geometry::polygon::{Polygon, Polyline},
    types::{Color, Coord3, Point},
    utils::rings,
};
use spade::handles::FixedVertexHandle;
use spade::{ConstrainedDelaunayTriangulation, Point2, Triangulation as _};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Ein Dreieck aus drei Punkten
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub a: Point,
    pub b: Point,
    pub c: Point,
}

impl Triangle {
    pub fn new(a: Point, b: Point, c: Point) -> Self {
        Self { a, b, c }
    }

    /// Vorzeichenbehaftete Fläche, positiv gegen den Uhrzeigersinn (y nach oben)
    pub fn signed_area(&self) -> f32 {
        (self.b - self.a).cross(self.c - self.a) * 0.5
    }

    pub fn area(&self) -> f32 {
        self.signed_area().abs()
    }
}

/// Indiziertes Ergebnis der Triangulierung, direkt als Vertex-/Indexpuffer nutzbar
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Triangulation {
    points: Vec<Point>,
    colors: Option<Vec<Color>>,
    texcoords: Option<Vec<Coord3>>,
    indices: Vec<u32>,
}

impl Triangulation {
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn colors(&self) -> Option<&[Color]> {
        self.colors.as_deref()
    }

    pub fn texcoords(&self) -> Option<&[Coord3]> {
        self.texcoords.as_deref()
    }

    /// Drei Indizes pro Dreieck
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.indices.chunks_exact(3).map(|t| {
            Triangle::new(
                self.points[t[0] as usize],
                self.points[t[1] as usize],
                self.points[t[2] as usize],
            )
        })
    }

    /// Flache Punktliste, drei Punkte pro Dreieck
    pub fn triangle_points(&self) -> Vec<Point> {
        self.indices
            .iter()
            .map(|&i| self.points[i as usize])
            .collect()
    }

    /// Summe der Dreiecksflächen
    pub fn area(&self) -> f32 {
        self.triangles().map(|t| t.area()).sum()
    }
}

/// Sammelt Vertices samt optionaler Farb- und Texturströme über mehrere Konturen
#[derive(Default)]
struct TriangulationBuilder {
    points: Vec<Point>,
    colors: Vec<Color>,
    texcoords: Vec<Coord3>,
    contours: usize,
    contours_with_colors: usize,
    contours_with_texcoords: usize,
    indices: Vec<u32>,
}

impl TriangulationBuilder {
    fn base(&self) -> usize {
        self.points.len()
    }

    fn append(&mut self, polyline: &Polyline) {
        self.contours += 1;
        self.points.extend(polyline.iter());
        if let Some(colors) = polyline.colors() {
            self.colors.extend_from_slice(colors);
            self.contours_with_colors += 1;
        }
        if let Some(texcoords) = polyline.texcoords() {
            self.texcoords.extend_from_slice(texcoords);
            self.contours_with_texcoords += 1;
        }
    }

    fn finish(self) -> Triangulation {
        let colors = stream("colors", self.colors, self.contours_with_colors, self.contours);
        let texcoords = stream(
            "texcoords",
            self.texcoords,
            self.contours_with_texcoords,
            self.contours,
        );
        Triangulation {
            points: self.points,
            colors,
            texcoords,
            indices: self.indices,
        }
    }
}

fn stream<T>(name: &str, values: Vec<T>, with: usize, total: usize) -> Option<Vec<T>> {
    if with == 0 {
        return None;
    }
    if with != total {
        warn!(
            stream = name,
            with, total, "not every contour carries the stream, dropping it"
        );
        return None;
    }
    Some(values)
}

/// Triangulierungsverfahren
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TriangulationAlgorithm {
    /// Fächer für Rechtecke und Ellipsen ohne Loch, sonst Constrained Delaunay
    #[default]
    Auto,
    ConstrainedDelaunay,
    /// Fächer ab dem ersten Punkt jeder Kontur (nur für konvexe Konturen korrekt)
    Fan,
}

/// Trianguliert die füllbaren Konturen eines Polygons
#[derive(Debug, Clone, Default)]
pub struct PolygonTriangulator {
    algorithm: TriangulationAlgorithm,
}

impl PolygonTriangulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_algorithm(mut self, algorithm: TriangulationAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Konturen mit mindestens 3 Punkten, die gefüllt werden oder Loch sind
    pub fn can_triangulate(polyline: &Polyline) -> bool {
        (polyline.fill() || polyline.hole()) && polyline.len() >= 3
    }

    pub fn triangulate(&self, polygon: &Polygon) -> Triangulation {
        let use_fan = match self.algorithm {
            TriangulationAlgorithm::Auto => polygon.kind().is_fan() && polygon.len() == 1,
            TriangulationAlgorithm::ConstrainedDelaunay => false,
            TriangulationAlgorithm::Fan => true,
        };

        let mut builder = TriangulationBuilder::default();
        if use_fan {
            for polyline in polygon.iter().filter(|p| Self::can_triangulate(p)) {
                Self::fan(polyline, &mut builder);
            }
        } else {
            for (outer, holes) in Self::groups(polygon) {
                if let Err(err) = Self::constrained(outer, &holes, &mut builder) {
                    warn!(%err, "skipping contour group");
                }
            }
        }

        let triangulation = builder.finish();
        debug!(
            contours = polygon.len(),
            triangles = triangulation.triangle_count(),
            "polygon triangulated"
        );
        triangulation
    }

    /// Außenkonturen mit den direkt folgenden Löchern
    fn groups(polygon: &Polygon) -> Vec<(&Polyline, Vec<&Polyline>)> {
        let mut groups: Vec<(&Polyline, Vec<&Polyline>)> = Vec::new();
        let mut open_group = false;
        for polyline in polygon {
            if !polyline.hole() {
                open_group = Self::can_triangulate(polyline);
                if open_group {
                    groups.push((polyline, Vec::new()));
                }
                continue;
            }
            match groups.last_mut() {
                Some((_, holes)) if open_group && Self::can_triangulate(polyline) => {
                    holes.push(polyline)
                }
                _ => debug!("skipping hole without fillable outline"),
            }
        }
        groups
    }

    fn fan(polyline: &Polyline, builder: &mut TriangulationBuilder) {
        let base = builder.base() as u32;
        builder.append(polyline);
        for i in 1..polyline.len() as u32 - 1 {
            builder.indices.extend_from_slice(&[base, base + i, base + i + 1]);
        }
    }

    fn constrained(
        outer: &Polyline,
        holes: &[&Polyline],
        builder: &mut TriangulationBuilder,
    ) -> MathResult<()> {
        let contours: Vec<&Polyline> = std::iter::once(outer).chain(holes.iter().copied()).collect();
        let base = builder.base();

        let mut cdt = ConstrainedDelaunayTriangulation::<Point2<f64>>::new();
        let mut vertex_index: HashMap<FixedVertexHandle, u32> = HashMap::new();
        let mut contour_handles = Vec::with_capacity(contours.len());
        let mut offset = base;
        for contour in &contours {
            let mut handles = Vec::with_capacity(contour.len());
            for (i, point) in contour.iter().enumerate() {
                let handle = cdt.insert(Point2::from(point)).map_err(|err| {
                    MathError::TriangulationFailed {
                        reason: format!("cannot insert {point}: {err:?}"),
                    }
                })?;
                vertex_index.entry(handle).or_insert((offset + i) as u32);
                handles.push(handle);
            }
            offset += contour.len();
            contour_handles.push(handles);
        }

        for handles in &contour_handles {
            for (i, &from) in handles.iter().enumerate() {
                let to = handles[(i + 1) % handles.len()];
                if from == to {
                    continue;
                }
                if cdt.can_add_constraint(from, to) {
                    cdt.add_constraint(from, to);
                } else {
                    warn!("skipping contour edge that crosses another edge");
                }
            }
        }

        let contour_rings: Vec<Vec<[f64; 2]>> = contours
            .iter()
            .map(|c| c.iter().map(Point::to_f64_pair).collect())
            .collect();
        let flip = rings::signed_area(&contour_rings[0]) < 0.0;

        let mut indices = Vec::new();
        for face in cdt.inner_faces() {
            let [a, b, c] = face.vertices();
            let (pa, pb, pc) = (a.position(), b.position(), c.position());
            let centroid = [(pa.x + pb.x + pc.x) / 3.0, (pa.y + pb.y + pc.y) / 3.0];
            let crossings = contour_rings
                .iter()
                .filter(|ring| rings::contains_point(ring, centroid))
                .count();
            if crossings % 2 == 0 {
                continue;
            }

            let lookup = |h: FixedVertexHandle| vertex_index.get(&h).copied();
            if let (Some(ia), Some(ib), Some(ic)) = (lookup(a.fix()), lookup(b.fix()), lookup(c.fix())) {
                if flip {
                    indices.extend_from_slice(&[ia, ic, ib]);
                } else {
                    indices.extend_from_slice(&[ia, ib, ic]);
                }
            }
        }

        for contour in &contours {
            builder.append(contour);
        }
        builder.indices.extend(indices);
        Ok(())
    }
}

/// Hilfsfunktionen rund um Triangulierungen
pub struct TriangulationUtils;

impl TriangulationUtils {
    /// Gesamtfläche einer flachen Dreiecksliste
    pub fn total_area(triangle_points: &[Point]) -> f32 {
        triangle_points
            .chunks_exact(3)
            .map(|t| Triangle::new(t[0], t[1], t[2]).area())
            .sum()
    }
}
