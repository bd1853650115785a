// src/math/geometry/polygon/shapes.rs

use crate::math::{
    algorithms::spline::{self, SplineType},
    error::{MathError, MathResult},
    geometry::polygon::{Polygon, Polyline, core::ShapeKind},
    types::{Bounds, Color, Coord3, Point},
    utils::{angles, constants::PI_OVER_2, segments},
};
use serde::{Deserialize, Serialize};

/// Eckradien eines Rechtecks
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RectRound {
    pub left_top: f32,
    pub right_top: f32,
    pub left_bottom: f32,
    pub right_bottom: f32,
}

impl RectRound {
    pub fn new(left_top: f32, right_top: f32, left_bottom: f32, right_bottom: f32) -> Self {
        Self {
            left_top,
            right_top,
            left_bottom,
            right_bottom,
        }
    }

    /// Gleicher Radius für alle Ecken
    pub fn uniform(radius: f32) -> Self {
        Self::new(radius, radius, radius, radius)
    }

    pub fn is_zero(&self) -> bool {
        self.left_top == 0.0
            && self.right_top == 0.0
            && self.left_bottom == 0.0
            && self.right_bottom == 0.0
    }

    /// Begrenzt benachbarte Radien auf die gemeinsame Kantenlänge.
    ///
    /// Der kleinere Radius bleibt erhalten, der größere bekommt den Rest. Ist
    /// schon der kleinere größer als die halbe Kante, werden beide halbiert.
    fn fitted(self, width: f32, height: f32) -> Self {
        let (width, height) = (width.abs(), height.abs());
        // Umlauf: lt -> rt (Breite), rt -> rb (Höhe), rb -> lb (Breite), lb -> lt (Höhe)
        let mut r = [self.left_top, self.right_top, self.right_bottom, self.left_bottom];
        let sizes = [width, height, width, height];

        for (i, &size) in sizes.iter().enumerate() {
            let (a, b) = (i, (i + 1) % 4);
            if r[a] + r[b] <= size {
                continue;
            }
            let (small, large) = if r[a] > r[b] { (b, a) } else { (a, b) };
            if r[small] * 2.0 > size {
                r[small] = size / 2.0;
                r[large] = size / 2.0;
            } else {
                r[large] = size - r[small];
            }
        }

        Self {
            left_top: r[0],
            right_top: r[1],
            right_bottom: r[2],
            left_bottom: r[3],
        }
    }
}

/// Optionen für [`ShapeGenerators::rect`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RectOptions {
    pub round: RectRound,
    /// Bogensegmente pro abgerundeter Ecke, `<= 0` wählt 8
    pub nsegment: i32,
}

impl RectOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_round(mut self, radius: f32) -> Self {
        self.round = RectRound::uniform(radius);
        self
    }

    pub fn with_rounds(mut self, round: RectRound) -> Self {
        self.round = round;
        self
    }

    pub fn with_nsegment(mut self, nsegment: i32) -> Self {
        self.nsegment = nsegment;
        self
    }
}

/// Optionen für [`ShapeGenerators::ellipse`]; Winkel in Grad
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EllipseOptions {
    /// Größe des ausgesparten inneren Bereichs, `(0, 0)` für keine Aussparung
    pub hole_size: Point,
    pub angle_from: f32,
    pub angle_to: f32,
    /// Segmente für den Vollkreis, `<= 0` wählt 32
    pub nsegment: i32,
}

impl Default for EllipseOptions {
    fn default() -> Self {
        Self {
            hole_size: Point::ZERO,
            angle_from: 0.0,
            angle_to: 360.0,
            nsegment: 0,
        }
    }
}

impl EllipseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hole(mut self, hole_size: Point) -> Self {
        self.hole_size = hole_size;
        self
    }

    pub fn with_angles(mut self, angle_from: f32, angle_to: f32) -> Self {
        self.angle_from = angle_from;
        self.angle_to = angle_to;
        self
    }

    pub fn with_nsegment(mut self, nsegment: i32) -> Self {
        self.nsegment = nsegment;
        self
    }

    fn has_hole(&self) -> bool {
        self.hole_size.x != 0.0 || self.hole_size.y != 0.0
    }
}

/// Fabrikfunktionen für Polygone aus Grundformen
pub struct ShapeGenerators;

impl ShapeGenerators {
    /// Ein offener Einzelpunkt-Linienzug pro Punkt
    pub fn points(points: &[Point]) -> Polygon {
        let polylines = points
            .iter()
            .map(|&p| Polyline::new(vec![p], false))
            .collect();
        Polygon::from_parts(polylines, ShapeKind::Contours)
    }

    /// Ein ungefüllter Linienzug
    pub fn line(points: &[Point], closed: bool) -> Polygon {
        let polyline = Polyline::builder(points.to_vec())
            .closed(closed)
            .fill(false)
            .build();
        match polyline {
            Ok(polyline) => Polygon::from_parts(vec![polyline], ShapeKind::Contours),
            Err(_) => Polygon::new(),
        }
    }

    /// Je zwei Punkte bilden eine eigene Strecke
    pub fn lines(points: &[Point]) -> Polygon {
        let polylines = points
            .chunks_exact(2)
            .map(|pair| Polyline::new(pair.to_vec(), false))
            .collect();
        Polygon::from_parts(polylines, ShapeKind::Contours)
    }

    /// Je drei Punkte ein gefülltes Dreieck
    pub fn triangles(
        points: &[Point],
        closed: bool,
        colors: Option<&[Color]>,
        texcoords: Option<&[Coord3]>,
    ) -> MathResult<Polygon> {
        Self::groups(points, 3, closed, colors, texcoords)
    }

    /// Je vier Punkte ein gefülltes Viereck
    pub fn quads(
        points: &[Point],
        closed: bool,
        colors: Option<&[Color]>,
        texcoords: Option<&[Coord3]>,
    ) -> MathResult<Polygon> {
        Self::groups(points, 4, closed, colors, texcoords)
    }

    /// Dreiecksstreifen als Außenkontur (gerade Indizes hin, ungerade zurück)
    /// plus offene innere Diagonale
    pub fn triangle_strip(
        points: &[Point],
        colors: Option<&[Color]>,
        texcoords: Option<&[Coord3]>,
    ) -> MathResult<Polygon> {
        let source = StreamSource::new(points, colors, texcoords)?;
        let size = points.len();
        if size < 3 {
            return Ok(Polygon::new());
        }

        let last = size - 1;
        let (in_last, out_last) = if last % 2 == 0 {
            (last - 1, last)
        } else {
            (last, last - 1)
        };
        let outline: Vec<usize> = std::iter::once(0)
            .chain((1..=in_last).step_by(2))
            .chain((2..=out_last).rev().step_by(2))
            .collect();

        let mut polylines = vec![source.gather(&outline, true, true)?];
        if size >= 4 {
            let inner: Vec<usize> = (1..size - 1).collect();
            polylines.push(source.gather(&inner, false, false)?);
        }
        Ok(Polygon::from_parts(polylines, ShapeKind::Contours))
    }

    /// Dreiecksfächer als Außenkontur plus offene Diagonalen vom ersten Punkt
    pub fn triangle_fan(
        points: &[Point],
        colors: Option<&[Color]>,
        texcoords: Option<&[Coord3]>,
    ) -> MathResult<Polygon> {
        let source = StreamSource::new(points, colors, texcoords)?;
        let size = points.len();
        if size < 3 {
            return Ok(Polygon::new());
        }

        let outline: Vec<usize> = (0..size).collect();
        let mut polylines = vec![source.gather(&outline, true, true)?];
        for i in 2..size - 1 {
            polylines.push(source.gather(&[0, i], false, false)?);
        }
        Ok(Polygon::from_parts(polylines, ShapeKind::Contours))
    }

    /// Viereckstreifen als Außenkontur plus offene Querkanten
    pub fn quad_strip(
        points: &[Point],
        colors: Option<&[Color]>,
        texcoords: Option<&[Coord3]>,
    ) -> MathResult<Polygon> {
        let source = StreamSource::new(points, colors, texcoords)?;
        let mut size = points.len();
        if size < 4 {
            return Ok(Polygon::new());
        }
        if size % 2 != 0 {
            size -= 1;
        }

        let (in_last, out_last) = (size - 2, size - 1);
        let outline: Vec<usize> = (0..=in_last)
            .step_by(2)
            .chain((1..=out_last).rev().step_by(2))
            .collect();

        let mut polylines = vec![source.gather(&outline, true, true)?];
        for i in (2..in_last).step_by(2) {
            polylines.push(source.gather(&[i, i + 1], false, false)?);
        }
        Ok(Polygon::from_parts(polylines, ShapeKind::Contours))
    }

    /// Rechteck mit optional abgerundeten Ecken; leer bei Breite oder Höhe 0
    pub fn rect(x: f32, y: f32, width: f32, height: f32, options: RectOptions) -> Polygon {
        if width == 0.0 || height == 0.0 {
            return Polygon::new();
        }

        let points = if options.round.is_zero() {
            vec![
                Point::new(x, y),
                Point::new(x, y + height),
                Point::new(x + width, y + height),
                Point::new(x + width, y),
            ]
        } else {
            rounded_rect_points(x, y, width, height, options)
        };
        Polygon::from_parts(vec![Polyline::new(points, true)], ShapeKind::Rect)
    }

    pub fn rect_in(bounds: &Bounds, options: RectOptions) -> Polygon {
        Self::rect(bounds.x(), bounds.y(), bounds.width(), bounds.height(), options)
    }

    /// Ellipse oder Bogen in der Box `(x, y, width, height)`.
    ///
    /// Ohne Aussparung beginnt ein Bogen im Mittelpunkt und ist als Fächer
    /// füllbar. Mit Aussparung liefert die volle Ellipse eine Außenkontur und
    /// ein umgekehrtes Loch, ein Bogen eine einzige Kontur aus Außen- und
    /// rückwärts laufendem Innenbogen.
    pub fn ellipse(x: f32, y: f32, width: f32, height: f32, options: EllipseOptions) -> Polygon {
        let (mut from, mut to) = (options.angle_from, options.angle_to);
        if width == 0.0 || height == 0.0 || from == to {
            return Polygon::new();
        }
        if from > to {
            std::mem::swap(&mut from, &mut to);
        }
        if to - from > 360.0 {
            to = from + 360.0;
        }

        let origin = Point::new(x, y);
        let size = Point::new(width, height);
        let hole_size = options.hole_size;
        let hole_origin = origin + (size - hole_size) / 2.0;
        let has_hole = options.has_hole();

        if to - from >= 360.0 {
            let n = segments::for_angle(options.nsegment, 3, 0.0, 360.0);
            let arc = EllipseArc::new(0.0, 360.0, n);

            let outer: Vec<Point> = (0..n).map(|seg| arc.point(origin, size, seg)).collect();
            let mut polylines = vec![Polyline::new(outer, true)];
            if has_hole {
                let inner: Vec<Point> = (0..n)
                    .rev()
                    .map(|seg| arc.point(hole_origin, hole_size, seg))
                    .collect();
                polylines.push(Polyline::new(inner, true).as_hole(true));
            }
            return Polygon::from_parts(polylines, ShapeKind::Ellipse { fan: !has_hole });
        }

        let n = segments::for_angle(options.nsegment, 3, from, to);
        let arc = EllipseArc::new(from, to, n);

        let mut points = Vec::with_capacity(if has_hole { 2 * (n + 1) } else { n + 2 });
        if !has_hole {
            points.push(origin + size / 2.0);
        }
        points.extend((0..=n).map(|seg| arc.point(origin, size, seg)));
        if has_hole {
            points.extend((0..=n).rev().map(|seg| arc.point(hole_origin, hole_size, seg)));
        }
        Polygon::from_parts(
            vec![Polyline::new(points, true)],
            ShapeKind::Ellipse { fan: !has_hole },
        )
    }

    pub fn ellipse_in(bounds: &Bounds, options: EllipseOptions) -> Polygon {
        Self::ellipse(bounds.x(), bounds.y(), bounds.width(), bounds.height(), options)
    }

    /// Ellipse um `center` mit Radien statt Box; `hole_radius` ersetzt `options.hole_size`
    pub fn ellipse_around(
        center: Point,
        radius: Point,
        hole_radius: Point,
        options: EllipseOptions,
    ) -> Polygon {
        Self::ellipse(
            center.x - radius.x,
            center.y - radius.y,
            radius.x * 2.0,
            radius.y * 2.0,
            options.with_hole(hole_radius * 2.0),
        )
    }

    /// Catmull-Rom Kurve durch Gruppen von je vier Punkten
    pub fn curve(points: &[Point], closed: bool, nsegment: i32) -> MathResult<Polygon> {
        Self::spline(SplineType::CatmullRom, points, closed, nsegment)
    }

    /// Kubische Bézier-Kurve aus Gruppen von je vier Kontrollpunkten
    pub fn bezier(points: &[Point], closed: bool, nsegment: i32) -> MathResult<Polygon> {
        Self::spline(SplineType::Bezier, points, closed, nsegment)
    }

    /// Hermite-Kurve aus Gruppen `[p0, p1, v0, v1]`
    pub fn hermite(points: &[Point], closed: bool, nsegment: i32) -> MathResult<Polygon> {
        Self::spline(SplineType::Hermite, points, closed, nsegment)
    }

    fn spline(kind: SplineType, points: &[Point], closed: bool, nsegment: i32) -> MathResult<Polygon> {
        let samples = spline::sample_spline(kind, points, nsegment)?;
        Ok(Self::line(&samples, closed))
    }

    fn groups(
        points: &[Point],
        group: usize,
        closed: bool,
        colors: Option<&[Color]>,
        texcoords: Option<&[Coord3]>,
    ) -> MathResult<Polygon> {
        let source = StreamSource::new(points, colors, texcoords)?;
        let polylines = (0..points.len() / group)
            .map(|g| {
                let indices: Vec<usize> = (g * group..(g + 1) * group).collect();
                source.gather(&indices, closed, true)
            })
            .collect::<MathResult<Vec<_>>>()?;
        Ok(Polygon::from_parts(polylines, ShapeKind::Contours))
    }
}

/// Punkte samt optionaler paralleler Ströme, aus denen per Index Linienzüge entstehen
struct StreamSource<'a> {
    points: &'a [Point],
    colors: Option<&'a [Color]>,
    texcoords: Option<&'a [Coord3]>,
}

impl<'a> StreamSource<'a> {
    fn new(
        points: &'a [Point],
        colors: Option<&'a [Color]>,
        texcoords: Option<&'a [Coord3]>,
    ) -> MathResult<Self> {
        let check = |name: &str, len: Option<usize>| match len {
            Some(len) if len != points.len() => Err(MathError::invalid_argument(format!(
                "{name} length {len} does not match point count {}",
                points.len()
            ))),
            _ => Ok(()),
        };
        check("colors", colors.map(<[Color]>::len))?;
        check("texcoords", texcoords.map(<[Coord3]>::len))?;
        Ok(Self {
            points,
            colors,
            texcoords,
        })
    }

    fn gather(&self, indices: &[usize], closed: bool, fill: bool) -> MathResult<Polyline> {
        fn pick<T: Copy>(values: &[T], indices: &[usize]) -> Vec<T> {
            indices.iter().map(|&i| values[i]).collect()
        }
        Polyline::builder(pick(self.points, indices))
            .closed(closed)
            .fill(fill)
            .maybe_colors(self.colors.map(|c| pick(c, indices)))
            .maybe_texcoords(self.texcoords.map(|t| pick(t, indices)))
            .build()
    }
}

/// Gleichmäßig unterteilter Winkelbereich einer Ellipse
struct EllipseArc {
    radian_from: f32,
    radian_to: f32,
    segments: usize,
}

impl EllipseArc {
    fn new(angle_from: f32, angle_to: f32, segments: usize) -> Self {
        Self {
            radian_from: angles::deg_to_rad(angle_from),
            radian_to: angles::deg_to_rad(angle_to),
            segments,
        }
    }

    /// Punkt `index` auf der Ellipse in der Box `origin`/`size`, y zeigt nach unten
    fn point(&self, origin: Point, size: Point, index: usize) -> Point {
        let pos = index as f32 / self.segments as f32;
        let radian = self.radian_from + (self.radian_to - self.radian_from) * pos;
        let cos = (radian.cos() + 1.0) / 2.0;
        let sin = (-radian.sin() + 1.0) / 2.0;
        Point::new(origin.x + size.x * cos, origin.y + size.y * sin)
    }
}

struct RoundedCorner {
    x: f32,
    y: f32,
    sign_x: f32,
    sign_y: f32,
    round: f32,
}

fn rounded_rect_points(x: f32, y: f32, width: f32, height: f32, options: RectOptions) -> Vec<Point> {
    let nsegment = if options.nsegment > 0 {
        options.nsegment as usize
    } else {
        segments::for_angle(0, 1, 0.0, 90.0)
    };
    let round = options.round.fitted(width, height);

    let sign_x = if width >= 0.0 { 1.0 } else { -1.0 };
    let sign_y = if height >= 0.0 { 1.0 } else { -1.0 };
    let corners = [
        RoundedCorner { x: width, y: 0.0, sign_x: -1.0, sign_y: 1.0, round: round.right_top },
        RoundedCorner { x: 0.0, y: 0.0, sign_x: 1.0, sign_y: 1.0, round: round.left_top },
        RoundedCorner { x: 0.0, y: height, sign_x: 1.0, sign_y: -1.0, round: round.left_bottom },
        RoundedCorner { x: width, y: height, sign_x: -1.0, sign_y: -1.0, round: round.right_bottom },
    ];

    let mut points = Vec::with_capacity(4 * (nsegment + 1));
    for (i, corner) in corners.iter().enumerate() {
        if corner.round <= 0.0 {
            points.push(Point::new(x + corner.x, y + corner.y));
            continue;
        }

        let center_x = x + corner.x + corner.round * corner.sign_x * sign_x;
        let center_y = y + corner.y + corner.round * corner.sign_y * sign_y;
        let radian_offset = PI_OVER_2 * i as f32;
        for seg in 0..=nsegment {
            let radian = radian_offset + (seg as f32 / nsegment as f32) * PI_OVER_2;
            points.push(Point::new(
                center_x + radian.cos() * corner.round * sign_x,
                center_y - radian.sin() * corner.round * sign_y,
            ));
        }
    }
    points
}
