//! Flächen-Strategien: Polygone, parametrische Ringe (Kreis, Ellipse,
//! Sektor), Spline-Flächen sowie Pfeil- und Flaggen-Signaturen.
//!
//! Alle Konstruktionen laufen in der lokalen Ebene um den ersten
//! Kontrollpunkt und werden anschließend zurückprojiziert.

use glam::DVec2;

use super::polyline::arc_positions;
use super::{project_points, ShapeComputer, ShapeGeometry};
use crate::core::GeoPosition;
use crate::shared::geodesy::LocalFrame;
use crate::shared::spline_geometry::{bezier_spline_chain, bezier_spline_ring};

/// Geschlossener Ring durch die Punkte in Eingabereihenfolge.
pub struct PolygonShape;

impl ShapeComputer for PolygonShape {
    fn min_point_num(&self) -> usize {
        3
    }

    fn compute(&self, points: &[GeoPosition]) -> ShapeGeometry {
        if points.len() < self.min_point_num() {
            return ShapeGeometry::empty();
        }
        ShapeGeometry::closed(points.to_vec())
    }
}

/// Achsen-paralleles Rechteck aus zwei Diagonal-Ecken (lon/lat).
pub struct RectangleShape;

impl ShapeComputer for RectangleShape {
    fn min_point_num(&self) -> usize {
        2
    }

    fn compute(&self, points: &[GeoPosition]) -> ShapeGeometry {
        if points.len() < self.min_point_num() {
            return ShapeGeometry::empty();
        }
        let a = points[0];
        let b = points[1];
        ShapeGeometry::closed(vec![
            GeoPosition::new(a.lon, a.lat, a.height),
            GeoPosition::new(b.lon, a.lat, a.height),
            GeoPosition::new(b.lon, b.lat, a.height),
            GeoPosition::new(a.lon, b.lat, a.height),
        ])
    }
}

/// Kreis: Mittelpunkt p0, Radius bis p1, gleichmäßig abgetasteter Ring.
pub struct CircleShape {
    /// Segmentanzahl des Rings
    pub segments: usize,
}

impl ShapeComputer for CircleShape {
    fn min_point_num(&self) -> usize {
        2
    }

    fn compute(&self, points: &[GeoPosition]) -> ShapeGeometry {
        if points.len() < self.min_point_num() {
            return ShapeGeometry::empty();
        }
        let (frame, p) = project_points(points);
        let radius = p[1].length();
        ShapeGeometry::closed(sample_ring(&frame, DVec2::ZERO, |ang| {
            DVec2::from_angle(ang) * radius
        }, self.segments, points[0].height))
    }
}

/// Ellipse: Mittelpunkt p0, große Halbachse bis p1, kleine Halbachse
/// aus dem Abstand zu p2. Orientierung folgt p1.
pub struct EllipseShape {
    /// Segmentanzahl des Rings
    pub segments: usize,
}

impl ShapeComputer for EllipseShape {
    fn min_point_num(&self) -> usize {
        3
    }

    fn compute(&self, points: &[GeoPosition]) -> ShapeGeometry {
        if points.len() < self.min_point_num() {
            return ShapeGeometry::empty();
        }
        let (frame, p) = project_points(points);
        let major = p[1].length();
        let minor = p[2].length();
        let dir = p[1].normalize_or_zero();
        let dir = if dir == DVec2::ZERO { DVec2::X } else { dir };
        let perp = DVec2::new(-dir.y, dir.x);
        ShapeGeometry::closed(sample_ring(&frame, DVec2::ZERO, |ang| {
            dir * (major * ang.cos()) + perp * (minor * ang.sin())
        }, self.segments, points[0].height))
    }
}

/// Kreissektor: Mittelpunkt p0, Radius bis p1, Öffnung bis zur Peilung
/// von p2. Ring: Mittelpunkt, Bogen, zurück zum Mittelpunkt.
pub struct SectorAreaShape {
    /// Segmentanzahl des Bogens
    pub segments: usize,
}

impl ShapeComputer for SectorAreaShape {
    fn min_point_num(&self) -> usize {
        3
    }

    fn compute(&self, points: &[GeoPosition]) -> ShapeGeometry {
        if points.len() < self.min_point_num() {
            return ShapeGeometry::empty();
        }
        let (frame, p) = project_points(points);
        let radius = p[1].length();
        let a1 = p[1].y.atan2(p[1].x);
        let a2 = p[2].y.atan2(p[2].x);
        let sweep = (a2 - a1).rem_euclid(std::f64::consts::TAU);

        let n = self.segments.max(2);
        let height = points[0].height;
        let mut positions = Vec::with_capacity(n + 2);
        positions.push(points[0]);
        for i in 0..=n {
            let ang = a1 + sweep * (i as f64 / n as f64);
            positions.push(frame.unproject(DVec2::from_angle(ang) * radius, height));
        }
        ShapeGeometry::closed(positions)
    }
}

/// Kreisbogen-Fläche: Umkreis-Bogen durch drei Punkte, durch die Sehne
/// geschlossen.
pub struct CircleArcAreaShape {
    /// Abtastpunkte entlang des Bogens
    pub samples: usize,
}

impl ShapeComputer for CircleArcAreaShape {
    fn min_point_num(&self) -> usize {
        3
    }

    fn compute(&self, points: &[GeoPosition]) -> ShapeGeometry {
        match arc_positions(points, self.samples) {
            Some(positions) => ShapeGeometry::closed(positions),
            None => ShapeGeometry::empty(),
        }
    }
}

/// Glatte Spline-Fläche: geschlossener interpolierender Ring durch alle
/// Punkte.
pub struct SplineAreaShape {
    /// Zwischenpunkte pro Spline-Segment
    pub samples_per_segment: usize,
    /// Tangenten-Skalierung (0..1)
    pub sharpness: f64,
}

impl ShapeComputer for SplineAreaShape {
    fn min_point_num(&self) -> usize {
        3
    }

    fn compute(&self, points: &[GeoPosition]) -> ShapeGeometry {
        if points.len() < self.min_point_num() {
            return ShapeGeometry::empty();
        }
        let (frame, projected) = project_points(points);
        let ring = bezier_spline_ring(&projected, self.samples_per_segment, self.sharpness);
        let height = points[0].height;
        ShapeGeometry::closed(ring.into_iter().map(|v| frame.unproject(v, height)).collect())
    }
}

/// Einfacher Angriffspfeil entlang der Sehne p0 → p1.
///
/// `square_tail` unterscheidet die eckige Variante (`SquareArrow`) vom
/// spitz zulaufenden `Arrow1`.
pub struct ArrowShape {
    /// Eckiges statt spitz zulaufendes Schwanzende
    pub square_tail: bool,
}

impl ShapeComputer for ArrowShape {
    fn min_point_num(&self) -> usize {
        2
    }

    fn compute(&self, points: &[GeoPosition]) -> ShapeGeometry {
        if points.len() < self.min_point_num() {
            return ShapeGeometry::empty();
        }
        let (frame, p) = project_points(points);
        let chord = p[1];
        let len = chord.length();
        if len < f64::EPSILON {
            return ShapeGeometry::empty();
        }
        let dir = chord / len;
        let perp = DVec2::new(-dir.y, dir.x);
        let shaft_half = len * 0.08;
        let head_half = len * 0.18;
        let neck = chord - dir * (len * 0.3);
        let height = points[0].height;

        let mut ring: Vec<DVec2> = Vec::with_capacity(8);
        if self.square_tail {
            ring.push(-perp * shaft_half);
            ring.push(perp * shaft_half);
        } else {
            ring.push(DVec2::ZERO);
        }
        ring.push(neck + perp * shaft_half);
        ring.push(neck + perp * head_half);
        ring.push(chord);
        ring.push(neck - perp * head_half);
        ring.push(neck - perp * shaft_half);

        ShapeGeometry::closed(
            ring.into_iter()
                .map(|v| frame.unproject(v, height))
                .collect(),
        )
    }
}

/// Pfeil, dessen Körper dem Kontrollpunkt-Pfad folgt; Spitze am letzten
/// Punkt.
pub struct MultiPartArrowShape;

impl ShapeComputer for MultiPartArrowShape {
    fn min_point_num(&self) -> usize {
        3
    }

    fn compute(&self, points: &[GeoPosition]) -> ShapeGeometry {
        if points.len() < self.min_point_num() {
            return ShapeGeometry::empty();
        }
        let (frame, path) = project_points(points);
        let total: f64 = path.windows(2).map(|w| w[0].distance(w[1])).sum();
        if total < f64::EPSILON {
            return ShapeGeometry::empty();
        }
        let shaft_half = total * 0.05;
        let head_half = total * 0.11;
        let head_len = total * 0.18;

        // Körper endet am Halsansatz vor der Spitze
        let neck = point_before_end(&path, head_len);
        let mut body: Vec<DVec2> = path[..path.len() - 1].to_vec();
        body.push(neck);

        let normals = path_normals(&body);
        let n_last = normals[normals.len() - 1];

        let mut ring: Vec<DVec2> = Vec::with_capacity(body.len() * 2 + 3);
        for (v, n) in body.iter().zip(&normals) {
            ring.push(*v + *n * shaft_half);
        }
        // Spitze
        ring.push(neck + n_last * head_half);
        ring.push(path[path.len() - 1]);
        ring.push(neck - n_last * head_half);
        for (v, n) in body.iter().zip(&normals).rev() {
            ring.push(*v - *n * shaft_half);
        }

        let height = points[0].height;
        ShapeGeometry::closed(
            ring.into_iter()
                .map(|v| frame.unproject(v, height))
                .collect(),
        )
    }
}

/// Zangen-Signatur: doppelköpfiger, gebogener Pfeil entlang des
/// Spline-Pfads durch die Kontrollpunkte.
pub struct PincerAttackShape {
    /// Zwischenpunkte pro Spline-Segment
    pub samples_per_segment: usize,
    /// Tangenten-Skalierung (0..1)
    pub sharpness: f64,
}

impl ShapeComputer for PincerAttackShape {
    fn min_point_num(&self) -> usize {
        3
    }

    fn compute(&self, points: &[GeoPosition]) -> ShapeGeometry {
        if points.len() < self.min_point_num() {
            return ShapeGeometry::empty();
        }
        let (frame, anchors) = project_points(points);
        let path = bezier_spline_chain(&anchors, self.samples_per_segment, self.sharpness);
        let total: f64 = path.windows(2).map(|w| w[0].distance(w[1])).sum();
        if total < f64::EPSILON {
            return ShapeGeometry::empty();
        }
        let shaft_half = total * 0.04;
        let head_half = total * 0.09;
        let head_len = total * 0.12;

        let start_neck = point_after_start(&path, head_len);
        let end_neck = point_before_end(&path, head_len);
        let body: Vec<DVec2> = std::iter::once(start_neck)
            .chain(path[1..path.len() - 1].iter().copied())
            .chain(std::iter::once(end_neck))
            .collect();
        let normals = path_normals(&body);
        let n_first = normals[0];
        let n_last = normals[normals.len() - 1];

        let mut ring: Vec<DVec2> = Vec::with_capacity(body.len() * 2 + 6);
        // Kopf am Anfang
        ring.push(path[0]);
        ring.push(start_neck + n_first * head_half);
        for (v, n) in body.iter().zip(&normals) {
            ring.push(*v + *n * shaft_half);
        }
        // Kopf am Ende
        ring.push(end_neck + n_last * head_half);
        ring.push(path[path.len() - 1]);
        ring.push(end_neck - n_last * head_half);
        for (v, n) in body.iter().zip(&normals).rev() {
            ring.push(*v - *n * shaft_half);
        }
        ring.push(start_neck - n_first * head_half);

        let height = points[0].height;
        ShapeGeometry::closed(
            ring.into_iter()
                .map(|v| frame.unproject(v, height))
                .collect(),
        )
    }
}

/// Flaggen-Signatur: Mast von p0 nach p1, Flaggentuch an der Mastspitze.
///
/// `rectangular` unterscheidet `FlagRectangle` von `FlagTriangle`.
pub struct FlagShape {
    /// Rechteckiges statt dreieckiges Flaggentuch
    pub rectangular: bool,
}

impl ShapeComputer for FlagShape {
    fn min_point_num(&self) -> usize {
        2
    }

    fn compute(&self, points: &[GeoPosition]) -> ShapeGeometry {
        if points.len() < self.min_point_num() {
            return ShapeGeometry::empty();
        }
        let (frame, p) = project_points(points);
        let pole = p[1];
        let len = pole.length();
        if len < f64::EPSILON {
            return ShapeGeometry::empty();
        }
        let dir = pole / len;
        let perp = DVec2::new(-dir.y, dir.x);
        let mid = pole - dir * (len * 0.4);
        let cloth = perp * (len * 0.5);
        let height = points[0].height;

        let ring: Vec<DVec2> = if self.rectangular {
            vec![DVec2::ZERO, pole, pole + cloth, mid + cloth, mid]
        } else {
            vec![DVec2::ZERO, pole, mid + cloth, mid]
        };
        ShapeGeometry::closed(
            ring.into_iter()
                .map(|v| frame.unproject(v, height))
                .collect(),
        )
    }
}

// ── Gemeinsame Helfer ───────────────────────────────────────────────

fn sample_ring(
    frame: &LocalFrame,
    center: DVec2,
    eval: impl Fn(f64) -> DVec2,
    segments: usize,
    height: f64,
) -> Vec<GeoPosition> {
    let n = segments.max(8);
    (0..n)
        .map(|i| {
            let ang = std::f64::consts::TAU * (i as f64 / n as f64);
            frame.unproject(center + eval(ang), height)
        })
        .collect()
}

/// Vertex-Normalen einer Polyline (gemittelte Segment-Normalen).
fn path_normals(path: &[DVec2]) -> Vec<DVec2> {
    let n = path.len();
    let mut normals = Vec::with_capacity(n);
    for i in 0..n {
        let before = if i > 0 { path[i] - path[i - 1] } else { DVec2::ZERO };
        let after = if i + 1 < n { path[i + 1] - path[i] } else { DVec2::ZERO };
        let tangent = (before + after).normalize_or_zero();
        let tangent = if tangent == DVec2::ZERO { DVec2::X } else { tangent };
        normals.push(DVec2::new(-tangent.y, tangent.x));
    }
    normals
}

/// Punkt auf dem Pfad im Abstand `dist` vor dem Ende.
fn point_before_end(path: &[DVec2], dist: f64) -> DVec2 {
    let mut remaining = dist;
    for w in path.windows(2).rev() {
        let seg = w[1].distance(w[0]);
        if seg >= remaining {
            return w[1] + (w[0] - w[1]) * (remaining / seg.max(f64::EPSILON));
        }
        remaining -= seg;
    }
    path[0]
}

/// Punkt auf dem Pfad im Abstand `dist` hinter dem Anfang.
fn point_after_start(path: &[DVec2], dist: f64) -> DVec2 {
    let mut remaining = dist;
    for w in path.windows(2) {
        let seg = w[0].distance(w[1]);
        if seg >= remaining {
            return w[0] + (w[1] - w[0]) * (remaining / seg.max(f64::EPSILON));
        }
        remaining -= seg;
    }
    path[path.len() - 1]
}
