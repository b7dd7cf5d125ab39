//! Linien-Strategien: Punktlinie, Großkreis-Linie und Kreisbogen.

use glam::DVec2;

use super::{project_points, ShapeComputer, ShapeGeometry};
use crate::core::GeoPosition;
use crate::shared::geodesy::great_circle_interpolate;

/// Gerade Segmente durch die Punkte in Eingabereihenfolge (Identität).
pub struct PointLineShape;

impl ShapeComputer for PointLineShape {
    fn min_point_num(&self) -> usize {
        2
    }

    fn compute(&self, points: &[GeoPosition]) -> ShapeGeometry {
        if points.len() < self.min_point_num() {
            return ShapeGeometry::empty();
        }
        ShapeGeometry::open(points.to_vec())
    }
}

/// Großkreis-Linie: jedes Punktepaar wird geodätisch interpoliert.
pub struct BeeLineShape {
    /// Zwischenpunkte pro Punktepaar
    pub samples: usize,
}

impl ShapeComputer for BeeLineShape {
    fn min_point_num(&self) -> usize {
        2
    }

    fn compute(&self, points: &[GeoPosition]) -> ShapeGeometry {
        if points.len() < self.min_point_num() {
            return ShapeGeometry::empty();
        }

        let spp = self.samples.max(1);
        let mut positions = Vec::with_capacity((points.len() - 1) * spp + 1);
        for pair in points.windows(2) {
            for s in 0..spp {
                let t = s as f64 / spp as f64;
                positions.push(great_circle_interpolate(&pair[0], &pair[1], t));
            }
        }
        positions.push(*points.last().unwrap_or(&GeoPosition::default()));
        ShapeGeometry::open(positions)
    }
}

/// Kreisbogen durch drei Punkte: Umkreis von p0/p1/p2, Bogen von p0
/// nach p2 durch p1. Kollineare Punkte degenerieren zur Punktlinie.
pub struct CircleArcShape {
    /// Abtastpunkte entlang des Bogens
    pub samples: usize,
}

impl ShapeComputer for CircleArcShape {
    fn min_point_num(&self) -> usize {
        3
    }

    fn compute(&self, points: &[GeoPosition]) -> ShapeGeometry {
        match arc_positions(points, self.samples) {
            Some(positions) => ShapeGeometry::open(positions),
            None => ShapeGeometry::empty(),
        }
    }
}

/// Gemeinsame Bogen-Konstruktion für `CircleArc` und `CircleArcArea`.
/// `None` unterhalb der Mindest-Punktzahl.
pub(crate) fn arc_positions(points: &[GeoPosition], samples: usize) -> Option<Vec<GeoPosition>> {
    if points.len() < 3 {
        return None;
    }

    let (frame, p) = project_points(points);
    let Some(center) = circumcenter(p[0], p[1], p[2]) else {
        // Kollinear: gerade Linie durch die drei Punkte
        return Some(points[..3].to_vec());
    };

    let radius = center.distance(p[0]);
    let a0 = angle_of(p[0] - center);
    let a1 = angle_of(p[1] - center);
    let a2 = angle_of(p[2] - center);
    let sweep = arc_sweep(a0, a1, a2);

    let n = samples.max(2);
    let h0 = points[0].height;
    let h2 = points[2].height;
    let positions = (0..=n)
        .map(|i| {
            let t = i as f64 / n as f64;
            let v = center + DVec2::from_angle(a0 + sweep * t) * radius;
            frame.unproject(v, h0 + (h2 - h0) * t)
        })
        .collect();
    Some(positions)
}

/// Umkreis-Mittelpunkt dreier Punkte, `None` bei (nahezu) Kollinearität.
pub(crate) fn circumcenter(a: DVec2, b: DVec2, c: DVec2) -> Option<DVec2> {
    let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
    if d.abs() < 1e-9 {
        return None;
    }
    let ux = (a.length_squared() * (b.y - c.y)
        + b.length_squared() * (c.y - a.y)
        + c.length_squared() * (a.y - b.y))
        / d;
    let uy = (a.length_squared() * (c.x - b.x)
        + b.length_squared() * (a.x - c.x)
        + c.length_squared() * (b.x - a.x))
        / d;
    Some(DVec2::new(ux, uy))
}

fn angle_of(v: DVec2) -> f64 {
    v.y.atan2(v.x)
}

/// Vorzeichenbehafteter Bogen von `a0` nach `a2`, so dass `a1` auf dem
/// Bogen liegt.
fn arc_sweep(a0: f64, a1: f64, a2: f64) -> f64 {
    let tau = std::f64::consts::TAU;
    let ccw = (a2 - a0).rem_euclid(tau);
    let mid = (a1 - a0).rem_euclid(tau);
    if mid <= ccw {
        ccw
    } else {
        ccw - tau
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn point_line_is_identity() {
        let points = vec![
            GeoPosition::ground(0.0, 0.0),
            GeoPosition::ground(1.0, 1.0),
            GeoPosition::ground(2.0, 0.0),
        ];
        let geometry = PointLineShape.compute(&points);
        assert_eq!(geometry.positions, points);
    }

    #[test]
    fn point_line_below_minimum_is_empty() {
        let one = vec![GeoPosition::ground(0.0, 0.0)];
        assert!(PointLineShape.compute(&one).is_empty());
    }

    #[test]
    fn bee_line_preserves_endpoints() {
        let points = vec![GeoPosition::ground(0.0, 0.0), GeoPosition::ground(40.0, 30.0)];
        let geometry = BeeLineShape { samples: 16 }.compute(&points);
        assert_eq!(geometry.positions.len(), 17);
        assert_relative_eq!(geometry.positions[0].lon, 0.0, epsilon = 1e-9);
        let last = geometry.positions.last().unwrap();
        assert_relative_eq!(last.lon, 40.0, epsilon = 1e-9);
        assert_relative_eq!(last.lat, 30.0, epsilon = 1e-9);
    }

    #[test]
    fn circumcenter_of_right_triangle() {
        let c = circumcenter(
            DVec2::new(0.0, 0.0),
            DVec2::new(10.0, 0.0),
            DVec2::new(0.0, 10.0),
        )
        .expect("Mittelpunkt erwartet");
        assert_relative_eq!(c.x, 5.0, epsilon = 1e-9);
        assert_relative_eq!(c.y, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn collinear_points_fall_back_to_line() {
        let points = vec![
            GeoPosition::ground(0.0, 0.0),
            GeoPosition::ground(0.1, 0.0),
            GeoPosition::ground(0.2, 0.0),
        ];
        let geometry = CircleArcShape { samples: 16 }.compute(&points);
        assert_eq!(geometry.positions, points);
    }

    #[test]
    fn arc_passes_near_middle_point() {
        let points = vec![
            GeoPosition::ground(0.0, 0.0),
            GeoPosition::ground(0.05, 0.05),
            GeoPosition::ground(0.1, 0.0),
        ];
        let geometry = CircleArcShape { samples: 64 }.compute(&points);
        assert!(!geometry.is_empty());

        // Der Bogen beginnt und endet auf den Ankern
        assert_relative_eq!(geometry.positions[0].lon, 0.0, epsilon = 1e-6);
        assert_relative_eq!(geometry.positions.last().unwrap().lon, 0.1, epsilon = 1e-6);

        // und kommt dem mittleren Punkt nahe
        let min_dist = geometry
            .positions
            .iter()
            .map(|p| ((p.lon - 0.05).powi(2) + (p.lat - 0.05).powi(2)).sqrt())
            .fold(f64::INFINITY, f64::min);
        assert!(min_dist < 0.005, "Minimalabstand: {min_dist}");
    }
}
