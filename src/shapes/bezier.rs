//! Bézier-Kurven: quadratisch, kubisch und beliebige Ordnung.
//!
//! Die Kontrollpunkte bilden das Kontroll-Netz der Kurve (die Kurve
//! läuft durch den ersten und letzten Punkt, die inneren Punkte ziehen).
//! Höhen werden linear zwischen Start- und Endpunkt interpoliert.

use glam::DVec2;

use super::{project_points, ShapeComputer, ShapeGeometry};
use crate::core::GeoPosition;
use crate::shared::spline_geometry::{cubic_bezier, de_casteljau, quadratic_bezier};

/// Quadratische Bézier-Kurve über die ersten drei Kontrollpunkte.
pub struct Bezier1Shape {
    /// Abtastpunkte entlang der Kurve
    pub samples: usize,
}

impl ShapeComputer for Bezier1Shape {
    fn min_point_num(&self) -> usize {
        3
    }

    fn compute(&self, points: &[GeoPosition]) -> ShapeGeometry {
        if points.len() < self.min_point_num() {
            return ShapeGeometry::empty();
        }
        let (frame, p) = project_points(points);
        sample_curve(
            |t| quadratic_bezier(p[0], p[1], p[2], t),
            &frame,
            points[0].height,
            points[2].height,
            self.samples,
        )
    }
}

/// Kubische Bézier-Kurve über die ersten vier Kontrollpunkte.
pub struct Bezier2Shape {
    /// Abtastpunkte entlang der Kurve
    pub samples: usize,
}

impl ShapeComputer for Bezier2Shape {
    fn min_point_num(&self) -> usize {
        4
    }

    fn compute(&self, points: &[GeoPosition]) -> ShapeGeometry {
        if points.len() < self.min_point_num() {
            return ShapeGeometry::empty();
        }
        let (frame, p) = project_points(points);
        sample_curve(
            |t| cubic_bezier(p[0], p[1], p[2], p[3], t),
            &frame,
            points[0].height,
            points[3].height,
            self.samples,
        )
    }
}

/// Bézier-Kurve beliebiger Ordnung über alle Kontrollpunkte
/// (De-Casteljau-Schema).
pub struct BezierNShape {
    /// Abtastpunkte entlang der Kurve
    pub samples: usize,
}

impl ShapeComputer for BezierNShape {
    fn min_point_num(&self) -> usize {
        3
    }

    fn compute(&self, points: &[GeoPosition]) -> ShapeGeometry {
        if points.len() < self.min_point_num() {
            return ShapeGeometry::empty();
        }
        let (frame, p) = project_points(points);
        let h_last = points[points.len() - 1].height;
        sample_curve(
            |t| de_casteljau(&p, t),
            &frame,
            points[0].height,
            h_last,
            self.samples,
        )
    }
}

fn sample_curve(
    eval: impl Fn(f64) -> DVec2,
    frame: &crate::shared::geodesy::LocalFrame,
    h_start: f64,
    h_end: f64,
    samples: usize,
) -> ShapeGeometry {
    let n = samples.max(2);
    let positions = (0..=n)
        .map(|i| {
            let t = i as f64 / n as f64;
            frame.unproject(eval(t), h_start + (h_end - h_start) * t)
        })
        .collect();
    ShapeGeometry::open(positions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn cage() -> Vec<GeoPosition> {
        vec![
            GeoPosition::ground(0.0, 0.0),
            GeoPosition::ground(0.05, 0.1),
            GeoPosition::ground(0.1, 0.0),
            GeoPosition::ground(0.15, 0.1),
        ]
    }

    #[test]
    fn quadratic_below_minimum_is_empty() {
        assert!(Bezier1Shape { samples: 16 }.compute(&cage()[..2]).is_empty());
    }

    #[test]
    fn quadratic_endpoints_match_cage() {
        let points = cage()[..3].to_vec();
        let geometry = Bezier1Shape { samples: 16 }.compute(&points);
        assert_eq!(geometry.positions.len(), 17);
        assert_relative_eq!(geometry.positions[0].lon, 0.0, epsilon = 1e-9);
        assert_relative_eq!(geometry.positions.last().unwrap().lon, 0.1, epsilon = 1e-9);
        // Innere Kontrollpunkte ziehen nur: Kurve bleibt unterhalb des Zugpunkts
        let max_lat = geometry
            .positions
            .iter()
            .map(|p| p.lat)
            .fold(f64::NEG_INFINITY, f64::max);
        assert!(max_lat < 0.1 && max_lat > 0.0);
    }

    #[test]
    fn cubic_needs_four_points() {
        assert!(Bezier2Shape { samples: 16 }.compute(&cage()[..3]).is_empty());
        assert!(!Bezier2Shape { samples: 16 }.compute(&cage()).is_empty());
    }

    #[test]
    fn arbitrary_order_interpolates_heights() {
        let mut points = cage();
        points[0].height = 0.0;
        points[3].height = 400.0;
        let geometry = BezierNShape { samples: 10 }.compute(&points);
        assert_relative_eq!(geometry.positions[0].height, 0.0, epsilon = 1e-9);
        assert_relative_eq!(geometry.positions[5].height, 200.0, epsilon = 1e-9);
        assert_relative_eq!(
            geometry.positions.last().unwrap().height,
            400.0,
            epsilon = 1e-9
        );
    }
}
