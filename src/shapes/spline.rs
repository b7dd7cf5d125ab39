//! Interpolierende Splines: glatte Kurve durch alle Kontrollpunkte.

use super::{project_points, ShapeComputer, ShapeGeometry};
use crate::core::GeoPosition;
use crate::shared::spline_geometry::{bezier_spline_segments, cubic_bezier};

/// Glättungs-Spline durch die Kontrollpunkte.
///
/// Projiziert in die lokale Ebene, interpoliert dort mit dem
/// Bézier-Spline-Primitiv und projiziert zurück. Erster und letzter
/// Ankerpunkt bleiben exakt erhalten, innere Anker werden in
/// Reihenfolge durchlaufen. Höhen werden segmentweise zwischen den
/// Anker-Höhen interpoliert.
pub struct SplineShape {
    /// Zwischenpunkte pro Spline-Segment
    pub samples_per_segment: usize,
    /// Tangenten-Skalierung (0..1, höher = rundere Kurve)
    pub sharpness: f64,
}

impl ShapeComputer for SplineShape {
    fn min_point_num(&self) -> usize {
        3
    }

    fn compute(&self, points: &[GeoPosition]) -> ShapeGeometry {
        if points.len() < self.min_point_num() {
            return ShapeGeometry::empty();
        }

        let (frame, projected) = project_points(points);
        let segments = bezier_spline_segments(&projected, self.sharpness);
        let spp = self.samples_per_segment.max(1);

        let mut positions = Vec::with_capacity(segments.len() * spp + 1);
        for (i, [p1, c1, c2, p2]) in segments.iter().enumerate() {
            let h1 = points[i].height;
            let h2 = points[i + 1].height;
            let last = i + 1 == segments.len();
            let steps = if last { spp + 1 } else { spp };
            for s in 0..steps {
                let t = s as f64 / spp as f64;
                let v = cubic_bezier(*p1, *c1, *c2, *p2, t);
                positions.push(frame.unproject(v, h1 + (h2 - h1) * t));
            }
        }
        ShapeGeometry::open(positions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn shape() -> SplineShape {
        SplineShape {
            samples_per_segment: 16,
            sharpness: 0.85,
        }
    }

    fn anchors() -> Vec<GeoPosition> {
        vec![
            GeoPosition::ground(8.0, 49.0),
            GeoPosition::ground(8.05, 49.04),
            GeoPosition::ground(8.1, 49.0),
            GeoPosition::ground(8.15, 49.05),
        ]
    }

    #[test]
    fn below_minimum_returns_empty() {
        assert!(shape().compute(&anchors()[..2]).is_empty());
    }

    #[test]
    fn output_is_denser_than_input() {
        let geometry = shape().compute(&anchors());
        assert!(geometry.positions.len() > anchors().len());
        assert_eq!(geometry.positions.len(), 3 * 16 + 1);
    }

    #[test]
    fn endpoints_are_anchored_exactly() {
        let points = anchors();
        let geometry = shape().compute(&points);
        let first = geometry.positions.first().unwrap();
        let last = geometry.positions.last().unwrap();
        assert_relative_eq!(first.lon, points[0].lon, epsilon = 1e-9);
        assert_relative_eq!(first.lat, points[0].lat, epsilon = 1e-9);
        assert_relative_eq!(last.lon, points[3].lon, epsilon = 1e-9);
        assert_relative_eq!(last.lat, points[3].lat, epsilon = 1e-9);
    }

    #[test]
    fn curve_visits_interior_anchors_in_order() {
        let points = anchors();
        let spp = 16;
        let geometry = shape().compute(&points);
        for (k, anchor) in points.iter().enumerate() {
            let at_boundary = &geometry.positions[(k * spp).min(geometry.positions.len() - 1)];
            assert_relative_eq!(at_boundary.lon, anchor.lon, epsilon = 1e-6);
            assert_relative_eq!(at_boundary.lat, anchor.lat, epsilon = 1e-6);
        }
    }

    #[test]
    fn heights_follow_segment_anchors() {
        let mut points = anchors()[..3].to_vec();
        points[0].height = 0.0;
        points[1].height = 100.0;
        points[2].height = 100.0;
        let geometry = shape().compute(&points);
        // Segmentgrenze bei Index spp traegt die Anker-Höhe
        assert_relative_eq!(geometry.positions[16].height, 100.0, epsilon = 1e-9);
    }
}
