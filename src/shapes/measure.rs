//! Mess-Figuren: Geometrie plus abgeleiteter Skalar aus denselben
//! Kontrollpunkten.
//!
//! Die Skalare werden bei jeder Geometrie-Neuberechnung identisch
//! mitberechnet, nie unabhängig gecacht.

use super::{Measurement, ShapeComputer, ShapeGeometry};
use crate::core::GeoPosition;
use crate::shared::geodesy::{haversine_distance, included_angle, ring_area, slant_distance};

/// Distanz-Messung: Linienzug plus kumulierte geodätische Distanz.
pub struct DistanceMeasureShape;

impl ShapeComputer for DistanceMeasureShape {
    fn min_point_num(&self) -> usize {
        2
    }

    fn compute(&self, points: &[GeoPosition]) -> ShapeGeometry {
        if points.len() < self.min_point_num() {
            return ShapeGeometry::empty();
        }
        let meters = points
            .windows(2)
            .map(|w| haversine_distance(&w[0], &w[1]))
            .sum();
        ShapeGeometry::open(points.to_vec()).with_measurement(Measurement::Distance { meters })
    }
}

/// Winkel-Messung: zwei Schenkel, Skalar ist der eingeschlossene Winkel
/// am mittleren Kontrollpunkt.
pub struct AngleMeasureShape;

impl ShapeComputer for AngleMeasureShape {
    fn min_point_num(&self) -> usize {
        3
    }

    fn compute(&self, points: &[GeoPosition]) -> ShapeGeometry {
        if points.len() < self.min_point_num() {
            return ShapeGeometry::empty();
        }
        let degrees = included_angle(&points[0], &points[1], &points[2]);
        ShapeGeometry::open(points[..3].to_vec()).with_measurement(Measurement::Angle { degrees })
    }
}

/// Flächen-Messung: Ring plus eingeschlossene sphärische Fläche.
pub struct AreaMeasureShape;

impl ShapeComputer for AreaMeasureShape {
    fn min_point_num(&self) -> usize {
        3
    }

    fn compute(&self, points: &[GeoPosition]) -> ShapeGeometry {
        if points.len() < self.min_point_num() {
            return ShapeGeometry::empty();
        }
        let square_meters = ring_area(points);
        ShapeGeometry::closed(points.to_vec())
            .with_measurement(Measurement::Area { square_meters })
    }
}

/// Dreiecks-Messung: vertikales rechtwinkliges Dreieck zwischen zwei
/// Punkten mit Horizontal-, Höhen- und Schräg-Distanz.
pub struct TriangleMeasureShape;

impl ShapeComputer for TriangleMeasureShape {
    fn min_point_num(&self) -> usize {
        2
    }

    fn compute(&self, points: &[GeoPosition]) -> ShapeGeometry {
        if points.len() < self.min_point_num() {
            return ShapeGeometry::empty();
        }
        let a = points[0];
        let b = points[1];
        // Ecke: Lage von b auf der Höhe von a
        let corner = GeoPosition::new(b.lon, b.lat, a.height);

        let horizontal_m = haversine_distance(&a, &b);
        let height_m = (b.height - a.height).abs();
        let slant_m = slant_distance(&a, &b);

        ShapeGeometry::open(vec![a, corner, b, a]).with_measurement(Measurement::Triangle {
            horizontal_m,
            height_m,
            slant_m,
        })
    }
}

/// Sichtlinie: gerades Sicht-Segment plus Schräg-Distanz. Die
/// Verdeckungsprüfung gegen das Terrain liegt beim Host.
pub struct SightLineShape;

impl ShapeComputer for SightLineShape {
    fn min_point_num(&self) -> usize {
        2
    }

    fn compute(&self, points: &[GeoPosition]) -> ShapeGeometry {
        if points.len() < self.min_point_num() {
            return ShapeGeometry::empty();
        }
        let meters = slant_distance(&points[0], &points[1]);
        ShapeGeometry::open(points[..2].to_vec()).with_measurement(Measurement::Sight { meters })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn distance_accumulates_segments() {
        let points = vec![
            GeoPosition::ground(0.0, 0.0),
            GeoPosition::ground(1.0, 0.0),
            GeoPosition::ground(2.0, 0.0),
        ];
        let geometry = DistanceMeasureShape.compute(&points);
        let Some(Measurement::Distance { meters }) = geometry.measurement else {
            panic!("Distanz-Messung erwartet");
        };
        // Zwei Längengrade am Äquator
        assert_relative_eq!(meters, 2.0 * 111_194.93, epsilon = 2.0);
        assert_eq!(geometry.positions, points);
    }

    #[test]
    fn angle_at_middle_vertex() {
        let points = vec![
            GeoPosition::ground(1.0, 0.0),
            GeoPosition::ground(0.0, 0.0),
            GeoPosition::ground(0.0, 1.0),
        ];
        let geometry = AngleMeasureShape.compute(&points);
        let Some(Measurement::Angle { degrees }) = geometry.measurement else {
            panic!("Winkel-Messung erwartet");
        };
        assert_relative_eq!(degrees, 90.0, epsilon = 0.1);
    }

    #[test]
    fn area_of_degree_cell() {
        let points = vec![
            GeoPosition::ground(0.0, 0.0),
            GeoPosition::ground(1.0, 0.0),
            GeoPosition::ground(1.0, 1.0),
            GeoPosition::ground(0.0, 1.0),
        ];
        let geometry = AreaMeasureShape.compute(&points);
        assert!(geometry.closed);
        let Some(Measurement::Area { square_meters }) = geometry.measurement else {
            panic!("Flächen-Messung erwartet");
        };
        assert!(square_meters > 1.2e10 && square_meters < 1.25e10);
    }

    #[test]
    fn triangle_combines_horizontal_and_height() {
        let a = GeoPosition::new(0.0, 0.0, 0.0);
        let b = GeoPosition::new(0.0, 0.0, 500.0);
        let geometry = TriangleMeasureShape.compute(&[a, b]);
        let Some(Measurement::Triangle {
            horizontal_m,
            height_m,
            slant_m,
        }) = geometry.measurement
        else {
            panic!("Dreiecks-Messung erwartet");
        };
        assert_relative_eq!(horizontal_m, 0.0, epsilon = 1e-9);
        assert_relative_eq!(height_m, 500.0, epsilon = 1e-9);
        assert_relative_eq!(slant_m, 500.0, epsilon = 1e-9);
        assert_eq!(geometry.positions.len(), 4);
    }

    #[test]
    fn sight_line_uses_slant_distance() {
        let a = GeoPosition::new(0.0, 0.0, 0.0);
        let b = GeoPosition::new(1.0, 0.0, 1000.0);
        let geometry = SightLineShape.compute(&[a, b]);
        let Some(Measurement::Sight { meters }) = geometry.measurement else {
            panic!("Sicht-Messung erwartet");
        };
        let ground = haversine_distance(&a, &b);
        assert_relative_eq!(meters, (ground * ground + 1e6).sqrt(), epsilon = 1e-6);
    }

    #[test]
    fn measures_below_minimum_have_no_scalar() {
        let one = vec![GeoPosition::ground(0.0, 0.0)];
        assert!(DistanceMeasureShape.compute(&one).measurement.is_none());
        assert!(AngleMeasureShape.compute(&one).measurement.is_none());
        assert!(AreaMeasureShape.compute(&one).measurement.is_none());
    }
}
