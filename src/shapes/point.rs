//! Einzelpunkt-Typen: Punkt, Pins, Modelle und Bilder teilen sich die
//! Identitäts-Strategie über den ersten Ankerpunkt.

use super::{ShapeComputer, ShapeGeometry};
use crate::core::GeoPosition;

/// Identität: die Geometrie ist der (gesampelte) Ankerpunkt selbst.
/// Welcher Entity-Typ daraus wird (Billboard, Pin, Modell), entscheidet
/// der Stil des Graphen.
pub struct PointShape;

impl ShapeComputer for PointShape {
    fn min_point_num(&self) -> usize {
        1
    }

    fn compute(&self, points: &[GeoPosition]) -> ShapeGeometry {
        match points.first() {
            Some(p) => ShapeGeometry::open(vec![*p]),
            None => ShapeGeometry::empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_empty_geometry() {
        assert!(PointShape.compute(&[]).is_empty());
    }

    #[test]
    fn first_point_is_the_geometry() {
        let points = vec![
            GeoPosition::new(8.0, 49.0, 120.0),
            GeoPosition::ground(9.0, 50.0),
        ];
        let geometry = PointShape.compute(&points);
        assert_eq!(geometry.positions, vec![points[0]]);
        assert!(!geometry.closed);
    }
}
