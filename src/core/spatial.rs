//! Spatial-Index (KD-Tree) für die Klick-Selektion von Kontrollpunkten.

use glam::DVec2;
use kiddo::{KdTree, SquaredEuclidean};

use super::graph::Graph;
use super::position::SimTime;
use crate::shared::geodesy::LocalFrame;

/// Ergebnis einer Distanzabfrage gegen den Pick-Index.
#[derive(Debug, Clone, PartialEq)]
pub struct PickMatch {
    /// ID des getroffenen Graphen
    pub graph_id: String,
    /// Index des Kontrollpunkts innerhalb des Graphen
    pub point_index: usize,
    /// Distanz zum Suchpunkt in Ebenen-Metern
    pub distance: f64,
}

/// Read-only Pick-Index über die Kontrollpunkte aller Graphen.
///
/// Die Punkte werden zum Aufbauzeitpunkt gesampelt und in die lokale
/// Ebene des Abfrage-Ursprungs projiziert. Der Index wird pro
/// Pick-Ereignis neu aufgebaut (Annotations-Sammlungen sind klein).
#[derive(Debug)]
pub struct PickIndex {
    tree: KdTree<f64, 2>,
    entries: Vec<(String, usize)>,
}

impl PickIndex {
    /// Baut einen Index aus den Kontrollpunkten der übergebenen Graphen.
    pub fn from_graphs<'a>(
        graphs: impl Iterator<Item = &'a Graph>,
        time: SimTime,
        frame: &LocalFrame,
    ) -> Self {
        let mut entries: Vec<(String, usize)> = Vec::new();
        let mut coords: Vec<[f64; 2]> = Vec::new();

        for graph in graphs {
            if graph.is_deleted() {
                continue;
            }
            for (index, cp) in graph.control_points().iter().enumerate() {
                let v = frame.project(&cp.position_at(time));
                entries.push((graph.id().to_string(), index));
                coords.push([v.x, v.y]);
            }
        }

        let tree: KdTree<f64, 2> = (&coords).into();
        Self { tree, entries }
    }

    /// Gibt die Anzahl indexierter Kontrollpunkte zurück.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Gibt `true` zurück, wenn keine Kontrollpunkte im Index liegen.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Findet den nächsten Kontrollpunkt zur Ebenen-Position `query`.
    pub fn nearest(&self, query: DVec2) -> Option<PickMatch> {
        if self.is_empty() {
            return None;
        }

        let result = self.tree.nearest_one::<SquaredEuclidean>(&[query.x, query.y]);
        let (graph_id, point_index) = self.entries.get(result.item as usize)?.clone();

        Some(PickMatch {
            graph_id,
            point_index,
            distance: result.distance.sqrt(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ControlPoint, GeoPosition, GraphStyle};
    use crate::shapes::shape_spec;
    use crate::shared::MarkupOptions;

    fn graph_with_points(id: &str, lons: &[f64]) -> Graph {
        let spec = shape_spec("PointLine").expect("Registrierter Tag erwartet");
        let points = lons
            .iter()
            .map(|&lon| ControlPoint::fixed(GeoPosition::ground(lon, 0.0)))
            .collect();
        Graph::new(
            id.to_string(),
            spec,
            points,
            GraphStyle::default(),
            None,
            &MarkupOptions::default(),
        )
    }

    #[test]
    fn nearest_returns_closest_control_point() {
        let a = graph_with_points("a", &[0.0, 0.1]);
        let b = graph_with_points("b", &[0.5]);
        let graphs = [a, b];

        let query = GeoPosition::ground(0.49, 0.0);
        let frame = LocalFrame::new(query);
        let index = PickIndex::from_graphs(graphs.iter(), SimTime(0.0), &frame);
        assert_eq!(index.len(), 3);

        let hit = index.nearest(DVec2::ZERO).expect("Treffer erwartet");
        assert_eq!(hit.graph_id, "b");
        assert_eq!(hit.point_index, 0);
        // Ein Hundertstel Grad am Äquator sind rund 1.1 km
        assert!(hit.distance > 1000.0 && hit.distance < 1300.0);
    }

    #[test]
    fn empty_index_has_no_matches() {
        let frame = LocalFrame::new(GeoPosition::ground(0.0, 0.0));
        let index = PickIndex::from_graphs(std::iter::empty(), SimTime(0.0), &frame);
        assert!(index.is_empty());
        assert!(index.nearest(DVec2::ZERO).is_none());
    }
}
