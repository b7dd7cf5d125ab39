//! Die Graph-Entity: eine interaktive Annotation mit Kontrollpunkten,
//! Stil, Lebenszyklus und austauschbarer Shape-Strategie.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::control_point::ControlPoint;
use super::position::{GeoPosition, SimTime};
use super::style::GraphStyle;
use crate::scene::{EntityGeometry, EntityId, SceneEngine, SceneEntity};
use crate::shapes::{GraphKind, ShapeComputer, ShapeGeometry, ShapeSpec};
use crate::shared::MarkupOptions;

/// Lebenszyklus-Zustand eines Graphen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphState {
    /// In interaktiver Erstellung (Punkte werden gesammelt)
    Drafting,
    /// Selektiert, Kontrollpunkte verschiebbar
    Editing,
    /// Abgeschlossen, nicht selektiert
    Finalized,
    /// Gelöscht (terminal, keine Wiederbelebung)
    Deleted,
}

/// Die Graph-Sammlung des Managers: Lookup per ID, Einfüge-Reihenfolge
/// bestimmt die `save()`-Reihenfolge.
pub type GraphCollection = IndexMap<String, Graph>;

/// Eine interaktive Annotation auf dem Globus.
///
/// Besitzt seine Kontrollpunkte exklusiv; die Geometrie ist eine reine
/// Funktion von `(control_points, time)` und wird bei jeder Mutation
/// synchron neu berechnet, nie veraltet gecacht.
pub struct Graph {
    id: String,
    graph_type: String,
    kind: GraphKind,
    control_points: Vec<ControlPoint>,
    min_point_num: usize,
    style: GraphStyle,
    state: GraphState,
    shape: Box<dyn ShapeComputer>,
    layer: Option<EntityId>,
    entity: Option<EntityId>,
    label_entity: Option<EntityId>,
    handle_entities: Vec<EntityId>,
}

impl std::fmt::Debug for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("id", &self.id)
            .field("graph_type", &self.graph_type)
            .field("state", &self.state)
            .field("control_points", &self.control_points.len())
            .finish()
    }
}

impl Graph {
    /// Erstellt einen Graphen im Zustand `Drafting`.
    pub(crate) fn new(
        id: String,
        spec: &'static ShapeSpec,
        control_points: Vec<ControlPoint>,
        style: GraphStyle,
        layer: Option<EntityId>,
        options: &MarkupOptions,
    ) -> Self {
        let shape = spec.build(options);
        Self {
            id,
            graph_type: spec.tag.to_string(),
            kind: spec.kind,
            min_point_num: shape.min_point_num(),
            control_points,
            style,
            state: GraphState::Drafting,
            shape,
            layer,
            entity: None,
            label_entity: None,
            handle_entities: Vec::new(),
        }
    }

    /// Eindeutige ID innerhalb des Managers.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Typ-Tag des Factory-Protokolls.
    pub fn graph_type(&self) -> &str {
        &self.graph_type
    }

    /// Render-Kategorie.
    pub fn kind(&self) -> GraphKind {
        self.kind
    }

    /// Aktueller Lebenszyklus-Zustand.
    pub fn state(&self) -> GraphState {
        self.state
    }

    /// Ist der Graph gelöscht?
    pub fn is_deleted(&self) -> bool {
        self.state == GraphState::Deleted
    }

    /// Mindest-Anzahl an Kontrollpunkten für den Abschluss.
    pub fn min_point_num(&self) -> usize {
        self.min_point_num
    }

    /// Darstellungs-Stil.
    pub fn style(&self) -> &GraphStyle {
        &self.style
    }

    /// Geordnete Kontrollpunkte (read-only).
    pub fn control_points(&self) -> &[ControlPoint] {
        &self.control_points
    }

    /// Hängt einen Kontrollpunkt an (Zeichnen-Phase).
    pub fn add_control_point(&mut self, point: ControlPoint) {
        self.control_points.push(point);
    }

    /// Verschiebt einen Kontrollpunkt. `false` bei unbekanntem Index.
    pub fn move_control_point(&mut self, index: usize, position: GeoPosition) -> bool {
        match self.control_points.get_mut(index) {
            Some(cp) => {
                cp.set_position(position);
                true
            }
            None => false,
        }
    }

    /// Sampelt alle Kontrollpunkte zum Zeitpunkt `time`.
    pub fn sampled_positions(&self, time: SimTime) -> Vec<GeoPosition> {
        self.control_points
            .iter()
            .map(|cp| cp.position_at(time))
            .collect()
    }

    /// Hat mindestens ein Kontrollpunkt eine zeit-animierte Position?
    pub fn is_animated(&self) -> bool {
        self.control_points
            .iter()
            .any(|cp| cp.position.is_animated())
    }

    /// Berechnet die Render-Geometrie (rein, deterministisch).
    pub fn geometry(&self, time: SimTime) -> ShapeGeometry {
        self.shape.compute(&self.sampled_positions(time))
    }

    /// Berechnet die Geometrie neu und gleicht die Szenen-Entities ab
    /// (Haupt-Entity, Mess-Label, Kontrollpunkt-Handles).
    pub fn sync_scene(&mut self, scene: &mut dyn SceneEngine, time: SimTime) {
        if self.is_deleted() {
            return;
        }
        let geometry = self.geometry(time);

        // Haupt-Entity
        if geometry.is_empty() {
            if let Some(id) = self.entity.take() {
                scene.remove_entity(id);
            }
        } else {
            let entity_geometry = match self.kind {
                GraphKind::Point => EntityGeometry::Point {
                    position: geometry.positions[0],
                },
                GraphKind::Polyline => EntityGeometry::Polyline {
                    positions: geometry.positions.clone(),
                },
                GraphKind::Polygon => EntityGeometry::Polygon {
                    positions: geometry.positions.clone(),
                },
            };
            let mut entity = SceneEntity::new(entity_geometry).with_style(self.style.clone());
            entity.name = Some(self.id.clone());
            entity.layer = self.layer;
            match self.entity {
                Some(id) => {
                    scene.update_entity(id, entity);
                }
                None => self.entity = Some(scene.create_entity(entity)),
            }
        }

        // Mess-Label an der Geometrie-Mitte
        match geometry.measurement {
            Some(measurement) if !geometry.is_empty() => {
                let anchor = geometry.positions[geometry.positions.len() / 2];
                let label = SceneEntity::new(EntityGeometry::Label {
                    position: anchor,
                    text: measurement.label(),
                })
                .with_style(self.style.clone());
                let label = match self.layer {
                    Some(layer) => label.with_layer(layer),
                    None => label,
                };
                match self.label_entity {
                    Some(id) => {
                        scene.update_entity(id, label);
                    }
                    None => self.label_entity = Some(scene.create_entity(label)),
                }
            }
            _ => {
                if let Some(id) = self.label_entity.take() {
                    scene.remove_entity(id);
                }
            }
        }

        self.sync_handles(scene, time);
    }

    /// Gleicht die Kontrollpunkt-Handles ab: sichtbar während Drafting
    /// und Editing, sonst entfernt.
    fn sync_handles(&mut self, scene: &mut dyn SceneEngine, time: SimTime) {
        let visible = matches!(self.state, GraphState::Drafting | GraphState::Editing);
        if !visible {
            for id in self.handle_entities.drain(..) {
                scene.remove_entity(id);
            }
            return;
        }

        let positions = self.sampled_positions(time);
        for (index, position) in positions.iter().enumerate() {
            let handle = SceneEntity::new(EntityGeometry::Point {
                position: *position,
            });
            let handle = match self.layer {
                Some(layer) => handle.with_layer(layer),
                None => handle,
            };
            match self.handle_entities.get(index) {
                Some(&id) => {
                    scene.update_entity(id, handle);
                }
                None => self.handle_entities.push(scene.create_entity(handle)),
            }
        }
        while self.handle_entities.len() > positions.len() {
            if let Some(id) = self.handle_entities.pop() {
                scene.remove_entity(id);
            }
        }
    }

    /// Setzt den Lebenszyklus-Zustand. `Deleted` ist terminal und wird
    /// nie verlassen.
    pub(crate) fn set_state(&mut self, state: GraphState) {
        if self.is_deleted() {
            return;
        }
        self.state = state;
    }

    /// Serialisiert `{obj, ctls, style}` zum Zeitpunkt `time`.
    pub fn properties(&self, time: SimTime) -> GraphRecord {
        GraphRecord {
            graph_type: self.graph_type.clone(),
            ctls: self
                .control_points
                .iter()
                .map(|cp| ControlPointRecord::from_control_point(cp, time))
                .collect(),
            style: self.style.clone(),
        }
    }

    /// Entfernt alle Szenen-Entities und markiert den Graphen als
    /// gelöscht. Wiederholte Aufrufe sind No-ops.
    pub fn delete(&mut self, scene: &mut dyn SceneEngine) {
        if self.is_deleted() {
            return;
        }
        if let Some(id) = self.entity.take() {
            scene.remove_entity(id);
        }
        if let Some(id) = self.label_entity.take() {
            scene.remove_entity(id);
        }
        for id in self.handle_entities.drain(..) {
            scene.remove_entity(id);
        }
        self.state = GraphState::Deleted;
        log::debug!("Graph gelöscht: {}", self.id);
    }
}

// ── Persistenz-Records ──────────────────────────────────────────────

/// Persistierter Kontrollpunkt.
///
/// `lon/lat/height` ist die Position zum Speicherzeitpunkt; animierte
/// Punkte können im Factory-Protokoll zusätzlich `samples` mitführen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlPointRecord {
    /// Geografische Länge in Grad
    pub lon: f64,
    /// Geografische Breite in Grad
    pub lat: f64,
    /// Höhe in Metern
    #[serde(default)]
    pub height: f64,
    /// Optionale Beschriftung
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Zeit-Samples für animierte Positionen (leer = konstant)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub samples: Vec<super::position::PositionSample>,
}

impl ControlPointRecord {
    /// Sampelt einen Kontrollpunkt zum Zeitpunkt `time`. Animierte
    /// Positionen werden auf den Speicherzeitpunkt abgeflacht.
    pub fn from_control_point(cp: &ControlPoint, time: SimTime) -> Self {
        let p = cp.position_at(time);
        Self {
            lon: p.lon,
            lat: p.lat,
            height: p.height,
            label: cp.label.clone(),
            samples: Vec::new(),
        }
    }

    /// Rekonstruiert den Kontrollpunkt; mit `samples` eine animierte,
    /// sonst eine feste Position.
    pub fn to_control_point(&self) -> ControlPoint {
        let position = if self.samples.is_empty() {
            super::position::PositionProperty::Constant(GeoPosition::new(
                self.lon,
                self.lat,
                self.height,
            ))
        } else {
            super::position::PositionProperty::sampled(self.samples.clone())
        };
        ControlPoint {
            position,
            label: self.label.clone(),
        }
    }
}

/// Persistierte Eigenschaften eines Graphen; zugleich das
/// Parameter-Objekt des Factory-Protokolls (`obj` ist der Typ-Tag).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphRecord {
    /// Typ-Tag (Eingabe auch unter dem Alias `type` akzeptiert)
    #[serde(rename = "obj", alias = "type")]
    pub graph_type: String,
    /// Kontrollpunkte in Zeichenreihenfolge
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ctls: Vec<ControlPointRecord>,
    /// Darstellungs-Stil
    #[serde(default, skip_serializing_if = "GraphStyle::is_empty")]
    pub style: GraphStyle,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::MemoryScene;
    use crate::shapes::shape_spec;

    fn line_graph(id: &str) -> Graph {
        let spec = shape_spec("PointLine").expect("Registrierter Tag erwartet");
        Graph::new(
            id.to_string(),
            spec,
            Vec::new(),
            GraphStyle::default(),
            None,
            &MarkupOptions::default(),
        )
    }

    #[test]
    fn new_graph_starts_drafting() {
        let graph = line_graph("g-1");
        assert_eq!(graph.state(), GraphState::Drafting);
        assert_eq!(graph.min_point_num(), 2);
        assert!(graph.geometry(SimTime(0.0)).is_empty());
    }

    #[test]
    fn geometry_reflects_moved_point_immediately() {
        let mut graph = line_graph("g-1");
        graph.add_control_point(ControlPoint::fixed(GeoPosition::ground(0.0, 0.0)));
        graph.add_control_point(ControlPoint::fixed(GeoPosition::ground(1.0, 0.0)));

        assert!(graph.move_control_point(1, GeoPosition::ground(2.0, 2.0)));
        let geometry = graph.geometry(SimTime(0.0));
        assert_eq!(geometry.positions[1], GeoPosition::ground(2.0, 2.0));

        assert!(!graph.move_control_point(7, GeoPosition::ground(0.0, 0.0)));
    }

    #[test]
    fn sync_scene_creates_and_removes_entities() {
        let mut scene = MemoryScene::new();
        let mut graph = line_graph("g-1");

        // Unterhalb des Minimums: nur Handles (Drafting), keine Haupt-Entity
        graph.add_control_point(ControlPoint::fixed(GeoPosition::ground(0.0, 0.0)));
        graph.sync_scene(&mut scene, SimTime(0.0));
        assert_eq!(scene.entity_count(), 1);

        graph.add_control_point(ControlPoint::fixed(GeoPosition::ground(1.0, 0.0)));
        graph.sync_scene(&mut scene, SimTime(0.0));
        // Haupt-Entity + 2 Handles
        assert_eq!(scene.entity_count(), 3);

        graph.set_state(GraphState::Finalized);
        graph.sync_scene(&mut scene, SimTime(0.0));
        // Handles verschwinden im Finalized-Zustand
        assert_eq!(scene.entity_count(), 1);

        graph.delete(&mut scene);
        assert_eq!(scene.entity_count(), 0);
    }

    #[test]
    fn measurement_graph_maintains_label() {
        let spec = shape_spec("DistanceMeasure").expect("Registrierter Tag erwartet");
        let mut graph = Graph::new(
            "m-1".to_string(),
            spec,
            vec![
                ControlPoint::fixed(GeoPosition::ground(0.0, 0.0)),
                ControlPoint::fixed(GeoPosition::ground(1.0, 0.0)),
            ],
            GraphStyle::default(),
            None,
            &MarkupOptions::default(),
        );
        let mut scene = MemoryScene::new();
        graph.set_state(GraphState::Finalized);
        graph.sync_scene(&mut scene, SimTime(0.0));
        // Haupt-Entity + Label
        assert_eq!(scene.entity_count(), 2);
        let label = scene
            .entity(graph.label_entity.expect("Label erwartet"))
            .expect("Label-Entity erwartet");
        match &label.geometry {
            EntityGeometry::Label { text, .. } => assert!(text.ends_with("km")),
            other => panic!("Label erwartet, war: {other:?}"),
        }
    }

    #[test]
    fn delete_is_idempotent_and_terminal() {
        let mut scene = MemoryScene::new();
        let mut graph = line_graph("g-1");
        graph.delete(&mut scene);
        assert!(graph.is_deleted());

        graph.delete(&mut scene);
        assert!(graph.is_deleted());

        // Terminal: kein Zustandswechsel mehr möglich
        graph.set_state(GraphState::Editing);
        assert!(graph.is_deleted());
    }

    #[test]
    fn properties_serialize_type_points_and_style() {
        let mut graph = line_graph("g-1");
        graph.add_control_point(ControlPoint::with_label(
            GeoPosition::new(1.0, 2.0, 3.0),
            "A",
        ));
        let record = graph.properties(SimTime(0.0));
        assert_eq!(record.graph_type, "PointLine");
        assert_eq!(record.ctls.len(), 1);
        assert_eq!(record.ctls[0].lon, 1.0);
        assert_eq!(record.ctls[0].label.as_deref(), Some("A"));

        // Factory-Feldname ist `obj`, Alias `type` wird akzeptiert
        let json = serde_json::to_value(&record).expect("Serialisierung erwartet");
        assert_eq!(json.get("obj").and_then(|v| v.as_str()), Some("PointLine"));
        let back: GraphRecord =
            serde_json::from_str(r#"{"type": "PointLine"}"#).expect("Alias erwartet");
        assert_eq!(back.graph_type, "PointLine");
    }
}
