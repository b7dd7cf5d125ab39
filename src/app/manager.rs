//! GraphManager: Registry, Factory und Persistenz-Fassade über die
//! Sammlung lebender Graphen.
//!
//! Der Manager besitzt die Sammlung und den EditMode; Mutation läuft
//! ausschließlich über `create/draw/delete/clean`. Aufbau und Abbau sind
//! explizit (`new` / `destroy_handler`), es gibt keinen ambienten
//! globalen Zustand.

use serde_json::Value;

use super::edit_mode::{EditMode, EditState, GraphFinishHandler, GraphSelectHandler};
use super::events::InputEvent;
use crate::core::{Graph, GraphCollection, GraphRecord, SimTime};
use crate::scene::{EntityId, SceneEngine, SceneEntity};
use crate::shapes::shape_spec;
use crate::shared::MarkupOptions;

/// Registry-, Factory- und Persistenz-Fassade für Annotationen.
pub struct GraphManager {
    options: MarkupOptions,
    graphs: GraphCollection,
    layer: EntityId,
    edit: EditMode,
    next_id: u64,
}

impl GraphManager {
    /// Erstellt einen Manager: validiert die Optionen, legt den
    /// gemeinsamen Annotations-Layer an und initialisiert den EditMode.
    pub fn new(options: MarkupOptions, scene: &mut dyn SceneEngine) -> Self {
        let options = options.sanitized();
        let layer = scene.create_entity(SceneEntity::group(&options.layer_id));
        log::info!(
            "GraphManager erstellt (Layer '{}', {} Typen registriert)",
            options.layer_id,
            crate::shapes::SHAPE_REGISTRY.len()
        );
        Self {
            edit: EditMode::new(&options),
            options,
            graphs: GraphCollection::new(),
            layer,
            next_id: 0,
        }
    }

    /// Wechselt in den Selektions-Modus.
    pub fn start(&mut self, scene: &mut dyn SceneEngine) {
        self.edit.start(scene);
    }

    /// Beendet die Interaktion (Entwurf unter Minimum wird verworfen).
    pub fn finish(&mut self, scene: &mut dyn SceneEngine) {
        self.edit.finish(&mut self.graphs, scene);
    }

    /// Meldet alle Eingabe-Listener ab. Mehrfacher Aufruf ist sicher.
    pub fn destroy_handler(&mut self, scene: &mut dyn SceneEngine) {
        self.edit.destroy_handler(scene);
    }

    /// Reicht ein Eingabe-Event an den EditMode weiter.
    pub fn handle_event(&mut self, event: &InputEvent, scene: &mut dyn SceneEngine) {
        self.edit.handle_event(&mut self.graphs, scene, event);
    }

    /// Aktueller Interaktions-Zustand.
    pub fn edit_state(&self) -> EditState {
        self.edit.state()
    }

    /// Der selektierte Graph, falls vorhanden.
    pub fn selected_graph(&self) -> Option<&Graph> {
        self.edit.selected_id().and_then(|id| self.graphs.get(id))
    }

    /// Instanziiert einen Graphen aus dem Factory-Protokoll
    /// `{obj: <Tag>, ctls: [...], style: {...}}`.
    ///
    /// Unbekannter Tag: Diagnose-Log und `None`, die Sammlung bleibt
    /// unverändert. Aufrufer müssen das Ergebnis prüfen.
    pub fn create_obj(&mut self, json: &Value) -> Option<Graph> {
        log::debug!("createObj aus JSON: {}", json);
        let record: GraphRecord = match serde_json::from_value(json.clone()) {
            Ok(record) => record,
            Err(e) => {
                log::warn!("Ungültige Graph-Parameter: {}", e);
                return None;
            }
        };
        self.build_graph(&record)
    }

    /// Beginnt das interaktive Zeichnen eines neuen Graphen.
    /// Gibt die ID des Entwurfs zurück, `None` bei unbekanntem Tag.
    pub fn create(&mut self, json: &Value, scene: &mut dyn SceneEngine) -> Option<String> {
        let graph = self.create_obj(json)?;
        Some(self.edit.create(graph, scene))
    }

    /// Zeichnet einen Graphen mit bereits gesetzten Kontrollpunkten und
    /// wechselt direkt in den Edit-Modus (Wiederherstellungs-Pfad).
    pub fn draw(&mut self, json: &Value, scene: &mut dyn SceneEngine) -> Option<String> {
        let graph = self.create_obj(json)?;
        Some(self.edit.draw(graph, &mut self.graphs, scene))
    }

    /// Erster Graph mit der gegebenen ID (lineare Suche).
    pub fn find_by_id(&self, id: &str) -> Option<&Graph> {
        self.graphs.values().find(|g| g.id() == id)
    }

    /// Erster Graph mit dem gegebenen Typ-Tag (lineare Suche).
    pub fn find_by_type(&self, graph_type: &str) -> Option<&Graph> {
        self.graphs.values().find(|g| g.graph_type() == graph_type)
    }

    /// Löscht einen Graphen.
    ///
    /// Mit ID: entfernt genau diesen Graphen aus Szene und Sammlung.
    /// Ohne ID: delegiert an den EditMode (selektierter Graph); ohne
    /// Selektion ein No-op.
    pub fn delete(&mut self, id: Option<&str>, scene: &mut dyn SceneEngine) -> Option<Graph> {
        let deleted = match id {
            Some(id) => {
                let mut graph = self.graphs.shift_remove(id)?;
                graph.delete(scene);
                Some(graph)
            }
            None => self.edit.delete_select_graph(&mut self.graphs, scene),
        };
        match &deleted {
            Some(graph) => log::info!("Graph gelöscht: {}", graph.id()),
            None => log::debug!("delete ohne Treffer"),
        }
        deleted
    }

    /// Entfernt und löscht sämtliche Graphen; `delete()` wird pro Graph
    /// genau einmal aufgerufen.
    pub fn clean(&mut self, scene: &mut dyn SceneEngine) {
        for (_, mut graph) in self.graphs.drain(..) {
            graph.delete(scene);
        }
    }

    /// Alias für [`clean`](Self::clean).
    pub fn delete_all(&mut self, scene: &mut dyn SceneEngine) {
        self.clean(scene);
    }

    /// Stellt eine gespeicherte Sequenz wieder her (`draw` pro Eintrag,
    /// Ergebnis in derselben Reihenfolge).
    pub fn load(
        &mut self,
        records: &[GraphRecord],
        scene: &mut dyn SceneEngine,
    ) -> Vec<Option<String>> {
        records
            .iter()
            .map(|record| {
                let graph = self.build_graph(record)?;
                Some(self.edit.draw(graph, &mut self.graphs, scene))
            })
            .collect()
    }

    /// Serialisiert alle lebenden Graphen in Sammlungs-Reihenfolge.
    pub fn save(&self, time: SimTime) -> Vec<GraphRecord> {
        self.graphs
            .values()
            .filter(|g| !g.is_deleted())
            .map(|g| g.properties(time))
            .collect()
    }

    /// JSON-Komfort: `save()` als String.
    pub fn export_json(&self, time: SimTime) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(&self.save(time))?)
    }

    /// JSON-Komfort: parst eine gespeicherte Sequenz und lädt sie.
    pub fn import_json(
        &mut self,
        json: &str,
        scene: &mut dyn SceneEngine,
    ) -> anyhow::Result<Vec<Option<String>>> {
        let records: Vec<GraphRecord> = serde_json::from_str(json)?;
        Ok(self.load(&records, scene))
    }

    /// Registriert den Selektions-Callback (Single-Slot, letzte
    /// Registrierung gewinnt).
    pub fn set_graph_select_handler(&mut self, handler: GraphSelectHandler) {
        self.edit.set_graph_select_handler(handler);
    }

    /// Registriert den Abschluss-Callback (Single-Slot, letzte
    /// Registrierung gewinnt).
    pub fn set_graph_finish_handler(&mut self, handler: GraphFinishHandler) {
        self.edit.set_graph_finish_handler(handler);
    }

    /// Anzahl lebender Graphen.
    pub fn graph_count(&self) -> usize {
        self.graphs.len()
    }

    /// Iterator über alle Graphen in Sammlungs-Reihenfolge.
    pub fn graphs(&self) -> impl Iterator<Item = &Graph> {
        self.graphs.values()
    }

    /// Baut einen Graphen aus einem Record (gemeinsamer Pfad von
    /// `create_obj` und `load`).
    fn build_graph(&mut self, record: &GraphRecord) -> Option<Graph> {
        let Some(spec) = shape_spec(&record.graph_type) else {
            log::warn!("Unbekannter Graph-Typ: {}", record.graph_type);
            return None;
        };
        self.next_id += 1;
        let id = format!("{}-{}", spec.tag, self.next_id);
        let control_points = record.ctls.iter().map(|c| c.to_control_point()).collect();
        Some(Graph::new(
            id,
            spec,
            control_points,
            record.style.clone(),
            Some(self.layer),
            &self.options,
        ))
    }
}
