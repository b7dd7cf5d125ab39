//! EditMode: die Zustandsmaschine der interaktiven Bearbeitung.
//!
//! Zustände: `Idle → Selecting → Drawing → Editing → Idle`; Löschung ist
//! aus Selecting/Editing erreichbar und terminal. Der EditMode besitzt
//! den Entwurf während der Zeichen-Phase exklusiv: erst der
//! Abschluss-Gestus überführt ihn in die Sammlung des Managers, ein
//! Abbruch verwirft ihn spurlos.

use glam::DVec2;

use super::events::{InputEvent, Key};
use crate::core::{
    ControlPoint, GeoPosition, Graph, GraphCollection, GraphState, PickIndex, PickMatch, SimTime,
};
use crate::scene::{InputKind, ListenerHandle, SceneEngine};
use crate::shared::geodesy::LocalFrame;
use crate::shared::MarkupOptions;

/// Callback bei Selektion eines Graphen.
pub type GraphSelectHandler = Box<dyn FnMut(&Graph)>;
/// Callback bei Abschluss eines gezeichneten Graphen.
pub type GraphFinishHandler = Box<dyn FnMut(&Graph)>;

/// Zustand der Interaktions-Maschine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditState {
    /// Inaktiv
    #[default]
    Idle,
    /// Klicks selektieren existierende Graphen
    Selecting,
    /// Klicks sammeln Kontrollpunkte für den Entwurf
    Drawing,
    /// Kontrollpunkte des selektierten Graphen sind verschiebbar
    Editing,
}

/// Interaktions-Controller: konsumiert Zeiger- und Tastatur-Events,
/// mutiert Kontrollpunkte und feuert Selektions-/Abschluss-Callbacks.
pub struct EditMode {
    state: EditState,
    draft: Option<Graph>,
    selected: Option<String>,
    drag_point: Option<usize>,
    select_handler: Option<GraphSelectHandler>,
    finish_handler: Option<GraphFinishHandler>,
    listeners: Vec<ListenerHandle>,
    edit_after_create: bool,
    pick_radius_m: f64,
}

impl EditMode {
    /// Erstellt einen EditMode mit den übergebenen Optionen.
    pub fn new(options: &MarkupOptions) -> Self {
        Self {
            state: EditState::Idle,
            draft: None,
            selected: None,
            drag_point: None,
            select_handler: None,
            finish_handler: None,
            listeners: Vec::new(),
            edit_after_create: options.edit_after_create,
            pick_radius_m: options.pick_radius_m,
        }
    }

    /// Aktueller Zustand.
    pub fn state(&self) -> EditState {
        self.state
    }

    /// ID des selektierten Graphen, falls vorhanden.
    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Der aktive Entwurf während der Zeichen-Phase.
    pub fn draft(&self) -> Option<&Graph> {
        self.draft.as_ref()
    }

    /// Registriert den Selektions-Callback.
    /// Single-Slot: eine spätere Registrierung ersetzt die vorherige.
    pub fn set_graph_select_handler(&mut self, handler: GraphSelectHandler) {
        self.select_handler = Some(handler);
    }

    /// Registriert den Abschluss-Callback.
    /// Single-Slot: eine spätere Registrierung ersetzt die vorherige.
    pub fn set_graph_finish_handler(&mut self, handler: GraphFinishHandler) {
        self.finish_handler = Some(handler);
    }

    /// Startet den Selektions-Modus und abonniert die Eingabe-Events.
    pub fn start(&mut self, scene: &mut dyn SceneEngine) {
        if self.listeners.is_empty() {
            for kind in [
                InputKind::Click,
                InputKind::DoubleClick,
                InputKind::RightClick,
                InputKind::PointerDown,
                InputKind::PointerMove,
                InputKind::PointerUp,
                InputKind::Key,
            ] {
                self.listeners.push(scene.subscribe(kind));
            }
        }
        if self.state == EditState::Idle {
            self.state = EditState::Selecting;
        }
    }

    /// Beginnt das interaktive Zeichnen eines neuen Graphen.
    /// Ein bereits aktiver Entwurf wird verworfen.
    pub fn create(&mut self, graph: Graph, scene: &mut dyn SceneEngine) -> String {
        self.discard_draft(scene);
        let time = scene.clock();
        let id = graph.id().to_string();
        let mut graph = graph;
        graph.sync_scene(scene, time);
        self.draft = Some(graph);
        self.state = EditState::Drawing;
        log::info!("Zeichnen gestartet: {}", id);
        id
    }

    /// Fügt einen Graphen mit bereits gesetzten Kontrollpunkten direkt
    /// in die Sammlung ein und wechselt in den Edit-Modus
    /// (Wiederherstellungs-Pfad, keine Zeichen-Phase).
    pub fn draw(
        &mut self,
        mut graph: Graph,
        graphs: &mut GraphCollection,
        scene: &mut dyn SceneEngine,
    ) -> String {
        let time = scene.clock();
        self.deselect(graphs, scene);

        let id = graph.id().to_string();
        graph.set_state(GraphState::Editing);
        graph.sync_scene(scene, time);
        graphs.insert(id.clone(), graph);

        self.selected = Some(id.clone());
        self.state = EditState::Editing;
        log::info!("Graph direkt im Edit-Modus: {}", id);
        id
    }

    /// Verarbeitet ein Eingabe-Event gemäß aktuellem Zustand.
    pub fn handle_event(
        &mut self,
        graphs: &mut GraphCollection,
        scene: &mut dyn SceneEngine,
        event: &InputEvent,
    ) {
        match event {
            InputEvent::Click { position } => self.on_click(graphs, scene, *position),
            InputEvent::DoubleClick { .. } | InputEvent::RightClick { .. } => {
                self.on_finish_gesture(graphs, scene)
            }
            InputEvent::PointerDown { position } => self.on_pointer_down(graphs, scene, *position),
            InputEvent::PointerMove { position } => self.on_pointer_move(graphs, scene, *position),
            InputEvent::PointerUp { .. } => self.drag_point = None,
            InputEvent::Key { key } => self.on_key(graphs, scene, *key),
        }
    }

    /// Löscht den selektierten Graphen: entfernt ihn aus Szene und
    /// Sammlung und gibt ihn zurück. Ohne Selektion ein No-op.
    pub fn delete_select_graph(
        &mut self,
        graphs: &mut GraphCollection,
        scene: &mut dyn SceneEngine,
    ) -> Option<Graph> {
        if self.state != EditState::Editing {
            return None;
        }
        let id = self.selected.take()?;
        let mut graph = graphs.shift_remove(&id)?;
        graph.delete(scene);
        self.drag_point = None;
        self.state = EditState::Selecting;
        Some(graph)
    }

    /// Erzwingt den Ausstieg nach Idle. Ein Entwurf oberhalb der
    /// Mindest-Punktzahl wird abgeschlossen, darunter verworfen.
    pub fn finish(&mut self, graphs: &mut GraphCollection, scene: &mut dyn SceneEngine) {
        match self.state {
            EditState::Drawing => {
                let ready = self
                    .draft
                    .as_ref()
                    .is_some_and(|d| d.control_points().len() >= d.min_point_num());
                if ready {
                    self.finalize_draft(graphs, scene);
                    self.deselect(graphs, scene);
                } else {
                    self.discard_draft(scene);
                }
            }
            EditState::Editing => self.deselect(graphs, scene),
            _ => {}
        }
        self.state = EditState::Idle;
    }

    /// Meldet sämtliche von dieser Instanz registrierten Listener ab und
    /// verwirft einen aktiven Entwurf. Mehrfacher Aufruf ist sicher.
    pub fn destroy_handler(&mut self, scene: &mut dyn SceneEngine) {
        for handle in self.listeners.drain(..) {
            scene.unsubscribe(handle);
        }
        self.discard_draft(scene);
        self.drag_point = None;
        self.state = EditState::Idle;
    }

    // ── Event-Verarbeitung ──────────────────────────────────────────

    fn on_click(
        &mut self,
        graphs: &mut GraphCollection,
        scene: &mut dyn SceneEngine,
        position: GeoPosition,
    ) {
        let time = scene.clock();
        match self.state {
            EditState::Drawing => {
                let Some(draft) = self.draft.as_mut() else {
                    return;
                };
                draft.add_control_point(ControlPoint::fixed(position));
                // Live-Vorschau: Geometrie nach jedem Punkt neu
                draft.sync_scene(scene, time);
            }
            EditState::Selecting => {
                if let Some(hit) = self.pick(graphs, time, position) {
                    self.select(graphs, scene, &hit.graph_id);
                }
            }
            EditState::Editing => match self.pick(graphs, time, position) {
                Some(hit) => {
                    if self.selected.as_deref() != Some(hit.graph_id.as_str()) {
                        self.select(graphs, scene, &hit.graph_id);
                    }
                }
                None => {
                    // Klick ins Leere beendet die Bearbeitung
                    self.deselect(graphs, scene);
                    self.state = EditState::Selecting;
                }
            },
            EditState::Idle => {}
        }
    }

    fn on_finish_gesture(&mut self, graphs: &mut GraphCollection, scene: &mut dyn SceneEngine) {
        if self.state != EditState::Drawing {
            return;
        }
        let ready = self
            .draft
            .as_ref()
            .is_some_and(|d| d.control_points().len() >= d.min_point_num());
        if ready {
            self.finalize_draft(graphs, scene);
        } else {
            // Unter Minimum: Gestus ignorieren, Zeichnen geht weiter
            log::debug!("Abschluss-Gestus unter Mindest-Punktzahl ignoriert");
        }
    }

    fn on_pointer_down(
        &mut self,
        graphs: &mut GraphCollection,
        scene: &mut dyn SceneEngine,
        position: GeoPosition,
    ) {
        if self.state != EditState::Editing {
            return;
        }
        let time = scene.clock();
        let Some(selected) = self.selected.clone() else {
            return;
        };
        let Some(graph) = graphs.get(&selected) else {
            return;
        };

        let frame = LocalFrame::new(position);
        let index = PickIndex::from_graphs(std::iter::once(graph), time, &frame);
        self.drag_point = index
            .nearest(DVec2::ZERO)
            .filter(|hit| hit.distance <= self.pick_radius_m)
            .map(|hit| hit.point_index);
    }

    fn on_pointer_move(
        &mut self,
        graphs: &mut GraphCollection,
        scene: &mut dyn SceneEngine,
        position: GeoPosition,
    ) {
        let Some(index) = self.drag_point else {
            return;
        };
        let time = scene.clock();
        let Some(id) = self.selected.as_deref() else {
            return;
        };
        if let Some(graph) = graphs.get_mut(id) {
            if graph.move_control_point(index, position) {
                // Synchrone Neuberechnung vor dem nächsten Frame
                graph.sync_scene(scene, time);
            }
        }
    }

    fn on_key(&mut self, graphs: &mut GraphCollection, scene: &mut dyn SceneEngine, key: Key) {
        match (self.state, key) {
            (EditState::Drawing, Key::Enter) => self.on_finish_gesture(graphs, scene),
            (EditState::Drawing, Key::Escape) => {
                // Expliziter Abbruch: Entwurf verwerfen, nie in die Sammlung
                self.discard_draft(scene);
                self.state = EditState::Selecting;
            }
            (EditState::Editing, Key::Enter | Key::Escape) => {
                self.deselect(graphs, scene);
                self.state = EditState::Selecting;
            }
            _ => {}
        }
    }

    // ── Interne Übergänge ───────────────────────────────────────────

    /// Nächstgelegener Kontrollpunkt aller Graphen innerhalb des
    /// Pick-Radius.
    fn pick(
        &self,
        graphs: &GraphCollection,
        time: SimTime,
        position: GeoPosition,
    ) -> Option<PickMatch> {
        let frame = LocalFrame::new(position);
        let index = PickIndex::from_graphs(graphs.values(), time, &frame);
        index
            .nearest(DVec2::ZERO)
            .filter(|hit| hit.distance <= self.pick_radius_m)
    }

    /// Wechselt die Selektion auf `id` und feuert den
    /// Selektions-Callback.
    fn select(&mut self, graphs: &mut GraphCollection, scene: &mut dyn SceneEngine, id: &str) {
        let time = scene.clock();
        self.deselect(graphs, scene);

        let Some(graph) = graphs.get_mut(id) else {
            return;
        };
        graph.set_state(GraphState::Editing);
        graph.sync_scene(scene, time);
        self.selected = Some(id.to_string());
        self.state = EditState::Editing;

        if let Some(handler) = self.select_handler.as_mut() {
            if let Some(graph) = graphs.get(id) {
                handler(graph);
            }
        }
        log::info!("Graph selektiert: {}", id);
    }

    /// Finalisiert den selektierten Graphen und hebt die Selektion auf.
    fn deselect(&mut self, graphs: &mut GraphCollection, scene: &mut dyn SceneEngine) {
        let time = scene.clock();
        self.drag_point = None;
        if let Some(prev) = self.selected.take() {
            if let Some(graph) = graphs.get_mut(&prev) {
                graph.set_state(GraphState::Finalized);
                graph.sync_scene(scene, time);
            }
        }
    }

    /// Überführt den fertigen Entwurf in die Sammlung. Feuert den
    /// Abschluss-Callback, nicht den Selektions-Callback (Erstellung
    /// ist keine Selektion).
    fn finalize_draft(
        &mut self,
        graphs: &mut GraphCollection,
        scene: &mut dyn SceneEngine,
    ) -> Option<String> {
        let time = scene.clock();
        let mut draft = self.draft.take()?;
        let id = draft.id().to_string();

        if self.edit_after_create {
            draft.set_state(GraphState::Editing);
        } else {
            draft.set_state(GraphState::Finalized);
        }
        draft.sync_scene(scene, time);

        if let Some(handler) = self.finish_handler.as_mut() {
            handler(&draft);
        }
        graphs.insert(id.clone(), draft);

        if self.edit_after_create {
            self.selected = Some(id.clone());
            self.state = EditState::Editing;
        } else {
            self.state = EditState::Selecting;
        }
        log::info!("Graph abgeschlossen: {}", id);
        Some(id)
    }

    /// Verwirft den aktiven Entwurf samt Vorschau-Entities.
    fn discard_draft(&mut self, scene: &mut dyn SceneEngine) {
        if let Some(mut draft) = self.draft.take() {
            log::info!("Entwurf verworfen: {}", draft.id());
            draft.delete(scene);
        }
    }
}
