//! Vertrag zur externen Szenen-Engine (konsumiert, nicht reimplementiert).
//!
//! Die Engine besitzt Rendering, Kamera und Uhr. Dieses Modul definiert
//! nur die schmale Schnittstelle, die der Markup-Kern benötigt:
//! Entity-Lebenszyklus, Eingabe-Abonnements und Zeit-Sampling.

pub mod memory;

pub use memory::MemoryScene;

use crate::core::{GeoPosition, GraphStyle, SimTime};

/// Entity-Kennung der Szene.
pub type EntityId = u64;

/// Abonnement-Handle für Eingabe-Listener; wird von `destroy_handler`
/// zum Abmelden verwendet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle(pub u64);

/// Eingabe-Kategorien, die ein EditMode abonnieren kann.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Einfacher Klick
    Click,
    /// Doppelklick
    DoubleClick,
    /// Rechtsklick
    RightClick,
    /// Zeiger gedrückt
    PointerDown,
    /// Zeiger bewegt
    PointerMove,
    /// Zeiger losgelassen
    PointerUp,
    /// Tastatur
    Key,
}

/// Geometrie einer Szenen-Entity.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityGeometry {
    /// Gruppierungs-Knoten (Layer)
    Group,
    /// Einzelposition (Billboard/Pin/Modell)
    Point { position: GeoPosition },
    /// Offener Linienzug
    Polyline { positions: Vec<GeoPosition> },
    /// Geschlossene Fläche
    Polygon { positions: Vec<GeoPosition> },
    /// Text-Label an einer Position
    Label { position: GeoPosition, text: String },
}

/// Beschreibung einer Szenen-Entity.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneEntity {
    /// Anzeigename (optional)
    pub name: Option<String>,
    /// Übergeordneter Layer
    pub layer: Option<EntityId>,
    /// Geometrie
    pub geometry: EntityGeometry,
    /// Darstellungs-Stil
    pub style: GraphStyle,
}

impl SceneEntity {
    /// Erstellt eine Entity ohne Layer und Stil.
    pub fn new(geometry: EntityGeometry) -> Self {
        Self {
            name: None,
            layer: None,
            geometry,
            style: GraphStyle::default(),
        }
    }

    /// Erstellt einen benannten Gruppierungs-Layer.
    pub fn group(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            layer: None,
            geometry: EntityGeometry::Group,
            style: GraphStyle::default(),
        }
    }

    /// Setzt den übergeordneten Layer.
    pub fn with_layer(mut self, layer: EntityId) -> Self {
        self.layer = Some(layer);
        self
    }

    /// Setzt den Stil.
    pub fn with_style(mut self, style: GraphStyle) -> Self {
        self.style = style;
        self
    }
}

/// Schnittstelle zur Szenen-Engine.
///
/// Implementierungen binden einen konkreten Globus-Renderer an; für
/// Tests und Headless-Betrieb liegt [`MemoryScene`] bei.
pub trait SceneEngine {
    /// Legt eine Entity an und gibt ihre Kennung zurück.
    fn create_entity(&mut self, entity: SceneEntity) -> EntityId;

    /// Ersetzt eine Entity. `false` wenn die Kennung unbekannt ist.
    fn update_entity(&mut self, id: EntityId, entity: SceneEntity) -> bool;

    /// Entfernt eine Entity. `false` wenn die Kennung unbekannt ist.
    fn remove_entity(&mut self, id: EntityId) -> bool;

    /// Meldet einen Eingabe-Listener an.
    fn subscribe(&mut self, kind: InputKind) -> ListenerHandle;

    /// Meldet einen Listener ab. `false` wenn das Handle unbekannt ist.
    fn unsubscribe(&mut self, handle: ListenerHandle) -> bool;

    /// Aktuelle Szenen-Uhrzeit.
    fn clock(&self) -> SimTime;
}
