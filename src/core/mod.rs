//! Core-Domänentypen: Positionen, Kontrollpunkte, Graphen, Pick-Index.
//!
//! Dieses Modul definiert die Haupt-Datenstrukturen:
//! - GeoPosition/PositionProperty: zeit-samplebare Globus-Positionen
//! - ControlPoint: geordneter Ankerpunkt eines Graphen
//! - Graph: eine interaktive Annotation mit Shape-Strategie
//! - PickIndex: KD-Tree über alle Kontrollpunkte für Klick-Selektion

pub mod control_point;
pub mod graph;
pub mod position;
pub mod spatial;
pub mod style;

pub use control_point::ControlPoint;
pub use graph::{ControlPointRecord, Graph, GraphCollection, GraphRecord, GraphState};
pub use position::{GeoPosition, PositionProperty, PositionSample, SimTime};
pub use spatial::{PickIndex, PickMatch};
pub use style::GraphStyle;
