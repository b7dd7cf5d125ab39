//! Kontrollpunkte: vom Nutzer gesetzte, geordnete Ankerpunkte eines Graphen.

use super::position::{GeoPosition, PositionProperty, SimTime};

/// Ein Kontrollpunkt eines Graphen.
///
/// Die Reihenfolge der Kontrollpunkte im Graph ist semantisch: sie
/// definiert die Vertex-Sequenz der Form.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlPoint {
    /// Zeit-samplebare Position
    pub position: PositionProperty,
    /// Optionale Beschriftung
    pub label: Option<String>,
}

impl ControlPoint {
    /// Erstellt einen festen (nicht animierten) Kontrollpunkt.
    pub fn fixed(position: GeoPosition) -> Self {
        Self {
            position: PositionProperty::Constant(position),
            label: None,
        }
    }

    /// Erstellt einen festen Kontrollpunkt mit Beschriftung.
    pub fn with_label(position: GeoPosition, label: impl Into<String>) -> Self {
        Self {
            position: PositionProperty::Constant(position),
            label: Some(label.into()),
        }
    }

    /// Wertet die Position zum Zeitpunkt `time` aus.
    pub fn position_at(&self, time: SimTime) -> GeoPosition {
        self.position.sample(time)
    }

    /// Setzt eine neue feste Position (Drag ersetzt Animation durch Konstante).
    pub fn set_position(&mut self, position: GeoPosition) {
        self.position = PositionProperty::Constant(position);
    }
}
