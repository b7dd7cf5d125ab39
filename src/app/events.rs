//! Eingabe-Events aus der Szenen-Engine.
//!
//! Die Host-Engine unprojiziert Zeiger-Positionen bereits auf den
//! Globus und reicht die Events an `GraphManager::handle_event` weiter.

use crate::core::GeoPosition;

/// Tasten, die der EditMode auswertet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Abschluss-Gestus
    Enter,
    /// Abbruch-Gestus
    Escape,
}

/// Ein Zeiger- oder Tastatur-Event mit Globus-Position.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Einfacher Klick
    Click { position: GeoPosition },
    /// Doppelklick (Abschluss-Gestus beim Zeichnen)
    DoubleClick { position: GeoPosition },
    /// Rechtsklick (expliziter Abschluss-Gestus)
    RightClick { position: GeoPosition },
    /// Zeiger gedrückt (Drag-Beginn)
    PointerDown { position: GeoPosition },
    /// Zeiger bewegt (Drag-Update)
    PointerMove { position: GeoPosition },
    /// Zeiger losgelassen (Drag-Ende)
    PointerUp { position: GeoPosition },
    /// Tastatur-Eingabe
    Key { key: Key },
}
