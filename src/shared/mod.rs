//! Geteilte, layer-neutrale Bausteine: Optionen, Globus- und Spline-Geometrie.
//!
//! Enthält reine Funktionen und Konfiguration, die von `core`, `shapes`
//! und `app` gemeinsam genutzt werden, ohne Zirkel-Abhängigkeiten zu erzeugen.

pub mod geodesy;
pub mod options;
pub mod spline_geometry;

pub use options::MarkupOptions;
pub use options::{PICK_RADIUS_M, SAMPLES_PER_SEGMENT, SPLINE_SHARPNESS};
