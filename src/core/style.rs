//! Stil-Eigenschaften eines Graphen.

use serde::{Deserialize, Serialize};

/// Eigenschafts-Beutel für die Darstellung eines Graphen.
///
/// Benannte Felder für die gängigen Stile; host-spezifische Zusatzfelder
/// laufen unverändert durch `extra` mit (Persistenz-Passthrough).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphStyle {
    /// Linienfarbe (RGBA, 0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_color: Option<[f32; 4]>,
    /// Linienstärke in Pixeln
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_width: Option<f64>,
    /// Füllfarbe für Flächen (RGBA, 0..1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<[f32; 4]>,
    /// Umrandung zeichnen
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outline: Option<bool>,
    /// Icon-Name für Pin-Typen
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Bild-URL für Bild- und Pin-Typen
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Text für Pin- und Beschriftungs-Typen
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Host-spezifische Zusatzfelder (unverändert persistiert)
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl GraphStyle {
    /// Sind sämtliche Felder unbesetzt?
    pub fn is_empty(&self) -> bool {
        self.line_color.is_none()
            && self.line_width.is_none()
            && self.fill_color.is_none()
            && self.outline.is_none()
            && self.icon.is_none()
            && self.image.is_none()
            && self.text.is_none()
            && self.extra.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_style_is_empty() {
        assert!(GraphStyle::default().is_empty());
    }

    #[test]
    fn unknown_fields_roundtrip_through_extra() {
        let json = r#"{"line_width": 3.0, "glow": true, "pulse_hz": 2.5}"#;
        let style: GraphStyle = serde_json::from_str(json).expect("Parse erwartet");
        assert_eq!(style.line_width, Some(3.0));
        assert_eq!(style.extra.get("glow"), Some(&serde_json::Value::Bool(true)));

        let back = serde_json::to_value(&style).expect("Serialisierung erwartet");
        assert_eq!(back.get("pulse_hz"), Some(&serde_json::json!(2.5)));
    }
}
