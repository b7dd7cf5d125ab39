//! Zentrale Konfiguration des Markup-Editors.
//!
//! `MarkupOptions` enthält alle zur Laufzeit änderbaren Werte mit
//! dokumentierten Standardwerten. Die `const`-Werte bleiben als
//! Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

// ── Layer & Interaktion ─────────────────────────────────────────────

/// Name des gemeinsamen Annotations-Layers in der Szene.
pub const LAYER_ID: &str = "markup";
/// Pick-Radius in Globus-Metern: Klick innerhalb dieses Radius trifft
/// einen Kontrollpunkt.
pub const PICK_RADIUS_M: f64 = 25.0;
/// Nach dem Abschluss-Gestus direkt in den Edit-Modus wechseln.
pub const EDIT_AFTER_CREATE: bool = true;

// ── Geometrie-Abtastung ─────────────────────────────────────────────

/// Zwischenpunkte pro Kurvensegment (Bézier/Spline).
pub const SAMPLES_PER_SEGMENT: usize = 16;
/// Segmentanzahl für Kreis- und Ellipsen-Ringe.
pub const CIRCLE_SEGMENTS: usize = 64;
/// Tangenten-Skalierung interpolierender Splines (0..1, höher = runder).
pub const SPLINE_SHARPNESS: f64 = 0.85;
/// Weichere Variante für `BezierSpline`.
pub const SPLINE_SHARPNESS_SOFT: f64 = 0.5;

// ── Darstellung (Standard-Stile) ────────────────────────────────────

/// Standard-Linienfarbe neuer Graphen (RGBA: Bernstein).
pub const LINE_COLOR_DEFAULT: [f32; 4] = [1.0, 0.8, 0.1, 1.0];
/// Standard-Linienstärke in Pixeln.
pub const LINE_WIDTH_DEFAULT: f64 = 2.0;
/// Standard-Füllfarbe für Flächen (RGBA: Bernstein, halbtransparent).
pub const FILL_COLOR_DEFAULT: [f32; 4] = [1.0, 0.8, 0.1, 0.35];

// ── Laufzeit-Optionen (serialisierbar) ──────────────────────────────

/// Alle zur Laufzeit änderbaren Editor-Optionen.
/// Wird als `globe_markup_editor.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkupOptions {
    /// Name des Annotations-Layers in der Szene
    pub layer_id: String,
    /// Nach dem Abschluss-Gestus direkt in den Edit-Modus wechseln
    pub edit_after_create: bool,
    /// Pick-Radius für Klick-Selektion in Globus-Metern
    pub pick_radius_m: f64,
    /// Zwischenpunkte pro Kurvensegment
    pub samples_per_segment: usize,
    /// Segmentanzahl für Kreis- und Ellipsen-Ringe
    pub circle_segments: usize,
    /// Tangenten-Skalierung interpolierender Splines (0..1)
    pub spline_sharpness: f64,
}

impl Default for MarkupOptions {
    fn default() -> Self {
        Self {
            layer_id: LAYER_ID.to_string(),
            edit_after_create: EDIT_AFTER_CREATE,
            pick_radius_m: PICK_RADIUS_M,
            samples_per_segment: SAMPLES_PER_SEGMENT,
            circle_segments: CIRCLE_SEGMENTS,
            spline_sharpness: SPLINE_SHARPNESS,
        }
    }
}

impl MarkupOptions {
    /// Standard-Pfad der Options-Datei (neben dem Arbeitsverzeichnis).
    pub fn config_path() -> std::path::PathBuf {
        std::path::PathBuf::from("globe_markup_editor.toml")
    }

    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<MarkupOptions>(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts.sanitized()
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert die Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Validiert alle Felder und klemmt ungültige Werte auf sinnvolle
    /// Grenzen. Abweichungen werden geloggt.
    pub fn sanitized(&self) -> Self {
        let mut opts = self.clone();
        if opts.layer_id.trim().is_empty() {
            log::warn!("layer_id leer, verwende '{}'", LAYER_ID);
            opts.layer_id = LAYER_ID.to_string();
        }
        if !opts.pick_radius_m.is_finite() || opts.pick_radius_m <= 0.0 {
            log::warn!("pick_radius_m ungültig, verwende {}", PICK_RADIUS_M);
            opts.pick_radius_m = PICK_RADIUS_M;
        }
        if opts.samples_per_segment == 0 {
            log::warn!("samples_per_segment = 0, verwende {}", SAMPLES_PER_SEGMENT);
            opts.samples_per_segment = SAMPLES_PER_SEGMENT;
        }
        if opts.circle_segments < 8 {
            log::warn!("circle_segments < 8, verwende {}", CIRCLE_SEGMENTS);
            opts.circle_segments = CIRCLE_SEGMENTS;
        }
        if !opts.spline_sharpness.is_finite() {
            opts.spline_sharpness = SPLINE_SHARPNESS;
        }
        opts.spline_sharpness = opts.spline_sharpness.clamp(0.0, 1.0);
        opts
    }
}
