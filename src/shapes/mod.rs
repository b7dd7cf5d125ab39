//! Trait-basiertes Shape-System: pro Graph-Typ eine reine Strategie,
//! die aus der geordneten Kontrollpunkt-Folge Render-Geometrie ableitet.
//!
//! Jede Strategie implementiert den `ShapeComputer`-Trait und wird über
//! die explizite Tag-Tabelle `SHAPE_REGISTRY` aufgelöst. Strategien sind
//! zustandslos; Mutation und Lebenszyklus liegen beim `Graph`.

/// Bézier-Kurven fester und beliebiger Ordnung.
pub mod bezier;
/// Mess-Figuren: Distanz, Winkel, Fläche, Dreieck, Sichtlinie.
pub mod measure;
/// Einzelpunkt-Typen (Punkt, Pins, Modelle, Bilder).
pub mod point;
/// Flächen-Typen (Polygone, Kreise, Sektoren, Pfeile, Flaggen).
pub mod polygon;
/// Linien-Typen (Punktlinie, Großkreis, Kreisbogen).
pub mod polyline;
/// Interpolierende Splines.
pub mod spline;

use glam::DVec2;

use crate::core::GeoPosition;
use crate::shared::geodesy::LocalFrame;
use crate::shared::options::{MarkupOptions, SPLINE_SHARPNESS_SOFT};

// ── Typen ───────────────────────────────────────────────────────────

/// Render-Kategorie eines Graphen, bestimmt den Entity-Typ in der Szene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphKind {
    /// Einzelposition (Billboard, Pin, Modell)
    Point,
    /// Offener Linienzug
    Polyline,
    /// Geschlossene Fläche
    Polygon,
}

/// Abgeleiteter Skalar einer Mess-Figur.
///
/// Wird bei jeder Geometrie-Neuberechnung identisch mitberechnet und
/// nie unabhängig davon gecacht.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Measurement {
    /// Geodätische Distanz in Metern
    Distance { meters: f64 },
    /// Eingeschlossener Winkel in Grad
    Angle { degrees: f64 },
    /// Eingeschlossene sphärische Fläche in Quadratmetern
    Area { square_meters: f64 },
    /// Vertikales Dreieck: Horizontal-, Höhen- und Schräg-Distanz
    Triangle {
        horizontal_m: f64,
        height_m: f64,
        slant_m: f64,
    },
    /// Sicht-Distanz (schräg) in Metern
    Sight { meters: f64 },
}

impl Measurement {
    /// Formatiert den Skalar für das Szenen-Label.
    pub fn label(&self) -> String {
        match *self {
            Self::Distance { meters } | Self::Sight { meters } => format_distance(meters),
            Self::Angle { degrees } => format!("{degrees:.1}°"),
            Self::Area { square_meters } => {
                if square_meters < 1_000_000.0 {
                    format!("{square_meters:.1} m²")
                } else {
                    format!("{:.3} km²", square_meters / 1_000_000.0)
                }
            }
            Self::Triangle {
                horizontal_m,
                height_m,
                slant_m,
            } => format!(
                "H: {} | ΔH: {} | S: {}",
                format_distance(horizontal_m),
                format_distance(height_m),
                format_distance(slant_m)
            ),
        }
    }
}

fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{meters:.1} m")
    } else {
        format!("{:.2} km", meters / 1000.0)
    }
}

/// Ergebnis einer Shape-Berechnung: geordnete Render-Positionen plus
/// optionaler Mess-Skalar. Reine Daten, keine Mutation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShapeGeometry {
    /// Render-Positionen in Zeichenreihenfolge
    pub positions: Vec<GeoPosition>,
    /// Als geschlossener Ring zu zeichnen
    pub closed: bool,
    /// Abgeleiteter Skalar (nur Mess-Figuren)
    pub measurement: Option<Measurement>,
}

impl ShapeGeometry {
    /// Leere Geometrie: unterhalb der Mindest-Punktzahl wird nichts
    /// gerendert, das ist kein Fehlerfall.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Offener Linienzug.
    pub fn open(positions: Vec<GeoPosition>) -> Self {
        Self {
            positions,
            closed: false,
            measurement: None,
        }
    }

    /// Geschlossener Ring.
    pub fn closed(positions: Vec<GeoPosition>) -> Self {
        Self {
            positions,
            closed: true,
            measurement: None,
        }
    }

    /// Hängt einen Mess-Skalar an.
    pub fn with_measurement(mut self, measurement: Measurement) -> Self {
        self.measurement = Some(measurement);
        self
    }

    /// Ist nichts zu rendern?
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Reine Strategie: Kontrollpunkte zu Render-Geometrie.
///
/// Deterministisch bei identischer Eingabe. Unterhalb von
/// `min_point_num` wird eine leere Geometrie geliefert, nie ein Fehler.
pub trait ShapeComputer {
    /// Mindest-Anzahl an Kontrollpunkten.
    fn min_point_num(&self) -> usize;

    /// Leitet die Geometrie aus den (bereits zeit-gesampelten)
    /// Kontrollpunkt-Positionen ab.
    fn compute(&self, points: &[GeoPosition]) -> ShapeGeometry;
}

// ── Registry ────────────────────────────────────────────────────────

/// Eintrag der Tag-Tabelle: Typ-Tag, Render-Kategorie und Konstruktor.
pub struct ShapeSpec {
    /// Typ-Tag des Factory-Protokolls
    pub tag: &'static str,
    /// Render-Kategorie
    pub kind: GraphKind,
    builder: fn(&MarkupOptions) -> Box<dyn ShapeComputer>,
}

impl ShapeSpec {
    /// Baut die Strategie mit den aktuellen Optionen.
    pub fn build(&self, options: &MarkupOptions) -> Box<dyn ShapeComputer> {
        (self.builder)(options)
    }
}

/// Explizite Tag-Tabelle. Erweiterung durch neue Einträge, nie durch
/// Laufzeit-Typsuche.
pub static SHAPE_REGISTRY: &[ShapeSpec] = &[
    // ── Punkte, Pins, Modelle, Bilder ──
    ShapeSpec { tag: "Point", kind: GraphKind::Point, builder: |_| Box::new(point::PointShape) },
    ShapeSpec { tag: "Image", kind: GraphKind::Point, builder: |_| Box::new(point::PointShape) },
    ShapeSpec { tag: "RedFlag", kind: GraphKind::Point, builder: |_| Box::new(point::PointShape) },
    ShapeSpec { tag: "Satellite", kind: GraphKind::Point, builder: |_| Box::new(point::PointShape) },
    ShapeSpec { tag: "Station", kind: GraphKind::Point, builder: |_| Box::new(point::PointShape) },
    ShapeSpec { tag: "PinText", kind: GraphKind::Point, builder: |_| Box::new(point::PointShape) },
    ShapeSpec { tag: "PinIcon", kind: GraphKind::Point, builder: |_| Box::new(point::PointShape) },
    ShapeSpec { tag: "PinImage", kind: GraphKind::Point, builder: |_| Box::new(point::PointShape) },
    // ── Linien ──
    ShapeSpec { tag: "Polyline", kind: GraphKind::Polyline, builder: |_| Box::new(polyline::PointLineShape) },
    ShapeSpec { tag: "PointLine", kind: GraphKind::Polyline, builder: |_| Box::new(polyline::PointLineShape) },
    ShapeSpec { tag: "BeeLine", kind: GraphKind::Polyline, builder: |o| Box::new(polyline::BeeLineShape { samples: o.samples_per_segment }) },
    ShapeSpec { tag: "CircleArc", kind: GraphKind::Polyline, builder: |o| Box::new(polyline::CircleArcShape { samples: o.circle_segments }) },
    ShapeSpec { tag: "Bezier1", kind: GraphKind::Polyline, builder: |o| Box::new(bezier::Bezier1Shape { samples: o.samples_per_segment * 2 }) },
    ShapeSpec { tag: "Bezier2", kind: GraphKind::Polyline, builder: |o| Box::new(bezier::Bezier2Shape { samples: o.samples_per_segment * 2 }) },
    ShapeSpec { tag: "BezierN", kind: GraphKind::Polyline, builder: |o| Box::new(bezier::BezierNShape { samples: o.samples_per_segment * 2 }) },
    ShapeSpec { tag: "PointSpline", kind: GraphKind::Polyline, builder: |o| Box::new(spline::SplineShape { samples_per_segment: o.samples_per_segment, sharpness: o.spline_sharpness }) },
    ShapeSpec { tag: "BezierSpline", kind: GraphKind::Polyline, builder: |o| Box::new(spline::SplineShape { samples_per_segment: o.samples_per_segment, sharpness: SPLINE_SHARPNESS_SOFT }) },
    // ── Flächen ──
    ShapeSpec { tag: "Polygon", kind: GraphKind::Polygon, builder: |_| Box::new(polygon::PolygonShape) },
    ShapeSpec { tag: "Rectangle", kind: GraphKind::Polygon, builder: |_| Box::new(polygon::RectangleShape) },
    ShapeSpec { tag: "Circle", kind: GraphKind::Polygon, builder: |o| Box::new(polygon::CircleShape { segments: o.circle_segments }) },
    ShapeSpec { tag: "Ellipse", kind: GraphKind::Polygon, builder: |o| Box::new(polygon::EllipseShape { segments: o.circle_segments }) },
    ShapeSpec { tag: "SectorArea", kind: GraphKind::Polygon, builder: |o| Box::new(polygon::SectorAreaShape { segments: o.circle_segments }) },
    ShapeSpec { tag: "CircleArcArea", kind: GraphKind::Polygon, builder: |o| Box::new(polygon::CircleArcAreaShape { samples: o.circle_segments }) },
    ShapeSpec { tag: "SplineArea", kind: GraphKind::Polygon, builder: |o| Box::new(polygon::SplineAreaShape { samples_per_segment: o.samples_per_segment, sharpness: o.spline_sharpness }) },
    ShapeSpec { tag: "Arrow1", kind: GraphKind::Polygon, builder: |_| Box::new(polygon::ArrowShape { square_tail: false }) },
    ShapeSpec { tag: "SquareArrow", kind: GraphKind::Polygon, builder: |_| Box::new(polygon::ArrowShape { square_tail: true }) },
    ShapeSpec { tag: "MultiPartArrow", kind: GraphKind::Polygon, builder: |_| Box::new(polygon::MultiPartArrowShape) },
    ShapeSpec { tag: "PincerAttack", kind: GraphKind::Polygon, builder: |o| Box::new(polygon::PincerAttackShape { samples_per_segment: o.samples_per_segment, sharpness: o.spline_sharpness }) },
    ShapeSpec { tag: "FlagTriangle", kind: GraphKind::Polygon, builder: |_| Box::new(polygon::FlagShape { rectangular: false }) },
    ShapeSpec { tag: "FlagRectangle", kind: GraphKind::Polygon, builder: |_| Box::new(polygon::FlagShape { rectangular: true }) },
    // ── Messungen ──
    ShapeSpec { tag: "DistanceMeasure", kind: GraphKind::Polyline, builder: |_| Box::new(measure::DistanceMeasureShape) },
    ShapeSpec { tag: "AngleMeasure", kind: GraphKind::Polyline, builder: |_| Box::new(measure::AngleMeasureShape) },
    ShapeSpec { tag: "TriangleMeasure", kind: GraphKind::Polyline, builder: |_| Box::new(measure::TriangleMeasureShape) },
    ShapeSpec { tag: "SightLine", kind: GraphKind::Polyline, builder: |_| Box::new(measure::SightLineShape) },
    ShapeSpec { tag: "AreaMeasure", kind: GraphKind::Polygon, builder: |_| Box::new(measure::AreaMeasureShape) },
];

/// Schlägt einen Typ-Tag in der Registry nach.
pub fn shape_spec(tag: &str) -> Option<&'static ShapeSpec> {
    SHAPE_REGISTRY.iter().find(|spec| spec.tag == tag)
}

/// Alle registrierten Typ-Tags.
pub fn registered_tags() -> impl Iterator<Item = &'static str> {
    SHAPE_REGISTRY.iter().map(|spec| spec.tag)
}

// ── Gemeinsame Utilities ────────────────────────────────────────────

/// Projiziert die Punktfolge in die lokale Ebene um den ersten Punkt.
pub(crate) fn project_points(points: &[GeoPosition]) -> (LocalFrame, Vec<DVec2>) {
    let frame = LocalFrame::new(points[0]);
    let projected = frame.project_all(points);
    (frame, projected)
}
