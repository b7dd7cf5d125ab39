//! Zeit-samplebare Globus-Positionen.

use serde::{Deserialize, Serialize};

/// Geografische Position: Länge und Breite in Grad, Höhe in Metern.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPosition {
    /// Geografische Länge in Grad (Ost positiv)
    pub lon: f64,
    /// Geografische Breite in Grad (Nord positiv)
    pub lat: f64,
    /// Höhe über dem Ellipsoid in Metern
    #[serde(default)]
    pub height: f64,
}

impl GeoPosition {
    /// Erstellt eine Position mit Höhe.
    pub fn new(lon: f64, lat: f64, height: f64) -> Self {
        Self { lon, lat, height }
    }

    /// Erstellt eine Position auf Höhe 0.
    pub fn ground(lon: f64, lat: f64) -> Self {
        Self::new(lon, lat, 0.0)
    }
}

/// Szenen-Uhrzeit in Sekunden (von der Szenen-Engine geliefert).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct SimTime(pub f64);

/// Ein Positions-Sample einer animierten Position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionSample {
    /// Zeitpunkt in Szenen-Sekunden
    pub time: f64,
    /// Position zu diesem Zeitpunkt
    pub position: GeoPosition,
}

/// Konstante oder über die Zeit gesampelte Position.
///
/// Gesampelte Positionen werden linear interpoliert und an den Rändern
/// des Zeitbereichs geklemmt.
#[derive(Debug, Clone, PartialEq)]
pub enum PositionProperty {
    /// Feste Position (Normalfall)
    Constant(GeoPosition),
    /// Zeit-animierte Position (zeitlich sortierte Samples)
    Sampled(Vec<PositionSample>),
}

impl PositionProperty {
    /// Erstellt eine animierte Position; Samples werden zeitlich sortiert.
    /// Eine leere Sample-Liste ergibt eine konstante Null-Position.
    pub fn sampled(mut samples: Vec<PositionSample>) -> Self {
        if samples.is_empty() {
            log::warn!("PositionProperty ohne Samples, verwende Null-Position");
            return Self::Constant(GeoPosition::default());
        }
        samples.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self::Sampled(samples)
    }

    /// Ist die Position zeit-animiert?
    pub fn is_animated(&self) -> bool {
        matches!(self, Self::Sampled(_))
    }

    /// Wertet die Position zum Zeitpunkt `time` aus.
    pub fn sample(&self, time: SimTime) -> GeoPosition {
        match self {
            Self::Constant(p) => *p,
            Self::Sampled(samples) => {
                let t = time.0;
                let (Some(first), Some(last)) = (samples.first(), samples.last()) else {
                    return GeoPosition::default();
                };
                if t <= first.time {
                    return first.position;
                }
                if t >= last.time {
                    return last.position;
                }
                let idx = samples.partition_point(|s| s.time <= t);
                let before = &samples[idx - 1];
                let after = &samples[idx];
                let span = after.time - before.time;
                if span <= f64::EPSILON {
                    return before.position;
                }
                let f = (t - before.time) / span;
                GeoPosition::new(
                    before.position.lon + (after.position.lon - before.position.lon) * f,
                    before.position.lat + (after.position.lat - before.position.lat) * f,
                    before.position.height + (after.position.height - before.position.height) * f,
                )
            }
        }
    }
}
