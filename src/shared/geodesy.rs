//! Reine Globus-Geometrie: Distanzen, Peilungen, Flächen und die lokale
//! Projektions-Ebene für planare Shape-Konstruktionen.
//!
//! Alle Winkel-Eingaben sind Grad (wie in `GeoPosition`), interne Rechnung
//! in Radiant. Distanzen und Flächen beziehen sich auf die Kugel mit
//! mittlerem Erdradius.

use glam::{DVec2, DVec3};

use crate::core::GeoPosition;

/// Mittlerer Erdradius in Metern (IUGG-Mittelwert, turf-kompatibel).
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Oberflächen-Distanz (Haversine) zwischen zwei Positionen in Metern.
/// Höhen werden ignoriert.
pub fn haversine_distance(a: &GeoPosition, b: &GeoPosition) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = lat2 - lat1;
    let dlon = (b.lon - a.lon).to_radians();

    let h = (dlat * 0.5).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon * 0.5).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
}

/// Schräg-Distanz: Oberflächen-Distanz plus Höhendifferenz (Pythagoras).
pub fn slant_distance(a: &GeoPosition, b: &GeoPosition) -> f64 {
    let ground = haversine_distance(a, b);
    let dh = b.height - a.height;
    (ground * ground + dh * dh).sqrt()
}

/// Anfangs-Peilung von `a` nach `b` in Radiant (0 = Nord, π/2 = Ost).
pub fn initial_bearing(a: &GeoPosition, b: &GeoPosition) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let y = dlon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();
    y.atan2(x)
}

/// Interpoliert entlang des Großkreises von `a` nach `b` (t ∈ [0, 1]).
/// Höhen werden linear interpoliert.
pub fn great_circle_interpolate(a: &GeoPosition, b: &GeoPosition, t: f64) -> GeoPosition {
    let va = unit_vector(a);
    let vb = unit_vector(b);
    let omega = va.dot(vb).clamp(-1.0, 1.0).acos();
    let height = a.height + (b.height - a.height) * t;

    // Nahezu identische Punkte: lineare Interpolation genügt
    if omega < 1e-9 {
        return GeoPosition::new(
            a.lon + (b.lon - a.lon) * t,
            a.lat + (b.lat - a.lat) * t,
            height,
        );
    }

    let sin_omega = omega.sin();
    let v = va * (((1.0 - t) * omega).sin() / sin_omega) + vb * ((t * omega).sin() / sin_omega);
    GeoPosition::new(
        v.y.atan2(v.x).to_degrees(),
        v.z.clamp(-1.0, 1.0).asin().to_degrees(),
        height,
    )
}

/// Sphärische Fläche eines Rings in Quadratmetern.
///
/// Shoelace-Form auf der Kugel: `|Σ (λ₂−λ₁)·(2 + sin φ₁ + sin φ₂)| · R²/2`.
/// Der Ring muss nicht explizit geschlossen sein.
pub fn ring_area(positions: &[GeoPosition]) -> f64 {
    if positions.len() < 3 {
        return 0.0;
    }

    let mut sum = 0.0;
    let n = positions.len();
    for i in 0..n {
        let p1 = &positions[i];
        let p2 = &positions[(i + 1) % n];
        sum += (p2.lon - p1.lon).to_radians()
            * (2.0 + p1.lat.to_radians().sin() + p2.lat.to_radians().sin());
    }
    (sum * EARTH_RADIUS_M * EARTH_RADIUS_M * 0.5).abs()
}

/// Eingeschlossener Winkel am Scheitel `vertex` zwischen den Schenkeln
/// nach `a` und `b`, in Grad (0..=180).
pub fn included_angle(a: &GeoPosition, vertex: &GeoPosition, b: &GeoPosition) -> f64 {
    let frame = LocalFrame::new(*vertex);
    let va = frame.project(a);
    let vb = frame.project(b);
    let la = va.length();
    let lb = vb.length();
    if la < f64::EPSILON || lb < f64::EPSILON {
        return 0.0;
    }
    (va.dot(vb) / (la * lb)).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Lokale äquirektangulare Tangential-Ebene um einen Ursprung.
///
/// Projiziert Grad-Positionen in Meter (x = Ost, y = Nord). Für die
/// Ausdehnung typischer Annotationen (wenige Kilometer) ausreichend genau.
#[derive(Debug, Clone, Copy)]
pub struct LocalFrame {
    origin: GeoPosition,
    cos_lat: f64,
}

impl LocalFrame {
    /// Erstellt eine Ebene mit Ursprung `origin`.
    pub fn new(origin: GeoPosition) -> Self {
        Self {
            origin,
            cos_lat: origin.lat.to_radians().cos().max(1e-12),
        }
    }

    /// Ursprung der Ebene.
    pub fn origin(&self) -> GeoPosition {
        self.origin
    }

    /// Projiziert eine Position in Ebenen-Meter.
    pub fn project(&self, p: &GeoPosition) -> DVec2 {
        DVec2::new(
            (p.lon - self.origin.lon).to_radians() * self.cos_lat * EARTH_RADIUS_M,
            (p.lat - self.origin.lat).to_radians() * EARTH_RADIUS_M,
        )
    }

    /// Projiziert eine ganze Punktfolge.
    pub fn project_all(&self, points: &[GeoPosition]) -> Vec<DVec2> {
        points.iter().map(|p| self.project(p)).collect()
    }

    /// Rückprojektion von Ebenen-Metern in eine Position mit Höhe `height`.
    pub fn unproject(&self, v: DVec2, height: f64) -> GeoPosition {
        GeoPosition::new(
            self.origin.lon + (v.x / (self.cos_lat * EARTH_RADIUS_M)).to_degrees(),
            self.origin.lat + (v.y / EARTH_RADIUS_M).to_degrees(),
            height,
        )
    }
}

fn unit_vector(p: &GeoPosition) -> DVec3 {
    let lat = p.lat.to_radians();
    let lon = p.lon.to_radians();
    DVec3::new(lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin())
}
