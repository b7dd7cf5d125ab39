//! Reine Geometrie-Funktionen für Bézier-Kurven und interpolierende
//! Bézier-Splines in der lokalen Ebene.
//!
//! Layer-neutral: wird von `shapes` und Benchmarks importiert, ohne
//! Zirkel-Abhängigkeiten zu erzeugen.

use glam::DVec2;

/// B(t) = (1-t)²·P0 + 2(1-t)t·P1 + t²·P2
pub fn quadratic_bezier(p0: DVec2, p1: DVec2, p2: DVec2, t: f64) -> DVec2 {
    let inv = 1.0 - t;
    inv * inv * p0 + 2.0 * inv * t * p1 + t * t * p2
}

/// B(t) = (1-t)³·P0 + 3(1-t)²t·P1 + 3(1-t)t²·P2 + t³·P3
pub fn cubic_bezier(p0: DVec2, p1: DVec2, p2: DVec2, p3: DVec2, t: f64) -> DVec2 {
    let inv = 1.0 - t;
    let inv2 = inv * inv;
    let t2 = t * t;
    inv2 * inv * p0 + 3.0 * inv2 * t * p1 + 3.0 * inv * t2 * p2 + t2 * t * p3
}

/// Bézier-Kurve beliebiger Ordnung über das Kontroll-Netz `points`
/// (De-Casteljau-Schema).
pub fn de_casteljau(points: &[DVec2], t: f64) -> DVec2 {
    debug_assert!(!points.is_empty());
    let mut work = points.to_vec();
    let mut n = work.len();
    while n > 1 {
        for i in 0..n - 1 {
            work[i] = work[i].lerp(work[i + 1], t);
        }
        n -= 1;
    }
    work[0]
}

/// Ein kubisches Segment eines interpolierenden Splines:
/// Ankerpunkt, zwei Kontrollpunkte, Ankerpunkt.
pub type SplineSegment = [DVec2; 4];

/// Berechnet die kubischen Segmente eines interpolierenden Bézier-Splines
/// durch alle `points` (offene Kette).
///
/// Tangenten nach Catmull-Rom, skaliert mit `sharpness` (0..1, höher =
/// rundere Kurve). Rand-Segmente erhalten gespiegelte Phantom-Punkte,
/// damit die Kurve natürlich im ersten und letzten Anker beginnt bzw. endet.
/// Jedes Segment startet und endet exakt auf seinen Ankern, die Kette läuft
/// daher durch sämtliche Eingabepunkte.
pub fn bezier_spline_segments(points: &[DVec2], sharpness: f64) -> Vec<SplineSegment> {
    let n = points.len();
    if n < 2 {
        return Vec::new();
    }

    let k = sharpness.clamp(0.0, 1.0) / 6.0;
    let mut segments = Vec::with_capacity(n - 1);
    for seg in 0..n - 1 {
        let p0 = if seg == 0 {
            2.0 * points[0] - points[1]
        } else {
            points[seg - 1]
        };
        let p1 = points[seg];
        let p2 = points[seg + 1];
        let p3 = if seg + 2 < n {
            points[seg + 2]
        } else {
            2.0 * points[n - 1] - points[n - 2]
        };

        let c1 = p1 + (p2 - p0) * k;
        let c2 = p2 - (p3 - p1) * k;
        segments.push([p1, c1, c2, p2]);
    }
    segments
}

/// Wie [`bezier_spline_segments`], aber als geschlossener Ring:
/// das letzte Segment führt zurück zum ersten Anker.
pub fn bezier_spline_ring_segments(points: &[DVec2], sharpness: f64) -> Vec<SplineSegment> {
    let n = points.len();
    if n < 3 {
        return bezier_spline_segments(points, sharpness);
    }

    let k = sharpness.clamp(0.0, 1.0) / 6.0;
    let mut segments = Vec::with_capacity(n);
    for seg in 0..n {
        let p0 = points[(seg + n - 1) % n];
        let p1 = points[seg];
        let p2 = points[(seg + 1) % n];
        let p3 = points[(seg + 2) % n];

        let c1 = p1 + (p2 - p0) * k;
        let c2 = p2 - (p3 - p1) * k;
        segments.push([p1, c1, c2, p2]);
    }
    segments
}

/// Dichte Punktfolge entlang des interpolierenden Splines durch `points`.
///
/// `samples_per_segment`: Zwischenpunkte pro Segment (ohne Endpunkt).
/// Erster und letzter Ausgabepunkt sind exakt der erste bzw. letzte
/// Eingabepunkt (Endpunkt-Verankerung).
pub fn bezier_spline_chain(
    points: &[DVec2],
    samples_per_segment: usize,
    sharpness: f64,
) -> Vec<DVec2> {
    if points.len() < 2 {
        return points.to_vec();
    }
    let spp = samples_per_segment.max(1);
    sample_segments(&bezier_spline_segments(points, sharpness), spp, false)
}

/// Geschlossene Ring-Variante von [`bezier_spline_chain`].
pub fn bezier_spline_ring(
    points: &[DVec2],
    samples_per_segment: usize,
    sharpness: f64,
) -> Vec<DVec2> {
    if points.len() < 3 {
        return points.to_vec();
    }
    let spp = samples_per_segment.max(1);
    sample_segments(&bezier_spline_ring_segments(points, sharpness), spp, true)
}

/// Tastet eine Segmentkette gleichförmig im Parameterraum ab.
/// Bei offenen Ketten wird der Endpunkt des letzten Segments eingeschlossen.
pub fn sample_segments(segments: &[SplineSegment], spp: usize, closed: bool) -> Vec<DVec2> {
    let mut result = Vec::with_capacity(segments.len() * spp + 1);
    for (i, [p1, c1, c2, p2]) in segments.iter().enumerate() {
        let last = i + 1 == segments.len();
        let steps = if last && !closed { spp + 1 } else { spp };
        for s in 0..steps {
            let t = s as f64 / spp as f64;
            result.push(cubic_bezier(*p1, *c1, *c2, *p2, t));
        }
    }
    result
}

/// Approximierte Länge einer Polyline in Ebenen-Metern.
pub fn polyline_length(points: &[DVec2]) -> f64 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}
