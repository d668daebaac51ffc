//! Kreisgesten-Klassifikation auf einer Punktmenge.
//!
//! Reine Funktion ohne Zustand, O(n) in der Punktanzahl. Alle Koordinaten sind
//! geräteunabhängige Einheiten (DIP).

use crate::shared::GestureOptions;
use glam::DVec2;
use std::f64::consts::TAU;

/// Zeitgestempelter Zeiger-Punkt in DIP
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedPoint {
    /// Position (DIP)
    pub position: DVec2,
    /// Monotoner Zeitstempel in ms
    pub timestamp_ms: u64,
}

impl TimedPoint {
    /// Erstellt einen Punkt aus Koordinaten und Zeitstempel.
    pub fn new(x: f64, y: f64, timestamp_ms: u64) -> Self {
        Self {
            position: DVec2::new(x, y),
            timestamp_ms,
        }
    }
}

/// Ergebnis eines Klassifikationslaufs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureResult {
    /// Kein Kreis erkannt
    #[default]
    NoMatch,
    /// Kreis erkannt
    Circle,
}

/// Diagnosewerte eines Klassifikationslaufs (read-only)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureDebugInfo {
    /// Anzahl klassifizierter Punkte
    pub point_count: usize,
    /// Schwerpunkt aller Punkte
    pub centroid: DVec2,
    /// Mittlerer Abstand zum Schwerpunkt
    pub mean_radius: f64,
    /// Standardabweichung des Radius / mittlerer Radius
    pub radius_std_ratio: f64,
    /// Überdeckter Winkelbereich als Anteil von 2π
    pub angle_coverage: f64,
}

/// Ergebnis plus Diagnose
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Classification {
    /// Entscheidung
    pub result: GestureResult,
    /// Diagnose des Laufs
    pub debug: GestureDebugInfo,
}

impl Classification {
    /// Gibt `true` zurück, wenn ein Kreis erkannt wurde.
    pub fn is_circle(&self) -> bool {
        self.result == GestureResult::Circle
    }
}

/// Prüft, ob die Punkte einen Kreis beschreiben.
///
/// Die Winkelabdeckung ist `(max − min) / 2π` der auf `[0, 2π)` normierten
/// Winkel. Lücken innerhalb dieses Bereichs zählen mit; ein offener Bogen über
/// die 0/2π-Naht gilt dadurch als nahezu vollständig (bekannte Näherung).
pub fn classify_circle(samples: &[TimedPoint], options: &GestureOptions) -> Classification {
    let count = samples.len();
    if count == 0 || count < options.min_points {
        return Classification {
            result: GestureResult::NoMatch,
            debug: GestureDebugInfo {
                point_count: count,
                ..GestureDebugInfo::default()
            },
        };
    }

    let n = count as f64;
    let centroid = samples
        .iter()
        .fold(DVec2::ZERO, |acc, sample| acc + sample.position)
        / n;

    let mut sum_r = 0.0;
    let mut sum_r2 = 0.0;
    let mut min_angle = f64::INFINITY;
    let mut max_angle = f64::NEG_INFINITY;

    for sample in samples {
        let delta = sample.position - centroid;
        let r = delta.length();
        sum_r += r;
        sum_r2 += r * r;

        let mut angle = delta.y.atan2(delta.x);
        if angle < 0.0 {
            angle += TAU;
        }
        min_angle = min_angle.min(angle);
        max_angle = max_angle.max(angle);
    }

    let mean_radius = sum_r / n;
    let variance = (sum_r2 / n - mean_radius * mean_radius).max(0.0);
    let std_dev = variance.sqrt();
    let radius_std_ratio = if mean_radius > 0.0 {
        std_dev / mean_radius
    } else {
        1.0
    };
    let angle_coverage = (max_angle - min_angle) / TAU;

    let debug = GestureDebugInfo {
        point_count: count,
        centroid,
        mean_radius,
        radius_std_ratio,
        angle_coverage,
    };

    let radius_in_range =
        mean_radius >= options.min_radius_dip && mean_radius <= options.max_radius_dip;
    let is_circle = radius_in_range
        && angle_coverage >= options.angle_coverage_threshold
        && radius_std_ratio <= options.radius_std_dev_ratio_max;

    Classification {
        result: if is_circle {
            GestureResult::Circle
        } else {
            GestureResult::NoMatch
        },
        debug,
    }
}

#[cfg(test)]
mod tests;
