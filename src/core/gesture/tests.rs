use super::*;
use approx::assert_abs_diff_eq;

/// Gleichmäßig verteilte Punkte auf einem Bogen (Winkel in Grad, Ende exklusiv).
fn arc_points(count: usize, center: DVec2, radius: f64, start_deg: f64, span_deg: f64) -> Vec<TimedPoint> {
    (0..count)
        .map(|i| {
            let angle = (start_deg + span_deg * i as f64 / count as f64).to_radians();
            let p = center + DVec2::new(angle.cos(), angle.sin()) * radius;
            TimedPoint::new(p.x, p.y, i as u64 * 16)
        })
        .collect()
}

/// Vollkreis mit halbem Schritt Versatz, damit kein Punkt genau auf der Naht liegt.
fn circle_points(count: usize, center: DVec2, radius: f64) -> Vec<TimedPoint> {
    let step = 360.0 / count as f64;
    arc_points(count, center, radius, step / 2.0, 360.0)
}

#[test]
fn test_zu_wenige_punkte_sind_nie_ein_kreis() {
    let options = GestureOptions::default();
    let samples = circle_points(options.min_points - 1, DVec2::new(400.0, 300.0), 100.0);

    let classification = classify_circle(&samples, &options);

    assert_eq!(classification.result, GestureResult::NoMatch);
    assert_eq!(classification.debug.point_count, options.min_points - 1);
    assert_eq!(classification.debug.mean_radius, 0.0);
}

#[test]
fn test_leere_eingabe_ist_no_match_auch_ohne_mindestanzahl() {
    let options = GestureOptions {
        min_points: 0,
        ..GestureOptions::default()
    };
    let classification = classify_circle(&[], &options);
    assert_eq!(classification.result, GestureResult::NoMatch);
}

#[test]
fn test_perfekter_kreis_wird_erkannt() {
    let options = GestureOptions::default();
    let center = DVec2::new(640.0, 360.0);
    let samples = circle_points(48, center, 100.0);

    let classification = classify_circle(&samples, &options);

    assert!(classification.is_circle());
    let debug = classification.debug;
    assert_eq!(debug.point_count, 48);
    assert_abs_diff_eq!(debug.centroid.x, center.x, epsilon = 1e-9);
    assert_abs_diff_eq!(debug.centroid.y, center.y, epsilon = 1e-9);
    assert_abs_diff_eq!(debug.mean_radius, 100.0, epsilon = 1e-9);
    assert_abs_diff_eq!(debug.radius_std_ratio, 0.0, epsilon = 1e-6);
    assert_abs_diff_eq!(debug.angle_coverage, 47.0 / 48.0, epsilon = 1e-9);
}

#[test]
fn test_radius_ausserhalb_der_grenzen_ist_no_match() {
    let options = GestureOptions::default();

    let tiny = classify_circle(&circle_points(48, DVec2::ZERO, 10.0), &options);
    assert_eq!(tiny.result, GestureResult::NoMatch);
    assert_abs_diff_eq!(tiny.debug.mean_radius, 10.0, epsilon = 1e-9);

    let huge = classify_circle(&circle_points(48, DVec2::ZERO, 1000.0), &options);
    assert_eq!(huge.result, GestureResult::NoMatch);
    assert!(huge.debug.angle_coverage > options.angle_coverage_threshold);
}

#[test]
fn test_radius_grenzen_sind_inklusiv() {
    let options = GestureOptions::default();
    let at_min = classify_circle(
        &circle_points(48, DVec2::ZERO, options.min_radius_dip + 1e-6),
        &options,
    );
    assert!(at_min.is_circle());
    let at_max = classify_circle(
        &circle_points(48, DVec2::ZERO, options.max_radius_dip - 1e-6),
        &options,
    );
    assert!(at_max.is_circle());
}

#[test]
fn test_kollineare_punkte_sind_kein_kreis() {
    let options = GestureOptions::default();
    let samples: Vec<TimedPoint> = (0..40)
        .map(|i| TimedPoint::new(i as f64 * 8.0, 200.0, i as u64 * 16))
        .collect();

    let classification = classify_circle(&samples, &options);

    assert_eq!(classification.result, GestureResult::NoMatch);
    let debug = classification.debug;
    assert!(
        debug.radius_std_ratio > options.radius_std_dev_ratio_max
            || debug.angle_coverage < options.angle_coverage_threshold
    );
    assert_abs_diff_eq!(debug.angle_coverage, 0.5, epsilon = 1e-9);
}

#[test]
fn test_identische_punkte_haben_std_ratio_eins() {
    let options = GestureOptions {
        min_radius_dip: 0.0,
        ..GestureOptions::default()
    };
    let samples: Vec<TimedPoint> = (0..30).map(|i| TimedPoint::new(5.0, 5.0, i)).collect();

    let classification = classify_circle(&samples, &options);

    assert_eq!(classification.result, GestureResult::NoMatch);
    assert_eq!(classification.debug.mean_radius, 0.0);
    assert_eq!(classification.debug.radius_std_ratio, 1.0);
}

#[test]
fn test_leicht_verrauschter_kreis_bleibt_kreis() {
    let options = GestureOptions::default();
    let samples: Vec<TimedPoint> = (0..60)
        .map(|i| {
            let angle = (i as f64 + 0.5) / 60.0 * TAU;
            let radius = 120.0 * (1.0 + 0.15 * (7.0 * angle).sin());
            TimedPoint::new(radius * angle.cos(), radius * angle.sin(), i as u64 * 16)
        })
        .collect();

    let classification = classify_circle(&samples, &options);

    assert!(classification.is_circle());
    assert!(classification.debug.radius_std_ratio < 0.15);
}

#[test]
fn test_zu_kurzer_bogen_ist_kein_kreis() {
    let options = GestureOptions::default();
    // Halbkreis, vom Schwerpunkt aus gesehen ohne Naht-Überquerung
    let samples = arc_points(40, DVec2::ZERO, 100.0, 90.0, 180.0);

    let classification = classify_circle(&samples, &options);

    assert_eq!(classification.result, GestureResult::NoMatch);
    assert!(classification.debug.angle_coverage < options.angle_coverage_threshold);
}

/// Bekannter blinder Fleck: die Abdeckung misst nur `max − min` der normierten
/// Winkel. Derselbe 300°-Bogen wird je nach Lage zur 0/2π-Naht verschieden
/// bewertet; über der Naht erscheint er als fast geschlossener Kreis.
#[test]
fn test_bogen_ueber_der_naht_wird_falsch_bewertet() {
    let options = GestureOptions::default();

    // Lücke um 0°: Bogen 30°..330°, kreuzt die Naht nicht
    let clear_of_seam = classify_circle(&arc_points(48, DVec2::ZERO, 100.0, 30.0, 300.0), &options);
    // Lücke um 180°: Bogen 210°..150° (über 0°), kreuzt die Naht
    let across_seam = classify_circle(&arc_points(48, DVec2::ZERO, 100.0, 210.0, 300.0), &options);

    assert!(clear_of_seam.debug.angle_coverage < 0.9);
    assert!(across_seam.debug.angle_coverage > 0.95);
    assert!(across_seam.debug.angle_coverage > clear_of_seam.debug.angle_coverage + 0.05);
    assert!(!clear_of_seam.is_circle());
    assert!(across_seam.is_circle());
}
