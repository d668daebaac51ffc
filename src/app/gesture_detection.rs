//! Gesten-Erkennung: Punktpuffer, Filter, Cooldown und Klassifikations-Worker.
//!
//! Der Service gehört dem interaktiven Kontext. Die Klassifikation läuft auf
//! einem eigenen Worker-Thread mit einem Snapshot des Puffers; Ergebnisse kommen
//! per Channel zurück und werden erst in `pump()`/`settle()` angewendet. Es ist
//! höchstens ein Lauf gleichzeitig unterwegs (Gate), weitere Samples während
//! eines Laufs werden nur gepuffert.

use crate::core::{classify_circle, Classification, GestureDebugInfo, TimedPoint};
use crate::shared::options::{GESTURE_BUFFER_CAP, GESTURE_STATS_INTERVAL_MS};
use crate::shared::{
    Clock, GestureOptions, MenuRequest, MenuRequestSource, MonotonicClock, PointerSample,
};
use glam::DVec2;
use std::collections::VecDeque;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Signatur des Klassifikators (austauschbar für Tests)
pub type ClassifyFn = fn(&[TimedPoint], &GestureOptions) -> Classification;

/// Rollierende Statistik über ein 5-s-Fenster
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GestureStats {
    /// Klassifikationsläufe im Fenster
    pub checks: u64,
    /// Erkannte Kreise im Fenster
    pub hits: u64,
    /// Summe der Laufzeiten im Fenster
    pub total_cost: Duration,
    /// Beginn des Fensters (Clock-Zeit in ms)
    pub window_start_ms: u64,
    /// Diagnose des letzten Laufs
    pub last_debug: Option<GestureDebugInfo>,
}

impl GestureStats {
    /// Mittlere Laufzeit pro Klassifikation.
    pub fn average_cost(&self) -> Duration {
        match u32::try_from(self.checks) {
            Ok(0) => Duration::ZERO,
            Ok(checks) => self.total_cost / checks,
            Err(_) => Duration::ZERO,
        }
    }
}

struct ClassifyJob {
    epoch: u64,
    now_ms: u64,
    points: Vec<TimedPoint>,
    options: Arc<GestureOptions>,
}

struct ClassifyOutcome {
    epoch: u64,
    now_ms: u64,
    /// `None` = Klassifikator ist abgestürzt
    classification: Option<Classification>,
    cost: Duration,
}

fn run_job(classify: ClassifyFn, job: ClassifyJob) -> ClassifyOutcome {
    let started = Instant::now();
    let classification =
        catch_unwind(AssertUnwindSafe(|| classify(&job.points, &job.options))).ok();
    ClassifyOutcome {
        epoch: job.epoch,
        now_ms: job.now_ms,
        classification,
        cost: started.elapsed(),
    }
}

/// Hintergrund-Thread für Klassifikationsläufe
struct ClassifierWorker {
    jobs: Option<Sender<ClassifyJob>>,
    results: Receiver<ClassifyOutcome>,
    handle: Option<JoinHandle<()>>,
}

impl ClassifierWorker {
    fn spawn(classify: ClassifyFn) -> Self {
        let (job_tx, job_rx) = mpsc::channel::<ClassifyJob>();
        let (result_tx, result_rx) = mpsc::channel();

        let handle = thread::Builder::new()
            .name("orbit-gesture".into())
            .spawn(move || {
                for job in job_rx {
                    if result_tx.send(run_job(classify, job)).is_err() {
                        break;
                    }
                }
            });

        match handle {
            Ok(handle) => Self {
                jobs: Some(job_tx),
                results: result_rx,
                handle: Some(handle),
            },
            Err(e) => {
                log::warn!("Gesten-Worker nicht startbar, klassifiziere synchron: {e}");
                Self {
                    jobs: None,
                    results: result_rx,
                    handle: None,
                }
            }
        }
    }

    /// Übergibt einen Job; ohne Worker wird er direkt ausgeführt.
    fn submit(&mut self, classify: ClassifyFn, job: ClassifyJob) -> Option<ClassifyOutcome> {
        let Some(jobs) = &self.jobs else {
            return Some(run_job(classify, job));
        };
        match jobs.send(job) {
            Ok(()) => None,
            Err(mpsc::SendError(job)) => {
                log::warn!("Gesten-Worker beendet, klassifiziere synchron");
                self.jobs = None;
                Some(run_job(classify, job))
            }
        }
    }
}

impl Drop for ClassifierWorker {
    fn drop(&mut self) {
        self.jobs = None;
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("Gesten-Worker ist abgestürzt");
            }
        }
    }
}

/// Erkennt Kreisgesten in einem Strom von Zeiger-Samples.
pub struct GestureDetectionService {
    options: Arc<GestureOptions>,
    clock: Arc<dyn Clock>,
    classify: ClassifyFn,
    buffer: VecDeque<TimedPoint>,
    last_trigger_ms: Option<u64>,
    last_point: Option<DVec2>,
    in_flight: bool,
    epoch: u64,
    stats: GestureStats,
    samples: Option<Receiver<PointerSample>>,
    triggers: Sender<MenuRequest>,
    worker: ClassifierWorker,
}

impl GestureDetectionService {
    /// Erstellt den Service mit Produktiv-Uhr und Standard-Klassifikator.
    pub fn new(options: GestureOptions, triggers: Sender<MenuRequest>) -> Self {
        Self::with_parts(options, triggers, Arc::new(MonotonicClock::new()), classify_circle)
    }

    /// Erstellt den Service mit eigener Uhr und eigenem Klassifikator.
    pub fn with_parts(
        options: GestureOptions,
        triggers: Sender<MenuRequest>,
        clock: Arc<dyn Clock>,
        classify: ClassifyFn,
    ) -> Self {
        let window_start_ms = clock.now_ms();
        Self {
            options: Arc::new(options),
            clock,
            classify,
            buffer: VecDeque::with_capacity(GESTURE_BUFFER_CAP),
            last_trigger_ms: None,
            last_point: None,
            in_flight: false,
            epoch: 0,
            stats: GestureStats {
                window_start_ms,
                ..GestureStats::default()
            },
            samples: None,
            triggers,
            worker: ClassifierWorker::spawn(classify),
        }
    }

    /// Abonniert eine Sample-Quelle. Ein vorheriges Abo wird ersetzt.
    pub fn start(&mut self, samples: Receiver<PointerSample>) {
        self.samples = Some(samples);
        log::info!(
            "Gesten-Erkennung gestartet (Fenster {} ms, min. {} Punkte)",
            self.options.window_ms,
            self.options.min_points
        );
    }

    /// Beendet das Abo und verwirft Puffer sowie laufende Ergebnisse.
    pub fn stop(&mut self) {
        self.samples = None;
        self.reset_buffer();
        self.epoch += 1;
        log::info!("Gesten-Erkennung gestoppt");
    }

    /// Gibt `true` zurück, solange eine Sample-Quelle abonniert ist.
    pub fn is_running(&self) -> bool {
        self.samples.is_some()
    }

    /// Aktuelle Schwellwerte.
    pub fn options(&self) -> &GestureOptions {
        &self.options
    }

    /// Ersetzt die Schwellwerte; der Puffer beginnt neu.
    pub fn set_options(&mut self, options: GestureOptions) {
        self.options = Arc::new(options);
        self.reset_buffer();
        self.epoch += 1;
    }

    /// Statistik des laufenden Fensters.
    pub fn stats(&self) -> &GestureStats {
        &self.stats
    }

    /// Anzahl gepufferter Punkte.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    /// Gibt `true` zurück, solange ein Klassifikationslauf unterwegs ist.
    pub fn is_classifying(&self) -> bool {
        self.in_flight
    }

    /// Verarbeitet ein Zeiger-Sample im interaktiven Kontext.
    pub fn on_pointer_sampled(&mut self, sample: PointerSample) {
        if !sample.x.is_finite() || !sample.y.is_finite() {
            log::trace!("Nicht-endliches Sample verworfen");
            return;
        }
        let now = self.clock.now_ms();
        let position = DVec2::new(sample.x, sample.y);

        if let Some(last_trigger) = self.last_trigger_ms {
            if now.saturating_sub(last_trigger) < self.options.cooldown_ms {
                return;
            }
        }

        let min_distance = self.options.min_distance_dip;
        if let Some(last) = self.last_point {
            if last.distance_squared(position) < min_distance * min_distance {
                return;
            }
        }

        self.buffer.push_back(TimedPoint {
            position,
            timestamp_ms: now,
        });
        self.last_point = Some(position);

        let oldest_allowed = now.saturating_sub(self.options.window_ms);
        while self
            .buffer
            .front()
            .is_some_and(|point| point.timestamp_ms < oldest_allowed)
        {
            self.buffer.pop_front();
        }
        while self.buffer.len() > GESTURE_BUFFER_CAP {
            self.buffer.pop_front();
        }

        if self.buffer.len() < self.options.min_points || self.in_flight {
            return;
        }

        self.in_flight = true;
        let job = ClassifyJob {
            epoch: self.epoch,
            now_ms: now,
            points: self.buffer.iter().copied().collect(),
            options: Arc::clone(&self.options),
        };
        if let Some(outcome) = self.worker.submit(self.classify, job) {
            self.apply(outcome);
        }
    }

    /// Wendet fertige Ergebnisse an und verarbeitet alle wartenden Samples.
    ///
    /// Liefert die Anzahl verarbeiteter Samples.
    pub fn pump(&mut self) -> usize {
        self.drain_results();

        let mut pending = Vec::new();
        let mut closed = false;
        if let Some(samples) = &self.samples {
            loop {
                match samples.try_recv() {
                    Ok(sample) => pending.push(sample),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        closed = true;
                        break;
                    }
                }
            }
        }
        if closed {
            log::info!("Sample-Quelle geschlossen");
            self.samples = None;
        }

        let count = pending.len();
        for sample in pending {
            self.on_pointer_sampled(sample);
        }
        self.drain_results();
        count
    }

    /// Wartet bis `timeout` auf einen laufenden Lauf und wendet ihn an.
    ///
    /// Liefert `true`, wenn danach kein Lauf mehr unterwegs ist.
    pub fn settle(&mut self, timeout: Duration) -> bool {
        if !self.in_flight {
            return true;
        }
        match self.worker.results.recv_timeout(timeout) {
            Ok(outcome) => self.apply(outcome),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                log::warn!("Gesten-Worker nicht mehr erreichbar");
                self.in_flight = false;
            }
        }
        !self.in_flight
    }

    fn drain_results(&mut self) {
        loop {
            match self.worker.results.try_recv() {
                Ok(outcome) => self.apply(outcome),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if self.worker.jobs.is_some() {
                        log::warn!("Gesten-Worker nicht mehr erreichbar");
                    }
                    self.in_flight = false;
                    break;
                }
            }
        }
    }

    fn apply(&mut self, outcome: ClassifyOutcome) {
        self.in_flight = false;
        if outcome.epoch != self.epoch {
            log::debug!("Veraltetes Klassifikationsergebnis verworfen");
            return;
        }

        self.stats.checks += 1;
        self.stats.total_cost += outcome.cost;

        match outcome.classification {
            Some(classification) => {
                self.stats.last_debug = Some(classification.debug);
                if classification.is_circle() {
                    self.on_circle(outcome.now_ms, &classification.debug);
                }
            }
            None => log::error!("Klassifikation abgestürzt, gewertet als kein Kreis"),
        }

        self.maybe_log_stats();
    }

    fn on_circle(&mut self, now_ms: u64, debug: &GestureDebugInfo) {
        self.last_trigger_ms = Some(now_ms);
        self.reset_buffer();
        self.stats.hits += 1;

        log::info!(
            "Kreisgeste erkannt: r={:.1} std={:.2} Abdeckung={:.2} Punkte={}",
            debug.mean_radius,
            debug.radius_std_ratio,
            debug.angle_coverage,
            debug.point_count
        );
        if self
            .triggers
            .send(MenuRequest::new(MenuRequestSource::Gesture))
            .is_err()
        {
            log::debug!("Kein Empfänger für Menü-Anforderungen");
        }
    }

    fn maybe_log_stats(&mut self) {
        let now = self.clock.now_ms();
        if now.saturating_sub(self.stats.window_start_ms) < GESTURE_STATS_INTERVAL_MS {
            return;
        }
        let last = self.stats.last_debug.unwrap_or_default();
        log::info!(
            "Gesten-Statistik: {} Läufe, {} Treffer, Ø {:?}, zuletzt r={:.1} Abdeckung={:.2}",
            self.stats.checks,
            self.stats.hits,
            self.stats.average_cost(),
            last.mean_radius,
            last.angle_coverage
        );
        self.stats = GestureStats {
            window_start_ms: now,
            last_debug: self.stats.last_debug,
            ..GestureStats::default()
        };
    }

    fn reset_buffer(&mut self) {
        self.buffer.clear();
        self.last_point = None;
    }
}
