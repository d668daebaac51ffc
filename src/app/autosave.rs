//! Verzögertes Speichern (Debounce) des Bubble-Katalogs.
//!
//! Ein einzelner Timer-Thread hält genau eine Deadline. Jede Anforderung
//! ersetzt die Deadline; erst nach einer Ruhephase von `delay` wird der zuletzt
//! veröffentlichte Snapshot geschrieben. Timer und `save_now` schreiben nie
//! gleichzeitig (`write_lock`).

use crate::core::BubbleRoot;
use crate::shared::CatalogResult;
use crate::store::BubbleStore;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Einzelner Timer-Slot
#[derive(Default)]
struct TimerSlot {
    /// Nächster Schreibzeitpunkt (`None` = nichts geplant)
    deadline: Option<Instant>,
    /// Timer-Thread soll enden
    shutdown: bool,
}

/// Zuletzt veröffentlichter Stand
struct Pending {
    latest: Arc<BubbleRoot>,
    dirty: bool,
}

struct Shared {
    store: Arc<dyn BubbleStore>,
    delay: Duration,
    slot: Mutex<TimerSlot>,
    wake: Condvar,
    write_lock: Mutex<()>,
    pending: Mutex<Pending>,
}

/// Plant und serialisiert Schreibvorgänge auf einen `BubbleStore`.
pub struct SaveScheduler {
    shared: Arc<Shared>,
    worker: Option<JoinHandle<()>>,
    stopped: bool,
}

impl SaveScheduler {
    /// Erstellt den Scheduler; der Timer-Thread startet erst bei Bedarf.
    pub fn new(store: Arc<dyn BubbleStore>, delay: Duration, initial: Arc<BubbleRoot>) -> Self {
        Self {
            shared: Arc::new(Shared {
                store,
                delay,
                slot: Mutex::new(TimerSlot::default()),
                wake: Condvar::new(),
                write_lock: Mutex::new(()),
                pending: Mutex::new(Pending {
                    latest: initial,
                    dirty: false,
                }),
            }),
            worker: None,
            stopped: false,
        }
    }

    /// Debounce-Verzögerung
    pub fn delay(&self) -> Duration {
        self.shared.delay
    }

    /// Gibt `true` zurück, wenn ungespeicherte Änderungen vorliegen.
    pub fn is_dirty(&self) -> bool {
        lock(&self.shared.pending).dirty
    }

    /// Zugriff auf den Store (z.B. für `load`).
    pub fn store(&self) -> &dyn BubbleStore {
        self.shared.store.as_ref()
    }

    /// Übernimmt einen frisch geladenen Stand: nicht dirty, kein Timer.
    pub fn reset(&mut self, snapshot: Arc<BubbleRoot>) {
        lock(&self.shared.slot).deadline = None;
        let mut pending = lock(&self.shared.pending);
        pending.latest = snapshot;
        pending.dirty = false;
    }

    /// Markiert dirty und (re)startet den Debounce-Timer.
    pub fn request_save(&mut self, snapshot: Arc<BubbleRoot>) {
        {
            let mut pending = lock(&self.shared.pending);
            pending.latest = snapshot;
            pending.dirty = true;
        }

        if self.stopped {
            log::debug!("Auto-Save bereits beendet, Änderung bleibt ungespeichert");
            return;
        }
        self.ensure_worker();

        let mut slot = lock(&self.shared.slot);
        slot.deadline = Some(Instant::now() + self.shared.delay);
        self.shared.wake.notify_all();
    }

    /// Bricht einen geplanten Timer ab und speichert synchron.
    pub fn save_now(&mut self, snapshot: Arc<BubbleRoot>) -> CatalogResult<()> {
        lock(&self.shared.slot).deadline = None;
        lock(&self.shared.pending).latest = Arc::clone(&snapshot);

        let _write = lock(&self.shared.write_lock);
        self.shared.store.save(&snapshot)?;
        self.shared.mark_saved(&snapshot);
        log::info!("Katalog gespeichert ({} Bubbles)", snapshot.total_count());
        Ok(())
    }

    /// Beendet den Timer ohne abschließendes Speichern. Mehrfach aufrufbar.
    pub fn shutdown(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        {
            let mut slot = lock(&self.shared.slot);
            slot.deadline = None;
            slot.shutdown = true;
            self.shared.wake.notify_all();
        }
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::error!("Auto-Save-Thread ist abgestürzt");
            }
        }
        if self.is_dirty() {
            log::warn!("Auto-Save beendet mit ungespeicherten Änderungen");
        }
    }

    fn ensure_worker(&mut self) {
        if self.worker.is_some() {
            return;
        }
        let shared = Arc::clone(&self.shared);
        match thread::Builder::new()
            .name("orbit-autosave".into())
            .spawn(move || shared.run_timer())
        {
            Ok(handle) => self.worker = Some(handle),
            Err(e) => log::error!("Auto-Save-Thread konnte nicht gestartet werden: {e}"),
        }
    }
}

impl Drop for SaveScheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl Shared {
    fn run_timer(&self) {
        let mut slot = lock(&self.slot);
        loop {
            if slot.shutdown {
                break;
            }
            let Some(deadline) = slot.deadline else {
                slot = self.wake.wait(slot).unwrap_or_else(PoisonError::into_inner);
                continue;
            };

            let now = Instant::now();
            if now < deadline {
                slot = self
                    .wake
                    .wait_timeout(slot, deadline - now)
                    .unwrap_or_else(PoisonError::into_inner)
                    .0;
                continue;
            }

            slot.deadline = None;
            drop(slot);
            self.flush_if_dirty();
            slot = lock(&self.slot);
        }
        log::debug!("Auto-Save-Thread beendet");
    }

    fn flush_if_dirty(&self) {
        let _write = lock(&self.write_lock);
        let snapshot = {
            let pending = lock(&self.pending);
            if !pending.dirty {
                log::debug!("Auto-Save übersprungen: nichts zu speichern");
                return;
            }
            Arc::clone(&pending.latest)
        };

        match self.store.save(&snapshot) {
            Ok(()) => {
                self.mark_saved(&snapshot);
                log::info!("Auto-Save erfolgreich ({} Bubbles)", snapshot.total_count());
            }
            Err(e) => log::error!("Auto-Save fehlgeschlagen, Änderungen bleiben markiert: {e}"),
        }
    }

    /// Setzt dirty nur zurück, wenn seit dem Snapshot nichts Neues veröffentlicht wurde.
    fn mark_saved(&self, saved: &Arc<BubbleRoot>) {
        let mut pending = lock(&self.pending);
        if Arc::ptr_eq(&pending.latest, saved) {
            pending.dirty = false;
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
