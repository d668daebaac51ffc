//! Application-Layer: Controller, State, Events, Services und Use-Cases.

pub mod autosave;
pub mod catalog;
pub mod command_log;
pub mod controller;
pub mod events;
pub mod gesture_detection;
pub mod handlers;
mod intent_mapping;
pub mod launcher;
/// Application State
///
/// Dieses Modul verwaltet den Zustand der Anwendung (Katalog, Menü, Gesten).
pub mod state;
pub mod use_cases;

pub use autosave::SaveScheduler;
pub use catalog::BubbleCatalogService;
pub use command_log::CommandLog;
pub use controller::AppController;
pub use events::{AppCommand, AppIntent};
pub use gesture_detection::{ClassifyFn, GestureDetectionService, GestureStats};
pub use launcher::{Launcher, ShellLauncher};
pub use state::{AppState, MenuState, UiState};
pub use use_cases::{AddOutcome, OpenOutcome};
