//! OrbitBubble Library.
//! Bubble-Katalog, Kreisgesten-Erkennung und Launcher als Library exportiert
//! für Host, Tests und Benchmarks.

pub mod app;
pub mod core;
pub mod shared;
pub mod store;
pub mod ui;

pub use app::{
    AppCommand, AppController, AppIntent, AppState, BubbleCatalogService,
    GestureDetectionService, Launcher, ShellLauncher, UiState,
};
pub use core::{
    classify_circle, layout_ring, BubbleId, BubbleItem, BubbleItemType, BubbleRoot,
    GestureResult, NavigationState, RingSlot,
};
pub use shared::{AppOptions, CatalogError, ErrorKind, GestureOptions, MenuRequestSource};
pub use store::{BubbleStore, JsonBubbleStore, MemoryBubbleStore};
