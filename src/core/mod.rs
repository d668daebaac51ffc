//! Core-Domänentypen: Bubble-Katalog, Navigation, Kreisgesten, Ring-Layout.

/// Core-Datenmodelle des Bubble-Katalogs
///
/// - BubbleRoot: persistierte Wurzel mit Top-Level-Reihenfolge
/// - BubbleItem: Datei, Ordner, Collection oder Kommando
/// - BubbleId: stabile, opake Identität
pub mod bubble;
pub mod gesture;
pub mod navigation;
pub mod ring_layout;

pub use bubble::{
    BubbleId, BubbleItem, BubbleItemType, BubbleRoot, CATALOG_VERSION, METADATA_ARGS,
    METADATA_COMMAND,
};
pub use gesture::{classify_circle, Classification, GestureDebugInfo, GestureResult, TimedPoint};
pub use navigation::{NavigationError, NavigationState};
pub use ring_layout::{layout_ring, ring_positions, RingSlot};
