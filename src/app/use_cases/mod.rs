//! Use-Cases der Application-Layer-Orchestrierung.
//!
//! Reine Mutationen auf dem `NavigationState`; Speichern und Logging der
//! Service-Ebene übernimmt `BubbleCatalogService`.

pub mod add;
pub mod merge;
pub mod navigation;
pub mod open;
pub mod remove;

pub use add::AddOutcome;
pub use open::OpenOutcome;
