//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält Optionen, Fehlertypen, Eingabe-Ereignisse und die Zeitquelle, die
//! von `core`, `store`, `app` und dem Host gemeinsam genutzt werden.

mod clock;
pub mod error;
mod input;
pub mod options;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use error::{codes, CatalogError, CatalogResult, ErrorKind};
pub use input::{MenuRequest, MenuRequestSource, PointerSample};
pub use options::{data_dir, AppOptions, GestureOptions};
