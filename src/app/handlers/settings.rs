//! Handler für Optionen und Gesten-Erkennung.

use crate::app::AppState;
use crate::shared::AppOptions;

/// Schaltet die Gesten-Erkennung ein oder aus.
pub fn set_gesture_enabled(state: &mut AppState, enabled: bool) {
    state.options.gesture_enabled = enabled;
    if enabled == state.gesture.is_running() {
        return;
    }
    if enabled {
        let samples = state.reconnect_pointer_source();
        state.gesture.start(samples);
    } else {
        state.gesture.stop();
    }
}

/// Übernimmt neue Optionen und persistiert sie, falls ein Pfad gesetzt ist.
///
/// Eine geänderte Auto-Save-Verzögerung gilt ab dem nächsten Start.
pub fn apply_options(state: &mut AppState, options: AppOptions) -> anyhow::Result<()> {
    if options.gesture != state.options.gesture {
        state.gesture.set_options(options.gesture.clone());
    }
    if options.autosave_delay_ms != state.options.autosave_delay_ms {
        log::info!(
            "Auto-Save-Verzögerung {} ms gilt ab dem nächsten Start",
            options.autosave_delay_ms
        );
    }
    let enabled = options.gesture_enabled;
    state.options = options;
    set_gesture_enabled(state, enabled);

    if let Some(path) = &state.options_path {
        state.options.save_to_file(path)?;
    }
    Ok(())
}
