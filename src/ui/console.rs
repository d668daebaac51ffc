//! Zeilenprotokoll der Konsole.
//!
//! Verarbeitet eine Eingabezeile und mappt sie auf `AppIntent`s. Bubbles
//! werden über ihre 1-basierte Position im Ring oder über ihre ID adressiert.

use crate::app::{AppIntent, AppState};
use crate::core::BubbleId;
use crate::shared::{AppOptions, MenuRequestSource, PointerSample};
use std::str::FromStr;

/// Standardlänge für `history` ohne Anzahl
pub const DEFAULT_HISTORY_LEN: usize = 10;

/// Kurzhilfe für `help`.
pub const HELP_TEXT: &str = "\
p <x> <y>                     Zeiger-Sample
hotkey | hub                  Menü umschalten
close                         Menü schließen
add-file <pfad> [name]        Datei-Bubble
add-folder <pfad> [name]      Ordner-Bubble
cmd <kommando> [args] [name]  Kommando-Bubble
drop <pfad>...                Pfade ablegen
rm <ref>                      Bubble entfernen
merge <quelle> <ziel>         Bubbles zusammenführen
open <ref>                    Öffnen / Collection betreten
back | home                   Navigation
save | reload                 Katalog speichern / laden
gesture on|off                Gesten-Erkennung schalten
set <option> <wert>           Option ändern und speichern
                              (ring-radius, autosave-delay, gesture-window,
                               min-points, min-distance, min-radius,
                               max-radius, coverage, std-ratio, cooldown)
list                          Ring anzeigen
history [n]                   Letzte Commands anzeigen
quit                          Beenden";

/// Ergebnis einer Eingabezeile
#[derive(Debug, Clone)]
pub enum ConsoleInput {
    /// Leere Zeile oder Kommentar
    Empty,
    /// Intent für den Controller
    Intent(AppIntent),
    /// Zeiger-Sample für die Gesten-Erkennung
    Pointer(PointerSample),
    /// Ring neu ausgeben
    List,
    /// Hilfe ausgeben
    Help,
    /// Die letzten n ausgeführten Commands ausgeben
    History(usize),
}

/// Fehler beim Verarbeiten einer Eingabezeile
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConsoleError {
    /// Befehl oder Schlüssel unbekannt
    #[error("Unbekannter Befehl: {0}")]
    UnknownCommand(String),
    /// Pflichtargument fehlt
    #[error("{command}: {argument} fehlt")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
    /// Argument ist keine gültige Zahl
    #[error("Ungültige Zahl: {0}")]
    InvalidNumber(String),
    /// Referenz passt zu keiner sichtbaren Bubble
    #[error("Keine Bubble für '{0}' auf dieser Ebene")]
    UnknownBubble(String),
    /// `"` ohne Gegenstück
    #[error("Anführungszeichen nicht geschlossen")]
    UnterminatedQuote,
}

/// Zerlegt eine Zeile an Leerraum; `"…"` fasst Leerzeichen zusammen.
pub fn tokenize(line: &str) -> Result<Vec<String>, ConsoleError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quoted = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                quoted = !quoted;
                in_token = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }
    if quoted {
        return Err(ConsoleError::UnterminatedQuote);
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}

/// Übersetzt eine Eingabezeile.
pub fn parse_line(line: &str, state: &AppState) -> Result<ConsoleInput, ConsoleError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(ConsoleInput::Empty);
    }
    let tokens = tokenize(trimmed)?;
    let Some((command, args)) = tokens.split_first() else {
        return Ok(ConsoleInput::Empty);
    };

    let intent = match command.to_lowercase().as_str() {
        "p" | "pointer" => {
            let x = number(arg(args, 0, "p", "x")?)?;
            let y = number(arg(args, 1, "p", "y")?)?;
            return Ok(ConsoleInput::Pointer(PointerSample::new(x, y)));
        }
        "list" | "ls" => return Ok(ConsoleInput::List),
        "help" | "?" => return Ok(ConsoleInput::Help),
        "history" => {
            let count = match args.first() {
                Some(raw) => parse_value(raw)?,
                None => DEFAULT_HISTORY_LEN,
            };
            return Ok(ConsoleInput::History(count));
        }
        "hotkey" => AppIntent::MenuRequested {
            source: MenuRequestSource::Hotkey,
        },
        "hub" => AppIntent::MenuRequested {
            source: MenuRequestSource::CenterClick,
        },
        "close" => AppIntent::CloseMenuRequested,
        "add-file" => AppIntent::AddFileRequested {
            path: arg(args, 0, "add-file", "Pfad")?.to_string(),
            display_name: rest(args, 1),
        },
        "add-folder" => AppIntent::AddFolderRequested {
            path: arg(args, 0, "add-folder", "Pfad")?.to_string(),
            display_name: rest(args, 1),
        },
        "cmd" => AppIntent::AddCommandRequested {
            command: arg(args, 0, "cmd", "Kommando")?.to_string(),
            args: args.get(1).cloned(),
            display_name: rest(args, 2),
        },
        "drop" => {
            if args.is_empty() {
                return Err(ConsoleError::MissingArgument {
                    command: "drop",
                    argument: "Pfad",
                });
            }
            AppIntent::PathsDropped {
                paths: args.to_vec(),
            }
        }
        "rm" => AppIntent::RemoveRequested {
            id: resolve(state, arg(args, 0, "rm", "Bubble")?)?,
        },
        "merge" => AppIntent::BubbleDroppedOnBubble {
            source_id: resolve(state, arg(args, 0, "merge", "Quelle")?)?,
            target_id: resolve(state, arg(args, 1, "merge", "Ziel")?)?,
        },
        "open" => AppIntent::BubbleClicked {
            id: resolve(state, arg(args, 0, "open", "Bubble")?)?,
        },
        "back" => AppIntent::BackRequested,
        "home" => AppIntent::HomeRequested,
        "save" => AppIntent::SaveRequested,
        "reload" => AppIntent::ReloadRequested,
        "gesture" => match arg(args, 0, "gesture", "on/off")?.to_lowercase().as_str() {
            "on" => AppIntent::GestureToggled { enabled: true },
            "off" => AppIntent::GestureToggled { enabled: false },
            other => return Err(ConsoleError::UnknownCommand(format!("gesture {other}"))),
        },
        "set" => {
            let key = arg(args, 0, "set", "Option")?;
            let value = arg(args, 1, "set", "Wert")?;
            let mut options = state.options.clone();
            apply_setting(&mut options, key, value)?;
            AppIntent::OptionsChanged { options }
        }
        "quit" | "exit" => AppIntent::ExitRequested,
        other => return Err(ConsoleError::UnknownCommand(other.to_string())),
    };
    Ok(ConsoleInput::Intent(intent))
}

fn arg<'a>(
    args: &'a [String],
    index: usize,
    command: &'static str,
    argument: &'static str,
) -> Result<&'a str, ConsoleError> {
    args.get(index)
        .map(String::as_str)
        .ok_or(ConsoleError::MissingArgument { command, argument })
}

fn rest(args: &[String], from: usize) -> Option<String> {
    let joined = args.get(from..)?.join(" ");
    (!joined.is_empty()).then_some(joined)
}

fn number(raw: &str) -> Result<f64, ConsoleError> {
    parse_value(raw)
}

fn parse_value<T: FromStr>(raw: &str) -> Result<T, ConsoleError> {
    raw.parse()
        .map_err(|_| ConsoleError::InvalidNumber(raw.to_string()))
}

/// Setzt genau eine Option anhand ihres Konsolen-Schlüssels.
fn apply_setting(options: &mut AppOptions, key: &str, value: &str) -> Result<(), ConsoleError> {
    match key.to_lowercase().as_str() {
        "ring-radius" => options.ring_radius_dip = parse_value(value)?,
        "autosave-delay" => options.autosave_delay_ms = parse_value(value)?,
        "gesture-window" => options.gesture.window_ms = parse_value(value)?,
        "min-points" => options.gesture.min_points = parse_value(value)?,
        "min-distance" => options.gesture.min_distance_dip = parse_value(value)?,
        "min-radius" => options.gesture.min_radius_dip = parse_value(value)?,
        "max-radius" => options.gesture.max_radius_dip = parse_value(value)?,
        "coverage" => options.gesture.angle_coverage_threshold = parse_value(value)?,
        "std-ratio" => options.gesture.radius_std_dev_ratio_max = parse_value(value)?,
        "cooldown" => options.gesture.cooldown_ms = parse_value(value)?,
        other => return Err(ConsoleError::UnknownCommand(format!("set {other}"))),
    }
    Ok(())
}

/// Löst eine Referenz (1-basierte Ring-Position oder ID) auf der aktuellen Ebene auf.
fn resolve(state: &AppState, reference: &str) -> Result<BubbleId, ConsoleError> {
    let items = state.visible_items();
    if let Ok(position) = reference.parse::<usize>() {
        if let Some(item) = position.checked_sub(1).and_then(|i| items.get(i)) {
            return Ok(item.id.clone());
        }
    }
    items
        .iter()
        .find(|item| item.id == reference)
        .map(|item| item.id.clone())
        .ok_or_else(|| ConsoleError::UnknownBubble(reference.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BubbleItem, BubbleRoot};
    use crate::shared::AppOptions;
    use crate::store::MemoryBubbleStore;
    use std::sync::Arc;

    fn state_with(items: Vec<BubbleItem>) -> AppState {
        let root = BubbleRoot {
            items,
            ..BubbleRoot::new()
        };
        let options = AppOptions {
            gesture_enabled: false,
            ..AppOptions::default()
        };
        let mut state = AppState::new(Arc::new(MemoryBubbleStore::with_root(root)), options);
        state.catalog.load().expect("laden");
        state
    }

    #[test]
    fn test_tokenize_fasst_anfuehrungszeichen_zusammen() {
        let tokens = tokenize(r#"add-file "C:\Program Files\app.exe" Meine App"#).expect("ok");
        assert_eq!(
            tokens,
            vec!["add-file", r"C:\Program Files\app.exe", "Meine", "App"]
        );
        assert_eq!(tokenize(r#"cmd """#).expect("ok"), vec!["cmd", ""]);
        assert_eq!(tokenize("rm \"1"), Err(ConsoleError::UnterminatedQuote));
    }

    #[test]
    fn test_pointer_zeile_wird_sample() {
        let state = state_with(Vec::new());
        match parse_line("p 10.5 -3", &state).expect("ok") {
            ConsoleInput::Pointer(sample) => {
                assert_eq!(sample.x, 10.5);
                assert_eq!(sample.y, -3.0);
            }
            other => panic!("unerwartet: {other:?}"),
        }
        assert_eq!(
            parse_line("p 1 abc", &state).err(),
            Some(ConsoleError::InvalidNumber("abc".into()))
        );
    }

    #[test]
    fn test_add_file_mit_anzeigename() {
        let state = state_with(Vec::new());
        match parse_line("add-file /tmp/a.txt Mein Name", &state).expect("ok") {
            ConsoleInput::Intent(AppIntent::AddFileRequested { path, display_name }) => {
                assert_eq!(path, "/tmp/a.txt");
                assert_eq!(display_name.as_deref(), Some("Mein Name"));
            }
            other => panic!("unerwartet: {other:?}"),
        }
    }

    #[test]
    fn test_referenz_per_position_und_id() {
        let first = BubbleItem::collection("A".into(), Vec::new());
        let second = BubbleItem::collection("B".into(), Vec::new());
        let second_id = second.id.clone();
        let state = state_with(vec![first, second]);

        let by_position = parse_line("open 2", &state).expect("ok");
        assert!(matches!(
            by_position,
            ConsoleInput::Intent(AppIntent::BubbleClicked { ref id }) if *id == second_id
        ));

        let line = format!("rm {}", second_id.as_str());
        let by_id = parse_line(&line, &state).expect("ok");
        assert!(matches!(
            by_id,
            ConsoleInput::Intent(AppIntent::RemoveRequested { ref id }) if *id == second_id
        ));

        assert_eq!(
            parse_line("open 3", &state).err(),
            Some(ConsoleError::UnknownBubble("3".into()))
        );
    }

    #[test]
    fn test_unbekannter_befehl_und_fehlende_argumente() {
        let state = state_with(Vec::new());
        assert_eq!(
            parse_line("fly", &state).err(),
            Some(ConsoleError::UnknownCommand("fly".into()))
        );
        assert_eq!(
            parse_line("merge", &state).err(),
            Some(ConsoleError::MissingArgument {
                command: "merge",
                argument: "Quelle"
            })
        );
        assert!(matches!(
            parse_line("  # Kommentar", &state),
            Ok(ConsoleInput::Empty)
        ));
    }

    #[test]
    fn test_history_mit_und_ohne_anzahl() {
        let state = state_with(Vec::new());
        assert!(matches!(
            parse_line("history", &state),
            Ok(ConsoleInput::History(DEFAULT_HISTORY_LEN))
        ));
        assert!(matches!(
            parse_line("history 3", &state),
            Ok(ConsoleInput::History(3))
        ));
        assert_eq!(
            parse_line("history -1", &state).err(),
            Some(ConsoleError::InvalidNumber("-1".into()))
        );
    }

    #[test]
    fn test_set_erzeugt_geaenderte_optionen() {
        let state = state_with(Vec::new());
        match parse_line("set min-points 30", &state).expect("ok") {
            ConsoleInput::Intent(AppIntent::OptionsChanged { options }) => {
                assert_eq!(options.gesture.min_points, 30);
                let mut expected = state.options.clone();
                expected.gesture.min_points = 30;
                assert_eq!(options, expected);
            }
            other => panic!("unerwartet: {other:?}"),
        }

        match parse_line("set ring-radius 140.5", &state).expect("ok") {
            ConsoleInput::Intent(AppIntent::OptionsChanged { options }) => {
                assert_eq!(options.ring_radius_dip, 140.5);
            }
            other => panic!("unerwartet: {other:?}"),
        }
    }

    #[test]
    fn test_set_lehnt_unbekannte_option_und_ungueltigen_wert_ab() {
        let state = state_with(Vec::new());
        assert_eq!(
            parse_line("set farbe blau", &state).err(),
            Some(ConsoleError::UnknownCommand("set farbe".into()))
        );
        assert_eq!(
            parse_line("set cooldown schnell", &state).err(),
            Some(ConsoleError::InvalidNumber("schnell".into()))
        );
        assert_eq!(
            parse_line("set cooldown", &state).err(),
            Some(ConsoleError::MissingArgument {
                command: "set",
                argument: "Wert"
            })
        );
    }
}
