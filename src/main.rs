//! OrbitBubble (Konsolen-Host).
//!
//! Liest Befehle und Zeiger-Samples zeilenweise von stdin, führt sie über den
//! Controller aus und gibt Menü-Umschaltungen sowie den Ring als Text aus.

use clap::Parser;
use orbit_bubble::store::BubbleStore;
use orbit_bubble::{
    ui, AppController, AppIntent, AppOptions, AppState, JsonBubbleStore, MemoryBubbleStore,
};
use std::io::BufRead;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Takt für Hintergrund-Verarbeitung, wenn keine Eingabe wartet
const TICK: Duration = Duration::from_millis(20);

fn main() -> anyhow::Result<()> {
    AppRunner::run()
}

/// OrbitBubble Konsolen-Host
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct HostArgs {
    /// Katalog nur im Speicher halten (nichts wird geschrieben)
    #[arg(long, default_value_t = false)]
    memory: bool,

    /// Abweichender Pfad der Katalog-Datei
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Abweichender Pfad der Optionen-Datei
    #[arg(long)]
    options: Option<PathBuf>,
}

struct AppRunner;

impl AppRunner {
    fn run() -> anyhow::Result<()> {
        // Logger initialisieren
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();

        log::info!("OrbitBubble v{} startet...", env!("CARGO_PKG_VERSION"));

        let args = HostArgs::parse();

        // Optionen aus TOML laden (oder Standardwerte)
        let options_path = args.options.clone().unwrap_or_else(AppOptions::config_path);
        let options = AppOptions::load_from_file(&options_path);

        let store: Arc<dyn BubbleStore> = if args.memory {
            log::info!("Katalog nur im Speicher");
            Arc::new(MemoryBubbleStore::new())
        } else {
            let store = match args.catalog {
                Some(path) => JsonBubbleStore::new(path),
                None => JsonBubbleStore::default_location(),
            };
            log::info!("Katalog-Datei: {}", store.path().display());
            Arc::new(store)
        };

        let mut state = AppState::new(store, options);
        state.options_path = Some(options_path);
        let mut controller = AppController::new();

        if let Err(e) = controller.handle_intent(&mut state, AppIntent::ReloadRequested) {
            log::warn!("Katalog konnte nicht geladen werden, starte leer: {e:#}");
        }
        print!("{}", ui::render_ring(&state));
        println!("{}", ui::render_status(&state));

        let lines = spawn_stdin_reader()?;
        let result = Self::event_loop(&mut state, &mut controller, &lines);
        Self::shutdown(&mut state);
        result
    }

    fn event_loop(
        state: &mut AppState,
        controller: &mut AppController,
        lines: &Receiver<String>,
    ) -> anyhow::Result<()> {
        while !state.should_exit {
            match lines.recv_timeout(TICK) {
                Ok(line) => Self::handle_line(state, controller, &line),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    log::info!("Eingabe beendet");
                    break;
                }
            }

            let menu_was_open = state.menu.open;
            let requests = controller.process_background(state)?;
            if requests > 0 && state.menu.open != menu_was_open {
                Self::print_menu(state);
            }
        }
        Ok(())
    }

    fn handle_line(state: &mut AppState, controller: &mut AppController, line: &str) {
        let input = match ui::parse_line(line, state) {
            Ok(input) => input,
            Err(e) => {
                println!("! {e}");
                return;
            }
        };

        match input {
            ui::ConsoleInput::Empty => {}
            ui::ConsoleInput::Help => println!("{}", ui::HELP_TEXT),
            ui::ConsoleInput::List => {
                print!("{}", ui::render_ring(state));
                println!("{}", ui::render_status(state));
            }
            ui::ConsoleInput::History(count) => print!("{}", ui::render_history(state, count)),
            ui::ConsoleInput::Pointer(sample) => state.submit_pointer(sample),
            ui::ConsoleInput::Intent(intent) => {
                let menu_was_open = state.menu.open;
                if let Err(e) = controller.handle_intent(state, intent) {
                    log::error!("{e:#}");
                    println!("! {e:#}");
                }
                if state.menu.open != menu_was_open {
                    Self::print_menu(state);
                } else if !state.should_exit {
                    println!("{}", ui::render_status(state));
                }
            }
        }
    }

    fn print_menu(state: &AppState) {
        if state.menu.open {
            println!("== Menü geöffnet ==");
            print!("{}", ui::render_ring(state));
        } else {
            println!("== Menü geschlossen ==");
        }
        println!("{}", ui::render_status(state));
    }

    /// Ungespeicherte Änderungen werden einmal synchron geschrieben, danach
    /// endet der Auto-Save-Timer ohne weiteren Schreibvorgang.
    fn shutdown(state: &mut AppState) {
        if state.catalog.is_dirty() {
            if let Err(e) = state.catalog.save_now() {
                log::error!("Speichern beim Beenden fehlgeschlagen: {e}");
            }
        }
        state.gesture.stop();
        state.catalog.shutdown();
        log::info!("OrbitBubble beendet");
    }
}

/// Liest stdin in einem eigenen Thread, damit der Host weiter takten kann.
fn spawn_stdin_reader() -> anyhow::Result<Receiver<String>> {
    let (tx, rx) = mpsc::channel();
    thread::Builder::new()
        .name("orbit-stdin".into())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        log::error!("stdin nicht lesbar: {e}");
                        break;
                    }
                }
            }
        })?;
    Ok(rx)
}
