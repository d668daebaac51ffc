//! Application Controller für zentrale Event-Verarbeitung.

use super::{AppCommand, AppIntent, AppState};

/// Orchestriert UI-Events und Use-Cases auf den AppState.
#[derive(Default)]
pub struct AppController;

impl AppController {
    /// Erstellt einen neuen Controller.
    pub fn new() -> Self {
        Self
    }

    /// Verarbeitet einen Intent über Intent->Command Mapping.
    pub fn handle_intent(&mut self, state: &mut AppState, intent: AppIntent) -> anyhow::Result<()> {
        let commands = self.map_intent_to_commands(state, intent);
        for command in commands {
            self.handle_command(state, command)?;
        }

        Ok(())
    }

    fn map_intent_to_commands(&self, state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
        super::intent_mapping::map_intent_to_commands(state, intent)
    }

    /// Führt mutierende Commands auf dem AppState aus.
    /// Dispatcht an Feature-Handler in `handlers/`.
    pub fn handle_command(
        &mut self,
        state: &mut AppState,
        command: AppCommand,
    ) -> anyhow::Result<()> {
        state.command_log.record(&command);
        use super::handlers;

        match command {
            // === Menü ===
            AppCommand::ToggleMenu { source } => handlers::menu::toggle(state, source),
            AppCommand::CloseMenu => handlers::menu::close(state),

            // === Katalog-I/O ===
            AppCommand::LoadCatalog => handlers::catalog::load(state)?,
            AppCommand::SaveCatalog => handlers::catalog::save(state)?,

            // === Bubbles ===
            AppCommand::AddFile { path, display_name } => {
                handlers::catalog::add_file(state, &path, display_name.as_deref())
            }
            AppCommand::AddFolder { path, display_name } => {
                handlers::catalog::add_folder(state, &path, display_name.as_deref())
            }
            AppCommand::AddCommand {
                command,
                args,
                display_name,
            } => handlers::catalog::add_command(
                state,
                &command,
                args.as_deref(),
                display_name.as_deref(),
            ),
            AppCommand::RemoveBubble { id } => handlers::catalog::remove(state, &id),
            AppCommand::MergeBubbles {
                source_id,
                target_id,
            } => handlers::catalog::merge(state, &source_id, &target_id),
            AppCommand::OpenBubble { id } => handlers::catalog::open(state, &id),

            // === Navigation ===
            AppCommand::NavigateBack => handlers::catalog::back(state),
            AppCommand::ResetToRoot => handlers::catalog::reset_to_root(state),

            // === Optionen & Anwendungssteuerung ===
            AppCommand::SetGestureEnabled { enabled } => {
                handlers::settings::set_gesture_enabled(state, enabled)
            }
            AppCommand::ApplyOptions { options } => {
                handlers::settings::apply_options(state, options)?
            }
            AppCommand::RequestExit => handlers::menu::request_exit(state),
        }

        Ok(())
    }

    /// Verarbeitet Hintergrund-Ereignisse: Zeiger-Samples, Gesten-Ergebnisse
    /// und wartende Menü-Anforderungen.
    ///
    /// Liefert die Anzahl der daraus entstandenen Menü-Anforderungen.
    pub fn process_background(&mut self, state: &mut AppState) -> anyhow::Result<usize> {
        state.gesture.pump();

        let requests = state.drain_menu_requests();
        let count = requests.len();
        for request in requests {
            self.handle_intent(
                state,
                AppIntent::MenuRequested {
                    source: request.source,
                },
            )?;
        }
        Ok(count)
    }
}
