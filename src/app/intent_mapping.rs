//! Mapping von UI-Intents auf mutierende App-Commands.

use super::{AppCommand, AppIntent, AppState};
use std::path::Path;

/// Übersetzt einen `AppIntent` in eine Sequenz ausführbarer `AppCommand`s.
pub fn map_intent_to_commands(state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
    match intent {
        AppIntent::MenuRequested { source } => vec![AppCommand::ToggleMenu { source }],
        AppIntent::CloseMenuRequested => {
            if state.menu.open {
                vec![AppCommand::CloseMenu]
            } else {
                Vec::new()
            }
        }
        AppIntent::ReloadRequested => vec![AppCommand::LoadCatalog],
        AppIntent::SaveRequested => vec![AppCommand::SaveCatalog],
        AppIntent::AddFileRequested { path, display_name } => {
            vec![AppCommand::AddFile { path, display_name }]
        }
        AppIntent::AddFolderRequested { path, display_name } => {
            vec![AppCommand::AddFolder { path, display_name }]
        }
        AppIntent::AddCommandRequested {
            command,
            args,
            display_name,
        } => vec![AppCommand::AddCommand {
            command,
            args,
            display_name,
        }],
        AppIntent::PathsDropped { paths } => paths
            .into_iter()
            .filter(|path| !path.trim().is_empty())
            .map(|path| {
                if Path::new(&path).is_dir() {
                    AppCommand::AddFolder {
                        path,
                        display_name: None,
                    }
                } else {
                    AppCommand::AddFile {
                        path,
                        display_name: None,
                    }
                }
            })
            .collect(),
        AppIntent::RemoveRequested { id } => vec![AppCommand::RemoveBubble { id }],
        AppIntent::BubbleDroppedOnBubble {
            source_id,
            target_id,
        } => vec![AppCommand::MergeBubbles {
            source_id,
            target_id,
        }],
        AppIntent::BubbleClicked { id } => vec![AppCommand::OpenBubble { id }],
        AppIntent::BackRequested => {
            if state.catalog.state().can_back() {
                vec![AppCommand::NavigateBack]
            } else {
                Vec::new()
            }
        }
        AppIntent::HomeRequested => vec![AppCommand::ResetToRoot],
        AppIntent::GestureToggled { enabled } => vec![AppCommand::SetGestureEnabled { enabled }],
        AppIntent::OptionsChanged { options } => vec![AppCommand::ApplyOptions { options }],
        AppIntent::ExitRequested => vec![AppCommand::RequestExit],
    }
}
