//! Starten von Datei-, Ordner- und Kommando-Bubbles.

use crate::core::{BubbleItem, BubbleItemType, METADATA_ARGS, METADATA_COMMAND};
use crate::shared::{codes, CatalogError, CatalogResult, ErrorKind};
use std::path::Path;
use std::process::{Child, Command};
use std::thread;

/// Startet das Ziel einer Bubble.
///
/// Collections sind kein gültiges Ziel; sie werden per Navigation geöffnet.
pub trait Launcher {
    /// Startet `item` und kehrt sofort zurück.
    fn launch(&self, item: &BubbleItem) -> CatalogResult<()>;
}

/// Launcher über den Standard-Öffner des Betriebssystems.
///
/// Argumente einer Kommando-Bubble werden an Whitespace getrennt,
/// Anführungszeichen werden nicht ausgewertet.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellLauncher;

impl ShellLauncher {
    fn open_with_system(target: &str) -> Command {
        #[cfg(target_os = "windows")]
        {
            let mut command = Command::new("cmd");
            command.args(["/C", "start", "", target]);
            command
        }
        #[cfg(target_os = "macos")]
        {
            let mut command = Command::new("open");
            command.arg(target);
            command
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos")))]
        {
            let mut command = Command::new("xdg-open");
            command.arg(target);
            command
        }
    }

    fn spawn(mut command: Command, item: &BubbleItem) -> CatalogResult<()> {
        let child = command.spawn().map_err(|e| {
            log::error!("Start fehlgeschlagen: {} ({})", item.display_name, item.kind);
            CatalogError::new(
                ErrorKind::Io,
                codes::LAUNCH_EXCEPTION,
                format!("Start fehlgeschlagen: {}", item.display_name),
            )
            .with_cause(e)
        })?;
        reap(child, item.display_name.clone());
        Ok(())
    }
}

/// Wartet im Hintergrund auf das Ende des Kindprozesses, damit kein Zombie bleibt.
fn reap(mut child: Child, name: String) {
    let pid = child.id();
    let spawned = thread::Builder::new()
        .name("orbit-reaper".into())
        .spawn(move || match child.wait() {
            Ok(status) if status.success() => log::debug!("{name} (pid {pid}) beendet"),
            Ok(status) => log::warn!("{name} (pid {pid}) beendet mit {status}"),
            Err(e) => log::warn!("Warten auf {name} (pid {pid}) fehlgeschlagen: {e}"),
        });
    if let Err(e) = spawned {
        log::warn!("Reaper-Thread für pid {pid} nicht startbar: {e}");
    }
}

impl Launcher for ShellLauncher {
    fn launch(&self, item: &BubbleItem) -> CatalogResult<()> {
        match item.kind {
            BubbleItemType::File => {
                let path = existing_path(item, Path::is_file, codes::LAUNCH_FILE_NOT_FOUND)?;
                Self::spawn(Self::open_with_system(path), item)?;
                log::info!("Datei gestartet: {path}");
            }
            BubbleItemType::Folder => {
                let path = existing_path(item, Path::is_dir, codes::LAUNCH_DIR_NOT_FOUND)?;
                Self::spawn(Self::open_with_system(path), item)?;
                log::info!("Ordner geöffnet: {path}");
            }
            BubbleItemType::Command => {
                let program = item
                    .metadata_value(METADATA_COMMAND)
                    .filter(|cmd| !cmd.trim().is_empty())
                    .ok_or_else(|| {
                        CatalogError::validation(codes::LAUNCH_CMD_EMPTY, "Kommando ist leer")
                    })?;
                let args = item.metadata_value(METADATA_ARGS).unwrap_or_default();
                let mut command = Command::new(program);
                command.args(args.split_whitespace());
                Self::spawn(command, item)?;
                log::info!("Kommando gestartet: {program} {args}");
            }
            BubbleItemType::Collection => {
                return Err(CatalogError::type_mismatch(
                    codes::LAUNCH_COLLECTION,
                    "Collections können nicht gestartet werden",
                ));
            }
        }
        Ok(())
    }
}

fn existing_path<'a>(
    item: &'a BubbleItem,
    exists: fn(&Path) -> bool,
    code: &'static str,
) -> CatalogResult<&'a str> {
    item.path
        .as_deref()
        .filter(|path| !path.trim().is_empty() && exists(Path::new(path)))
        .ok_or_else(|| {
            CatalogError::not_found(
                code,
                format!("Ziel nicht gefunden: {}", item.path.as_deref().unwrap_or_default()),
            )
        })
}
