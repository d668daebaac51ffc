//! Verlauf der ausgeführten Commands (Konsolen-Befehl `history`).

use super::AppCommand;
use std::collections::VecDeque;

/// Ringpuffer der zuletzt ausgeführten Commands, älteste zuerst.
#[derive(Default)]
pub struct CommandLog {
    entries: VecDeque<AppCommand>,
}

impl CommandLog {
    /// Obergrenze; bei Überlauf fällt jeweils der älteste Eintrag heraus
    pub const CAPACITY: usize = 256;

    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(Self::CAPACITY),
        }
    }

    /// Hängt einen ausgeführten Command an.
    pub fn record(&mut self, command: &AppCommand) {
        if self.entries.len() == Self::CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(command.clone());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Alle Einträge, ältester zuerst.
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &AppCommand> + '_ {
        self.entries.iter()
    }

    /// Die letzten `count` Einträge, ältester zuerst (neuester am Ende).
    pub fn recent(&self, count: usize) -> impl Iterator<Item = &AppCommand> + '_ {
        let skip = self.entries.len().saturating_sub(count);
        self.entries.iter().skip(skip)
    }
}
