use crate::discovery::DiscoveredEntry;

/// Input to the selection menu, already decoded from keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent {
    MoveUp,
    MoveDown,
    Toggle,
    ToggleAll,
    Commit,
    Interrupt,
}

/// Checked state of the discovered entries plus a cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    entries: Vec<DiscoveredEntry>,
    cursor: usize,
}

/// Result of feeding one event into a [`Selection`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Continue(Selection),
    Commit(Selection),
    Exit,
}

impl Selection {
    /// A menu needs at least one entry; an empty discovery has no menu.
    pub fn new(entries: Vec<DiscoveredEntry>) -> Option<Self> {
        if entries.is_empty() {
            None
        } else {
            Some(Self { entries, cursor: 0 })
        }
    }

    pub fn entries(&self) -> &[DiscoveredEntry] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> &DiscoveredEntry {
        &self.entries[self.cursor]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn checked_count(&self) -> usize {
        self.entries.iter().filter(|e| e.checked).count()
    }

    pub fn all_checked(&self) -> bool {
        self.entries.iter().all(|e| e.checked)
    }

    /// Estimated bytes of the checked entries
    pub fn checked_size(&self) -> u64 {
        self.entries
            .iter()
            .filter(|e| e.checked)
            .filter_map(|e| e.size_bytes)
            .sum()
    }

    /// Apply one event. Cursor moves stop at either end of the list.
    pub fn transition(mut self, event: MenuEvent) -> Transition {
        match event {
            MenuEvent::MoveUp => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            MenuEvent::MoveDown => {
                self.cursor = (self.cursor + 1).min(self.entries.len() - 1);
            }
            MenuEvent::Toggle => {
                let entry = &mut self.entries[self.cursor];
                entry.checked = !entry.checked;
            }
            MenuEvent::ToggleAll => {
                let target = !self.all_checked();
                for entry in &mut self.entries {
                    entry.checked = target;
                }
            }
            MenuEvent::Commit => return Transition::Commit(self),
            MenuEvent::Interrupt => return Transition::Exit,
        }
        Transition::Continue(self)
    }
}

/// Supplies menu events, typically by drawing the menu and reading a key.
/// `None` means the input is gone and is treated as an interrupt.
pub trait EventSource {
    fn next_event(&mut self, selection: &Selection) -> Option<MenuEvent>;
}

/// How a selection session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEnd {
    NothingFound,
    Interrupted,
    Committed(Selection),
}

/// Drive a selection menu over `entries` until commit or interrupt
pub fn run_session<S: EventSource>(entries: Vec<DiscoveredEntry>, source: &mut S) -> SessionEnd {
    let Some(mut selection) = Selection::new(entries) else {
        return SessionEnd::NothingFound;
    };

    loop {
        let event = source.next_event(&selection).unwrap_or(MenuEvent::Interrupt);
        tracing::trace!(?event, cursor = selection.cursor(), "menu event");
        selection = match selection.transition(event) {
            Transition::Continue(next) => next,
            Transition::Commit(done) => return SessionEnd::Committed(done),
            Transition::Exit => return SessionEnd::Interrupted,
        };
    }
}
