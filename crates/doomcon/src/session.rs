use crate::ENTRY_SIZE;

/// Sound played after a dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    Success,
    Failure,
}

/// Line-editing actions delivered by the menu/input layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Backspace,
    Enter,
    /// Bring back the last submitted entry.
    Recall,
}

/// Pending input plus the last dispatch outcome.
#[derive(Clone, Debug, Default)]
pub struct ConsoleSession {
    entry: String,
    last_entry: String,
    message: String,
    cue: Option<Cue>,
}

impl ConsoleSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(&self) -> &str {
        &self.entry
    }

    /// Cursor position; the entry is ASCII-only so this is also its length.
    pub fn index(&self) -> usize {
        self.entry.len()
    }

    pub fn last_entry(&self) -> &str {
        &self.last_entry
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cue(&self) -> Option<Cue> {
        self.cue
    }

    /// Appends printable ASCII from `text`, lowercased. Input past [`ENTRY_SIZE`] is dropped.
    pub fn push_text(&mut self, text: &str) {
        for c in text.chars() {
            if !(' '..='~').contains(&c) {
                continue;
            }
            if self.entry.len() >= ENTRY_SIZE {
                break;
            }
            self.entry.push(c.to_ascii_lowercase());
        }
    }

    pub fn backspace(&mut self) -> bool {
        self.entry.pop().is_some()
    }

    /// Saves the current entry for [`ConsoleSession::recall`] and returns a copy of it.
    pub fn submit(&mut self) -> String {
        self.last_entry.clone_from(&self.entry);
        self.entry.clone()
    }

    pub fn recall(&mut self) {
        self.entry.clone_from(&self.last_entry);
    }

    pub fn reset_entry(&mut self) {
        self.entry.clear();
    }

    pub fn set_outcome(&mut self, message: &str, cue: Cue) {
        self.message.clear();
        self.message
            .push_str(message.get(..ENTRY_SIZE).unwrap_or(message));
        self.cue = Some(cue);
    }

    pub fn prompt_line(&self) -> String {
        format!("$ {}_", self.entry)
    }

    pub fn message_line(&self) -> String {
        format!("  {}", self.message)
    }
}
