//! Inline Edit State Machine
//!
//! A row label flips into a text input and back. Kept free of DOM types so the
//! row component only forwards events and reacts to the returned outcome.

/// Current presentation of the row title
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditState {
    Display,
    Editing { draft: String },
}

/// Keys the editor reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    Enter,
    Escape,
    Other,
}

impl EditKey {
    pub fn from_key(key: &str) -> Self {
        match key {
            "Enter" => EditKey::Enter,
            "Escape" | "Esc" => EditKey::Escape,
            _ => EditKey::Other,
        }
    }
}

/// What the row should do after an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// Nothing changed
    None,
    /// Label restored to the original text
    Cancelled,
    /// Persist this (trimmed, changed) title
    Commit(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineEdit {
    original: String,
    state: EditState,
    /// Set when Enter/Escape already settled the edit, so the blur the
    /// input fires while being removed is ignored.
    key_settled: bool,
}

impl InlineEdit {
    pub fn new(original: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            state: EditState::Display,
            key_settled: false,
        }
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, EditState::Editing { .. })
    }

    pub fn draft(&self) -> Option<&str> {
        match &self.state {
            EditState::Editing { draft } => Some(draft),
            EditState::Display => None,
        }
    }

    /// Text the label shows while in Display
    pub fn label(&self) -> &str {
        &self.original
    }

    /// Display -> Editing, pre-filled with the current title. Idempotent.
    pub fn begin(&mut self) -> bool {
        if self.is_editing() {
            return false;
        }
        self.key_settled = false;
        self.state = EditState::Editing { draft: self.original.clone() };
        true
    }

    pub fn input(&mut self, text: impl Into<String>) {
        if let EditState::Editing { draft } = &mut self.state {
            *draft = text.into();
        }
    }

    pub fn key(&mut self, key: EditKey) -> EditOutcome {
        if !self.is_editing() {
            return EditOutcome::None;
        }
        match key {
            EditKey::Enter => {
                self.key_settled = true;
                self.commit()
            }
            EditKey::Escape => {
                self.key_settled = true;
                self.cancel()
            }
            EditKey::Other => EditOutcome::None,
        }
    }

    /// Focus loss commits unless a key press already settled the edit.
    pub fn blur(&mut self) -> EditOutcome {
        if self.key_settled {
            self.key_settled = false;
            return EditOutcome::None;
        }
        if !self.is_editing() {
            return EditOutcome::None;
        }
        self.commit()
    }

    /// The commit was rejected: go back to Editing with the unsaved text.
    pub fn reopen(&mut self, draft: impl Into<String>) {
        self.key_settled = false;
        self.state = EditState::Editing { draft: draft.into() };
    }

    fn commit(&mut self) -> EditOutcome {
        let new_title = match &self.state {
            EditState::Editing { draft } => draft.trim().to_string(),
            EditState::Display => return EditOutcome::None,
        };
        if new_title.is_empty() || new_title == self.original {
            return self.cancel();
        }
        self.state = EditState::Display;
        EditOutcome::Commit(new_title)
    }

    fn cancel(&mut self) -> EditOutcome {
        self.state = EditState::Display;
        EditOutcome::Cancelled
    }
}
