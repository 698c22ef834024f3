//! Label edit state definitions

/// State of the in-place label editor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditState {
    /// Label is displayed, not being edited
    #[default]
    Idle,
    /// Label is being edited interactively
    Editing,
}

impl EditState {
    /// Derive the state from the `editing` flag
    pub fn from_editing(editing: bool) -> Self {
        if editing {
            Self::Editing
        } else {
            Self::Idle
        }
    }

    pub fn is_editing(self) -> bool {
        self == Self::Editing
    }
}
