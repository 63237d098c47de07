use serde_json::{Map, Value};

/// Which kind of edit, if any, is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    Idle,
    Creating,
    Editing,
}

/// The single in-progress edit of a collection.
///
/// The draft is a detached JSON copy of the entry: changes to it are not
/// visible through the collection until commit.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EditSession {
    #[default]
    Idle,
    Creating {
        draft: Map<String, Value>,
    },
    Editing {
        /// Key of the entry the draft was copied from.
        original_key: String,
        draft: Map<String, Value>,
    },
}

impl EditSession {
    pub fn mode(&self) -> SessionMode {
        match self {
            Self::Idle => SessionMode::Idle,
            Self::Creating { .. } => SessionMode::Creating,
            Self::Editing { .. } => SessionMode::Editing,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn draft(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Idle => None,
            Self::Creating { draft } | Self::Editing { draft, .. } => Some(draft),
        }
    }

    pub(crate) fn draft_mut(&mut self) -> Option<&mut Map<String, Value>> {
        match self {
            Self::Idle => None,
            Self::Creating { draft } | Self::Editing { draft, .. } => Some(draft),
        }
    }

    /// Key of the entry being edited; `None` when creating or idle.
    pub fn original_key(&self) -> Option<&str> {
        match self {
            Self::Editing { original_key, .. } => Some(original_key),
            _ => None,
        }
    }
}
