//! Desktop context menu state and its fixed item list.

use serde::{Deserialize, Serialize};

use crate::model::{DesktopState, PointerPosition};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContextMenuItem {
    ArrangeIconsBy,
    Refresh,
    Paste,
    Properties,
}

impl ContextMenuItem {
    pub const ALL: [ContextMenuItem; 4] = [
        Self::ArrangeIconsBy,
        Self::Refresh,
        Self::Paste,
        Self::Properties,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::ArrangeIconsBy => "Arrange Icons By",
            Self::Refresh => "Refresh",
            Self::Paste => "Paste",
            Self::Properties => "Properties",
        }
    }

    /// Paste stays greyed out; the shell has no clipboard of its own.
    pub fn is_enabled(self) -> bool {
        !matches!(self, Self::Paste)
    }
}

/// Shows the menu at `position`, replacing any menu already open.
pub fn open_context_menu(state: &mut DesktopState, position: PointerPosition) {
    state.context_menu = Some(position);
}

pub fn close_context_menu(state: &mut DesktopState) -> bool {
    state.context_menu.take().is_some()
}
