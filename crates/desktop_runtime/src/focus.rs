//! Focus-target transitions for icons and the bare desktop.
//!
//! Window focus is claimed by [`crate::window_manager`]; this module covers the other two
//! targets and keeps the icon `is_focus` flags consistent with them.

use crate::model::{DesktopState, FocusTarget, IconId};

/// Focuses a single icon. Unknown ids are ignored.
pub fn focus_icon(state: &mut DesktopState, icon_id: IconId) -> bool {
    if !state.icons.iter().any(|icon| icon.id == icon_id) {
        return false;
    }
    for icon in &mut state.icons {
        icon.is_focus = icon.id == icon_id;
    }
    state.focus = FocusTarget::Icon;
    true
}

/// Replaces the focused icon set. An empty effective set falls back to [`focus_desktop`].
pub fn select_icons(state: &mut DesktopState, icon_ids: &[IconId]) {
    let any_known = state.icons.iter().any(|icon| icon_ids.contains(&icon.id));
    if !any_known {
        focus_desktop(state);
        return;
    }
    for icon in &mut state.icons {
        icon.is_focus = icon_ids.contains(&icon.id);
    }
    state.focus = FocusTarget::Icon;
}

pub fn focus_desktop(state: &mut DesktopState) {
    clear_icon_focus(state);
    state.focus = FocusTarget::Desktop;
}

fn clear_icon_focus(state: &mut DesktopState) {
    for icon in &mut state.icons {
        icon.is_focus = false;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{AppKind, IconState};

    fn desktop_with_icons(count: u32) -> DesktopState {
        DesktopState {
            icons: (0..count)
                .map(|id| IconState {
                    id: IconId(id),
                    kind: AppKind::Notepad,
                    label: format!("Icon {id}"),
                    is_focus: false,
                })
                .collect(),
            ..DesktopState::default()
        }
    }

    #[test]
    fn focus_icon_marks_only_that_icon() {
        let mut state = desktop_with_icons(3);
        state.icons[2].is_focus = true;

        assert!(focus_icon(&mut state, IconId(1)));

        assert_eq!(state.focus, FocusTarget::Icon);
        assert_eq!(state.focused_icon_ids(), vec![IconId(1)]);
    }

    #[test]
    fn focus_icon_ignores_unknown_ids() {
        let mut state = desktop_with_icons(2);
        let before = state.clone();
        assert!(!focus_icon(&mut state, IconId(9)));
        assert_eq!(state, before);
    }

    #[test]
    fn select_icons_supports_multi_select() {
        let mut state = desktop_with_icons(4);
        select_icons(&mut state, &[IconId(0), IconId(3)]);

        assert_eq!(state.focus, FocusTarget::Icon);
        assert_eq!(state.focused_icon_ids(), vec![IconId(0), IconId(3)]);
    }

    #[test]
    fn empty_selection_behaves_like_focus_desktop() {
        let mut state = desktop_with_icons(2);
        focus_icon(&mut state, IconId(0));

        select_icons(&mut state, &[]);

        assert_eq!(state.focus, FocusTarget::Desktop);
        assert!(state.focused_icon_ids().is_empty());
    }

    #[test]
    fn focus_desktop_clears_every_icon() {
        let mut state = desktop_with_icons(3);
        select_icons(&mut state, &[IconId(0), IconId(1), IconId(2)]);

        focus_desktop(&mut state);

        assert_eq!(state.focus, FocusTarget::Desktop);
        assert!(state.icons.iter().all(|icon| !icon.is_focus));
    }
}
