//! Rubber-band icon selection geometry.

use serde::{Deserialize, Serialize};

use crate::{
    focus,
    model::{DesktopState, IconId, PointerPosition, SelectionState},
};

/// Axis-aligned rectangle in desktop coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    /// Normalized rectangle spanning two opposite corners.
    pub fn from_corners(a: PointerPosition, b: PointerPosition) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self {
            x,
            y,
            w: span(x, a.x.max(b.x)),
            h: span(y, a.y.max(b.y)),
        }
    }

    pub fn has_area(self) -> bool {
        self.w > 0 && self.h > 0
    }

    /// Strict overlap test. Edges are computed in `i64` so extreme coordinates cannot overflow.
    pub fn intersects(self, other: Rect) -> bool {
        let (ax, ay) = (i64::from(self.x), i64::from(self.y));
        let (bx, by) = (i64::from(other.x), i64::from(other.y));
        ax < bx + i64::from(other.w)
            && bx < ax + i64::from(self.w)
            && ay < by + i64::from(other.h)
            && by < ay + i64::from(self.h)
    }
}

/// Distance from `low` up to `high`. Any two `i32` values are at most `u32::MAX` apart.
fn span(low: i32, high: i32) -> u32 {
    high.abs_diff(low)
}

/// Bounding box of one desktop icon as laid out by the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconBounds {
    pub icon_id: IconId,
    pub rect: Rect,
}

impl SelectionState {
    pub fn rect(&self) -> Rect {
        Rect::from_corners(self.origin, self.current)
    }
}

/// Icons whose bounds intersect `rect`. A rectangle without area selects nothing.
pub fn icons_in_rect(rect: Rect, layout: &[IconBounds]) -> Vec<IconId> {
    if !rect.has_area() {
        return Vec::new();
    }
    layout
        .iter()
        .filter(|bounds| bounds.rect.intersects(rect))
        .map(|bounds| bounds.icon_id)
        .collect()
}

/// Opens a selection anchored at `origin`. Focus moves to the desktop and any context menu closes.
pub fn start_select(state: &mut DesktopState, origin: PointerPosition) {
    focus::focus_desktop(state);
    state.selecting = Some(SelectionState {
        origin,
        current: origin,
    });
    state.context_menu = None;
}

/// Records a pointer sample and live-selects the icons under the band.
pub fn update_select(state: &mut DesktopState, pointer: PointerPosition) -> bool {
    let Some(selection) = state.selecting.as_mut() else {
        return false;
    };
    selection.current = pointer;
    let hits = icons_in_rect(selection.rect(), &state.icon_layout);
    focus::select_icons(state, &hits);
    true
}

/// Commits the icons under the band as the focused set and closes the selection.
pub fn end_select(state: &mut DesktopState) -> bool {
    let Some(selection) = state.selecting.take() else {
        return false;
    };
    let hits = icons_in_rect(selection.rect(), &state.icon_layout);
    focus::select_icons(state, &hits);
    true
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{AppKind, FocusTarget, IconState};

    fn icon_grid() -> DesktopState {
        let layout = vec![
            IconBounds {
                icon_id: IconId(0),
                rect: Rect { x: 0, y: 0, w: 20, h: 20 },
            },
            IconBounds {
                icon_id: IconId(1),
                rect: Rect { x: 50, y: 50, w: 20, h: 20 },
            },
            IconBounds {
                icon_id: IconId(2),
                rect: Rect { x: 95, y: 95, w: 20, h: 20 },
            },
            IconBounds {
                icon_id: IconId(3),
                rect: Rect { x: 200, y: 10, w: 20, h: 20 },
            },
        ];
        DesktopState {
            icons: layout
                .iter()
                .map(|bounds| IconState {
                    id: bounds.icon_id,
                    kind: AppKind::MyComputer,
                    label: format!("Icon {}", bounds.icon_id.0),
                    is_focus: false,
                })
                .collect(),
            icon_layout: layout,
            ..DesktopState::default()
        }
    }

    #[test]
    fn rect_from_corners_normalizes_any_drag_direction() {
        let rect = Rect::from_corners(PointerPosition::new(100, 10), PointerPosition::new(10, 100));
        assert_eq!(rect, Rect { x: 10, y: 10, w: 90, h: 90 });
    }

    #[test]
    fn band_selects_exactly_intersecting_icons() {
        let mut state = icon_grid();
        state.icons[3].is_focus = true;

        start_select(&mut state, PointerPosition::new(10, 10));
        update_select(&mut state, PointerPosition::new(100, 100));
        end_select(&mut state);

        assert_eq!(state.focus, FocusTarget::Icon);
        assert_eq!(state.focused_icon_ids(), vec![IconId(0), IconId(1), IconId(2)]);
        assert_eq!(state.selecting, None);
    }

    #[test]
    fn click_without_drag_focuses_desktop() {
        let mut state = icon_grid();
        start_select(&mut state, PointerPosition::new(5, 5));
        end_select(&mut state);

        assert_eq!(state.focus, FocusTarget::Desktop);
        assert!(state.focused_icon_ids().is_empty());
    }

    #[test]
    fn touching_edges_do_not_count_as_intersection() {
        let rect = Rect::from_corners(PointerPosition::new(20, 0), PointerPosition::new(40, 20));
        let layout = icon_grid().icon_layout;
        assert!(icons_in_rect(rect, &layout).is_empty());
    }

    #[test]
    fn live_updates_track_the_pointer() {
        let mut state = icon_grid();
        start_select(&mut state, PointerPosition::new(190, 0));
        update_select(&mut state, PointerPosition::new(230, 40));
        assert_eq!(state.focused_icon_ids(), vec![IconId(3)]);

        update_select(&mut state, PointerPosition::new(195, 5));
        assert_eq!(state.focus, FocusTarget::Desktop);
        assert!(state.focused_icon_ids().is_empty());
        assert!(state.selecting.is_some());
    }

    #[test]
    fn updates_without_active_selection_are_ignored() {
        let mut state = icon_grid();
        let before = state.clone();
        assert!(!update_select(&mut state, PointerPosition::new(1, 1)));
        assert!(!end_select(&mut state));
        assert_eq!(state, before);
    }

    #[test]
    fn extreme_corners_do_not_overflow() {
        let rect = Rect::from_corners(
            PointerPosition::new(i32::MIN, 0),
            PointerPosition::new(i32::MAX, 10),
        );
        assert_eq!(rect.x, i32::MIN);
        assert_eq!(rect.w, u32::MAX);
        assert_eq!(rect.h, 10);

        let far = Rect {
            x: i32::MAX,
            y: i32::MAX,
            w: u32::MAX,
            h: u32::MAX,
        };
        assert!(far.intersects(far));
        assert!(!rect.intersects(far));
    }

    #[test]
    fn band_spanning_the_whole_plane_selects_every_icon() {
        let mut state = icon_grid();
        start_select(&mut state, PointerPosition::new(i32::MIN, i32::MIN));
        update_select(&mut state, PointerPosition::new(i32::MAX, i32::MAX));
        assert!(end_select(&mut state));

        assert_eq!(
            state.focused_icon_ids(),
            vec![IconId(0), IconId(1), IconId(2), IconId(3)]
        );
        assert_eq!(state.focus, FocusTarget::Icon);
    }
}
