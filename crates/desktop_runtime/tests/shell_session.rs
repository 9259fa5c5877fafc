use std::rc::Rc;

use desktop_runtime::{
    apps, AppKind, DesktopAction, DesktopRuntime, DesktopState, DisplayProperties, FocusTarget,
    IconBounds, IdleEvent, PointerPosition, PowerOffKind, PowerState, Rect, RuntimeEffect,
    ScreenSaverConfig,
};
use platform_host::ManualClock;
use pretty_assertions::assert_eq;

fn session() -> (DesktopRuntime, ManualClock) {
    let clock = ManualClock::starting_at(10_000);
    let runtime = DesktopRuntime::with_state(DesktopState::default(), Rc::new(clock.clone()));
    (runtime, clock)
}

fn open(runtime: &mut DesktopRuntime, kind: AppKind) {
    runtime.dispatch(DesktopAction::OpenApp(apps::app_settings(kind)));
}

#[test]
fn notepad_twice_then_paint_then_minimize_paint() {
    let (mut runtime, _clock) = session();

    open(&mut runtime, AppKind::Notepad);
    let notepad = runtime.focused_app_id().expect("notepad focused");
    let first_z = runtime.state().app(notepad).expect("notepad").z_index;

    open(&mut runtime, AppKind::Notepad);
    assert_eq!(runtime.state().apps.len(), 1);
    assert_eq!(runtime.focused_app_id(), Some(notepad));
    assert!(runtime.state().app(notepad).expect("notepad").z_index > first_z);

    open(&mut runtime, AppKind::Paint);
    let paint = runtime.focused_app_id().expect("paint focused");
    assert_ne!(paint, notepad);
    assert_eq!(runtime.state().apps.len(), 2);

    runtime.dispatch(DesktopAction::MinimizeApp { app_id: paint });
    assert_eq!(runtime.focused_app_id(), Some(notepad));

    let stack: Vec<AppKind> = runtime
        .state()
        .apps_in_stack_order()
        .iter()
        .map(|app| app.kind)
        .collect();
    assert_eq!(stack, vec![AppKind::Notepad, AppKind::Paint]);
}

#[test]
fn start_menu_commands_cover_apps_errors_and_power() {
    let (mut runtime, _clock) = session();

    runtime.dispatch(DesktopAction::ActivateMenuItem {
        label: "Internet".to_string(),
    });
    runtime.dispatch(DesktopAction::ActivateMenuItem {
        label: "Not A Program".to_string(),
    });
    runtime.dispatch(DesktopAction::ActivateMenuItem {
        label: "Not A Program".to_string(),
    });
    let kinds: Vec<AppKind> = runtime.state().apps.iter().map(|app| app.kind).collect();
    assert_eq!(
        kinds,
        vec![AppKind::InternetExplorer, AppKind::Error, AppKind::Error]
    );

    runtime.dispatch(DesktopAction::ActivateMenuItem {
        label: apps::TURN_OFF_LABEL.to_string(),
    });
    assert_eq!(runtime.state().power, PowerState::ConfirmShutdown);

    let browser = runtime.state().apps[0].id;
    let before = runtime.state().clone();
    runtime.dispatch(DesktopAction::FocusApp { app_id: browser });
    runtime.dispatch(DesktopAction::CloseApp { app_id: browser });
    assert_eq!(runtime.state(), &before);

    assert_eq!(
        runtime.dispatch(DesktopAction::ConfirmPowerOff),
        vec![RuntimeEffect::PowerOff(PowerOffKind::Shutdown)]
    );
    runtime.dispatch(DesktopAction::CancelPowerOff);
    runtime.dispatch(DesktopAction::CloseApp { app_id: browser });
    assert_eq!(runtime.state().apps.len(), 2);
}

#[test]
fn rubber_band_selects_icons_then_window_commands_are_gated() {
    let (mut runtime, _clock) = session();
    open(&mut runtime, AppKind::Winamp);
    let winamp = runtime.focused_app_id().expect("winamp focused");

    let bounds = vec![
        IconBounds {
            icon_id: runtime.state().icons[0].id,
            rect: Rect {
                x: 0,
                y: 0,
                w: 64,
                h: 64,
            },
        },
        IconBounds {
            icon_id: runtime.state().icons[1].id,
            rect: Rect {
                x: 200,
                y: 200,
                w: 64,
                h: 64,
            },
        },
    ];
    runtime.dispatch(DesktopAction::SetIconLayout { bounds });
    runtime.dispatch(DesktopAction::StartSelect {
        origin: PointerPosition::new(100, 100),
    });
    runtime.dispatch(DesktopAction::UpdateSelection {
        pointer: PointerPosition::new(10, 10),
    });
    runtime.dispatch(DesktopAction::EndSelect);

    assert_eq!(runtime.state().focus, FocusTarget::Icon);
    assert_eq!(
        runtime.state().focused_icon_ids(),
        vec![runtime.state().icons[0].id]
    );
    assert_eq!(runtime.focused_app_id(), None);

    let before = runtime.state().clone();
    runtime.dispatch(DesktopAction::MinimizeApp { app_id: winamp });
    runtime.dispatch(DesktopAction::ToggleMaximizeApp { app_id: winamp });
    runtime.dispatch(DesktopAction::CloseApp { app_id: winamp });
    assert_eq!(runtime.state(), &before);

    runtime.dispatch(DesktopAction::ToggleTaskbarApp { app_id: winamp });
    assert_eq!(runtime.focused_app_id(), Some(winamp));
}

#[test]
fn idle_screen_saver_follows_display_properties() {
    let (mut runtime, clock) = session();
    let properties = DisplayProperties {
        screen_saver: ScreenSaverConfig {
            kind: "Windows XP".to_string(),
            timeout_minutes: 2,
        },
        ..DisplayProperties::default()
    };
    assert_eq!(
        runtime.dispatch(DesktopAction::SetDisplayProperties { properties }),
        vec![RuntimeEffect::PersistDisplayProperties]
    );

    clock.advance(60_000);
    for _ in 0..20 {
        clock.advance(10);
        runtime.user_activity();
        runtime.tick();
    }
    clock.advance(119_000);
    assert!(runtime.tick().iter().all(|e| *e != IdleEvent::ScreenSaverActivate));

    let deadline = runtime.next_idle_deadline_ms().expect("armed");
    clock.set(deadline);
    assert_eq!(runtime.tick(), vec![IdleEvent::ScreenSaverActivate]);
    assert!(runtime.screen_saver_active());

    assert!(runtime.user_activity());
    assert!(!runtime.screen_saver_active());
}
