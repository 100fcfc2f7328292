//=========================================================================
// Winit Bridge
//
// Converts winit's OS-level events into the core's neutral
// `PlatformEvent` vocabulary and ferries them over a channel to the
// pollable side the input translator drains.
//
// Architecture:
// ```text
//  Winit Event Loop Side:              Engine Side (per frame):
//  ┌─────────────────────────┐        ┌──────────────────────────┐
//  │ ApplicationHandler      │        │ InputTranslator          │
//  │   ↓ window/device event │        │   ↓ drain_events()       │
//  │ EventBridge             │        │ ChannelEventPump         │
//  │   ├─ maps winit types   │        │   ├─ try_recv() loop     │
//  │   └─ sends PlatformEvent┼───────►│   └─ grab/cursor control │
//  └─────────────────────────┘  MPSC  └──────────────────────────┘
// ```
//
// The channel makes winit's callback-driven loop look like the pumped
// queue the translator expects: events accumulate between frames and a
// drain pops exactly what is queued, never blocking. If the engine side
// goes away the bridge logs and drops events rather than failing the
// event loop.
//
//=========================================================================

//=== External Crates =====================================================

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{trace, warn};
use winit::{
    event::{DeviceEvent, ElementState, MouseButton as WinitMouseButton, WindowEvent},
    keyboard::{KeyCode as WinitKeyCode, PhysicalKey},
    monitor::MonitorHandle,
    window::{CursorGrabMode, Window},
};

use std::sync::Arc;

//=== Internal Dependencies ===============================================

use super::{InputBackend, ModeQuery};
use crate::core::input::event::{KeySym, MouseButton, PlatformEvent};

//=== EventBridge =========================================================

/// Lives on the winit event-loop side; call it from the
/// `ApplicationHandler` with every window and device event.
pub struct EventBridge {
    sender: Sender<PlatformEvent>,
}

impl EventBridge {
    /// Creates a bridge and the receiver its events arrive on. Hand the
    /// receiver to [`ChannelEventPump::new`].
    pub fn new() -> (Self, Receiver<PlatformEvent>) {
        let (sender, receiver) = unbounded();
        (Self { sender }, receiver)
    }

    /// Translates and forwards one window event. Events with no engine
    /// meaning (resize, redraw, IME, ...) are ignored.
    pub fn handle_window_event(&self, event: &WindowEvent) {
        if let Some(translated) = map_window_event(event) {
            self.forward(translated);
        }
    }

    /// Translates and forwards one device event. Only raw pointer
    /// motion matters here: the engine wants relative deltas, which
    /// window-space cursor positions cannot provide under a grab.
    pub fn handle_device_event(&self, event: &DeviceEvent) {
        if let Some(translated) = map_device_event(event) {
            self.forward(translated);
        }
    }

    fn forward(&self, event: PlatformEvent) {
        if self.sender.send(event).is_err() {
            warn!(target: "input", "Event consumer disconnected; dropping {:?}", event);
        }
    }
}

//=== Event Mapping =======================================================

/// Maps a winit window event to the neutral vocabulary. Returns `None`
/// for events the engine does not consume.
pub fn map_window_event(event: &WindowEvent) -> Option<PlatformEvent> {
    match event {
        WindowEvent::CloseRequested => Some(PlatformEvent::Quit),

        WindowEvent::Focused(gained) => Some(PlatformEvent::FocusChanged(*gained)),

        WindowEvent::KeyboardInput { event: key_event, .. } => {
            let sym = match key_event.physical_key {
                PhysicalKey::Code(code) => KeySym::from(code),
                _ => KeySym::Unidentified,
            };
            Some(PlatformEvent::Key {
                sym,
                pressed: key_event.state == ElementState::Pressed,
            })
        }

        WindowEvent::MouseInput { state, button, .. } => Some(PlatformEvent::MouseButton {
            button: MouseButton::from(*button),
            pressed: *state == ElementState::Pressed,
        }),

        _ => None,
    }
}

/// Maps a winit device event to the neutral vocabulary.
pub fn map_device_event(event: &DeviceEvent) -> Option<PlatformEvent> {
    match event {
        DeviceEvent::MouseMotion { delta: (dx, dy) } => Some(PlatformEvent::MouseMotion {
            dx: *dx as i32,
            dy: *dy as i32,
        }),
        _ => None,
    }
}

//=== ChannelEventPump ====================================================

/// The engine-side [`InputBackend`]: pops bridged events and applies
/// pointer grab / cursor visibility to the window.
pub struct ChannelEventPump {
    receiver: Receiver<PlatformEvent>,
    window: Arc<Window>,
}

impl ChannelEventPump {
    pub fn new(receiver: Receiver<PlatformEvent>, window: Arc<Window>) -> Self {
        Self { receiver, window }
    }
}

impl InputBackend for ChannelEventPump {
    fn poll_event(&mut self) -> Option<PlatformEvent> {
        self.receiver.try_recv().ok()
    }

    fn set_pointer_grab(&mut self, grab: bool) -> bool {
        if grab {
            // Confinement is the portable mode; fall back to a hard
            // lock where the platform only offers that.
            self.window
                .set_cursor_grab(CursorGrabMode::Confined)
                .or_else(|_| self.window.set_cursor_grab(CursorGrabMode::Locked))
                .is_ok()
        } else {
            if let Err(e) = self.window.set_cursor_grab(CursorGrabMode::None) {
                trace!(target: "input", "Cursor release reported {}", e);
            }
            false
        }
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        self.window.set_cursor_visible(visible);
    }
}

//=== Mode Enumeration ====================================================

/// Builds the catalog's enumeration answer for one depth from a
/// monitor's video-mode list.
///
/// Monitors report concrete fullscreen modes, so an empty filter result
/// means the depth is unusable fullscreen, except for the baseline
/// 8-bit paletted depth, which modern platforms emulate at any size.
pub fn monitor_mode_query(monitor: &MonitorHandle, depth: u8) -> ModeQuery {
    let sizes: Vec<(u32, u32)> = monitor
        .video_modes()
        .filter(|mode| mode.bit_depth() == depth as u16)
        .map(|mode| {
            let size = mode.size();
            (size.width, size.height)
        })
        .collect();

    if !sizes.is_empty() {
        ModeQuery::List(sizes)
    } else if depth == 8 {
        ModeQuery::AnyResolution
    } else {
        ModeQuery::Unsupported
    }
}

//=== Winit Conversions ===================================================

/// Maps winit physical key codes onto the neutral key symbols. Keys
/// outside the conventional keyboard (F13+, media keys, international
/// extras) fold to `Unidentified`.
impl From<WinitKeyCode> for KeySym {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            //--- Number Row ---------------------------------------------------
            Digit0 => KeySym::Digit0, Digit1 => KeySym::Digit1,
            Digit2 => KeySym::Digit2, Digit3 => KeySym::Digit3,
            Digit4 => KeySym::Digit4, Digit5 => KeySym::Digit5,
            Digit6 => KeySym::Digit6, Digit7 => KeySym::Digit7,
            Digit8 => KeySym::Digit8, Digit9 => KeySym::Digit9,

            //--- Letters ------------------------------------------------------
            KeyA => KeySym::KeyA, KeyB => KeySym::KeyB, KeyC => KeySym::KeyC,
            KeyD => KeySym::KeyD, KeyE => KeySym::KeyE, KeyF => KeySym::KeyF,
            KeyG => KeySym::KeyG, KeyH => KeySym::KeyH, KeyI => KeySym::KeyI,
            KeyJ => KeySym::KeyJ, KeyK => KeySym::KeyK, KeyL => KeySym::KeyL,
            KeyM => KeySym::KeyM, KeyN => KeySym::KeyN, KeyO => KeySym::KeyO,
            KeyP => KeySym::KeyP, KeyQ => KeySym::KeyQ, KeyR => KeySym::KeyR,
            KeyS => KeySym::KeyS, KeyT => KeySym::KeyT, KeyU => KeySym::KeyU,
            KeyV => KeySym::KeyV, KeyW => KeySym::KeyW, KeyX => KeySym::KeyX,
            KeyY => KeySym::KeyY, KeyZ => KeySym::KeyZ,

            //--- Function Row -------------------------------------------------
            F1 => KeySym::F1, F2 => KeySym::F2, F3 => KeySym::F3,
            F4 => KeySym::F4, F5 => KeySym::F5, F6 => KeySym::F6,
            F7 => KeySym::F7, F8 => KeySym::F8, F9 => KeySym::F9,
            F10 => KeySym::F10, F11 => KeySym::F11, F12 => KeySym::F12,

            //--- Punctuation --------------------------------------------------
            Minus => KeySym::Minus, Equal => KeySym::Equal,
            BracketLeft => KeySym::BracketLeft, BracketRight => KeySym::BracketRight,
            Backslash => KeySym::Backslash, Semicolon => KeySym::Semicolon,
            Quote => KeySym::Quote, Backquote => KeySym::Backquote,
            Comma => KeySym::Comma, Period => KeySym::Period, Slash => KeySym::Slash,

            //--- Editing / Whitespace -----------------------------------------
            Escape => KeySym::Escape, Tab => KeySym::Tab,
            Backspace => KeySym::Backspace, Enter => KeySym::Enter,
            Space => KeySym::Space, CapsLock => KeySym::CapsLock,

            //--- Modifiers ----------------------------------------------------
            ShiftLeft => KeySym::ShiftLeft, ShiftRight => KeySym::ShiftRight,
            ControlLeft => KeySym::ControlLeft, ControlRight => KeySym::ControlRight,
            AltLeft => KeySym::AltLeft, AltRight => KeySym::AltRight,
            SuperLeft => KeySym::SuperLeft, SuperRight => KeySym::SuperRight,
            ContextMenu => KeySym::ContextMenu,

            //--- Navigation Cluster -------------------------------------------
            Insert => KeySym::Insert, Delete => KeySym::Delete,
            Home => KeySym::Home, End => KeySym::End,
            PageUp => KeySym::PageUp, PageDown => KeySym::PageDown,
            ArrowUp => KeySym::ArrowUp, ArrowDown => KeySym::ArrowDown,
            ArrowLeft => KeySym::ArrowLeft, ArrowRight => KeySym::ArrowRight,

            //--- Locks / System -----------------------------------------------
            NumLock => KeySym::NumLock, ScrollLock => KeySym::ScrollLock,
            Pause => KeySym::Pause, PrintScreen => KeySym::PrintScreen,

            //--- Numeric Pad --------------------------------------------------
            Numpad0 => KeySym::Numpad0, Numpad1 => KeySym::Numpad1,
            Numpad2 => KeySym::Numpad2, Numpad3 => KeySym::Numpad3,
            Numpad4 => KeySym::Numpad4, Numpad5 => KeySym::Numpad5,
            Numpad6 => KeySym::Numpad6, Numpad7 => KeySym::Numpad7,
            Numpad8 => KeySym::Numpad8, Numpad9 => KeySym::Numpad9,
            NumpadAdd => KeySym::NumpadAdd, NumpadSubtract => KeySym::NumpadSubtract,
            NumpadMultiply => KeySym::NumpadMultiply, NumpadDivide => KeySym::NumpadDivide,
            NumpadDecimal => KeySym::NumpadDecimal, NumpadEnter => KeySym::NumpadEnter,

            //--- Fallback -----------------------------------------------------
            _ => KeySym::Unidentified,
        }
    }
}

/// Maps winit mouse buttons onto the neutral buttons. Side and macro
/// buttons fold to `Other`, which the translator ignores.
impl From<WinitMouseButton> for MouseButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Other,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
