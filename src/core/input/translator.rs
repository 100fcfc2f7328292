//=========================================================================
// Input Translator
//
// Drains the platform's event queue once per poll and maintains the
// engine-local view of keyboard, mouse, and session-focus state: a
// 256-entry key status table, an ordered key FIFO, relative mouse
// accumulators, a three-button bitmask, and the grab/focus/quit flags.
//
// Everything runs synchronously on the caller's thread. The overlay
// hook, the key/button callbacks, and the clock callback all fire
// re-entrantly from inside `drain_events`; state mutated by earlier
// events in a drain is visible to callbacks fired by later ones.
//
//=========================================================================

//=== External Crates =====================================================

use log::info;

//=== Internal Dependencies ===============================================

use super::event::{MouseButton, PlatformEvent};
use super::fifo::KeyFifo;
use super::keymap::KeyMap;
use crate::core::timer::SimClock;
use crate::platform::{InputBackend, TickSource};

//=== Callback Types ======================================================

/// Notified on every registered key transition: `(scan code, pressed)`.
pub type KeyCallback = Box<dyn FnMut(u8, bool)>;

/// Notified on every recognized button transition:
/// `(button number, pressed)` with 1-based button numbers.
pub type ButtonCallback = Box<dyn FnMut(u8, bool)>;

/// Diagnostic-overlay key hook, offered every key event before any
/// state changes. Returning `true` consumes the event outright.
pub type OverlayKeyHook = Box<dyn FnMut(u8, bool) -> bool>;

//=== InputTranslator =====================================================

/// Per-session input state machine over a platform event queue.
pub struct InputTranslator<B: InputBackend> {
    backend: B,
    keymap: KeyMap,

    //--- Keyboard ---------------------------------------------------------
    key_status: [bool; 256],
    fifo: KeyFifo,

    //--- Mouse ------------------------------------------------------------
    mouse_dx: i32,
    mouse_dy: i32,
    button_mask: u8,
    mouse_initialized: bool,

    //--- Session ----------------------------------------------------------
    grab_active: bool,
    focused: bool,
    quit_requested: bool,

    //--- Hooks ------------------------------------------------------------
    key_callback: Option<KeyCallback>,
    button_callback: Option<ButtonCallback>,
    overlay_hook: Option<OverlayKeyHook>,
}

impl<B: InputBackend> InputTranslator<B> {
    /// Creates a translator over `backend`. The session starts focused
    /// (the window that just appeared has focus) with the mouse
    /// uninitialized and ungrabbed.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            keymap: KeyMap::new(),
            key_status: [false; 256],
            fifo: KeyFifo::new(),
            mouse_dx: 0,
            mouse_dy: 0,
            button_mask: 0,
            mouse_initialized: false,
            grab_active: false,
            focused: true,
            quit_requested: false,
            key_callback: None,
            button_callback: None,
            overlay_hook: None,
        }
    }

    //--- drain_events() ---------------------------------------------------

    /// Pops and processes every queued platform event, then advances the
    /// simulation clock exactly once.
    ///
    /// Returns `true` when something significant happened (a quit
    /// request or a focus transition), signalling the caller to re-check
    /// application-active state before continuing its frame.
    pub fn drain_events<T: TickSource>(&mut self, clock: &mut SimClock<T>) -> bool {
        let mut significant = false;

        while let Some(event) = self.backend.poll_event() {
            match event {
                PlatformEvent::Key { sym, pressed } => {
                    let code = self.keymap.translate(sym);

                    // The overlay gets first refusal, null code included.
                    if let Some(hook) = &mut self.overlay_hook {
                        if hook(code, pressed) {
                            continue;
                        }
                    }

                    if pressed {
                        // Platform key-repeat must not re-trigger a
                        // down transition.
                        if !self.key_status[code as usize] {
                            self.register_key(code, true);
                        }
                    } else {
                        self.register_key(code, false);
                    }
                }

                PlatformEvent::MouseButton { button, pressed } => {
                    let index = match button {
                        MouseButton::Left => 0u8,
                        MouseButton::Right => 1,
                        MouseButton::Middle => 2,
                        MouseButton::Other => continue,
                    };

                    let bit = 1u8 << index;
                    if pressed {
                        self.button_mask |= bit;
                    } else {
                        self.button_mask &= !bit;
                    }

                    if let Some(callback) = &mut self.button_callback {
                        callback(index + 1, pressed);
                    }
                }

                PlatformEvent::MouseMotion { dx, dy } => {
                    // Unfocused motion is the cursor wandering over
                    // unrelated desktop surfaces; drop it.
                    if self.focused {
                        self.mouse_dx += dx;
                        self.mouse_dy += dy;
                    }
                }

                PlatformEvent::FocusChanged(gained) => {
                    self.focused = gained;
                    if self.grab_active {
                        self.backend.set_pointer_grab(gained);
                        self.backend.set_cursor_visible(!gained);
                    }
                    significant = true;
                }

                PlatformEvent::Quit => {
                    self.quit_requested = true;
                    significant = true;
                }
            }
        }

        clock.sample();

        significant
    }

    fn register_key(&mut self, code: u8, pressed: bool) {
        self.key_status[code as usize] = pressed;
        self.fifo.push(code, pressed);
        if let Some(callback) = &mut self.key_callback {
            callback(code, pressed);
        }
    }

    //--- Mouse Lifecycle --------------------------------------------------

    /// Brings mouse input up, grabbing the pointer. Idempotent.
    pub fn init_mouse(&mut self) {
        if self.mouse_initialized {
            return;
        }
        info!(target: "input", "Initializing mouse");
        self.mouse_initialized = true;
        self.set_grab(true);
    }

    /// Shuts mouse input down, releasing any grab. Idempotent.
    pub fn shutdown_mouse(&mut self) {
        if !self.mouse_initialized {
            return;
        }
        self.set_grab(false);
        self.mouse_initialized = false;
    }

    //--- set_grab() -------------------------------------------------------

    /// Requests (or releases) exclusive pointer capture.
    ///
    /// Takes effect only while the session is focused and mouse input is
    /// initialized; otherwise the desired state is recorded and applied
    /// on the next focus gain. On an actual transition the cursor
    /// visibility is toggled inversely (grabbed means hidden), and the
    /// recorded state follows what the platform actually achieved.
    pub fn set_grab(&mut self, enabled: bool) {
        if self.focused && self.mouse_initialized {
            if enabled != self.grab_active {
                let achieved = self.backend.set_pointer_grab(enabled);
                self.grab_active = achieved;
                self.backend.set_cursor_visible(!achieved);
            }
        } else {
            self.grab_active = enabled;
        }
    }

    /// Releases the platform grab without forgetting that the caller
    /// wants it. Used around a mode change: input must never stay
    /// grabbed against a surface that is being torn down.
    pub fn suspend_grab(&mut self) {
        if self.grab_active {
            self.backend.set_pointer_grab(false);
            self.backend.set_cursor_visible(true);
        }
    }

    /// Re-applies a suspended grab after a successful mode change.
    pub fn resume_grab(&mut self) {
        if self.grab_active {
            self.backend.set_pointer_grab(true);
            self.backend.set_cursor_visible(false);
        }
    }

    //--- Mouse Queries ----------------------------------------------------

    /// Returns and resets the accumulated relative motion.
    ///
    /// While ungrabbed this reports `(0, 0)` without consuming anything;
    /// motion gathered in that state is eventually discarded, not
    /// buffered for later. Each grabbed read consumes the delta exactly
    /// once.
    pub fn read_mouse_delta(&mut self) -> (i32, i32) {
        if !self.grab_active {
            return (0, 0);
        }
        let delta = (self.mouse_dx, self.mouse_dy);
        self.mouse_dx = 0;
        self.mouse_dy = 0;
        delta
    }

    /// Current button bitmask (bit 0 left, 1 right, 2 middle); zero
    /// while ungrabbed.
    pub fn button_mask(&self) -> u8 {
        if !self.grab_active {
            return 0;
        }
        self.button_mask
    }

    //--- Keyboard Queries -------------------------------------------------

    /// Whether `code` is currently held.
    pub fn is_key_down(&self, code: u8) -> bool {
        self.key_status[code as usize]
    }

    /// Pops the oldest unread key transition.
    pub fn next_key(&mut self) -> Option<(u8, bool)> {
        self.fifo.pop()
    }

    //--- Session Queries --------------------------------------------------

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_grabbed(&self) -> bool {
        self.grab_active
    }

    /// Whether the platform has asked the application to quit.
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Clears the quit flag once the host has acted on it.
    pub fn acknowledge_quit(&mut self) {
        self.quit_requested = false;
    }

    //--- Hook Registration ------------------------------------------------

    /// Sets the key-transition callback. Returns the previous one.
    pub fn set_key_callback(&mut self, callback: Option<KeyCallback>) -> Option<KeyCallback> {
        std::mem::replace(&mut self.key_callback, callback)
    }

    /// Sets the button-transition callback. Returns the previous one.
    pub fn set_button_callback(
        &mut self,
        callback: Option<ButtonCallback>,
    ) -> Option<ButtonCallback> {
        std::mem::replace(&mut self.button_callback, callback)
    }

    /// Sets the diagnostic-overlay key hook. Returns the previous one.
    pub fn set_overlay_hook(&mut self, hook: Option<OverlayKeyHook>) -> Option<OverlayKeyHook> {
        std::mem::replace(&mut self.overlay_hook, hook)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
