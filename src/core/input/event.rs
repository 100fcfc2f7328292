//=========================================================================
// Platform Event Types
//
// The neutral representation of raw platform input. Backends (winit or
// otherwise) translate their native events into these before the input
// translator ever sees them, so the translator's state machine is
// independent of any particular platform's event vocabulary.
//
// `KeySym` identifies a physical key location, not a character: the key
// next to Tab is `KeyQ` on every layout. The translator maps syms to the
// engine's compact scan-code space through a data table (`keymap`).
//
//=========================================================================

//=== MouseButton =========================================================

/// Physical mouse button identifier.
///
/// Only the three classic buttons participate in the engine's button
/// mask; `Other` covers side/thumb/macro buttons, which the translator
/// ignores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other,
}

//=== KeySym ==============================================================

/// Physical keyboard key identifier, platform-neutral.
///
/// Covers the full conventional keyboard: alphanumerics, function keys,
/// modifiers (left/right distinguished), navigation cluster, and the
/// numeric pad. Platform symbols with no entry here arrive as
/// `Unidentified` and translate to the null scan code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeySym {
    //--- Number Row -------------------------------------------------------
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Letters ----------------------------------------------------------
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Function Row -----------------------------------------------------
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,

    //--- Main Block Punctuation ------------------------------------------
    Minus, Equal, BracketLeft, BracketRight, Backslash,
    Semicolon, Quote, Backquote, Comma, Period, Slash,

    //--- Editing / Whitespace ---------------------------------------------
    Escape, Tab, Backspace, Enter, Space, CapsLock,

    //--- Modifiers --------------------------------------------------------
    ShiftLeft, ShiftRight,
    ControlLeft, ControlRight,
    AltLeft, AltRight,
    SuperLeft, SuperRight,
    ContextMenu,

    //--- Navigation Cluster -----------------------------------------------
    Insert, Delete, Home, End, PageUp, PageDown,
    ArrowUp, ArrowDown, ArrowLeft, ArrowRight,

    //--- Locks / System ---------------------------------------------------
    NumLock, ScrollLock, Pause, PrintScreen,

    //--- Numeric Pad ------------------------------------------------------
    Numpad0, Numpad1, Numpad2, Numpad3, Numpad4,
    Numpad5, Numpad6, Numpad7, Numpad8, Numpad9,
    NumpadAdd, NumpadSubtract, NumpadMultiply, NumpadDivide,
    NumpadDecimal, NumpadEnter,

    /// A platform symbol with no mapping. Translates to scan code 0.
    Unidentified,
}

//=== PlatformEvent =======================================================

/// One raw event popped from the platform's queue.
///
/// Events are drained in platform-queue order by
/// [`InputTranslator::drain_events`](super::translator::InputTranslator::drain_events);
/// all state they mutate is visible to callbacks fired later in the same
/// drain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlatformEvent {
    /// A key changed state. Repeats arrive as additional pressed
    /// events; the translator suppresses them.
    Key { sym: KeySym, pressed: bool },

    /// A mouse button changed state.
    MouseButton { button: MouseButton, pressed: bool },

    /// Relative pointer motion, in device units.
    MouseMotion { dx: i32, dy: i32 },

    /// The session gained (`true`) or lost (`false`) input focus.
    FocusChanged(bool),

    /// The platform asked the application to quit.
    Quit,
}
