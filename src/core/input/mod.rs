//=========================================================================
// Input Subsystem
//
// Turns raw platform input into a coherent engine-local view:
// - `event`:      the neutral event vocabulary backends produce
// - `keymap`:     platform symbol → engine scan-code translation
// - `fifo`:       the bounded, ordered key transition queue
// - `translator`: the per-frame drain loop and all input state
//
//=========================================================================

//=== Submodules ==========================================================

pub mod event;
pub mod fifo;
pub mod keymap;
pub mod translator;

//=== Public Exports ======================================================

pub use event::{KeySym, MouseButton, PlatformEvent};
pub use fifo::{KeyFifo, KEY_FIFO_CAPACITY};
pub use keymap::{scancodes, KeyMap, SCANCODE_TABLE};
pub use translator::{ButtonCallback, InputTranslator, KeyCallback, OverlayKeyHook};
