//=========================================================================
// Key Translation Table
//
// Maps platform-neutral key symbols into the engine's compact scan-code
// space: `u8` codes in the classic PC keyboard set layout, with 0
// reserved as the null code for anything unmapped. The mapping is built
// once from a flat data table into an O(1) structure, so translation
// never depends on any platform's symbol numbering.
//
//=========================================================================

use std::collections::HashMap;

use super::event::KeySym;

//=== Scan Codes ==========================================================

/// Engine scan codes for the keys game code binds by name. The full
/// assignment lives in [`SCANCODE_TABLE`]; these constants cover the
/// codes hosts typically reference directly.
pub mod scancodes {
    /// Reserved null code; produced by unmapped platform symbols.
    pub const NONE: u8 = 0x00;

    pub const ESCAPE: u8 = 0x01;
    pub const ENTER: u8 = 0x1C;
    pub const SPACE: u8 = 0x39;
    pub const BACKSPACE: u8 = 0x0E;
    pub const TAB: u8 = 0x0F;

    pub const LEFT_CONTROL: u8 = 0x1D;
    pub const LEFT_SHIFT: u8 = 0x2A;
    pub const RIGHT_SHIFT: u8 = 0x36;
    pub const LEFT_ALT: u8 = 0x38;
    pub const RIGHT_CONTROL: u8 = 0x9D;
    pub const RIGHT_ALT: u8 = 0xB8;

    pub const UP: u8 = 0xC8;
    pub const DOWN: u8 = 0xD0;
    pub const LEFT: u8 = 0xCB;
    pub const RIGHT: u8 = 0xCD;

    pub const HOME: u8 = 0xC7;
    pub const END: u8 = 0xCF;
    pub const PAGE_UP: u8 = 0xC9;
    pub const PAGE_DOWN: u8 = 0xD1;
    pub const INSERT: u8 = 0xD2;
    pub const DELETE: u8 = 0xD3;

    pub const F1: u8 = 0x3B;
    pub const F12: u8 = 0x58;

    /// Console/overlay toggle key (the backquote).
    pub const BACKQUOTE: u8 = 0x29;
}

//=== Data Table ==========================================================

/// The fixed sym → scan-code assignment.
///
/// Values follow the classic PC set: main block 0x01..0x58, extended
/// navigation/pad keys above 0x9C. Order here is documentation only;
/// lookup goes through the built map.
pub const SCANCODE_TABLE: &[(KeySym, u8)] = &[
    (KeySym::Escape, 0x01),
    (KeySym::Digit1, 0x02),
    (KeySym::Digit2, 0x03),
    (KeySym::Digit3, 0x04),
    (KeySym::Digit4, 0x05),
    (KeySym::Digit5, 0x06),
    (KeySym::Digit6, 0x07),
    (KeySym::Digit7, 0x08),
    (KeySym::Digit8, 0x09),
    (KeySym::Digit9, 0x0A),
    (KeySym::Digit0, 0x0B),
    (KeySym::Minus, 0x0C),
    (KeySym::Equal, 0x0D),
    (KeySym::Backspace, 0x0E),
    (KeySym::Tab, 0x0F),
    (KeySym::KeyQ, 0x10),
    (KeySym::KeyW, 0x11),
    (KeySym::KeyE, 0x12),
    (KeySym::KeyR, 0x13),
    (KeySym::KeyT, 0x14),
    (KeySym::KeyY, 0x15),
    (KeySym::KeyU, 0x16),
    (KeySym::KeyI, 0x17),
    (KeySym::KeyO, 0x18),
    (KeySym::KeyP, 0x19),
    (KeySym::BracketLeft, 0x1A),
    (KeySym::BracketRight, 0x1B),
    (KeySym::Enter, 0x1C),
    (KeySym::ControlLeft, 0x1D),
    (KeySym::KeyA, 0x1E),
    (KeySym::KeyS, 0x1F),
    (KeySym::KeyD, 0x20),
    (KeySym::KeyF, 0x21),
    (KeySym::KeyG, 0x22),
    (KeySym::KeyH, 0x23),
    (KeySym::KeyJ, 0x24),
    (KeySym::KeyK, 0x25),
    (KeySym::KeyL, 0x26),
    (KeySym::Semicolon, 0x27),
    (KeySym::Quote, 0x28),
    (KeySym::Backquote, 0x29),
    (KeySym::ShiftLeft, 0x2A),
    (KeySym::Backslash, 0x2B),
    (KeySym::KeyZ, 0x2C),
    (KeySym::KeyX, 0x2D),
    (KeySym::KeyC, 0x2E),
    (KeySym::KeyV, 0x2F),
    (KeySym::KeyB, 0x30),
    (KeySym::KeyN, 0x31),
    (KeySym::KeyM, 0x32),
    (KeySym::Comma, 0x33),
    (KeySym::Period, 0x34),
    (KeySym::Slash, 0x35),
    (KeySym::ShiftRight, 0x36),
    (KeySym::NumpadMultiply, 0x37),
    (KeySym::AltLeft, 0x38),
    (KeySym::Space, 0x39),
    (KeySym::CapsLock, 0x3A),
    (KeySym::F1, 0x3B),
    (KeySym::F2, 0x3C),
    (KeySym::F3, 0x3D),
    (KeySym::F4, 0x3E),
    (KeySym::F5, 0x3F),
    (KeySym::F6, 0x40),
    (KeySym::F7, 0x41),
    (KeySym::F8, 0x42),
    (KeySym::F9, 0x43),
    (KeySym::F10, 0x44),
    (KeySym::NumLock, 0x45),
    (KeySym::ScrollLock, 0x46),
    (KeySym::Numpad7, 0x47),
    (KeySym::Numpad8, 0x48),
    (KeySym::Numpad9, 0x49),
    (KeySym::NumpadSubtract, 0x4A),
    (KeySym::Numpad4, 0x4B),
    (KeySym::Numpad5, 0x4C),
    (KeySym::Numpad6, 0x4D),
    (KeySym::NumpadAdd, 0x4E),
    (KeySym::Numpad1, 0x4F),
    (KeySym::Numpad2, 0x50),
    (KeySym::Numpad3, 0x51),
    (KeySym::Numpad0, 0x52),
    (KeySym::NumpadDecimal, 0x53),
    (KeySym::F11, 0x57),
    (KeySym::F12, 0x58),
    (KeySym::Pause, 0x59),
    (KeySym::NumpadEnter, 0x9C),
    (KeySym::ControlRight, 0x9D),
    (KeySym::NumpadDivide, 0xB5),
    (KeySym::PrintScreen, 0xB7),
    (KeySym::AltRight, 0xB8),
    (KeySym::Home, 0xC7),
    (KeySym::ArrowUp, 0xC8),
    (KeySym::PageUp, 0xC9),
    (KeySym::ArrowLeft, 0xCB),
    (KeySym::ArrowRight, 0xCD),
    (KeySym::End, 0xCF),
    (KeySym::ArrowDown, 0xD0),
    (KeySym::PageDown, 0xD1),
    (KeySym::Insert, 0xD2),
    (KeySym::Delete, 0xD3),
    (KeySym::SuperLeft, 0xDB),
    (KeySym::SuperRight, 0xDC),
    (KeySym::ContextMenu, 0xDD),
];

//=== KeyMap ==============================================================

/// O(1) sym → scan-code lookup, built once from [`SCANCODE_TABLE`].
pub struct KeyMap {
    table: HashMap<KeySym, u8>,
}

impl KeyMap {
    pub fn new() -> Self {
        Self {
            table: SCANCODE_TABLE.iter().copied().collect(),
        }
    }

    /// Translates a platform symbol. Unmapped symbols (including
    /// `Unidentified`) yield the null code 0.
    pub fn translate(&self, sym: KeySym) -> u8 {
        self.table.get(&sym).copied().unwrap_or(scancodes::NONE)
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn well_known_keys_translate_to_their_classic_codes() {
        let map = KeyMap::new();

        assert_eq!(map.translate(KeySym::Escape), scancodes::ESCAPE);
        assert_eq!(map.translate(KeySym::Space), scancodes::SPACE);
        assert_eq!(map.translate(KeySym::KeyW), 0x11);
        assert_eq!(map.translate(KeySym::ArrowUp), scancodes::UP);
        assert_eq!(map.translate(KeySym::NumpadEnter), 0x9C);
        assert_eq!(map.translate(KeySym::Backquote), scancodes::BACKQUOTE);
    }

    #[test]
    fn unidentified_translates_to_the_null_code() {
        let map = KeyMap::new();
        assert_eq!(map.translate(KeySym::Unidentified), scancodes::NONE);
    }

    #[test]
    fn table_never_assigns_the_reserved_null_code() {
        assert!(SCANCODE_TABLE.iter().all(|&(_, code)| code != scancodes::NONE));
    }

    #[test]
    fn table_has_no_duplicate_symbols() {
        let mut seen = HashSet::new();
        for &(sym, _) in SCANCODE_TABLE {
            assert!(seen.insert(sym), "{:?} appears twice", sym);
        }
    }

    #[test]
    fn table_has_no_duplicate_codes() {
        let mut seen = HashSet::new();
        for &(sym, code) in SCANCODE_TABLE {
            assert!(seen.insert(code), "code {:#04x} reused by {:?}", code, sym);
        }
    }
}
