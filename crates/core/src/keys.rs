//! Keyboard key codes and the character mapping used for typing.
//!
//! Key values are HID keyboard/keypad usage codes, so a host integration
//! can forward them to a real event system unchanged.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A key on the synthesized keyboard.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum KeyboardKey {
    LetterA = 0x04,
    LetterB = 0x05,
    LetterC = 0x06,
    LetterD = 0x07,
    LetterE = 0x08,
    LetterF = 0x09,
    LetterG = 0x0A,
    LetterH = 0x0B,
    LetterI = 0x0C,
    LetterJ = 0x0D,
    LetterK = 0x0E,
    LetterL = 0x0F,
    LetterM = 0x10,
    LetterN = 0x11,
    LetterO = 0x12,
    LetterP = 0x13,
    LetterQ = 0x14,
    LetterR = 0x15,
    LetterS = 0x16,
    LetterT = 0x17,
    LetterU = 0x18,
    LetterV = 0x19,
    LetterW = 0x1A,
    LetterX = 0x1B,
    LetterY = 0x1C,
    LetterZ = 0x1D,

    Number1 = 0x1E,
    Number2 = 0x1F,
    Number3 = 0x20,
    Number4 = 0x21,
    Number5 = 0x22,
    Number6 = 0x23,
    Number7 = 0x24,
    Number8 = 0x25,
    Number9 = 0x26,
    Number0 = 0x27,

    ReturnOrEnter = 0x28,
    Escape = 0x29,
    DeleteOrBackspace = 0x2A,
    Tab = 0x2B,
    Spacebar = 0x2C,
    Hyphen = 0x2D,
    EqualSign = 0x2E,
    OpenBracket = 0x2F,
    CloseBracket = 0x30,
    Backslash = 0x31,
    Semicolon = 0x33,
    Quote = 0x34,
    GraveAccentAndTilde = 0x35,
    Comma = 0x36,
    Period = 0x37,
    Slash = 0x38,
    CapsLock = 0x39,

    FunctionF1 = 0x3A,
    FunctionF2 = 0x3B,
    FunctionF3 = 0x3C,
    FunctionF4 = 0x3D,
    FunctionF5 = 0x3E,
    FunctionF6 = 0x3F,
    FunctionF7 = 0x40,
    FunctionF8 = 0x41,
    FunctionF9 = 0x42,
    FunctionF10 = 0x43,
    FunctionF11 = 0x44,
    FunctionF12 = 0x45,

    PrintScreen = 0x46,
    Insert = 0x49,
    Home = 0x4A,
    PageUp = 0x4B,
    DeleteForward = 0x4C,
    End = 0x4D,
    PageDown = 0x4E,

    ArrowRight = 0x4F,
    ArrowLeft = 0x50,
    ArrowDown = 0x51,
    ArrowUp = 0x52,

    NumLock = 0x53,

    LeftControl = 0xE0,
    LeftShift = 0xE1,
    LeftAlt = 0xE2,
    LeftGui = 0xE3,
    RightControl = 0xE4,
    RightShift = 0xE5,
    RightAlt = 0xE6,
    RightGui = 0xE7,
}

impl KeyboardKey {
    /// The HID usage code reported to the host.
    pub const fn usage(self) -> u32 {
        self as u32
    }
}

const LETTER_KEYS: [KeyboardKey; 26] = [
    KeyboardKey::LetterA,
    KeyboardKey::LetterB,
    KeyboardKey::LetterC,
    KeyboardKey::LetterD,
    KeyboardKey::LetterE,
    KeyboardKey::LetterF,
    KeyboardKey::LetterG,
    KeyboardKey::LetterH,
    KeyboardKey::LetterI,
    KeyboardKey::LetterJ,
    KeyboardKey::LetterK,
    KeyboardKey::LetterL,
    KeyboardKey::LetterM,
    KeyboardKey::LetterN,
    KeyboardKey::LetterO,
    KeyboardKey::LetterP,
    KeyboardKey::LetterQ,
    KeyboardKey::LetterR,
    KeyboardKey::LetterS,
    KeyboardKey::LetterT,
    KeyboardKey::LetterU,
    KeyboardKey::LetterV,
    KeyboardKey::LetterW,
    KeyboardKey::LetterX,
    KeyboardKey::LetterY,
    KeyboardKey::LetterZ,
];

const DIGIT_KEYS: [KeyboardKey; 9] = [
    KeyboardKey::Number1,
    KeyboardKey::Number2,
    KeyboardKey::Number3,
    KeyboardKey::Number4,
    KeyboardKey::Number5,
    KeyboardKey::Number6,
    KeyboardKey::Number7,
    KeyboardKey::Number8,
    KeyboardKey::Number9,
];

/// Symbols that need shift held to produce them.
const SHIFT_SYMBOLS: &[char] = &[
    '!', '@', '#', '$', '%', '^', '&', '*', '(', ')', '_', '+', '{', '}', '|', ':', '"', '<', '>',
    '?', '~',
];

static ALTERNATE_KEYS: Lazy<HashMap<char, KeyboardKey>> = Lazy::new(|| {
    HashMap::from([
        ('`', KeyboardKey::GraveAccentAndTilde),
        ('~', KeyboardKey::GraveAccentAndTilde),
        ('!', KeyboardKey::Number1),
        ('@', KeyboardKey::Number2),
        ('#', KeyboardKey::Number3),
        ('$', KeyboardKey::Number4),
        ('%', KeyboardKey::Number5),
        ('^', KeyboardKey::Number6),
        ('&', KeyboardKey::Number7),
        ('*', KeyboardKey::Number8),
        ('(', KeyboardKey::Number9),
        (')', KeyboardKey::Number0),
        ('0', KeyboardKey::Number0),
        ('-', KeyboardKey::Hyphen),
        ('_', KeyboardKey::Hyphen),
        ('=', KeyboardKey::EqualSign),
        ('+', KeyboardKey::EqualSign),
        ('[', KeyboardKey::OpenBracket),
        ('{', KeyboardKey::OpenBracket),
        (']', KeyboardKey::CloseBracket),
        ('}', KeyboardKey::CloseBracket),
        ('\\', KeyboardKey::Backslash),
        ('|', KeyboardKey::Backslash),
        (';', KeyboardKey::Semicolon),
        (':', KeyboardKey::Semicolon),
        ('\'', KeyboardKey::Quote),
        ('"', KeyboardKey::Quote),
        (',', KeyboardKey::Comma),
        ('<', KeyboardKey::Comma),
        ('.', KeyboardKey::Period),
        ('>', KeyboardKey::Period),
        ('/', KeyboardKey::Slash),
        ('?', KeyboardKey::Slash),
        (' ', KeyboardKey::Spacebar),
        ('\r', KeyboardKey::ReturnOrEnter),
        ('\n', KeyboardKey::ReturnOrEnter),
        ('\t', KeyboardKey::Tab),
    ])
});

/// The key and shift state that produce a character.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct KeyStroke {
    pub key: KeyboardKey,
    pub shift: bool,
}

impl KeyboardKey {
    /// Resolves the key and shift state for a typed character.
    ///
    /// Returns `None` for characters with no mapping on this layout
    /// (non-ASCII included); callers surface that as a typed error.
    pub fn from_character(character: char) -> Option<KeyStroke> {
        if character.is_ascii_lowercase() {
            let index = character as usize - 'a' as usize;
            return Some(KeyStroke { key: LETTER_KEYS[index], shift: false });
        }

        if character.is_ascii_uppercase() {
            let index = character as usize - 'A' as usize;
            return Some(KeyStroke { key: LETTER_KEYS[index], shift: true });
        }

        if ('1'..='9').contains(&character) {
            let index = character as usize - '1' as usize;
            return Some(KeyStroke { key: DIGIT_KEYS[index], shift: false });
        }

        let key = ALTERNATE_KEYS.get(&character)?;
        Some(KeyStroke { key: *key, shift: SHIFT_SYMBOLS.contains(&character) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case('a', KeyboardKey::LetterA, false)]
    #[case('z', KeyboardKey::LetterZ, false)]
    #[case('A', KeyboardKey::LetterA, true)]
    #[case('5', KeyboardKey::Number5, false)]
    #[case('0', KeyboardKey::Number0, false)]
    #[case('%', KeyboardKey::Number5, true)]
    #[case('-', KeyboardKey::Hyphen, false)]
    #[case('_', KeyboardKey::Hyphen, true)]
    #[case(' ', KeyboardKey::Spacebar, false)]
    #[case('\n', KeyboardKey::ReturnOrEnter, false)]
    #[case('?', KeyboardKey::Slash, true)]
    fn character_mapping(#[case] character: char, #[case] key: KeyboardKey, #[case] shift: bool) {
        assert_eq!(KeyboardKey::from_character(character), Some(KeyStroke { key, shift }));
    }

    #[rstest]
    #[case('é')]
    #[case('√')]
    fn unmapped_characters_are_none(#[case] character: char) {
        assert_eq!(KeyboardKey::from_character(character), None);
    }

    #[test]
    fn usage_codes_match_hid_table() {
        assert_eq!(KeyboardKey::LetterA.usage(), 0x04);
        assert_eq!(KeyboardKey::LeftShift.usage(), 0xE1);
        assert_eq!(KeyboardKey::ArrowUp.usage(), 0x52);
    }
}
