//! `rdev` key/button to canonical identifier translation table.
//!
//! The identifiers produced here are persisted as keys in the bindings file,
//! so every entry must stay stable across releases.  Changing a name silently
//! orphans the bindings users already saved under it.
//!
//! | rdev                 | Identifier        |
//! |----------------------|-------------------|
//! | `Key::KeyA`          | `Key.a`           |
//! | `Key::Num7`          | `Key.7`           |
//! | `Key::Kp7`           | `Key.num_7`       |
//! | `Key::ShiftRight`    | `Key.shift_r`     |
//! | `Key::Unknown(94)`   | `Key.unknown_94`  |
//! | `Button::Left`       | `Button.left`     |
//! | `Button::Unknown(4)` | `Button.unknown_4`|

use rdev::{Button, EventType, Key};
use soundbind_core::InputEvent;

/// Translates one hook event, or returns `None` for motion and wheel events.
pub fn translate(event_type: &EventType) -> Option<InputEvent> {
    match *event_type {
        EventType::KeyPress(key) => Some(InputEvent::key_press(key_id(key))),
        EventType::KeyRelease(key) => Some(InputEvent::key_release(key_id(key))),
        EventType::ButtonPress(button) => Some(InputEvent::button_press(button_id(button))),
        EventType::ButtonRelease(button) => Some(InputEvent::button_release(button_id(button))),
        EventType::MouseMove { .. } | EventType::Wheel { .. } => None,
    }
}

/// Canonical identifier for a keyboard key.
///
/// Keys missing from the table are named after their `rdev` variant in
/// snake_case (`KpEqual` becomes `Key.kp_equal`).  That fallback is persisted
/// like any other identifier, so moving such a key into the table must keep
/// the same name.
pub fn key_id(key: Key) -> String {
    match (key_name(key), key) {
        (Some(name), _) => format!("Key.{name}"),
        (None, Key::Unknown(code)) => format!("Key.unknown_{code}"),
        (None, other) => {
            let variant = format!("{other:?}");
            format!("Key.{}", snake_case(&variant))
        }
    }
}

/// Canonical identifier for a mouse button.
pub fn button_id(button: Button) -> String {
    match button {
        Button::Left => "Button.left".to_string(),
        Button::Right => "Button.right".to_string(),
        Button::Middle => "Button.middle".to_string(),
        Button::Unknown(code) => format!("Button.unknown_{code}"),
    }
}

/// `KpEqual` → `kp_equal`.
fn snake_case(variant: &str) -> String {
    let mut out = String::with_capacity(variant.len() + 4);
    for (i, ch) in variant.chars().enumerate() {
        if ch.is_ascii_uppercase() && i > 0 {
            out.push('_');
        }
        out.push(ch.to_ascii_lowercase());
    }
    out
}

fn key_name(key: Key) -> Option<&'static str> {
    let name = match key {
        // Letters
        Key::KeyA => "a",
        Key::KeyB => "b",
        Key::KeyC => "c",
        Key::KeyD => "d",
        Key::KeyE => "e",
        Key::KeyF => "f",
        Key::KeyG => "g",
        Key::KeyH => "h",
        Key::KeyI => "i",
        Key::KeyJ => "j",
        Key::KeyK => "k",
        Key::KeyL => "l",
        Key::KeyM => "m",
        Key::KeyN => "n",
        Key::KeyO => "o",
        Key::KeyP => "p",
        Key::KeyQ => "q",
        Key::KeyR => "r",
        Key::KeyS => "s",
        Key::KeyT => "t",
        Key::KeyU => "u",
        Key::KeyV => "v",
        Key::KeyW => "w",
        Key::KeyX => "x",
        Key::KeyY => "y",
        Key::KeyZ => "z",
        // Top-row digits
        Key::Num1 => "1",
        Key::Num2 => "2",
        Key::Num3 => "3",
        Key::Num4 => "4",
        Key::Num5 => "5",
        Key::Num6 => "6",
        Key::Num7 => "7",
        Key::Num8 => "8",
        Key::Num9 => "9",
        Key::Num0 => "0",
        // Punctuation
        Key::BackQuote => "`",
        Key::Minus => "-",
        Key::Equal => "=",
        Key::LeftBracket => "[",
        Key::RightBracket => "]",
        Key::SemiColon => ";",
        Key::Quote => "'",
        Key::BackSlash => "\\",
        Key::IntlBackslash => "intl_backslash",
        Key::Comma => ",",
        Key::Dot => ".",
        Key::Slash => "/",
        // Editing and whitespace
        Key::Backspace => "backspace",
        Key::Tab => "tab",
        Key::Return => "enter",
        Key::Space => "space",
        Key::Escape => "esc",
        Key::Insert => "insert",
        Key::Delete => "delete",
        Key::Home => "home",
        Key::End => "end",
        Key::PageUp => "page_up",
        Key::PageDown => "page_down",
        // Arrows
        Key::UpArrow => "up",
        Key::DownArrow => "down",
        Key::LeftArrow => "left",
        Key::RightArrow => "right",
        // Modifiers
        Key::ShiftLeft => "shift",
        Key::ShiftRight => "shift_r",
        Key::ControlLeft => "ctrl_l",
        Key::ControlRight => "ctrl_r",
        Key::Alt => "alt",
        Key::AltGr => "alt_gr",
        Key::MetaLeft => "cmd",
        Key::MetaRight => "cmd_r",
        Key::Function => "fn",
        // Locks and system
        Key::CapsLock => "caps_lock",
        Key::NumLock => "num_lock",
        Key::ScrollLock => "scroll_lock",
        Key::PrintScreen => "print_screen",
        Key::Pause => "pause",
        // Function row
        Key::F1 => "f1",
        Key::F2 => "f2",
        Key::F3 => "f3",
        Key::F4 => "f4",
        Key::F5 => "f5",
        Key::F6 => "f6",
        Key::F7 => "f7",
        Key::F8 => "f8",
        Key::F9 => "f9",
        Key::F10 => "f10",
        Key::F11 => "f11",
        Key::F12 => "f12",
        // Keypad
        Key::Kp0 => "num_0",
        Key::Kp1 => "num_1",
        Key::Kp2 => "num_2",
        Key::Kp3 => "num_3",
        Key::Kp4 => "num_4",
        Key::Kp5 => "num_5",
        Key::Kp6 => "num_6",
        Key::Kp7 => "num_7",
        Key::Kp8 => "num_8",
        Key::Kp9 => "num_9",
        Key::KpReturn => "num_enter",
        Key::KpMinus => "num_minus",
        Key::KpPlus => "num_plus",
        Key::KpMultiply => "num_multiply",
        Key::KpDivide => "num_divide",
        Key::KpDelete => "num_delete",
        _ => return None,
    };
    Some(name)
}
