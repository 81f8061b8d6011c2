//! Key names used in binding files.
//!
//! Names are lowercase: `left`, `space`, `escape`, `f5`, or a single
//! character such as `a` or `/`. Letters are case-insensitive, so `A` and `a`
//! (and a shifted `Char('A')` from the terminal) refer to the same key.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Parse a key name; None if it is not a known key.
pub fn key_from_name(name: &str) -> Option<KeyCode> {
    let lower = name.trim().to_ascii_lowercase();

    let code = match lower.as_str() {
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "space" => KeyCode::Char(' '),
        "return" | "enter" => KeyCode::Enter,
        "escape" | "esc" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "delete" => KeyCode::Delete,
        "insert" => KeyCode::Insert,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        other => {
            if let Some(n) = other.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                if (1..=12).contains(&n) {
                    return Some(KeyCode::F(n));
                }
                return None;
            }
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if !c.is_whitespace() && !c.is_control() => KeyCode::Char(c),
                _ => return None,
            }
        }
    };
    Some(code)
}

/// Canonical name of a key; None for keys that have no name.
pub fn key_name(code: KeyCode) -> Option<String> {
    let name = match normalize(code) {
        KeyCode::Left => "left",
        KeyCode::Right => "right",
        KeyCode::Up => "up",
        KeyCode::Down => "down",
        KeyCode::Char(' ') => "space",
        KeyCode::Enter => "return",
        KeyCode::Esc => "escape",
        KeyCode::Tab => "tab",
        KeyCode::Backspace => "backspace",
        KeyCode::Delete => "delete",
        KeyCode::Insert => "insert",
        KeyCode::Home => "home",
        KeyCode::End => "end",
        KeyCode::PageUp => "pageup",
        KeyCode::PageDown => "pagedown",
        KeyCode::F(n) if (1..=12).contains(&n) => return Some(format!("f{n}")),
        KeyCode::Char(c) if !c.is_control() => return Some(c.to_string()),
        _ => return None,
    };
    Some(name.to_string())
}

/// Fold letter case so bindings match regardless of shift.
pub fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

/// `q` or Ctrl+C
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
