//! Key input for the editor buffer.

/// A key press delivered to the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Inserts a newline; the cursor move is deferred to the next tick
    Enter,
    /// Inserts a space; the cursor move is deferred to the next tick
    Space,
    Char(char),
    Backspace,
    Left,
    Right,
    Home,
    End,
}

impl Key {
    /// Character inserted by this key, if any
    pub fn inserted_char(self) -> Option<char> {
        match self {
            Key::Enter => Some('\n'),
            Key::Space => Some(' '),
            Key::Char(c) => Some(c),
            _ => None,
        }
    }

    /// Whether the cursor move after insertion waits for the next tick
    pub fn defers_cursor(self) -> bool {
        matches!(self, Key::Enter | Key::Space)
    }
}

/// Byte offset of the char boundary before `cursor`
pub(crate) fn prev_boundary(text: &str, cursor: usize) -> usize {
    text[..cursor]
        .char_indices()
        .next_back()
        .map(|(idx, _)| idx)
        .unwrap_or(0)
}

/// Byte offset of the char boundary after `cursor`
pub(crate) fn next_boundary(text: &str, cursor: usize) -> usize {
    text[cursor..]
        .chars()
        .next()
        .map(|c| cursor + c.len_utf8())
        .unwrap_or(cursor)
}

/// Clamp an offset into `text` and snap it back onto a char boundary
pub(crate) fn clamp_cursor(text: &str, cursor: usize) -> usize {
    let mut cursor = cursor.min(text.len());
    while !text.is_char_boundary(cursor) {
        cursor -= 1;
    }
    cursor
}
