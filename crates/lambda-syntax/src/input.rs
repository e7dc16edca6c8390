/// Zero-based offset into the source, counted in characters.
pub type Position = usize;

/// Immutable source buffer shared by every parser during one parse.
///
/// Positions index characters rather than bytes, so a parser can step over
/// multi-byte letters one position at a time. The byte offset of each
/// character is kept alongside for span conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    chars: Vec<char>,
    byte_offsets: Vec<usize>,
    byte_len: usize,
}

impl Input {
    pub fn new(text: &str) -> Self {
        let (byte_offsets, chars) = text.char_indices().unzip();
        Self {
            chars,
            byte_offsets,
            byte_len: text.len(),
        }
    }

    /// Number of characters in the source.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn char_at(&self, position: Position) -> Option<char> {
        self.chars.get(position).copied()
    }

    /// True if `literal` occurs at `position`.
    pub fn starts_with(&self, position: Position, literal: &str) -> bool {
        let mut offset = position;
        for expected in literal.chars() {
            if self.char_at(offset) != Some(expected) {
                return false;
            }
            offset += 1;
        }
        true
    }

    /// Byte offset of the character at `position`; the end of the text for
    /// positions past the last character.
    pub fn byte_offset(&self, position: Position) -> usize {
        self.byte_offsets
            .get(position)
            .copied()
            .unwrap_or(self.byte_len)
    }
}
