/// Position-restoring reader over a line of text.
///
/// Decoders look ahead with [`Cursor::peek`] and only [`Cursor::advance`]
/// once they have matched, so a failed decode leaves the cursor where it
/// was and the next decoder sees the same characters.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    text: &'a str,
    head: usize,
}

impl<'a> Cursor<'a> {
    pub fn position(&self) -> usize {
        self.head
    }
    pub fn rewind(&mut self, position: usize) {
        self.head = position.min(self.text.len());
    }
    pub fn rest(&self) -> &'a str {
        &self.text[self.head..]
    }
    pub fn is_empty(&self) -> bool {
        self.rest().is_empty()
    }
    /// The next `n` characters, without consuming them.
    /// `None` if fewer than `n` remain.
    pub fn peek(&self, n: usize) -> Option<&'a str> {
        let rest = self.rest();
        match rest.char_indices().nth(n) {
            Some((end, _)) => Some(&rest[..end]),
            None if rest.chars().count() == n => Some(rest),
            None => None,
        }
    }
    /// Consume up to `n` characters and return them.
    pub fn advance(&mut self, n: usize) -> &'a str {
        let rest = self.rest();
        let end = rest
            .char_indices()
            .nth(n)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        self.head += end;
        &rest[..end]
    }
    /// Consume `n` characters if all are available.
    pub fn take(&mut self, n: usize) -> Option<&'a str> {
        let peek = self.peek(n)?;
        self.head += peek.len();
        Some(peek)
    }
}

impl<'a> From<&'a str> for Cursor<'a> {
    fn from(text: &'a str) -> Self {
        Self { text, head: 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peek_does_not_consume() {
        let cursor = Cursor::from("#U0A");
        assert_eq!(cursor.peek(2), Some("#U"));
        assert_eq!(cursor.peek(2), Some("#U"));
        assert_eq!(cursor.peek(4), Some("#U0A"));
        assert_eq!(cursor.peek(5), None);
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn take_is_all_or_nothing() {
        let mut cursor = Cursor::from("abc");
        assert_eq!(cursor.take(2), Some("ab"));
        assert_eq!(cursor.take(2), None);
        assert_eq!(cursor.rest(), "c");
        assert_eq!(cursor.advance(2), "c");
        assert!(cursor.is_empty());
    }

    #[test]
    fn rewind_restores_position() {
        let mut cursor = Cursor::from("[12](3)");
        let mark = cursor.position();
        cursor.advance(4);
        assert_eq!(cursor.rest(), "(3)");
        cursor.rewind(mark);
        assert_eq!(cursor.rest(), "[12](3)");
    }
}
