//! Fixed-width string chunking.

use std::iter::FusedIterator;

/// Lazy iterator over `width`-character slices of a string.
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    rest: &'a str,
    width: usize,
}

/// Splits `s` into chunks of `width` characters; the last one may be shorter.
/// A width of zero yields nothing.
pub fn chunk_string(s: &str, width: usize) -> Chunks<'_> {
    Chunks { rest: s, width }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.width == 0 || self.rest.is_empty() {
            return None;
        }
        let end = self
            .rest
            .char_indices()
            .nth(self.width)
            .map_or(self.rest.len(), |(idx, _)| idx);
        let (chunk, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(chunk)
    }
}

impl FusedIterator for Chunks<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunks_with_short_tail() {
        let chunks: Vec<_> = chunk_string("abcdefgh", 3).collect();
        assert_eq!(chunks, vec!["abc", "def", "gh"]);
    }

    #[test]
    fn test_chunks_count_characters_not_bytes() {
        let chunks: Vec<_> = chunk_string("ääöü", 2).collect();
        assert_eq!(chunks, vec!["ää", "öü"]);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(chunk_string("", 4).count(), 0);
        assert_eq!(chunk_string("abc", 0).count(), 0);
        assert_eq!(chunk_string("abc", 10).collect::<Vec<_>>(), vec!["abc"]);
    }

    #[test]
    fn test_iterator_is_exhausted_once() {
        let mut chunks = chunk_string("abcd", 2);
        assert_eq!(chunks.by_ref().count(), 2);
        assert_eq!(chunks.next(), None);
    }
}
