//! Fixed-window chunker: splits section text into overlapping windows for indexing.
//!
//! Windows are counted in characters, not bytes, and carry no semantic
//! boundary awareness: a window may end mid-word.

use crate::resume::sections::Section;

pub const DEFAULT_CHUNK_SIZE: usize = 1000;
pub const DEFAULT_CHUNK_OVERLAP: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunker {
    max_size: usize,
    overlap: usize,
}

impl Default for Chunker {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE, DEFAULT_CHUNK_OVERLAP)
    }
}

impl Chunker {
    /// A zero `max_size` is raised to 1, and `overlap` is clamped below `max_size`
    /// so consecutive windows always advance.
    pub fn new(max_size: usize, overlap: usize) -> Self {
        let max_size = max_size.max(1);
        Self {
            max_size,
            overlap: overlap.min(max_size - 1),
        }
    }

    /// Distance between the starts of consecutive windows.
    pub fn step(&self) -> usize {
        self.max_size - self.overlap
    }

    /// Splits `content` into windows of at most `max_size` characters.
    pub fn chunk(&self, content: &str) -> Vec<String> {
        let chars: Vec<char> = content.chars().collect();
        let mut chunks = Vec::new();
        let mut start = 0;

        while start < chars.len() {
            let end = (start + self.max_size).min(chars.len());
            chunks.push(chars[start..end].iter().collect());
            if end == chars.len() {
                break;
            }
            start += self.step();
        }

        chunks
    }

    /// Chunks every section and flattens the result; section membership is not kept.
    pub fn chunk_sections(&self, sections: &[Section]) -> Vec<String> {
        sections
            .iter()
            .flat_map(|section| self.chunk(&section.content))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(content: &str, max_size: usize, overlap: usize) -> Vec<String> {
        Chunker::new(max_size, overlap).chunk(content)
    }

    /// Rebuilds the source by dropping each window's overlapping prefix.
    fn reassemble(chunks: &[String], overlap: usize) -> String {
        let mut out = String::new();
        for (i, c) in chunks.iter().enumerate() {
            if i == 0 {
                out.push_str(c);
            } else {
                out.extend(c.chars().skip(overlap));
            }
        }
        out
    }

    #[test]
    fn test_short_content_is_single_chunk() {
        assert_eq!(chunk("Hello world.", 1000, 50), vec!["Hello world."]);
    }

    #[test]
    fn test_empty_content_has_no_chunks() {
        assert!(chunk("", 1000, 50).is_empty());
    }

    #[test]
    fn test_windows_are_bounded_and_overlap() {
        let content: String = (0..2500).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
        let chunks = chunk(&content, 1000, 50);

        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.chars().count() <= 1000));
        // second window starts 950 characters in
        assert_eq!(chunks[1], content[950..1950]);
        let tail: String = chunks[0].chars().skip(950).collect();
        assert!(chunks[1].starts_with(&tail));
    }

    #[test]
    fn test_reassembly_covers_content() {
        for len in [1000, 1001, 1949, 1950, 3333] {
            let content: String = (0..len).map(|i| if i % 7 == 0 { ' ' } else { 'x' }).collect();
            let chunks = chunk(&content, 1000, 50);
            assert_eq!(reassemble(&chunks, 50), content, "length {len}");
        }
    }

    #[test]
    fn test_multibyte_text_is_split_on_characters() {
        let content = "é".repeat(30);
        let chunks = chunk(&content, 10, 2);
        assert!(chunks.iter().all(|c| c.chars().count() <= 10));
        assert_eq!(reassemble(&chunks, 2), content);
    }

    #[test]
    fn test_overlap_is_clamped_below_window() {
        let chunker = Chunker::new(5, 9);
        assert_eq!(chunker.step(), 1);
        assert_eq!(chunker.chunk("abcdefg"), vec!["abcde", "bcdef", "cdefg"]);
    }

    #[test]
    fn test_chunk_sections_flattens_in_order() {
        let sections = vec![
            Section::new("SKILLS", "abcdef"),
            Section::new("EDUCATION", "xyz"),
        ];
        let chunks = Chunker::new(4, 1).chunk_sections(&sections);
        assert_eq!(chunks, vec!["abcd", "def", "xyz"]);
    }
}
