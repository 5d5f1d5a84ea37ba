//! Text chunking
//!
//! Splits raw document text into overlapping fixed-size segments suitable
//! for embedding. Breaks preferentially at newline boundaries so chunks do
//! not cut lines in half, and carries a fixed overlap between consecutive
//! chunks so context is shared across boundaries.

use crate::error::{ChatError, Result};

/// Character-based chunker with newline-preferring splits.
pub struct TextChunker {
    chunk_size: usize,
    overlap: usize,
}

impl TextChunker {
    /// Create a chunker. The geometry comes from user-editable config, so
    /// an unusable combination is an error rather than a panic: the chunk
    /// size must be positive and the overlap smaller than the chunk size.
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(ChatError::InvalidConfig(
                "chunk_size must be positive".into(),
            ));
        }
        if overlap >= chunk_size {
            return Err(ChatError::InvalidConfig(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                overlap, chunk_size
            )));
        }
        Ok(Self {
            chunk_size,
            overlap,
        })
    }

    /// Split `text` into an ordered sequence of chunks covering the whole
    /// input.
    ///
    /// Each chunk holds at most `chunk_size` characters. When the window
    /// contains a newline the chunk ends just after the last one, so lines
    /// stay intact; the next chunk starts `overlap` characters before the
    /// previous chunk's end. Empty input yields no chunks; input that fits
    /// in one window yields exactly one chunk equal to the input.
    pub fn split(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        self.ranges(&chars)
            .into_iter()
            .map(|(start, end)| chars[start..end].iter().collect())
            .collect()
    }

    /// Chunk boundaries as char ranges over `chars`.
    fn ranges(&self, chars: &[char]) -> Vec<(usize, usize)> {
        let len = chars.len();
        if len == 0 {
            return Vec::new();
        }
        if len <= self.chunk_size {
            return vec![(0, len)];
        }

        let mut ranges = Vec::new();
        let mut start = 0usize;
        loop {
            let window_end = (start + self.chunk_size).min(len);
            let mut end = window_end;
            if window_end < len {
                // Prefer to break just after the last newline in the window
                if let Some(pos) = chars[start..window_end].iter().rposition(|&c| c == '\n') {
                    end = start + pos + 1;
                }
            }
            ranges.push((start, end));
            if end == len {
                break;
            }
            // Step back by the overlap, but always make forward progress
            // even when a chunk came out shorter than the overlap itself
            start = end.saturating_sub(self.overlap).max(start + 1);
        }
        ranges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Rebuild the input from chunk ranges: each range contributes the part
    /// not already covered by its predecessor.
    fn reconstruct(chars: &[char], ranges: &[(usize, usize)]) -> String {
        let mut out = String::new();
        let mut covered = 0usize;
        for &(start, end) in ranges {
            assert!(start <= covered, "gap between chunks at {}", start);
            out.extend(&chars[covered.max(start)..end]);
            covered = end;
        }
        out
    }

    #[test]
    fn test_rejects_unusable_geometry() {
        assert!(matches!(
            TextChunker::new(0, 0),
            Err(ChatError::InvalidConfig(_))
        ));
        assert!(matches!(
            TextChunker::new(1000, 1000),
            Err(ChatError::InvalidConfig(_))
        ));
        assert!(matches!(
            TextChunker::new(100, 500),
            Err(ChatError::InvalidConfig(_))
        ));
        assert!(TextChunker::new(1000, 999).is_ok());
    }

    #[test]
    fn test_empty_input_yields_no_chunks() {
        let chunker = TextChunker::new(1000, 100).unwrap();
        assert!(chunker.split("").is_empty());
    }

    #[test]
    fn test_single_char_yields_one_chunk() {
        let chunker = TextChunker::new(1000, 100).unwrap();
        assert_eq!(chunker.split("x"), vec!["x".to_string()]);
    }

    #[test]
    fn test_short_input_is_one_chunk() {
        let chunker = TextChunker::new(1000, 100).unwrap();
        let text = "short text\nwith two lines";
        assert_eq!(chunker.split(text), vec![text.to_string()]);
    }

    #[test]
    fn test_input_exactly_chunk_size() {
        let chunker = TextChunker::new(50, 10).unwrap();
        let text = "a".repeat(50);
        assert_eq!(chunker.split(&text), vec![text.clone()]);
    }

    #[test]
    fn test_chunks_respect_size_limit() {
        let chunker = TextChunker::new(200, 20).unwrap();
        let text: String = (1..=60)
            .map(|i| format!("line number {} with some content", i))
            .collect::<Vec<_>>()
            .join("\n");
        let chunks = chunker.split(&text);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 200, "chunk too long: {}", chunk.len());
        }
    }

    #[test]
    fn test_prefers_newline_boundaries() {
        let chunker = TextChunker::new(100, 10).unwrap();
        let text: String = (1..=30)
            .map(|i| format!("row {}", i))
            .collect::<Vec<_>>()
            .join("\n");
        let chunks = chunker.split(&text);
        // Every chunk except the last ends exactly at a line boundary
        for chunk in &chunks[..chunks.len() - 1] {
            assert!(chunk.ends_with('\n'), "chunk split mid-line: {:?}", chunk);
        }
    }

    #[test]
    fn test_no_delimiter_window_splits_at_limit() {
        // No newline anywhere: chunks are exactly chunk_size long and the
        // overlap is exactly the configured amount
        let chunker = TextChunker::new(100, 10).unwrap();
        let text = "abcdefghij".repeat(50); // 500 chars, no newlines
        let chars: Vec<char> = text.chars().collect();
        let ranges = chunker.ranges(&chars);

        for window in ranges.windows(2) {
            let (prev_start, prev_end) = window[0];
            let (cur_start, _) = window[1];
            assert_eq!(prev_end - prev_start, 100);
            assert_eq!(prev_end - cur_start, 10, "overlap mismatch");
        }
    }

    #[test]
    fn test_consecutive_chunks_share_overlap() {
        let chunker = TextChunker::new(200, 30).unwrap();
        let text: String = (1..=80)
            .map(|i| format!("sentence {} of the running example text", i))
            .collect::<Vec<_>>()
            .join("\n");
        let chunks = chunker.split(&text);
        assert!(chunks.len() > 1);
        for pair in chunks.windows(2) {
            let prev: Vec<char> = pair[0].chars().collect();
            let tail: String = prev[prev.len() - 30..].iter().collect();
            assert!(
                pair[1].starts_with(&tail),
                "chunks do not share overlap:\nprev tail: {:?}\ncur head: {:?}",
                tail,
                &pair[1][..tail.len().min(pair[1].len())]
            );
        }
    }

    #[test]
    fn test_reconstruction_covers_whole_input() {
        let chunker = TextChunker::new(137, 29).unwrap();
        for text in [
            String::new(),
            "x".to_string(),
            "no newlines at all ".repeat(40),
            (1..=100).map(|i| format!("line {}", i)).collect::<Vec<_>>().join("\n"),
            "каждая строка\n".repeat(60), // multi-byte chars
        ] {
            let chars: Vec<char> = text.chars().collect();
            let ranges = chunker.ranges(&chars);
            assert_eq!(reconstruct(&chars, &ranges), text);
        }
    }

    #[test]
    fn test_newline_heavy_input_terminates() {
        // Degenerate input where every window ends almost immediately
        let chunker = TextChunker::new(10, 5).unwrap();
        let text = "\n".repeat(100);
        let chunks = chunker.split(&text);
        let chars: Vec<char> = text.chars().collect();
        assert_eq!(reconstruct(&chars, &chunker.ranges(&chars)), text);
        assert!(!chunks.is_empty());
    }
}
