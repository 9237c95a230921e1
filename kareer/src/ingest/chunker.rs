use unicode_segmentation::UnicodeSegmentation;

use crate::config::ProcessingConfig;

/// Splits raw document text into overlapping windows ahead of
/// embedding.
///
/// Windows are at most `chunk_size` graphemes long and consecutive
/// windows share exactly `chunk_overlap` graphemes (the final window
/// may be shorter than a full chunk). The cut point prefers a
/// paragraph break, then a sentence end, then any whitespace, and
/// only falls back to a hard cut when the window contains none of
/// those. Splitting is deterministic: the same text and configuration
/// always produce the same sequence, which downstream dedup relies on.
#[derive(Debug, Clone)]
pub struct ChunkingPolicy {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl ChunkingPolicy {
    pub fn new(config: &ProcessingConfig) -> Self {
        let chunk_size = config.chunk_size.max(1);
        // Overlap must leave room for forward progress.
        let chunk_overlap = config.chunk_overlap.min(chunk_size.saturating_sub(1));
        Self {
            chunk_size,
            chunk_overlap,
        }
    }

    pub fn split(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }

        let graphemes: Vec<&str> = text.graphemes(true).collect();
        if graphemes.len() <= self.chunk_size {
            return vec![text.to_string()];
        }

        let mut chunks = Vec::new();
        let mut start = 0usize;

        loop {
            let hard_end = (start + self.chunk_size).min(graphemes.len());
            if hard_end == graphemes.len() {
                chunks.push(graphemes[start..].concat());
                break;
            }

            let end = self.break_point(&graphemes, start, hard_end);
            chunks.push(graphemes[start..end].concat());

            // Step back by the overlap so consecutive chunks share
            // exactly that many graphemes. break_point guarantees the
            // window start still advances.
            start = end - self.chunk_overlap;
        }

        chunks
    }

    /// Pick the cut index in `(lo, hard_end]` for the window starting
    /// at `start`. The search floor keeps every chunk longer than the
    /// overlap, so the next window always begins past this one's
    /// start.
    fn break_point(&self, graphemes: &[&str], start: usize, hard_end: usize) -> usize {
        let lo = start + self.chunk_overlap + 1;
        if lo >= hard_end {
            return hard_end;
        }

        // Paragraph boundary: blank line, separator stays with the
        // preceding chunk.
        for i in (lo..hard_end.saturating_sub(1)).rev() {
            if is_newline(graphemes[i]) && is_newline(graphemes[i + 1]) {
                return i + 2;
            }
        }

        // Sentence boundary: terminal punctuation followed by
        // whitespace, or a single line break.
        for i in (lo..hard_end).rev() {
            if is_newline(graphemes[i]) {
                return i + 1;
            }
            if i + 1 < hard_end
                && matches!(graphemes[i], "." | "!" | "?")
                && is_whitespace(graphemes[i + 1])
            {
                return i + 2;
            }
        }

        // Any whitespace.
        for i in (lo..hard_end).rev() {
            if is_whitespace(graphemes[i]) {
                return i + 1;
            }
        }

        hard_end
    }
}

fn is_newline(grapheme: &str) -> bool {
    matches!(grapheme, "\n" | "\r\n" | "\r")
}

fn is_whitespace(grapheme: &str) -> bool {
    grapheme.chars().all(char::is_whitespace) && !grapheme.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(chunk_size: usize, chunk_overlap: usize) -> ChunkingPolicy {
        ChunkingPolicy::new(&ProcessingConfig {
            chunk_size,
            chunk_overlap,
        })
    }

    fn grapheme_count(s: &str) -> usize {
        s.graphemes(true).count()
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        assert!(policy(100, 20).split("").is_empty());
    }

    #[test]
    fn short_text_is_a_single_chunk() {
        let text = "Experienced in Python and Docker, led team of 5";
        let chunks = policy(1000, 200).split(text);
        assert_eq!(chunks, vec![text.to_string()]);
    }

    #[test]
    fn splitting_is_deterministic() {
        let text = "First sentence. Second sentence. Third sentence. ".repeat(40);
        let p = policy(100, 20);
        assert_eq!(p.split(&text), p.split(&text));
    }

    #[test]
    fn no_chunk_exceeds_the_configured_size() {
        let text = "word ".repeat(500);
        let chunks = policy(80, 16).split(&text);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(grapheme_count(chunk) <= 80, "oversized chunk: {chunk:?}");
        }
    }

    #[test]
    fn consecutive_chunks_share_exactly_the_overlap() {
        let text = "alpha beta gamma delta epsilon zeta eta theta ".repeat(30);
        let overlap = 10;
        let chunks = policy(60, overlap).split(&text);
        assert!(chunks.len() > 2);

        for pair in chunks.windows(2) {
            let prev: Vec<&str> = pair[0].graphemes(true).collect();
            let next: Vec<&str> = pair[1].graphemes(true).collect();
            let shared = prev[prev.len() - overlap..].concat();
            assert_eq!(next[..overlap].concat(), shared);
        }
    }

    #[test]
    fn overlap_stripped_concatenation_reconstructs_the_text() {
        let text = "Built APIs in Rust. Deployed with Docker.\n\nMentored juniors. ".repeat(20);
        let overlap = 12;
        let chunks = policy(90, overlap).split(&text);

        let mut rebuilt = chunks[0].clone();
        for chunk in &chunks[1..] {
            let graphemes: Vec<&str> = chunk.graphemes(true).collect();
            rebuilt.push_str(&graphemes[overlap..].concat());
        }
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn prefers_paragraph_breaks() {
        let first = "Summary of experience across several roles and stacks.";
        let text = format!("{first}\n\n{}", "More detail here. ".repeat(20));
        let chunks = policy(80, 10).split(&text);

        assert_eq!(chunks[0], format!("{first}\n\n"));
    }

    #[test]
    fn prefers_sentence_breaks_over_hard_cuts() {
        let text = "One short sentence here. Another short sentence follows. ".repeat(10);
        let chunks = policy(70, 10).split(&text);

        for chunk in &chunks[..chunks.len() - 1] {
            assert!(
                chunk.ends_with(". ") || chunk.ends_with(' '),
                "chunk did not break at a natural boundary: {chunk:?}"
            );
        }
    }

    #[test]
    fn hard_cut_when_no_boundary_exists() {
        let text = "x".repeat(300);
        let chunks = policy(100, 10).split(&text);
        assert!(chunks.len() > 1);
        assert_eq!(grapheme_count(&chunks[0]), 100);
    }

    #[test]
    fn multibyte_text_never_panics() {
        let text = "日本語のテキスト。スキルはたくさんある。 ".repeat(50);
        let chunks = policy(40, 8).split(&text);
        assert!(!chunks.is_empty());
        for chunk in &chunks {
            assert!(grapheme_count(chunk) <= 40);
        }
    }
}
