//! Text cleaning and chunk splitting applied to extracted pages.

use once_cell::sync::Lazy;
use regex::Regex;

static RUNS_OF_SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").expect("static regex"));
static EXTRA_BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").expect("static regex"));

/// Minimal normalization for extracted text: unified newlines, collapsed
/// space runs, at most one blank line in a row, trimmed edges.
pub fn normalize_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");
    let collapsed = RUNS_OF_SPACES.replace_all(&unified, " ");
    let limited = EXTRA_BLANK_LINES.replace_all(&collapsed, "\n\n");
    limited.trim().to_string()
}

/// Splits text into chunks at most `chunk_size` characters, preferring
/// paragraph, then line, then word boundaries, and carrying the last
/// `overlap` characters of each chunk into the next one.
///
/// The bound is soft: a carried overlap tail plus the next piece may exceed
/// it slightly, and multi-byte characters are never split.
pub fn split_text(text: &str, chunk_size: usize, overlap: usize) -> Vec<String> {
    let chunk_size = chunk_size.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    // True while `current` holds nothing beyond the overlap carried over
    // from the previous chunk; overlap-only chunks must never be emitted.
    let mut carry_only = true;

    for paragraph in text.split("\n\n").map(str::trim).filter(|s| !s.is_empty()) {
        for piece in break_down(paragraph, chunk_size) {
            let joined = current.len() + piece.len() + if current.is_empty() { 0 } else { 2 };
            if !carry_only && joined > chunk_size {
                let tail = overlap_tail(&current, overlap);
                chunks.push(std::mem::take(&mut current));
                current = tail;
                carry_only = true;
            }
            if !current.is_empty() {
                current.push_str("\n\n");
            }
            current.push_str(&piece);
            carry_only = false;
        }
    }

    if !current.is_empty() && !carry_only {
        chunks.push(current);
    }
    chunks
}

/// Breaks one oversized paragraph into pieces no longer than `chunk_size`,
/// splitting on lines, then words, then raw characters as a last resort.
fn break_down(paragraph: &str, chunk_size: usize) -> Vec<String> {
    if paragraph.len() <= chunk_size {
        return vec![paragraph.to_string()];
    }

    let mut pieces = Vec::new();
    for line in paragraph.split('\n').map(str::trim).filter(|s| !s.is_empty()) {
        if line.len() <= chunk_size {
            pieces.push(line.to_string());
            continue;
        }

        let mut piece = String::new();
        for word in line.split_whitespace() {
            if word.len() > chunk_size {
                if !piece.is_empty() {
                    pieces.push(std::mem::take(&mut piece));
                }
                pieces.extend(hard_split(word, chunk_size));
                continue;
            }
            if !piece.is_empty() && piece.len() + word.len() + 1 > chunk_size {
                pieces.push(std::mem::take(&mut piece));
            }
            if !piece.is_empty() {
                piece.push(' ');
            }
            piece.push_str(word);
        }
        if !piece.is_empty() {
            pieces.push(piece);
        }
    }
    pieces
}

fn hard_split(word: &str, chunk_size: usize) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    chars
        .chunks(chunk_size)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// Last `overlap` bytes of `s`, widened to the nearest char boundary.
fn overlap_tail(s: &str, overlap: usize) -> String {
    if overlap == 0 {
        return String::new();
    }
    if s.len() <= overlap {
        return s.to_string();
    }
    let mut start = s.len() - overlap;
    while !s.is_char_boundary(start) {
        start += 1;
    }
    s[start..].to_string()
}
