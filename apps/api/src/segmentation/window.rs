//! Sliding-Window Fallback: fixed-size, overlapping windows snapped to boundaries.
//!
//! Used for whole documents with no detectable structure, and for single runs that
//! are longer than the maximum chunk size on their own.

/// Cuts `text` into overlapping windows of at most `window` chars.
///
/// When a window ends inside the text, its end moves back to just after the last
/// `.` or newline in the window, provided that point lies more than `min_chars`
/// past the window start. Windows whose trimmed text is shorter than `min_chars`
/// are skipped. The next window starts `overlap` chars before the previous end and
/// always at least one char later than the previous start. A start whose first
/// line `opens_section` accepts is moved back until it no longer is, so a window
/// never begins with something that reads as a section header.
pub fn window_texts(
    text: &str,
    window: usize,
    overlap: usize,
    min_chars: usize,
    opens_section: impl Fn(&str) -> bool,
) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();
    let window = window.max(1);
    let mut out = Vec::new();
    let mut start = 0usize;

    while start < len {
        let mut end = start + window;

        if end < len {
            let boundary = chars[start..end]
                .iter()
                .rposition(|c| matches!(c, '.' | '\n'))
                .map(|offset| start + offset);
            if let Some(boundary) = boundary {
                if boundary > start + min_chars {
                    end = boundary + 1;
                }
            }
        }

        let slice: String = chars[start..end.min(len)].iter().collect();
        let trimmed = slice.trim();
        if trimmed.chars().count() >= min_chars {
            out.push(trimmed.to_string());
        }

        let next = end.saturating_sub(overlap).max(start + 1);
        start = settle_start(&chars, next, start + 1, &opens_section);
    }

    out
}

/// Steps `start` back, never below `floor`, while the line it opens is a header.
fn settle_start(
    chars: &[char],
    mut start: usize,
    floor: usize,
    opens_section: &impl Fn(&str) -> bool,
) -> usize {
    while start > floor && start < chars.len() {
        let first_line: String = chars[start..].iter().take_while(|c| **c != '\n').collect();
        if !opens_section(first_line.trim()) {
            break;
        }
        start -= 1;
    }
    start
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_headers(_: &str) -> bool {
        false
    }

    #[test]
    fn test_empty_and_tiny_inputs() {
        assert!(window_texts("", 500, 50, 50, no_headers).is_empty());
        assert!(window_texts("short", 500, 50, 50, no_headers).is_empty());
    }

    #[test]
    fn test_single_window_when_text_fits() {
        let text = "a".repeat(300);
        let windows = window_texts(&text, 500, 50, 50, no_headers);
        assert_eq!(windows, vec![text]);
    }

    #[test]
    fn test_digits_without_boundaries_terminate() {
        let text = "7".repeat(10_000);
        let windows = window_texts(&text, 500, 50, 50, no_headers);
        // ceil((10000 - 50) / 450) = 23; the last one holds the final 100 chars.
        assert_eq!(windows.len(), 23);
        assert!(windows.iter().all(|w| w.chars().count() <= 500));
    }

    #[test]
    fn test_consecutive_windows_overlap() {
        let text: String = (0..1200).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
        let windows = window_texts(&text, 500, 50, 50, no_headers);
        assert_eq!(windows.len(), 3);
        for pair in windows.windows(2) {
            let tail: String = pair[0].chars().skip(450).collect();
            assert!(pair[1].starts_with(&tail));
        }
    }

    #[test]
    fn test_snaps_to_last_sentence_end() {
        let first = format!("{}.", "a".repeat(199));
        let text = format!("{first} {}", "b".repeat(600));
        let windows = window_texts(&text, 500, 50, 50, no_headers);
        assert_eq!(windows[0], first);
        assert!(windows[1].starts_with(&"a".repeat(49)));
    }

    #[test]
    fn test_boundary_too_close_to_start_is_ignored() {
        let text = format!("abc.{}", "z".repeat(700));
        let windows = window_texts(&text, 500, 50, 50, no_headers);
        assert_eq!(windows[0].chars().count(), 500);
    }

    #[test]
    fn test_multibyte_text_is_sliced_on_chars() {
        let text = "é".repeat(1200);
        let windows = window_texts(&text, 500, 50, 50, no_headers);
        assert!(windows.iter().all(|w| w.chars().count() <= 500));
        assert!(windows.len() >= 2);
    }

    #[test]
    fn test_window_never_starts_on_a_header() {
        let text = format!("{}skills {}", "a".repeat(450), "b".repeat(400));
        let plain = window_texts(&text, 500, 50, 50, no_headers);
        assert!(plain[1].starts_with("skills "));

        let windows = window_texts(&text, 500, 50, 50, |line| line.starts_with("skills"));
        assert_eq!(windows.len(), 2);
        assert!(windows[1].starts_with("askills "));
        assert!(windows.iter().all(|w| w.chars().count() <= 500));
    }

    #[test]
    fn test_progress_even_with_large_overlap() {
        let text = "x".repeat(120);
        let windows = window_texts(&text, 10, 50, 5, no_headers);
        assert!(!windows.is_empty());
    }
}
