//! Adaptive typography: font-size fitting, greedy word-wrap and
//! letter-spaced advance computation.
//!
//! The algorithms are pure over a caller-supplied measurement function so
//! they can be exercised without a live font stack; the compositor passes
//! the surface's `measure_text` with the font set for every call.

/// Starting font size for the recipient name.
pub const NAME_MAX_SIZE: f32 = 90.0;
/// Hard floor for the recipient name font size.
pub const NAME_MIN_SIZE: f32 = 42.0;
/// Step by which the name size shrinks per iteration.
pub const NAME_SIZE_STEP: f32 = 2.0;

/// Shrink from [`NAME_MAX_SIZE`] in [`NAME_SIZE_STEP`] decrements while
/// the measured width exceeds `max_width`, stopping at the first size
/// that fits or at [`NAME_MIN_SIZE`], whichever comes first.
pub fn fit_size(mut measure: impl FnMut(&str, f32) -> f64, text: &str, max_width: f64) -> f32 {
    let mut size = NAME_MAX_SIZE;
    while size > NAME_MIN_SIZE && measure(text, size) > max_width {
        size -= NAME_SIZE_STEP;
    }
    size.max(NAME_MIN_SIZE)
}

/// One character of a letter-spaced run and its measured glyph width.
#[derive(Clone, Debug, PartialEq)]
pub struct LetterSlot {
    pub ch: String,
    pub width: f64,
}

/// Per-character advance slots for a letter-spaced run.
///
/// Each slot's advance is the measured glyph width plus `spacing`; the
/// returned total drops the one trailing spacing unit so the run can be
/// pre-centered from its true width.
pub fn letter_slots(
    mut measure: impl FnMut(&str) -> f64,
    text: &str,
    spacing: f64,
) -> (Vec<LetterSlot>, f64) {
    let mut slots = Vec::new();
    let mut total = 0.0;
    for ch in text.chars() {
        let s = ch.to_string();
        let width = measure(&s);
        total += width + spacing;
        slots.push(LetterSlot { ch: s, width });
    }
    if !slots.is_empty() {
        total -= spacing;
    }
    (slots, total)
}

/// Greedy word-wrap: if the whole line fits it is returned unmodified;
/// otherwise words accumulate until the next one would overflow, at which
/// point the line flushes and the word starts a new one.
pub fn wrap_greedy(mut measure: impl FnMut(&str) -> f64, text: &str, max_width: f64) -> Vec<String> {
    if measure(text) <= max_width {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if !current.is_empty() && measure(&candidate) > max_width {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    // Deterministic stand-in for real text measurement: width scales with
    // character count and font size.
    fn fake_width(text: &str, size: f32) -> f64 {
        text.chars().count() as f64 * f64::from(size) * 0.6
    }

    #[test]
    fn one_char_name_keeps_max_size() {
        let mut sizes = Vec::new();
        let fitted = fit_size(
            |t, s| {
                sizes.push(s);
                fake_width(t, s)
            },
            "A",
            740.0,
        );
        assert_eq!(fitted, NAME_MAX_SIZE);
        assert_eq!(sizes, vec![NAME_MAX_SIZE]);
    }

    #[test]
    fn long_name_shrinks_monotonically_to_floor() {
        let name: String = std::iter::repeat('x').take(60).collect();
        let mut sizes = Vec::new();
        let fitted = fit_size(
            |t, s| {
                sizes.push(s);
                fake_width(t, s)
            },
            &name,
            740.0,
        );
        // 36 * size never fits in 740 above the floor.
        assert_eq!(fitted, NAME_MIN_SIZE);
        for pair in sizes.windows(2) {
            assert!(pair[1] < pair[0]);
        }
    }

    #[test]
    fn shrink_stops_at_first_fitting_size() {
        let name: String = std::iter::repeat('x').take(20).collect();
        let max_width = 800.0;
        let fitted = fit_size(fake_width, &name, max_width);
        assert!(fitted > NAME_MIN_SIZE && fitted < NAME_MAX_SIZE);
        assert!(fake_width(&name, fitted) <= max_width);
        assert!(fake_width(&name, fitted + NAME_SIZE_STEP) > max_width);
    }

    #[test]
    fn letter_slots_total_drops_trailing_spacing() {
        let (slots, total) = letter_slots(|s| fake_width(s, 10.0), "ABC", 5.0);
        assert_eq!(slots.len(), 3);
        let glyphs: f64 = slots.iter().map(|s| s.width).sum();
        assert!((total - (glyphs + 2.0 * 5.0)).abs() < 1e-9);

        let (slots, total) = letter_slots(|s| fake_width(s, 10.0), "", 5.0);
        assert!(slots.is_empty());
        assert_eq!(total, 0.0);
    }

    #[test]
    fn short_line_is_returned_unmodified() {
        let lines = wrap_greedy(|t| fake_width(t, 24.0), "short line", 1000.0);
        assert_eq!(lines, vec!["short line".to_string()]);
    }

    #[test]
    fn long_line_wraps_preserving_words() {
        let text = "the quick brown fox jumps over the lazy dog again and again";
        let max_width = 200.0;
        let lines = wrap_greedy(|t| fake_width(t, 24.0), text, max_width);
        assert!(lines.len() >= 2);
        for line in &lines {
            assert!(fake_width(line, 24.0) <= max_width, "overflowing line: {line:?}");
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn oversized_single_word_gets_its_own_line() {
        let text = "tiny incomprehensibilities word";
        let lines = wrap_greedy(|t| fake_width(t, 24.0), text, 220.0);
        assert!(lines.contains(&"incomprehensibilities".to_string()));
        assert_eq!(lines.join(" "), text);
    }
}
