//! Line-break reallocation for translated text.
//!
//! A translated block arrives as a single line, but the client renders
//! it over the source block's bounding box. To keep the overlay
//! believable, the translation is re-split into lines whose lengths
//! track the proportional lengths of the source lines, scaled by the
//! language pair's average length ratio. This is a greedy line fill,
//! not an optimal word wrap: no raggedness minimisation, no hyphenation,
//! no look-ahead.

pub const DEFAULT_TOLERANCE: usize = 4;

/// Redistributes the words of `translation` over a new set of lines
/// shaped like the lines of `source`.
///
/// Each output line is filled while the accumulated word length stays
/// under the current source line's scaled length plus `tolerance`;
/// joining spaces are not counted. Once every source line has been
/// consumed, remaining lines are budgeted against the longest source
/// line. An empty `translation` yields a single empty line.
pub fn reallocate(translation: &str, source: &str, length_ratio: f64, tolerance: usize) -> String {
    let source_lines = source
        .trim()
        .split('\n')
        .map(str::trim)
        .collect::<Vec<_>>();
    let scaled = |line: &str| (line.chars().count() as f64 * length_ratio).round() as usize;
    let longest = source_lines
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);

    let mut line_id = 0;
    let mut budget = scaled(source_lines[0]);
    let mut output = Vec::new();
    let mut line_words: Vec<&str> = Vec::new();
    let mut line_len = 0usize;

    for word in translation.split(' ') {
        let word_len = word.chars().count();
        if line_len + word_len < budget + tolerance {
            line_words.push(word);
            line_len += word_len;
        } else {
            output.push(line_words.join(" "));
            line_words = vec![word];
            line_len = word_len;
            if line_id < source_lines.len() - 1 {
                line_id += 1;
                budget = scaled(source_lines[line_id]);
            } else {
                // Source lines exhausted: every further line gets the
                // longest source line's scaled length.
                budget = (longest as f64 * length_ratio).round() as usize;
            }
        }
    }
    if !line_words.is_empty() {
        output.push(line_words.join(" "));
    }
    output.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_words_and_tracks_source_lines() {
        let source = "abcde\nfgh";
        let translation = "one two three four";
        let output = reallocate(translation, source, 1.0, DEFAULT_TOLERANCE);

        let lines = output.split('\n').collect::<Vec<_>>();
        assert!(lines.len() >= 2, "expected overflow into source line count");
        assert_eq!(output.replace('\n', " "), translation);
    }

    #[test]
    fn single_source_line_reuses_longest_budget() {
        let output = reallocate("aaaa bbbb cccc dddd", "abcdef", 1.0, 0);
        // Budget is 6 for every line: one word fits, two do not.
        assert_eq!(output, "aaaa\nbbbb\ncccc\ndddd");
    }

    #[test]
    fn empty_translation_is_a_single_empty_line() {
        assert_eq!(reallocate("", "ab\ncd", 1.0, DEFAULT_TOLERANCE), "");
    }

    #[test]
    fn length_ratio_scales_budgets() {
        // Ratio 2.0 doubles the first budget (4 -> 8), so both words fit.
        assert_eq!(reallocate("abc def", "abcd\nef", 2.0, 0), "abc def");
        // Neutral ratio overflows after the first word.
        assert_eq!(reallocate("abc def", "abcd\nef", 1.0, 0), "abc\ndef");
    }

    #[test]
    fn counts_characters_not_bytes() {
        // Four two-byte characters still fit a budget of 5.
        assert_eq!(reallocate("éééé zz", "abcde\nxx", 1.0, 0), "éééé\nzz");
    }
}
