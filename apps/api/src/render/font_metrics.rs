//! Static font-metric tables for the two builtin PDF fonts the renderer
//! uses (Helvetica and Helvetica-Bold).
//!
//! Character widths are in em units (relative to font size), taken from the
//! standard-14 AFM advance widths. Static tables are an intentional
//! approximation: they drive word-wrap and pagination decisions, not exact
//! glyph placement, and the viewer's own metrics absorb sub-percent error.
//! Both tables cover ASCII 0x20..=0x7E (95 printable characters).
//! Index = (char as usize) - 32.

/// The two font faces available to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFace {
    Helvetica,
    HelveticaBold,
}

/// Static character-width table for a font face.
///
/// All widths are in em units at 1em (i.e., at the configured font size).
/// `widths[i]` = width of ASCII character `(i + 32)`, covering 0x20 (space)
/// through 0x7E (~). Non-ASCII characters fall back to `average_char_width`.
pub struct FontMetricTable {
    pub face: FontFace,
    widths: [f32; 95],
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    /// Measures the rendered width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    self.widths[code - 32]
                } else {
                    self.average_char_width
                }
            })
            .sum()
    }

    /// Greedy word-wrap of `text` into lines no wider than `max_width_em`.
    ///
    /// A word wider than the full line still gets a line of its own —
    /// wrapping never splits inside a word. Empty/whitespace-only input
    /// yields no lines.
    pub fn wrap_words(&self, text: &str, max_width_em: f32) -> Vec<String> {
        let words: Vec<&str> = text.split_whitespace().collect();
        if words.is_empty() {
            return vec![];
        }

        let mut lines: Vec<String> = Vec::new();
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in &words {
            let word_w = self.measure_str(word);

            if !current.is_empty() && current_width + self.space_width + word_w > max_width_em {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_w;
            } else {
                if !current.is_empty() {
                    current.push(' ');
                    current_width += self.space_width;
                }
                current.push_str(word);
                current_width += word_w;
            }
        }
        lines.push(current);
        lines
    }
}

/// Helvetica — standard-14 regular face. Widths from the Adobe AFM, /1000.
static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    face: FontFace::Helvetica,
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
        // {      |      }      ~
        0.334, 0.260, 0.334, 0.584,
    ],
    average_char_width: 0.536,
    space_width: 0.278,
};

/// Helvetica-Bold — standard-14 bold face. Widths from the Adobe AFM, /1000.
static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    face: FontFace::HelveticaBold,
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.333, 0.474, 0.556, 0.556, 0.889, 0.722, 0.238, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.333, 0.333, 0.584, 0.584, 0.584, 0.611, 0.975,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.722, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.556, 0.722, 0.611, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.584, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.611, 0.556, 0.611, 0.556, 0.333, 0.611, 0.611, 0.278, 0.278, 0.556, 0.278, 0.889,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.611, 0.611, 0.611, 0.611, 0.389, 0.556, 0.333, 0.611, 0.556, 0.778, 0.556, 0.556, 0.500,
        // {      |      }      ~
        0.389, 0.280, 0.389, 0.584,
    ],
    average_char_width: 0.562,
    space_width: 0.278,
};

/// Returns the static metric table for a font face.
pub fn get_metrics(face: FontFace) -> &'static FontMetricTable {
    match face {
        FontFace::Helvetica => &HELVETICA_TABLE,
        FontFace::HelveticaBold => &HELVETICA_BOLD_TABLE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_str_empty_returns_zero() {
        assert_eq!(get_metrics(FontFace::Helvetica).measure_str(""), 0.0);
    }

    #[test]
    fn test_measure_str_known_word() {
        // "Rust" = R(0.722) + u(0.556) + s(0.500) + t(0.278) = 2.056
        let width = get_metrics(FontFace::Helvetica).measure_str("Rust");
        assert!(
            (width - 2.056).abs() < 1e-3,
            "Rust width should be ~2.056, got {width}"
        );
    }

    #[test]
    fn test_measure_str_non_ascii_falls_back() {
        let metrics = get_metrics(FontFace::Helvetica);
        let width = metrics.measure_str("é");
        assert!((width - metrics.average_char_width).abs() < 1e-4);
    }

    #[test]
    fn test_bold_is_wider_than_regular() {
        let text = "Professional Summary";
        let regular = get_metrics(FontFace::Helvetica).measure_str(text);
        let bold = get_metrics(FontFace::HelveticaBold).measure_str(text);
        assert!(bold > regular);
    }

    #[test]
    fn test_wrap_words_empty_input_no_lines() {
        let metrics = get_metrics(FontFace::Helvetica);
        assert!(metrics.wrap_words("", 40.0).is_empty());
        assert!(metrics.wrap_words("   ", 40.0).is_empty());
    }

    #[test]
    fn test_wrap_words_single_word_single_line() {
        let metrics = get_metrics(FontFace::Helvetica);
        assert_eq!(metrics.wrap_words("Rust", 40.0), vec!["Rust".to_string()]);
    }

    #[test]
    fn test_wrap_words_long_text_wraps() {
        let metrics = get_metrics(FontFace::Helvetica);
        let text = "word ".repeat(50);
        let lines = metrics.wrap_words(&text, 10.0);
        assert!(lines.len() > 1, "expected multiple lines, got {lines:?}");
        // Every line except possibly the last must actually fit
        for line in &lines[..lines.len() - 1] {
            assert!(metrics.measure_str(line) <= 10.0 + 1e-3);
        }
    }

    #[test]
    fn test_wrap_words_rejoining_lines_preserves_words() {
        let metrics = get_metrics(FontFace::Helvetica);
        let text = "Built and operated a fleet of forty production services";
        let lines = metrics.wrap_words(text, 8.0);
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn test_wrap_words_oversized_word_gets_own_line() {
        let metrics = get_metrics(FontFace::Helvetica);
        let lines = metrics.wrap_words("supercalifragilisticexpialidocious a", 2.0);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "supercalifragilisticexpialidocious");
    }
}
