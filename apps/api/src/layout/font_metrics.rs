//! Static font-metric tables for the two PDF standard-14 faces the resume uses.
//!
//! Widths come from the Adobe AFM files for Helvetica and Helvetica-Bold and are
//! stored in em units (AFM value / 1000). The standard fonts are never embedded,
//! so every viewer renders them with these exact advance widths and the wrap
//! computed here matches what ends up on the page.
//!
//! Tables are indexed by the `WinAnsiEncoding` byte the PDF draws, covering
//! 0x20..=0xFF. Index = byte - 0x20. Characters are mapped through the same
//! encoder the PDF writer uses, so a character that renders as `?` is measured
//! as `?`.

use serde::{Deserialize, Serialize};

use crate::layout::pdf::win_ansi_byte;

// ────────────────────────────────────────────────────────────────────────────
// Font enum
// ────────────────────────────────────────────────────────────────────────────

/// The standard PDF fonts used by the document formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoreFont {
    /// Body text.
    Helvetica,
    /// Header and section titles.
    HelveticaBold,
}

impl CoreFont {
    /// The `BaseFont` name written into the PDF font dictionary.
    pub fn base_font(&self) -> &'static str {
        match self {
            CoreFont::Helvetica => "Helvetica",
            CoreFont::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Resource name the content streams use to select this font.
    pub fn resource_name(&self) -> &'static str {
        match self {
            CoreFont::Helvetica => "F1",
            CoreFont::HelveticaBold => "F2",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

const FIRST_CODE: u8 = 0x20;
const TABLE_LEN: usize = 0x100 - FIRST_CODE as usize;

/// Static character-width table for a font, one slot per WinAnsi byte
/// from 0x20 to 0xFF.
pub struct FontMetricTable {
    widths: [f32; TABLE_LEN],
    pub space_width: f32,
}

impl FontMetricTable {
    /// Measures the rendered width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| self.char_width(c)).sum()
    }

    fn char_width(&self, c: char) -> f32 {
        match win_ansi_byte(c) {
            // Control bytes have no glyph of their own.
            code if code < FIRST_CODE => self.space_width,
            code => self.widths[(code - FIRST_CODE) as usize],
        }
    }

    /// Greedy word-wrap of a single paragraph (no `\n` inside) at `max_width_em`.
    ///
    /// Words are separated by spaces. Leading spaces are kept as indentation on
    /// the first line. A word wider than a whole line is broken between
    /// characters. An empty or all-space paragraph yields one empty line, so
    /// blank lines in the input keep their vertical space.
    pub fn wrap_paragraph(&self, text: &str, max_width_em: f32) -> Vec<String> {
        let body = text.trim_start_matches(' ');
        if body.trim_end_matches(' ').is_empty() {
            return vec![String::new()];
        }

        let indent = &text[..text.len() - body.len()];
        let indent_width = self.measure_str(indent);
        let (mut current, mut current_width) = if indent_width < max_width_em {
            (indent.to_string(), indent_width)
        } else {
            (String::new(), 0.0)
        };
        let mut has_word = false;
        let mut lines = Vec::new();

        for word in body.split(' ').filter(|w| !w.is_empty()) {
            let word_w = self.measure_str(word);
            let space_w = if has_word { self.space_width } else { 0.0 };

            if current_width + space_w + word_w <= max_width_em {
                if has_word {
                    current.push(' ');
                }
                current.push_str(word);
                current_width += space_w + word_w;
                has_word = true;
                continue;
            }

            if has_word {
                lines.push(std::mem::take(&mut current));
            } else {
                // Indentation alone leaves no room for the first word.
                current.clear();
            }
            current_width = 0.0;

            if word_w <= max_width_em {
                current.push_str(word);
                current_width = word_w;
                has_word = true;
                continue;
            }

            // Word alone overflows a line: break it by character.
            for c in word.chars() {
                let w = self.char_width(c);
                if current_width + w > max_width_em && !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0.0;
                }
                current.push(c);
                current_width += w;
            }
            has_word = !current.is_empty();
        }

        if !current.is_empty() || lines.is_empty() {
            lines.push(current);
        }
        lines
    }

    /// Wraps multi-line text: explicit newlines always start a new line,
    /// each resulting paragraph is word-wrapped independently.
    pub fn wrap_text(&self, text: &str, max_width_em: f32) -> Vec<String> {
        text.split('\n')
            .map(|p| p.trim_end_matches('\r'))
            .flat_map(|p| self.wrap_paragraph(p, max_width_em))
            .collect()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (WinAnsi 0x20..=0xFF)
// ────────────────────────────────────────────────────────────────────────────

/// Helvetica, regular weight.
static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9      :      ;      <      =      >      ?
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.278, 0.278, 0.584, 0.584, 0.584, 0.556,
        // @      A      B      C      D      E      F      G      H      I      J      K      L      M      N      O
        1.015, 0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833, 0.722, 0.778,
        // P      Q      R      S      T      U      V      W      X      Y      Z      [      \      ]      ^      _
        0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611, 0.278, 0.278, 0.278, 0.469, 0.556,
        // `      a      b      c      d      e      f      g      h      i      j      k      l      m      n      o
        0.333, 0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833, 0.556, 0.556,
        // p      q      r      s      t      u      v      w      x      y      z      {      |      }      ~      del
        0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500, 0.334, 0.260, 0.334, 0.584, 0.350,
        // €      .      ‚      ƒ      „      …      †      ‡      ˆ      ‰      Š      ‹      Œ      .      Ž      .
        0.556, 0.350, 0.222, 0.556, 0.333, 1.000, 0.556, 0.556, 0.333, 1.000, 0.667, 0.333, 1.000, 0.350, 0.611, 0.350,
        // .      ‘      ’      “      ”      •      –      —      ˜      ™      š      ›      œ      .      ž      Ÿ
        0.350, 0.222, 0.222, 0.333, 0.333, 0.350, 0.556, 1.000, 0.333, 1.000, 0.500, 0.333, 0.944, 0.350, 0.500, 0.667,
        // nbsp   ¡      ¢      £      ¤      ¥      ¦      §      ¨      ©      ª      «      ¬      shy    ®      ¯
        0.278, 0.333, 0.556, 0.556, 0.556, 0.556, 0.260, 0.556, 0.333, 0.737, 0.370, 0.556, 0.584, 0.333, 0.737, 0.333,
        // °      ±      ²      ³      ´      µ      ¶      ·      ¸      ¹      º      »      ¼      ½      ¾      ¿
        0.400, 0.584, 0.333, 0.333, 0.333, 0.556, 0.537, 0.278, 0.333, 0.333, 0.365, 0.556, 0.834, 0.834, 0.834, 0.611,
        // À      Á      Â      Ã      Ä      Å      Æ      Ç      È      É      Ê      Ë      Ì      Í      Î      Ï
        0.667, 0.667, 0.667, 0.667, 0.667, 0.667, 1.000, 0.722, 0.667, 0.667, 0.667, 0.667, 0.278, 0.278, 0.278, 0.278,
        // Ð      Ñ      Ò      Ó      Ô      Õ      Ö      ×      Ø      Ù      Ú      Û      Ü      Ý      Þ      ß
        0.722, 0.722, 0.778, 0.778, 0.778, 0.778, 0.778, 0.584, 0.778, 0.722, 0.722, 0.722, 0.722, 0.667, 0.667, 0.611,
        // à      á      â      ã      ä      å      æ      ç      è      é      ê      ë      ì      í      î      ï
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.889, 0.500, 0.556, 0.556, 0.556, 0.556, 0.278, 0.278, 0.278, 0.278,
        // ð      ñ      ò      ó      ô      õ      ö      ÷      ø      ù      ú      û      ü      ý      þ      ÿ
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.584, 0.611, 0.556, 0.556, 0.556, 0.556, 0.500, 0.556, 0.500,
    ],
    space_width: 0.278,
};

/// Helvetica-Bold.
static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.333, 0.474, 0.556, 0.556, 0.889, 0.722, 0.238, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9      :      ;      <      =      >      ?
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.333, 0.333, 0.584, 0.584, 0.584, 0.611,
        // @      A      B      C      D      E      F      G      H      I      J      K      L      M      N      O
        0.975, 0.722, 0.722, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.556, 0.722, 0.611, 0.833, 0.722, 0.778,
        // P      Q      R      S      T      U      V      W      X      Y      Z      [      \      ]      ^      _
        0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611, 0.333, 0.278, 0.333, 0.584, 0.556,
        // `      a      b      c      d      e      f      g      h      i      j      k      l      m      n      o
        0.333, 0.556, 0.611, 0.556, 0.611, 0.556, 0.333, 0.611, 0.611, 0.278, 0.278, 0.556, 0.278, 0.889, 0.611, 0.611,
        // p      q      r      s      t      u      v      w      x      y      z      {      |      }      ~      del
        0.611, 0.611, 0.389, 0.556, 0.333, 0.611, 0.556, 0.778, 0.556, 0.556, 0.500, 0.389, 0.280, 0.389, 0.584, 0.350,
        // €      .      ‚      ƒ      „      …      †      ‡      ˆ      ‰      Š      ‹      Œ      .      Ž      .
        0.556, 0.350, 0.278, 0.556, 0.500, 1.000, 0.556, 0.556, 0.333, 1.000, 0.667, 0.333, 1.000, 0.350, 0.611, 0.350,
        // .      ‘      ’      “      ”      •      –      —      ˜      ™      š      ›      œ      .      ž      Ÿ
        0.350, 0.278, 0.278, 0.500, 0.500, 0.350, 0.556, 1.000, 0.333, 1.000, 0.556, 0.333, 0.944, 0.350, 0.500, 0.667,
        // nbsp   ¡      ¢      £      ¤      ¥      ¦      §      ¨      ©      ª      «      ¬      shy    ®      ¯
        0.278, 0.333, 0.556, 0.556, 0.556, 0.556, 0.280, 0.556, 0.333, 0.737, 0.370, 0.556, 0.584, 0.333, 0.737, 0.333,
        // °      ±      ²      ³      ´      µ      ¶      ·      ¸      ¹      º      »      ¼      ½      ¾      ¿
        0.400, 0.584, 0.333, 0.333, 0.333, 0.611, 0.556, 0.278, 0.333, 0.333, 0.365, 0.556, 0.834, 0.834, 0.834, 0.611,
        // À      Á      Â      Ã      Ä      Å      Æ      Ç      È      É      Ê      Ë      Ì      Í      Î      Ï
        0.722, 0.722, 0.722, 0.722, 0.722, 0.722, 1.000, 0.722, 0.667, 0.667, 0.667, 0.667, 0.278, 0.278, 0.278, 0.278,
        // Ð      Ñ      Ò      Ó      Ô      Õ      Ö      ×      Ø      Ù      Ú      Û      Ü      Ý      Þ      ß
        0.722, 0.722, 0.778, 0.778, 0.778, 0.778, 0.778, 0.584, 0.778, 0.722, 0.722, 0.722, 0.722, 0.667, 0.667, 0.611,
        // à      á      â      ã      ä      å      æ      ç      è      é      ê      ë      ì      í      î      ï
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.889, 0.556, 0.556, 0.556, 0.556, 0.556, 0.278, 0.278, 0.278, 0.278,
        // ð      ñ      ò      ó      ô      õ      ö      ÷      ø      ù      ú      û      ü      ý      þ      ÿ
        0.611, 0.611, 0.611, 0.611, 0.611, 0.611, 0.611, 0.584, 0.611, 0.611, 0.611, 0.611, 0.611, 0.556, 0.611, 0.556,
    ],
    space_width: 0.278,
};

/// Returns the static metric table for a given font.
pub fn get_metrics(font: &CoreFont) -> &'static FontMetricTable {
    match font {
        CoreFont::Helvetica => &HELVETICA_TABLE,
        CoreFont::HelveticaBold => &HELVETICA_BOLD_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
