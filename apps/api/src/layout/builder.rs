//! Document builder and page-flow layout.
//!
//! `DocumentBuilder` only accumulates styled blocks. `layout` walks them once,
//! word-wraps every block with the static font metrics and assigns each line a
//! position, starting a new page whenever the next line would cross the
//! bottom margin. No renderer state survives between calls.

use serde::{Deserialize, Serialize};

use crate::layout::blocks::DocumentBlock;
use crate::layout::font_metrics::{get_metrics, CoreFont};
use crate::layout::page::{Align, BlockStyle, PageConfig, Rgb};

/// Baseline offset below the vertical centre of a line, as a fraction of the font size.
const BASELINE_FACTOR: f32 = 0.3;

/// A block of text with the style it is drawn in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyledBlock {
    pub text: String,
    pub style: BlockStyle,
}

/// One line of text at its final position. Coordinates are millimetres from the
/// top-left corner of the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedLine {
    pub text: String,
    pub x_mm: f32,
    pub baseline_mm: f32,
    pub font: CoreFont,
    pub font_size_pt: f32,
    pub color: Rgb,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LaidOutPage {
    pub lines: Vec<PlacedLine>,
}

/// Accumulates the styled blocks of one document.
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    config: PageConfig,
    blocks: Vec<StyledBlock>,
}

impl DocumentBuilder {
    pub fn new(config: PageConfig) -> Self {
        Self {
            config,
            blocks: Vec::new(),
        }
    }

    /// Appends the centered document header.
    pub fn header(mut self, text: &str) -> Self {
        self.blocks.push(StyledBlock {
            text: text.to_string(),
            style: BlockStyle::header(),
        });
        self
    }

    /// Appends one classified block in its title or body style.
    pub fn block(mut self, block: &DocumentBlock) -> Self {
        let style = if block.is_title() {
            BlockStyle::title()
        } else {
            BlockStyle::body()
        };
        self.blocks.push(StyledBlock {
            text: block.text().to_string(),
            style,
        });
        self
    }

    pub fn blocks<'a>(self, blocks: impl IntoIterator<Item = &'a DocumentBlock>) -> Self {
        blocks.into_iter().fold(self, |builder, b| builder.block(b))
    }

    #[cfg(test)]
    pub fn styled_blocks(&self) -> &[StyledBlock] {
        &self.blocks
    }

    /// Lays every block out into pages. Always returns at least one page.
    pub fn layout(&self) -> Vec<LaidOutPage> {
        let config = &self.config;
        let content_width = config.content_width_mm();
        let threshold = config.break_threshold_mm();

        let mut pages = Vec::new();
        let mut current = LaidOutPage::default();
        let mut y = config.margin_top_mm;

        for block in &self.blocks {
            let style = &block.style;
            let metrics = get_metrics(&style.font);
            let size_mm = style.font_size_mm();
            let max_width_em = (content_width - 2.0 * config.cell_padding_mm) / size_mm;

            for line in metrics.wrap_text(&block.text, max_width_em) {
                if y + style.line_height_mm > threshold && y > config.margin_top_mm {
                    pages.push(std::mem::take(&mut current));
                    y = config.margin_top_mm;
                }

                if !line.is_empty() {
                    let width_mm = metrics.measure_str(&line) * size_mm;
                    let x_mm = match style.align {
                        Align::Left => config.margin_left_mm + config.cell_padding_mm,
                        Align::Center => config.margin_left_mm + (content_width - width_mm) / 2.0,
                    };
                    current.lines.push(PlacedLine {
                        text: line,
                        x_mm,
                        baseline_mm: y + style.line_height_mm / 2.0 + BASELINE_FACTOR * size_mm,
                        font: style.font,
                        font_size_pt: style.font_size_pt,
                        color: style.color,
                    });
                }

                y += style.line_height_mm;
            }

            y += style.space_after_mm;
        }

        pages.push(current);
        pages
    }
}
