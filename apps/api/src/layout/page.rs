//! Page geometry and block styles for the resume document.
//!
//! All lengths are millimetres; font sizes are points. The PDF writer converts
//! to points with [`PT_PER_MM`].

use serde::{Deserialize, Serialize};

use crate::layout::font_metrics::CoreFont;

/// PDF user-space points per millimetre.
pub const PT_PER_MM: f32 = 72.0 / 25.4;

/// Page layout parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub margin_left_mm: f32,
    pub margin_right_mm: f32,
    pub margin_top_mm: f32,
    /// Content never starts a line whose bottom would pass `page_height - margin_bottom`.
    pub margin_bottom_mm: f32,
    /// Horizontal padding inside every cell.
    pub cell_padding_mm: f32,
}

impl PageConfig {
    /// Width between the left and right margins.
    pub fn content_width_mm(&self) -> f32 {
        self.page_width_mm - self.margin_left_mm - self.margin_right_mm
    }

    /// Lowest y (from the top of the page) any line may reach.
    pub fn break_threshold_mm(&self) -> f32 {
        self.page_height_mm - self.margin_bottom_mm
    }
}

impl Default for PageConfig {
    /// A4 portrait, 20 mm side margins, 10 mm top margin, page break 15 mm from the bottom.
    fn default() -> Self {
        Self {
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            margin_left_mm: 20.0,
            margin_right_mm: 20.0,
            margin_top_mm: 10.0,
            margin_bottom_mm: 15.0,
            cell_padding_mm: 1.0,
        }
    }
}

/// RGB colour, 0–255 per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const HEADING_BLUE: Rgb = Rgb(0, 102, 204);

    /// Channels scaled to the 0.0–1.0 range PDF colour operators expect.
    pub fn unit(&self) -> [f32; 3] {
        [
            self.0 as f32 / 255.0,
            self.1 as f32 / 255.0,
            self.2 as f32 / 255.0,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Align {
    Left,
    Center,
}

/// How one kind of block is drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockStyle {
    pub font: CoreFont,
    pub font_size_pt: f32,
    pub color: Rgb,
    pub align: Align,
    /// Height of every line the block occupies.
    pub line_height_mm: f32,
    /// Vertical gap inserted after the block.
    pub space_after_mm: f32,
}

impl BlockStyle {
    /// Font size converted to millimetres.
    pub fn font_size_mm(&self) -> f32 {
        self.font_size_pt / PT_PER_MM
    }

    /// The document header ("Resume").
    pub fn header() -> Self {
        Self {
            font: CoreFont::HelveticaBold,
            font_size_pt: 18.0,
            color: Rgb::BLACK,
            align: Align::Center,
            line_height_mm: 15.0,
            space_after_mm: 10.0,
        }
    }

    /// Section titles.
    pub fn title() -> Self {
        Self {
            font: CoreFont::HelveticaBold,
            font_size_pt: 14.0,
            color: Rgb::HEADING_BLUE,
            align: Align::Left,
            line_height_mm: 10.0,
            space_after_mm: 5.0,
        }
    }

    /// Body content.
    pub fn body() -> Self {
        Self {
            font: CoreFont::Helvetica,
            font_size_pt: 12.0,
            color: Rgb::BLACK,
            align: Align::Left,
            line_height_mm: 10.0,
            space_after_mm: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_page_geometry() {
        let config = PageConfig::default();
        assert_eq!(config.content_width_mm(), 170.0);
        assert_eq!(config.break_threshold_mm(), 282.0);
    }

    #[test]
    fn test_heading_colour_in_unit_range() {
        let [r, g, b] = Rgb::HEADING_BLUE.unit();
        assert_eq!(r, 0.0);
        assert!((g - 0.4).abs() < 1e-6);
        assert!((b - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_block_styles() {
        let title = BlockStyle::title();
        assert_eq!(title.font, CoreFont::HelveticaBold);
        assert_eq!(title.font_size_pt, 14.0);
        assert_eq!(title.color, Rgb(0, 102, 204));
        assert_eq!(title.space_after_mm, 5.0);

        let body = BlockStyle::body();
        assert_eq!(body.font, CoreFont::Helvetica);
        assert_eq!(body.font_size_pt, 12.0);
        assert_eq!(body.color, Rgb::BLACK);

        let header = BlockStyle::header();
        assert_eq!(header.font_size_pt, 18.0);
        assert_eq!(header.align, Align::Center);
    }

    #[test]
    fn test_font_size_conversion() {
        // 72pt is one inch.
        let style = BlockStyle {
            font_size_pt: 72.0,
            ..BlockStyle::body()
        };
        assert!((style.font_size_mm() - 25.4).abs() < 1e-3);
    }
}
