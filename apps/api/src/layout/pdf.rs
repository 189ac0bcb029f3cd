//! Serializes laid-out pages into PDF bytes.
//!
//! Uses the standard-14 Helvetica faces with `WinAnsiEncoding`, so nothing is
//! embedded and the widths in `font_metrics` are the widths viewers draw with.
//! The output carries no timestamps or random IDs: the same pages always
//! serialize to the same bytes.

use encoding_rs::WINDOWS_1252;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream};

use crate::layout::builder::{LaidOutPage, PlacedLine};
use crate::layout::font_metrics::CoreFont;
use crate::layout::page::{PageConfig, PT_PER_MM};
use crate::layout::WriteError;

const PDF_VERSION: &str = "1.4";
const PRODUCER: &str = concat!("resume-builder ", env!("CARGO_PKG_VERSION"));
const UNENCODABLE: u8 = b'?';

/// Windows-1252 byte drawn for `c` by a `WinAnsiEncoding` font.
/// Characters outside the code page become `?`.
pub fn win_ansi_byte(c: char) -> u8 {
    if c.is_ascii() {
        return c as u8;
    }
    let mut buf = [0u8; 4];
    let (bytes, _, had_errors) = WINDOWS_1252.encode(c.encode_utf8(&mut buf));
    match bytes.as_ref() {
        [b] if !had_errors => *b,
        _ => UNENCODABLE,
    }
}

/// Encodes text as Windows-1252 bytes for a `WinAnsiEncoding` font.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

/// Builds the PDF object graph for `pages` and returns the serialized file.
pub fn render_pdf(
    pages: &[LaidOutPage],
    config: &PageConfig,
    title: &str,
) -> Result<Vec<u8>, WriteError> {
    let mut doc = Document::with_version(PDF_VERSION);
    let pages_id = doc.new_object_id();

    let mut fonts = Dictionary::new();
    for font in [CoreFont::Helvetica, CoreFont::HelveticaBold] {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(font.resource_name(), font_id);
    }
    let resources_id = doc.add_object(dictionary! {
        "Font" => fonts,
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let content = Content {
            operations: page_operations(page, config),
        };
        let encoded = content
            .encode()
            .map_err(|e| WriteError::Serialize(format!("content stream: {e}")))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let media_box: Vec<Object> = vec![
        0.into(),
        0.into(),
        (config.page_width_mm * PT_PER_MM).into(),
        (config.page_height_mm * PT_PER_MM).into(),
    ];
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages.len() as i64,
            "Resources" => resources_id,
            "MediaBox" => media_box,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(encode_win_ansi(title)),
        "Producer" => Object::string_literal(PRODUCER),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| WriteError::Serialize(format!("document: {e}")))?;
    Ok(bytes)
}

/// One `BT … ET` text object per line, positioned absolutely.
fn page_operations(page: &LaidOutPage, config: &PageConfig) -> Vec<Operation> {
    page.lines
        .iter()
        .flat_map(|line| line_operations(line, config))
        .collect()
}

fn line_operations(line: &PlacedLine, config: &PageConfig) -> [Operation; 6] {
    let [r, g, b] = line.color.unit();
    let x_pt = line.x_mm * PT_PER_MM;
    // PDF user space grows upward from the bottom edge.
    let y_pt = (config.page_height_mm - line.baseline_mm) * PT_PER_MM;
    [
        Operation::new("BT", vec![]),
        Operation::new(
            "Tf",
            vec![line.font.resource_name().into(), line.font_size_pt.into()],
        ),
        Operation::new("rg", vec![r.into(), g.into(), b.into()]),
        Operation::new("Td", vec![x_pt.into(), y_pt.into()]),
        Operation::new("Tj", vec![Object::string_literal(encode_win_ansi(&line.text))]),
        Operation::new("ET", vec![]),
    ]
}

/// Decodes the text drawn on every page of a PDF produced by [`render_pdf`].
#[cfg(test)]
pub(crate) fn extract_page_texts(bytes: &[u8]) -> Vec<Vec<String>> {
    let doc = Document::load_mem(bytes).unwrap();
    doc.get_pages()
        .values()
        .map(|&page_id| {
            let raw = doc.get_page_content(page_id).unwrap();
            let content = Content::decode(&raw).unwrap();
            content
                .operations
                .iter()
                .filter(|op| op.operator == "Tj")
                .filter_map(|op| match op.operands.first() {
                    Some(Object::String(bytes, _)) => {
                        Some(WINDOWS_1252.decode(bytes).0.into_owned())
                    }
                    _ => None,
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::blocks::DocumentBlock;
    use crate::layout::builder::DocumentBuilder;

    fn sample_pages() -> Vec<LaidOutPage> {
        DocumentBuilder::new(PageConfig::default())
            .header("Resume")
            .block(&DocumentBlock::Title("Skills".to_string()))
            .block(&DocumentBlock::Body("Languages: Rust (async), C".to_string()))
            .layout()
    }

    #[test]
    fn test_encode_win_ansi() {
        assert_eq!(encode_win_ansi("Resume"), b"Resume".to_vec());
        assert_eq!(encode_win_ansi("café"), b"caf\xe9".to_vec());
        assert_eq!(encode_win_ansi("a—b"), b"a\x97b".to_vec());
        assert_eq!(encode_win_ansi("• item"), b"\x95 item".to_vec());
        assert_eq!(encode_win_ansi("日本"), b"??".to_vec());
    }

    #[test]
    fn test_render_produces_parseable_pdf() {
        let bytes = render_pdf(&sample_pages(), &PageConfig::default(), "Resume").unwrap();
        assert!(bytes.starts_with(b"%PDF-1.4"));

        let texts = extract_page_texts(&bytes);
        assert_eq!(
            texts,
            vec![vec![
                "Resume".to_string(),
                "Skills".to_string(),
                "Languages: Rust (async), C".to_string(),
            ]]
        );
    }

    #[test]
    fn test_render_uses_standard_fonts() {
        let bytes = render_pdf(&sample_pages(), &PageConfig::default(), "Resume").unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        let mut base_fonts: Vec<Vec<u8>> = doc
            .objects
            .values()
            .filter_map(|obj| obj.as_dict().ok())
            .filter(|dict| {
                matches!(dict.get(b"Type").and_then(Object::as_name), Ok(name) if name == b"Font")
            })
            .filter_map(|dict| dict.get(b"BaseFont").and_then(Object::as_name).ok())
            .map(|name| name.to_vec())
            .collect();
        base_fonts.sort();
        assert_eq!(
            base_fonts,
            vec![b"Helvetica".to_vec(), b"Helvetica-Bold".to_vec()]
        );
    }

    #[test]
    fn test_render_is_deterministic() {
        let pages = sample_pages();
        let a = render_pdf(&pages, &PageConfig::default(), "Resume").unwrap();
        let b = render_pdf(&pages, &PageConfig::default(), "Resume").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_line_operations_flip_y_axis() {
        let config = PageConfig::default();
        let pages = sample_pages();
        let ops = line_operations(&pages[0].lines[0], &config);
        assert_eq!(ops[3].operator, "Td");
        let y = ops[3].operands[1].as_float().unwrap();
        let expected = (297.0 - pages[0].lines[0].baseline_mm) * PT_PER_MM;
        assert!((y - expected).abs() < 1e-2);
    }
}
