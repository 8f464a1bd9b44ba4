use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};

use crate::error::ConvertError;
use crate::models::RenderOptions;

const FONT_SIZE: i64 = 11;
const LEADING: i64 = 14;
const MM_TO_PT: f64 = 72.0 / 25.4;
// Average Helvetica glyph width as a fraction of the font size, used for the
// character budget per wrapped line.
const GLYPH_WIDTH_EM: f64 = 0.55;

/// Render ordered text blocks into a paginated PDF.
///
/// One block per source paragraph; blocks are word-wrapped to the usable page
/// width and flowed top-down with a fixed leading. The output carries no
/// timestamps or random ids, so rendering the same input twice produces
/// byte-identical files.
pub fn render_blocks(blocks: &[String], options: &RenderOptions) -> Result<Vec<u8>, ConvertError> {
    let (width, height) = options.page_dimensions();
    let margin = (options.margin_mm as f64 * MM_TO_PT).round() as i64;
    let usable_width = (width - 2 * margin).max(FONT_SIZE);
    let usable_height = (height - 2 * margin).max(LEADING);
    let max_chars = ((usable_width as f64 / (FONT_SIZE as f64 * GLYPH_WIDTH_EM)) as usize).max(1);
    let lines_per_page = ((usable_height / LEADING) as usize).max(1);

    let mut lines: Vec<String> = Vec::new();
    for block in blocks {
        for raw in block.split('\n') {
            wrap_into(raw, max_chars, &mut lines);
        }
    }
    if lines.is_empty() {
        lines.push(String::new());
    }

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for page_lines in lines.chunks(lines_per_page) {
        let content = page_content(page_lines, margin, height);
        let encoded = content
            .encode()
            .map_err(|err| ConvertError::failed("encoding page content", err))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), width.into(), height.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut out = Vec::new();
    doc.save_to(&mut out)
        .map_err(|err| ConvertError::failed("writing PDF", err))?;
    Ok(out)
}

fn page_content(lines: &[String], margin: i64, page_height: i64) -> Content {
    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), FONT_SIZE.into()]),
        Operation::new("TL", vec![LEADING.into()]),
        Operation::new("Td", vec![margin.into(), (page_height - margin - FONT_SIZE).into()]),
    ];
    for line in lines {
        operations.push(Operation::new(
            "Tj",
            vec![Object::String(encode_line(line), StringFormat::Literal)],
        ));
        operations.push(Operation::new("T*", vec![]));
    }
    operations.push(Operation::new("ET", vec![]));
    Content { operations }
}

/// Map a line onto the byte encoding of the standard Helvetica font: Latin-1
/// passes through, control characters become spaces, anything wider becomes
/// '?'.
fn encode_line(line: &str) -> Vec<u8> {
    line.chars()
        .map(|c| match c as u32 {
            code if code < 0x20 => b' ',
            code if code <= 0xFF => code as u8,
            _ => b'?',
        })
        .collect()
}

fn wrap_into(text: &str, max_chars: usize, out: &mut Vec<String>) {
    if text.chars().count() <= max_chars {
        out.push(text.to_string());
        return;
    }
    let mut line = String::new();
    let mut line_len = 0usize;
    for word in text.split_whitespace() {
        let mut word = word;
        let mut word_len = word.chars().count();
        if line_len > 0 && line_len + 1 + word_len > max_chars {
            out.push(std::mem::take(&mut line));
            line_len = 0;
        }
        // hard-split words wider than a whole line
        while word_len > max_chars {
            let split = word
                .char_indices()
                .nth(max_chars)
                .map(|(index, _)| index)
                .unwrap_or(word.len());
            out.push(word[..split].to_string());
            word = &word[split..];
            word_len = word.chars().count();
        }
        if line_len > 0 {
            line.push(' ');
            line_len += 1;
        }
        line.push_str(word);
        line_len += word_len;
    }
    if !line.is_empty() {
        out.push(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Orientation, PageSize};

    fn blocks(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|text| text.to_string()).collect()
    }

    #[test]
    fn output_is_a_loadable_pdf() {
        let rendered = render_blocks(&blocks(&["Hello", "World"]), &RenderOptions::default()).unwrap();
        assert!(rendered.starts_with(b"%PDF-"));
        let doc = Document::load_mem(&rendered).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn rendering_is_deterministic() {
        let input = blocks(&["same", "input", "twice"]);
        let first = render_blocks(&input, &RenderOptions::default()).unwrap();
        let second = render_blocks(&input, &RenderOptions::default()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn long_documents_paginate() {
        let many: Vec<String> = (0..200).map(|n| format!("paragraph number {}", n)).collect();
        let rendered = render_blocks(&many, &RenderOptions::default()).unwrap();
        let doc = Document::load_mem(&rendered).unwrap();
        assert!(doc.get_pages().len() > 1);
    }

    #[test]
    fn empty_input_still_renders_one_page() {
        let rendered = render_blocks(&[], &RenderOptions::default()).unwrap();
        let doc = Document::load_mem(&rendered).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn page_options_change_the_media_box() {
        let options = RenderOptions {
            page_size: PageSize::Letter,
            orientation: Orientation::Landscape,
            margin_mm: 10,
        };
        let rendered = render_blocks(&blocks(&["wide page"]), &options).unwrap();
        let doc = Document::load_mem(&rendered).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
        // landscape letter is wider than it is tall
        let rendered_portrait =
            render_blocks(&blocks(&["wide page"]), &RenderOptions::default()).unwrap();
        assert_ne!(rendered, rendered_portrait);
    }

    #[test]
    fn wrap_splits_on_word_boundaries() {
        let mut lines = Vec::new();
        wrap_into("alpha beta gamma delta", 11, &mut lines);
        assert_eq!(lines, vec!["alpha beta".to_string(), "gamma delta".to_string()]);
    }

    #[test]
    fn wrap_hard_splits_oversized_words() {
        let mut lines = Vec::new();
        wrap_into("abcdefghij", 4, &mut lines);
        assert_eq!(lines, vec!["abcd".to_string(), "efgh".to_string(), "ij".to_string()]);
    }
}
