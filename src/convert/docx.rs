use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use crate::error::ConvertError;

/// Extract the ordered text blocks of a DOCX document.
///
/// A DOCX file is a ZIP container; the content lives in `word/document.xml`.
/// Every `w:p` element becomes one block, in document order, which puts table
/// cell paragraphs inline where they occur. `w:t` carries the run text;
/// `w:tab` and `w:br` map to tab and newline only inside a run (`w:r`) —
/// outside a run, `w:tab` is a tab-stop definition in the paragraph
/// properties, layout metadata rather than text.
pub fn extract_text_blocks(data: &[u8]) -> Result<Vec<String>, ConvertError> {
    let mut archive = ZipArchive::new(Cursor::new(data))
        .map_err(|err| ConvertError::failed("reading DOCX container", err))?;
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|err| ConvertError::failed("locating word/document.xml", err))?
        .read_to_string(&mut xml)
        .map_err(|err| ConvertError::failed("reading word/document.xml", err))?;
    parse_document_xml(&xml)
}

fn parse_document_xml(xml: &str) -> Result<Vec<String>, ConvertError> {
    let mut reader = Reader::from_reader(xml.as_bytes());
    let mut buf = Vec::new();
    let mut blocks = Vec::new();
    let mut paragraph = String::new();
    let mut in_paragraph = false;
    let mut in_run = false;
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:p" => {
                    in_paragraph = true;
                    paragraph.clear();
                }
                b"w:r" => in_run = true,
                b"w:t" => in_text = true,
                _ => {}
            },
            Ok(Event::Text(t)) if in_text => {
                let text = t
                    .unescape()
                    .map_err(|err| ConvertError::failed("decoding document text", err))?;
                paragraph.push_str(&text);
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:p" => {
                    if in_paragraph {
                        blocks.push(std::mem::take(&mut paragraph));
                        in_paragraph = false;
                    }
                }
                b"w:r" => in_run = false,
                b"w:t" => in_text = false,
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:p" => blocks.push(String::new()),
                b"w:tab" if in_run => paragraph.push('\t'),
                b"w:br" | b"w:cr" if in_run => paragraph.push('\n'),
                _ => {}
            },
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => return Err(ConvertError::failed("parsing document XML", err)),
        }
        buf.clear();
    }

    Ok(blocks)
}
