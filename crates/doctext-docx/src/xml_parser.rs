//! Text extraction from a single WordprocessingML part.
//!
//! Walks the part with SAX-style event processing. Text runs (`<w:t>`) are
//! copied verbatim, `<w:tab/>` becomes `\t`, `<w:br/>` and `<w:cr/>` become
//! `\n`, and every paragraph (`<w:p>`) starts with a blank line. Tab stop
//! definitions inside `<w:tabs>` are layout, not content, and are ignored.
//! Only `w:`-prefixed elements count; text in other vocabularies such as
//! OMML math (`<m:t>`) is skipped.

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::DocxError;

pub fn part_to_text(xml: &str) -> Result<String, DocxError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut out = String::new();
    let mut in_text = false;
    let mut tabs_depth = 0usize;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:t" => in_text = true,
                b"w:tabs" => tabs_depth += 1,
                name => push_marker(&mut out, name, tabs_depth),
            },
            Ok(Event::Empty(e)) => push_marker(&mut out, e.name().as_ref(), tabs_depth),
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:tabs" => tabs_depth = tabs_depth.saturating_sub(1),
                _ => {}
            },
            Ok(Event::Text(t)) if in_text => {
                let text = t
                    .unescape()
                    .map_err(|e| DocxError::Xml(e.to_string()))?;
                out.push_str(&text);
            }
            Ok(Event::CData(c)) if in_text => {
                out.push_str(&String::from_utf8_lossy(&c));
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(DocxError::Xml(format!(
                    "at position {}: {}",
                    reader.error_position(),
                    e
                )));
            }
            _ => {}
        }
    }

    Ok(out)
}

fn push_marker(out: &mut String, name: &[u8], tabs_depth: usize) {
    match name {
        b"w:p" => out.push_str("\n\n"),
        b"w:tab" if tabs_depth == 0 => out.push('\t'),
        b"w:br" | b"w:cr" => out.push('\n'),
        _ => {}
    }
}
