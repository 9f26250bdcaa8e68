//! PowerPoint slide extraction.
//!
//! A PPTX file is a ZIP archive of Office Open XML; each slide lives at
//! `ppt/slides/slideN.xml` and its visible text sits in `<a:t>` elements
//! inside the slide's shapes. quick-xml walks each slide document and
//! collects that text in shape order, one output string per slide.

use std::io::Read;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use crate::error::{Error, Result};

/// Extract one string per slide, in slide order.
///
/// Text within a slide is the concatenation of every text-bearing shape's
/// text, newline-joined. A slide with no text-bearing shapes yields an empty
/// string.
pub fn extract_slides(path: &Path) -> Result<Vec<String>> {
    let extract_err = |message: String| Error::Extract {
        path: path.display().to_string(),
        message,
    };

    let file = std::fs::File::open(path)
        .map_err(|e| extract_err(format!("failed to open PPTX: {e}")))?;
    let mut archive = ZipArchive::new(file)
        .map_err(|e| extract_err(format!("failed to open PPTX as ZIP: {e}")))?;

    // Slide entries are named slide1.xml, slide2.xml, ...; the archive does
    // not guarantee entry order, so sort by the numeric suffix
    let mut slide_names: Vec<(usize, String)> = archive
        .file_names()
        .filter_map(|name| Some((slide_number(name)?, name.to_string())))
        .collect();
    slide_names.sort_by_key(|(number, _)| *number);

    let mut slides = Vec::with_capacity(slide_names.len());
    for (_, name) in slide_names {
        let xml = {
            let mut entry = archive
                .by_name(&name)
                .map_err(|e| extract_err(format!("failed to read {name}: {e}")))?;
            let mut content = String::new();
            entry
                .read_to_string(&mut content)
                .map_err(|e| extract_err(format!("failed to read {name}: {e}")))?;
            content
        };
        let text = slide_text(&xml)
            .map_err(|e| extract_err(format!("XML parse error in {name}: {e}")))?;
        slides.push(text);
    }

    Ok(slides)
}

/// Parse the slide number out of a `ppt/slides/slideN.xml` entry name.
fn slide_number(name: &str) -> Option<usize> {
    let rest = name.strip_prefix("ppt/slides/slide")?;
    rest.strip_suffix(".xml")?.parse().ok()
}

/// Collect all `<a:t>` text in one slide document, newline-joined.
fn slide_text(xml: &str) -> std::result::Result<String, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut segments: Vec<String> = Vec::new();
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) if e.name().as_ref() == b"a:t" => in_text = true,
            Event::End(e) if e.name().as_ref() == b"a:t" => in_text = false,
            Event::Text(e) if in_text => segments.push(e.unescape()?.into_owned()),
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(segments.join("\n"))
}

// ============================================================================
// Tests
// ============================================================================
