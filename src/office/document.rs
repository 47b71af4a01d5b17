// ABOUTME: Document backend - create, read and append to .docx files.
// ABOUTME: Emits a minimal WordprocessingML package with zip and parses it with quick-xml.

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use quick_xml::escape::escape;
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use zip::result::ZipError;
use zip::write::SimpleFileOptions;

use crate::error::DocumentError;

const DOCUMENT_PART: &str = "word/document.xml";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
    <Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>
</Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;

const DOCUMENT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
</Relationships>"#;

const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
    <w:style w:type="paragraph" w:default="1" w:styleId="Normal">
        <w:name w:val="Normal"/>
        <w:pPr><w:spacing w:after="160"/></w:pPr>
        <w:rPr><w:sz w:val="22"/></w:rPr>
    </w:style>
    <w:style w:type="paragraph" w:styleId="Title">
        <w:name w:val="Title"/>
        <w:basedOn w:val="Normal"/>
        <w:next w:val="Normal"/>
        <w:pPr><w:spacing w:after="240"/></w:pPr>
        <w:rPr><w:b/><w:color w:val="17365D"/><w:sz w:val="52"/></w:rPr>
    </w:style>
</w:styles>"#;

const SECTION_PROPERTIES: &str = r#"<w:sectPr><w:pgSz w:w="11906" w:h="16838"/><w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="708" w:footer="708" w:gutter="0"/></w:sectPr>"#;

/// Body of a new document: one block of text or an ordered list of paragraphs.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentContent {
    Text(String),
    Paragraphs(Vec<String>),
}

impl DocumentContent {
    fn paragraphs(&self) -> Vec<&str> {
        match self {
            Self::Text(text) => vec![text.as_str()],
            Self::Paragraphs(paragraphs) => paragraphs.iter().map(String::as_str).collect(),
        }
    }
}

impl From<String> for DocumentContent {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for DocumentContent {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Vec<String>> for DocumentContent {
    fn from(paragraphs: Vec<String>) -> Self {
        Self::Paragraphs(paragraphs)
    }
}

/// Drop characters XML 1.0 cannot carry.
fn sanitize(text: &str) -> String {
    text.replace("\r\n", "\n")
        .chars()
        .filter(|c| !c.is_control() || matches!(c, '\n' | '\t'))
        .collect()
}

fn run_xml(text: &str) -> String {
    sanitize(text)
        .split('\n')
        .map(|line| format!(r#"<w:t xml:space="preserve">{}</w:t>"#, escape(line)))
        .collect::<Vec<_>>()
        .join("<w:br/>")
}

fn paragraph_xml(text: &str) -> String {
    if text.is_empty() {
        return "<w:p/>".to_string();
    }
    format!("<w:p><w:r>{}</w:r></w:p>", run_xml(text))
}

fn title_xml(title: &str) -> String {
    format!(
        r#"<w:p><w:pPr><w:pStyle w:val="Title"/><w:jc w:val="center"/></w:pPr><w:r>{}</w:r></w:p>"#,
        run_xml(title)
    )
}

fn timestamp_xml(stamp: &str) -> String {
    format!(
        r#"<w:p><w:pPr><w:jc w:val="right"/></w:pPr><w:r><w:rPr><w:color w:val="808080"/><w:sz w:val="18"/></w:rPr>{}</w:r></w:p>"#,
        run_xml(stamp)
    )
}

fn document_xml(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}{SECTION_PROPERTIES}</w:body></w:document>"#
    )
}

fn part_options() -> SimpleFileOptions {
    SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated)
}

fn write_package<'a>(
    path: &Path,
    parts: impl IntoIterator<Item = (&'a str, &'a [u8])>,
) -> Result<(), DocumentError> {
    let mut zip = zip::ZipWriter::new(File::create(path)?);
    for (name, bytes) in parts {
        zip.start_file(name, part_options())?;
        zip.write_all(bytes)?;
    }
    zip.finish()?;
    Ok(())
}

fn read_parts(path: &Path) -> Result<Vec<(String, Vec<u8>)>, DocumentError> {
    let mut archive = zip::ZipArchive::new(File::open(path)?)?;
    let mut parts = Vec::with_capacity(archive.len());

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        if entry.is_dir() {
            continue;
        }
        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes)?;
        parts.push((entry.name().to_string(), bytes));
    }
    Ok(parts)
}

fn malformed(path: &Path, reason: &str) -> DocumentError {
    DocumentError::Malformed {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

fn read_document_xml(path: &Path) -> Result<String, DocumentError> {
    let mut archive = zip::ZipArchive::new(File::open(path)?)?;
    let mut entry = match archive.by_name(DOCUMENT_PART) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => return Err(malformed(path, "missing word/document.xml")),
        Err(e) => return Err(e.into()),
    };

    let mut xml = String::new();
    entry.read_to_string(&mut xml)?;
    Ok(xml)
}

/// Collect the text of every paragraph, in order. Breaks become newlines.
fn parse_paragraphs(xml: &str) -> Result<Vec<String>, DocumentError> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current: Option<String> = None;
    let mut in_run = false;
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:p" => current = Some(String::new()),
                b"w:r" => in_run = true,
                b"w:t" => in_text = true,
                _ => {}
            },
            Event::End(e) => match e.name().as_ref() {
                b"w:p" => paragraphs.extend(current.take()),
                b"w:r" => in_run = false,
                b"w:t" => in_text = false,
                _ => {}
            },
            Event::Empty(e) => {
                let Some(text) = current.as_mut().filter(|_| in_run) else {
                    continue;
                };
                match e.name().as_ref() {
                    b"w:br" | b"w:cr" => text.push('\n'),
                    b"w:tab" => text.push('\t'),
                    _ => {}
                }
            }
            Event::Text(e) if in_text => {
                if let Some(text) = current.as_mut() {
                    text.push_str(&e.unescape()?);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(paragraphs)
}

/// Create a document with a centered title, a timestamp line and `content`.
pub fn create_document(
    path: impl AsRef<Path>,
    title: &str,
    content: impl Into<DocumentContent>,
) -> Result<PathBuf, DocumentError> {
    let path = path.as_ref();
    let content = content.into();
    let stamp = chrono::Local::now().format("Generated at: %d/%m/%Y %H:%M").to_string();

    let mut body = title_xml(title);
    body.push_str(&timestamp_xml(&stamp));
    body.push_str(&paragraph_xml(""));
    for paragraph in content.paragraphs() {
        body.push_str(&paragraph_xml(paragraph));
    }
    let document = document_xml(&body);

    write_package(
        path,
        [
            ("[Content_Types].xml", CONTENT_TYPES.as_bytes()),
            ("_rels/.rels", ROOT_RELS.as_bytes()),
            ("word/_rels/document.xml.rels", DOCUMENT_RELS.as_bytes()),
            ("word/styles.xml", STYLES.as_bytes()),
            (DOCUMENT_PART, document.as_bytes()),
        ],
    )?;

    tracing::info!(path = %path.display(), paragraphs = content.paragraphs().len(), "document created");
    Ok(path.to_path_buf())
}

/// Read the non-blank paragraphs of a document.
pub fn read_document(path: impl AsRef<Path>) -> Result<Vec<String>, DocumentError> {
    let path = path.as_ref();
    let paragraphs: Vec<String> = parse_paragraphs(&read_document_xml(path)?)?
        .into_iter()
        .filter(|p| !p.trim().is_empty())
        .collect();

    tracing::info!(path = %path.display(), paragraphs = paragraphs.len(), "document read");
    Ok(paragraphs)
}

/// Append one paragraph to the end of an existing document.
///
/// Every other part of the package is carried over unchanged.
pub fn append_paragraph(path: impl AsRef<Path>, text: &str) -> Result<(), DocumentError> {
    let path = path.as_ref();
    let mut parts = read_parts(path)?;

    let Some((_, bytes)) = parts.iter_mut().find(|(name, _)| name == DOCUMENT_PART) else {
        return Err(malformed(path, "missing word/document.xml"));
    };
    let xml = String::from_utf8(std::mem::take(bytes))
        .map_err(|_| malformed(path, "word/document.xml is not UTF-8"))?;

    // New content goes after the last block, ahead of the body's section properties.
    let at = xml
        .rfind("<w:sectPr")
        .or_else(|| xml.rfind("</w:body>"))
        .ok_or_else(|| malformed(path, "document has no body"))?;

    let mut updated = String::with_capacity(xml.len() + text.len() + 64);
    updated.push_str(&xml[..at]);
    updated.push_str(&paragraph_xml(text));
    updated.push_str(&xml[at..]);
    *bytes = updated.into_bytes();

    write_package(
        path,
        parts
            .iter()
            .map(|(name, bytes)| (name.as_str(), bytes.as_slice())),
    )?;

    tracing::info!(path = %path.display(), "paragraph appended to document");
    Ok(())
}
