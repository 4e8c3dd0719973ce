//! Structured-Document Resolver
//!
//! Streams `.xml`, `.xmi` and `.launch` templates event by event, resolves
//! placeholders in every attribute value, text node and CDATA section, and
//! writes the result to the workspace. Everything else passes through as read:
//! the declaration, comments, processing instructions, qualified attribute
//! names such as `xmi:id` and the template's whitespace.

use crate::destination::{write_if_changed, WriteOutcome};
use crate::error::DocumentError;
use crate::resolver::Resolver;
use quick_xml::events::{BytesCData, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::borrow::Cow;
use std::fmt::Display;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Resolves placeholders inside XML documents.
#[derive(Debug, Clone)]
pub struct DocumentResolver {
    resolver: Arc<Resolver>,
}

impl DocumentResolver {
    pub fn new(resolver: Arc<Resolver>) -> Self {
        Self { resolver }
    }

    /// Resolve `source` and write the result to `destination`.
    ///
    /// The whole document is resolved before anything is written, so a parse
    /// or serialization failure leaves the destination untouched.
    pub fn update(&self, source: &Path, destination: &Path) -> Result<WriteOutcome, DocumentError> {
        let bytes = std::fs::read(source).map_err(|e| DocumentError::Io {
            path: source.to_path_buf(),
            source: e,
        })?;
        let text = String::from_utf8(bytes).map_err(|e| parse_error(source, e))?;
        let rendered = self.resolve_document(&text, source, destination)?;
        let outcome = write_if_changed(destination, &rendered).map_err(|e| DocumentError::Io {
            path: destination.to_path_buf(),
            source: e,
        })?;
        debug!(
            source = %source.display(),
            destination = %destination.display(),
            ?outcome,
            "Resolved document"
        );
        Ok(outcome)
    }

    /// Resolve placeholders in `text` and return the rendered document.
    ///
    /// `source` and `destination` only label errors. The input must hold one
    /// well-formed root element.
    pub fn resolve_document(
        &self,
        text: &str,
        source: &Path,
        destination: &Path,
    ) -> Result<Vec<u8>, DocumentError> {
        let mut reader = Reader::from_str(text);
        let mut writer = Writer::new(Vec::with_capacity(text.len()));
        let mut open: Vec<Vec<u8>> = Vec::new();
        let mut seen_root = false;

        loop {
            let event = reader.read_event().map_err(|e| {
                parse_error(source, format!("{} at byte {}", e, reader.buffer_position()))
            })?;
            let event = match event {
                Event::Eof => break,
                Event::Start(start) => {
                    if open.is_empty() && seen_root {
                        return Err(parse_error(source, "content after the root element"));
                    }
                    seen_root = true;
                    open.push(start.name().as_ref().to_vec());
                    match self.resolve_attributes(&start, source)? {
                        Some(resolved) => Event::Start(resolved),
                        None => Event::Start(start),
                    }
                }
                Event::Empty(start) => {
                    if open.is_empty() && seen_root {
                        return Err(parse_error(source, "content after the root element"));
                    }
                    seen_root = true;
                    match self.resolve_attributes(&start, source)? {
                        Some(resolved) => Event::Empty(resolved),
                        None => Event::Empty(start),
                    }
                }
                Event::End(end) => {
                    match open.pop() {
                        Some(name) if name.as_slice() == end.name().as_ref() => {}
                        _ => {
                            return Err(parse_error(
                                source,
                                format!(
                                    "unexpected closing tag </{}>",
                                    String::from_utf8_lossy(end.name().as_ref())
                                ),
                            ))
                        }
                    }
                    Event::End(end)
                }
                Event::Text(content) => {
                    let resolved = match self
                        .resolver
                        .resolve(&content.unescape().map_err(|e| parse_error(source, e))?)
                    {
                        Cow::Owned(resolved) => Some(resolved),
                        Cow::Borrowed(_) => None,
                    };
                    match resolved {
                        Some(resolved) => Event::Text(BytesText::new(&resolved).into_owned()),
                        None => Event::Text(content),
                    }
                }
                Event::CData(data) => {
                    let raw = std::str::from_utf8(&data).map_err(|e| parse_error(source, e))?;
                    let resolved = match self.resolver.resolve(raw) {
                        Cow::Owned(resolved) => Some(resolved),
                        Cow::Borrowed(_) => None,
                    };
                    match resolved {
                        Some(resolved) => Event::CData(BytesCData::new(resolved)),
                        None => Event::CData(data),
                    }
                }
                other => other,
            };
            writer
                .write_event(event)
                .map_err(|e| DocumentError::Serialize {
                    path: destination.to_path_buf(),
                    reason: e.to_string(),
                })?;
        }

        if let Some(name) = open.last() {
            return Err(parse_error(
                source,
                format!("unclosed element <{}>", String::from_utf8_lossy(name)),
            ));
        }
        if !seen_root {
            return Err(parse_error(source, "no root element"));
        }
        Ok(writer.into_inner())
    }

    /// Rebuild `start` when any attribute value resolves to something new.
    /// Attribute keys keep their raw qualified name and order.
    fn resolve_attributes(
        &self,
        start: &BytesStart<'_>,
        source: &Path,
    ) -> Result<Option<BytesStart<'static>>, DocumentError> {
        let mut changed = false;
        let mut attributes: Vec<(String, String)> = Vec::new();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(|e| parse_error(source, e))?;
            let key = std::str::from_utf8(attribute.key.as_ref())
                .map_err(|e| parse_error(source, e))?
                .to_string();
            let value = attribute
                .unescape_value()
                .map_err(|e| parse_error(source, e))?;
            let value = match self.resolver.resolve(&value) {
                Cow::Owned(resolved) => {
                    changed = true;
                    resolved
                }
                Cow::Borrowed(unchanged) => unchanged.to_string(),
            };
            attributes.push((key, value));
        }
        if !changed {
            return Ok(None);
        }

        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut resolved = BytesStart::new(name);
        for (key, value) in &attributes {
            resolved.push_attribute((key.as_str(), value.as_str()));
        }
        Ok(Some(resolved.into_owned()))
    }
}

fn parse_error(path: &Path, reason: impl Display) -> DocumentError {
    DocumentError::Parse {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}
