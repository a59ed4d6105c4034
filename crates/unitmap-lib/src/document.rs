//! Parsing unit documents into raw records.
//!
//! The XML reader mirrors the shape produced by common XML-to-object
//! converters: every element becomes a map whose children are grouped by tag
//! name into lists, attributes become single-element text children, and leaf
//! elements collapse to their text. Unit records are the `Unit` elements
//! directly below the document root.
//!
//! ```text
//! <Interview>
//!   <Unit>
//!     <ID>U-1</ID>
//!     <Location><Latitude>32.0</Latitude><Longitude>-84.0</Longitude></Location>
//!     <Gui><Color><Red>255</Red><Green>0</Green><Blue>0</Blue></Color></Gui>
//!   </Unit>
//! </Interview>
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

use crate::error::{Error, Result};
use crate::record::{RawRecord, RawValue, TEXT_KEY};

/// Tag name of a unit record element.
const UNIT_TAG: &str = "Unit";

/// Read raw unit records from a file.
///
/// Files with a `.json` extension are parsed with [`parse_units_json`];
/// everything else is treated as XML.
pub fn read_unit_records(path: &Path) -> Result<Vec<RawRecord>> {
    let contents = fs::read_to_string(path).map_err(|source| Error::Load {
        path: path.to_path_buf(),
        source,
    })?;

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let records = if is_json {
        parse_units_json(&contents)?
    } else {
        parse_units_xml(&contents)?
    };

    debug!(path = %path.display(), records = records.len(), "read unit records");
    Ok(records)
}

/// Parse an XML unit document into raw records.
pub fn parse_units_xml(xml: &str) -> Result<Vec<RawRecord>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut stack: Vec<ElementFrame> = Vec::new();
    let mut root: Option<RawValue> = None;

    loop {
        let event = reader.read_event().map_err(|e| Error::Document {
            message: format!("XML error at byte {}: {}", reader.buffer_position(), e),
        })?;

        match event {
            Event::Start(ref e) => stack.push(ElementFrame::open(e)?),
            Event::Empty(ref e) => {
                let frame = ElementFrame::open(e)?;
                close_element(frame, &mut stack, &mut root);
            }
            Event::End(_) => {
                let frame = stack.pop().ok_or_else(|| Error::Document {
                    message: "unexpected closing tag".to_string(),
                })?;
                close_element(frame, &mut stack, &mut root);
            }
            Event::Text(ref t) => {
                let text = t.unescape().map_err(|e| Error::Document {
                    message: format!("invalid text content: {e}"),
                })?;
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&text);
                }
            }
            Event::CData(ref c) => {
                let text = std::str::from_utf8(c).map_err(|e| Error::Document {
                    message: format!("invalid UTF-8 in CDATA: {e}"),
                })?;
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(text);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(Error::Document {
            message: format!("unclosed element <{}>", stack[stack.len() - 1].name),
        });
    }

    let root = root.ok_or_else(|| Error::Document {
        message: "document has no root element".to_string(),
    })?;

    Ok(unit_list(&root))
}

/// Parse a JSON unit document into raw records.
///
/// Accepts a top-level array of records, or an object carrying the records
/// under `Unit` either directly or beneath a single wrapping root key such as
/// `Interview`.
pub fn parse_units_json(json: &str) -> Result<Vec<RawRecord>> {
    let value: RawValue = serde_json::from_str(json)?;

    match &value {
        RawValue::List(items) => Ok(items.clone()),
        RawValue::Map(entries) => {
            if value.field(&[UNIT_TAG]).is_some() {
                return Ok(unit_list(&value));
            }
            match entries.values().next() {
                Some(root) if entries.len() == 1 && root.field(&[UNIT_TAG]).is_some() => {
                    Ok(unit_list(root))
                }
                _ => Err(Error::Document {
                    message: "JSON document has no Unit list".to_string(),
                }),
            }
        }
        _ => Err(Error::Document {
            message: "JSON document must be an array or object".to_string(),
        }),
    }
}

fn unit_list(root: &RawValue) -> Vec<RawRecord> {
    match root.field(&[UNIT_TAG]) {
        Some(RawValue::List(items)) => items.clone(),
        Some(single) => vec![single.clone()],
        None => Vec::new(),
    }
}

struct ElementFrame {
    name: String,
    children: BTreeMap<String, Vec<RawValue>>,
    text: String,
}

impl ElementFrame {
    fn open(start: &BytesStart<'_>) -> Result<Self> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut children: BTreeMap<String, Vec<RawValue>> = BTreeMap::new();

        for attr in start.attributes() {
            let attr = attr.map_err(|e| Error::Document {
                message: format!("invalid attribute on <{name}>: {e}"),
            })?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value().map_err(|e| Error::Document {
                message: format!("invalid attribute value on <{name}>: {e}"),
            })?;
            children
                .entry(key)
                .or_default()
                .push(RawValue::text(value.into_owned()));
        }

        Ok(Self {
            name,
            children,
            text: String::new(),
        })
    }

    fn into_value(self) -> (String, RawValue) {
        if self.children.is_empty() {
            return (self.name, RawValue::Text(self.text));
        }

        let mut entries: BTreeMap<String, RawValue> = self
            .children
            .into_iter()
            .map(|(k, v)| (k, RawValue::List(v)))
            .collect();
        if !self.text.is_empty() {
            entries.insert(TEXT_KEY.to_string(), RawValue::Text(self.text));
        }
        (self.name, RawValue::Map(entries))
    }
}

fn close_element(frame: ElementFrame, stack: &mut [ElementFrame], root: &mut Option<RawValue>) {
    let (name, value) = frame.into_value();
    match stack.last_mut() {
        Some(parent) => parent.children.entry(name).or_default().push(value),
        None => {
            if root.is_none() {
                *root = Some(value);
            }
        }
    }
}
