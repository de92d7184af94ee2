use anyhow::Result;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde::Serialize;
use std::io::Cursor;

use crate::output::{CategoryItem, OptionRow, RankedItem, SuggestionRow};

/// Element name for the children of an array element.
fn child_tag(parent: &str) -> &'static str {
    match parent {
        "ranking" => "entry",
        "breakdown" => "expense",
        "options" => "option",
        "suggestions" => "legislator",
        _ => "value",
    }
}

fn write_text<W: std::io::Write>(
    writer: &mut Writer<W>,
    tag: &str,
    text: &str,
) -> Result<(), quick_xml::Error> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

/// Write a JSON value as XML. Null fields are omitted.
fn write_value<W: std::io::Write>(
    writer: &mut Writer<W>,
    tag: &str,
    value: &serde_json::Value,
) -> Result<(), quick_xml::Error> {
    match value {
        serde_json::Value::Null => {}
        serde_json::Value::Bool(b) => write_text(writer, tag, if *b { "true" } else { "false" })?,
        serde_json::Value::Number(n) => write_text(writer, tag, &n.to_string())?,
        serde_json::Value::String(s) => write_text(writer, tag, s)?,
        serde_json::Value::Array(arr) => {
            writer.write_event(Event::Start(BytesStart::new(tag)))?;
            let child = child_tag(tag);
            for item in arr {
                write_value(writer, child, item)?;
            }
            writer.write_event(Event::End(BytesEnd::new(tag)))?;
        }
        serde_json::Value::Object(map) => {
            writer.write_event(Event::Start(BytesStart::new(tag)))?;
            for (key, val) in map {
                write_value(writer, key, val)?;
            }
            writer.write_event(Event::End(BytesEnd::new(tag)))?;
        }
    }
    Ok(())
}

/// Serialize rows under `root_tag`; an empty list is a self-closing root.
fn items_to_xml<T: Serialize>(root_tag: &str, items: &[T]) -> Result<String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    if items.is_empty() {
        writer.write_event(Event::Empty(BytesStart::new(root_tag)))?;
    } else {
        write_value(&mut writer, root_tag, &serde_json::to_value(items)?)?;
    }

    let buf = writer.into_inner().into_inner();
    Ok(String::from_utf8(buf)?)
}

pub fn rankings_to_xml(items: &[RankedItem]) -> Result<String> {
    items_to_xml("ranking", items)
}

pub fn breakdown_to_xml(items: &[CategoryItem]) -> Result<String> {
    items_to_xml("breakdown", items)
}

pub fn options_to_xml(rows: &[OptionRow]) -> Result<String> {
    items_to_xml("options", rows)
}

pub fn suggestions_to_xml(rows: &[SuggestionRow]) -> Result<String> {
    items_to_xml("suggestions", rows)
}
