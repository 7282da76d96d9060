//! Shared element-writing helpers.

use std::io::Write;

use anyhow::Result;
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

/// Write `<name>text</name>`.
pub fn write_text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Write a table row of `<td>` cells.
pub fn write_row<W: Write>(writer: &mut Writer<W>, cells: &[String]) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("tr")))?;
    for cell in cells {
        write_text_element(writer, "td", cell)?;
    }
    writer.write_event(Event::End(BytesEnd::new("tr")))?;
    Ok(())
}

/// Write a table header row of `<th>` cells.
pub fn write_header_row<W: Write>(writer: &mut Writer<W>, cells: &[String]) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("tr")))?;
    for cell in cells {
        write_text_element(writer, "th", cell)?;
    }
    writer.write_event(Event::End(BytesEnd::new("tr")))?;
    Ok(())
}

/// Percentage with one decimal, e.g. `66.7`.
pub fn format_percent(value: f64) -> String {
    format!("{value:.1}")
}

/// Mean with two decimals, or a dash for no data.
pub fn format_mean(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{value:.2}"),
        None => "-".to_string(),
    }
}
