//! Shared writer helpers for report generation.

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

/// Write `<name attr=..>text</name>`.
pub fn write_attributed_text<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    attributes: &[(&str, &str)],
    text: &str,
) -> Result<()> {
    let mut element = BytesStart::new(name);
    for (key, value) in attributes {
        element.push_attribute((*key, *value));
    }
    writer.write_event(Event::Start(element))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Write an empty element with attributes.
pub fn write_empty_element<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    attributes: &[(&str, &str)],
) -> Result<()> {
    let mut element = BytesStart::new(name);
    for (key, value) in attributes {
        element.push_attribute((*key, *value));
    }
    writer.write_event(Event::Empty(element))?;
    Ok(())
}

/// A table row of plain text cells.
pub fn write_table_row<W: Write>(writer: &mut Writer<W>, tag: &str, cells: &[&str]) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("tr")))?;
    for cell in cells {
        write_text_element(writer, tag, cell)?;
    }
    writer.write_event(Event::End(BytesEnd::new("tr")))?;
    Ok(())
}

/// Percentage with one decimal, e.g. `37.5%`.
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

/// Benefit numbers with at most one decimal.
pub fn format_benefit(value: f64) -> String {
    if (value - value.round()).abs() < f64::EPSILON {
        format!("{}", value.round() as i64)
    } else {
        format!("{value:.1}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_formatting() {
        assert_eq!(format_percent(0.375), "37.5%");
        assert_eq!(format_percent(1.0), "100.0%");
    }

    #[test]
    fn benefit_formatting() {
        assert_eq!(format_benefit(40.0), "40");
        assert_eq!(format_benefit(12.25), "12.2");
    }
}
