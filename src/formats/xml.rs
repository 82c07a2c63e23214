//! XML list format.
//!
//! # Format Structure
//!
//! ```xml
//! <?xml version="1.0" encoding="utf-8"?>
//! <ArrayOfCar>
//!   <Car>
//!     <Brand>Toyota</Brand>
//!     <Year>2010</Year>
//!     <Price>19999.99</Price>
//!   </Car>
//! </ArrayOfCar>
//! ```
//!
//! The root may also be named `Cars`. Attributes (such as namespace
//! declarations) and unknown elements are ignored on read. Missing child
//! elements leave the field at its default; a `Year` or `Price` that is present
//! but not numeric is a decode error.

use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::domain::model::Car;
use crate::domain::ports::RecordCodec;
use crate::utils::error::{EditorError, Result};

const ROOT: &str = "ArrayOfCar";
const ROOT_ALIASES: &[&str] = &[ROOT, "Cars"];
const RECORD: &str = "Car";
const BRAND: &str = "Brand";
const YEAR: &str = "Year";
const PRICE: &str = "Price";

#[derive(Debug, Clone, Default)]
pub struct XmlCodec;

impl XmlCodec {
    pub fn new() -> Self {
        Self
    }

    fn error(&self, message: impl Into<String>) -> EditorError {
        EditorError::decode(self.name(), message)
    }

    fn write_error(&self, e: impl std::fmt::Display) -> EditorError {
        EditorError::encode(self.name(), e.to_string())
    }

    /// Write a simple text element.
    fn write_text_element<W: Write>(
        &self,
        writer: &mut Writer<W>,
        name: &str,
        value: &str,
    ) -> Result<()> {
        writer
            .write_event(Event::Start(BytesStart::new(name)))
            .map_err(|e| self.write_error(e))?;
        writer
            .write_event(Event::Text(BytesText::new(value)))
            .map_err(|e| self.write_error(e))?;
        writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(|e| self.write_error(e))?;
        Ok(())
    }

    /// Assign the collected text of a finished field element to the current record.
    fn apply_field(&self, car: &mut Car, field: &str, text: &str) -> Result<()> {
        match field {
            BRAND => car.brand = text.to_string(),
            YEAR => {
                car.year = text.trim().parse().map_err(|_| {
                    self.error(format!("<{}> value '{}' is not an integer", YEAR, text))
                })?;
            }
            PRICE => {
                car.price = text
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|price| price.is_finite())
                    .ok_or_else(|| {
                        self.error(format!("<{}> value '{}' is not a finite number", PRICE, text))
                    })?;
            }
            _ => {}
        }
        Ok(())
    }

    fn open(&self, state: &mut ParseState, name: String) -> Result<()> {
        match state.stack.len() {
            0 => {
                if state.root_seen {
                    return Err(self.error(format!("second root element <{}>", name)));
                }
                if !ROOT_ALIASES.contains(&name.as_str()) {
                    return Err(self.error(format!(
                        "unexpected root element <{}>, expected <{}>",
                        name, ROOT
                    )));
                }
                state.root_seen = true;
            }
            1 if name == RECORD => state.current = Some(Car::default()),
            2 if state.current.is_some() => state.text.clear(),
            _ => {}
        }
        state.stack.push(name);
        Ok(())
    }

    fn close(&self, state: &mut ParseState, cars: &mut Vec<Car>) -> Result<()> {
        let depth = state.stack.len();
        let name = state.stack.pop().unwrap_or_default();
        match depth {
            3 => {
                if let Some(car) = state.current.as_mut() {
                    self.apply_field(car, &name, &state.text)?;
                }
            }
            2 => {
                if let Some(car) = state.current.take() {
                    cars.push(car);
                }
            }
            _ => {}
        }
        Ok(())
    }
}

/// Parser position inside the document.
#[derive(Default)]
struct ParseState {
    /// Open element names, outermost first.
    stack: Vec<String>,
    root_seen: bool,
    current: Option<Car>,
    text: String,
}

impl ParseState {
    fn in_field(&self) -> bool {
        self.stack.len() == 3 && self.current.is_some()
    }
}

impl RecordCodec for XmlCodec {
    fn name(&self) -> &'static str {
        "XML"
    }

    fn extension(&self) -> &'static str {
        ".xml"
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<Car>> {
        let content =
            std::str::from_utf8(bytes).map_err(|e| self.error(format!("invalid UTF-8: {}", e)))?;
        let content = content.trim_start_matches('\u{feff}');

        let mut reader = Reader::from_str(content);
        reader.trim_text(false);

        let mut state = ParseState::default();
        let mut cars = Vec::new();

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => {
                    let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                    self.open(&mut state, name)?;
                }
                Ok(Event::Empty(ref e)) => {
                    let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                    self.open(&mut state, name)?;
                    self.close(&mut state, &mut cars)?;
                }
                Ok(Event::End(_)) => self.close(&mut state, &mut cars)?,
                Ok(Event::Text(ref e)) => {
                    let text = e
                        .unescape()
                        .map_err(|err| self.error(format!("bad text content: {}", err)))?;
                    if state.in_field() {
                        state.text.push_str(&text);
                    } else if state.stack.is_empty() && !text.trim().is_empty() {
                        return Err(self.error("text found outside the root element"));
                    }
                }
                Ok(Event::CData(ref e)) => {
                    if state.in_field() {
                        state.text.push_str(&String::from_utf8_lossy(e));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(self.error(format!(
                        "malformed XML at byte {}: {}",
                        reader.buffer_position(),
                        e
                    )));
                }
                _ => {}
            }
        }

        if let Some(open) = state.stack.last() {
            return Err(self.error(format!("document ended before <{}> was closed", open)));
        }
        if !state.root_seen {
            return Err(self.error(format!("missing <{}> root element", ROOT)));
        }

        tracing::debug!("Decoded {} records from XML", cars.len());
        Ok(cars)
    }

    fn encode(&self, records: &[Car]) -> Result<Vec<u8>> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
            .map_err(|e| self.write_error(e))?;
        writer
            .write_event(Event::Start(BytesStart::new(ROOT)))
            .map_err(|e| self.write_error(e))?;

        for car in records {
            writer
                .write_event(Event::Start(BytesStart::new(RECORD)))
                .map_err(|e| self.write_error(e))?;
            self.write_text_element(&mut writer, BRAND, &car.brand)?;
            self.write_text_element(&mut writer, YEAR, &car.year.to_string())?;
            self.write_text_element(&mut writer, PRICE, &car.price.to_string())?;
            writer
                .write_event(Event::End(BytesEnd::new(RECORD)))
                .map_err(|e| self.write_error(e))?;
        }

        writer
            .write_event(Event::End(BytesEnd::new(ROOT)))
            .map_err(|e| self.write_error(e))?;

        Ok(writer.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ErrorKind;

    #[test]
    fn test_encode_shape() {
        let bytes = XmlCodec::new()
            .encode(&[Car::new("Toyota", 2010, 19999.99)])
            .unwrap();
        let xml = String::from_utf8(bytes).unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
        assert!(xml.contains("<ArrayOfCar>"), "Missing root in: {}", xml);
        assert!(xml.contains("<Brand>Toyota</Brand>"), "Missing brand in: {}", xml);
        assert!(xml.contains("<Year>2010</Year>"), "Missing year in: {}", xml);
        assert!(xml.contains("<Price>19999.99</Price>"), "Missing price in: {}", xml);
        assert!(xml.trim_end().ends_with("</ArrayOfCar>"));
    }

    #[test]
    fn test_roundtrip_preserves_whitespace_and_markup() {
        let codec = XmlCodec::new();
        let cars = vec![
            Car::new("  Rolls & <Royce>  ", 1925, 1e7),
            Car::new("", -3, -0.5),
            Car::new("Тойота", 0, 0.0),
        ];

        let decoded = codec.decode(&codec.encode(&cars).unwrap()).unwrap();
        assert_eq!(decoded, cars);
    }

    #[test]
    fn test_empty_collection_roundtrip() {
        let codec = XmlCodec::new();
        let decoded = codec.decode(&codec.encode(&[]).unwrap()).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_decode_document_with_namespaces_and_bom() {
        let xml = "\u{feff}<?xml version=\"1.0\"?>\r\n<ArrayOfCar xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" xmlns:xsd=\"http://www.w3.org/2001/XMLSchema\">\r\n  <Car>\r\n    <Brand>Lada</Brand>\r\n    <Year>1987</Year>\r\n    <Price>1500.5</Price>\r\n  </Car>\r\n  <Car>\r\n    <Year>2001</Year>\r\n    <Color>red</Color>\r\n  </Car>\r\n</ArrayOfCar>\r\n";

        let cars = XmlCodec::new().decode(xml.as_bytes()).unwrap();
        assert_eq!(
            cars,
            vec![Car::new("Lada", 1987, 1500.5), Car::new("", 2001, 0.0)]
        );
    }

    #[test]
    fn test_decode_self_closing_elements() {
        let xml = "<Cars><Car><Brand/><Year>1</Year><Price>2</Price></Car><Car/></Cars>";
        let cars = XmlCodec::new().decode(xml.as_bytes()).unwrap();

        assert_eq!(cars, vec![Car::new("", 1, 2.0), Car::default()]);
    }

    #[test]
    fn test_decode_rejects_malformed_documents() {
        let codec = XmlCodec::new();
        let cases: &[&str] = &[
            "",
            "[{",
            "<ArrayOfCar><Car>",
            "<ArrayOfCar></Cars>",
            "<Garage><Car/></Garage>",
            "<ArrayOfCar/><ArrayOfCar/>",
            "<ArrayOfCar><Car><Year>abc</Year></Car></ArrayOfCar>",
            "<ArrayOfCar><Car><Price>cheap</Price></Car></ArrayOfCar>",
            "<ArrayOfCar><Car><Price>NaN</Price></Car></ArrayOfCar>",
            "<ArrayOfCar><Car><Price>inf</Price></Car></ArrayOfCar>",
            "<ArrayOfCar><Car><Price>-infinity</Price></Car></ArrayOfCar>",
        ];

        for case in cases {
            let err = codec.decode(case.as_bytes()).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Decode, "case {:?} gave {}", case, err);
        }
    }
}
