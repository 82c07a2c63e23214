//! Line-oriented text format.
//!
//! Each record is written as four lines: a marker line, then brand, year and price.
//!
//! ```text
//! Car
//! Toyota
//! 2010
//! 19999.99
//! ```
//!
//! Older files carry no marker and store each record in three lines. On read the
//! layout is chosen from the first line: if it is a known marker the file is read
//! in groups of four with the marker skipped, otherwise in groups of three.
//! Fields that fail to parse keep their defaults; a trailing partial group is
//! still read.

use crate::domain::model::Car;
use crate::domain::ports::RecordCodec;
use crate::utils::error::Result;
use crate::utils::validation::{parse_price, parse_year};

pub const DEFAULT_MARKER: &str = "Car";

/// Markers recognised on read in addition to the configured one.
const KNOWN_MARKERS: &[&str] = &["Car", "Машина"];

#[derive(Debug, Clone)]
pub struct TextCodec {
    marker: String,
}

impl TextCodec {
    pub fn new() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_string(),
        }
    }

    /// Use a different marker line when writing.
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    fn is_marker(&self, line: &str) -> bool {
        line == self.marker || KNOWN_MARKERS.contains(&line)
    }
}

impl Default for TextCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordCodec for TextCodec {
    fn name(&self) -> &'static str {
        "text"
    }

    fn extension(&self) -> &'static str {
        ".txt"
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<Car>> {
        let content = String::from_utf8_lossy(bytes);
        if let std::borrow::Cow::Owned(_) = content {
            tracing::warn!("Text input is not valid UTF-8; invalid bytes were replaced");
        }
        let content = content.trim_start_matches('\u{feff}');

        let lines: Vec<&str> = content.lines().collect();
        let marked = lines.first().is_some_and(|first| self.is_marker(first));
        let group_size = if marked { 4 } else { 3 };
        tracing::debug!(
            "Decoding {} text lines in groups of {}",
            lines.len(),
            group_size
        );

        let cars = lines
            .chunks(group_size)
            .map(|group| {
                let fields = if marked { &group[1..] } else { group };
                let mut car = Car::default();
                if let Some(brand) = fields.first() {
                    car.brand = brand.to_string();
                }
                if let Some(year) = fields.get(1).and_then(|l| parse_year(l)) {
                    car.year = year;
                }
                if let Some(price) = fields.get(2).and_then(|l| parse_price(l)) {
                    car.price = price;
                }
                car
            })
            .collect();

        Ok(cars)
    }

    fn encode(&self, records: &[Car]) -> Result<Vec<u8>> {
        let mut out = String::new();
        for car in records {
            if car.brand.contains(['\n', '\r']) {
                tracing::warn!(
                    "Brand {:?} contains a line break; the text file will not reload cleanly",
                    car.brand
                );
            }
            out.push_str(&self.marker);
            out.push('\n');
            out.push_str(&car.brand);
            out.push('\n');
            out.push_str(&car.year.to_string());
            out.push('\n');
            out.push_str(&car.price.to_string());
            out.push('\n');
        }
        Ok(out.into_bytes())
    }
}
