use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A single vehicle record.
///
/// The JSON shape is `{"brand": ..., "year": ..., "price": ...}`; the PascalCase
/// keys written by older tools are accepted on read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Car {
    #[serde(default, alias = "Brand", deserialize_with = "null_as_empty")]
    pub brand: String,
    #[serde(default, alias = "Year")]
    pub year: i32,
    #[serde(default, alias = "Price")]
    pub price: f64,
}

impl Car {
    pub fn new(brand: impl Into<String>, year: i32, price: f64) -> Self {
        Self {
            brand: brand.into(),
            year,
            price,
        }
    }
}

impl fmt::Display for Car {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Brand: {}", self.brand)?;
        writeln!(f, "  Year: {}", self.year)?;
        write!(f, "  Price: {}", self.price)
    }
}

/// The ordered in-memory list of records for one session.
pub type RecordCollection = Vec<Car>;

/// An editable field of a [`Car`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarField {
    Brand,
    Year,
    Price,
}

impl CarField {
    pub const ALL: [CarField; 3] = [CarField::Brand, CarField::Year, CarField::Price];

    /// Zero-based field index: 0 brand, 1 year, 2 price.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// One-based number shown in the edit menu.
    pub fn from_menu_choice(choice: usize) -> Option<Self> {
        choice.checked_sub(1).and_then(Self::from_index)
    }

    pub fn label(self) -> &'static str {
        match self {
            CarField::Brand => "brand",
            CarField::Year => "year",
            CarField::Price => "price",
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_car_is_empty() {
        let car = Car::default();
        assert_eq!(car.brand, "");
        assert_eq!(car.year, 0);
        assert_eq!(car.price, 0.0);
    }

    #[test]
    fn test_field_lookup() {
        assert_eq!(CarField::from_index(2), Some(CarField::Price));
        assert_eq!(CarField::from_index(3), None);
        assert_eq!(CarField::from_menu_choice(1), Some(CarField::Brand));
        assert_eq!(CarField::from_menu_choice(0), None);
    }

    #[test]
    fn test_display_lists_every_field() {
        let text = Car::new("Lada", 1987, 1500.5).to_string();
        assert_eq!(text, "  Brand: Lada\n  Year: 1987\n  Price: 1500.5");
    }
}
