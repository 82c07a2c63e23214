//! JSON array format: `[{"brand": "Toyota", "year": 2010, "price": 19999.99}]`.

use crate::domain::model::Car;
use crate::domain::ports::RecordCodec;
use crate::utils::error::{EditorError, Result};

#[derive(Debug, Clone, Default)]
pub struct JsonCodec {
    pretty: bool,
}

impl JsonCodec {
    pub fn new() -> Self {
        Self { pretty: false }
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl RecordCodec for JsonCodec {
    fn name(&self) -> &'static str {
        "JSON"
    }

    fn extension(&self) -> &'static str {
        ".json"
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<Car>> {
        let bytes = bytes.strip_prefix("\u{feff}".as_bytes()).unwrap_or(bytes);
        serde_json::from_slice(bytes).map_err(|e| EditorError::decode(self.name(), e.to_string()))
    }

    fn encode(&self, records: &[Car]) -> Result<Vec<u8>> {
        // serde_json writes non-finite floats as `null`, which would not load back.
        if let Some((i, car)) = records.iter().enumerate().find(|(_, c)| !c.price.is_finite()) {
            return Err(EditorError::encode(
                self.name(),
                format!("record {} has non-finite price {}", i + 1, car.price),
            ));
        }

        let encoded = if self.pretty {
            serde_json::to_vec_pretty(records)
        } else {
            serde_json::to_vec(records)
        };
        encoded.map_err(|e| EditorError::encode(self.name(), e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ErrorKind;

    #[test]
    fn test_encode_empty_collection() {
        let bytes = JsonCodec::new().encode(&[]).unwrap();
        assert_eq!(bytes, b"[]");
    }

    #[test]
    fn test_encode_uses_lowercase_keys() {
        let bytes = JsonCodec::new()
            .encode(&[Car::new("Toyota", 2010, 19999.99)])
            .unwrap();

        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"[{"brand":"Toyota","year":2010,"price":19999.99}]"#
        );
    }

    #[test]
    fn test_decode_accepts_pascal_case_and_null_brand() {
        let input = r#"[{"Brand":"Lada","Year":1987,"Price":1500.0},{"brand":null,"year":1}]"#;
        let cars = JsonCodec::new().decode(input.as_bytes()).unwrap();

        assert_eq!(cars, vec![Car::new("Lada", 1987, 1500.0), Car::new("", 1, 0.0)]);
    }

    #[test]
    fn test_decode_malformed_json() {
        let err = JsonCodec::new().decode(b"[{").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn test_decode_rejects_non_array() {
        let err = JsonCodec::new()
            .decode(br#"{"brand":"Toyota","year":2010,"price":1.0}"#)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);

        let err = JsonCodec::new().decode(b"null").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn test_decode_rejects_wrong_field_type() {
        let err = JsonCodec::new()
            .decode(br#"[{"brand":"Toyota","year":"twenty","price":1.0}]"#)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn test_encode_rejects_non_finite_price() {
        for price in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let cars = vec![Car::new("Toyota", 2010, 1.0), Car::new("X", 1, price)];
            let err = JsonCodec::new().encode(&cars).unwrap_err();

            assert_eq!(err.kind(), ErrorKind::Encode);
            assert!(err.to_string().contains("record 2"), "{}", err);
        }
    }

    #[test]
    fn test_decode_rejects_duplicate_brand_keys() {
        let err = JsonCodec::new()
            .decode(br#"[{"brand":"Lada","Brand":"Volga","year":1,"price":1.0}]"#)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn test_pretty_roundtrip() {
        let codec = JsonCodec::new().pretty(true);
        let cars = vec![Car::new("Škoda \"Octavia\"", 2015, 0.1 + 0.2), Car::default()];

        let encoded = codec.encode(&cars).unwrap();
        assert!(String::from_utf8_lossy(&encoded).contains('\n'));
        assert_eq!(codec.decode(&encoded).unwrap(), cars);
    }
}
