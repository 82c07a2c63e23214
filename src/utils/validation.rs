use crate::utils::error::{EditorError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(EditorError::invalid_input(
            field_name,
            path,
            "Path cannot be empty",
        ));
    }

    if path.contains('\0') {
        return Err(EditorError::invalid_input(
            field_name,
            path,
            "Path contains null bytes",
        ));
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EditorError::config(format!(
            "{} cannot be empty or whitespace-only",
            field_name
        )));
    }
    Ok(())
}

pub fn validate_single_line(field_name: &str, value: &str) -> Result<()> {
    if value.contains(['\n', '\r']) {
        return Err(EditorError::config(format!(
            "{} must fit on a single line",
            field_name
        )));
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(EditorError::config(format!(
            "{} = '{}' is not one of: {}",
            field_name,
            value,
            allowed.join(", ")
        )));
    }
    Ok(())
}

/// Lenient integer parse used for year fields: surrounding whitespace is ignored.
pub fn parse_year(text: &str) -> Option<i32> {
    text.trim().parse().ok()
}

/// Lenient float parse used for price fields.
///
/// Accepts a comma as the decimal separator. Non-finite values are rejected
/// because they cannot be written back as JSON numbers.
pub fn parse_price(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let value = trimmed
        .parse::<f64>()
        .ok()
        .or_else(|| trimmed.replacen(',', ".", 1).parse::<f64>().ok())?;

    value.is_finite().then_some(value)
}
