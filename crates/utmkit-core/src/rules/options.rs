use crate::error::CoreError;
use crate::rules::slug::slugify;

pub fn normalize_option_label(raw: &str) -> Result<String, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::EmptyOptionLabel);
    }
    Ok(trimmed.to_string())
}

/// Picks the stored value for a new option: an explicit value wins,
/// otherwise the label is slugified.
pub fn derive_option_value(label: &str, explicit: Option<&str>) -> Result<String, CoreError> {
    let value = match explicit.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => value.to_string(),
        None => slugify(label),
    };
    if value.is_empty() {
        return Err(CoreError::InvalidOptionValue(label.to_string()));
    }
    Ok(value)
}

pub fn next_display_order(current_max: Option<i64>) -> i64 {
    current_max.unwrap_or(0) + 1
}
