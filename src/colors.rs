//! Validation of the user-supplied condition to color map.

use indexmap::IndexMap;
use log::debug;
use serde::Serialize;

use crate::weather::Condition;

/// Condition key to color string, in the order the user wrote them.
pub type ColorConfig = IndexMap<String, String>;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ColorSettings {
    pub valid_colors: Option<IndexMap<Condition, String>>,
    pub warnings: Vec<String>,
}

/// Keeps the entries with a known condition key and a parseable color value.
///
/// Every rejected entry shows up in `warnings` as `"key: value"`.
pub fn validate_colors(config: Option<&ColorConfig>) -> ColorSettings {
    let Some(config) = config else {
        return ColorSettings::default();
    };

    let mut valid_colors = IndexMap::new();
    let mut warnings = Vec::new();
    for (key, value) in config {
        match key.parse::<Condition>() {
            Ok(condition) if is_valid_color(value) => {
                valid_colors.insert(condition, value.clone());
            }
            _ => {
                debug!("Rejecting color entry: key={key} value={value}");
                warnings.push(format!("{key}: {value}"));
            }
        }
    }

    ColorSettings {
        valid_colors: Some(valid_colors),
        warnings,
    }
}

/// Named colors, hex and `rgb()`/`rgba()`, and `hsl()`/`hsla()`.
pub fn is_valid_color(value: &str) -> bool {
    let value = value.trim().to_ascii_lowercase();
    let accepted_form = value.starts_with('#')
        || ["rgb(", "rgba(", "hsl(", "hsla("]
            .iter()
            .any(|prefix| value.starts_with(prefix))
        || (!value.is_empty() && value.chars().all(|c| c.is_ascii_alphabetic()));

    accepted_form && csscolorparser::parse(&value).is_ok()
}
