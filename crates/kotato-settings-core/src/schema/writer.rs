//! Builds the custom and default documents from state.
//!
//! The custom document is always regenerated in full from [`ConfigState`];
//! keys a user added by hand that the field table does not know are lost on
//! the next write.

use serde_json::{json, Value};

use super::document::ConfigDocument;
use super::fields::FIELDS;
use crate::domain::state::ConfigState;

/// Header written above the default document.
pub const DEFAULT_HEADER: &str = "
// This is a list of default options for Kotatogram Desktop
// Please don't modify it, its content is not used in any way
// You can place your own options in the 'kotato-settings-custom.json' file

";

/// Header written above the custom document.
pub const CUSTOM_HEADER: &str = "
// This file was automatically generated from current settings
// It's better to edit it with app closed, so there will be no rewrites
// You should restart app to see changes

";

const TEMPLATE_MAIN_FONT: &str = "Open Sans";
const TEMPLATE_SEMIBOLD_FONT: &str = "Open Sans Semibold";
const TEMPLATE_MONOSPACE_FONT: &str = "Consolas";

/// Serializes every field of `state`, skipping the ones whose getter omits
/// them (empty font names).
pub fn custom_document(state: &ConfigState) -> ConfigDocument {
    let mut document = ConfigDocument::new();
    for field in FIELDS {
        let Some(value) = (field.getter)(state) else {
            continue;
        };
        match field.section {
            None => {
                document.insert(field.key.to_string(), value);
            }
            Some(section) => {
                let entry = document
                    .entry(section)
                    .or_insert_with(|| Value::Object(ConfigDocument::new()));
                if let Value::Object(inner) = entry {
                    inner.insert(field.key.to_string(), value);
                }
            }
        }
    }
    document
}

/// Builds the informational default document for `version`.
///
/// Fonts show the stock family names, `net_speed_boost` is `null` and the
/// collections are empty; everything else carries its built-in default.
pub fn default_document(version: i64) -> ConfigDocument {
    let mut template = ConfigState::default();
    template.set_main_font(TEMPLATE_MAIN_FONT.to_string());
    template.set_semibold_font(TEMPLATE_SEMIBOLD_FONT.to_string());
    template.set_monospace_font(TEMPLATE_MONOSPACE_FONT.to_string());

    let mut document = ConfigDocument::new();
    document.insert("version".to_string(), json!(version));
    document.extend(custom_document(&template));
    document.insert("net_speed_boost".to_string(), Value::Null);
    document
}

/// Reads the integer `version` of a default document.
///
/// A float with no fractional part (`1004009.0`) counts as that integer.
pub fn document_version(document: &ConfigDocument) -> Option<i64> {
    let version = document.get("version")?;
    if let Some(v) = version.as_i64() {
        return Some(v);
    }
    version
        .as_f64()
        .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
        .map(|f| f as i64)
}
