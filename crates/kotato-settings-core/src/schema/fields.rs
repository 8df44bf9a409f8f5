//! Declarative field table and the generic read-and-apply routine.
//!
//! Every recognized setting is one [`SettingField`] entry in [`FIELDS`].  An
//! entry names its key (optionally inside a section object such as `fonts`),
//! an optional legacy alias, the JSON type it accepts (carried by the
//! [`Setter`] variant), an optional integer validator, the setter that
//! mutates [`ConfigState`], and the getter the writer uses.
//!
//! # Reading policy
//!
//! Hand-edited documents are never trusted:
//!
//! - a value of the wrong JSON type is treated as if the key were absent;
//! - integers accept any JSON number, with fractional parts truncated;
//! - arrays are processed element by element and bad elements are skipped;
//! - a field whose canonical key is absent or unusable falls back to its alias.
//!
//! Fields are applied one at a time, in table order, straight into the state.
//! There is no rollback: a document with some bad fields still applies all of
//! its good ones.

use serde_json::{json, Value};
use tracing::debug;

use super::document::{json_type_name, ConfigDocument};
use crate::domain::net_boost::NetBoost;
use crate::domain::state::{ConfigState, CHAT_LIST_LINES_RANGE, STICKER_HEIGHT_RANGE};

/// Integer check run before an [`Setter::Int`] setter.
pub type Validator = fn(i64) -> bool;

/// Setter for a field, tagged with the JSON type it accepts.
#[derive(Clone, Copy)]
pub enum Setter {
    /// Accepts only JSON strings.
    Str(fn(&mut ConfigState, String)),
    /// Accepts only JSON booleans.
    Bool(fn(&mut ConfigState, bool)),
    /// Accepts any JSON number, truncated towards zero.
    Int(fn(&mut ConfigState, i32)),
    /// Accepts only JSON arrays; the setter filters the elements itself.
    Array(fn(&mut ConfigState, &[Value])),
    /// Accepts several shapes; returns `false` when the value was not usable.
    Raw(fn(&mut ConfigState, &Value) -> bool),
}

/// One recognized setting.
#[derive(Clone, Copy)]
pub struct SettingField {
    /// Enclosing object key, e.g. `fonts`.
    pub section: Option<&'static str>,
    pub key: &'static str,
    /// Legacy key tried when `key` is absent or unusable.
    pub alias: Option<&'static str>,
    pub setter: Setter,
    pub validator: Option<Validator>,
    /// Current value for the custom document; `None` omits the key.
    pub getter: fn(&ConfigState) -> Option<Value>,
}

/// Result of applying one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOutcome {
    Applied,
    /// Neither the key nor its alias is present.
    Absent,
    /// Present, but with the wrong type or out of range.
    Rejected,
}

/// Counts and skipped paths from one [`apply_document`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplySummary {
    pub applied: usize,
    /// Dotted paths of fields that were present but unusable.
    pub rejected: Vec<String>,
}

impl SettingField {
    /// Dotted path, e.g. `fonts.main`.
    pub fn path(&self) -> String {
        match self.section {
            Some(section) => format!("{section}.{}", self.key),
            None => self.key.to_string(),
        }
    }

    /// Whether `path` names this field (canonical key or alias).
    pub fn matches(&self, path: &str) -> bool {
        let (section, key) = match path.split_once('.') {
            Some((section, key)) => (Some(section), key),
            None => (None, path),
        };
        self.section == section && (self.key == key || self.alias == Some(key))
    }

    /// Applies `value` if it has the accepted shape and passes the validator.
    fn accept(&self, state: &mut ConfigState, value: &Value) -> bool {
        match self.setter {
            Setter::Str(set) => match value {
                Value::String(s) => {
                    set(state, s.clone());
                    true
                }
                _ => false,
            },
            Setter::Bool(set) => match value {
                Value::Bool(b) => {
                    set(state, *b);
                    true
                }
                _ => false,
            },
            Setter::Int(set) => {
                let Some(v) = truncated_int(value) else {
                    return false;
                };
                if self.validator.is_some_and(|valid| !valid(v)) {
                    return false;
                }
                match i32::try_from(v) {
                    Ok(v) => {
                        set(state, v);
                        true
                    }
                    Err(_) => false,
                }
            }
            Setter::Array(set) => match value {
                Value::Array(items) => {
                    set(state, items);
                    true
                }
                _ => false,
            },
            Setter::Raw(set) => set(state, value),
        }
    }
}

/// Applies one field from `document` to `state`.
pub fn apply_field(
    field: &SettingField,
    document: &ConfigDocument,
    state: &mut ConfigState,
) -> FieldOutcome {
    let scope = match field.section {
        None => document,
        Some(section) => match document.get(section) {
            None => return FieldOutcome::Absent,
            Some(Value::Object(inner)) => inner,
            Some(_) => return FieldOutcome::Rejected,
        },
    };

    let mut outcome = FieldOutcome::Absent;
    for key in std::iter::once(field.key).chain(field.alias) {
        let Some(value) = scope.get(key) else {
            continue;
        };
        if field.accept(state, value) {
            return FieldOutcome::Applied;
        }
        debug!(
            "ignoring {key}: {} is not usable here",
            json_type_name(value)
        );
        outcome = FieldOutcome::Rejected;
    }
    outcome
}

/// Applies every recognized field of `document` to `state`.
///
/// Unknown keys are ignored.
pub fn apply_document(document: &ConfigDocument, state: &mut ConfigState) -> ApplySummary {
    let mut summary = ApplySummary::default();
    for field in FIELDS {
        match apply_field(field, document, state) {
            FieldOutcome::Applied => summary.applied += 1,
            FieldOutcome::Rejected => summary.rejected.push(field.path()),
            FieldOutcome::Absent => {}
        }
    }
    summary
}

/// Looks up a field by dotted path (canonical key or alias).
pub fn find_field(path: &str) -> Option<&'static SettingField> {
    FIELDS.iter().find(|field| field.matches(path))
}

/// Applies a single option addressed by dotted path, with the same type and
/// range rules as the document reader.
///
/// Returns [`FieldOutcome::Absent`] when no field matches `path`.
pub fn apply_option(path: &str, value: Value, state: &mut ConfigState) -> FieldOutcome {
    let Some(field) = find_field(path) else {
        return FieldOutcome::Absent;
    };
    let key = path.rsplit_once('.').map_or(path, |(_, key)| key);

    let mut scope = ConfigDocument::new();
    scope.insert(key.to_string(), value);
    let document = match field.section {
        None => scope,
        Some(section) => {
            let mut outer = ConfigDocument::new();
            outer.insert(section.to_string(), Value::Object(scope));
            outer
        }
    };
    apply_field(field, &document, state)
}

/// Reads a JSON number as an integer, truncating any fractional part.
///
/// Out-of-range floats saturate at the `i64` bounds.
pub fn truncated_int(value: &Value) -> Option<i64> {
    let Value::Number(n) = value else {
        return None;
    };
    if let Some(v) = n.as_i64() {
        return Some(v);
    }
    if n.as_u64().is_some() {
        return Some(i64::MAX);
    }
    n.as_f64().map(|f| f.trunc() as i64)
}

// ── Field-specific setters and getters ────────────────────────────────────────

fn apply_net_boost(state: &mut ConfigState, value: &Value) -> bool {
    let boost = match value {
        Value::String(name) => NetBoost::from_name(name),
        Value::Null => NetBoost::Default,
        Value::Number(_) => match truncated_int(value) {
            Some(level) => NetBoost::from_level(level),
            None => return false,
        },
        _ => return false,
    };
    state.set_net_boost(boost);
    true
}

/// A present `scales` array replaces the whole list; non-numeric entries are
/// dropped.
fn apply_scales(state: &mut ConfigState, items: &[Value]) {
    state.clear_custom_scales();
    for item in items {
        match truncated_int(item).and_then(|v| i32::try_from(v).ok()) {
            Some(scale) => state.add_custom_scale(scale),
            None => debug!("ignoring scale entry: {}", json_type_name(item)),
        }
    }
}

/// Each `replaces` entry must be a `[from, to]` pair of strings.  Entries are
/// merged into the existing replacements.
fn apply_replaces(state: &mut ConfigState, items: &[Value]) {
    for item in items {
        match item.as_array().map(Vec::as_slice) {
            Some([Value::String(from), Value::String(to)]) => {
                state.add_custom_replace(from.clone(), to.clone());
            }
            _ => debug!("ignoring replacement entry that is not a [from, to] pair"),
        }
    }
}

fn non_empty(value: &str) -> Option<Value> {
    (!value.is_empty()).then(|| Value::String(value.to_string()))
}

fn sticker_height_in_range(v: i64) -> bool {
    (i64::from(*STICKER_HEIGHT_RANGE.start())..=i64::from(*STICKER_HEIGHT_RANGE.end()))
        .contains(&v)
}

fn chat_list_lines_in_range(v: i64) -> bool {
    (i64::from(*CHAT_LIST_LINES_RANGE.start())..=i64::from(*CHAT_LIST_LINES_RANGE.end()))
        .contains(&v)
}

// ── The table ─────────────────────────────────────────────────────────────────

const FONTS: Option<&str> = Some("fonts");

/// Every recognized setting, in reading and writing order.
pub static FIELDS: &[SettingField] = &[
    SettingField {
        section: FONTS,
        key: "main",
        alias: None,
        setter: Setter::Str(ConfigState::set_main_font),
        validator: None,
        getter: |s| non_empty(s.main_font()),
    },
    SettingField {
        section: FONTS,
        key: "semibold",
        alias: None,
        setter: Setter::Str(ConfigState::set_semibold_font),
        validator: None,
        getter: |s| non_empty(s.semibold_font()),
    },
    SettingField {
        section: FONTS,
        key: "semibold_is_bold",
        alias: None,
        setter: Setter::Bool(ConfigState::set_semibold_font_is_bold),
        validator: None,
        getter: |s| Some(Value::Bool(s.semibold_font_is_bold())),
    },
    SettingField {
        section: FONTS,
        key: "monospaced",
        alias: None,
        setter: Setter::Str(ConfigState::set_monospace_font),
        validator: None,
        getter: |s| non_empty(s.monospace_font()),
    },
    SettingField {
        section: FONTS,
        key: "use_system_font",
        alias: None,
        setter: Setter::Bool(ConfigState::set_use_system_font),
        validator: None,
        getter: |s| Some(Value::Bool(s.use_system_font())),
    },
    SettingField {
        section: None,
        key: "sticker_height",
        alias: None,
        setter: Setter::Int(ConfigState::set_sticker_height),
        validator: Some(sticker_height_in_range),
        getter: |s| Some(json!(s.sticker_height())),
    },
    SettingField {
        section: None,
        key: "adaptive_bubbles",
        alias: Some("adaptive_baloons"),
        setter: Setter::Bool(ConfigState::set_adaptive_bubbles),
        validator: None,
        getter: |s| Some(Value::Bool(s.adaptive_bubbles())),
    },
    SettingField {
        section: None,
        key: "big_emoji_outline",
        alias: None,
        setter: Setter::Bool(ConfigState::set_big_emoji_outline),
        validator: None,
        getter: |s| Some(Value::Bool(s.big_emoji_outline())),
    },
    SettingField {
        section: None,
        key: "always_show_scheduled",
        alias: None,
        setter: Setter::Bool(ConfigState::set_always_show_scheduled),
        validator: None,
        getter: |s| Some(Value::Bool(s.always_show_scheduled())),
    },
    SettingField {
        section: None,
        key: "show_chat_id",
        alias: None,
        setter: Setter::Bool(ConfigState::set_show_chat_id),
        validator: None,
        getter: |s| Some(Value::Bool(s.show_chat_id())),
    },
    SettingField {
        section: None,
        key: "net_speed_boost",
        alias: None,
        setter: Setter::Raw(apply_net_boost),
        validator: None,
        getter: |s| Some(json!(s.net_boost().level())),
    },
    SettingField {
        section: None,
        key: "show_phone_in_drawer",
        alias: None,
        setter: Setter::Bool(ConfigState::set_show_phone_in_drawer),
        validator: None,
        getter: |s| Some(Value::Bool(s.show_phone_in_drawer())),
    },
    SettingField {
        section: None,
        key: "scales",
        alias: None,
        setter: Setter::Array(apply_scales),
        validator: None,
        getter: |s| Some(json!(s.interface_scales())),
    },
    SettingField {
        section: None,
        key: "chat_list_lines",
        alias: None,
        setter: Setter::Int(ConfigState::set_chat_list_lines),
        validator: Some(chat_list_lines_in_range),
        getter: |s| Some(json!(s.chat_list_lines())),
    },
    SettingField {
        section: None,
        key: "disable_up_edit",
        alias: None,
        setter: Setter::Bool(ConfigState::set_disable_up_edit),
        validator: None,
        getter: |s| Some(Value::Bool(s.disable_up_edit())),
    },
    SettingField {
        section: None,
        key: "replaces",
        alias: None,
        setter: Setter::Array(apply_replaces),
        validator: None,
        getter: |s| {
            let pairs = s
                .custom_replaces()
                .iter()
                .map(|(from, to)| json!([from, to]))
                .collect();
            Some(Value::Array(pairs))
        },
    },
    SettingField {
        section: None,
        key: "confirm_before_calls",
        alias: None,
        setter: Setter::Bool(ConfigState::set_confirm_before_call),
        validator: None,
        getter: |s| Some(Value::Bool(s.confirm_before_call())),
    },
];
