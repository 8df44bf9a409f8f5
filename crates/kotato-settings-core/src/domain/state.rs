//! In-memory setting values.
//!
//! [`ConfigState`] holds the current value of every setting the manager knows
//! about.  Exactly one instance lives for the whole process: it starts at the
//! built-in defaults, is overwritten field-by-field by the custom document at
//! startup, is mutated by user actions during the session, and is read back
//! whenever the custom document is flushed.
//!
//! # Domains
//!
//! Integer settings with a limited domain are clamped by their setters so the
//! state can never hold a value the document reader would reject.  This keeps
//! write-then-read round trips lossless.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use super::net_boost::NetBoost;

/// Accepted sticker heights, in pixels.
pub const STICKER_HEIGHT_RANGE: RangeInclusive<i32> = 64..=256;

/// Accepted number of text lines per chat list entry.
pub const CHAT_LIST_LINES_RANGE: RangeInclusive<i32> = 1..=2;

const DEFAULT_STICKER_HEIGHT: i32 = 170;
const DEFAULT_CHAT_LIST_LINES: i32 = 2;

/// Current value of every setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigState {
    main_font: String,
    semibold_font: String,
    semibold_font_is_bold: bool,
    monospace_font: String,
    use_system_font: bool,
    sticker_height: i32,
    adaptive_bubbles: bool,
    big_emoji_outline: bool,
    always_show_scheduled: bool,
    show_chat_id: bool,
    net_boost: NetBoost,
    show_phone_in_drawer: bool,
    interface_scales: Vec<i32>,
    chat_list_lines: i32,
    disable_up_edit: bool,
    custom_replaces: BTreeMap<String, String>,
    confirm_before_call: bool,
}

impl Default for ConfigState {
    /// Built-in defaults used before any document has been read.
    fn default() -> Self {
        Self {
            main_font: String::new(),
            semibold_font: String::new(),
            semibold_font_is_bold: false,
            monospace_font: String::new(),
            use_system_font: false,
            sticker_height: DEFAULT_STICKER_HEIGHT,
            adaptive_bubbles: false,
            big_emoji_outline: true,
            always_show_scheduled: false,
            show_chat_id: false,
            net_boost: NetBoost::Default,
            show_phone_in_drawer: true,
            interface_scales: Vec::new(),
            chat_list_lines: DEFAULT_CHAT_LIST_LINES,
            disable_up_edit: false,
            custom_replaces: BTreeMap::new(),
            confirm_before_call: false,
        }
    }
}

impl ConfigState {
    // ── Fonts ────────────────────────────────────────────────────────────────

    /// Main UI font family.  Empty means "use the bundled font".
    pub fn main_font(&self) -> &str {
        &self.main_font
    }

    pub fn set_main_font(&mut self, font: String) {
        self.main_font = font;
    }

    pub fn semibold_font(&self) -> &str {
        &self.semibold_font
    }

    pub fn set_semibold_font(&mut self, font: String) {
        self.semibold_font = font;
    }

    /// Render the semibold face by emboldening the main font instead.
    pub fn semibold_font_is_bold(&self) -> bool {
        self.semibold_font_is_bold
    }

    pub fn set_semibold_font_is_bold(&mut self, value: bool) {
        self.semibold_font_is_bold = value;
    }

    pub fn monospace_font(&self) -> &str {
        &self.monospace_font
    }

    pub fn set_monospace_font(&mut self, font: String) {
        self.monospace_font = font;
    }

    pub fn use_system_font(&self) -> bool {
        self.use_system_font
    }

    pub fn set_use_system_font(&mut self, value: bool) {
        self.use_system_font = value;
    }

    // ── Chat appearance ──────────────────────────────────────────────────────

    pub fn sticker_height(&self) -> i32 {
        self.sticker_height
    }

    /// Sets the sticker height, clamped to [`STICKER_HEIGHT_RANGE`].
    pub fn set_sticker_height(&mut self, height: i32) {
        self.sticker_height =
            height.clamp(*STICKER_HEIGHT_RANGE.start(), *STICKER_HEIGHT_RANGE.end());
    }

    pub fn adaptive_bubbles(&self) -> bool {
        self.adaptive_bubbles
    }

    pub fn set_adaptive_bubbles(&mut self, value: bool) {
        self.adaptive_bubbles = value;
    }

    pub fn big_emoji_outline(&self) -> bool {
        self.big_emoji_outline
    }

    pub fn set_big_emoji_outline(&mut self, value: bool) {
        self.big_emoji_outline = value;
    }

    pub fn always_show_scheduled(&self) -> bool {
        self.always_show_scheduled
    }

    pub fn set_always_show_scheduled(&mut self, value: bool) {
        self.always_show_scheduled = value;
    }

    pub fn show_chat_id(&self) -> bool {
        self.show_chat_id
    }

    pub fn set_show_chat_id(&mut self, value: bool) {
        self.show_chat_id = value;
    }

    pub fn show_phone_in_drawer(&self) -> bool {
        self.show_phone_in_drawer
    }

    pub fn set_show_phone_in_drawer(&mut self, value: bool) {
        self.show_phone_in_drawer = value;
    }

    pub fn chat_list_lines(&self) -> i32 {
        self.chat_list_lines
    }

    /// Sets the chat list line count, clamped to [`CHAT_LIST_LINES_RANGE`].
    pub fn set_chat_list_lines(&mut self, lines: i32) {
        self.chat_list_lines =
            lines.clamp(*CHAT_LIST_LINES_RANGE.start(), *CHAT_LIST_LINES_RANGE.end());
    }

    // ── Behaviour ────────────────────────────────────────────────────────────

    pub fn net_boost(&self) -> NetBoost {
        self.net_boost
    }

    pub fn set_net_boost(&mut self, boost: NetBoost) {
        self.net_boost = boost;
    }

    pub fn disable_up_edit(&self) -> bool {
        self.disable_up_edit
    }

    pub fn set_disable_up_edit(&mut self, value: bool) {
        self.disable_up_edit = value;
    }

    pub fn confirm_before_call(&self) -> bool {
        self.confirm_before_call
    }

    pub fn set_confirm_before_call(&mut self, value: bool) {
        self.confirm_before_call = value;
    }

    // ── Collections ──────────────────────────────────────────────────────────

    /// Extra interface scale percentages offered next to the stock ones.
    pub fn interface_scales(&self) -> &[i32] {
        &self.interface_scales
    }

    pub fn add_custom_scale(&mut self, scale: i32) {
        self.interface_scales.push(scale);
    }

    pub fn clear_custom_scales(&mut self) {
        self.interface_scales.clear();
    }

    /// Text replacements applied while typing, keyed by the source text.
    pub fn custom_replaces(&self) -> &BTreeMap<String, String> {
        &self.custom_replaces
    }

    /// Adds or overwrites the replacement for `from`.
    pub fn add_custom_replace(&mut self, from: String, to: String) {
        self.custom_replaces.insert(from, to);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_uses_builtin_values() {
        let state = ConfigState::default();
        assert_eq!(state.sticker_height(), 170);
        assert_eq!(state.chat_list_lines(), 2);
        assert_eq!(state.net_boost(), NetBoost::Default);
        assert!(state.big_emoji_outline());
        assert!(state.show_phone_in_drawer());
        assert!(state.main_font().is_empty());
        assert!(state.interface_scales().is_empty());
        assert!(state.custom_replaces().is_empty());
    }

    #[test]
    fn test_set_sticker_height_clamps_to_range() {
        let mut state = ConfigState::default();

        state.set_sticker_height(10);
        assert_eq!(state.sticker_height(), 64);

        state.set_sticker_height(1000);
        assert_eq!(state.sticker_height(), 256);

        state.set_sticker_height(128);
        assert_eq!(state.sticker_height(), 128);
    }

    #[test]
    fn test_set_chat_list_lines_clamps_to_range() {
        let mut state = ConfigState::default();

        state.set_chat_list_lines(0);
        assert_eq!(state.chat_list_lines(), 1);

        state.set_chat_list_lines(7);
        assert_eq!(state.chat_list_lines(), 2);
    }

    #[test]
    fn test_clear_custom_scales_empties_list() {
        let mut state = ConfigState::default();
        state.add_custom_scale(110);
        state.add_custom_scale(135);
        assert_eq!(state.interface_scales(), &[110, 135]);

        state.clear_custom_scales();
        assert!(state.interface_scales().is_empty());
    }

    #[test]
    fn test_add_custom_replace_overwrites_same_source() {
        let mut state = ConfigState::default();
        state.add_custom_replace("->".into(), "→".into());
        state.add_custom_replace("->".into(), "⇒".into());

        assert_eq!(state.custom_replaces().len(), 1);
        assert_eq!(state.custom_replaces()["->"], "⇒");
    }
}
