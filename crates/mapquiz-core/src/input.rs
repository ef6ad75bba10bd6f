//! Text-input capability.

use serde::{Deserialize, Serialize};

/// How the field renders what the user types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Normal,
    Uppercase,
}

/// The field the player types guesses into.
pub trait TextInput {
    fn value(&self) -> &str;

    fn set_value(&mut self, value: &str);

    fn clear(&mut self) {
        self.set_value("");
    }

    /// Move keyboard focus to the field.
    fn focus(&mut self);

    fn set_display_mode(&mut self, mode: DisplayMode);
}

/// In-memory text field.
#[derive(Debug, Clone, Default)]
pub struct InputField {
    value: String,
    focused: bool,
    display_mode: DisplayMode,
}

impl InputField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Drop keyboard focus, e.g. when the user clicks the map.
    pub fn blur(&mut self) {
        self.focused = false;
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    /// Value as the user sees it. The stored value is never altered by the
    /// display mode.
    pub fn rendered(&self) -> String {
        match self.display_mode {
            DisplayMode::Normal => self.value.clone(),
            DisplayMode::Uppercase => self.value.to_uppercase(),
        }
    }
}

impl TextInput for InputField {
    fn value(&self) -> &str {
        &self.value
    }

    fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
    }

    fn focus(&mut self) {
        self.focused = true;
    }

    fn set_display_mode(&mut self, mode: DisplayMode) {
        self.display_mode = mode;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uppercase_mode_only_affects_rendering() {
        let mut field = InputField::new();
        field.set_value("Río");
        field.set_display_mode(DisplayMode::Uppercase);
        assert_eq!(field.rendered(), "RÍO");
        assert_eq!(field.value(), "Río");
    }

    #[test]
    fn clear_empties_value() {
        let mut field = InputField::new();
        field.set_value("france");
        field.clear();
        assert_eq!(field.value(), "");
    }
}
