//! Selectors the sweep queries.

/// Every element predicate the sweep uses.
///
/// Kept as a closed set so non-CSS backends can evaluate them without a
/// selector engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selector {
    /// Native checkbox that is currently checked.
    CheckedNativeCheckbox,
    /// Any native checkbox.
    NativeCheckbox,
    /// ARIA checkbox whose `aria-checked` is `"true"`.
    CheckedAriaCheckbox,
    /// Any element with `role="checkbox"`.
    AriaCheckbox,
    /// Any element whose `aria-checked` is `"true"`.
    AriaChecked,
    Label,
    Main,
    RoleMain,
    /// `div` and `section` elements.
    Block,
}

impl Selector {
    /// Finder predicate groups, in the order their matches are concatenated.
    pub const CHECKED_GROUPS: [Selector; 3] = [
        Selector::CheckedNativeCheckbox,
        Selector::CheckedAriaCheckbox,
        Selector::AriaChecked,
    ];

    /// CSS text for this selector.
    pub fn css(self) -> &'static str {
        match self {
            Selector::CheckedNativeCheckbox => r#"input[type="checkbox"]:checked"#,
            Selector::NativeCheckbox => r#"input[type="checkbox"]"#,
            Selector::CheckedAriaCheckbox => r#"[role="checkbox"][aria-checked="true"]"#,
            Selector::AriaCheckbox => r#"[role="checkbox"]"#,
            Selector::AriaChecked => r#"[aria-checked="true"]"#,
            Selector::Label => "label",
            Selector::Main => "main",
            Selector::RoleMain => r#"[role="main"]"#,
            Selector::Block => "div, section",
        }
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.css())
    }
}
