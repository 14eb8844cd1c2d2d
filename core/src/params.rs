use std::fmt::Write;

/// Various styles of SQL parameter placeholders.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceholderStyle {
    /// Anonymous placeholders (`?`), every slot renders identically
    #[default]
    Positional,
    /// Dollar style placeholders (`$1`, `$2`, ...) numbered by bound-value index + 1
    Numbered,
    /// No native binding: the escaped literal is written in place
    Inline,
}

impl PlaceholderStyle {
    /// Whether connectors using this style bind values after preparing.
    pub const fn is_bindable(self) -> bool {
        !matches!(self, PlaceholderStyle::Inline)
    }

    /// Writes the placeholder for the value at `index` (0-based).
    pub(crate) fn write_placeholder(self, out: &mut String, index: usize) {
        match self {
            PlaceholderStyle::Positional => out.push('?'),
            PlaceholderStyle::Numbered => {
                let _ = write!(out, "${}", index + 1);
            }
            PlaceholderStyle::Inline => {}
        }
    }
}
