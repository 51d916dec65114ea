//! Terminal capability detection and ANSI styling.

/// ANSI escape codes used by the text renderer.
pub mod colors {
    /// Reset all styling.
    pub const RESET: &str = "\x1b[0m";
    /// Bold reverse green for the start tag.
    pub const TAG_START: &str = "\x1b[1;7;32m";
    /// Bold reverse magenta for the goal tag.
    pub const TAG_GOAL: &str = "\x1b[1;7;35m";
    /// Gray for secondary elements.
    pub const GRAY: &str = "\x1b[90m";
    /// Green for distances.
    pub const GREEN: &str = "\x1b[32m";
}

/// Resolved color codes, either ANSI sequences or empty strings when color
/// is disabled.
#[derive(Debug, Clone, Copy)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub tag_start: &'static str,
    pub tag_goal: &'static str,
    pub gray: &'static str,
    pub green: &'static str,
}

impl ColorPalette {
    /// Palette with ANSI colors enabled.
    pub fn colored() -> Self {
        Self {
            reset: colors::RESET,
            tag_start: colors::TAG_START,
            tag_goal: colors::TAG_GOAL,
            gray: colors::GRAY,
            green: colors::GREEN,
        }
    }

    /// Palette that emits no escape codes.
    pub fn plain() -> Self {
        Self {
            reset: "",
            tag_start: "",
            tag_goal: "",
            gray: "",
            green: "",
        }
    }

    /// Pick a palette based on [`supports_color`].
    pub fn detect() -> Self {
        if supports_color() {
            Self::colored()
        } else {
            Self::plain()
        }
    }
}

/// Check if the terminal should receive ANSI color codes.
///
/// Honors the `NO_COLOR` and `TERM=dumb` conventions.
#[must_use]
pub fn supports_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if let Ok(term) = std::env::var("TERM") {
        if term.eq_ignore_ascii_case("dumb") {
            return false;
        }
    }
    true
}
