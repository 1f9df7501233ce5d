//! CLI styling utilities
//!
//! Semantic styling through the [`Stylize`] trait. Color support detection
//! is delegated to `owo-colors` (respects `NO_COLOR`, `CLICOLOR`,
//! `CLICOLOR_FORCE` and TTY detection).
//!
//! | Method        | Color  | Stream | Use                          |
//! |---------------|--------|--------|------------------------------|
//! | `.accent()`   | Cyan   | stdout | Field names, URLs, counts    |
//! | `.success()`  | Green  | stdout | Successful submissions       |
//! | `.error()`    | Red    | stderr | Errors, failed submissions   |
//! | `.warn()`     | Yellow | stderr | Declined prompts             |
//! | `.muted()`    | Dim    | stdout | Unchanged fields, metadata   |
//! | `.emphasis()` | Bold   | stdout | Headers, status lines        |

use std::fmt::{self, Display};

use owo_colors::{OwoColorize, Stream, Style};

const ACCENT: Style = Style::new().cyan();
const SUCCESS: Style = Style::new().green();
const ERROR: Style = Style::new().red();
const WARN: Style = Style::new().yellow();
const MUTED: Style = Style::new().dimmed();
const EMPHASIS: Style = Style::new().bold();

/// A value rendered with a style when the target stream supports color
#[derive(Clone, Debug)]
pub struct Styled<T> {
    value: T,
    style: Style,
    stream: Stream,
}

impl<T> Styled<T> {
    const fn new(value: T, style: Style, stream: Stream) -> Self {
        Self {
            value,
            style,
            stream,
        }
    }
}

impl<T: Display> Display for Styled<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.value
                .if_supports_color(self.stream, |v| v.style(self.style))
        )
    }
}

/// Semantic styling for anything displayable
pub trait Stylize: Display {
    /// Cyan, for field names and URLs
    fn accent(&self) -> Styled<&Self> {
        Styled::new(self, ACCENT, Stream::Stdout)
    }

    /// Green, for successful outcomes
    fn success(&self) -> Styled<&Self> {
        Styled::new(self, SUCCESS, Stream::Stdout)
    }

    /// Red on stderr, for errors and failures
    fn error(&self) -> Styled<&Self> {
        Styled::new(self, ERROR, Stream::Stderr)
    }

    /// Yellow on stderr
    fn warn(&self) -> Styled<&Self> {
        Styled::new(self, WARN, Stream::Stderr)
    }

    /// Dimmed, for secondary details
    fn muted(&self) -> Styled<&Self> {
        Styled::new(self, MUTED, Stream::Stdout)
    }

    /// Bold
    fn emphasis(&self) -> Styled<&Self> {
        Styled::new(self, EMPHASIS, Stream::Stdout)
    }
}

impl<T: Display + ?Sized> Stylize for T {}

/// Success checkmark
pub const CHECK: &str = "✓";

/// Failure cross
pub const CROSS: &str = "✗";

/// Marker for a field that will be sent
pub const CHANGED: &str = "+";

/// Marker for a field dropped as unchanged
pub const UNCHANGED: &str = "=";

/// Green checkmark
pub const fn check() -> Styled<&'static str> {
    Styled::new(CHECK, SUCCESS, Stream::Stdout)
}

/// Red cross (stderr)
pub const fn cross() -> Styled<&'static str> {
    Styled::new(CROSS, ERROR, Stream::Stderr)
}

/// Green change marker
pub const fn changed() -> Styled<&'static str> {
    Styled::new(CHANGED, SUCCESS, Stream::Stdout)
}

/// Dimmed unchanged marker
pub const fn unchanged() -> Styled<&'static str> {
    Styled::new(UNCHANGED, MUTED, Stream::Stdout)
}
