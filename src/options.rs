//! Output format selection for RVN serialization.
//!
//! RVN has exactly two output modes:
//!
//! - [`Format::Compact`]: no insignificant whitespace, suitable for wire
//!   transfer or embedding.
//! - [`Format::Pretty`]: newline-separated with four-space indentation,
//!   suitable for files a human edits.
//!
//! Both modes parse identically; the decoder never needs to be told which
//! one produced its input.
//!
//! ## Examples
//!
//! ```rust
//! use serde_rvn::{to_string_with_format, Format};
//!
//! let compact = to_string_with_format(&vec![1, 2], Format::Compact).unwrap();
//! assert_eq!(compact, "[1,2,]");
//!
//! let pretty = to_string_with_format(&vec![1, 2], Format::Pretty).unwrap();
//! assert_eq!(pretty, "[\n    1,\n    2,\n]");
//! ```

/// Encoder output mode.
///
/// # Examples
///
/// ```rust
/// use serde_rvn::Format;
///
/// assert!(!Format::Compact.is_pretty());
/// assert!(Format::Pretty.is_pretty());
/// assert_eq!(Format::default(), Format::Compact);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Format {
    /// No insignificant whitespace.
    #[default]
    Compact,
    /// Newlines and four-space indentation.
    Pretty,
}

impl Format {
    /// Returns `true` for [`Format::Pretty`].
    #[inline]
    #[must_use]
    pub const fn is_pretty(self) -> bool {
        matches!(self, Format::Pretty)
    }
}

/// One level of pretty-print indentation.
pub(crate) const INDENT: &str = "    ";
