//! Configuration options for the CSV codec.
//!
//! This module provides [`CsvOptions`], the per-instance format parameters:
//! column separator, quote character, line terminator, header handling and
//! record wrapping. Parameters are fixed for the lifetime of a writer or
//! reader; there is no dialect auto-detection.
//!
//! ## Examples
//!
//! ```rust
//! use flatcsv::{rows_to_string, row, CsvOptions};
//!
//! // Tab-separated output without quoting
//! let options = CsvOptions::new().with_separator('\t').without_quote();
//! let out = rows_to_string(&[row![1, "a"]], options).unwrap();
//! assert_eq!(out, "1\ta\n");
//! ```

use crate::{Error, Result};

#[cfg(windows)]
const DEFAULT_LINE_TERMINATOR: &str = "\r\n";
#[cfg(not(windows))]
const DEFAULT_LINE_TERMINATOR: &str = "\n";

/// Format parameters and feature flags for one codec instance.
///
/// Defaults: comma separator, `"` quote character, platform line terminator,
/// no header row, array-wrapped records.
///
/// # Examples
///
/// ```rust
/// use flatcsv::CsvOptions;
///
/// let options = CsvOptions::new()
///     .with_separator(';')
///     .with_header(true)
///     .with_wrap_as_array(false);
/// assert_eq!(options.separator, ';');
/// ```
#[derive(Clone, Debug)]
pub struct CsvOptions {
    /// Character separating fields within a row.
    pub separator: char,
    /// Quote character; `None` disables quoting and escaping entirely.
    pub quote: Option<char>,
    /// Sequence appended after every row, including the header row.
    pub line_terminator: String,
    /// Emit (encode) or consume (decode) a leading row of column names.
    /// Requires a bound schema on the encode side.
    pub write_header: bool,
    /// `true`: each record is a start-array/values/end-array triple.
    /// `false`: each record is an object with schema-resolved field names.
    pub wrap_as_array: bool,
    /// Quote empty string values so they stay distinguishable from
    /// never-written columns.
    pub quote_empty_strings: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        CsvOptions {
            separator: ',',
            quote: Some('"'),
            line_terminator: DEFAULT_LINE_TERMINATOR.to_string(),
            write_header: false,
            wrap_as_array: true,
            quote_empty_strings: false,
        }
    }
}

impl CsvOptions {
    /// Creates default options.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flatcsv::CsvOptions;
    ///
    /// let options = CsvOptions::new();
    /// assert_eq!(options.separator, ',');
    /// assert_eq!(options.quote, Some('"'));
    /// assert!(options.wrap_as_array);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the column separator.
    #[must_use]
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Sets the quote character.
    #[must_use]
    pub fn with_quote(mut self, quote: char) -> Self {
        self.quote = Some(quote);
        self
    }

    /// Disables quoting and escaping entirely.
    ///
    /// Field content is then written and read verbatim. Values containing the
    /// separator or a line terminator will not survive a round trip; that
    /// becomes the caller's responsibility, and the codec never re-enables
    /// quoting on its own.
    #[must_use]
    pub fn without_quote(mut self) -> Self {
        self.quote = None;
        self
    }

    /// Sets the output line terminator.
    ///
    /// Decoding accepts `\n`, `\r\n` and `\r` as row boundaries regardless of
    /// this setting; it only controls what the writer emits.
    #[must_use]
    pub fn with_line_terminator(mut self, terminator: impl Into<String>) -> Self {
        self.line_terminator = terminator.into();
        self
    }

    /// Enables or disables the header row.
    #[must_use]
    pub fn with_header(mut self, write_header: bool) -> Self {
        self.write_header = write_header;
        self
    }

    /// Selects array-wrapped (`true`) or object-wrapped (`false`) records.
    #[must_use]
    pub fn with_wrap_as_array(mut self, wrap_as_array: bool) -> Self {
        self.wrap_as_array = wrap_as_array;
        self
    }

    /// Quote empty string values on output.
    #[must_use]
    pub fn with_quote_empty_strings(mut self, quote_empty_strings: bool) -> Self {
        self.quote_empty_strings = quote_empty_strings;
        self
    }

    /// Whether quoting/escaping is in effect.
    #[inline]
    #[must_use]
    pub fn quoting_enabled(&self) -> bool {
        self.quote.is_some()
    }

    /// Checks the parameters for ambiguity.
    ///
    /// Separator, quote character and line terminator must be pairwise
    /// distinct while quoting is enabled, otherwise encode/decode is
    /// ambiguous.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for an empty line terminator, a
    /// quote character equal to the separator, or a separator/quote character
    /// occurring inside the line terminator.
    pub fn validate(&self) -> Result<()> {
        if self.line_terminator.is_empty() {
            return Err(Error::configuration("line terminator must not be empty"));
        }
        if self.line_terminator.contains(self.separator) {
            return Err(Error::configuration(format!(
                "column separator {:?} occurs in the line terminator",
                self.separator
            )));
        }
        if let Some(quote) = self.quote {
            if quote == self.separator {
                return Err(Error::configuration(format!(
                    "quote character and column separator are both {:?}",
                    quote
                )));
            }
            if self.line_terminator.contains(quote) {
                return Err(Error::configuration(format!(
                    "quote character {:?} occurs in the line terminator",
                    quote
                )));
            }
        }
        Ok(())
    }
}
