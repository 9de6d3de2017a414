//! The quoting/escaping engine.
//!
//! Encode side: decide whether a text value needs quoting under the current
//! format parameters and emit it quoted (embedded quote characters doubled)
//! or raw. Decode side: scan one field starting at a field boundary,
//! collapsing doubled quotes and keeping separators or line terminators
//! inside a quoted span as data, and report how many input bytes the field
//! consumed so row resegmentation can advance past multi-line fields.
//!
//! With quoting disabled both directions are verbatim passthrough; the
//! round-trip guarantee then rests with the caller.

use crate::{CsvOptions, Error, Result};

/// One decoded field: its text, whether it was quoted on the wire, and the
/// number of input bytes consumed (trailing separator/terminator excluded).
///
/// `was_quoted` lets callers running with quoting disabled tell literal
/// quote characters in data apart from format syntax.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedField {
    pub text: String,
    pub was_quoted: bool,
    pub consumed: usize,
}

/// Whether `value` must be quoted to survive a round trip.
///
/// True iff it contains the separator, the quote character, a carriage
/// return or line feed, any character of the configured line terminator, or
/// is empty while empty strings are configured to be quoted. Always false
/// with quoting disabled.
///
/// # Examples
///
/// ```rust
/// use flatcsv::{quote::needs_quoting, CsvOptions};
///
/// let options = CsvOptions::new();
/// assert!(needs_quoting("a,b", &options));
/// assert!(needs_quoting("say \"hi\"", &options));
/// assert!(needs_quoting("two\nlines", &options));
/// assert!(!needs_quoting("plain", &options));
/// ```
#[must_use]
pub fn needs_quoting(value: &str, options: &CsvOptions) -> bool {
    let Some(quote) = options.quote else {
        return false;
    };
    if value.is_empty() {
        return options.quote_empty_strings;
    }
    value.chars().any(|c| {
        c == options.separator
            || c == quote
            || c == '\n'
            || c == '\r'
            || options.line_terminator.contains(c)
    })
}

/// Encodes one field into `out`, quoting and doubling as needed.
///
/// With quoting disabled this is the identity function regardless of
/// content; values containing the separator are written as-is and will not
/// round-trip (documented, not enforced).
pub fn write_field(out: &mut String, value: &str, options: &CsvOptions) {
    let Some(quote) = options.quote else {
        out.push_str(value);
        return;
    };
    if !needs_quoting(value, options) {
        out.push_str(value);
        return;
    }
    out.push(quote);
    for ch in value.chars() {
        if ch == quote {
            out.push(quote);
        }
        out.push(ch);
    }
    out.push(quote);
}

/// Decodes one field from the start of `input`.
///
/// `input` must begin at a field boundary. Scanning stops before the
/// separator or line terminator that ends the field; `consumed` tells the
/// caller how far to advance. A quoted span may contain separators and line
/// terminators as data, so `consumed` can cross physical lines.
///
/// Error positions are relative to the start of `input`; the row reader
/// re-anchors them.
///
/// # Errors
///
/// Returns [`Error::DecodeFormat`] for a quoted field that is not
/// terminated before end of input, or for stray content between a closing
/// quote and the next separator (trailing blanks are tolerated).
pub fn read_field(input: &str, options: &CsvOptions) -> Result<DecodedField> {
    match options.quote {
        Some(quote) if input.starts_with(quote) => read_quoted(input, quote, options),
        _ => Ok(read_unquoted(input, options)),
    }
}

fn read_unquoted(input: &str, options: &CsvOptions) -> DecodedField {
    let mut end = input.len();
    for (i, ch) in input.char_indices() {
        if ch == options.separator || ch == '\n' || ch == '\r' {
            end = i;
            break;
        }
    }
    DecodedField {
        text: input[..end].to_string(),
        was_quoted: false,
        consumed: end,
    }
}

fn read_quoted(input: &str, quote: char, options: &CsvOptions) -> Result<DecodedField> {
    let mut text = String::new();
    let mut chars = input.char_indices().peekable();
    chars.next(); // opening quote
    loop {
        let Some((i, ch)) = chars.next() else {
            return Err(Error::decode(
                1,
                input.len(),
                "unterminated quoted field at end of input",
            ));
        };
        if ch != quote {
            text.push(ch);
            continue;
        }
        // A quote pair collapses to one literal quote; a lone quote closes.
        if matches!(chars.peek(), Some((_, c)) if *c == quote) {
            text.push(quote);
            chars.next();
            continue;
        }
        let mut consumed = i + quote.len_utf8();
        for ch in input[consumed..].chars() {
            if ch == options.separator || ch == '\n' || ch == '\r' {
                break;
            }
            if ch == ' ' || ch == '\t' {
                consumed += ch.len_utf8();
                continue;
            }
            return Err(Error::decode(
                1,
                consumed,
                format!("unexpected character {ch:?} after closing quote"),
            ));
        }
        return Ok(DecodedField {
            text,
            was_quoted: true,
            consumed,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> CsvOptions {
        CsvOptions::new()
    }

    fn encode(value: &str, options: &CsvOptions) -> String {
        let mut out = String::new();
        write_field(&mut out, value, options);
        out
    }

    #[test]
    fn test_plain_values_stay_raw() {
        assert_eq!(encode("abc", &opts()), "abc");
        assert_eq!(encode("13", &opts()), "13");
        assert_eq!(encode("", &opts()), "");
    }

    #[test]
    fn test_delimiter_bearing_values_get_quoted() {
        assert_eq!(encode("a,b", &opts()), "\"a,b\"");
        assert_eq!(encode("two\nlines", &opts()), "\"two\nlines\"");
        assert_eq!(encode("cr\rhere", &opts()), "\"cr\rhere\"");
    }

    #[test]
    fn test_embedded_quotes_are_doubled() {
        assert_eq!(encode("say \"hi\"", &opts()), "\"say \"\"hi\"\"\"");
        assert_eq!(encode("\"", &opts()), "\"\"\"\"");
    }

    #[test]
    fn test_quote_empty_strings_option() {
        let options = opts().with_quote_empty_strings(true);
        assert_eq!(encode("", &options), "\"\"");
    }

    #[test]
    fn test_disabled_quoting_is_identity() {
        let options = opts().without_quote();
        assert_eq!(encode("a,b", &options), "a,b");
        assert_eq!(encode("say \"hi\"", &options), "say \"hi\"");
    }

    #[test]
    fn test_read_unquoted() {
        let field = read_field("abc,rest", &opts()).unwrap();
        assert_eq!(field.text, "abc");
        assert!(!field.was_quoted);
        assert_eq!(field.consumed, 3);

        let field = read_field("last", &opts()).unwrap();
        assert_eq!(field.text, "last");
        assert_eq!(field.consumed, 4);

        // Empty unquoted field decodes to an empty string, not a null marker.
        let field = read_field(",next", &opts()).unwrap();
        assert_eq!(field.text, "");
        assert_eq!(field.consumed, 0);
    }

    #[test]
    fn test_read_quoted_with_doubling() {
        let field = read_field("\"Joe \"\"Sixpack\"\" Paxson\",x", &opts()).unwrap();
        assert_eq!(field.text, "Joe \"Sixpack\" Paxson");
        assert!(field.was_quoted);
        assert_eq!(&"\"Joe \"\"Sixpack\"\" Paxson\",x"[field.consumed..], ",x");
    }

    #[test]
    fn test_immediately_reopened_quote_is_one_literal_quote() {
        let field = read_field("\"\"\"\"", &opts()).unwrap();
        assert_eq!(field.text, "\"");
        assert_eq!(field.consumed, 4);
    }

    #[test]
    fn test_quoted_field_spans_lines() {
        let input = "\"one\ntwo\",tail";
        let field = read_field(input, &opts()).unwrap();
        assert_eq!(field.text, "one\ntwo");
        assert_eq!(&input[field.consumed..], ",tail");
    }

    #[test]
    fn test_trailing_blanks_after_closing_quote() {
        let input = "\"13\"  ,next";
        let field = read_field(input, &opts()).unwrap();
        assert_eq!(field.text, "13");
        assert_eq!(&input[field.consumed..], ",next");
    }

    #[test]
    fn test_stray_content_after_closing_quote() {
        assert!(read_field("\"a\"b,", &opts()).is_err());
    }

    #[test]
    fn test_unterminated_quote() {
        let err = read_field("\"oops", &opts()).unwrap_err();
        assert!(matches!(err, Error::DecodeFormat { .. }));
    }

    #[test]
    fn test_disabled_quoting_reads_quotes_as_data() {
        let options = opts().without_quote();
        let field = read_field("\"UNKNOWN\",x", &options).unwrap();
        assert_eq!(field.text, "\"UNKNOWN\"");
        assert!(!field.was_quoted);
    }

    #[test]
    fn test_roundtrip() {
        for value in ["plain", "a,b", "say \"hi\"", "line\nbreak", "\"", "\"\""] {
            let encoded = encode(value, &opts());
            let field = read_field(&encoded, &opts()).unwrap();
            assert_eq!(field.text, value, "round trip of {value:?}");
            assert_eq!(field.consumed, encoded.len());
        }
    }
}
