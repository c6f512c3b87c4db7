//! Translation of Go reference-time layouts into chrono strftime strings.
//!
//! Existing templates format dates with Go layouts such as `2006-01-02` or
//! `Jan 2, Monday`. Formats already containing `%` are taken
//! to be strftime and pass through untouched.

/// Layout chunks in match order. Longer chunks sharing a prefix come first.
const CHUNKS: &[(&str, &str)] = &[
    ("January", "%B"),
    ("Jan", "%b"),
    ("Monday", "%A"),
    ("Mon", "%a"),
    ("MST", "%Z"),
    ("2006", "%Y"),
    ("002", "%j"),
    ("01", "%m"),
    ("02", "%d"),
    ("03", "%I"),
    ("04", "%M"),
    ("05", "%S"),
    ("06", "%y"),
    ("15", "%H"),
    ("_2", "%e"),
    ("1", "%-m"),
    ("2", "%-d"),
    ("3", "%-I"),
    ("4", "%-M"),
    ("5", "%-S"),
    ("PM", "%p"),
    ("pm", "%P"),
    ("Z07:00", "%:z"),
    ("-07:00", "%:z"),
    ("Z0700", "%z"),
    ("-0700", "%z"),
    (".000000000", "%.9f"),
    (".000000", "%.6f"),
    (".000", "%.3f"),
];

/// ISO 8601 zone chunks, printed as a bare `Z` at a zero offset.
const UTC_Z_CHUNKS: &[&str] = &["Z07:00", "Z0700"];

/// Convert `format` into a strftime string understood by chrono.
///
/// `utc` tells whether the formatted time has a zero offset, in which case
/// `Z07:00` and `Z0700` become a literal `Z`.
pub fn to_strftime(format: &str, utc: bool) -> String {
    if format.contains('%') {
        return format.to_string();
    }

    let mut out = String::with_capacity(format.len() * 2);
    let mut rest = format;

    'outer: while let Some(c) = rest.chars().next() {
        if utc
            && let Some(chunk) =
                UTC_Z_CHUNKS.iter().find(|chunk| rest.starts_with(**chunk))
        {
            out.push('Z');
            rest = &rest[chunk.len()..];
            continue;
        }

        for (chunk, replacement) in CHUNKS {
            if rest.starts_with(chunk) {
                out.push_str(replacement);
                rest = &rest[chunk.len()..];
                continue 'outer;
            }
        }

        out.push(c);
        rest = &rest[c.len_utf8()..];
    }

    out
}
