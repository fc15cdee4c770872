//! Encoding of file names embedded in generated HTML

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// HTML entities for encoding special characters
const HTML_ENTITIES: &[(&str, &str)] = &[
    ("&", "&amp;"), // Must be first to avoid double encoding
    ("<", "&lt;"),
    (">", "&gt;"),
    ("\"", "&quot;"),
    ("'", "&#x27;"),
];

/// Characters escaped in a single path segment used as a relative href
const HREF_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'\'')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'\\')
    .add(b':');

/// Encode HTML entities so a file name renders as text
pub fn encode_html(input: &str) -> String {
    let mut result = input.to_string();

    for (char, entity) in HTML_ENTITIES {
        result = result.replace(char, entity);
    }

    result
}

/// Percent-encode a file name for use as a relative link
pub fn encode_href(name: &str) -> String {
    utf8_percent_encode(name, HREF_SEGMENT).to_string()
}
