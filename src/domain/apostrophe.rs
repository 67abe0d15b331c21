//! Apostrophe classification and replacement for directory names.

use std::ffi::{OsStr, OsString};

/// Straight apostrophe (U+0027).
pub const PLAIN_MARK: char = '\u{0027}';

/// Typographic right single quotation mark (U+2019).
pub const TYPOGRAPHIC_MARK: char = '\u{2019}';

/// Whether a directory name starts with four ASCII digits.
pub fn is_year_prefixed(name: &str) -> bool {
    year_prefixed_bytes(name.as_bytes())
}

/// [`is_year_prefixed`] for a raw file name, which need not be valid UTF-8.
pub fn is_year_prefixed_name(name: &OsStr) -> bool {
    year_prefixed_bytes(name.as_encoded_bytes())
}

fn year_prefixed_bytes(bytes: &[u8]) -> bool {
    bytes.len() >= 4 && bytes[..4].iter().all(u8::is_ascii_digit)
}

/// A name needs standardization when it has at least one plain mark and no typographic mark.
///
/// Names carrying both marks are left alone; they are treated as partially converted by hand.
pub fn needs_standardization(name: &str) -> bool {
    name.contains(PLAIN_MARK) && !name.contains(TYPOGRAPHIC_MARK)
}

/// Replace every plain mark with the typographic mark.
pub fn standardize(name: &str) -> String {
    name.replace(PLAIN_MARK, &TYPOGRAPHIC_MARK.to_string())
}

/// Standardized form of a raw file name, or `None` when it needs no change.
///
/// Unix names are handled as bytes, so a name that is not valid UTF-8 is still converted.
#[cfg(unix)]
pub fn standardized_name(name: &OsStr) -> Option<OsString> {
    use std::os::unix::ffi::{OsStrExt, OsStringExt};

    let bytes = name.as_bytes();
    let mut buf = [0; 4];
    let typographic = TYPOGRAPHIC_MARK.encode_utf8(&mut buf).as_bytes();
    let plain = PLAIN_MARK as u8;

    if !bytes.contains(&plain) || bytes.windows(typographic.len()).any(|w| w == typographic) {
        return None;
    }

    let mut renamed = Vec::with_capacity(bytes.len() + 2);
    for &byte in bytes {
        if byte == plain {
            renamed.extend_from_slice(typographic);
        } else {
            renamed.push(byte);
        }
    }
    Some(OsString::from_vec(renamed))
}

#[cfg(not(unix))]
pub fn standardized_name(name: &OsStr) -> Option<OsString> {
    let name = name.to_str()?;
    needs_standardization(name).then(|| OsString::from(standardize(name)))
}
