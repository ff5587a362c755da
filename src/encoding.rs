// Copyright 2014-2025 The html5ever Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::tendril::StrTendril;
use encoding_rs::Encoding;
use log::debug;

/// Runs the encoding sniffing algorithm used before tokenization can
/// begin: a BOM check, an optional out-of-band (transport layer)
/// declaration, a scan of the first 1024 bytes for a `<meta charset>`
/// declaration, and a locale-dependent fallback.
pub struct EncodingSniffer {
    transport_layer_encoding: Option<&'static Encoding>,
}

impl Default for EncodingSniffer {
    fn default() -> Self {
        EncodingSniffer::new()
    }
}

impl EncodingSniffer {
    pub fn new() -> EncodingSniffer {
        EncodingSniffer {
            transport_layer_encoding: None,
        }
    }

    /// Record the encoding declared by an out-of-band transport layer
    /// mechanism (e.g. a `Content-Type` HTTP header), which takes
    /// priority over everything but a BOM.
    pub fn set_transport_layer_encoding(&mut self, label: &str) {
        self.transport_layer_encoding = Encoding::for_label(label.as_bytes());
    }

    /// Determine the encoding of `bytes`, per
    /// <https://html.spec.whatwg.org/multipage/parsing.html#determining-the-character-encoding>.
    pub fn sniff(&self, bytes: &[u8]) -> &'static Encoding {
        // Step 1: a BOM always wins, with "certain" confidence.
        if let Some((encoding, _bom_len)) = Encoding::for_bom(bytes) {
            debug!("encoding sniffed from BOM: {}", encoding.name());
            return encoding;
        }

        // Step 2: an out-of-band declaration, if supplied, is next.
        if let Some(encoding) = self.transport_layer_encoding {
            debug!("encoding from transport layer: {}", encoding.name());
            return encoding;
        }

        // Step 3: prescan the first 1024 bytes for a `<meta charset>`
        // or `<meta http-equiv=Content-Type content=...charset=...>`.
        let prescan_len = bytes.len().min(1024);
        if let Some(encoding) = prescan_meta_charset(&bytes[..prescan_len]) {
            debug!("encoding sniffed from <meta>: {}", encoding.name());
            return encoding;
        }

        // Step 8 (abbreviated): fall back to windows-1252. A full
        // implementation would also consult frequency-based chardet
        // heuristics and the user's locale; both are out of scope
        // here.
        debug!("falling back to windows-1252");
        encoding_rs::WINDOWS_1252
    }
}

/// Prescan `prescan_bytes` (already limited to the first 1024 bytes of
/// the document) for a `<meta>` tag carrying a `charset` attribute or a
/// `Content-Type`-style `content` attribute, per
/// <https://html.spec.whatwg.org/multipage/parsing.html#prescan-a-byte-stream-to-determine-its-encoding>.
///
/// This treats the input as Latin-1 bytes, per the standard's
/// instruction to scan "byte for byte" rather than after decoding, and
/// walks the byte stream tag by tag rather than searching for a bare
/// `<meta` literal: `<!-- -->` comments, other tags' attributes (quoted
/// or not), and bogus comments/declarations are all skipped over so a
/// `<meta` occurring inside one of those can't be mistaken for a real
/// tag.
fn prescan_meta_charset(prescan_bytes: &[u8]) -> Option<&'static Encoding> {
    let len = prescan_bytes.len();
    let mut position = 0;

    loop {
        if position >= len {
            return None;
        }

        // A comment: skip to the closing `-->`, or to the end of input
        // if it's never closed.
        if starts_with_ignore_ascii_case(&prescan_bytes[position..], b"<!--") {
            position += 4;
            match find_subslice(&prescan_bytes[position..], b"-->") {
                Some(rel) => position += rel + 3,
                None => return None,
            }
            continue;
        }

        // A `<meta` tag boundary: whitespace, `/`, or `>` must follow,
        // or this is some other tag name (e.g. `<metal>`).
        if starts_with_ignore_ascii_case(&prescan_bytes[position..], b"<meta")
            && prescan_bytes
                .get(position + 5)
                .is_some_and(|b| is_tag_name_boundary(*b))
        {
            position += 5;
            let mut charset_attr = None;
            let mut content_attr = None;
            loop {
                let (attr, next) = get_an_attribute(prescan_bytes, position);
                position = next;
                let Some((name, value)) = attr else { break };
                match name.as_slice() {
                    b"charset" if charset_attr.is_none() => charset_attr = value,
                    b"content" if content_attr.is_none() => content_attr = value,
                    _ => {},
                }
            }

            if let Some(label) = charset_attr {
                if let Some(encoding) = Encoding::for_label(&label) {
                    return Some(encoding);
                }
            }
            if let Some(content) = content_attr {
                let content_tendril = StrTendril::from_slice(&String::from_utf8_lossy(&content));
                if let Some(label) =
                    extract_a_character_encoding_from_a_meta_element(content_tendril)
                {
                    if let Some(encoding) = Encoding::for_label(label.as_bytes()) {
                        return Some(encoding);
                    }
                }
            }
            continue;
        }

        // Any other start or end tag: skip the tag name, then its
        // attributes (without inspecting them), so a `<meta` appearing
        // inside a quoted attribute value here isn't picked up above.
        let tag_name_start = match prescan_bytes.get(position) {
            Some(b'<') if prescan_bytes.get(position + 1) == Some(&b'/') => Some(position + 2),
            Some(b'<') if prescan_bytes.get(position + 1).is_some_and(u8::is_ascii_alphabetic) => {
                Some(position + 1)
            },
            _ => None,
        };
        if let Some(mut p) = tag_name_start {
            while prescan_bytes.get(p).is_some_and(|b| !is_tag_name_boundary(*b)) {
                p += 1;
            }
            loop {
                let (attr, next) = get_an_attribute(prescan_bytes, p);
                p = next;
                if attr.is_none() {
                    break;
                }
            }
            position = p;
            continue;
        }

        // A bogus comment, other markup declaration, or processing
        // instruction (`<!`, `<?`, or a bare `</`): skip to the next
        // `>`, or to the end of input if there is none.
        if prescan_bytes.get(position) == Some(&b'<')
            && matches!(
                prescan_bytes.get(position + 1),
                Some(b'!') | Some(b'?') | Some(b'/')
            )
        {
            position += 2;
            match find_subslice(&prescan_bytes[position..], b">") {
                Some(rel) => position += rel + 1,
                None => return None,
            }
            continue;
        }

        // A lone `<` that didn't match any of the above, or any other
        // byte: advance one byte and keep looking.
        position += 1;
    }
}

fn is_tag_name_boundary(b: u8) -> bool {
    b.is_ascii_whitespace() || b == b'/' || b == b'>'
}

fn starts_with_ignore_ascii_case(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.len() >= needle.len() && haystack[..needle.len()].eq_ignore_ascii_case(needle)
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|w| w.eq_ignore_ascii_case(needle))
}

/// The "get an attribute" algorithm used while prescanning a byte
/// stream:
/// <https://html.spec.whatwg.org/multipage/parsing.html#concept-get-attributes-when-sniffing>.
/// Returns the attribute found (name lowercased, raw value bytes if
/// any), and the position to resume scanning an attribute list from.
/// That position has already consumed a terminating `>`, if scanning
/// this attribute ran into one; the caller should stop asking for more
/// attributes once it gets `None` back.
fn get_an_attribute(bytes: &[u8], mut position: usize) -> (Option<(Vec<u8>, Option<Vec<u8>>)>, usize) {
    // Skip leading whitespace and stray slashes between attributes.
    while bytes
        .get(position)
        .is_some_and(|b| b.is_ascii_whitespace() || *b == b'/')
    {
        position += 1;
    }

    match bytes.get(position) {
        None => return (None, position),
        Some(b'>') => return (None, position + 1),
        _ => {},
    }

    // Collect the attribute name.
    let mut name = Vec::new();
    let mut saw_equals = false;
    loop {
        match bytes.get(position) {
            None => return (Some((name, None)), position),
            Some(b'>') => return (Some((name, None)), position + 1),
            Some(b'/') => return (Some((name, None)), position),
            Some(b'=') if !name.is_empty() => {
                position += 1;
                saw_equals = true;
                break;
            },
            Some(b) if b.is_ascii_whitespace() => {
                position += 1;
                while bytes.get(position).is_some_and(|b| b.is_ascii_whitespace()) {
                    position += 1;
                }
                if bytes.get(position) == Some(&b'=') {
                    position += 1;
                    saw_equals = true;
                }
                break;
            },
            Some(b) => {
                name.push(b.to_ascii_lowercase());
                position += 1;
            },
        }
    }

    if !saw_equals {
        return (Some((name, None)), position);
    }

    // Skip whitespace before the value, then read it.
    while bytes.get(position).is_some_and(|b| b.is_ascii_whitespace()) {
        position += 1;
    }
    match bytes.get(position) {
        None => (Some((name, None)), position),
        Some(b'>') => (Some((name, None)), position + 1),
        Some(&quote @ (b'"' | b'\'')) => {
            position += 1;
            let start = position;
            while bytes.get(position).is_some_and(|b| *b != quote) {
                position += 1;
            }
            let value = bytes[start..position].to_vec();
            if bytes.get(position).is_some() {
                position += 1;
            }
            (Some((name, Some(value))), position)
        },
        _ => {
            let start = position;
            while bytes
                .get(position)
                .is_some_and(|b| !b.is_ascii_whitespace() && *b != b'>')
            {
                position += 1;
            }
            let value = bytes[start..position].to_vec();
            (Some((name, Some(value))), position)
        },
    }
}

/// <https://html.spec.whatwg.org/multipage/#algorithm-for-extracting-a-character-encoding-from-a-meta-element>
pub(crate) fn extract_a_character_encoding_from_a_meta_element(
    input: StrTendril,
) -> Option<StrTendril> {
    // Step 1. Let position be a pointer into s, initially pointing at the start of the string.
    let mut position = 0;
    loop {
        // Step 2. Loop: Find the first seven characters in s after position that are an ASCII
        // case-insensitive match for the word "charset". If no such match is found, return nothing.
        loop {
            let candidate = input.as_bytes().get(position..position + "charset".len())?;
            if candidate.eq_ignore_ascii_case(b"charset") {
                break;
            }

            position += 1;
        }
        position += "charset".len();

        // Step 3. Skip any ASCII whitespace that immediately follow the word "charset" (there might not be any).
        position += input.as_bytes()[position..]
            .iter()
            .take_while(|byte| byte.is_ascii_whitespace())
            .count();

        // Step 4. If the next character is not a U+003D EQUALS SIGN (=), then move position to point just before
        // that next character, and jump back to the step labeled loop.
        if input.as_bytes()[position] == b'=' {
            break;
        }
    }
    // Skip the "="
    position += 1;

    // Step 5. Skip any ASCII whitespace that immediately follow the equals sign (there might not be any).
    position += input.as_bytes()[position..]
        .iter()
        .take_while(|byte| byte.is_ascii_whitespace())
        .count();

    // Step 6. Process the next character as follows:
    match input.as_bytes().get(position)? {
        quote @ (b'"' | b'\'') => {
            // Return the result of getting an encoding from the substring that is between this character
            // and the next earliest occurrence of this character.
            let length = input.as_bytes()[position + 1..]
                .iter()
                .position(|byte| byte == quote)?;
            Some(input.subtendril(position as u32 + 1, length as u32))
        },
        _ => {
            // Return the result of getting an encoding from the substring that consists of this character
            // up to but not including the first ASCII whitespace or U+003B SEMICOLON character (;),
            // or the end of s, whichever comes first.
            let length = input.as_bytes()[position..]
                .iter()
                .position(|byte| byte.is_ascii_whitespace() || *byte == b';');
            if let Some(length) = length {
                Some(input.subtendril(position as u32, length as u32))
            } else {
                Some(input.subtendril(position as u32, (input.len() - position) as u32))
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_element_without_charset() {
        assert_eq!(
            extract_a_character_encoding_from_a_meta_element(StrTendril::from_slice("foobar")),
            None
        );
    }

    #[test]
    fn meta_element_with_capitalized_charset() {
        assert_eq!(
            extract_a_character_encoding_from_a_meta_element(StrTendril::from_slice(
                "cHarSet=utf8"
            )),
            Some(StrTendril::from_slice("utf8"))
        );
    }

    #[test]
    fn meta_element_with_no_equals_after_charset() {
        assert_eq!(
            extract_a_character_encoding_from_a_meta_element(StrTendril::from_slice(
                "charset utf8"
            )),
            None
        );
    }

    #[test]
    fn meta_element_with_whitespace_around_equals() {
        assert_eq!(
            extract_a_character_encoding_from_a_meta_element(StrTendril::from_slice(
                "charset \t=\tutf8"
            )),
            Some(StrTendril::from_slice("utf8"))
        );
    }

    #[test]
    fn meta_element_with_quoted_value() {
        assert_eq!(
            extract_a_character_encoding_from_a_meta_element(StrTendril::from_slice(
                "charset='utf8'"
            )),
            Some(StrTendril::from_slice("utf8"))
        );
        assert_eq!(
            extract_a_character_encoding_from_a_meta_element(StrTendril::from_slice(
                "charset=\"utf8\""
            )),
            Some(StrTendril::from_slice("utf8"))
        );
        assert_eq!(
            extract_a_character_encoding_from_a_meta_element(StrTendril::from_slice(
                "charset='utf8"
            )),
            None
        );
        assert_eq!(
            extract_a_character_encoding_from_a_meta_element(StrTendril::from_slice(
                "charset=\"utf8"
            )),
            None
        );
    }

    #[test]
    fn meta_element_with_implicit_terminator() {
        assert_eq!(
            extract_a_character_encoding_from_a_meta_element(StrTendril::from_slice(
                "charset=utf8 foo"
            )),
            Some(StrTendril::from_slice("utf8"))
        );
        assert_eq!(
            extract_a_character_encoding_from_a_meta_element(StrTendril::from_slice(
                "charset=utf8;foo"
            )),
            Some(StrTendril::from_slice("utf8"))
        );
    }

    #[test]
    fn meta_element_with_content_type() {
        assert_eq!(
            extract_a_character_encoding_from_a_meta_element(StrTendril::from_slice(
                "text/html; charset=utf8"
            )),
            Some(StrTendril::from_slice("utf8"))
        );
    }

    #[test]
    fn prescan_finds_charset_attribute() {
        let encoding = prescan_meta_charset(b"<html><head><meta charset=\"utf-16\"></head>");
        assert_eq!(encoding, Some(encoding_rs::UTF_16LE));
    }

    #[test]
    fn prescan_finds_content_type_style_charset() {
        let encoding = prescan_meta_charset(
            b"<meta http-equiv=\"Content-Type\" content=\"text/html; charset=shift-jis\">",
        );
        assert_eq!(encoding, Some(encoding_rs::SHIFT_JIS));
    }

    #[test]
    fn prescan_skips_meta_inside_a_comment() {
        // The `<meta` here is inside a comment and must not be detected.
        let encoding = prescan_meta_charset(b"<!-- <meta charset=utf-16> --><meta charset=utf-8>");
        assert_eq!(encoding, Some(encoding_rs::UTF_8));
    }

    #[test]
    fn prescan_returns_none_when_only_commented_out() {
        let encoding = prescan_meta_charset(b"<!-- <meta charset=utf-16> -->");
        assert_eq!(encoding, None);
    }

    #[test]
    fn prescan_skips_meta_like_text_in_a_quoted_attribute() {
        // A preceding, unrelated tag has a quoted attribute value that
        // contains a `<meta` lookalike; it must not be mistaken for a
        // real tag boundary.
        let encoding =
            prescan_meta_charset(b"<div title=\"<meta charset=utf-16>\"><meta charset=utf-8>");
        assert_eq!(encoding, Some(encoding_rs::UTF_8));
    }

    #[test]
    fn prescan_skips_unrelated_tags_and_end_tags() {
        let encoding = prescan_meta_charset(
            b"<html lang='en'></br><!doctype html><meta name=viewport content=x><meta charset=utf-8>",
        );
        assert_eq!(encoding, Some(encoding_rs::UTF_8));
    }

    #[test]
    fn prescan_ignores_metal_tag_name() {
        // `<metal>` is not a `<meta` tag boundary match.
        let encoding = prescan_meta_charset(b"<metal charset=utf-16></metal><meta charset=utf-8>");
        assert_eq!(encoding, Some(encoding_rs::UTF_8));
    }
}
