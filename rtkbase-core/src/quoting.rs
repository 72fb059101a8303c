//! ANSI-C quoting (`$'...'`) for values the device reads back with a shell.
//!
//! Printable ASCII passes through, `\`, `'` and `"` are backslash-escaped,
//! other ASCII becomes `\xHH`, and everything else is written as a code point
//! escape: `\uHHHH` up to U+FFFF, `\UHHHHHHHH` above it. Hex digits are
//! upper-case. Evaluating the result in bash gives back the original text,
//! except that a NUL terminates the shell string.
//!
//! The serializer only uses [`quote`]; settings files are decoded to UTF-8
//! when loaded. [`quote_bytes`] is library API for callers holding raw
//! code-page bytes.

use encoding_rs::Encoding;

/// Quotes Unicode text.
pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 3);
    out.push_str("$'");
    for c in text.chars() {
        push_char(&mut out, c);
    }
    out.push('\'');
    out
}

/// Quotes raw bytes in a single-byte code page such as windows-1252.
///
/// Bytes below 0x80 are treated as ASCII. Every byte from 0x80 up is decoded
/// on its own through `encoding` and each resulting code point is escaped;
/// bytes the code page leaves unmapped come out as `\uFFFD`.
pub fn quote_bytes(bytes: &[u8], encoding: &'static Encoding) -> String {
    let mut out = String::with_capacity(bytes.len() + 3);
    out.push_str("$'");
    for &b in bytes {
        if b.is_ascii() {
            push_char(&mut out, char::from(b));
        } else {
            let byte = [b];
            let (decoded, _had_errors) = encoding.decode_without_bom_handling(&byte);
            for c in decoded.chars() {
                push_code_point(&mut out, c);
            }
        }
    }
    out.push('\'');
    out
}

fn push_char(out: &mut String, c: char) {
    match c {
        '\\' => out.push_str("\\\\"),
        '\'' => out.push_str("\\'"),
        '"' => out.push_str("\\\""),
        ' '..='~' => out.push(c),
        c if c.is_ascii() => out.push_str(&format!("\\x{:02X}", u32::from(c))),
        c => push_code_point(out, c),
    }
}

fn push_code_point(out: &mut String, c: char) {
    let cp = u32::from(c);
    if cp <= 0xFFFF {
        out.push_str(&format!("\\u{:04X}", cp));
    } else {
        out.push_str(&format!("\\U{:08X}", cp));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::Command;

    #[test]
    fn empty_text() {
        assert_eq!(quote(""), "$''");
    }

    #[test]
    fn single_quote_is_escaped() {
        assert_eq!(quote("a'b"), r"$'a\'b'");
    }

    #[test]
    fn printable_ascii_passes_through() {
        assert_eq!(quote("100% safe_name-1"), "$'100% safe_name-1'");
    }

    #[test]
    fn backslash_and_double_quote_are_escaped() {
        assert_eq!(quote(r#"C:\"x""#), r#"$'C:\\\"x\"'"#);
    }

    #[test]
    fn control_characters_use_two_hex_digits() {
        assert_eq!(quote("a\tb\n"), r"$'a\x09b\x0A'");
        assert_eq!(quote("\u{7f}"), r"$'\x7F'");
        assert_eq!(quote("\u{1}A"), r"$'\x01A'");
    }

    #[test]
    fn non_ascii_uses_four_hex_digits() {
        assert_eq!(quote("café"), r"$'caf\u00E9'");
        assert_eq!(quote("Привет"), r"$'\u041F\u0440\u0438\u0432\u0435\u0442'");
        assert_eq!(quote("€"), r"$'\u20AC'");
    }

    #[test]
    fn astral_code_points_use_eight_hex_digits() {
        assert_eq!(quote("wifi 📡"), r"$'wifi \U0001F4E1'");
    }

    #[test]
    fn code_page_bytes_are_decoded_before_escaping() {
        // 0xE9 is 'é' in windows-1252 and 'й' in windows-1251.
        assert_eq!(
            quote_bytes(b"caf\xE9", encoding_rs::WINDOWS_1252),
            r"$'caf\u00E9'"
        );
        assert_eq!(
            quote_bytes(b"\xE9", encoding_rs::WINDOWS_1251),
            r"$'\u0439'"
        );
        // 0x80 maps above 0xFF in windows-1252.
        assert_eq!(quote_bytes(b"\x80", encoding_rs::WINDOWS_1252), r"$'\u20AC'");
    }

    #[test]
    fn code_page_ascii_matches_text_quoting() {
        let raw = b"it's \"x\"\\\t";
        assert_eq!(
            quote_bytes(raw, encoding_rs::WINDOWS_1252),
            quote("it's \"x\"\\\t")
        );
    }

    #[test]
    fn unmapped_code_page_byte_becomes_replacement_character() {
        // 0xA1 is unassigned in ISO-8859-8.
        assert_eq!(quote_bytes(b"\xA1", encoding_rs::ISO_8859_8), r"$'\uFFFD'");
    }

    #[test]
    fn bash_reads_back_ascii_values() {
        let samples = [
            "",
            "plain",
            "it's",
            r#"back\slash "double""#,
            "tab\there\nnewline",
            "$HOME `id` $(id) !x",
            "\u{1b}[0m\u{7f}",
        ];
        for sample in samples {
            let script = format!("printf '%s' {}", quote(sample));
            let output = match Command::new("bash").arg("-c").arg(&script).output() {
                Ok(o) => o,
                // No bash on this host; the escape tests above still apply.
                Err(_) => return,
            };
            assert!(output.status.success(), "bash failed for {:?}", sample);
            assert_eq!(
                String::from_utf8_lossy(&output.stdout),
                sample,
                "round trip of {:?}",
                sample
            );
        }
    }
}
