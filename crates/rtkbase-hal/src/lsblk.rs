//! `lsblk --pairs` parser.
//!
//! Each line looks like:   NAME="sdb1" RM="1" FSTYPE="vfat" LABEL="bootfs"
//! Values are double-quoted; lsblk writes unsafe bytes as `\xHH`.

use std::collections::HashMap;

pub fn parse_pairs(line: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    let mut rest = line.trim();

    while !rest.is_empty() {
        let Some(eq) = rest.find('=') else { break };
        let key = rest[..eq].split_whitespace().last().unwrap_or("").to_string();
        rest = &rest[eq + 1..];

        if !rest.starts_with('"') {
            break;
        }
        rest = &rest[1..]; // skip opening "

        let Some(close) = rest.find('"') else { break };
        let value = unescape_hex(&rest[..close]);
        rest = &rest[close + 1..]; // skip closing "

        if !key.is_empty() {
            map.insert(key, value);
        }
    }

    map
}

/// Parses every non-empty line of `lsblk --pairs` output.
pub fn parse_output(output: &str) -> Vec<HashMap<String, String>> {
    output
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(parse_pairs)
        .filter(|m| !m.is_empty())
        .collect()
}

fn unescape_hex(raw: &str) -> String {
    if !raw.contains("\\x") {
        return raw.to_string();
    }

    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' && i + 3 < bytes.len() && bytes[i + 1] == b'x' {
            let hex = std::str::from_utf8(&bytes[i + 2..i + 4]).unwrap_or("");
            if let Ok(b) = u8::from_str_radix(hex, 16) {
                out.push(b);
                i += 4;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}
