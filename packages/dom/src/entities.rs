//! Entity escaping and decoding.
//!
//! The escape functions and [`decode`] are exact inverses for the
//! serializer's output, so serialize → parse → serialize is stable.

/// Escape text content for serialization.
pub fn escape_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape an attribute value for serialization (double-quoted context).
pub fn escape_attr(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Decode character references in text or attribute values.
///
/// Handles the named references the serializer emits plus `&apos;` and
/// numeric references. Anything unrecognized is left verbatim.
pub fn decode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let bytes = input.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'&' {
            let start = i;
            while i < bytes.len() && bytes[i] != b'&' {
                i += 1;
            }
            out.push_str(&input[start..i]);
            continue;
        }

        // Reference runs from '&' to the next ';' within a short window.
        let rest = &input[i..];
        match rest.find(';').filter(|end| *end <= 12) {
            Some(end) => {
                let name = &rest[1..end];
                match decode_reference(name) {
                    Some(decoded) => {
                        out.push_str(&decoded);
                        i += end + 1;
                    }
                    None => {
                        out.push('&');
                        i += 1;
                    }
                }
            }
            None => {
                out.push('&');
                i += 1;
            }
        }
    }

    out
}

fn decode_reference(name: &str) -> Option<String> {
    let decoded = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        _ => {
            let code = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok()?
            } else if let Some(dec) = name.strip_prefix('#') {
                dec.parse::<u32>().ok()?
            } else {
                return None;
            };
            char::from_u32(code)?
        }
    };
    Some(decoded.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_decode_inverse() {
        let samples = ["a & b < c > d", "plain", "\"quoted\" & 'single'"];
        for s in samples {
            assert_eq!(decode(&escape_text(s)), s);
            assert_eq!(decode(&escape_attr(s)), s);
        }
    }

    #[test]
    fn test_numeric_references() {
        assert_eq!(decode("&#65;&#x42;"), "AB");
    }

    #[test]
    fn test_unknown_reference_kept() {
        assert_eq!(decode("&bogus; &"), "&bogus; &");
    }
}
