//! Decoding of escaped character and string literal text.

/// Decode the text between the quotes of a char literal (`a`, `\n`,
/// `\u0041`, `\101`). `None` when the text is not exactly one character.
pub fn unescape_char(text: &str) -> Option<char> {
    let decoded = unescape_string(text)?;
    let mut chars = decoded.chars();
    let c = chars.next()?;
    chars.next().is_none().then_some(c)
}

/// Decode the text between the quotes of a string literal.
pub fn unescape_string(text: &str) -> Option<String> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let escaped = chars.next()?;
        let decoded = match escaped {
            'b' => '\u{8}',
            't' => '\t',
            'n' => '\n',
            'f' => '\u{c}',
            'r' => '\r',
            's' => ' ',
            '"' => '"',
            '\'' => '\'',
            '\\' => '\\',
            'u' => {
                while chars.peek() == Some(&'u') {
                    chars.next();
                }
                let hex: String = chars.by_ref().take(4).collect();
                if hex.len() != 4 {
                    return None;
                }
                char::from_u32(u32::from_str_radix(&hex, 16).ok()?)?
            }
            '0'..='7' => {
                // Octal escapes: up to three digits, at most \377.
                let max_digits = if escaped <= '3' { 3 } else { 2 };
                let mut value = escaped.to_digit(8)?;
                for _ in 1..max_digits {
                    match chars.peek().and_then(|d| d.to_digit(8)) {
                        Some(digit) => {
                            value = value * 8 + digit;
                            chars.next();
                        }
                        None => break,
                    }
                }
                char::from_u32(value)?
            }
            _ => return None,
        };
        out.push(decoded);
    }
    Some(out)
}

#[cfg(test)]
#[path = "../tests/literal_tests.rs"]
mod tests;
