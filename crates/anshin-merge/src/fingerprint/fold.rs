//! Character folding helpers.

/// Full-width ASCII (U+FF01..U+FF5E) to ASCII, ideographic space to space.
pub fn fold_width(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '\u{3000}' => ' ',
            '\u{FF01}'..='\u{FF5E}' => char::from_u32(c as u32 - 0xFEE0).unwrap_or(c),
            _ => c,
        })
        .collect()
}

/// Hiragana to katakana.
pub fn fold_kana(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '\u{3041}'..='\u{3096}' => char::from_u32(c as u32 + 0x60).unwrap_or(c),
            _ => c,
        })
        .collect()
}

pub fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

const HYPHENS: &[char] = &['-', '‐', '‑', '‒', '–', '—', '―', '−', '－'];

pub fn strip_hyphens(s: &str) -> String {
    s.chars().filter(|c| !HYPHENS.contains(c)).collect()
}

const COUNTRY_PREFIXES: &[&str] = &["日本、", "日本,", "日本，", "japan,", "Japan,", "JAPAN,"];

/// Drop a leading country name and `〒NNN-NNNN` postal code, as map
/// services prepend them. Expects whitespace already stripped.
pub fn strip_address_prefix(s: &str) -> &str {
    let mut rest = s;
    if let Some(stripped) = COUNTRY_PREFIXES.iter().find_map(|p| rest.strip_prefix(*p)) {
        rest = stripped;
    }
    let (marked, body) = match rest.strip_prefix('〒') {
        Some(body) => (true, body),
        None => (false, rest),
    };
    let mut digits = 0;
    let mut end = 0;
    for (i, c) in body.char_indices() {
        if c.is_ascii_digit() {
            digits += 1;
        } else if !HYPHENS.contains(&c) {
            break;
        }
        end = i + c.len_utf8();
    }
    // A bare number is only a postal code when it has exactly seven digits.
    if digits == 7 || (marked && digits > 0) {
        &body[end..]
    } else if marked {
        body
    } else {
        rest
    }
}

/// First `n` characters.
pub fn truncate_chars(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}
