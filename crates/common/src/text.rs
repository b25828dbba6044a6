//! Text helpers shared by listings and tracers.
//!
//! Widths are measured in `char`s. None of the padding helpers truncate: when
//! the content is already wider than the requested width it is returned as is.

use std::fmt::Display;

/// Marker inserted by [`excerpt`] at the focus offset.
pub const EXCERPT_MARKER: char = 'ˇ';

/// Pad `s` on the right with `ch` up to `width` characters.
pub fn rpad(s: &str, width: usize, ch: char) -> String {
    let extra = width.saturating_sub(s.chars().count());
    let mut out = String::with_capacity(s.len() + extra);
    out.push_str(s);
    out.extend(std::iter::repeat(ch).take(extra));
    out
}

/// Pad `s` on the left with `ch` up to `width` characters.
pub fn lpad(s: &str, width: usize, ch: char) -> String {
    let extra = width.saturating_sub(s.chars().count());
    let mut out: String = std::iter::repeat(ch).take(extra).collect();
    out.push_str(s);
    out
}

/// Zero-pad the display form of `value` to `width` characters.
///
/// `zpad(23, 8)` is `"00000023"`.
pub fn zpad(value: impl Display, width: usize) -> String {
    lpad(&value.to_string(), width, '0')
}

/// Center `text` in a field of `width` characters.
///
/// With `fill == ' '` the text is simply surrounded by spaces. With any other
/// fill character, `gap` spaces separate the text from the fill on each side,
/// e.g. `centered("IF", 12, '-', 2)` is `"---  IF  ---"`. An odd column goes
/// to the right.
pub fn centered(text: &str, width: usize, fill: char, gap: usize) -> String {
    let total = match width.checked_sub(text.chars().count()) {
        Some(0) | None => return text.to_string(),
        Some(n) => n,
    };
    let left = total / 2;
    let right = total - left;

    if fill == ' ' {
        return format!("{}{}{}", " ".repeat(left), text, " ".repeat(right));
    }

    let buf = " ".repeat(gap);
    let fill_str = fill.to_string();
    format!(
        "{}{}{}{}{}",
        fill_str.repeat(left.saturating_sub(gap)),
        buf,
        text,
        buf,
        fill_str.repeat(right.saturating_sub(gap)),
    )
}

/// Escape control characters and backslashes so `s` stays on one line.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\\' => out.push_str("\\\\"),
            c if c.is_control() => out.extend(c.escape_unicode()),
            c => out.push(c),
        }
    }
    out
}

/// Escaped window of `input` around the character at `offset`.
///
/// At most `radius` characters are kept on each side and [`EXCERPT_MARKER`]
/// marks the offset itself. Offsets past the end clamp to the end.
pub fn excerpt(input: &str, offset: usize, radius: usize) -> String {
    let chars: Vec<char> = input.chars().collect();
    let offset = offset.min(chars.len());
    let start = offset.saturating_sub(radius);
    let end = offset.saturating_add(radius).min(chars.len());

    let before: String = chars[start..offset].iter().collect();
    let after: String = chars[offset..end].iter().collect();
    format!("{}{}{}", escape(&before), EXCERPT_MARKER, escape(&after))
}
