//! Column encodings. Editors count a position's `character` in UTF-16 code
//! units, rtags counts bytes of the UTF-8 source line.

use crate::ide::IdePosition;

/// The `line`-th line of `source`, without its terminator.
pub fn line_at(
    source: &str,
    line: u32,
) -> Option<&str> {
    let text = source.split('\n').nth(line as usize)?;
    Some(text.strip_suffix('\r').unwrap_or(text))
}

/// Byte offset into `line` of the UTF-16 column `character`. Columns past the
/// end of the line keep their distance from it.
pub fn byte_column_of_utf16(
    line: &str,
    character: u32,
) -> u32 {
    let mut utf16 = 0u32;
    let mut bytes = 0usize;
    for ch in line.chars() {
        if utf16 >= character {
            return bytes as u32;
        }
        utf16 += ch.len_utf16() as u32;
        bytes += ch.len_utf8();
    }
    bytes as u32 + character.saturating_sub(utf16)
}

/// UTF-16 column of the byte offset `byte_column` in `line`. An offset inside
/// a multi-byte character resolves to that character's start.
pub fn utf16_column_of_byte(
    line: &str,
    byte_column: u32,
) -> u32 {
    let byte_column = byte_column as usize;
    if byte_column > line.len() {
        let overshoot = (byte_column - line.len()) as u32;
        return line.encode_utf16().count() as u32 + overshoot;
    }
    let mut boundary = byte_column;
    while !line.is_char_boundary(boundary) {
        boundary -= 1;
    }
    line[..boundary].encode_utf16().count() as u32
}

/// Editor position to the byte-column position rtags expects. Without the
/// line's text the column is passed through.
pub fn to_byte_position(
    source: Option<&str>,
    position: IdePosition,
) -> IdePosition {
    match source.and_then(|text| line_at(text, position.line)) {
        Some(line) => IdePosition::new(position.line, byte_column_of_utf16(line, position.character)),
        None => position,
    }
}

/// Byte-column position reported by rtags to the editor's UTF-16 position.
pub fn to_utf16_position(
    source: Option<&str>,
    position: IdePosition,
) -> IdePosition {
    match source.and_then(|text| line_at(text, position.line)) {
        Some(line) => IdePosition::new(position.line, utf16_column_of_byte(line, position.character)),
        None => position,
    }
}

#[cfg(test)]
#[path = "../tests/src/text_pos_tests.rs"]
mod tests;
