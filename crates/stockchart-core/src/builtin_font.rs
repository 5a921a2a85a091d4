// File: crates/stockchart-core/src/builtin_font.rs
// Summary: Built-in 5x7 bitmap face used when no outline font can be resolved.
// Notes:
// - Covers printable ASCII. Lowercase letters reuse the uppercase shapes; any other
//   code point renders as a hollow box so missing coverage stays visible.
// - Each glyph is 7 rows, top to bottom; bit 4 is the leftmost column.

pub const GLYPH_COLS: i32 = 5;
pub const GLYPH_ROWS: i32 = 7;
/// Horizontal advance per glyph in font units (5 columns + 1 spacing).
pub const ADVANCE: i32 = 6;

/// ' ' (0x20) through '_' (0x5F).
static BASIC: [[u8; 7]; 64] = [
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00], // space
    [0x04, 0x04, 0x04, 0x04, 0x00, 0x04, 0x00], // !
    [0x0A, 0x0A, 0x00, 0x00, 0x00, 0x00, 0x00], // "
    [0x0A, 0x1F, 0x0A, 0x1F, 0x0A, 0x00, 0x00], // #
    [0x04, 0x0E, 0x14, 0x0E, 0x05, 0x0E, 0x04], // $
    [0x19, 0x1A, 0x04, 0x0B, 0x13, 0x00, 0x00], // %
    [0x0C, 0x12, 0x0C, 0x12, 0x13, 0x0D, 0x00], // &
    [0x04, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00], // quote
    [0x04, 0x08, 0x08, 0x08, 0x08, 0x04, 0x00], // (
    [0x04, 0x02, 0x02, 0x02, 0x02, 0x04, 0x00], // )
    [0x00, 0x15, 0x0E, 0x15, 0x00, 0x00, 0x00], // *
    [0x00, 0x04, 0x04, 0x1F, 0x04, 0x04, 0x00], // +
    [0x00, 0x00, 0x00, 0x00, 0x04, 0x04, 0x08], // ,
    [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00], // -
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x04, 0x00], // .
    [0x01, 0x02, 0x04, 0x08, 0x10, 0x00, 0x00], // /
    [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E], // 0
    [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E], // 1
    [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F], // 2
    [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E], // 3
    [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02], // 4
    [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E], // 5
    [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E], // 6
    [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08], // 7
    [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E], // 8
    [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C], // 9
    [0x00, 0x04, 0x00, 0x00, 0x04, 0x00, 0x00], // :
    [0x00, 0x04, 0x00, 0x00, 0x04, 0x04, 0x08], // ;
    [0x02, 0x04, 0x08, 0x10, 0x08, 0x04, 0x02], // <
    [0x00, 0x00, 0x1F, 0x00, 0x1F, 0x00, 0x00], // =
    [0x08, 0x04, 0x02, 0x01, 0x02, 0x04, 0x08], // >
    [0x0E, 0x11, 0x01, 0x02, 0x04, 0x00, 0x04], // ?
    [0x0E, 0x11, 0x17, 0x15, 0x17, 0x10, 0x0E], // @
    [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11], // A
    [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E], // B
    [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E], // C
    [0x1E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1E], // D
    [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F], // E
    [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10], // F
    [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F], // G
    [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11], // H
    [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E], // I
    [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C], // J
    [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11], // K
    [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F], // L
    [0x11, 0x1B, 0x15, 0x11, 0x11, 0x11, 0x11], // M
    [0x11, 0x19, 0x15, 0x13, 0x11, 0x11, 0x11], // N
    [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E], // O
    [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10], // P
    [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D], // Q
    [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11], // R
    [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E], // S
    [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04], // T
    [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E], // U
    [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04], // V
    [0x11, 0x11, 0x11, 0x15, 0x15, 0x1B, 0x11], // W
    [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11], // X
    [0x11, 0x11, 0x0A, 0x04, 0x04, 0x04, 0x04], // Y
    [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F], // Z
    [0x0E, 0x08, 0x08, 0x08, 0x08, 0x08, 0x0E], // [
    [0x10, 0x08, 0x04, 0x02, 0x01, 0x00, 0x00], // backslash
    [0x0E, 0x02, 0x02, 0x02, 0x02, 0x02, 0x0E], // ]
    [0x04, 0x0A, 0x11, 0x00, 0x00, 0x00, 0x00], // ^
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1F], // _
];

static BACKTICK: [u8; 7] = [0x08, 0x04, 0x02, 0x00, 0x00, 0x00, 0x00];
static LBRACE: [u8; 7] = [0x02, 0x04, 0x04, 0x08, 0x04, 0x04, 0x02];
static PIPE: [u8; 7] = [0x04, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04];
static RBRACE: [u8; 7] = [0x08, 0x04, 0x04, 0x02, 0x04, 0x04, 0x08];
static TILDE: [u8; 7] = [0x00, 0x00, 0x08, 0x15, 0x02, 0x00, 0x00];
static MISSING: [u8; 7] = [0x1F, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1F];

/// Row bitmap for `ch`.
pub fn glyph(ch: char) -> &'static [u8; 7] {
    let ch = ch.to_ascii_uppercase();
    match ch {
        ' '..='_' => &BASIC[ch as usize - 0x20],
        '`' => &BACKTICK,
        '{' => &LBRACE,
        '|' => &PIPE,
        '}' => &RBRACE,
        '~' => &TILDE,
        _ => &MISSING,
    }
}

/// Whether `ch` has a real shape (not the missing-glyph box).
#[cfg(test)]
fn covers(ch: char) -> bool {
    !std::ptr::eq(glyph(ch), &MISSING)
}

/// Integer scale factor used for a requested pixel size.
pub fn scale_for(px: f32) -> i32 {
    ((px / 8.0).round() as i32).max(1)
}

/// Call `plot(col, row)` for every lit cell of `ch`.
pub fn for_each_lit(ch: char, mut plot: impl FnMut(i32, i32)) {
    for (row, bits) in glyph(ch).iter().enumerate() {
        for col in 0..GLYPH_COLS {
            if bits & (1 << (GLYPH_COLS - 1 - col)) != 0 {
                plot(col, row as i32);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercase_shares_uppercase_shape() {
        assert_eq!(glyph('a'), glyph('A'));
        assert!(covers('z'));
    }

    #[test]
    fn cjk_falls_back_to_box() {
        assert!(!covers('營'));
        assert_eq!(glyph('營'), &MISSING);
    }

    #[test]
    fn percent_and_digits_are_covered() {
        for ch in "0123456789%.-+:()".chars() {
            assert!(covers(ch), "{ch:?} should be covered");
        }
        let mut lit = 0;
        for_each_lit('1', |_, _| lit += 1);
        assert!(lit > 5);
    }

    #[test]
    fn scale_never_below_one() {
        assert_eq!(scale_for(0.0), 1);
        assert_eq!(scale_for(12.0), 2);
        assert_eq!(scale_for(18.0), 2);
        assert_eq!(scale_for(24.0), 3);
    }
}
