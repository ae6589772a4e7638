/// Longest display name accepted, in characters.
pub const MAX_DISPLAY_NAME_LEN: usize = 16;

/// True for 1 to 16 printable, non-whitespace characters.
pub fn is_valid_display_name(name: &str) -> bool {
    let len = name.chars().count();
    if len == 0 || len > MAX_DISPLAY_NAME_LEN {
        return false;
    }

    name.chars().all(|c| !c.is_whitespace() && is_printable(c))
}

fn is_printable(c: char) -> bool {
    !c.is_control() && !is_format(c) && !is_private_use(c) && !is_noncharacter(c)
}

/// Unicode general category Cf: invisible formatting, bidi controls, tags.
fn is_format(c: char) -> bool {
    matches!(
        c as u32,
        0x00AD
            | 0x0600..=0x0605
            | 0x061C
            | 0x06DD
            | 0x070F
            | 0x0890..=0x0891
            | 0x08E2
            | 0x180E
            | 0x200B..=0x200F
            | 0x202A..=0x202E
            | 0x2060..=0x2064
            | 0x2066..=0x206F
            | 0xFEFF
            | 0xFFF9..=0xFFFB
            | 0x110BD
            | 0x110CD
            | 0x13430..=0x1343F
            | 0x1BCA0..=0x1BCA3
            | 0x1D173..=0x1D17A
            | 0xE0001
            | 0xE0020..=0xE007F
    )
}

fn is_private_use(c: char) -> bool {
    matches!(
        c as u32,
        0xE000..=0xF8FF | 0xF0000..=0xFFFFD | 0x100000..=0x10FFFD
    )
}

fn is_noncharacter(c: char) -> bool {
    let cp = c as u32;
    (0xFDD0..=0xFDEF).contains(&cp) || cp & 0xFFFE == 0xFFFE
}
