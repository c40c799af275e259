pub static RESERVED_TABLE_NAME: &str = "tables";

pub const MIN_TABLE_NAME_LEN: usize = 3;
pub const MAX_TABLE_NAME_LEN: usize = 63;
pub const MAX_KEY_BYTES: usize = 1024;

/// Table names are 3-63 ASCII alphanumerics starting with a letter.
pub fn is_valid_table_name(table_name: &str) -> bool {
    if table_name.len() < MIN_TABLE_NAME_LEN || table_name.len() > MAX_TABLE_NAME_LEN {
        return false;
    }

    if table_name.eq_ignore_ascii_case(RESERVED_TABLE_NAME) {
        return false;
    }

    let mut chars = table_name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric())
}

pub fn is_valid_key(key: &str) -> bool {
    if key.len() > MAX_KEY_BYTES {
        return false;
    }

    !key
        .chars()
        .any(|c| matches!(c, '/' | '\\' | '#' | '?') || c.is_control())
}
