//! Rune (code point) counting
//!
//! Character-count bookkeeping for callers that display or truncate by
//! runes rather than bytes. Matching itself never needs this; it always
//! works in byte offsets.

/// Count the runes in `s`, stopping at the first NUL.
pub fn rune_count(s: &str) -> usize {
    s.chars().take_while(|&c| c != '\0').count()
}

/// Count the runes in a raw byte string.
///
/// A zero byte terminates the string. A leading byte below 0x80 is one
/// rune; a leading byte at or above 0x80 starts a multi-byte sequence
/// whose length is taken from the leading byte (a malformed leading or
/// truncated sequence still counts as one rune and consumes at least one
/// byte).
pub fn rune_count_bytes(bytes: &[u8]) -> usize {
    let mut n = 0;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if b < 0x80 {
            if b == 0 {
                return n;
            }
            i += 1;
        } else {
            i += sequence_len(b).min(bytes.len() - i);
        }
        n += 1;
    }
    n
}

/// Length in bytes of a UTF-8 sequence, from its leading byte.
fn sequence_len(lead: u8) -> usize {
    match lead {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        // Continuation or invalid lead: resynchronize one byte at a time.
        _ => 1,
    }
}
