/// Token that must precede a test name.
pub const MARKER: &str = "void";

/// Required prefix of every test name.
pub const TEST_PREFIX: &str = "test_";

/// Return the first test name declared on `line`, if any.
///
/// A match is `void`, at least one blank, then `test_` followed by one or
/// more word characters (`[A-Za-z0-9_]`). `void` must not be the tail of a
/// longer identifier. Anything after the name is ignored.
pub fn match_test_line(line: &str) -> Option<&str> {
    let bytes = line.as_bytes();
    let mut from = 0;

    while let Some(offset) = line[from..].find(MARKER) {
        let start = from + offset;
        from = start + MARKER.len();

        if start > 0 && is_word_byte(bytes[start - 1]) {
            continue;
        }

        let rest = &line[from..];
        let after_blanks = rest.trim_start_matches(is_blank);
        if after_blanks.len() == rest.len() {
            continue;
        }

        let Some(tail) = after_blanks.strip_prefix(TEST_PREFIX) else {
            continue;
        };
        let word_len = tail.bytes().take_while(|b| is_word_byte(*b)).count();
        if word_len == 0 {
            continue;
        }

        return Some(&after_blanks[..TEST_PREFIX.len() + word_len]);
    }

    None
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}
