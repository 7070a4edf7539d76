//! IRCv3 message tag value unescaping.

/// Unescape a tag value from wire format.
///
/// `\:` becomes `;`, `\s` a space, `\\` a backslash, `\r` and `\n` the
/// control characters. Unknown escapes keep the escaped character and a
/// lone trailing backslash is dropped.
pub fn unescape_tag_value(value: &str) -> String {
    let mut unescaped = String::with_capacity(value.len());
    let mut iter = value.chars();
    while let Some(c) = iter.next() {
        let r = if c == '\\' {
            match iter.next() {
                Some(':') => ';',
                Some('s') => ' ',
                Some('\\') => '\\',
                Some('r') => '\r',
                Some('n') => '\n',
                Some(c) => c,
                None => break,
            }
        } else {
            c
        };
        unescaped.push(r);
    }
    unescaped
}

/// Split a Twitch `badges` tag value (`name/version,name/version`) into pairs.
///
/// Entries without a version yield an empty version.
pub fn badges(value: &str) -> impl Iterator<Item = (&str, &str)> {
    value
        .split(',')
        .filter(|badge| !badge.is_empty())
        .map(|badge| badge.split_once('/').unwrap_or((badge, "")))
}
