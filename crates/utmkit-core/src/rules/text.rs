/// Punctuation that survives normalization alongside word characters and
/// whitespace. These are the characters that are meaningful in a URL.
const URL_SAFE_PUNCTUATION: &str = "-._~:/?#[]@!$&'()*+,;=";

/// ASCII letters, digits and underscore. Non-ASCII letters are not word
/// characters and get stripped wherever this class is used as an allow-list.
pub(crate) fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Whitespace as ECMAScript's `\s` defines it. Differs from
/// `char::is_whitespace` on U+FEFF (included here) and U+0085 (excluded).
pub(crate) fn is_space(ch: char) -> bool {
    matches!(
        ch,
        '\t' | '\n'
            | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

pub(crate) fn is_url_safe(ch: char) -> bool {
    is_word_char(ch) || is_space(ch) || URL_SAFE_PUNCTUATION.contains(ch)
}

/// Replaces every maximal run of characters matching `in_run` with a single `-`.
pub(crate) fn dash_runs(value: &str, in_run: impl Fn(char) -> bool) -> String {
    let mut out = String::with_capacity(value.len());
    let mut prev_dash = false;
    for ch in value.chars() {
        if in_run(ch) {
            if !prev_dash {
                out.push('-');
            }
            prev_dash = true;
        } else {
            prev_dash = false;
            out.push(ch);
        }
    }
    out
}
