/// SAME code parsing.
///
/// A SAME code is 6 characters: one area-type digit followed by the 5-digit
/// county FIPS code, e.g. `"012071"` → state `"12"`, county `"12071"`.
/// The resolvers assume a valid length; callers filter with `is_valid_same`
/// first. Invalid codes are expected in the upstream feed and are skipped,
/// never reported.

/// Required length of a SAME code, in characters.
pub const SAME_CODE_LEN: usize = 6;

/// True when `same` is exactly 6 characters long.
pub fn is_valid_same(same: &str) -> bool {
    same.chars().count() == SAME_CODE_LEN
}

/// Two-character state FIPS code: characters 1–2 of the SAME code.
pub fn state_code_of(same: &str) -> &str {
    slice_chars(same, 1, 3)
}

/// Five-character county FIPS code: the SAME code minus its leading digit.
pub fn county_code_of(same: &str) -> &str {
    slice_chars(same, 1, SAME_CODE_LEN)
}

/// Valid SAME codes from `codes`, in their original order.
pub fn valid_codes<'a, I>(codes: I) -> impl Iterator<Item = &'a str>
where
    I: IntoIterator<Item = &'a String>,
{
    codes
        .into_iter()
        .map(String::as_str)
        .filter(|code| is_valid_same(code))
}

// Char-boundary-safe slice; SAME codes are ASCII in practice but the feed
// is not trusted.
fn slice_chars(s: &str, start: usize, end: usize) -> &str {
    let byte_at = |n: usize| s.char_indices().nth(n).map(|(i, _)| i).unwrap_or(s.len());
    &s[byte_at(start)..byte_at(end)]
}
