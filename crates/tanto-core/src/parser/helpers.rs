//! Numeric and textual predicates shared by the parser passes.

/// Lowest value treated as a release year.
pub const ANIME_YEAR_MIN: u32 = 1900;
/// Highest value treated as a release year.
pub const ANIME_YEAR_MAX: u32 = 2050;
/// Episode numbers above this are rejected.
pub const EPISODE_NUMBER_MAX: u32 = ANIME_YEAR_MIN - 1;
/// Volume numbers above this are rejected.
pub const VOLUME_NUMBER_MAX: u32 = 20;

/// Hyphen and dash code points.
pub const DASHES: [char; 7] = [
    '-', '\u{2010}', '\u{2011}', '\u{2012}', '\u{2013}', '\u{2014}', '\u{2015}',
];

const ORDINALS: [(&str, &str); 18] = [
    ("1st", "1"),
    ("First", "1"),
    ("2nd", "2"),
    ("Second", "2"),
    ("3rd", "3"),
    ("Third", "3"),
    ("4th", "4"),
    ("Fourth", "4"),
    ("5th", "5"),
    ("Fifth", "5"),
    ("6th", "6"),
    ("Sixth", "6"),
    ("7th", "7"),
    ("Seventh", "7"),
    ("8th", "8"),
    ("Eighth", "8"),
    ("9th", "9"),
    ("Ninth", "9"),
];

/// Returns `true` if `s` is a non-empty run of ASCII digits.
#[must_use]
pub fn is_numeric_str(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Byte offset of the first ASCII digit in `s`.
#[must_use]
pub fn find_number_in_string(s: &str) -> Option<usize> {
    s.bytes().position(|b| b.is_ascii_digit())
}

/// Maps an English ordinal word to its numeral.
///
/// ```
/// use tanto_core::parser::helpers::number_from_ordinal;
///
/// assert_eq!(number_from_ordinal("2nd"), Some("2"));
/// assert_eq!(number_from_ordinal("Ninth"), Some("9"));
/// assert_eq!(number_from_ordinal("10th"), None);
/// ```
#[must_use]
pub fn number_from_ordinal(word: &str) -> Option<&'static str> {
    ORDINALS
        .iter()
        .find(|(ordinal, _)| *ordinal == word)
        .map(|(_, number)| *number)
}

/// Returns `true` for exactly eight hexadecimal characters.
#[must_use]
pub fn is_crc32(s: &str) -> bool {
    s.len() == 8 && s.bytes().all(|b| b.is_ascii_hexdigit())
}

#[must_use]
pub fn is_dash_character(c: char) -> bool {
    DASHES.contains(&c)
}

/// Returns `true` for `1080p`-like and `1920x1080`-like strings.
///
/// The `p` form takes any run of at least three digits. The `x` form takes at
/// least three digits, one of `x`, `X` or `×`, then three or four digits.
#[must_use]
pub fn is_resolution(s: &str) -> bool {
    const MIN_DIGITS: usize = 3;

    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());

    if let Some(height) = s.strip_suffix(['p', 'P']) {
        return height.len() >= MIN_DIGITS && all_digits(height);
    }
    match s.split_once(['x', 'X', '×']) {
        Some((width, height)) => {
            width.len() >= MIN_DIGITS
                && all_digits(width)
                && (MIN_DIGITS..=4).contains(&height.len())
                && all_digits(height)
        }
        None => false,
    }
}

/// Integer value of the leading digit run of `s`, saturating on overflow.
///
/// Returns 0 when `s` does not start with a digit.
#[must_use]
pub fn to_int(s: &str) -> u32 {
    s.bytes()
        .take_while(|b| b.is_ascii_digit())
        .fold(0u32, |acc, b| {
            acc.saturating_mul(10).saturating_add(u32::from(b - b'0'))
        })
}

/// Returns `true` if `value` falls in the release-year range.
#[must_use]
pub fn is_year(value: u32) -> bool {
    (ANIME_YEAR_MIN..=ANIME_YEAR_MAX).contains(&value)
}

/// Frame heights that are written without a `p` suffix often enough to matter.
#[must_use]
pub fn is_bare_resolution(value: u32) -> bool {
    matches!(value, 480 | 720 | 1080)
}

/// Rejects years and implausibly large values.
#[must_use]
pub fn is_valid_episode_number(number: &str) -> bool {
    let value = to_int(number);
    !is_year(value) && value <= EPISODE_NUMBER_MAX
}

#[must_use]
pub fn is_valid_volume_number(number: &str) -> bool {
    to_int(number) <= VOLUME_NUMBER_MAX
}

/// Returns `true` if at least half of the characters are Latin.
#[must_use]
pub fn is_mostly_latin(s: &str) -> bool {
    let total = s.chars().count().max(1);
    let latin = s.chars().filter(|&c| c <= '\u{024F}').count();
    latin * 2 >= total
}

/// Trims dashes and spaces from both ends.
#[must_use]
pub fn trim_dashes(s: &str) -> &str {
    s.trim_matches(|c: char| c == ' ' || is_dash_character(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_predicates() {
        assert!(is_numeric_str("0042"));
        assert!(!is_numeric_str(""));
        assert!(!is_numeric_str("12a"));
        assert_eq!(find_number_in_string("v2"), Some(1));
        assert_eq!(find_number_in_string("EP05"), Some(2));
        assert_eq!(find_number_in_string("none"), None);
    }

    #[test]
    fn ordinals_are_case_sensitive() {
        assert_eq!(number_from_ordinal("1st"), Some("1"));
        assert_eq!(number_from_ordinal("Third"), Some("3"));
        assert_eq!(number_from_ordinal("third"), None);
        assert_eq!(number_from_ordinal(""), None);
    }

    #[test]
    fn crc32_needs_eight_hex_chars() {
        assert!(is_crc32("ABCD1234"));
        assert!(is_crc32("deadbeef"));
        assert!(!is_crc32("ABCD123"));
        assert!(!is_crc32("ABCD123G"));
        assert!(!is_crc32("ABCD12345"));
    }

    #[test]
    fn resolution_forms() {
        for yes in [
            "480p", "720p", "1080p", "1080P", "10800p", "12345p", "1920x1080", "640X480",
            "1280×720", "12345x1080",
        ] {
            assert!(is_resolution(yes), "{yes}");
        }
        for no in [
            "", "p", "80p", "1080", "1080i", "1920x108", "x1080", "1920x10800", "1920x1080p",
            "1920xx1080", "108a0p",
        ] {
            assert!(!is_resolution(no), "{no}");
        }
    }

    #[test]
    fn to_int_reads_leading_digits() {
        assert_eq!(to_int("05"), 5);
        assert_eq!(to_int("12v2"), 12);
        assert_eq!(to_int("abc"), 0);
        assert_eq!(to_int("99999999999999999999"), u32::MAX);
    }

    #[test]
    fn episode_and_volume_bounds() {
        assert!(is_valid_episode_number("01"));
        assert!(is_valid_episode_number("1899"));
        assert!(!is_valid_episode_number("1900"));
        assert!(!is_valid_episode_number("2014"));
        assert!(!is_valid_episode_number("2051"));
        assert!(is_bare_resolution(720));
        assert!(!is_bare_resolution(721));
        assert!(is_valid_volume_number("20"));
        assert!(!is_valid_volume_number("21"));
    }

    #[test]
    fn latin_ratio() {
        assert!(is_mostly_latin("Show Name"));
        assert!(is_mostly_latin(""));
        assert!(!is_mostly_latin("進撃の巨人"));
    }

    #[test]
    fn trims_unicode_dashes() {
        assert_eq!(trim_dashes(" \u{2013} Title - "), "Title");
        assert_eq!(trim_dashes("A-B"), "A-B");
        assert_eq!(trim_dashes("--"), "");
        assert!(is_dash_character('\u{2015}'));
        assert!(!is_dash_character('~'));
    }
}
