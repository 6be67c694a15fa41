/*!
# Phone Numbers

Brazil-centric normalization and a coarse validity heuristic. Neither function
fails: malformed input produces a best-effort digit string, and validity is a
separate question answered by [`is_valid`].
*/

/// Country code prepended to domestic numbers
pub const BRAZIL_COUNTRY_CODE: &str = "55";

/// Fewest digits a dialable number can have (area code + 8-digit landline)
pub const MIN_PHONE_DIGITS: usize = 10;

/// Most digits accepted (country code + area code + 9-digit mobile)
pub const MAX_PHONE_DIGITS: usize = 13;

/// Every ASCII digit of `raw`, in order
pub fn digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Canonical digits-only form with the Brazilian country code
///
/// - non-digits are stripped
/// - a leading `0` trunk prefix is dropped when what follows is a 10 or
///   11 digit domestic number
/// - a 10 or 11 digit number not already starting with `55` gets `55` prepended
/// - anything else is returned as bare digits
///
/// The result is stable: `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(raw: &str) -> String {
    let mut number = digits(raw);

    if matches!(number.len(), 11 | 12) && number.starts_with('0') {
        number.remove(0);
    }

    if matches!(number.len(), 10 | 11) && !number.starts_with(BRAZIL_COUNTRY_CODE) {
        number.insert_str(0, BRAZIL_COUNTRY_CODE);
    }

    number
}

/// Heuristic validity check on the digits of `raw`
///
/// Valid numbers have 10 to 13 digits; numbers of 12 digits or more must also
/// start with a plausible country code (`55` Brazil or `1` North America).
pub fn is_valid(raw: &str) -> bool {
    let number = digits(raw);
    let len = number.len();

    if !(MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&len) {
        return false;
    }

    len < 12 || number.starts_with(BRAZIL_COUNTRY_CODE) || number.starts_with('1')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_formatted_mobile() {
        assert_eq!(normalize("(11) 98765-4321"), "5511987654321");
        assert_eq!(normalize("+55 (11) 98765-4321"), "5511987654321");
    }

    #[test]
    fn test_normalize_strips_trunk_prefix() {
        assert_eq!(normalize("011987654321"), "5511987654321");
        assert_eq!(normalize("01133334444"), "551133334444");
    }

    #[test]
    fn test_normalize_already_normalized() {
        assert_eq!(normalize("5511987654321"), "5511987654321");
        assert_eq!(normalize("551133334444"), "551133334444");
    }

    #[test]
    fn test_normalize_leaves_unguessable_lengths() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("abc"), "");
        assert_eq!(normalize("12345"), "12345");
        assert_eq!(normalize("12025550123456"), "12025550123456");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let samples = [
            "(11) 98765-4321",
            "011987654321",
            "0011987654321",
            "00123456789",
            "0123456789",
            "5511987654321",
            "55119876543",
            "21 3333-4444",
            "+1 (202) 555-0123",
            "12345",
            "",
            "0",
            "000000000000",
        ];

        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "normalize not idempotent for {sample:?}");
        }
    }

    #[test]
    fn test_is_valid_lengths() {
        assert!(is_valid("1133334444"));
        assert!(is_valid("11987654321"));
        assert!(!is_valid("133334444"));
        assert!(!is_valid("55119876543210"));
    }

    #[test]
    fn test_is_valid_country_code_heuristic() {
        assert!(is_valid("5511987654321"));
        assert!(is_valid("12025550123"));
        assert!(is_valid("120255501234"));
        assert!(!is_valid("441234567890"));
        assert!(!is_valid("011987654321"));
    }

    #[test]
    fn test_is_valid_ignores_formatting() {
        assert!(is_valid("+55 (11) 98765-4321"));
        assert!(!is_valid("not a phone"));
    }
}
