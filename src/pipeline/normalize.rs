//! Description cleaning shared by training and inference
//!
//! Both sides must call [`normalize`]; the fitted vocabulary only makes sense
//! for text produced by this exact function.

use std::sync::OnceLock;

use regex::Regex;

/// Transactional boilerplate removed wherever it appears, including inside words.
pub const NOISE_PATTERN: &str = r"txn|transaction|debited|credited|rs\.?|inr";

/// Runs of this many digits or more are treated as order/reference ids.
pub const MIN_ID_DIGITS: usize = 4;

struct Patterns {
    noise: Regex,
    long_number: Regex,
    non_letter: Regex,
    whitespace: Regex,
}

static PATTERNS: OnceLock<Patterns> = OnceLock::new();

fn patterns() -> &'static Patterns {
    PATTERNS.get_or_init(|| Patterns {
        noise: Regex::new(NOISE_PATTERN).expect("noise pattern is valid"),
        long_number: Regex::new(&format!(r"\d{{{},}}", MIN_ID_DIGITS))
            .expect("digit pattern is valid"),
        non_letter: Regex::new(r"[^a-z\s]").expect("letter pattern is valid"),
        whitespace: Regex::new(r"\s+").expect("whitespace pattern is valid"),
    })
}

/// Clean a raw transaction description into classifier input.
///
/// Missing values map to the empty string. The result only contains
/// lowercase ASCII letters separated by single spaces.
pub fn normalize(text: Option<&str>) -> String {
    let Some(text) = text else {
        return String::new();
    };

    let p = patterns();
    let lowered = text.to_lowercase();
    let t = p.noise.replace_all(&lowered, " ");
    let t = p.long_number.replace_all(&t, " ");
    let t = p.non_letter.replace_all(&t, " ");
    let t = p.whitespace.replace_all(&t, " ");
    t.trim().to_string()
}

/// Normalize a batch of optional descriptions.
pub fn normalize_all<'a, I>(texts: I) -> Vec<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    texts.into_iter().map(normalize).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_clean(s: &str) -> bool {
        s.chars().all(|c| c.is_ascii_lowercase() || c == ' ')
            && !s.starts_with(' ')
            && !s.ends_with(' ')
            && !s.contains("  ")
    }

    #[test]
    fn test_missing_input_is_empty() {
        assert_eq!(normalize(None), "");
    }

    #[test]
    fn test_lowercases_and_strips_ids() {
        assert_eq!(normalize(Some("Zomato order 1234")), "zomato order");
        let out = normalize(Some("order 123456 confirmed"));
        assert!(!out.chars().any(|c| c.is_ascii_digit()));
        assert_eq!(out, "order confirmed");
    }

    #[test]
    fn test_short_numbers_become_spaces() {
        assert_eq!(normalize(Some("Uber 12 rides")), "uber rides");
    }

    #[test]
    fn test_noise_words_removed() {
        assert_eq!(normalize(Some("UPI txn debited for Swiggy")), "upi for swiggy");
        assert_eq!(normalize(Some("Rs. 500 credited by ACME")), "by acme");
        assert_eq!(normalize(Some("INR transaction Amazon")), "amazon");
    }

    #[test]
    fn test_noise_removed_inside_words() {
        // "rs" inside "first" is still boilerplate to the pattern
        assert_eq!(normalize(Some("first")), "fi t");
    }

    #[test]
    fn test_punctuation_and_whitespace() {
        assert_eq!(
            normalize(Some("  Myntra\t--Fashion!!  SALE\n")),
            "myntra fashion sale"
        );
    }

    #[test]
    fn test_non_ascii_letters_dropped() {
        assert_eq!(normalize(Some("Café Déjà")), "caf d j");
    }

    #[test]
    fn test_output_alphabet_and_idempotence() {
        let samples = [
            "",
            "   ",
            "POS 4587 AMAZON.IN/Bill Rs.1,299.00",
            "NEFT-CR-HDFC0000123-SALARY OCT",
            "Électricité  ⚡ 2024-10-01",
            "first class rsvp inrush",
            "12345678901234",
            "a\u{00A0}b\u{2003}c",
            "txntxn transactiontransaction",
        ];
        for s in samples {
            let once = normalize(Some(s));
            assert!(is_clean(&once), "not clean: {:?} -> {:?}", s, once);
            assert_eq!(normalize(Some(&once)), once, "not idempotent for {:?}", s);
        }
    }

    #[test]
    fn test_normalize_all_maps_each() {
        let out = normalize_all([Some("Zomato 9999"), None, Some("Myntra")]);
        assert_eq!(out, vec!["zomato", "", "myntra"]);
    }
}
