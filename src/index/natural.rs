//! Natural-order sort keys
//!
//! Splits a string into alternating text and digit runs so that embedded
//! numbers compare by value: `img2` sorts before `img10`.

use std::cmp::Ordering;

/// One run of a natural key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A maximal run of ASCII digits, kept as written.
    Number(String),
    /// Everything between digit runs.
    Text(String),
}

impl Token {
    /// Digits with leading zeros removed (`"0"` stays `"0"`).
    fn significant_digits(digits: &str) -> &str {
        let trimmed = digits.trim_start_matches('0');
        if trimmed.is_empty() && !digits.is_empty() {
            &digits[digits.len() - 1..]
        } else {
            trimmed
        }
    }

    /// Compare by value only; `01` and `1` are equal here.
    fn cmp_value(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Token::Number(a), Token::Number(b)) => {
                let sa = Self::significant_digits(a);
                let sb = Self::significant_digits(b);
                sa.len().cmp(&sb.len()).then_with(|| sa.cmp(sb))
            }
            (Token::Text(a), Token::Text(b)) => alphanumeric_sort::compare_str(a, b),
            // Mixed comparison is implementation-defined: numbers first.
            (Token::Number(_), Token::Text(_)) => Ordering::Less,
            (Token::Text(_), Token::Number(_)) => Ordering::Greater,
        }
    }
}

/// Sort key that orders digit runs numerically.
///
/// Keys compare token by token, by value; when one key is a prefix of the
/// other the shorter key sorts first. Keys that are equal by value (they
/// differ only in leading zeros) fall back to [`alphanumeric_sort`] on the
/// raw strings, which puts fewer leading zeros first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NaturalKey {
    raw: String,
    tokens: Vec<Token>,
}

impl NaturalKey {
    /// Build the key for `s`.
    pub fn new(s: &str) -> Self {
        let mut tokens = Vec::new();
        let mut current = String::new();
        let mut in_digits = false;

        for ch in s.chars() {
            let is_digit = ch.is_ascii_digit();
            if !current.is_empty() && is_digit != in_digits {
                tokens.push(Self::finish(std::mem::take(&mut current), in_digits));
            }
            in_digits = is_digit;
            current.push(ch);
        }
        if !current.is_empty() {
            tokens.push(Self::finish(current, in_digits));
        }

        Self {
            raw: s.to_string(),
            tokens,
        }
    }

    fn finish(run: String, digits: bool) -> Token {
        if digits {
            Token::Number(run)
        } else {
            Token::Text(run)
        }
    }

    /// The tokens in the order they appear.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

impl Ord for NaturalKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.tokens
            .iter()
            .zip(&other.tokens)
            .map(|(a, b)| a.cmp_value(b))
            .find(|o| o.is_ne())
            .unwrap_or_else(|| self.tokens.len().cmp(&other.tokens.len()))
            .then_with(|| alphanumeric_sort::compare_str(&self.raw, &other.raw))
    }
}

impl PartialOrd for NaturalKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compare two strings in natural order.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    NaturalKey::new(a).cmp(&NaturalKey::new(b))
}

/// Sort strings in place by natural key.
pub fn sort_natural<S: AsRef<str>>(items: &mut [S]) {
    items.sort_by_cached_key(|s| NaturalKey::new(s.as_ref()));
}
