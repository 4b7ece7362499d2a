use once_cell::sync::Lazy;
use regex::Regex;

static RANGE_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z]*)([0-9]+)-([A-Za-z]*)([0-9]+)$").expect("range token pattern compiles")
});

/// inclusive run of serials sharing a prefix, e.g. `A1-A5`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialRange {
    pub prefix: String,
    pub start: u64,
    pub end: u64,
}

impl SerialRange {
    /// every serial in the range, ascending; empty when `start > end`
    pub fn serials(&self) -> impl Iterator<Item = String> + '_ {
        (self.start..=self.end).map(move |n| format!("{}{}", self.prefix, n))
    }

    /// whether `serial` is one of the serials this range expands to
    ///
    /// expanded serials carry no leading zeros, so `A09` is never in `A8-A10`.
    pub fn contains(&self, serial: &str) -> bool {
        let Some(digits) = serial.strip_prefix(self.prefix.as_str()) else {
            return false;
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        if digits.len() > 1 && digits.starts_with('0') {
            return false;
        }
        digits
            .parse::<u64>()
            .map(|n| self.start <= n && n <= self.end)
            .unwrap_or(false)
    }
}

/// one comma-separated piece of a search expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchToken {
    /// matched verbatim against serial numbers
    Literal(String),
    Range(SerialRange),
}

impl SearchToken {
    /// classify a trimmed token
    ///
    /// a range whose two ends carry different prefixes (`A1-B5`) stays a
    /// literal, as does one whose bounds do not fit in a `u64`.
    pub fn parse(token: &str) -> Self {
        let Some(caps) = RANGE_TOKEN.captures(token) else {
            return SearchToken::Literal(token.to_string());
        };

        let (start_prefix, end_prefix) = (&caps[1], &caps[3]);
        if start_prefix != end_prefix {
            return SearchToken::Literal(token.to_string());
        }

        match (caps[2].parse::<u64>(), caps[4].parse::<u64>()) {
            (Ok(start), Ok(end)) => SearchToken::Range(SerialRange {
                prefix: start_prefix.to_string(),
                start,
                end,
            }),
            _ => SearchToken::Literal(token.to_string()),
        }
    }

    /// whether the token names `serial`, without expanding ranges
    pub fn matches(&self, serial: &str) -> bool {
        match self {
            SearchToken::Literal(literal) => literal == serial,
            SearchToken::Range(range) => range.contains(serial),
        }
    }
}

/// split a search expression into tokens, trimming whitespace around each
pub fn parse_search_expression(input: &str) -> Vec<SearchToken> {
    input.split(',').map(|part| SearchToken::parse(part.trim())).collect()
}

/// expand a search expression such as `1,3-5,NS1` into the serials it names
///
/// order follows the expression left to right; duplicates are kept.
pub fn expand_search_expression(input: &str) -> Vec<String> {
    let mut serials = Vec::new();
    for token in parse_search_expression(input) {
        match token {
            SearchToken::Literal(serial) => serials.push(serial),
            SearchToken::Range(range) => serials.extend(range.serials()),
        }
    }
    serials
}
