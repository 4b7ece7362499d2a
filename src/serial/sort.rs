use std::cmp::Ordering;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::SerialNumbered;

static SERIAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z]*)([0-9]+)$").expect("serial pattern compiles"));

/// sort key of a serial: letter prefix, then numeric suffix
///
/// serials that are not letters-then-digits use the whole string as the
/// prefix and a suffix of zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerialKey<'a> {
    pub prefix: &'a str,
    /// decimal digits with leading zeros stripped; empty means zero
    digits: &'a str,
}

impl<'a> SerialKey<'a> {
    pub fn new(serial: &'a str) -> Self {
        match SERIAL.captures(serial) {
            Some(caps) => {
                let prefix = caps.get(1).map_or("", |m| m.as_str());
                let digits = caps.get(2).map_or("", |m| m.as_str());
                Self {
                    prefix,
                    digits: digits.trim_start_matches('0'),
                }
            }
            None => Self {
                prefix: serial,
                digits: "",
            },
        }
    }

    /// numeric suffix, if it fits in a `u64`
    pub fn number(&self) -> Option<u64> {
        if self.digits.is_empty() {
            Some(0)
        } else {
            self.digits.parse().ok()
        }
    }

    fn cmp_number(&self, other: &Self) -> Ordering {
        self.digits
            .len()
            .cmp(&other.digits.len())
            .then_with(|| self.digits.cmp(other.digits))
    }
}

impl Ord for SerialKey<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.prefix == other.prefix {
            self.cmp_number(other)
        } else {
            locale_compare(self.prefix, other.prefix)
        }
    }
}

impl PartialOrd for SerialKey<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// dictionary-style comparison: letters ignore case first, then lowercase
/// sorts before uppercase, then plain code point order
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));

    folded
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
        .then_with(|| a.cmp(b))
}

pub fn compare_serials(a: &str, b: &str) -> Ordering {
    SerialKey::new(a).cmp(&SerialKey::new(b))
}

/// stable in-place ordering by serial; equal keys keep their input order
pub fn sort_by_serial<T: SerialNumbered>(entries: &mut [T]) {
    entries.sort_by(|a, b| compare_serials(a.serial_number(), b.serial_number()));
}

pub fn sorted_by_serial<T: SerialNumbered>(mut entries: Vec<T>) -> Vec<T> {
    sort_by_serial(&mut entries);
    entries
}
