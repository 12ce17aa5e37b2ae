//! Folding hash over numeric identifiers.
//!
//! The key is cut into consecutive 4-digit groups from the left, each group
//! is read as a decimal number and the groups are summed. The bucket index is
//! that sum modulo the table capacity.
//!
//! ```text
//!   "000100020003"
//!    ├──┤├──┤├──┤
//!    0001 0002 0003  ->  1 + 2 + 3 = 6  ->  6 % capacity
//! ```
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Number of digits in a generated identifier.
pub const IDENTIFIER_LEN: usize = 12;

/// Width of one folding group.
pub const GROUP_WIDTH: usize = 4;

/// A 12-digit numeric identifier, stored as its ASCII digits.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identifier([u8; IDENTIFIER_LEN]);

impl Identifier {
    pub fn new(key: &str) -> Result<Self> {
        let bytes = key.as_bytes();
        if bytes.len() != IDENTIFIER_LEN || !bytes.iter().all(u8::is_ascii_digit) {
            return Err(Error::InvalidIdentifier {
                key: key.to_owned(),
            });
        }
        let mut digits = [0u8; IDENTIFIER_LEN];
        digits.copy_from_slice(bytes);
        Ok(Self(digits))
    }

    /// Builds an identifier from digit values `0..=9`.
    pub(crate) fn from_digit_values(values: [u8; IDENTIFIER_LEN]) -> Self {
        debug_assert!(values.iter().all(|&d| d < 10));
        Self(values.map(|d| b'0' + d))
    }

    pub fn as_str(&self) -> &str {
        // Only ASCII digits are ever stored.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for Identifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identifier({})", self.as_str())
    }
}

/// Sums the 4-digit groups of a string already known to be all digits.
#[inline(always)]
pub(crate) fn fold_digits(digits: &[u8]) -> u64 {
    digits
        .chunks(GROUP_WIDTH)
        .map(|group| {
            group
                .iter()
                .fold(0u64, |acc, &d| acc * 10 + u64::from(d - b'0'))
        })
        .sum()
}

/// Sum of the 4-digit groups of `key`. The last group may be shorter.
pub fn fold_sum(key: &str) -> Result<u64> {
    let bytes = key.as_bytes();
    if !bytes.iter().all(u8::is_ascii_digit) {
        return Err(Error::InvalidIdentifier {
            key: key.to_owned(),
        });
    }
    Ok(fold_digits(bytes))
}

/// Bucket index of `key` in a table of `capacity` buckets.
pub fn fold_hash(key: &str, capacity: usize) -> Result<usize> {
    if capacity == 0 {
        return Err(Error::InvalidCapacity { capacity });
    }
    let sum = fold_sum(key)?;
    Ok((sum % capacity as u64) as usize)
}
