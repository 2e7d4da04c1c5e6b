// Copyright (c) 2024-2026 the gridevents developers

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use std::fmt;
use std::str;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ErrorKind, ParserError};

/// Identifier of a bidding zone or control area (e.g. `"AT"`, `"US-CAL-CISO"`).
///
/// Zone keys are opaque uppercase strings; whether a syntactically valid key
/// is actually known is answered by the catalog, not by this type.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ZoneKey(String);

impl ZoneKey {
    /// String form of the key
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZoneKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ZoneKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl str::FromStr for ZoneKey {
    type Err = ParserError;

    fn from_str(s: &str) -> Result<ZoneKey, Self::Err> {
        let shape_ok = !s.is_empty()
            && s.chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-')
            && !s.starts_with('-')
            && !s.ends_with('-');
        if shape_ok {
            Ok(ZoneKey(s.to_string()))
        } else {
            Err(ParserError::new(
                ErrorKind::MalformedKey,
                "catalog",
                format!("invalid zone key \"{}\"", s),
            ))
        }
    }
}

impl Serialize for ZoneKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ZoneKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<ZoneKey, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

/// Identifier of an unordered pair of zones joined by an interconnector.
///
/// Always rendered as `"A->B"` with `A` lexicographically before `B`; the
/// constructor sorts its arguments so a parser may pass the pair in either
/// order. A positive net flow on the pair means power moving from `A` to `B`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExchangeKey {
    left: ZoneKey,
    right: ZoneKey,
}

impl ExchangeKey {
    /// Builds the sorted key for a pair of zones, in any order
    pub fn new(a: ZoneKey, b: ZoneKey) -> ExchangeKey {
        if a <= b {
            ExchangeKey { left: a, right: b }
        } else {
            ExchangeKey { left: b, right: a }
        }
    }

    /// First zone of the sorted pair
    pub fn left(&self) -> &ZoneKey {
        &self.left
    }

    /// Second zone of the sorted pair
    pub fn right(&self) -> &ZoneKey {
        &self.right
    }
}

impl fmt::Display for ExchangeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.left, self.right)
    }
}

impl str::FromStr for ExchangeKey {
    type Err = ParserError;

    fn from_str(s: &str) -> Result<ExchangeKey, Self::Err> {
        let parts: Vec<&str> = s.split("->").collect();
        if parts.len() != 2 {
            return Err(ParserError::new(
                ErrorKind::MalformedKey,
                "catalog",
                format!("invalid exchange key \"{}\"", s),
            ));
        }
        Ok(ExchangeKey::new(parts[0].parse()?, parts[1].parse()?))
    }
}

impl Serialize for ExchangeKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ExchangeKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<ExchangeKey, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn tzonekey() {
        assert_eq!("AT".parse::<ZoneKey>().unwrap().as_str(), "AT");
        assert_eq!(
            "US-CAL-CISO".parse::<ZoneKey>().unwrap().as_str(),
            "US-CAL-CISO"
        );

        assert!("".parse::<ZoneKey>().is_err());
        assert!("at".parse::<ZoneKey>().is_err());
        assert!("AT DE".parse::<ZoneKey>().is_err());
        assert!("-AT".parse::<ZoneKey>().is_err());
    }

    #[test]
    fn texchangekey_sorts() {
        let key = ExchangeKey::new("DE".parse().unwrap(), "AT".parse().unwrap());
        assert_eq!(format!("{}", key), "AT->DE");
        assert_eq!(key, "AT->DE".parse().unwrap());
        // parsing also sorts
        assert_eq!("DE->AT".parse::<ExchangeKey>().unwrap(), key);
    }

    #[test]
    fn texchangekey_rejects_malformed() {
        assert!("AT".parse::<ExchangeKey>().is_err());
        assert!("AT->DE->CH".parse::<ExchangeKey>().is_err());
        assert!("AT->de".parse::<ExchangeKey>().is_err());
    }

    #[test]
    fn texchangekey_serde_roundtrip() {
        let key: ExchangeKey = "AT->DE".parse().unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"AT->DE\"");
        assert_eq!(serde_json::from_str::<ExchangeKey>(&json).unwrap(), key);
    }
}
