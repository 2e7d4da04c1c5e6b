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

/*!
Zone/exchange catalog
=====================

Read-only reference data the event factories validate against: the set of
legal zone keys, the set of legal sorted exchange keys and the recognized
currency codes. The catalog is loaded once at process start (typically from
JSON) and passed by reference to event lists and reducers; nothing in this
crate mutates it.
*/

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, ParserError, Result};
use crate::types::{ExchangeKey, ZoneKey};

/// Catalog of legal zones, exchanges and currencies
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneCatalog {
    zones: BTreeSet<ZoneKey>,
    exchanges: BTreeSet<ExchangeKey>,
    currencies: BTreeSet<String>,
}

impl ZoneCatalog {
    /// Builds a catalog, checking that every exchange references known zones
    pub fn new(
        zones: impl IntoIterator<Item = ZoneKey>,
        exchanges: impl IntoIterator<Item = ExchangeKey>,
        currencies: impl IntoIterator<Item = String>,
    ) -> Result<ZoneCatalog> {
        let catalog = ZoneCatalog {
            zones: zones.into_iter().collect(),
            exchanges: exchanges.into_iter().collect(),
            currencies: currencies.into_iter().collect(),
        };
        catalog.check()?;
        Ok(catalog)
    }

    /// Loads a catalog from its JSON form
    pub fn from_json(data: &str) -> Result<ZoneCatalog> {
        let catalog: ZoneCatalog = serde_json::from_str(data)?;
        catalog.check()?;
        Ok(catalog)
    }

    fn check(&self) -> Result<()> {
        for exchange in &self.exchanges {
            for zone in [exchange.left(), exchange.right()] {
                if !self.zones.contains(zone) {
                    return Err(ParserError::new(
                        ErrorKind::Configuration,
                        "catalog",
                        format!("exchange key {} references unknown zone {}", exchange, zone),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Is this plain zone known?
    pub fn has_zone(&self, key: &ZoneKey) -> bool {
        self.zones.contains(key)
    }

    /// Is this sorted exchange key known?
    pub fn has_exchange(&self, key: &ExchangeKey) -> bool {
        self.exchanges.contains(key)
    }

    /// Is this currency code recognized?
    pub fn has_currency(&self, code: &str) -> bool {
        self.currencies.contains(code)
    }

    /// Known zones, in key order
    pub fn zones(&self) -> impl Iterator<Item = &ZoneKey> {
        self.zones.iter()
    }

    /// Known exchanges, in key order
    pub fn exchanges(&self) -> impl Iterator<Item = &ExchangeKey> {
        self.exchanges.iter()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn catalog() -> ZoneCatalog {
        ZoneCatalog::new(
            ["AT".parse().unwrap(), "DE".parse().unwrap()],
            ["AT->DE".parse().unwrap()],
            ["EUR".to_string()],
        )
        .unwrap()
    }

    #[test]
    fn tcatalog_membership() {
        let catalog = catalog();
        assert!(catalog.has_zone(&"AT".parse().unwrap()));
        assert!(!catalog.has_zone(&"CH".parse().unwrap()));
        assert!(catalog.has_exchange(&"AT->DE".parse().unwrap()));
        assert!(catalog.has_currency("EUR"));
        assert!(!catalog.has_currency("USD"));
    }

    #[test]
    fn tcatalog_rejects_dangling_exchange() {
        let result = ZoneCatalog::new(
            ["AT".parse().unwrap()],
            ["AT->DE".parse().unwrap()],
            ["EUR".to_string()],
        );
        let err = result.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }

    #[test]
    fn tcatalog_from_json() {
        let data = r#"{
            "zones": ["AT", "CH", "DE"],
            "exchanges": ["AT->DE", "AT->CH"],
            "currencies": ["EUR", "CHF"]
        }"#;
        let catalog = ZoneCatalog::from_json(data).unwrap();
        assert!(catalog.has_exchange(&"AT->CH".parse().unwrap()));
        assert_eq!(catalog.zones().count(), 3);

        // lowercase zone keys are rejected at decode time
        assert!(ZoneCatalog::from_json(r#"{"zones": ["at"], "exchanges": [], "currencies": []}"#).is_err());
    }
}
