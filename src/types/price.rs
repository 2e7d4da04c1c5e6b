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

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::ZoneCatalog;
use crate::types::key::ZoneKey;
use crate::types::kind::{check_instant, EventSourceType};

/// A validated wholesale price record for one zone at one instant.
///
/// Negative prices are legal (they do occur on day-ahead markets); the only
/// numeric requirement is that the price is finite.
#[derive(Debug, Clone, PartialEq)]
pub struct Price {
    zone_key: ZoneKey,
    datetime: DateTime<Utc>,
    source: String,
    source_type: EventSourceType,
    price: f64,
    currency: String,
}

impl Price {
    /// Builds a validated price event, or logs the validation failure and
    /// returns `None`
    pub fn create(
        catalog: &ZoneCatalog,
        zone_key: ZoneKey,
        datetime: DateTime<FixedOffset>,
        source: &str,
        price: f64,
        currency: &str,
        source_type: EventSourceType,
    ) -> Option<Price> {
        match Price::build(catalog, zone_key, datetime, source, price, currency, source_type) {
            Ok(event) => Some(event),
            Err(reason) => {
                warn!(%reason, "rejected price event");
                None
            }
        }
    }

    fn build(
        catalog: &ZoneCatalog,
        zone_key: ZoneKey,
        datetime: DateTime<FixedOffset>,
        source: &str,
        price: f64,
        currency: &str,
        source_type: EventSourceType,
    ) -> Result<Price, String> {
        if !catalog.has_zone(&zone_key) {
            return Err(format!("zone key {} is not in the catalog", zone_key));
        }
        check_instant(datetime.with_timezone(&Utc), source_type)?;
        if !catalog.has_currency(currency) {
            return Err(format!("currency \"{}\" is not recognized", currency));
        }
        if !price.is_finite() {
            return Err(format!("price {} for {} is not finite", price, zone_key));
        }
        Ok(Price {
            zone_key,
            datetime: datetime.with_timezone(&Utc),
            source: source.to_string(),
            source_type,
            price,
            currency: currency.to_string(),
        })
    }

    /// Zone the price refers to
    pub fn zone_key(&self) -> &ZoneKey {
        &self.zone_key
    }

    /// Instant the price refers to
    pub fn datetime(&self) -> DateTime<Utc> {
        self.datetime
    }

    /// Source domain the record came from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Provenance tag
    pub fn source_type(&self) -> EventSourceType {
        self.source_type
    }

    /// Price per MWh in the record currency
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Currency code of the price
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Canonical dict form of this event
    pub fn to_row(&self) -> PriceRow {
        PriceRow {
            datetime: self.datetime,
            zone_key: self.zone_key.clone(),
            currency: self.currency.clone(),
            price: self.price,
            source: self.source.clone(),
        }
    }
}

/// Canonical dict emitted for a price event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRow {
    /// Instant the price refers to
    pub datetime: DateTime<Utc>,
    /// Zone key
    #[serde(rename = "zoneKey")]
    pub zone_key: ZoneKey,
    /// Currency code
    pub currency: String,
    /// Price per MWh
    pub price: f64,
    /// Source domain
    pub source: String,
}

/// Append-style builder for price events
#[derive(Debug, Clone)]
pub struct PriceList<'a> {
    catalog: &'a ZoneCatalog,
    events: Vec<Price>,
}

impl<'a> PriceList<'a> {
    /// An empty list validating against `catalog`
    pub fn new(catalog: &'a ZoneCatalog) -> PriceList<'a> {
        PriceList {
            catalog,
            events: Vec::new(),
        }
    }

    /// Validates and appends one event; on validation failure the list is
    /// left unchanged
    pub fn append(
        &mut self,
        zone_key: ZoneKey,
        datetime: DateTime<FixedOffset>,
        source: &str,
        price: f64,
        currency: &str,
        source_type: EventSourceType,
    ) {
        if let Some(event) = Price::create(
            self.catalog,
            zone_key,
            datetime,
            source,
            price,
            currency,
            source_type,
        ) {
            self.events.push(event);
        }
    }

    /// Number of validated events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True if no event was accepted
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Validated events in append order
    pub fn events(&self) -> &[Price] {
        &self.events
    }

    /// Iterates the validated events in append order
    pub fn iter(&self) -> std::slice::Iter<'_, Price> {
        self.events.iter()
    }

    /// Canonical dict forms, in append order
    pub fn to_list(&self) -> Vec<PriceRow> {
        self.events.iter().map(Price::to_row).collect()
    }
}
