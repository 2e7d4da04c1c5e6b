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
use crate::types::key::ExchangeKey;
use crate::types::kind::{check_instant, EventSourceType};

/// Interconnectors never move more than this, in MW; larger readings are
/// upstream unit mistakes.
const MAX_EXCHANGE_FLOW: f64 = 100_000.0;

/// A validated cross-border flow record.
///
/// The net flow is positive when power moves from the left zone of the sorted
/// key to the right one. A NaN flow is accepted here and treated as a missing
/// contribution by [`merge_exchanges`][crate::merge_exchanges].
#[derive(Debug, Clone, PartialEq)]
pub struct Exchange {
    key: ExchangeKey,
    datetime: DateTime<Utc>,
    source: String,
    source_type: EventSourceType,
    net_flow: f64,
}

impl Exchange {
    /// Builds a validated exchange event, or logs the validation failure and
    /// returns `None`
    pub fn create(
        catalog: &ZoneCatalog,
        key: ExchangeKey,
        datetime: DateTime<FixedOffset>,
        source: &str,
        net_flow: f64,
        source_type: EventSourceType,
    ) -> Option<Exchange> {
        match Exchange::build(catalog, key, datetime, source, net_flow, source_type) {
            Ok(event) => Some(event),
            Err(reason) => {
                warn!(%reason, "rejected exchange event");
                None
            }
        }
    }

    fn build(
        catalog: &ZoneCatalog,
        key: ExchangeKey,
        datetime: DateTime<FixedOffset>,
        source: &str,
        net_flow: f64,
        source_type: EventSourceType,
    ) -> Result<Exchange, String> {
        if !catalog.has_exchange(&key) {
            return Err(format!("exchange key {} is not in the catalog", key));
        }
        check_instant(datetime.with_timezone(&Utc), source_type)?;
        // NaN passes: the comparison is false and the merge step handles it
        if net_flow.abs() > MAX_EXCHANGE_FLOW {
            return Err(format!(
                "net flow {} MW on {} exceeds {} MW",
                net_flow, key, MAX_EXCHANGE_FLOW
            ));
        }
        Ok(Exchange {
            key,
            datetime: datetime.with_timezone(&Utc),
            source: source.to_string(),
            source_type,
            net_flow,
        })
    }

    /// Sorted exchange key
    pub fn key(&self) -> &ExchangeKey {
        &self.key
    }

    /// Instant the flow refers to
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

    /// Net flow in MW, positive from left to right zone
    pub fn net_flow(&self) -> f64 {
        self.net_flow
    }

    /// Canonical dict form of this event
    pub fn to_row(&self) -> ExchangeRow {
        ExchangeRow {
            datetime: self.datetime,
            sorted_zone_keys: self.key.clone(),
            net_flow: self.net_flow,
            source: self.source.clone(),
            source_type: (self.source_type != EventSourceType::Measured)
                .then_some(self.source_type),
        }
    }
}

/// Canonical dict emitted for an exchange event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRow {
    /// Instant the flow refers to
    pub datetime: DateTime<Utc>,
    /// Sorted exchange key, `"A->B"` with `A < B`
    #[serde(rename = "sortedZoneKeys")]
    pub sorted_zone_keys: ExchangeKey,
    /// Net flow in MW, positive from `A` to `B`
    #[serde(rename = "netFlow")]
    pub net_flow: f64,
    /// Source domain
    pub source: String,
    /// Provenance tag, present when not measured
    #[serde(rename = "sourceType", skip_serializing_if = "Option::is_none", default)]
    pub source_type: Option<EventSourceType>,
}

/// Append-style builder for exchange events.
///
/// Rejected events are logged and skipped; insertion order is stable and no
/// de-duplication happens here.
#[derive(Debug, Clone)]
pub struct ExchangeList<'a> {
    catalog: &'a ZoneCatalog,
    events: Vec<Exchange>,
}

impl<'a> ExchangeList<'a> {
    /// An empty list validating against `catalog`
    pub fn new(catalog: &'a ZoneCatalog) -> ExchangeList<'a> {
        ExchangeList {
            catalog,
            events: Vec::new(),
        }
    }

    /// Validates and appends one event; on validation failure the list is
    /// left unchanged
    pub fn append(
        &mut self,
        key: ExchangeKey,
        datetime: DateTime<FixedOffset>,
        source: &str,
        net_flow: f64,
        source_type: EventSourceType,
    ) {
        if let Some(event) =
            Exchange::create(self.catalog, key, datetime, source, net_flow, source_type)
        {
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
    pub fn events(&self) -> &[Exchange] {
        &self.events
    }

    /// Iterates the validated events in append order
    pub fn iter(&self) -> std::slice::Iter<'_, Exchange> {
        self.events.iter()
    }

    /// Canonical dict forms, in append order
    pub fn to_list(&self) -> Vec<ExchangeRow> {
        self.events.iter().map(Exchange::to_row).collect()
    }
}

impl<'a> IntoIterator for &'a ExchangeList<'_> {
    type Item = &'a Exchange;
    type IntoIter = std::slice::Iter<'a, Exchange>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
