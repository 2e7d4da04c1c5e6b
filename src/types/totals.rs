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

/// No single zone produces or consumes more than this, in MW
const MAX_ZONE_POWER: f64 = 500_000.0;

/// A validated aggregate generation figure for one zone at one instant
#[derive(Debug, Clone, PartialEq)]
pub struct TotalProduction {
    zone_key: ZoneKey,
    datetime: DateTime<Utc>,
    source: String,
    source_type: EventSourceType,
    value: f64,
}

impl TotalProduction {
    /// Builds a validated total production event, or logs the validation
    /// failure and returns `None`
    pub fn create(
        catalog: &ZoneCatalog,
        zone_key: ZoneKey,
        datetime: DateTime<FixedOffset>,
        source: &str,
        value: f64,
        source_type: EventSourceType,
    ) -> Option<TotalProduction> {
        match check_common(catalog, &zone_key, datetime, source_type)
            .and_then(|_| check_power("total production", value))
        {
            Ok(()) => Some(TotalProduction {
                zone_key,
                datetime: datetime.with_timezone(&Utc),
                source: source.to_string(),
                source_type,
                value,
            }),
            Err(reason) => {
                warn!(%reason, "rejected total production event");
                None
            }
        }
    }

    /// Zone the figure refers to
    pub fn zone_key(&self) -> &ZoneKey {
        &self.zone_key
    }

    /// Instant the figure refers to
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

    /// Aggregate generation in MW
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Canonical dict form of this event
    pub fn to_row(&self) -> TotalProductionRow {
        TotalProductionRow {
            datetime: self.datetime,
            zone_key: self.zone_key.clone(),
            generation: self.value,
            source: self.source.clone(),
        }
    }
}

/// Canonical dict emitted for a total production event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalProductionRow {
    /// Instant the figure refers to
    pub datetime: DateTime<Utc>,
    /// Zone key
    #[serde(rename = "zoneKey")]
    pub zone_key: ZoneKey,
    /// Aggregate generation in MW
    pub generation: f64,
    /// Source domain
    pub source: String,
}

/// A validated aggregate consumption figure for one zone at one instant
#[derive(Debug, Clone, PartialEq)]
pub struct TotalConsumption {
    zone_key: ZoneKey,
    datetime: DateTime<Utc>,
    source: String,
    source_type: EventSourceType,
    consumption: f64,
}

impl TotalConsumption {
    /// Builds a validated total consumption event, or logs the validation
    /// failure and returns `None`
    pub fn create(
        catalog: &ZoneCatalog,
        zone_key: ZoneKey,
        datetime: DateTime<FixedOffset>,
        source: &str,
        consumption: f64,
        source_type: EventSourceType,
    ) -> Option<TotalConsumption> {
        match check_common(catalog, &zone_key, datetime, source_type)
            .and_then(|_| check_power("consumption", consumption))
        {
            Ok(()) => Some(TotalConsumption {
                zone_key,
                datetime: datetime.with_timezone(&Utc),
                source: source.to_string(),
                source_type,
                consumption,
            }),
            Err(reason) => {
                warn!(%reason, "rejected total consumption event");
                None
            }
        }
    }

    /// Zone the figure refers to
    pub fn zone_key(&self) -> &ZoneKey {
        &self.zone_key
    }

    /// Instant the figure refers to
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

    /// Aggregate consumption in MW
    pub fn consumption(&self) -> f64 {
        self.consumption
    }

    /// Canonical dict form of this event
    pub fn to_row(&self) -> TotalConsumptionRow {
        TotalConsumptionRow {
            datetime: self.datetime,
            zone_key: self.zone_key.clone(),
            consumption: self.consumption,
            source: self.source.clone(),
        }
    }
}

/// Canonical dict emitted for a total consumption event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalConsumptionRow {
    /// Instant the figure refers to
    pub datetime: DateTime<Utc>,
    /// Zone key
    #[serde(rename = "zoneKey")]
    pub zone_key: ZoneKey,
    /// Aggregate consumption in MW
    pub consumption: f64,
    /// Source domain
    pub source: String,
}

fn check_common(
    catalog: &ZoneCatalog,
    zone_key: &ZoneKey,
    datetime: DateTime<FixedOffset>,
    source_type: EventSourceType,
) -> Result<(), String> {
    if !catalog.has_zone(zone_key) {
        return Err(format!("zone key {} is not in the catalog", zone_key));
    }
    check_instant(datetime.with_timezone(&Utc), source_type)
}

fn check_power(what: &str, value: f64) -> Result<(), String> {
    // NaN fails the containment check as well
    if (0.0..=MAX_ZONE_POWER).contains(&value) {
        Ok(())
    } else {
        Err(format!(
            "{} of {} MW is outside [0, {}]",
            what, value, MAX_ZONE_POWER
        ))
    }
}

/// Append-style builder for total production events
#[derive(Debug, Clone)]
pub struct TotalProductionList<'a> {
    catalog: &'a ZoneCatalog,
    events: Vec<TotalProduction>,
}

impl<'a> TotalProductionList<'a> {
    /// An empty list validating against `catalog`
    pub fn new(catalog: &'a ZoneCatalog) -> TotalProductionList<'a> {
        TotalProductionList {
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
        value: f64,
        source_type: EventSourceType,
    ) {
        if let Some(event) =
            TotalProduction::create(self.catalog, zone_key, datetime, source, value, source_type)
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
    pub fn events(&self) -> &[TotalProduction] {
        &self.events
    }

    /// Iterates the validated events in append order
    pub fn iter(&self) -> std::slice::Iter<'_, TotalProduction> {
        self.events.iter()
    }

    /// Canonical dict forms, in append order
    pub fn to_list(&self) -> Vec<TotalProductionRow> {
        self.events.iter().map(TotalProduction::to_row).collect()
    }
}

/// Append-style builder for total consumption events
#[derive(Debug, Clone)]
pub struct TotalConsumptionList<'a> {
    catalog: &'a ZoneCatalog,
    events: Vec<TotalConsumption>,
}

impl<'a> TotalConsumptionList<'a> {
    /// An empty list validating against `catalog`
    pub fn new(catalog: &'a ZoneCatalog) -> TotalConsumptionList<'a> {
        TotalConsumptionList {
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
        consumption: f64,
        source_type: EventSourceType,
    ) {
        if let Some(event) = TotalConsumption::create(
            self.catalog,
            zone_key,
            datetime,
            source,
            consumption,
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
    pub fn events(&self) -> &[TotalConsumption] {
        &self.events
    }

    /// Iterates the validated events in append order
    pub fn iter(&self) -> std::slice::Iter<'_, TotalConsumption> {
        self.events.iter()
    }

    /// Canonical dict forms, in append order
    pub fn to_list(&self) -> Vec<TotalConsumptionRow> {
        self.events.iter().map(TotalConsumption::to_row).collect()
    }
}
