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

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::ZoneCatalog;
use crate::types::key::ZoneKey;
use crate::types::kind::{check_instant, EventSourceType};
use crate::types::mix::{ProductionMix, StorageMix};
use crate::types::mode::{ProductionMode, StorageMode};

/// A validated per-mode generation record for one zone at one instant.
///
/// The production mix is never entirely empty; a storage mix whose every
/// field is absent is normalized to no storage at all.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductionBreakdown {
    zone_key: ZoneKey,
    datetime: DateTime<Utc>,
    source: String,
    source_type: EventSourceType,
    production: ProductionMix,
    storage: Option<StorageMix>,
}

impl ProductionBreakdown {
    /// Builds a validated breakdown event, or logs the validation failure and
    /// returns `None`
    pub fn create(
        catalog: &ZoneCatalog,
        zone_key: ZoneKey,
        datetime: DateTime<FixedOffset>,
        source: &str,
        production: ProductionMix,
        storage: Option<StorageMix>,
        source_type: EventSourceType,
    ) -> Option<ProductionBreakdown> {
        match ProductionBreakdown::build(
            catalog,
            zone_key,
            datetime,
            source,
            production,
            storage,
            source_type,
        ) {
            Ok(event) => Some(event),
            Err(reason) => {
                warn!(%reason, "rejected production breakdown event");
                None
            }
        }
    }

    fn build(
        catalog: &ZoneCatalog,
        zone_key: ZoneKey,
        datetime: DateTime<FixedOffset>,
        source: &str,
        production: ProductionMix,
        storage: Option<StorageMix>,
        source_type: EventSourceType,
    ) -> Result<ProductionBreakdown, String> {
        if !catalog.has_zone(&zone_key) {
            return Err(format!("zone key {} is not in the catalog", zone_key));
        }
        check_instant(datetime.with_timezone(&Utc), source_type)?;
        if production.is_empty() {
            return Err(format!(
                "production breakdown for {} reports no mode at all",
                zone_key
            ));
        }
        let storage = storage.filter(|mix| !mix.is_empty());
        Ok(ProductionBreakdown {
            zone_key,
            datetime: datetime.with_timezone(&Utc),
            source: source.to_string(),
            source_type,
            production,
            storage,
        })
    }

    /// Zone the breakdown refers to
    pub fn zone_key(&self) -> &ZoneKey {
        &self.zone_key
    }

    /// Instant the breakdown refers to
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

    /// Per-mode generation values
    pub fn production(&self) -> &ProductionMix {
        &self.production
    }

    /// Per-mode storage values, absent when the source reported none
    pub fn storage(&self) -> Option<&StorageMix> {
        self.storage.as_ref()
    }

    /// Canonical dict form of this event
    pub fn to_row(&self) -> ProductionBreakdownRow {
        ProductionBreakdownRow {
            datetime: self.datetime,
            zone_key: self.zone_key.clone(),
            production: self.production.to_map(),
            storage: self
                .storage
                .as_ref()
                .map(StorageMix::to_map)
                .unwrap_or_default(),
            source: self.source.clone(),
            source_type: self.source_type,
            corrected_modes: self.production.corrected_modes().iter().copied().collect(),
        }
    }
}

/// Canonical dict emitted for a production breakdown event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionBreakdownRow {
    /// Instant the breakdown refers to
    pub datetime: DateTime<Utc>,
    /// Zone key
    #[serde(rename = "zoneKey")]
    pub zone_key: ZoneKey,
    /// Present generation values by mode, in MW
    pub production: BTreeMap<ProductionMode, f64>,
    /// Present storage values by mode, in MW; empty when the source reported none
    pub storage: BTreeMap<StorageMode, f64>,
    /// Source domain
    pub source: String,
    /// Provenance tag
    #[serde(rename = "sourceType")]
    pub source_type: EventSourceType,
    /// Modes whose raw upstream value was negative and was coerced
    #[serde(rename = "correctedModes")]
    pub corrected_modes: Vec<ProductionMode>,
}

/// Append-style builder for production breakdown events
#[derive(Debug, Clone)]
pub struct ProductionBreakdownList<'a> {
    catalog: &'a ZoneCatalog,
    events: Vec<ProductionBreakdown>,
}

impl<'a> ProductionBreakdownList<'a> {
    /// An empty list validating against `catalog`
    pub fn new(catalog: &'a ZoneCatalog) -> ProductionBreakdownList<'a> {
        ProductionBreakdownList {
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
        production: ProductionMix,
        storage: Option<StorageMix>,
        source_type: EventSourceType,
    ) {
        if let Some(event) = ProductionBreakdown::create(
            self.catalog,
            zone_key,
            datetime,
            source,
            production,
            storage,
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
    pub fn events(&self) -> &[ProductionBreakdown] {
        &self.events
    }

    /// Iterates the validated events in append order
    pub fn iter(&self) -> std::slice::Iter<'_, ProductionBreakdown> {
        self.events.iter()
    }

    /// Canonical dict forms, in append order
    pub fn to_list(&self) -> Vec<ProductionBreakdownRow> {
        self.events.iter().map(ProductionBreakdown::to_row).collect()
    }
}

impl<'a> IntoIterator for &'a ProductionBreakdownList<'_> {
    type Item = &'a ProductionBreakdown;
    type IntoIter = std::slice::Iter<'a, ProductionBreakdown>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
