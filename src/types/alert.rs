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
use crate::types::kind::{check_instant, EventSourceType, GridAlertType};

/// A validated grid operator notice for one zone.
///
/// The issue time is the instant the event is anchored to and follows the
/// common timestamp rules; the alert window itself (`start_time` to
/// `end_time`) may lie arbitrarily far ahead, `end_time` may be absent for
/// open-ended alerts.
#[derive(Debug, Clone, PartialEq)]
pub struct GridAlert {
    zone_key: ZoneKey,
    location_region: String,
    source: String,
    source_type: EventSourceType,
    alert_type: GridAlertType,
    message: String,
    issued_time: DateTime<Utc>,
    start_time: DateTime<Utc>,
    end_time: Option<DateTime<Utc>>,
}

impl GridAlert {
    /// Builds a validated grid alert event, or logs the validation failure
    /// and returns `None`
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        catalog: &ZoneCatalog,
        zone_key: ZoneKey,
        location_region: &str,
        source: &str,
        alert_type: GridAlertType,
        message: &str,
        issued_time: DateTime<FixedOffset>,
        start_time: DateTime<FixedOffset>,
        end_time: Option<DateTime<FixedOffset>>,
        source_type: EventSourceType,
    ) -> Option<GridAlert> {
        let checked = (|| -> Result<(), String> {
            if !catalog.has_zone(&zone_key) {
                return Err(format!("zone key {} is not in the catalog", zone_key));
            }
            check_instant(issued_time.with_timezone(&Utc), source_type)?;
            if message.trim().is_empty() {
                return Err(format!("alert for {} carries no message", zone_key));
            }
            if let Some(end) = end_time {
                if end < start_time {
                    return Err(format!(
                        "alert for {} ends at {} before it starts at {}",
                        zone_key, end, start_time
                    ));
                }
            }
            Ok(())
        })();
        match checked {
            Ok(()) => Some(GridAlert {
                zone_key,
                location_region: location_region.to_string(),
                source: source.to_string(),
                source_type,
                alert_type,
                message: message.to_string(),
                issued_time: issued_time.with_timezone(&Utc),
                start_time: start_time.with_timezone(&Utc),
                end_time: end_time.map(|dt| dt.with_timezone(&Utc)),
            }),
            Err(reason) => {
                warn!(%reason, "rejected grid alert event");
                None
            }
        }
    }

    /// Zone the alert refers to
    pub fn zone_key(&self) -> &ZoneKey {
        &self.zone_key
    }

    /// Free-form sub-region the operator named, if any
    pub fn location_region(&self) -> &str {
        &self.location_region
    }

    /// Source domain the alert came from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Provenance tag
    pub fn source_type(&self) -> EventSourceType {
        self.source_type
    }

    /// Severity class
    pub fn alert_type(&self) -> GridAlertType {
        self.alert_type
    }

    /// Operator message text
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Instant the operator issued the alert
    pub fn issued_time(&self) -> DateTime<Utc> {
        self.issued_time
    }

    /// Start of the alert window
    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// End of the alert window, absent for open-ended alerts
    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.end_time
    }

    /// Canonical dict form of this event
    pub fn to_row(&self) -> GridAlertRow {
        GridAlertRow {
            zone_key: self.zone_key.clone(),
            location_region: self.location_region.clone(),
            source: self.source.clone(),
            alert_type: self.alert_type,
            message: self.message.clone(),
            issued_time: self.issued_time,
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }
}

/// Canonical dict emitted for a grid alert event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridAlertRow {
    /// Zone key
    #[serde(rename = "zoneKey")]
    pub zone_key: ZoneKey,
    /// Free-form sub-region named by the operator
    #[serde(rename = "locationRegion")]
    pub location_region: String,
    /// Source domain
    pub source: String,
    /// Severity class
    #[serde(rename = "alertType")]
    pub alert_type: GridAlertType,
    /// Operator message text
    pub message: String,
    /// Instant the alert was issued
    #[serde(rename = "issuedTime")]
    pub issued_time: DateTime<Utc>,
    /// Start of the alert window
    #[serde(rename = "startTime")]
    pub start_time: DateTime<Utc>,
    /// End of the alert window, null when open-ended
    #[serde(rename = "endTime")]
    pub end_time: Option<DateTime<Utc>>,
}

/// Append-style builder for grid alert events
#[derive(Debug, Clone)]
pub struct GridAlertList<'a> {
    catalog: &'a ZoneCatalog,
    events: Vec<GridAlert>,
}

impl<'a> GridAlertList<'a> {
    /// An empty list validating against `catalog`
    pub fn new(catalog: &'a ZoneCatalog) -> GridAlertList<'a> {
        GridAlertList {
            catalog,
            events: Vec::new(),
        }
    }

    /// Validates and appends one event; on validation failure the list is
    /// left unchanged
    #[allow(clippy::too_many_arguments)]
    pub fn append(
        &mut self,
        zone_key: ZoneKey,
        location_region: &str,
        source: &str,
        alert_type: GridAlertType,
        message: &str,
        issued_time: DateTime<FixedOffset>,
        start_time: DateTime<FixedOffset>,
        end_time: Option<DateTime<FixedOffset>>,
        source_type: EventSourceType,
    ) {
        if let Some(event) = GridAlert::create(
            self.catalog,
            zone_key,
            location_region,
            source,
            alert_type,
            message,
            issued_time,
            start_time,
            end_time,
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
    pub fn events(&self) -> &[GridAlert] {
        &self.events
    }

    /// Iterates the validated events in append order
    pub fn iter(&self) -> std::slice::Iter<'_, GridAlert> {
        self.events.iter()
    }

    /// Canonical dict forms, in append order
    pub fn to_list(&self) -> Vec<GridAlertRow> {
        self.events.iter().map(GridAlert::to_row).collect()
    }
}
