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

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Provenance tag of an event
#[derive(
    Debug,
    Copy,
    Clone,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EventSourceType {
    /// Observed by the source (the default)
    #[default]
    Measured,
    /// Published ahead of time by the source
    Forecasted,
    /// Estimated by the source
    Estimated,
    /// Provenance not stated by the source
    Undefined,
}

/// Severity class of a grid alert
#[derive(
    Debug,
    Copy,
    Clone,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum GridAlertType {
    /// The operator asks consumers or producers to act
    Action,
    /// Informational notice, no action requested
    Informational,
    /// Severity not stated by the source
    #[default]
    Undefined,
}

// 2000-01-01T00:00:00Z. Anything older is an upstream clock glitch.
const MIN_EVENT_TIMESTAMP: i64 = 946_684_800;

/// Checks the instant of an event against the common timestamp rules:
/// not before 2000-01-01 UTC, and not more than 24h in the future unless
/// the event is a forecast.
pub(crate) fn check_instant(
    datetime: DateTime<Utc>,
    source_type: EventSourceType,
) -> Result<(), String> {
    if datetime.timestamp() < MIN_EVENT_TIMESTAMP {
        return Err(format!("timestamp {} is before 2000-01-01", datetime));
    }
    if source_type != EventSourceType::Forecasted && datetime > Utc::now() + TimeDelta::hours(24) {
        return Err(format!(
            "timestamp {} is more than 24h in the future for non-forecast data",
            datetime
        ));
    }
    Ok(())
}
