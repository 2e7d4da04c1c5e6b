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

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Generation fuel/source category.
///
/// The set is closed: upstream fuels that do not map onto one of these
/// categories are reported as `Unknown` by the parsers.
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProductionMode {
    /// Biomass and biogas fired generation
    Biomass,
    /// Coal fired generation
    Coal,
    /// Gas fired generation
    Gas,
    /// Geothermal generation
    Geothermal,
    /// Run-of-river and reservoir hydro
    Hydro,
    /// Nuclear generation
    Nuclear,
    /// Oil fired generation
    Oil,
    /// Photovoltaic and thermal solar
    Solar,
    /// Aggregated or unidentified sources
    Unknown,
    /// Onshore and offshore wind
    Wind,
}

/// All legal production modes
pub const PRODUCTION_MODES: [ProductionMode; 10] = [
    ProductionMode::Biomass,
    ProductionMode::Coal,
    ProductionMode::Gas,
    ProductionMode::Geothermal,
    ProductionMode::Hydro,
    ProductionMode::Nuclear,
    ProductionMode::Oil,
    ProductionMode::Solar,
    ProductionMode::Unknown,
    ProductionMode::Wind,
];

/// Storage technology category.
///
/// Storage values are signed: positive means charging (net sink), negative
/// means discharging (net source). Parsers whose upstream uses the opposite
/// convention negate at ingestion.
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
    /// Battery storage
    Battery,
    /// Pumped hydro storage
    Hydro,
}

/// All legal storage modes
pub const STORAGE_MODES: [StorageMode; 2] = [StorageMode::Battery, StorageMode::Hydro];
