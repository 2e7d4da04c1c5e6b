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

use std::collections::{BTreeMap, BTreeSet};

use tracing::warn;

use crate::types::mode::{ProductionMode, StorageMode};

/// Per-mode generation values of a zone at one instant, in MW.
///
/// An absent mode means the source did not report it; a present value is
/// always finite and non-negative. Upstream sources frequently emit small
/// negative numbers (metering noise, plant self-consumption): those are
/// coerced to an absent value (or to zero, on request) and the mode is
/// recorded in the corrected set so the bookkeeping survives aggregation.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ProductionMix {
    values: BTreeMap<ProductionMode, f64>,
    corrected: BTreeSet<ProductionMode>,
}

impl ProductionMix {
    /// An empty mix, with every mode absent
    pub fn new() -> ProductionMix {
        ProductionMix::default()
    }

    /// Value reported for a mode, if any
    pub fn get(&self, mode: ProductionMode) -> Option<f64> {
        self.values.get(&mode).copied()
    }

    /// Overwrites the value of a mode.
    ///
    /// A negative value is replaced by an absent one and the mode is recorded
    /// as corrected. A non-finite value is discarded.
    pub fn set_value(&mut self, mode: ProductionMode, value: f64) {
        if !value.is_finite() {
            warn!(%mode, value, "discarding non-finite production value");
            return;
        }
        if value < 0.0 {
            self.values.remove(&mode);
            self.corrected.insert(mode);
        } else {
            self.values.insert(mode, value);
        }
    }

    /// Adds `value` to the current value of a mode, treating an absent value
    /// as 0 when there is something to add.
    ///
    /// A `None` value keeps the mode as it is: present values stay, an absent
    /// mode stays absent. If the result is negative it is corrected to absent,
    /// or to 0 when `correct_negative_with_zero` is set; either way the mode
    /// is recorded as corrected whenever a negative value went in.
    pub fn add_value(
        &mut self,
        mode: ProductionMode,
        value: Option<f64>,
        correct_negative_with_zero: bool,
    ) {
        let Some(value) = value else {
            return;
        };
        if !value.is_finite() {
            warn!(%mode, value, "discarding non-finite production value");
            return;
        }
        if value < 0.0 {
            self.corrected.insert(mode);
        }
        let total = self.values.get(&mode).copied().unwrap_or(0.0) + value;
        if total < 0.0 {
            if correct_negative_with_zero {
                self.values.insert(mode, 0.0);
            } else {
                self.values.remove(&mode);
            }
        } else {
            self.values.insert(mode, total);
        }
    }

    /// True iff every mode is absent.
    ///
    /// Corrected-to-absent modes do not count as reported, so a mix whose
    /// every input was negative is still empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Modes whose raw input was negative at some point
    pub fn corrected_modes(&self) -> &BTreeSet<ProductionMode> {
        &self.corrected
    }

    /// Present modes and their values, in mode order
    pub fn iter(&self) -> impl Iterator<Item = (ProductionMode, f64)> + '_ {
        self.values.iter().map(|(&mode, &value)| (mode, value))
    }

    /// Copies the present values into a plain map (the canonical dict form,
    /// with absent modes omitted)
    pub fn to_map(&self) -> BTreeMap<ProductionMode, f64> {
        self.values.clone()
    }

    pub(crate) fn extend_corrected(&mut self, modes: impl IntoIterator<Item = ProductionMode>) {
        self.corrected.extend(modes);
    }
}

impl FromIterator<(ProductionMode, f64)> for ProductionMix {
    fn from_iter<T: IntoIterator<Item = (ProductionMode, f64)>>(iter: T) -> ProductionMix {
        let mut mix = ProductionMix::new();
        for (mode, value) in iter {
            mix.set_value(mode, value);
        }
        mix
    }
}

impl FromIterator<(ProductionMode, Option<f64>)> for ProductionMix {
    fn from_iter<T: IntoIterator<Item = (ProductionMode, Option<f64>)>>(iter: T) -> ProductionMix {
        let mut mix = ProductionMix::new();
        for (mode, value) in iter {
            mix.add_value(mode, value, false);
        }
        mix
    }
}

/// Per-mode storage values of a zone at one instant, in MW.
///
/// Values are signed (positive = charging, negative = discharging) and no
/// correction is applied; non-finite inputs are discarded.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct StorageMix {
    values: BTreeMap<StorageMode, f64>,
}

impl StorageMix {
    /// An empty storage mix
    pub fn new() -> StorageMix {
        StorageMix::default()
    }

    /// Value reported for a mode, if any
    pub fn get(&self, mode: StorageMode) -> Option<f64> {
        self.values.get(&mode).copied()
    }

    /// Overwrites the value of a mode
    pub fn set_value(&mut self, mode: StorageMode, value: f64) {
        if !value.is_finite() {
            warn!(%mode, value, "discarding non-finite storage value");
            return;
        }
        self.values.insert(mode, value);
    }

    /// Adds `value` to the current value of a mode; `None` is a no-op
    pub fn add_value(&mut self, mode: StorageMode, value: Option<f64>) {
        let Some(value) = value else {
            return;
        };
        if !value.is_finite() {
            warn!(%mode, value, "discarding non-finite storage value");
            return;
        }
        let total = self.values.get(&mode).copied().unwrap_or(0.0) + value;
        self.values.insert(mode, total);
    }

    /// True iff every mode is absent
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Present modes and their values, in mode order
    pub fn iter(&self) -> impl Iterator<Item = (StorageMode, f64)> + '_ {
        self.values.iter().map(|(&mode, &value)| (mode, value))
    }

    /// Copies the present values into a plain map
    pub fn to_map(&self) -> BTreeMap<StorageMode, f64> {
        self.values.clone()
    }
}

impl FromIterator<(StorageMode, f64)> for StorageMix {
    fn from_iter<T: IntoIterator<Item = (StorageMode, f64)>>(iter: T) -> StorageMix {
        let mut mix = StorageMix::new();
        for (mode, value) in iter {
            mix.set_value(mode, value);
        }
        mix
    }
}
