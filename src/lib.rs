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
gridevents
==========

This crate is the shared core of a family of per-region electricity data
parsers: the typed event model, its validation and normalization rules, and
the reducers that merge several partial parser outputs (different upstream
feeds for the same zone) into one consistent series.

The parsers themselves are thin shims living elsewhere: they pull raw data
from TSO portals and APIs, call `append` on the event lists defined here and
return the canonical serialization. Everything a parser emits goes through
the same chain:

- values are validated per event kind (range and sign checks, catalog
  membership, timestamp rules), and a failing event is logged and dropped
  rather than aborting the run;
- negative production readings are coerced to absent (or zero, on request)
  with the affected mode recorded in the corrected set;
- multiple feeds for one zone are merged per timestamp with null
  propagation, so modes nobody reported stay absent.

# Example

```rust
use chrono::{TimeZone, Utc};
use gridevents::types::{EventSourceType, ProductionBreakdownList, ProductionMix, ProductionMode};
use gridevents::{merge_production_breakdowns, ZoneCatalog};

let catalog = ZoneCatalog::new(
    ["AT".parse().unwrap(), "DE".parse().unwrap()],
    ["AT->DE".parse().unwrap()],
    ["EUR".to_string()],
)
.unwrap();

// one feed reporting wind, with a small negative metering artifact on solar
let mut mix = ProductionMix::new();
mix.set_value(ProductionMode::Wind, 120.0);
mix.set_value(ProductionMode::Solar, -0.3);

let mut feed = ProductionBreakdownList::new(&catalog);
feed.append(
    "AT".parse().unwrap(),
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap().fixed_offset(),
    "tso.example.com",
    mix,
    None,
    EventSourceType::Measured,
);

let merged = merge_production_breakdowns(&catalog, &[feed], false).unwrap();
let rows = merged.to_list();
assert_eq!(rows.len(), 1);
assert_eq!(rows[0].production[&ProductionMode::Wind], 120.0);
// the corrected solar value stays absent but is reported as corrected
assert!(!rows[0].production.contains_key(&ProductionMode::Solar));
assert_eq!(rows[0].corrected_modes, vec![ProductionMode::Solar]);
```
*/

#![deny(missing_docs)]

mod merge;

pub mod catalog;
pub mod error;
pub mod parser;
pub mod types;

pub use catalog::ZoneCatalog;
pub use error::{ErrorKind, ParserError, Result};
pub use merge::*;

/// Version number of the library
pub static VERSION: &str = env!("CARGO_PKG_VERSION");
