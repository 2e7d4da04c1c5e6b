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
Aggregation reducers
====================

Many grids publish separate feeds for renewables, conventional generation,
storage or individual interconnectors. A parser builds one event list per
feed and hands them to these reducers, which merge them into one coherent
series: values are summed per timestamp with proper null propagation, so a
mode that no feed reported stays absent instead of turning into a spurious
zero, and the negative-value bookkeeping of the inputs survives the merge.

Inputs are taken by reference and never mutated; the output is a fresh list
of new events, in ascending timestamp order.
*/

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use itertools::Itertools;
use tracing::warn;

use crate::catalog::ZoneCatalog;
use crate::error::{ErrorKind, ParserError, Result};
use crate::types::{
    EventSourceType, Exchange, ExchangeKey, ExchangeList, ProductionBreakdown,
    ProductionBreakdownList, ProductionMix, StorageMix, PRODUCTION_MODES, STORAGE_MODES,
};

/// Merges several exchange lists into one.
///
/// Events are grouped per exchange key and timestamp and their net flows
/// summed; a non-finite net flow contributes nothing to the sum but does not
/// fail the merge. The merged source is the comma-joined, order-preserving,
/// de-duplicated union of the input sources. All inputs must share one
/// source type.
pub fn merge_exchanges<'a>(
    catalog: &'a ZoneCatalog,
    inputs: &[ExchangeList<'_>],
) -> Result<ExchangeList<'a>> {
    let mut merged = ExchangeList::new(catalog);
    if inputs.is_empty() {
        return Ok(merged);
    }
    let events: Vec<&Exchange> = inputs.iter().flat_map(ExchangeList::events).collect();
    if events.is_empty() {
        warn!("merging exchange lists with no events at all");
        return Ok(merged);
    }
    let source_type = common_source_type(
        "merge_exchanges",
        events.iter().map(|event| event.source_type()),
    )?;

    let mut groups: BTreeMap<ExchangeKey, BTreeMap<DateTime<Utc>, Vec<&Exchange>>> =
        BTreeMap::new();
    for &event in &events {
        groups
            .entry(event.key().clone())
            .or_default()
            .entry(event.datetime())
            .or_default()
            .push(event);
    }

    for (key, by_time) in groups {
        for (datetime, group) in by_time {
            let net_flow: f64 = group
                .iter()
                .map(|event| event.net_flow())
                .filter(|flow| flow.is_finite())
                .sum();
            let source = joined_sources(group.iter().map(|event| event.source()));
            merged.append(
                key.clone(),
                datetime.fixed_offset(),
                &source,
                net_flow,
                source_type,
            );
        }
    }
    Ok(merged)
}

/// Merges several production breakdown lists into one.
///
/// All events must refer to the same zone and share one source type. By
/// default the output covers the union of the input timestamps; with
/// `matching_timestamps_only` it is restricted to instants present in every
/// input list. Per timestamp and mode, present values are summed (absent
/// values count as 0 only when at least one value is present, so a mode
/// nobody reported stays absent), storage follows the same rule with its
/// sign preserved, and the corrected-mode sets of the contributing events
/// are unioned.
pub fn merge_production_breakdowns<'a>(
    catalog: &'a ZoneCatalog,
    inputs: &[ProductionBreakdownList<'_>],
    matching_timestamps_only: bool,
) -> Result<ProductionBreakdownList<'a>> {
    const REDUCER: &str = "merge_production_breakdowns";

    let mut merged = ProductionBreakdownList::new(catalog);
    if inputs.is_empty() {
        return Ok(merged);
    }
    let events: Vec<&ProductionBreakdown> = inputs
        .iter()
        .flat_map(ProductionBreakdownList::events)
        .collect();
    if events.is_empty() {
        warn!("merging production breakdown lists with no events at all");
        return Ok(merged);
    }

    let zones: Vec<_> = events
        .iter()
        .map(|event| event.zone_key())
        .unique()
        .collect();
    if zones.len() > 1 {
        return Err(ParserError::new(
            ErrorKind::Aggregation,
            REDUCER,
            format!(
                "cannot merge production breakdowns from different zones: {}",
                zones.iter().join(", ")
            ),
        ));
    }
    let zone_key = zones[0].clone();
    let source_type =
        common_source_type(REDUCER, events.iter().map(|event| event.source_type()))?;

    let timestamps: BTreeSet<DateTime<Utc>> = if matching_timestamps_only {
        inputs
            .iter()
            .map(|list| {
                list.events()
                    .iter()
                    .map(ProductionBreakdown::datetime)
                    .collect::<BTreeSet<_>>()
            })
            .reduce(|left, right| left.intersection(&right).copied().collect())
            .unwrap_or_default()
    } else {
        events.iter().map(|event| event.datetime()).collect()
    };

    for datetime in timestamps {
        let group: Vec<&ProductionBreakdown> = events
            .iter()
            .copied()
            .filter(|event| event.datetime() == datetime)
            .collect();

        let mut production = ProductionMix::new();
        for mode in PRODUCTION_MODES {
            for event in &group {
                production.add_value(mode, event.production().get(mode), false);
            }
        }
        production.extend_corrected(
            group
                .iter()
                .flat_map(|event| event.production().corrected_modes().iter().copied()),
        );

        let mut storage = StorageMix::new();
        for mode in STORAGE_MODES {
            for event in &group {
                if let Some(mix) = event.storage() {
                    storage.add_value(mode, mix.get(mode));
                }
            }
        }
        let storage = (!storage.is_empty()).then_some(storage);

        let source = joined_sources(group.iter().map(|event| event.source()));
        merged.append(
            zone_key.clone(),
            datetime.fixed_offset(),
            &source,
            production,
            storage,
            source_type,
        );
    }
    Ok(merged)
}

fn common_source_type(
    reducer: &str,
    source_types: impl Iterator<Item = EventSourceType>,
) -> Result<EventSourceType> {
    let found: Vec<EventSourceType> = source_types.unique().collect();
    if found.len() > 1 {
        return Err(ParserError::new(
            ErrorKind::HeterogeneousSourceType,
            reducer,
            format!(
                "cannot merge events with mixed source types: {}",
                found.iter().join(", ")
            ),
        ));
    }
    Ok(found[0])
}

/// Comma-joined, order-preserving, de-duplicated union of source strings.
/// Already-joined sources are split first so nested merges stay flat.
fn joined_sources<'s>(sources: impl Iterator<Item = &'s str>) -> String {
    sources.flat_map(|source| source.split(", ")).unique().join(", ")
}
