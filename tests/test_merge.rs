// Integration tests for the aggregation reducers.

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use pretty_assertions::assert_eq;

use gridevents::types::{
    EventSourceType, ExchangeList, ProductionBreakdownList, ProductionMix, ProductionMode,
    StorageMix, StorageMode,
};
use gridevents::{merge_exchanges, merge_production_breakdowns, ErrorKind, ZoneCatalog};

fn catalog() -> ZoneCatalog {
    ZoneCatalog::new(
        ["AT".parse().unwrap(), "CH".parse().unwrap(), "DE".parse().unwrap()],
        ["AT->DE".parse().unwrap(), "AT->CH".parse().unwrap()],
        ["EUR".to_string()],
    )
    .unwrap()
}

fn hour(h: u32) -> DateTime<FixedOffset> {
    Utc.with_ymd_and_hms(2023, 1, 1, h, 0, 0).unwrap().fixed_offset()
}

#[test]
fn texchange_merge_ignores_nan() {
    let catalog = catalog();
    let mut list1 = ExchangeList::new(&catalog);
    list1.append(
        "AT->DE".parse().unwrap(),
        hour(0),
        "source1",
        1.0,
        EventSourceType::Measured,
    );
    let mut list2 = ExchangeList::new(&catalog);
    list2.append(
        "AT->DE".parse().unwrap(),
        hour(0),
        "source1",
        f64::NAN,
        EventSourceType::Measured,
    );

    let merged = merge_exchanges(&catalog, &[list1, list2]).unwrap();
    assert_eq!(merged.len(), 1);
    let rows = merged.to_list();
    assert_eq!(rows[0].net_flow, 1.0);
    assert_eq!(rows[0].source, "source1");
}

#[test]
fn texchange_merge_sums_negative_flows() {
    let catalog = catalog();
    let mut list1 = ExchangeList::new(&catalog);
    list1.append(
        "AT->DE".parse().unwrap(),
        hour(0),
        "source1",
        1.0,
        EventSourceType::Measured,
    );
    let mut list2 = ExchangeList::new(&catalog);
    list2.append(
        "AT->DE".parse().unwrap(),
        hour(0),
        "source2",
        -11.0,
        EventSourceType::Measured,
    );

    let merged = merge_exchanges(&catalog, &[list1, list2]).unwrap();
    let rows = merged.to_list();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].net_flow, -10.0);
    assert_eq!(rows[0].source, "source1, source2");
}

#[test]
fn texchange_merge_rejects_mixed_source_types() {
    let catalog = catalog();
    let mut list1 = ExchangeList::new(&catalog);
    list1.append(
        "AT->DE".parse().unwrap(),
        hour(0),
        "source1",
        1.0,
        EventSourceType::Measured,
    );
    let mut list2 = ExchangeList::new(&catalog);
    list2.append(
        "AT->DE".parse().unwrap(),
        hour(0),
        "source2",
        2.0,
        EventSourceType::Forecasted,
    );

    let err = merge_exchanges(&catalog, &[list1, list2]).unwrap_err();
    assert_eq!(err.kind, ErrorKind::HeterogeneousSourceType);
}

#[test]
fn texchange_merge_empty_inputs() {
    let catalog = catalog();
    assert_eq!(merge_exchanges(&catalog, &[]).unwrap().len(), 0);

    let empty1 = ExchangeList::new(&catalog);
    let empty2 = ExchangeList::new(&catalog);
    assert_eq!(merge_exchanges(&catalog, &[empty1, empty2]).unwrap().len(), 0);
}

#[test]
fn texchange_merge_orders_timestamps() {
    let catalog = catalog();
    let mut list = ExchangeList::new(&catalog);
    list.append(
        "AT->DE".parse().unwrap(),
        hour(2),
        "source1",
        3.0,
        EventSourceType::Measured,
    );
    list.append(
        "AT->DE".parse().unwrap(),
        hour(1),
        "source1",
        2.0,
        EventSourceType::Measured,
    );

    let merged = merge_exchanges(&catalog, &[list]).unwrap();
    let rows = merged.to_list();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].datetime < rows[1].datetime);
    assert_eq!(rows[0].net_flow, 2.0);
}

#[test]
fn tproduction_merge_unions_modes() {
    let catalog = catalog();
    let mut list1 = ProductionBreakdownList::new(&catalog);
    list1.append(
        "AT".parse().unwrap(),
        hour(0),
        "source1",
        ProductionMix::from_iter([(ProductionMode::Wind, 10.0)]),
        None,
        EventSourceType::Measured,
    );
    let mut list2 = ProductionBreakdownList::new(&catalog);
    list2.append(
        "AT".parse().unwrap(),
        hour(0),
        "source2",
        ProductionMix::from_iter([
            (ProductionMode::Wind, Some(20.0)),
            (ProductionMode::Hydro, None),
        ]),
        None,
        EventSourceType::Measured,
    );

    let merged = merge_production_breakdowns(&catalog, &[list1, list2], false).unwrap();
    let rows = merged.to_list();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].production[&ProductionMode::Wind], 30.0);
    // hydro was null everywhere and must not become a spurious zero
    assert!(!rows[0].production.contains_key(&ProductionMode::Hydro));
    assert!(rows[0].storage.is_empty());
    assert_eq!(rows[0].source, "source1, source2");
}

#[test]
fn tproduction_merge_retains_corrections() {
    let catalog = catalog();
    let mut list1 = ProductionBreakdownList::new(&catalog);
    list1.append(
        "AT".parse().unwrap(),
        hour(0),
        "source1",
        ProductionMix::from_iter([
            (ProductionMode::Wind, -10.0),
            (ProductionMode::Coal, 10.0),
        ]),
        None,
        EventSourceType::Measured,
    );
    let mut list2 = ProductionBreakdownList::new(&catalog);
    list2.append(
        "AT".parse().unwrap(),
        hour(0),
        "source2",
        ProductionMix::from_iter([
            (ProductionMode::Hydro, 20.0),
            (ProductionMode::Coal, 20.0),
        ]),
        None,
        EventSourceType::Measured,
    );

    let merged = merge_production_breakdowns(&catalog, &[list1, list2], false).unwrap();
    let rows = merged.to_list();
    assert_eq!(rows.len(), 1);
    assert!(!rows[0].production.contains_key(&ProductionMode::Wind));
    assert_eq!(rows[0].production[&ProductionMode::Coal], 30.0);
    assert_eq!(rows[0].production[&ProductionMode::Hydro], 20.0);
    assert_eq!(rows[0].corrected_modes, vec![ProductionMode::Wind]);
}

#[test]
fn tproduction_merge_rejects_multiple_zones() {
    let catalog = catalog();
    let mut list1 = ProductionBreakdownList::new(&catalog);
    list1.append(
        "AT".parse().unwrap(),
        hour(0),
        "source1",
        ProductionMix::from_iter([(ProductionMode::Wind, 10.0)]),
        None,
        EventSourceType::Measured,
    );
    let mut list2 = ProductionBreakdownList::new(&catalog);
    list2.append(
        "DE".parse().unwrap(),
        hour(0),
        "source2",
        ProductionMix::from_iter([(ProductionMode::Wind, 20.0)]),
        None,
        EventSourceType::Measured,
    );

    let err = merge_production_breakdowns(&catalog, &[list1, list2], false).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Aggregation);
    assert!(err.message.contains("AT"));
    assert!(err.message.contains("DE"));
}

#[test]
fn tproduction_merge_single_input_is_identity() {
    let catalog = catalog();
    let mut list = ProductionBreakdownList::new(&catalog);
    list.append(
        "AT".parse().unwrap(),
        hour(0),
        "source1",
        ProductionMix::from_iter([(ProductionMode::Wind, 10.0), (ProductionMode::Gas, 5.0)]),
        Some(StorageMix::from_iter([(StorageMode::Hydro, -2.0)])),
        EventSourceType::Measured,
    );
    list.append(
        "AT".parse().unwrap(),
        hour(1),
        "source1",
        ProductionMix::from_iter([(ProductionMode::Wind, 12.0)]),
        None,
        EventSourceType::Measured,
    );

    let merged = merge_production_breakdowns(&catalog, &[list.clone()], false).unwrap();
    assert_eq!(merged.to_list(), list.to_list());
}

#[test]
fn tproduction_merge_is_input_order_insensitive() {
    let catalog = catalog();
    let mut list1 = ProductionBreakdownList::new(&catalog);
    list1.append(
        "AT".parse().unwrap(),
        hour(0),
        "source1",
        ProductionMix::from_iter([(ProductionMode::Wind, 10.0)]),
        None,
        EventSourceType::Measured,
    );
    let mut list2 = ProductionBreakdownList::new(&catalog);
    list2.append(
        "AT".parse().unwrap(),
        hour(0),
        "source2",
        ProductionMix::from_iter([(ProductionMode::Solar, 7.0)]),
        None,
        EventSourceType::Measured,
    );

    let forward =
        merge_production_breakdowns(&catalog, &[list1.clone(), list2.clone()], false).unwrap();
    let backward = merge_production_breakdowns(&catalog, &[list2, list1], false).unwrap();

    let forward_rows = forward.to_list();
    let backward_rows = backward.to_list();
    assert_eq!(forward_rows[0].production, backward_rows[0].production);
    assert_eq!(forward_rows[0].datetime, backward_rows[0].datetime);
    // only the source string order differs
    assert_eq!(forward_rows[0].source, "source1, source2");
    assert_eq!(backward_rows[0].source, "source2, source1");
}

#[test]
fn tproduction_merge_matching_timestamps_only() {
    let catalog = catalog();
    let mut list1 = ProductionBreakdownList::new(&catalog);
    for h in [0, 1] {
        list1.append(
            "AT".parse().unwrap(),
            hour(h),
            "source1",
            ProductionMix::from_iter([(ProductionMode::Wind, 10.0)]),
            None,
            EventSourceType::Measured,
        );
    }
    let mut list2 = ProductionBreakdownList::new(&catalog);
    list2.append(
        "AT".parse().unwrap(),
        hour(1),
        "source2",
        ProductionMix::from_iter([(ProductionMode::Gas, 4.0)]),
        None,
        EventSourceType::Measured,
    );

    let union =
        merge_production_breakdowns(&catalog, &[list1.clone(), list2.clone()], false).unwrap();
    assert_eq!(union.len(), 2);

    let intersection = merge_production_breakdowns(&catalog, &[list1, list2], true).unwrap();
    assert_eq!(intersection.len(), 1);
    let rows = intersection.to_list();
    assert_eq!(rows[0].datetime, hour(1).with_timezone(&Utc));
    assert_eq!(rows[0].production[&ProductionMode::Wind], 10.0);
    assert_eq!(rows[0].production[&ProductionMode::Gas], 4.0);
}

#[test]
fn tproduction_merge_sums_storage_preserving_sign() {
    let catalog = catalog();
    let mut list1 = ProductionBreakdownList::new(&catalog);
    list1.append(
        "AT".parse().unwrap(),
        hour(0),
        "source1",
        ProductionMix::from_iter([(ProductionMode::Wind, 10.0)]),
        Some(StorageMix::from_iter([(StorageMode::Hydro, 1.0)])),
        EventSourceType::Measured,
    );
    let mut list2 = ProductionBreakdownList::new(&catalog);
    list2.append(
        "AT".parse().unwrap(),
        hour(0),
        "source2",
        ProductionMix::from_iter([(ProductionMode::Wind, 5.0)]),
        Some(StorageMix::from_iter([
            (StorageMode::Hydro, -4.0),
            (StorageMode::Battery, 2.5),
        ])),
        EventSourceType::Measured,
    );

    let merged = merge_production_breakdowns(&catalog, &[list1, list2], false).unwrap();
    let rows = merged.to_list();
    assert_eq!(rows[0].storage[&StorageMode::Hydro], -3.0);
    assert_eq!(rows[0].storage[&StorageMode::Battery], 2.5);
}

#[test]
fn tproduction_merge_empty_inputs() {
    let catalog = catalog();
    assert!(merge_production_breakdowns(&catalog, &[], false)
        .unwrap()
        .is_empty());

    let empty1 = ProductionBreakdownList::new(&catalog);
    let empty2 = ProductionBreakdownList::new(&catalog);
    assert!(merge_production_breakdowns(&catalog, &[empty1, empty2], false)
        .unwrap()
        .is_empty());
}
