// Integration tests for event validation and the canonical dict forms.

use chrono::{DateTime, FixedOffset, TimeDelta, TimeZone, Utc};
use pretty_assertions::assert_eq;

use gridevents::types::{
    EventSourceType, ExchangeList, GridAlertList, GridAlertType, PriceList,
    ProductionBreakdownList, ProductionMix, ProductionMode, StorageMix, StorageMode,
    TotalConsumptionList, TotalProductionList,
};
use gridevents::ZoneCatalog;

fn catalog() -> ZoneCatalog {
    ZoneCatalog::new(
        ["AT".parse().unwrap(), "DE".parse().unwrap()],
        ["AT->DE".parse().unwrap()],
        ["EUR".to_string()],
    )
    .unwrap()
}

fn noon() -> DateTime<FixedOffset> {
    Utc.with_ymd_and_hms(2023, 6, 1, 12, 0, 0).unwrap().fixed_offset()
}

#[test]
fn texchange_rejects_oversized_flow() {
    let catalog = catalog();
    let mut list = ExchangeList::new(&catalog);
    list.append(
        "AT->DE".parse().unwrap(),
        noon(),
        "source1",
        100_001.0,
        EventSourceType::Measured,
    );
    assert_eq!(list.len(), 0);

    list.append(
        "AT->DE".parse().unwrap(),
        noon(),
        "source1",
        -99_999.0,
        EventSourceType::Measured,
    );
    assert_eq!(list.len(), 1);
}

#[test]
fn texchange_rejects_unknown_pair() {
    let catalog = catalog();
    let mut list = ExchangeList::new(&catalog);
    // AT->CH parses fine but is not in the catalog
    list.append(
        "AT->CH".parse().unwrap(),
        noon(),
        "source1",
        10.0,
        EventSourceType::Measured,
    );
    assert_eq!(list.len(), 0);
}

#[test]
fn texchange_row_shape() {
    let catalog = catalog();
    let mut list = ExchangeList::new(&catalog);
    list.append(
        "AT->DE".parse().unwrap(),
        noon(),
        "source1",
        125.0,
        EventSourceType::Measured,
    );

    let value = serde_json::to_value(list.to_list()).unwrap();
    let row = &value[0];
    assert_eq!(row["sortedZoneKeys"], "AT->DE");
    assert_eq!(row["netFlow"], 125.0);
    assert_eq!(row["source"], "source1");
    // measured is the default and stays implicit
    assert!(row.get("sourceType").is_none());
}

#[test]
fn texchange_row_keeps_explicit_source_type() {
    let catalog = catalog();
    let mut list = ExchangeList::new(&catalog);
    list.append(
        "AT->DE".parse().unwrap(),
        noon(),
        "source1",
        125.0,
        EventSourceType::Estimated,
    );

    let value = serde_json::to_value(list.to_list()).unwrap();
    assert_eq!(value[0]["sourceType"], "estimated");
}

#[test]
fn tproduction_rejects_timestamps_outside_window() {
    let catalog = catalog();
    let mut list = ProductionBreakdownList::new(&catalog);

    let before_epoch = Utc
        .with_ymd_and_hms(1999, 12, 31, 23, 0, 0)
        .unwrap()
        .fixed_offset();
    list.append(
        "AT".parse().unwrap(),
        before_epoch,
        "source1",
        ProductionMix::from_iter([(ProductionMode::Wind, 10.0)]),
        None,
        EventSourceType::Measured,
    );
    assert_eq!(list.len(), 0);

    let far_future = (Utc::now() + TimeDelta::days(2)).fixed_offset();
    list.append(
        "AT".parse().unwrap(),
        far_future,
        "source1",
        ProductionMix::from_iter([(ProductionMode::Wind, 10.0)]),
        None,
        EventSourceType::Measured,
    );
    assert_eq!(list.len(), 0);

    // the same future instant is fine for a forecast
    list.append(
        "AT".parse().unwrap(),
        far_future,
        "source1",
        ProductionMix::from_iter([(ProductionMode::Wind, 10.0)]),
        None,
        EventSourceType::Forecasted,
    );
    assert_eq!(list.len(), 1);
}

#[test]
fn tproduction_rejects_empty_mix() {
    let catalog = catalog();
    let mut list = ProductionBreakdownList::new(&catalog);
    list.append(
        "AT".parse().unwrap(),
        noon(),
        "source1",
        ProductionMix::new(),
        None,
        EventSourceType::Measured,
    );
    assert_eq!(list.len(), 0);

    // a mix whose every input was negative is empty too
    list.append(
        "AT".parse().unwrap(),
        noon(),
        "source1",
        ProductionMix::from_iter([(ProductionMode::Wind, -10.0)]),
        None,
        EventSourceType::Measured,
    );
    assert_eq!(list.len(), 0);
}

#[test]
fn tproduction_normalizes_empty_storage() {
    let catalog = catalog();
    let mut list = ProductionBreakdownList::new(&catalog);
    list.append(
        "AT".parse().unwrap(),
        noon(),
        "source1",
        ProductionMix::from_iter([(ProductionMode::Wind, 10.0)]),
        Some(StorageMix::new()),
        EventSourceType::Measured,
    );
    assert_eq!(list.len(), 1);
    assert!(list.events()[0].storage().is_none());
}

#[test]
fn tproduction_row_shape() {
    let catalog = catalog();
    let mut list = ProductionBreakdownList::new(&catalog);
    let mut mix = ProductionMix::new();
    mix.set_value(ProductionMode::Wind, 10.0);
    mix.set_value(ProductionMode::Solar, -0.5);
    list.append(
        "AT".parse().unwrap(),
        noon(),
        "source1",
        mix,
        Some(StorageMix::from_iter([(StorageMode::Battery, -1.5)])),
        EventSourceType::Measured,
    );

    let value = serde_json::to_value(list.to_list()).unwrap();
    let row = &value[0];
    assert_eq!(row["zoneKey"], "AT");
    assert_eq!(row["production"]["wind"], 10.0);
    assert!(row["production"].get("solar").is_none());
    assert_eq!(row["storage"]["battery"], -1.5);
    assert_eq!(row["sourceType"], "measured");
    assert_eq!(row["correctedModes"][0], "solar");
}

#[test]
fn ttotals_reject_out_of_range_values() {
    let catalog = catalog();

    let mut production = TotalProductionList::new(&catalog);
    production.append(
        "AT".parse().unwrap(),
        noon(),
        "source1",
        500_001.0,
        EventSourceType::Measured,
    );
    production.append(
        "AT".parse().unwrap(),
        noon(),
        "source1",
        -1.0,
        EventSourceType::Measured,
    );
    assert_eq!(production.len(), 0);

    let mut consumption = TotalConsumptionList::new(&catalog);
    consumption.append(
        "AT".parse().unwrap(),
        noon(),
        "source1",
        f64::NAN,
        EventSourceType::Measured,
    );
    assert_eq!(consumption.len(), 0);

    consumption.append(
        "AT".parse().unwrap(),
        noon(),
        "source1",
        6_100.0,
        EventSourceType::Measured,
    );
    assert_eq!(consumption.len(), 1);
}

#[test]
fn ttotals_row_shape() {
    let catalog = catalog();

    let mut production = TotalProductionList::new(&catalog);
    production.append(
        "AT".parse().unwrap(),
        noon(),
        "source1",
        7_500.0,
        EventSourceType::Measured,
    );
    let value = serde_json::to_value(production.to_list()).unwrap();
    assert_eq!(value[0]["zoneKey"], "AT");
    assert_eq!(value[0]["generation"], 7_500.0);

    let mut consumption = TotalConsumptionList::new(&catalog);
    consumption.append(
        "AT".parse().unwrap(),
        noon(),
        "source1",
        6_100.0,
        EventSourceType::Measured,
    );
    let value = serde_json::to_value(consumption.to_list()).unwrap();
    assert_eq!(value[0]["consumption"], 6_100.0);
}

#[test]
fn tprice_requires_known_currency() {
    let catalog = catalog();
    let mut list = PriceList::new(&catalog);
    list.append(
        "AT".parse().unwrap(),
        noon(),
        "source1",
        82.5,
        "USD",
        EventSourceType::Measured,
    );
    assert_eq!(list.len(), 0);

    // negative prices are legal
    list.append(
        "AT".parse().unwrap(),
        noon(),
        "source1",
        -4.2,
        "EUR",
        EventSourceType::Measured,
    );
    assert_eq!(list.len(), 1);

    let value = serde_json::to_value(list.to_list()).unwrap();
    assert_eq!(value[0]["currency"], "EUR");
    assert_eq!(value[0]["price"], -4.2);
}

#[test]
fn tunknown_zone_is_rejected() {
    let catalog = catalog();
    let mut list = TotalProductionList::new(&catalog);
    list.append(
        "FR".parse().unwrap(),
        noon(),
        "source1",
        1_000.0,
        EventSourceType::Measured,
    );
    assert_eq!(list.len(), 0);
}

#[test]
fn talert_window_and_row_shape() {
    let catalog = catalog();
    let mut list = GridAlertList::new(&catalog);

    // end before start is rejected
    list.append(
        "AT".parse().unwrap(),
        "Tyrol",
        "source1",
        GridAlertType::Action,
        "reduce load",
        noon(),
        noon(),
        Some(noon() - TimeDelta::hours(1)),
        EventSourceType::Measured,
    );
    assert_eq!(list.len(), 0);

    list.append(
        "AT".parse().unwrap(),
        "Tyrol",
        "source1",
        GridAlertType::Action,
        "reduce load",
        noon(),
        noon() + TimeDelta::hours(6),
        None,
        EventSourceType::Measured,
    );
    assert_eq!(list.len(), 1);

    let value = serde_json::to_value(list.to_list()).unwrap();
    let row = &value[0];
    assert_eq!(row["zoneKey"], "AT");
    assert_eq!(row["locationRegion"], "Tyrol");
    assert_eq!(row["alertType"], "action");
    assert_eq!(row["message"], "reduce load");
    assert!(row["issuedTime"].is_string());
    assert!(row["startTime"].is_string());
    assert!(row["endTime"].is_null());
}
