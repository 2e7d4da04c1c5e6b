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
Parser contract
===============

The boundary every per-region parser implements. A parser is a thin shim: it
pulls raw data from its upstream (transport and sessions are caller-owned and
out of scope here), fills the event lists of [`crate::types`] and returns
their canonical dict forms. Each entry point either returns rows or fails
with a [`ParserError`]; one bad record never aborts a call, but a failure at
the feed level (HTTP, schema, configuration) does.
*/

use chrono::{DateTime, Utc};

use crate::error::{ErrorKind, ParserError, Result};
use crate::types::{
    ExchangeRow, PriceRow, ProductionBreakdownRow, TotalConsumptionRow, ZoneKey,
};

/// Parameters common to all fetch entry points.
///
/// An absent `target_datetime` means "latest available". A present one that
/// lies outside the parser's supported window must fail with
/// [`past_dates_not_supported`], never silently return an empty list.
#[derive(Debug, Clone, Default)]
pub struct FetchRequest {
    /// Instant the caller wants data for, or `None` for the latest
    pub target_datetime: Option<DateTime<Utc>>,
}

impl FetchRequest {
    /// Request for the latest available data
    pub fn latest() -> FetchRequest {
        FetchRequest::default()
    }

    /// Request for data at a given instant
    pub fn at(target_datetime: DateTime<Utc>) -> FetchRequest {
        FetchRequest {
            target_datetime: Some(target_datetime),
        }
    }
}

/// The four entry points a per-region parser may expose.
///
/// Every method defaults to an `UnsupportedRequest` failure; an implementor
/// overrides the ones its upstream supports.
pub trait EventParser {
    /// Identifier of this parser (e.g. `"CAMMESA"`), used in error messages
    fn name(&self) -> &str;

    /// Per-mode generation for a zone
    fn fetch_production(
        &self,
        zone_key: &ZoneKey,
        request: &FetchRequest,
    ) -> Result<Vec<ProductionBreakdownRow>> {
        let _ = request;
        Err(ParserError::for_zone(
            ErrorKind::UnsupportedRequest,
            self.name(),
            zone_key.as_str(),
            "fetch_production is not implemented",
        ))
    }

    /// Aggregate consumption for a zone
    fn fetch_consumption(
        &self,
        zone_key: &ZoneKey,
        request: &FetchRequest,
    ) -> Result<Vec<TotalConsumptionRow>> {
        let _ = request;
        Err(ParserError::for_zone(
            ErrorKind::UnsupportedRequest,
            self.name(),
            zone_key.as_str(),
            "fetch_consumption is not implemented",
        ))
    }

    /// Net flow between two zones; implementors must emit rows keyed by the
    /// sorted pair regardless of the argument order
    fn fetch_exchange(
        &self,
        zone_key1: &ZoneKey,
        zone_key2: &ZoneKey,
        request: &FetchRequest,
    ) -> Result<Vec<ExchangeRow>> {
        let _ = request;
        Err(ParserError::new(
            ErrorKind::UnsupportedRequest,
            self.name(),
            format!(
                "the exchange pair {} and {} is not implemented",
                zone_key1, zone_key2
            ),
        ))
    }

    /// Wholesale price for a zone
    fn fetch_price(
        &self,
        zone_key: &ZoneKey,
        request: &FetchRequest,
    ) -> Result<Vec<PriceRow>> {
        let _ = request;
        Err(ParserError::for_zone(
            ErrorKind::UnsupportedRequest,
            self.name(),
            zone_key.as_str(),
            "fetch_price is not implemented",
        ))
    }
}

/// The refusal a parser returns when asked for a historical instant it
/// cannot serve
pub fn past_dates_not_supported(parser: &str, zone_key: &ZoneKey) -> ParserError {
    ParserError::for_zone(
        ErrorKind::UnsupportedRequest,
        parser,
        zone_key.as_str(),
        "this parser is not yet able to parse past dates",
    )
}

/// Reads an API token by symbolic name from the process environment.
///
/// An absent or empty token is a `MissingCredential` error naming the token,
/// so operators can tell which credential their deployment lacks.
pub fn token_from_env(parser: &str, token: &str) -> Result<String> {
    match std::env::var(token) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ParserError::new(
            ErrorKind::MissingCredential,
            parser,
            format!("token {} is not set in the environment", token),
        )),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    struct StubParser;

    impl EventParser for StubParser {
        fn name(&self) -> &str {
            "STUB"
        }
    }

    #[test]
    fn tdefault_entry_points_refuse() {
        let parser = StubParser;
        let zone: ZoneKey = "AT".parse().unwrap();
        let err = parser
            .fetch_production(&zone, &FetchRequest::latest())
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnsupportedRequest);
        assert_eq!(
            format!("{}", err),
            "STUB Parser (AT): fetch_production is not implemented"
        );
    }

    #[test]
    fn tpast_dates_message() {
        let zone: ZoneKey = "AR".parse().unwrap();
        let err = past_dates_not_supported("CAMMESA", &zone);
        assert_eq!(
            format!("{}", err),
            "CAMMESA Parser (AR): this parser is not yet able to parse past dates"
        );
    }

    #[test]
    fn ttoken_from_env() {
        std::env::set_var("GRIDEVENTS_TEST_TOKEN", "secret");
        assert_eq!(
            token_from_env("EIA", "GRIDEVENTS_TEST_TOKEN").unwrap(),
            "secret"
        );

        let err = token_from_env("EIA", "GRIDEVENTS_ABSENT_TOKEN").unwrap_err();
        assert_eq!(err.kind, ErrorKind::MissingCredential);
        assert!(format!("{}", err).contains("GRIDEVENTS_ABSENT_TOKEN"));
    }
}
