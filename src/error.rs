/*!
Error taxonomy
==============

One parser-scoped error type for everything that aborts a whole fetch call:
unsupported requests, upstream failures, configuration problems and merge
precondition violations. Malformed single events never reach this type;
they are logged and dropped where they occur.
*/

use std::fmt;

/// Alias for results carrying a [`ParserError`]
pub type Result<T> = std::result::Result<T, ParserError>;

/// Broad classification of a parser failure
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A zone or exchange key could not be parsed or is unknown to the catalog
    MalformedKey,
    /// The request asks for data the parser cannot provide (past dates, unimplemented pair)
    UnsupportedRequest,
    /// The upstream source failed or returned an unexpected shape
    UpstreamFailure,
    /// Catalog or process configuration is inconsistent
    Configuration,
    /// A merge precondition was violated
    Aggregation,
    /// Inputs to a merge carried different source types
    HeterogeneousSourceType,
    /// A required API token is absent from the process environment
    MissingCredential,
}

/// Error raised at the parser boundary.
///
/// Carries the identifier of the failing component (a parser name such as
/// `"CAMMESA"`, or the name of a reducer), the zone key when one is known,
/// and a human readable message. Validation failures of individual events do
/// not use this type: they are logged and the event is dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct ParserError {
    /// Identifier of the failing parser or reducer
    pub parser: String,
    /// Zone the failing call was about, when known
    pub zone_key: Option<String>,
    /// Failure classification
    pub kind: ErrorKind,
    /// Human readable description
    pub message: String,
}

impl ParserError {
    /// Builds an error with no associated zone
    pub fn new(kind: ErrorKind, parser: impl Into<String>, message: impl Into<String>) -> Self {
        ParserError {
            parser: parser.into(),
            zone_key: None,
            kind,
            message: message.into(),
        }
    }

    /// Builds an error scoped to a zone
    pub fn for_zone(
        kind: ErrorKind,
        parser: impl Into<String>,
        zone_key: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        ParserError {
            parser: parser.into(),
            zone_key: Some(zone_key.into()),
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.zone_key {
            Some(zone) => write!(f, "{} Parser ({}): {}", self.parser, zone, self.message),
            None => write!(f, "{} Parser: {}", self.parser, self.message),
        }
    }
}

impl std::error::Error for ParserError {}

impl From<serde_json::Error> for ParserError {
    fn from(err: serde_json::Error) -> Self {
        ParserError::new(
            ErrorKind::Configuration,
            "catalog",
            format!("could not decode catalog data ({})", err),
        )
    }
}
