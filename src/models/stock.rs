use serde::Serialize;
use serde_json::Value;

/// Combined market snapshot for one symbol: the raw quote and company
/// profile payloads from the upstream provider, passed through unmodified.
///
/// Both fields stay untyped (`Value`) on purpose. The provider owns their
/// schema; this service only aggregates, so re-modelling the fields here
/// would silently drop anything the provider adds later.
#[derive(Debug, Clone, Serialize)]
pub struct StockSnapshot {
    pub quote: Value,
    pub profile: Value,
}
