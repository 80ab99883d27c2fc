/// Utility helpers shared across the collector.
///
/// This module contains:
/// - Symbol normalization
/// - The RFC2396 character check used by the optional source filter
///
/// IMPORTANT:
/// - No exchange-specific business logic should live here.
/// - This module must remain lightweight and deterministic.
///
/// Exchange-specific behavior belongs in:
/// - the source catalog
/// - the column transform configuration

/// Normalize a raw candidate into the internal symbol format.
///
/// Target format:
///     uppercase, no surrounding or internal whitespace
///
/// Examples:
/// - " brk.b " -> "BRK.B"
/// - "intc"    -> "INTC"
/// - "B AC"    -> "BAC"
///
/// Returns `None` when nothing survives normalization; empty or
/// whitespace-only candidates are dropped silently, never reported.
pub fn normalize_symbol(raw: &str) -> Option<String> {
    let symbol: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect();

    if symbol.is_empty() { None } else { Some(symbol) }
}

/// Character subset accepted by the RFC2396 compliance filter.
///
/// A symbol passing this check can be embedded into a URL path or
/// query without escaping. Applied only when a source opts in via
/// `rfc2396_only`; the check runs on already-normalized symbols, so
/// lowercase never reaches it.
pub fn is_rfc2396_clean(symbol: &str) -> bool {
    symbol
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || matches!(c, '.' | '-' | '_'))
}
