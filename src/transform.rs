use crate::catalog::Source;
use crate::error::{CollectorError, Result};
use crate::util;

/// Line-to-symbols extraction rule for one source.
///
/// A listing response is a stream of delimited rows. Column 0 is the
/// vendor row label; candidate symbols live from `column_index`
/// onward. Each candidate is normalized (trimmed, upper-cased,
/// internal whitespace removed) and optionally pushed through the
/// RFC2396 filter before it may reach aggregation.
///
/// CONTRACT:
/// - `column_index >= 1`; 0 or negative is a configuration error at
///   construction, before any line is processed.
/// - `transform` never fails: malformed or short lines simply yield
///   nothing.
#[derive(Debug, Clone)]
pub struct ColumnTransform {
    delimiter: char,
    column_index: usize,
    rfc2396_only: bool,
}

impl ColumnTransform {
    pub fn new(delimiter: char, column_index: i32, rfc2396_only: bool) -> Result<Self> {
        if column_index < 1 {
            return Err(CollectorError::Config(format!(
                "column index must be >= 1, got {column_index}"
            )));
        }

        Ok(Self {
            delimiter,
            column_index: column_index as usize,
            rfc2396_only,
        })
    }

    /// Builds the transform configured by a catalog recipe.
    pub fn for_source(source: &Source) -> Result<Self> {
        Self::new(source.delimiter, source.column_index, source.rfc2396_only)
    }

    /// Extracts zero or more candidate symbols from one raw line.
    ///
    /// - Cells before `column_index` are never extractable.
    /// - Lines with fewer than `column_index + 1` cells yield nothing.
    /// - Candidates that normalize to empty are dropped silently.
    pub fn transform(&self, line: &str) -> Vec<String> {
        line.split(self.delimiter)
            .skip(self.column_index)
            .filter_map(util::normalize_symbol)
            .filter(|symbol| !self.rfc2396_only || util::is_rfc2396_clean(symbol))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_or_negative_column_index_fails_at_construction() {
        assert!(matches!(
            ColumnTransform::new(',', 0, false),
            Err(CollectorError::Config(_))
        ));
        assert!(matches!(
            ColumnTransform::new(',', -1, false),
            Err(CollectorError::Config(_))
        ));
    }

    #[test]
    fn reads_from_column_index_onward() {
        let t = ColumnTransform::new(',', 1, false).unwrap();
        assert_eq!(t.transform("NYSE,ibm,msft"), vec!["IBM", "MSFT"]);
    }

    #[test]
    fn column_zero_is_never_extractable() {
        let t = ColumnTransform::new(',', 2, false).unwrap();
        assert_eq!(t.transform("LABEL,SKIPPED,GE"), vec!["GE"]);
    }

    #[test]
    fn short_lines_yield_nothing() {
        let t = ColumnTransform::new(',', 2, false).unwrap();
        assert!(t.transform("LABEL,ONLY").is_empty());
        assert!(t.transform("").is_empty());
    }

    #[test]
    fn candidates_are_normalized() {
        let t = ColumnTransform::new('|', 1, false).unwrap();
        assert_eq!(t.transform("row| brk.b |b ac"), vec!["BRK.B", "BAC"]);
    }

    #[test]
    fn empty_cells_are_dropped_silently() {
        let t = ColumnTransform::new(',', 1, false).unwrap();
        assert_eq!(t.transform("NYSE,, ,GE"), vec!["GE"]);
    }

    #[test]
    fn rfc2396_filter_drops_url_unsafe_symbols_when_enabled() {
        let strict = ColumnTransform::new(',', 1, true).unwrap();
        assert_eq!(strict.transform("row,BRK.B,A/B,$SPX"), vec!["BRK.B"]);

        let lax = ColumnTransform::new(',', 1, false).unwrap();
        assert_eq!(lax.transform("row,BRK.B,A/B,$SPX"), vec!["BRK.B", "A/B", "$SPX"]);
    }

    #[test]
    fn tab_delimited_sources_parse() {
        let t = ColumnTransform::new('\t', 1, false).unwrap();
        assert_eq!(t.transform("BHP Billiton\tBHP"), vec!["BHP"]);
    }
}
