//! Export of a whole statistics cursor
//!
//! The exported document names its source first and then holds the
//! grouped statistics:
//!
//! ```text
//! { "uri": "statistics:table:a", "uptime": 42, "cache": { ... }, ... }
//! ```

use enginelens_core::{Document, StatisticsSource};

use crate::error::StatError;
use crate::group::StatisticsGrouper;

/// Field holding the cursor uri in an exported document
pub const URI_FIELD: &str = "uri";

/// Open the statistics cursor at `uri` and export it as a grouped document
///
/// The cursor is released before returning, on success and on failure.
///
/// # Errors
///
/// Returns `Lookup` if the cursor cannot be opened, plus the errors of
/// [`group_statistics`](crate::group_statistics).
pub fn export_table<S>(source: &S, uri: &str, options: &str) -> Result<Document, StatError>
where
    S: StatisticsSource + ?Sized,
{
    let mut cursor = source.open_statistics_stream(uri, options)?;

    let mut prefix = Document::new();
    prefix.insert(URI_FIELD, uri);
    let mut grouper = StatisticsGrouper::with_document(prefix);
    grouper.drain(cursor.as_mut())?;

    tracing::debug!(uri, statistics = grouper.consumed(), "exported statistics");
    Ok(grouper.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use enginelens_core::testing::InMemoryEngine;
    use enginelens_core::{DocValue, LookupError};

    #[test]
    fn test_export_table() {
        let engine = InMemoryEngine::new().with_statistics(
            "statistics:table:a",
            [("cache: pages evicted", 7), ("uptime", 42), ("cache: pages read", 3)],
        );
        let doc = export_table(&engine, "statistics:table:a", "").unwrap();

        assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["uri", "uptime", "cache"]);
        assert_eq!(
            doc.get("uri"),
            Some(&DocValue::String("statistics:table:a".into()))
        );
        let cache = doc.get("cache").and_then(DocValue::as_document).unwrap();
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_export_unknown_uri() {
        let engine = InMemoryEngine::new();
        let err = export_table(&engine, "statistics:table:gone", "").unwrap_err();
        assert!(matches!(err, StatError::Lookup(LookupError::CursorUnavailable { .. })));
    }

    #[test]
    fn test_export_interrupted() {
        let engine = InMemoryEngine::new()
            .with_statistics("s", [("a: x", 1), ("a: y", 2), ("a: z", 3)])
            .fail_stream_after("s", 2);
        let err = export_table(&engine, "s", "").unwrap_err();
        assert!(matches!(err, StatError::StreamInterrupted { consumed: 2, .. }));
    }

    #[test]
    fn test_export_empty_cursor() {
        let engine = InMemoryEngine::new().with_statistics("s", Vec::<(String, u64)>::new());
        let doc = export_table(&engine, "s", "").unwrap();
        assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["uri"]);
    }
}
