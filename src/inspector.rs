//! Inspector facade over a storage engine

use enginelens_config::{parse_config_with, ConfigStruct};
use enginelens_core::{Document, MetadataStore, StatisticsSource};
use enginelens_metadata::{check_format_version_for_with, read_app_metadata_with, VersionRange};
use enginelens_stats::{export_table, ident_size, statistics_uri};

use crate::config::InspectorConfig;
use crate::error::Result;

/// Structured views over one engine's metadata and statistics
///
/// Metadata strings are parsed with the configured limits. Statistics
/// cursors are opened with the configured options.
///
/// # Example
///
/// ```
/// use enginelens::Inspector;
/// use enginelens_core::testing::InMemoryEngine;
///
/// let engine = InMemoryEngine::new()
///     .with_metadata("table:a", "app_metadata=(formatVersion=1,unique)")
///     .with_statistics("statistics:table:a", [("cache: pages evicted", 7)]);
/// let inspector = Inspector::new(engine);
///
/// assert_eq!(inspector.check_default_format_version("table:a").unwrap(), 1);
/// let stats = inspector.statistics("table:a").unwrap();
/// assert!(stats.contains_key("cache"));
/// ```
#[derive(Debug)]
pub struct Inspector<E> {
    engine: E,
    config: InspectorConfig,
}

impl<E> Inspector<E>
where
    E: MetadataStore + StatisticsSource,
{
    /// Create an inspector with the default configuration
    pub fn new(engine: E) -> Self {
        Inspector {
            engine,
            config: InspectorConfig::default(),
        }
    }

    /// Create an inspector with `config`, validating it first
    ///
    /// # Errors
    ///
    /// Returns `Config` if the configuration is invalid.
    pub fn with_config(engine: E, config: InspectorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Inspector { engine, config })
    }

    /// The wrapped engine
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// The active configuration
    pub fn config(&self) -> &InspectorConfig {
        &self.config
    }

    /// Raw configuration string of `uri`
    pub fn raw_metadata(&self, uri: &str) -> Result<String> {
        tracing::debug!(uri, "fetching raw metadata");
        Ok(self.engine.fetch_raw_metadata(uri)?)
    }

    /// Parsed configuration of `uri`
    ///
    /// # Errors
    ///
    /// Returns `Lookup` if the fetch fails and `Parse` if the string is
    /// malformed or exceeds the configured limits.
    pub fn parsed_metadata(&self, uri: &str) -> Result<ConfigStruct<'static>> {
        let raw = self.raw_metadata(uri)?;
        let parsed = parse_config_with(&raw, &self.config.parse_limits())?.into_owned();
        Ok(parsed)
    }

    /// Flattened `app_metadata` of `uri`
    ///
    /// # Errors
    ///
    /// Always `Metadata`, wrapping lookup and parse failures.
    pub fn app_metadata(&self, uri: &str) -> Result<Document> {
        tracing::debug!(uri, "reading app_metadata");
        Ok(read_app_metadata_with(
            &self.engine,
            uri,
            &self.config.parse_limits(),
        )?)
    }

    /// Check the format version of `uri` against `[min, max]`, returning it
    ///
    /// # Errors
    ///
    /// Always `Version`, wrapping lookup and parse failures.
    pub fn check_format_version(&self, uri: &str, min: i64, max: i64) -> Result<i64> {
        self.check_version_range(uri, VersionRange::new(min, max))
    }

    /// Check the format version of `uri` against the configured range
    pub fn check_default_format_version(&self, uri: &str) -> Result<i64> {
        self.check_version_range(uri, self.config.version_range())
    }

    fn check_version_range(&self, uri: &str, range: VersionRange) -> Result<i64> {
        tracing::debug!(uri, min = range.min, max = range.max, "checking format version");
        Ok(check_format_version_for_with(
            &self.engine,
            uri,
            range,
            &self.config.parse_limits(),
        )?)
    }

    /// Grouped statistics of `uri`
    ///
    /// The document starts with `"uri": "statistics:<uri>"`.
    pub fn statistics(&self, uri: &str) -> Result<Document> {
        tracing::debug!(uri, "exporting statistics");
        let stats_uri = statistics_uri(uri);
        Ok(export_table(
            &self.engine,
            &stats_uri,
            &self.config.statistics_cursor_config,
        )?)
    }

    /// On-disk size of `uri`, or 0 if it no longer exists
    pub fn ident_size(&self, uri: &str) -> Result<i64> {
        tracing::debug!(uri, "reading ident size");
        Ok(ident_size(
            &self.engine,
            uri,
            &self.config.statistics_cursor_config,
            self.config.block_size_stat(),
        )?)
    }
}
