//! Inspector facade against an in-memory engine
//!
//! Exercises every facade operation end to end, including limits taken
//! from a config file on disk.

use enginelens::{
    ConfigItem, DocValue, Error, Inspector, InspectorConfig, LookupError, MetadataError,
    ParseError, StatError, VersionError, CONFIG_FILE_NAME,
};
use enginelens_core::testing::InMemoryEngine;
use tempfile::TempDir;

const ORDERS_METADATA: &str = "access_pattern_hint=none,allocation_size=4KB,\
app_metadata=(formatVersion=2,infoObj=\"{\\\"v\\\": 1}\",unique=true,collation=(locale=fr)),\
block_allocation=best,key_format=u,value_format=u";

fn engine() -> InMemoryEngine {
    InMemoryEngine::new()
        .with_metadata("table:orders", ORDERS_METADATA)
        .with_metadata("table:legacy", "key_format=u,app_metadata=()")
        .with_metadata("table:plain", "key_format=u,value_format=u")
        .with_metadata("table:broken", "key_format=(u")
        .with_metadata(
            "table:deep",
            "app_metadata=(a=(b=(c=(d=(e=1))))),key_format=u",
        )
        .with_statistics(
            "statistics:table:orders",
            [
                ("cache: pages evicted", 7),
                ("btree: overflow pages", 0),
                ("cache: pages read", 11),
            ],
        )
        .with_statistic(
            "statistics:table:orders",
            2009,
            "block-manager: file size in bytes",
            16384,
        )
}

// ============================================================================
// Metadata
// ============================================================================

#[test]
fn test_raw_and_parsed_metadata() {
    let inspector = Inspector::new(engine());
    assert_eq!(inspector.raw_metadata("table:orders").unwrap(), ORDERS_METADATA);

    let parsed = inspector.parsed_metadata("table:orders").unwrap();
    assert_eq!(parsed.get("allocation_size"), Some(&ConfigItem::Str("4KB".into())));
    assert_eq!(parsed.get("key_format"), Some(&ConfigItem::Str("u".into())));
}

#[test]
fn test_app_metadata() {
    let inspector = Inspector::new(engine());
    let app = inspector.app_metadata("table:orders").unwrap();

    assert_eq!(
        app.keys().collect::<Vec<_>>(),
        vec!["formatVersion", "infoObj", "unique", "collation"]
    );
    assert_eq!(app.get("formatVersion"), Some(&DocValue::Int(2)));
    assert_eq!(app.get("infoObj"), Some(&DocValue::String("{\"v\": 1}".into())));
    assert_eq!(app.get("unique"), Some(&DocValue::Bool(true)));
    assert_eq!(
        app.get("collation"),
        Some(&DocValue::String("(locale=fr)".into()))
    );
}

#[test]
fn test_app_metadata_absent_is_empty() {
    let inspector = Inspector::new(engine());
    assert!(inspector.app_metadata("table:plain").unwrap().is_empty());
}

#[test]
fn test_missing_resource_is_not_found() {
    let inspector = Inspector::new(engine());
    assert!(inspector.raw_metadata("table:gone").unwrap_err().is_not_found());
    assert!(inspector.app_metadata("table:gone").unwrap_err().is_not_found());
    assert!(inspector
        .check_default_format_version("table:gone")
        .unwrap_err()
        .is_not_found());
}

#[test]
fn test_malformed_metadata() {
    let inspector = Inspector::new(engine());
    match inspector.parsed_metadata("table:broken").unwrap_err() {
        Error::Parse(err) => assert!(matches!(err, ParseError::MalformedConfig { .. })),
        other => panic!("expected Parse, got {:?}", other),
    }
    match inspector.app_metadata("table:broken").unwrap_err() {
        Error::Metadata(MetadataError::Parse(_)) => {}
        other => panic!("expected Metadata(Parse), got {:?}", other),
    }
}

#[test]
fn test_deep_metadata_rejected_with_default_config() {
    let text = format!("app_metadata=({}{}", "a=(".repeat(100_000), ")".repeat(100_001));
    let inspector = Inspector::new(InMemoryEngine::new().with_metadata("table:deep", text));

    match inspector.app_metadata("table:deep").unwrap_err() {
        Error::Metadata(MetadataError::Parse(ParseError::NestingTooDeep { max, .. })) => {
            assert_eq!(max, 64)
        }
        other => panic!("expected NestingTooDeep, got {:?}", other),
    }
    match inspector.check_default_format_version("table:deep").unwrap_err() {
        Error::Version(VersionError::Parse(ParseError::NestingTooDeep { .. })) => {}
        other => panic!("expected NestingTooDeep, got {:?}", other),
    }
}

// ============================================================================
// Format versions
// ============================================================================

#[test]
fn test_check_format_version() {
    let inspector = Inspector::new(engine());
    assert_eq!(inspector.check_format_version("table:orders", 1, 3).unwrap(), 2);

    match inspector.check_format_version("table:orders", 3, 5).unwrap_err() {
        Error::Version(VersionError::UnsupportedVersion { actual, min, max }) => {
            assert_eq!((actual, min, max), (2, 3, 5));
        }
        other => panic!("expected UnsupportedVersion, got {:?}", other),
    }
}

#[test]
fn test_default_range_and_legacy_version() {
    let inspector = Inspector::new(engine());
    assert_eq!(inspector.check_default_format_version("table:legacy").unwrap(), 1);
    assert!(inspector.check_default_format_version("table:orders").is_err());

    match inspector.check_default_format_version("table:plain").unwrap_err() {
        Error::Version(VersionError::MissingMetadata) => {}
        other => panic!("expected MissingMetadata, got {:?}", other),
    }
}

// ============================================================================
// Statistics
// ============================================================================

#[test]
fn test_statistics_export() {
    let inspector = Inspector::new(engine());
    let doc = inspector.statistics("table:orders").unwrap();

    assert_eq!(
        doc.keys().collect::<Vec<_>>(),
        vec!["uri", "cache", "btree", "block-manager"]
    );
    assert_eq!(
        doc.get("uri"),
        Some(&DocValue::String("statistics:table:orders".into()))
    );
    let cache = doc.get("cache").and_then(DocValue::as_document).unwrap();
    assert_eq!(cache.get("pages read"), Some(&DocValue::Int(11)));
}

#[test]
fn test_statistics_serialize_in_read_order() {
    let inspector = Inspector::new(engine());
    let doc = inspector.statistics("table:orders").unwrap();

    let json = serde_json::to_string(&doc).unwrap();
    assert_eq!(
        json,
        concat!(
            r#"{"uri":"statistics:table:orders","#,
            r#""cache":{"pages evicted":7,"pages read":11},"#,
            r#""btree":{"overflow pages":0},"#,
            r#""block-manager":{"file size in bytes":16384}}"#
        )
    );
}

#[test]
fn test_statistics_of_missing_resource() {
    let inspector = Inspector::new(engine());
    match inspector.statistics("table:gone").unwrap_err() {
        Error::Stats(StatError::Lookup(LookupError::CursorUnavailable { uri, .. })) => {
            assert_eq!(uri, "statistics:table:gone");
        }
        other => panic!("expected CursorUnavailable, got {:?}", other),
    }
}

#[test]
fn test_ident_size() {
    let inspector = Inspector::new(engine());
    assert_eq!(inspector.ident_size("table:orders").unwrap(), 16384);
    assert_eq!(inspector.ident_size("table:gone").unwrap(), 0);
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_limits_from_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, "max_nesting_depth = 2\nmax_metadata_len = 64\n").unwrap();

    let config = InspectorConfig::from_file(&path).unwrap();
    let inspector = Inspector::with_config(engine(), config).unwrap();

    match inspector.parsed_metadata("table:deep").unwrap_err() {
        Error::Parse(ParseError::NestingTooDeep { max, .. }) => assert_eq!(max, 2),
        other => panic!("expected NestingTooDeep, got {:?}", other),
    }
    match inspector.parsed_metadata("table:orders").unwrap_err() {
        Error::Parse(ParseError::InputTooLarge { max, .. }) => assert_eq!(max, 64),
        other => panic!("expected InputTooLarge, got {:?}", other),
    }
    assert!(inspector.parsed_metadata("table:plain").is_ok());
}

#[test]
fn test_configured_block_size_key() {
    let config = InspectorConfig {
        block_size_key: 7,
        ..InspectorConfig::default()
    };
    let engine = engine().with_statistic("statistics:table:orders", 7, "custom size", 99);
    let inspector = Inspector::with_config(engine, config).unwrap();
    assert_eq!(inspector.ident_size("table:orders").unwrap(), 99);
}

#[test]
fn test_configured_version_range() {
    let config = InspectorConfig {
        min_format_version: 2,
        max_format_version: 4,
        ..InspectorConfig::default()
    };
    let inspector = Inspector::with_config(engine(), config).unwrap();
    assert_eq!(inspector.check_default_format_version("table:orders").unwrap(), 2);
    assert!(inspector.check_default_format_version("table:legacy").is_err());
}

#[test]
fn test_invalid_config_rejected() {
    let config = InspectorConfig {
        max_nesting_depth: 0,
        ..InspectorConfig::default()
    };
    assert!(matches!(
        Inspector::with_config(engine(), config),
        Err(Error::Config(_))
    ));
}
