//! Tests for source merging and strict mode

use ssm_parent::params::{merge, validate_strict};
use ssm_parent::{
    FetchError, FileStore, ParameterMap, ParameterStore, RawParameter, ResolveError,
    SourceDescriptor, SourceGroups, SourceKind, resolve,
};

fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Store that fails with a transport error for one identifier
struct FlakyStore {
    inner: FileStore,
    broken: &'static str,
}

impl ParameterStore for FlakyStore {
    fn fetch(
        &self,
        descriptor: &SourceDescriptor,
        with_decryption: bool,
    ) -> Result<Vec<RawParameter>, FetchError> {
        if descriptor.identifier == self.broken {
            return Err(FetchError::Transport("connection refused".to_string()));
        }
        self.inner.fetch(descriptor, with_decryption)
    }
}

#[test]
fn test_disjoint_groups_union() {
    let store = FileStore::new()
        .with("/app/json/one", r#"{"A": "1"}"#)
        .with("/app/config", r#"{"B": "2"}"#)
        .with("/app/plain/C", "3")
        .with("/app/D", "4");
    let groups = SourceGroups::from_identifiers(
        &ids(&["/app/json"]),
        &ids(&["/app/config"]),
        &ids(&["/app/plain"]),
        &ids(&["/app/D"]),
        false,
    );

    let report = merge(&store, &groups).unwrap();
    let expected: ParameterMap = [("A", "1"), ("B", "2"), ("C", "3"), ("D", "4")]
        .into_iter()
        .collect();
    assert_eq!(report.parameters, expected);
    assert_eq!(report.requested, 4);
    assert_eq!(report.resolved, 4);
}

#[test]
fn test_later_group_wins_on_collision() {
    let store = FileStore::new()
        .with("/p/json", r#"{"KEY": "path-json", "ONLY_JSON": "x"}"#)
        .with("/n/json", r#"{"KEY": "name-json"}"#)
        .with("/pp/KEY", "path-plain")
        .with("/pn/KEY", "name-plain");

    let all = SourceGroups::from_identifiers(
        &ids(&["/p"]),
        &ids(&["/n/json"]),
        &ids(&["/pp"]),
        &ids(&["/pn/KEY"]),
        false,
    );
    let map = merge(&store, &all).unwrap().parameters;
    assert_eq!(map.get("KEY"), Some("name-plain"));
    assert_eq!(map.get("ONLY_JSON"), Some("x"));

    let without_plain_names = SourceGroups::from_identifiers(
        &ids(&["/p"]),
        &ids(&["/n/json"]),
        &ids(&["/pp"]),
        &[],
        false,
    );
    let map = merge(&store, &without_plain_names).unwrap().parameters;
    assert_eq!(map.get("KEY"), Some("path-plain"));

    let json_only =
        SourceGroups::from_identifiers(&ids(&["/p"]), &ids(&["/n/json"]), &[], &[], false);
    let map = merge(&store, &json_only).unwrap().parameters;
    assert_eq!(map.get("KEY"), Some("name-json"));
}

#[test]
fn test_later_descriptor_wins_within_group() {
    let store = FileStore::new()
        .with("/first/KEY", "first")
        .with("/second/KEY", "second");

    let groups =
        SourceGroups::from_identifiers(&[], &[], &[], &ids(&["/first/KEY", "/second/KEY"]), false);
    assert_eq!(
        merge(&store, &groups).unwrap().parameters.get("KEY"),
        Some("second")
    );

    let reversed =
        SourceGroups::from_identifiers(&[], &[], &[], &ids(&["/second/KEY", "/first/KEY"]), false);
    assert_eq!(
        merge(&store, &reversed).unwrap().parameters.get("KEY"),
        Some("first")
    );
}

#[test]
fn test_recursive_path_leaves_in_lexicographic_order() {
    let store = FileStore::new()
        .with("/app/b/KEY", "from-b")
        .with("/app/a/KEY", "from-a")
        .with("/app/TOP", "top");

    let flat = SourceGroups::from_identifiers(&[], &[], &ids(&["/app"]), &[], false);
    let map = merge(&store, &flat).unwrap().parameters;
    assert_eq!(map.keys().collect::<Vec<_>>(), vec!["TOP"]);

    let deep = SourceGroups::from_identifiers(&[], &[], &ids(&["/app"]), &[], true);
    let map = merge(&store, &deep).unwrap().parameters;
    // /app/TOP < /app/a/KEY < /app/b/KEY
    assert_eq!(map.keys().collect::<Vec<_>>(), vec!["TOP", "KEY"]);
    assert_eq!(map.get("KEY"), Some("from-b"));
}

#[test]
fn test_malformed_json_is_fatal_regardless_of_strict() {
    let store = FileStore::new().with("/app/config", "{not json");
    let groups = SourceGroups::from_identifiers(&[], &ids(&["/app/config"]), &[], &[], false);

    for strict in [false, true] {
        let err = resolve(&store, &groups, &[], strict).unwrap_err();
        assert!(matches!(err, ResolveError::MalformedJson { .. }));
    }
}

#[test]
fn test_strict_mode_three_requested_two_resolved() {
    let store = FileStore::new().with("/app/A", "1").with("/app/B", "2");
    let groups =
        SourceGroups::from_identifiers(&[], &[], &[], &ids(&["/app/A", "/app/B", "/app/C"]), false);

    let err = resolve(&store, &groups, &[], true).unwrap_err();
    match err {
        ResolveError::InsufficientParameters {
            requested,
            resolved,
            missing,
        } => {
            assert_eq!(requested, 3);
            assert_eq!(resolved, 2);
            assert_eq!(missing, vec!["/app/C".to_string()]);
        }
        other => panic!("unexpected error: {other}"),
    }

    let map = resolve(&store, &groups, &[], false).unwrap();
    assert_eq!(map.len(), 2);
}

#[test]
fn test_transport_error_is_fatal() {
    let store = FlakyStore {
        inner: FileStore::new().with("/ok", "1"),
        broken: "/down",
    };
    let groups = SourceGroups::from_identifiers(&[], &[], &[], &ids(&["/ok", "/down"]), false);

    let err = resolve(&store, &groups, &[], false).unwrap_err();
    match err {
        ResolveError::FetchTransport { identifier, .. } => assert_eq!(identifier, "/down"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_validate_strict_passes_when_counts_match() {
    assert!(validate_strict(2, 2, &[]).is_ok());
    assert!(validate_strict(1, 2, &[]).is_ok());
}

#[test]
fn test_descriptor_constructors() {
    let desc = SourceDescriptor::name("/x", ssm_parent::ValueFormat::Plain);
    assert_eq!(desc.kind, SourceKind::Name);
    assert!(!desc.recursive);
}
