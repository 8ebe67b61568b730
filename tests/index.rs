mod helper;

use std::cmp::Ordering;
use std::thread;

use helper::{MIXED_INDEX, init_tracing, is_parseable, versions_of};
use repo_index::version::constraint::ANY;
use repo_index::index::canonical::sort_versions;
use repo_index::index::{IndexFile, LookupError, ParseError, parse_index};
use repo_index::version::{compare_precedence, parse_version};

fn mixed_index() -> IndexFile {
    init_tracing();
    parse_index(MIXED_INDEX.as_bytes()).unwrap()
}

#[test]
fn parse_index_puts_newest_version_first() {
    let index = mixed_index();

    assert_eq!(versions_of(&index, "app"), vec!["2.0.0", "1.9.0", "1.2.0"]);
    assert_eq!(
        versions_of(&index, "prerelease"),
        vec!["1.0.0-rc.10", "1.0.0-rc.2", "v0.10", "0.9.0"]
    );
}

#[test]
fn parse_index_moves_unparseable_versions_to_the_tail() {
    let index = mixed_index();

    assert_eq!(versions_of(&index, "tools"), vec!["1.0.0", "not-a-version"]);

    let messy = versions_of(&index, "messy");
    assert_eq!(messy[..4], ["10.0.0", "10.0.0-beta.1", "3.1.4", "2"]);
    // Order among unparseable versions is implementation-defined
    let mut tail = messy[4..].to_vec();
    tail.sort();
    assert_eq!(tail, vec!["", "latest", "nightly"]);
}

#[test]
fn canonical_order_holds_for_every_package() {
    let index = mixed_index();

    for (name, versions) in &index.entries {
        for pair in versions.windows(2) {
            if let (Ok(a), Ok(b)) = (
                parse_version(pair[0].version()),
                parse_version(pair[1].version()),
            ) {
                assert_ne!(
                    compare_precedence(&a, &b),
                    Ordering::Less,
                    "{name}: {} listed before {}",
                    pair[0].version(),
                    pair[1].version()
                );
            }
        }

        let first_unparseable = versions
            .iter()
            .position(|record| !is_parseable(record))
            .unwrap_or(versions.len());
        assert!(
            versions[first_unparseable..]
                .iter()
                .all(|record| !is_parseable(record)),
            "{name}: parseable version after an unparseable one"
        );
    }
}

#[test]
fn canonical_order_is_stable_under_resorting() {
    let index = mixed_index();

    for versions in index.entries.values() {
        let mut resorted = versions.clone();
        sort_versions(&mut resorted);
        assert_eq!(&resorted, versions);
    }
}

#[test]
fn parse_index_keeps_record_fields() {
    let index = mixed_index();

    let latest = index.find_latest("app").unwrap();
    assert_eq!(latest.metadata.name, "app");
    assert_eq!(
        latest.urls,
        vec![
            "https://repo.example.com/app-2.0.0.tgz",
            "https://mirror.example.com/app-2.0.0.tgz",
        ]
    );
    assert_eq!(latest.digest.as_deref(), Some("sha256:2f1c"));
    assert!(index.generated.is_some());
}

#[test]
fn find_latest_returns_highest_version() {
    let index = mixed_index();

    assert_eq!(index.find_latest("app").unwrap().version(), "2.0.0");
    assert_eq!(index.find_latest("tools").unwrap().version(), "1.0.0");
    assert_eq!(index.find_latest("messy").unwrap().version(), "10.0.0");
}

#[test]
fn find_latest_matches_the_any_constraint() {
    let index = mixed_index();

    for name in index.package_names() {
        assert_eq!(
            index.find_latest(name),
            index.find_version(name, ANY)
        );
    }
}

#[test]
fn find_latest_includes_removed_versions() {
    let index = mixed_index();

    let latest = index.find_latest("withdrawn").unwrap();
    assert_eq!(latest.version(), "1.1.0");
    assert!(latest.is_removed());
}

#[test]
fn find_version_returns_highest_version_below_bound() {
    let index = mixed_index();

    assert_eq!(index.find_version("app", "<2.0.0").unwrap().version(), "1.9.0");
    assert_eq!(index.find_version("messy", "<10").unwrap().version(), "3.1.4");
    assert_eq!(index.find_version("messy", "~2").unwrap().version(), "2");
    assert_eq!(
        index.find_version("prerelease", "<1.0.0").unwrap().version(),
        "v0.10"
    );
}

#[test]
fn find_version_fails_when_nothing_matches() {
    let index = mixed_index();

    assert_eq!(
        index.find_version("app", ">5.0.0"),
        Err(LookupError::VersionNotFound {
            name: "app".to_string(),
            constraint: ">5.0.0".to_string(),
        })
    );
}

#[test]
fn find_version_fails_for_unknown_package() {
    let index = mixed_index();

    assert_eq!(
        index.find_version("unknown", "^1.0.0"),
        Err(LookupError::PackageNotFound {
            name: "unknown".to_string(),
            constraint: "^1.0.0".to_string(),
        })
    );
}

#[test]
fn find_version_rejects_malformed_constraint() {
    let index = mixed_index();

    assert!(matches!(
        index.find_version("app", ">= >="),
        Err(LookupError::InvalidConstraint(_))
    ));
}

#[test]
fn parse_index_flags_missing_api_version_but_keeps_data() {
    init_tracing();
    let document = MIXED_INDEX.replace("apiVersion: v1\n", "");

    let err = parse_index(document.as_bytes()).unwrap_err();

    assert_eq!(err.to_string(), "No API version specified");
    let index = err.into_index().unwrap();
    assert_eq!(versions_of(&index, "app"), vec!["2.0.0", "1.9.0", "1.2.0"]);
}

#[test]
fn parse_index_rejects_non_index_documents() {
    init_tracing();

    let err = parse_index(b"just a string").unwrap_err();

    assert!(matches!(err, ParseError::Decode(_)));
    assert!(err.into_index().is_none());
}

#[test]
fn parsed_index_can_be_queried_from_many_threads() {
    let index = mixed_index();

    thread::scope(|scope| {
        let handles: Vec<_> = ["app", "tools", "messy", "withdrawn"]
            .into_iter()
            .map(|name| {
                let index = &index;
                scope.spawn(move || index.find_latest(name).map(|r| r.version().to_string()))
            })
            .collect();

        let latest: Vec<_> = handles
            .into_iter()
            .map(|handle| handle.join().unwrap().unwrap())
            .collect();
        assert_eq!(latest, vec!["2.0.0", "1.0.0", "10.0.0", "1.1.0"]);
    });
}
