//! Index documents used across tests

use repo_index::index::{IndexFile, VersionRecord};
use repo_index::version::parse_version;

/// Index with one package per ordering situation
pub const MIXED_INDEX: &str = r#"
apiVersion: v1
generated: 2024-05-01T12:00:00Z
entries:
  app:
    - name: app
      version: 1.2.0
      urls: ["https://repo.example.com/app-1.2.0.tgz"]
    - name: app
      version: 2.0.0
      urls:
        - https://repo.example.com/app-2.0.0.tgz
        - https://mirror.example.com/app-2.0.0.tgz
      digest: sha256:2f1c
    - name: app
      version: 1.9.0
      urls: ["https://repo.example.com/app-1.9.0.tgz"]
  tools:
    - version: not-a-version
    - version: 1.0.0
  prerelease:
    - version: 0.9.0
    - version: 1.0.0-rc.2
    - version: 1.0.0-rc.10
    - version: v0.10
  messy:
    - version: ""
    - version: 3.1.4
    - version: latest
    - version: 10.0.0
    - version: 2
    - version: 10.0.0-beta.1
    - version: nightly
  withdrawn:
    - version: 1.1.0
      removed: true
      created: 2024-02-01T08:30:00Z
    - version: 1.0.0
      created: 2024-01-01T08:30:00Z
"#;

/// Version strings of a package, in the order the index holds them
pub fn versions_of(index: &IndexFile, name: &str) -> Vec<String> {
    index
        .versions(name)
        .unwrap_or_default()
        .iter()
        .map(|record| record.version().to_string())
        .collect()
}

pub fn is_parseable(record: &VersionRecord) -> bool {
    parse_version(record.version()).is_ok()
}
