//! Smoke tests against the real tracker.
//!
//! Ignored by default; run with `cargo test -- --ignored` when the site is
//! reachable.

use nnmclub_core::{Config, NnmClub, Transport};
use url::Url;

#[test]
#[ignore]
fn test_base_url_reachable() {
    let client = NnmClub::from_config(&Config::default()).unwrap();
    let base = Url::parse(&Config::default().forum.base_url).unwrap();

    client.transport().get(&base).unwrap();
}

#[test]
#[ignore]
fn test_search_returns_results() {
    let client = NnmClub::from_config(&Config::default()).unwrap();

    let records: Vec<_> = client
        .search("Iron Man", Some(1))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    assert!(!records.is_empty());
}
