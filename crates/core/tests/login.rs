//! Login integration tests.

use nnmclub_core::{
    testing::{fixtures, MockTransport},
    Endpoints, NnmClub, NnmClubError,
};

const LOGIN_URL: &str = "https://mirror.example/forum/login.php";
const SEARCH_URL: &str = "https://mirror.example/forum/tracker.php";

fn client(transport: &MockTransport) -> NnmClub<MockTransport> {
    let endpoints = Endpoints::from_base("https://mirror.example/").unwrap();
    NnmClub::with_transport(transport.clone(), endpoints)
}

#[test]
fn test_login_then_search_on_same_transport() {
    let transport = MockTransport::new();
    transport.on_post(LOGIN_URL, fixtures::login_page(Some("alice")));
    transport.on_post(
        SEARCH_URL,
        fixtures::results_page(&[fixtures::FixtureRow::new(3)], None),
    );
    let mut client = client(&transport);

    client.login("alice", "secret").unwrap();
    let records: Vec<_> = client
        .search("iron man", Some(1))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(
        records[0].detail_url.as_deref(),
        Some("https://mirror.example/forum/viewtopic.php?t=3")
    );

    let urls: Vec<_> = transport.requests().into_iter().map(|r| r.url).collect();
    assert_eq!(urls, vec![LOGIN_URL.to_string(), SEARCH_URL.to_string()]);
}

#[test]
fn test_login_rejected_without_username_in_body() {
    let transport = MockTransport::new();
    transport.on_post(LOGIN_URL, fixtures::login_page(Some("someone_else")));
    let mut client = client(&transport);

    let err = client.login("alice", "secret").unwrap_err();
    assert!(matches!(
        err,
        NnmClubError::InvalidCredentials { ref username, ref password }
            if username == "alice" && password == "secret"
    ));
}

#[test]
fn test_relogin_after_failure() {
    let transport = MockTransport::new();
    transport.on_post(LOGIN_URL, fixtures::login_page(Some("bob")));
    let mut client = client(&transport);

    assert!(client.login("alice", "secret").is_err());
    client.login("bob", "secret").unwrap();

    assert_eq!(client.credentials().unwrap().username, "bob");
    assert_eq!(transport.requests().len(), 2);
}
