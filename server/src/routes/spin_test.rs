use super::*;

#[test]
fn no_store_sets_all_cache_headers() {
    let response = no_store("body");
    let headers = response.headers();
    assert_eq!(headers[CACHE_CONTROL], "no-store, no-cache, must-revalidate, max-age=0");
    assert_eq!(headers[PRAGMA], "no-cache");
    assert_eq!(headers[EXPIRES], "0");
}

#[test]
fn spin_error_to_status_is_internal() {
    let err = SpinError::Io(std::io::Error::other("disk gone"));
    assert_eq!(spin_error_to_status(err), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn forced_outcome_is_hidden_outside_debug() {
    let dir = tempfile::tempdir().unwrap();
    let state = crate::state::test_helpers::test_app_state(dir.path()).await;
    assert!(!state.config.debug);
    let result = forced(&state, "album_001", "video_001", SpinOutcome::Win);
    assert_eq!(result.err(), Some(StatusCode::NOT_FOUND));
}
