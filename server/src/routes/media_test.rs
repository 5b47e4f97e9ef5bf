use super::*;

#[test]
fn media_error_to_status_maps_forbidden() {
    assert_eq!(media_error_to_status(MediaError::Forbidden), StatusCode::FORBIDDEN);
}

#[test]
fn media_error_to_status_maps_io_to_internal() {
    let err = MediaError::Io(std::io::Error::other("disk gone"));
    assert_eq!(media_error_to_status(err), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn serve_file_missing_path_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let request = Request::builder().uri("/x").body(Body::empty()).unwrap();
    let result = serve_file(dir.path().join("absent.mp4"), request).await;
    assert_eq!(result.unwrap_err(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn serve_file_honors_range_requests() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clip.mp4");
    tokio::fs::write(&path, b"0123456789").await.unwrap();

    let request = Request::builder()
        .uri("/clip.mp4")
        .header("range", "bytes=2-5")
        .body(Body::empty())
        .unwrap();
    let response = serve_file(path, request).await.unwrap();
    assert_eq!(response.status(), StatusCode::PARTIAL_CONTENT);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"2345");
}
