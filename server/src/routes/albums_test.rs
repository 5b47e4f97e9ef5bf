use super::*;

#[test]
fn catalog_error_to_status_maps_missing_album() {
    let err = CatalogError::AlbumNotFound("album_404".into());
    assert_eq!(catalog_error_to_status(err), StatusCode::NOT_FOUND);
}

#[test]
fn catalog_error_to_status_maps_missing_video() {
    let err = CatalogError::VideoNotFound("video_404".into());
    assert_eq!(catalog_error_to_status(err), StatusCode::NOT_FOUND);
}

#[test]
fn catalog_error_to_status_maps_io_to_internal() {
    let err = CatalogError::Io(std::io::Error::other("disk gone"));
    assert_eq!(catalog_error_to_status(err), StatusCode::INTERNAL_SERVER_ERROR);
}
