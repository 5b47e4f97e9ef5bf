use super::*;
use crate::services::media::MediaError;

#[test]
fn upload_error_to_status_maps_unknown_album() {
    assert_eq!(upload_error_to_status(UploadError::AlbumNotFound), StatusCode::NOT_FOUND);
}

#[test]
fn upload_error_to_status_maps_validation_to_bad_request() {
    assert_eq!(upload_error_to_status(UploadError::CoverAspect), StatusCode::BAD_REQUEST);
    assert_eq!(upload_error_to_status(UploadError::VideoFormat), StatusCode::BAD_REQUEST);
}

#[test]
fn upload_error_to_status_maps_unsafe_path_to_forbidden() {
    let err = UploadError::Media(MediaError::Forbidden);
    assert_eq!(upload_error_to_status(err), StatusCode::FORBIDDEN);
}

#[test]
fn upload_error_to_status_maps_io_to_internal() {
    let err = UploadError::Io(std::io::Error::other("disk gone"));
    assert_eq!(upload_error_to_status(err), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn multipart_form_takes_fields_once() {
    let mut form = MultipartForm::default();
    form.fields.insert("name".into(), "Holiday".into());
    form.files.insert(
        "cover".into(),
        UploadedFile { file_name: "cover.png".into(), path: PathBuf::from("staged-cover") },
    );

    assert_eq!(form.text("name").as_deref(), Some("Holiday"));
    assert_eq!(form.text("name"), None);
    assert_eq!(form.file("cover").map(|f| f.file_name), Some("cover.png".to_owned()));
    assert!(form.file("cover").is_none());
}

#[tokio::test]
async fn discard_removes_leftover_spooled_files() {
    let tmp = tempfile::tempdir().unwrap();
    let leftover = tmp.path().join("leftover");
    let moved = tmp.path().join("moved");
    tokio::fs::write(&leftover, b"clip").await.unwrap();

    let form = MultipartForm { spooled: vec![leftover.clone(), moved], ..MultipartForm::default() };
    form.discard().await;

    assert!(!leftover.exists());
}
