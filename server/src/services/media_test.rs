use super::*;

// =============================================================
// safe_join
// =============================================================

#[test]
fn safe_join_appends_plain_segments() {
    let joined = safe_join(Path::new("/srv/uploads"), &["album_001", "thumbnails", "video_001.jpg"]).unwrap();
    assert_eq!(joined, PathBuf::from("/srv/uploads/album_001/thumbnails/video_001.jpg"));
}

#[test]
fn safe_join_rejects_parent_escape() {
    assert!(matches!(safe_join(Path::new("/srv/uploads"), &[".."]), Err(MediaError::Forbidden)));
    assert!(matches!(
        safe_join(Path::new("/srv/uploads"), &["album_001", "../../etc/passwd"]),
        Err(MediaError::Forbidden)
    ));
}

#[test]
fn safe_join_folds_contained_parent_segments() {
    let joined = safe_join(Path::new("/srv/uploads"), &["album_001/../album_002", "cover"]).unwrap();
    assert_eq!(joined, PathBuf::from("/srv/uploads/album_002/cover"));
}

#[test]
fn safe_join_rejects_absolute_parts() {
    assert!(matches!(safe_join(Path::new("/srv/uploads"), &["/etc"]), Err(MediaError::Forbidden)));
}

#[test]
fn safe_join_ignores_current_dir_segments() {
    let joined = safe_join(Path::new("uploads"), &["./album_001", "."]).unwrap();
    assert_eq!(joined, PathBuf::from("uploads/album_001"));
}

// =============================================================
// AlbumDirs
// =============================================================

#[test]
fn album_layout_paths() {
    let dirs = AlbumDirs::for_album(Path::new("uploads"), "album_001").unwrap();
    assert_eq!(dirs.cover_file("png"), PathBuf::from("uploads/album_001/cover/cover.png"));
    assert_eq!(
        dirs.video_file("video_002", VideoVersion::Pixelated),
        PathBuf::from("uploads/album_001/videos/video_002_pixelated.mp4")
    );
    assert_eq!(dirs.thumbnail_file("video_002"), PathBuf::from("uploads/album_001/thumbnails/video_002.jpg"));
}

#[test]
fn album_layout_rejects_traversal_id() {
    assert!(AlbumDirs::for_album(Path::new("uploads"), "..").is_err());
}

#[tokio::test]
async fn create_builds_all_directories() {
    let tmp = tempfile::tempdir().unwrap();
    let dirs = AlbumDirs::for_album(tmp.path(), "album_001").unwrap();
    dirs.create().await.unwrap();
    assert!(dirs.cover.is_dir());
    assert!(dirs.videos.is_dir());
    assert!(dirs.thumbnails.is_dir());
}

#[tokio::test]
async fn find_cover_tries_extensions_in_order() {
    let tmp = tempfile::tempdir().unwrap();
    let dirs = AlbumDirs::for_album(tmp.path(), "album_001").unwrap();
    dirs.create().await.unwrap();

    assert_eq!(find_cover(tmp.path(), "album_001").await.unwrap(), None);

    tokio::fs::write(dirs.cover_file("png"), b"png").await.unwrap();
    assert_eq!(find_cover(tmp.path(), "album_001").await.unwrap(), Some(dirs.cover_file("png")));

    tokio::fs::write(dirs.cover_file("jpg"), b"jpg").await.unwrap();
    assert_eq!(find_cover(tmp.path(), "album_001").await.unwrap(), Some(dirs.cover_file("jpg")));
}

// =============================================================
// file checks
// =============================================================

#[test]
fn extension_is_lowercased_last_segment() {
    assert_eq!(file_extension("Holiday.Clip.MP4").as_deref(), Some("mp4"));
    assert_eq!(file_extension("noext"), None);
}

#[test]
fn allowed_file_matches_extension_list() {
    assert!(allowed_file("cover.JPG", &["jpg", "jpeg", "png"]));
    assert!(!allowed_file("cover.gif", &["jpg", "jpeg", "png"]));
    assert!(!allowed_file("cover", &["jpg"]));
    assert!(allowed_file("clip.mp4", &["mp4"]));
    assert!(!allowed_file("clip.mp4.mov", &["mp4"]));
}

#[test]
fn aspect_ratio_tolerance() {
    assert!(is_cover_aspect(800, 600));
    assert!(is_cover_aspect(1024, 768));
    assert!(is_cover_aspect(810, 600));
    assert!(!is_cover_aspect(1920, 1080));
    assert!(!is_cover_aspect(600, 600));
    assert!(!is_cover_aspect(800, 0));
}

#[tokio::test]
async fn check_cover_reads_image_dimensions() {
    let tmp = tempfile::tempdir().unwrap();
    let good = tmp.path().join("good.png");
    let wide = tmp.path().join("wide.png");
    image::RgbImage::new(40, 30).save(&good).unwrap();
    image::RgbImage::new(64, 36).save(&wide).unwrap();

    assert!(check_cover_aspect_ratio(&good).await.unwrap());
    assert!(!check_cover_aspect_ratio(&wide).await.unwrap());
}

#[tokio::test]
async fn check_cover_rejects_non_images() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("cover.png");
    tokio::fs::write(&path, b"definitely not a png").await.unwrap();
    assert!(check_cover_aspect_ratio(&path).await.is_err());
}

#[tokio::test]
async fn check_cover_sniffs_format_from_content() {
    let tmp = tempfile::tempdir().unwrap();
    let mut png = Vec::new();
    image::RgbImage::new(40, 30)
        .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
        .unwrap();

    let misnamed = tmp.path().join("cover.jpg");
    let bare = tmp.path().join("upload-0001");
    tokio::fs::write(&misnamed, &png).await.unwrap();
    tokio::fs::write(&bare, &png).await.unwrap();

    assert!(check_cover_aspect_ratio(&misnamed).await.unwrap());
    assert!(check_cover_aspect_ratio(&bare).await.unwrap());
}

#[tokio::test]
async fn move_file_relocates_contents() {
    let tmp = tempfile::tempdir().unwrap();
    let from = tmp.path().join("staged");
    let to = tmp.path().join("final.mp4");
    tokio::fs::write(&from, b"clip").await.unwrap();

    move_file(&from, &to).await.unwrap();

    assert!(!from.exists());
    assert_eq!(tokio::fs::read(&to).await.unwrap(), b"clip");
}
