use super::*;
use std::collections::HashMap;

fn config_from(pairs: &[(&str, &str)]) -> Config {
    let env: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    Config::from_lookup(|key| env.get(key).cloned())
}

#[test]
fn defaults_when_environment_is_empty() {
    let cfg = config_from(&[]);
    assert_eq!(cfg.host, DEFAULT_HOST);
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert!(!cfg.debug);
    assert_eq!(cfg.data_dir, PathBuf::from("data"));
    assert_eq!(cfg.uploads_dir, PathBuf::from("uploads"));
    assert_eq!(cfg.site_root, PathBuf::from(DEFAULT_SITE_ROOT));
    assert!((cfg.spin_win_probability - 0.10).abs() < f64::EPSILON);
    assert_eq!(cfg.spin_cooldown_secs, 86_400);
    assert_eq!(cfg.ffmpeg_bin, "ffmpeg");
    assert_eq!(cfg.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
}

#[test]
fn reads_overrides() {
    let cfg = config_from(&[
        ("HOST", "0.0.0.0"),
        ("PORT", "8080"),
        ("GALLERY_DEBUG", "true"),
        ("DATA_DIR", "/srv/gallery/data"),
        ("UPLOADS_DIR", "/srv/gallery/uploads"),
        ("SPIN_WIN_PROBABILITY", "0.25"),
        ("SPIN_COOLDOWN_SECS", "60"),
        ("FFMPEG_BIN", "/usr/local/bin/ffmpeg"),
    ]);
    assert_eq!(cfg.bind_addr(), "0.0.0.0:8080");
    assert!(cfg.debug);
    assert_eq!(cfg.albums_json(), PathBuf::from("/srv/gallery/data/albums.json"));
    assert_eq!(cfg.spin_state_json(), PathBuf::from("/srv/gallery/data/spin_state.json"));
    assert_eq!(cfg.uploads_dir, PathBuf::from("/srv/gallery/uploads"));
    assert!((cfg.spin_win_probability - 0.25).abs() < f64::EPSILON);
    assert_eq!(cfg.spin_cooldown_secs, 60);
    assert_eq!(cfg.ffmpeg_bin, "/usr/local/bin/ffmpeg");
}

#[test]
fn malformed_numbers_fall_back_to_defaults() {
    let cfg = config_from(&[("PORT", "http"), ("SPIN_COOLDOWN_SECS", "-5"), ("SPIN_WIN_PROBABILITY", "lots")]);
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.spin_cooldown_secs, DEFAULT_SPIN_COOLDOWN_SECS);
    assert!((cfg.spin_win_probability - DEFAULT_SPIN_WIN_PROBABILITY).abs() < f64::EPSILON);
}

#[test]
fn win_probability_is_clamped() {
    let high = config_from(&[("SPIN_WIN_PROBABILITY", "3")]);
    let low = config_from(&[("SPIN_WIN_PROBABILITY", "-1")]);
    assert!((high.spin_win_probability - 1.0).abs() < f64::EPSILON);
    assert!(low.spin_win_probability.abs() < f64::EPSILON);
}

#[test]
fn debug_flag_accepts_common_spellings() {
    for raw in ["1", "true", "TRUE", "yes", "on"] {
        assert!(config_from(&[("GALLERY_DEBUG", raw)]).debug, "{raw}");
    }
    for raw in ["0", "false", "off", "nope"] {
        assert!(!config_from(&[("GALLERY_DEBUG", raw)]).debug, "{raw}");
    }
}

#[test]
fn blank_values_are_treated_as_unset() {
    let cfg = config_from(&[("HOST", "  "), ("DATA_DIR", "")]);
    assert_eq!(cfg.host, DEFAULT_HOST);
    assert_eq!(cfg.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
}
