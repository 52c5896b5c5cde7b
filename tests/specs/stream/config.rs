//! Configuration specs
//!
//! Verify construction-time validation and TOML configuration.

use crate::prelude::*;

#[test]
fn rotation_requires_placeholder() {
    let dirs = Dirs::new();

    let err = FileStream::open(dirs.config("export.csv").rotate_after(10))
        .err()
        .unwrap();

    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(err.to_string().contains("{count} placeholder is needed"));
    // Validation happens before any directory is created
    assert!(!dirs.stage.exists());
}

#[test]
fn no_rotation_needs_no_placeholder() {
    let dirs = Dirs::new();

    let stream = FileStream::open(dirs.config("export.csv")).unwrap();

    stream.finish().unwrap();
    dirs.published("export.csv").exists();
}

#[test]
fn zero_threshold_is_rejected() {
    let dirs = Dirs::new();

    let err = FileStream::open(dirs.config("e{count}").rotate_after(0))
        .err()
        .unwrap();

    assert!(matches!(err, StreamError::ZeroThreshold));
}

#[test]
fn stream_from_toml_file() {
    let dirs = Dirs::new();
    let config_path = dirs.public.parent().unwrap().join("stream.toml");
    std::fs::create_dir_all(config_path.parent().unwrap()).unwrap();
    std::fs::write(
        &config_path,
        format!(
            "name_template = \"part-#.csv\"\n\
             staging_dir = {:?}\n\
             publish_dir = {:?}\n\
             header = \"h\\n\"\n\
             rotate_after = 1\n\
             placeholder = \"#\"\n",
            dirs.stage.display().to_string(),
            dirs.public.display().to_string(),
        ),
    )
    .unwrap();

    let config = StreamConfig::load(&config_path).unwrap();
    let mut stream = FileStream::open(config).unwrap();
    stream.write("a\n").unwrap();
    stream.write("b\n").unwrap();
    stream.finish().unwrap();

    dirs.published("part-0.csv").has_content("h\na\n");
    dirs.published("part-1.csv").has_content("h\nb\n");
}
