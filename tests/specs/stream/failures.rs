//! Failure specs
//!
//! Verify error surfacing and recovery using the fake filesystem.

use crate::prelude::*;
use filestream::{FakeFs, FsFault};
use std::path::Path;

fn fake(config: StreamConfig) -> (FakeFs, FileStream<FakeFs>) {
    let fs = FakeFs::new();
    let stream = FileStream::with_fs(config, fs.clone()).unwrap();
    (fs, stream)
}

fn config(template: &str) -> StreamConfig {
    StreamConfig::new(template, "/stage", "/public")
}

#[test]
fn failed_open_can_be_retried() {
    let (fs, mut stream) = fake(config("a.txt"));
    fs.inject(FsFault::Open);

    let err = stream.write("x").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
    assert!(err.to_string().contains("cannot open file a.txt"));

    fs.heal(FsFault::Open);
    stream.write("x").unwrap();
    stream.finish().unwrap();

    assert_eq!(fs.read_string(Path::new("/public/a.txt")).unwrap(), "x");
}

#[test]
fn failed_write_is_fatal_and_never_published() {
    let (fs, mut stream) = fake(config("a{count}.txt").header("h").rotate_after(3));
    stream.write("1").unwrap();
    fs.inject(FsFault::Write);

    let err = stream.write("2").unwrap_err();
    assert!(err.to_string().contains("cannot write to file a0.txt"));
    fs.heal(FsFault::Write);

    assert_eq!(stream.write("3").unwrap_err().kind(), ErrorKind::State);
    assert!(stream.finish().is_err());
    assert!(fs.list(Path::new("/public")).is_empty());
}

#[test]
fn failed_publish_never_exposes_partial_file() {
    let (fs, mut stream) = fake(config("a{count}.txt").rotate_after(1));
    fs.inject(FsFault::Rename);

    let err = stream.write("1").unwrap_err();

    assert!(matches!(err, StreamError::Publish { .. }));
    assert!(fs.list(Path::new("/public")).is_empty());

    fs.heal(FsFault::Rename);
    stream.finish().unwrap();
    assert_eq!(fs.read_string(Path::new("/public/a0.txt")).unwrap(), "1");
}

#[test]
fn cross_device_publish_is_still_atomic() {
    let (fs, mut stream) = fake(config("a{count}.txt").rotate_after(2));
    fs.inject(FsFault::CrossDevice);

    stream.write("1").unwrap();
    stream.write("2").unwrap();

    assert_eq!(
        fs.list(Path::new("/public")),
        vec![Path::new("/public/a0.txt").to_path_buf()]
    );
    assert!(fs.list(Path::new("/stage")).is_empty());
    stream.finish().unwrap();
}
