use std::fs;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use warccodec::transcode::TranscodeError;
use warccodec::ParseError;
use warcf::{run, Error, Mode, Options};

fn warc_record(fields: &[(&str, &str)], content: &[u8]) -> Vec<u8> {
    let mut out = b"WARC/1.0\r\n".to_vec();
    for (name, value) in fields {
        out.extend_from_slice(format!("{}: {}\r\n", name, value).as_bytes());
    }
    out.extend_from_slice(format!("Content-Length: {}\r\n\r\n", content.len()).as_bytes());
    out.extend_from_slice(content);
    out.extend_from_slice(b"\r\n\r\n");
    out
}

fn sample_warc() -> Vec<u8> {
    let mut warc = warc_record(
        &[
            ("WARC-Type", "warcinfo"),
            ("WARC-Date", "2025-01-02T03:04:05Z"),
            ("WARC-Filename", "crawl.warc"),
            ("Content-Type", "application/warc-fields"),
        ],
        b"software: warcf-test\r\n",
    );
    warc.extend(warc_record(
        &[
            ("WARC-Type", "response"),
            ("WARC-Target-URI", "http://example.com/"),
            ("WARC-Date", "2025-01-02T03:04:06Z"),
            ("Content-Type", "application/http;msgtype=response"),
        ],
        b"HTTP/1.1 200 OK\r\n\
          Content-Type: text/html; charset=utf-8\r\n\
          \r\n\
          <html><body>hi</body></html>",
    ));
    warc.extend(warc_record(
        &[
            ("WARC-Type", "resource"),
            ("WARC-Target-URI", "http://example.com/dot.gif"),
            ("Content-Type", "image/gif"),
        ],
        b"GIF89a\x01\x00\x01\x00",
    ));
    warc.extend(warc_record(
        &[
            ("WARC-Type", "response"),
            ("WARC-Target-URI", "http://example.com/missing"),
            ("Content-Type", "application/http;msgtype=response"),
        ],
        b"HTTP/1.1 404 Not Found\r\n\r\n",
    ));
    warc
}

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Workspace {
            dir: tempfile::tempdir().expect("failed to create temporary directory"),
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn write(&self, name: &str, data: &[u8]) {
        fs::write(self.path(name), data).expect("failed to write test input");
    }

    fn read(&self, name: &str) -> Vec<u8> {
        fs::read(self.path(name)).expect("failed to read test output")
    }

    fn run(&self, mode: Mode, input: &str, output: &str) -> Result<usize, Error> {
        run(&Options {
            mode,
            input: self.path(input),
            output: self.path(output),
            side_dir: self.path("side"),
            progress: false,
        })
    }
}

fn assert_same_text(actual: &[u8], expected: &[u8]) {
    assert_eq!(
        String::from_utf8_lossy(actual),
        String::from_utf8_lossy(expected)
    );
}

#[test]
fn parses_modes() {
    assert_eq!("e".parse::<Mode>(), Ok(Mode::Encode { split: false }));
    assert_eq!("es".parse::<Mode>(), Ok(Mode::Encode { split: true }));
    assert_eq!("d".parse::<Mode>(), Ok(Mode::Decode { split: false }));
    assert_eq!("dm".parse::<Mode>(), Ok(Mode::Decode { split: true }));
    assert_eq!("l".parse::<Mode>(), Ok(Mode::List { field: 14 }));
    assert_eq!("l2".parse::<Mode>(), Ok(Mode::List { field: 2 }));
    assert_eq!("l0".parse::<Mode>(), Ok(Mode::List { field: 0 }));
    assert_eq!("l28".parse::<Mode>(), Ok(Mode::List { field: 14 }));
    assert_eq!(
        "l99999999999999999999999".parse::<Mode>(),
        Ok(Mode::List { field: 14 })
    );

    for bad in &["", "x", "ds", "em", "lx", "l-1", "l 2", "E"] {
        assert!(bad.parse::<Mode>().is_err(), "{:?} should be rejected", bad);
    }
}

#[test]
fn round_trips_through_files() {
    let ws = Workspace::new();
    let original = sample_warc();
    ws.write("in.warc", &original);

    assert_eq!(ws.run(Mode::Encode { split: false }, "in.warc", "out.warcf").unwrap(), 4);
    let compact = ws.read("out.warcf");
    assert!(compact.len() < original.len());
    assert!(!ws.path("side").exists(), "inline encode makes no side files");

    assert_eq!(ws.run(Mode::Decode { split: false }, "out.warcf", "back.warc").unwrap(), 4);
    assert_same_text(&ws.read("back.warc"), &original);
}

#[test]
fn split_round_trips_through_side_files() {
    let ws = Workspace::new();
    let original = sample_warc();
    ws.write("in.warc", &original);

    ws.run(Mode::Encode { split: true }, "in.warc", "out.warcf")
        .unwrap();

    let mut names: Vec<_> = fs::read_dir(ws.path("side"))
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    names.sort();
    // Only "HTTP/1.1 200" responses are split into header and body
    assert_eq!(names, vec!["0", "2.gif", "3", "c1.html", "h1"]);
    assert_same_text(
        &fs::read(ws.path("side").join("c1.html")).unwrap(),
        b"<html><body>hi</body></html>",
    );

    ws.run(Mode::Decode { split: true }, "out.warcf", "back.warc")
        .unwrap();
    assert_same_text(&ws.read("back.warc"), &original);
}

#[test]
fn split_decode_without_side_files_fails() {
    let ws = Workspace::new();
    ws.write("in.warc", &sample_warc());
    ws.run(Mode::Encode { split: true }, "in.warc", "out.warcf")
        .unwrap();
    fs::remove_file(ws.path("side").join("2.gif")).unwrap();

    match ws.run(Mode::Decode { split: true }, "out.warcf", "back.warc") {
        Err(Error::Transcode(TranscodeError::MissingSideFile(name))) => {
            assert_eq!(name, "2.gif")
        }
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn lists_target_uris_of_responses() {
    let ws = Workspace::new();
    ws.write("in.warc", &sample_warc());

    ws.run("l".parse().unwrap(), "in.warc", "uris.txt").unwrap();
    assert_eq!(
        String::from_utf8(ws.read("uris.txt")).unwrap(),
        "http://example.com/\nhttp://example.com/missing\n"
    );

    ws.run("l2".parse().unwrap(), "in.warc", "dates.txt").unwrap();
    assert_eq!(
        String::from_utf8(ws.read("dates.txt")).unwrap(),
        "2025-01-02T03:04:06Z\n"
    );
}

#[test]
fn rejects_unknown_fields() {
    let ws = Workspace::new();
    let mut warc = sample_warc();
    warc.extend(warc_record(
        &[("WARC-Type", "resource"), ("X-Crawler-Note", "hello")],
        b"",
    ));
    ws.write("in.warc", &warc);

    match ws.run(Mode::Encode { split: false }, "in.warc", "out.warcf") {
        Err(Error::Transcode(TranscodeError::Parse(ParseError::UnknownField(name)))) => {
            assert_eq!(name, "X-Crawler-Note")
        }
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn missing_input_is_an_error() {
    let ws = Workspace::new();

    match ws.run(Mode::Encode { split: false }, "absent.warc", "out.warcf") {
        Err(Error::OpenInput { path, .. }) => assert_eq!(path, ws.path("absent.warc")),
        other => panic!("unexpected result {:?}", other),
    }
    assert!(!ws.path("out.warcf").exists());
}
