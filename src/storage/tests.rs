use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use super::client::{StorageClient, StorageError, object_name_for};
use super::worker::{UploadEvent, UploadJob, Uploader};
use crate::catalog::Category;
use crate::config::StorageSettings;

fn http_response(status_line: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
        status_line,
        body.len(),
        body
    )
}

/// Serve exactly one request with a canned response, handing back the base
/// URL and the captured request (request line + headers + body).
fn serve_once(response: String) -> (String, mpsc::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());

        let mut captured = String::new();
        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            if reader.read_line(&mut line).unwrap() == 0 {
                break;
            }
            if line == "\r\n" || line == "\n" {
                break;
            }
            if let Some(v) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                content_length = v.trim().parse().unwrap_or(0);
            }
            captured.push_str(&line);
        }

        let mut body = vec![0u8; content_length];
        reader.read_exact(&mut body).unwrap();
        captured.push_str(&String::from_utf8_lossy(&body));
        tx.send(captured).unwrap();

        let mut stream = stream;
        stream.write_all(response.as_bytes()).unwrap();
        let _ = stream.flush();
    });

    (format!("http://{addr}"), rx)
}

/// Serve one connection per canned response, in order.
fn serve_sequence(responses: Vec<String>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        for response in responses {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                if reader.read_line(&mut line).unwrap() == 0 {
                    break;
                }
                if line == "\r\n" || line == "\n" {
                    break;
                }
                if let Some(v) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                    content_length = v.trim().parse().unwrap_or(0);
                }
            }
            let mut body = vec![0u8; content_length];
            reader.read_exact(&mut body).unwrap();

            let mut stream = stream;
            stream.write_all(response.as_bytes()).unwrap();
            let _ = stream.flush();
        }
    });

    format!("http://{addr}")
}

fn settings_for(base_url: &str) -> StorageSettings {
    StorageSettings {
        base_url: base_url.to_string(),
        api_key: "test-key".to_string(),
        timeout_secs: 5,
        ..StorageSettings::default()
    }
}

#[test]
fn store_posts_to_the_prefixed_path_and_returns_the_public_url() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("chant.mp3");
    std::fs::write(&file, b"sacred audio bytes").unwrap();

    let (base, captured) = serve_once(http_response("200 OK", r#"{"Key":"ok"}"#));
    let client = StorageClient::new(&settings_for(&base)).unwrap();

    let url = client.store(&file, "1700000000000-chant.mp3").unwrap();
    assert_eq!(
        url,
        format!("{base}/storage/v1/object/public/audio-files/tracks/1700000000000-chant.mp3")
    );

    let request = captured.recv().unwrap();
    assert!(
        request.starts_with("POST /storage/v1/object/audio-files/tracks/1700000000000-chant.mp3 "),
        "unexpected request line: {request}"
    );
    let lower = request.to_ascii_lowercase();
    assert!(lower.contains("bearer test-key"));
    assert!(lower.contains("x-upsert"));
    assert!(request.contains("sacred audio bytes"));
}

#[test]
fn store_surfaces_remote_failure_as_a_status_error() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("chant.mp3");
    std::fs::write(&file, b"bytes").unwrap();

    let (base, _captured) = serve_once(http_response(
        "400 Bad Request",
        r#"{"error":"Duplicate"}"#,
    ));
    let client = StorageClient::new(&settings_for(&base)).unwrap();

    match client.store(&file, "x.mp3") {
        Err(StorageError::Status { status, body }) => {
            assert_eq!(status, 400);
            assert!(body.contains("Duplicate"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[test]
fn store_fails_on_unreadable_file_before_any_request() {
    // No server is listening on the base URL: a network attempt would
    // error differently, so a Read error proves the file gate ran first.
    let client = StorageClient::new(&settings_for("http://127.0.0.1:9")).unwrap();
    match client.store(std::path::Path::new("/nonexistent/notes.mp3"), "x.mp3") {
        Err(StorageError::Read { path, .. }) => {
            assert!(path.ends_with("notes.mp3"));
        }
        other => panic!("expected read error, got {other:?}"),
    }
}

#[test]
fn list_parses_remote_object_descriptors() {
    let body = r#"[
        {"name":"1-a.mp3","updated_at":"2024-01-01T00:00:00Z","metadata":{"size":123}},
        {"name":"2-b.mp3"}
    ]"#;
    let (base, captured) = serve_once(http_response("200 OK", body));
    let client = StorageClient::new(&settings_for(&base)).unwrap();

    let objects = client.list("tracks/").unwrap();
    assert_eq!(objects.len(), 2);
    assert_eq!(objects[0].name, "1-a.mp3");
    assert_eq!(objects[0].size, Some(123));
    assert_eq!(
        objects[0].last_modified.as_deref(),
        Some("2024-01-01T00:00:00Z")
    );
    assert_eq!(objects[1].size, None);
    assert_eq!(objects[1].last_modified, None);

    let request = captured.recv().unwrap();
    assert!(request.starts_with("POST /storage/v1/object/list/audio-files "));
    assert!(request.contains(r#""prefix":"tracks/""#));
}

#[test]
fn failed_upload_does_not_abort_the_rest_of_the_queue() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.mp3");
    let second = dir.path().join("second.mp3");
    std::fs::write(&first, b"first bytes").unwrap();
    std::fs::write(&second, b"second bytes").unwrap();

    // One connection per job: the first upload is refused, the second
    // must still go through.
    let base = serve_sequence(vec![
        http_response("500 Internal Server Error", r#"{"error":"boom"}"#),
        http_response("200 OK", r#"{"Key":"ok"}"#),
    ]);
    let uploader = Uploader::spawn(StorageClient::new(&settings_for(&base)).unwrap());

    uploader
        .submit(UploadJob {
            file: first,
            title: "first".to_string(),
            section: Category::Healing,
        })
        .unwrap();
    uploader
        .submit(UploadJob {
            file: second,
            title: "second".to_string(),
            section: Category::Healing,
        })
        .unwrap();

    let mut events = Vec::new();
    let deadline = Instant::now() + Duration::from_secs(10);
    while events.len() < 2 && Instant::now() < deadline {
        match uploader.poll_event() {
            Some(ev) => events.push(ev),
            None => thread::sleep(Duration::from_millis(10)),
        }
    }
    uploader.shutdown();

    assert_eq!(events.len(), 2, "expected both jobs to report back");
    match &events[0] {
        UploadEvent::Failed { title, error, .. } => {
            assert_eq!(title, "first");
            assert!(error.contains("500"), "unexpected error: {error}");
        }
        other => panic!("expected a failure first, got {other:?}"),
    }
    match &events[1] {
        UploadEvent::Completed(track) => {
            assert_eq!(track.title, "second");
            assert!(track.file.ends_with("second.mp3"));
            assert_eq!(track.section, Category::Healing);
        }
        other => panic!("expected a completion second, got {other:?}"),
    }
}

#[test]
fn object_names_keep_the_original_file_name() {
    let name = object_name_for("chant.mp3");
    assert!(name.ends_with("-chant.mp3"));

    let (stamp, _) = name.split_once('-').unwrap();
    assert!(stamp.parse::<u64>().is_ok());
}
