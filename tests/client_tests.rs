use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;

use casino_reports::client::{HttpReportStore, LocalReportStore, ReportStore, create_new_report};
use casino_reports::errors::ReportError;
use casino_reports::report::{CasinoRegistry, CasinoReport, DEFAULT_TEMPLATE_ID};
use tempfile::TempDir;

// =============== 本地存储 ===============

fn local_store() -> (TempDir, LocalReportStore) {
    let temp_dir = TempDir::new().unwrap();
    let store = LocalReportStore::new(temp_dir.path().join("reports.json"));
    (temp_dir, store)
}

#[test]
fn test_local_store_crud_cycle() {
    let (_temp_dir, store) = local_store();
    let registry = CasinoRegistry::default();

    assert!(store.fetch_reports().unwrap().is_empty());

    let created = store
        .save_report(&CasinoReport::blank(&registry, "mars", 2024, None))
        .unwrap();
    let id = created.id.unwrap();
    assert_eq!(created.template_id, DEFAULT_TEMPLATE_ID);

    let mut edited = store.get_report(id).unwrap();
    edited
        .data
        .insert("AZUR_NGR".to_string(), "12.50".to_string());
    let updated = store.save_report(&edited).unwrap();
    assert_eq!(updated.id, Some(id));
    assert_eq!(store.fetch_reports().unwrap().len(), 1);
    assert_eq!(
        store.get_report(id).unwrap().data.get("AZUR_NGR").map(String::as_str),
        Some("12.50")
    );

    store.delete_report(id).unwrap();
    assert!(matches!(
        store.get_report(id),
        Err(ReportError::NotFound(_))
    ));
}

#[test]
fn test_local_store_lists_newest_first() {
    let (_temp_dir, store) = local_store();
    let registry = CasinoRegistry::default();

    let mut older = CasinoReport::blank(&registry, "janvier", 2024, None);
    older.created_at = "2024-01-31T10:00:00+00:00".to_string();
    let mut newer = CasinoReport::blank(&registry, "février", 2024, None);
    newer.created_at = "2024-02-29T10:00:00+00:00".to_string();

    store.save_report(&older).unwrap();
    store.save_report(&newer).unwrap();

    let months: Vec<String> = store
        .fetch_reports()
        .unwrap()
        .into_iter()
        .map(|r| r.month)
        .collect();
    assert_eq!(months, vec!["février", "janvier"]);
}

#[test]
fn test_local_store_rejects_unknown_ids() {
    let (_temp_dir, store) = local_store();
    let registry = CasinoRegistry::default();

    let mut ghost = create_new_report(&registry, None);
    ghost.id = Some(77);
    assert!(matches!(
        store.save_report(&ghost),
        Err(ReportError::NotFound(_))
    ));
    assert!(matches!(
        store.delete_report(77),
        Err(ReportError::NotFound(_))
    ));
}

// =============== HTTP 存储 ===============

struct RecordedRequest {
    method: String,
    path: String,
    authorization: Option<String>,
    body: String,
}

/// One-shot HTTP server answering a single request
fn serve_once(status: u16, body: &'static str) -> (String, mpsc::Receiver<RecordedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());

        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();
        let mut parts = request_line.split_whitespace();
        let method = parts.next().unwrap_or_default().to_string();
        let path = parts.next().unwrap_or_default().to_string();

        let mut content_length = 0;
        let mut authorization = None;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            let line = line.trim_end();
            if line.is_empty() {
                break;
            }
            if let Some((name, value)) = line.split_once(':') {
                match name.trim().to_ascii_lowercase().as_str() {
                    "content-length" => content_length = value.trim().parse().unwrap_or(0),
                    "authorization" => authorization = Some(value.trim().to_string()),
                    _ => {}
                }
            }
        }
        let mut request_body = vec![0; content_length];
        reader.read_exact(&mut request_body).unwrap();

        tx.send(RecordedRequest {
            method,
            path,
            authorization,
            body: String::from_utf8_lossy(&request_body).to_string(),
        })
        .unwrap();

        let mut stream = stream;
        let response = format!(
            "HTTP/1.1 {} Test\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).unwrap();
    });

    (base_url, rx)
}

const STORED_REPORT: &str = r#"{"id":5,"template_id":1,"template_name":"Rapport Performances Mensuelles","month":"mai","year":2024,"created_at":"2024-05-31T12:00:00Z","data":{"AZUR_TOTAL_DEPOSIT":"100.00"}}"#;

#[test]
fn test_http_fetch_sends_bearer_token() {
    let (base_url, requests) = serve_once(200, "[]");
    let store = HttpReportStore::new(&base_url, Some("secret".to_string()), 5).unwrap();

    assert!(store.fetch_reports().unwrap().is_empty());

    let request = requests.recv().unwrap();
    assert_eq!(request.method, "GET");
    assert_eq!(request.path, "/api/casino-reports");
    assert_eq!(request.authorization.as_deref(), Some("Bearer secret"));
}

#[test]
fn test_http_create_posts_report() {
    let (base_url, requests) = serve_once(201, STORED_REPORT);
    let store = HttpReportStore::new(&base_url, None, 5).unwrap();
    let registry = CasinoRegistry::new(vec!["AZUR".to_string()]);

    let mut report = CasinoReport::blank(&registry, "mai", 2024, None);
    report.template_id = 0;
    let saved = store.save_report(&report).unwrap();
    assert_eq!(saved.id, Some(5));

    let request = requests.recv().unwrap();
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/api/casino-reports");
    assert!(request.authorization.is_none());
    let sent: serde_json::Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(sent["template_id"], DEFAULT_TEMPLATE_ID);
    assert!(sent.get("id").is_none());
}

#[test]
fn test_http_update_puts_to_item_url() {
    let (base_url, requests) = serve_once(200, STORED_REPORT);
    let store = HttpReportStore::new(&base_url, None, 5).unwrap();
    let mut report: CasinoReport = serde_json::from_str(STORED_REPORT).unwrap();
    report
        .data
        .insert("AZUR_NGR".to_string(), "3.00".to_string());

    store.save_report(&report).unwrap();

    let request = requests.recv().unwrap();
    assert_eq!(request.method, "PUT");
    assert_eq!(request.path, "/api/casino-reports/5");
}

#[test]
fn test_http_error_body_is_surfaced() {
    let (base_url, _requests) = serve_once(500, r#"{"error":"Database unavailable"}"#);
    let store = HttpReportStore::new(&base_url, None, 5).unwrap();

    match store.fetch_reports() {
        Err(ReportError::Server { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "Database unavailable");
        }
        other => panic!("Expected server error, got: {:?}", other),
    }
}

#[test]
fn test_http_error_without_body_uses_generic_message() {
    let (base_url, _requests) = serve_once(400, "");
    let store = HttpReportStore::new(&base_url, None, 5).unwrap();

    match store.delete_report(9) {
        Err(ReportError::Server { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "Failed to delete report");
        }
        other => panic!("Expected server error, got: {:?}", other),
    }
}

#[test]
fn test_http_missing_report_is_not_found() {
    let (base_url, _requests) = serve_once(404, r#"{"error":"Report not found"}"#);
    let store = HttpReportStore::new(&base_url, None, 5).unwrap();
    assert!(matches!(
        store.get_report(42),
        Err(ReportError::NotFound(_))
    ));
}
