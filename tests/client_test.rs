//! HTTPクライアントテスト
//!
//! ローカルの簡易HTTPサーバーに対してリクエスト・レスポンス処理を検証

use foodscan::client::ApiClient;
use foodscan::error::FoodScanError;
use foodscan_common::api::Endpoints;
use foodscan_common::MacrosResponse;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

const PNG_HEADER: [u8; 16] = [
    0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0x0D, b'I', b'H', b'D', b'R',
];

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn content_length(head: &str) -> Option<usize> {
    head.lines().find_map(|line| {
        let (name, value) = line.split_once(':')?;
        if name.trim().eq_ignore_ascii_case("content-length") {
            value.trim().parse().ok()
        } else {
            None
        }
    })
}

/// 1リクエストだけ応答するサーバー。受信したリクエスト全体を返す
async fn serve_once(status: u16, body: &'static str, delay: Duration) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind失敗");
    let addr = listener.local_addr().expect("アドレス取得失敗");

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept失敗");
        let mut request = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = socket.read(&mut buf).await.expect("read失敗");
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
            if let Some(end) = find(&request, b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&request[..end]).to_string();
                let body_len = request.len() - (end + 4);
                match content_length(&head) {
                    Some(len) if body_len >= len => break,
                    Some(_) => continue,
                    None if find(&request[end..], b"0\r\n\r\n").is_some() => break,
                    None if !head.to_ascii_lowercase().contains("transfer-encoding") => break,
                    None => continue,
                }
            }
        }

        tokio::time::sleep(delay).await;
        let response = format!(
            "HTTP/1.1 {} OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        let _ = socket.write_all(response.as_bytes()).await;
        let _ = socket.shutdown().await;
        String::from_utf8_lossy(&request).to_string()
    });

    (format!("http://{}", addr), handle)
}

fn client_for(base: &str, timeout_seconds: u64) -> ApiClient {
    let endpoints = Endpoints {
        macros_url: format!("{}/macros", base),
        chat_url: format!("{}/chat", base),
    };
    ApiClient::new(endpoints, timeout_seconds).expect("クライアント作成失敗")
}

#[tokio::test]
async fn test_analyze_sends_image_field() {
    let body = r#"{"food":"Apple","quantity":{"value":2,"unit":"pcs","weight_g":100},"macros_per_unit":{"calories":52}}"#;
    let (base, server) = serve_once(200, body, Duration::ZERO).await;
    let client = client_for(&base, 5);

    let response = client
        .analyze_bytes(PNG_HEADER.to_vec(), "apple.png")
        .await
        .expect("解析失敗");
    assert!(matches!(response, MacrosResponse::Estimate(ref e) if e.food == "Apple"));

    let request = server.await.expect("サーバー異常終了");
    assert!(request.starts_with("POST /macros"));
    assert!(request.contains("name=\"image\""));
    assert!(request.contains("filename=\"apple.png\""));
    assert!(request.contains("image/png"));
}

#[tokio::test]
async fn test_analyze_no_food() {
    let body = r#"{"no_food":true,"message":"Image unclear, please retake."}"#;
    let (base, server) = serve_once(200, body, Duration::ZERO).await;
    let client = client_for(&base, 5);

    let response = client
        .analyze_bytes(PNG_HEADER.to_vec(), "blurry.png")
        .await
        .expect("解析失敗");
    assert_eq!(
        response,
        MacrosResponse::NoFood {
            message: "Image unclear, please retake.".to_string()
        }
    );
    server.await.expect("サーバー異常終了");
}

#[tokio::test]
async fn test_chat_round_trip() {
    let (base, server) = serve_once(200, r#"{"reply":"About 25g."}"#, Duration::ZERO).await;
    let client = client_for(&base, 5);

    let response = client.chat("protein in 4 eggs?").await.expect("チャット失敗");
    assert_eq!(response.reply.as_deref(), Some("About 25g."));

    let request = server.await.expect("サーバー異常終了");
    assert!(request.starts_with("POST /chat"));
    assert!(request.contains(r#"{"message":"protein in 4 eggs?"}"#));
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let (base, server) = serve_once(502, r#"{"error":"bad gateway"}"#, Duration::ZERO).await;
    let client = client_for(&base, 5);

    let err = client.chat("hello").await.unwrap_err();
    assert!(matches!(err, FoodScanError::ApiStatus { status: 502, .. }));
    assert_eq!(err.short_message(), "HTTP 502");
    server.await.expect("サーバー異常終了");
}

#[tokio::test]
async fn test_malformed_json_is_reported() {
    let (base, server) = serve_once(200, "not json", Duration::ZERO).await;
    let client = client_for(&base, 5);

    let err = client
        .analyze_bytes(PNG_HEADER.to_vec(), "x.png")
        .await
        .unwrap_err();
    assert_eq!(err.short_message(), "malformed response");
    server.await.expect("サーバー異常終了");
}

#[tokio::test]
async fn test_timeout() {
    let (base, _server) = serve_once(200, r#"{"reply":"late"}"#, Duration::from_secs(3)).await;
    let client = client_for(&base, 1);

    let err = client.chat("hello").await.unwrap_err();
    assert!(matches!(err, FoodScanError::Timeout(1)));
}

#[tokio::test]
async fn test_missing_file() {
    let client = client_for("http://127.0.0.1:9", 1);
    let err = client
        .analyze_image(std::path::Path::new("/nonexistent/meal.jpg"))
        .await
        .unwrap_err();
    assert!(matches!(err, FoodScanError::FileNotFound(_)));
}

#[tokio::test]
async fn test_unknown_image_format_is_rejected_before_upload() {
    let client = client_for("http://127.0.0.1:9", 1);
    let err = client
        .analyze_bytes(b"definitely not an image".to_vec(), "notes.txt")
        .await
        .unwrap_err();
    assert!(matches!(err, FoodScanError::ImageLoad(_)));
}
