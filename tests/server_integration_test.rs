//! Server integration tests that test the actual server behavior.
//!
//! These tests start a real TCP server and talk raw HTTP to it.

use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use brickmosaic::assets::AssetLoader;
use brickmosaic::server::{build_router, create_app_state};

/// Start a test server on an available port and return the port number.
async fn start_test_server() -> u16 {
    let asset_loader = Arc::new(AssetLoader::new(None, None, None));
    let state = create_app_state(asset_loader).expect("Failed to create app state");
    let app = build_router(state);

    // Bind to port 0 to get an available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    // Give the server a moment to start
    tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

    port
}

/// Send one request with `Connection: close` and read the whole response.
async fn roundtrip(port: u16, head: &str, body: &[u8]) -> Vec<u8> {
    let mut stream = TcpStream::connect(format!("127.0.0.1:{}", port))
        .await
        .expect("Failed to connect");

    stream
        .write_all(head.as_bytes())
        .await
        .expect("Failed to write request");
    stream.write_all(body).await.expect("Failed to write body");

    let mut response = Vec::new();
    tokio::time::timeout(
        tokio::time::Duration::from_secs(30),
        stream.read_to_end(&mut response),
    )
    .await
    .expect("Timed out waiting for response")
    .expect("Failed to read response");
    response
}

#[tokio::test]
async fn test_health_over_tcp() {
    let port = start_test_server().await;

    let response = roundtrip(
        port,
        "GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
        b"",
    )
    .await;
    let text = String::from_utf8_lossy(&response);
    assert!(text.starts_with("HTTP/1.1 200"), "got: {text}");
    assert!(text.ends_with("OK"));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let port = start_test_server().await;

    let response = roundtrip(
        port,
        "GET /api/nothing-here HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
        b"",
    )
    .await;
    let text = String::from_utf8_lossy(&response);
    assert!(text.starts_with("HTTP/1.1 404"), "got: {text}");
}

#[tokio::test]
async fn test_upload_over_tcp() {
    let port = start_test_server().await;

    let mut png = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
        20,
        20,
        image::Rgb([255, 255, 255]),
    ))
    .write_to(&mut png, image::ImageFormat::Png)
    .unwrap();
    let png = png.into_inner();

    let head = format!(
        "POST /api/mosaic/shopping-list?size=16 HTTP/1.1\r\nHost: localhost\r\n\
         Content-Type: image/png\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        png.len()
    );
    let response = roundtrip(port, &head, &png).await;
    let text = String::from_utf8_lossy(&response);
    assert!(text.starts_with("HTTP/1.1 200"), "got: {text}");
    assert!(text.contains("text/csv"));
    assert!(text.ends_with("Color Name,Quantity\nWhite,256\n"), "got: {text}");
}
