use std::sync::{Arc, Mutex};

use azan_clock::prayer_times::Fetcher;
use reqwest::Url;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Requests seen by a [`serve`] listener, as raw header text.
pub type Requests = Arc<Mutex<Vec<String>>>;

/// Answer every connection on a local port with the same HTTP response.
pub async fn serve(status_line: &'static str, body: &'static str) -> (Url, Requests) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests: Requests = Arc::default();
    let seen = requests.clone();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let seen = seen.clone();
            tokio::spawn(async move {
                let mut raw = Vec::new();
                let mut buf = [0u8; 1024];
                while !raw.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => raw.extend_from_slice(&buf[..n]),
                    }
                }
                seen.lock().unwrap().push(String::from_utf8_lossy(&raw).into_owned());

                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status_line,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    let url = Url::parse(&format!("http://{}/azan_time", addr)).unwrap();
    (url, requests)
}

/// A fetcher that ignores any proxy settings in the environment.
pub fn local_fetcher(endpoint: Url) -> Fetcher {
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    Fetcher::with_client(client, endpoint)
}
