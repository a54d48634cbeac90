use std::time::Duration;

use reqwest::{Client, Response};

use crate::error::{ReminderError, ReminderResult, Service};

pub fn build_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder().timeout(timeout).build()
}

/// Passes successful responses through, turns anything else into a
/// `ServiceUnreachable` carrying the status and body.
pub async fn ensure_success(service: Service, response: Response) -> ReminderResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    log::error!("{service} returned non-success status {status}. Body: {body}");

    Err(ReminderError::service_unreachable(
        service,
        format!("HTTP {status}: {body}"),
    ))
}

/// One-shot HTTP server answering every request with a fixed status and body.
#[cfg(test)]
pub(crate) mod stub_server {
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
    };

    /// Returns the `http://host:port` base url of the running stub.
    pub(crate) async fn respond_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            read_request(&mut socket).await;

            let response = format!(
                "HTTP/1.1 {status_line}\r\n\
                 content-type: application/json\r\n\
                 content-length: {}\r\n\
                 connection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        format!("http://{addr}")
    }

    // Drains headers and body so closing the socket does not reset the connection.
    async fn read_request(socket: &mut tokio::net::TcpStream) {
        let mut received = Vec::new();
        let mut chunk = [0u8; 1024];

        loop {
            let read = socket.read(&mut chunk).await.unwrap();
            if read == 0 {
                return;
            }
            received.extend_from_slice(&chunk[..read]);

            let Some(header_end) = received.windows(4).position(|w| w == b"\r\n\r\n") else {
                continue;
            };
            let headers = String::from_utf8_lossy(&received[..header_end]).to_ascii_lowercase();
            let content_length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(0);

            if received.len() >= header_end + 4 + content_length {
                return;
            }
        }
    }
}
