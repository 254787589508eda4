//! Upload transport — one fire-and-forget HTTP POST.
//!
//! The domain sees only [`UploadTransport`]; the ESP-IDF implementation
//! wraps `embedded-svc`'s HTTP client over `EspHttpConnection`.  On other
//! targets a recording stub stands in so the full upload path is testable
//! on the host.
//!
//! The response body is read and discarded — the device ignores whatever
//! the server has to say beyond the status line.

use crate::error::CommsError;

/// Transport boundary for the upload task.
pub trait UploadTransport {
    /// POST `body` as JSON to `url`.  Returns the HTTP status code; the
    /// response body is consumed and dropped.
    fn post_json(&mut self, url: &str, body: &[u8]) -> Result<u16, CommsError>;
}

// ───────────────────────────────────────────────────────────────
// ESP-IDF implementation
// ───────────────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub use esp_impl::EspHttpTransport;

#[cfg(target_os = "espidf")]
mod esp_impl {
    use embedded_svc::http::client::Client as HttpClient;
    use embedded_svc::http::Method;
    use embedded_svc::io::Write;
    use embedded_svc::utils::io;
    use esp_idf_svc::http::client::EspHttpConnection;
    use log::{debug, warn};

    use super::UploadTransport;
    use crate::error::CommsError;

    pub struct EspHttpTransport {
        client: HttpClient<EspHttpConnection>,
    }

    impl EspHttpTransport {
        pub fn new() -> anyhow::Result<Self> {
            let connection = EspHttpConnection::new(&Default::default())?;
            Ok(Self {
                client: HttpClient::wrap(connection),
            })
        }
    }

    impl UploadTransport for EspHttpTransport {
        fn post_json(&mut self, url: &str, body: &[u8]) -> Result<u16, CommsError> {
            let content_length = body.len().to_string();
            let headers = [
                ("Content-Type", "application/json"),
                ("Content-Length", content_length.as_str()),
            ];

            let mut request = self
                .client
                .request(Method::Post, url, &headers)
                .map_err(|e| {
                    warn!("Upload: request setup failed — {}", e);
                    CommsError::TransportFailed
                })?;
            request.write_all(body).map_err(|e| {
                warn!("Upload: body write failed — {}", e);
                CommsError::TransportFailed
            })?;

            let mut response = request.submit().map_err(|e| {
                warn!("Upload: submit failed — {}", e);
                CommsError::TransportFailed
            })?;
            let status = response.status();

            // Drain whatever the server sent back; content is ignored.
            let mut buf = [0u8; 256];
            match io::try_read_full(&mut response, &mut buf) {
                Ok(n) => debug!("Upload: response drained ({} bytes)", n),
                Err(_) => debug!("Upload: response drain incomplete"),
            }

            Ok(status)
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Host simulation
// ───────────────────────────────────────────────────────────────

/// Recording transport for host-side tests: captures every POST and
/// returns a configurable result.
#[cfg(not(target_os = "espidf"))]
pub struct SimTransport {
    pub posts: Vec<(String, Vec<u8>)>,
    pub fail: bool,
    pub status: u16,
}

#[cfg(not(target_os = "espidf"))]
impl SimTransport {
    pub fn new() -> Self {
        Self {
            posts: Vec::new(),
            fail: false,
            status: 200,
        }
    }
}

#[cfg(not(target_os = "espidf"))]
impl Default for SimTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_os = "espidf"))]
impl UploadTransport for SimTransport {
    fn post_json(&mut self, url: &str, body: &[u8]) -> Result<u16, CommsError> {
        if self.fail {
            return Err(CommsError::TransportFailed);
        }
        self.posts.push((url.to_string(), body.to_vec()));
        Ok(self.status)
    }
}
