use std::time::Duration;

use log::warn;
use reqwest::Client;
use tokio::runtime::Runtime;

use crate::error::CombineError;

/// Retrieves the body of one source.
///
/// Implementations never fail: any transport or protocol error is logged and
/// yields an empty document, so one bad source cannot abort a run.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> String;
}

/// HTTP GET over `reqwest`, one request at a time on a current-thread runtime.
pub struct HttpFetcher {
    runtime: Runtime,
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, CombineError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(CombineError::Runtime)?;
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self { runtime, client })
    }

    async fn get_text(client: &Client, url: &str) -> Result<String, reqwest::Error> {
        let resp = client.get(url).send().await?.error_for_status()?;
        let bytes = resp.bytes().await?;
        Ok(decode_body(&bytes))
    }
}

/// Decodes a response body as UTF-8, replacing invalid sequences with U+FFFD.
pub fn decode_body(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> String {
        match self.runtime.block_on(Self::get_text(&self.client, url)) {
            Ok(text) => text,
            Err(e) => {
                warn!("failed to fetch {}: {}", url, e);
                String::new()
            }
        }
    }
}
