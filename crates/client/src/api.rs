use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response, Url};
use serde_json::Value;

use models::RecordCollection;

use crate::errors::ClientError;

/// Thin HTTP client for `/getter`, `/putter` and `/purger/:key`.
#[derive(Clone, Debug)]
pub struct RecordClient {
    http: Client,
    base_url: String,
}

fn check(method: &'static str, path: String, res: Response) -> Result<Response, ClientError> {
    if res.status().is_success() {
        Ok(res)
    } else {
        Err(ClientError::Status { method, path, status: res.status() })
    }
}

impl RecordClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Base URL with `segments` appended, each one percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(format!("{} cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Fetch the whole document as untyped JSON.
    pub async fn fetch(&self) -> Result<Value, ClientError> {
        let path = "/getter".to_string();
        let res = self.http.get(format!("{}{}", self.base_url, path)).send().await?;
        Ok(check("GET", path, res)?.json::<Value>().await?)
    }

    /// Fetch the document as a record collection.
    pub async fn fetch_collection(&self) -> Result<RecordCollection, ClientError> {
        Ok(RecordCollection::from_value(self.fetch().await?)?)
    }

    /// Submit records for merging. Sent as `text/plain`, the way a browser
    /// `fetch` with a string body sends it.
    pub async fn put(&self, records: &RecordCollection) -> Result<(), ClientError> {
        let path = "/putter".to_string();
        let body = records.to_vec()?;
        let res = self
            .http
            .put(format!("{}{}", self.base_url, path))
            .header(CONTENT_TYPE, "text/plain;charset=UTF-8")
            .body(body)
            .send()
            .await?;
        check("PUT", path, res)?;
        Ok(())
    }

    /// Delete `key`. The key travels as one path segment, so `?`, `#` and
    /// `/` inside it are encoded rather than reshaping the request.
    pub async fn purge(&self, key: &str) -> Result<(), ClientError> {
        let url = self.endpoint(&["purger", key])?;
        let path = url.path().to_string();
        let res = self.http.post(url).send().await?;
        check("POST", path, res)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let c = RecordClient::new("http://127.0.0.1:42000/");
        assert_eq!(c.base_url(), "http://127.0.0.1:42000");
    }

    #[test]
    fn purge_key_is_one_encoded_segment() {
        let c = RecordClient::new("http://127.0.0.1:42000/store");
        let url = c.endpoint(&["purger", "a?b#c/d"]).expect("url");
        assert_eq!(url.path(), "/store/purger/a%3Fb%23c%2Fd");
        assert!(url.query().is_none());
        assert!(url.fragment().is_none());
    }

    #[test]
    fn unusable_base_url_is_an_error() {
        let c = RecordClient::new("not a url");
        assert!(matches!(c.endpoint(&["purger", "x"]), Err(ClientError::InvalidUrl(_))));
    }
}
