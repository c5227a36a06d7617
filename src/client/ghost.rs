//! Ghost Inspector API client implementation

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Client as HttpClient, Method, Response};
use serde::Deserialize;
use serde_json::Value;
use tokio_util::io::ReaderStream;

use super::outcome::overall_outcome;
use super::params::Params;
use crate::error::{ApiError, Result};

/// Ghost Inspector API host
const API_HOST: &str = "https://api.ghostinspector.com";

/// Versioned path prefix appended to the host
const API_PREFIX: &str = "/v1";

/// User agent sent with every request
const USER_AGENT: &str = concat!("ghostop/", env!("CARGO_PKG_VERSION"));

/// Request timeout. Executions run remotely and may take up to an hour;
/// the client waits rather than polling.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(3600);

/// Reserved POST parameter holding a local file path to upload
const DATA_FILE_PARAM: &str = "dataFile";

/// JSON envelope wrapped around every non-download response
#[derive(Debug, Deserialize)]
struct Envelope {
    code: Option<String>,
    message: Option<String>,
    data: Option<Value>,
}

/// Ghost Inspector API client.
///
/// Holds immutable per-instance configuration; one instance may serve any
/// number of concurrent calls. All payloads are returned as raw
/// [`serde_json::Value`]s; the client does not model the remote schema
/// beyond the optional `passing` flag on results.
#[derive(Debug)]
pub struct GhostInspectorClient {
    http: HttpClient,
    base_url: String,
    api_key: String,
}

impl GhostInspectorClient {
    /// Create a client against the production API.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_host(api_key, None)
    }

    /// Create a client with an alternate API host (self-hosted gateways,
    /// test servers). The versioned path prefix is appended to the host.
    pub fn with_host(api_key: impl Into<String>, host: Option<String>) -> Result<Self> {
        let http = HttpClient::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let host = host.unwrap_or_else(|| API_HOST.to_string());

        Ok(Self {
            http,
            base_url: format!("{}{}", host.trim_end_matches('/'), API_PREFIX),
            api_key: api_key.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Merge the API key into a parameter set, overriding any
    /// caller-supplied `apiKey`.
    fn authed(&self, mut params: Params) -> Params {
        params.insert("apiKey", self.api_key.clone());
        params
    }

    /// Send one request and unwrap the JSON envelope.
    ///
    /// GET parameters travel in the query string; POST parameters as
    /// multipart form fields, with the reserved `dataFile` parameter
    /// replaced by a stream of the named file's contents.
    async fn request(&self, method: Method, path: &str, params: Params) -> Result<Value> {
        let params = self.authed(params);
        // the query string carries the API key; log the path only
        log::debug!("{} {}", method, path);

        let response = if method == Method::POST {
            let form = build_form(&params).await?;
            self.http
                .post(self.url(path))
                .multipart(form)
                .send()
                .await
                .map_err(ApiError::from)?
        } else {
            let url = format!("{}{}", self.url(path), params.query_string());
            self.http
                .request(method, url)
                .send()
                .await
                .map_err(ApiError::from)?
        };

        unwrap_envelope(response).await
    }

    /// Fetch a raw artifact and write it to `dest`, overwriting any
    /// existing file. Returns the artifact bytes. Nothing is written when
    /// the fetch fails.
    async fn download(&self, path: &str, dest: &Path) -> Result<Vec<u8>> {
        let params = self.authed(Params::new());
        let url = format!("{}{}", self.url(path), params.query_string());
        log::debug!("GET {}", path);

        let response = self.http.get(url).send().await.map_err(ApiError::from)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Http(status).into());
        }

        let bytes = response.bytes().await.map_err(ApiError::from)?;
        tokio::fs::write(dest, &bytes).await?;
        Ok(bytes.to_vec())
    }

    /// POST to an execute endpoint and derive the overall verdict from
    /// the returned result(s).
    async fn execute(&self, path: &str, options: Params) -> Result<(Value, Option<bool>)> {
        let data = self.request(Method::POST, path, options).await?;
        let passing = overall_outcome(&data);
        Ok((data, passing))
    }

    // ------------------------------------------------------------------
    // Suites
    // ------------------------------------------------------------------

    /// List all suites in the account.
    pub async fn get_suites(&self) -> Result<Value> {
        self.request(Method::GET, "/suites/", Params::new()).await
    }

    /// Fetch a single suite.
    pub async fn get_suite(&self, suite_id: &str) -> Result<Value> {
        self.request(Method::GET, &format!("/suites/{suite_id}/"), Params::new())
            .await
    }

    /// List the tests in a suite.
    pub async fn get_suite_tests(&self, suite_id: &str) -> Result<Value> {
        self.request(
            Method::GET,
            &format!("/suites/{suite_id}/tests/"),
            Params::new(),
        )
        .await
    }

    /// List results for a suite. `options` pass through as query
    /// parameters (filters, count, offset).
    pub async fn get_suite_results(&self, suite_id: &str, options: Params) -> Result<Value> {
        self.request(
            Method::GET,
            &format!("/suites/{suite_id}/results/"),
            options,
        )
        .await
    }

    /// Execute a suite and reduce the returned results to an overall
    /// verdict.
    pub async fn execute_suite(
        &self,
        suite_id: &str,
        options: Params,
    ) -> Result<(Value, Option<bool>)> {
        self.execute(&format!("/suites/{suite_id}/execute/"), options)
            .await
    }

    /// Update suite attributes. Each entry in `attributes` becomes one
    /// form field.
    pub async fn update_suite(&self, suite_id: &str, attributes: Params) -> Result<Value> {
        self.request(Method::POST, &format!("/suites/{suite_id}/"), attributes)
            .await
    }

    /// Download a suite as Selenium-compatible HTML.
    pub async fn download_suite_selenium_html(&self, suite_id: &str, dest: &Path) -> Result<Vec<u8>> {
        self.download(&format!("/suites/{suite_id}/export/selenium-html/"), dest)
            .await
    }

    /// Download a suite as Selenium JSON.
    pub async fn download_suite_selenium_json(&self, suite_id: &str, dest: &Path) -> Result<Vec<u8>> {
        self.download(&format!("/suites/{suite_id}/export/selenium-json/"), dest)
            .await
    }

    /// Download a suite in Selenium IDE "side" format.
    pub async fn download_suite_selenium_side(&self, suite_id: &str, dest: &Path) -> Result<Vec<u8>> {
        self.download(&format!("/suites/{suite_id}/export/selenium-side/"), dest)
            .await
    }

    // ------------------------------------------------------------------
    // Tests
    // ------------------------------------------------------------------

    /// List all tests in the account.
    pub async fn get_tests(&self) -> Result<Value> {
        self.request(Method::GET, "/tests/", Params::new()).await
    }

    /// Fetch a single test.
    pub async fn get_test(&self, test_id: &str) -> Result<Value> {
        self.request(Method::GET, &format!("/tests/{test_id}/"), Params::new())
            .await
    }

    /// List results for a test. `options` pass through as query
    /// parameters.
    pub async fn get_test_results(&self, test_id: &str, options: Params) -> Result<Value> {
        self.request(Method::GET, &format!("/tests/{test_id}/results/"), options)
            .await
    }

    /// Execute a test and reduce the returned result(s) to an overall
    /// verdict.
    pub async fn execute_test(
        &self,
        test_id: &str,
        options: Params,
    ) -> Result<(Value, Option<bool>)> {
        self.execute(&format!("/tests/{test_id}/execute/"), options)
            .await
    }

    /// Execute an on-demand test definition against an organization. The
    /// definition is posted as the JSON request body; `wait` controls
    /// whether the service holds the response until the run completes.
    pub async fn execute_test_on_demand(
        &self,
        organization_id: &str,
        test: &Value,
        wait: bool,
    ) -> Result<Value> {
        let params = self.authed(Params::new().with("wait", wait));
        let path = format!("/organizations/{organization_id}/on-demand/execute/");
        let url = format!("{}{}", self.url(&path), params.query_string());
        log::debug!("POST {}", path);

        let response = self
            .http
            .post(url)
            .json(test)
            .send()
            .await
            .map_err(ApiError::from)?;

        unwrap_envelope(response).await
    }

    /// Download a test as Selenium-compatible HTML.
    pub async fn download_test_selenium_html(&self, test_id: &str, dest: &Path) -> Result<Vec<u8>> {
        self.download(&format!("/tests/{test_id}/export/selenium-html/"), dest)
            .await
    }

    /// Download a test as Selenium JSON.
    pub async fn download_test_selenium_json(&self, test_id: &str, dest: &Path) -> Result<Vec<u8>> {
        self.download(&format!("/tests/{test_id}/export/selenium-json/"), dest)
            .await
    }

    /// Download a test in Selenium IDE "side" format.
    pub async fn download_test_selenium_side(&self, test_id: &str, dest: &Path) -> Result<Vec<u8>> {
        self.download(&format!("/tests/{test_id}/export/selenium-side/"), dest)
            .await
    }

    // ------------------------------------------------------------------
    // Folders
    // ------------------------------------------------------------------

    /// Rename a folder.
    pub async fn update_folder(&self, folder_id: &str, name: &str) -> Result<Value> {
        self.request(
            Method::POST,
            &format!("/folders/{folder_id}/"),
            Params::new().with("name", name),
        )
        .await
    }

    // ------------------------------------------------------------------
    // Results
    // ------------------------------------------------------------------

    /// Fetch a suite result.
    pub async fn get_suite_result(&self, result_id: &str) -> Result<Value> {
        self.request(
            Method::GET,
            &format!("/suite-results/{result_id}/"),
            Params::new(),
        )
        .await
    }

    /// List the test results belonging to a suite result.
    pub async fn get_suite_result_test_results(&self, result_id: &str) -> Result<Value> {
        self.request(
            Method::GET,
            &format!("/suite-results/{result_id}/results/"),
            Params::new(),
        )
        .await
    }

    /// Cancel a running suite result. The remote contract uses GET for
    /// cancellation; preserved as-is.
    pub async fn cancel_suite_result(&self, result_id: &str) -> Result<Value> {
        self.request(
            Method::GET,
            &format!("/suite-results/{result_id}/cancel/"),
            Params::new(),
        )
        .await
    }

    /// Fetch a test result.
    pub async fn get_test_result(&self, result_id: &str) -> Result<Value> {
        self.request(Method::GET, &format!("/results/{result_id}/"), Params::new())
            .await
    }

    /// Cancel a running test result. GET per the remote contract.
    pub async fn cancel_test_result(&self, result_id: &str) -> Result<Value> {
        self.request(
            Method::GET,
            &format!("/results/{result_id}/cancel/"),
            Params::new(),
        )
        .await
    }

    /// Legacy alias for [`get_test_result`](Self::get_test_result).
    #[deprecated(note = "use `get_test_result`")]
    pub async fn get_result(&self, result_id: &str) -> Result<Value> {
        self.get_test_result(result_id).await
    }

    /// Legacy alias for [`cancel_test_result`](Self::cancel_test_result).
    #[deprecated(note = "use `cancel_test_result`")]
    pub async fn cancel_result(&self, result_id: &str) -> Result<Value> {
        self.cancel_test_result(result_id).await
    }
}

/// Build the multipart form for a POST. The reserved `dataFile` parameter
/// is opened as a file and streamed; everything else is stringified.
async fn build_form(params: &Params) -> Result<Form> {
    let mut form = Form::new();
    for (key, value) in params.iter() {
        if key == DATA_FILE_PARAM {
            let path = PathBuf::from(value.scalar_lossy());
            let file = tokio::fs::File::open(&path).await?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| DATA_FILE_PARAM.to_string());
            let part = Part::stream(reqwest::Body::wrap_stream(ReaderStream::new(file)))
                .file_name(file_name);
            form = form.part(DATA_FILE_PARAM.to_string(), part);
        } else {
            let mut fields = Vec::new();
            value.flatten_into(key, &mut fields);
            for (name, text) in fields {
                form = form.text(name, text);
            }
        }
    }
    Ok(form)
}

/// Interpret a completed exchange as the service's JSON envelope.
///
/// An ERROR envelope wins over the HTTP status, so a non-2xx response
/// whose body carries `code: "ERROR"` still surfaces the remote message.
/// A non-2xx response without one is a transport error.
async fn unwrap_envelope(response: Response) -> Result<Value> {
    let status = response.status();
    let body = response.text().await.map_err(ApiError::from)?;

    if let Ok(envelope) = serde_json::from_str::<Envelope>(&body) {
        if envelope.code.as_deref() == Some("ERROR") {
            return Err(ApiError::Service(envelope.message.unwrap_or_default()).into());
        }
        if status.is_success() {
            return Ok(envelope.data.unwrap_or(Value::Null));
        }
    }

    if !status.is_success() {
        return Err(ApiError::Http(status).into());
    }

    let preview: String = body.chars().take(200).collect();
    Err(ApiError::InvalidResponse(format!("not a JSON envelope: {preview}")).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = GhostInspectorClient::new("test-key");
        assert!(client.is_ok());
    }

    #[test]
    fn test_default_base_url_carries_prefix() {
        let client = GhostInspectorClient::new("test-key").unwrap();
        assert_eq!(
            client.url("/suites/"),
            "https://api.ghostinspector.com/v1/suites/"
        );
    }

    #[test]
    fn test_with_host_override_trims_trailing_slash() {
        let client =
            GhostInspectorClient::with_host("test-key", Some("http://localhost:1234/".to_string()))
                .unwrap();
        assert_eq!(client.url("/tests/"), "http://localhost:1234/v1/tests/");
    }

    #[test]
    fn test_authed_overrides_caller_api_key() {
        let client = GhostInspectorClient::new("real-key").unwrap();
        let params = client.authed(Params::new().with("apiKey", "spoofed"));
        assert_eq!(params.query_string(), "?apiKey=real-key&");
    }

    #[test]
    fn test_authed_preserves_caller_params() {
        let client = GhostInspectorClient::new("key").unwrap();
        let params = client.authed(Params::new().with("count", 5i64));
        assert_eq!(params.query_string(), "?count=5&apiKey=key&");
    }

    #[tokio::test]
    async fn test_build_form_missing_data_file_is_io_error() {
        let params = Params::new().with(DATA_FILE_PARAM, "/no/such/file.csv");
        let err = build_form(&params).await.unwrap_err();
        assert!(matches!(err, crate::error::Error::Io(_)));
    }
}
