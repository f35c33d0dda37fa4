use constants::BASE_URL;
use errors::{RequestResult, UrlParseResult};
use tracing::{debug, warn};
use url::Url;
use utils::{call_id, check_uri};

pub use endpoints::{
    ClassificationType, DoseConceptType, Endpoint, InteroperableType, RxNormConceptType,
    SearchType,
};
pub use errors::{CredentialsError, EndpointError, RequestError, UrlParseError};
pub use params::Params;
pub use presenter::{Presenter, View};
pub use request::{Credentials, PreparedRequest};
pub use response::{ConceptList, DrugList, ResponseShape, RxNormConcept};
pub use result::ApiResult;

pub mod constants;
mod endpoints;
mod errors;
mod params;
mod presenter;
mod request;
mod response;
mod result;
mod utils;

/// Handle on the FDB Cloud Connector API. Holds only the base URL; every
/// call is independent.
#[derive(Debug, Clone)]
pub struct Fdb {
    uri: Url,
    client: reqwest::Client,
}

impl Fdb {
    /// ```rust
    /// use fdb_rs::Fdb;
    ///
    /// let fdb = Fdb::new("https://api.fdbcloudconnector.com/CC/api/v1_4").unwrap();
    /// ```
    pub fn new(uri: &str) -> UrlParseResult<Self>
    where
        Self: Sized,
    {
        match check_uri(uri) {
            Ok(uri) => Ok(Self {
                uri,
                client: reqwest::Client::new(),
            }),
            Err(err) => Err(err),
        }
    }

    /// The public FDB Cloud Connector v1.4 endpoint.
    pub fn production() -> UrlParseResult<Self> {
        Self::new(BASE_URL)
    }

    /// ```rust
    /// use fdb_rs::Fdb;
    ///
    /// let fdb = Fdb::production().unwrap();
    /// assert_eq!(fdb.get_uri(), "https://api.fdbcloudconnector.com/CC/api/v1_4");
    /// ```
    pub fn get_uri(&self) -> String {
        self.uri.to_string()
    }

    /// `{base}/{endpoint}?{query}`. When the endpoint already carries a query
    /// the parameters are joined with `&`.
    fn build_url(&self, endpoint: &str, params: &Params) -> String {
        let base = self.uri.as_str().trim_end_matches('/');
        let endpoint = endpoint.trim_start_matches('/');
        let mut url = format!("{}/{}", base, endpoint);

        if !params.is_empty() {
            url.push(if url.contains('?') { '&' } else { '?' });
            url.push_str(&params.to_query_string());
        }

        url
    }

    /// Builds the GET request `dispatch` would send, without sending it.
    ///
    /// ```rust
    /// use fdb_rs::{Credentials, Fdb, Params};
    ///
    /// let fdb = Fdb::production().unwrap();
    /// let credentials = Credentials::new("id", "secret").unwrap();
    /// let params: Params = [("a", "x y"), ("b", "1")].into_iter().collect();
    /// let request = fdb.prepare("PrescribableDrugs", &credentials, params).unwrap();
    /// assert_eq!(
    ///     request.url.as_str(),
    ///     "https://api.fdbcloudconnector.com/CC/api/v1_4/PrescribableDrugs?a=x%20y&b=1&callSystemName=StreamlitTest"
    /// );
    /// ```
    pub fn prepare(
        &self,
        endpoint: &str,
        credentials: &Credentials,
        mut params: Params,
    ) -> RequestResult<PreparedRequest> {
        params.ensure_call_system_name();
        let url = self.build_url(endpoint, &params);

        PreparedRequest::new(&url, credentials)
    }

    /// Sends one GET and classifies the outcome. Never fails: transport and
    /// HTTP errors come back as [`ApiResult::Failure`].
    ///
    /// ```rust
    /// use fdb_rs::{ApiResult, Credentials, Fdb, Params};
    ///
    /// # async fn run() {
    /// let fdb = Fdb::production().unwrap();
    /// let credentials = Credentials::new("id", "secret").unwrap();
    /// let mut params = Params::new();
    /// params.search_text("aspirin").search_type("startswith").limit(10).offset(0);
    /// match fdb.dispatch("PrescribableDrugs", &credentials, params).await {
    ///     ApiResult::Success { body, .. } => println!("{}", body),
    ///     other => println!("{:?}", other),
    /// }
    /// # }
    /// ```
    pub async fn dispatch(
        &self,
        endpoint: &str,
        credentials: &Credentials,
        params: Params,
    ) -> ApiResult {
        let request = match self.prepare(endpoint, credentials, params) {
            Ok(request) => request,
            Err(err) => {
                warn!(error = %err, "could not build request");
                return ApiResult::transport(err);
            }
        };

        self.send(request).await
    }

    /// Runs one of the fixed endpoint templates with a fresh `callid`.
    pub async fn call(
        &self,
        endpoint: &Endpoint,
        credentials: &Credentials,
    ) -> Result<ApiResult, EndpointError> {
        let path = endpoint.path()?;
        let params = endpoint.params(&call_id())?;
        debug!(operation = endpoint.label(), "calling endpoint");

        Ok(self.dispatch(&path, credentials, params).await)
    }

    async fn send(&self, request: PreparedRequest) -> ApiResult {
        let url = request.url.to_string();
        debug!(%url, "making request");
        debug!(headers = ?request.redacted_headers(), "request headers");

        let response = match self
            .client
            .get(request.url)
            .headers(request.headers)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "request failed");
                return ApiResult::transport(err);
            }
        };

        let status = response.status();
        debug!(status = status.as_u16(), "response status");
        debug!(headers = ?response.headers(), "response headers");

        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                warn!(error = %err, "could not read response body");
                return ApiResult::Failure {
                    message: err.to_string(),
                    status: Some(status.as_u16()),
                    raw_body: None,
                };
            }
        };

        let result = ApiResult::classify(status, &body, &url);
        if let ApiResult::Failure { message, .. } = &result {
            warn!(%message, "request unsuccessful");
        }

        result
    }
}
