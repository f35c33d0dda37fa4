use crate::constants::{ACCEPT_JSON, AUTH_SCHEME, FORM_CONTENT_TYPE, NO_CACHE, REDACTED_AUTH};
use crate::errors::{CredentialsError, RequestError, RequestResult};
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CACHE_CONTROL, CONTENT_TYPE,
};
use std::fmt::{Debug, Formatter};
use url::Url;

/// Client id and secret for the `SHAREDKEY` scheme. Lives only as long as
/// the process holds it.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    id: String,
    secret: String,
}

impl Credentials {
    /// ```rust
    /// use fdb_rs::Credentials;
    ///
    /// let credentials = Credentials::new("client", "secret").unwrap();
    /// assert_eq!(credentials.id(), "client");
    /// assert!(Credentials::new("", "secret").is_err());
    /// ```
    pub fn new(id: &str, secret: &str) -> Result<Self, CredentialsError> {
        let id = id.trim();
        let secret = secret.trim();

        if id.is_empty() {
            return Err(CredentialsError::MissingId);
        }
        if secret.is_empty() {
            return Err(CredentialsError::MissingSecret);
        }

        Ok(Self {
            id: id.to_string(),
            secret: secret.to_string(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    fn authorization(&self) -> String {
        format!("{} {}:{}", AUTH_SCHEME, self.id, self.secret)
    }
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("id", &self.id)
            .field("secret", &"[HIDDEN]")
            .finish()
    }
}

/// A fully built GET request, ready to send.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    pub url: Url,
    pub headers: HeaderMap,
}

impl PreparedRequest {
    pub(crate) fn new(url: &str, credentials: &Credentials) -> RequestResult<Self> {
        let url = Url::parse(url).map_err(RequestError::InvalidUrl)?;

        let mut headers = HeaderMap::new();
        let authorization = HeaderValue::from_str(&credentials.authorization())
            .map_err(|_| RequestError::InvalidHeader("Authorization"))?;
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_JSON));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static(NO_CACHE));

        Ok(Self { url, headers })
    }

    /// Headers as printable pairs with the authorization value masked.
    pub fn redacted_headers(&self) -> Vec<(String, String)> {
        self.headers
            .iter()
            .map(|(name, value)| {
                let value = if *name == AUTHORIZATION {
                    REDACTED_AUTH.to_string()
                } else {
                    value.to_str().unwrap_or_default().to_string()
                };
                (name.to_string(), value)
            })
            .collect()
    }
}
