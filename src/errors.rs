use std::{
    error::Error,
    fmt::{Display, Formatter},
};

pub type UrlParseResult<T> = Result<T, UrlParseError>;

#[derive(Debug)]
pub enum UrlParseError {
    NotHttps,
    CannotBeABase,
    HasQueryOrFragment,
    Parser(url::ParseError),
}

impl Error for UrlParseError {}

impl Display for UrlParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            UrlParseError::NotHttps => {
                write!(f, "The URL protocol should be https (http is only allowed for loopback hosts).")
            }
            UrlParseError::CannotBeABase => write!(f, "The URL cannot be used as a base URL."),
            UrlParseError::HasQueryOrFragment => {
                write!(f, "The base URL must not carry a query string or fragment.")
            }
            UrlParseError::Parser(e) => write!(f, "Error while parsing the URL: {}", e),
        }
    }
}

pub type RequestResult<T> = Result<T, RequestError>;

#[derive(Debug)]
pub enum RequestError {
    InvalidHeader(&'static str),
    InvalidUrl(url::ParseError),
}

impl Error for RequestError {}

impl Display for RequestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestError::InvalidHeader(name) => write!(f, "Invalid value for header {}", name),
            RequestError::InvalidUrl(e) => write!(f, "Invalid request URL: {}", e),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum CredentialsError {
    MissingId,
    MissingSecret,
}

impl Error for CredentialsError {}

impl Display for CredentialsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialsError::MissingId => write!(f, "Client ID is missing."),
            CredentialsError::MissingSecret => write!(f, "Client secret is missing."),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum EndpointError {
    EmptyIdentifier(&'static str),
    EmptySearchText,
    LimitOutOfRange(u32),
}

impl Error for EndpointError {}

impl Display for EndpointError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            EndpointError::EmptyIdentifier(name) => write!(f, "{} must not be empty", name),
            EndpointError::EmptySearchText => write!(f, "Search text must not be empty"),
            EndpointError::LimitOutOfRange(limit) => {
                write!(f, "Results limit {} is outside 1..=1000", limit)
            }
        }
    }
}
