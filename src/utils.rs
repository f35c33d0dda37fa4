use crate::constants::CALL_ID_FORMAT;
use crate::errors::UrlParseResult;
use crate::UrlParseError;
use chrono::Local;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::{Host, Url};

/// Everything except ASCII alphanumerics and `-_.~`.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Query values additionally keep `/` unescaped.
const QUERY_VALUE: &AsciiSet = &PATH_SEGMENT.remove(b'/');

pub fn check_uri(uri: &str) -> UrlParseResult<Url> {
    let uri = match Url::parse(uri) {
        Ok(res) => res,
        Err(err) => return Err(UrlParseError::Parser(err)),
    };

    if uri.cannot_be_a_base() {
        return Err(UrlParseError::CannotBeABase);
    }

    if uri.query().is_some() || uri.fragment().is_some() {
        return Err(UrlParseError::HasQueryOrFragment);
    }

    match uri.scheme() {
        "https" => Ok(uri),
        "http" if is_loopback(&uri) => Ok(uri),
        _ => Err(UrlParseError::NotHttps),
    }
}

fn is_loopback(uri: &Url) -> bool {
    match uri.host() {
        Some(Host::Domain(domain)) => domain == "localhost",
        Some(Host::Ipv4(ip)) => ip.is_loopback(),
        Some(Host::Ipv6(ip)) => ip.is_loopback(),
        None => false,
    }
}

pub fn encode_query_value(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE).to_string()
}

pub fn encode_path_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

/// Timestamp-derived call correlation id, e.g. `20240131235959`.
pub fn call_id() -> String {
    Local::now().format(CALL_ID_FORMAT).to_string()
}
