use crate::constants::{
    CALL_ID, CALL_SYSTEM_NAME, CALL_SYSTEM_NAME_VALUE, LIMIT, OFFSET, SEARCH_TEXT, SEARCH_TYPE,
};
use crate::utils::encode_query_value;
use itertools::Itertools;

/// Ordered query parameters. Keys are unique; re-adding a key replaces its
/// value without moving it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    pairs: Vec<(String, String)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters every call starts with: the fixed system name and a call id.
    pub fn with_call_id(call_id: &str) -> Self {
        let mut params = Self::new();
        params
            .add_param(CALL_SYSTEM_NAME, CALL_SYSTEM_NAME_VALUE)
            .add_param(CALL_ID, call_id);
        params
    }

    pub fn add_param<T>(&mut self, key: &str, value: T) -> &mut Self
    where
        T: ToString,
    {
        let value = value.to_string();
        match self.pairs.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value,
            None => self.pairs.push((key.to_string(), value)),
        }

        self
    }

    pub fn search_text(&mut self, text: &str) -> &mut Self {
        self.add_param(SEARCH_TEXT, text)
    }

    pub fn search_type(&mut self, search_type: &str) -> &mut Self {
        self.add_param(SEARCH_TYPE, search_type)
    }

    pub fn limit(&mut self, limit: u32) -> &mut Self {
        self.add_param(LIMIT, limit)
    }

    pub fn offset(&mut self, offset: u32) -> &mut Self {
        self.add_param(OFFSET, offset)
    }

    /// Appends `callSystemName` when the caller left it out.
    pub fn ensure_call_system_name(&mut self) -> &mut Self {
        if !self.contains(CALL_SYSTEM_NAME) {
            self.pairs
                .push((CALL_SYSTEM_NAME.to_string(), CALL_SYSTEM_NAME_VALUE.to_string()));
        }

        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// `k1=v1&k2=v2` with percent-encoded keys and values, in insertion order.
    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", encode_query_value(k), encode_query_value(v)))
            .join("&")
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: AsRef<str>,
    V: ToString,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (k, v) in iter {
            params.add_param(k.as_ref(), v);
        }
        params
    }
}
