pub const BASE_URL: &str = "https://api.fdbcloudconnector.com/CC/api/v1_4";

pub const CALL_SYSTEM_NAME: &str = "callSystemName";
pub const CALL_SYSTEM_NAME_VALUE: &str = "StreamlitTest";
pub const CALL_ID: &str = "callid";
pub const CALL_ID_FORMAT: &str = "%Y%m%d%H%M%S";

pub const SEARCH_TEXT: &str = "searchtext";
pub const SEARCH_TYPE: &str = "searchtype";
pub const ROUTED_SEARCH_TEXT: &str = "searchText";
pub const LIMIT: &str = "limit";
pub const OFFSET: &str = "offset";
pub const CLASSIFICATION_TYPE: &str = "classificationType";
pub const INTEROPERABLE_TYPE: &str = "interoperableType";

pub const DEFAULT_LIMIT: u32 = 100;
pub const MAX_LIMIT: u32 = 1000;

pub const AUTH_SCHEME: &str = "SHAREDKEY";
pub const REDACTED_AUTH: &str = "SHAREDKEY [HIDDEN]";
pub const ACCEPT_JSON: &str = "application/json";
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
pub const NO_CACHE: &str = "no-cache";

pub const ITEMS: &str = "Items";
