//! Remote API constants.

/// Path of the synthetic monitor creation endpoint, relative to the base URL.
pub const NAM_MONITORS_API: &str = "/api/v2/synthetic/monitors";

/// Path prefix of the extension configuration API.
/// Full path = `EXTENSIONS_API + "/" + extension_id + "/instances"`.
pub const EXTENSIONS_API: &str = "/api/config/v1/extensions";

/// Authorization scheme used in the `Authorization` header.
pub const AUTH_SCHEME: &str = "Api-Token";

/// Environment variable holding the tenant base URL.
pub const ENV_BASE_URL: &str = "DT_URL";

/// Environment variable holding the API token.
pub const ENV_API_TOKEN: &str = "DT_TOKEN";
