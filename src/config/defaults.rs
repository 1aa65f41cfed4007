/// Default configuration constants used across the system.

/// Default gateway port.
pub const DEFAULT_GATEWAY_PORT: u16 = 18789;

/// Default gateway mode.
pub const DEFAULT_GATEWAY_MODE: &str = "local";

/// Default state directory (persisted document lives here).
pub const DEFAULT_STATE_DIR: &str = "/data/.openclaw";

/// Default agent workspace directory.
pub const DEFAULT_WORKSPACE_DIR: &str = "/data/workspace";

/// Default location of the bundled override document.
pub const DEFAULT_CUSTOM_CONFIG: &str = "/app/config/openclaw.json";

/// File name of the persisted document inside the state directory.
pub const CONFIG_FILE_NAME: &str = "openclaw.json";

/// Directory the reverse proxy imports snippets from.
pub const DEFAULT_CADDY_DIR: &str = "/app/caddy.d";

/// Default basic-auth user for the proxy.
pub const DEFAULT_AUTH_USERNAME: &str = "admin";

/// Default webhook mount path.
pub const DEFAULT_HOOKS_PATH: &str = "/hooks";

/// Reserved prefix for path-addressed overrides.
pub const CONVENTION_PREFIX: &str = "OPENCLAW_JSON__";

/// Bedrock discovery refresh interval, in seconds.
pub const BEDROCK_REFRESH_INTERVAL_SECS: u64 = 3600;

/// Default Bedrock region.
pub const DEFAULT_AWS_REGION: &str = "us-east-1";

/// Default Bedrock model provider filter.
pub const DEFAULT_BEDROCK_PROVIDER_FILTER: &str = "anthropic";
