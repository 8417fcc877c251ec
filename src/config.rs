pub const ENV_ENDPOINT: &str = "BARBICAN_ENDPOINT";
pub const ENV_PROJECT_ID: &str = "OS_PROJECT_ID";
pub const ENV_TENANT_ID: &str = "OS_TENANT_ID";
pub const ENV_AUTH_TOKEN: &str = "OS_AUTH_TOKEN";
pub const ENV_REGION_NAME: &str = "OS_REGION_NAME";
pub const ENV_INTERFACE: &str = "OS_INTERFACE";
pub const ENV_INSECURE: &str = "BARBICAN_INSECURE";

/// First non-empty value among the given environment variables
pub fn env_first(vars: &[&str]) -> Option<String> {
    vars.iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.is_empty())
}

/// Boolean flag; anything other than `true`/`1` (case-insensitive) is false
pub fn env_flag(var: &str) -> bool {
    env_first(&[var]).map_or(false, |value| {
        value.eq_ignore_ascii_case("true") || value == "1"
    })
}
