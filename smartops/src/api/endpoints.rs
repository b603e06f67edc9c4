//! REST routes a real backend will expose. Path parameters use `:name`.

pub const AUTH_LOGIN: &str = "/api/auth/login";
pub const AUTH_REGISTER: &str = "/api/auth/register";
pub const AUTH_ME: &str = "/api/auth/me";

pub const SERVERS_LIST: &str = "/api/servers";
pub const SERVERS_DETAIL: &str = "/api/servers/:id";
pub const SERVERS_CREATE: &str = "/api/servers";
pub const SERVERS_DELETE: &str = "/api/servers/:id";

pub const METRICS_GET: &str = "/api/metrics/:serverId";

pub const ANOMALIES_LIST: &str = "/api/anomalies";
pub const ANOMALIES_BY_SERVER: &str = "/api/anomalies/:serverId";

pub const PREDICTIONS_GET: &str = "/api/predictions/:serverId";

/// Substitute the single path parameter of `template` with `id`.
pub fn resolve(template: &str, id: &str) -> String {
    match template.find("/:") {
        Some(pos) => {
            let rest = &template[pos + 2..];
            let end = rest.find('/').map(|i| pos + 2 + i).unwrap_or(template.len());
            format!("{}/{}{}", &template[..pos], id, &template[end..])
        }
        None => template.to_string(),
    }
}
