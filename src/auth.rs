use axum::http::HeaderMap;

use crate::config::AppConfig;
use crate::errors::AppError;

/// Caller rank, ordered. Developer outranks Admin, so any endpoint open to
/// admins is open to developers as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Role {
    Public,
    Admin,
    Developer,
}

impl Role {
    pub fn allows(&self, required: Role) -> bool {
        *self >= required
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

/// Resolve the caller's role from the bearer token. Token issuance lives
/// elsewhere; this only matches against the configured credentials.
pub fn role_from_headers(headers: &HeaderMap, config: &AppConfig) -> Role {
    match bearer_token(headers) {
        Some(t) if t == config.developer_token => Role::Developer,
        Some(t) if t == config.admin_token => Role::Admin,
        _ => Role::Public,
    }
}

/// The single authorization decision point. Absent or unknown token → 401,
/// known token of insufficient rank → 403.
pub fn require(headers: &HeaderMap, config: &AppConfig, required: Role) -> Result<Role, AppError> {
    let role = role_from_headers(headers, config);
    if role == Role::Public {
        return Err(AppError::Unauthorized);
    }
    if !role.allows(required) {
        return Err(AppError::Forbidden);
    }
    Ok(role)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AppConfig {
        let mut config = AppConfig::from_env();
        config.admin_token = "admin-secret".to_string();
        config.developer_token = "dev-secret".to_string();
        config
    }

    fn headers_with(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", format!("Bearer {token}").parse().unwrap());
        headers
    }

    #[test]
    fn test_role_ordering() {
        assert!(Role::Developer.allows(Role::Admin));
        assert!(Role::Developer.allows(Role::Developer));
        assert!(Role::Admin.allows(Role::Admin));
        assert!(!Role::Admin.allows(Role::Developer));
        assert!(!Role::Public.allows(Role::Admin));
    }

    #[test]
    fn test_missing_token_is_unauthorized() {
        let config = test_config();
        let err = require(&HeaderMap::new(), &config, Role::Admin).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }

    #[test]
    fn test_wrong_token_is_unauthorized() {
        let config = test_config();
        let err = require(&headers_with("nope"), &config, Role::Admin).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }

    #[test]
    fn test_admin_cannot_reach_developer_endpoints() {
        let config = test_config();
        let err = require(&headers_with("admin-secret"), &config, Role::Developer).unwrap_err();
        assert!(matches!(err, AppError::Forbidden));
    }

    #[test]
    fn test_developer_reaches_admin_endpoints() {
        let config = test_config();
        let role = require(&headers_with("dev-secret"), &config, Role::Admin).unwrap();
        assert_eq!(role, Role::Developer);
    }
}
