use std::any::Any;

use activity_states::{SnapshotClone, State, state_assign_impl};
use serde::Deserialize;
use ustr::Ustr;

/// Port the reference backend listens on.
const LOCAL_API_BASE_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessConfig {
    /// Origin hosting the API, without the `/api` suffix. Empty means the page origin.
    pub api_base_url: String,
}

impl BusinessConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: base_url.into(),
        }
    }

    /// Build the config from the process environment, falling back to the defaults.
    pub fn from_env() -> Self {
        match serde_env::from_env::<DashboardEnv>() {
            Ok(env) => Self::from(env),
            Err(err) => {
                log::warn!("Ignoring malformed dashboard environment: {err}");
                Self::default()
            }
        }
    }

    /// Absolute `/api` root. An empty base resolves against the page origin.
    pub fn api_url(&self) -> Ustr {
        let base = self.api_base_url.trim_end_matches('/');
        if base.is_empty() {
            let origin = page_origin();
            Ustr::from(&format!("{}/api", origin.trim_end_matches('/')))
        } else {
            Ustr::from(&format!("{base}/api"))
        }
    }

    pub fn users_url(&self) -> String {
        format!("{}/users", self.api_url())
    }
}

/// Origin of the page hosting the app, used for same-origin requests.
#[cfg(target_arch = "wasm32")]
fn page_origin() -> String {
    match web_sys::window().map(|window| window.location().origin()) {
        Some(Ok(origin)) => origin,
        _ => {
            log::warn!("No page origin available, falling back to {LOCAL_API_BASE_URL}");
            LOCAL_API_BASE_URL.to_owned()
        }
    }
}

/// Native builds have no page; same-origin means the local backend.
#[cfg(not(target_arch = "wasm32"))]
fn page_origin() -> String {
    LOCAL_API_BASE_URL.to_owned()
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            api_base_url: if cfg!(target_arch = "wasm32") {
                String::new()
            } else {
                LOCAL_API_BASE_URL.to_owned()
            },
        }
    }
}

/// Environment overrides read at native startup.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardEnv {
    pub activity_api_base_url: Option<String>,
}

impl From<DashboardEnv> for BusinessConfig {
    fn from(env: DashboardEnv) -> Self {
        env.activity_api_base_url
            .map(Self::new)
            .unwrap_or_default()
    }
}

impl SnapshotClone for BusinessConfig {
    fn clone_boxed(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }
}

impl State for BusinessConfig {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_url_appends_api_segment() {
        let config = BusinessConfig::new("http://127.0.0.1:9000");
        assert_eq!(config.api_url(), Ustr::from("http://127.0.0.1:9000/api"));
        assert_eq!(config.users_url(), "http://127.0.0.1:9000/api/users");
    }

    #[test]
    fn trailing_slash_is_ignored() {
        let config = BusinessConfig::new("http://127.0.0.1:9000/");
        assert_eq!(config.users_url(), "http://127.0.0.1:9000/api/users");
    }

    #[test]
    fn empty_base_resolves_to_absolute_url() {
        let users_url = BusinessConfig::new("").users_url();
        let parsed = reqwest::Url::parse(&users_url).expect("users url should be absolute");
        assert_eq!(parsed.path(), "/api/users");
        if !cfg!(target_arch = "wasm32") {
            assert_eq!(users_url, "http://localhost:8080/api/users");
        }
    }

    #[test]
    fn env_override_wins_over_default() {
        let env: DashboardEnv =
            serde_env::from_iter([("ACTIVITY_API_BASE_URL", "https://dash.example.com")])
                .expect("env should deserialize");
        assert_eq!(
            BusinessConfig::from(env).users_url(),
            "https://dash.example.com/api/users"
        );
    }

    #[test]
    fn missing_env_keeps_default() {
        let env: DashboardEnv =
            serde_env::from_iter(Vec::<(&str, &str)>::new()).expect("env should deserialize");
        assert_eq!(BusinessConfig::from(env), BusinessConfig::default());
    }

    #[test]
    fn native_default_targets_local_backend() {
        if !cfg!(target_arch = "wasm32") {
            assert_eq!(
                BusinessConfig::default().users_url(),
                "http://localhost:8080/api/users"
            );
        }
    }
}
