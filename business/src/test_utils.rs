//! Helpers for driving the dashboard's business layer against a mock server.
//!
//! ```ignore
//! let mut test_ctx = TestContext::new().await;
//! test_ctx.mock_users(vec![user_json("alice", true)]).await;
//! test_ctx.ctx.enqueue_command::<FetchUsersCommand>();
//! test_ctx.flush_and_wait().await;
//! ```

#![cfg(all(test, not(target_arch = "wasm32")))]

use std::time::Duration;

use activity_states::StateCtx;
use chrono::Utc;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

use crate::{BusinessConfig, register};

pub const USERS_PATH: &str = "/api/users";

pub struct TestContext {
    pub mock_server: MockServer,
    pub ctx: StateCtx,
}

impl TestContext {
    pub async fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let mock_server = MockServer::start().await;
        let mut ctx = StateCtx::new();
        register(&mut ctx, BusinessConfig::new(mock_server.uri()));
        ctx.run_all_dirty();

        Self { mock_server, ctx }
    }

    /// Flush queued commands, wait for every task, then settle the computes.
    pub async fn flush_and_wait(&mut self) {
        self.ctx.sync_computes();
        self.ctx.flush_commands();

        let timeout = Duration::from_secs(5);
        let start = std::time::Instant::now();

        while self.ctx.task_count() > 0 {
            if start.elapsed() > timeout {
                panic!(
                    "Timed out waiting for pending tasks ({} still in JoinSet)",
                    self.ctx.task_count()
                );
            }

            if self.ctx.task_set_mut().join_next().await.is_some() {
                self.ctx.sync_computes();
            }
        }

        self.ctx.run_all_dirty();
    }

    pub async fn mock_users(&self, users: Vec<serde_json::Value>) {
        self.mock_users_response(ResponseTemplate::new(200).set_body_json(users))
            .await;
    }

    pub async fn mock_users_response(&self, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(USERS_PATH))
            .respond_with(response)
            .mount(&self.mock_server)
            .await;
    }
}

/// A user whose password changed `password_days` ago and who was last seen
/// `access_days` ago, as the API would serve it.
pub fn user_json(
    name: &str,
    mfa_enabled: bool,
    password_days: i64,
    access_days: i64,
) -> serde_json::Value {
    let today = Utc::now().date_naive();
    let days_ago = |days: i64| (today - chrono::Duration::days(days)).to_string();

    serde_json::json!({
        "name": name,
        "create_date": "2019-10-01",
        "password_changed_date": days_ago(password_days),
        "last_access_date": days_ago(access_days),
        "mfa_enabled": mfa_enabled,
    })
}
