use std::time::Duration;

use activity_ui::DashboardApp;
use activity_ui::state::State;
use chrono::Utc;
use egui_kittest::Harness;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const USERS_PATH: &str = "/api/users";

pub struct TestCtx<'a> {
    /// Mock server must be retained to keep HTTP endpoints alive during tests.
    mock_server: MockServer,
    harness: Harness<'a, DashboardApp>,
}

impl<'a> TestCtx<'a> {
    pub async fn with_users(users: Vec<serde_json::Value>) -> Self {
        Self::with_response(ResponseTemplate::new(200).set_body_json(users)).await
    }

    pub async fn with_response(response: ResponseTemplate) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(USERS_PATH))
            .respond_with(response)
            .mount(&mock_server)
            .await;

        let state = State::test(mock_server.uri());
        let app = DashboardApp::new(state);
        let harness = Harness::new_eframe(|_| app);

        Self {
            mock_server,
            harness,
        }
    }

    pub fn harness_mut(&mut self) -> &mut Harness<'a, DashboardApp> {
        &mut self.harness
    }

    #[allow(unused)]
    pub fn harness(&self) -> &Harness<'a, DashboardApp> {
        &self.harness
    }

    #[allow(unused)]
    pub fn mock_server(&self) -> &MockServer {
        &self.mock_server
    }

    /// Step frames until the fetch has settled, giving async IO time between frames.
    ///
    /// Returns right after the first frame that rendered the loaded state.
    pub async fn wait_for_load(&mut self) {
        for _ in 0..100 {
            self.harness.step();
            if !is_loading(&self.harness) {
                return;
            }
            yield_wait_for_network(20).await;
        }
        panic!("users never finished loading");
    }
}

pub fn is_loading(harness: &Harness<'_, DashboardApp>) -> bool {
    harness
        .state()
        .state()
        .ctx
        .cached::<activity_business::UsersCompute>()
        .is_none_or(activity_business::UsersCompute::is_loading)
}

pub async fn yield_wait_for_network(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

/// A user whose password changed `password_days` ago and who was last seen
/// `access_days` ago.
#[allow(unused)]
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
