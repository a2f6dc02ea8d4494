use fake::faker::name::en::Name;
use fake::Fake;
use marketplace_order_service::{
    configuration::{get_configuration, Settings},
    database::configure_database_using_sqlx,
    schemas::GenericResponse,
    startup::Application,
    telemetry::{get_subscriber, init_subscriber},
};
use once_cell::sync::Lazy;
use reqwest::Method;
use serde_json::{json, Value};
use sqlx::PgPool;
use uuid::Uuid;

#[allow(dead_code)]
pub struct TestApp {
    pub address: String,
    pub db_pool: PgPool,
    pub port: u16,
    pub api_client: reqwest::Client,
    pub admin_email: String,
}

pub struct TestUser {
    pub id: Uuid,
    pub token: String,
}

static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();
    let test_log = std::env::var("TEST_LOG")
        .map(|value| value == "true")
        .unwrap_or(false);
    if test_log {
        let subscriber =
            get_subscriber(subscriber_name, default_filter_level, std::io::stdout, None);
        init_subscriber(subscriber).expect("Failed to init subscriber");
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink, None);
        init_subscriber(subscriber).expect("Failed to init subscriber");
    }
});

fn get_test_configuration() -> Settings {
    let mut c = get_configuration().expect("Failed to read configuration.");
    c.application.port = 0;
    c.application.workers = 1;
    c.telemetry.otlp_endpoint = None;
    c
}

/// App backed by a lazy pool; only reaches Postgres when a handler queries it.
pub async fn spawn_app() -> TestApp {
    Lazy::force(&TRACING);
    build_test_app(get_test_configuration()).await
}

/// App backed by a freshly created and migrated database.
pub async fn spawn_app_with_database() -> TestApp {
    Lazy::force(&TRACING);
    let mut configuration = get_test_configuration();
    configuration.database.name = Uuid::new_v4().to_string();
    configure_database_using_sqlx(&configuration.database)
        .await
        .expect("Failed to configure test database.");
    build_test_app(configuration).await
}

async fn build_test_app(configuration: Settings) -> TestApp {
    let admin_email = configuration
        .user
        .admin_list
        .first()
        .cloned()
        .expect("Admin list is empty.");
    let application = Application::build(configuration)
        .await
        .expect("Failed to build application.");
    let application_port = application.port();
    let db_pool = application.db_pool();

    let address = format!("http://127.0.0.1:{}", application_port);
    let _ = tokio::spawn(application.run_until_stopped());

    TestApp {
        address,
        db_pool,
        port: application_port,
        api_client: reqwest::Client::new(),
        admin_email,
    }
}

impl TestApp {
    pub async fn get(&self, path: &str, token: Option<&str>) -> reqwest::Response {
        let mut request = self.api_client.get(format!("{}{}", &self.address, path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("Failed to execute request.")
    }

    pub async fn send_json(
        &self,
        method: reqwest::Method,
        path: &str,
        body: &serde_json::Value,
        token: Option<&str>,
    ) -> reqwest::Response {
        let mut request = self
            .api_client
            .request(method, format!("{}{}", &self.address, path))
            .json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("Failed to execute request.")
    }

    pub async fn create_user(
        &self,
        email: &str,
        is_admin: bool,
        is_seller: bool,
        is_shipper: bool,
    ) -> TestUser {
        let name: String = Name().fake();
        let password = "secret123";
        let response = self
            .send_json(
                Method::POST,
                "/user/register",
                &json!({
                    "name": name,
                    "email": email,
                    "password": password,
                    "isAdmin": is_admin,
                    "isSeller": is_seller,
                    "isShipper": is_shipper,
                }),
                None,
            )
            .await;
        assert_eq!(200, response.status().as_u16(), "Failed to register {}.", email);

        let response = self
            .send_json(
                Method::POST,
                "/user/authenticate",
                &json!({"email": email, "password": password}),
                None,
            )
            .await;
        assert_eq!(200, response.status().as_u16(), "Failed to authenticate {}.", email);
        let body: GenericResponse<Value> = response.json().await.expect("Failed to parse response");
        let data = body.data.expect("Authentication returned no data");
        let id = data["user"]["id"]
            .as_str()
            .and_then(|id| Uuid::parse_str(id).ok())
            .expect("Missing user id");
        let token = data["token"].as_str().expect("Missing token").to_string();
        TestUser { id, token }
    }
}
