use std::time::Duration;

use reqwest::Client;
use shop_services::{create_app, models::ServiceKind, AppSettings};
use tokio::net::TcpListener;

pub struct TestEnvironment {
    pub client: Client,
    pub base_url: String,
}

impl TestEnvironment {
    /// Serve a fresh instance of `kind` on an ephemeral port
    pub async fn new(kind: ServiceKind) -> Self {
        Self::with_settings(kind, AppSettings::default()).await
    }

    pub async fn with_settings(kind: ServiceKind, settings: AppSettings) -> Self {
        let app = create_app(kind, &settings).expect("Failed to build app");

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind listener");
        let addr = listener.local_addr().expect("Failed to get local address");
        let base_url = format!("http://{}", addr);

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Failed to serve app");
        });

        // Wait for server to start
        tokio::time::sleep(Duration::from_millis(50)).await;

        Self {
            client: Client::new(),
            base_url,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
