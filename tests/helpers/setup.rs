use nuntius_scheduler_api::Application;
use nuntius_scheduler_infra::{Config, InMemoryMessagingGateway, NuntiusContext};
use nuntius_scheduler_sdk::NuntiusSDK;
use std::sync::Arc;

pub const ADMIN_KEY: &str = "test-admin-key";

pub struct TestApp {
    pub config: Config,
    pub address: String,
    pub gateway: Arc<InMemoryMessagingGateway>,
}

impl TestApp {
    /// Client acting as the given owner
    pub fn owner_sdk(&self, owner: &str) -> NuntiusSDK {
        NuntiusSDK::new(self.address.clone(), Some(owner), None)
    }

    pub fn admin_sdk(&self) -> NuntiusSDK {
        NuntiusSDK::new(self.address.clone(), None, Some(ADMIN_KEY))
    }
}

// Launch the application as a background task
pub async fn spawn_app() -> TestApp {
    spawn_app_with(|_| {}).await
}

pub async fn spawn_app_with(configure: impl FnOnce(&mut NuntiusContext)) -> TestApp {
    let mut ctx = NuntiusContext::create_inmemory();
    ctx.config.port = 0; // Random port
    ctx.config.admin_api_key = ADMIN_KEY.into();
    let gateway = Arc::new(InMemoryMessagingGateway::new());
    ctx.services.messaging = gateway.clone();
    configure(&mut ctx);

    let config = ctx.config.clone();
    let application = Application::new(ctx)
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}/api/v1", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    TestApp {
        config,
        address,
        gateway,
    }
}
