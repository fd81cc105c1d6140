use std::sync::Arc;

use axum::Router;
use tempfile::TempDir;
use tokio::sync::broadcast;

use tutor_backend::config::{CoachConfig, Config};
use tutor_backend::routes::build_router;
use tutor_backend::services::coach::CoachProvider;
use tutor_backend::state::AppState;
use tutor_backend::store::Store;

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    pub config: Config,
    _temp_dir: TempDir,
}

async fn spawn_with_coach(coach: CoachConfig) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("tempdir");
    let sled_path = temp_dir.path().join("tutor-test.sled");

    // 直接构造 Config，避免使用 set_var 造成多线程测试环境变量竞态
    let config = Config {
        host: std::net::IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
        port: 3000,
        log_level: "info".to_string(),
        enable_file_logs: false,
        log_dir: "./logs".to_string(),
        sled_path: sled_path.to_string_lossy().to_string(),
        cors_origin: "http://localhost:5173".to_string(),
        pagination: Default::default(),
        coach,
    };

    let store = Arc::new(Store::open(&config.sled_path).expect("open store"));
    let provider = Arc::new(CoachProvider::new(&config.coach));
    let (shutdown_tx, _) = broadcast::channel::<()>(8);

    let state = AppState::new(store, provider, &config, shutdown_tx);

    let app = build_router(state.clone());

    TestApp {
        app,
        state,
        config,
        _temp_dir: temp_dir,
    }
}

pub async fn spawn_test_app() -> TestApp {
    spawn_with_coach(CoachConfig {
        enabled: true,
        mock: true,
        api_url: String::new(),
        api_key: String::new(),
        timeout_secs: 5,
    })
    .await
}

pub async fn spawn_test_app_without_coach() -> TestApp {
    spawn_with_coach(CoachConfig {
        enabled: false,
        mock: true,
        api_url: String::new(),
        api_key: String::new(),
        timeout_secs: 5,
    })
    .await
}
