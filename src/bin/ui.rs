use std::net::SocketAddr;
use std::sync::Arc;

use studentdb::ui::client::HttpStudentsApi;
use studentdb::ui::{self, UiState};
use studentdb::app;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    app::init_tracing("studentdb=debug,axum=info");

    let api_url =
        std::env::var("STUDENTS_API_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
    let bind_addr: SocketAddr = std::env::var("UI_BIND")
        .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
        .parse()?;

    let state = UiState {
        api: Arc::new(HttpStudentsApi::new(&api_url)),
    };
    let app = ui::router().with_state(state);

    tracing::info!("UI listening on {}, talking to {}", bind_addr, api_url);
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
