use std::net::SocketAddr;

use studentdb::{app, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    app::init_tracing("studentdb=debug,axum=info,tower_http=info");

    let state = AppState::init().await?;
    let addr: SocketAddr =
        format!("{}:{}", state.config.host, state.config.port).parse()?;

    let app = app::build_app(state);
    app::serve(app, addr).await
}
