#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let (app, addr) = match innova_storefront::server::app() {
        Ok(built) => built,
        Err(e) => {
            tracing::error!(error = %e, "storefront startup failed");
            std::process::exit(1);
        }
    };

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind");

    tracing::info!(%addr, "storefront listening");
    axum::serve(listener, app).await.expect("server failed");
}
