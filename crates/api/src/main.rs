use anyhow::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    atrium_observability::init();

    let jwt_secret = std::env::var("ATRIUM_JWT_SECRET").unwrap_or_else(|_| {
        tracing::warn!("ATRIUM_JWT_SECRET not set; using insecure dev default");
        "dev-secret".to_string()
    });
    let bind_addr =
        std::env::var("ATRIUM_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let app = atrium_api::app::build_app(jwt_secret.as_bytes());

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
