use morpankh_api::app::{AppServices, build_app};
use morpankh_ledger::OverdraftPolicy;

#[tokio::main]
async fn main() {
    morpankh_observability::init();

    let policy = match std::env::var("OVERDRAFT_POLICY").as_deref() {
        Ok("allow") => OverdraftPolicy::Allow,
        Ok("reject") | Err(_) => OverdraftPolicy::Reject,
        Ok(other) => {
            tracing::warn!("unknown OVERDRAFT_POLICY '{other}', using reject");
            OverdraftPolicy::Reject
        }
    };

    let services = AppServices::in_memory(policy);
    let app = build_app(services);

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {bind_addr}: {e}"));

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
