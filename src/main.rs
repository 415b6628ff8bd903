use pokerledger::auth::{AccessGate, TokenGate};
use pokerledger::domain::Timestamp;
use pokerledger::{api, config::Config, db::init_db, Ledger, Repository};
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let pool = match init_db(&config.database_path).await {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Failed to initialize database: {}", e);
            std::process::exit(1);
        }
    };

    let repo = Arc::new(Repository::new(pool));

    if config.seed_sample_data {
        if let Err(e) = repo.load_sample_data(Timestamp::now()).await {
            eprintln!("Failed to load sample data: {}", e);
            std::process::exit(1);
        }
    }

    let ledger = Ledger::new(repo)
        .with_delta_policy(config.delta_policy)
        .with_pot_history_limit(config.pot_history_limit);

    let gate = TokenGate::new(&config.admin_token);
    tracing::info!(
        fingerprint = %gate.fingerprint(),
        delta_policy = ?config.delta_policy,
        database = %config.database_path,
        "Ledger ready"
    );
    let gate: Arc<dyn AccessGate> = Arc::new(gate);

    let app = api::create_router(api::AppState::new(Arc::new(ledger), gate));

    let addr = SocketAddr::new(config.host, config.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!("Server listening on {}", addr);

    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
