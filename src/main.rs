#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() {
    use axum::Router;
    use foodgram::app::*;
    use foodgram::core::accounts::{
        AccountApiState, AccountService, AccountStore, account_api_router,
    };
    use foodgram::core::config::Config;
    use leptos::prelude::*;
    use leptos_axum::{LeptosRoutes, generate_route_list};
    use tower_http::compression::{CompressionLayer, CompressionLevel};
    use tower_http::services::ServeDir;
    use tracing_subscriber::EnvFilter;

    // Load .env file (if exists)
    let _ = dotenvy::dotenv();

    // Initialize tracing, RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load application config from environment variables
    let config = Config::from_env();

    tracing::info!(
        "Config loaded: password_hash_cost={}, registration_open={}",
        config.password_hash_cost(),
        config.registration_open()
    );

    // Load configuration from Cargo.toml [package.metadata.leptos]
    // Can be overridden via LEPTOS_SITE_ADDR env var for Docker/K8s
    let conf = match get_configuration(None) {
        Ok(conf) => conf,
        Err(err) => {
            tracing::error!("Failed to load Leptos configuration: {}", err);
            std::process::exit(1);
        }
    };
    let leptos_options = conf.leptos_options;
    let addr = leptos_options.site_addr;

    // Generate the list of routes in your Leptos App
    let routes = generate_route_list(App);

    let account_service = AccountService::new(
        AccountStore::new(),
        config.password_hash_cost(),
        config.registration_open(),
    );
    let account_api = account_api_router(AccountApiState { account_service });

    // Serve pre-compressed static assets (.br / .gz) when available
    let pkg_service = ServeDir::new(format!("{}/pkg", leptos_options.site_root))
        .precompressed_br()
        .precompressed_gzip();

    // Build the Leptos router
    let leptos_router = Router::new()
        .nest_service("/pkg", pkg_service)
        .leptos_routes(&leptos_options, routes, {
            let leptos_options = leptos_options.clone();
            move || shell(leptos_options.clone())
        })
        .fallback(leptos_axum::file_and_error_handler(shell))
        .with_state(leptos_options);

    let app = Router::new()
        // Account REST API
        .merge(account_api)
        // Leptos routes (merged to avoid state conflicts)
        .merge(leptos_router)
        .layer(
            CompressionLayer::new()
                .br(true)
                .gzip(true)
                .quality(CompressionLevel::Best),
        );

    tracing::info!("listening on http://{}", &addr);
    tracing::info!("Account API: http://{}/api/users/", &addr);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("Failed to bind {}: {}", addr, err);
            std::process::exit(1);
        }
    };

    if let Err(err) = axum::serve(listener, app.into_make_service()).await {
        tracing::error!("Server error: {}", err);
    }
}

#[cfg(not(feature = "ssr"))]
pub fn main() {
    // no client-side main function
    // unless we want this to work with e.g., Trunk for pure client-side testing
    // see lib.rs for hydration function instead
}
