use email_relay::{
    app, config,
    handler::AppState,
    service::SmtpMailer,
};

use std::{process, sync::Arc};

#[tokio::main]
async fn main() {
    // Log setup
    tracing_subscriber::fmt().init();

    // Load config
    let cfg = match config::load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Failed to load email service config: {e}");
            process::exit(1);
        }
    };
    tracing::info!("Successfully loaded email service config: {:?}", cfg);

    // Setup mailer
    let mailer = match SmtpMailer::new(&cfg) {
        Ok(mailer) => mailer,
        Err(e) => {
            tracing::error!("Failed to set up SMTP mailer: {e}");
            process::exit(1);
        }
    };
    let state = AppState::new(Arc::new(mailer), cfg.owner_email.clone());

    // Setup router
    let router = app::router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", cfg.port))
        .await
        .expect("Failed to bind to address");
    let addr = listener.local_addr().expect("Failed to read bound address");

    tracing::info!("Email service starting, listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Failed to start server");

    tracing::info!("Email service stopped");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
