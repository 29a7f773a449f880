use std::{io::Write, process, sync::Arc, time::Duration};

use axum::{ServiceExt, extract::Request};
use slate::{
    application::{blog::BlogService, chrome::ChromeService, error::AppError},
    config,
    infra::{
        assets::StaticAssets,
        content,
        error::InfraError,
        http::{self, HttpState},
        telemetry,
    },
};
use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli().map_err(|err| {
        AppError::from(InfraError::configuration(format!(
            "failed to load configuration: {err}"
        )))
    })?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
        config::Command::Check(_) => run_check(settings).await,
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let catalog =
        content::load_catalog(&settings.content.posts_file, settings.site.timezone).await?;

    let state = HttpState {
        blog: Arc::new(BlogService::new(Arc::new(catalog))),
        chrome: Arc::new(ChromeService::new(&settings.site)),
        assets: Arc::new(StaticAssets::new(&settings.static_files)),
    };

    serve_http(&settings, state).await
}

async fn run_check(settings: config::Settings) -> Result<(), AppError> {
    let catalog =
        content::load_catalog(&settings.content.posts_file, settings.site.timezone).await?;

    let mut stdout = std::io::stdout().lock();
    for post in catalog.posts() {
        writeln!(
            stdout,
            "{}\t{}\t{}",
            post.slug, post.formatted_date, post.title
        )
        .map_err(InfraError::from)?;
    }

    let collisions = catalog.duplicate_slugs();
    for collision in &collisions {
        writeln!(
            stdout,
            "collision\t{}\tpositions {:?}",
            collision.slug, collision.positions
        )
        .map_err(InfraError::from)?;
    }

    info!(
        posts = catalog.len(),
        collisions = collisions.len(),
        "posts file checked"
    );
    Ok(())
}

async fn serve_http(settings: &config::Settings, state: HttpState) -> Result<(), AppError> {
    let app = http::build_app(state);

    let listener = tokio::net::TcpListener::bind(settings.server.addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;

    info!(
        address = %settings.server.addr,
        url = %format!("http://{}", settings.server.addr),
        "server is running"
    );

    let grace = settings.server.graceful_shutdown;
    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal(grace))
        .await
        .map_err(|err| AppError::unexpected(format!("server error: {err}")))?;

    info!("server stopped");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM, then arms a watchdog that forces exit once
/// in-flight requests have had `grace` to drain.
async fn shutdown_signal(grace: Duration) {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!(grace_seconds = grace.as_secs(), "shutdown signal received");

    tokio::spawn(async move {
        tokio::time::sleep(grace).await;
        warn!("graceful shutdown timed out; exiting");
        process::exit(1);
    });
}
