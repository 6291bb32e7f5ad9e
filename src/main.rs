use crate::app::App;
use crate::cli::{Cli, Commands};
use crate::config::AppConfig;
use crate::db::images::delete_image;
use crate::db::init_db;
use crate::errors::ServerError;
use crate::fixtures::{load_fixtures, read_fixtures};
use astra::Server;
use clap::Parser;
use std::path::Path;

mod app;
mod cli;
mod config;
mod db;
mod domain;
mod errors;
mod fixtures;
mod logging;
mod responses;
mod router;
mod serializers;


fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            std::process::exit(2);
        }
    };

    if let Err(e) = logging::init(&config.log_level) {
        eprintln!("Logging initialization failed: {e}");
        std::process::exit(2);
    }

    let app = App::new(config);

    if let Err(e) = init_db(&app.db, &app.config.schema_path) {
        tracing::error!(error = %e, "database initialization failed");
        std::process::exit(1);
    }

    let result = match cli.command() {
        Commands::Serve => serve(app),
        Commands::Load { path } => load(&app, path),
        Commands::DeleteImage { id } => remove_image(&app, *id),
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "command failed");
        std::process::exit(1);
    }
}

fn load(app: &App, path: &Path) -> Result<(), ServerError> {
    let fixtures = read_fixtures(path)?;
    let summary = load_fixtures(&app.db, &fixtures, app.clock.now())?;
    tracing::info!(
        path = %path.display(),
        images = summary.images,
        jumbotrons = summary.jumbotrons,
        events = summary.events,
        projects = summary.projects,
        news = summary.news,
        announcements = summary.announcements,
        "fixtures loaded"
    );
    Ok(())
}

fn remove_image(app: &App, id: i64) -> Result<(), ServerError> {
    app.db.with_conn(|conn| delete_image(conn, id))?;
    tracing::info!(id, "image deleted");
    Ok(())
}

fn serve(app: App) -> Result<(), ServerError> {
    let addr = app.config.addr;
    tracing::info!(
        %addr,
        workers = app.config.max_workers,
        media_prefix = %app.config.media.mount_prefix,
        trust_forwarded_proto = app.config.trust_forwarded_proto,
        "starting server"
    );

    let server = Server::bind(&addr).max_workers(app.config.max_workers);

    server
        .serve(move |req, _info| router::respond(req, &app))
        .map_err(|e| {
            tracing::error!(error = %e, "server ended with error");
            ServerError::InternalError
        })?;

    tracing::info!("server shut down cleanly");
    Ok(())
}
