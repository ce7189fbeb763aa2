use actix_web::{middleware, web, App, HttpServer};
use log::{error, info};
use otakudesu_scraper::api;
use otakudesu_scraper::app_state::AppState;
use otakudesu_scraper::config::Config;
use otakudesu_scraper::http_client::{Fetcher, BASE_URL};
use otakudesu_scraper::sources::otakudesu::Otakudesu;
use std::sync::Arc;

fn init_logging(cfg: &Config) {
    if let Err(e) = log4rs::init_file(&cfg.log_config, Default::default()) {
        // No log4rs file: fall back to RUST_LOG-driven env_logger
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
        log::warn!("log4rs config {} not loaded ({}), using env_logger", cfg.log_config, e);
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let cfg = Config::load();
    init_logging(&cfg);

    let fetcher = Fetcher::new().map_err(|e| {
        error!("Failed to build HTTP client: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e)
    })?;

    let addr = cfg.bind_address();
    let workers = cfg.server.workers;
    info!("Scraping {} and serving on http://{}", BASE_URL, addr);
    if cfg.expose_error_details {
        info!("Error details are exposed in responses");
    }

    let data = web::Data::new(AppState::new(Otakudesu::new(Arc::new(fetcher)), cfg));

    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .wrap(middleware::Logger::default())
            .configure(api::configure)
            .default_service(web::to(api::route_not_found))
    });
    if let Some(n) = workers {
        server = server.workers(n);
    }

    server.bind(&addr)?.run().await
}
