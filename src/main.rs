use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use intern_match::config::{LoggingSettings, Settings};
use intern_match::routes::{self, AppState};
use intern_match::services::{ResultCache, WeightStore};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Default JSON body limit, large enough for a few thousand profiles
const DEFAULT_JSON_LIMIT_BYTES: usize = 8 * 1024 * 1024;

fn init_logging(logging: &LoggingSettings) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match logging.format.as_str() {
        "pretty" => subscriber.pretty().init(),
        "compact" => subscriber.compact().init(),
        _ => subscriber.init(),
    }
}

fn startup_error(message: String) -> std::io::Error {
    error!("{}", message);
    std::io::Error::new(std::io::ErrorKind::Other, message)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // INTERNMATCH_CONFIG points at an explicit config file
    let loaded = match std::env::var("INTERNMATCH_CONFIG") {
        Ok(path) => Settings::load_from(path),
        Err(_) => Settings::load(),
    };

    let settings = match loaded {
        Ok(settings) => {
            init_logging(&settings.logging);
            settings
        }
        Err(e) => {
            init_logging(&LoggingSettings::default());
            return Err(startup_error(format!("Failed to load configuration: {}", e)));
        }
    };

    info!("Starting Intern Match service...");

    let engine = settings
        .build_engine()
        .map_err(|e| startup_error(format!("Failed to build matching engine: {}", e)))?;

    info!(
        "Matching engine initialized (strict skills: {}, fairness categories: {})",
        engine.is_strict(),
        engine.fairness_table().entries().count()
    );

    let weights = WeightStore::from_raw(&settings.scoring.weights.to_raw())
        .map_err(|e| startup_error(format!("Invalid configured weights: {}", e)))?;

    info!("Weight store initialized with {:?}", weights.current().await);

    let cache = if settings.cache.enabled {
        info!(
            "Result cache enabled ({} entries, TTL: {}s)",
            settings.cache.max_entries, settings.cache.ttl_secs
        );
        ResultCache::new(settings.cache.max_entries, settings.cache.ttl_secs)
    } else {
        info!("Result cache disabled");
        ResultCache::disabled()
    };

    let app_state = AppState {
        engine,
        weights: Arc::new(weights),
        cache: Arc::new(cache),
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);
    let json_limit = settings
        .server
        .json_limit_bytes
        .unwrap_or(DEFAULT_JSON_LIMIT_BYTES);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(routes::json_config(json_limit))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
