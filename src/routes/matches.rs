use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use crate::core::{
    fairness::FairnessTable,
    weights::validate_weights,
    MatchEngine, MatchError,
};
use crate::models::{ErrorResponse, HealthResponse, MatchRequest, UpdateWeightsRequest};
use crate::services::{CacheKey, ResultCache, WeightStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: MatchEngine,
    pub weights: Arc<WeightStore>,
    pub cache: Arc<ResultCache>,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/match", web::post().to(compute_matches))
        .route("/weights", web::get().to(get_weights))
        .route("/weights", web::post().to(update_weights));
}

fn bad_request(err: &MatchError) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::from(err))
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Score and rank students against opportunities
///
/// POST /match
///
/// Request body:
/// ```json
/// {
///   "students": [{"id": "s1", "skills": ["React"], "locationPreference": ["Austin, TX"], "gpa": 3.7}],
///   "opportunities": [{"id": "o1", "requiredSkills": ["React"], "location": "Austin, TX", "capacity": 2}],
///   "weights": {"skillsWeight": 40, "locationWeight": 25, "diversityWeight": 35}
/// }
/// ```
async fn compute_matches(
    state: web::Data<AppState>,
    req: web::Json<MatchRequest>,
) -> impl Responder {
    let request_id = uuid::Uuid::new_v4();
    let MatchRequest {
        students,
        opportunities,
        weights,
        fairness_table,
    } = req.into_inner();

    // Request weights are validated before anything else is looked at
    let weights = match weights {
        Some(raw) => match validate_weights(&raw) {
            Ok(validated) => validated,
            Err(e) => {
                tracing::info!("[{}] Rejected match request: {}", request_id, e);
                return bad_request(&e);
            }
        },
        None => state.weights.current().await,
    };

    let engine = match fairness_table {
        Some(table) => state
            .engine
            .clone()
            .with_fairness_table(FairnessTable::new(table)),
        None => state.engine.clone(),
    };

    tracing::info!(
        "[{}] Scoring {} students against {} opportunities",
        request_id,
        students.len(),
        opportunities.len()
    );

    let cache_key = if state.cache.is_enabled() {
        match CacheKey::matches(&students, &opportunities, &weights, engine.fairness_table()) {
            Ok(key) => Some(key),
            Err(e) => {
                tracing::warn!("[{}] Failed to build cache key, scoring uncached: {}", request_id, e);
                None
            }
        }
    } else {
        None
    };

    if let Some(key) = &cache_key {
        if let Some(outcome) = state.cache.get(key).await {
            tracing::debug!("[{}] Serving memoized outcome", request_id);
            return HttpResponse::Ok().json(&*outcome);
        }
    }

    let result = web::block(move || {
        engine.compute_with_weights(&students, &opportunities, &weights)
    })
    .await;

    match result {
        Ok(Ok(outcome)) => {
            tracing::info!(
                "[{}] Returning {} results ({} accepted, {} warnings)",
                request_id,
                outcome.results.len(),
                outcome.summary.accepted_count,
                outcome.warnings.len()
            );

            let outcome = Arc::new(outcome);
            if let Some(key) = cache_key {
                state.cache.insert(key, outcome.clone()).await;
            }
            HttpResponse::Ok().json(&*outcome)
        }
        Ok(Err(e)) => {
            tracing::info!("[{}] Rejected match request: {}", request_id, e);
            bad_request(&e)
        }
        Err(e) => {
            tracing::error!("[{}] Scoring task failed: {}", request_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "internal_error".to_string(),
                message: "Scoring task failed".to_string(),
                status_code: 500,
            })
        }
    }
}

/// Current normalized weights
///
/// GET /weights
async fn get_weights(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.weights.current().await)
}

/// Validate, normalize and install new weights
///
/// POST /weights
///
/// Request body:
/// ```json
/// { "skillsWeight": 50, "locationWeight": 20, "diversityWeight": 30 }
/// ```
async fn update_weights(
    state: web::Data<AppState>,
    req: web::Json<UpdateWeightsRequest>,
) -> impl Responder {
    match state.weights.update(&req).await {
        Ok(weights) => {
            tracing::info!("Weights updated: {:?}", weights);
            HttpResponse::Ok().json(weights)
        }
        Err(e) => {
            tracing::info!("Rejected weight update: {}", e);
            bad_request(&e)
        }
    }
}
