use actix_web::{web, HttpResponse};
use relay::{StatusMessage, TransactionStatus};

use crate::error::GatewayError;
use crate::metrics::STATUS_LOOKUPS;
use crate::state::AppState;
use crate::store::TransactionRecord;

/// Number of records returned by `GET /queue`.
pub const RECENT_WINDOW: usize = 10;

#[derive(serde::Serialize)]
pub struct QueueSnapshot {
    pub queue_size: usize,
    /// Most recent records, oldest first.
    pub transactions: Vec<TransactionRecord>,
}

/// GET /queue - Queue size and the last ten transactions
pub async fn get_queue(state: web::Data<AppState>) -> Result<HttpResponse, GatewayError> {
    let (queue_size, transactions) = state.store.recent(RECENT_WINDOW)?;
    Ok(HttpResponse::Ok().json(QueueSnapshot {
        queue_size,
        transactions,
    }))
}

/// GET /status/{reference} - Look up one transaction
pub async fn get_status(
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, GatewayError> {
    let reference = path.into_inner();

    match state.store.find(&reference)? {
        Some(record) => {
            STATUS_LOOKUPS.with_label_values(&["found"]).inc();
            Ok(HttpResponse::Ok().json(record))
        }
        None => {
            STATUS_LOOKUPS.with_label_values(&["not_found"]).inc();
            Ok(HttpResponse::NotFound().json(StatusMessage::new(
                TransactionStatus::NotFound.as_str(),
                format!("Transaction {reference} not found"),
            )))
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/queue", web::get().to(get_queue))
        .route("/status/{reference}", web::get().to(get_status));
}
