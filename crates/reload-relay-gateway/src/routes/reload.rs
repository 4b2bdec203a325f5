use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Utc;
use relay::{QueueReceipt, TransactionStatus};

use crate::error::GatewayError;
use crate::metrics::{INTAKE_REQUESTS, QUEUE_SIZE};
use crate::reference::generate_reference;
use crate::state::AppState;
use crate::store::TransactionRecord;
use crate::validation::parse_body;

/// POST /reload - Validate and enqueue a reload transaction
pub async fn reload(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse, GatewayError> {
    let reload = match parse_body(&body).and_then(|submission| submission.validate()) {
        Ok(r) => r,
        Err(e) => {
            INTAKE_REQUESTS.with_label_values(&["rejected"]).inc();
            return Err(e);
        }
    };

    let now = Utc::now();
    let record = TransactionRecord {
        reference: generate_reference(now),
        msisdn: reload.msisdn,
        promo: reload.promo,
        amount: reload.amount,
        network: reload.network,
        status: TransactionStatus::Queued,
        timestamp: now,
        remote_addr: req.peer_addr().map(|addr| addr.ip().to_string()),
    };
    let reference = record.reference.clone();
    let (msisdn, promo, amount) = (record.msisdn.clone(), record.promo.clone(), record.amount);

    let queue_position = state.store.append(record).inspect_err(|_| {
        INTAKE_REQUESTS.with_label_values(&["error"]).inc();
    })?;

    INTAKE_REQUESTS.with_label_values(&["queued"]).inc();
    QUEUE_SIZE.set(queue_position as i64);
    tracing::info!(
        reference = %reference,
        msisdn = %msisdn,
        promo = %promo,
        amount,
        queue_size = queue_position,
        "transaction queued"
    );

    Ok(HttpResponse::Ok().json(QueueReceipt {
        status: TransactionStatus::Queued,
        reference,
        queue_position,
    }))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/reload", web::post().to(reload));
}
