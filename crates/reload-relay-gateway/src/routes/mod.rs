pub mod health;
pub mod queue;
pub mod reload;

use actix_web::web;

/// Mount every gateway route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    health::configure(cfg);
    reload::configure(cfg);
    queue::configure(cfg);
}
