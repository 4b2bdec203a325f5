pub mod health;
pub mod messenger;

use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    health::configure(cfg);
    messenger::configure(cfg);
}
