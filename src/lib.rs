pub mod api;
pub mod config;
pub mod docs;
pub mod error;
pub mod model;
pub mod routes;
pub mod service;
pub mod session;
pub mod state;
pub mod store;

use actix_web::{HttpResponse, Responder, get};

#[get("/")]
pub async fn index() -> impl Responder {
    HttpResponse::Ok().body("HR Desk is running")
}
