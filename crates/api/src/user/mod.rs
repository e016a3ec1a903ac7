mod create_user;
mod get_user;
pub mod set_user_active;

use actix_web::web;
use create_user::create_user_controller;
use get_user::get_user_controller;
use set_user_active::set_user_active_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/users", web::post().to(create_user_controller));
    cfg.route("/users/{user_id}", web::get().to(get_user_controller));
    cfg.route(
        "/users/{user_id}/active",
        web::put().to(set_user_active_controller),
    );
}
