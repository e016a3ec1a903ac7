mod get_execution_history;
mod get_execution_statistics;
mod record_execution_response;
mod record_execution_sent;

use actix_web::web;
use get_execution_history::{get_reminder_executions_controller, get_user_executions_controller};
use get_execution_statistics::{
    get_reminder_execution_statistics_controller, get_user_execution_statistics_controller,
};
use record_execution_response::respond_to_execution_controller;

pub use record_execution_sent::RecordExecutionSentUseCase;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/executions/actions",
        web::post().to(respond_to_execution_controller),
    );
    cfg.route(
        "/reminders/{reminder_id}/executions",
        web::get().to(get_reminder_executions_controller),
    );
    cfg.route(
        "/users/{user_id}/executions",
        web::get().to(get_user_executions_controller),
    );
    cfg.route(
        "/reminders/{reminder_id}/statistics",
        web::get().to(get_reminder_execution_statistics_controller),
    );
    cfg.route(
        "/users/{user_id}/statistics",
        web::get().to(get_user_execution_statistics_controller),
    );
}
