use actix_web::{web, HttpResponse};
use nuntius_scheduler_api_structs::get_service_health::*;
use nuntius_scheduler_infra::NuntiusContext;

async fn status(ctx: web::Data<NuntiusContext>) -> HttpResponse {
    HttpResponse::Ok().json(APIResponse {
        message: "Nuntius is up and sending reminders".into(),
        spreadsheet_sync: ctx.services.sheet_sync.is_enabled(),
        reminders_job: ctx.config.reminders_job_enabled,
    })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(status));
}
