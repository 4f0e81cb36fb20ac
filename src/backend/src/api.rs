use crate::{
    config::AppConfig,
    gateway_client::GatewayStatusSource,
    http_client::handle_service_result,
};
use actix_files::NamedFile;
use actix_web::{web, HttpResponse};
use log::{debug, error};
use serde_valid::Validate;
use simgate_ui_core::{FrontendConfig, UnlockRequest};

#[derive(Clone)]
pub struct Api<Client>
where
    Client: GatewayStatusSource + 'static,
{
    pub gateway: Client,
}

impl<Client> Api<Client>
where
    Client: GatewayStatusSource + 'static,
{
    pub fn new(gateway: Client) -> Self {
        Api { gateway }
    }

    pub async fn index() -> actix_web::Result<NamedFile> {
        debug!("index() called");
        Ok(NamedFile::open(&AppConfig::get().paths.index_html)?)
    }

    pub async fn config() -> HttpResponse {
        debug!("config() called");

        let config = AppConfig::get();
        HttpResponse::Ok().json(FrontendConfig {
            console_url: config.gateway.console_url.clone(),
            poll_interval_ms: config.poll.interval_ms,
        })
    }

    pub async fn status(api: web::Data<Self>) -> HttpResponse {
        debug!("status() called");
        handle_service_result(api.gateway.snapshot().await, "status")
    }

    pub async fn unlock(body: web::Json<UnlockRequest>, api: web::Data<Self>) -> HttpResponse {
        debug!("unlock() called");

        let request = body.into_inner();
        if let Err(e) = request.validate() {
            error!("unlock rejected: malformed PIN: {e}");
            return HttpResponse::BadRequest().body("PIN must be 4 to 8 digits");
        }

        handle_service_result(api.gateway.submit_pin(request).await, "unlock")
    }

    pub async fn healthcheck(api: web::Data<Self>) -> HttpResponse {
        debug!("healthcheck() called");

        match api.gateway.firmware_info().await {
            Ok(info) if info.mismatch => HttpResponse::ServiceUnavailable().json(&info),
            Ok(info) => HttpResponse::Ok().json(&info),
            Err(e) => {
                error!("healthcheck failed: {e:#}");
                HttpResponse::InternalServerError().body(e.to_string())
            }
        }
    }

    pub async fn version() -> HttpResponse {
        HttpResponse::Ok().body(env!("CARGO_PKG_VERSION"))
    }
}
