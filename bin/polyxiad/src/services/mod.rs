use ntex::web;

use polyxia_error::http::HttpError;

#[cfg(feature = "dev")]
mod openapi;

mod event;
mod system;

/// Every route is served under this scope
pub const SCOPE: &str = "/api";

pub async fn unhandled() -> Result<web::HttpResponse, HttpError> {
  Err(HttpError::not_found("Route or method unhandled"))
}

pub fn ntex_config(config: &mut web::ServiceConfig) {
  #[cfg(feature = "dev")]
  {
    use utoipa::OpenApi;
    use polyxia_utils::ntex::swagger;
    use openapi::ApiDoc;

    let swagger_conf =
      swagger::SwaggerConfig::new(ApiDoc::openapi(), "/explorer/swagger.json");
    config.service(
      web::scope("/explorer/")
        .state(swagger_conf)
        .configure(swagger::register),
    );
  }
  config.service(
    web::scope(SCOPE)
      .configure(event::ntex_config)
      .configure(system::ntex_config),
  );
}
