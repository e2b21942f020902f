use utoipa::OpenApi;

use crate::models::EventQuery;

use super::{event, system};

/// Set the server prefix and description of the document
struct ApiModifier;

impl utoipa::Modify for ApiModifier {
  fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
    let server = utoipa::openapi::ServerBuilder::default()
      .url(super::SCOPE)
      .build();
    openapi.info.title = "Polyxia Event Detail".to_owned();
    openapi.info.version = format!("v{}", env!("CARGO_PKG_VERSION"));
    openapi.info.description =
      Some(include_str!("../../specs/readme.md").to_owned());
    openapi.servers = Some(vec![server]);
  }
}

#[derive(OpenApi)]
#[openapi(
  paths(
    event::get_event_details,
    system::head_ping,
    system::get_version,
  ),
  components(schemas(EventQuery)),
  tags(
    (name = "Events", description = "Event detail endpoints."),
    (name = "System", description = "General system endpoints."),
  ),
  modifiers(&ApiModifier),
)]
pub(crate) struct ApiDoc;
