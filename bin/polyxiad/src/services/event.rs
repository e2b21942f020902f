use ntex::web;
use ntex::http;
use ntex::time::Millis;

use crate::models::{
  EventQuery, EventDetailOutcome, RetrieveError, RetrieveResult, SystemState,
  SystemStateRef,
};

/// Write the single response of a request,
/// every reply carries the cross origin header
fn reply(
  status: http::StatusCode,
  payload: Option<String>,
) -> web::HttpResponse {
  let mut res = web::HttpResponse::build(status);
  res.header(http::header::ACCESS_CONTROL_ALLOW_ORIGIN, "*");
  match payload {
    Some(payload) => res.content_type("application/json").body(payload),
    None => res.finish(),
  }
}

fn reply_outcome(outcome: EventDetailOutcome) -> web::HttpResponse {
  match outcome {
    EventDetailOutcome::Success(payload) => {
      reply(http::StatusCode::OK, Some(payload))
    }
    EventDetailOutcome::Suppressed => {
      reply(http::StatusCode::NO_CONTENT, None)
    }
    EventDetailOutcome::Failure => reply(http::StatusCode::BAD_REQUEST, None),
  }
}

/// Call the retriever, bounded by the configured deadline
async fn retrieve(state: &SystemState, query: &EventQuery) -> RetrieveResult {
  let deadline = Millis(state.config.timeout);
  let fut = state.retriever.retrieve_event_details(query, deadline);
  match ntex::time::timeout(deadline, fut).await {
    Ok(res) => res,
    Err(_) => Err(RetrieveError::Other(format!(
      "deadline of {}ms elapsed",
      state.config.timeout
    ))),
  }
}

/// Get the detail of an event
#[cfg_attr(feature = "dev", utoipa::path(
  get,
  tag = "Events",
  path = "/events/details",
  params(
    ("id" = String, Query, description = "Identifier of the event", example = "E1"),
    ("debug" = Option<String>, Query, description = "Set to `dummy` for the debug rendering"),
  ),
  responses(
    (status = 200, description = "Detail of the event", content_type = "application/json"),
    (status = 204, description = "The event is not surfaced"),
    (status = 400, description = "Missing id or the event can't be retrieved"),
  ),
))]
#[web::get("/events/details")]
pub async fn get_event_details(
  state: web::types::State<SystemStateRef>,
  req: web::HttpRequest,
) -> web::HttpResponse {
  let query = match EventQuery::from_query_string(req.query_string()) {
    Ok(query) => query,
    Err(err) => {
      log::debug!("event::get_event_details: {err}");
      return reply(http::StatusCode::BAD_REQUEST, None);
    }
  };
  let res = retrieve(&state, &query).await;
  match &res {
    Err(RetrieveError::Suppressed) => {
      log::debug!("event::get_event_details: {} is suppressed", query.id);
    }
    Err(RetrieveError::Other(err)) => {
      log::warn!("event::get_event_details: {}: {err}", query.id);
    }
    Ok(None) => {
      log::warn!("event::get_event_details: {}: empty payload", query.id);
    }
    Ok(Some(_)) => {}
  }
  reply_outcome(EventDetailOutcome::from(res))
}

pub fn ntex_config(config: &mut web::ServiceConfig) {
  config.service(get_event_details);
}
