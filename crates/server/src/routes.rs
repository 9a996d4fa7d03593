use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::Response,
    routing::post,
    Router,
};
use sea_orm::{ActiveModelBehavior, IntoActiveModel};
use serde::{Deserialize, Serialize};
use tower_http::trace::{
    DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer,
};
use tracing::{info, Level};

use service::{pagination::Window, RegistryService, Resource};

use crate::codec::WireFormat;
use crate::errors::ApiError;

/// Router state: the registry for one resource.
pub struct RegistryState<E: Resource> {
    pub service: Arc<RegistryService<E>>,
}

impl<E: Resource> Clone for RegistryState<E> {
    fn clone(&self) -> Self {
        Self { service: Arc::clone(&self.service) }
    }
}

/// Raw pagination parameters; parsed by [`Window::from_params`].
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub offset: Option<String>,
    pub limit: Option<String>,
}

async fn try_create<E, W>(state: &RegistryState<E>, body: &[u8]) -> Result<String, ApiError>
where
    E: Resource,
    E::Model: Serialize + IntoActiveModel<E::ActiveModel> + Send + Sync,
    E::ActiveModel: ActiveModelBehavior + Send,
    W: WireFormat,
{
    let input: E::Input = W::decode(body)?;
    let record = state.service.create(input).await?;
    Ok(W::encode_record(E::ELEMENT, &record)?)
}

async fn try_list<E, W>(state: &RegistryState<E>, query: &ListQuery) -> Result<String, ApiError>
where
    E: Resource,
    E::Model: Serialize + IntoActiveModel<E::ActiveModel> + Send + Sync,
    E::ActiveModel: ActiveModelBehavior + Send,
    W: WireFormat,
{
    let window = Window::from_params(query.offset.as_deref(), query.limit.as_deref())?;
    let records = state.service.list(window).await?;
    info!(
        collection = E::COLLECTION,
        offset = window.offset,
        limit = window.limit,
        count = records.len(),
        "list records"
    );
    Ok(W::encode_list(E::COLLECTION, E::ELEMENT, &records)?)
}

/// `POST {base}/` — decode one record, insert it, answer 201 with the stored row.
pub async fn create<E, W>(State(state): State<RegistryState<E>>, body: Bytes) -> Response
where
    E: Resource,
    E::Model: Serialize + IntoActiveModel<E::ActiveModel> + Send + Sync,
    E::ActiveModel: ActiveModelBehavior + Send,
    W: WireFormat,
{
    match try_create::<E, W>(&state, &body).await {
        Ok(body) => W::respond(StatusCode::CREATED, body),
        Err(e) => e.render::<W>(),
    }
}

/// `GET {base}/?offset=&limit=` — one page of records, ordered by id.
///
/// A query string the extractor rejects is answered in the wire format too.
pub async fn list<E, W>(
    State(state): State<RegistryState<E>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Response
where
    E: Resource,
    E::Model: Serialize + IntoActiveModel<E::ActiveModel> + Send + Sync,
    E::ActiveModel: ActiveModelBehavior + Send,
    W: WireFormat,
{
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return ApiError::BadRequest(rejection.body_text()).render::<W>(),
    };
    match try_list::<E, W>(&state, &query).await {
        Ok(body) => W::respond(StatusCode::OK, body),
        Err(e) => e.render::<W>(),
    }
}

/// Create and list routes for one resource under `base` (e.g. `/client`).
///
/// Both `{base}` and `{base}/` are served.
pub fn registry_router<E, W>(base: &str, service: Arc<RegistryService<E>>) -> Router
where
    E: Resource,
    E::Model: Serialize + IntoActiveModel<E::ActiveModel> + Send + Sync,
    E::ActiveModel: ActiveModelBehavior + Send,
    W: WireFormat,
{
    let base = base.trim_end_matches('/');
    let state = RegistryState { service };
    let mut router =
        Router::new().route(&format!("{base}/"), post(create::<E, W>).get(list::<E, W>));
    if !base.is_empty() {
        router = router.route(base, post(create::<E, W>).get(list::<E, W>));
    }
    router.with_state(state).layer(
        TraceLayer::new_for_http()
            // one INFO span per request
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
            // 5xx
            .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
    )
}
