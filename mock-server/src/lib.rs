use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

/// OMIM handlers and the parameters each one refuses to run without.
const OMIM_HANDLERS: &[(&str, &[&str])] = &[
    ("entry", &["mimNumber"]),
    ("clinicalSynopsis", &["mimNumber"]),
    ("search/entry", &["search"]),
    ("search/geneMap", &["search"]),
    ("search/clinicalSynopsis", &["search"]),
    ("genemap", &[]),
    ("entry/allelicVariantList", &["mimNumber"]),
    ("entry/referenceList", &["mimNumber"]),
];

/// What the server saw for one request. Echoed back as the response body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedRequest {
    pub service: String,
    pub method: String,
    pub resource: String,
    pub params: BTreeMap<String, String>,
    pub user_agent: Option<String>,
}

pub type Journal = Arc<RwLock<Vec<RecordedRequest>>>;

type Fields = BTreeMap<String, String>;

pub fn app() -> Router {
    let journal: Journal = Arc::new(RwLock::new(Vec::new()));
    Router::new()
        .route("/api/{*handler}", get(omim))
        .route("/uniprot/", get(uniprot_search_get).post(uniprot_search_form))
        .route("/uniprot/{resource}", get(uniprot_entry).post(uniprot_entry_form))
        .route("/mapping/", post(mapping))
        .route("/requests", get(list_requests))
        .with_state(journal)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn record(journal: &Journal, request: RecordedRequest) -> RecordedRequest {
    tracing::info!(service = %request.service, resource = %request.resource, "request");
    journal.write().await.push(request.clone());
    request
}

async fn omim(
    State(journal): State<Journal>,
    Path(handler): Path<String>,
    Query(params): Query<Fields>,
    headers: HeaderMap,
) -> Response {
    let handler = handler.trim_end_matches('/').to_string();
    let Some((_, required)) = OMIM_HANDLERS.iter().find(|(name, _)| *name == handler) else {
        return (StatusCode::NOT_FOUND, format!("unknown handler '{handler}'")).into_response();
    };
    if !params.contains_key("apiKey") {
        return (StatusCode::UNAUTHORIZED, "apiKey is required").into_response();
    }
    for key in required.iter() {
        if !params.contains_key(*key) {
            return (StatusCode::BAD_REQUEST, format!("missing parameter '{key}'")).into_response();
        }
    }
    let request = RecordedRequest {
        service: "omim".to_string(),
        method: "GET".to_string(),
        resource: handler,
        params,
        user_agent: user_agent(&headers),
    };
    Json(record(&journal, request).await).into_response()
}

async fn uniprot(
    journal: &Journal,
    method: &str,
    resource: String,
    params: Fields,
    headers: &HeaderMap,
) -> Response {
    let request = RecordedRequest {
        service: "uniprot".to_string(),
        method: method.to_string(),
        resource,
        params,
        user_agent: user_agent(headers),
    };
    let request = record(journal, request).await;
    match request.resource.strip_suffix(".fasta") {
        Some(id) => (
            [(header::CONTENT_TYPE, "text/plain")],
            format!(">sp|{id}|MOCK_HUMAN Mock protein\nMKTAYIAKQRQISFVKSHFSRQ\nLEERLGLIEVQAPILSRVGDGT\n"),
        )
            .into_response(),
        None => Json(request).into_response(),
    }
}

async fn uniprot_search_get(State(journal): State<Journal>, headers: HeaderMap) -> Response {
    uniprot(&journal, "GET", String::new(), Fields::new(), &headers).await
}

async fn uniprot_search_form(
    State(journal): State<Journal>,
    headers: HeaderMap,
    Form(params): Form<Fields>,
) -> Response {
    uniprot(&journal, "POST", String::new(), params, &headers).await
}

async fn uniprot_entry(
    State(journal): State<Journal>,
    Path(resource): Path<String>,
    headers: HeaderMap,
) -> Response {
    uniprot(&journal, "GET", resource, Fields::new(), &headers).await
}

async fn uniprot_entry_form(
    State(journal): State<Journal>,
    Path(resource): Path<String>,
    headers: HeaderMap,
    Form(params): Form<Fields>,
) -> Response {
    uniprot(&journal, "POST", resource, params, &headers).await
}

async fn mapping(
    State(journal): State<Journal>,
    headers: HeaderMap,
    Form(params): Form<Fields>,
) -> Response {
    for key in ["from", "to", "query"] {
        if !params.contains_key(key) {
            return (StatusCode::BAD_REQUEST, format!("missing parameter '{key}'")).into_response();
        }
    }
    let request = RecordedRequest {
        service: "mapping".to_string(),
        method: "POST".to_string(),
        resource: String::new(),
        params,
        user_agent: user_agent(&headers),
    };
    Json(record(&journal, request).await).into_response()
}

async fn list_requests(State(journal): State<Journal>) -> Json<Vec<RecordedRequest>> {
    Json(journal.read().await.clone())
}
