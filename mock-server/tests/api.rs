use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, RecordedRequest};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get_request(uri: &str) -> Request<String> {
    Request::builder()
        .uri(uri)
        .header(http::header::USER_AGENT, "bioquery-test")
        .body(String::new())
        .unwrap()
}

fn form_request(uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(body.to_string())
        .unwrap()
}

// --- omim ---

#[tokio::test]
async fn omim_entry_echoes_params() {
    let resp = app()
        .oneshot(get_request("/api/entry/?apiKey=XXXX&mimNumber=141900"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echo: RecordedRequest = body_json(resp).await;
    assert_eq!(echo.service, "omim");
    assert_eq!(echo.resource, "entry");
    assert_eq!(echo.params["mimNumber"], "141900");
    assert_eq!(echo.user_agent.as_deref(), Some("bioquery-test"));
}

#[tokio::test]
async fn omim_nested_handler() {
    let resp = app()
        .oneshot(get_request("/api/entry/allelicVariantList/?apiKey=k&mimNumber=100100"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echo: RecordedRequest = body_json(resp).await;
    assert_eq!(echo.resource, "entry/allelicVariantList");
}

#[tokio::test]
async fn omim_search_decodes_term() {
    let resp = app()
        .oneshot(get_request("/api/search/geneMap/?apiKey=k&search=muscular%20dystrophy"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echo: RecordedRequest = body_json(resp).await;
    assert_eq!(echo.resource, "search/geneMap");
    assert_eq!(echo.params["search"], "muscular dystrophy");
}

#[tokio::test]
async fn omim_missing_api_key_returns_401() {
    let resp = app()
        .oneshot(get_request("/api/entry/?mimNumber=141900"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn omim_unknown_handler_and_missing_mim_number() {
    let resp = app()
        .oneshot(get_request("/api/referenceList/?apiKey=k"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = app()
        .oneshot(get_request("/api/entry/referenceList/?apiKey=k"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn omim_gene_map_needs_only_key() {
    let resp = app().oneshot(get_request("/api/genemap/?apiKey=k")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}

// --- uniprot ---

#[tokio::test]
async fn uniprot_entry_get() {
    let resp = app().oneshot(get_request("/uniprot/P13368")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echo: RecordedRequest = body_json(resp).await;
    assert_eq!(echo.service, "uniprot");
    assert_eq!(echo.method, "GET");
    assert_eq!(echo.resource, "P13368");
    assert!(echo.params.is_empty());
}

#[tokio::test]
async fn uniprot_fasta_is_plain_text() {
    let resp = app().oneshot(get_request("/uniprot/P20806.fasta")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[http::header::CONTENT_TYPE], "text/plain");
    let body = body_bytes(resp).await;
    assert!(body.starts_with(b">sp|P20806|"));
}

#[tokio::test]
async fn uniprot_query_form() {
    let resp = app()
        .oneshot(form_request("/uniprot/", "format=tab&query=name%3ACFTR"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echo: RecordedRequest = body_json(resp).await;
    assert_eq!(echo.method, "POST");
    assert_eq!(echo.params["query"], "name:CFTR");
}

#[tokio::test]
async fn uniprot_form_without_content_type_is_rejected() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/uniprot/")
                .body("query=x".to_string())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

// --- mapping ---

#[tokio::test]
async fn mapping_decodes_space_delimited_ids() {
    let resp = app()
        .oneshot(form_request("/mapping/", "from=ACC&query=P13368%20P20806&to=MIM_ID"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echo: RecordedRequest = body_json(resp).await;
    assert_eq!(echo.service, "mapping");
    assert_eq!(echo.params["query"], "P13368 P20806");
    assert_eq!(echo.params["to"], "MIM_ID");
}

#[tokio::test]
async fn mapping_missing_target_returns_400() {
    let resp = app()
        .oneshot(form_request("/mapping/", "from=ACC&query=P13368"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- journal ---

#[tokio::test]
async fn journal_records_requests_in_order() {
    use tower::Service;

    let mut app = app().into_service();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request("/api/genemap/?apiKey=k"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request("/uniprot/P13368.xml"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // rejected requests are not recorded
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request("/api/entry/?apiKey=k"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request("/requests"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let journal: Vec<RecordedRequest> = body_json(resp).await;
    assert_eq!(journal.len(), 2);
    assert_eq!(journal[0].resource, "genemap");
    assert_eq!(journal[1].resource, "P13368.xml");
}
