use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use truck_load::catalog::{self, CATALOG, CatalogEntry, DEFAULT_TRUCK, LoadLine, LoadRequest};
use truck_load::packer::ShelfPacker;
use truck_load::types::Rect;

#[derive(Deserialize, Serialize)]
struct CheckRequest {
    #[serde(default)]
    truck: Option<Rect>,
    #[serde(default)]
    items: Vec<LoadLine>,
}

#[derive(Serialize, Debug)]
struct CheckResponse {
    fits: bool,
    message: &'static str,
    item_count: usize,
    rows: usize,
}

#[derive(Serialize)]
struct CatalogResponse {
    items: &'static [CatalogEntry],
    default_truck: Rect,
}

async fn catalog_handler() -> Json<CatalogResponse> {
    Json(CatalogResponse {
        items: &CATALOG,
        default_truck: DEFAULT_TRUCK,
    })
}

async fn check(
    Json(req): Json<CheckRequest>,
) -> Result<Json<CheckResponse>, (StatusCode, String)> {
    tracing::info!(
        body = serde_json::to_string(&req).unwrap_or_default(),
        "POST /check"
    );

    let truck = req.truck.unwrap_or(DEFAULT_TRUCK);
    let request = LoadRequest::new(truck, req.items)
        .into_packing_request()
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let report = ShelfPacker::new(request.bound).run(&request.items);
    tracing::info!(
        fits = report.fits,
        placed = report.placed,
        total = report.total,
        rows = report.row_count(),
        "load checked"
    );

    Ok(Json(CheckResponse {
        fits: report.fits,
        message: catalog::message(report.fits),
        item_count: report.total,
        rows: report.row_count(),
    }))
}

fn app() -> Router {
    Router::new()
        .route("/up", get(|| async { "ok" }))
        .route("/catalog", get(catalog_handler))
        .route("/check", post(check))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

fn main() {
    let _sentry = std::env::var("SENTRY_DSN").ok().map(|dsn| {
        sentry::init((
            dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("development.log")
        .expect("failed to open development.log");

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_max_level(Level::INFO)
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3001".to_string());
    let addr = format!("0.0.0.0:{port}");

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("failed to build tokio runtime")
        .block_on(async {
            let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
            eprintln!("Listening on {addr}");
            axum::serve(listener, app()).await.unwrap();
        });
}
