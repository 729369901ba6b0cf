//! HTTP routes for the dashboard and inference endpoints.

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::error::Result;
use crate::web::context::AppContext;
use crate::web::dashboard::build_dashboard;

/// Build the service router over the shared application context.
pub fn router(context: Arc<AppContext>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/go", get(classify))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(context)
}

/// Bind and serve until the process is terminated.
pub async fn serve(context: Arc<AppContext>, addr: SocketAddr) -> Result<()> {
    let app = router(context);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

/// Query parameters of the classification endpoint. A missing `query`
/// parameter is the empty message.
#[derive(Debug, Deserialize)]
struct ClassifyParams {
    #[serde(default)]
    query: String,
}

/// Classification payload: the echoed query and one 0/1 label per category.
#[derive(Debug, Serialize)]
struct ClassifyResponse {
    query: String,
    classification: BTreeMap<String, u8>,
}

async fn index(State(context): State<Arc<AppContext>>) -> Response {
    match build_dashboard(context.corpus()) {
        Some(dashboard) => Json(dashboard).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "no data available" })),
        )
            .into_response(),
    }
}

async fn classify(
    State(context): State<Arc<AppContext>>,
    Query(params): Query<ClassifyParams>,
) -> Response {
    match context.pipeline().predict(&params.query) {
        Ok(prediction) => {
            let classification: BTreeMap<String, u8> =
                prediction.labels().iter().cloned().collect();
            Json(ClassifyResponse {
                query: params.query,
                classification,
            })
            .into_response()
        }
        Err(err) => {
            error!(%err, "prediction failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "prediction failed" })),
            )
                .into_response()
        }
    }
}

async fn health() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::corpus::LabeledCorpus;
    use crate::ml::boost::BoostConfig;
    use crate::ml::pipeline::{ClassificationPipeline, PipelineConfig};

    fn trained_parts() -> (Vec<String>, Vec<String>, Vec<Vec<u8>>, ClassificationPipeline) {
        let messages: Vec<String> = [
            "we need water urgently",
            "please send drinking water",
            "water supply is gone",
            "children need food",
            "no food since monday",
            "send food rations please",
            "hello how are you",
            "thanks for the update",
            "weather report for today",
        ]
        .iter()
        .map(|m| m.to_string())
        .collect();
        let categories = vec!["water".to_string(), "food".to_string()];
        let labels = vec![
            vec![1, 0],
            vec![1, 0],
            vec![1, 0],
            vec![0, 1],
            vec![0, 1],
            vec![0, 1],
            vec![0, 0],
            vec![0, 0],
            vec![0, 0],
        ];

        let config = PipelineConfig {
            boost: BoostConfig {
                n_estimators: 30,
                learning_rate: 0.3,
                ..BoostConfig::default()
            },
            ..PipelineConfig::default()
        };
        let pipeline =
            ClassificationPipeline::fit(&config, &messages, &categories, &labels).unwrap();
        (messages, categories, labels, pipeline)
    }

    fn test_context() -> Arc<AppContext> {
        let (messages, categories, labels, pipeline) = trained_parts();
        let corpus = LabeledCorpus::new(messages, categories, labels).unwrap();
        Arc::new(AppContext::new(corpus, pipeline))
    }

    fn empty_context() -> Arc<AppContext> {
        // Trained pipeline over an empty corpus: only the dashboard is affected
        let (_, categories, _, pipeline) = trained_parts();
        let corpus = LabeledCorpus::new(vec![], categories, vec![]).unwrap();
        Arc::new(AppContext::new(corpus, pipeline))
    }

    #[tokio::test]
    async fn test_classify_returns_labels() {
        let context = test_context();
        let response = classify(
            State(context),
            Query(ClassifyParams {
                query: "we need water urgently".to_string(),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let payload: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(payload["query"], "we need water urgently");
        assert_eq!(payload["classification"]["water"], 1);
    }

    #[tokio::test]
    async fn test_missing_query_is_the_empty_message() {
        let context = test_context();
        let response = classify(
            State(context),
            Query(ClassifyParams {
                query: String::new(),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let payload: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(payload["classification"]["water"], 0);
        assert_eq!(payload["classification"]["food"], 0);
    }

    #[tokio::test]
    async fn test_dashboard_with_data() {
        let context = test_context();
        let response = index(State(context)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_dashboard_empty_corpus_is_not_found() {
        let context = empty_context();
        let response = index(State(context)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let payload: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(payload["error"], "no data available");
    }

    #[tokio::test]
    async fn test_health() {
        assert_eq!(health().await, "OK");
    }
}
