use std::sync::Arc;

use axum::{
    Form, Router,
    extract::State,
    response::Html,
    routing::{get, post},
};
use log::{debug, info};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::output;
use crate::session::{History, Pipeline};

/// Shared state handed to every route handler
#[derive(Clone)]
struct AppState {
    pipeline: Arc<Pipeline>,
    /// Held for a whole submission so runs never overlap
    history: Arc<Mutex<History>>,
}

#[derive(Debug, Deserialize)]
struct SummarizeForm {
    #[serde(default)]
    url: String,
}

/// Build the router with a fresh, empty history
pub fn router(pipeline: Pipeline) -> Router {
    let state = AppState {
        pipeline: Arc::new(pipeline),
        history: Arc::new(Mutex::new(History::new())),
    };

    Router::new()
        .route("/", get(handle_index))
        .route("/summarize", post(handle_summarize))
        .route("/health", get(handle_health))
        .with_state(state)
}

/// Bind `bind_addr` and serve until the process is terminated
pub async fn serve(bind_addr: &str, pipeline: Pipeline) -> eyre::Result<()> {
    let app = router(pipeline);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);
    println!("Summarizer running at http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

async fn handle_index(State(state): State<AppState>) -> Html<String> {
    let history = state.history.lock().await;
    Html(output::render_page("", None, &history))
}

async fn handle_summarize(State(state): State<AppState>, Form(form): Form<SummarizeForm>) -> Html<String> {
    let mut history = state.history.lock().await;
    debug!("Submission with {} records in history", history.len());

    let outcome = state.pipeline.submit(&mut history, &form.url).await;
    Html(output::render_page(&form.url, Some(&outcome), &history))
}

async fn handle_health() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::tests::stub_pipeline;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    async fn body_text(resp: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn submit(url: &str) -> Request<Body> {
        let encoded = url.replace(':', "%3A").replace('/', "%2F").replace('?', "%3F").replace('=', "%3D");
        Request::builder()
            .method("POST")
            .uri("/summarize")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(format!("url={encoded}")))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (pipeline, _calls) = stub_pipeline(true, true, true);
        let resp = router(pipeline)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_text(resp).await, "ok");
    }

    #[tokio::test]
    async fn test_index_renders_form() {
        let (pipeline, _calls) = stub_pipeline(true, true, true);
        let resp = router(pipeline)
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let page = body_text(resp).await;
        assert!(page.contains("Generate Summary"));
    }

    #[tokio::test]
    async fn test_empty_submission_warns() {
        let (pipeline, calls) = stub_pipeline(true, true, true);
        let resp = router(pipeline).oneshot(submit("")).await.unwrap();
        let page = body_text(resp).await;
        assert!(page.contains("Please enter a YouTube URL!"));
        assert_eq!(calls.total(), 0);
    }

    #[tokio::test]
    async fn test_history_accumulates_across_requests() {
        let (pipeline, _calls) = stub_pipeline(true, true, true);
        let app = router(pipeline);

        app.clone().oneshot(submit("https://youtu.be/aaaaaaaaaaa")).await.unwrap();
        let resp = app.clone().oneshot(submit("https://youtu.be/bbbbbbbbbbb")).await.unwrap();
        let page = body_text(resp).await;

        assert!(page.contains("Summary generated successfully!"));
        let newer = page.find("Summary 1: Video bbbbbbbbbbb").unwrap();
        let older = page.find("Summary 2: Video aaaaaaaaaaa").unwrap();
        assert!(newer < older);

        let resp = app.oneshot(Request::builder().uri("/").body(Body::empty()).unwrap()).await.unwrap();
        assert!(body_text(resp).await.contains("Previous Summaries"));
    }

    #[tokio::test]
    async fn test_failed_submission_shows_error() {
        let (pipeline, _calls) = stub_pipeline(true, false, true);
        let resp = router(pipeline).oneshot(submit("https://youtu.be/dQw4w9WgXcQ")).await.unwrap();
        let page = body_text(resp).await;
        assert!(page.contains("data-kind=\"transcript-unavailable\""));
        assert!(!page.contains("Previous Summaries"));
    }
}
