use std::sync::Arc;

use ai_score::{AiScore, AiScorer};
use analysis::{SpamPredictor, SpamVerdict};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use tower::util::ServiceExt;

use api::{build_router, cors_layer, ApiState};

struct AlwaysHam;

impl SpamPredictor for AlwaysHam {
    fn predict(&self, _normalized: &str) -> analysis::Result<SpamVerdict> {
        Ok(SpamVerdict::from_code(0))
    }
}

struct NoScore;

#[async_trait]
impl AiScorer for NoScore {
    async fn score(&self, _text: &str) -> AiScore {
        AiScore::percentage(0)
    }
}

fn app() -> Router {
    let state = Arc::new(ApiState {
        classifier: Arc::new(AlwaysHam),
        ai_scorer: Arc::new(NoScore),
        metrics_path: "/metrics".to_string(),
    });
    let cors = cors_layer(&["http://localhost:3000".to_string()]).expect("cors layer");
    build_router(state).layer(cors)
}

fn preflight(origin: &str) -> Request<Body> {
    Request::builder()
        .method(Method::OPTIONS)
        .uri("/analyze")
        .header(header::ORIGIN, origin)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type,x-trace-id")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn configured_origin_gets_credentialed_preflight() {
    let res = app()
        .oneshot(preflight("http://localhost:3000"))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let headers = res.headers();
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:3000"
    );
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "POST");
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_HEADERS],
        "content-type,x-trace-id"
    );
}

#[tokio::test]
async fn other_origins_are_not_allowed() {
    let res = app()
        .oneshot(preflight("http://evil.example"))
        .await
        .unwrap();

    assert!(res
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}

#[test]
fn unparsable_origin_fails_fast() {
    assert!(cors_layer(&["http://bad\norigin".to_string()]).is_err());
}
