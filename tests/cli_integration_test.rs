use async_trait::async_trait;
use gamequery_cli::{app, DetectRequest, Detection, Detector, QueryError, Response};
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
struct StubDetector {
    result: Result<(String, serde_json::Value), String>,
    requests: Arc<Mutex<Vec<DetectRequest>>>,
}

impl StubDetector {
    fn answering(protocol: &str, response: serde_json::Value) -> Self {
        Self {
            result: Ok((protocol.to_string(), response)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Detector for StubDetector {
    async fn detect(&self, request: &DetectRequest) -> Result<Detection, QueryError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.result {
            Ok((protocol, serde_json::Value::Object(map))) => Ok(Detection {
                protocol: protocol.clone(),
                response: map.clone(),
            }),
            Ok((protocol, _)) => Ok(Detection {
                protocol: protocol.clone(),
                response: Response::new(),
            }),
            Err(message) => Err(QueryError::Other(message.clone())),
        }
    }
}

struct Outcome {
    code: i32,
    stdout: String,
    stderr: String,
}

async fn invoke(args: &[&str], env: &[(&str, &str)], detector: StubDetector) -> Outcome {
    let env: HashMap<String, String> = env
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let argv: Vec<String> = std::iter::once("gamequery")
        .chain(args.iter().copied())
        .map(str::to_string)
        .collect();

    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let code = app::run(argv, &env, detector, &mut stdout, &mut stderr).await;

    Outcome {
        code,
        stdout: String::from_utf8(stdout).unwrap(),
        stderr: String::from_utf8(stderr).unwrap(),
    }
}

#[tokio::test]
async fn test_compact_output_scenario() {
    let detector = StubDetector::answering("source", json!({"Online": true, "Players": 3}));
    let out = invoke(
        &["-ip", "127.0.0.1", "-port", "27015", "-timeout", "1000"],
        &[],
        detector.clone(),
    )
    .await;

    assert_eq!(out.code, 0);
    assert_eq!(out.stdout, "{\"Protocol\":\"source\",\"Online\":true,\"Players\":3}\n\n");
    assert!(out.stderr.is_empty());

    let requests = detector.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].address, "127.0.0.1");
    assert_eq!(requests[0].port, 27015);
    assert_eq!(requests[0].timeout, Some(std::time::Duration::from_millis(1000)));
}

#[tokio::test]
async fn test_indented_output() {
    let detector = StubDetector::answering("source", json!({"Online": true}));
    let out = invoke(&["--ip", "127.0.0.1", "--port", "27015", "-indent"], &[], detector).await;

    assert_eq!(out.code, 0);
    assert_eq!(out.stdout, "{\n   \"Protocol\": \"source\",\n   \"Online\": true\n}\n\n");
}

#[tokio::test]
async fn test_output_is_repeatable() {
    let detector = StubDetector::answering("minecraft", json!({"Version": "1.20", "Players": 12}));
    let args = ["-ip", "mc.example", "-port", "25565"];

    let first = invoke(&args, &[], detector.clone()).await;
    let second = invoke(&args, &[], detector.clone()).await;

    assert_eq!(first.code, 0);
    assert_eq!(first.stdout, second.stdout);
    assert_eq!(detector.calls(), 2);
}

#[tokio::test]
async fn test_env_fallback_used() {
    let detector = StubDetector::answering("source", json!({}));
    let out = invoke(
        &[],
        &[("GQ_IP", "10.1.1.1"), ("GQ_PORT", "27016"), ("GQ_TIMEOUT", "900")],
        detector.clone(),
    )
    .await;

    assert_eq!(out.code, 0);
    assert_eq!(out.stdout, "{\"Protocol\":\"source\"}\n\n");
    let requests = detector.requests.lock().unwrap();
    assert_eq!(requests[0].address, "10.1.1.1");
    assert_eq!(requests[0].port, 27016);
    // The timeout flag default is always usable, so GQ_TIMEOUT is not consulted.
    assert_eq!(requests[0].timeout, Some(std::time::Duration::from_millis(5)));
}

#[tokio::test]
async fn test_missing_ip() {
    let detector = StubDetector::answering("source", json!({}));
    let out = invoke(&["-port", "27015"], &[], detector.clone()).await;

    assert_eq!(out.code, 1);
    assert!(out.stdout.is_empty());
    assert!(out.stderr.starts_with("please specify an IP\n\n"));
    assert!(out.stderr.contains("GQ_IP"), "usage should follow the message");
    assert_eq!(detector.calls(), 0);
}

#[tokio::test]
async fn test_invalid_env_port() {
    let out = invoke(
        &["-ip", "127.0.0.1"],
        &[("GQ_PORT", "abc")],
        StubDetector::answering("source", json!({})),
    )
    .await;

    assert_eq!(out.code, 1);
    assert!(out.stderr.starts_with("unable to process GQ_PORT (abc)\n\n"));
    assert!(out.stdout.is_empty());
}

#[tokio::test]
async fn test_out_of_range_port_flag() {
    let out = invoke(
        &["-ip", "127.0.0.1", "-port", "70000"],
        &[],
        StubDetector::answering("source", json!({})),
    )
    .await;

    assert_eq!(out.code, 1);
    assert!(out.stderr.starts_with("please specify a Port"));
}

#[tokio::test]
async fn test_help_exits_one_with_usage_only() {
    let detector = StubDetector::answering("source", json!({}));
    let out = invoke(&["-ip", "127.0.0.1", "-port", "1", "-help"], &[], detector.clone()).await;

    assert_eq!(out.code, 1);
    assert!(out.stdout.is_empty());
    assert!(out.stderr.contains("Displays this help message"));
    assert!(!out.stderr.contains("help requested"));
    assert_eq!(detector.calls(), 0);
}

#[tokio::test]
async fn test_validation_errors_reported_before_help() {
    let out = invoke(&["-help"], &[], StubDetector::answering("source", json!({}))).await;

    assert_eq!(out.code, 1);
    assert!(out.stderr.starts_with("please specify an IP"));
}

#[tokio::test]
async fn test_unparseable_port_flag_is_config_error() {
    let out = invoke(
        &["-ip", "127.0.0.1", "-port", "abc"],
        &[],
        StubDetector::answering("source", json!({})),
    )
    .await;

    assert_eq!(out.code, 1);
    assert!(out.stderr.lines().next().unwrap().contains("abc"));
    assert!(out.stderr.contains("GQ_PORT"));
}

#[tokio::test]
async fn test_query_failure() {
    let out = invoke(
        &["-ip", "127.0.0.1", "-port", "27015"],
        &[],
        StubDetector::failing("connection refused"),
    )
    .await;

    assert_eq!(out.code, 2);
    assert_eq!(out.stderr, "failed to query: connection refused\n\n");
    assert!(out.stdout.is_empty());
}
