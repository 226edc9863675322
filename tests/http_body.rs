use httpclient::http::{RequestBody, FORM_URLENCODED};
use httpclient::RequestBuilder;
use tempfile::tempdir;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_raw_body_sent() {
    if !can_bind_localhost() {
        return;
    }

    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/body"))
        .and(body_string("payload"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;

    let body = RequestBuilder::new(format!("{}/body", server.uri()), "PUT")
        .with_raw_data("payload")
        .execute()
        .await
        .expect("request should succeed");
    assert_eq!(body, b"ok");

    let requests = server.received_requests().await.expect("requests");
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("content-type").is_none());
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_form_body_forces_post() {
    if !can_bind_localhost() {
        return;
    }

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/form"))
        .and(header("content-type", FORM_URLENCODED))
        .and(body_string("name=rust+lang&tag=a%26b"))
        .respond_with(ResponseTemplate::new(201).set_body_string("created"))
        .mount(&server)
        .await;

    let body = RequestBuilder::new(format!("{}/form", server.uri()), "GET")
        .with_headers([("Content-Type", "text/plain")])
        .with_form_data([("name", "rust lang"), ("tag", "a&b")])
        .execute()
        .await
        .expect("request should succeed");
    assert_eq!(body, b"created");

    let requests = server.received_requests().await.expect("requests");
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].headers.get_all("content-type").iter().count(), 1);
}

async fn upload_and_inspect(contents: &[u8]) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_string("stored"))
        .mount(&server)
        .await;

    let dir = tempdir().expect("tempdir");
    let source = dir.path().join("report.bin");
    std::fs::write(&source, contents).expect("write upload");

    let builder = RequestBuilder::new(format!("{}/upload", server.uri()), "GET")
        .with_file_data(&source, "document")
        .expect("attach file");
    let RequestBody::File(upload) = builder.body() else {
        panic!("expected file body");
    };
    let expected_len =
        upload.preamble().len() as u64 + contents.len() as u64 + upload.closing().len() as u64;
    assert_eq!(builder.content_length(), expected_len);

    let body = builder.execute().await.expect("request should succeed");
    assert_eq!(body, b"stored");

    let requests = server.received_requests().await.expect("requests");
    assert_eq!(requests.len(), 1);
    let request = &requests[0];

    let content_length = request
        .headers
        .get("content-length")
        .expect("content-length header")
        .to_str()
        .expect("ascii header");
    assert_eq!(content_length, expected_len.to_string());
    assert_eq!(request.body.len() as u64, expected_len);

    let content_type = request
        .headers
        .get("content-type")
        .expect("content-type header")
        .to_str()
        .expect("ascii header");
    assert_eq!(
        content_type,
        format!("multipart/form-data; boundary={}", upload.boundary())
    );

    let preamble = upload.preamble();
    let closing = upload.closing();
    assert!(request.body.starts_with(preamble.as_bytes()));
    assert!(request.body.ends_with(closing.as_bytes()));
    assert_eq!(
        &request.body[preamble.len()..request.body.len() - closing.len()],
        contents
    );
    assert!(preamble.contains("name=\"document\"; filename=\"report.bin\""));
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_multipart_upload_of_empty_file() {
    if !can_bind_localhost() {
        return;
    }
    upload_and_inspect(b"").await;
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_multipart_upload_of_multi_kb_file() {
    if !can_bind_localhost() {
        return;
    }
    let contents: Vec<u8> = (0..12 * 1024).map(|i| (i % 251) as u8).collect();
    upload_and_inspect(&contents).await;
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_multipart_ignores_user_content_length() {
    if !can_bind_localhost() {
        return;
    }

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_string("stored"))
        .mount(&server)
        .await;

    let dir = tempdir().expect("tempdir");
    let source = dir.path().join("notes.txt");
    std::fs::write(&source, "some file contents").expect("write upload");

    let builder = RequestBuilder::new(format!("{}/upload", server.uri()), "POST")
        .with_headers([("Content-Length", "1")])
        .with_file_data(&source, "notes")
        .expect("attach file");
    let expected_len = builder.content_length();

    let body = builder.execute().await.expect("request should succeed");
    assert_eq!(body, b"stored");

    let requests = server.received_requests().await.expect("requests");
    assert_eq!(requests.len(), 1);
    let lengths: Vec<_> = requests[0]
        .headers
        .get_all("content-length")
        .iter()
        .map(|value| value.to_str().expect("ascii header").to_string())
        .collect();
    assert_eq!(lengths, vec![expected_len.to_string()]);
    assert_eq!(requests[0].body.len() as u64, expected_len);
}
