use httpclient::{HttpClientError, RequestBuilder};
use tempfile::tempdir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_download_creates_missing_directories() {
    if !can_bind_localhost() {
        return;
    }

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/archive.tar"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1u8, 2, 3, 4]))
        .mount(&server)
        .await;

    let dir = tempdir().expect("tempdir");
    let destination = dir.path().join("a").join("b").join("c").join("archive.tar");

    RequestBuilder::new(format!("{}/archive.tar", server.uri()), "GET")
        .download_file(&destination)
        .await
        .expect("download should succeed");

    assert_eq!(std::fs::read(&destination).expect("read"), vec![1u8, 2, 3, 4]);
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_download_truncates_existing_file() {
    if !can_bind_localhost() {
        return;
    }

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/short"))
        .respond_with(ResponseTemplate::new(200).set_body_string("new"))
        .mount(&server)
        .await;

    let dir = tempdir().expect("tempdir");
    let destination = dir.path().join("file.txt");
    std::fs::write(&destination, "a much longer previous body").expect("seed file");

    RequestBuilder::new(format!("{}/short", server.uri()), "GET")
        .download_file(&destination)
        .await
        .expect("download should succeed");

    assert_eq!(std::fs::read_to_string(&destination).expect("read"), "new");
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_download_propagates_request_failure() {
    let port = match std::net::TcpListener::bind("127.0.0.1:0") {
        Ok(listener) => listener.local_addr().expect("addr").port(),
        Err(_) => return,
    };

    let dir = tempdir().expect("tempdir");
    let parent = dir.path().join("never-created");
    let destination = parent.join("out.bin");

    let err = RequestBuilder::new(format!("http://127.0.0.1:{}/file", port), "GET")
        .download_file(&destination)
        .await
        .expect_err("unreachable server");

    assert!(matches!(err, HttpClientError::Http(_)));
    assert!(!destination.exists());
    assert!(!parent.exists());
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_download_reports_unwritable_destination() {
    if !can_bind_localhost() {
        return;
    }

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(ResponseTemplate::new(200).set_body_string("data"))
        .mount(&server)
        .await;

    let dir = tempdir().expect("tempdir");
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "a file, not a directory").expect("seed file");

    let err = RequestBuilder::new(format!("{}/data", server.uri()), "GET")
        .download_file(blocker.join("out.txt"))
        .await
        .expect_err("parent is a file");
    assert!(matches!(err, HttpClientError::Io(_)));
}
