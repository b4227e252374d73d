use http::{Method, Response};
use http_body_util::Full;
use http_fixtures::{FixtureServer, Request};
use hyper::body::Bytes;
use std::io::Write;

fn lorem(_: &Request) -> Response<Full<Bytes>> {
    Response::new(Full::new(Bytes::from("Lorem ipsum dolor sit amet")))
}

#[tokio::test]
async fn a_static_file_route_serves_the_file_bytes() {
    // Arrange
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"Lorem ipsum dolor sit amet").unwrap();

    let server = FixtureServer::builder()
        .serve_file("/data", file.path())
        .start()
        .await;

    // Act
    let response = reqwest::get(format!("{}/data", server.uri())).await.unwrap();

    // Assert
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "Lorem ipsum dolor sit amet");
}

#[tokio::test]
async fn a_static_file_is_read_at_request_time() {
    // Arrange
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"before").unwrap();

    let server = FixtureServer::builder()
        .serve_file("/data", file.path())
        .start()
        .await;

    let body = reqwest::get(format!("{}/data", server.uri()))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(body, "before");

    // Act - rewrite the fixture file while the server is running
    std::fs::write(file.path(), b"after").unwrap();

    // Assert
    let body = reqwest::get(format!("{}/data", server.uri()))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(body, "after");
}

#[tokio::test]
async fn a_missing_fixture_file_yields_a_404() {
    // Arrange
    let server = FixtureServer::builder()
        .serve_file("/data", "/definitely/not/a/real/file")
        .start()
        .await;

    // Act
    let status = reqwest::get(format!("{}/data", server.uri()))
        .await
        .unwrap()
        .status();

    // Assert
    assert_eq!(status, 404);
}

#[tokio::test]
async fn an_unregistered_path_yields_a_404() {
    // Arrange - a single route, which we won't hit
    let server = FixtureServer::builder().handle("/data", lorem).start().await;

    // Act
    let status = reqwest::get(format!("{}/missing", server.uri()))
        .await
        .unwrap()
        .status();

    // Assert
    assert_eq!(status, 404);
}

#[tokio::test]
async fn an_unrestricted_handler_answers_any_method() {
    // Arrange - the handler echoes back the request method
    let server = FixtureServer::builder()
        .handle("/api", |request: &Request| {
            Response::new(Full::new(Bytes::from(request.method.to_string())))
        })
        .start()
        .await;
    let url = format!("{}/api", server.uri());
    let client = reqwest::Client::new();

    // Act + Assert
    for method in ["GET", "POST", "PUT", "DELETE", "PATCH"] {
        let response = client
            .request(method.parse().unwrap(), &url)
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(response.text().await.unwrap(), method);
    }
}

#[tokio::test]
async fn a_restricted_handler_rejects_methods_outside_the_list() {
    // Arrange - only GET requests are allowed
    let server = FixtureServer::builder()
        .handle_methods("/data", lorem, [Method::GET])
        .start()
        .await;
    let url = format!("{}/data", server.uri());
    let client = reqwest::Client::new();

    // Act
    let rejected = client.post(&url).body("ignored").send().await.unwrap();

    // Assert - same signal as an unregistered path, with an empty body
    assert_eq!(rejected.status(), 404);
    assert_eq!(rejected.text().await.unwrap(), "");

    let allowed = client.get(&url).send().await.unwrap();
    assert_eq!(allowed.status(), 200);
    assert_eq!(allowed.text().await.unwrap(), "Lorem ipsum dolor sit amet");
}

#[tokio::test]
async fn the_last_registration_for_a_path_wins() {
    // Arrange - '/data' is registered twice
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"from the file").unwrap();

    let server = FixtureServer::builder()
        .serve_file("/data", file.path())
        .handle("/data", |_: &Request| {
            Response::new(Full::new(Bytes::from("from the handler")))
        })
        .start()
        .await;

    // Act
    let body = reqwest::get(format!("{}/data", server.uri()))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    // Assert
    assert_eq!(body, "from the handler");
}

#[tokio::test]
async fn a_route_ending_in_a_slash_catches_nested_paths() {
    // Arrange
    let server = FixtureServer::builder()
        .handle("/static/", |request: &Request| {
            Response::new(Full::new(Bytes::from(request.url.path().to_string())))
        })
        .start()
        .await;

    // Act
    let body = reqwest::get(format!("{}/static/css/site.css", server.uri()))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    // Assert
    assert_eq!(body, "/static/css/site.css");
}

#[tokio::test]
async fn handlers_observe_the_query_and_body_of_the_request() {
    // Arrange
    let server = FixtureServer::builder()
        .handle("/echo", |request: &Request| {
            let reply = format!(
                "{}|{}",
                request.url.query().unwrap_or(""),
                String::from_utf8_lossy(&request.body)
            );
            Response::new(Full::new(Bytes::from(reply)))
        })
        .start()
        .await;

    // Act
    let response = reqwest::Client::new()
        .post(format!("{}/echo?page=2", server.uri()))
        .body("payload")
        .send()
        .await
        .unwrap();

    // Assert
    assert_eq!(response.text().await.unwrap(), "page=2|payload");
}

#[tokio::test]
async fn a_json_body_can_be_deserialized_by_the_handler() {
    // Arrange
    let server = FixtureServer::builder()
        .handle("/orders", |request: &Request| {
            let order: serde_json::Value = request.body_json().unwrap();
            Response::new(Full::new(Bytes::from(
                order["item"].as_str().unwrap().to_string(),
            )))
        })
        .start()
        .await;

    // Act
    let response = reqwest::Client::new()
        .post(format!("{}/orders", server.uri()))
        .body(r#"{"item": "widget", "quantity": 3}"#)
        .send()
        .await
        .unwrap();

    // Assert
    assert_eq!(response.text().await.unwrap(), "widget");
}

#[tokio::test]
async fn overlapping_requests_are_served_concurrently() {
    // Arrange
    let server = FixtureServer::builder().handle("/data", lorem).start().await;
    let url = format!("{}/data", server.uri());
    let client = reqwest::Client::new();

    // Act
    let (first, second, third) = tokio::join!(
        client.get(&url).send(),
        client.get(&url).send(),
        client.get(&url).send(),
    );

    // Assert
    for response in [first.unwrap(), second.unwrap(), third.unwrap()] {
        assert_eq!(response.status(), 200);
        assert_eq!(response.text().await.unwrap(), "Lorem ipsum dolor sit amet");
    }
}
