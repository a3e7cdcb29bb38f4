//! Mock Lemur endpoints shared by the engine tests.

use lemur_client::LemurClient;
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN: &str = "test-token";

pub fn client(server: &MockServer) -> LemurClient {
    LemurClient::new(server.uri(), TOKEN).unwrap()
}

/// Mount a certificate search answering `filter=<filter>` with `items`
pub async fn mount_search(server: &MockServer, filter: &str, items: Value) {
    let total = items.as_array().map_or(0, Vec::len);
    Mock::given(method("GET"))
        .and(path("/api/1/certificates"))
        .and(query_param("filter", filter))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": total,
            "items": items
        })))
        .mount(server)
        .await;
}

pub async fn mount_detail(server: &MockServer, id: u64, chain: Option<&str>) {
    let mut body = json!({
        "id": id,
        "body": "-----BEGIN CERT...",
        "commonName": "svc-a.internal",
        "owner": "team@x",
        "active": true,
        "authority": {"name": "internal-ca"}
    });
    if let Some(chain) = chain {
        body["chain"] = json!(chain);
    }

    Mock::given(method("GET"))
        .and(path(format!("/api/1/certificates/{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub async fn mount_key(server: &MockServer, id: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/api/1/certificates/{id}/key")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"key": "-----BEGIN KEY..."})))
        .mount(server)
        .await;
}

/// Mount the export endpoint for every format, each answering with a distinct payload
pub async fn mount_exports(server: &MockServer, id: u64) {
    let export_path = format!("/api/1/certificates/{id}/export");
    for (slug, data, passphrase) in [
        ("openssl-export", "cDEy", "p12-pass"),
        ("java-keystore-jks", "a2V5c3RvcmU=", "jks-pass"),
        ("java-truststore-jks", "dHJ1c3RzdG9yZQ==", "jks-pass"),
    ] {
        Mock::given(method("POST"))
            .and(path(export_path.as_str()))
            .and(body_partial_json(json!({"plugin": {"slug": slug}})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"data": data, "passphrase": passphrase})),
            )
            .mount(server)
            .await;
    }
}
