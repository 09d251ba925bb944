//! Dataset and metadata mutations against a local GraphQL endpoint.

mod common;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::post;
use openneuro::{Client, ClientConfig, OpenNeuroError};
use serde_json::{Value, json};

use common::{Recorder, serve};

fn graphql_router(recorder: &Recorder) -> Router {
    Router::new()
        .route("/crn/graphql", post(common::record_json))
        .with_state(recorder.clone())
}

fn fake_openneuro(body: &Value) -> Value {
    let variables = &body["variables"];
    match body["operationName"].as_str().unwrap_or_default() {
        "createDataset" => json!({ "data": { "createDataset": { "id": "ds000042" } } }),
        "deleteDataset" => json!({ "data": { "deleteDataset": true } }),
        "deleteFile" => json!({ "data": { "deleteFile": true } }),
        "updateDescription" => {
            json!({ "data": { "updateDescription": { "id": variables["datasetId"] } } })
        }
        "createSnapshot" => json!({
            "data": { "createSnapshot": {
                "id": format!(
                    "{}:{}",
                    variables["datasetId"].as_str().unwrap(),
                    variables["tag"].as_str().unwrap()
                ),
                "tag": variables["tag"],
                "created": "2024-01-01T00:00:00.000Z"
            } }
        }),
        "publishDataset" => json!({ "data": { "publishDataset": false } }),
        "dataset" => json!({
            "data": { "dataset": {
                "id": variables["datasetId"],
                "public": false,
                "draft": { "id": variables["datasetId"], "modified": "2024-01-02" },
                "snapshots": [{ "id": "ds000042:1.0.0", "tag": "1.0.0" }]
            } }
        }),
        _ => json!({ "errors": [{ "message": "unknown operation" }] }),
    }
}

#[test]
fn test_dataset_lifecycle() {
    let recorder = Recorder::replying(fake_openneuro);
    let base = serve(graphql_router(&recorder));
    let client = Client::new(ClientConfig::new(&base).with_api_key("k")).unwrap();

    let id = client.create_dataset("My study").unwrap();
    assert_eq!(id, "ds000042");

    client.update_description(&id, "Name", "My study").unwrap();
    client.delete_file(&id, "sub-01/anat/T1w.nii.gz").unwrap();

    let snapshot = client
        .create_snapshot(&id, "1.0.0", &["Initial release".to_string()])
        .unwrap();
    assert_eq!(snapshot.id, "ds000042:1.0.0");
    assert_eq!(snapshot.tag, "1.0.0");

    let dataset = client.dataset(&id).unwrap();
    assert_eq!(dataset.public, Some(false));
    assert_eq!(dataset.latest_snapshot().unwrap().tag, "1.0.0");

    client.delete_dataset(&id).unwrap();

    let requests = recorder.requests();
    assert_eq!(requests.len(), 6);
    assert!(requests.iter().all(|r| r.cookie.as_deref() == Some("accessToken=k")));

    let create = requests[0].body.as_ref().unwrap();
    assert_eq!(create["variables"], json!({ "label": "My study" }));

    let delete_file = requests[2].body.as_ref().unwrap();
    assert_eq!(
        delete_file["variables"],
        json!({ "datasetId": "ds000042", "path": "sub-01/anat", "filename": "T1w.nii.gz" })
    );

    let snapshot_request = requests[3].body.as_ref().unwrap();
    assert_eq!(snapshot_request["variables"]["changes"], json!(["Initial release"]));
}

#[test]
fn test_refused_publish_is_an_error() {
    let recorder = Recorder::replying(fake_openneuro);
    let base = serve(graphql_router(&recorder));
    let client = Client::new(ClientConfig::new(&base)).unwrap();

    let result = client.publish_dataset("ds000042");
    assert!(matches!(result, Err(OpenNeuroError::Custom(_))), "{result:?}");
    assert!(recorder.single_request().cookie.is_none());
}

#[test]
fn test_errors_surface_with_failure_status() {
    let recorder = Recorder::replying_with_status(StatusCode::BAD_REQUEST, |_| {
        json!({ "errors": [
            { "message": "You do not have access", "extensions": { "code": "FORBIDDEN" } },
            { "message": "Dataset is locked" }
        ] })
    });
    let base = serve(graphql_router(&recorder));
    let client = Client::new(ClientConfig::new(&base)).unwrap();

    match client.delete_dataset("ds000042") {
        Err(OpenNeuroError::RemoteMutation { message, errors }) => {
            assert_eq!(message, "You do not have access; Dataset is locked");
            assert_eq!(errors.len(), 2);
            assert_eq!(errors[0].extensions.as_ref().unwrap()["code"], "FORBIDDEN");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_missing_dataset() {
    let recorder = Recorder::replying(|_| json!({ "data": { "dataset": null } }));
    let base = serve(graphql_router(&recorder));
    let client = Client::new(ClientConfig::new(&base)).unwrap();

    assert!(matches!(
        client.dataset("ds404404"),
        Err(OpenNeuroError::Protocol(_))
    ));
}
