//! Integration tests for the job, asset and user resource endpoints.

mod common;

use assert_matches::assert_matches;
use chrono::{TimeZone, Utc};
use metafold_client::transport::{ApiResponse, Method, RequestBody};
use metafold_client::{ClientError, ListParams};
use serde_json::json;

use common::*;

const JOBS_PATH: &str = "/projects/1/jobs";
const ASSETS_PATH: &str = "/projects/1/assets";
const SIGNED_URL: &str = "https://storage.metafold3d.com/assets/1?signature=abc";

fn job_list() -> serde_json::Value {
    json!([
        job_json("3", Some("bar"), "success"),
        job_json("2", Some("foo"), "success"),
        job_json("1", Some("foo"), "success"),
    ])
}

// ---------------------------------------------------------------------------
// Jobs
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_jobs_sends_only_present_params() {
    let transport =
        ScriptedTransport::new().on(Method::Get, JOBS_PATH, vec![Reply::json(200, job_list())]);
    let client = test_client(transport);

    let jobs = client.jobs().list(&ListParams::default()).await.unwrap();
    let ids: Vec<_> = jobs.iter().map(|j| j.id.as_str()).collect();
    assert_eq!(ids, ["3", "2", "1"]);

    client.jobs().list(&ListParams::default().q("name:foo")).await.unwrap();

    let requests = client.transport().requests();
    assert!(requests[0].query.is_empty());
    assert_eq!(requests[1].query.len(), 1);
    assert_eq!(requests[1].query["q"], "name:foo");
}

#[tokio::test]
async fn get_job_normalizes_dates() {
    let transport = ScriptedTransport::new().on(
        Method::Get,
        "/projects/1/jobs/1",
        vec![Reply::json(200, job_json("1", Some("foo"), "success"))],
    );
    let client = test_client(transport);

    let job = client.jobs().get("1").await.unwrap();

    assert_eq!(job.id, "1");
    assert_eq!(job.job_type, "test_job");
    assert_eq!(job.created, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    assert_eq!(job.meta, None);
}

#[tokio::test]
async fn update_job_patches_name() {
    let transport = ScriptedTransport::new().on(
        Method::Patch,
        "/projects/1/jobs/1",
        vec![Reply::json(200, job_json("1", Some("baz"), "success"))],
    );
    let client = test_client(transport);

    let job = client.jobs().update("1", Some("baz")).await.unwrap();
    assert_eq!(job.name.as_deref(), Some("baz"));

    client.jobs().update("1", None).await.unwrap();

    let requests = client.transport().requests();
    assert_eq!(requests[0].body, RequestBody::Json(json!({"name": "baz"})));
    assert_eq!(requests[1].body, RequestBody::Json(json!({})));
}

#[tokio::test]
async fn unknown_job_surfaces_server_message() {
    let transport = ScriptedTransport::new().on(
        Method::Get,
        "/projects/1/jobs/99",
        vec![Reply::json(404, json!({"msg": "Job not found"}))],
    );
    let client = test_client(transport);

    let err = client.jobs().get("99").await.unwrap_err();
    assert_matches!(err, ClientError::Api { status: 404, ref message } if message == "Job not found");
}

// ---------------------------------------------------------------------------
// Assets
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_and_get_assets() {
    let transport = ScriptedTransport::new()
        .on(
            Method::Get,
            ASSETS_PATH,
            vec![Reply::json(200, json!([asset_json()]))],
        )
        .on(
            Method::Get,
            "/projects/1/assets/1",
            vec![Reply::json(200, asset_json())],
        );
    let client = test_client(transport);

    let assets = client
        .assets()
        .list(&ListParams::default().sort("size:-1"))
        .await
        .unwrap();
    assert_eq!(assets.len(), 1);
    assert_eq!(assets[0].size, 16_777_216);

    let asset = client.assets().get("1").await.unwrap();
    assert_eq!(asset, assets[0]);
    assert_eq!(client.transport().requests()[0].query["sort"], "size:-1");
}

#[tokio::test]
async fn download_fetches_signed_link_without_token() {
    let transport = ScriptedTransport::new()
        .on(
            Method::Get,
            "/projects/1/assets/1",
            vec![Reply::json(200, json!({"link": SIGNED_URL}))],
        )
        .on(
            Method::Get,
            SIGNED_URL,
            vec![Reply::Respond(ApiResponse::new(
                200,
                b"solid mesh".to_vec(),
            ))],
        );
    let client = test_client(transport);

    let bytes = client.assets().download("1").await.unwrap();
    assert_eq!(bytes, b"solid mesh");

    let requests = client.transport().requests();
    assert_eq!(requests[0].query["download"], true);
    assert!(requests[0].authenticated);
    assert!(!requests[1].authenticated);
}

#[tokio::test]
async fn download_url_passes_filename() {
    let transport = ScriptedTransport::new().on(
        Method::Get,
        "/projects/1/assets/1",
        vec![Reply::json(200, json!({"link": SIGNED_URL}))],
    );
    let client = test_client(transport);

    let url = client
        .assets()
        .download_url("1", Some("mesh.stl"))
        .await
        .unwrap();
    assert_eq!(url, SIGNED_URL);

    let requests = client.transport().requests();
    assert_eq!(requests[0].query["download"], true);
    assert_eq!(requests[0].query["filename"], "mesh.stl");
}

#[tokio::test]
async fn create_and_update_upload_file_parts() {
    let transport = ScriptedTransport::new()
        .on(Method::Post, ASSETS_PATH, vec![Reply::json(201, asset_json())])
        .on(
            Method::Patch,
            "/projects/1/assets/1",
            vec![Reply::json(200, asset_json())],
        );
    let client = test_client(transport);

    client
        .assets()
        .create(b"v1".to_vec(), Some("suzanne.obj"))
        .await
        .unwrap();
    client.assets().update("1", b"v2".to_vec(), None).await.unwrap();

    let requests = client.transport().requests();
    assert_eq!(
        requests[0].body,
        RequestBody::File {
            data: b"v1".to_vec(),
            filename: Some("suzanne.obj".into()),
        }
    );
    assert_eq!(
        requests[1].body,
        RequestBody::File {
            data: b"v2".to_vec(),
            filename: None,
        }
    );
}

#[tokio::test]
async fn delete_asset() {
    let transport = ScriptedTransport::new().on(
        Method::Delete,
        "/projects/1/assets/1",
        vec![Reply::Respond(ApiResponse::new(204, vec![]))],
    );
    let client = test_client(transport);

    client.assets().delete("1").await.unwrap();
    assert_eq!(client.transport().count(Method::Delete, "/projects/1/assets/1"), 1);
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

#[tokio::test]
async fn user_license_quota_and_usage() {
    let transport = ScriptedTransport::new()
        .on(
            Method::Get,
            "/user/license",
            vec![Reply::json(
                200,
                json!({
                    "issued": DEFAULT_DATE,
                    "expires": "Wed, 01 Jan 2025 00:00:00 GMT",
                    "expired": false,
                    "product": "Pro",
                }),
            )],
        )
        .on(
            Method::Get,
            "/user/quota",
            vec![Reply::json(
                200,
                json!({"project": 10, "import": 50, "export": 50, "simulation": 25}),
            )],
        )
        .on(
            Method::Get,
            "/user/usage",
            vec![Reply::json(
                200,
                json!({"project": 100, "import": 500, "export": 500, "simulation": 250}),
            )],
        );
    let client = test_client(transport);

    let license = client.user().license().await.unwrap();
    assert_eq!(license.issued, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    assert_eq!(license.expires, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
    assert!(!license.expired);

    let quota = client.user().quota().await.unwrap();
    assert_eq!(quota.simulation, 25);

    let usage = client.user().usage().await.unwrap();
    assert_eq!(usage.project, 100);
    assert_eq!(usage.import, 500);
}
