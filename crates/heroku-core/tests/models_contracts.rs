//! Contract tests for decoding platform-shaped JSON into the data model.

use heroku_core::models::{DynoSize, DynoState};
use heroku_core::{App, Coupling, CouplingStage, Domain, DomainKind, Dyno, Pipeline};
use serde_json::json;

fn app_json() -> serde_json::Value {
    json!({
        "acm": false,
        "archived_at": null,
        "buildpack_provided_description": "Node.js",
        "build_stack": { "id": "69bee368-352b-4bd0-9b7c-819d860a2588", "name": "heroku-24" },
        "created_at": "2024-01-01T12:00:00Z",
        "git_url": "https://git.heroku.com/example.git",
        "id": "01234567-89ab-cdef-0123-456789abcdef",
        "internal_routing": false,
        "maintenance": false,
        "name": "example",
        "owner": { "email": "username@example.com", "id": "01234567-89ab-cdef-0123-456789abcdef" },
        "organization": null,
        "team": { "id": "01234567-89ab-cdef-0123-456789abcdef", "name": "acme" },
        "region": { "id": "01234567-89ab-cdef-0123-456789abcdef", "name": "us" },
        "released_at": "2024-01-02T12:00:00Z",
        "repo_size": 0,
        "slug_size": 52_428_800,
        "space": null,
        "stack": { "id": "69bee368-352b-4bd0-9b7c-819d860a2588", "name": "heroku-24" },
        "updated_at": "2024-01-03T12:00:00Z",
        "web_url": "https://example.herokuapp.com/",
        "generation": "cedar"
    })
}

#[test]
fn decodes_app_and_keeps_unmodelled_fields() {
    let app: App = serde_json::from_value(app_json()).unwrap();

    assert_eq!(app.name, "example");
    assert_eq!(app.region_name(), Some("us"));
    assert_eq!(app.stack_name(), Some("heroku-24"));
    assert_eq!(app.team_name(), Some("acme"));
    assert_eq!(app.slug_size, Some(52_428_800));
    assert!(app.archived_at.is_none());
    assert_eq!(app.extra.get("generation"), Some(&json!("cedar")));
}

#[test]
fn app_reserializes_every_field_it_received() {
    let original = app_json();
    let app: App = serde_json::from_value(original.clone()).unwrap();
    let written = serde_json::to_value(&app).unwrap();

    for key in original.as_object().unwrap().keys() {
        assert!(written.get(key).is_some(), "field {key} was dropped");
    }
    assert_eq!(written["generation"], json!("cedar"));
    assert_eq!(written["region"], original["region"]);
}

#[test]
fn app_tolerates_null_and_missing_optional_fields() {
    let mut value = app_json();
    value["web_url"] = json!(null);
    value["acm"] = json!(null);
    let object = value.as_object_mut().unwrap();
    for key in ["build_stack", "git_url", "owner", "region", "created_at"] {
        object.remove(key);
    }

    let app: App = serde_json::from_value(value).unwrap();
    assert_eq!(app.name, "example");
    assert!(app.web_url.is_none());
    assert!(app.build_stack.is_none());
    assert!(app.region_name().is_none());
    assert!(app.owner_email().is_none());
    assert_eq!(app.stack_name(), Some("heroku-24"));
}

#[test]
fn minimal_records_decode_from_identity_fields() {
    let app: App = serde_json::from_value(json!({ "id": "app-1", "name": "bare" })).unwrap();
    assert_eq!(app.name, "bare");

    let domain: Domain =
        serde_json::from_value(json!({ "id": "d-1", "hostname": "www.example.com", "status": null }))
            .unwrap();
    assert!(domain.status.is_none());

    let dyno: Dyno =
        serde_json::from_value(json!({ "id": "dyno-1", "name": "run.1", "release": null })).unwrap();
    assert!(dyno.release.is_none());
    assert!(dyno.command.is_none());

    let pipeline: Pipeline =
        serde_json::from_value(json!({ "id": "p-1", "name": "checkout", "created_at": null }))
            .unwrap();
    assert!(pipeline.created_at.is_none());
}

#[test]
fn team_name_falls_back_to_organization() {
    let mut value = app_json();
    value["team"] = json!(null);
    value["organization"] = json!({ "id": "org-1", "name": "legacy-org" });

    let app: App = serde_json::from_value(value).unwrap();
    assert_eq!(app.team_name(), Some("legacy-org"));
}

#[test]
fn decodes_pipeline_with_owner_type() {
    let pipeline: Pipeline = serde_json::from_value(json!({
        "created_at": "2024-01-01T12:00:00Z",
        "id": "pipeline-1",
        "name": "checkout",
        "owner": { "id": "team-1", "type": "team" },
        "updated_at": "2024-01-01T12:00:00Z"
    }))
    .unwrap();

    assert_eq!(pipeline.name, "checkout");
    assert_eq!(pipeline.owner.unwrap().kind, "team");
}

#[test]
fn decodes_coupling_stage() {
    let coupling: Coupling = serde_json::from_value(json!({
        "app": { "id": "app-1" },
        "created_at": "2024-01-01T12:00:00Z",
        "id": "coupling-1",
        "pipeline": { "id": "pipeline-1" },
        "stage": "production",
        "updated_at": "2024-01-01T12:00:00Z"
    }))
    .unwrap();

    assert_eq!(coupling.stage, CouplingStage::Production);
    assert_eq!(coupling.app.id, "app-1");
}

#[test]
fn decodes_custom_domain() {
    let domain: Domain = serde_json::from_value(json!({
        "acm_status": "pending",
        "acm_status_reason": null,
        "app": { "id": "app-1", "name": "example" },
        "cname": "example.herokudns.com",
        "created_at": "2024-01-01T12:00:00Z",
        "hostname": "www.example.com",
        "id": "domain-1",
        "kind": "custom",
        "sni_endpoint": null,
        "status": "pending",
        "updated_at": "2024-01-01T12:00:00Z"
    }))
    .unwrap();

    assert_eq!(domain.kind, Some(DomainKind::Custom));
    assert_eq!(domain.cname.as_deref(), Some("example.herokudns.com"));
    assert_eq!(domain.acm_status.as_deref(), Some("pending"));
}

#[test]
fn decodes_dyno_state_and_size() {
    let dyno: Dyno = serde_json::from_value(json!({
        "attach_url": null,
        "command": "npm start",
        "created_at": "2024-01-01T12:00:00Z",
        "id": "dyno-1",
        "name": "web.1",
        "app": { "id": "app-1", "name": "example" },
        "release": { "id": "release-1", "version": 42 },
        "size": "standard-1x",
        "state": "up",
        "type": "web",
        "updated_at": "2024-01-01T12:00:00Z"
    }))
    .unwrap();

    assert_eq!(dyno.state, Some(DynoState::Up));
    assert_eq!(dyno.size, Some(DynoSize::Standard1x));
    assert_eq!(dyno.process_type.as_deref(), Some("web"));
    assert_eq!(dyno.release.map(|r| r.version), Some(42));
}
