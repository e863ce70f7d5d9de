//! Endpoint behaviour against the mock platform.

use heroku_client::{AddDomain, ClientConfig, CouplingStage, CreateApp, HerokuClient};
use heroku_core::{DomainKind, EnvVars};
use heroku_test_utils::{
    AppFactory, DomainFactory, DynoFactory, Method, MockHerokuApi, PipelineFactory, StatusCode,
    TEST_API_KEY, assert_not_requested, assert_request_count, assert_requested,
};
use serde_json::json;

fn client_for(mock: &MockHerokuApi) -> HerokuClient {
    HerokuClient::with_config(ClientConfig::new(TEST_API_KEY).with_base_url(mock.base_url()))
        .expect("client")
}

mod apps {
    use super::*;

    #[tokio::test]
    async fn lists_apps_in_platform_order() {
        let mock = MockHerokuApi::start().await;
        mock.add_app(AppFactory::new("api").build());
        mock.add_app(AppFactory::new("web").region("eu").build());
        let client = client_for(&mock);

        let apps = client.get_apps().await.expect("list").data;
        let names: Vec<_> = apps.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["api", "web"]);
        assert_eq!(apps[1].region_name(), Some("eu"));
    }

    #[tokio::test]
    async fn get_app_finds_existing_app() {
        let mock = MockHerokuApi::start().await;
        let seeded = mock.add_app(
            AppFactory::new("web")
                .team("platform")
                .extra("generation", json!({ "name": "cedar" }))
                .build(),
        );
        let client = client_for(&mock);

        let app = client.get_app("web").await.expect("lookup").data.expect("app");
        assert_eq!(app, seeded);
        assert_eq!(app.extra["generation"]["name"], "cedar");
    }

    #[tokio::test]
    async fn get_app_maps_not_found_error_to_none() {
        let mock = MockHerokuApi::start().await;
        let client = client_for(&mock);

        let app = client.get_app("missing").await.expect("lookup");
        assert!(app.data.is_none());
    }

    #[tokio::test]
    async fn listing_keeps_apps_with_null_or_missing_fields() {
        let mock = MockHerokuApi::start().await;
        let normal = AppFactory::new("normal").build();
        let mut sparse = serde_json::to_value(AppFactory::new("sparse").build()).expect("json");
        sparse["web_url"] = json!(null);
        let object = sparse.as_object_mut().expect("object");
        object.remove("build_stack");
        object.remove("git_url");
        mock.respond_with(
            Method::GET,
            "/apps",
            StatusCode::OK,
            json!([serde_json::to_value(&normal).expect("json"), sparse]),
        );
        let client = client_for(&mock);

        let apps = client.get_apps().await.expect("list").data;
        assert_eq!(apps.len(), 2);
        assert_eq!(apps[0], normal);
        assert_eq!(apps[1].name, "sparse");
        assert!(apps[1].web_url.is_none());
        assert!(apps[1].build_stack.is_none());
        assert_eq!(apps[1].region_name(), Some("us"));
    }

    #[tokio::test]
    async fn bare_app_round_trips_through_lookup() {
        let mock = MockHerokuApi::start().await;
        let seeded = mock.add_app(AppFactory::bare("ghost-town").build());
        let client = client_for(&mock);

        let app = client.get_app("ghost-town").await.expect("lookup").data.expect("app");
        assert_eq!(app, seeded);
    }

    #[tokio::test]
    async fn get_app_maps_not_found_success_body_to_none() {
        let mock = MockHerokuApi::start().await;
        mock.respond_with(
            Method::GET,
            "/apps/ghost",
            StatusCode::OK,
            json!({ "id": "not_found", "message": "Couldn't find that app." }),
        );
        let client = client_for(&mock);

        let app = client.get_app("ghost").await.expect("lookup");
        assert!(app.data.is_none());
    }

    #[tokio::test]
    async fn get_app_propagates_other_failures() {
        let mock = MockHerokuApi::start().await;
        mock.inject_failure(Method::GET, "/apps/web", StatusCode::FORBIDDEN);
        let client = client_for(&mock);

        let err = client.get_app("web").await.unwrap_err();
        assert_eq!(err.status_code(), Some(403));
    }

    #[tokio::test]
    async fn personal_app_is_created_under_apps() {
        let mock = MockHerokuApi::start().await;
        let client = client_for(&mock);

        let app = client
            .create_app(&CreateApp::new("fresh").region("eu"))
            .await
            .expect("create")
            .data;
        assert_eq!(app.name, "fresh");
        assert_eq!(app.region_name(), Some("eu"));
        assert!(app.team.is_none());

        let requests = mock.requests();
        let request = assert_requested(&requests, &Method::POST, "/apps");
        assert_eq!(request.body, Some(json!({ "name": "fresh", "region": "eu" })));
        assert_not_requested(&requests, &Method::POST, "/teams/apps");
    }

    #[tokio::test]
    async fn team_app_is_created_under_teams() {
        let mock = MockHerokuApi::start().await;
        let client = client_for(&mock);

        let app = client
            .create_app(&CreateApp::new("shared").team("platform"))
            .await
            .expect("create")
            .data;
        assert_eq!(app.team_name(), Some("platform"));

        let requests = mock.requests();
        let request = assert_requested(&requests, &Method::POST, "/teams/apps");
        assert_eq!(
            request.body,
            Some(json!({ "name": "shared", "team": "platform" }))
        );
        assert_not_requested(&requests, &Method::POST, "/apps");
    }

    #[tokio::test]
    async fn buildpacks_are_replaced_in_order() {
        let mock = MockHerokuApi::start().await;
        mock.add_app(AppFactory::new("web").build());
        let client = client_for(&mock);

        let updated = client
            .update_app_buildpacks("web", &["heroku/nodejs", "heroku/python"])
            .await
            .expect("update");
        assert!(updated.data);
        assert_eq!(mock.buildpacks("web"), ["heroku/nodejs", "heroku/python"]);
    }
}

mod config_vars {
    use super::*;

    #[tokio::test]
    async fn update_merges_and_get_reads_back() {
        let mock = MockHerokuApi::start().await;
        mock.add_app(AppFactory::new("web").build());
        mock.set_config_vars("web", [("KEEP", "1"), ("FOO", "old")]);
        let client = client_for(&mock);

        let mut vars = EnvVars::new();
        vars.insert("FOO".to_string(), "bar".to_string());
        vars.insert("NEW".to_string(), "x".to_string());
        assert!(client.update_app_env_vars("web", &vars).await.expect("patch").data);

        let read = client.get_app_env_vars("web").await.expect("get").data;
        assert_eq!(read.get("FOO").map(String::as_str), Some("bar"));
        assert_eq!(read.get("NEW").map(String::as_str), Some("x"));
        assert_eq!(read.get("KEEP").map(String::as_str), Some("1"));
    }

    #[tokio::test]
    async fn unset_sends_nulls() {
        let mock = MockHerokuApi::start().await;
        mock.add_app(AppFactory::new("web").build());
        mock.set_config_vars("web", [("A", "1"), ("B", "2")]);
        let client = client_for(&mock);

        assert!(client.unset_app_env_vars("web", &["A"]).await.expect("unset").data);

        let request = assert_requested(&mock.requests(), &Method::PATCH, "/apps/web/config-vars")
            .clone();
        assert_eq!(request.body, Some(json!({ "A": null })));
        let vars = mock.config_vars("web").expect("vars");
        assert!(!vars.contains_key("A"));
        assert!(vars.contains_key("B"));
    }

    #[tokio::test]
    async fn unset_without_keys_is_rejected() {
        let mock = MockHerokuApi::start().await;
        let client = client_for(&mock);

        let keys: [&str; 0] = [];
        assert!(client.unset_app_env_vars("web", &keys).await.is_err());
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn missing_app_is_a_status_error() {
        let mock = MockHerokuApi::start().await;
        let client = client_for(&mock);

        let err = client.get_app_env_vars("missing").await.unwrap_err();
        assert!(err.is_not_found());
    }
}

mod domains {
    use super::*;

    #[tokio::test]
    async fn add_then_list() {
        let mock = MockHerokuApi::start().await;
        let app = mock.add_app(AppFactory::new("web").build());
        mock.add_domain(DomainFactory::platform(&app));
        let client = client_for(&mock);

        let added = client
            .add_app_domain("web", &AddDomain::new("www.example.com"))
            .await
            .expect("add")
            .data;
        assert_eq!(added.hostname, "www.example.com");
        assert_eq!(added.kind, Some(DomainKind::Custom));
        assert!(added.sni_endpoint.is_none());

        let domains = client.get_app_domains("web").await.expect("list").data;
        let hostnames: Vec<_> = domains.iter().map(|d| d.hostname.as_str()).collect();
        assert_eq!(hostnames, ["web.herokuapp.com", "www.example.com"]);
    }

    #[tokio::test]
    async fn add_forwards_sni_endpoint() {
        let mock = MockHerokuApi::start().await;
        mock.add_app(AppFactory::new("web").build());
        let client = client_for(&mock);

        let added = client
            .add_app_domain(
                "web",
                &AddDomain::new("api.example.com").sni_endpoint("tokyo-1"),
            )
            .await
            .expect("add")
            .data;
        assert_eq!(added.sni_endpoint.map(|s| s.name).as_deref(), Some("tokyo-1"));
    }

    #[tokio::test]
    async fn acm_toggles() {
        let mock = MockHerokuApi::start().await;
        mock.add_app(AppFactory::new("web").build());
        let client = client_for(&mock);

        assert!(client.enable_app_auto_certs("web").await.expect("enable").data);
        assert_eq!(mock.apps()[0].acm, Some(true));

        assert!(client.disable_app_auto_certs("web").await.expect("disable").data);
        assert_eq!(mock.apps()[0].acm, Some(false));

        let requests = mock.requests();
        assert_requested(&requests, &Method::POST, "/apps/web/acm");
        assert_requested(&requests, &Method::DELETE, "/apps/web/acm");
    }

    #[tokio::test]
    async fn acm_failure_is_raised() {
        let mock = MockHerokuApi::start().await;
        mock.add_app(AppFactory::new("web").build());
        mock.inject_failure(Method::POST, "/apps/web/acm", StatusCode::UNPROCESSABLE_ENTITY);
        let client = client_for(&mock);

        let err = client.enable_app_auto_certs("web").await.unwrap_err();
        assert_eq!(err.status_code(), Some(422));
    }
}

mod dynos {
    use super::*;

    #[tokio::test]
    async fn lists_dynos_of_app() {
        let mock = MockHerokuApi::start().await;
        let web = mock.add_app(AppFactory::new("web").build());
        let other = mock.add_app(AppFactory::new("other").build());
        mock.add_dyno(DynoFactory::running(&web, "web.1"));
        mock.add_dyno(DynoFactory::running(&web, "worker.1"));
        mock.add_dyno(DynoFactory::running(&other, "web.1"));
        let client = client_for(&mock);

        let dynos = client.get_app_dynos("web").await.expect("list").data;
        let names: Vec<_> = dynos.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["web.1", "worker.1"]);
        assert_eq!(dynos[1].process_type.as_deref(), Some("worker"));
    }

    #[tokio::test]
    async fn restart_without_name_targets_every_dyno() {
        let mock = MockHerokuApi::start().await;
        mock.add_app(AppFactory::new("web").build());
        let client = client_for(&mock);

        assert!(client.restart_app_dynos("web", None).await.expect("restart").data);
        assert_request_count(&mock.requests(), &Method::DELETE, "/apps/web/dynos", 1);
    }

    #[tokio::test]
    async fn restart_with_name_targets_one_dyno() {
        let mock = MockHerokuApi::start().await;
        let web = mock.add_app(AppFactory::new("web").build());
        mock.add_dyno(DynoFactory::running(&web, "web.1"));
        let client = client_for(&mock);

        assert!(
            client
                .restart_app_dynos("web", Some("web.1"))
                .await
                .expect("restart")
                .data
        );
        let requests = mock.requests();
        assert_requested(&requests, &Method::DELETE, "/apps/web/dynos/web.1");
        assert_not_requested(&requests, &Method::DELETE, "/apps/web/dynos");
    }

    #[tokio::test]
    async fn restart_of_unknown_dyno_fails() {
        let mock = MockHerokuApi::start().await;
        mock.add_app(AppFactory::new("web").build());
        let client = client_for(&mock);

        let err = client
            .restart_app_dynos("web", Some("web.9"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}

mod pipelines {
    use super::*;

    #[tokio::test]
    async fn get_pipeline_by_name() {
        let mock = MockHerokuApi::start().await;
        let seeded = mock.add_pipeline(PipelineFactory::named("checkout"));
        let client = client_for(&mock);

        let pipeline = client
            .get_pipeline("checkout")
            .await
            .expect("lookup")
            .data
            .expect("pipeline");
        assert_eq!(pipeline.id, seeded.id);
        assert!(client.get_pipeline("nope").await.expect("lookup").data.is_none());
    }

    #[tokio::test]
    async fn pipeline_apps_follow_coupling_order_and_stage() {
        let mock = MockHerokuApi::start().await;
        let a = mock.add_app(AppFactory::new("a").build());
        let b = mock.add_app(AppFactory::new("b").build());
        let c = mock.add_app(AppFactory::new("c").build());
        mock.add_app(AppFactory::new("uncoupled").build());
        let pipeline = mock.add_pipeline(PipelineFactory::named("checkout"));
        mock.couple(&c, &pipeline, CouplingStage::Production);
        mock.couple(&a, &pipeline, CouplingStage::Staging);
        mock.couple(&b, &pipeline, CouplingStage::Production);
        let client = client_for(&mock);

        let all = client
            .get_pipeline_apps("checkout", None)
            .await
            .expect("all")
            .data;
        let names: Vec<_> = all.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["c", "a", "b"]);

        let production = client
            .get_pipeline_apps("checkout", Some(CouplingStage::Production))
            .await
            .expect("production")
            .data;
        let names: Vec<_> = production.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["c", "b"]);
    }

    #[tokio::test]
    async fn pipeline_apps_of_missing_pipeline_is_empty() {
        let mock = MockHerokuApi::start().await;
        mock.add_app(AppFactory::new("a").build());
        let client = client_for(&mock);

        let apps = client
            .get_pipeline_apps("nope", None)
            .await
            .expect("empty")
            .data;
        assert!(apps.is_empty());
        assert_not_requested(&mock.requests(), &Method::GET, "/apps");
    }

    #[tokio::test]
    async fn pipeline_apps_fails_when_app_listing_fails() {
        let mock = MockHerokuApi::start().await;
        mock.add_pipeline(PipelineFactory::named("checkout"));
        mock.inject_failure(Method::GET, "/apps", StatusCode::SERVICE_UNAVAILABLE);
        let client = client_for(&mock);

        let err = client
            .get_pipeline_apps("checkout", None)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), Some(503));
    }

    #[tokio::test]
    async fn pipeline_apps_fails_when_coupling_listing_fails() {
        let mock = MockHerokuApi::start().await;
        let pipeline = mock.add_pipeline(PipelineFactory::named("checkout"));
        mock.add_app(AppFactory::new("web").build());
        mock.inject_failure(
            Method::GET,
            &format!("/pipelines/{}/pipeline-couplings", pipeline.id),
            StatusCode::INTERNAL_SERVER_ERROR,
        );
        let client = client_for(&mock);

        let err = client
            .get_pipeline_apps("checkout", None)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), Some(500));
    }

    #[tokio::test]
    async fn pipeline_apps_of_blank_name_is_empty_without_requests() {
        let mock = MockHerokuApi::start().await;
        mock.add_app(AppFactory::new("a").build());
        let client = client_for(&mock);

        let apps = client.get_pipeline_apps("  ", None).await.expect("empty").data;
        assert!(apps.is_empty());
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn add_app_to_pipeline_creates_coupling() {
        let mock = MockHerokuApi::start().await;
        let app = mock.add_app(AppFactory::new("web").build());
        let pipeline = mock.add_pipeline(PipelineFactory::named("checkout"));
        let client = client_for(&mock);

        let added = client
            .add_app_to_pipeline("web", "checkout", CouplingStage::Staging)
            .await
            .expect("couple");
        assert!(added.data);

        let request = assert_requested(&mock.requests(), &Method::POST, "/pipeline-couplings")
            .clone();
        assert_eq!(
            request.body,
            Some(json!({ "app": "web", "pipeline": pipeline.id, "stage": "staging" }))
        );
        let couplings = mock.couplings();
        assert_eq!(couplings.len(), 1);
        assert_eq!(couplings[0].app.id, app.id);
        assert_eq!(couplings[0].stage, CouplingStage::Staging);
    }

    #[tokio::test]
    async fn add_app_to_missing_pipeline_returns_false() {
        let mock = MockHerokuApi::start().await;
        mock.add_app(AppFactory::new("web").build());
        let client = client_for(&mock);

        let added = client
            .add_app_to_pipeline("web", "nope", CouplingStage::Production)
            .await
            .expect("no error");
        assert!(!added.data);
        assert_not_requested(&mock.requests(), &Method::POST, "/pipeline-couplings");
        assert!(mock.couplings().is_empty());
    }

    #[tokio::test]
    async fn add_app_to_pipeline_propagates_coupling_failure() {
        let mock = MockHerokuApi::start().await;
        let pipeline = mock.add_pipeline(PipelineFactory::named("checkout"));
        let client = client_for(&mock);

        let err = client
            .add_app_to_pipeline("ghost", &pipeline.name, CouplingStage::Production)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
