//! In-process mock of the Heroku Platform API.
//!
//! Serves the resources the client talks to from in-memory state, records
//! every request it receives, and lets tests inject canned responses for
//! specific method and path pairs. Unknown resources answer with the
//! platform's `404 {"id":"not_found"}` body.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::Router;
use axum::body::Body;
use axum::extract::{Json, Path, Request, State};
use axum::http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::sync::oneshot;

use heroku_core::{App, Coupling, CouplingStage, Domain, Dyno, EnvVars, Pipeline};

use crate::TEST_API_KEY;
use crate::fixtures::{AppFactory, CouplingFactory, DomainFactory};

/// A request as the mock received it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method.
    pub method: Method,
    /// Percent-encoded path, without query.
    pub path: String,
    /// `Authorization` header, if sent.
    pub authorization: Option<String>,
    /// `Accept` header, if sent.
    pub accept: Option<String>,
    /// `Content-Type` header, if sent.
    pub content_type: Option<String>,
    /// JSON body, if one was sent.
    pub body: Option<Value>,
}

#[derive(Debug, Clone)]
struct CannedResponse {
    method: Method,
    path: String,
    status: StatusCode,
    body: Value,
}

#[derive(Debug, Default)]
struct Store {
    api_key: String,
    apps: Vec<App>,
    pipelines: Vec<Pipeline>,
    couplings: Vec<Coupling>,
    config_vars: HashMap<String, EnvVars>,
    domains: Vec<Domain>,
    dynos: Vec<Dyno>,
    buildpacks: HashMap<String, Vec<String>>,
    requests: Vec<RecordedRequest>,
    canned: Vec<CannedResponse>,
}

impl Store {
    fn app(&self, key: &str) -> Option<&App> {
        self.apps.iter().find(|a| a.name == key || a.id == key)
    }

    fn app_mut(&mut self, key: &str) -> Option<&mut App> {
        self.apps.iter_mut().find(|a| a.name == key || a.id == key)
    }

    fn pipeline(&self, key: &str) -> Option<&Pipeline> {
        self.pipelines.iter().find(|p| p.name == key || p.id == key)
    }
}

type Shared = Arc<Mutex<Store>>;

fn lock(state: &Shared) -> MutexGuard<'_, Store> {
    state.lock().expect("mock state poisoned")
}

/// Mock platform API bound to `127.0.0.1` on an ephemeral port.
pub struct MockHerokuApi {
    state: Shared,
    base_url: String,
    shutdown_tx: Option<oneshot::Sender<()>>,
    _task: tokio::task::JoinHandle<()>,
}

impl std::fmt::Debug for MockHerokuApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockHerokuApi")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl MockHerokuApi {
    /// Starts a mock that accepts [`TEST_API_KEY`].
    pub async fn start() -> Self {
        Self::with_api_key(TEST_API_KEY).await
    }

    /// Starts a mock that accepts only `api_key`.
    pub async fn with_api_key(api_key: &str) -> Self {
        let state: Shared = Arc::new(Mutex::new(Store {
            api_key: api_key.to_string(),
            ..Store::default()
        }));

        let app = Router::new()
            .route("/apps", get(list_apps).post(create_app))
            .route("/teams/apps", post(create_team_app))
            .route("/apps/:app", get(get_app))
            .route("/apps/:app/buildpack-installations", put(update_buildpacks))
            .route(
                "/apps/:app/config-vars",
                get(get_config_vars).patch(patch_config_vars),
            )
            .route("/apps/:app/domains", get(list_domains).post(add_domain))
            .route("/apps/:app/acm", post(enable_acm).delete(disable_acm))
            .route("/apps/:app/dynos", get(list_dynos).delete(restart_all_dynos))
            .route("/apps/:app/dynos/:dyno", delete(restart_dyno))
            .route("/pipelines/:pipeline", get(get_pipeline))
            .route(
                "/pipelines/:pipeline/pipeline-couplings",
                get(list_couplings),
            )
            .route("/pipeline-couplings", post(create_coupling))
            .fallback(fallback)
            .layer(middleware::from_fn_with_state(state.clone(), record))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock listener");
        let addr: SocketAddr = listener.local_addr().expect("mock listener addr");

        let base_url = format!("http://{addr}");
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let server = axum::serve(listener, app).with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            });
            let _ = server.await;
        });

        Self {
            state,
            base_url,
            shutdown_tx: Some(shutdown_tx),
            _task: task,
        }
    }

    /// Returns the server base URL (e.g., `http://127.0.0.1:12345`).
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Seeds an app.
    pub fn add_app(&self, app: App) -> App {
        lock(&self.state).apps.push(app.clone());
        app
    }

    /// Seeds a pipeline.
    pub fn add_pipeline(&self, pipeline: Pipeline) -> Pipeline {
        lock(&self.state).pipelines.push(pipeline.clone());
        pipeline
    }

    /// Couples a seeded app to a seeded pipeline.
    pub fn couple(&self, app: &App, pipeline: &Pipeline, stage: CouplingStage) -> Coupling {
        let coupling = CouplingFactory::couple(app, pipeline, stage);
        lock(&self.state).couplings.push(coupling.clone());
        coupling
    }

    /// Replaces the config vars of an app.
    pub fn set_config_vars<K, V>(&self, app_name: &str, vars: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<String>,
    {
        let vars = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        lock(&self.state)
            .config_vars
            .insert(app_name.to_string(), vars);
    }

    /// Seeds a domain.
    pub fn add_domain(&self, domain: Domain) -> Domain {
        lock(&self.state).domains.push(domain.clone());
        domain
    }

    /// Seeds a dyno.
    pub fn add_dyno(&self, dyno: Dyno) -> Dyno {
        lock(&self.state).dynos.push(dyno.clone());
        dyno
    }

    /// Current apps.
    #[must_use]
    pub fn apps(&self) -> Vec<App> {
        lock(&self.state).apps.clone()
    }

    /// Current couplings.
    #[must_use]
    pub fn couplings(&self) -> Vec<Coupling> {
        lock(&self.state).couplings.clone()
    }

    /// Current domains.
    #[must_use]
    pub fn domains(&self) -> Vec<Domain> {
        lock(&self.state).domains.clone()
    }

    /// Current config vars of an app.
    #[must_use]
    pub fn config_vars(&self, app_name: &str) -> Option<EnvVars> {
        lock(&self.state).config_vars.get(app_name).cloned()
    }

    /// Buildpacks last installed on an app.
    #[must_use]
    pub fn buildpacks(&self, app_name: &str) -> Vec<String> {
        lock(&self.state)
            .buildpacks
            .get(app_name)
            .cloned()
            .unwrap_or_default()
    }

    /// Requests received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.state).requests.clone()
    }

    /// Forgets recorded requests.
    pub fn clear_requests(&self) {
        lock(&self.state).requests.clear();
    }

    /// Answers `method path` with a fixed status and body from now on.
    pub fn respond_with(&self, method: Method, path: &str, status: StatusCode, body: Value) {
        lock(&self.state).canned.push(CannedResponse {
            method,
            path: path.to_string(),
            status,
            body,
        });
    }

    /// Answers `method path` with a platform error for `status`.
    pub fn inject_failure(&self, method: Method, path: &str, status: StatusCode) {
        let id = match status {
            StatusCode::UNAUTHORIZED => "unauthorized",
            StatusCode::FORBIDDEN => "forbidden",
            StatusCode::NOT_FOUND => "not_found",
            StatusCode::UNPROCESSABLE_ENTITY => "invalid_params",
            StatusCode::TOO_MANY_REQUESTS => "rate_limit",
            _ => "internal_server_error",
        };
        self.respond_with(
            method,
            path,
            status,
            json!({ "id": id, "message": "Injected failure." }),
        );
    }
}

impl Drop for MockHerokuApi {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

fn platform_error(status: StatusCode, id: &str, message: &str) -> Response {
    (status, Json(json!({ "id": id, "message": message }))).into_response()
}

fn not_found(resource: &str) -> Response {
    platform_error(
        StatusCode::NOT_FOUND,
        "not_found",
        &format!("Couldn't find that {resource}."),
    )
}

fn header_string(request: &Request, name: axum::http::HeaderName) -> Option<String> {
    request
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn record(State(state): State<Shared>, request: Request, next: Next) -> Response {
    let authorization = header_string(&request, AUTHORIZATION);
    let accept = header_string(&request, ACCEPT);
    let content_type = header_string(&request, CONTENT_TYPE);
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let (parts, body) = request.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();
    let json_body = if bytes.is_empty() {
        None
    } else {
        serde_json::from_slice(&bytes).ok()
    };

    let (sequence, canned, expected_key) = {
        let mut store = lock(&state);
        store.requests.push(RecordedRequest {
            method: method.clone(),
            path: path.clone(),
            authorization: authorization.clone(),
            accept,
            content_type,
            body: json_body,
        });
        let canned = store
            .canned
            .iter()
            .rev()
            .find(|c| c.method == method && c.path == path)
            .cloned();
        (store.requests.len(), canned, store.api_key.clone())
    };

    tracing::debug!(%method, %path, sequence, "mock request");

    let expected_auth = format!("Bearer {expected_key}");
    let mut response = if authorization.as_deref() != Some(expected_auth.as_str()) {
        platform_error(
            StatusCode::UNAUTHORIZED,
            "unauthorized",
            "Invalid credentials provided.",
        )
    } else if let Some(canned) = canned {
        (canned.status, Json(canned.body)).into_response()
    } else {
        next.run(Request::from_parts(parts, Body::from(bytes))).await
    };

    let headers = response.headers_mut();
    headers.insert(
        "request-id",
        HeaderValue::from_str(&format!("req-{sequence}")).expect("ascii request id"),
    );
    headers.insert("ratelimit-remaining", HeaderValue::from_static("4500"));
    response
}

async fn fallback() -> Response {
    not_found("resource")
}

async fn list_apps(State(state): State<Shared>) -> Response {
    Json(lock(&state).apps.clone()).into_response()
}

async fn get_app(State(state): State<Shared>, Path(app): Path<String>) -> Response {
    match lock(&state).app(&app) {
        Some(app) => Json(app.clone()).into_response(),
        None => not_found("app"),
    }
}

#[derive(Debug, Deserialize)]
struct CreateAppBody {
    name: String,
    region: Option<String>,
    team: Option<String>,
}

fn insert_app(state: &Shared, body: CreateAppBody) -> Response {
    let mut store = lock(state);
    if store.app(&body.name).is_some() {
        return platform_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "invalid_params",
            "Name is already taken",
        );
    }
    let mut factory = AppFactory::new(body.name);
    if let Some(region) = body.region.as_deref() {
        factory = factory.region(region);
    }
    if let Some(team) = body.team.as_deref() {
        factory = factory.team(team);
    }
    let app = factory.build();
    store.apps.push(app.clone());
    (StatusCode::CREATED, Json(app)).into_response()
}

async fn create_app(State(state): State<Shared>, Json(body): Json<CreateAppBody>) -> Response {
    if body.team.is_some() {
        return platform_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "invalid_params",
            "Team apps must be created through /teams/apps.",
        );
    }
    insert_app(&state, body)
}

async fn create_team_app(
    State(state): State<Shared>,
    Json(body): Json<CreateAppBody>,
) -> Response {
    if body.team.is_none() {
        return platform_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "invalid_params",
            "Team is required.",
        );
    }
    insert_app(&state, body)
}

#[derive(Debug, Deserialize)]
struct BuildpackUpdates {
    updates: Vec<BuildpackUpdate>,
}

#[derive(Debug, Deserialize)]
struct BuildpackUpdate {
    buildpack: String,
}

async fn update_buildpacks(
    State(state): State<Shared>,
    Path(app): Path<String>,
    Json(body): Json<BuildpackUpdates>,
) -> Response {
    let mut store = lock(&state);
    let Some(name) = store.app(&app).map(|a| a.name.clone()) else {
        return not_found("app");
    };
    let buildpacks: Vec<String> = body.updates.into_iter().map(|u| u.buildpack).collect();
    let installations: Vec<Value> = buildpacks
        .iter()
        .enumerate()
        .map(|(ordinal, buildpack)| {
            json!({
                "ordinal": ordinal,
                "buildpack": { "name": buildpack, "url": buildpack },
            })
        })
        .collect();
    store.buildpacks.insert(name, buildpacks);
    Json(installations).into_response()
}

async fn get_config_vars(State(state): State<Shared>, Path(app): Path<String>) -> Response {
    let store = lock(&state);
    let Some(app) = store.app(&app) else {
        return not_found("app");
    };
    Json(store.config_vars.get(&app.name).cloned().unwrap_or_default()).into_response()
}

async fn patch_config_vars(
    State(state): State<Shared>,
    Path(app): Path<String>,
    Json(body): Json<serde_json::Map<String, Value>>,
) -> Response {
    let mut store = lock(&state);
    let Some(name) = store.app(&app).map(|a| a.name.clone()) else {
        return not_found("app");
    };
    let vars = store.config_vars.entry(name).or_default();
    for (key, value) in body {
        match value {
            Value::Null => {
                vars.remove(&key);
            }
            Value::String(value) => {
                vars.insert(key, value);
            }
            other => {
                vars.insert(key, other.to_string());
            }
        }
    }
    Json(vars.clone()).into_response()
}

async fn list_domains(State(state): State<Shared>, Path(app): Path<String>) -> Response {
    let store = lock(&state);
    let Some(app) = store.app(&app) else {
        return not_found("app");
    };
    let domains: Vec<&Domain> = store
        .domains
        .iter()
        .filter(|d| d.app.as_ref().is_some_and(|a| a.id == app.id))
        .collect();
    Json(domains).into_response()
}

#[derive(Debug, Deserialize)]
struct AddDomainBody {
    hostname: String,
    sni_endpoint: Option<String>,
}

async fn add_domain(
    State(state): State<Shared>,
    Path(app): Path<String>,
    Json(body): Json<AddDomainBody>,
) -> Response {
    let mut store = lock(&state);
    let Some(app) = store.app(&app).cloned() else {
        return not_found("app");
    };
    if store.domains.iter().any(|d| d.hostname == body.hostname) {
        return platform_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "invalid_params",
            "Domain already added to this app.",
        );
    }
    let mut domain = DomainFactory::custom(&app, &body.hostname);
    domain.sni_endpoint = body
        .sni_endpoint
        .map(|name| heroku_core::NamedRef::new(uuid::Uuid::new_v4().to_string(), name));
    store.domains.push(domain.clone());
    (StatusCode::CREATED, Json(domain)).into_response()
}

fn set_acm(state: &Shared, app: &str, enabled: bool) -> Response {
    let mut store = lock(state);
    match store.app_mut(app) {
        Some(app) => {
            app.acm = Some(enabled);
            Json(app.clone()).into_response()
        }
        None => not_found("app"),
    }
}

async fn enable_acm(State(state): State<Shared>, Path(app): Path<String>) -> Response {
    set_acm(&state, &app, true)
}

async fn disable_acm(State(state): State<Shared>, Path(app): Path<String>) -> Response {
    set_acm(&state, &app, false)
}

async fn list_dynos(State(state): State<Shared>, Path(app): Path<String>) -> Response {
    let store = lock(&state);
    let Some(app) = store.app(&app) else {
        return not_found("app");
    };
    let dynos: Vec<&Dyno> = store
        .dynos
        .iter()
        .filter(|d| d.app.as_ref().is_some_and(|a| a.id == app.id))
        .collect();
    Json(dynos).into_response()
}

async fn restart_all_dynos(State(state): State<Shared>, Path(app): Path<String>) -> Response {
    if lock(&state).app(&app).is_none() {
        return not_found("app");
    }
    (StatusCode::ACCEPTED, Json(json!({}))).into_response()
}

async fn restart_dyno(
    State(state): State<Shared>,
    Path((app, dyno)): Path<(String, String)>,
) -> Response {
    let store = lock(&state);
    let Some(app) = store.app(&app) else {
        return not_found("app");
    };
    let exists = store
        .dynos
        .iter()
        .filter(|d| d.app.as_ref().is_some_and(|a| a.id == app.id))
        .any(|d| d.name == dyno || d.id == dyno);
    if !exists {
        return not_found("dyno");
    }
    (StatusCode::ACCEPTED, Json(json!({}))).into_response()
}

async fn get_pipeline(State(state): State<Shared>, Path(pipeline): Path<String>) -> Response {
    match lock(&state).pipeline(&pipeline) {
        Some(pipeline) => Json(pipeline.clone()).into_response(),
        None => not_found("pipeline"),
    }
}

async fn list_couplings(State(state): State<Shared>, Path(pipeline): Path<String>) -> Response {
    let store = lock(&state);
    let Some(pipeline) = store.pipeline(&pipeline) else {
        return not_found("pipeline");
    };
    let couplings: Vec<&Coupling> = store
        .couplings
        .iter()
        .filter(|c| c.pipeline.id == pipeline.id)
        .collect();
    Json(couplings).into_response()
}

#[derive(Debug, Deserialize)]
struct CreateCouplingBody {
    app: String,
    pipeline: String,
    stage: CouplingStage,
}

async fn create_coupling(
    State(state): State<Shared>,
    Json(body): Json<CreateCouplingBody>,
) -> Response {
    let mut store = lock(&state);
    let Some(app) = store.app(&body.app).cloned() else {
        return not_found("app");
    };
    let Some(pipeline) = store.pipeline(&body.pipeline).cloned() else {
        return not_found("pipeline");
    };
    if store.couplings.iter().any(|c| c.app.id == app.id) {
        return platform_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "invalid_params",
            "App is already coupled to a pipeline.",
        );
    }
    let coupling = CouplingFactory::couple(&app, &pipeline, body.stage);
    store.couplings.push(coupling.clone());
    (StatusCode::CREATED, Json(coupling)).into_response()
}
