mod error;

pub use error::{Error, Result};

use std::{
	collections::{BTreeMap, HashMap},
	future::IntoFuture,
	path::PathBuf,
	sync::{
		Arc, Mutex,
		atomic::{AtomicBool, AtomicUsize, Ordering},
	},
	time::Duration,
};

use axum::{
	Json, Router,
	extract::{Path, Query, State},
	http::{StatusCode, header},
	response::{IntoResponse, Response},
	routing,
};
use serde_json::Value;
use tokio::{
	io::{AsyncReadExt, AsyncWriteExt},
	net::TcpListener,
	sync::{oneshot, oneshot::Sender},
};
use uuid::Uuid;

use fiche_config::{
	Config, DocumentProviderConfig, Providers, SearchProviderConfig, Service, Storage,
	SummaryProviderConfig,
};

pub const SEARCH_PATH: &str = "/search";
pub const SUMMARY_PATH: &str = "/summary/";
pub const QUERY_PARAM: &str = "q";

#[derive(Clone)]
struct Document {
	content_type: String,
	body: String,
}

#[derive(Default)]
struct ProviderState {
	search_payload: Mutex<Value>,
	search_fails: AtomicBool,
	search_queries: Mutex<Vec<HashMap<String, String>>>,
	summaries: Mutex<HashMap<String, Value>>,
	documents: Mutex<HashMap<String, Document>>,
	search_hits: AtomicUsize,
	summary_hits: AtomicUsize,
	document_hits: AtomicUsize,
}

/// Search, summary, and document endpoints served from one local axum server.
pub struct FakeProviders {
	base: String,
	state: Arc<ProviderState>,
	shutdown: Option<Sender<()>>,
}
impl FakeProviders {
	pub async fn start() -> Result<Self> {
		let state = Arc::new(ProviderState::default());
		let app = Router::new()
			.route(SEARCH_PATH, routing::get(search_handler))
			.route("/summary/{*title}", routing::get(summary_handler))
			.route("/pages/{*path}", routing::get(document_handler))
			.with_state(state.clone());
		let listener = TcpListener::bind("127.0.0.1:0").await?;
		let addr = listener.local_addr()?;
		let (tx, rx) = oneshot::channel();
		let server = axum::serve(listener, app).with_graceful_shutdown(async move {
			let _ = rx.await;
		});

		tokio::spawn(async move {
			let _ = server.into_future().await;
		});

		Ok(Self { base: format!("http://{addr}"), state, shutdown: Some(tx) })
	}

	/// Absolute URL of a document served under `/pages/`.
	pub fn page_url(&self, path: &str) -> String {
		format!("{}/pages/{}", self.base, path.trim_start_matches('/'))
	}

	/// Absolute URL of an encyclopedia article, resolved through the summary endpoint.
	pub fn article_url(&self, title: &str) -> String {
		format!("{}/wiki/{title}", self.base)
	}

	pub fn set_search_payload(&self, payload: Value) {
		*lock(&self.state.search_payload) = payload;
	}

	pub fn fail_search(&self, fails: bool) {
		self.state.search_fails.store(fails, Ordering::SeqCst);
	}

	pub fn add_summary(&self, key: &str, title: &str, extract: &str) {
		lock(&self.state.summaries)
			.insert(key.to_string(), serde_json::json!({ "title": title, "extract": extract }));
	}

	pub fn add_document(&self, path: &str, content_type: &str, body: &str) {
		lock(&self.state.documents).insert(
			path.trim_start_matches('/').to_string(),
			Document { content_type: content_type.to_string(), body: body.to_string() },
		);
	}

	pub fn search_queries(&self) -> Vec<HashMap<String, String>> {
		lock(&self.state.search_queries).clone()
	}

	pub fn search_hits(&self) -> usize {
		self.state.search_hits.load(Ordering::SeqCst)
	}

	pub fn summary_hits(&self) -> usize {
		self.state.summary_hits.load(Ordering::SeqCst)
	}

	pub fn document_hits(&self) -> usize {
		self.state.document_hits.load(Ordering::SeqCst)
	}

	pub fn search_config(&self) -> SearchProviderConfig {
		SearchProviderConfig {
			api_base: self.base.clone(),
			path: SEARCH_PATH.to_string(),
			query_param: QUERY_PARAM.to_string(),
			article_url_base: format!("{}/wiki/", self.base),
			params: BTreeMap::from([("format".to_string(), "json".to_string())]),
			timeout_ms: Some(5_000),
		}
	}

	pub fn summary_config(&self) -> SummaryProviderConfig {
		SummaryProviderConfig {
			api_base: self.base.clone(),
			path: SUMMARY_PATH.to_string(),
			domains: vec!["127.0.0.1".to_string()],
			marker: "wiki".to_string(),
			timeout_ms: Some(5_000),
		}
	}

	pub fn document_config(&self) -> DocumentProviderConfig {
		DocumentProviderConfig {
			user_agent: "fiche-testkit".to_string(),
			max_bytes: 1_024 * 1_024,
			timeout_ms: Some(5_000),
		}
	}

	/// A complete config pointing every provider at this server.
	pub fn config(&self, history_path: PathBuf) -> Config {
		Config {
			service: Service { log_level: "debug".to_string(), open_in_browser: false },
			providers: Providers {
				search: self.search_config(),
				summary: self.summary_config(),
				document: self.document_config(),
			},
			storage: Storage { path: history_path, key: "searchHistory".to_string() },
		}
	}

	pub fn shutdown(mut self) {
		if let Some(tx) = self.shutdown.take() {
			let _ = tx.send(());
		}
	}
}

impl Drop for FakeProviders {
	fn drop(&mut self) {
		if let Some(tx) = self.shutdown.take() {
			let _ = tx.send(());
		}
	}
}

/// Serves one HTML document whose chunked body never ends and returns its URL.
///
/// `head` is sent as the first chunk, then a single byte follows every `interval` until the
/// client hangs up.
pub async fn endless_document(head: &str, interval: Duration) -> Result<String> {
	let listener = TcpListener::bind("127.0.0.1:0").await?;
	let addr = listener.local_addr()?;
	let head = head.to_string();

	tokio::spawn(async move {
		let Ok((mut stream, _)) = listener.accept().await else {
			return;
		};
		let mut request = [0_u8; 1_024];
		let _ = stream.read(&mut request).await;
		let preamble = format!(
			"HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nTransfer-Encoding: chunked\r\n\r\n{:x}\r\n{head}\r\n",
			head.len()
		);

		if stream.write_all(preamble.as_bytes()).await.is_err() {
			return;
		}

		loop {
			tokio::time::sleep(interval).await;

			if stream.write_all(b"1\r\n.\r\n").await.is_err() || stream.flush().await.is_err() {
				return;
			}
		}
	});

	Ok(format!("http://{addr}/endless"))
}

/// A unique path under the system temp directory; the file is not created.
pub fn temp_path(prefix: &str, extension: &str) -> PathBuf {
	std::env::temp_dir().join(format!("{prefix}_{}.{extension}", Uuid::new_v4().simple()))
}

async fn search_handler(
	State(state): State<Arc<ProviderState>>,
	Query(params): Query<HashMap<String, String>>,
) -> Response {
	state.search_hits.fetch_add(1, Ordering::SeqCst);
	lock(&state.search_queries).push(params);

	if state.search_fails.load(Ordering::SeqCst) {
		return StatusCode::INTERNAL_SERVER_ERROR.into_response();
	}

	let payload = lock(&state.search_payload).clone();

	(StatusCode::OK, Json(payload)).into_response()
}

async fn summary_handler(
	State(state): State<Arc<ProviderState>>,
	Path(title): Path<String>,
) -> Response {
	state.summary_hits.fetch_add(1, Ordering::SeqCst);

	let summary = lock(&state.summaries).get(title.trim_start_matches('/')).cloned();

	match summary {
		Some(summary) => (StatusCode::OK, Json(summary)).into_response(),
		None => StatusCode::NOT_FOUND.into_response(),
	}
}

async fn document_handler(
	State(state): State<Arc<ProviderState>>,
	Path(path): Path<String>,
) -> Response {
	state.document_hits.fetch_add(1, Ordering::SeqCst);

	let document = lock(&state.documents).get(path.trim_start_matches('/')).cloned();
	let Some(document) = document else {
		return StatusCode::NOT_FOUND.into_response();
	};

	(StatusCode::OK, [(header::CONTENT_TYPE, document.content_type)], document.body)
		.into_response()
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
	mutex.lock().unwrap_or_else(|err| err.into_inner())
}
