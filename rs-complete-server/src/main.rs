use std::path::PathBuf;
use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::{get, middleware, put, web, App, HttpResponse, HttpServer, Responder};

use serde::Deserialize;
use rs_complete_core::corpus::{self, Corpus};
use rs_complete_core::io::list_files;
use rs_complete_core::{CompleteError, CompletionInput, ModelConfig, SentenceCompleter};

/// Default folder holding the `.txt` corpora the server can learn from.
const DATA_FOLDER: &str = "./data";

/// Upper bound on `max_words` accepted from clients.
const MAX_WORDS_LIMIT: usize = 1000;

/// Struct representing query parameters for the `/v1/complete` endpoint
#[derive(Deserialize)]
struct CompleteParams {
	text: String,
	max_words: Option<usize>,
	seed: Option<u64>,
	echo: Option<bool>,
}

#[derive(Deserialize)]
struct CorpusQuery {
	names: Option<String>
}

struct SharedData {
	completer: SentenceCompleter,
	data_folder: PathBuf
}

impl CompleteParams {
	/// Builds the completion settings, rejecting out of range values.
	fn completion_input(&self) -> Result<CompletionInput, String> {
		let mut input = CompletionInput::default();
		input
			.set_max_words(self.max_words.unwrap_or(50), MAX_WORDS_LIMIT)
			.map_err(|e| e.to_string())?;
		input.echo_seed = self.echo.unwrap_or(false);
		if let Some(seed) = self.seed {
			input.set_rng_seed(seed);
		}
		Ok(input)
	}
}

/// Maps a corpus loading failure onto an HTTP response.
///
/// A missing corpus is the client's mistake; read failures are ours.
fn load_error_response(error: &CompleteError) -> HttpResponse {
	match error {
		CompleteError::NotAFile(_) => HttpResponse::NotFound().body(format!("Corpus not found: {error}")),
		_ => HttpResponse::InternalServerError().body(format!("Failed to load corpus: {error}")),
	}
}

/// Corpus names may not leave the data folder.
fn is_valid_corpus_name(name: &str) -> bool {
	!name.contains(['/', '\\']) && !name.starts_with('.')
}

fn empty_completer() -> SentenceCompleter {
	// The default configuration is always valid
	SentenceCompleter::new(ModelConfig::default()).expect("default model config is valid")
}

/// HTTP GET endpoint `/v1/complete`
///
/// Completes the sentence in `text` from its last word.
/// Returns the completion as JSON.
#[get("/v1/complete")]
async fn get_completion(data: web::Data<Mutex<SharedData>>, query: web::Query<CompleteParams>) -> impl Responder {
	let input = match query.completion_input() {
		Ok(input) => input,
		Err(e) => return HttpResponse::BadRequest().body(e)
	};

	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	let completion = shared_data.completer.complete(&query.text, &input);
	log::debug!("completed {:?} with {} words", completion.seed, completion.words.len());
	HttpResponse::Ok().json(completion)
}

#[get("/v1/corpora")]
async fn get_corpora(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let folder = match data.lock() {
		Ok(m) => m.data_folder.clone(),
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	match list_files(&folder, "txt") {
		Ok(files) => HttpResponse::Ok().body(files.join("\n").replace(".txt", "")),
		Err(_) => HttpResponse::InternalServerError().body("Failed to list corpora")
	}
}

#[get("/v1/stats")]
async fn get_stats(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	HttpResponse::Ok().json(shared_data.completer.stats())
}

/// HTTP PUT endpoint `/v1/learn`
///
/// Extends the model with `<data folder>/<name>.txt` for every comma-separated name.
///
/// All corpora are loaded before any is learned: a rejected request leaves
/// the model unchanged.
#[put("/v1/learn")]
async fn put_learn(data: web::Data<Mutex<SharedData>>, query: web::Query<CorpusQuery>) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	let query_names = match &query.names {
		Some(s) if !s.trim().is_empty() => s.trim(),
		_ => return HttpResponse::BadRequest().body("Missing or empty corpus name"),
	};

	let names: Vec<&str> = query_names
		.split(',')
		.map(|s| s.trim())
		.filter(|s| !s.is_empty())
		.collect();

	if let Some(name) = names.iter().find(|name| !is_valid_corpus_name(name)) {
		return HttpResponse::BadRequest().body(format!("Invalid corpus name: {name}"));
	}

	let mut corpora: Vec<Corpus> = Vec::with_capacity(names.len());
	for name in names {
		let corpus_path = shared_data.data_folder.join(format!("{name}.txt"));
		match corpus::load_file(&corpus_path, &shared_data.completer.config().boundary) {
			Ok(corpus) => corpora.push(corpus),
			Err(e) => {
				log::warn!("failed to load {}: {e}", corpus_path.display());
				return load_error_response(&e);
			}
		}
	}

	for corpus in corpora {
		shared_data.completer.learn_corpus(corpus);
	}

	HttpResponse::Ok().json(shared_data.completer.stats())
}

#[put("/v1/reset")]
async fn put_reset(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	shared_data.completer = empty_completer();
	log::info!("model reset");
	HttpResponse::Ok().body("Model reset")
}

/// Main entry point for the server.
///
/// Starts with an empty model wrapped in a `Mutex`; corpora are learned
/// through `/v1/learn`.
///
/// # Notes
/// - The server binds to 127.0.0.1:5000.
/// - `RUST_LOG` controls logging (ex. `RUST_LOG=info`).
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init();

	let shared_data = SharedData {
		completer: empty_completer(),
		data_folder: PathBuf::from(DATA_FOLDER),
	};
	let shared_model = web::Data::new(Mutex::new(shared_data));

	log::info!("listening on 127.0.0.1:5000");
	HttpServer::new(move || {
		App::new()
			.wrap(Cors::permissive())
			.wrap(middleware::Logger::default())
			.app_data(shared_model.clone())
			.service(get_completion)
			.service(get_corpora)
			.service(get_stats)
			.service(put_learn)
			.service(put_reset)
	})
		.bind(("127.0.0.1", 5000))?
		.run()
		.await
}
