use std::io;
use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{get, put, web, App, HttpResponse, HttpServer, Responder};
use clap::Parser;
use log::{info, warn};
use serde::Deserialize;

use textcaret_core::text::stats::DEFAULT_TOP_TOKENS;
use textcaret_core::{ChainError, GenerationInput, Generator, RngSource, StartToken, TextCaret};

mod config;

use config::ServerConfig;

/// Struct representing query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	words: Option<usize>,
	retries: Option<usize>,
	seed: Option<u64>,
	start: Option<String> // -> random, custom(str) or none
}

#[derive(Deserialize)]
struct ReportParams {
	num: Option<usize>
}

/// Upper bounds on what a single request may ask for.
///
/// The walk runs while the corpus lock is held, so its length must stay bounded.
#[derive(Debug, Clone, Copy)]
struct RequestLimits {
	max_words: usize,
	retry_limit: usize
}

/// Corpus currently loaded and the defaults applied to every request.
struct SharedData {
	corpus: Option<(TextCaret, Generator)>,
	defaults: GenerationInput,
	limits: RequestLimits
}

impl SharedData {
	fn new(config: &ServerConfig) -> Result<Self, String> {
		let limits = RequestLimits { max_words: config.max_words, retry_limit: config.retry_limit };
		if config.default_words > limits.max_words {
			return Err(format!("Default words {} exceeds max words {}", config.default_words, limits.max_words));
		}
		if config.max_retries > limits.retry_limit {
			return Err(format!("Default retries {} exceeds retry limit {}", config.max_retries, limits.retry_limit));
		}

		let mut defaults = GenerationInput::new(config.default_words).map_err(|e| e.to_string())?;
		defaults.max_retries = config.max_retries;
		Ok(Self { corpus: None, defaults, limits })
	}
}

impl GenerateParams {
	/// Determines the start token strategy.
	fn start_token(&self) -> Result<StartToken, String> {
		match &self.start {
			None => Ok(StartToken::Random),
			Some(s) if s.to_lowercase() == "none" || s.to_lowercase() == "random" => Ok(StartToken::Random),
			Some(s) if s.to_lowercase().starts_with("custom:") => {
				let value = &s["custom:".len()..];
				if value.is_empty() {
					Err("Custom start cannot be empty".into())
				} else {
					Ok(StartToken::Custom(value.to_owned()))
				}
			}
			Some(_) => Err("Start must be 'random', 'none' or start with 'custom:'".into()),
		}
	}

	/// Applies the request parameters over the server defaults.
	///
	/// # Errors
	/// Returns a `400 Bad Request` response if a value is invalid or above
	/// the server limits.
	fn generation_input(&self, defaults: &GenerationInput, limits: RequestLimits) -> Result<GenerationInput, HttpResponse> {
		let mut input = defaults.clone();
		if let Some(words) = self.words {
			if words > limits.max_words {
				return Err(HttpResponse::BadRequest().body(format!("Words must be <= {}", limits.max_words)));
			}
			input.set_word_count(words).map_err(|e| chain_error_response(&e))?;
		}
		if let Some(retries) = self.retries {
			if retries > limits.retry_limit {
				return Err(HttpResponse::BadRequest().body(format!("Retries must be <= {}", limits.retry_limit)));
			}
			input.max_retries = retries;
		}
		input.start = self.start_token().map_err(|e| HttpResponse::BadRequest().body(e))?;
		Ok(input)
	}
}

/// Maps a core error to its HTTP status.
fn chain_error_response(error: &ChainError) -> HttpResponse {
	match error {
		ChainError::EmptyInput(_) | ChainError::InvalidCount(_) | ChainError::UnknownStartToken(_) => {
			HttpResponse::BadRequest().body(error.to_string())
		}
		ChainError::DeadEnd { .. } | ChainError::RetriesExhausted { .. } => {
			HttpResponse::UnprocessableEntity().body(error.to_string())
		}
	}
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates a sentence from the loaded corpus based on query parameters.
/// A `seed` makes the answer reproducible for a given corpus.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<Mutex<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Corpus lock failed"),
	};

	let Some((_, generator)) = &shared_data.corpus else {
		return HttpResponse::Conflict().body("No corpus loaded");
	};

	let input = match query.generation_input(&shared_data.defaults, shared_data.limits) {
		Ok(input) => input,
		Err(response) => return response
	};

	let result = match query.seed {
		Some(seed) => generator.generate(&input, &mut RngSource::seeded(seed)),
		None => generator.generate(&input, &mut RngSource::thread()),
	};

	match result {
		Ok(sentence) => HttpResponse::Ok().body(sentence),
		Err(e) => {
			warn!("Generation failed: {e}");
			chain_error_response(&e)
		}
	}
}

/// HTTP PUT endpoint `/v1/corpus`
///
/// Replaces the loaded corpus with the request body.
#[put("/v1/corpus")]
async fn put_corpus(data: web::Data<Mutex<SharedData>>, body: String) -> impl Responder {
	let generator = match Generator::new(&body) {
		Ok(generator) => generator,
		Err(e) => return chain_error_response(&e)
	};
	let keys = generator.map().len();

	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Corpus lock failed"),
	};
	shared_data.corpus = Some((TextCaret::new(body), generator));

	info!("Corpus loaded ({keys} keys)");
	HttpResponse::Ok().body(format!("Corpus loaded ({keys} keys)"))
}

/// HTTP GET endpoint `/v1/report`
///
/// Returns the visual report data of the loaded corpus as JSON.
#[get("/v1/report")]
async fn get_report(data: web::Data<Mutex<SharedData>>, query: web::Query<ReportParams>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Corpus lock failed"),
	};

	match &shared_data.corpus {
		Some((caret, _)) => HttpResponse::Ok().json(caret.visual_report(query.num.unwrap_or(DEFAULT_TOP_TOKENS))),
		None => HttpResponse::Conflict().body("No corpus loaded"),
	}
}

/// Main entry point for the server.
///
/// Starts with no corpus; clients load one with `PUT /v1/corpus`.
/// The shared state is wrapped in a `Mutex` and shared by every worker.
#[actix_web::main]
async fn main() -> io::Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let config = ServerConfig::parse();
	let shared_data = SharedData::new(&config).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
	let shared_data = web::Data::new(Mutex::new(shared_data));
	let corpus_limit = config.max_corpus_bytes;

	info!("Listening on {}:{} ({} workers)", config.host, config.port, config.workers);

	HttpServer::new(move || {
		App::new()
			.wrap(Logger::default())
			.wrap(Cors::permissive())
			.app_data(shared_data.clone())
			.app_data(web::PayloadConfig::new(corpus_limit))
			.service(get_generated)
			.service(put_corpus)
			.service(get_report)
	})
		.workers(config.workers)
		.bind((config.host.as_str(), config.port))?
		.run()
		.await
}
