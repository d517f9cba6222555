use clap::Parser;

use textcaret_core::DEFAULT_WORD_COUNT;

/// Server settings, read from the command line or `TEXTCARET_*` variables.
#[derive(Parser, Debug, Clone)]
#[command(name = "textcaret-server", version, about = "HTTP interface to the textcaret Markov generator")]
pub struct ServerConfig {
	/// Address to bind
	#[arg(long, env = "TEXTCARET_HOST", default_value = "127.0.0.1")]
	pub host: String,

	/// Port to bind
	#[arg(long, env = "TEXTCARET_PORT", default_value_t = 5000)]
	pub port: u16,

	/// Number of HTTP workers
	#[arg(long, env = "TEXTCARET_WORKERS", default_value_t = num_cpus::get())]
	pub workers: usize,

	/// Words generated when a request does not set `words`
	#[arg(long, env = "TEXTCARET_DEFAULT_WORDS", default_value_t = DEFAULT_WORD_COUNT)]
	pub default_words: usize,

	/// Dead-end retries when a request does not set `retries`
	#[arg(long, env = "TEXTCARET_MAX_RETRIES", default_value_t = 5)]
	pub max_retries: usize,

	/// Largest `words` a request may ask for
	#[arg(long, env = "TEXTCARET_MAX_WORDS", default_value_t = 1000)]
	pub max_words: usize,

	/// Largest `retries` a request may ask for
	#[arg(long, env = "TEXTCARET_RETRY_LIMIT", default_value_t = 100)]
	pub retry_limit: usize,

	/// Largest accepted corpus body, in bytes
	#[arg(long, env = "TEXTCARET_MAX_CORPUS_BYTES", default_value_t = 1024 * 1024)]
	pub max_corpus_bytes: usize,
}
