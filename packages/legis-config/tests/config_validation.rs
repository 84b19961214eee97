use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use legis_config::{Config, Error};

const SAMPLE_CONFIG_TOML: &str = include_str!("fixtures/sample_config.toml");

fn sample_with(section: &str, key: &str, value: Value) -> String {
	let mut root: Value = toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse sample config.");
	let mut table = root.as_table_mut().expect("Sample config must be a table.");

	for part in section.split('.') {
		table = table
			.entry(part.to_string())
			.or_insert_with(|| Value::Table(Default::default()))
			.as_table_mut()
			.expect("Config section must be a table.");
	}

	table.insert(key.to_string(), value);

	toml::to_string(&root).expect("Failed to render sample config.")
}

fn write_temp_config(payload: String) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("legis_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn load_payload(payload: String) -> legis_config::Result<Config> {
	let path = write_temp_config(payload);
	let result = legis_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	result
}

fn expect_validation(payload: String, needle: &str) {
	let err = load_payload(payload).expect_err("Expected validation error.");
	let message = err.to_string();

	assert!(matches!(err, Error::Validation { .. }), "Unexpected error kind: {err:?}");
	assert!(message.contains(needle), "Unexpected error message: {message}");
}

#[test]
fn sample_config_loads_with_defaults() {
	let cfg = load_payload(SAMPLE_CONFIG_TOML.to_string()).expect("Sample config must load.");

	assert!(cfg.service.cors_allow_any);
	assert!(cfg.selection.strict_jurisdiction);
	assert_eq!(cfg.selection.max_results, 6);
	assert_eq!(cfg.selection.blend_in_jurisdiction, 4);
	assert_eq!(cfg.selection.blend_out_of_jurisdiction, 2);
	assert_eq!(cfg.retrieval.jurisdiction_k, 20);
	assert_eq!(cfg.retrieval.global_k, 30);
	assert_eq!(cfg.retrieval.widen_factor, 10);
	assert_eq!(cfg.ranking.similarity_weight, 0.45);
	assert_eq!(cfg.ranking.recency_tau_days, 540.0);
	assert_eq!(cfg.providers.llm.max_tokens, 600);
	assert_eq!(cfg.providers.embedding.query_prefix.as_deref(), Some("query: "));
	assert!(cfg.classifier.greeting_words.iter().any(|word| word == "good morning"));
	assert!(cfg.classifier.domain_hint_words.iter().any(|word| word == "audit"));
}

#[test]
fn blank_query_prefix_normalizes_to_none() {
	let payload = sample_with("providers.embedding", "query_prefix", Value::String("  ".into()));
	let cfg = load_payload(payload).expect("Config must load.");

	assert!(cfg.providers.embedding.query_prefix.is_none());
}

#[test]
fn classifier_words_are_trimmed_and_lowercased() {
	let payload = sample_with(
		"classifier",
		"greeting_words",
		Value::Array(vec![Value::String(" Howdy ".into()), Value::String("".into())]),
	);
	let cfg = load_payload(payload).expect("Config must load.");

	assert_eq!(cfg.classifier.greeting_words, vec!["howdy".to_string()]);
}

#[test]
fn embedding_dimensions_must_match_vector_dim() {
	let payload = sample_with("storage.qdrant", "vector_dim", Value::Integer(768));

	expect_validation(payload, "must match storage.qdrant.vector_dim");
}

#[test]
fn provider_api_keys_must_be_non_empty() {
	let payload = sample_with("providers.llm", "api_key", Value::String(" ".into()));

	expect_validation(payload, "Provider llm api_key must be non-empty.");
}

#[test]
fn widen_factor_must_be_positive() {
	let payload = sample_with("retrieval", "widen_factor", Value::Integer(0));

	expect_validation(payload, "retrieval.widen_factor must be greater than zero.");
}

#[test]
fn ranking_weights_must_be_non_negative() {
	let payload = sample_with("ranking", "category_weight", Value::Float(-0.1));

	expect_validation(payload, "ranking.category_weight must be zero or greater.");
}

#[test]
fn recency_tau_must_be_positive() {
	let payload = sample_with("ranking", "recency_tau_days", Value::Float(0.0));

	expect_validation(payload, "ranking.recency_tau_days");
}

#[test]
fn blend_split_must_fit_max_results() {
	let payload = sample_with("selection", "blend_in_jurisdiction", Value::Integer(5));

	expect_validation(payload, "must not exceed selection.max_results");
}

#[test]
fn oversized_blend_split_is_rejected_without_overflow() {
	let payload =
		sample_with("selection", "blend_in_jurisdiction", Value::Integer(i64::from(u32::MAX)));

	expect_validation(payload, "must not exceed selection.max_results");
}

#[test]
fn missing_file_reports_read_error() {
	let mut path = env::temp_dir();

	path.push("legis_config_test_missing_file.toml");

	let err = legis_config::load(&path).expect_err("Expected read error.");

	assert!(matches!(err, Error::ReadConfig { .. }));
}

#[test]
fn malformed_toml_reports_parse_error() {
	let err = load_payload("[service\nhttp_bind =".to_string()).expect_err("Expected parse error.");

	assert!(matches!(err, Error::ParseConfig { .. }));
}

#[test]
fn example_config_at_repository_root_loads() {
	let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../legis.example.toml");
	let cfg = legis_config::load(&path).expect("Example config must load.");

	assert_eq!(cfg.retrieval.widen_min, 200);
	assert!(cfg.selection.strict_jurisdiction);
}
