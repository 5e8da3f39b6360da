use std::{
	env, fs,
	path::{Path, PathBuf},
};

use ahash::AHashMap;
use tokenizers::{
	Tokenizer, models::wordlevel::WordLevel, pre_tokenizers::whitespace::WhitespaceSplit,
};
use uuid::Uuid;

/// Unique scratch directory removed again when the fixture drops.
pub struct TestDir {
	path: PathBuf,
}
impl TestDir {
	pub fn new(prefix: &str) -> Self {
		let path = env::temp_dir().join(format!("{prefix}_{}", Uuid::new_v4().simple()));

		fs::create_dir_all(&path).expect("Failed to create test directory.");

		Self { path }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}
}
impl Drop for TestDir {
	fn drop(&mut self) {
		if let Err(err) = fs::remove_dir_all(&self.path)
			&& err.kind() != std::io::ErrorKind::NotFound
		{
			eprintln!("Test directory cleanup failed: {err}.");
		}
	}
}

/// Offline tokenizer where every whitespace-separated word counts as one
/// token. Keeps chunking tests deterministic without fetching a model repo.
pub fn word_tokenizer() -> Tokenizer {
	let mut vocab = AHashMap::new();

	vocab.insert("[UNK]".to_string(), 0_u32);

	let model = WordLevel::builder()
		.vocab(vocab)
		.unk_token("[UNK]".to_string())
		.build()
		.expect("Failed to build word-level model.");
	let mut tokenizer = Tokenizer::new(model);

	tokenizer.with_pre_tokenizer(Some(WhitespaceSplit));

	tokenizer
}
