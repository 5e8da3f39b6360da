pub use tokenizers::Tokenizer;
use unicode_segmentation::UnicodeSegmentation;

pub type TokenizerError = tokenizers::Error;

#[derive(Clone, Debug)]
pub struct ChunkingConfig {
	pub max_tokens: u32,
	pub overlap_tokens: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chunk {
	pub chunk_index: i32,
	pub text: String,
}

pub fn load_tokenizer(repo: &str) -> Result<Tokenizer, TokenizerError> {
	Tokenizer::from_pretrained(repo, None)
}

/// Splits `text` into sentence-aligned chunks whose token counts stay within
/// `max_tokens`, carrying roughly `overlap_tokens` of trailing sentences into
/// the next chunk. Pure function of its inputs.
///
/// A single sentence longer than `max_tokens` is still emitted as one chunk,
/// and a sentence longer than `overlap_tokens` can leave consecutive chunks
/// with no shared sentence.
pub fn split_text(text: &str, cfg: &ChunkingConfig, tokenizer: &Tokenizer) -> Vec<Chunk> {
	let sentences: Vec<&str> = text
		.split_sentence_bounds()
		.map(str::trim)
		.filter(|sentence| !sentence.is_empty())
		.collect();
	let mut chunks = Vec::new();
	let mut buffer: Vec<(&str, usize)> = Vec::new();
	let mut buffer_tokens = 0_usize;
	let mut chunk_index = 0_i32;

	for sentence in sentences {
		let count = token_count(sentence, tokenizer);

		if buffer_tokens + count <= cfg.max_tokens as usize {
			buffer.push((sentence, count));
			buffer_tokens += count;

			continue;
		}

		if !buffer.is_empty() {
			chunks.push(Chunk { chunk_index, text: join_sentences(&buffer) });

			chunk_index += 1;
		}

		// Drop oldest sentences until what remains fits the overlap budget.
		while buffer_tokens > cfg.overlap_tokens as usize && !buffer.is_empty() {
			let (_, removed) = buffer.remove(0);

			buffer_tokens -= removed;
		}

		buffer.push((sentence, count));
		buffer_tokens += count;
	}

	if !buffer.is_empty() {
		chunks.push(Chunk { chunk_index, text: join_sentences(&buffer) });
	}

	chunks
}

fn join_sentences(buffer: &[(&str, usize)]) -> String {
	buffer.iter().map(|(sentence, _)| *sentence).collect::<Vec<_>>().join(" ")
}

fn token_count(sentence: &str, tokenizer: &Tokenizer) -> usize {
	match tokenizer.encode(sentence, false) {
		Ok(encoding) => encoding.len(),
		Err(err) => {
			tracing::error!(error = %err, "Tokenizer failed to encode sentence.");

			0
		},
	}
}
