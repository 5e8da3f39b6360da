use std::cmp::Ordering;

use crate::{Error, Result};

/// Exact nearest-neighbor index over chunk embeddings. Read-only after
/// `build`; rebuilding a tier means constructing a fresh index. The corpora
/// are small enough that exact search over every entry is acceptable.
#[derive(Debug, Default)]
pub struct VectorIndex {
	entries: Vec<Entry>,
}

#[derive(Debug)]
struct Entry {
	text: String,
	embedding: Vec<f32>,
}

impl VectorIndex {
	/// Index with no entries; every query returns an empty result.
	pub fn empty() -> Self {
		Self { entries: Vec::new() }
	}

	pub fn build(entries: Vec<(String, Vec<f32>)>) -> Result<Self> {
		let mut index = Self::empty();
		let mut expected = None;

		for (text, embedding) in entries {
			if embedding.is_empty() {
				return Err(Error::EmptyEmbedding);
			}

			match expected {
				None => expected = Some(embedding.len()),
				Some(dim) if dim != embedding.len() =>
					return Err(Error::DimensionMismatch { expected: dim, actual: embedding.len() }),
				Some(_) => {},
			}

			index.entries.push(Entry { text, embedding });
		}

		Ok(index)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Up to `k` chunk texts ascending by squared L2 distance to `vector`,
	/// ties broken by insertion order. Never fails: an empty index or a zero
	/// `k` yields an empty result.
	pub fn query(&self, vector: &[f32], k: usize) -> Vec<String> {
		if self.entries.is_empty() || k == 0 {
			return Vec::new();
		}

		let mut scored: Vec<(usize, f32)> = self
			.entries
			.iter()
			.enumerate()
			.map(|(idx, entry)| (idx, squared_l2(vector, &entry.embedding)))
			.collect();

		scored.sort_by(|a, b| {
			a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal).then_with(|| a.0.cmp(&b.0))
		});
		scored.truncate(k);

		scored.into_iter().map(|(idx, _)| self.entries[idx].text.clone()).collect()
	}
}

fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
	a.iter()
		.zip(b.iter())
		.map(|(x, y)| {
			let diff = x - y;

			diff * diff
		})
		.sum()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_index_returns_no_results() {
		let index = VectorIndex::empty();

		assert!(index.query(&[1.0, 2.0], 3).is_empty());
	}

	#[test]
	fn exact_match_ranks_first() {
		let index = VectorIndex::build(vec![
			("Min deposit is $10.".to_string(), vec![1.0, 0.0]),
			("Use risk management.".to_string(), vec![0.0, 1.0]),
		])
		.expect("Failed to build index.");
		let hits = index.query(&[1.0, 0.0], 1);

		assert_eq!(hits, vec!["Min deposit is $10.".to_string()]);
	}

	#[test]
	fn results_are_ordered_by_ascending_distance() {
		let index = VectorIndex::build(vec![
			("far".to_string(), vec![10.0, 10.0]),
			("near".to_string(), vec![1.0, 1.0]),
			("mid".to_string(), vec![4.0, 4.0]),
		])
		.expect("Failed to build index.");
		let hits = index.query(&[0.0, 0.0], 3);

		assert_eq!(
			hits,
			vec!["near".to_string(), "mid".to_string(), "far".to_string()]
		);
	}

	#[test]
	fn k_larger_than_index_returns_everything() {
		let index = VectorIndex::build(vec![("only".to_string(), vec![0.5, 0.5])])
			.expect("Failed to build index.");

		assert_eq!(index.query(&[0.0, 0.0], 10).len(), 1);
	}

	#[test]
	fn zero_k_returns_no_results() {
		let index = VectorIndex::build(vec![("only".to_string(), vec![0.5, 0.5])])
			.expect("Failed to build index.");

		assert!(index.query(&[0.0, 0.0], 0).is_empty());
	}

	#[test]
	fn mixed_dimensions_are_rejected_at_build() {
		let result = VectorIndex::build(vec![
			("a".to_string(), vec![1.0, 0.0]),
			("b".to_string(), vec![1.0]),
		]);

		assert!(matches!(result, Err(Error::DimensionMismatch { expected: 2, actual: 1 })));
	}
}
