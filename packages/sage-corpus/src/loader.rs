use std::{fs, path::Path};

/// Reads a knowledge-base source into plain text. A missing or unreadable
/// file degrades to an empty string; downstream treats empty text as "no
/// content for this tier" rather than an error.
pub fn load_document(path: &Path) -> String {
	match fs::read_to_string(path) {
		Ok(text) => text,
		Err(err) => {
			tracing::warn!(path = %path.display(), error = %err, "Document unreadable. Using empty content.");

			String::new()
		},
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	use sage_testkit::TestDir;

	#[test]
	fn reads_an_existing_document() {
		let dir = TestDir::new("sage_corpus_loader");
		let path = dir.path().join("doc.txt");

		fs::write(&path, "Min deposit is $10.").expect("Failed to write test document.");

		assert_eq!(load_document(&path), "Min deposit is $10.");
	}

	#[test]
	fn missing_document_degrades_to_empty() {
		let dir = TestDir::new("sage_corpus_loader");
		let path = dir.path().join("absent.txt");

		assert_eq!(load_document(&path), "");
	}
}
