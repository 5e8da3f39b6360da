use sage_history::Turn;

use crate::{Error, Responder, Result, prompts};

impl Responder {
	/// Answers one support ticket for `identity`. Every external failure
	/// other than the documented soft paths (missing document, undecodable
	/// history, failed translation) propagates to the caller; there is no
	/// partial answer.
	pub async fn answer(&self, subject: &str, body: &str, identity: &str) -> Result<String> {
		let _permit =
			self.answer_permits.acquire().await.map_err(|_| Error::Unavailable)?;
		let lock = self.identity_lock(identity);
		let _guard = lock.lock().await;

		let native_question = prompts::native_question(subject, body);
		let translated = self.translate(&native_question).await;
		let mut turns = self
			.history
			.load(identity)
			.await
			.map_err(|err| Error::History { message: err.to_string() })?;
		let summary = self.summarize(&turns).await?;
		let entitled = self
			.providers
			.entitlement
			.has_active_entitlement(&self.cfg.providers.entitlement, identity)
			.await
			.map_err(|err| Error::Entitlement { message: err.to_string() })?;

		tracing::info!(identity, entitled, "Routing general retrieval by entitlement.");

		let query_vector = self
			.providers
			.embedding
			.embed(&self.cfg.providers.embedding, &translated)
			.await
			.map_err(|err| Error::Embedding { message: err.to_string() })?;
		let top_k = self.cfg.retrieval.top_k as usize;
		let general_context = self.general_index(entitled).query(&query_vector, top_k);
		let expert_context = self.indices.expert.query(&query_vector, top_k);
		let prompt = prompts::answer_prompt(
			&self.cfg.language,
			&native_question,
			&translated,
			&summary,
			&general_context.join("\n\n"),
			&expert_context.join("\n\n"),
		);
		let answer = self
			.providers
			.completion
			.complete(&self.cfg.providers.completion, &prompt)
			.await
			.map_err(|err| Error::Generation { message: err.to_string() })?;

		turns.push(Turn { question: native_question, answer: answer.clone() });

		self.history
			.save(identity, &turns)
			.await
			.map_err(|err| Error::History { message: err.to_string() })?;

		Ok(answer)
	}

	/// Rewrites a drafted reply in the native language, short and friendly,
	/// without adding content. Used by the surrounding ticket flow before a
	/// reply is shown to an agent; not part of the answer pipeline.
	pub async fn condense_reply(&self, draft: &str) -> Result<String> {
		let prompt = prompts::condense_prompt(&self.cfg.language, draft);

		self.providers
			.completion
			.complete(&self.cfg.providers.completion, &prompt)
			.await
			.map_err(|err| Error::Generation { message: err.to_string() })
	}

	/// Normalizes the native-language question into a retrieval query in the
	/// corpus language. A question already in the corpus language skips the
	/// call; a failed call degrades to the untranslated question instead of
	/// failing the whole answer.
	async fn translate(&self, native_question: &str) -> String {
		if self.is_retrieval_language(native_question) {
			tracing::debug!("Question already in the retrieval language. Skipping translation.");

			return native_question.to_string();
		}

		let prompt = prompts::translate_prompt(&self.cfg.language, native_question);

		match self
			.providers
			.completion
			.complete(&self.cfg.providers.completion, &prompt)
			.await
		{
			Ok(translated) => translated,
			Err(err) => {
				tracing::warn!(error = %err, "Query translation failed. Retrieving with the untranslated question.");

				native_question.to_string()
			},
		}
	}

	/// Compresses prior turns into one context paragraph. An empty history
	/// short-circuits to an empty summary without any external call.
	async fn summarize(&self, turns: &[Turn]) -> Result<String> {
		if turns.is_empty() {
			return Ok(String::new());
		}

		let start = turns.len().saturating_sub(self.cfg.history.max_summary_turns as usize);
		let prompt = prompts::summary_prompt(&turns[start..]);

		self.providers
			.completion
			.complete(&self.cfg.providers.completion, &prompt)
			.await
			.map_err(|err| Error::Generation { message: err.to_string() })
	}

	fn is_retrieval_language(&self, text: &str) -> bool {
		let Some(info) = whatlang::detect(text) else {
			return false;
		};

		info.is_reliable()
			&& info.lang().eng_name().eq_ignore_ascii_case(&self.cfg.language.retrieval)
	}
}
