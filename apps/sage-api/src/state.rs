use std::sync::Arc;

use sage_history::FileHistoryStore;
use sage_service::{Providers, Responder};

#[derive(Clone)]
pub struct AppState {
	pub responder: Arc<Responder>,
}
impl AppState {
	pub async fn new(config: sage_config::Config) -> color_eyre::Result<Self> {
		let tokenizer_repo = config
			.chunking
			.tokenizer_repo
			.clone()
			.unwrap_or_else(|| config.providers.embedding.model.clone());
		let tokenizer = sage_chunking::load_tokenizer(&tokenizer_repo)
			.map_err(|err| color_eyre::eyre::eyre!(err))?;
		let history = FileHistoryStore::new(&config.history.dir);

		history.ensure_dir().await?;

		let responder =
			Responder::init(config, tokenizer, Arc::new(history), Providers::http()).await?;

		Ok(Self { responder: Arc::new(responder) })
	}

	pub fn with_responder(responder: Arc<Responder>) -> Self {
		Self { responder }
	}
}
