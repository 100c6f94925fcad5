use crate::clock::Clock;
use crate::configuration::Configuration;
use crate::playback::registry::SessionRegistry;
use crate::store::Store;
use crate::store::error::StoreError;
use crate::store::sqlite::SqliteStore;
use axum::extract::FromRef;
use std::sync::Arc;

#[derive(Clone, FromRef)]
pub struct ApplicationContext {
	pub configuration: Configuration,
	pub clock: Clock,
	pub store: Arc<dyn Store>,
	pub sessions: Arc<SessionRegistry>,
}

impl ApplicationContext {
	pub async fn new(configuration: Configuration, clock: Clock) -> Result<ApplicationContext, StoreError> {
		let store = Arc::new(SqliteStore::new(&configuration.database_url).await?);
		let sessions = Arc::new(SessionRegistry::new(configuration.session_limit));

		Ok(Self {
			configuration,
			clock,
			store,
			sessions,
		})
	}
}
