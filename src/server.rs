use crate::context::ApplicationContext;
use crate::playback::duration_to_seconds;
use crate::playback::session::PlaybackSession;
use axum::Router;
use tokio::task::JoinHandle;
use tower_http::cors::CorsLayer;
use tracing::{debug, error};

mod rest_api;

pub async fn run_server(application_context: ApplicationContext) -> Result<(), std::io::Error> {
	let address = application_context.configuration.address;
	let sweeper = spawn_session_sweeper(application_context.clone());

	let router = create_router(application_context);
	let result = axum_server::bind(address).serve(router.into_make_service()).await;

	sweeper.abort();
	result
}

pub fn create_router(application_context: ApplicationContext) -> Router {
	Router::new()
		.nest("/api", rest_api::router())
		.layer(CorsLayer::permissive())
		.with_state(application_context)
}

/// Periodically tears down playback sessions of pages that stopped talking to
/// us, saving their final listening position. Aborted when the server stops.
fn spawn_session_sweeper(application_context: ApplicationContext) -> JoinHandle<()> {
	tokio::spawn(async move {
		let idle_timeout = application_context.configuration.session_idle_timeout;
		let mut interval = tokio::time::interval(application_context.configuration.session_sweep_interval);

		loop {
			interval.tick().await;

			for session in application_context.sessions.close_idle(idle_timeout) {
				debug!(
					"Sweeping idle playback session {} for chapter '{}'.",
					session.id, session.chapter
				);
				persist_resume_position(&application_context, &session).await;
			}
		}
	})
}

/// Saves where the listener left off, so the next session on this chapter can
/// pick up there.
pub(crate) async fn persist_resume_position(application_context: &ApplicationContext, session: &PlaybackSession) {
	let position_seconds = duration_to_seconds(session.state.position());
	if let Err(store_error) = application_context
		.store
		.save_audio_progress(session.student, &session.chapter, position_seconds)
		.await
	{
		error!(
			"Failed to save audio progress for chapter '{}': {store_error}",
			session.chapter
		);
	}
}
