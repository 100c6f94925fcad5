use crate::commandline::Commandline;
use crate::error::BereaError;
use clap::Parser;

mod clock;
mod commandline;
mod configuration;
mod context;
mod error;
mod grades;
mod playback;
mod schedule;
mod server;
mod store;

#[tokio::main]
async fn main() -> Result<(), BereaError> {
	let commandline = Commandline::parse();
	commandline.run().await
}
