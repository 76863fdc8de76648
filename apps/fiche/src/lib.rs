pub mod command;
pub mod render;

use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use fiche_config::Config;
use fiche_domain::TreeRow;
use fiche_service::{Activation, HistoryItem, SessionController, UrlOpener};

use crate::command::Command;

#[derive(Debug, Parser)]
#[command(
	version = fiche_cli::VERSION,
	rename_all = "kebab",
	styles = fiche_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
}

/// Prints opened URLs and, when configured, hands them to the system browser.
pub struct TerminalOpener {
	launch: bool,
}
impl TerminalOpener {
	pub fn new(launch: bool) -> Self {
		Self { launch }
	}
}

impl UrlOpener for TerminalOpener {
	fn open(&self, url: &str) {
		println!("Opening {url}");

		if self.launch
			&& let Err(err) = open::that(url)
		{
			tracing::warn!(%url, error = %err, "Failed to launch browser.");
		}
	}
}

pub enum Step {
	Continue(String),
	Quit,
}

/// Maps parsed commands onto controller actions and renders what the user should see.
pub struct Repl {
	controller: SessionController,
}
impl Repl {
	pub fn new(controller: SessionController) -> Self {
		Self { controller }
	}

	pub fn from_config(cfg: &Config) -> Self {
		let opener = Arc::new(TerminalOpener::new(cfg.service.open_in_browser));

		Self::new(SessionController::from_config(cfg, opener))
	}

	pub fn controller(&self) -> &SessionController {
		&self.controller
	}

	pub async fn handle_line(&mut self, line: &str) -> Step {
		match command::parse(line) {
			Ok(command) => self.handle(command).await,
			Err(err) => Step::Continue(err.to_string()),
		}
	}

	pub async fn handle(&mut self, command: Command) -> Step {
		let output = match command {
			Command::Search(text) => match self.controller.on_submit(&text).await {
				Ok(_) => render::results(&self.controller.results()),
				Err(err) => {
					tracing::debug!(error = %err, "Search rejected.");

					render::results(&self.controller.results())
				},
			},
			Command::Results => render::results(&self.controller.results()),
			Command::Open(n) => {
				let state = self.controller.results();

				match n.checked_sub(1).and_then(|i| state.results.get(i)) {
					Some(result) => {
						self.controller.on_result_activated(result);

						String::new()
					},
					None => format!("No result {n}."),
				}
			},
			Command::History => self.history(),
			Command::Go(n) => match self.item(n) {
				Some(item) => self.activate(&item).await,
				None => format!("No history row {n}."),
			},
			Command::Remove(n) => match self.item(n) {
				Some(item) => {
					self.controller.on_delete(&item);

					self.history()
				},
				None => format!("No history row {n}."),
			},
			Command::Fold(n) => match self.item(n) {
				Some(HistoryItem::Query(id)) => {
					self.controller.toggle_node(&id);

					self.history()
				},
				Some(HistoryItem::Article { .. }) => format!("Row {n} is not a query."),
				None => format!("No history row {n}."),
			},
			Command::Sidebar => {
				self.controller.toggle_sidebar();

				self.history()
			},
			Command::About => render::ABOUT.to_string(),
			Command::Help => command::HELP.to_string(),
			Command::Quit => return Step::Quit,
			Command::Empty => String::new(),
		};

		Step::Continue(output)
	}

	fn history(&self) -> String {
		render::history(&self.controller.rows(), self.controller.sidebar().open)
	}

	fn item(&self, n: usize) -> Option<HistoryItem> {
		let rows = self.controller.rows();

		match rows.get(n.checked_sub(1)?)? {
			TreeRow::Query { id, .. } => Some(HistoryItem::Query(id.clone())),
			TreeRow::Article { id, parent_id, .. } =>
				Some(HistoryItem::Article { id: id.clone(), parent_id: parent_id.clone() }),
		}
	}

	async fn activate(&mut self, item: &HistoryItem) -> String {
		match self.controller.on_history_item_activated(item).await {
			Ok(Activation::Opened(_)) => String::new(),
			Ok(Activation::Replayed(_)) | Err(_) => render::results(&self.controller.results()),
			Ok(Activation::Missing) => "That history entry no longer exists.".to_string(),
		}
	}
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = fiche_config::load(&args.config)?;

	init_tracing(&config)?;

	let mut repl = Repl::from_config(&config);
	let mut lines = BufReader::new(tokio::io::stdin()).lines();

	println!("fiche {}. Type `help` for commands.", fiche_cli::VERSION);

	while let Some(line) = lines.next_line().await? {
		match repl.handle_line(&line).await {
			Step::Continue(output) if output.is_empty() => {},
			Step::Continue(output) => println!("{output}"),
			Step::Quit => break,
		}
	}

	tracing::info!("Session closed.");

	Ok(())
}

fn init_tracing(config: &Config) -> color_eyre::Result<()> {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

	Ok(())
}
