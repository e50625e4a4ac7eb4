#![cfg_attr(test, allow(unused_crate_dependencies))]
//! grouper binary.
//!
//! Edits the stored groups and previews what focusing a group would ask of
//! the editor. Focus runs against the in-memory host, so it never touches a
//! real window.

mod cli;

use std::io::{self, Write};
use std::path::Path;

use anyhow::Context;
use clap::Parser;
use grouper_config::Config;
use grouper_core::{
	ChangeReceiver, Command, GroupError, GroupStore, MemoryHost, Outcome, Registry, Session, TreeItem,
	notify,
};
use grouper_store::JsonFileStore;
use tracing::{debug, info};

use crate::cli::{Action, Cli};

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();

	let subscriber = tracing_subscriber::fmt()
		.with_max_level(if cli.verbose {
			tracing::Level::DEBUG
		} else {
			tracing::Level::WARN
		})
		.with_writer(io::stderr)
		.finish();
	tracing::subscriber::set_global_default(subscriber)?;

	let config = Config::discover(cli.config.as_deref()).context("failed to load configuration")?;
	let store_path = cli
		.store
		.or_else(|| config.store_path())
		.context("no data directory found; pass --store")?;
	info!(store = %store_path.display(), "grouper.start");

	let cwd = std::env::current_dir().context("failed to read the current directory")?;
	let (notifier, changes) = notify::channel();
	let registry = config.registry(&cwd, notifier);
	let mut session = Session::open(registry, MemoryHost::new(), JsonFileStore::new(store_path))?;

	let mut stdout = io::stdout().lock();
	run(cli.command, &mut session, &cwd, &mut stdout)?;
	drain(changes);
	Ok(())
}

/// Executes one subcommand, writing user-facing output to `out`.
fn run<S: GroupStore>(
	action: Action,
	session: &mut Session<MemoryHost, S>,
	cwd: &Path,
	out: &mut dyn Write,
) -> anyhow::Result<()> {
	match action {
		Action::List { group } => print_tree(session.registry(), group.as_deref(), out)?,
		Action::Create { name, pages } => {
			let pages = pages.into_iter().map(|p| cwd.join(p)).collect();
			session.execute(Command::CreateGroup {
				name: name.clone(),
				pages,
			})?;
			writeln!(out, "Created group '{name}'")?;
		}
		Action::Rename { from, to } => {
			session.execute(Command::RenameGroup {
				from: from.clone(),
				to: to.clone(),
			})?;
			writeln!(out, "Renamed '{from}' to '{to}'")?;
		}
		Action::Delete { name } => match session.execute(Command::DeleteGroup { name: name.clone() })? {
			Outcome::Unchanged => writeln!(out, "No group named '{name}'")?,
			_ => writeln!(out, "Deleted group '{name}'")?,
		},
		Action::Add { group, paths } => {
			for path in paths {
				let path = cwd.join(path);
				let outcome = session.execute(Command::AddPage {
					group: group.clone(),
					path: path.clone(),
				})?;
				if outcome == Outcome::Unchanged {
					writeln!(out, "{} is already in '{group}'", path.display())?;
				}
			}
		}
		Action::Remove { group, path } => {
			let path = cwd.join(path);
			let outcome = session.execute(Command::RemovePage {
				group: group.clone(),
				path: path.clone(),
			})?;
			if outcome == Outcome::Unchanged {
				writeln!(out, "{} is not in '{group}'", path.display())?;
			}
		}
		Action::Focus { name } => {
			let outcome = session.execute(Command::FocusGroup { name: name.clone() })?;
			session.pump();
			if let Outcome::NotFocused(reason) = outcome {
				writeln!(out, "Group '{name}' was not focused: {reason:?}")?;
			}
			for request in session.host().requests() {
				writeln!(out, "{request:?}")?;
			}
		}
	}
	Ok(())
}

fn print_tree(registry: &Registry, group: Option<&str>, out: &mut dyn Write) -> anyhow::Result<()> {
	if let Some(name) = group
		&& registry.group(name).is_none()
	{
		return Err(GroupError::NotFound(name.to_owned()).into());
	}
	for item in registry.children(group) {
		match item {
			TreeItem::Group(g) => {
				writeln!(out, "{} ({})", g.name(), g.pages().len())?;
				for page in g.pages() {
					writeln!(out, "  {}", page.name())?;
				}
			}
			TreeItem::Page(page) => writeln!(out, "{}\t{}", page.name(), page.path().display())?,
		}
	}
	Ok(())
}

fn drain(mut changes: ChangeReceiver) {
	while let Ok(change) = changes.try_recv() {
		debug!(?change, "grouper.change");
	}
}
