use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "grouper")]
#[command(about = "Named groups of documents, each shown in its own editor region")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Configuration file (defaults to the user config directory)
	#[arg(short, long, value_name = "PATH", global = true)]
	pub config: Option<PathBuf>,

	/// Group store, overriding the configured location
	#[arg(long, value_name = "PATH", global = true)]
	pub store: Option<PathBuf>,

	/// Verbose logging
	#[arg(short, long, global = true)]
	pub verbose: bool,

	/// Subcommand to execute.
	#[command(subcommand)]
	pub command: Action,
}

/// Available subcommands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Action {
	/// List groups, or the pages of one group
	List {
		/// Only list this group's pages
		group: Option<String>,
	},
	/// Create a group
	Create {
		name: String,
		/// Page to add (repeatable)
		#[arg(short, long = "page", value_name = "PATH")]
		pages: Vec<PathBuf>,
	},
	/// Rename a group
	Rename { from: String, to: String },
	/// Delete a group
	Delete { name: String },
	/// Add pages to a group
	Add {
		group: String,
		#[arg(required = true)]
		paths: Vec<PathBuf>,
	},
	/// Remove a page from a group
	Remove { group: String, path: PathBuf },
	/// Show the region requests focusing a group would issue
	Focus { name: String },
}
