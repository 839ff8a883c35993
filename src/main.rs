use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use readlist::handlers::{self, Format, Response};
use readlist::{CatalogClient, NewReadlistEntry, ReadlistRepository, Settings};

/// Search Open Library and keep a personal readlist
#[derive(Parser)]
#[command(name = "readlist")]
#[command(version)]
#[command(about = "Search Open Library and keep a personal readlist")]
struct Cli {
    /// SQLite database file (overrides READLIST_DATABASE_PATH)
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Searches the catalog by title or author
    Search {
        query: String,

        /// Render an HTML fragment instead of JSON
        #[arg(long)]
        html: bool,
    },

    /// Shows one work by its id (e.g. OL893415W)
    Details {
        work_id: String,

        #[arg(long)]
        html: bool,
    },

    /// Saves a book to the readlist
    Add {
        /// Raw JSON payload; replaces the field flags when given
        #[arg(long, conflicts_with_all = ["title", "author", "work_id"])]
        json: Option<String>,

        #[arg(long)]
        title: Option<String>,

        /// Repeat for several authors
        #[arg(long)]
        author: Vec<String>,

        #[arg(long)]
        subject: Vec<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        cover_art_url: Option<String>,

        #[arg(long)]
        work_id: Option<String>,
    },

    /// Lists the saved readlist
    List {
        #[arg(long)]
        html: bool,
    },

    /// Removes a saved book by id
    Delete { id: i64 },
}

fn format_for(html: bool) -> Format {
    if html {
        Format::Html
    } else {
        Format::Json
    }
}

fn run(command: Commands, settings: &Settings) -> readlist::Result<Response> {
    let response = match command {
        Commands::Search { query, html } => {
            let client = CatalogClient::new(settings)?;
            handlers::search(&client, &query, format_for(html))
        }
        Commands::Details { work_id, html } => {
            let client = CatalogClient::new(settings)?;
            handlers::details(&client, &work_id, format_for(html))
        }
        Commands::Add {
            json,
            title,
            author,
            subject,
            description,
            cover_art_url,
            work_id,
        } => {
            let repo = ReadlistRepository::open(&settings.database_path)?;
            match json {
                Some(body) => handlers::add(&repo, &body),
                None => handlers::add_entry(
                    &repo,
                    NewReadlistEntry {
                        title: title.unwrap_or_default(),
                        authors: author,
                        subjects: if subject.is_empty() { None } else { Some(subject) },
                        description,
                        cover_art_url,
                        work_id: work_id.unwrap_or_default(),
                    },
                ),
            }
        }
        Commands::List { html } => {
            let repo = ReadlistRepository::open(&settings.database_path)?;
            handlers::list(&repo, format_for(html))
        }
        Commands::Delete { id } => {
            let repo = ReadlistRepository::open(&settings.database_path)?;
            handlers::delete(&repo, id)
        }
    };
    Ok(response)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let mut settings = Settings::from_env();
    if let Some(path) = cli.database {
        settings.database_path = path;
    }

    env_logger::Builder::new()
        .filter_level(settings.log_level())
        .parse_default_env()
        .init();
    log::debug!(
        "settings database={} catalog={}",
        settings.database_path.display(),
        settings.catalog_url
    );

    match run(cli.command, &settings) {
        Ok(response) => {
            if !response.body.is_empty() {
                println!("{}", response.body);
            }
            if response.is_success() {
                ExitCode::SUCCESS
            } else {
                log::warn!("request finished with status {}", response.status);
                ExitCode::FAILURE
            }
        }
        Err(err) => {
            log::error!("{}", err);
            eprintln!("{}", err.to_payload());
            ExitCode::FAILURE
        }
    }
}
