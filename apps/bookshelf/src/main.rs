use std::{num::NonZeroUsize, process::ExitCode, sync::Arc};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use client_core::{
    ClientEvent, FormMode, FormSession, HttpBookApi, ListView, MutationSync, MutationTask,
    Selection, TableView,
};
use shared::{BookField, BookId, BookStatus, Genre};
use tokio::{sync::broadcast, task::JoinHandle};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod config;
mod render;

use config::load_settings;

#[derive(Parser, Debug)]
#[command(name = "bookshelf", about = "Browse and edit a remote book collection")]
struct Cli {
    /// Collection endpoint, e.g. http://127.0.0.1:5000/api/books
    #[arg(long, global = true)]
    api_base_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List books matching the filters, one page at a time.
    List {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value = "all")]
        genre: Selection<Genre>,
        #[arg(long, default_value = "all")]
        status: Selection<BookStatus>,
        /// 1-based page number.
        #[arg(long, default_value = "1")]
        page: NonZeroUsize,
        #[arg(long)]
        page_size: Option<NonZeroUsize>,
    },
    Show {
        id: String,
    },
    Add {
        #[command(flatten)]
        fields: BookFields,
    },
    /// Update a book; omitted fields keep their current values.
    Edit {
        id: String,
        #[command(flatten)]
        fields: BookFields,
    },
    Delete {
        id: String,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args, Debug)]
struct BookFields {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    author: Option<String>,
    #[arg(long)]
    genre: Option<String>,
    #[arg(long)]
    year: Option<String>,
    #[arg(long)]
    status: Option<String>,
}

impl BookFields {
    fn apply(self, form: &mut FormSession) {
        let fields = [
            (BookField::Title, self.title),
            (BookField::Author, self.author),
            (BookField::Genre, self.genre),
            (BookField::Year, self.year),
            (BookField::Status, self.status),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                form.set_field(field, value);
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let mut settings = load_settings()?;
    if let Some(url) = cli.api_base_url {
        settings.api_base_url = url;
    }

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let api = HttpBookApi::new(&settings.api_base_url)
        .with_context(|| format!("cannot use api base url '{}'", settings.api_base_url))?;
    info!(base_url = api.base_url(), "using book collection");
    let sync = MutationSync::new(Arc::new(api));
    let printer = spawn_event_printer(sync.subscribe_events());

    // Every handle to the controller must be gone before the printer can finish.
    let outcome = run(cli.command, sync, &settings).await;
    printer.await.context("event printer stopped unexpectedly")?;
    outcome
}

async fn run(
    command: Command,
    sync: Arc<MutationSync>,
    settings: &config::Settings,
) -> Result<ExitCode> {
    match command {
        Command::List {
            search,
            genre,
            status,
            page,
            page_size,
        } => {
            let mut list = ListView::new(
                sync,
                page_size.unwrap_or(settings.page_size),
                settings.search_debounce,
            );
            list.set_search(search);
            list.set_genre(genre);
            list.set_status(status);
            list.set_page(page.get() - 1);

            let view = list.render().await;
            print!("{}", render::table_view(&view));
            Ok(match view {
                TableView::Error(_) => ExitCode::FAILURE,
                _ => ExitCode::SUCCESS,
            })
        }
        Command::Show { id } => {
            let id = BookId::new(id);
            let book = sync
                .get(&id)
                .await
                .with_context(|| format!("failed to fetch book {id}"))?;
            print!("{}", render::draft(&shared::BookDraft::from_book(&book)));
            Ok(ExitCode::SUCCESS)
        }
        Command::Add { fields } => {
            let mut form = FormSession::open(sync, FormMode::Create).await;
            fields.apply(&mut form);
            submit(&mut form).await
        }
        Command::Edit { id, fields } => {
            let mut form = FormSession::open(sync, FormMode::Update(BookId::new(id))).await;
            fields.apply(&mut form);
            submit(&mut form).await
        }
        Command::Delete { id, yes } => {
            let mut list = ListView::new(sync, settings.page_size, settings.search_debounce);
            list.request_delete(BookId::new(id.clone()));

            if !yes && !confirm(&id).await? {
                list.cancel_delete();
                println!("Cancelled.");
                return Ok(ExitCode::SUCCESS);
            }
            match list.confirm_delete() {
                Some(task) => finish(task).await,
                None => Ok(ExitCode::SUCCESS),
            }
        }
    }
}

async fn submit(form: &mut FormSession) -> Result<ExitCode> {
    debug!(heading = form.mode().heading(), "submitting book form");
    match form.submit() {
        Ok(task) => finish(task).await,
        Err(errors) => {
            eprint!("{}", render::validation_errors(&errors));
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Waits for a spawned mutation. Its outcome has already been reported as a
/// notification.
async fn finish(task: MutationTask) -> Result<ExitCode> {
    let outcome = task.await.context("mutation task panicked")?;
    Ok(if outcome.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn confirm(id: &str) -> Result<bool> {
    let prompt = format!("Delete book {id}? This action cannot be undone. [y/N] ");
    tokio::task::spawn_blocking(move || {
        use std::io::Write as _;

        let mut stdout = std::io::stdout();
        stdout.write_all(prompt.as_bytes())?;
        stdout.flush()?;
        let mut answer = String::new();
        std::io::stdin().read_line(&mut answer)?;
        Ok::<_, std::io::Error>(matches!(answer.trim(), "y" | "Y" | "yes" | "Yes"))
    })
    .await
    .context("confirmation prompt panicked")?
    .context("failed to read confirmation")
}

fn spawn_event_printer(mut events: broadcast::Receiver<ClientEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(ClientEvent::Notification(notification)) => {
                    println!("{}", render::notification(&notification));
                }
                Ok(ClientEvent::Navigate(route)) => debug!(%route, "navigate"),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    debug!(skipped, "event printer lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}
