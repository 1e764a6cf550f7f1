use characteristics_widget::{parse_characteristics, render_widget, Page, Selectors, Url};
use clap::{Parser, Subcommand};
use eyre::Result;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "characteristics-widget")]
#[command(about = "Inspect and render product characteristics widgets")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Initialize every widget on a page and print its synced value.
    Inspect {
        /// An http(s) URL or a path to an HTML file.
        source: String,
        /// JSON file overriding the widget selectors.
        #[arg(long)]
        selectors: Option<PathBuf>,
    },
    /// Print the markup of a widget holding the given stored value.
    Render {
        /// Name of the form field.
        name: String,
        /// Stored value, a JSON array of {"key", "value"} objects.
        #[arg(default_value = "[]")]
        value: String,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Inspect { source, selectors } => {
            let selectors = match selectors {
                Some(path) => Selectors::from_file(path)?,
                None => Selectors::default(),
            };
            let page = match Url::parse(&source) {
                Ok(url) if matches!(url.scheme(), "http" | "https") => {
                    Page::fetch(url, &selectors).await?
                }
                _ => Page::load(&source, &selectors)?,
            };
            info!(
                widgets = page.widgets.len(),
                skipped = page.diagnostics.len(),
                "inspected {source}"
            );
            for widget in &page.widgets {
                println!("{}\t{}", widget.name(), widget.hidden_value());
            }
        }
        Command::Render { name, value } => {
            println!("{}", render_widget(&name, &parse_characteristics(&value))?);
        }
    }
    Ok(())
}
