mod browse;
mod display;

use anyhow::Context;
use catalogo_core::criteria::parse_exact;
use catalogo_core::pager::{self, PageSizeError};
use catalogo_core::{FilterCriteria, PageSize, Session, YesNoFilter};
use catalogo_sync::{CatalogClient, DEFAULT_API_URL};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "catalogo", version, about = "Browse the technology asset catalog")]
struct Cli {
    /// Endpoint returning the JSON asset list.
    #[arg(long, global = true, env = "CATALOGO_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List assets grouped by domain, one page at a time.
    List(ListArgs),
    /// Show the full card for one asset.
    Show {
        /// Asset id.
        id: String,
    },
    /// Asset counts per type over the whole catalog.
    Stats,
    /// Distinct asset types and statuses available as filters.
    Facets,
    /// Interactive browsing over a single fetch.
    Browse,
}

#[derive(Args)]
struct ListArgs {
    /// Case-insensitive search over name and domain.
    #[arg(short, long, default_value = "")]
    query: String,

    /// Archetype usage: todos, si or no.
    #[arg(long, default_value = "todos")]
    archetype: YesNoFilter,

    /// CI/CD usage: todos, si or no.
    #[arg(long = "ci-cd", default_value = "todos")]
    ci_cd: YesNoFilter,

    /// Exact asset type, or todos.
    #[arg(long, default_value = "todos")]
    asset_type: String,

    /// Exact status, or todos.
    #[arg(long, default_value = "todos")]
    status: String,

    /// 1-based page to show.
    #[arg(long, default_value_t = 1)]
    page: usize,

    /// Records per page: 10, 20, 50 or 100.
    #[arg(long, default_value = "10", value_parser = parse_page_size)]
    page_size: PageSize,

    /// Print the page as JSON instead of text.
    #[arg(long)]
    json: bool,
}

impl ListArgs {
    fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            archetype: self.archetype,
            ci_cd: self.ci_cd,
            asset_type: parse_exact(&self.asset_type),
            status: parse_exact(&self.status),
            query: self.query.clone(),
        }
    }
}

fn parse_page_size(s: &str) -> Result<PageSize, String> {
    let size: PageSize = s.parse().map_err(|e: PageSizeError| e.to_string())?;
    if PageSize::OPTIONS.contains(&size.get()) {
        Ok(size)
    } else {
        Err(format!("must be one of {:?}", PageSize::OPTIONS))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::info!("catalogo v{}", env!("CARGO_PKG_VERSION"));

    let client = CatalogClient::new(cli.api_url);
    let mut session = Session::new();
    client
        .load(&mut session)
        .await
        .context("loading asset catalog")?;
    let loaded_at = chrono::Local::now();

    if let Some(message) = session.fetch_state().error() {
        display::print_error(message);
        std::process::exit(1);
    }

    match cli.command {
        Command::List(args) => {
            session.set_criteria(args.criteria());
            session.set_page_size(args.page_size);
            session.set_page(args.page);

            if args.json {
                print_page_json(&session)?;
            } else {
                display::print_catalog(&session.view());
                display::print_loaded_at(loaded_at);
            }
        }
        Command::Show { id } => match session.fetch_state().find(&id) {
            Some(asset) => display::print_asset_card(asset),
            None => anyhow::bail!("no asset with id {id:?}"),
        },
        Command::Stats => display::print_stats(&session.fetch_state().stats()),
        Command::Facets => display::print_facets(&session.view()),
        Command::Browse => {
            let stdin = std::io::stdin();
            browse::run(&mut session, stdin.lock())?;
        }
    }

    Ok(())
}

fn print_page_json(session: &Session) -> anyhow::Result<()> {
    let filtered = session.filtered();
    let page = pager::paginate(&filtered, session.page(), session.page_size());
    let out = serde_json::json!({
        "page": page.index,
        "page_size": page.size.get(),
        "total_pages": page.total_pages,
        "total_items": page.total_items,
        "assets": page.items,
    });
    let text = serde_json::to_string_pretty(&out).context("serialising page")?;
    println!("{text}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_size_must_be_an_offered_option() {
        assert_eq!(parse_page_size("50").map(PageSize::get), Ok(50));
        assert!(parse_page_size("15").is_err());
        assert!(parse_page_size("0").is_err());
    }

    #[test]
    fn list_args_translate_todos_to_no_filter() {
        let cli = Cli::parse_from([
            "catalogo",
            "list",
            "-q",
            "core",
            "--archetype",
            "si",
            "--status",
            "Operativa",
        ]);
        let Command::List(args) = cli.command else {
            panic!("expected list");
        };
        let criteria = args.criteria();
        assert_eq!(criteria.query, "core");
        assert_eq!(criteria.archetype, YesNoFilter::Yes);
        assert_eq!(criteria.ci_cd, YesNoFilter::Any);
        assert_eq!(criteria.asset_type, None);
        assert_eq!(criteria.status.as_deref(), Some("Operativa"));
        assert_eq!(args.page_size.get(), 10);
    }

    #[test]
    fn clap_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
