//! Interactive browse loop over a single fetched catalog.
//!
//! Each input line is one user action. Filter and page-size commands go
//! through the session setters, so they always land back on page 1.

use std::io::{self, BufRead, Write};

use anyhow::Context;
use catalogo_core::criteria::parse_exact;
use catalogo_core::{PageNav, PageSize, Session, YesNoFilter};

use crate::display;

const HELP: &str = "\
Comandos:
  q <texto>            buscar por nombre o dominio (vacío para limpiar)
  archetype <v>        todos | si | no
  cicd <v>             todos | si | no
  type <tipo>          tipo exacto, o todos
  status <estado>      estado exacto, o todos
  size <n>             registros por página (10, 20, 50, 100)
  page <n>             ir a una página
  first | prev | next | last
  show <id>            ficha completa de un activo
  facets               valores disponibles para filtrar
  clear                quitar todos los filtros
  help | quit";

/// One parsed line of user input.
#[derive(Debug, PartialEq)]
enum Action {
    Query(String),
    Archetype(YesNoFilter),
    CiCd(YesNoFilter),
    AssetType(Option<String>),
    Status(Option<String>),
    Size(PageSize),
    Page(usize),
    Nav(PageNav),
    Show(String),
    Facets,
    Clear,
    Help,
    Quit,
}

fn parse_action(line: &str) -> Result<Option<Action>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (command, arg) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    let action = match command {
        "q" | "query" => Action::Query(arg.to_string()),
        "archetype" => Action::Archetype(arg.parse::<YesNoFilter>().map_err(|e| e.to_string())?),
        "cicd" => Action::CiCd(arg.parse::<YesNoFilter>().map_err(|e| e.to_string())?),
        "type" => Action::AssetType(parse_exact(arg)),
        "status" => Action::Status(parse_exact(arg)),
        "size" => {
            let size = arg.parse::<PageSize>().map_err(|e| e.to_string())?;
            if !PageSize::OPTIONS.contains(&size.get()) {
                return Err(format!("page size must be one of {:?}", PageSize::OPTIONS));
            }
            Action::Size(size)
        }
        "page" => Action::Page(
            arg.parse::<usize>()
                .map_err(|_| format!("not a page number: {arg:?}"))?,
        ),
        "first" => Action::Nav(PageNav::First),
        "prev" => Action::Nav(PageNav::Previous),
        "next" => Action::Nav(PageNav::Next),
        "last" => Action::Nav(PageNav::Last),
        "show" if !arg.is_empty() => Action::Show(arg.to_string()),
        "facets" => Action::Facets,
        "clear" => Action::Clear,
        "help" | "?" => Action::Help,
        "quit" | "exit" => Action::Quit,
        _ => return Err(format!("unknown command: {line:?} (try help)")),
    };
    Ok(Some(action))
}

/// Apply an action to the session. Returns whether the list should be redrawn.
fn apply(session: &mut Session, action: Action) -> bool {
    match action {
        Action::Query(q) => session.set_query(q),
        Action::Archetype(f) => session.set_archetype(f),
        Action::CiCd(f) => session.set_ci_cd(f),
        Action::AssetType(t) => session.set_asset_type(t),
        Action::Status(s) => session.set_status(s),
        Action::Size(size) => session.set_page_size(size),
        Action::Page(page) => session.set_page(page),
        Action::Nav(nav) => session.navigate(nav),
        Action::Clear => session.clear_filters(),
        Action::Show(id) => {
            match session.fetch_state().find(&id) {
                Some(asset) => display::print_asset_card(asset),
                None => println!("No existe un activo con id {id:?}."),
            }
            return false;
        }
        Action::Facets => {
            display::print_facets(&session.view());
            return false;
        }
        Action::Help => {
            println!("{HELP}");
            return false;
        }
        Action::Quit => return false,
    }
    true
}

/// Read actions from `input` until EOF or `quit`, redrawing after each change.
pub fn run(session: &mut Session, input: impl BufRead) -> anyhow::Result<()> {
    display::print_catalog(&session.view());
    println!("{HELP}");

    let mut lines = input.lines();
    loop {
        print!("> ");
        io::stdout().flush().context("flushing prompt")?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("reading command")?;
        match parse_action(&line) {
            Ok(Some(Action::Quit)) => break,
            Ok(Some(action)) => {
                tracing::debug!(?action, "browse action");
                if apply(session, action) {
                    display::print_catalog(&session.view());
                }
            }
            Ok(None) => {}
            Err(message) => eprintln!("{message}"),
        }
    }
    Ok(())
}
