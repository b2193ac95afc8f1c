//! Text rendering for the catalog.
//!
//! The list view prints one line per asset under its domain heading; `show`
//! prints a full vertical card. Failures replace the whole output with a
//! single message on stderr.

use catalogo_core::asset::{AssetRecord, TechnicalDebt};
use catalogo_core::session::CatalogView;
use catalogo_core::stats::{self, TypeCounts};
use chrono::{DateTime, Local};

const LABEL_WIDTH: usize = 22;

const NOT_AVAILABLE: &str = "No disponible";
const NOT_SPECIFIED: &str = "No especificado";
const NO_TYPE: &str = "Tipo no especificado";

// ── Public API ──

/// Print everything the list view shows: stats, grouped page, footer.
pub fn print_catalog(view: &CatalogView<'_>) {
    print_stats(&view.stats);

    if view.groups.is_empty() {
        print_empty(view.has_filters);
    } else {
        for (domain, assets) in &view.groups {
            println!("## {domain}");
            for asset in assets {
                print_asset_line(asset);
            }
            println!();
        }
    }

    if view.filtered_count > 0 {
        print_pagination(view);
    }
}

/// Print per-type counts, one row per type in display order.
pub fn print_stats(counts: &TypeCounts) {
    let sorted = stats::sorted_stats(counts);
    if sorted.is_empty() {
        return;
    }
    println!("Resumen");
    for (kind, count) in sorted {
        println!("  {:<width$} {}", stats::type_label(kind), count, width = LABEL_WIDTH);
    }
    println!();
}

/// Print the filter choices derived from the data.
pub fn print_facets(view: &CatalogView<'_>) {
    println!("Tipos de activo");
    for kind in &view.asset_types {
        println!("  {}", capitalize(kind));
    }
    println!();
    println!("Estados");
    for status in &view.statuses {
        println!("  {status}");
    }
}

/// Print a single asset as a vertical card grouped by section.
pub fn print_asset_card(asset: &AssetRecord) {
    println!("=== {} ===", asset.name);
    println!("{}", capitalize(or_fallback(asset.asset_type.as_deref(), NO_TYPE)));
    println!();

    println!("Identidad");
    field("id", &asset.id);
    field("dominio", or_fallback(Some(asset.domain.as_str()), NOT_AVAILABLE));
    field("ip", &asset.ip_address);
    if let Some(status) = non_empty(asset.status.as_deref()) {
        let marker = if asset.is_operational() { " *" } else { "" };
        field("estado", &format!("{status}{marker}"));
    }
    field("alojamiento", asset.hosting().label());
    if let Some(provider) = non_empty(asset.provider.as_deref()) {
        field("proveedor", provider);
    }
    println!();

    println!("Detalle");
    field(
        "descripcion",
        or_fallback(asset.description.as_deref(), "no disponible"),
    );
    field(
        "usa arquetipos",
        or_fallback(asset.uses_archetype.as_deref(), NOT_SPECIFIED),
    );
    field("ci/cd", or_fallback(asset.uses_ci_cd.as_deref(), NOT_SPECIFIED));
    field("celula", or_fallback(asset.cell.as_deref(), NOT_AVAILABLE));
    println!();

    print_debt(&asset.technical_debt);

    println!("Enlaces");
    field(
        "arquitectura",
        or_fallback(asset.architecture_doc_url.as_deref(), NOT_AVAILABLE),
    );
    if let Some(url) = non_empty(asset.monitoring_url.as_deref()) {
        field("dynatrace", url);
    }
    println!();
}

/// The single surface shown instead of the catalog when the fetch failed.
pub fn print_error(message: &str) {
    eprintln!("Oops! Algo salió mal.");
    eprintln!("{message}");
    eprintln!("Por favor, intente nuevamente más tarde.");
}

pub fn print_loaded_at(at: DateTime<Local>) {
    println!("Catálogo cargado {}", at.format("%Y-%m-%d %H:%M:%S"));
}

// ── Sections ──

fn print_asset_line(asset: &AssetRecord) {
    let kind = capitalize(or_fallback(asset.asset_type.as_deref(), NO_TYPE));
    print!(
        "  [{}] {:<30} {:<20} {:<16} {}",
        asset.id,
        asset.name,
        kind,
        asset.ip_address,
        asset.hosting().label()
    );
    if let Some(breakdown) = asset.technical_debt.breakdown() {
        print!("  deuda {}% ({})", breakdown.total().round(), breakdown.tier().label());
    }
    println!();
}

fn print_debt(debt: &TechnicalDebt) {
    if let Some(breakdown) = debt.breakdown() {
        println!("Deuda Tecnica");
        field(
            "total",
            &format!(
                "{}% ({})",
                breakdown.total().round(),
                breakdown.tier().label()
            ),
        );
        field("SOA", &format!("{}%", breakdown.soa));
        field("DW", &format!("{}%", breakdown.dw));
        field("API", &format!("{}%", breakdown.api));
        println!();
    } else if let TechnicalDebt::Description(text) = debt {
        println!("Deuda Tecnica");
        println!("  {text}");
        println!();
    }
}

fn print_empty(has_filters: bool) {
    println!("No se encontraron activos.");
    if has_filters {
        println!("Prueba a cambiar los filtros de búsqueda.");
    } else {
        println!("Parece que no hay nada que mostrar aquí por ahora.");
    }
    println!();
}

fn print_pagination(view: &CatalogView<'_>) {
    let range = view.range;
    println!(
        "Mostrando {}-{} de {}  |  Página {} de {}  |  {} / pág.",
        range.start, range.end, range.total, view.page, view.total_pages, view.page_size
    );
}

// ── Helpers ──

fn field(label: &str, value: &str) {
    println!("  {:<width$} {}", label, value, width = LABEL_WIDTH);
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn or_fallback<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
    non_empty(value).unwrap_or(fallback)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
