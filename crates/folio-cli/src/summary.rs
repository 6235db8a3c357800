use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use folio_model::{DisplayType, PageId};
use folio_pages::{PageIndex, Resolution};
use folio_session::{
    HeadlessImageHost, HeadlessViewport, NavigationState, ViewerEvent, ViewportEvent,
};
use folio_transcript::PageMarker;

use folio_cli::script::StepOutcome;

pub fn print_index(index: &PageIndex) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Id"),
        header_cell("Type"),
        header_cell("Label"),
        header_cell("Ordinal"),
        header_cell("Image"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for entry in index {
        let ordinal = index.roman_ordinal(entry.id.as_str());
        table.add_row(vec![
            id_cell(&entry.id),
            kind_cell(entry.kind),
            Cell::new(&entry.label),
            ordinal.map_or_else(|| dim_cell("-"), Cell::new),
            dim_cell(&entry.image_path),
        ]);
    }
    println!("{table}");
    println!(
        "Pages: {} ({} roman, {} arabic)",
        index.len(),
        index.roman_count(),
        index.arabic_count()
    );
    if !index.skipped().is_empty() {
        eprintln!("Skipped:");
        for label in index.skipped() {
            eprintln!("- {label}");
        }
    }
}

/// One row of `folio resolve` output.
pub struct ResolveRow {
    pub token: String,
    pub resolution: Resolution,
    pub page: Option<PageId>,
}

pub fn print_resolutions(index: &PageIndex, rows: &[ResolveRow]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Token"),
        header_cell("Match"),
        header_cell("Page"),
        header_cell("Label"),
    ]);
    apply_table_style(&mut table);
    for row in rows {
        let (page, label) = match &row.page {
            Some(id) => (id_cell(id), Cell::new(index.display_for(id.as_str()))),
            None => (dim_cell("-"), dim_cell("-")),
        };
        table.add_row(vec![
            Cell::new(&row.token),
            resolution_cell(&row.resolution),
            page,
            label,
        ]);
    }
    println!("{table}");
}

pub fn print_labels(index: &PageIndex, ids: &[String]) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Id"), header_cell("Label")]);
    apply_table_style(&mut table);
    for id in ids {
        let label = if index.contains(id) {
            Cell::new(index.display_for(id))
        } else {
            dim_cell(format!("{id} (not indexed)"))
        };
        table.add_row(vec![Cell::new(id), label]);
    }
    println!("{table}");
}

pub fn print_markers(markers: &[PageMarker], removed_images: usize) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell("Id"), header_cell("Element")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (pos, marker) in markers.iter().enumerate() {
        table.add_row(vec![
            dim_cell(pos + 1),
            Cell::new(&marker.id).fg(Color::Blue),
            Cell::new(&marker.element),
        ]);
    }
    println!("{table}");
    println!("Markers: {}, page images removed: {removed_images}", markers.len());
}

pub fn print_replay(
    outcomes: &[StepOutcome],
    state: &NavigationState,
    viewport: &HeadlessViewport,
    host: &HeadlessImageHost,
) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Line"),
        header_cell("Action"),
        header_cell("Page"),
        header_cell("Label"),
        header_cell("Layout"),
        header_cell("View"),
        header_cell("Error"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    let mut failures = 0usize;
    for outcome in outcomes {
        let error = match &outcome.error {
            Some(message) => {
                failures += 1;
                Cell::new(message).fg(Color::Red)
            }
            None => dim_cell("-"),
        };
        table.add_row(vec![
            dim_cell(outcome.line),
            Cell::new(&outcome.action),
            Cell::new(&outcome.page).fg(Color::Blue),
            Cell::new(&outcome.label),
            Cell::new(outcome.layout),
            Cell::new(outcome.view_mode),
            error,
        ]);
    }
    println!("{table}");

    println!();
    println!("Final state:");
    println!("  page: {}", state.current);
    println!("  layout: {} ({} px)", state.layout.name(), state.viewport_width);
    println!("  view: {}", state.view_mode.name());
    println!("  divider: {:.1}%", state.divider.position());
    println!("  fullscreen: {}", state.fullscreen);
    println!("  info panel: {}", open_closed(state.info_open));
    println!("  mobile menu: {}", open_closed(state.mobile_menu_open));
    if let Some(toast) = &state.toast {
        println!(
            "  toast: {} ({} ms left)",
            toast.message,
            toast.remaining().as_millis()
        );
    }

    println!();
    println!("Effects:");
    for event in viewport.events() {
        println!("  viewport  {}", describe_viewport_event(event));
    }
    for event in host.events() {
        println!("  viewer    {}", describe_viewer_event(event));
    }
    if failures > 0 {
        eprintln!("{failures} step(s) failed");
    }
}

fn describe_viewport_event(event: &ViewportEvent) -> String {
    match event {
        ViewportEvent::Scrolled {
            id,
            behavior,
            found,
        } => {
            let missing = if *found { "" } else { " (no anchor)" };
            format!("scroll {id} {}{missing}", behavior.as_str())
        }
        ViewportEvent::EnteredFullscreen => "enter fullscreen".to_string(),
        ViewportEvent::ExitedFullscreen => "exit fullscreen".to_string(),
        ViewportEvent::FullscreenDenied => "fullscreen denied".to_string(),
    }
}

fn describe_viewer_event(event: &ViewerEvent) -> String {
    match event {
        ViewerEvent::Created { handle, url } => format!("create #{handle} {url}"),
        ViewerEvent::Destroyed { handle } => format!("destroy #{handle}"),
        ViewerEvent::CreateFailed { url } => format!("create failed {url}"),
    }
}

fn open_closed(open: bool) -> &'static str {
    if open { "open" } else { "closed" }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn resolution_cell(resolution: &Resolution) -> Cell {
    match resolution {
        Resolution::RomanLabel(_) => Cell::new("roman label").fg(Color::Green),
        Resolution::ArabicLabel(_) => Cell::new("arabic label").fg(Color::Green),
        Resolution::RomanOrdinal { ordinal, .. } => {
            Cell::new(format!("roman ordinal #{ordinal}")).fg(Color::Yellow)
        }
        Resolution::OutOfRange => Cell::new("out of range").fg(Color::Red),
        Resolution::NotFound => Cell::new("not found").fg(Color::Red),
    }
}

fn kind_cell(kind: DisplayType) -> Cell {
    match kind {
        DisplayType::Roman => Cell::new(kind.label()).fg(Color::Magenta),
        DisplayType::Arabic => Cell::new(kind.label()),
    }
}

fn id_cell(id: &PageId) -> Cell {
    Cell::new(id.as_str())
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
