//! Table rendering for review output.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use linesight_app::{NamedColor, SemanticColor, ThemeState, ToastKind, ToastStore};
use linesight_map::{MappingEditSession, ReviewSummary};
use linesight_model::{
    ColumnMatchResult, DataSource, FieldVocabulary, MatchStatus, MatchTier, ProductionLine,
};

/// Render the backend's match suggestions for review.
pub fn print_match_results(
    results: &[ColumnMatchResult],
    summary: &ReviewSummary,
    theme: &ThemeState,
) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source column", theme),
        header_cell("Target field", theme),
        header_cell("Tier", theme),
        header_cell("Confidence", theme),
        header_cell("Status", theme),
        header_cell("Samples", theme),
    ]);
    apply_review_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);

    for result in results {
        table.add_row(vec![
            Cell::new(&result.source_column),
            match result.target_field.as_deref() {
                Some(target) if !target.is_empty() => Cell::new(target),
                _ => dim_cell("-", theme),
            },
            tier_cell(result.tier, theme),
            Cell::new(format!("{:.0}%", result.confidence * 100.0)),
            status_cell(result.status, theme),
            sample_cell(result, theme),
        ]);
    }
    println!("{table}");

    println!(
        "{} columns: {} auto-mapped, {} to review, {} need attention, {} ignored",
        summary.total,
        summary.auto_mapped,
        summary.needs_review,
        summary.needs_attention,
        summary.ignored
    );
    if summary.llm_suggested > 0 {
        println!("{} suggestion(s) came from the LLM tier", summary.llm_suggested);
    }
}

/// Render the current edit state of a mapping session.
pub fn print_session(session: &MappingEditSession, theme: &ThemeState) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source column", theme),
        header_cell("Target field", theme),
        header_cell("Suggested", theme),
        header_cell("Corrected", theme),
        header_cell("Ignored", theme),
    ]);
    apply_review_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Center);
    align_column(&mut table, 4, CellAlignment::Center);

    for row in session.rows() {
        table.add_row(vec![
            Cell::new(&row.source),
            if row.target.is_empty() {
                dim_cell("(select a field)", theme)
            } else {
                Cell::new(&row.target)
            },
            if row.suggested.is_empty() {
                dim_cell("-", theme)
            } else {
                Cell::new(&row.suggested)
            },
            if row.user_corrected() {
                check_cell(theme)
            } else {
                dim_cell("-", theme)
            },
            if row.ignored {
                check_cell(theme)
            } else {
                dim_cell("-", theme)
            },
        ]);
    }
    println!("{table}");

    let unmapped = session.unmapped_columns();
    if unmapped.is_empty() {
        println!("Ready to confirm.");
    } else {
        println!("Not ready: {} column(s) still unmapped", unmapped.len());
    }
}

/// Render a factory's production lines.
pub fn print_lines(lines: &[ProductionLine], theme: &ThemeState) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Line", theme),
        header_cell("Name", theme),
        header_cell("Data source", theme),
        header_cell("Time column", theme),
        header_cell("Schema", theme),
    ]);
    apply_review_table_style(&mut table);

    for line in lines {
        match &line.data_source {
            Some(source) => {
                let version = source
                    .active_schema
                    .as_ref()
                    .map(|s| format!("v{}", s.version))
                    .unwrap_or_else(|| "-".to_string());
                table.add_row(vec![
                    Cell::new(line.id.as_str()),
                    Cell::new(&line.name),
                    Cell::new(&source.name),
                    Cell::new(&source.time_column),
                    Cell::new(version),
                ]);
            }
            // Not configured yet - a valid state, shown as guidance.
            None => {
                table.add_row(vec![
                    Cell::new(line.id.as_str()),
                    Cell::new(&line.name),
                    dim_cell("not configured - upload a file to begin", theme),
                    dim_cell("-", theme),
                    dim_cell("-", theme),
                ]);
            }
        }
    }
    println!("{table}");
}

/// Render a data source with its read-only schema.
pub fn print_data_source(source: &DataSource, theme: &ThemeState) {
    println!("Data source: {} ({})", source.name, source.id);
    println!("Time column: {}", source.time_column);
    if let Some(description) = &source.description {
        println!("Description: {description}");
    }

    match &source.active_schema {
        Some(schema) => {
            println!(
                "Active schema: {} v{} (confirmed {})",
                schema.id,
                schema.version,
                schema.created_at.format("%Y-%m-%d %H:%M UTC")
            );
            let mut table = Table::new();
            table.set_header(vec![
                header_cell("Source column", theme),
                header_cell("Target field", theme),
            ]);
            apply_review_table_style(&mut table);
            for (source_column, target_field) in schema.column_map.iter() {
                table.add_row(vec![Cell::new(source_column), Cell::new(target_field)]);
            }
            println!("{table}");
            println!("The column map is read-only; upload a new file to change it.");
        }
        None => println!("No schema confirmed yet."),
    }
}

/// Render the target field vocabulary.
pub fn print_fields(vocabulary: &FieldVocabulary, theme: &ThemeState) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field", theme),
        header_cell("Label", theme),
        header_cell("Type", theme),
        header_cell("Required", theme),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Center);

    for field in vocabulary.iter() {
        table.add_row(vec![
            Cell::new(&field.field)
                .fg(to_table_color(theme.resolve(SemanticColor::Accent)))
                .add_attribute(Attribute::Bold),
            Cell::new(&field.label),
            Cell::new(field.data_type.as_str()),
            if field.required {
                check_cell(theme)
            } else {
                dim_cell("-", theme)
            },
        ]);
    }
    println!("{table}");
}

/// Print collected toasts to stderr. Error toasts carry an `error:` prefix.
pub fn print_toasts(store: &ToastStore) {
    for toast in store.iter() {
        match toast.kind {
            ToastKind::Error => eprintln!("error: {}", toast.message),
            ToastKind::Warning => eprintln!("warning: {}", toast.message),
            ToastKind::Success | ToastKind::Info => eprintln!("{}", toast.message),
        }
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_review_table_style(table: &mut Table) {
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

fn status_cell(status: MatchStatus, theme: &ThemeState) -> Cell {
    let (label, slot) = match status {
        MatchStatus::AutoMapped => ("auto", SemanticColor::StatusSuccess),
        MatchStatus::NeedsReview => ("review", SemanticColor::StatusWarning),
        MatchStatus::NeedsAttention => ("attention", SemanticColor::StatusError),
        MatchStatus::Ignored => ("ignored", SemanticColor::Muted),
    };
    Cell::new(label).fg(to_table_color(theme.resolve(slot)))
}

fn tier_cell(tier: MatchTier, theme: &ThemeState) -> Cell {
    match tier {
        MatchTier::Hash => {
            Cell::new("hash").fg(to_table_color(theme.resolve(SemanticColor::StatusSuccess)))
        }
        MatchTier::Fuzzy => {
            Cell::new("fuzzy").fg(to_table_color(theme.resolve(SemanticColor::StatusInfo)))
        }
        MatchTier::Llm => {
            Cell::new("llm").fg(to_table_color(theme.resolve(SemanticColor::Accent)))
        }
        MatchTier::Manual => Cell::new("manual"),
        MatchTier::Unmatched => dim_cell("unmatched", theme),
    }
}

fn sample_cell(result: &ColumnMatchResult, theme: &ThemeState) -> Cell {
    if result.sample_data.is_empty() {
        return dim_cell("-", theme);
    }
    let mut preview = result
        .sample_data
        .iter()
        .take(3)
        .map(|value| value.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    if preview.len() > 48 {
        preview.truncate(45);
        preview.push_str("...");
    }
    Cell::new(preview)
}

fn header_cell(label: &str, theme: &ThemeState) -> Cell {
    Cell::new(label)
        .fg(to_table_color(theme.resolve(SemanticColor::Accent)))
        .add_attribute(Attribute::Bold)
}

fn check_cell(theme: &ThemeState) -> Cell {
    Cell::new("yes")
        .fg(to_table_color(theme.resolve(SemanticColor::StatusSuccess)))
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T, theme: &ThemeState) -> Cell {
    Cell::new(value).fg(to_table_color(theme.resolve(SemanticColor::Muted)))
}

fn to_table_color(color: NamedColor) -> Color {
    match color {
        NamedColor::Green => Color::Green,
        NamedColor::DarkGreen => Color::DarkGreen,
        NamedColor::Blue => Color::Blue,
        NamedColor::DarkBlue => Color::DarkBlue,
        NamedColor::Yellow => Color::Yellow,
        NamedColor::DarkYellow => Color::DarkYellow,
        NamedColor::Red => Color::Red,
        NamedColor::DarkRed => Color::DarkRed,
        NamedColor::Cyan => Color::Cyan,
        NamedColor::Grey => Color::Grey,
        NamedColor::DarkGrey => Color::DarkGrey,
    }
}
