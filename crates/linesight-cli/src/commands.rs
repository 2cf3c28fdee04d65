//! Command implementations.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context as _, Result, bail};
use indicatif::ProgressBar;
use tracing::{debug, info, warn};

use linesight_api::{IngestClient, compute_file_sha256};
use linesight_app::{AppState, ToastKind};
use linesight_map::{
    ConfirmOptions, DraftRepository, MappingDraft, MappingEditSession, ReviewSummary,
    session_from_matches,
};
use linesight_model::{
    DataSourceId, DataSourcePatch, FactoryId, FieldVocabulary, ProductionLineId, RawImportId,
};

use crate::cli::{Command, ConfirmArgs, DataSourceCommand, MapArgs, UploadArgs};
use crate::summary::{
    print_data_source, print_fields, print_lines, print_match_results, print_session,
};

/// Everything a command needs, constructed once in `main`.
pub struct Context {
    pub client: IngestClient,
    pub drafts: DraftRepository,
    pub state: AppState,
}

pub async fn run(command: Command, ctx: &mut Context) -> Result<()> {
    match command {
        Command::Upload(args) => run_upload(ctx, &args).await,
        Command::Review { raw_import_id } => run_review(ctx, &raw_import_id),
        Command::Map(args) => run_map(ctx, &args),
        Command::Confirm(args) => run_confirm(ctx, &args).await,
        Command::Lines { factory } => run_lines(ctx, &factory).await,
        Command::DataSource(command) => run_data_source(ctx, command).await,
        Command::Fields => {
            print_fields(&FieldVocabulary::standard(), &ctx.state.theme);
            Ok(())
        }
    }
}

async fn run_upload(ctx: &mut Context, args: &UploadArgs) -> Result<()> {
    if !args.no_preview {
        preview_file(&args.file)?;
    }

    // The draft key doubles as the import reference sent at confirmation
    // time, derived from the content hash so re-uploading the same file
    // lands on the same draft.
    let checksum = compute_file_sha256(&args.file)?;
    let import_id = RawImportId::new(format!("imp-{}", &checksum[..12]))?;

    let spinner = network_spinner("Uploading and matching columns...");
    let outcome = ctx.client.upload_and_match(&args.file).await;
    spinner.finish_and_clear();

    let results = match outcome {
        Ok(results) => results,
        Err(error) => {
            ctx.state
                .toasts
                .push(ToastKind::Error, error.user_message(), Instant::now());
            return Err(error.into());
        }
    };

    info!(columns = results.len(), import_id = %import_id, "matching complete");
    let summary = ReviewSummary::from_results(&results);
    print_match_results(&results, &summary, &ctx.state.theme);

    let session = session_from_matches(&results, FieldVocabulary::standard());
    let time_column = session
        .rows()
        .iter()
        .find(|row| row.target == "timestamp")
        .map(|row| row.source.clone());
    let filename = args
        .file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload");
    let draft = MappingDraft::from_session(import_id.clone(), filename, &session, time_column);
    ctx.drafts.save(&draft)?;

    println!();
    println!("Draft saved as {import_id}.");
    if summary.pending_review() > 0 {
        println!(
            "Next: linesight map {import_id} --set \"<source>=<field>\"  (see: linesight fields)"
        );
    } else {
        println!("Next: linesight confirm {import_id}");
    }
    Ok(())
}

fn run_review(ctx: &mut Context, raw_import_id: &str) -> Result<()> {
    let (draft, session) = load_draft(ctx, raw_import_id)?;
    println!(
        "Import {} ({}, draft saved {})",
        draft.raw_import_id,
        draft.filename,
        draft.saved_at.format("%Y-%m-%d %H:%M UTC")
    );
    match &draft.time_column {
        Some(column) => println!("Time column: {column}"),
        None => println!("Time column: not chosen yet (required for confirmation)"),
    }
    print_session(&session, &ctx.state.theme);
    Ok(())
}

fn run_map(ctx: &mut Context, args: &MapArgs) -> Result<()> {
    let (draft, mut session) = load_draft(ctx, &args.raw_import_id)?;

    for source in &args.unignore {
        session.set_ignored_by_source(source, false)?;
    }
    for source in &args.ignore {
        session.set_ignored_by_source(source, true)?;
    }
    for assignment in &args.set {
        let (source, field) = parse_assignment(assignment)?;
        session.set_target_by_source(source, field)?;
    }

    let time_column = match &args.time_column {
        Some(column) => {
            if !session.rows().iter().any(|row| row.source == *column) {
                bail!("time column {column:?} is not a column of this upload");
            }
            Some(column.clone())
        }
        None => draft.time_column.clone(),
    };

    let updated = MappingDraft::from_session(
        draft.raw_import_id.clone(),
        draft.filename.clone(),
        &session,
        time_column,
    );
    ctx.drafts.save(&updated)?;
    print_session(&session, &ctx.state.theme);
    Ok(())
}

async fn run_confirm(ctx: &mut Context, args: &ConfirmArgs) -> Result<()> {
    let (draft, mut session) = load_draft(ctx, &args.raw_import_id)?;

    let time_column = args
        .time_column
        .clone()
        .or_else(|| draft.time_column.clone())
        .unwrap_or_default();

    let options = ConfirmOptions {
        time_format: args.time_format.clone(),
        data_source_id: args
            .data_source
            .as_deref()
            .map(DataSourceId::new)
            .transpose()?,
        factory_id: args.factory.as_deref().map(FactoryId::new).transpose()?,
        production_line_id: args.line.as_deref().map(ProductionLineId::new).transpose()?,
        learn_corrections: args.learn.then_some(true),
    };

    // Validation failures (missing time column, unmapped rows) surface here,
    // before anything goes on the wire.
    let request = session.to_request(draft.raw_import_id.clone(), &time_column, options)?;
    session.begin_save()?;

    let spinner = network_spinner("Confirming mapping...");
    let outcome = ctx.client.confirm_mapping(&request).await;
    spinner.finish_and_clear();

    match outcome {
        Ok(response) => {
            session.save_succeeded();
            info!(
                schema_mapping = %response.schema_mapping_id,
                data_source = %response.data_source_id,
                "mapping confirmed"
            );
            println!("{}", response.message);
            println!(
                "Schema mapping {} on data source {}",
                response.schema_mapping_id, response.data_source_id
            );
            if !response.learned_aliases.is_empty() {
                println!("Learned aliases: {}", response.learned_aliases.join(", "));
            }
            ctx.state.toasts.push(
                ToastKind::Success,
                "Mapping confirmed",
                Instant::now(),
            );
            // The draft has served its purpose once the backend persisted
            // the schema.
            ctx.drafts.delete(&draft.raw_import_id)?;
            Ok(())
        }
        Err(error) => {
            // The draft is untouched: every edit is still there for the
            // next attempt.
            session.save_failed(error.user_message());
            ctx.state
                .toasts
                .push(ToastKind::Error, error.user_message(), Instant::now());
            debug!(error = %error, "confirmation failed");
            Err(error.into())
        }
    }
}

async fn run_lines(ctx: &mut Context, factory: &str) -> Result<()> {
    let factory_id = FactoryId::new(factory)?;
    let spinner = network_spinner("Fetching production lines...");
    let outcome = ctx.client.list_lines(&factory_id).await;
    spinner.finish_and_clear();

    let lines = outcome.map_err(|error| {
        ctx.state
            .toasts
            .push(ToastKind::Error, error.user_message(), Instant::now());
        anyhow::Error::new(error)
    })?;

    if lines.is_empty() {
        println!("Factory {factory_id} has no production lines.");
        return Ok(());
    }
    print_lines(&lines, &ctx.state.theme);
    Ok(())
}

async fn run_data_source(ctx: &mut Context, command: DataSourceCommand) -> Result<()> {
    match command {
        DataSourceCommand::Show { id } => {
            let id = DataSourceId::new(id)?;
            let spinner = network_spinner("Fetching data source...");
            let outcome = ctx.client.get_data_source(&id).await;
            spinner.finish_and_clear();
            print_data_source(&outcome?, &ctx.state.theme);
            Ok(())
        }
        DataSourceCommand::Update {
            id,
            time_column,
            description,
        } => {
            let id = DataSourceId::new(id)?;
            let patch = DataSourcePatch {
                time_column,
                description,
            };
            if patch.is_empty() {
                bail!("nothing to update: pass --time-column and/or --description");
            }
            let spinner = network_spinner("Updating data source...");
            let outcome = ctx.client.update_data_source(&id, &patch).await;
            spinner.finish_and_clear();

            // Pessimistic: render the state the server sent back, not what
            // we asked for.
            let updated = outcome.map_err(|error| {
                ctx.state
                    .toasts
                    .push(ToastKind::Error, error.user_message(), Instant::now());
                anyhow::Error::new(error)
            })?;
            ctx.state.toasts.push(
                ToastKind::Success,
                "Data source updated",
                Instant::now(),
            );
            print_data_source(&updated, &ctx.state.theme);
            Ok(())
        }
    }
}

fn load_draft(ctx: &Context, raw_import_id: &str) -> Result<(MappingDraft, MappingEditSession)> {
    let id = RawImportId::new(raw_import_id)?;
    let Some(draft) = ctx.drafts.load(&id)? else {
        bail!(
            "no draft for {id}; run `linesight upload <FILE>` first \
             (drafts dir: {})",
            ctx.drafts.base_dir().display()
        );
    };
    let session = draft.clone().into_session(FieldVocabulary::standard());
    Ok((draft, session))
}

fn parse_assignment(assignment: &str) -> Result<(&str, &str)> {
    match assignment.split_once('=') {
        Some((source, field)) if !source.is_empty() && !field.is_empty() => {
            Ok((source.trim(), field.trim()))
        }
        _ => bail!("expected \"<source column>=<target field>\", got {assignment:?}"),
    }
}

fn preview_file(path: &Path) -> Result<()> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let headers = reader.headers()?.clone();
    println!(
        "File: {} - {} columns",
        path.display(),
        headers.len()
    );
    println!("Columns: {}", headers.iter().collect::<Vec<_>>().join(", "));

    let sampled = reader.records().take(1000).filter(|r| r.is_ok()).count();
    if sampled == 1000 {
        println!("Rows: 1000+ sampled");
    } else {
        println!("Rows: {sampled}");
    }
    if headers.is_empty() {
        warn!("file has no header row; the backend will see positional names");
    }
    Ok(())
}

fn network_spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_assignments() {
        assert_eq!(
            parse_assignment("Prod Qty=units_produced").unwrap(),
            ("Prod Qty", "units_produced")
        );
        assert!(parse_assignment("missing-separator").is_err());
        assert!(parse_assignment("=field").is_err());
        assert!(parse_assignment("source=").is_err());
    }
}
