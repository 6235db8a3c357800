use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::{info, info_span, warn};

use folio_pages::{MAX_ROMAN, PageIndex, PageMapping, from_roman, is_roman_literal, to_roman};
use folio_session::{HeadlessImageHost, HeadlessViewport, ReaderSettings, ViewerSession};
use folio_transcript::TranscriptDocument;

use folio_cli::script::{Script, replay};

use crate::cli::{
    DisplayArgs, IndexArgs, ResolveArgs, RomanArgs, SessionArgs, SettingsArgs, TranscriptArgs,
};
use crate::summary::{
    ResolveRow, print_index, print_labels, print_markers, print_replay, print_resolutions,
};

pub fn run_index(args: &IndexArgs) -> Result<()> {
    let index = load_index(&args.mapping)?;
    print_index(&index);
    Ok(())
}

pub fn run_resolve(args: &ResolveArgs) -> Result<()> {
    let index = load_index(&args.mapping)?;
    let rows: Vec<ResolveRow> = args
        .tokens
        .iter()
        .map(|token| {
            let resolution = index.resolve(token);
            let page = if args.strict {
                resolution.page_id().cloned()
            } else {
                index.internal_for(token)
            };
            ResolveRow {
                token: token.clone(),
                resolution,
                page,
            }
        })
        .collect();
    print_resolutions(&index, &rows);
    if args.strict {
        let unresolved = rows.iter().filter(|row| row.page.is_none()).count();
        if unresolved > 0 {
            bail!("{unresolved} of {} tokens did not resolve", rows.len());
        }
    }
    Ok(())
}

pub fn run_display(args: &DisplayArgs) -> Result<()> {
    let index = load_index(&args.mapping)?;
    print_labels(&index, &args.ids);
    Ok(())
}

pub fn run_roman(args: &RomanArgs) -> Result<()> {
    let value = args.value.trim();
    if let Ok(number) = value.parse::<i64>() {
        let numeral = to_roman(number);
        if numeral.is_empty() {
            bail!("{number} has no roman numeral (expected 1..={MAX_ROMAN})");
        }
        println!("{numeral}");
        return Ok(());
    }
    if !is_roman_literal(value) {
        warn!(value, "ignoring characters that are not roman digits");
    }
    match from_roman(value) {
        Some(number) => println!("{number}"),
        None => bail!("nothing to convert"),
    }
    Ok(())
}

pub fn run_transcript(args: &TranscriptArgs) -> Result<()> {
    let settings = load_settings(args.settings.as_deref())?;
    let document = TranscriptDocument::from_path(&args.file, &settings.transcript)
        .with_context(|| format!("load transcript {}", args.file.display()))?;
    info!(
        markers = document.markers().len(),
        removed_images = document.removed_images(),
        "loaded transcript"
    );
    if args.markers {
        if args.json {
            let json = serde_json::to_string_pretty(document.markers())
                .context("serialize page markers")?;
            println!("{json}");
        } else {
            print_markers(document.markers(), document.removed_images());
        }
        return Ok(());
    }
    match &args.output {
        Some(path) => {
            fs::write(path, document.body())
                .with_context(|| format!("write transcript body {}", path.display()))?;
            info!(path = %path.display(), "wrote sanitized transcript");
        }
        None => println!("{}", document.body()),
    }
    Ok(())
}

pub fn run_session(args: &SessionArgs) -> Result<()> {
    let index = load_index(&args.mapping)?;
    let settings = load_settings(args.settings.as_deref())?;
    let text = fs::read_to_string(&args.script)
        .with_context(|| format!("read session script {}", args.script.display()))?;
    let script = Script::parse(&text)
        .with_context(|| format!("parse session script {}", args.script.display()))?;

    let viewport = match &args.transcript {
        Some(path) => {
            let document = TranscriptDocument::from_path(path, &settings.transcript)
                .with_context(|| format!("load transcript {}", path.display()))?;
            HeadlessViewport::new()
                .with_anchors(document.markers().iter().map(|marker| marker.id.clone()))
        }
        None => HeadlessViewport::new(),
    };

    let span = info_span!("session", script = %args.script.display());
    let _guard = span.enter();
    let mut session = ViewerSession::new(
        &index,
        &settings,
        viewport,
        HeadlessImageHost::new(),
        args.width,
    )
    .context("open viewer session")?;
    let outcomes = replay(&mut session, &script);
    print_replay(
        &outcomes,
        session.state(),
        session.viewport(),
        session.host(),
    );
    Ok(())
}

pub fn run_settings(args: &SettingsArgs) -> Result<()> {
    let path = args
        .path
        .clone()
        .unwrap_or_else(ReaderSettings::config_path);
    let settings = ReaderSettings::load_from(&path)
        .with_context(|| format!("load settings {}", path.display()))?;
    let toml = settings.to_toml().context("serialize settings")?;
    println!("# {}", path.display());
    print!("{toml}");
    Ok(())
}

fn load_index(path: &Path) -> Result<PageIndex> {
    let mapping = PageMapping::from_path(path)
        .with_context(|| format!("load page mapping {}", path.display()))?;
    let index = PageIndex::build(&mapping);
    if index.is_empty() {
        warn!(path = %path.display(), "page mapping produced no pages");
    }
    info!(
        pages = index.len(),
        roman = index.roman_count(),
        arabic = index.arabic_count(),
        skipped = index.skipped().len(),
        "built page index"
    );
    Ok(index)
}

fn load_settings(path: Option<&Path>) -> Result<ReaderSettings> {
    let settings = match path {
        Some(path) => ReaderSettings::load_from(path)
            .with_context(|| format!("load settings {}", path.display()))?,
        None => ReaderSettings::load().context("load user settings")?,
    };
    Ok(settings)
}
