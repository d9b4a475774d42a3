//! Subcommand handlers.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use serde_json::Value;
use tracing::{error, info, warn};
use vitrina_codec::{
    CodecError, ValidationResult, export_json_string, export_markdown, import_str, validate,
};
use vitrina_kernel::{
    ClipboardStore, FileClipboard, TemplateCategory, TemplateLibrary, VitrinaConfig,
    analyze_document,
};
use vitrina_render::{Dispatcher, InMemoryResolver, Record, RecordKind, to_html};
use vitrina_types::{BlockId, BlogDocument};

use crate::{Command, ExportFormat};

/// Exit code for a rejected import or failed validation.
const EXIT_REJECTED: u8 = 1;

pub async fn run(command: Command, config: &VitrinaConfig) -> Result<ExitCode> {
    match command {
        Command::Validate { file } => {
            let value = read_json(&file)?;
            let report = validate(&value, &config.import);
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(exit_for(&report))
        }

        Command::Import { file, output } => {
            let text = read_text(&file)?;
            match import_str(&text, &config.import) {
                Ok(imported) => {
                    log_report(&imported.report);
                    info!(
                        minted_ids = imported.minted_ids,
                        stripped_markers = imported.stripped_markers,
                        "imported {}",
                        file.display()
                    );
                    write_output(output.as_deref(), &export_json_string(&imported.document))?;
                    Ok(ExitCode::SUCCESS)
                }
                Err(CodecError::Rejected(report)) => {
                    error!("import rejected: {}", report.summary());
                    println!("{}", serde_json::to_string_pretty(&report)?);
                    Ok(ExitCode::from(EXIT_REJECTED))
                }
                Err(e) => Err(e).with_context(|| format!("importing {}", file.display())),
            }
        }

        Command::Export {
            file,
            format,
            output,
        } => {
            let doc = load_document(&file, config)?;
            let text = match format {
                ExportFormat::Json => export_json_string(&doc),
                ExportFormat::Markdown => export_markdown(&doc),
            };
            write_output(output.as_deref(), &text)?;
            Ok(ExitCode::SUCCESS)
        }

        Command::Analyze { file } => {
            let doc = load_document(&file, config)?;
            let analysis = analyze_document(&doc, &config.analyzer);
            println!("{}", serde_json::to_string_pretty(&analysis)?);
            Ok(ExitCode::SUCCESS)
        }

        Command::Render { file, records } => {
            let doc = load_document(&file, config)?;
            let mut dispatcher = Dispatcher::new();
            if let Some(path) = records {
                dispatcher = dispatcher.with_resolver(Arc::new(load_records(&path)?));
            }
            let rendered = dispatcher.render_resolved(&doc.bloques).await;
            let failed = rendered.iter().filter(|b| !b.is_rendered()).count();
            if failed > 0 {
                warn!(failed, total = rendered.len(), "some blocks rendered as placeholders");
            }
            println!("{}", to_html(&rendered));
            Ok(ExitCode::SUCCESS)
        }

        Command::Templates { category } => {
            let library = TemplateLibrary::builtin();
            let templates = match category {
                Some(name) => {
                    let Some(category) = TemplateCategory::from_str(&name) else {
                        bail!("unknown template category: {name}");
                    };
                    library.by_category(category)
                }
                None => library.list().iter().collect(),
            };
            for t in templates {
                println!(
                    "{:<12} {:<11} {:>4}  {}",
                    t.id,
                    t.category,
                    t.blocks.len(),
                    t.name
                );
            }
            Ok(ExitCode::SUCCESS)
        }

        Command::Template { id, output } => {
            let blocks = TemplateLibrary::builtin().instantiate(&id)?;
            write_output(output.as_deref(), &serde_json::to_string_pretty(&blocks)?)?;
            Ok(ExitCode::SUCCESS)
        }

        Command::Copy { file, cut, ids } => {
            let store = clipboard(config)?;
            let mut doc = load_document(&file, config)?;
            let ids: Vec<BlockId> = if ids.is_empty() {
                doc.bloques.ids().into_iter().cloned().collect()
            } else {
                ids.into_iter().map(BlockId::new).collect()
            };
            if cut {
                let count = store.cut(&mut doc.bloques, &ids)?;
                write_file(&file, &export_json_string(&doc))?;
                info!("cut {count} block(s) from {}", file.display());
            } else {
                let count = store.copy_from(&doc.bloques, &ids)?;
                info!("copied {count} block(s) from {}", file.display());
            }
            Ok(ExitCode::SUCCESS)
        }

        Command::Paste { into, at, output } => {
            let store = clipboard(config)?;
            if let Some(age) = store.describe_age()? {
                info!("clipboard payload captured {age}");
            }
            match into {
                Some(path) => {
                    let mut doc = load_document(&path, config)?;
                    let pos = at.unwrap_or(doc.bloques.len());
                    let ids = store.paste_into(&mut doc.bloques, pos)?;
                    write_file(&path, &export_json_string(&doc))?;
                    info!("pasted {} block(s) into {}", ids.len(), path.display());
                }
                None => {
                    let blocks = store.paste()?;
                    write_output(output.as_deref(), &serde_json::to_string_pretty(&blocks)?)?;
                }
            }
            Ok(ExitCode::SUCCESS)
        }

        Command::ClipboardClear => {
            clipboard(config)?.clear()?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn exit_for(report: &ValidationResult) -> ExitCode {
    if report.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_REJECTED)
    }
}

fn log_report(report: &ValidationResult) {
    for w in &report.warnings {
        warn!(path = %w.path, "{}", w.message);
    }
    for notice in &report.manual_fields {
        warn!(
            path = %notice.path,
            block_type = notice.block_type.as_deref().unwrap_or("-"),
            reason = ?notice.reason,
            "needs manual completion"
        );
    }
}

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn read_json(path: &Path) -> Result<Value> {
    serde_json::from_str(&read_text(path)?).with_context(|| format!("parsing {}", path.display()))
}

/// Documents read from disk go through the same validated import as
/// external JSON.
fn load_document(path: &Path, config: &VitrinaConfig) -> Result<BlogDocument> {
    let imported = import_str(&read_text(path)?, &config.import)
        .with_context(|| format!("loading {}", path.display()))?;
    log_report(&imported.report);
    Ok(imported.document)
}

fn write_file(path: &Path, text: &str) -> Result<()> {
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))
}

fn write_output(path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(path) => write_file(path, text),
        None => {
            println!("{text}");
            Ok(())
        }
    }
}

fn clipboard(config: &VitrinaConfig) -> Result<ClipboardStore<FileClipboard>> {
    let path: PathBuf = config
        .clipboard
        .resolved_path()
        .context("no clipboard location: set [clipboard] path in the config")?;
    Ok(ClipboardStore::new(FileClipboard::new(path)))
}

/// `--records` file shape.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RecordsFile {
    programs: Vec<Record>,
    blogs: Vec<Record>,
}

fn load_records(path: &Path) -> Result<InMemoryResolver> {
    let file: RecordsFile = serde_json::from_str(&read_text(path)?)
        .with_context(|| format!("parsing records {}", path.display()))?;
    let mut resolver = InMemoryResolver::new();
    for record in file.programs {
        resolver.insert(RecordKind::Program, record);
    }
    for record in file.blogs {
        resolver.insert(RecordKind::Blog, record);
    }
    Ok(resolver)
}

// ============================================================================
// Tests
// ============================================================================
