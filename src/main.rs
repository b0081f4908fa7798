mod error;
mod model;
mod parsers;
mod services;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::error;

use services::classifier::ClassifierConfig;
use services::translator::GoogleTranslator;
use services::{discover, pipeline};

/// Batch-translate Odoo POT templates into zh_CN.po files.
#[derive(Parser, Debug)]
#[command(name = "potrans", version)]
struct Args {
    /// Base directory containing the Odoo modules
    #[arg(short, long, default_value = ".")]
    dir: PathBuf,

    /// Only translate the named module
    #[arg(short, long)]
    module: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("potrans=info".parse()?),
        )
        .init();

    let args = Args::parse();

    let mut modules = discover::find_modules(&args.dir)?;
    if modules.is_empty() {
        println!(
            "no translatable modules found under {}",
            args.dir.display()
        );
        return Ok(());
    }

    println!("found {} translatable module(s):", modules.len());
    for m in &modules {
        println!("- {}", m.name);
    }

    if let Some(name) = &args.module {
        modules.retain(|m| &m.name == name);
        if modules.is_empty() {
            anyhow::bail!("module not found: {name}");
        }
    }

    let translator = GoogleTranslator::new("en", "zh-CN")?;
    let cfg = ClassifierConfig::default();

    let mut failed_modules = 0usize;

    for module in &modules {
        println!("\ntranslating module: {}", module.name);
        println!("input:  {}", module.pot_path.display());
        println!("output: {}", module.po_path.display());

        match pipeline::run_module(module, &translator, &cfg) {
            Ok(report) => {
                println!(
                    "done: {} translated, {} reused, {} skipped, {} failed (of {} sent to the service)",
                    report.translated,
                    report.reused,
                    report.skipped,
                    report.failed,
                    report.candidates
                );
                if report.failed > 0 {
                    println!(
                        "note: {} entr(ies) stayed untranslated, rerun later or fill them in by hand",
                        report.failed
                    );
                }
            }
            Err(e) => {
                error!(module = %module.name, "module skipped: {e}");
                failed_modules += 1;
            }
        }
    }

    if failed_modules > 0 {
        anyhow::bail!("{failed_modules} module(s) failed");
    }

    println!("\nall modules processed");
    Ok(())
}
