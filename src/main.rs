// ==========================================
// Class Assign - command line entry
// ==========================================
// Usage:
//   class-assign [--db PATH] <command> [args]
//
// Commands:
//   recompute                  per-class tallies of a fresh assignment
//   report [CSV_PATH]          full report as CSV (stdout when no path)
//   import <CLASS> <FILE>      add students from .csv/.xlsx/.xls into a class
//   override <ID> <CODE|->     pin a student to a class, "-" clears
//   reset-overrides            clear every pin
//   summary                    roster headline counts
//   snapshot                   roster + settings as JSON on stdout
//   restore <JSON_FILE>        replace roster + settings from a snapshot
// ==========================================

use class_assign::app::{get_default_db_path, AppState};
use class_assign::i18n::{self, t, t_with_args};
use class_assign::logging;
use std::error::Error;
use std::path::Path;

fn main() -> Result<(), Box<dyn Error>> {
    logging::init();
    i18n::init_from_env();

    let mut args: Vec<String> = std::env::args().skip(1).collect();

    let db_path = match args.iter().position(|a| a == "--db") {
        Some(idx) => {
            let path = args
                .get(idx + 1)
                .cloned()
                .ok_or("--db needs a path")?;
            args.drain(idx..=idx + 1);
            path
        }
        None => get_default_db_path(),
    };

    let Some(command) = args.first().cloned() else {
        eprintln!("{}", t("cli.usage"));
        std::process::exit(2);
    };
    let rest = &args[1..];

    tracing::info!(version = class_assign::VERSION, db_path = %db_path, command = %command, "class-assign");
    let state = AppState::new(db_path)?;

    match command.as_str() {
        "recompute" => {
            let result = state.assignment_api.recompute()?;
            for (code, stats) in &result.stats {
                println!(
                    "{}\t{}={}\t{}={}\t{}={}",
                    t_with_args("class.destination", &[("label", code.label())]),
                    t("report.columns.male"),
                    stats.male,
                    t("report.columns.female"),
                    stats.female,
                    t("report.columns.total"),
                    stats.total
                );
            }
            if !result.excluded.is_empty() {
                println!(
                    "{}",
                    t_with_args(
                        "cli.excluded",
                        &[("count", result.excluded.len().to_string().as_str())],
                    )
                );
            }
            if !result.stale_overrides.is_empty() {
                let ids = result
                    .stale_overrides
                    .iter()
                    .map(|id| id.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                println!("{}", t_with_args("cli.stale_overrides", &[("ids", ids.as_str())]));
            }
        }
        "report" => match rest.first() {
            Some(path) => {
                state.assignment_api.export_report_csv(Path::new(path))?;
                println!("{}", t_with_args("cli.report_written", &[("path", path.as_str())]));
            }
            None => {
                let report = state.assignment_api.build_report()?;
                print!("{}", class_assign::report::to_csv_string(&report)?);
            }
        },
        "import" => {
            let (class, file) = match rest {
                [class, file, ..] => (class.parse::<u32>()?, file),
                _ => return Err(t("cli.usage").into()),
            };
            let report = state.roster_api.import_file(Path::new(file), class)?;
            println!(
                "{}",
                t_with_args(
                    "import.finished",
                    &[
                        ("added", report.added.to_string().as_str()),
                        ("skipped", report.skipped_lines.len().to_string().as_str()),
                    ],
                )
            );
        }
        "override" => {
            let (id, label) = match rest {
                [id, label, ..] => (id.parse::<i64>()?, label.as_str()),
                _ => return Err(t("cli.usage").into()),
            };
            let label = if label == "-" { None } else { Some(label) };
            let student = state.roster_api.set_manual_override(id, label)?;
            println!(
                "{}\t{}",
                student.name,
                student.manual_class.map(|c| c.label()).unwrap_or("-")
            );
        }
        "reset-overrides" => {
            let count = state.roster_api.clear_all_manual_overrides()?;
            println!(
                "{}",
                t_with_args("cli.overrides_cleared", &[("count", count.to_string().as_str())])
            );
        }
        "summary" => {
            let summary = state.assignment_api.summary()?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        "snapshot" => {
            println!("{}", state.roster_api.snapshot_json()?);
        }
        "restore" => {
            let file = rest.first().ok_or_else(|| t("cli.usage"))?;
            let json = std::fs::read_to_string(file)?;
            let restored = state.roster_api.restore_snapshot_json(&json)?;
            println!("{}", restored);
        }
        _ => {
            eprintln!("{}", t("cli.usage"));
            std::process::exit(2);
        }
    }

    Ok(())
}
