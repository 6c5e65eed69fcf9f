// src/cli.rs
use std::io::{self, Read};
use std::path::PathBuf;

use color_eyre::eyre::{bail, eyre, Result, WrapErr};

use crate::config::SyncOptions;
use crate::core::html::Document;
use crate::progress::{Progress, Stage};
use crate::scrape::{Diagnostic, Extractor};
use crate::store::JsonFileStore;
use crate::sync::{ExistingSource, SyncCoordinator};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Params {
    pub config: Option<PathBuf>,
    pub store: Option<PathBuf>,
    pub extract_only: bool,
    pub dry_run: bool,
    pub log_level: Option<String>,
    /// `None` reads stdin.
    pub input: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    Run(Params),
}

pub fn run() -> Result<()> {
    let params = match parse_args(std::env::args().skip(1))? {
        Command::Help => {
            eprintln!("{}", include_str!("cli_help.txt"));
            return Ok(());
        }
        Command::Run(p) => p,
    };

    let mut opts = SyncOptions::load_or_default(params.config.as_deref())?;
    if let Some(store) = &params.store {
        opts.store_path = store.clone();
    }
    if let Some(level) = &params.log_level {
        opts.log_filter = level.clone();
    }

    // A broken log file should not stop a sync.
    if let Err(e) = crate::log::init(&opts.log_file, &opts.log_filter) {
        eprintln!("warning: logging disabled: {e}");
    }
    logf!("profile_sync start: {params:?}");

    let html = read_input(params.input.as_ref())?;
    let doc = Document::parse(&html);
    let extractor = Extractor::for_profile_page(opts.skills_category.clone())
        .wrap_err("built-in page rules failed to compile")?;

    if params.extract_only {
        let report = extractor.extract_report(&doc);
        report_diagnostics(&report.diagnostics);
        println!("{}", serde_json::to_string_pretty(&report.snapshot)?);
        return Ok(());
    }

    let store = JsonFileStore::new(&opts.store_path);
    let coordinator = SyncCoordinator::new(extractor, store, opts.on_fetch_error);
    let mut progress = StderrProgress;
    let result = if params.dry_run {
        coordinator.preview(&doc, Some(&mut progress))
    } else {
        coordinator.sync(&doc, Some(&mut progress))
    };
    let outcome = result.wrap_err_with(|| format!("sync against {}", opts.store_path.display()))?;

    report_diagnostics(&outcome.diagnostics);
    if let ExistingSource::FetchFailed(why) = &outcome.existing {
        eprintln!("warning: stored record unreadable ({why}); merged against an empty record");
    }
    if !outcome.missing_required.is_empty() {
        eprintln!("warning: record is missing {}", outcome.missing_required.join(", "));
    }
    if outcome.persisted {
        eprintln!("Saved {}", opts.store_path.display());
    }

    println!("{}", serde_json::to_string_pretty(&outcome.record)?);
    Ok(())
}

pub fn parse_args<I>(args: I) -> Result<Command>
where
    I: IntoIterator<Item = String>,
{
    let mut params = Params::default();
    let mut input: Option<String> = None;
    let mut args = args.into_iter();

    while let Some(a) = args.next() {
        match a.as_str() {
            "-c" | "--config" => {
                params.config = Some(PathBuf::from(args.next().ok_or_else(|| eyre!("Missing value for --config"))?))
            }
            "-s" | "--store" => {
                params.store = Some(PathBuf::from(args.next().ok_or_else(|| eyre!("Missing value for --store"))?))
            }
            "-x" | "--extract-only" => params.extract_only = true,
            "-n" | "--dry-run" => params.dry_run = true,
            "--log-level" => {
                params.log_level = Some(args.next().ok_or_else(|| eyre!("Missing value for --log-level"))?)
            }
            "-h" | "--help" => return Ok(Command::Help),
            flag if flag.starts_with('-') && flag != "-" => bail!("Unknown arg: {flag}"),
            _ => {
                if let Some(prev) = &input {
                    bail!("Only one input page allowed (got {prev} and {a})");
                }
                input = Some(a);
            }
        }
    }

    if params.extract_only && params.dry_run {
        bail!("--extract-only and --dry-run cannot be combined");
    }
    params.input = match input.as_deref() {
        None => bail!("Missing input page (use - for stdin)"),
        Some("-") => None,
        Some(path) => Some(PathBuf::from(path)),
    };
    Ok(Command::Run(params))
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(p) => std::fs::read_to_string(p).wrap_err_with(|| format!("reading {}", p.display())),
        None => {
            let mut buf = s!();
            io::stdin().read_to_string(&mut buf).wrap_err("reading page from stdin")?;
            Ok(buf)
        }
    }
}

fn report_diagnostics(diags: &[Diagnostic]) {
    if diags.is_empty() {
        return;
    }
    eprintln!("{} field(s) or item(s) not found on the page:", diags.len());
    for d in diags {
        eprintln!("  {d}");
    }
}

struct StderrProgress;

impl Progress for StderrProgress {
    fn stage(&mut self, stage: Stage) {
        eprintln!("{stage}...");
    }

    fn log(&mut self, msg: &str) {
        eprintln!("  {msg}");
    }

    fn finish(&mut self, ok: bool) {
        if !ok {
            eprintln!("Sync failed.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|a| s!(*a)).collect()
    }

    #[test]
    fn parses_flags_and_input() {
        let cmd = parse_args(args(&["--store", "out.json", "-n", "page.html"])).unwrap();
        assert_eq!(
            cmd,
            Command::Run(Params {
                store: Some(PathBuf::from("out.json")),
                dry_run: true,
                input: Some(PathBuf::from("page.html")),
                ..Default::default()
            })
        );
    }

    #[test]
    fn dash_means_stdin() {
        let Command::Run(p) = parse_args(args(&["-x", "-"])).unwrap() else { panic!("expected run") };
        assert!(p.extract_only);
        assert_eq!(p.input, None);
    }

    #[test]
    fn rejects_bad_invocations() {
        assert!(parse_args(args(&[])).is_err());
        assert!(parse_args(args(&["--store"])).is_err());
        assert!(parse_args(args(&["--bogus", "p.html"])).is_err());
        assert!(parse_args(args(&["a.html", "b.html"])).is_err());
        assert!(parse_args(args(&["-x", "-n", "a.html"])).is_err());
    }

    #[test]
    fn help_wins() {
        assert_eq!(parse_args(args(&["p.html", "--help"])).unwrap(), Command::Help);
    }
}
