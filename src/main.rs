use fretwork::api::{self, Diagnostic, Report};
use fretwork::config::Settings;
use fretwork::Severity;
use serde::Serialize;
use std::env;
use std::process;

const USAGE: &str = "Usage: fretwork [--json] scale <root> <scale-name>
       fretwork [--json] diatonic <root> <major|minor>
       fretwork [--json] voicing <chord> [6|5]
       fretwork [--json] progression [--seed N] [--config practice.yaml]";

fn main() {
    let mut args: Vec<String> = env::args().skip(1).collect();

    let json = match args.iter().position(|a| a == "--json") {
        Some(i) => {
            args.remove(i);
            true
        }
        None => false,
    };

    if args.is_empty() {
        usage();
    }

    match args[0].as_str() {
        "scale" if args.len() == 3 => {
            emit(api::scale_notes(&args[1], &args[2]), json, |n| n.to_string())
        }
        "diatonic" if args.len() == 3 => emit(api::diatonic_chords(&args[1], &args[2]), json, |c| {
            let notes: Vec<String> = c.notes.iter().map(|n| n.to_string()).collect();
            format!("{:<10} {:<8} {}", c.degree, c.chord_name, notes.join(" "))
        }),
        "voicing" if args.len() == 2 || args.len() == 3 => {
            let root_string = match args.get(2) {
                Some(s) => s.parse::<u8>().unwrap_or_else(|_| {
                    eprintln!("error: root string must be 6 or 5, got '{}'", s);
                    process::exit(1);
                }),
                None => 6,
            };
            emit(api::chord_voicing_any(&args[1], root_string), json, |n| {
                format!(
                    "string {} fret {:<2} {:<4} {}",
                    n.string_index + 1,
                    n.fret_index + 1,
                    n.note,
                    n.degree.label()
                )
            })
        }
        "progression" => progression(&args[1..], json),
        _ => usage(),
    }
}

fn progression(args: &[String], json: bool) {
    let mut seed: Option<u64> = None;
    let mut settings = Settings::default();

    let mut i = 0;
    while i < args.len() {
        let value = args.get(i + 1).unwrap_or_else(|| usage());
        match args[i].as_str() {
            "--seed" => {
                seed = Some(value.parse().unwrap_or_else(|_| {
                    eprintln!("error: seed must be a number, got '{}'", value);
                    process::exit(1);
                }))
            }
            "--config" => {
                settings = Settings::from_path(value).unwrap_or_else(|e| {
                    eprintln!("error: {}", e);
                    process::exit(1);
                })
            }
            _ => usage(),
        }
        i += 2;
    }

    let report = api::progression(seed.or(settings.seed), settings.bars);
    if !json && !report.items.is_empty() {
        println!(
            "# {} bpm, {:.0} ms per beat, {}",
            settings.tempo,
            settings.beat_interval_ms(),
            settings.instrument.name()
        );
    }
    emit(report, json, |c| c.chord_name.clone());
}

/// Print a report's items on stdout and its diagnostics on stderr.
/// Exits 1 when nothing could be produced.
fn emit<T, F>(report: Report<T>, json: bool, line: F)
where
    T: Serialize,
    F: Fn(&T) -> String,
{
    for d in &report.diagnostics {
        print_diagnostic(d);
    }
    if report.items.is_empty() && !report.diagnostics.is_empty() {
        process::exit(1);
    }

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("error: {}", e);
                process::exit(1);
            }
        }
    } else {
        for item in &report.items {
            println!("{}", line(item));
        }
    }
}

fn print_diagnostic(d: &Diagnostic) {
    let label = match d.severity {
        Severity::Warning => "warning",
        Severity::Error => "error",
    };
    eprintln!("{}: {}", label, d.message);
}

fn usage() -> ! {
    eprintln!("{}", USAGE);
    process::exit(1);
}
