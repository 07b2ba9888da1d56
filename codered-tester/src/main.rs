mod logic;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use codered_game::ScenarioDeck;
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use logic::{LogicTester, PolicyKind, ScenarioResult, resolve_seed_inputs};

#[derive(Debug, Parser)]
#[command(name = "codered-tester", version = "0.1.0")]
#[command(about = "Headless shift simulator for Code Red: plays scripted shifts on a virtual clock")]
struct Args {
    /// Answer policies to run (comma-separated, or `all`)
    #[arg(long, default_value = "all")]
    policies: String,

    /// List all available policies and exit
    #[arg(long)]
    list_policies: bool,

    /// Seeds to run (comma-separated integers, ER- replay codes, or `all`)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Number of shifts per policy and seed
    #[arg(long, default_value_t = 10)]
    iterations: usize,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_policies(&args)? {
        return Ok(());
    }

    announce_banner();

    let start_time = Instant::now();
    let policies = expand_policies(&args.policies);
    let seed_infos = resolve_seed_inputs(&split_csv(&args.seeds))?;
    let deck = ScenarioDeck::builtin().context("built-in scenario deck failed to load")?;
    let tester = LogicTester::new(deck, args.verbose);

    let mut results = Vec::new();
    for policy in policies {
        results.extend(tester.run_policy(policy, &seed_infos, args.iterations));
    }

    write_reports(&args, &results, start_time)?;

    if results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }

    Ok(())
}

fn maybe_list_policies(args: &Args) -> Result<bool> {
    if !args.list_policies {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available policies:")?;
    for policy in PolicyKind::ALL {
        writeln!(
            output_target.writer(),
            "  {:12} - {}",
            policy.key(),
            policy.description()
        )?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🩺 Code Red Shift Tester".bright_cyan().bold());
    println!("{}", "========================".cyan());
}

fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

fn expand_policies(policies_arg: &str) -> Vec<PolicyKind> {
    let mut policies = Vec::new();
    for name in split_csv(policies_arg) {
        if name.eq_ignore_ascii_case("all") {
            policies.extend(PolicyKind::ALL);
            continue;
        }
        match PolicyKind::from_str(&name, true) {
            Ok(policy) => policies.push(policy),
            Err(_) => eprintln!("⚠️  Unknown policy: {}", name.yellow()),
        }
    }
    let mut seen = Vec::with_capacity(policies.len());
    policies.retain(|p| {
        if seen.contains(p) {
            false
        } else {
            seen.push(*p);
            true
        }
    });
    policies
}

fn write_reports(args: &Args, results: &[ScenarioResult], start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => logic::reports::generate_json_report(&mut output_target, results)?,
        "markdown" => {
            if results.is_empty() {
                writeln!(
                    &mut output_target,
                    "# Code Red Shift Simulation Results\n\n_No policies executed._"
                )?;
            } else {
                logic::reports::generate_markdown_report(&mut output_target, results)?;
            }
        }
        _ => {
            if results.is_empty() {
                writeln!(&mut output_target, "No policies executed.")?;
            } else {
                logic::reports::generate_console_report(
                    &mut output_target,
                    results,
                    start_time.elapsed(),
                )?;
            }
        }
    }

    if args.report != "json" {
        let duration = start_time.elapsed();
        writeln!(&mut output_target)?;
        writeln!(&mut output_target, "🏁 Total time: {duration:?}")?;
    }
    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::seeds::SeedInfo;
    use std::time::Duration;

    fn base_args() -> Args {
        Args {
            policies: "perfect".to_string(),
            list_policies: false,
            seeds: "1337".to_string(),
            iterations: 1,
            report: "json".to_string(),
            verbose: false,
            output: None,
        }
    }

    fn sample_result(passed: bool) -> ScenarioResult {
        ScenarioResult {
            policy: PolicyKind::Perfect,
            seed: 42,
            code: SeedInfo::from_numeric(42).display_code(),
            passed,
            iterations_run: 1,
            wins: 1,
            losses: 0,
            failures: if passed {
                Vec::new()
            } else {
                vec!["failure".to_string()]
            },
            average_case_reached: 10.0,
            average_accuracy_pct: 100.0,
            average_duration: Duration::from_millis(2),
        }
    }

    #[test]
    fn split_csv_trims_and_filters() {
        assert_eq!(split_csv(" perfect, ,sleeper "), vec!["perfect", "sleeper"]);
    }

    #[test]
    fn expands_all_policies_keyword() {
        let expanded = expand_policies("all,perfect");
        assert_eq!(expanded, PolicyKind::ALL.to_vec());
    }

    #[test]
    fn unknown_policies_are_skipped() {
        let expanded = expand_policies("sleeper,nope,First-Pick");
        assert_eq!(expanded, vec![PolicyKind::Sleeper, PolicyKind::FirstPick]);
    }

    #[test]
    fn maybe_list_policies_writes_output() {
        let temp = std::env::temp_dir().join("codered-policies.txt");
        let args = Args {
            list_policies: true,
            output: Some(temp.clone()),
            ..base_args()
        };
        assert!(maybe_list_policies(&args).unwrap());
        let content = std::fs::read_to_string(temp).unwrap();
        assert!(content.contains("Available policies"));
        assert!(content.contains("first-pick"));
    }

    #[test]
    fn maybe_list_policies_returns_false_when_disabled() {
        assert!(!maybe_list_policies(&base_args()).unwrap());
    }

    #[test]
    fn write_reports_emits_empty_json_array() {
        let temp = std::env::temp_dir().join("codered-report-empty.json");
        let args = Args {
            output: Some(temp.clone()),
            ..base_args()
        };
        write_reports(&args, &[], Instant::now()).unwrap();
        let content = std::fs::read_to_string(temp).unwrap();
        assert_eq!(content.trim(), "[]");
    }

    #[test]
    fn write_reports_markdown_empty_results() {
        let temp = std::env::temp_dir().join("codered-report-empty.md");
        let args = Args {
            report: "markdown".to_string(),
            output: Some(temp.clone()),
            ..base_args()
        };
        write_reports(&args, &[], Instant::now()).unwrap();
        let content = std::fs::read_to_string(temp).unwrap();
        assert!(content.contains("No policies executed"));
    }

    #[test]
    fn write_reports_emits_markdown_report() {
        let temp = std::env::temp_dir().join("codered-report-full.md");
        let args = Args {
            report: "markdown".to_string(),
            output: Some(temp.clone()),
            ..base_args()
        };
        write_reports(&args, &[sample_result(false)], Instant::now()).unwrap();
        let content = std::fs::read_to_string(temp).unwrap();
        assert!(content.contains("# Code Red Shift Simulation Results"));
        assert!(content.contains("| perfect |"));
        assert!(content.contains("Total time"));
    }

    #[test]
    fn write_reports_emits_console_report() {
        let temp = std::env::temp_dir().join("codered-report-console.txt");
        let args = Args {
            report: "console".to_string(),
            output: Some(temp.clone()),
            ..base_args()
        };
        write_reports(&args, &[sample_result(true)], Instant::now()).unwrap();
        let content = std::fs::read_to_string(temp).unwrap();
        assert!(content.contains("Shift Simulation Summary"));
    }

    #[test]
    fn output_target_stdout_writes() {
        let mut target = OutputTarget::new(None).unwrap();
        target.write_all(b"ok").unwrap();
        target.flush().unwrap();
    }
}
