//! Command-line front end for reconciling two rankings.
//!
//! Rankings are given inline as JSON (`--a '[1,[2,3]]'`) or read from files
//! (`--a-file a.json`).  Reports go to stdout unless `--output` is set.

use rank_consensus::{
    encode_report, write_report, ConsensusEngine, ConsensusError, ConsensusOptions, RankingSide,
    RankingSource, RelationMatrix,
};
use std::{env, io, path::PathBuf};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "RANK_CONSENSUS_LOG";

fn fatal(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}

fn print_help() {
    println!("Usage: rank-consensus <reconcile|core|matrix|help> ...");
    println!("  reconcile (--a <json>|--a-file <path>) (--b <json>|--b-file <path>)");
    println!("            [--pretty] [--output <path>] [--parallel-threshold <N>]");
    println!("  core      (--a <json>|--a-file <path>) (--b <json>|--b-file <path>) [--pretty]");
    println!("  matrix    (--a <json>|--a-file <path>)");
    println!();
    println!("Environment:");
    println!("  {LOG_ENV}  log filter (default: warn)");
    println!(
        "  {}  closure parallel threshold",
        rank_consensus::PARALLEL_THRESHOLD_ENV
    );
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    init_logging();
    let mut args = env::args().skip(1);
    let command = args.next();
    match command.as_deref() {
        Some("reconcile") => cmd_reconcile(args.collect()),
        Some("core") => cmd_core(args.collect()),
        Some("matrix") => cmd_matrix(args.collect()),
        Some("help") | Some("--help") | Some("-h") | None => print_help(),
        Some(other) => {
            eprintln!("Unknown command: {other}");
            print_help();
            std::process::exit(1);
        }
    }
}

#[derive(Debug, Default)]
struct Inputs {
    a: Option<RankingSource>,
    b: Option<RankingSource>,
    pretty: bool,
    output: Option<PathBuf>,
    parallel_threshold: Option<usize>,
}

const RECONCILE_FLAGS: &[&str] = &[
    "--a",
    "--a-file",
    "--b",
    "--b-file",
    "--pretty",
    "--output",
    "--parallel-threshold",
];
const CORE_FLAGS: &[&str] = &[
    "--a",
    "--a-file",
    "--b",
    "--b-file",
    "--pretty",
    "--parallel-threshold",
];
const MATRIX_FLAGS: &[&str] = &["--a", "--a-file"];

impl Inputs {
    fn parse_or_exit(args: Vec<String>, allowed: &[&str]) -> Self {
        Self::parse(args, allowed).unwrap_or_else(|message| fatal(&message))
    }

    /// Parses `args`, rejecting any flag outside `allowed`.
    fn parse(args: Vec<String>, allowed: &[&str]) -> Result<Self, String> {
        let mut inputs = Inputs::default();
        let mut iter = args.into_iter();
        while let Some(arg) = iter.next() {
            if !allowed.contains(&arg.as_str()) {
                return Err(format!("unknown argument: {arg}"));
            }
            let mut value = |flag: &str| {
                iter.next()
                    .ok_or_else(|| format!("{flag} expects a value"))
            };
            match arg.as_str() {
                "--a" => inputs.a = Some(RankingSource::Inline(value("--a")?)),
                "--a-file" => inputs.a = Some(RankingSource::File(value("--a-file")?.into())),
                "--b" => inputs.b = Some(RankingSource::Inline(value("--b")?)),
                "--b-file" => inputs.b = Some(RankingSource::File(value("--b-file")?.into())),
                "--output" => inputs.output = Some(value("--output")?.into()),
                "--parallel-threshold" => {
                    let raw = value("--parallel-threshold")?;
                    inputs.parallel_threshold = Some(
                        raw.parse()
                            .map_err(|_| "invalid --parallel-threshold value".to_string())?,
                    );
                }
                "--pretty" => inputs.pretty = true,
                other => return Err(format!("unknown argument: {other}")),
            }
        }
        Ok(inputs)
    }

    fn options(&self) -> ConsensusOptions {
        let options = ConsensusOptions::from_env();
        match self.parallel_threshold {
            Some(threshold) => options.with_parallel_threshold(threshold),
            None => options,
        }
    }

    fn load(&self, side: RankingSide) -> rank_consensus::Ranking {
        let source = match side {
            RankingSide::A => self.a.as_ref(),
            RankingSide::B => self.b.as_ref(),
        };
        let source = source.unwrap_or_else(|| fatal(&format!("{side} is required")));
        source.load(side).unwrap_or_else(|err| fail(err))
    }
}

fn fail(err: ConsensusError) -> ! {
    fatal(&format!("error: {err}"))
}

fn cmd_reconcile(args: Vec<String>) {
    let inputs = Inputs::parse_or_exit(args, RECONCILE_FLAGS);
    let a = inputs.load(RankingSide::A);
    let b = inputs.load(RankingSide::B);
    let engine = ConsensusEngine::new(inputs.options());
    tracing::debug!(
        parallel_threshold = engine.options().parallel_threshold,
        "engine configured"
    );
    let report = engine
        .reconcile(&a, &b)
        .unwrap_or_else(|err| fail(err))
        .report();
    match &inputs.output {
        Some(path) => {
            let written =
                write_report(path, &report, inputs.pretty).unwrap_or_else(|err| fail(err));
            println!("wrote {}", written.display());
        }
        None => println!(
            "{}",
            encode_report(&report, inputs.pretty).unwrap_or_else(|err| fail(err))
        ),
    }
}

fn cmd_core(args: Vec<String>) {
    let inputs = Inputs::parse_or_exit(args, CORE_FLAGS);
    let a = inputs.load(RankingSide::A);
    let b = inputs.load(RankingSide::B);
    let reconciliation = ConsensusEngine::new(inputs.options())
        .reconcile(&a, &b)
        .unwrap_or_else(|err| fail(err));
    let pairs = reconciliation.core_pairs();
    let encoded = if inputs.pretty {
        serde_json::to_string_pretty(&pairs)
    } else {
        serde_json::to_string(&pairs)
    };
    match encoded {
        Ok(text) => println!("{text}"),
        Err(err) => fail(ConsensusError::Encode(err.to_string())),
    }
}

fn cmd_matrix(args: Vec<String>) {
    let inputs = Inputs::parse_or_exit(args, MATRIX_FLAGS);
    let a = inputs.load(RankingSide::A);
    let index = a
        .position_index(RankingSide::A)
        .unwrap_or_else(|err| fail(err));
    let universe = a.universe();
    let labels: Vec<String> = universe.objects().iter().map(|o| o.to_string()).collect();
    println!("objects: {}", labels.join(" "));
    print!("{}", RelationMatrix::from_ranking(&index, &universe));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_reconcile_accepts_all_its_flags() {
        let inputs = Inputs::parse(
            args(&[
                "--a",
                "[1,2]",
                "--b-file",
                "b.json",
                "--pretty",
                "--output",
                "out.json",
                "--parallel-threshold",
                "8",
            ]),
            RECONCILE_FLAGS,
        )
        .unwrap();
        assert_eq!(inputs.a, Some(RankingSource::Inline("[1,2]".into())));
        assert_eq!(inputs.b, Some(RankingSource::File("b.json".into())));
        assert!(inputs.pretty);
        assert_eq!(inputs.output, Some(PathBuf::from("out.json")));
        assert_eq!(inputs.parallel_threshold, Some(8));
    }

    #[test]
    fn test_core_rejects_output() {
        let err = Inputs::parse(
            args(&["--a", "[1,2]", "--b", "[2,1]", "--output", "y.json"]),
            CORE_FLAGS,
        )
        .unwrap_err();
        assert_eq!(err, "unknown argument: --output");
    }

    #[test]
    fn test_matrix_rejects_second_ranking_and_output_flags() {
        let extras: [&[&str]; 3] = [&["--b", "junk"], &["--output", "x.json"], &["--pretty"]];
        for extra in extras {
            let mut list = vec!["--a", "[1,2]"];
            list.extend_from_slice(extra);
            assert!(Inputs::parse(args(&list), MATRIX_FLAGS).is_err());
        }
        assert!(Inputs::parse(args(&["--a", "[1,2]"]), MATRIX_FLAGS).is_ok());
    }

    #[test]
    fn test_missing_value_and_bad_threshold() {
        assert_eq!(
            Inputs::parse(args(&["--a"]), RECONCILE_FLAGS).unwrap_err(),
            "--a expects a value"
        );
        assert!(Inputs::parse(
            args(&["--parallel-threshold", "many"]),
            RECONCILE_FLAGS
        )
        .is_err());
    }
}
