#[macro_use]
extern crate log;

use std::path::PathBuf;
use std::process;

use clap::{command, value_parser, Arg, ArgAction, ArgMatches};
use log::LevelFilter;

use warcf::{Mode, Options};

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let mut builder = pretty_env_logger::formatted_builder();
    builder.filter_level(level);
    // RUST_LOG still wins for anybody who wants finer control
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}

fn parse_args() -> ArgMatches {
    command!()
        .about("Transcode WARC files to and from a compact form")
        .after_help(
            "Modes:\n  \
             e     encode INPUT (WARC) to compact OUTPUT\n  \
             es    encode, writing record contents to side files\n  \
             d     decode compact INPUT to WARC OUTPUT\n  \
             dm    decode, reading record contents from side files\n  \
             l     list WARC-Target-URI of every response record\n  \
             l<N>  list field N of every response record",
        )
        .arg(
            Arg::new("mode")
                .value_name("MODE")
                .required(true)
                .value_parser(value_parser!(Mode)),
        )
        .arg(
            Arg::new("input")
                .value_name("INPUT")
                .required(true)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("output")
                .value_name("OUTPUT")
                .required(true)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("side-dir")
                .long("side-dir")
                .value_name("DIR")
                .help("Directory for split-mode side files")
                .default_value(".")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log more; repeat for more detail")
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Do not show progress")
                .action(ArgAction::SetTrue),
        )
        .get_matches()
}

fn main() {
    let matches = parse_args();
    init_logging(matches.get_count("verbose"));

    let options = Options {
        mode: *matches.get_one::<Mode>("mode").expect("MODE is required"),
        input: matches
            .get_one::<PathBuf>("input")
            .expect("INPUT is required")
            .clone(),
        output: matches
            .get_one::<PathBuf>("output")
            .expect("OUTPUT is required")
            .clone(),
        side_dir: matches
            .get_one::<PathBuf>("side-dir")
            .expect("side-dir has a default")
            .clone(),
        progress: !matches.get_flag("quiet"),
    };
    debug!("Running with {:?}", options);

    match warcf::run(&options) {
        Ok(n) => info!("Processed {} records", n),
        Err(e) => {
            eprintln!("warcf: {}", e);
            process::exit(1);
        }
    }
}
