use dimacs_degree::*;
use env_logger::Env;
use log::info;

use clap::Parser;

/// Maximum vertex degree of every DIMACS instance in a directory
#[derive(Parser, Debug)]
#[clap(version, about, long_about = None)]
struct Args {
    /// directory with the instance files. Names starting with '.' or ending in 'b' are skipped
    #[clap(default_value = DegreeScanner::DEFAULT_DIR)]
    dir: String,

    /// process files sorted by name instead of directory order
    #[clap(short, long)]
    sorted: bool,

    /// count a malformed edge line with the endpoints of the previous edge line
    #[clap(long)]
    reuse_stale_edges: bool,

    /// print one json object per file instead of "<file>\t<max degree>"
    #[clap(long)]
    json: bool,

    /// log progress at info level (RUST_LOG overrides)
    #[clap(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let level = if args.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    let policy = if args.reuse_stale_edges { EdgeErrorPolicy::ReuseLast } else { EdgeErrorPolicy::Skip };
    let scanner = DegreeScanner::new(&args.dir).sorted(args.sorted).policy(policy);
    info!("scanning {}", args.dir);

    let mut json_err = None;
    let on_malformed = |_file: &str, line: &str| eprintln!("{}", line);
    scanner.scan_each_with(on_malformed, |report| {
        if args.json {
            match serde_json::to_string(&report) {
                Ok(s) => println!("{}", s),
                Err(e) => { json_err.get_or_insert(e); }
            }
        } else {
            println!("{}", report);
        }
    })?;
    if let Some(e) = json_err {
        return Err(e.into());
    }
    Ok(())
}
