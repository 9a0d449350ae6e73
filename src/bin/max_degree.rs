use dimacs_degree::*;
use env_logger::Env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    if let [_, infile] = &std::env::args().collect::<Vec<_>>()[..] {
        let stats = io::scan_file_with(infile, EdgeErrorPolicy::Skip, |line| eprintln!("{}", line))?;
        println!("{}", stats.max_degree());
    } else {
        eprintln!("usage: max-degree <instance file>");
        std::process::exit(2);
    }
    Ok(())
}
