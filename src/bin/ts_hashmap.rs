use std::process::ExitCode;
use ts_hashmap::harness::{self, HarnessConfig};

fn main() -> ExitCode {
    let mut args = std::env::args();
    let prog = args.next().unwrap_or_else(|| "ts_hashmap".to_string());
    let rest: Vec<String> = args.collect();

    if rest.len() > 2 {
        println!(
            "Arguments for {prog} that will be used are: <num threads {}> <hashmap capacity {}>",
            rest[0], rest[1]
        );
        println!("All other arguments for {prog} will be lost.");
    }

    let config = match HarnessConfig::from_args(&rest)
        .and_then(|c| c.with_env(|var| std::env::var(var).ok()))
    {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!("Usage: {prog} <num threads> <hashmap capacity>");
            return ExitCode::FAILURE;
        }
    };

    let report = match harness::run(&config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    print!("{}", report.snapshot);
    let t = report.totals();
    println!(
        "threads: {}, ops/thread: {}, puts: {} ({} new), gets: {} ({} hits), deletes: {} ({} removed)",
        config.threads, config.ops_per_thread, t.puts, t.inserted, t.gets, t.hits, t.deletes, t.removed
    );
    println!("size: {}", report.len);
    println!("load factor: {:.4}", report.load_factor);

    if report.is_consistent() {
        ExitCode::SUCCESS
    } else {
        eprintln!("error: final size does not match the operations performed");
        ExitCode::FAILURE
    }
}
