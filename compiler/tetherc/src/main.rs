//! Tether CLI
//!
//! Runs the built-in closure demonstrations.

use tetherc::{find_demo, init_tracing, parse_run_args, run_demo, DEMOS};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    match args[1].as_str() {
        "run" => {
            let (name, options) = match parse_run_args(&args[2..]) {
                Ok(parsed) => parsed,
                Err(message) => {
                    eprintln!("error: {message}");
                    eprintln!("Usage: tether run <demo> [--max-depth=N] [--quiet]");
                    std::process::exit(1);
                }
            };

            let Some(demo) = find_demo(&name) else {
                eprintln!("error: unknown demo `{name}`");
                eprintln!("Run `tether list` to see the available demos.");
                std::process::exit(1);
            };

            if let Err(err) = run_demo(demo, &options, options.print_handler()) {
                eprintln!("error: {err}");
                for function in &err.backtrace {
                    eprintln!("  in {function}");
                }
                std::process::exit(1);
            }
        }
        "list" => {
            for demo in DEMOS {
                println!("  {:<10} {}", demo.name, demo.summary);
            }
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("tether {}", env!("CARGO_PKG_VERSION"));
        }
        other => {
            eprintln!("error: unknown command `{other}`");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Tether (capture-by-reference closures)");
    println!();
    println!("Usage: tether <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <demo>           Run a built-in demo program");
    println!("  list                 List the built-in demos");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Run options:");
    println!("  --max-depth=<n>      Maximum nested closure calls (default: 1024)");
    println!("  --quiet, -q          Discard program output");
    println!();
    println!("Set RUST_LOG (e.g. RUST_LOG=tether_eval=debug) for diagnostics.");
}
