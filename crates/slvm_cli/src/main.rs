mod args;
mod commands;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn init_logging(args: &args::CliArgs) {
    let mut builder = env_logger::Builder::new();
    if args.trace {
        builder.filter_level(log::LevelFilter::Trace);
    } else if args.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    } else if let Ok(filter) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filter);
    } else {
        builder.filter_level(log::LevelFilter::Warn);
    }
    builder.format_timestamp(None);
    builder.init();
}

fn main() {
    let args = match args::parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };
    init_logging(&args);

    match args.cmd.as_str() {
        "check" => commands::check::run(&args),
        "disasm" => commands::disasm::run(&args),
        "run" => commands::run::run(&args),
        _ => {
            eprintln!("Unknown command: {}", args.cmd);
            eprintln!("{}", args::usage());
            std::process::exit(2);
        }
    }
}
