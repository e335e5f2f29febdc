pub(crate) struct CliArgs {
    pub cmd: String,
    pub verbose: bool,
    pub timing: bool,
    pub trace: bool,
    pub lenient: bool,
    /// Micropolygons along u and v.
    pub grid: (usize, usize),
    /// `set=name:value` parameter overrides, in order.
    pub sets: Vec<(String, String)>,
    pub positional: Vec<String>,
}

pub(crate) fn usage() -> &'static str {
    "Usage: slvm <check|disasm|run> [verbose] [timing] [trace] [lenient] [grid=UxV] [set=name:value] <file>"
}

fn parse_grid(value: &str) -> Result<(usize, usize), String> {
    let (u, v) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("Invalid grid: {value} (expected UxV)"))?;
    let parse = |s: &str| {
        s.trim()
            .parse::<usize>()
            .map_err(|_| format!("Invalid grid: {value} (expected UxV)"))
    };
    Ok((parse(u)?, parse(v)?))
}

pub(crate) fn parse_args() -> Result<CliArgs, String> {
    parse_from(std::env::args().skip(1).collect())
}

fn parse_from(mut argv: Vec<String>) -> Result<CliArgs, String> {
    if argv.is_empty() {
        return Err(usage().to_string());
    }
    let cmd = argv.remove(0);

    let mut args = CliArgs {
        cmd,
        verbose: false,
        timing: false,
        trace: false,
        lenient: false,
        grid: (7, 7),
        sets: Vec::new(),
        positional: Vec::new(),
    };

    for a in argv {
        if a.starts_with("--") {
            return Err(format!("Unknown option: {a}"));
        }
        if a == "verbose" {
            args.verbose = true;
        } else if a == "timing" {
            args.timing = true;
        } else if a == "trace" {
            args.trace = true;
        } else if a == "lenient" {
            args.lenient = true;
        } else if let Some(value) = a.strip_prefix("grid=") {
            args.grid = parse_grid(value)?;
        } else if let Some(value) = a.strip_prefix("set=") {
            let (name, value) = value
                .split_once(':')
                .ok_or_else(|| format!("Invalid set: {value} (expected name:value)"))?;
            args.sets.push((name.to_string(), value.to_string()));
        } else {
            args.positional.push(a);
        }
    }
    Ok(args)
}
