pub(crate) struct CliArgs {
    pub cmd: String,
    pub verbose: bool,
    pub positional: Vec<String>,
}

pub(crate) fn usage() -> &'static str {
    "Usage: orb <graph|ancestors|stats> [--verbose] [<class-name>...]"
}

pub(crate) fn parse_args(argv: impl IntoIterator<Item = String>) -> Result<CliArgs, String> {
    let mut argv = argv.into_iter();
    let cmd = argv.next().ok_or_else(|| usage().to_string())?;

    let mut verbose = false;
    let mut positional: Vec<String> = Vec::new();

    for a in argv {
        if a == "--verbose" {
            verbose = true;
        } else if a.starts_with("--") {
            return Err(format!("Unknown option: {a}"));
        } else {
            positional.push(a);
        }
    }

    Ok(CliArgs {
        cmd,
        verbose,
        positional,
    })
}
