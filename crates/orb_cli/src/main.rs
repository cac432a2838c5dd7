use std::io::{IsTerminal, Write};

use orb_runtime::{Heap, ObjectId, Runtime, RuntimeConfig};
use tracing_subscriber::EnvFilter;

mod args;

fn main() {
    let cli = match args::parse_args(std::env::args().skip(1)) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };
    init_tracing(cli.verbose);

    let config = RuntimeConfig::from_env();
    tracing::debug!(?config, "starting runtime");
    let rt = match Runtime::with_config(config) {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("bootstrap failed: {e}");
            std::process::exit(1);
        }
    };

    let mut out = std::io::stdout().lock();
    let written = match cli.cmd.as_str() {
        "graph" => print_graph(&mut out, &rt),
        "ancestors" => {
            let mut targets = Vec::new();
            for name in &cli.positional {
                match builtin_by_name(&rt, name) {
                    Some(id) => targets.push(id),
                    None => {
                        eprintln!("Unknown class: {name}");
                        std::process::exit(1);
                    }
                }
            }
            if targets.is_empty() {
                targets.extend([rt.anchor(), rt.root(), rt.object_class(), rt.module_class()]);
            }
            print_ancestors(&mut out, &rt, &targets)
        }
        "stats" => {
            let stats = rt.gc(&[]);
            tracing::debug!(live = stats.live, freed = stats.freed, "collected before stats");
            writeln!(out, "{}", rt.memory_stats())
        }
        _ => {
            eprintln!("Unknown command: {}", cli.cmd);
            eprintln!("{}", args::usage());
            std::process::exit(2);
        }
    };

    if let Err(e) = written {
        if e.kind() == std::io::ErrorKind::BrokenPipe {
            return;
        }
        eprintln!("stdout error: {e}");
        std::process::exit(2);
    }
}

/// `ORB_LOG` picks the filter; `--verbose` forces debug.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("ORB_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();
}

fn builtin_by_name(rt: &Runtime, name: &str) -> Option<ObjectId> {
    [rt.anchor(), rt.root(), rt.object_class(), rt.module_class()]
        .into_iter()
        .find(|&id| rt.name_of(id).ok().flatten().as_deref() == Some(name))
}

fn print_graph(out: &mut impl Write, rt: &Runtime) -> std::io::Result<()> {
    let guard = rt.gc_lock().structure();
    let heap = guard.heap();
    for (id, record) in heap.classes() {
        let mut flags = Vec::new();
        if record.is_singleton() {
            flags.push("singleton");
        }
        if !record.is_initialized() {
            flags.push("uninitialized");
        }
        writeln!(
            out,
            "{id} {} super={} class={} singleton={}{}{}",
            display(&heap, Some(id)),
            display(&heap, record.superclass()),
            display(&heap, Some(record.klass())),
            display(&heap, record.singleton_class()),
            if flags.is_empty() { "" } else { " " },
            flags.join(","),
        )?;
    }
    Ok(())
}

fn display(heap: &Heap, id: Option<ObjectId>) -> String {
    match id {
        Some(id) => heap.display_name(id).unwrap_or_else(|e| format!("<{e}>")),
        None => "-".to_string(),
    }
}

fn print_ancestors(out: &mut impl Write, rt: &Runtime, targets: &[ObjectId]) -> std::io::Result<()> {
    for &class in targets {
        let chain = match rt.ancestors(class) {
            Ok(chain) => chain,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        };
        let names: Vec<String> = chain
            .into_iter()
            .map(|id| rt.display_name(id).unwrap_or_else(|e| format!("<{e}>")))
            .collect();
        writeln!(out, "{}", names.join(" < "))?;
    }
    Ok(())
}
