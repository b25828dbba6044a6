use std::env;
use std::fs;
use std::process;

use bytecode::{DisasmOptions, Grammar, OpDumper, RuleRegistry};
use common::debug::create_logger;
use common::log;
use trace::{select_tracer, TraceEvent, Tracer, TracerSpec, Variables};

#[derive(Debug, Default, PartialEq)]
struct Options {
    detailed: bool,
    raw: bool,
    out: Option<String>,
    trace: Option<String>,
    input: Option<String>,
    file: Option<String>,
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let options = match parse_args(&args[1..]) {
        Ok(Some(options)) => options,
        Ok(None) => {
            print_usage();
            return;
        }
        Err(msg) => {
            eprintln!("{}", msg);
            print_usage();
            process::exit(1);
        }
    };

    if options.trace.is_some() {
        run_trace_command(&options);
    } else {
        run_list_command(&options);
    }
}

fn print_usage() {
    eprintln!("Usage: pegscope [options] <grammar.json>");
    eprintln!("       pegscope --trace <tracer> [--input <file>] <events.json>");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --detailed               Show raw opcode and argument values");
    eprintln!("  --raw                    Bannered listing with raw opcodes per rule");
    eprintln!("  --out <file>             Write the listing to a file");
    eprintln!("  --trace <tracer>         Replay events through default, detailed or peggy");
    eprintln!("  --input <file>           Parsed input, shown by the detailed tracer");
    eprintln!("  --help, -h               Show this help message");
}

/// `Ok(None)` means help was requested.
fn parse_args(args: &[String]) -> Result<Option<Options>, String> {
    let mut options = Options::default();
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => return Ok(None),
            "--detailed" => options.detailed = true,
            "--raw" => options.raw = true,
            flag @ ("--out" | "--trace" | "--input") => {
                let value = match args.get(i + 1) {
                    Some(v) => v.clone(),
                    None => return Err(format!("Error: {} requires a value", flag)),
                };
                match flag {
                    "--out" => options.out = Some(value),
                    "--trace" => options.trace = Some(value),
                    _ => options.input = Some(value),
                }
                i += 1;
            }
            arg if !arg.starts_with('-') => {
                if options.file.is_none() {
                    options.file = Some(arg.to_string());
                }
            }
            arg => return Err(format!("Unknown option: {}", arg)),
        }
        i += 1;
    }

    if options.file.is_none() {
        return Err("Error: no input file".to_string());
    }
    Ok(Some(options))
}

fn read_file(path: &str) -> String {
    match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading {}: {}", path, e);
            process::exit(1);
        }
    }
}

fn run_list_command(options: &Options) {
    let path = options.file.as_deref().unwrap_or_default();
    let source = read_file(path);

    let grammar = match Grammar::from_json(&source) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("{}: {}", path, e);
            process::exit(1);
        }
    };
    let registry = match grammar.registry(DisasmOptions { detailed: options.detailed }) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{}: {}", path, e);
            process::exit(1);
        }
    };

    let written = match (&options.out, options.raw) {
        (Some(out), false) => registry.write_to(out).map_err(|e| e.to_string()),
        (Some(out), true) => fs::write(out, raw_listing(&registry)).map_err(|e| e.to_string()),
        (None, false) => {
            println!("{}", registry.render());
            Ok(())
        }
        (None, true) => {
            println!("{}", raw_listing(&registry));
            Ok(())
        }
    };
    if let Err(e) = written {
        eprintln!("Error writing {}: {}", options.out.as_deref().unwrap_or_default(), e);
        process::exit(1);
    }
}

/// Every rule in a banner, followed by its raw opcodes.
fn raw_listing(registry: &RuleRegistry) -> String {
    let mut sections = Vec::new();
    for (name, stream) in registry.iter() {
        let lines: Vec<String> =
            registry.disassembler().decode(stream).iter().map(ToString::to_string).collect();
        let mut dumper = OpDumper::new(name);
        dumper.out_code(&lines, Some(name));
        dumper.inc_level();
        dumper.out_bytecodes(stream);
        dumper.dec_level();
        sections.push(dumper.contents());
    }
    sections.join("\n\n")
}

fn run_trace_command(options: &Options) {
    let log = create_logger("cli");
    let path = options.file.as_deref().unwrap_or_default();
    let source = read_file(path);

    let events: Vec<TraceEvent> = match serde_json::from_str(&source) {
        Ok(events) => events,
        Err(e) => {
            eprintln!("{}: {}", path, e);
            process::exit(1);
        }
    };
    let input = options.input.as_deref().map(read_file).unwrap_or_default();

    let spec = options.trace.clone().map(TracerSpec::from);
    let mut tracer = select_tracer(spec, &input, Variables::new());
    if tracer.is_host_builtin() {
        eprintln!("The peggy tracer runs inside the host parser; nothing to replay");
        return;
    }

    log!(log, "replaying {} events from {}", events.len(), path);
    for event in &events {
        tracer.trace(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_list_options() {
        let options = parse_args(&args(&["--detailed", "--out", "out.txt", "g.json"]))
            .unwrap()
            .unwrap();
        assert!(options.detailed);
        assert!(!options.raw);
        assert_eq!(options.out.as_deref(), Some("out.txt"));
        assert_eq!(options.file.as_deref(), Some("g.json"));
    }

    #[test]
    fn test_parse_trace_options() {
        let options = parse_args(&args(&["--trace", "detailed", "--input", "in.txt", "ev.json"]))
            .unwrap()
            .unwrap();
        assert_eq!(options.trace.as_deref(), Some("detailed"));
        assert_eq!(options.input.as_deref(), Some("in.txt"));
        assert_eq!(options.file.as_deref(), Some("ev.json"));
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(&args(&["--out"])).is_err());
        assert!(parse_args(&args(&["--bogus", "g.json"])).is_err());
        assert!(parse_args(&args(&[])).is_err());
        assert_eq!(parse_args(&args(&["-h"])), Ok(None));
    }

    #[test]
    fn test_raw_listing() {
        let grammar =
            Grammar::from_json(r#"{ "rules": [{ "name": "start", "bytecode": [6] }] }"#).unwrap();
        let registry = grammar.registry(DisasmOptions::default()).unwrap();
        let listing = raw_listing(&registry);
        let lines: Vec<&str> = listing.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("  start  "));
        assert_eq!(lines[1], "POP");
        assert_eq!(lines[2], "-".repeat(34));
        assert_eq!(lines[3], "  OPCODES: 6");
    }
}
