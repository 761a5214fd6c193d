use clap::Parser;
use std::io::{self, Read};

use anyhow::{Result, bail};
use phf::{Map, phf_map};
use ropey::Rope;
use tracing::info;
use tracing_subscriber::EnvFilter;

use charmatch::{CharSource, Pattern, patterns};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Text to match; read from stdin when omitted
    #[arg(value_name = "TEXT")]
    text: Option<String>,

    /// Named pattern from the built-in library
    #[arg(short = 'p', long, value_name = "NAME", conflicts_with_all = ["regex", "compile"])]
    pattern: Option<String>,

    /// Regular expression handed to the host regex engine
    #[arg(short = 'r', long, value_name = "EXPR", conflicts_with = "compile")]
    regex: Option<String>,

    /// Regular expression translated into combinators
    #[arg(short = 'c', long, value_name = "EXPR")]
    compile: Option<String>,

    /// Character offset to match at
    #[arg(short = 'b', long, default_value_t = 0)]
    begin: usize,

    /// Scan left to right, printing every non-empty match
    #[arg(short = 's', long)]
    scan: bool,

    /// Print the pattern before matching
    #[arg(short = 'd', long)]
    describe: bool,

    /// List the named patterns and exit
    #[arg(short = 'l', long)]
    list: bool,
}

type MakePattern = fn() -> Pattern;

/// Library patterns by name. Please keep names sorted alphabetically.
const NAMED_PATTERNS: Map<&'static str, MakePattern> = phf_map! {
    "dec-integer" => patterns::dec_integer as MakePattern,
    "decimal" => patterns::decimal as MakePattern,
    "double-quoted-string" => patterns::double_quoted_string as MakePattern,
    "escaped-char" => patterns::escaped_char as MakePattern,
    "fraction" => patterns::fraction as MakePattern,
    "hex-integer" => patterns::hex_integer as MakePattern,
    "integer" => patterns::integer as MakePattern,
    "oct-integer" => patterns::oct_integer as MakePattern,
    "regexp-literal" => patterns::regexp_literal as MakePattern,
    "regexp-modifiers" => patterns::regexp_modifiers as MakePattern,
    "scientific-notation" => patterns::scientific_notation as MakePattern,
    "single-quoted-string" => patterns::single_quoted_string as MakePattern,
    "strict-decimal" => patterns::strict_decimal as MakePattern,
    "word" => patterns::word as MakePattern,
};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    if args.list {
        let mut names: Vec<_> = NAMED_PATTERNS.keys().collect();
        names.sort();
        for name in names {
            println!("{name}");
        }
        return Ok(());
    }

    let pattern = build_pattern(&args)?;
    if args.describe {
        println!("{pattern}");
    }

    let text = match args.text {
        Some(text) => text,
        None => {
            let mut stdin_contents = String::new();
            io::stdin().read_to_string(&mut stdin_contents)?;
            stdin_contents
        }
    };
    let rope = Rope::from_str(&text);
    let end = rope.char_count();
    if args.begin > end {
        bail!("Offset {} is past the end of the text ({} chars).", args.begin, end);
    }

    if args.scan {
        scan(&pattern, &rope, args.begin, end);
    } else {
        match pattern.match_at(&rope, args.begin, end) {
            Some(len) => {
                let matched = rope.collect_range(args.begin, args.begin + len);
                println!("match: {len} {matched:?}");
            }
            None => println!("mismatch"),
        }
    }
    Ok(())
}

fn build_pattern(args: &Args) -> Result<Pattern> {
    if let Some(name) = &args.pattern {
        let Some(make) = NAMED_PATTERNS.get(name.as_str()) else {
            bail!("Unknown pattern '{}'. Use --list to see the names.", name);
        };
        return Ok(make());
    }
    if let Some(expr) = &args.regex {
        return Ok(patterns::regex(expr)?);
    }
    if let Some(expr) = &args.compile {
        return Ok(patterns::compile(expr)?);
    }
    bail!("One of --pattern, --regex or --compile is required.");
}

/// Report each non-empty match, skipping one character wherever the
/// pattern mismatches or matches nothing.
fn scan(pattern: &Pattern, rope: &Rope, begin: usize, end: usize) {
    let mut pos = begin;
    let mut found = 0usize;
    while pos < end {
        match pattern.match_at(rope, pos, end) {
            Some(len) if len > 0 => {
                println!("{}..{} {:?}", pos, pos + len, rope.collect_range(pos, pos + len));
                found += 1;
                pos += len;
            }
            _ => pos += 1,
        }
    }
    info!(found, "scan finished");
}
