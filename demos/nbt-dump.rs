use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};

use clap::{App, Arg};
use env_logger::Env;
use flate2::read::{GzDecoder, ZlibDecoder};
use log::info;
use nbtree::{DeOpts, StringEncoding, Value};

//
// Dump an NBT file, or stdin, as an indented tree or as JSON. Gzip and zlib
// input is decompressed first.
//
// cargo run --example nbt-dump -- level.dat --json
//

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

fn open(path: Option<&str>) -> Result<Box<dyn Read>> {
    let input: Box<dyn Read> = match path {
        Some(path) => Box::new(File::open(path)?),
        None => Box::new(io::stdin()),
    };
    let mut input = BufReader::new(input);

    let magic = input.fill_buf()?;
    Ok(match magic.first() {
        Some(0x1f) => {
            info!("gzip compressed input");
            Box::new(GzDecoder::new(input))
        }
        Some(0x78) => {
            info!("zlib compressed input");
            Box::new(ZlibDecoder::new(input))
        }
        _ => Box::new(input),
    })
}

fn dump(name: &str, value: &Value, indent: usize) {
    match value {
        Value::Compound(c) => {
            println!("{:indent$}{}: {} entries", "", name, c.len(), indent = indent);
            for (k, v) in c {
                dump(k, v, indent + 4);
            }
        }
        Value::List(l) => {
            println!(
                "{:indent$}{}: {} {:?} elements",
                "",
                name,
                l.len(),
                l.element_tag(),
                indent = indent
            );
            for (i, v) in l.iter().enumerate() {
                dump(&i.to_string(), v, indent + 4);
            }
        }
        other => println!("{:indent$}{}: {:?}", "", name, other, indent = indent),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let matches = App::new("nbt-dump")
        .arg(
            Arg::with_name("file")
                .takes_value(true)
                .required(false)
                .help("NBT file to read, stdin if missing"),
        )
        .arg(
            Arg::with_name("json")
                .long("json")
                .takes_value(false)
                .help("print as JSON rather than a tree"),
        )
        .arg(
            Arg::with_name("java-strings")
                .long("java-strings")
                .takes_value(false)
                .help("strings are Java's modified UTF-8"),
        )
        .get_matches();

    let mut opts = DeOpts::new();
    if matches.is_present("java-strings") {
        opts = opts.string_encoding(StringEncoding::Cesu8);
    }

    let input = open(matches.value_of("file"))?;
    let root = nbtree::from_reader_with_opts(input, opts)?;

    if matches.is_present("json") {
        println!("{}", serde_json::to_string_pretty(&root)?);
    } else if let Value::Compound(wrapper) = &root {
        for (name, body) in wrapper {
            dump(name, body, 0);
        }
    }

    Ok(())
}
