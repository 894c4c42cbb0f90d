use std::env;
use std::error::Error;
use std::fs;
use std::io::{self, Read};

use log::info;
use processor::{compare, format_comparison, format_result, simulate};
use scheduler::{parse_table, Algorithm};
use serde_json::json;

mod logger;

/// Output format selected with `OUTPUT`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Output {
    Text,
    Json,
}

struct Arguments {
    algorithm: Algorithm,
    compare: bool,
    output: Output,
    path: Option<String>,
}

fn arguments() -> Result<Arguments, Box<dyn Error>> {
    let algorithm = env::var("ALGORITHM")
        .unwrap_or(Algorithm::DynamicPriorityBoost.id().to_string())
        .parse::<Algorithm>()?;
    let compare = env::var("COMPARE").is_ok();
    let output = match env::var("OUTPUT").unwrap_or("text".to_string()).as_str() {
        "text" => Output::Text,
        "json" => Output::Json,
        other => return Err(format!("unknown OUTPUT \"{other}\", expected text or json").into()),
    };
    let path = env::args().nth(1);

    Ok(Arguments {
        algorithm,
        compare,
        output,
        path,
    })
}

fn read_table(path: Option<&str>) -> Result<String, io::Error> {
    match path {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut table = String::new();
            io::stdin().read_to_string(&mut table)?;
            Ok(table)
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    logger::init(env::var("LOG_LEVEL").ok().as_deref())?;

    let arguments = arguments()?;
    let specs = parse_table(&read_table(arguments.path.as_deref())?)?;
    info!("loaded {} processes", specs.len());

    if arguments.compare {
        let entries = compare(&specs);
        match arguments.output {
            Output::Text => print!("{}", format_comparison(&entries)),
            Output::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
        }
    } else {
        let result = simulate(arguments.algorithm, &specs);
        match arguments.output {
            Output::Text => print!("{}", format_result(&result)),
            Output::Json => {
                let output = json!({
                    "report": result.report(),
                    "timeline": result.segments(),
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests;
