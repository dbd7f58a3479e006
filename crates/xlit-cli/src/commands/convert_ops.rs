use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::process;

use serde::{Deserialize, Serialize};
use xlit_engine::xlit_core::validate::InputValidator;
use xlit_engine::xlit_core::{Engine, MethodRegistry, TransliterationRequest};

pub fn convert(method_id: &str, text: Option<&str>, match_case: bool, sanitize: bool) {
    let input = match text {
        Some(t) => t.to_string(),
        None => {
            let mut buf = String::new();
            die!(io::stdin().read_to_string(&mut buf), "Error reading stdin: {}");
            buf
        }
    };

    let validated = die!(
        InputValidator::default().validate(MethodRegistry::global(), method_id, &input, sanitize),
        "Error: {}"
    );
    for warning in &validated.warnings {
        eprintln!("warning: {warning}");
    }

    let out = die!(
        Engine::global().transliterate(method_id, &validated.text, match_case),
        "Error: {}"
    );
    print!("{out}");
    if !out.ends_with('\n') {
        println!();
    }
}

#[derive(Deserialize)]
struct BatchLine {
    method: String,
    text: String,
    #[serde(default)]
    match_case: bool,
}

#[derive(Serialize)]
#[serde(untagged)]
enum BatchOutput {
    Ok { text: String },
    Failed { error: String },
}

/// Read JSON lines of `{method, text, match_case}` and write one JSON result per line.
pub fn batch(file: &str, workers: Option<usize>) {
    let f = die!(fs::File::open(file), "Error opening {file}: {}");
    let mut requests = Vec::new();
    for (n, line) in io::BufReader::new(f).lines().enumerate() {
        let line = die!(line, "Error reading {file}: {}");
        if line.trim().is_empty() {
            continue;
        }
        let parsed: BatchLine = match serde_json::from_str(&line) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Error: line {}: {e}", n + 1);
                process::exit(1);
            }
        };
        requests.push(TransliterationRequest::new(
            parsed.method,
            parsed.text,
            parsed.match_case,
        ));
    }

    let engine = Engine::global();
    let results = match workers {
        Some(w) => engine.transliterate_batch_with_workers(&requests, w),
        None => engine.transliterate_batch(&requests),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut failed = 0usize;
    for result in results {
        let record = match result {
            Ok(text) => BatchOutput::Ok { text },
            Err(e) => {
                failed += 1;
                BatchOutput::Failed {
                    error: e.to_string(),
                }
            }
        };
        let line = die!(serde_json::to_string(&record), "Error: {}");
        die!(writeln!(out, "{line}"), "Error writing output: {}");
    }
    eprintln!("{} requests, {failed} failed", requests.len());
}
