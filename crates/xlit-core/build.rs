use std::fs;
use std::path::Path;

fn main() {
    // Validate embedded TOML files at compile time.
    validate_toml(
        "src/default_settings.toml",
        include_str!("src/default_settings.toml"),
    );

    println!("cargo:rerun-if-changed=src/methods");
    let dir = Path::new("src/methods");
    let entries = fs::read_dir(dir).unwrap_or_else(|e| panic!("{}: {e}", dir.display()));
    for entry in entries {
        let path = entry.expect("readable methods directory").path();
        if path.extension().and_then(|e| e.to_str()) != Some("toml") {
            continue;
        }
        let content = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("{}: {e}", path.display()));
        validate_toml(&path.display().to_string(), &content);
        validate_rule_table(&path.display().to_string(), &content);
    }
}

fn validate_toml(path: &str, content: &str) {
    if content.parse::<toml::Value>().is_err() {
        panic!("{path} contains invalid TOML");
    }
}

fn validate_rule_table(path: &str, content: &str) {
    let Ok(value) = content.parse::<toml::Value>() else {
        return;
    };
    for key in ["id", "display_name", "language", "language_code", "alphabet"] {
        if value.get(key).and_then(|v| v.as_str()).is_none() {
            panic!("{path} is missing string key `{key}`");
        }
    }
    if value.get("mappings").and_then(|v| v.as_table()).is_none() {
        panic!("{path} is missing the [mappings] table");
    }
}
