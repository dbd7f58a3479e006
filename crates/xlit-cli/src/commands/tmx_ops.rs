use std::fs;
use std::path::Path;

use xlit_engine::xlit_core::settings::settings;
use xlit_engine::xlit_core::tmx::export_transliteration_as;
use xlit_engine::xlit_core::validate::InputValidator;
use xlit_engine::xlit_core::{Engine, MethodRegistry};

pub fn tmx(
    method_id: &str,
    input: &str,
    output_dir: &str,
    target_lang: Option<&str>,
    match_case: bool,
) {
    let source = die!(fs::read_to_string(input), "Error reading {input}: {}");
    let registry = MethodRegistry::global();
    let validated = die!(
        InputValidator::default().validate(registry, method_id, &source, false),
        "Error: {}"
    );
    let target = die!(
        Engine::new(registry).transliterate(method_id, &validated.text, match_case),
        "Error: {}"
    );
    let target_lang = target_lang.unwrap_or(settings().tmx.target_lang.as_str());
    let path = die!(
        export_transliteration_as(
            registry,
            method_id,
            &validated.text,
            &target,
            target_lang,
            Path::new(output_dir),
        ),
        "Error writing TMX: {}"
    );
    println!("{}", path.display());
}
