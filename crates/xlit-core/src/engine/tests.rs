use proptest::prelude::*;

use super::*;

const RU_IC: &str = "Russian (Cyrillic)-->English (IC)";

fn ru(text: &str, match_case: bool) -> String {
    transliterate(RU_IC, text, match_case).unwrap()
}

// ---------------------------------------------------------------------------
// Fixed cases
// ---------------------------------------------------------------------------

#[test]
fn longest_match() {
    assert_eq!(ru("Щука", false), "Shchuka");
}

#[test]
fn case_preservation() {
    assert_eq!(ru("МОСКВА", true), "MOSKVA");
    assert_eq!(ru("Москва", true), "Moskva");
    assert_eq!(ru("москва", true), "moskva");
}

#[test]
fn declared_casing_without_match_case() {
    assert_eq!(ru("МОСКВА", false), "MOSKVA");
    assert_eq!(ru("ЩУКА", false), "ShchUKA");
    assert_eq!(ru("ЩУКА", true), "SHCHUKA");
}

#[test]
fn mixed_case_words() {
    assert_eq!(
        ru("ЧЕМЕЗОВ ШАРАПОВА ШАРАпова ЦЕЛИТЕЛЬ ЦЕЛИтЕЛЬ ЩЕЦИН", true),
        "CHEMEZOV SHARAPOVA ShARApova TSELITEL TsELItEL SHCHETSIN"
    );
}

#[test]
fn pass_through_non_source_text() {
    assert_eq!(ru("Hello, 123!", true), "Hello, 123!");
    assert_eq!(ru("", false), "");
    assert_eq!(ru("Москва, 2024!", false), "Moskva, 2024!");
}

#[test]
fn unknown_method() {
    let err = transliterate("not-a-method", "x", false).unwrap_err();
    assert_eq!(err, TransliterationError::UnknownMethod("not-a-method".into()));
}

#[test]
fn size_ceiling() {
    let at_limit = "а".repeat(MAX_INPUT_CHARS);
    let out = transliterate(RU_IC, &at_limit, false).unwrap();
    assert_eq!(out.len(), MAX_INPUT_CHARS);

    let over = "а".repeat(MAX_INPUT_CHARS + 1);
    let err = transliterate(RU_IC, &over, false).unwrap_err();
    assert_eq!(
        err,
        TransliterationError::InputTooLarge {
            len: MAX_INPUT_CHARS + 1,
            max: MAX_INPUT_CHARS
        }
    );
}

#[test]
fn ascii_at_limit_is_accepted() {
    // Byte length equals char length here, so the fast path decides.
    let text = "x".repeat(MAX_INPUT_CHARS);
    assert_eq!(transliterate(RU_IC, &text, false).unwrap(), text);
}

#[test]
fn unknown_method_checked_before_size() {
    let over = "а".repeat(MAX_INPUT_CHARS + 1);
    let err = transliterate("not-a-method", &over, false).unwrap_err();
    assert!(matches!(err, TransliterationError::UnknownMethod(_)));
}

#[test]
fn belarusian_short_u() {
    let out = transliterate("Belarussian (Cyrillic)-->English (IC)", "ў Ў", false).unwrap();
    assert_eq!(out, "w W");
}

#[test]
fn serbian_special_letters() {
    let out = transliterate("Serbian (Cyrillic)-->English (IC)", "љ њ ћ џ ђ Љ", false).unwrap();
    assert_eq!(out, "lj nj c dz dj Lj");
}

#[test]
fn word_start_context() {
    assert_eq!(ru("ель", false), "yel");
    assert_eq!(ru("поезд", false), "poyezd");
    assert_eq!(ru("лес", false), "les");
}

#[test]
fn right_context_rules() {
    let gost = "Russian (Cyrillic)-->English (Gost 7.79-2000b)";
    assert_eq!(transliterate(gost, "Цирк цапля", false).unwrap(), "Cirk czaplya");
}

#[test]
fn bulgarian_word_final_regex() {
    let bg = "Bulgarian (Cyrillic)-->English (IC)";
    assert_eq!(transliterate(bg, "България", false).unwrap(), "Balgaria");
    assert_eq!(transliterate(bg, "ия ИЯ", false).unwrap(), "ia IA");
}

#[test]
fn folded_tables_always_restore_case() {
    let iso = "Russian (Cyrillic)-->English (ISO-9)";
    assert_eq!(transliterate(iso, "ЩУКА", false).unwrap(), "ŜUKA");
    assert_eq!(transliterate(iso, "Россия", false).unwrap(), "Rossiâ");
    let zh = "Russian (Chinese Cyrillic)-->English (Pinyin)";
    assert_eq!(transliterate(zh, "Си Цзиньпин", false).unwrap(), "Xi Jinping");
    assert_eq!(transliterate(zh, "Цюаньчжоу", false).unwrap(), "Quanzhou");
    let ja = "Russian (Japanese Cyrillic)-->English (Hepburn)";
    assert_eq!(transliterate(ja, "Фудзияма", false).unwrap(), "Fujiyama");
    assert_eq!(transliterate(ja, "Хоккайдо", false).unwrap(), "Hokkaido");
}

#[test]
fn georgian_title_case_output() {
    let ka = "Georgian (Cyrillic)-->English (IC)";
    assert_eq!(transliterate(ka, "თბილისი", false).unwrap(), "Tbilisi");
    assert_eq!(transliterate(ka, "ა ბ", false).unwrap(), "A B");
    // Mtavruli capitals fold onto the Mkhedruli keys.
    assert_eq!(transliterate(ka, "ᲗᲑᲘᲚᲘᲡᲘ", false).unwrap(), "Tbilisi");
    assert_eq!(transliterate(ka, "Თბილისი", true).unwrap(), "Tbilisi");
}

#[test]
fn ukrainian_national_standard() {
    let uk = "Ukrainian (Cyrillic)-->English (National Standard)";
    assert_eq!(
        transliterate(uk, "Згорани Юрій Ярмолюк", false).unwrap(),
        "Zghorany Yurii Yarmoliuk"
    );
}

#[test]
fn engine_over_private_registry() {
    let registry = MethodRegistry::builtin();
    let engine = Engine::new(&registry);
    assert_eq!(engine.list_methods().len(), 25);
    assert_eq!(engine.transliterate(RU_IC, "Щука", false).unwrap(), "Shchuka");
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

fn arb_method_id() -> impl Strategy<Value = String> {
    let ids: Vec<String> = MethodRegistry::global()
        .list_methods()
        .into_iter()
        .map(|d| d.id)
        .collect();
    prop::sample::select(ids)
}

/// Mix of Cyrillic letters, Latin letters, digits, and punctuation.
fn arb_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            4 => prop::char::range('А', 'я'),
            1 => prop::sample::select(vec!['ё', 'Ё', 'ў', 'і', 'ї', 'є', 'ґ', 'ә', 'ң', 'ө', 'ү', 'ҳ', 'љ', 'ђ']),
            2 => prop::char::range('a', 'z'),
            1 => prop::sample::select(vec![' ', ',', '.', '-', '\n', '1', '7', '\'']),
        ],
        0..40,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

/// Latin letters, digits, and punctuation only.
fn arb_latin_text() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 ,.!?;:()\\-]{0,60}"
}

proptest! {
    #[test]
    fn deterministic(id in arb_method_id(), text in arb_text(), match_case in any::<bool>()) {
        let a = transliterate(&id, &text, match_case).unwrap();
        let b = transliterate(&id, &text, match_case).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn latin_passes_through(id in arb_method_id(), text in arb_latin_text(), match_case in any::<bool>()) {
        let method = MethodRegistry::global().resolve(&id).unwrap();
        prop_assume!(!method.title_case_output);
        prop_assert_eq!(transliterate(&id, &text, match_case).unwrap(), text);
    }

    #[test]
    fn idempotent_on_output(text in arb_text(), match_case in any::<bool>()) {
        let once = transliterate(RU_IC, &text, match_case).unwrap();
        let twice = transliterate(RU_IC, &once, match_case).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn no_source_chars_left(text in prop::collection::vec(prop::char::range('А', 'я'), 0..30)) {
        let text: String = text.into_iter().collect();
        let out = transliterate(RU_IC, &text, false).unwrap();
        prop_assert!(out.chars().all(|c| c.is_ascii()), "{}", out);
    }
}
