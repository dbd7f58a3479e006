//! Built-in rule tables, one TOML file per method, embedded at compile time.

use serde::Deserialize;


/// `(file stem, TOML source)` for every built-in method, in catalog order.
pub const BUILTIN: &[(&str, &str)] = &[
    ("az_cyr_en_ic", include_str!("az_cyr_en_ic.toml")),
    ("be_cyr_en_ic", include_str!("be_cyr_en_ic.toml")),
    ("bg_cyr_en_ic", include_str!("bg_cyr_en_ic.toml")),
    ("ka_en_ic", include_str!("ka_en_ic.toml")),
    ("kk_cyr_en_ic", include_str!("kk_cyr_en_ic.toml")),
    ("ky_cyr_en_ic", include_str!("ky_cyr_en_ic.toml")),
    ("mk_cyr_en_ic", include_str!("mk_cyr_en_ic.toml")),
    ("mn_cyr_en_mns", include_str!("mn_cyr_en_mns.toml")),
    ("ru_cyr_chinese_en", include_str!("ru_cyr_chinese_en.toml")),
    ("ru_cyr_en_ala_lc", include_str!("ru_cyr_en_ala_lc.toml")),
    ("ru_cyr_en_bgn", include_str!("ru_cyr_en_bgn.toml")),
    ("ru_cyr_en_gost_7_79_2000_system_b", include_str!("ru_cyr_en_gost_7_79_2000_system_b.toml")),
    ("ru_cyr_en_ic", include_str!("ru_cyr_en_ic.toml")),
    ("ru_cyr_en_iso_9", include_str!("ru_cyr_en_iso_9.toml")),
    ("ru_cyr_en_scientific", include_str!("ru_cyr_en_scientific.toml")),
    ("ru_cyr_japanese_en", include_str!("ru_cyr_japanese_en.toml")),
    ("sr_cyr_en_ic", include_str!("sr_cyr_en_ic.toml")),
    ("tg_cyr_en_ic", include_str!("tg_cyr_en_ic.toml")),
    ("tk_cyr_en_ic", include_str!("tk_cyr_en_ic.toml")),
    ("tt_cyr_en_ic", include_str!("tt_cyr_en_ic.toml")),
    ("ug_cyr_en_ic", include_str!("ug_cyr_en_ic.toml")),
    ("uk_cyr_en_ic", include_str!("uk_cyr_en_ic.toml")),
    ("uk_cyr_en_nat_standard", include_str!("uk_cyr_en_nat_standard.toml")),
    ("ukr_cyr_chinese_academic_en", include_str!("ukr_cyr_chinese_academic_en.toml")),
    ("uz_cyr_en_ic", include_str!("uz_cyr_en_ic.toml")),
];

#[derive(Deserialize)]
struct TableId {
    id: String,
}

/// TOML source of the built-in table for `method_id`.
pub fn builtin_toml(method_id: &str) -> Option<&'static str> {
    BUILTIN
        .iter()
        .map(|&(_, src)| src)
        .find(|src| toml::from_str::<TableId>(src).is_ok_and(|t| t.id == method_id))
}
