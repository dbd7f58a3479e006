//! TMX 1.4 export of source/transliteration pairs, one translation unit per line.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use time::OffsetDateTime;
use tracing::info;

use crate::registry::MethodRegistry;
use crate::settings::{settings, TmxSettings};

const TMX_VERSION: &str = "1.4";

#[derive(Debug, thiserror::Error)]
pub enum TmxError {
    #[error("source text is empty")]
    EmptySource,
    #[error("target text is empty")]
    EmptyTarget,
    #[error("unknown transliteration method: {0}")]
    UnknownMethod(String),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TmxUnit {
    pub tuid: String,
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone)]
pub struct TmxDocument {
    pub source_lang: String,
    pub target_lang: String,
    /// Written as a header note.
    pub method: Option<String>,
    pub created: OffsetDateTime,
    pub units: Vec<TmxUnit>,
}

impl TmxDocument {
    /// Pair the lines of both texts. Line `n` (1-based) becomes unit `tu_n`;
    /// the shorter text is padded with empty lines and pairs that are blank
    /// on both sides are skipped.
    pub fn from_texts(
        source_text: &str,
        target_text: &str,
        source_lang: &str,
        target_lang: &str,
        method: Option<&str>,
    ) -> Self {
        let source: Vec<&str> = source_text.trim().split('\n').collect();
        let target: Vec<&str> = target_text.trim().split('\n').collect();
        let rows = source.len().max(target.len());

        let units = (0..rows)
            .filter_map(|i| {
                let src = source.get(i).map_or("", |s| s.trim());
                let tgt = target.get(i).map_or("", |s| s.trim());
                if src.is_empty() && tgt.is_empty() {
                    return None;
                }
                Some(TmxUnit {
                    tuid: format!("tu_{}", i + 1),
                    source: src.to_string(),
                    target: tgt.to_string(),
                })
            })
            .collect();

        Self {
            source_lang: source_lang.to_string(),
            target_lang: target_lang.to_string(),
            method: method.filter(|m| !m.is_empty()).map(str::to_string),
            created: OffsetDateTime::now_utc(),
            units,
        }
    }

    pub fn write<W: Write>(&self, out: W, cfg: &TmxSettings) -> Result<(), TmxError> {
        let mut xml = Writer::new_with_indent(out, b' ', 2);
        xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        xml.write_event(Event::DocType(BytesText::from_escaped(
            r#"tmx SYSTEM "tmx14.dtd""#,
        )))?;

        let mut root = BytesStart::new("tmx");
        root.push_attribute(("version", TMX_VERSION));
        xml.write_event(Event::Start(root))?;

        let created = creation_date(self.created);
        let mut header = BytesStart::new("header");
        header.push_attribute(("creationtool", cfg.creation_tool.as_str()));
        header.push_attribute(("creationtoolversion", cfg.creation_tool_version.as_str()));
        header.push_attribute(("datatype", cfg.datatype.as_str()));
        header.push_attribute(("segtype", cfg.segtype.as_str()));
        header.push_attribute(("adminlang", cfg.admin_lang.as_str()));
        header.push_attribute(("srclang", self.source_lang.as_str()));
        header.push_attribute(("o-tmf", cfg.creation_tool.as_str()));
        header.push_attribute(("creationdate", created.as_str()));
        match &self.method {
            Some(method) => {
                xml.write_event(Event::Start(header))?;
                let note = format!("Transliteration method: {method}");
                write_text_element(&mut xml, "note", &note)?;
                xml.write_event(Event::End(BytesEnd::new("header")))?;
            }
            None => xml.write_event(Event::Empty(header))?,
        }

        xml.write_event(Event::Start(BytesStart::new("body")))?;
        for unit in &self.units {
            let mut tu = BytesStart::new("tu");
            tu.push_attribute(("tuid", unit.tuid.as_str()));
            xml.write_event(Event::Start(tu))?;
            write_variant(&mut xml, &self.source_lang, &unit.source)?;
            write_variant(&mut xml, &self.target_lang, &unit.target)?;
            xml.write_event(Event::End(BytesEnd::new("tu")))?;
        }
        xml.write_event(Event::End(BytesEnd::new("body")))?;
        xml.write_event(Event::End(BytesEnd::new("tmx")))?;
        xml.get_mut().write_all(b"\n")?;
        Ok(())
    }

    pub fn to_xml_string(&self, cfg: &TmxSettings) -> Result<String, TmxError> {
        let mut buf = Vec::new();
        self.write(&mut buf, cfg)?;
        // The writer only emits UTF-8.
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Atomic write: write to .tmp then rename.
    pub fn save(&self, path: &Path, cfg: &TmxSettings) -> Result<(), TmxError> {
        let tmp = path.with_extension("tmp");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = io::BufWriter::new(fs::File::create(&tmp)?);
        self.write(&mut file, cfg)?;
        file.flush()?;
        drop(file);
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

fn write_text_element<W: Write>(xml: &mut Writer<W>, name: &str, text: &str) -> Result<(), TmxError> {
    xml.write_event(Event::Start(BytesStart::new(name)))?;
    xml.write_event(Event::Text(BytesText::new(text)))?;
    xml.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn write_variant<W: Write>(xml: &mut Writer<W>, lang: &str, seg: &str) -> Result<(), TmxError> {
    let mut tuv = BytesStart::new("tuv");
    tuv.push_attribute(("xml:lang", lang));
    xml.write_event(Event::Start(tuv))?;
    write_text_element(xml, "seg", seg)?;
    xml.write_event(Event::End(BytesEnd::new("tuv")))?;
    Ok(())
}

/// TMX `creationdate`: `YYYYMMDDTHHMMSSZ` in UTC.
pub fn creation_date(at: OffsetDateTime) -> String {
    let utc = at.to_offset(time::UtcOffset::UTC);
    format!(
        "{:04}{:02}{:02}T{:02}{:02}{:02}Z",
        utc.year(),
        utc.month() as u8,
        utc.day(),
        utc.hour(),
        utc.minute(),
        utc.second()
    )
}

/// `transliteration_<method>_<YYYYMMDD_HHMMSS>.tmx`, keeping only
/// alphanumerics, `_` and `-` from the method id (spaces become `_`).
pub fn default_file_name(method_id: &str, at: OffsetDateTime) -> String {
    let kept: String = method_id
        .chars()
        .filter(|&c| c.is_alphanumeric() || matches!(c, ' ' | '_' | '-'))
        .collect();
    let safe = kept.trim().replace(' ', "_");
    format!(
        "transliteration_{safe}_{:04}{:02}{:02}_{:02}{:02}{:02}.tmx",
        at.year(),
        at.month() as u8,
        at.day(),
        at.hour(),
        at.minute(),
        at.second()
    )
}

/// Build a TMX document for one transliteration and save it under
/// `output_dir` with the default file name. Returns the written path.
pub fn export_transliteration(
    registry: &MethodRegistry,
    method_id: &str,
    source_text: &str,
    target_text: &str,
    output_dir: &Path,
) -> Result<PathBuf, TmxError> {
    let target_lang = &settings().tmx.target_lang;
    export_transliteration_as(
        registry,
        method_id,
        source_text,
        target_text,
        target_lang,
        output_dir,
    )
}

/// Like [`export_transliteration`] with an explicit target language code.
pub fn export_transliteration_as(
    registry: &MethodRegistry,
    method_id: &str,
    source_text: &str,
    target_text: &str,
    target_lang: &str,
    output_dir: &Path,
) -> Result<PathBuf, TmxError> {
    if source_text.trim().is_empty() {
        return Err(TmxError::EmptySource);
    }
    if target_text.trim().is_empty() {
        return Err(TmxError::EmptyTarget);
    }
    let source_lang = registry
        .language_code(method_id)
        .ok_or_else(|| TmxError::UnknownMethod(method_id.to_string()))?;

    let doc = TmxDocument::from_texts(
        source_text,
        target_text,
        source_lang,
        target_lang,
        Some(method_id),
    );
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    let path = output_dir.join(default_file_name(method_id, now));
    doc.save(&path, &settings().tmx)?;
    info!(path = %path.display(), units = doc.units.len(), "TMX exported");
    Ok(path)
}
