//! Interactive repair of existing work documents
//!
//! Each document is checked against the field schema: unknown fields can be
//! renamed or deleted, missing required fields are asked for, and every
//! recognized value is normalized, re-asking until it is acceptable. A
//! document is rewritten only when its fields end up different.

use crate::config::CatalogConfig;
use crate::core::{FieldValue, FrontMatter, WorkDocument};
use crate::error::Result;
use crate::io::{read_document, resolve_work_files, write_atomic};
use crate::prompt::{AskWeekday, ChoicePrompt, Prompt};
use crate::schema::{
    self, normalize_slug, parse_date, parse_sidebar_position, FieldKind, FieldSpec,
};
use chrono::NaiveDate;
use log::{debug, info};

const DELETE_KEYWORD: &str = "delete";

/// Counts for one validation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationSummary {
    /// Documents that parsed
    pub processed: usize,
    /// Documents rewritten
    pub updated: usize,
    /// Documents skipped because their header was malformed
    pub skipped: usize,
}

impl ValidationSummary {
    pub fn message(&self) -> String {
        format!("Processed {} work files.", self.processed)
    }
}

pub struct Validator<'a> {
    config: &'a CatalogConfig,
    today: NaiveDate,
}

impl<'a> Validator<'a> {
    pub fn new(config: &'a CatalogConfig) -> Self {
        Self::with_today(config, schema::today())
    }

    pub fn with_today(config: &'a CatalogConfig, today: NaiveDate) -> Self {
        Self { config, today }
    }

    /// Check every work document in sorted path order
    pub fn run<P, C>(&self, prompt: &mut P, chooser: &mut C) -> Result<ValidationSummary>
    where
        P: Prompt,
        C: ChoicePrompt + ?Sized,
    {
        let files = resolve_work_files(&self.config.works_dir, &self.config.index_document)?;
        let mut summary = ValidationSummary::default();

        for path in files {
            prompt.say("")?;
            prompt.say(&format!("Checking {}", self.config.display_path(&path)))?;

            let mut document = match read_document(&path) {
                Ok(document) => document,
                Err(e) if e.is_recoverable() => {
                    prompt.say(&format!("Error: {}", e))?;
                    summary.skipped += 1;
                    continue;
                }
                Err(e) => return Err(e),
            };

            if self.check_document(&mut document, prompt, chooser)? {
                write_atomic(&path, document.render())?;
                info!("Rewrote {}", path.display());
                prompt.say("Updated file.")?;
                summary.updated += 1;
            } else {
                prompt.say("No changes needed.")?;
            }
            summary.processed += 1;
        }

        prompt.say("")?;
        prompt.say(&summary.message())?;
        Ok(summary)
    }

    /// Reconcile one document with the schema; `true` when its fields changed
    pub fn check_document<P, C>(
        &self,
        document: &mut WorkDocument,
        prompt: &mut P,
        chooser: &mut C,
    ) -> Result<bool>
    where
        P: Prompt,
        C: ChoicePrompt + ?Sized,
    {
        let original = document.front_matter().clone();
        let mut fields = original.clone();

        self.map_unknown_fields(&mut fields, prompt)?;

        let shown = self.config.display_path(document.path());
        for spec in schema::required_fields() {
            let present = fields.get(spec.key).is_some_and(|v| !v.is_blank());
            if !present {
                prompt.say(&format!(
                    "Missing required field '{}' in {}.",
                    spec.key, shown
                ))?;
                let value = self.ask_value(spec, prompt, chooser)?;
                fields.insert(spec.key, value);
            }
        }

        let keys: Vec<String> = fields.keys().map(str::to_string).collect();
        for key in keys {
            let Some(spec) = schema::field(&key) else {
                continue;
            };
            self.normalize_field(spec, &mut fields, prompt, chooser)?;
        }

        let changed = fields != original;
        debug!("{}: changed = {}", shown, changed);
        if changed {
            document.set_front_matter(fields);
        }
        Ok(changed)
    }

    fn map_unknown_fields<P: Prompt>(
        &self,
        fields: &mut FrontMatter,
        prompt: &mut P,
    ) -> Result<()> {
        let unknown: Vec<String> = fields
            .keys()
            .filter(|k| !schema::is_known_field(k))
            .map(str::to_string)
            .collect();
        if unknown.is_empty() {
            return Ok(());
        }
        let known = schema::canonical_order().join(", ");

        for key in unknown {
            prompt.say(&format!("Unrecognized field '{}'.", key))?;
            prompt.say(&format!("Known fields: {}", known))?;
            let target = prompt.ask(
                "Map this field to a known field (leave blank to keep as-is, 'delete' to remove): ",
            )?;

            if target.is_empty() {
                continue;
            }
            if target.eq_ignore_ascii_case(DELETE_KEYWORD) {
                fields.remove(&key);
                continue;
            }
            if !schema::is_known_field(&target) {
                prompt.say("Invalid target field; keeping original key.")?;
                continue;
            }
            if !fields.rename(&key, &target) {
                prompt.say(&format!(
                    "Target field '{}' already present; skipping mapping.",
                    target
                ))?;
            }
        }
        Ok(())
    }

    /// Normalize one present field, asking for a replacement until it passes
    fn normalize_field<P, C>(
        &self,
        spec: &FieldSpec,
        fields: &mut FrontMatter,
        prompt: &mut P,
        chooser: &mut C,
    ) -> Result<()>
    where
        P: Prompt,
        C: ChoicePrompt + ?Sized,
    {
        let Some(mut raw) = fields.get(spec.key).cloned() else {
            return Ok(());
        };

        loop {
            match spec.normalize(&raw, self.today, &mut AskWeekday(&mut *prompt)) {
                Ok(Some(value)) => {
                    fields.insert(spec.key, value);
                    return Ok(());
                }
                Ok(None) if spec.required => {
                    prompt.say(&format!("Field '{}' cannot be empty.", spec.key))?;
                }
                Ok(None) => {
                    fields.remove(spec.key);
                    return Ok(());
                }
                Err(e) if e.is_recoverable() => {
                    prompt.say(&format!(
                        "Invalid value for '{}' ({}): {}",
                        spec.key, raw, e
                    ))?;
                }
                Err(e) => return Err(e),
            }
            raw = self.ask_value(spec, prompt, chooser)?;
        }
    }

    /// Ask for a value suited to the field's kind
    fn ask_value<P, C>(
        &self,
        spec: &FieldSpec,
        prompt: &mut P,
        chooser: &mut C,
    ) -> Result<FieldValue>
    where
        P: Prompt,
        C: ChoicePrompt + ?Sized,
    {
        match spec.kind {
            FieldKind::Slug => loop {
                let answer = prompt
                    .ask("Suggested slug missing. Enter slug (must start with /works/): ")?;
                match normalize_slug(&answer) {
                    Ok(slug) => return Ok(FieldValue::Text(slug)),
                    Err(e) => prompt.say(&format!("Invalid slug: {}", e))?,
                }
            },
            FieldKind::Date => loop {
                let question = format!("{} (YYYY-MM-DD or keywords like 'today'): ", spec.key);
                let answer = prompt.ask(&question)?;
                match parse_date(&answer, self.today, &mut AskWeekday(&mut *prompt)) {
                    Ok(date) => return Ok(FieldValue::Text(date)),
                    Err(e) if e.is_recoverable() => {
                        prompt.say(&format!("Invalid date: {}", e))?
                    }
                    Err(e) => return Err(e),
                }
            },
            FieldKind::Integer => loop {
                let answer = prompt.ask(&format!("{} (integer): ", spec.key))?;
                match parse_sidebar_position(&answer) {
                    Ok(position) => return Ok(FieldValue::Int(position)),
                    Err(e) => prompt.say(&format!("Invalid number: {}", e))?,
                }
            },
            FieldKind::Choice {
                options,
                allow_blank,
            } => {
                let label = format!("Select {}", spec.label);
                let choice = chooser.choose(prompt, &label, options, allow_blank)?;
                Ok(FieldValue::Text(choice.unwrap_or_default()))
            }
            FieldKind::Text => loop {
                let answer = prompt.ask(&format!("{}: ", spec.label))?;
                if !answer.is_empty() || !spec.required {
                    return Ok(FieldValue::Text(answer));
                }
                prompt.say("Value required.")?;
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WorksError;
    use crate::prompt::testing::{scripted, transcript};
    use crate::prompt::NumberedChoice;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const COMPLETE: &str = "---
title: \"Dawn\"
slug: \"/works/dawn\"
description: \"Birdsong\"
created: \"2024-01-05\"
issued: \"2024-02-01\"
creator: \"Ada\"
type: \"digital\"
fileSource: \"https://x.test/full.mp4\"
previewSource: \"https://x.test/preview.mp4\"
staticPreviewSource: \"https://x.test/still.jpg\"
---

# Dawn
";

    fn catalog(files: &[(&str, &str)]) -> (TempDir, CatalogConfig) {
        let temp_dir = TempDir::new().unwrap();
        let config = CatalogConfig::for_root(temp_dir.path());
        fs::create_dir_all(&config.works_dir).unwrap();
        for (name, content) in files {
            fs::write(config.works_dir.join(name), content).unwrap();
        }
        (temp_dir, config)
    }

    fn wednesday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 14).unwrap()
    }

    fn work(config: &CatalogConfig, name: &str) -> PathBuf {
        config.works_dir.join(name)
    }

    #[test]
    fn test_complete_document_is_left_alone() {
        let (_temp_dir, config) = catalog(&[("dawn.md", COMPLETE), ("index.md", "# Index\n")]);
        let mut prompt = scripted(&[]);

        let summary = Validator::with_today(&config, wednesday())
            .run(&mut prompt, &mut NumberedChoice)
            .unwrap();
        assert_eq!(summary.processed, 1);
        assert_eq!(summary.updated, 0);
        assert_eq!(fs::read_to_string(work(&config, "dawn.md")).unwrap(), COMPLETE);

        let out = transcript(prompt);
        assert!(out.contains("Checking docs/works/dawn.md\nNo changes needed.\n"));
        assert!(out.ends_with("\nProcessed 1 work files.\n"));
        assert!(!out.contains("index.md"));
    }

    #[test]
    fn test_missing_creator_is_prompted() {
        let content = COMPLETE.replace("creator: \"Ada\"\n", "");
        let (_temp_dir, config) = catalog(&[("dawn.md", &content)]);
        let mut prompt = scripted(&["", "Grace"]);

        Validator::with_today(&config, wednesday())
            .run(&mut prompt, &mut NumberedChoice)
            .unwrap();

        let rewritten = read_document(&work(&config, "dawn.md")).unwrap();
        assert_eq!(rewritten.front_matter().get_str("creator"), Some("Grace"));
        assert_eq!(rewritten.body(), "\n# Dawn\n");

        let out = transcript(prompt);
        assert!(out.contains("Missing required field 'creator' in docs/works/dawn.md."));
        assert!(out.contains("Value required."));
        assert!(out.contains("Updated file."));
    }

    #[test]
    fn test_unknown_field_deleted() {
        let content = COMPLETE.replace("type: \"digital\"\n", "type: \"digital\"\nfoo: \"bar\"\n");
        let (_temp_dir, config) = catalog(&[("dawn.md", &content)]);
        let mut prompt = scripted(&["DELETE"]);

        Validator::with_today(&config, wednesday())
            .run(&mut prompt, &mut NumberedChoice)
            .unwrap();

        let written = fs::read_to_string(work(&config, "dawn.md")).unwrap();
        assert!(!written.contains("foo"));
        assert_ne!(written, content);
        assert_eq!(written, COMPLETE);
        assert!(transcript(prompt).contains("Unrecognized field 'foo'."));
    }

    #[test]
    fn test_unknown_field_mapping() {
        let content = COMPLETE.replace(
            "---\n\n",
            "author: \"Ann\"\nlicence: \"CC\"\nnote: \"x\"\n---\n\n",
        );
        let content = content.replace("creator: \"Ada\"\n", "");
        let (_temp_dir, config) = catalog(&[("dawn.md", &content)]);
        // author -> creator, licence -> unknown target, note -> kept
        let mut prompt = scripted(&["creator", "license", ""]);

        Validator::with_today(&config, wednesday())
            .run(&mut prompt, &mut NumberedChoice)
            .unwrap();

        let doc = read_document(&work(&config, "dawn.md")).unwrap();
        assert_eq!(doc.front_matter().get_str("creator"), Some("Ann"));
        assert_eq!(doc.front_matter().get_str("licence"), Some("CC"));
        assert_eq!(doc.front_matter().get_str("note"), Some("x"));
        assert!(!doc.front_matter().contains_key("author"));
        assert!(transcript(prompt).contains("Invalid target field; keeping original key."));
    }

    #[test]
    fn test_mapping_onto_present_field_is_skipped() {
        let content = COMPLETE.replace("---\n\n", "author: \"Ann\"\n---\n\n");
        let (_temp_dir, config) = catalog(&[("dawn.md", &content)]);
        let mut prompt = scripted(&["creator"]);

        let summary = Validator::with_today(&config, wednesday())
            .run(&mut prompt, &mut NumberedChoice)
            .unwrap();
        assert_eq!(summary.updated, 0);
        assert!(transcript(prompt)
            .contains("Target field 'creator' already present; skipping mapping."));
    }

    #[test]
    fn test_invalid_values_are_reasked() {
        let content = COMPLETE
            .replace("type: \"digital\"", "type: \"virtual\"\nsidebar_position: -4")
            .replace("created: \"2024-01-05\"", "created: \"yesterday\"")
            .replace("issued: \"2024-02-01\"", "issued: \"someday\"");
        let (_temp_dir, config) = catalog(&[("dawn.md", &content)]);
        // issued, type, then sidebar_position, in header order
        let mut prompt = scripted(&["2024-03-01", "2", "5"]);

        Validator::with_today(&config, wednesday())
            .run(&mut prompt, &mut NumberedChoice)
            .unwrap();

        let doc = read_document(&work(&config, "dawn.md")).unwrap();
        let fm = doc.front_matter();
        assert_eq!(fm.get_str("created"), Some("2026-10-13"));
        assert_eq!(fm.get_str("issued"), Some("2024-03-01"));
        assert_eq!(fm.get_str("type"), Some("physical"));
        assert_eq!(fm.get("sidebar_position"), Some(&FieldValue::int(5)));

        let out = transcript(prompt);
        assert!(out
            .contains("Invalid value for 'type' (virtual): Type must be one of digital, physical"));
        assert!(out.contains(
            "Invalid value for 'sidebar_position' (-4): value must be zero or positive"
        ));
        assert!(out.contains("Select Type:\n  1. digital\n  2. physical\n"));
    }

    #[test]
    fn test_blank_optional_field_removed() {
        let content = COMPLETE.replace(
            "type: \"digital\"\n",
            "type: \"digital\"\nrights: \"\"\nformat: \"\"\n",
        );
        let (_temp_dir, config) = catalog(&[("dawn.md", &content)]);
        let mut prompt = scripted(&[]);

        let summary = Validator::with_today(&config, wednesday())
            .run(&mut prompt, &mut NumberedChoice)
            .unwrap();
        assert_eq!(summary.updated, 1);
        assert_eq!(fs::read_to_string(work(&config, "dawn.md")).unwrap(), COMPLETE);
    }

    #[test]
    fn test_blank_required_field_is_prompted() {
        let content = COMPLETE.replace("description: \"Birdsong\"", "description: \"\"");
        let (_temp_dir, config) = catalog(&[("dawn.md", &content)]);
        let mut prompt = scripted(&["Birdsong"]);

        Validator::with_today(&config, wednesday())
            .run(&mut prompt, &mut NumberedChoice)
            .unwrap();
        assert_eq!(fs::read_to_string(work(&config, "dawn.md")).unwrap(), COMPLETE);
    }

    #[test]
    fn test_malformed_document_is_skipped() {
        let (_temp_dir, config) =
            catalog(&[("a.md", "---\ntitle \"A\"\n---\n"), ("b.md", COMPLETE)]);
        let mut prompt = scripted(&[]);

        let summary = Validator::with_today(&config, wednesday())
            .run(&mut prompt, &mut NumberedChoice)
            .unwrap();
        assert_eq!(summary.processed, 1);
        assert_eq!(summary.skipped, 1);

        let out = transcript(prompt);
        assert!(out.contains("Error: "));
        assert!(out.contains("unrecognized frontmatter line"));
        assert!(out.contains("Checking docs/works/b.md"));
    }

    #[test]
    fn test_missing_works_dir() {
        let temp_dir = TempDir::new().unwrap();
        let config = CatalogConfig::for_root(temp_dir.path());
        let err = Validator::new(&config)
            .run(&mut scripted(&[]), &mut NumberedChoice)
            .unwrap_err();
        assert!(matches!(err, WorksError::WorksDirNotFound { .. }));
    }
}
