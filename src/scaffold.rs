//! Interactive creation of a new work document

use crate::config::CatalogConfig;
use crate::core::{FieldValue, FrontMatter};
use crate::error::{Result, WorksError};
use crate::io::{format, write_atomic};
use crate::prompt::{confirm, AskWeekday, ChoicePrompt, Prompt};
use crate::schema::{
    self, normalize_slug, slug_from_title, slug_to_path, FieldKind, FieldSpec, FIELDS,
};
use chrono::NaiveDate;
use log::info;
use std::path::PathBuf;

const DATE_HINT: &str = "Enter a date (YYYY-MM-DD) or use keywords: today, tomorrow, \
yesterday, next week (prompts for weekday), next <weekday>.";

/// How a scaffolding session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScaffoldOutcome {
    Created(PathBuf),
    /// The target existed and the user kept it
    Declined,
}

/// Walks the user through every schema field and writes the new document
pub struct Scaffolder<'a> {
    config: &'a CatalogConfig,
    today: NaiveDate,
}

impl<'a> Scaffolder<'a> {
    pub fn new(config: &'a CatalogConfig) -> Self {
        Self::with_today(config, schema::today())
    }

    /// Resolve relative dates against a fixed day
    pub fn with_today(config: &'a CatalogConfig, today: NaiveDate) -> Self {
        Self { config, today }
    }

    pub fn run<P, C>(&self, prompt: &mut P, chooser: &mut C) -> Result<ScaffoldOutcome>
    where
        P: Prompt,
        C: ChoicePrompt + ?Sized,
    {
        prompt.say("New Work Creator")?;
        prompt.say("================")?;

        let fields = self.collect_fields(prompt, chooser)?;
        let body = self.ask_body(prompt, &fields)?;

        let slug = fields.get_str("slug").unwrap_or_default();
        let target = slug_to_path(&self.config.works_dir, slug).map_err(|e| {
            WorksError::validation(format!("Failed to determine file path: {}", e))
        })?;
        let shown = self.config.display_path(&target);

        if target.exists() {
            let question = format!("{} already exists. Overwrite? [y/N]: ", shown);
            if !confirm(prompt, &question)? {
                prompt.say("Aborted. No files written.")?;
                return Ok(ScaffoldOutcome::Declined);
            }
        }

        let content = format(&fields, &schema::canonical_order(), &format!("\n{}", body));
        write_atomic(&target, content)?;
        info!("Wrote new work {}", target.display());
        prompt.say(&format!("Created {}", shown))?;
        Ok(ScaffoldOutcome::Created(target))
    }

    /// Ask for every field in schema order
    pub fn collect_fields<P, C>(&self, prompt: &mut P, chooser: &mut C) -> Result<FrontMatter>
    where
        P: Prompt,
        C: ChoicePrompt + ?Sized,
    {
        let mut fields = FrontMatter::new();
        for spec in FIELDS {
            if spec.is_date() {
                prompt.say(DATE_HINT)?;
            }
            let value = match spec.kind {
                FieldKind::Slug => Some(FieldValue::Text(
                    self.ask_slug(prompt, fields.get_str("title"))?,
                )),
                FieldKind::Choice {
                    options,
                    allow_blank,
                } => chooser
                    .choose(prompt, spec.label, options, allow_blank)?
                    .map(FieldValue::Text),
                _ => self.ask_field(prompt, spec)?,
            };
            if let Some(value) = value {
                fields.insert(spec.key, value);
            }
        }
        Ok(fields)
    }

    fn ask_slug<P: Prompt>(&self, prompt: &mut P, title: Option<&str>) -> Result<String> {
        let suggestion = slug_from_title(title);
        prompt.say(&format!("Suggested slug: {}", suggestion))?;
        prompt.say("Press Enter to accept, or type a custom slug (must start with /works/).")?;
        loop {
            let answer = prompt.ask("Slug: ")?;
            let answer = if answer.is_empty() {
                suggestion.as_str()
            } else {
                answer.as_str()
            };
            match normalize_slug(answer) {
                Ok(slug) => return Ok(slug),
                Err(e) => prompt.say(&format!("{}. Please try again.", e))?,
            }
        }
    }

    fn ask_field<P: Prompt>(&self, prompt: &mut P, spec: &FieldSpec) -> Result<Option<FieldValue>> {
        let mut notes = Vec::new();
        if spec.required {
            notes.push("required".to_string());
        }
        if let Some(default) = spec.default {
            notes.push(format!("default: {}", default));
        }
        let question = if notes.is_empty() {
            format!("{}: ", spec.label)
        } else {
            format!("{} ({}): ", spec.label, notes.join(", "))
        };

        loop {
            let mut answer = prompt.ask(&question)?;
            if answer.is_empty() {
                match spec.default {
                    Some(default) => answer = default.to_string(),
                    None if !spec.required => return Ok(None),
                    None => {
                        prompt.say("This field is required. Please enter a value.")?;
                        continue;
                    }
                }
            }

            let entered = FieldValue::Text(answer);
            match spec.normalize(&entered, self.today, &mut AskWeekday(&mut *prompt)) {
                Ok(value) => return Ok(value),
                Err(e) if e.is_recoverable() => {
                    prompt.say(&format!("Invalid value: {}", e))?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn ask_body<P: Prompt>(&self, prompt: &mut P, fields: &FrontMatter) -> Result<String> {
        prompt.say("")?;
        prompt.say(
            "Provide body content for the Markdown file. Press Enter to use a default template.",
        )?;
        let body = prompt.ask("Body: ")?;
        if !body.is_empty() {
            return Ok(body);
        }
        Ok(format!(
            "# {}\n\n{}\n",
            fields.get_str("title").unwrap_or_default(),
            fields.get_str("description").unwrap_or_default()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::read_document;
    use crate::prompt::testing::{scripted, transcript};
    use crate::prompt::NumberedChoice;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn wednesday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 14).unwrap()
    }

    /// Answers for one full session, in prompt order
    fn answers<'a>(title: &'a str, slug: &'a str, body: &'a str) -> Vec<&'a str> {
        vec![
            title,
            slug,
            "A quiet piece",
            "2",
            "today",
            "next fri",
            "Ada",
            "",
            "",
            "",
            "1",
            "0",
            "",
            "",
            "",
            "",
            "",
            "",
            "https://x.test/full.mp4",
            "https://x.test/preview.mp4",
            "https://x.test/still.jpg",
            body,
        ]
    }

    #[test]
    fn test_full_session_writes_document() {
        let temp_dir = TempDir::new().unwrap();
        let config = CatalogConfig::for_root(temp_dir.path());
        let mut prompt = scripted(&answers("Dawn Chorus", "", ""));

        let outcome = Scaffolder::with_today(&config, wednesday())
            .run(&mut prompt, &mut NumberedChoice)
            .unwrap();
        let target = config.works_dir.join("dawn_chorus.md");
        assert_eq!(outcome, ScaffoldOutcome::Created(target.clone()));

        let written = fs::read_to_string(&target).unwrap();
        assert!(written.starts_with(
            "---\ntitle: \"Dawn Chorus\"\nslug: \"/works/dawn_chorus\"\n\
             description: \"A quiet piece\"\nsidebar_position: 2\n\
             created: \"2026-10-14\"\nissued: \"2026-10-23\"\n\
             creator: \"Ada\"\ntype: \"digital\"\n"
        ));
        assert!(written.ends_with("---\n\n# Dawn Chorus\n\nA quiet piece\n"));
        assert!(!written.contains("format:"));

        let doc = read_document(&target).unwrap();
        assert_eq!(
            doc.front_matter().get_str("staticPreviewSource"),
            Some("https://x.test/still.jpg")
        );
        assert!(transcript(prompt).contains("Created docs/works/dawn_chorus.md"));
    }

    #[test]
    fn test_required_fields_and_bad_values_are_reasked() {
        let temp_dir = TempDir::new().unwrap();
        let config = CatalogConfig::for_root(temp_dir.path());
        let mut script = answers("Piece", "/works/series/piece/", "Custom body");
        // empty title, then negative position, then a bad date
        script.insert(0, "");
        script.insert(4, "-1");
        script.insert(6, "someday");
        let mut prompt = scripted(&script);

        let outcome = Scaffolder::with_today(&config, wednesday())
            .run(&mut prompt, &mut NumberedChoice)
            .unwrap();
        let target = config.works_dir.join("series/piece.md");
        assert_eq!(outcome, ScaffoldOutcome::Created(target.clone()));
        assert!(fs::read_to_string(&target).unwrap().ends_with("---\n\nCustom body"));

        let out = transcript(prompt);
        assert!(out.contains("This field is required. Please enter a value."));
        assert!(out.contains("Invalid value: value must be zero or positive"));
        assert!(out.contains("Invalid value: use ISO format YYYY-MM-DD"));
    }

    #[test]
    fn test_bad_slug_is_reasked() {
        let temp_dir = TempDir::new().unwrap();
        let config = CatalogConfig::for_root(temp_dir.path());
        let mut script = answers("Piece", "/elsewhere/piece", "");
        script.insert(2, "works/piece");
        let mut prompt = scripted(&script);

        Scaffolder::with_today(&config, wednesday())
            .run(&mut prompt, &mut NumberedChoice)
            .unwrap();
        assert!(config.works_dir.join("piece.md").exists());
        assert!(transcript(prompt).contains("slug must start with /works/. Please try again."));
    }

    #[test]
    fn test_existing_file_needs_confirmation() {
        let temp_dir = TempDir::new().unwrap();
        let config = CatalogConfig::for_root(temp_dir.path());
        let target = config.works_dir.join("piece.md");
        fs::create_dir_all(&config.works_dir).unwrap();
        fs::write(&target, "original").unwrap();

        let mut script = answers("Piece", "", "");
        script.push("n");
        let mut prompt = scripted(&script);
        let outcome = Scaffolder::with_today(&config, wednesday())
            .run(&mut prompt, &mut NumberedChoice)
            .unwrap();
        assert_eq!(outcome, ScaffoldOutcome::Declined);
        assert_eq!(fs::read_to_string(&target).unwrap(), "original");
        assert!(transcript(prompt).contains("Aborted. No files written."));

        let mut script = answers("Piece", "", "");
        script.push("yes");
        let mut prompt = scripted(&script);
        Scaffolder::with_today(&config, wednesday())
            .run(&mut prompt, &mut NumberedChoice)
            .unwrap();
        assert!(fs::read_to_string(&target).unwrap().starts_with("---\n"));
    }

    #[test]
    fn test_slug_without_segment_fails() {
        let temp_dir = TempDir::new().unwrap();
        let config = CatalogConfig::for_root(temp_dir.path());
        let mut prompt = scripted(&answers("Piece", "/works/", ""));

        let err = Scaffolder::with_today(&config, wednesday())
            .run(&mut prompt, &mut NumberedChoice)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to determine file path: slug must contain a segment after /works/"
        );
        assert!(!config.works_dir.exists());
    }

    #[test]
    fn test_end_of_input_aborts_without_writing() {
        let temp_dir = TempDir::new().unwrap();
        let config = CatalogConfig::for_root(temp_dir.path());
        let mut prompt = scripted(&["Piece", ""]);

        let err = Scaffolder::with_today(&config, wednesday())
            .run(&mut prompt, &mut NumberedChoice)
            .unwrap_err();
        assert!(matches!(err, WorksError::Aborted));
        assert!(!config.works_dir.exists());
    }
}
