//! `%VARIABLE%` expansion in action arguments and text files

use chrono::NaiveDateTime;

use b4x_fs::{ProjectLayout, io};

use crate::{Error, Result};

pub const VERSION: &str = "%VERSION%";
pub const DATE: &str = "%DATE%";
pub const TIME: &str = "%TIME%";
pub const PROJECT_NAME: &str = "%PROJECT_NAME%";
pub const JAR: &str = "%JAR%";
pub const JAR_NAME: &str = "%JAR_NAME%";

/// Expands placeholders against a project and a fixed clock reading.
#[derive(Debug, Clone)]
pub struct VariableResolver<'a> {
    layout: &'a ProjectLayout,
    now: NaiveDateTime,
}

impl<'a> VariableResolver<'a> {
    pub fn new(layout: &'a ProjectLayout, now: NaiveDateTime) -> Self {
        Self { layout, now }
    }

    /// Replace every known placeholder in `text`.
    ///
    /// Values are only computed for placeholders that occur, so a project
    /// without a jar only fails when `%JAR%` or `%JAR_NAME%` is used.
    pub fn expand(&self, text: &str) -> Result<String> {
        if !text.contains('%') {
            return Ok(text.to_string());
        }

        let mut out = text.to_string();
        if out.contains(VERSION) {
            out = out.replace(VERSION, &self.version()?);
        }
        if out.contains(DATE) {
            out = out.replace(DATE, &self.now.format("%Y%m%d").to_string());
        }
        if out.contains(TIME) {
            out = out.replace(TIME, &self.now.format("%H%M%S").to_string());
        }
        if out.contains(PROJECT_NAME) {
            out = out.replace(PROJECT_NAME, &self.layout.project_name());
        }
        if out.contains(JAR) {
            out = out.replace(JAR, &self.jar(JAR)?);
        }
        if out.contains(JAR_NAME) {
            let jar = self.jar(JAR_NAME)?;
            let name = jar.strip_suffix(".jar").unwrap_or(&jar);
            out = out.replace(JAR_NAME, name);
        }
        Ok(out)
    }

    /// Trimmed content of `Files/version.txt`, empty when there is none.
    pub fn version(&self) -> Result<String> {
        let path = self.layout.version_file();
        if !path.is_file() {
            return Ok(String::new());
        }
        Ok(io::read_text(&path)?.trim().to_string())
    }

    fn jar(&self, variable: &str) -> Result<String> {
        self.layout.find_jar()?.ok_or_else(|| Error::MissingJar {
            variable: variable.to_string(),
            objects: self.layout.objects_dir().to_native(),
        })
    }
}
