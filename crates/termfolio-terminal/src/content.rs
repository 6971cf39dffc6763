//! Portfolio content model.
//!
//! The built-in content ships inside the binary; a replacement TOML file
//! with the same shape can be supplied through configuration.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use termfolio_types::error::{Result, TermfolioError};

const BUILTIN: &str = include_str!("../../../content/portfolio.toml");

/// Everything the static sections display.
#[derive(Debug, Clone, Deserialize)]
pub struct Portfolio {
    pub owner: Owner,
    pub contact: ContactInfo,
    pub projects: Vec<Project>,
    pub skills: Vec<SkillCategory>,
    pub art: Art,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Owner {
    pub name: String,
    pub title: String,
    pub experience: String,
    #[serde(default)]
    pub bio: Vec<String>,
    #[serde(default)]
    pub values: Vec<String>,
    #[serde(default)]
    pub specializations: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub status: Vec<Fact>,
    #[serde(default)]
    pub stats: Vec<Fact>,
    #[serde(default)]
    pub fun_fact: Option<String>,
}

/// A labelled value (`Location: San Francisco, CA`).
#[derive(Debug, Clone, Deserialize)]
pub struct Fact {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContactInfo {
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub social: Vec<SocialLink>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SocialLink {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    /// Lower-case identifier used by `man`.
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub demo: Option<String>,
    pub details: String,
    pub status: ProjectStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    Completed,
    InProgress,
    Planned,
}

impl ProjectStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Completed => "COMPLETED",
            Self::InProgress => "IN PROGRESS",
            Self::Planned => "PLANNED",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SkillCategory {
    pub category: String,
    pub items: Vec<Skill>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Skill {
    pub name: String,
    /// Proficiency, 0-100.
    pub level: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Art {
    pub welcome: String,
    pub error404: String,
    pub whois: String,
}

impl Portfolio {
    /// The content compiled into the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_toml(BUILTIN)
    }

    /// Parse and validate content from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        let portfolio: Self = toml::from_str(text)?;
        portfolio.validate()?;
        Ok(portfolio)
    }

    /// Load content from `path`, or the built-in content when `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => {
                log::info!("Loading portfolio content from {}", p.display());
                Self::from_toml(&std::fs::read_to_string(p)?)
            },
            None => Self::builtin(),
        }
    }

    /// Look up a project for `man`: exact id first, then a case-insensitive
    /// substring of the project name.
    pub fn find_project(&self, query: &str) -> Option<&Project> {
        let q = query.to_lowercase();
        if q.is_empty() {
            return None;
        }
        self.projects.iter().find(|p| p.id == q).or_else(|| {
            self.projects
                .iter()
                .find(|p| p.name.to_lowercase().contains(&q))
        })
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for p in &self.projects {
            if p.id.is_empty() || p.id != p.id.to_lowercase() || p.id.contains(' ') {
                return Err(TermfolioError::Content(format!(
                    "project id must be lower-case without spaces: '{}'",
                    p.id
                )));
            }
            if !seen.insert(p.id.as_str()) {
                return Err(TermfolioError::Content(format!(
                    "duplicate project id '{}'",
                    p.id
                )));
            }
        }
        for cat in &self.skills {
            if let Some(s) = cat.items.iter().find(|s| s.level > 100) {
                return Err(TermfolioError::Content(format!(
                    "skill '{}' has level {} (max 100)",
                    s.name, s.level
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        [owner]
        name = "T"
        title = "Dev"
        experience = "a while"

        [contact]
        email = "t@example.com"

        [[projects]]
        id = "alpha"
        name = "Alpha Tool"
        description = "d"
        details = "x"
        status = "planned"

        [[skills]]
        category = "Lang"
        items = [{ name = "Rust", level = 90 }]

        [art]
        welcome = "W"
        error404 = "E"
        whois = "?"
    "#;

    #[test]
    fn builtin_content_parses() {
        let p = Portfolio::builtin().unwrap();
        assert_eq!(p.projects.len(), 4);
        assert_eq!(p.skills.len(), 4);
        assert_eq!(p.projects[3].status, ProjectStatus::InProgress);
        assert!(p.projects[3].demo.is_none());
    }

    #[test]
    fn minimal_content_parses() {
        let p = Portfolio::from_toml(MINIMAL).unwrap();
        assert_eq!(p.projects[0].status, ProjectStatus::Planned);
        assert!(p.owner.bio.is_empty());
        assert!(p.contact.social.is_empty());
    }

    #[test]
    fn find_by_exact_id() {
        let p = Portfolio::builtin().unwrap();
        assert_eq!(p.find_project("ai-chatbot").unwrap().id, "ai-chatbot");
        assert_eq!(p.find_project("AI-CHATBOT").unwrap().id, "ai-chatbot");
    }

    #[test]
    fn find_by_name_fragment() {
        let p = Portfolio::builtin().unwrap();
        assert_eq!(p.find_project("wallet").unwrap().id, "blockchain-wallet");
        assert_eq!(p.find_project("Dashboard").unwrap().id, "data-viz-dashboard");
    }

    #[test]
    fn exact_id_beats_earlier_name_match() {
        let text = MINIMAL.replace(
            "[[skills]]",
            r#"
            [[projects]]
            id = "tool"
            name = "Other"
            description = "d"
            details = "x"
            status = "completed"

            [[skills]]"#,
        );
        let p = Portfolio::from_toml(&text).unwrap();
        // "tool" is a substring of "Alpha Tool" (listed first) but an exact id of the second.
        assert_eq!(p.find_project("tool").unwrap().id, "tool");
    }

    #[test]
    fn find_misses() {
        let p = Portfolio::builtin().unwrap();
        assert!(p.find_project("nonexistent").is_none());
        assert!(p.find_project("").is_none());
    }

    #[test]
    fn duplicate_ids_rejected() {
        let text = MINIMAL.replace(
            "[[skills]]",
            r#"
            [[projects]]
            id = "alpha"
            name = "Again"
            description = "d"
            details = "x"
            status = "completed"

            [[skills]]"#,
        );
        let err = Portfolio::from_toml(&text).unwrap_err();
        assert!(matches!(err, TermfolioError::Content(_)));
    }

    #[test]
    fn level_over_100_rejected() {
        let text = MINIMAL.replace("level = 90", "level = 101");
        assert!(Portfolio::from_toml(&text).is_err());
    }

    #[test]
    fn unknown_status_rejected() {
        let text = MINIMAL.replace("\"planned\"", "\"abandoned\"");
        assert!(matches!(
            Portfolio::from_toml(&text).unwrap_err(),
            TermfolioError::TomlParse(_)
        ));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portfolio.toml");
        std::fs::write(&path, MINIMAL).unwrap();
        let p = Portfolio::load(Some(&path)).unwrap();
        assert_eq!(p.owner.name, "T");
    }
}
