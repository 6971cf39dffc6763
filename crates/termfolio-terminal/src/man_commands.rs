//! `man`: manual pages for portfolio projects.

use termfolio_types::error::Result;

use crate::commands::status_role;
use crate::content::Project;
use crate::interpreter::{Command, CommandOutput, Environment};
use crate::view::{ContentView, Line, Role, Section};

/// Shown when `man` is run without an argument.
const NO_ARG: &str = "(none)";

pub(crate) struct ManCmd;

impl Command for ManCmd {
    fn name(&self) -> &str {
        "man"
    }

    fn description(&self) -> &str {
        "Show detailed project information"
    }

    fn usage(&self) -> &str {
        "man [project]"
    }

    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let arg = args.first().copied().filter(|a| !a.is_empty());
        match arg.and_then(|a| env.portfolio.find_project(a)) {
            Some(project) => Ok(CommandOutput::View(man_page(project))),
            None => Ok(CommandOutput::Error {
                message: format!("man: No manual entry for '{}'", arg.unwrap_or(NO_ARG)),
                detail: Some(
                    "Try 'man [project-name]' or 'projects' to see available projects."
                        .to_string(),
                ),
            }),
        }
    }
}

fn man_page(p: &Project) -> ContentView {
    let title = format!("{}(1)", p.id.to_uppercase());
    let mut b = ContentView::builder(Section::ManPage)
        .line(
            Line::new(Role::Accent, title.as_str())
                .with(Role::Muted, "  User Commands Manual | Portfolio Projects  ")
                .with(status_role(p.status), format!("[{}]", p.status.label())),
        )
        .blank()
        .heading("NAME")
        .text(Role::Text, format!("    {} - {}", p.name, p.description))
        .blank()
        .heading("SYNOPSIS")
        .text(
            Role::Success,
            format!(
                "    $ git clone {}",
                p.github.as_deref().unwrap_or("https://github.com/user/project")
            ),
        )
        .text(Role::Success, format!("    $ cd {}", p.id))
        .blank()
        .heading("DESCRIPTION");

    for l in p.details.trim().lines() {
        b = b.text(Role::Text, format!("    {}", l.trim()));
    }

    if !p.technologies.is_empty() {
        b = b
            .blank()
            .heading("TECHNOLOGIES")
            .text(Role::Accent, format!("    {}", p.technologies.join(" | ")));
    }

    if p.github.is_some() || p.demo.is_some() {
        b = b.blank().heading("LINKS");
        if let Some(url) = &p.github {
            b = b.line(
                Line::new(Role::Muted, "    Source Code Repository: ")
                    .with(Role::Accent, url.as_str()),
            );
        }
        if let Some(url) = &p.demo {
            b = b.line(
                Line::new(Role::Muted, "    Live Demo: ").with(Role::Accent, url.as_str()),
            );
        }
    }

    b.blank()
        .heading("STATISTICS")
        .line(
            Line::new(Role::Muted, "    Technologies: ")
                .with(Role::Text, p.technologies.len().to_string())
                .with(Role::Muted, "    Status: ")
                .with(status_role(p.status), p.status.label().to_lowercase()),
        )
        .blank()
        .heading("SEE ALSO")
        .text(Role::Text, "    projects - list all projects")
        .text(Role::Text, "    skills - display technical skills")
        .text(Role::Text, "    contact - get in touch")
        .blank()
        .text(
            Role::Muted,
            format!("Terminal Portfolio | {title} | Version {}", env!("CARGO_PKG_VERSION")),
        )
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Fixture, plain};

    fn man(fx: &mut Fixture, args: &[&str]) -> CommandOutput {
        ManCmd.execute(args, &mut fx.env()).unwrap()
    }

    #[test]
    fn exact_id_opens_page() {
        let mut fx = Fixture::new();
        let out = man(&mut fx, &["ai-chatbot"]);
        let text = plain(&out);
        assert!(matches!(out, CommandOutput::View(_)));
        assert!(text.contains("AI-CHATBOT(1)"));
        assert!(text.contains("AI Chatbot Platform - Intelligent conversational AI"));
        assert!(text.contains("$ git clone https://github.com/user/ai-chatbot"));
    }

    #[test]
    fn name_fragment_any_case() {
        let mut fx = Fixture::new();
        let text = plain(&man(&mut fx, &["WALLET"]));
        assert!(text.contains("Crypto Wallet App"));
        assert!(text.contains("[IN PROGRESS]"));
        // No demo link for this project.
        assert!(!text.contains("Live Demo"));
    }

    #[test]
    fn no_match_names_argument() {
        let mut fx = Fixture::new();
        match man(&mut fx, &["Nope"]) {
            CommandOutput::Error { message, detail } => {
                assert_eq!(message, "man: No manual entry for 'Nope'");
                assert!(detail.unwrap().contains("projects"));
            },
            other => panic!("expected error, got {other:?}"),
        }
    }

    #[test]
    fn missing_argument_uses_placeholder() {
        let mut fx = Fixture::new();
        match man(&mut fx, &[]) {
            CommandOutput::Error { message, .. } => {
                assert_eq!(message, "man: No manual entry for '(none)'");
            },
            other => panic!("expected error, got {other:?}"),
        }
    }
}
