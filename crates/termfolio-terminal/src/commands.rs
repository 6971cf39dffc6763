//! Built-in portfolio, shell, and session commands.

use std::collections::HashMap;

use termfolio_types::error::Result;

use crate::content::{Project, ProjectStatus, Skill};
use crate::interpreter::{Command, CommandOutput, CommandRegistry, Environment};
use crate::man_commands::ManCmd;
use crate::skin_commands::ThemeCmd;
use crate::view::{ContentView, FormKind, FormView, Line, Role, Section};

/// Register every built-in command, in help order.
pub fn register_builtins(reg: &mut CommandRegistry) {
    reg.register(Box::new(WhoAmICmd));
    reg.register(Box::new(ProjectsCmd));
    reg.register(Box::new(SkillsCmd));
    reg.register(Box::new(ContactCmd));
    reg.register(Box::new(HistoryCmd));
    reg.register(Box::new(ThemeCmd));
    reg.register(Box::new(ManCmd));
    reg.register(Box::new(ClearCmd));
    reg.register(Box::new(LogoutCmd));
    reg.register(Box::new(PwdCmd));
    reg.register(Box::new(DateCmd));
    reg.register(Box::new(UptimeCmd));
    reg.register(Box::new(EchoCmd));
}

// ---------------------------------------------------------------------------
// whoami
// ---------------------------------------------------------------------------

struct WhoAmICmd;
impl Command for WhoAmICmd {
    fn name(&self) -> &str {
        "whoami"
    }
    fn aliases(&self) -> &'static [&'static str] {
        &["about"]
    }
    fn description(&self) -> &str {
        "Display information about me"
    }
    fn usage(&self) -> &str {
        "whoami"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let owner = &env.portfolio.owner;
        let mut b = ContentView::builder(Section::WhoAmI)
            .art(&env.portfolio.art.whois)
            .blank()
            .heading("About Me")
            .text(Role::Prompt, "$ whoami")
            .line(
                Line::new(Role::Text, "Hi there! I'm ")
                    .with(Role::Accent, owner.name.as_str())
                    .with(Role::Text, ", a passionate ")
                    .with(Role::Accent, owner.title.as_str())
                    .with(Role::Text, format!(" with {}.", owner.experience)),
            );
        for para in &owner.bio {
            b = b.text(Role::Text, para.as_str());
        }

        b = b.blank().heading("Core Values");
        for v in &owner.values {
            b = b.bullet(v.as_str());
        }
        b = b.blank().heading("Specializations");
        for s in &owner.specializations {
            b = b.bullet(s.as_str());
        }
        if !owner.interests.is_empty() {
            b = b.blank().text(Role::Prompt, "$ ls ~/interests");
            for i in &owner.interests {
                b = b.bullet(i.as_str());
            }
        }
        if !owner.status.is_empty() {
            b = b.blank().text(Role::Prompt, "$ cat ~/status.txt");
            for f in &owner.status {
                b = b.line(fact_line(&f.label, &f.value));
            }
        }
        if !owner.stats.is_empty() {
            b = b.blank().text(Role::Prompt, "$ uptime");
            for f in &owner.stats {
                b = b.line(fact_line(&f.label, &f.value));
            }
        }
        if let Some(fact) = &owner.fun_fact {
            b = b
                .blank()
                .line(Line::new(Role::Accent, "Fun fact: ").with(Role::Muted, fact.as_str()));
        }
        Ok(CommandOutput::View(b.build()))
    }
}

fn fact_line(label: &str, value: &str) -> Line {
    Line::new(Role::Muted, format!("  {label}: ")).with(Role::Success, value)
}

// ---------------------------------------------------------------------------
// projects
// ---------------------------------------------------------------------------

struct ProjectsCmd;
impl Command for ProjectsCmd {
    fn name(&self) -> &str {
        "projects"
    }
    fn aliases(&self) -> &'static [&'static str] {
        &["ls"]
    }
    fn description(&self) -> &str {
        "List all projects"
    }
    fn usage(&self) -> &str {
        "projects"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let mut b = ContentView::builder(Section::Projects)
            .heading("Projects Portfolio")
            .text(
                Role::Muted,
                "Here are some of my notable projects. Use man [project-id] for detailed information.",
            )
            .blank();
        for p in &env.portfolio.projects {
            b = b.lines(project_card(p)).blank();
        }
        b = b.line(
            Line::new(Role::Accent, "Tip: ")
                .with(Role::Muted, "Use ")
                .with(Role::Success, "man [project-id]")
                .with(Role::Muted, " to view detailed documentation for any project."),
        );
        Ok(CommandOutput::View(b.build()))
    }
}

fn project_card(p: &Project) -> Vec<Line> {
    let status_role = status_role(p.status);
    let mut lines = vec![
        Line::new(Role::Accent, p.name.as_str())
            .with(Role::Muted, "  ")
            .with(status_role, format!("[{}]", p.status.label())),
        Line::new(Role::Text, format!("  {}", p.description)),
    ];
    if !p.technologies.is_empty() {
        lines.push(Line::new(
            Role::Muted,
            format!("  Tech: {}", p.technologies.join(", ")),
        ));
    }
    if let Some(url) = &p.github {
        lines.push(Line::new(Role::Muted, format!("  Code: {url}")));
    }
    if let Some(url) = &p.demo {
        lines.push(Line::new(Role::Muted, format!("  Demo: {url}")));
    }
    lines.push(Line::new(Role::Success, format!("  $ man {}", p.id)));
    lines
}

pub(crate) fn status_role(status: ProjectStatus) -> Role {
    match status {
        ProjectStatus::Completed => Role::Success,
        ProjectStatus::InProgress => Role::Warning,
        ProjectStatus::Planned => Role::Accent,
    }
}

// ---------------------------------------------------------------------------
// skills
// ---------------------------------------------------------------------------

/// Width of a skill bar in cells (5% per cell).
const BAR_WIDTH: usize = 20;

struct SkillsCmd;
impl Command for SkillsCmd {
    fn name(&self) -> &str {
        "skills"
    }
    fn aliases(&self) -> &'static [&'static str] {
        &["skill"]
    }
    fn description(&self) -> &str {
        "Display skills matrix"
    }
    fn usage(&self) -> &str {
        "skills"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let skills = &env.portfolio.skills;
        let name_width = skills
            .iter()
            .flat_map(|c| c.items.iter())
            .map(|s| s.name.chars().count())
            .max()
            .unwrap_or(0);

        let mut b = ContentView::builder(Section::Skills).heading("Skills Matrix");
        for cat in skills {
            b = b.blank().text(Role::Accent, cat.category.as_str());
            for s in &cat.items {
                b = b.line(skill_bar(s, name_width));
            }
        }

        let total: usize = skills.iter().map(|c| c.items.len()).sum();
        b = b
            .blank()
            .text(
                Role::Muted,
                format!(
                    "{total} technologies across {} categories",
                    skills.len()
                ),
            )
            .line(
                Line::new(Role::Muted, "Legend: ")
                    .with(Role::Success, "Expert (90%+) ")
                    .with(Role::Accent, "Advanced (80%+) ")
                    .with(Role::Warning, "Intermediate (70%+) ")
                    .with(Role::Muted, "Beginner"),
            );
        Ok(CommandOutput::View(b.build()))
    }
}

fn skill_bar(s: &Skill, name_width: usize) -> Line {
    let filled = usize::from(s.level.min(100)) * BAR_WIDTH / 100;
    let role = match s.level {
        90.. => Role::Success,
        80..=89 => Role::Accent,
        70..=79 => Role::Warning,
        _ => Role::Muted,
    };
    Line::new(Role::Text, format!("  {:name_width$} ", s.name))
        .with(role, "█".repeat(filled))
        .with(Role::Muted, "░".repeat(BAR_WIDTH - filled))
        .with(Role::Text, format!(" {:>3}%", s.level))
}

// ---------------------------------------------------------------------------
// contact
// ---------------------------------------------------------------------------

struct ContactCmd;
impl Command for ContactCmd {
    fn name(&self) -> &str {
        "contact"
    }
    fn aliases(&self) -> &'static [&'static str] {
        &["email"]
    }
    fn description(&self) -> &str {
        "Show contact information"
    }
    fn usage(&self) -> &str {
        "contact"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let c = &env.portfolio.contact;
        let mut b = ContentView::builder(Section::Contact)
            .heading("Contact Information")
            .line(fact_line("Email", &c.email));
        if let Some(phone) = &c.phone {
            b = b.line(fact_line("Phone", phone));
        }
        if let Some(location) = &c.location {
            b = b.line(fact_line("Location", location));
        }
        if !c.social.is_empty() {
            b = b.blank().heading("Social Links");
            for link in &c.social {
                b = b.line(fact_line(&link.label, &link.url));
            }
        }
        let info = b
            .blank()
            .text(
                Role::Prompt,
                format!(
                    "{}@{}:~/contact$ send message",
                    env.config.prompt_user, env.config.prompt_host
                ),
            )
            .build();
        Ok(CommandOutput::Form(FormView {
            kind: FormKind::Contact,
            info,
        }))
    }
}

// ---------------------------------------------------------------------------
// history
// ---------------------------------------------------------------------------

/// How many entries the "most used" list shows.
const MOST_USED: usize = 5;

struct HistoryCmd;
impl Command for HistoryCmd {
    fn name(&self) -> &str {
        "history"
    }
    fn description(&self) -> &str {
        "Show command history"
    }
    fn usage(&self) -> &str {
        "history [clear]"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        match args.first().copied() {
            Some("clear" | "-c") => return Ok(CommandOutput::ClearHistory),
            Some(other) if !other.is_empty() => {
                return Ok(CommandOutput::Error {
                    message: format!("history: unknown option '{other}'"),
                    detail: Some("Usage: history [clear]".to_string()),
                });
            },
            _ => {},
        }
        Ok(CommandOutput::View(history_view(
            env.history,
            env.config.history_display_limit,
        )))
    }
}

/// Recent entries plus statistics over the whole history.
fn history_view(history: &[String], limit: usize) -> ContentView {
    let mut b = ContentView::builder(Section::History)
        .heading("Command History")
        .text(
            Role::Muted,
            "Your recent terminal session activity. Use Up/Down arrows to navigate history.",
        )
        .blank()
        .text(Role::Accent, "Recent Commands");

    let recent = &history[history.len().saturating_sub(limit)..];
    if recent.is_empty() {
        b = b
            .text(Role::Muted, "  No commands in history yet.")
            .text(Role::Muted, "  Start typing commands to see them here!");
    } else {
        let width = recent.len().to_string().len();
        for (i, cmd) in recent.iter().enumerate() {
            b = b.line(
                Line::new(Role::Muted, format!("  {:>width$}  ", recent.len() - i))
                    .with(Role::Prompt, "$ ")
                    .with(Role::Text, cmd.as_str()),
            );
        }
    }

    let counts = usage_counts(history);
    b = b
        .blank()
        .text(Role::Accent, "Session Statistics")
        .line(fact_line("Total Commands", &history.len().to_string()))
        .line(fact_line("Unique Commands", &counts.len().to_string()));

    if !counts.is_empty() {
        b = b.blank().text(Role::Accent, "Most Used");
        for (cmd, n) in counts.iter().take(MOST_USED) {
            b = b.line(
                Line::new(Role::Text, format!("  {cmd}"))
                    .with(Role::Muted, "  ")
                    .with(Role::Success, format!("{n}x")),
            );
        }
    }

    b.blank()
        .line(
            Line::new(Role::Accent, "Tip: ")
                .with(Role::Muted, "Type ")
                .with(Role::Success, "history clear")
                .with(Role::Muted, " to forget this session's commands."),
        )
        .build()
}

/// Distinct entries with their counts, most used first. Ties keep the order
/// of first appearance.
fn usage_counts(history: &[String]) -> Vec<(&str, usize)> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for cmd in history {
        let n = counts.entry(cmd.as_str()).or_insert(0);
        if *n == 0 {
            order.push(cmd.as_str());
        }
        *n += 1;
    }
    let mut out: Vec<(&str, usize)> = order.into_iter().map(|c| (c, counts[c])).collect();
    out.sort_by(|a, b| b.1.cmp(&a.1));
    out
}

// ---------------------------------------------------------------------------
// clear
// ---------------------------------------------------------------------------

/// Registered for help and completion; the session intercepts it first.
struct ClearCmd;
impl Command for ClearCmd {
    fn name(&self) -> &str {
        "clear"
    }
    fn aliases(&self) -> &'static [&'static str] {
        &["cls"]
    }
    fn description(&self) -> &str {
        "Clear terminal screen"
    }
    fn usage(&self) -> &str {
        "clear"
    }
    fn execute(&self, _args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Clear)
    }
}

// ---------------------------------------------------------------------------
// logout
// ---------------------------------------------------------------------------

struct LogoutCmd;
impl Command for LogoutCmd {
    fn name(&self) -> &str {
        "logout"
    }
    fn aliases(&self) -> &'static [&'static str] {
        &["exit"]
    }
    fn description(&self) -> &str {
        "Exit the terminal"
    }
    fn usage(&self) -> &str {
        "logout"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Warning(format!(
            "Logging out... Connection to {}@{} closed.",
            env.config.prompt_user, env.config.prompt_host
        )))
    }
}

// ---------------------------------------------------------------------------
// pwd
// ---------------------------------------------------------------------------

struct PwdCmd;
impl Command for PwdCmd {
    fn name(&self) -> &str {
        "pwd"
    }
    fn description(&self) -> &str {
        "Print working directory"
    }
    fn usage(&self) -> &str {
        "pwd"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Text(env.config.home_dir.clone()))
    }
}

// ---------------------------------------------------------------------------
// date
// ---------------------------------------------------------------------------

struct DateCmd;
impl Command for DateCmd {
    fn name(&self) -> &str {
        "date"
    }
    fn description(&self) -> &str {
        "Show current date and time"
    }
    fn usage(&self) -> &str {
        "date"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        match env.time {
            Some(time) => Ok(CommandOutput::Text(time.now()?.to_string())),
            None => Ok(CommandOutput::error("date: no time service available")),
        }
    }
}

// ---------------------------------------------------------------------------
// uptime
// ---------------------------------------------------------------------------

struct UptimeCmd;
impl Command for UptimeCmd {
    fn name(&self) -> &str {
        "uptime"
    }
    fn description(&self) -> &str {
        "Show session uptime"
    }
    fn usage(&self) -> &str {
        "uptime"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        match env.time {
            Some(time) => Ok(CommandOutput::Text(format!(
                "System uptime: {}s",
                time.uptime_secs()?
            ))),
            None => Ok(CommandOutput::error("uptime: no time service available")),
        }
    }
}

// ---------------------------------------------------------------------------
// echo
// ---------------------------------------------------------------------------

struct EchoCmd;
impl Command for EchoCmd {
    fn name(&self) -> &str {
        "echo"
    }
    fn description(&self) -> &str {
        "Print arguments"
    }
    fn usage(&self) -> &str {
        "echo [text...]"
    }
    fn execute(&self, args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Text(args.join(" ")))
    }
}
