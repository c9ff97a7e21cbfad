use crate::content::PortfolioContent;
use crate::page::Section;

use super::{CommandEffect, CommandOutcome, theme_outcome, tokenize};

pub const PROMPT: &str = "guest@silicon:~$";
const HISTORY_LIMIT: usize = 400;

const COMMANDS: &[(&str, &str)] = &[
    ("help", "list available commands"),
    ("whoami", "print name and title"),
    ("about", "print the profile summary"),
    ("skills", "list skills by group"),
    ("experience", "print the career history"),
    ("contact", "print contact details"),
    ("resume", "download the resume"),
    ("goto", "scroll to a section: goto <section>"),
    ("theme", "switch theme: theme [silicon|light|dark]"),
    ("clear", "clear the terminal"),
    ("exit", "close the terminal"),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind {
    Input,
    Output,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TerminalLine {
    pub kind: LineKind,
    pub text: String,
}

#[derive(Debug)]
pub struct Terminal {
    history: Vec<TerminalLine>,
    recall: Vec<String>,
    recall_cursor: Option<usize>,
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminal {
    pub fn new() -> Self {
        let mut terminal = Self {
            history: Vec::new(),
            recall: Vec::new(),
            recall_cursor: None,
        };
        terminal.push(LineKind::Output, "silicon-folio shell. type 'help' to begin.");
        terminal
    }

    pub fn history(&self) -> &[TerminalLine] {
        &self.history
    }

    pub fn prompt(&self) -> &'static str {
        PROMPT
    }

    pub fn submit(&mut self, input: &str, content: &PortfolioContent) -> Option<CommandEffect> {
        self.push(LineKind::Input, format!("{PROMPT} {input}"));
        if !input.trim().is_empty() {
            self.recall.push(input.trim().to_owned());
        }
        self.recall_cursor = None;

        let outcome = interpret(input, content);
        let kind = if outcome.effect.is_none() && is_failure(&outcome) {
            LineKind::Error
        } else {
            LineKind::Output
        };
        for line in outcome.lines {
            self.push(kind, line);
        }

        match outcome.effect {
            Some(CommandEffect::ClearHistory) => {
                self.history.clear();
                None
            }
            effect => effect,
        }
    }

    pub fn report(&mut self, kind: LineKind, text: impl Into<String>) {
        self.push(kind, text);
    }

    pub fn recall_previous(&mut self) -> Option<&str> {
        if self.recall.is_empty() {
            return None;
        }
        let cursor = match self.recall_cursor {
            Some(cursor) => cursor.saturating_sub(1),
            None => self.recall.len() - 1,
        };
        self.recall_cursor = Some(cursor);
        self.recall.get(cursor).map(String::as_str)
    }

    pub fn recall_next(&mut self) -> Option<&str> {
        let cursor = self.recall_cursor? + 1;
        if cursor >= self.recall.len() {
            self.recall_cursor = None;
            return Some("");
        }
        self.recall_cursor = Some(cursor);
        self.recall.get(cursor).map(String::as_str)
    }

    fn push(&mut self, kind: LineKind, text: impl Into<String>) {
        self.history.push(TerminalLine {
            kind,
            text: text.into(),
        });
        if self.history.len() > HISTORY_LIMIT {
            let excess = self.history.len() - HISTORY_LIMIT;
            self.history.drain(..excess);
        }
    }
}

fn is_failure(outcome: &CommandOutcome) -> bool {
    outcome
        .lines
        .first()
        .is_some_and(|line| line.starts_with("bash:") || line.starts_with("usage:"))
}

pub(crate) fn interpret(input: &str, content: &PortfolioContent) -> CommandOutcome {
    let Some((command, args)) = tokenize(input) else {
        return CommandOutcome::default();
    };
    let profile = &content.profile;

    match command.as_str() {
        "help" => CommandOutcome::print(
            COMMANDS
                .iter()
                .map(|(name, description)| format!("  {name:<12}{description}")),
        ),
        "whoami" => CommandOutcome::print([format!("{} :: {}", profile.name, profile.title)]),
        "about" => CommandOutcome::print([profile.summary.clone()]),
        "skills" => CommandOutcome::print(content.skill_groups.iter().map(|group| {
            let names = group
                .skills
                .iter()
                .map(|skill| skill.name.as_str())
                .collect::<Vec<_>>();
            format!("[{}] {}", group.name, names.join(", "))
        })),
        "experience" => CommandOutcome::print(content.career.iter().rev().map(|entry| {
            format!("{:<12} {} @ {}", entry.span_label(), entry.role, entry.company)
        })),
        "contact" => {
            let mut lines = vec![format!("email     {}", profile.email)];
            if !profile.location.is_empty() {
                lines.push(format!("location  {}", profile.location));
            }
            lines.extend(
                profile
                    .links
                    .iter()
                    .map(|(label, url)| format!("{:<10}{url}", label.to_ascii_lowercase())),
            );
            CommandOutcome::print(lines)
        }
        "resume" => CommandOutcome::effect(CommandEffect::DownloadResume, "Fetching resume..."),
        "goto" => match args.first().and_then(|anchor| Section::from_anchor(anchor)) {
            Some(section) => CommandOutcome::effect(
                CommandEffect::ScrollTo(section),
                format!("jumping to #{}", section.anchor()),
            ),
            None => CommandOutcome::print([format!(
                "usage: goto [{}]",
                Section::ALL.map(Section::anchor).join("|")
            )]),
        },
        "theme" => theme_outcome(args.first().copied()),
        "clear" => CommandOutcome::silent(CommandEffect::ClearHistory),
        "exit" => CommandOutcome::silent(CommandEffect::CloseOverlay),
        _ => CommandOutcome::print([format!("bash: {command}: command not found")]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::load_content;
    use crate::theme::Theme;

    fn content() -> PortfolioContent {
        load_content(None).unwrap()
    }

    #[test]
    fn theme_silicon_switches_and_prints_banner() {
        let outcome = interpret("theme silicon", &content());
        assert_eq!(outcome.effect, Some(CommandEffect::SetTheme(Theme::Silicon)));
        assert_eq!(
            outcome.lines,
            vec!["SWITCHING TO RTL VIEW... GATE LEVEL PRIMITIVES EXPOSED."]
        );
    }

    #[test]
    fn unknown_command_is_reported() {
        let outcome = interpret("bogus", &content());
        assert_eq!(outcome.effect, None);
        assert_eq!(outcome.lines, vec!["bash: bogus: command not found"]);
    }

    #[test]
    fn command_lookup_ignores_case() {
        let outcome = interpret("WHOAMI", &content());
        assert!(outcome.lines[0].starts_with("Mira Okafor"));
    }

    #[test]
    fn goto_scrolls_to_section() {
        let outcome = interpret("goto skills", &content());
        assert_eq!(outcome.effect, Some(CommandEffect::ScrollTo(Section::Skills)));
    }

    #[test]
    fn resume_triggers_download() {
        let outcome = interpret("resume", &content());
        assert_eq!(outcome.effect, Some(CommandEffect::DownloadResume));
    }

    #[test]
    fn clear_empties_history() {
        let mut terminal = Terminal::new();
        terminal.submit("whoami", &content());
        assert_eq!(terminal.submit("clear", &content()), None);
        assert!(terminal.history().is_empty());
    }

    #[test]
    fn unknown_command_lines_are_errors() {
        let mut terminal = Terminal::new();
        terminal.submit("bogus", &content());
        let last = terminal.history().last().unwrap();
        assert_eq!(last.kind, LineKind::Error);
        assert_eq!(last.text, "bash: bogus: command not found");
    }

    #[test]
    fn exit_closes_overlay() {
        let mut terminal = Terminal::new();
        assert_eq!(
            terminal.submit("exit", &content()),
            Some(CommandEffect::CloseOverlay)
        );
    }

    #[test]
    fn recall_walks_history() {
        let mut terminal = Terminal::new();
        terminal.submit("help", &content());
        terminal.submit("whoami", &content());
        assert_eq!(terminal.recall_previous(), Some("whoami"));
        assert_eq!(terminal.recall_previous(), Some("help"));
        assert_eq!(terminal.recall_previous(), Some("help"));
        assert_eq!(terminal.recall_next(), Some("whoami"));
        assert_eq!(terminal.recall_next(), Some(""));
        assert_eq!(terminal.recall_next(), None);
    }

    #[test]
    fn blank_input_only_echoes_prompt() {
        let mut terminal = Terminal::new();
        let before = terminal.history().len();
        terminal.submit("   ", &content());
        assert_eq!(terminal.history().len(), before + 1);
    }
}
