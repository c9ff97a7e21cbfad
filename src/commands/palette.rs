use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::page::Section;

use super::{CommandEffect, CommandOutcome, theme_outcome, tokenize};

const SUGGESTION_LIMIT: usize = 6;

const COMMANDS: &[(&str, &str)] = &[
    ("help", "show palette commands"),
    ("hero", "scroll to the top"),
    ("methodology", "scroll to methodology"),
    ("skills", "scroll to skills"),
    ("timeline", "scroll to the career timeline"),
    ("contact", "scroll to contact"),
    ("wave", "toggle the waveform view"),
    ("theme silicon", "gate-level theme"),
    ("theme light", "light theme"),
    ("theme dark", "default theme"),
    ("resume", "download the resume"),
    ("term", "open the terminal"),
    ("quit", "close the palette"),
];

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

#[derive(Debug, Default)]
pub struct CommandPalette {
    pub input: String,
    message: Option<String>,
}

impl CommandPalette {
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    pub fn reset(&mut self) {
        self.input.clear();
        self.message = None;
    }

    pub fn submit(&mut self) -> Option<CommandEffect> {
        let input = std::mem::take(&mut self.input);
        let outcome = interpret(&input);
        self.message = (!outcome.lines.is_empty()).then(|| outcome.lines.join("  "));
        outcome.effect
    }

    pub fn suggestions(&self) -> Vec<(&'static str, &'static str)> {
        let query = self.input.trim().trim_start_matches(':').trim();
        if query.is_empty() {
            return COMMANDS.iter().take(SUGGESTION_LIMIT).copied().collect();
        }

        let matcher = SkimMatcherV2::default();
        let mut scored = COMMANDS
            .iter()
            .filter_map(|entry| fuzzy_match_score(&matcher, entry.0, query).map(|score| (score, *entry)))
            .collect::<Vec<_>>();
        scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.0.cmp(&b.1.0)));
        scored
            .into_iter()
            .take(SUGGESTION_LIMIT)
            .map(|(_, entry)| entry)
            .collect()
    }
}

pub(crate) fn interpret(input: &str) -> CommandOutcome {
    let Some((command, args)) = tokenize(input.trim_start().trim_start_matches(':')) else {
        return CommandOutcome::default();
    };

    if let Some(section) = Section::from_anchor(&command) {
        return CommandOutcome::silent(CommandEffect::ScrollTo(section));
    }

    match command.as_str() {
        "help" | "h" => CommandOutcome::print([COMMANDS
            .iter()
            .map(|(name, _)| *name)
            .filter(|name| !name.contains(' '))
            .collect::<Vec<_>>()
            .join(" ")]),
        "wave" | "waveform" => CommandOutcome::silent(CommandEffect::ToggleWaveform),
        "theme" | "colorscheme" | "colo" => theme_outcome(args.first().copied()),
        "resume" | "w" => CommandOutcome::effect(CommandEffect::DownloadResume, "\"resume.txt\" written"),
        "term" | "terminal" | "sh" => CommandOutcome::silent(CommandEffect::OpenTerminal),
        "q" | "quit" | "q!" => CommandOutcome::silent(CommandEffect::CloseOverlay),
        _ => CommandOutcome::print([format!("E492: Not a command: {command}")]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;

    #[test]
    fn unknown_command_uses_vim_error() {
        let outcome = interpret("bogus");
        assert_eq!(outcome.effect, None);
        assert_eq!(outcome.lines, vec!["E492: Not a command: bogus"]);
    }

    #[test]
    fn leading_colon_is_optional() {
        assert_eq!(interpret(":q").effect, Some(CommandEffect::CloseOverlay));
        assert_eq!(interpret("q").effect, Some(CommandEffect::CloseOverlay));
    }

    #[test]
    fn section_names_scroll() {
        assert_eq!(
            interpret(":Timeline").effect,
            Some(CommandEffect::ScrollTo(Section::Timeline))
        );
    }

    #[test]
    fn theme_silicon_matches_terminal() {
        let outcome = interpret("theme silicon");
        assert_eq!(outcome.effect, Some(CommandEffect::SetTheme(Theme::Silicon)));
        assert_eq!(
            outcome.lines,
            vec!["SWITCHING TO RTL VIEW... GATE LEVEL PRIMITIVES EXPOSED."]
        );
    }

    #[test]
    fn submit_keeps_message_and_clears_input() {
        let mut palette = CommandPalette {
            input: "bogus".to_owned(),
            ..Default::default()
        };
        assert_eq!(palette.submit(), None);
        assert!(palette.input.is_empty());
        assert_eq!(palette.message(), Some("E492: Not a command: bogus"));
    }

    #[test]
    fn suggestions_rank_fuzzy_matches() {
        let palette = CommandPalette {
            input: ":timel".to_owned(),
            ..Default::default()
        };
        let suggestions = palette.suggestions();
        assert_eq!(suggestions.first().map(|entry| entry.0), Some("timeline"));
    }

    #[test]
    fn empty_input_lists_defaults() {
        let palette = CommandPalette::default();
        assert_eq!(palette.suggestions().len(), SUGGESTION_LIMIT);
    }
}
