mod palette;
mod terminal;

use crate::page::Section;
use crate::theme::Theme;

pub use palette::CommandPalette;
pub use terminal::{LineKind, Terminal};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandEffect {
    SetTheme(Theme),
    DownloadResume,
    ScrollTo(Section),
    ClearHistory,
    CloseOverlay,
    ToggleWaveform,
    OpenTerminal,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandOutcome {
    pub lines: Vec<String>,
    pub effect: Option<CommandEffect>,
}

impl CommandOutcome {
    fn print(lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            effect: None,
        }
    }

    fn effect(effect: CommandEffect, line: impl Into<String>) -> Self {
        Self {
            lines: vec![line.into()],
            effect: Some(effect),
        }
    }

    fn silent(effect: CommandEffect) -> Self {
        Self {
            lines: Vec::new(),
            effect: Some(effect),
        }
    }
}

pub(crate) fn tokenize(input: &str) -> Option<(String, Vec<&str>)> {
    let mut tokens = input.split_whitespace();
    let command = tokens.next()?.to_ascii_lowercase();
    Some((command, tokens.collect()))
}

pub(crate) fn theme_outcome(argument: Option<&str>) -> CommandOutcome {
    match argument.and_then(Theme::from_arg) {
        Some(theme) => CommandOutcome::effect(CommandEffect::SetTheme(theme), theme.switch_message()),
        None => CommandOutcome::print(["usage: theme [silicon|light|dark]"]),
    }
}
