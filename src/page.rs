#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    Hero,
    Methodology,
    Skills,
    Timeline,
    Contact,
}

impl Section {
    pub const ALL: [Self; 5] = [
        Self::Hero,
        Self::Methodology,
        Self::Skills,
        Self::Timeline,
        Self::Contact,
    ];

    pub fn anchor(self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::Methodology => "methodology",
            Self::Skills => "skills",
            Self::Timeline => "timeline",
            Self::Contact => "contact",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Hero => "Top",
            Self::Methodology => "Methodology",
            Self::Skills => "Skills",
            Self::Timeline => "Timeline",
            Self::Contact => "Contact",
        }
    }

    pub fn from_anchor(anchor: &str) -> Option<Self> {
        let anchor = anchor.trim_start_matches('#').to_ascii_lowercase();
        match anchor.as_str() {
            "experience" | "career" => Some(Self::Timeline),
            "top" | "home" => Some(Self::Hero),
            _ => Self::ALL.into_iter().find(|section| section.anchor() == anchor),
        }
    }

    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|section| *section == self)
            .unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1).min(Self::ALL.len() - 1)]
    }

    pub fn previous(self) -> Self {
        Self::ALL[self.index().saturating_sub(1)]
    }
}
