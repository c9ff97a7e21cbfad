mod load;
mod parse;

use eframe::egui::Color32;

pub use load::{export_resume, load_content};

#[derive(Clone, Debug)]
pub struct Profile {
    pub name: String,
    pub title: String,
    pub tagline: String,
    pub email: String,
    pub location: String,
    pub links: Vec<(String, String)>,
    pub summary: String,
}

#[derive(Clone, Debug)]
pub struct Skill {
    pub name: String,
    pub level: u8,
}

#[derive(Clone, Debug)]
pub struct SkillGroup {
    pub name: String,
    pub skills: Vec<Skill>,
}

#[derive(Clone, Debug)]
pub struct CareerEntry {
    pub company: String,
    pub role: String,
    pub start_year: u16,
    pub end_year: Option<u16>,
    pub summary: String,
    pub highlights: Vec<String>,
}

impl CareerEntry {
    pub fn span_label(&self) -> String {
        match self.end_year {
            Some(end) => format!("{} - {end}", self.start_year),
            None => format!("{} - now", self.start_year),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Methodology {
    pub title: String,
    pub body: String,
    pub color: Color32,
}

#[derive(Clone, Debug)]
pub struct PortfolioContent {
    pub profile: Profile,
    pub skill_groups: Vec<SkillGroup>,
    pub career: Vec<CareerEntry>,
    pub methodology: Vec<Methodology>,
}

impl PortfolioContent {
    pub fn skill_count(&self) -> usize {
        self.skill_groups.iter().map(|group| group.skills.len()).sum()
    }

    pub fn career_span(&self, current_year: u16) -> Option<(u16, u16)> {
        let start = self.career.iter().map(|entry| entry.start_year).min()?;
        let end = self
            .career
            .iter()
            .map(|entry| entry.end_year.unwrap_or(current_year))
            .max()?;
        Some((start, end.max(start.saturating_add(1))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn career(spans: &[(u16, Option<u16>)]) -> PortfolioContent {
        PortfolioContent {
            profile: Profile {
                name: String::new(),
                title: String::new(),
                tagline: String::new(),
                email: String::new(),
                location: String::new(),
                links: Vec::new(),
                summary: String::new(),
            },
            skill_groups: Vec::new(),
            career: spans
                .iter()
                .map(|&(start_year, end_year)| CareerEntry {
                    company: "Acme".to_owned(),
                    role: "DV".to_owned(),
                    start_year,
                    end_year,
                    summary: String::new(),
                    highlights: Vec::new(),
                })
                .collect(),
            methodology: Vec::new(),
        }
    }

    #[test]
    fn career_span_covers_current_roles() {
        let content = career(&[(2012, Some(2016)), (2016, None)]);
        assert_eq!(content.career_span(2026), Some((2012, 2026)));
        assert_eq!(career(&[]).career_span(2026), None);
    }

    #[test]
    fn career_span_is_at_least_one_year() {
        assert_eq!(career(&[(2020, Some(2020))]).career_span(2026), Some((2020, 2021)));
    }

    #[test]
    fn career_span_saturates_at_the_last_year() {
        let content = career(&[(u16::MAX, None)]);
        assert_eq!(content.career_span(2026), Some((u16::MAX, u16::MAX)));
    }
}
