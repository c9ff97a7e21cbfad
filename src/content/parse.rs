use anyhow::{Context, Result, anyhow};
use eframe::egui::Color32;
use serde::Deserialize;

use super::{CareerEntry, Methodology, PortfolioContent, Profile, Skill, SkillGroup};

#[derive(Clone, Debug, Deserialize)]
struct RawContent {
    profile: RawProfile,
    #[serde(default)]
    skills: Vec<RawSkillGroup>,
    #[serde(default)]
    career: Vec<RawCareerEntry>,
    #[serde(default)]
    methodology: Vec<RawMethodology>,
}

#[derive(Clone, Debug, Deserialize)]
struct RawProfile {
    name: String,
    title: String,
    #[serde(default)]
    tagline: String,
    email: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    links: Vec<RawLink>,
    #[serde(default)]
    summary: String,
}

#[derive(Clone, Debug, Deserialize)]
struct RawLink {
    label: String,
    url: String,
}

#[derive(Clone, Debug, Deserialize)]
struct RawSkillGroup {
    name: String,
    #[serde(default)]
    skills: Vec<RawSkill>,
}

#[derive(Clone, Debug, Deserialize)]
struct RawSkill {
    name: String,
    level: u32,
}

#[derive(Clone, Debug, Deserialize)]
struct RawCareerEntry {
    company: String,
    role: String,
    start: u16,
    #[serde(default)]
    end: Option<u16>,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    highlights: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
struct RawMethodology {
    title: String,
    body: String,
    color: String,
}

pub(super) fn parse_content(raw: &str) -> Result<PortfolioContent> {
    let parsed: RawContent = serde_json::from_str(raw).context("invalid portfolio content JSON")?;

    let profile = Profile {
        name: parsed.profile.name,
        title: parsed.profile.title,
        tagline: parsed.profile.tagline,
        email: parsed.profile.email,
        location: parsed.profile.location,
        links: parsed
            .profile
            .links
            .into_iter()
            .map(|link| (link.label, link.url))
            .collect(),
        summary: parsed.profile.summary,
    };

    let skill_groups = parsed
        .skills
        .into_iter()
        .map(|group| SkillGroup {
            name: group.name,
            skills: group
                .skills
                .into_iter()
                .map(|skill| Skill {
                    name: skill.name,
                    level: skill.level.min(100) as u8,
                })
                .collect(),
        })
        .collect();

    let mut career = Vec::with_capacity(parsed.career.len());
    for entry in parsed.career {
        if let Some(end) = entry.end
            && end < entry.start
        {
            return Err(anyhow!(
                "career entry {} at {} ends ({end}) before it starts ({})",
                entry.role,
                entry.company,
                entry.start
            ));
        }
        career.push(CareerEntry {
            company: entry.company,
            role: entry.role,
            start_year: entry.start,
            end_year: entry.end,
            summary: entry.summary,
            highlights: entry.highlights,
        });
    }

    let methodology = parsed
        .methodology
        .into_iter()
        .map(|card| {
            let color = parse_color(&card.color)
                .with_context(|| format!("methodology card {:?}", card.title))?;
            Ok(Methodology {
                title: card.title,
                body: card.body,
                color,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(PortfolioContent {
        profile,
        skill_groups,
        career,
        methodology,
    })
}

pub(super) fn parse_color(value: &str) -> Result<Color32> {
    Color32::from_hex(value.trim()).map_err(|error| anyhow!("invalid color {value:?}: {error:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r##"{
        "profile": { "name": "Ada", "title": "Engineer", "email": "ada@example.com" },
        "skills": [ { "name": "HDL", "skills": [ { "name": "Verilog", "level": 140 } ] } ],
        "career": [ { "company": "Fab", "role": "DV", "start": 2019 } ],
        "methodology": [ { "title": "Verify", "body": "early", "color": "#22d3ee" } ]
    }"##;

    #[test]
    fn parses_minimal_document() {
        let content = parse_content(MINIMAL).unwrap();
        assert_eq!(content.profile.name, "Ada");
        assert_eq!(content.skill_count(), 1);
        assert_eq!(content.career[0].end_year, None);
        assert_eq!(content.methodology[0].color, Color32::from_rgb(0x22, 0xd3, 0xee));
    }

    #[test]
    fn clamps_skill_level() {
        let content = parse_content(MINIMAL).unwrap();
        assert_eq!(content.skill_groups[0].skills[0].level, 100);
    }

    #[test]
    fn rejects_inverted_career_span() {
        let raw = MINIMAL.replace(r#""start": 2019"#, r#""start": 2019, "end": 2010"#);
        let error = parse_content(&raw).unwrap_err();
        assert!(error.to_string().contains("ends (2010) before it starts (2019)"));
    }

    #[test]
    fn rejects_bad_color() {
        let raw = MINIMAL.replace("#22d3ee", "teal");
        assert!(parse_content(&raw).is_err());
    }

    #[test]
    fn rejects_missing_profile() {
        assert!(parse_content("{}").is_err());
    }
}
