//! Rewrite policies: maps a section name to the instructions used to rewrite it.
//!
//! Dispatch is total: any name outside the known vocabulary, and an EXPERIENCE
//! section with no example text to learn vocabulary from, falls back to `Default`.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::rewrite::prompts::*;

/// Closed set of rewrite policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyKind {
    Experience,
    Education,
    Projects,
    Competitions,
    Skills,
    Default,
}

/// Fixed prose for one policy.
#[derive(Debug, Clone, Copy)]
pub struct PolicyDescriptor {
    pub kind: PolicyKind,
    pub system_template: &'static str,
    pub user_template: &'static str,
}

static POLICY_TABLE: &[PolicyDescriptor] = &[
    PolicyDescriptor {
        kind: PolicyKind::Experience,
        system_template: EXPERIENCE_SYSTEM,
        user_template: EXPERIENCE_USER,
    },
    PolicyDescriptor {
        kind: PolicyKind::Education,
        system_template: EDUCATION_SYSTEM,
        user_template: EDUCATION_USER,
    },
    PolicyDescriptor {
        kind: PolicyKind::Projects,
        system_template: PROJECTS_SYSTEM,
        user_template: PROJECTS_USER,
    },
    PolicyDescriptor {
        kind: PolicyKind::Competitions,
        system_template: COMPETITIONS_SYSTEM,
        user_template: COMPETITIONS_USER,
    },
    PolicyDescriptor {
        kind: PolicyKind::Skills,
        system_template: SKILLS_SYSTEM,
        user_template: SKILLS_USER,
    },
    PolicyDescriptor {
        kind: PolicyKind::Default,
        system_template: DEFAULT_SYSTEM,
        user_template: DEFAULT_USER,
    },
];

impl PolicyKind {
    /// Selects the policy for a section. `has_example` gates the Experience policy.
    pub fn select(section_name: &str, has_example: bool) -> Self {
        match section_name.trim().to_uppercase().as_str() {
            "EXPERIENCE" if has_example => PolicyKind::Experience,
            "EDUCATION" => PolicyKind::Education,
            "PROJECTS" => PolicyKind::Projects,
            "COMPETITIONS" => PolicyKind::Competitions,
            "SKILLS" => PolicyKind::Skills,
            _ => PolicyKind::Default,
        }
    }

    pub fn descriptor(self) -> &'static PolicyDescriptor {
        POLICY_TABLE
            .iter()
            .find(|d| d.kind == self)
            .unwrap_or(&POLICY_TABLE[POLICY_TABLE.len() - 1])
    }
}

/// A fully rendered system/user instruction pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instructions {
    pub policy: PolicyKind,
    pub system: String,
    pub user: String,
}

static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("valid regex"));

/// Deduplicated, lower-cased word tokens of the example text.
pub fn extract_keywords(example_text: &str) -> BTreeSet<String> {
    WORD_RE
        .find_iter(&example_text.to_lowercase())
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Renders the instructions for rewriting `content` under `section_name`.
pub fn build_instructions(section_name: &str, content: &str, example_text: &str) -> Instructions {
    let section = section_name.trim().to_uppercase();
    let has_example = !example_text.trim().is_empty();
    let descriptor = PolicyKind::select(&section, has_example).descriptor();

    let system = if descriptor.kind == PolicyKind::Experience {
        let keywords = extract_keywords(example_text)
            .into_iter()
            .collect::<Vec<_>>()
            .join(", ");
        descriptor.system_template.replace("{keywords}", &keywords)
    } else {
        descriptor.system_template.to_string()
    };

    let user = descriptor
        .user_template
        .replace("{section}", &section)
        .replace("{content}", content);

    Instructions {
        policy: descriptor.kind,
        system,
        user,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_is_case_insensitive() {
        for name in ["skills", "Skills", "SKILLS", " sKiLLs "] {
            assert_eq!(PolicyKind::select(name, false), PolicyKind::Skills);
        }
    }

    #[test]
    fn test_unknown_sections_use_default() {
        assert_eq!(PolicyKind::select("CERTIFICATIONS", true), PolicyKind::Default);
        assert_eq!(PolicyKind::select("Volunteering", false), PolicyKind::Default);
        assert_eq!(PolicyKind::select("", false), PolicyKind::Default);
    }

    #[test]
    fn test_experience_requires_example_text() {
        assert_eq!(PolicyKind::select("experience", true), PolicyKind::Experience);
        assert_eq!(PolicyKind::select("experience", false), PolicyKind::Default);

        let instructions = build_instructions("Experience", "Intern at Acme", "   ");
        assert_eq!(instructions.policy, PolicyKind::Default);
        assert!(instructions.user.contains("LinkedIn EXPERIENCE section"));
    }

    #[test]
    fn test_every_kind_has_a_descriptor() {
        for kind in [
            PolicyKind::Experience,
            PolicyKind::Education,
            PolicyKind::Projects,
            PolicyKind::Competitions,
            PolicyKind::Skills,
            PolicyKind::Default,
        ] {
            assert_eq!(kind.descriptor().kind, kind);
        }
    }

    #[test]
    fn test_extract_keywords_dedupes_and_lowercases() {
        let keywords = extract_keywords("Deployed Kubernetes; deployed KAFKA, kafka!");
        let expected: BTreeSet<String> = ["deployed", "kubernetes", "kafka"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(keywords, expected);
    }

    #[test]
    fn test_experience_prompt_embeds_example_vocabulary() {
        let instructions = build_instructions(
            "EXPERIENCE",
            "Intern at Acme, wrote scripts",
            "Engineered a cross-functional Pipeline",
        );
        assert_eq!(instructions.policy, PolicyKind::Experience);
        assert!(instructions.system.contains("engineered"));
        assert!(instructions.system.contains("pipeline"));
        assert!(!instructions.system.contains("{keywords}"));
        assert!(instructions.user.contains("Intern at Acme, wrote scripts"));
        assert!(instructions.user.contains("STAR framework"));
    }

    #[test]
    fn test_default_prompt_names_the_section() {
        let instructions = build_instructions("certifications", "AWS SA", "");
        assert_eq!(instructions.system, DEFAULT_SYSTEM);
        assert_eq!(
            instructions.user,
            "Develop a LinkedIn CERTIFICATIONS section using the following resume content: AWS SA."
        );
    }

    #[test]
    fn test_policies_have_distinct_tone() {
        let systems: BTreeSet<_> = POLICY_TABLE.iter().map(|d| d.system_template).collect();
        assert_eq!(systems.len(), POLICY_TABLE.len());
    }
}
