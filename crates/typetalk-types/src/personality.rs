//! Personality type reference table.
//!
//! The classifier labels each message with one of 16 four-letter codes.
//! Each code maps to a display name and an accent color used when rendering
//! the badge on a bot reply. Codes outside the table fall back to
//! [`PersonalityInfo::unknown`].

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// One of the 16 personality codes the classifier can return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PersonalityCode {
    Intj,
    Intp,
    Entj,
    Entp,
    Infj,
    Infp,
    Enfj,
    Enfp,
    Istj,
    Isfj,
    Estj,
    Esfj,
    Istp,
    Isfp,
    Estp,
    Esfp,
}

impl PersonalityCode {
    /// Every code, in the order the reference table lists them.
    pub const ALL: [PersonalityCode; 16] = [
        PersonalityCode::Intj,
        PersonalityCode::Intp,
        PersonalityCode::Entj,
        PersonalityCode::Entp,
        PersonalityCode::Infj,
        PersonalityCode::Infp,
        PersonalityCode::Enfj,
        PersonalityCode::Enfp,
        PersonalityCode::Istj,
        PersonalityCode::Isfj,
        PersonalityCode::Estj,
        PersonalityCode::Esfj,
        PersonalityCode::Istp,
        PersonalityCode::Isfp,
        PersonalityCode::Estp,
        PersonalityCode::Esfp,
    ];

    /// The four-letter code as returned by the classifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            PersonalityCode::Intj => "INTJ",
            PersonalityCode::Intp => "INTP",
            PersonalityCode::Entj => "ENTJ",
            PersonalityCode::Entp => "ENTP",
            PersonalityCode::Infj => "INFJ",
            PersonalityCode::Infp => "INFP",
            PersonalityCode::Enfj => "ENFJ",
            PersonalityCode::Enfp => "ENFP",
            PersonalityCode::Istj => "ISTJ",
            PersonalityCode::Isfj => "ISFJ",
            PersonalityCode::Estj => "ESTJ",
            PersonalityCode::Esfj => "ESFJ",
            PersonalityCode::Istp => "ISTP",
            PersonalityCode::Isfp => "ISFP",
            PersonalityCode::Estp => "ESTP",
            PersonalityCode::Esfp => "ESFP",
        }
    }

    /// Human-readable archetype name.
    pub fn display_name(&self) -> &'static str {
        match self {
            PersonalityCode::Intj => "The Architect",
            PersonalityCode::Intp => "The Logician",
            PersonalityCode::Entj => "The Commander",
            PersonalityCode::Entp => "The Debater",
            PersonalityCode::Infj => "The Advocate",
            PersonalityCode::Infp => "The Mediator",
            PersonalityCode::Enfj => "The Protagonist",
            PersonalityCode::Enfp => "The Campaigner",
            PersonalityCode::Istj => "The Logistician",
            PersonalityCode::Isfj => "The Defender",
            PersonalityCode::Estj => "The Executive",
            PersonalityCode::Esfj => "The Consul",
            PersonalityCode::Istp => "The Virtuoso",
            PersonalityCode::Isfp => "The Adventurer",
            PersonalityCode::Estp => "The Entrepreneur",
            PersonalityCode::Esfp => "The Entertainer",
        }
    }

    /// Accent color for badges and reply headers.
    pub fn accent(&self) -> AccentColor {
        let hex = match self {
            PersonalityCode::Intj => 0x667eea,
            PersonalityCode::Intp => 0x764ba2,
            PersonalityCode::Entj => 0xf093fb,
            PersonalityCode::Entp => 0xf5576c,
            PersonalityCode::Infj => 0x4facfe,
            PersonalityCode::Infp => 0x00f2fe,
            PersonalityCode::Enfj => 0x43e97b,
            PersonalityCode::Enfp => 0x38f9d7,
            PersonalityCode::Istj => 0xfa709a,
            PersonalityCode::Isfj => 0xfee140,
            PersonalityCode::Estj => 0x30cfd0,
            PersonalityCode::Esfj => 0xa8edea,
            PersonalityCode::Istp => 0xff6e7f,
            PersonalityCode::Isfp => 0xbfe9ff,
            PersonalityCode::Estp => 0xfbc2eb,
            PersonalityCode::Esfp => 0xa6c1ee,
        };
        AccentColor::from_hex(hex)
    }

    pub fn info(&self) -> PersonalityInfo {
        PersonalityInfo {
            code: Some(*self),
            name: self.display_name(),
            color: self.accent(),
        }
    }
}

impl fmt::Display for PersonalityCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PersonalityCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        PersonalityCode::ALL
            .into_iter()
            .find(|code| code.as_str() == upper)
            .ok_or_else(|| format!("unknown personality code: '{}'", s.trim()))
    }
}

/// 24-bit RGB accent color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccentColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl AccentColor {
    /// Accent used for labels that are not in the table.
    pub const DEFAULT: AccentColor = AccentColor::from_hex(0x667eea);

    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }
}

impl fmt::Display for AccentColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Display data for a personality label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PersonalityInfo {
    /// `None` when the label did not match any known code.
    pub code: Option<PersonalityCode>,
    pub name: &'static str,
    pub color: AccentColor,
}

impl PersonalityInfo {
    /// Placeholder for labels outside the table.
    pub fn unknown() -> Self {
        Self {
            code: None,
            name: "Unknown",
            color: AccentColor::DEFAULT,
        }
    }

    /// Resolve a raw classifier label, falling back to [`PersonalityInfo::unknown`].
    pub fn lookup(label: &str) -> Self {
        label
            .parse::<PersonalityCode>()
            .map(|code| code.info())
            .unwrap_or_else(|_| Self::unknown())
    }

    pub fn is_known(&self) -> bool {
        self.code.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_has_sixteen_distinct_codes() {
        let mut codes: Vec<&str> = PersonalityCode::ALL.iter().map(|c| c.as_str()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), 16);
        assert!(codes.iter().all(|c| c.len() == 4));
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("infp".parse::<PersonalityCode>(), Ok(PersonalityCode::Infp));
        assert_eq!(" EsTj ".parse::<PersonalityCode>(), Ok(PersonalityCode::Estj));
        assert!("XXXX".parse::<PersonalityCode>().is_err());
    }

    #[test]
    fn test_display_matches_code() {
        for code in PersonalityCode::ALL {
            assert_eq!(code.to_string().parse::<PersonalityCode>(), Ok(code));
        }
    }

    #[test]
    fn test_lookup_known_code() {
        let info = PersonalityInfo::lookup("INFP");
        assert_eq!(info.code, Some(PersonalityCode::Infp));
        assert_eq!(info.name, "The Mediator");
        assert_eq!(info.color.to_string(), "#00f2fe");
    }

    #[test]
    fn test_lookup_unknown_falls_back() {
        let info = PersonalityInfo::lookup("ABCD");
        assert!(!info.is_known());
        assert_eq!(info.name, "Unknown");
        assert_eq!(info.color, AccentColor::DEFAULT);
        assert_eq!(info.color.to_string(), "#667eea");
    }

    #[test]
    fn test_accent_from_hex() {
        let c = AccentColor::from_hex(0xfee140);
        assert_eq!((c.r, c.g, c.b), (0xfe, 0xe1, 0x40));
    }

    #[test]
    fn test_code_serde() {
        let json = serde_json::to_string(&PersonalityCode::Enfj).unwrap();
        assert_eq!(json, "\"ENFJ\"");
        let parsed: PersonalityCode = serde_json::from_str("\"ISFP\"").unwrap();
        assert_eq!(parsed, PersonalityCode::Isfp);
    }
}
