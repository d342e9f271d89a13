//! Closed category sets that parameterize a generation request.

use serde::{Deserialize, Serialize};

/// What kind of artifact a category produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// A literary quote in an author's style.
    Quote,
    /// A meme caption in a meme style.
    Meme,
}

impl Mode {
    /// Lower-case noun used in filenames and user-facing messages.
    #[must_use]
    pub fn noun(self) -> &'static str {
        match self {
            Self::Quote => "quote",
            Self::Meme => "meme",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.noun())
    }
}

/// Bengali authors and poets available in quote mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthorCategory {
    /// রবীন্দ্রনাথ ঠাকুর
    Rabindranath,
    /// কাজী নজরুল ইসলাম
    KaziNazrul,
    /// হুমায়ূন আহমেদ
    HumayunAhmed,
    /// জীবনানন্দ দাশ
    JibananandaDas,
    /// শরৎচন্দ্র চট্টোপাধ্যায়
    SaratChandra,
    /// তসলিমা নাসরিন
    TaslimaNasrin,
    /// বুদ্ধদেব বসু
    BuddhadebBasu,
    /// আধুনিক বাংলা সাহিত্য
    ModernBangla,
}

impl AuthorCategory {
    /// All authors in display order.
    pub const ALL: [Self; 8] = [
        Self::Rabindranath,
        Self::KaziNazrul,
        Self::HumayunAhmed,
        Self::JibananandaDas,
        Self::SaratChandra,
        Self::TaslimaNasrin,
        Self::BuddhadebBasu,
        Self::ModernBangla,
    ];

    /// Bengali display label, also embedded in the generation instruction.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Rabindranath => "রবীন্দ্রনাথ ঠাকুর",
            Self::KaziNazrul => "কাজী নজরুল ইসলাম",
            Self::HumayunAhmed => "হুমায়ূন আহমেদ",
            Self::JibananandaDas => "জীবনানন্দ দাশ",
            Self::SaratChandra => "শরৎচন্দ্র চট্টোপাধ্যায়",
            Self::TaslimaNasrin => "তসলিমা নাসরিন",
            Self::BuddhadebBasu => "বুদ্ধদেব বসু",
            Self::ModernBangla => "আধুনিক বাংলা সাহিত্য",
        }
    }

    /// ASCII identifier for command lines.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::Rabindranath => "rabindranath",
            Self::KaziNazrul => "kazi-nazrul",
            Self::HumayunAhmed => "humayun-ahmed",
            Self::JibananandaDas => "jibanananda-das",
            Self::SaratChandra => "sarat-chandra",
            Self::TaslimaNasrin => "taslima-nasrin",
            Self::BuddhadebBasu => "buddhadeb-basu",
            Self::ModernBangla => "modern-bangla",
        }
    }
}

/// Meme styles available in meme mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MemeCategory {
    /// অফিস জীবন
    OfficeLife,
    /// পরীক্ষার মৌসুম
    ExamSeason,
    /// প্রেম ও সম্পর্ক
    Relationships,
    /// ক্রিকেট
    Cricket,
    /// ঢাকার জ্যাম
    DhakaTraffic,
    /// বাঙালি পরিবার
    BengaliFamily,
    /// ছাত্রজীবন
    StudentLife,
    /// খাদ্যরসিক
    Foodie,
}

impl MemeCategory {
    /// All meme styles in display order.
    pub const ALL: [Self; 8] = [
        Self::OfficeLife,
        Self::ExamSeason,
        Self::Relationships,
        Self::Cricket,
        Self::DhakaTraffic,
        Self::BengaliFamily,
        Self::StudentLife,
        Self::Foodie,
    ];

    /// Bengali display label, also embedded in the generation instruction.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::OfficeLife => "অফিস জীবন",
            Self::ExamSeason => "পরীক্ষার মৌসুম",
            Self::Relationships => "প্রেম ও সম্পর্ক",
            Self::Cricket => "ক্রিকেট",
            Self::DhakaTraffic => "ঢাকার জ্যাম",
            Self::BengaliFamily => "বাঙালি পরিবার",
            Self::StudentLife => "ছাত্রজীবন",
            Self::Foodie => "খাদ্যরসিক",
        }
    }

    /// ASCII identifier for command lines.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::OfficeLife => "office-life",
            Self::ExamSeason => "exam-season",
            Self::Relationships => "relationships",
            Self::Cricket => "cricket",
            Self::DhakaTraffic => "dhaka-traffic",
            Self::BengaliFamily => "bengali-family",
            Self::StudentLife => "student-life",
            Self::Foodie => "foodie",
        }
    }
}

/// A generation selector: an author in quote mode or a style in meme mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "lowercase")]
pub enum Category {
    /// Quote mode author.
    Author(AuthorCategory),
    /// Meme mode style.
    Meme(MemeCategory),
}

impl Category {
    /// The mode this category belongs to.
    #[must_use]
    pub fn mode(self) -> Mode {
        match self {
            Self::Author(_) => Mode::Quote,
            Self::Meme(_) => Mode::Meme,
        }
    }

    /// Bengali display label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Author(a) => a.label(),
            Self::Meme(m) => m.label(),
        }
    }

    /// ASCII identifier.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::Author(a) => a.slug(),
            Self::Meme(m) => m.slug(),
        }
    }

    /// All categories of a mode, in display order.
    #[must_use]
    pub fn all(mode: Mode) -> Vec<Self> {
        match mode {
            Mode::Quote => AuthorCategory::ALL.into_iter().map(Self::Author).collect(),
            Mode::Meme => MemeCategory::ALL.into_iter().map(Self::Meme).collect(),
        }
    }

    /// Resolve user input to a category of `mode`.
    ///
    /// Accepts the Bengali label, the slug (case-insensitive) or a 1-based
    /// position in [`Category::all`].
    #[must_use]
    pub fn parse(mode: Mode, input: &str) -> Option<Self> {
        let input = input.trim();
        let all = Self::all(mode);

        if let Ok(index) = input.parse::<usize>() {
            return index.checked_sub(1).and_then(|i| all.get(i).copied());
        }

        all.into_iter()
            .find(|c| c.label() == input || c.slug().eq_ignore_ascii_case(input))
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::Author(AuthorCategory::HumayunAhmed)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
