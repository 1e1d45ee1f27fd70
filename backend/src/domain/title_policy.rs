//! Title uniqueness policy applied when an article is modified.

use std::fmt;
use std::str::FromStr;

use crate::domain::ArticleId;

/// How an update treats the article's own current title.
///
/// `Strict` counts every article holding the title as a conflict, including
/// the one being modified, so resubmitting an unchanged title is rejected.
/// `ExcludeCurrent` ignores the article under modification.
///
/// # Examples
/// ```
/// use article_service::domain::{ArticleId, TitlePolicy};
///
/// let id = ArticleId::new("a");
/// assert!(TitlePolicy::Strict.conflicts(&id, Some(&id)));
/// assert!(!TitlePolicy::ExcludeCurrent.conflicts(&id, Some(&id)));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TitlePolicy {
    #[default]
    Strict,
    ExcludeCurrent,
}

impl TitlePolicy {
    /// Decide whether `holder`, the article already using a title, blocks a
    /// write to `target` (`None` when creating).
    #[must_use]
    pub fn conflicts(self, holder: &ArticleId, target: Option<&ArticleId>) -> bool {
        match (self, target) {
            (Self::ExcludeCurrent, Some(target)) => holder != target,
            _ => true,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::ExcludeCurrent => "exclude-current",
        }
    }
}

impl fmt::Display for TitlePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown policy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown title policy {0:?}; expected \"strict\" or \"exclude-current\"")]
pub struct ParseTitlePolicyError(String);

impl FromStr for TitlePolicy {
    type Err = ParseTitlePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "exclude-current" | "exclude_current" => Ok(Self::ExcludeCurrent),
            _ => Err(ParseTitlePolicyError(s.to_owned())),
        }
    }
}
