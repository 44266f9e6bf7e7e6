//! Normalized product image paths.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A product image path, normalized to a public-relative form.
///
/// Catalog data arrives from several sources (remote API, static DB dumps,
/// admin input) with inconsistent prefixes left over from asset pipelines.
/// Normalization makes all of them resolve against the public image root:
///
/// - leading slashes are stripped
/// - a `src/assets/` prefix is rewritten to `assets/`
/// - an `assets/images/` prefix is rewritten to `images/`
/// - a `public/` prefix is stripped
/// - a trailing `.PNG` extension is lowercased
/// - an empty or missing path becomes the catalog placeholder
///
/// Prefix matching is case-insensitive, mirroring the asset layout these
/// paths come from.
///
/// ## Examples
///
/// ```
/// use jabuticaba_core::ImagePath;
///
/// assert_eq!(ImagePath::normalize("/assets/images/x.PNG").as_str(), "images/x.png");
/// assert_eq!(ImagePath::normalize("").as_str(), ImagePath::PLACEHOLDER);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImagePath(String);

impl ImagePath {
    /// Path substituted for a missing or empty catalog image.
    pub const PLACEHOLDER: &'static str = "images/badboy.png";

    /// Path used for order line items whose product is no longer in the
    /// catalog at checkout time.
    pub const CHECKOUT_PLACEHOLDER: &'static str = "assets/images/placeholder.png";

    /// Normalize a raw path into an `ImagePath`.
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self(Self::PLACEHOLDER.to_owned());
        }

        let mut out = trimmed.trim_start_matches('/').to_owned();
        out = rewrite_prefix(&out, "src/assets/", "assets/");
        out = rewrite_prefix(&out, "assets/images/", "images/");
        out = rewrite_prefix(&out, "public/", "");

        if let Some(stem) = strip_suffix_ignore_case(&out, ".png") {
            out = format!("{stem}.png");
        }

        Self(out)
    }

    /// The checkout placeholder as an already-normalized path.
    #[must_use]
    pub fn checkout_placeholder() -> Self {
        Self(Self::CHECKOUT_PLACEHOLDER.to_owned())
    }

    /// Returns the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImagePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ImagePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Replace `prefix` (matched case-insensitively) with `replacement`.
fn rewrite_prefix(s: &str, prefix: &str, replacement: &str) -> String {
    match (s.get(..prefix.len()), s.get(prefix.len()..)) {
        (Some(head), Some(rest)) if head.eq_ignore_ascii_case(prefix) => {
            format!("{replacement}{rest}")
        }
        _ => s.to_owned(),
    }
}

/// Strip `suffix` (matched case-insensitively), returning the stem.
fn strip_suffix_ignore_case<'a>(s: &'a str, suffix: &str) -> Option<&'a str> {
    let split = s.len().checked_sub(suffix.len())?;
    match (s.get(..split), s.get(split..)) {
        (Some(stem), Some(tail)) if tail.eq_ignore_ascii_case(suffix) => Some(stem),
        _ => None,
    }
}
