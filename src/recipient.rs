/// Fallback display name used when a profile carries no usable name at all.
pub const DEFAULT_DISPLAY_NAME: &str = "Student";

/// A user profile as the surrounding product hands it over.
///
/// Only the display name matters to the renderer; it is resolved once per
/// render and treated as opaque afterwards.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct RecipientProfile {
    pub full_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
}

impl RecipientProfile {
    pub fn named(full_name: impl Into<String>) -> Self {
        Self {
            full_name: Some(full_name.into()),
            ..Self::default()
        }
    }

    /// Resolve the display name: full name, then "first last", then
    /// username, then email, then [`DEFAULT_DISPLAY_NAME`].
    pub fn display_name(&self) -> String {
        if let Some(name) = non_empty(self.full_name.as_deref()) {
            return name.to_string();
        }

        let first = non_empty(self.first_name.as_deref());
        let last = non_empty(self.last_name.as_deref());
        match (first, last) {
            (Some(f), Some(l)) => return format!("{f} {l}"),
            (Some(f), None) => return f.to_string(),
            (None, Some(l)) => return l.to_string(),
            (None, None) => {}
        }

        if let Some(username) = non_empty(self.username.as_deref()) {
            return username.to_string();
        }
        if let Some(email) = non_empty(self.email.as_deref()) {
            return email.to_string();
        }
        DEFAULT_DISPLAY_NAME.to_string()
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_name_wins() {
        let p = RecipientProfile {
            full_name: Some("Ana Lima".to_string()),
            first_name: Some("Other".to_string()),
            username: Some("alima".to_string()),
            ..Default::default()
        };
        assert_eq!(p.display_name(), "Ana Lima");
    }

    #[test]
    fn first_last_when_full_name_missing() {
        let p = RecipientProfile {
            first_name: Some("Ana".to_string()),
            last_name: Some("Lima".to_string()),
            email: Some("a@example.com".to_string()),
            ..Default::default()
        };
        assert_eq!(p.display_name(), "Ana Lima");
    }

    #[test]
    fn partial_name_is_used_alone() {
        let p = RecipientProfile {
            last_name: Some("Lima".to_string()),
            ..Default::default()
        };
        assert_eq!(p.display_name(), "Lima");
    }

    #[test]
    fn username_then_email_then_default() {
        let p = RecipientProfile {
            username: Some("alima".to_string()),
            email: Some("a@example.com".to_string()),
            ..Default::default()
        };
        assert_eq!(p.display_name(), "alima");

        let p = RecipientProfile {
            email: Some("a@example.com".to_string()),
            ..Default::default()
        };
        assert_eq!(p.display_name(), "a@example.com");

        assert_eq!(RecipientProfile::default().display_name(), "Student");
    }

    #[test]
    fn whitespace_only_fields_are_skipped() {
        let p = RecipientProfile {
            full_name: Some("   ".to_string()),
            username: Some(" alima ".to_string()),
            ..Default::default()
        };
        assert_eq!(p.display_name(), "alima");
    }
}
