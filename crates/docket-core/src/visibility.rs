use serde::{Deserialize, Serialize};

/// Declared access level of a member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Public,
    Protected,
    Private,
    /// No access modifier.
    #[default]
    Package,
}

impl Visibility {
    /// Read the access level from the modifier keywords of a declaration.
    ///
    /// Only whole words count, so `publicKey` does not make a member public.
    #[must_use]
    pub fn from_declaration(text: &str) -> Self {
        let mut words = text
            .split(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$'))
            .filter(|word| !word.is_empty());
        words
            .find_map(|word| match word {
                "public" => Some(Self::Public),
                "protected" => Some(Self::Protected),
                "private" => Some(Self::Private),
                _ => None,
            })
            .unwrap_or_default()
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
            Self::Package => "package",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_modifiers() {
        assert_eq!(
            Visibility::from_declaration("public static int x;"),
            Visibility::Public
        );
        assert_eq!(
            Visibility::from_declaration("protected void run()"),
            Visibility::Protected
        );
        assert_eq!(
            Visibility::from_declaration("private final String name;"),
            Visibility::Private
        );
        assert_eq!(Visibility::from_declaration("int count;"), Visibility::Package);
    }

    #[test]
    fn ignores_partial_words() {
        assert_eq!(
            Visibility::from_declaration("String publicKey;"),
            Visibility::Package
        );
    }
}
