use serde::{Deserialize, Serialize};

/// The kind of a declaration reported by the structural provider.
///
/// Mirrors the subset of LSP `SymbolKind` values that matter for
/// documentation extraction. Everything else collapses into [`Other`].
///
/// [`Other`]: DeclarationKind::Other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    Class,
    /// Also carries annotation types, which LSP has no kind of its own for.
    Interface,
    Enum,
    Struct,
    Method,
    Constructor,
    Function,
    Field,
    Property,
    Constant,
    EnumMember,
    Other,
}

impl DeclarationKind {
    /// Map the numeric LSP `SymbolKind` wire value.
    #[must_use]
    pub const fn from_lsp(value: u64) -> Self {
        match value {
            5 => Self::Class,
            6 => Self::Method,
            7 => Self::Property,
            8 => Self::Field,
            9 => Self::Constructor,
            10 => Self::Enum,
            11 => Self::Interface,
            12 => Self::Function,
            14 => Self::Constant,
            22 => Self::EnumMember,
            23 => Self::Struct,
            _ => Self::Other,
        }
    }

    /// Class, interface, enum or struct-like declarations that own members.
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(self, Self::Class | Self::Interface | Self::Enum | Self::Struct)
    }

    #[must_use]
    pub const fn is_callable(self) -> bool {
        matches!(self, Self::Method | Self::Constructor | Self::Function)
    }

    #[must_use]
    pub const fn is_data_member(self) -> bool {
        matches!(self, Self::Field | Self::Property | Self::Constant)
    }

    #[must_use]
    pub const fn is_enum_constant(self) -> bool {
        matches!(self, Self::EnumMember)
    }

    /// Callables, data members and enum constants.
    #[must_use]
    pub const fn is_leaf(self) -> bool {
        self.is_callable() || self.is_data_member() || self.is_enum_constant()
    }
}

impl std::fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Enum => "enum",
            Self::Struct => "struct",
            Self::Method => "method",
            Self::Constructor => "constructor",
            Self::Function => "function",
            Self::Field => "field",
            Self::Property => "property",
            Self::Constant => "constant",
            Self::EnumMember => "enum_member",
            Self::Other => "other",
        };
        write!(f, "{s}")
    }
}
