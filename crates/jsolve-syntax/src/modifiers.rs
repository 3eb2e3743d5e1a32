//! Declaration modifiers.

use bitflags::bitflags;

bitflags! {
    /// Modifier keywords on a declaration.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u16 {
        const PUBLIC = 1 << 0;
        const PROTECTED = 1 << 1;
        const PRIVATE = 1 << 2;
        const STATIC = 1 << 3;
        const FINAL = 1 << 4;
        const ABSTRACT = 1 << 5;
        const DEFAULT = 1 << 6;
        const SYNCHRONIZED = 1 << 7;
        const NATIVE = 1 << 8;
        const TRANSIENT = 1 << 9;
        const VOLATILE = 1 << 10;
        const STRICTFP = 1 << 11;
    }
}

impl Modifiers {
    #[inline]
    pub fn is_static(self) -> bool {
        self.contains(Self::STATIC)
    }

    #[inline]
    pub fn is_abstract(self) -> bool {
        self.contains(Self::ABSTRACT)
    }

    #[inline]
    pub fn is_private(self) -> bool {
        self.contains(Self::PRIVATE)
    }

    /// Modifier keywords in canonical source order.
    pub fn keywords(self) -> Vec<&'static str> {
        const ORDER: [(Modifiers, &str); 12] = [
            (Modifiers::PUBLIC, "public"),
            (Modifiers::PROTECTED, "protected"),
            (Modifiers::PRIVATE, "private"),
            (Modifiers::ABSTRACT, "abstract"),
            (Modifiers::DEFAULT, "default"),
            (Modifiers::STATIC, "static"),
            (Modifiers::FINAL, "final"),
            (Modifiers::TRANSIENT, "transient"),
            (Modifiers::VOLATILE, "volatile"),
            (Modifiers::SYNCHRONIZED, "synchronized"),
            (Modifiers::NATIVE, "native"),
            (Modifiers::STRICTFP, "strictfp"),
        ];
        ORDER
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, keyword)| *keyword)
            .collect()
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "public" => Self::PUBLIC,
            "protected" => Self::PROTECTED,
            "private" => Self::PRIVATE,
            "static" => Self::STATIC,
            "final" => Self::FINAL,
            "abstract" => Self::ABSTRACT,
            "default" => Self::DEFAULT,
            "synchronized" => Self::SYNCHRONIZED,
            "native" => Self::NATIVE,
            "transient" => Self::TRANSIENT,
            "volatile" => Self::VOLATILE,
            "strictfp" => Self::STRICTFP,
            _ => return None,
        })
    }
}
