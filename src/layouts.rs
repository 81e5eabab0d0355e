use crate::error::KsResult;
use crate::layout::Layout;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// Layouts shipped with the binary, usable by name without a definition file.
#[derive(Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash)]
#[strum(serialize_all = "snake_case")]
pub enum KnownLayout {
    Qwerty,
    Colemak,
    #[strum(serialize = "colemak_dh")]
    ColemakDh,
    Dvorak,
    Workman,
    Semimak,
}

impl KnownLayout {
    pub fn definition(&self) -> &'static str {
        match self {
            Self::Qwerty => {
                "qwerty:\n\
                 q w e r t | y u i o p\n\
                 a s d f g | h j k l ;\n\
                 z x c v b | n m , . /\n"
            }
            Self::Colemak => {
                "colemak:\n\
                 q w f p g | j l u y ;\n\
                 a r s t d | h n e i o\n\
                 z x c v b | k m , . /\n"
            }
            // ANSI variant (bottom row keeps z x c on the left).
            Self::ColemakDh => {
                "colemak_dh:\n\
                 q w f p b | j l u y ;\n\
                 a r s t g | m n e i o\n\
                 z x c d v | k h , . /\n"
            }
            Self::Dvorak => {
                "dvorak:\n\
                 ' , . p y | f g c r l\n\
                 a o e u i | d h t n s\n\
                 ; q j k x | b m w v z\n"
            }
            Self::Workman => {
                "workman:\n\
                 q d r w b | j f u p ;\n\
                 a s h t g | y n e o i\n\
                 z x m c v | k l , . /\n"
            }
            Self::Semimak => {
                "semimak:\n\
                 f l h v z | q w u o y\n\
                 s r n t k | c d e a i\n\
                 x ' b m j | p g , . /\n"
            }
        }
    }

    pub fn layout(&self) -> KsResult<Layout> {
        Layout::parse(self.definition())
    }
}

pub fn get_all_layouts() -> Vec<KnownLayout> {
    KnownLayout::iter().collect()
}
