/// The variant on an operation.
///
/// The discriminants are ORed into a comparison's base index to find its display name, so for a given comparison the
/// if-exists variant must follow, then the negated variant, then the negated if-exists variant.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(u8)]
pub enum Variant {
    None = 0,
    IfExists = 1,
    Negated = 2,
    IfExistsNegated = 3,
}

impl Variant {
    pub(super) const ALL: [Variant; 4] = [Self::None, Self::IfExists, Self::Negated, Self::IfExistsNegated];

    #[inline]
    pub(super) fn as_usize(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn if_exists(self) -> bool {
        matches!(self, Self::IfExists | Self::IfExistsNegated)
    }

    #[inline]
    pub fn negated(self) -> bool {
        matches!(self, Self::Negated | Self::IfExistsNegated)
    }
}
