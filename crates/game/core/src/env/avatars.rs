//! The fixed avatar roster a side can pick from.
use core::fmt;

use super::RandomSource;

/// Glyphs in roster order; [`AvatarId`] indexes into this table.
pub const AVATARS: [&str; 10] = [
    "\u{1F409}", // dragon
    "\u{1F984}", // unicorn
    "\u{1F916}", // robot
    "\u{1F480}", // skull
    "\u{1F431}", // cat
    "\u{1F525}", // fire
    "\u{1F432}", // dragon face
    "\u{1F47E}", // alien monster
    "\u{1F98A}", // fox
    "\u{1F43C}", // panda
];

/// Index of an avatar in [`AVATARS`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AvatarId(pub u8);

impl AvatarId {
    pub const COUNT: usize = AVATARS.len();

    /// Returns `None` when the id is outside the roster.
    pub fn glyph(self) -> Option<&'static str> {
        AVATARS.get(usize::from(self.0)).copied()
    }

    pub fn is_valid(self) -> bool {
        usize::from(self.0) < Self::COUNT
    }

    pub fn all() -> impl Iterator<Item = AvatarId> {
        (0..Self::COUNT as u8).map(AvatarId)
    }

    /// Looks up an avatar by its glyph.
    pub fn from_glyph(glyph: &str) -> Option<AvatarId> {
        AVATARS
            .iter()
            .position(|candidate| *candidate == glyph)
            .map(|index| AvatarId(index as u8))
    }

    /// Picks uniformly from the roster.
    pub fn random(rng: &mut dyn RandomSource) -> AvatarId {
        AvatarId(rng.pick_index(Self::COUNT) as u8)
    }
}

impl fmt::Display for AvatarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.glyph() {
            Some(glyph) => f.write_str(glyph),
            None => write!(f, "#{}", self.0),
        }
    }
}
