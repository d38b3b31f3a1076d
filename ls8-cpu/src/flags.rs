use std::cmp::Ordering;

const LESS: u8 = 0b100;
const GREATER: u8 = 0b010;
const EQUAL: u8 = 0b001;

/// The FL register, laid out as `00000LGE`. Zero until the first compare,
/// then exactly one bit set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Flags {
    bits: u8,
}

impl Flags {
    pub fn from_ordering(ordering: Ordering) -> Self {
        let bits = match ordering {
            Ordering::Less => LESS,
            Ordering::Greater => GREATER,
            Ordering::Equal => EQUAL,
        };
        Flags { bits }
    }

    pub fn bits(self) -> u8 {
        self.bits
    }

    pub fn is_equal(self) -> bool {
        self.bits == EQUAL
    }

    /// Result of the most recent compare, if any.
    pub fn comparison(self) -> Option<Ordering> {
        match self.bits {
            LESS => Some(Ordering::Less),
            GREATER => Some(Ordering::Greater),
            EQUAL => Some(Ordering::Equal),
            _ => None,
        }
    }
}
