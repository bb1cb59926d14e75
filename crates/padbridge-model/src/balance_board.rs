//! Balance board arm of the canonical state.

use serde::{Deserialize, Serialize};

/// Raw load cell readings, one per corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BalanceBoard {
    pub tl: u16,
    pub tr: u16,
    pub bl: u16,
    pub br: u16,
    pub temperature: u8,
}

impl BalanceBoard {
    pub fn total(&self) -> u32 {
        u32::from(self.tl) + u32::from(self.tr) + u32::from(self.bl) + u32::from(self.br)
    }

    pub fn left(&self) -> i32 {
        i32::from(self.tl) + i32::from(self.bl)
    }

    pub fn right(&self) -> i32 {
        i32::from(self.tr) + i32::from(self.br)
    }

    pub fn top(&self) -> i32 {
        i32::from(self.tl) + i32::from(self.tr)
    }

    pub fn bottom(&self) -> i32 {
        i32::from(self.bl) + i32::from(self.br)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sums() {
        let bb = BalanceBoard {
            tl: 1,
            tr: 2,
            bl: 3,
            br: 4,
            temperature: 0,
        };
        assert_eq!(bb.total(), 10);
        assert_eq!(bb.left(), 4);
        assert_eq!(bb.right(), 6);
        assert_eq!(bb.top(), 3);
        assert_eq!(bb.bottom(), 7);
    }

    #[test]
    fn test_total_does_not_overflow() {
        let bb = BalanceBoard {
            tl: u16::MAX,
            tr: u16::MAX,
            bl: u16::MAX,
            br: u16::MAX,
            temperature: 0,
        };
        assert_eq!(bb.total(), 4 * u32::from(u16::MAX));
    }
}
