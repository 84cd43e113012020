//! Branch Target Buffer (BTB).
//!
//! A direct-mapped table of resolved branch targets, indexed by the low PC
//! bits above the word offset. Entries carry no tag: an aliased PC that
//! indexes a valid entry simply inherits its prediction and is corrected at
//! resolution, the same way a cold entry would be.

/// An entry in the Branch Target Buffer.
#[derive(Clone, Copy, Default)]
struct BtbEntry {
    /// The predicted target address.
    target: u32,
    /// Indicates if this entry has been written by a resolved branch.
    valid: bool,
}

/// Branch Target Buffer structure.
pub struct Btb {
    table: Vec<BtbEntry>,
    size: usize,
}

impl Btb {
    /// Creates a BTB with `size` entries. `size` must be a power of 2.
    pub fn new(size: usize) -> Self {
        Self {
            table: vec![BtbEntry::default(); size],
            size,
        }
    }

    /// Calculates the table index for a program counter: `pc[2..]` masked to
    /// the table size (64 entries → `pc[7:2]`).
    fn index(&self, pc: u32) -> usize {
        ((pc >> 2) as usize) & (self.size - 1)
    }

    /// True when the indexed entry has been written.
    pub fn is_valid(&self, pc: u32) -> bool {
        self.table[self.index(pc)].valid
    }

    /// Looks up the stored target for `pc`, if the entry is valid.
    pub fn lookup(&self, pc: u32) -> Option<u32> {
        let e = self.table[self.index(pc)];
        if e.valid { Some(e.target) } else { None }
    }

    /// Writes the resolved target for `pc`.
    pub fn update(&mut self, pc: u32, target: u32) {
        let idx = self.index(pc);
        self.table[idx] = BtbEntry {
            target,
            valid: true,
        };
    }
}
