use atomic_polyfill::{AtomicU32, Ordering};
use core::ops::{BitOr, Not};

/// A set of mesh state bits.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Flags(u32);

impl Flags {
    pub const EMPTY: Flags = Flags(0);
    /// The node is currently acting as a provisioner.
    pub const PROVISIONER: Flags = Flags(1 << 0);
    /// The provisioning capability is valid and ready.
    pub const VALID_PROV: Flags = Flags(1 << 1);

    /// The pair downstream code treats as one "is provisioning" predicate.
    pub const PROVISIONING: Flags = Flags(Self::PROVISIONER.0 | Self::VALID_PROV.0);

    pub const fn bits(&self) -> u32 {
        self.0
    }

    pub const fn contains(&self, other: Flags) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn intersects(&self, other: Flags) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for Flags {
    type Output = Flags;

    fn bitor(self, rhs: Self) -> Self::Output {
        Flags(self.0 | rhs.0)
    }
}

impl Not for Flags {
    type Output = Flags;

    fn not(self) -> Self::Output {
        Flags(!self.0)
    }
}

/// Process-wide mesh state bits.
///
/// Every update is a single atomic read-modify-write, so a reader never
/// observes half of a multi-bit update.
pub struct MeshFlags {
    bits: AtomicU32,
}

impl Default for MeshFlags {
    fn default() -> Self {
        Self::new()
    }
}

impl MeshFlags {
    pub const fn new() -> Self {
        Self {
            bits: AtomicU32::new(0),
        }
    }

    /// Atomically set `flags`, returning the previous state.
    pub fn set(&self, flags: Flags) -> Flags {
        Flags(self.bits.fetch_or(flags.0, Ordering::AcqRel))
    }

    /// Atomically clear `flags`, returning the previous state.
    pub fn clear(&self, flags: Flags) -> Flags {
        Flags(self.bits.fetch_and((!flags).0, Ordering::AcqRel))
    }

    pub fn get(&self) -> Flags {
        Flags(self.bits.load(Ordering::Acquire))
    }

    pub fn contains(&self, flags: Flags) -> bool {
        self.get().contains(flags)
    }

    pub fn is_provisioning(&self) -> bool {
        self.contains(Flags::PROVISIONING)
    }
}
