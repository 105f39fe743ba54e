//! Per-endpoint capability flags
//!
//! Each endpoint declares the optional envelope fields or preconditions it
//! needs. Flags are independent members of a small set; the set is `Copy` and
//! usable in `const` endpoint descriptors.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single capability an endpoint can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndpointFlag {
    /// The envelope must carry the reseller `integration_id`.
    Integration,
}

impl EndpointFlag {
    /// Every known flag, in declaration order.
    pub const ALL: [EndpointFlag; 1] = [EndpointFlag::Integration];

    const fn mask(self) -> u32 {
        1 << (self as u32)
    }

    /// Flag name as it appears in serialized flag sets
    pub const fn name(self) -> &'static str {
        match self {
            Self::Integration => "Integration",
        }
    }
}

/// Set of [`EndpointFlag`]s.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FlagSet {
    bits: u32,
}

impl FlagSet {
    /// Empty set
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    /// Set holding exactly `flags`
    pub const fn from_flags(flags: &[EndpointFlag]) -> Self {
        let mut set = Self::new();
        let mut i = 0;
        while i < flags.len() {
            set.bits |= flags[i].mask();
            i += 1;
        }
        set
    }

    /// Rebuild a set from its compact form. Unknown bits are dropped.
    pub const fn from_bits(bits: u32) -> Self {
        let mut known = 0;
        let mut i = 0;
        while i < EndpointFlag::ALL.len() {
            known |= EndpointFlag::ALL[i].mask();
            i += 1;
        }
        Self { bits: bits & known }
    }

    /// Compact form of the set
    pub const fn bits(self) -> u32 {
        self.bits
    }

    /// Whether `flag` is a member
    pub const fn contains(self, flag: EndpointFlag) -> bool {
        self.bits & flag.mask() != 0
    }

    /// Copy of the set with `flag` added
    pub const fn with(self, flag: EndpointFlag) -> Self {
        Self { bits: self.bits | flag.mask() }
    }

    pub fn insert(&mut self, flag: EndpointFlag) -> &mut Self {
        self.bits |= flag.mask();
        self
    }

    pub fn remove(&mut self, flag: EndpointFlag) -> &mut Self {
        self.bits &= !flag.mask();
        self
    }

    pub fn toggle(&mut self, flag: EndpointFlag) -> &mut Self {
        self.bits ^= flag.mask();
        self
    }

    pub fn clear(&mut self) -> &mut Self {
        self.bits = 0;
        self
    }

    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Members in declaration order
    pub fn iter(self) -> impl Iterator<Item = EndpointFlag> {
        EndpointFlag::ALL.into_iter().filter(move |flag| self.contains(*flag))
    }
}

impl FromIterator<EndpointFlag> for FlagSet {
    fn from_iter<I: IntoIterator<Item = EndpointFlag>>(iter: I) -> Self {
        let mut set = Self::new();
        for flag in iter {
            set.insert(flag);
        }
        set
    }
}

impl fmt::Debug for FlagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl Serialize for FlagSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for FlagSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<EndpointFlag>::deserialize(deserializer).map(|flags| flags.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_has_no_members() {
        let set = FlagSet::new();
        assert!(set.is_empty());
        assert!(!set.contains(EndpointFlag::Integration));
        assert_eq!(set.iter().count(), 0);
    }

    #[test]
    fn insert_remove_toggle() {
        let mut set = FlagSet::new();
        set.insert(EndpointFlag::Integration);
        assert!(set.contains(EndpointFlag::Integration));

        set.remove(EndpointFlag::Integration);
        assert!(set.is_empty());

        set.toggle(EndpointFlag::Integration);
        assert!(set.contains(EndpointFlag::Integration));
        set.toggle(EndpointFlag::Integration);
        assert!(set.is_empty());

        set.insert(EndpointFlag::Integration).clear();
        assert!(set.is_empty());
    }

    #[test]
    fn const_construction_matches_runtime_insert() {
        const INTEGRATION: FlagSet = FlagSet::from_flags(&[EndpointFlag::Integration]);
        let mut runtime = FlagSet::new();
        runtime.insert(EndpointFlag::Integration);

        assert_eq!(INTEGRATION, runtime);
        assert_eq!(FlagSet::new().with(EndpointFlag::Integration), runtime);
    }

    #[test]
    fn bits_round_trip_and_drop_unknown() {
        let set = FlagSet::from_flags(&[EndpointFlag::Integration]);
        assert_eq!(FlagSet::from_bits(set.bits()), set);
        assert_eq!(FlagSet::from_bits(0b110), FlagSet::new());
    }

    #[test]
    fn serializes_as_flag_names() {
        let set = FlagSet::from_flags(&[EndpointFlag::Integration]);
        let json = serde_json::to_string(&set).expect("serializable");
        assert_eq!(json, r#"["Integration"]"#);

        let parsed: FlagSet = serde_json::from_str(&json).expect("deserializable");
        assert_eq!(parsed, set);
        assert_eq!(format!("{set:?}"), "{Integration}");
    }
}
