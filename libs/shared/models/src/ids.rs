//! Arena indices. Every cross-table reference inside the planner is one of these
//! rather than a string lookup; string ids are resolved to an index exactly once,
//! during normalization, and never looked up again on a hot path.

macro_rules! arena_idx {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub usize);

        impl $name {
            pub fn index(self) -> usize {
                self.0
            }
        }
    };
}

arena_idx!(PhysicianIdx);
arena_idx!(LocationIdx);
arena_idx!(RoomIdx);
arena_idx!(SessionIdx);
