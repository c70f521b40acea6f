//! Pool aliases, that allow a structure to swap the pools targeted by its connectors
//! depending on its position.

use std::collections::HashMap;

use glam::IVec3;

use crate::util::JavaRandom;
use crate::ident::Ident;

use super::PoolError;


/// A binding of pool aliases, resolved once per structure.
#[derive(Debug, Clone)]
pub enum PoolAliasBinding {
    /// The alias is always replaced by the target.
    Direct {
        alias: Ident,
        target: Ident,
    },
    /// The alias is replaced by one of the weighted targets.
    Random {
        alias: Ident,
        targets: Vec<(Ident, u32)>,
    },
    /// One of the weighted groups is picked and all of its bindings are resolved.
    RandomGroup {
        groups: Vec<(Vec<PoolAliasBinding>, u32)>,
    },
}

impl PoolAliasBinding {

    /// Resolve this binding, calling the given function for each alias and its target.
    /// A binding with no weight leaves its alias unbound.
    fn resolve(&self, rand: &mut JavaRandom, out: &mut impl FnMut(&Ident, &Ident)) -> Result<(), PoolError> {
        match self {
            PoolAliasBinding::Direct { alias, target } => out(alias, target),
            PoolAliasBinding::Random { alias, targets } => {
                check_total_weight(targets)?;
                if let Some(target) = rand.next_weighted(targets) {
                    out(alias, target);
                }
            }
            PoolAliasBinding::RandomGroup { groups } => {
                check_total_weight(groups)?;
                if let Some(group) = rand.next_weighted(groups) {
                    for binding in group {
                        binding.resolve(rand, out)?;
                    }
                }
            }
        }
        Ok(())
    }

}

/// Weights of a binding are summed in a single draw, so the sum must fit in an `i32`.
fn check_total_weight<T>(items: &[(T, u32)]) -> Result<(), PoolError> {
    let total = items.iter().map(|&(_, weight)| weight as u64).sum::<u64>();
    if total > i32::MAX as u64 {
        Err(PoolError::AliasWeightOverflow(total))
    } else {
        Ok(())
    }
}


/// Resolved aliases, every key without alias resolves to itself.
#[derive(Debug, Clone, Default)]
pub struct PoolAliasLookup {
    aliases: HashMap<Ident, Ident>,
}

impl PoolAliasLookup {

    /// The lookup that never changes a key.
    #[inline]
    pub fn identity() -> Self {
        Self::default()
    }

    /// Resolve all bindings with a random source derived from the seed and the
    /// position of the structure. An alias bound twice is an error, and so are weights
    /// summing above `i32::MAX`.
    pub fn from_bindings(bindings: &[PoolAliasBinding], pos: IVec3, seed: i64) -> Result<Self, PoolError> {

        if bindings.is_empty() {
            return Ok(Self::identity());
        }

        let positional_seed = JavaRandom::new(seed).next_long();
        let mut rand = JavaRandom::new_positional(positional_seed, pos);

        let mut aliases = HashMap::new();
        let mut duplicate = None;

        for binding in bindings {
            binding.resolve(&mut rand, &mut |alias, target| {
                if aliases.insert(alias.clone(), target.clone()).is_some() && duplicate.is_none() {
                    duplicate = Some(alias.clone());
                }
            })?;
        }

        match duplicate {
            Some(alias) => Err(PoolError::DuplicateAlias(alias)),
            None => Ok(Self { aliases }),
        }

    }

    /// Return the pool key to use in place of the given one.
    pub fn lookup(&self, key: &Ident) -> Ident {
        self.aliases.get(key).unwrap_or(key).clone()
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        self.aliases.is_empty()
    }

}


#[cfg(test)]
mod tests {

    use super::*;

    fn id(s: &str) -> Ident {
        Ident::parse(s).unwrap()
    }

    #[test]
    fn identity() {
        let lookup = PoolAliasLookup::from_bindings(&[], IVec3::ZERO, 0).unwrap();
        assert!(lookup.is_identity());
        assert_eq!(lookup.lookup(&id("a")), id("a"));
    }

    #[test]
    fn direct_and_random() {

        let bindings = [
            PoolAliasBinding::Direct { alias: id("a"), target: id("b") },
            PoolAliasBinding::Random { alias: id("c"), targets: vec![(id("d"), 1), (id("e"), 1)] },
        ];

        let lookup = PoolAliasLookup::from_bindings(&bindings, IVec3::new(16, 64, -32), 1234).unwrap();
        assert_eq!(lookup.lookup(&id("a")), id("b"));
        assert!([id("d"), id("e")].contains(&lookup.lookup(&id("c"))));
        assert_eq!(lookup.lookup(&id("f")), id("f"));

        // Same seed and position, same resolution.
        let again = PoolAliasLookup::from_bindings(&bindings, IVec3::new(16, 64, -32), 1234).unwrap();
        assert_eq!(lookup.lookup(&id("c")), again.lookup(&id("c")));

        // Over many positions, both targets are used.
        let targets = (0..64)
            .map(|x| PoolAliasLookup::from_bindings(&bindings, IVec3::new(x * 16, 64, 0), 1234).unwrap().lookup(&id("c")))
            .collect::<Vec<_>>();
        assert!(targets.contains(&id("d")));
        assert!(targets.contains(&id("e")));

    }

    #[test]
    fn random_group() {

        let bindings = [
            PoolAliasBinding::RandomGroup { groups: vec![
                (vec![
                    PoolAliasBinding::Direct { alias: id("a"), target: id("a1") },
                    PoolAliasBinding::Direct { alias: id("b"), target: id("b1") },
                ], 1),
                (vec![
                    PoolAliasBinding::Direct { alias: id("a"), target: id("a2") },
                    PoolAliasBinding::Direct { alias: id("b"), target: id("b2") },
                ], 1),
            ] },
        ];

        for x in 0..16 {
            let lookup = PoolAliasLookup::from_bindings(&bindings, IVec3::new(x, 0, 0), 0).unwrap();
            // Bindings of a group are always applied together.
            let a = lookup.lookup(&id("a"));
            let b = lookup.lookup(&id("b"));
            assert_eq!(&a.path()[1..], &b.path()[1..]);
        }

    }

    #[test]
    fn zero_weight() {

        let bindings = [
            PoolAliasBinding::Random { alias: id("a"), targets: vec![(id("b"), 0)] },
            PoolAliasBinding::Random { alias: id("c"), targets: vec![] },
            PoolAliasBinding::RandomGroup { groups: vec![
                (vec![PoolAliasBinding::Direct { alias: id("d"), target: id("e") }], 0),
            ] },
            PoolAliasBinding::Direct { alias: id("f"), target: id("g") },
        ];

        // Bindings without weight leave their aliases unbound.
        let lookup = PoolAliasLookup::from_bindings(&bindings, IVec3::ZERO, 0).unwrap();
        assert_eq!(lookup.lookup(&id("a")), id("a"));
        assert_eq!(lookup.lookup(&id("c")), id("c"));
        assert_eq!(lookup.lookup(&id("d")), id("d"));
        assert_eq!(lookup.lookup(&id("f")), id("g"));

    }

    #[test]
    fn weight_overflow() {
        let bindings = [
            PoolAliasBinding::Random { alias: id("a"), targets: vec![(id("b"), u32::MAX), (id("c"), 1)] },
        ];
        assert!(matches!(PoolAliasLookup::from_bindings(&bindings, IVec3::ZERO, 0), Err(PoolError::AliasWeightOverflow(_))));
    }

    #[test]
    fn duplicate() {
        let bindings = [
            PoolAliasBinding::Direct { alias: id("a"), target: id("b") },
            PoolAliasBinding::Direct { alias: id("a"), target: id("c") },
        ];
        assert!(matches!(PoolAliasLookup::from_bindings(&bindings, IVec3::ZERO, 0), Err(PoolError::DuplicateAlias(_))));
    }

}
