use core::num::NonZero;

#[cfg(test)]
type RawIndex = u16;
#[cfg(not(test))]
type RawIndex = u32;

/// A stable index into the node [`Arena`](super::arena::Arena).
///
/// Stored shifted by one so that `NonZero`'s niche keeps `Handle` the size of
/// its raw integer. Handles never escape the crate; the tree is the only code
/// that mints or dereferences them.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub(crate) struct Handle(NonZero<RawIndex>);

impl Handle {
    pub(crate) const MAX: usize = (RawIndex::MAX - 1) as usize;

    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    pub(crate) const fn from_index(index: usize) -> Self {
        assert!(index <= Self::MAX, "`Handle::from_index()` - `index` > `Handle::MAX`!");
        // `index + 1` is nonzero and cannot overflow after the bound check.
        match NonZero::new((index + 1) as RawIndex) {
            Some(raw) => Self(raw),
            None => unreachable!(),
        }
    }

    #[inline]
    pub(crate) const fn to_index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use static_assertions::assert_eq_size;

    // The whole point of the NonZero shift: no space wasted on `Option`.
    assert_eq_size!(Handle, Option<Handle>);
    assert_eq_size!(Handle, RawIndex);

    #[test]
    #[should_panic(expected = "`Handle::from_index()` - `index` > `Handle::MAX`!")]
    fn out_of_range_index() {
        let _ = Handle::from_index(Handle::MAX + 1);
    }

    proptest! {
        #[test]
        fn index_round_trip(index in 0..=Handle::MAX) {
            prop_assert_eq!(Handle::from_index(index).to_index(), index);
        }
    }
}
