//! Property-based coverage of the universally-quantified round-trip and
//! random-access guarantees, across all three codecs and randomly generated
//! sequences of varying length and value range.

use proptest::collection::vec;
use proptest::prelude::*;

use fixedpack::{AlignedCodec, Codec, ContiguousCodec, OutlierCodec};

fn codecs() -> [&'static dyn Codec; 3] {
    [&ContiguousCodec, &AlignedCodec, &OutlierCodec]
}

proptest! {
    #[test]
    fn round_trip_holds_for_arbitrary_sequences(src in vec(0u32..=((1u32 << 31) - 1), 0..300)) {
        for codec in codecs() {
            let packed = codec.compress(&src).unwrap();
            let mut dst = vec![0u32; src.len()];
            codec.decompress(&packed, &mut dst).unwrap();
            prop_assert_eq!(&dst, &src);
        }
    }

    #[test]
    fn random_access_matches_the_source_at_every_index(
        src in vec(0u32..=65535, 1..300),
        probe_seed in 0u32..10_000,
    ) {
        for codec in codecs() {
            let packed = codec.compress(&src).unwrap();
            let i = (probe_seed as usize) % src.len();
            prop_assert_eq!(codec.get(&packed, i).unwrap(), src[i]);
        }
    }

    #[test]
    fn skewed_distributions_with_rare_large_values_round_trip(
        mut src in vec(0u32..64, 10..500),
        outlier_value in (1u32 << 20)..((1u32 << 31) - 1),
        outlier_pos_seed in 0u32..10_000,
    ) {
        let pos = (outlier_pos_seed as usize) % src.len();
        src[pos] = outlier_value;
        for codec in codecs() {
            let packed = codec.compress(&src).unwrap();
            let mut dst = vec![0u32; src.len()];
            codec.decompress(&packed, &mut dst).unwrap();
            prop_assert_eq!(&dst, &src);
            prop_assert_eq!(codec.get(&packed, pos).unwrap(), outlier_value);
        }
    }
}
