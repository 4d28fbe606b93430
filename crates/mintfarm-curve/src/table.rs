//! Precomputed cumulative weekly multiplier table.
//!
//! Entry `w` is the cumulative bonus fraction unlocked through week `w` of
//! protocol age, in parts-per-billion. The raw weekly value starts at
//! `a = 0.102586724` (chosen so that the integral of `a * 0.95^x` over
//! `[0, inf)` equals 2) and shrinks by 5% per week; entries are the floored
//! running sums.
//!
//! The table was generated once in double precision and is embedded verbatim.
//! Lookups never touch floating point.

/// Number of weeks covered by the curve. The bonus window closes afterwards.
pub const CURVE_WEEKS: usize = 250;

/// Upper bound of the cumulative series: `a / (1 - 0.95)` scaled to ppb.
///
/// Every table entry is strictly below it.
pub const SERIES_LIMIT: u64 = 20 * CUMULATIVE_WEEKLY_MULTIPLIER[0];

/// Cumulative multiplier per elapsed week, parts-per-billion.
pub const CUMULATIVE_WEEKLY_MULTIPLIER: [u64; CURVE_WEEKS] = [
    102_586_724, 200_044_111, 292_628_630, 380_583_922, 464_141_450,
    543_521_102, 618_931_770, 690_571_906, 758_630_035, 823_285_257,
    884_707_718, 943_059_056, 998_492_827, 1_051_154_910, 1_101_183_888,
    1_148_711_418, 1_193_862_571, 1_236_756_166, 1_277_505_082, 1_316_216_552,
    1_352_992_448, 1_387_929_550, 1_421_119_796, 1_452_650_530, 1_482_604_728,
    1_511_061_216, 1_538_094_879, 1_563_776_859, 1_588_174_740, 1_611_352_727,
    1_633_371_814, 1_654_289_948, 1_674_162_174, 1_693_040_790, 1_710_975_474,
    1_728_013_424, 1_744_199_477, 1_759_576_227, 1_774_184_140, 1_788_061_657,
    1_801_245_298, 1_813_769_757, 1_825_667_993, 1_836_971_317, 1_847_709_476,
    1_857_910_726, 1_867_601_913, 1_876_808_542, 1_885_554_839, 1_893_863_821,
    1_901_757_354, 1_909_256_210, 1_916_380_123, 1_923_147_841, 1_929_577_173,
    1_935_685_038, 1_941_487_510, 1_946_999_859, 1_952_236_590, 1_957_211_484,
    1_961_937_634, 1_966_427_476, 1_970_692_827, 1_974_744_909, 1_978_594_388,
    1_982_251_392, 1_985_725_547, 1_989_025_993, 1_992_161_418, 1_995_140_071,
    1_997_969_791, 2_000_658_026, 2_003_211_848, 2_005_637_980, 2_007_942_805,
    2_010_132_389, 2_012_212_493, 2_014_188_592, 2_016_065_887, 2_017_849_316,
    2_019_543_575, 2_021_153_120, 2_022_682_188, 2_024_134_802, 2_025_514_786,
    2_026_825_771, 2_028_071_206, 2_029_254_370, 2_030_378_375, 2_031_446_181,
    2_032_460_596, 2_033_424_290, 2_034_339_799, 2_035_209_533, 2_036_035_781,
    2_036_820_716, 2_037_566_404, 2_038_274_808, 2_038_947_791, 2_039_587_126,
    2_040_194_493, 2_040_771_493, 2_041_319_642, 2_041_840_384, 2_042_335_089,
    2_042_805_058, 2_043_251_529, 2_043_675_677, 2_044_078_617, 2_044_461_410,
    2_044_825_063, 2_045_170_534, 2_045_498_732, 2_045_810_519, 2_046_106_717,
    2_046_388_105, 2_046_655_424, 2_046_909_377, 2_047_150_632, 2_047_379_824,
    2_047_597_557, 2_047_804_403, 2_048_000_907, 2_048_187_585, 2_048_364_930,
    2_048_533_408, 2_048_693_461, 2_048_845_512, 2_048_989_961, 2_049_127_186,
    2_049_257_551, 2_049_381_398, 2_049_499_052, 2_049_610_823, 2_049_717_006,
    2_049_817_880, 2_049_913_710, 2_050_004_748, 2_050_091_235, 2_050_173_397,
    2_050_251_451, 2_050_325_602, 2_050_396_046, 2_050_462_968, 2_050_526_544,
    2_050_586_940, 2_050_644_317, 2_050_698_825, 2_050_750_608, 2_050_799_802,
    2_050_846_536, 2_050_890_933, 2_050_933_110, 2_050_973_179, 2_051_011_244,
    2_051_047_405, 2_051_081_759, 2_051_114_395, 2_051_145_399, 2_051_174_853,
    2_051_202_835, 2_051_229_417, 2_051_254_670, 2_051_278_660, 2_051_301_451,
    2_051_323_103, 2_051_343_672, 2_051_363_212, 2_051_381_775, 2_051_399_411,
    2_051_416_164, 2_051_432_080, 2_051_447_200, 2_051_461_564, 2_051_475_210,
    2_051_488_173, 2_051_500_488, 2_051_512_188, 2_051_523_303, 2_051_533_861,
    2_051_543_892, 2_051_553_422, 2_051_562_475, 2_051_571_075, 2_051_579_245,
    2_051_587_007, 2_051_594_380, 2_051_601_385, 2_051_608_040, 2_051_614_362,
    2_051_620_368, 2_051_626_073, 2_051_631_494, 2_051_636_643, 2_051_641_535,
    2_051_646_182, 2_051_650_597, 2_051_654_791, 2_051_658_776, 2_051_662_561,
    2_051_666_157, 2_051_669_573, 2_051_672_818, 2_051_675_901, 2_051_678_830,
    2_051_681_613, 2_051_684_256, 2_051_686_767, 2_051_689_153, 2_051_691_419,
    2_051_693_572, 2_051_695_617, 2_051_697_561, 2_051_699_407, 2_051_701_160,
    2_051_702_826, 2_051_704_409, 2_051_705_912, 2_051_707_341, 2_051_708_698,
    2_051_709_987, 2_051_711_211, 2_051_712_375, 2_051_713_480, 2_051_714_530,
    2_051_715_527, 2_051_716_475, 2_051_717_375, 2_051_718_230, 2_051_719_043,
    2_051_719_815, 2_051_720_548, 2_051_721_245, 2_051_721_906, 2_051_722_535,
    2_051_723_132, 2_051_723_700, 2_051_724_239, 2_051_724_751, 2_051_725_237,
    2_051_725_699, 2_051_726_138, 2_051_726_555, 2_051_726_951, 2_051_727_328,
    2_051_727_685, 2_051_728_025, 2_051_728_348, 2_051_728_654, 2_051_728_946,
];

/// Cumulative multiplier through `week`, saturating at the last entry.
pub fn cumulative_at(week: u64) -> u64 {
    let last = CUMULATIVE_WEEKLY_MULTIPLIER.len() - 1;
    let index = usize::try_from(week).map_or(last, |w| w.min(last));
    CUMULATIVE_WEEKLY_MULTIPLIER[index]
}

/// Increment unlocked during `week` alone.
///
/// `table[0]` for week 0, `table[w] - table[w - 1]` inside the horizon and 0
/// from [`CURVE_WEEKS`] on.
pub fn weekly_at(week: u64) -> u64 {
    let index = match usize::try_from(week) {
        Ok(w) if w < CURVE_WEEKS => w,
        _ => return 0,
    };
    if index == 0 {
        return CUMULATIVE_WEEKLY_MULTIPLIER[0];
    }
    CUMULATIVE_WEEKLY_MULTIPLIER[index] - CUMULATIVE_WEEKLY_MULTIPLIER[index - 1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Offline generator, reproduced to pin the embedded constant.
    fn regenerate() -> Vec<u64> {
        let mut current = 1_000_000_000f64 * 0.102586724;
        let mut cumulative = current;
        let mut out = Vec::with_capacity(CURVE_WEEKS);
        out.push(cumulative.floor() as u64);
        for _ in 1..CURVE_WEEKS {
            current = current * 95.0 / 100.0;
            cumulative += current;
            out.push(cumulative.floor() as u64);
        }
        out
    }

    #[test]
    fn table_matches_generator() {
        let generated = regenerate();
        for (i, (&embedded, &fresh)) in CUMULATIVE_WEEKLY_MULTIPLIER
            .iter()
            .zip(generated.iter())
            .enumerate()
        {
            assert_eq!(embedded, fresh, "table mismatch at week {i}");
        }
    }

    #[test]
    fn seed_value() {
        assert_eq!(CUMULATIVE_WEEKLY_MULTIPLIER[0], 102_586_724);
        assert_eq!(weekly_at(0), 102_586_724);
    }

    #[test]
    fn table_monotonically_increasing() {
        for i in 1..CURVE_WEEKS {
            assert!(
                CUMULATIVE_WEEKLY_MULTIPLIER[i] > CUMULATIVE_WEEKLY_MULTIPLIER[i - 1],
                "table not monotonic at index {i}"
            );
        }
    }

    #[test]
    fn table_below_series_limit() {
        assert_eq!(SERIES_LIMIT, 2_051_734_480);
        for (i, &v) in CUMULATIVE_WEEKLY_MULTIPLIER.iter().enumerate() {
            assert!(v > 0, "zero entry at week {i}");
            assert!(v < SERIES_LIMIT, "entry above series limit at week {i}");
        }
    }

    #[test]
    fn weekly_increments_decay() {
        for w in 1..CURVE_WEEKS as u64 - 1 {
            assert!(
                weekly_at(w + 1) <= weekly_at(w),
                "weekly increment grew at week {w}"
            );
        }
    }

    #[test]
    fn weekly_first_steps() {
        assert_eq!(weekly_at(1), 200_044_111 - 102_586_724);
        assert_eq!(weekly_at(2), 292_628_630 - 200_044_111);
    }

    #[test]
    fn weekly_zero_past_horizon() {
        assert_eq!(weekly_at(CURVE_WEEKS as u64), 0);
        assert_eq!(weekly_at(CURVE_WEEKS as u64 + 1), 0);
        assert_eq!(weekly_at(u64::MAX), 0);
    }

    #[test]
    fn weekly_last_week_positive() {
        assert!(weekly_at(CURVE_WEEKS as u64 - 1) > 0);
    }

    #[test]
    fn cumulative_saturates() {
        let last = CUMULATIVE_WEEKLY_MULTIPLIER[CURVE_WEEKS - 1];
        assert_eq!(cumulative_at(CURVE_WEEKS as u64 - 1), last);
        assert_eq!(cumulative_at(CURVE_WEEKS as u64), last);
        assert_eq!(cumulative_at(u64::MAX), last);
    }

    #[test]
    fn weekly_sums_to_cumulative() {
        let sum: u64 = (0..CURVE_WEEKS as u64).map(weekly_at).sum();
        assert_eq!(sum, CUMULATIVE_WEEKLY_MULTIPLIER[CURVE_WEEKS - 1]);
    }

    proptest! {
        #[test]
        fn cumulative_monotonic(a in 0u64..1_000, b in 0u64..1_000) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(cumulative_at(lo) <= cumulative_at(hi));
        }

        #[test]
        fn weekly_bounded_by_seed(w in any::<u64>()) {
            prop_assert!(weekly_at(w) <= CUMULATIVE_WEEKLY_MULTIPLIER[0]);
        }
    }
}
