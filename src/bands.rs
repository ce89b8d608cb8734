use std::collections::BTreeMap;

/// Number of standard octave bands (125 Hz to 4 kHz).
pub const NUM_OCTAVE_BANDS: usize = 6;

/// Center frequencies of the standard octave bands in Hz.
pub const OCTAVE_BAND_FREQUENCIES: [u32; NUM_OCTAVE_BANDS] = [125, 250, 500, 1000, 2000, 4000];

/// Per-band values keyed by band center frequency in Hz.
///
/// Used for RT60 (seconds), absorption coefficients and STI. Ordered by
/// frequency. Callers may supply any set of bands; nothing in the engine
/// assumes all six standard bands are present.
pub type FrequencyMap = BTreeMap<u32, f64>;

/// Builds a map over the six standard octave bands.
pub fn from_octave_bands(values: [f64; NUM_OCTAVE_BANDS]) -> FrequencyMap {
    OCTAVE_BAND_FREQUENCIES.into_iter().zip(values).collect()
}

/// Value at `band`, or 0.0 when the band is absent.
pub fn value_or_zero(map: &FrequencyMap, band: u32) -> f64 {
    map.get(&band).copied().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_octave_bands() {
        let map = from_octave_bands([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(map.len(), NUM_OCTAVE_BANDS);
        assert_eq!(map[&125], 1.0);
        assert_eq!(map[&4000], 6.0);
        let keys: Vec<u32> = map.keys().copied().collect();
        assert_eq!(keys, OCTAVE_BAND_FREQUENCIES.to_vec());
    }

    #[test]
    fn test_value_or_zero() {
        let map: FrequencyMap = [(500, 0.4)].into_iter().collect();
        assert_eq!(value_or_zero(&map, 500), 0.4);
        assert_eq!(value_or_zero(&map, 63), 0.0);
    }
}
