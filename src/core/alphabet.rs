// alphabet.rs - Base validity filter

/// Gap symbol inserted by the aligner
pub const GAP: u8 = b'-';

/// Canonical nucleotide symbols counted as comparable data
pub const VALID_BASES: [u8; 4] = [b'A', b'G', b'C', b'T'];

/// Whether `symbol` is one of the uppercase bases A/G/C/T.
///
/// Gaps, `N`, every other IUPAC ambiguity code and lowercase letters are
/// all treated as missing data.
#[inline]
pub fn is_valid_base(symbol: u8) -> bool {
    matches!(symbol, b'A' | b'G' | b'C' | b'T')
}

/// Number of valid bases in a sequence
pub fn count_valid_bases(sequence: &[u8]) -> usize {
    sequence.iter().filter(|&&b| is_valid_base(b)).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_bases_are_valid() {
        for base in VALID_BASES {
            assert!(is_valid_base(base));
        }
    }

    #[test]
    fn test_missing_data_symbols() {
        for symbol in [GAP, b'N', b'R', b'Y', b'?', b'.', b'U'] {
            assert!(!is_valid_base(symbol), "{} should be invalid", symbol as char);
        }
    }

    #[test]
    fn test_lowercase_is_invalid() {
        for symbol in b"agct" {
            assert!(!is_valid_base(*symbol));
        }
    }

    #[test]
    fn test_count_valid_bases() {
        assert_eq!(count_valid_bases(b"AGCTN-agct"), 4);
        assert_eq!(count_valid_bases(b""), 0);
    }
}
