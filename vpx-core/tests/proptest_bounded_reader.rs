//! Property-based tests for budgeted reads.
//!
//! Uses proptest to check that the byte budget always reflects exactly the
//! bytes pulled out of the source, whatever mix of requests is issued.

use proptest::prelude::*;
use vpx_core::{BitstreamError, BoundedReader, Error};

proptest! {
    /// Successful reads return the source bytes in order.
    #[test]
    fn reads_return_source_prefix(
        data in prop::collection::vec(any::<u8>(), 0..256),
        chunks in prop::collection::vec(0usize..32, 0..16)
    ) {
        let mut reader = BoundedReader::new(&data[..], data.len());
        let mut collected = Vec::new();

        for len in chunks {
            let mut buf = vec![0u8; len];
            if reader.read_full(&mut buf).is_ok() {
                collected.extend_from_slice(&buf);
            } else {
                break;
            }
        }

        prop_assert_eq!(&data[..collected.len()], &collected[..]);
    }

    /// Budget plus consumed bytes always equals the starting limit.
    #[test]
    fn budget_accounting_is_exact(
        data in prop::collection::vec(any::<u8>(), 0..128),
        limit in 0usize..192,
        chunks in prop::collection::vec(0usize..48, 1..12)
    ) {
        let mut reader = BoundedReader::new(&data[..], limit);

        for len in chunks {
            let mut buf = vec![0u8; len];
            let before = reader.remaining();
            match reader.read_full(&mut buf) {
                Ok(()) => prop_assert_eq!(reader.remaining(), before - len),
                Err(Error::Bitstream(BitstreamError::BudgetExceeded { requested, remaining })) => {
                    prop_assert_eq!(requested, len);
                    prop_assert_eq!(remaining, before);
                    prop_assert_eq!(reader.remaining(), before);
                }
                Err(Error::Bitstream(BitstreamError::UnexpectedEnd)) => {
                    prop_assert!(len <= before);
                    prop_assert_eq!(reader.consumed(), data.len());
                }
                Err(other) => prop_assert!(false, "unexpected error {}", other),
            }
            prop_assert_eq!(reader.remaining() + reader.consumed(), limit);
        }
    }

    /// Reads never go past the budget even when the source has more data.
    #[test]
    fn never_reads_past_limit(
        data in prop::collection::vec(any::<u8>(), 1..128),
        limit in 0usize..64
    ) {
        let mut reader = BoundedReader::new(&data[..], limit);
        let mut buf = vec![0u8; limit + 1];
        prop_assert!(reader.read_full(&mut buf).is_err());
        prop_assert_eq!(reader.consumed(), 0);
    }
}
