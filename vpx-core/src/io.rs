//! Byte-budgeted reading over arbitrary sources.
//!
//! Compressed frames are handed to decoders as a byte source plus the number
//! of bytes that belong to the frame. [`BoundedReader`] makes sure no parser
//! reads past that budget, however much data the underlying source still has.

use std::io::{ErrorKind, Read};

use crate::error::{BitstreamError, Result};

/// A reader that hands out at most `n` bytes from an underlying source.
#[derive(Debug)]
pub struct BoundedReader<R> {
    inner: R,
    remaining: usize,
    consumed: usize,
}

impl<R: Read> BoundedReader<R> {
    /// Wrap `inner`, allowing at most `limit` bytes to be read from it.
    pub fn new(inner: R, limit: usize) -> Self {
        Self {
            inner,
            remaining: limit,
            consumed: 0,
        }
    }

    /// Fill `buf` completely or fail.
    ///
    /// A request larger than the remaining budget fails before touching the
    /// source. A source that ends early fails with
    /// [`BitstreamError::UnexpectedEnd`]; the bytes it did deliver are still
    /// charged against the budget.
    pub fn read_full(&mut self, buf: &mut [u8]) -> Result<()> {
        if buf.len() > self.remaining {
            return Err(BitstreamError::BudgetExceeded {
                requested: buf.len(),
                remaining: self.remaining,
            }
            .into());
        }

        let mut filled = 0;
        let outcome = loop {
            if filled == buf.len() {
                break Ok(());
            }
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => break Err(BitstreamError::UnexpectedEnd.into()),
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                    break Err(BitstreamError::UnexpectedEnd.into())
                }
                Err(e) => break Err(e.into()),
            }
        };

        self.remaining -= filled;
        self.consumed += filled;
        outcome
    }

    /// Bytes still available under the budget.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Bytes consumed from the source so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Borrow the underlying source.
    pub fn get_ref(&self) -> &R {
        &self.inner
    }
}
