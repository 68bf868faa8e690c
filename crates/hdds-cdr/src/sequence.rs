// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Generic "sequence of T" container.
//!
//! A single `Sequence<'a, T>` replaces a per-element-type sequence struct. It
//! never owns memory. For encoding it borrows the caller's elements; for
//! decoding it borrows caller-supplied storage whose length is the capacity.

use core::fmt;
use core::ops::Deref;

use crate::cdr::{CdrReader, CdrWriter};
use crate::error::{Error, Result};
use crate::wire::{CdrDecode, CdrEncode};

enum Storage<'a, T> {
    Shared(&'a [T]),
    Exclusive(&'a mut [T]),
}

/// Variable-length, runtime-counted sequence backed by borrowed storage
///
/// # Example
///
/// ```
/// use hdds_cdr::Sequence;
///
/// // Encoding side: borrow existing elements.
/// let payload = Sequence::new(&[1u8, 2, 3]);
/// assert_eq!(payload.len(), 3);
///
/// // Decoding side: hand over capacity, length starts at zero.
/// let mut storage = [0u8; 16];
/// let rx = Sequence::with_storage(&mut storage);
/// assert_eq!((rx.len(), rx.capacity()), (0, 16));
/// ```
pub struct Sequence<'a, T> {
    storage: Storage<'a, T>,
    len: usize,
}

impl<'a, T> Sequence<'a, T> {
    /// Borrow `elements` for encoding; every element is part of the sequence.
    pub const fn new(elements: &'a [T]) -> Self {
        Self {
            len: elements.len(),
            storage: Storage::Shared(elements),
        }
    }

    /// Empty sequence with no capacity
    pub const fn empty() -> Self {
        Self {
            storage: Storage::Shared(&[]),
            len: 0,
        }
    }

    /// Hand over decode capacity; the sequence starts empty.
    pub fn with_storage(storage: &'a mut [T]) -> Self {
        Self {
            storage: Storage::Exclusive(storage),
            len: 0,
        }
    }

    /// Use the first `len` elements of `storage` as the current contents.
    ///
    /// `len` is clamped to the storage length.
    pub fn from_storage(storage: &'a mut [T], len: usize) -> Self {
        let len = len.min(storage.len());
        Self {
            storage: Storage::Exclusive(storage),
            len,
        }
    }

    /// Number of elements currently in the sequence
    pub const fn len(&self) -> usize {
        self.len
    }

    /// True if the sequence holds no elements
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Maximum number of elements a decode may produce
    ///
    /// Borrowed (encode-only) sequences have no spare capacity beyond their
    /// current elements and cannot be decoded into unless the count is zero.
    pub fn capacity(&self) -> usize {
        match &self.storage {
            Storage::Shared(_) => 0,
            Storage::Exclusive(s) => s.len(),
        }
    }

    /// Current elements
    pub fn as_slice(&self) -> &[T] {
        match &self.storage {
            Storage::Shared(s) => &s[..self.len],
            Storage::Exclusive(s) => &s[..self.len],
        }
    }

    /// Current elements, mutably; `None` for a borrowed (encode-only) sequence
    pub fn as_mut_slice(&mut self) -> Option<&mut [T]> {
        match &mut self.storage {
            Storage::Shared(_) => None,
            Storage::Exclusive(s) => Some(&mut s[..self.len]),
        }
    }

    /// Append one element into spare capacity.
    pub fn push(&mut self, value: T) -> Result<()> {
        let capacity = self.capacity();
        match &mut self.storage {
            Storage::Exclusive(s) if self.len < s.len() => {
                s[self.len] = value;
                self.len += 1;
                Ok(())
            }
            _ => Err(Error::SequenceCapacity {
                count: self.len + 1,
                capacity,
            }),
        }
    }

    /// Drop all elements, keeping the storage for reuse.
    pub fn clear(&mut self) {
        if let Storage::Exclusive(_) = self.storage {
            self.len = 0;
        } else {
            self.storage = Storage::Shared(&[]);
            self.len = 0;
        }
    }
}

impl<T> Deref for Sequence<'_, T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> Default for Sequence<'_, T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a, T> From<&'a [T]> for Sequence<'a, T> {
    fn from(elements: &'a [T]) -> Self {
        Self::new(elements)
    }
}

impl<'a, T, const N: usize> From<&'a [T; N]> for Sequence<'a, T> {
    fn from(elements: &'a [T; N]) -> Self {
        Self::new(elements)
    }
}

impl<T: PartialEq> PartialEq for Sequence<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for Sequence<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for Sequence<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<T: CdrEncode> CdrEncode for Sequence<'_, T> {
    fn encode(&self, w: &mut CdrWriter<'_>) -> Result<()> {
        w.write_count(self.len)?;
        for element in self.as_slice() {
            element.encode(w)?;
        }
        Ok(())
    }
}

impl<'de, T: CdrDecode<'de>> CdrDecode<'de> for Sequence<'_, T> {
    const MIN_WIRE_SIZE: usize = 4;

    fn decode_into(&mut self, r: &mut CdrReader<'de>) -> Result<()> {
        let count = r.read_count(T::MIN_WIRE_SIZE)?;
        if count == 0 {
            self.clear();
            return Ok(());
        }
        let capacity = self.capacity();
        let Storage::Exclusive(storage) = &mut self.storage else {
            return Err(Error::SequenceCapacity { count, capacity });
        };
        let Some(slots) = storage.get_mut(..count) else {
            return Err(Error::SequenceCapacity { count, capacity });
        };
        // Length only reflects fully decoded elements.
        self.len = 0;
        for slot in slots.iter_mut() {
            slot.decode_into(r)?;
            self.len += 1;
        }
        Ok(())
    }
}
