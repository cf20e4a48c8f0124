//! A growable byte buffer for serializer output.
//!
//! [`OutputBuffer`] either owns a `Vec<u8>` that grows by doubling (capped
//! at [`DEFAULT_MAX_CAPACITY`] by default) or borrows a caller-provided
//! fixed `&mut [u8]` with no ownership and no growth — mirroring the two
//! `StringBuf` init paths in `stringbuf.h` (`stringbuf_init` vs.
//! `stringbuf_init_buf`), gating the storage strategy behind a small enum
//! rather than a trait object.

use alloc::vec::Vec;
use core::fmt;

/// Default ceiling on how large an owned [`OutputBuffer`] is allowed to
/// grow. `reserve`/the `append_*` family return `false` rather than grow
/// past this.
pub const DEFAULT_MAX_CAPACITY: usize = 16 * 1024 * 1024;

enum Storage<'a> {
    Owned { data: Vec<u8>, max_capacity: usize },
    Borrowed { data: &'a mut [u8], len: usize },
}

/// A growable (or, if borrowed, fixed-capacity) byte sink.
pub struct OutputBuffer<'a> {
    storage: Storage<'a>,
}

impl<'a> OutputBuffer<'a> {
    /// An owned buffer, pre-reserving `capacity` bytes and growing by
    /// doubling up to [`DEFAULT_MAX_CAPACITY`].
    #[must_use]
    pub fn init_with_capacity(capacity: usize) -> Self {
        Self::init_with_capacity_and_max(capacity, DEFAULT_MAX_CAPACITY)
    }

    /// As [`Self::init_with_capacity`], with an explicit growth ceiling.
    #[must_use]
    pub fn init_with_capacity_and_max(capacity: usize, max_capacity: usize) -> Self {
        Self {
            storage: Storage::Owned {
                data: Vec::with_capacity(capacity.min(max_capacity)),
                max_capacity,
            },
        }
    }

    /// A fixed-capacity view over a caller-owned buffer. No allocation,
    /// no growth: once `buf` is full, further appends return `false`.
    pub fn init_borrowed(buf: &'a mut [u8]) -> Self {
        Self {
            storage: Storage::Borrowed { data: buf, len: 0 },
        }
    }

    /// Ensure at least `additional` more bytes can be appended without
    /// failing. Returns `false` if that would exceed a borrowed buffer's
    /// fixed capacity or an owned buffer's growth ceiling.
    pub fn reserve(&mut self, additional: usize) -> bool {
        match &mut self.storage {
            Storage::Owned { data, max_capacity } => {
                let needed = data.len().saturating_add(additional);
                if needed > *max_capacity {
                    return false;
                }
                if data.capacity() < needed {
                    let doubled = data.capacity().saturating_mul(2).max(needed);
                    data.reserve(doubled.min(*max_capacity) - data.len());
                }
                true
            }
            Storage::Borrowed { data, len } => len.saturating_add(additional) <= data.len(),
        }
    }

    /// Append raw bytes. Returns `false` (leaving the buffer unchanged)
    /// if there is no room and growth is not possible or would exceed the
    /// cap.
    pub fn append_bytes(&mut self, bytes: &[u8]) -> bool {
        if !self.reserve(bytes.len()) {
            return false;
        }
        match &mut self.storage {
            Storage::Owned { data, .. } => data.extend_from_slice(bytes),
            Storage::Borrowed { data, len } => {
                data[*len..*len + bytes.len()].copy_from_slice(bytes);
                *len += bytes.len();
            }
        }
        true
    }

    /// Append a single UTF-8-encoded `char`.
    pub fn append_char(&mut self, c: char) -> bool {
        let mut buf = [0u8; 4];
        self.append_bytes(c.encode_utf8(&mut buf).as_bytes())
    }

    /// Append a single byte; used internally by the serializer for ASCII
    /// punctuation and escape bytes where paying for UTF-8 encoding would
    /// be wasteful.
    pub fn append_u8(&mut self, byte: u8) -> bool {
        self.append_bytes(core::slice::from_ref(&byte))
    }

    /// Append the output of a `core::fmt`-style formatting call (e.g. a
    /// number re-rendered with `write!`), without an intermediate
    /// `alloc::format!` allocation.
    pub fn append_fmt(&mut self, args: fmt::Arguments<'_>) -> bool {
        struct Adapter<'b, 'c> {
            buf: &'b mut OutputBuffer<'c>,
            ok: bool,
        }
        impl fmt::Write for Adapter<'_, '_> {
            fn write_str(&mut self, s: &str) -> fmt::Result {
                if self.buf.append_bytes(s.as_bytes()) {
                    Ok(())
                } else {
                    self.ok = false;
                    Err(fmt::Error)
                }
            }
        }
        let mut adapter = Adapter {
            buf: self,
            ok: true,
        };
        fmt::Write::write_fmt(&mut adapter, args).is_ok() && adapter.ok
    }

    /// Reset to empty without releasing an owned buffer's allocation.
    pub fn clear(&mut self) {
        match &mut self.storage {
            Storage::Owned { data, .. } => data.clear(),
            Storage::Borrowed { len, .. } => *len = 0,
        }
    }

    /// The bytes written so far.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        match &self.storage {
            Storage::Owned { data, .. } => data,
            Storage::Borrowed { data, len } => &data[..*len],
        }
    }

    /// Number of bytes written so far.
    #[must_use]
    pub fn size(&self) -> usize {
        self.data().len()
    }

    /// Current storage capacity (for a borrowed buffer, its fixed size).
    #[must_use]
    pub fn capacity(&self) -> usize {
        match &self.storage {
            Storage::Owned { data, .. } => data.capacity(),
            Storage::Borrowed { data, .. } => data.len(),
        }
    }
}

impl fmt::Write for OutputBuffer<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.append_bytes(s.as_bytes()) {
            Ok(())
        } else {
            Err(fmt::Error)
        }
    }
}
