use std::alloc::{alloc, dealloc, handle_alloc_error, Layout};
use std::mem;
use std::ops::Deref;
use std::ptr::{self, NonNull};
use std::slice;


/// An owned heap buffer of `f32` values that can be handed across the
/// foreign-function boundary and reclaimed later from nothing but its
/// address.
///
/// The allocation is laid out as a `usize` element count followed by the
/// data, with the public pointer aimed at the data. A release call can
/// therefore read the count back from the header and rebuild the exact
/// allocation layout without any side table or global state. The header is
/// an implementation detail; callers only ever see the data pointer and know
/// the element count from the call contract that produced the buffer.
///
/// [`into_raw`](SolutionBuffer::into_raw) and
/// [`from_raw`](SolutionBuffer::from_raw) are the ownership-transfer pair:
/// a buffer turned into a raw pointer is no longer dropped by Rust until it
/// is reconstituted, and it must be reconstituted (and thereby freed) at
/// most once.
#[derive(Debug)]
pub struct SolutionBuffer {
    /// points at the data region, one header past the allocation start
    data: NonNull<f32>,
    len: usize,
}

impl SolutionBuffer {
    /// Allocate a buffer holding a copy of the given values.
    pub fn from_slice(values: &[f32]) -> Self {
        let len = values.len();
        let (layout, offset) = Self::layout(len);
        // the layout is never zero sized thanks to the header
        let base = unsafe { alloc(layout) };
        if base.is_null() {
            handle_alloc_error(layout);
        }
        unsafe {
            (base as *mut usize).write(len);
            let data = base.add(offset) as *mut f32;
            ptr::copy_nonoverlapping(values.as_ptr(), data, len);
            Self {
                data: NonNull::new_unchecked(data),
                len,
            }
        }
    }

    /// the number of elements in the buffer
    pub fn len(&self) -> usize {
        self.len
    }

    /// whether the buffer holds no elements
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// the buffer contents as a slice
    pub fn as_slice(&self) -> &[f32] {
        unsafe { slice::from_raw_parts(self.data.as_ptr(), self.len) }
    }

    /// Transfer ownership of the allocation to the caller and return the
    /// bare data pointer. The buffer is not freed until the pointer is
    /// passed back through [`from_raw`](SolutionBuffer::from_raw).
    pub fn into_raw(self) -> *mut f32 {
        let data = self.data.as_ptr();
        mem::forget(self);
        data
    }

    /// Reconstitute a buffer from a pointer previously returned by
    /// [`into_raw`](SolutionBuffer::into_raw), taking ownership back. The
    /// element count is read from the header preceding the data.
    ///
    /// # Safety
    ///
    /// The pointer must originate from [`into_raw`](SolutionBuffer::into_raw)
    /// of this type, and each such pointer may be reconstituted at most
    /// once. Anything else, including pointers produced by a different
    /// allocator, is undefined behavior.
    pub unsafe fn from_raw(data: *mut f32) -> Self {
        let (_, offset) = Self::layout(0);
        let base = (data as *mut u8).sub(offset);
        let len = (base as *const usize).read();
        Self {
            data: NonNull::new_unchecked(data),
            len,
        }
    }

    /// The allocation layout for a buffer of `len` elements and the offset
    /// of the data region behind the header. The offset only depends on the
    /// alignments involved, not on `len`, which is what allows
    /// [`from_raw`](SolutionBuffer::from_raw) to find the header before it
    /// knows the length.
    fn layout(len: usize) -> (Layout, usize) {
        let (layout, offset) = Layout::new::<usize>()
            .extend(Layout::array::<f32>(len).expect("buffer length overflows layout"))
            .expect("buffer layout overflows");
        (layout.pad_to_align(), offset)
    }
}

impl Drop for SolutionBuffer {
    fn drop(&mut self) {
        let (layout, offset) = Self::layout(self.len);
        unsafe {
            dealloc((self.data.as_ptr() as *mut u8).sub(offset), layout);
        }
    }
}

impl Clone for SolutionBuffer {
    fn clone(&self) -> Self {
        Self::from_slice(self.as_slice())
    }
}

impl Deref for SolutionBuffer {
    type Target = [f32];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}
