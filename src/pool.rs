/*
 * // Copyright (c) Radzivon Bartoshyk 12/2025. All rights reserved.
 * //
 * // Redistribution and use in source and binary forms, with or without modification,
 * // are permitted provided that the following conditions are met:
 * //
 * // 1.  Redistributions of source code must retain the above copyright notice, this
 * // list of conditions and the following disclaimer.
 * //
 * // 2.  Redistributions in binary form must reproduce the above copyright notice,
 * // this list of conditions and the following disclaimer in the documentation
 * // and/or other materials provided with the distribution.
 * //
 * // 3.  Neither the name of the copyright holder nor the names of its
 * // contributors may be used to endorse or promote products derived from
 * // this software without specific prior written permission.
 * //
 * // THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * // AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * // IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * // DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * // FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * // DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * // SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * // CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * // OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * // OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
use crate::error::WaveletError;
use num_complex::Complex64;
use std::alloc::{Layout, alloc_zeroed, dealloc};
use std::cell::RefCell;
use std::collections::HashMap;
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, OnceLock};

/// Minimum guaranteed alignment of a pool-acquired buffer, in bytes.
///
/// 64 bytes covers every SIMD lane width this crate dispatches to (AVX2's
/// 32-byte vectors included, with headroom for a future AVX-512 tier).
pub const MIN_ALIGNMENT: usize = 64;

/// A cache-aligned, heap-allocated run of `f64`s.
///
/// Acquired from a [`BufferPool`] (or allocated fresh on a pool miss) and
/// owned exclusively by whoever holds it. Dropping it frees the memory
/// directly — to return it to a pool for reuse, call
/// [`BufferPool::release`] instead of letting it drop.
pub struct AlignedBuffer {
    ptr: NonNull<f64>,
    len: usize,
    layout: Layout,
}

// SAFETY: the buffer owns its allocation exclusively and carries no
// thread-affine state.
unsafe impl Send for AlignedBuffer {}
unsafe impl Sync for AlignedBuffer {}

impl AlignedBuffer {
    fn alloc(len: usize) -> Result<Self, WaveletError> {
        if len == 0 {
            return Ok(Self {
                ptr: NonNull::dangling(),
                len: 0,
                layout: Layout::new::<f64>(),
            });
        }
        let size = len
            .checked_mul(size_of::<f64>())
            .ok_or(WaveletError::ResourceExhaustion(len))?;
        let layout = Layout::from_size_align(size, MIN_ALIGNMENT)
            .map_err(|_| WaveletError::ResourceExhaustion(len))?;
        // SAFETY: layout has non-zero size, checked above.
        let raw = unsafe { alloc_zeroed(layout) };
        let ptr =
            NonNull::new(raw as *mut f64).ok_or(WaveletError::ResourceExhaustion(len))?;
        Ok(Self { ptr, len, layout })
    }

    /// Number of `f64` elements in the buffer.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Zero every element. Callers that stored sensitive data must call this
    /// before releasing the buffer back to a pool — a released buffer's
    /// prior contents are not guaranteed to be scrubbed otherwise.
    pub fn zero(&mut self) {
        self.iter_mut().for_each(|v| *v = 0.0);
    }
}

impl Deref for AlignedBuffer {
    type Target = [f64];
    fn deref(&self) -> &[f64] {
        // SAFETY: ptr/len describe a live allocation of `len` f64s (or the
        // dangling zero-length case, for which from_raw_parts is valid).
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }
}

impl DerefMut for AlignedBuffer {
    fn deref_mut(&mut self) -> &mut [f64] {
        // SAFETY: see Deref.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl Drop for AlignedBuffer {
    fn drop(&mut self) {
        if self.len > 0 {
            // SAFETY: ptr/layout match the allocation made in `alloc`.
            unsafe { dealloc(self.ptr.as_ptr() as *mut u8, self.layout) };
        }
    }
}

/// Point-in-time occupancy/traffic counters for a [`BufferPool`].
#[derive(Debug, Clone, Default)]
pub struct PoolStats {
    pub hits: u64,
    pub misses: u64,
    pub bytes_resident: u64,
    /// `(bucket size in elements, buffers currently parked in that bucket)`.
    pub bucket_occupancy: Vec<(usize, usize)>,
}

/// Per-size free-list buffer pool.
///
/// `acquire`/`release` are the only hot-path operations; both take a single
/// lock over the bucket map. Buckets are capped at `max_per_size` entries —
/// a release beyond the cap drops the buffer instead of growing the pool
/// unbounded.
pub struct BufferPool {
    buckets: Mutex<HashMap<usize, Vec<AlignedBuffer>>>,
    max_per_size: usize,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl BufferPool {
    pub fn new(max_per_size: usize) -> Self {
        Self {
            buckets: Mutex::new(HashMap::new()),
            max_per_size,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Process-wide shared pool, lazily created on first use.
    pub fn shared() -> &'static BufferPool {
        static POOL: OnceLock<BufferPool> = OnceLock::new();
        POOL.get_or_init(|| BufferPool::new(8))
    }

    /// Acquire a zeroed buffer of at least `n` elements, preferring an exact
    /// match from the free list.
    pub fn acquire(&self, n: usize) -> Result<AlignedBuffer, WaveletError> {
        {
            let mut buckets = self.buckets.lock().unwrap();
            if let Some(list) = buckets.get_mut(&n)
                && let Some(mut buf) = list.pop()
            {
                self.hits.fetch_add(1, Ordering::Relaxed);
                buf.zero();
                return Ok(buf);
            }
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        AlignedBuffer::alloc(n)
    }

    /// Return a buffer to its size bucket. Contents are not scrubbed; call
    /// [`AlignedBuffer::zero`] first if that matters to the caller.
    pub fn release(&self, buf: AlignedBuffer) {
        if buf.len() == 0 {
            return;
        }
        let mut buckets = self.buckets.lock().unwrap();
        let list = buckets.entry(buf.len()).or_default();
        if list.len() < self.max_per_size {
            list.push(buf);
        }
        // else: buf is dropped here, freeing the allocation.
    }

    /// Drop every pooled buffer, freeing all resident memory.
    pub fn clear(&self) {
        self.buckets.lock().unwrap().clear();
    }

    pub fn stats(&self) -> PoolStats {
        let buckets = self.buckets.lock().unwrap();
        let mut bytes_resident = 0u64;
        let mut bucket_occupancy = Vec::with_capacity(buckets.len());
        for (&size, list) in buckets.iter() {
            bytes_resident += (size * size_of::<f64>() * list.len()) as u64;
            bucket_occupancy.push((size, list.len()));
        }
        bucket_occupancy.sort_unstable_by_key(|&(size, _)| size);
        PoolStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            bytes_resident,
            bucket_occupancy,
        }
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new(8)
    }
}

/// A pool confined to the thread that created it — identical semantics to
/// [`BufferPool`] minus the lock, for callers that want to avoid bucket-map
/// contention under heavy per-thread batch/streaming workloads.
pub struct ThreadLocalPool {
    inner: RefCell<HashMap<usize, Vec<AlignedBuffer>>>,
    max_per_size: usize,
    hits: std::cell::Cell<u64>,
    misses: std::cell::Cell<u64>,
}

impl ThreadLocalPool {
    pub fn new(max_per_size: usize) -> Self {
        Self {
            inner: RefCell::new(HashMap::new()),
            max_per_size,
            hits: std::cell::Cell::new(0),
            misses: std::cell::Cell::new(0),
        }
    }

    pub fn acquire(&self, n: usize) -> Result<AlignedBuffer, WaveletError> {
        {
            let mut buckets = self.inner.borrow_mut();
            if let Some(list) = buckets.get_mut(&n)
                && let Some(mut buf) = list.pop()
            {
                self.hits.set(self.hits.get() + 1);
                buf.zero();
                return Ok(buf);
            }
        }
        self.misses.set(self.misses.get() + 1);
        AlignedBuffer::alloc(n)
    }

    pub fn release(&self, buf: AlignedBuffer) {
        if buf.len() == 0 {
            return;
        }
        let mut buckets = self.inner.borrow_mut();
        let list = buckets.entry(buf.len()).or_default();
        if list.len() < self.max_per_size {
            list.push(buf);
        }
    }

    pub fn clear(&self) {
        self.inner.borrow_mut().clear();
    }

    pub fn stats(&self) -> PoolStats {
        let buckets = self.inner.borrow();
        let mut bytes_resident = 0u64;
        let mut bucket_occupancy = Vec::with_capacity(buckets.len());
        for (&size, list) in buckets.iter() {
            bytes_resident += (size * size_of::<f64>() * list.len()) as u64;
            bucket_occupancy.push((size, list.len()));
        }
        bucket_occupancy.sort_unstable_by_key(|&(size, _)| size);
        PoolStats {
            hits: self.hits.get(),
            misses: self.misses.get(),
            bytes_resident,
            bucket_occupancy,
        }
    }
}

/// A cache-aligned, heap-allocated run of `Complex64`s — the complex-element
/// counterpart to [`AlignedBuffer`], for callers whose scratch space is a
/// spectrum rather than a real-valued signal (the FFT convolution path,
/// C3's `M`-complex scratch buffers).
pub struct ComplexAlignedBuffer {
    ptr: NonNull<Complex64>,
    len: usize,
    layout: Layout,
}

unsafe impl Send for ComplexAlignedBuffer {}
unsafe impl Sync for ComplexAlignedBuffer {}

impl ComplexAlignedBuffer {
    fn alloc(len: usize) -> Result<Self, WaveletError> {
        if len == 0 {
            return Ok(Self {
                ptr: NonNull::dangling(),
                len: 0,
                layout: Layout::new::<Complex64>(),
            });
        }
        let size = len
            .checked_mul(size_of::<Complex64>())
            .ok_or(WaveletError::ResourceExhaustion(len))?;
        let layout = Layout::from_size_align(size, MIN_ALIGNMENT)
            .map_err(|_| WaveletError::ResourceExhaustion(len))?;
        // SAFETY: layout has non-zero size, checked above. All-zero bytes is
        // a valid `Complex64` (re = im = 0.0, the IEEE-754 zero bit pattern),
        // and `Complex<f64>` is `#[repr(C)]` with no padding between its two
        // `f64` fields, so a zeroed allocation is a valid array of `len`
        // `Complex64::new(0.0, 0.0)` values.
        let raw = unsafe { alloc_zeroed(layout) };
        let ptr =
            NonNull::new(raw as *mut Complex64).ok_or(WaveletError::ResourceExhaustion(len))?;
        Ok(Self { ptr, len, layout })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn zero(&mut self) {
        self.iter_mut().for_each(|v| *v = Complex64::new(0.0, 0.0));
    }
}

impl Deref for ComplexAlignedBuffer {
    type Target = [Complex64];
    fn deref(&self) -> &[Complex64] {
        // SAFETY: ptr/len describe a live allocation of `len` Complex64s (or
        // the dangling zero-length case, for which from_raw_parts is valid).
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }
}

impl DerefMut for ComplexAlignedBuffer {
    fn deref_mut(&mut self) -> &mut [Complex64] {
        // SAFETY: see Deref.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl Drop for ComplexAlignedBuffer {
    fn drop(&mut self) {
        if self.len > 0 {
            // SAFETY: ptr/layout match the allocation made in `alloc`.
            unsafe { dealloc(self.ptr.as_ptr() as *mut u8, self.layout) };
        }
    }
}

/// Size-bucketed free-list pool of [`ComplexAlignedBuffer`]s, identical in
/// structure and locking discipline to [`BufferPool`].
pub struct ComplexBufferPool {
    buckets: Mutex<HashMap<usize, Vec<ComplexAlignedBuffer>>>,
    max_per_size: usize,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ComplexBufferPool {
    pub fn new(max_per_size: usize) -> Self {
        Self {
            buckets: Mutex::new(HashMap::new()),
            max_per_size,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Process-wide shared pool, lazily created on first use.
    pub fn shared() -> &'static ComplexBufferPool {
        static POOL: OnceLock<ComplexBufferPool> = OnceLock::new();
        POOL.get_or_init(|| ComplexBufferPool::new(8))
    }

    pub fn acquire(&self, n: usize) -> Result<ComplexAlignedBuffer, WaveletError> {
        {
            let mut buckets = self.buckets.lock().unwrap();
            if let Some(list) = buckets.get_mut(&n)
                && let Some(mut buf) = list.pop()
            {
                self.hits.fetch_add(1, Ordering::Relaxed);
                buf.zero();
                return Ok(buf);
            }
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        ComplexAlignedBuffer::alloc(n)
    }

    pub fn release(&self, buf: ComplexAlignedBuffer) {
        if buf.len() == 0 {
            return;
        }
        let mut buckets = self.buckets.lock().unwrap();
        let list = buckets.entry(buf.len()).or_default();
        if list.len() < self.max_per_size {
            list.push(buf);
        }
    }

    pub fn clear(&self) {
        self.buckets.lock().unwrap().clear();
    }

    pub fn stats(&self) -> PoolStats {
        let buckets = self.buckets.lock().unwrap();
        let mut bytes_resident = 0u64;
        let mut bucket_occupancy = Vec::with_capacity(buckets.len());
        for (&size, list) in buckets.iter() {
            bytes_resident += (size * size_of::<Complex64>() * list.len()) as u64;
            bucket_occupancy.push((size, list.len()));
        }
        bucket_occupancy.sort_unstable_by_key(|&(size, _)| size);
        PoolStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            bytes_resident,
            bucket_occupancy,
        }
    }
}

impl Default for ComplexBufferPool {
    fn default() -> Self {
        Self::new(8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquired_buffer_is_zeroed_and_aligned() {
        let pool = BufferPool::new(4);
        let buf = pool.acquire(17).unwrap();
        assert_eq!(buf.len(), 17);
        assert!(buf.iter().all(|&v| v == 0.0));
        assert_eq!((buf.as_ptr() as usize) % MIN_ALIGNMENT, 0);
    }

    #[test]
    fn release_then_acquire_reuses_allocation() {
        let pool = BufferPool::new(4);
        let mut buf = pool.acquire(32).unwrap();
        buf[0] = 42.0;
        pool.release(buf);
        let stats = pool.stats();
        assert_eq!(stats.misses, 1);
        let buf2 = pool.acquire(32).unwrap();
        assert_eq!(stats.misses, pool.stats().misses);
        assert_eq!(buf2[0], 0.0, "acquire re-zeros reused buffers");
        assert_eq!(pool.stats().hits, 1);
    }

    #[test]
    fn bucket_cap_drops_excess_buffers() {
        let pool = BufferPool::new(1);
        pool.release(pool.acquire(8).unwrap());
        pool.release(pool.acquire(8).unwrap());
        let stats = pool.stats();
        assert_eq!(stats.bucket_occupancy, vec![(8, 1)]);
    }

    #[test]
    fn clear_drops_all_pooled_buffers() {
        let pool = BufferPool::new(4);
        pool.release(pool.acquire(8).unwrap());
        pool.release(pool.acquire(16).unwrap());
        pool.clear();
        assert!(pool.stats().bucket_occupancy.is_empty());
    }

    #[test]
    fn zero_length_buffer_roundtrips() {
        let pool = BufferPool::new(4);
        let buf = pool.acquire(0).unwrap();
        assert!(buf.is_empty());
        pool.release(buf);
        assert!(pool.stats().bucket_occupancy.is_empty());
    }

    #[test]
    fn thread_local_pool_reuses_allocation() {
        let pool = ThreadLocalPool::new(2);
        let buf = pool.acquire(12).unwrap();
        pool.release(buf);
        assert_eq!(pool.stats().misses, 1);
        let _buf2 = pool.acquire(12).unwrap();
        assert_eq!(pool.stats().hits, 1);
    }
}
