//! temporary limb buffers for the arithmetic kernels.
//!
//! Small requests live on the stack, bigger ones come from a per thread pool and go back into it once dropped,
//! unless they are bigger than [`MAX_POOLED_LIMBS`].
//! Every buffer is zeroed when it is handed out.

use std::ops::{Deref, DerefMut};

use smallvec::SmallVec;

use crate::big_int::limbs::Limb;

/// requests up to this many limbs are served without touching the heap
pub const INLINE_LIMBS: usize = 64;
/// number of buffers each pool keeps around for reuse
pub const MAX_POOLED: usize = 16;
/// buffers with a bigger capacity are freed instead of pooled
pub const MAX_POOLED_LIMBS: usize = 1 << 14;

/// the reusable buffers of one thread for one limb type
#[derive(Debug)]
pub struct ScratchPool<D> {
    free: Vec<Vec<D>>,
    outstanding: usize,
}
impl<D: Limb> ScratchPool<D> {
    pub const fn new() -> Self {
        Self {
            free: Vec::new(),
            outstanding: 0,
        }
    }

    /// number of pooled buffers currently handed out
    pub const fn outstanding(&self) -> usize {
        self.outstanding
    }
    /// number of buffers waiting for reuse
    pub fn idle(&self) -> usize {
        self.free.len()
    }
    /// limbs held by the idle buffers
    pub fn retained(&self) -> usize {
        self.free.iter().map(Vec::capacity).sum()
    }
    /// capacity of the biggest idle buffer
    pub fn largest(&self) -> usize {
        self.free.iter().map(Vec::capacity).max().unwrap_or(0)
    }

    fn take(&mut self, len: usize) -> Vec<D> {
        self.outstanding += 1;
        let mut buf = self
            .free
            .iter()
            .position(|it| it.capacity() >= len)
            .map_or_else(|| Vec::with_capacity(len), |i| self.free.swap_remove(i));
        buf.clear();
        buf.resize(len, D::ZERO);
        buf
    }

    fn give_back(&mut self, buf: Vec<D>) {
        assert!(self.outstanding > 0, "returned a buffer that wasn't handed out");
        self.outstanding -= 1;
        if buf.capacity() > MAX_POOLED_LIMBS {
            return;
        }
        if self.free.len() < MAX_POOLED {
            self.free.push(buf);
        } else if let Some(smallest) = self
            .free
            .iter_mut()
            .min_by_key(|it| it.capacity())
            .filter(|it| it.capacity() < buf.capacity())
        {
            *smallest = buf;
        }
    }
}
impl<D: Limb> Default for ScratchPool<D> {
    fn default() -> Self {
        Self::new()
    }
}

/// a zeroed buffer of limbs, see [`acquire`]
#[derive(Debug)]
pub struct Scratch<D: Limb> {
    buf: SmallVec<[D; INLINE_LIMBS]>,
    /// goes back into the pool of this thread once dropped
    pooled: bool,
}
impl<D: Limb> Scratch<D> {
    pub fn is_inline(&self) -> bool {
        !self.buf.spilled()
    }
    pub const fn is_pooled(&self) -> bool {
        self.pooled
    }
}

/// hands out `len` zeroed limbs
pub fn acquire<D: Limb>(len: usize) -> Scratch<D> {
    if len <= INLINE_LIMBS {
        return Scratch {
            buf: SmallVec::from_elem(D::ZERO, len),
            pooled: false,
        };
    }
    // without a pool (thread teardown) the buffer is allocated and freed like any other
    match D::with_pool(|pool| pool.take(len)) {
        Some(buf) => Scratch {
            buf: SmallVec::from_vec(buf),
            pooled: true,
        },
        None => Scratch {
            buf: SmallVec::from_vec(vec![D::ZERO; len]),
            pooled: false,
        },
    }
}
/// hands out a copy of `src`
pub fn acquire_copy<D: Limb>(src: &[D]) -> Scratch<D> {
    let mut scratch = acquire(src.len());
    scratch.copy_from_slice(src);
    scratch
}

/// number of pooled buffers of the current thread that are still in use
pub fn outstanding<D: Limb>() -> usize {
    D::with_pool(|pool| pool.outstanding()).unwrap_or(0)
}

impl<D: Limb> Deref for Scratch<D> {
    type Target = [D];

    fn deref(&self) -> &Self::Target {
        &self.buf
    }
}
impl<D: Limb> DerefMut for Scratch<D> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.buf
    }
}
impl<D: Limb> Drop for Scratch<D> {
    fn drop(&mut self) {
        if self.pooled {
            let buf = std::mem::take(&mut self.buf).into_vec();
            // the pool is only gone during thread teardown, the buffer is simply freed then
            let _ = D::with_pool(|pool| pool.give_back(buf));
        }
    }
}
