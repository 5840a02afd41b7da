//! Elementwise map and zip over tensors.
//!
//! Every kernel here walks logical positions through the strided iterator
//! (or, with the `parallel` feature, through `ravel_unravel` per position),
//! so permuted views are read and written in logical order. Outputs are
//! always fresh contiguous tensors of the input shape.

#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelIterator, ParallelIterator};
#[cfg(feature = "parallel")]
use rayon::slice::ParallelSliceMut;

use strided_layout::Layout;

use crate::iter::Iter;
use crate::maybe_sync::{MaybeSend, MaybeSync};
use crate::{Result, StridedError, Tensor};

/// Element count from which `map`/`zip_map` split work across rayon threads
/// when the `parallel` feature is enabled.
pub const MIN_PARALLEL_LEN: usize = 1 << 15;

#[cfg(feature = "parallel")]
#[inline]
fn use_parallel(len: usize) -> bool {
    len >= MIN_PARALLEL_LEN && rayon::current_num_threads() > 1
}

/// Collect `f` over the elements of `data` under `layout`, in logical order.
fn collect_mapped<T, U, F>(data: &[T], layout: &Layout, len: usize, f: &F) -> Vec<U>
where
    T: MaybeSync,
    U: MaybeSend,
    F: Fn(&T) -> U + MaybeSync,
{
    #[cfg(feature = "parallel")]
    {
        if use_parallel(len) {
            log::trace!("map: parallel over {len} elements");
            return (0..len)
                .into_par_iter()
                .map(|p| f(&data[layout.offset_of_position_unchecked(p)]))
                .collect();
        }
    }

    let it = Iter::new(data, layout, len);
    log::trace!(
        "map: {} path over {len} elements",
        if it.is_contiguous() { "contiguous" } else { "strided" }
    );
    it.map(f).collect()
}

impl<T> Tensor<T> {
    /// Apply `f` to every element, producing a contiguous tensor of the same
    /// shape.
    pub fn map<U, F>(&self, f: F) -> Tensor<U>
    where
        T: MaybeSync,
        U: MaybeSend,
        F: Fn(&T) -> U + MaybeSync,
    {
        let data = collect_mapped(self.buffer(), self.layout(), self.numel(), &f);
        Tensor::from_parts_unchecked(data, Layout::contiguous(self.shape()))
    }
}

impl<T: Clone> Tensor<T> {
    /// Replace every element `x` by `f(x)` in place. The layout is kept.
    pub fn map_<F>(&mut self, f: F) -> &mut Self
    where
        T: MaybeSend + MaybeSync,
        F: Fn(&T) -> T + MaybeSync,
    {
        #[cfg(feature = "parallel")]
        {
            let len = self.numel();
            if self.is_contiguous() && use_parallel(len) {
                log::trace!("map_: parallel over {len} elements");
                self.data_mut()[..len]
                    .par_chunks_mut(MIN_PARALLEL_LEN)
                    .for_each(|chunk| chunk.iter_mut().for_each(|x| *x = f(&*x)));
                return self;
            }
        }

        log::trace!(
            "map_: {} path over {} elements",
            if self.is_contiguous() { "contiguous" } else { "strided" },
            self.numel()
        );
        for x in self.iter_mut() {
            *x = f(&*x);
        }
        self
    }

    /// Set every element to `value`.
    pub fn fill_(&mut self, value: T) -> &mut Self {
        for x in self.iter_mut() {
            *x = value.clone();
        }
        self
    }
}

/// Lock-step `f(a[i], b[i])` over two tensors of identical shape.
///
/// Fails with `ShapeMismatch` when the shapes differ; the strides may differ
/// freely. The result is contiguous.
pub fn zip_map<A, B, C, F>(a: &Tensor<A>, b: &Tensor<B>, f: F) -> Result<Tensor<C>>
where
    A: MaybeSync,
    B: MaybeSync,
    C: MaybeSend,
    F: Fn(&A, &B) -> C + MaybeSync,
{
    if a.shape() != b.shape() || a.numel() != b.numel() {
        return Err(StridedError::ShapeMismatch(
            a.shape().to_vec(),
            b.shape().to_vec(),
        ));
    }
    let len = a.numel();

    #[cfg(feature = "parallel")]
    {
        if use_parallel(len) {
            log::trace!("zip_map: parallel over {len} elements");
            let (da, la) = (a.buffer(), a.layout());
            let (db, lb) = (b.buffer(), b.layout());
            let data = (0..len)
                .into_par_iter()
                .map(|p| {
                    f(
                        &da[la.offset_of_position_unchecked(p)],
                        &db[lb.offset_of_position_unchecked(p)],
                    )
                })
                .collect();
            return Ok(Tensor::from_parts_unchecked(
                data,
                Layout::contiguous(a.shape()),
            ));
        }
    }

    let (ia, ib) = (a.iter(), b.iter());
    log::trace!(
        "zip_map: lhs {} / rhs {} over {len} elements",
        if ia.is_contiguous() { "contiguous" } else { "strided" },
        if ib.is_contiguous() { "contiguous" } else { "strided" }
    );
    let data = ia.zip(ib).map(|(x, y)| f(x, y)).collect();
    Ok(Tensor::from_parts_unchecked(
        data,
        Layout::contiguous(a.shape()),
    ))
}
