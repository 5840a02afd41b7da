//! Construction helpers: zeros, counting sequences, random fills.

use std::ops::Add;

use num_traits::{One, Zero};
use strided_layout::{product, Layout};

use crate::Tensor;

impl<T: Clone + Zero> Tensor<T> {
    /// Row-major tensor of zeros.
    pub fn zeros(shape: &[usize]) -> Self {
        Self::full(shape, T::zero())
    }
}

impl<T: Clone + Add<Output = T> + One> Tensor<T> {
    /// Counting sequence `start, start + 1, ...` laid out in row-major order.
    pub fn iota(shape: &[usize], start: T) -> Self {
        let n = product(shape);
        let mut data = Vec::with_capacity(n);
        let mut next = start;
        for i in 0..n {
            if i + 1 < n {
                let following = next.clone() + T::one();
                data.push(std::mem::replace(&mut next, following));
            } else {
                data.push(next.clone());
            }
        }
        Self::from_parts_unchecked(data, Layout::contiguous(shape))
    }
}

#[cfg(feature = "random")]
impl<T> Tensor<T>
where
    T: num_traits::Float,
    rand_distr::StandardNormal: rand_distr::Distribution<T>,
{
    /// Row-major tensor of independent standard normal samples.
    pub fn randn<R: rand::Rng + ?Sized>(shape: &[usize], rng: &mut R) -> Self {
        use rand_distr::Distribution;

        let data: Vec<T> = rand_distr::StandardNormal
            .sample_iter(&mut *rng)
            .take(product(shape))
            .collect();
        Self::from_parts_unchecked(data, Layout::contiguous(shape))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros() {
        let t = Tensor::<f32>::zeros(&[2, 3]);
        assert_eq!(t.numel(), 6);
        assert!(t.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_iota() {
        let t = Tensor::iota(&[2, 3], 5);
        assert!(t.is_contiguous());
        assert_eq!(t.to_vec(), vec![5, 6, 7, 8, 9, 10]);
        assert_eq!(*t.at(&[1, 0]).unwrap(), 8);
    }

    #[test]
    fn test_iota_float_and_empty() {
        assert_eq!(Tensor::iota(&[3], 0.5).to_vec(), vec![0.5, 1.5, 2.5]);
        assert!(Tensor::iota(&[0, 4], 0).is_empty());
        assert_eq!(Tensor::iota(&[], 9).to_vec(), vec![9]);
        // the last element may sit at the type's maximum
        assert_eq!(*Tensor::iota(&[256], 0u8).flat(255).unwrap(), 255);
    }

    #[cfg(feature = "random")]
    #[test]
    fn test_randn_seeded() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let a: Tensor<f64> = Tensor::randn(&[4, 8], &mut StdRng::seed_from_u64(7));
        let b: Tensor<f64> = Tensor::randn(&[4, 8], &mut StdRng::seed_from_u64(7));
        assert_eq!(a.shape(), &[4, 8]);
        assert_eq!(a, b);
        assert!(a.iter().all(|x| x.is_finite()));
    }
}
