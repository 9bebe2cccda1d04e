//! Property-based tests for matrix operations and the codec.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::Matrix;

    // Strategy for generating matrices with finite entries
    fn matrix(max_dim: usize) -> impl Strategy<Value = Matrix> {
        (1..=max_dim, 1..=max_dim).prop_flat_map(|(rows, cols)| {
            prop::collection::vec(-1.0e6f64..1.0e6f64, rows * cols).prop_map(move |values| {
                let mut m = Matrix::allocate(rows, cols).unwrap();
                m.fill(&values).unwrap();
                m
            })
        })
    }

    // Two matrices of the same shape
    fn matrix_pair(max_dim: usize) -> impl Strategy<Value = (Matrix, Matrix)> {
        (1..=max_dim, 1..=max_dim).prop_flat_map(|(rows, cols)| {
            let entries = prop::collection::vec(-1.0e6f64..1.0e6f64, rows * cols);
            (entries.clone(), entries).prop_map(move |(a, b)| {
                let mut ma = Matrix::allocate(rows, cols).unwrap();
                ma.fill(&a).unwrap();
                let mut mb = Matrix::allocate(rows, cols).unwrap();
                mb.fill(&b).unwrap();
                (ma, mb)
            })
        })
    }

    // Matrices with arbitrary bit patterns, NaN and infinities included
    fn raw_matrix(max_dim: usize) -> impl Strategy<Value = Matrix> {
        (1..=max_dim, 1..=max_dim).prop_flat_map(|(rows, cols)| {
            prop::collection::vec(any::<u64>(), rows * cols).prop_map(move |bits| {
                let values: Vec<f64> = bits.into_iter().map(f64::from_bits).collect();
                let mut m = Matrix::allocate(rows, cols).unwrap();
                m.fill(&values).unwrap();
                m
            })
        })
    }

    proptest! {
        #[test]
        fn identity_is_neutral(m in matrix(6)) {
            let left = Matrix::identity(m.num_rows()).unwrap();
            let right = Matrix::identity(m.num_cols()).unwrap();
            prop_assert_eq!(left.multiply(&m).unwrap(), m.clone());
            prop_assert_eq!(m.multiply(&right).unwrap(), m);
        }

        #[test]
        fn transpose_twice_is_identity(m in matrix(8)) {
            prop_assert_eq!(m.transpose().transpose(), m);
        }

        #[test]
        fn add_commutative((a, b) in matrix_pair(6)) {
            prop_assert_eq!(a.add(&b).unwrap(), b.add(&a).unwrap());
        }

        #[test]
        fn codec_roundtrip_is_bit_exact(m in raw_matrix(7)) {
            let bytes = m.to_bytes().unwrap();
            let back = Matrix::from_bytes(&bytes).unwrap();
            prop_assert_eq!(back.shape(), m.shape());
            for (a, b) in back.as_slice().iter().zip(m.as_slice()) {
                prop_assert_eq!(a.to_bits(), b.to_bits());
            }
        }

        #[test]
        fn rank_bounded_by_shape(m in matrix(6)) {
            prop_assert!(m.rank() <= m.num_rows().min(m.num_cols()));
        }

        #[test]
        fn identity_determinant_is_one(n in 1usize..7) {
            prop_assert_eq!(Matrix::identity(n).unwrap().determinant().unwrap(), 1.0);
        }

        #[test]
        fn determinant_2x2_closed_form(
            a in -1000i32..1000, b in -1000i32..1000,
            c in -1000i32..1000, d in -1000i32..1000
        ) {
            let (a, b, c, d) = (f64::from(a), f64::from(b), f64::from(c), f64::from(d));
            let m = Matrix::from_rows(vec![vec![a, b], vec![c, d]]).unwrap();
            prop_assert_eq!(m.determinant().unwrap(), a * d - b * c);
        }

        #[test]
        fn map_does_not_touch_source(m in matrix(5)) {
            let before = m.clone();
            let _ = m.negate().absolute().floor().ceiling();
            prop_assert_eq!(m, before);
        }
    }

    #[test]
    fn zero_matrix_has_rank_zero() {
        for n in 1..8 {
            assert_eq!(Matrix::allocate(n, n).unwrap().rank(), 0);
        }
    }
}
