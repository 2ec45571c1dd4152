//! Row-parallel iteration.
//!
//! Every pass in this crate writes one output row from read-only inputs, so
//! rows can be handed to Rayon independently. Without the `parallel` feature
//! the same closures run sequentially and produce identical bytes.

/// Calls `f(row_index, row)` for each `row_len`-sized chunk of `data`.
#[cfg(feature = "parallel")]
pub(crate) fn for_each_row<T, F>(data: &mut [T], row_len: usize, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Send + Sync,
{
    use rayon::prelude::*;

    data.par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| f(y, row));
}

/// Calls `f(row_index, row)` for each `row_len`-sized chunk of `data`.
#[cfg(not(feature = "parallel"))]
pub(crate) fn for_each_row<T, F>(data: &mut [T], row_len: usize, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Send + Sync,
{
    data.chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| f(y, row));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_see_their_index() {
        let mut data = vec![0usize; 5 * 3];
        for_each_row(&mut data, 3, |y, row| row.fill(y));
        assert_eq!(data, vec![0, 0, 0, 1, 1, 1, 2, 2, 2, 3, 3, 3, 4, 4, 4]);
    }
}
