// Threshold-dispatched parallel reduction over pixel chunks

use rayon::prelude::*;

/// Pixel count from which a frame is reduced on the rayon pool.
///
/// Below this the sequential loop is faster than splitting the work.
pub(crate) const PARALLEL_THRESHOLD: usize = 64 * 1024;

/// Pixels folded into one partial result before partials are combined.
const BLOCK_PIXELS: usize = 16 * 1024;

/// Fold `data` in `chunk_size` steps, in parallel when the chunk count
/// reaches `PARALLEL_THRESHOLD`.
///
/// Each block of `BLOCK_PIXELS` chunks is folded on its own and the
/// partials are reduced in block order on both paths, so floating-point
/// accumulators give bit-identical results from run to run.
pub(crate) fn fold_reduce<A, I, F, R>(
    data: &[u8],
    chunk_size: usize,
    init: I,
    fold_fn: F,
    reduce_fn: R,
) -> A
where
    A: Send,
    I: Fn() -> A + Sync + Send,
    F: Fn(A, &[u8]) -> A + Sync + Send,
    R: Fn(A, A) -> A + Sync + Send,
{
    let block_len = chunk_size * BLOCK_PIXELS;
    let fold_block = |block: &[u8]| block.chunks_exact(chunk_size).fold(init(), &fold_fn);

    if data.len() / chunk_size >= PARALLEL_THRESHOLD {
        let partials: Vec<A> = data.par_chunks(block_len).map(fold_block).collect();
        partials.into_iter().fold(init(), &reduce_fn)
    } else {
        data.chunks(block_len).map(fold_block).fold(init(), &reduce_fn)
    }
}
