/// Maps a playback position between two chunkings of the same text by
/// relative progress. Non-decreasing in `source_index` and always inside
/// `[0, target_len)`; returns 0 when either sequence is empty.
pub fn map_chunk_index_by_progress(source_index: usize, source_len: usize, target_len: usize) -> usize {
    if source_len == 0 || target_len == 0 {
        return 0;
    }

    let clamped = source_index.min(source_len - 1) as u128;
    let mapped = (clamped * target_len as u128) / source_len as u128;

    (mapped as usize).min(target_len - 1)
}
