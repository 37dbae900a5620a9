//! Master-buffer mixing

/// Mix per-note buffers into one master buffer.
///
/// Output length is the longest input; missing indices contribute 0.0.
/// Every sample is divided by the total number of input buffers, not the
/// number sounding at that instant (see DESIGN.md on the divisor choice).
pub fn mix_buffers(buffers: &[Vec<f64>]) -> Vec<f64> {
    if buffers.is_empty() {
        return Vec::new();
    }

    let max_length = buffers.iter().map(Vec::len).max().unwrap_or(0);
    let count = buffers.len() as f64;

    (0..max_length)
        .map(|i| {
            let sum: f64 = buffers
                .iter()
                .map(|buffer| buffer.get(i).copied().unwrap_or(0.0))
                .sum();
            sum / count
        })
        .collect()
}
