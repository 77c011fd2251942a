use bytemuck::{Pod, Zeroable};

/// Demo payload exchanged between the publish and subscribe binaries.
/// Flat and padding-free so it can cross the channel byte-for-byte.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Sample {
    pub sequence: u64,
    pub produced_at_ns: u64,
    pub readings: [f64; 4],
}

impl Sample {
    pub fn new(sequence: u64, produced_at_ns: u64) -> Self {
        let base = sequence as f64;
        Self {
            sequence,
            produced_at_ns,
            readings: [base, base * 0.5, base * 0.25, base * 0.125],
        }
    }
}
