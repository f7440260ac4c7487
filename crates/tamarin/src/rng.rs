/// Seeded xorshift64* generator.
///
/// Every random choice the layout makes (random seeding, random circular order) draws from one of
/// these, so a run is fully determined by its inputs and the caller's seed.
#[derive(Debug, Clone)]
pub struct XorShift64Star {
    state: u64,
}

impl XorShift64Star {
    pub fn new(seed: u64) -> Self {
        // Zero is a fixed point of the xorshift step.
        Self { state: seed.max(1) }
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D_u64)
    }

    /// Uniform in `[0, 1)` with 53 bits of precision.
    pub fn next_f64_unit(&mut self) -> f64 {
        let u = self.next_u64() >> 11;
        (u as f64) / ((1u64 << 53) as f64)
    }

    /// Uniform in `[0, upper)`. Degenerate or non-finite bounds yield `0.0`.
    pub fn next_f64_below(&mut self, upper: f64) -> f64 {
        if !(upper.is_finite() && upper > 0.0) {
            return 0.0;
        }
        // `unit * upper` can round up to `upper` for unit values just below 1.
        let v = self.next_f64_unit() * upper;
        if v < upper { v } else { 0.0 }
    }

    /// Index in `0..upper` via `floor(unit * upper)`; this avoids the modulo bias of `% upper`.
    pub fn next_usize(&mut self, upper: usize) -> usize {
        if upper <= 1 {
            return 0;
        }
        let v = self.next_f64_unit();
        let idx = (v * (upper as f64)).floor() as usize;
        idx.min(upper - 1)
    }

    /// Fisher-Yates shuffle.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.next_usize(i + 1);
            items.swap(i, j);
        }
    }
}
