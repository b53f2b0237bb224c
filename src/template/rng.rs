/// A small linear-congruential pseudo-random stream.
///
/// Template generation draws every "random" choice from one of these, so a
/// catalog built from the same seed with the same call sequence is identical
/// on every run and platform.
#[derive(Debug, Clone)]
pub struct SeededRng {
    state: u64,
}

// Knuth's MMIX constants
const MULTIPLIER: u64 = 6364136223846793005;
const INCREMENT: u64 = 1442695040888963407;

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        let mut rng = Self { state: seed };
        // Mix the seed in so small seeds don't start with small outputs
        rng.step();
        rng
    }

    fn step(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
        self.state
    }

    /// Next value in `[0, 1)`
    pub fn next_f64(&mut self) -> f64 {
        // Top 53 bits; the low bits of an LCG are weak
        (self.step() >> 11) as f64 / (1u64 << 53) as f64
    }

    pub fn next_f32(&mut self) -> f32 {
        self.next_f64() as f32
    }

    /// Uniform value in `[min, max)`
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + (max - min) * self.next_f32()
    }

    /// Uniform integer in `[0, n)`; 0 when `n == 0`
    pub fn below(&mut self, n: usize) -> usize {
        ((self.next_f64() * n as f64) as usize).min(n.saturating_sub(1))
    }

    /// True with probability `p`
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}
