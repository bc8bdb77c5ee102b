/// Simulated time, advanced by a fixed modeling step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationClock {
    minutes: f64,
    step: f64,
}

impl SimulationClock {
    /// Clock at time zero advancing by `step` minutes.
    pub fn new(step: f64) -> Self {
        Self { minutes: 0.0, step }
    }

    pub fn advance(&mut self) {
        self.minutes += self.step;
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn minutes(&self) -> f64 {
        self.minutes
    }

    pub fn seconds(&self) -> f64 {
        self.minutes * 60.0
    }
}
