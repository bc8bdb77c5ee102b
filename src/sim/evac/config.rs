use crate::Building;

/// Empirical speed-density curve `v = v0 * (1 - a * ln(d / d0))`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DensityCurve {
    /// Density below which people walk freely (persons/m²)
    pub d0: f64,
    /// Sensitivity of speed to density
    pub a: f64,
}

/// Movement through an opening.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpeningModel {
    pub curve: DensityCurve,
    /// Above this density the speed is scaled by `dense_intercept - dense_slope * d`
    pub dense_density: f64,
    pub dense_intercept: f64,
    pub dense_slope: f64,
    /// At or above this density, openings narrower than `congested_width` switch
    /// to `congested_scale * (congested_base + congested_per_width * width) / d0`
    pub congested_density: f64,
    pub congested_width: f64,
    pub congested_scale: f64,
    pub congested_base: f64,
    pub congested_per_width: f64,
}

/// Movement on stairs, separate curves for each direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StairModel {
    pub v0_up: f64,
    pub up: DensityCurve,
    pub v0_down: f64,
    pub down: DensityCurve,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedModel {
    pub room: DensityCurve,
    pub opening: OpeningModel,
    pub stair: StairModel,
}

impl Default for SpeedModel {
    fn default() -> Self {
        Self {
            room: DensityCurve { d0: 0.51, a: 0.295 },
            opening: OpeningModel {
                curve: DensityCurve { d0: 0.65, a: 0.295 },
                dense_density: 5.0,
                dense_intercept: 1.25,
                dense_slope: 0.05,
                congested_density: 9.0,
                congested_width: 1.6,
                congested_scale: 10.0,
                congested_base: 2.5,
                congested_per_width: 3.75,
            },
            stair: StairModel {
                v0_up: 50.0,
                up: DensityCurve { d0: 0.67, a: 0.305 },
                v0_down: 80.0,
                down: DensityCurve { d0: 0.89, a: 0.4 },
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    // Time
    /// Modeling step (min), 0 derives it from the building on start
    pub modeling_step: f64,
    /// Stop after this many ticks even if people remain
    pub max_ticks: Option<usize>,

    // Movement
    /// Free walking speed (m/min)
    pub max_speed: f64,
    /// Density (persons/m²) at or below which a zone empties in one step,
    /// 0 falls back to half a person per zone area
    pub density_min: f64,
    /// Maximum density (persons/m²) a zone can hold
    pub density_max: f64,
    pub speed: SpeedModel,

    // Termination
    /// The simulation ends when at most this many people remain in reachable zones
    pub remainder: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationConfig {
    pub fn new() -> Self {
        Self {
            modeling_step: 0.01,
            max_ticks: None,
            max_speed: 100.0,
            density_min: 0.1,
            density_max: 5.0,
            speed: SpeedModel::default(),
            remainder: 0.0,
        }
    }

    /// Returns the modeling step, derived from the mean zone size when unset:
    /// one tenth of the time needed to cross an average zone at full speed.
    ///
    /// The mean is taken over all zones including the outside, which adds no area.
    pub fn resolve_modeling_step(&self, building: &Building) -> f64 {
        if self.modeling_step > 0.0 {
            return self.modeling_step;
        }
        let count = building.zones().len();
        if count == 0 {
            return 0.0;
        }
        let total_area: f64 = building
            .zones()
            .iter()
            .filter(|z| !z.is_outside())
            .map(|z| z.area)
            .sum();
        let mean_area = total_area / count as f64;
        mean_area.sqrt() / self.max_speed * 0.1
    }
}
