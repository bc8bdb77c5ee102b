//! Walking speed (m/min) as a function of crowd density.

use crate::EvacError;
use crate::Zone;
use crate::geom::opening::LEVEL_EPS;
use anyhow::Result;

use super::config::{DensityCurve, SimulationConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StairDirection {
    Up,
    Down,
}

/// `v0` up to the curve's threshold density, then decreasing logarithmically.
pub fn velocity(v0: f64, curve: &DensityCurve, density: f64) -> f64 {
    if density > curve.d0 {
        v0 * (1.0 - curve.a * (density / curve.d0).ln())
    } else {
        v0
    }
}

/// Horizontal movement inside a room.
pub fn speed_in_room(config: &SimulationConfig, density: f64) -> f64 {
    velocity(config.max_speed, &config.speed.room, density)
}

/// Movement through an opening of the given width (m).
pub fn speed_through_opening(config: &SimulationConfig, density: f64, width: f64) -> f64 {
    let m = &config.speed.opening;
    let mut v = velocity(config.max_speed, &m.curve, density);
    if density > m.dense_density {
        v *= m.dense_intercept - m.dense_slope * density;
    }
    if density >= m.congested_density && width < m.congested_width {
        v = m.congested_scale * (m.congested_base + m.congested_per_width * width) / m.curve.d0;
    }
    v
}

pub fn speed_on_stair(config: &SimulationConfig, direction: StairDirection, density: f64) -> f64 {
    let m = &config.speed.stair;
    match direction {
        StairDirection::Up => velocity(m.v0_up, &m.up, density),
        StairDirection::Down => velocity(m.v0_down, &m.down, density),
    }
}

/// Speed of people leaving `giver` for `receiver`.
///
/// Stair curves apply when the receiver is a staircase on another level,
/// otherwise people walk as in a room.
pub fn speed_in_zone(config: &SimulationConfig, receiver: &Zone, giver: &Zone) -> f64 {
    let density = giver.density();
    let dh = receiver.z_level - giver.z_level;
    if receiver.is_staircase() && dh.abs() > LEVEL_EPS {
        let direction = if dh > 0.0 {
            StairDirection::Up
        } else {
            StairDirection::Down
        };
        speed_on_stair(config, direction, density)
    } else {
        speed_in_room(config, density)
    }
}

/// Speed at which people leave `giver` through a transit of `width` into `receiver`:
/// the slower of the zone speed and the opening speed.
pub fn exit_speed(config: &SimulationConfig, receiver: &Zone, giver: &Zone, width: f64) -> Result<f64> {
    let zone_speed = speed_in_zone(config, receiver, giver);
    let opening_speed = speed_through_opening(config, giver.density(), width);
    let v = zone_speed.min(opening_speed);
    if !(v.is_finite() && v > 0.0) {
        return Err(EvacError::numeric(format!(
            "Exit speed from {} to {} is {v} m/min (density {:.3}, width {width:.3})",
            giver.name,
            receiver.name,
            giver.density()
        )));
    }
    Ok(v)
}
