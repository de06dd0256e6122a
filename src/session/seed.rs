use crate::foundation::core::{Canvas, Rgb8, Vec2};
use crate::session::config::{Config, OriginToken};

/// Initial placement of one pathfinder.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AgentSeed {
    pub x: i32,
    pub y: i32,
    pub velocity: Vec2,
    pub target: Rgb8,
}

/// Target triple for the 1-based agent index within its origin group.
pub fn target_for_index(i: u32) -> Rgb8 {
    if i % 3 == 0 {
        Rgb8::BLUE
    } else if i % 2 == 0 {
        Rgb8::GREEN
    } else {
        Rgb8::RED
    }
}

/// Seed every origin group in the order the tokens were given.
///
/// Each token receives `path_finder_count / tokens` agents, indexed from 1. The result depends
/// only on `config` and `canvas`.
#[tracing::instrument(skip(config), fields(origins = config.origin.len()))]
pub fn seed_agents(config: &Config, canvas: Canvas) -> Vec<AgentSeed> {
    let per_origin = f64::from(config.path_finder_count) / config.origin.len().max(1) as f64;
    let mut seeds = Vec::new();
    for &token in &config.origin {
        seed_origin(token, per_origin, config.speed, canvas, &mut seeds);
    }
    tracing::debug!(agents = seeds.len(), "seeded pathfinders");
    seeds
}

fn seed_origin(
    token: OriginToken,
    per_origin: f64,
    speed: f64,
    canvas: Canvas,
    out: &mut Vec<AgentSeed>,
) {
    let width = f64::from(canvas.width);
    let height = f64::from(canvas.height);
    let mut i: u32 = 1;
    while f64::from(i) < per_origin + 1.0 {
        let along = |extent: f64| {
            let unit = extent / per_origin;
            unit * f64::from(i) - unit / 2.0
        };
        let (x, y, velocity) = match token {
            OriginToken::Bottom => (along(width), height - speed, Vec2::new(0.0, -speed)),
            OriginToken::Top => (along(width), speed, Vec2::new(0.0, speed)),
            OriginToken::Left => (speed, along(height), Vec2::new(speed, 0.0)),
            OriginToken::Right => (width - speed, along(height), Vec2::new(-speed, 0.0)),
            OriginToken::Point { x_pct, y_pct } => (
                width * f64::from(x_pct) / 100.0,
                height * f64::from(y_pct) / 100.0,
                compass(i, speed),
            ),
        };
        out.push(AgentSeed {
            x: interior(x, canvas.width),
            y: interior(y, canvas.height),
            velocity,
            target: target_for_index(i),
        });
        i += 1;
    }
}

/// N, E, S, W by index modulo 4.
fn compass(i: u32, speed: f64) -> Vec2 {
    match i % 4 {
        0 => Vec2::new(0.0, -speed),
        1 => Vec2::new(speed, 0.0),
        2 => Vec2::new(0.0, speed),
        _ => Vec2::new(-speed, 0.0),
    }
}

/// Round and pull into `1..extent-1` so the seed itself is an interior cell.
fn interior(v: f64, extent: u32) -> i32 {
    let hi = (i64::from(extent) - 1).max(1) as f64;
    v.round().clamp(1.0, hi) as i32
}

#[cfg(test)]
#[path = "../../tests/unit/session/seed.rs"]
mod tests;
