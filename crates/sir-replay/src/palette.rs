//! State colours shared by the scene and the epidemic curve.

use sir_events::HealthState;

pub const SUSCEPTIBLE_COLOR: &str = "#1f77b4";
pub const INFECTED_COLOR: &str = "#ff3b3b";
pub const RECOVERED_COLOR: &str = "#2ca02c";
/// Used for any code outside S/I/R
pub const DEFAULT_COLOR: &str = "#888888";

pub fn state_color(state: HealthState) -> &'static str {
    match state {
        HealthState::Susceptible => SUSCEPTIBLE_COLOR,
        HealthState::Infected => INFECTED_COLOR,
        HealthState::Recovered => RECOVERED_COLOR,
    }
}

pub fn code_color(code: char) -> &'static str {
    HealthState::from_code(code)
        .map(state_color)
        .unwrap_or(DEFAULT_COLOR)
}

/// One colour per code in a replay frame.
pub fn frame_colors(frame: &str) -> Vec<&'static str> {
    frame.chars().map(code_color).collect()
}

/// Shifts the HSV value of `hex` by `factor`, clamped to `[0, 1]`.
///
/// Anything that is not a `#rrggbb` string comes back unchanged.
pub fn adjust_luminance(hex: &str, factor: f64) -> String {
    let Some([r, g, b]) = parse_hex(hex) else {
        return hex.to_string();
    };
    let (h, s, v) = rgb_to_hsv(r, g, b);
    let (r, g, b) = hsv_to_rgb(h, s, (v + factor).clamp(0.0, 1.0));
    format!("#{:02x}{:02x}{:02x}", to_byte(r), to_byte(g), to_byte(b))
}

fn parse_hex(hex: &str) -> Option<[f64; 3]> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .ok()
            .map(|c| f64::from(c) / 255.0)
    };
    Some([channel(0)?, channel(2)?, channel(4)?])
}

fn to_byte(channel: f64) -> u8 {
    (channel * 255.0).round().clamp(0.0, 255.0) as u8
}

fn rgb_to_hsv(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    if max == min {
        return (0.0, 0.0, max);
    }
    let delta = max - min;
    let s = delta / max;
    let rc = (max - r) / delta;
    let gc = (max - g) / delta;
    let bc = (max - b) / delta;
    let h = if r == max {
        bc - gc
    } else if g == max {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };
    ((h / 6.0).rem_euclid(1.0), s, max)
}

fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (v, v, v);
    }
    let sector = (h * 6.0).floor();
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match (sector as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}
