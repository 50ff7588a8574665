/// Probability gauge geometry.
///
/// The gauge is a half circle: 0% points left (0°), 100% points right
/// (180°). The same rotation is applied to the fill layer and the needle.

/// Sweep of the gauge in degrees.
pub const GAUGE_SWEEP_DEG: f64 = 180.0;

/// Gauge layers derived from one probability string.
#[derive(Debug, Clone, PartialEq)]
pub struct Gauge {
    pub angle_deg: f64,
    pub fill_transform: String,
    pub needle_transform: String,
    /// Probability text shown in the gauge centre, as received.
    pub value_text: String,
}

/// Parses "62.20%" as 62.2.
///
/// The first percent sign is dropped and the longest leading decimal number
/// is read, so trailing junk after the number is ignored. Returns NaN when
/// no number can be read; callers pass it through.
pub fn parse_percentage(probability: &str) -> f64 {
    leading_float(&probability.replacen('%', "", 1))
}

/// Reads the longest decimal number at the start of `text`.
fn leading_float(text: &str) -> f64 {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |mut at: usize| {
        while at < bytes.len() && bytes[at].is_ascii_digit() {
            at += 1;
        }
        at
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        let frac_digits = frac_end - (end + 1);
        if mantissa_digits + frac_digits > 0 {
            mantissa_digits += frac_digits;
            end = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return f64::NAN;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_start = end + 1;
        if matches!(bytes.get(exp_start), Some(b'+' | b'-')) {
            exp_start += 1;
        }
        let exp_end = digits_from(exp_start);
        if exp_end > exp_start {
            end = exp_end;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}

/// Maps a percentage in 0..=100 onto the gauge sweep. No clamping.
pub fn percentage_to_angle(percent: f64) -> f64 {
    (percent / 100.0) * GAUGE_SWEEP_DEG
}

pub fn rotate_transform(angle_deg: f64) -> String {
    format!("rotate({}deg)", angle_deg)
}

impl Gauge {
    pub fn from_probability(probability: &str) -> Self {
        let angle_deg = percentage_to_angle(parse_percentage(probability));
        let transform = rotate_transform(angle_deg);
        Self {
            angle_deg,
            fill_transform: transform.clone(),
            needle_transform: transform,
            value_text: probability.to_string(),
        }
    }
}
