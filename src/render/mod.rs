/// Result rendering for the prediction form.
///
/// Turns the view state into plain render models (`ResultPanel`,
/// `SubmitControl`) and a terminal text rendering of them. Nothing here
/// validates the backend's response: whatever was stored is shown.
///
/// Submodules:
/// - `gauge` — probability string to rotation angle.

pub mod gauge;

use std::fmt;

use crate::model::PredictionResult;
use crate::predict::ViewState;

pub use gauge::{Gauge, parse_percentage, percentage_to_angle};

pub const SUBMIT_LABEL: &str = "Get Prediction";
pub const LOADING_LABEL: &str = "Predicting...";
pub const ERROR_HEADING: &str = "Prediction Error:";
pub const RESULT_HEADING: &str = "Prediction Result:";
pub const VERDICT_QUESTION: &str = "Will it rain tomorrow?";

// ---------------------------------------------------------------------------
// Render models
// ---------------------------------------------------------------------------

/// Styling variant of the verdict panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Rain,
    NoRain,
}

impl Verdict {
    pub fn of(result: &PredictionResult) -> Self {
        if result.is_rain() {
            Verdict::Rain
        } else {
            Verdict::NoRain
        }
    }

    /// Style class of the panel background.
    pub fn css_class(&self) -> &'static str {
        match self {
            Verdict::Rain => "rain-bg",
            Verdict::NoRain => "no-rain-bg",
        }
    }
}

/// What the result area shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultPanel {
    Empty,
    Error {
        message: String,
    },
    Prediction {
        verdict: Verdict,
        will_rain: String,
        gauge: Gauge,
    },
}

/// State of the submit button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    pub label: &'static str,
    pub disabled: bool,
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Derives the result area from the view state.
///
/// An error wins over a result; the lifecycle never stores both.
pub fn result_panel(state: &ViewState) -> ResultPanel {
    if let Some(message) = state.error() {
        return ResultPanel::Error {
            message: message.to_string(),
        };
    }
    match state.result() {
        Some(result) => ResultPanel::Prediction {
            verdict: Verdict::of(result),
            will_rain: result.will_rain.clone(),
            gauge: Gauge::from_probability(&result.probability_of_rain),
        },
        None => ResultPanel::Empty,
    }
}

pub fn submit_control(state: &ViewState) -> SubmitControl {
    if state.is_loading() {
        SubmitControl {
            label: LOADING_LABEL,
            disabled: true,
        }
    } else {
        SubmitControl {
            label: SUBMIT_LABEL,
            disabled: false,
        }
    }
}

impl fmt::Display for ResultPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultPanel::Empty => Ok(()),
            ResultPanel::Error { message } => {
                writeln!(f, "{}", ERROR_HEADING)?;
                write!(f, "  {}", message)
            }
            ResultPanel::Prediction {
                verdict,
                will_rain,
                gauge,
            } => {
                let marker = match verdict {
                    Verdict::Rain => "☔",
                    Verdict::NoRain => "☀",
                };
                writeln!(f, "{} {}", marker, RESULT_HEADING)?;
                writeln!(f, "  {} {}", VERDICT_QUESTION, will_rain)?;
                write!(f, "  {}", dial_line(gauge))
            }
        }
    }
}

/// One-line text gauge: a 20-cell bar filled in proportion to the angle.
fn dial_line(gauge: &Gauge) -> String {
    const CELLS: usize = 20;
    let fraction = gauge.angle_deg / gauge::GAUGE_SWEEP_DEG;
    let filled = if fraction.is_nan() {
        0
    } else {
        (fraction.clamp(0.0, 1.0) * CELLS as f64).round() as usize
    };
    format!(
        "[{}{}] {} ({})",
        "#".repeat(filled),
        "-".repeat(CELLS - filled),
        gauge.value_text,
        gauge.needle_transform
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatureSet;
    use crate::model::PredictError;

    fn resolved_with(body: &str) -> ViewState {
        let mut state = ViewState::new();
        state.begin_submit(&FeatureSet::default());
        state.resolve_success(serde_json::from_str(body).expect("valid body"));
        state
    }

    #[test]
    fn test_idle_state_renders_nothing() {
        let panel = result_panel(&ViewState::new());
        assert_eq!(panel, ResultPanel::Empty);
        assert_eq!(panel.to_string(), "");
    }

    #[test]
    fn test_error_panel_shows_message() {
        let mut state = ViewState::new();
        state.begin_submit(&FeatureSet::default());
        state.resolve_failure(&PredictError::backend(500, Some("model unavailable".to_string())));

        let panel = result_panel(&state);
        assert_eq!(
            panel,
            ResultPanel::Error {
                message: "model unavailable".to_string()
            }
        );
        assert_eq!(panel.to_string(), "Prediction Error:\n  model unavailable");
    }

    #[test]
    fn test_yes_selects_rain_variant() {
        let state = resolved_with(r#"{"will_rain": "Yes", "probability_of_rain": "80.00%"}"#);
        match result_panel(&state) {
            ResultPanel::Prediction { verdict, gauge, .. } => {
                assert_eq!(verdict, Verdict::Rain);
                assert_eq!(verdict.css_class(), "rain-bg");
                assert_eq!(gauge.angle_deg, 144.0);
            }
            other => panic!("expected prediction panel, got {:?}", other),
        }
    }

    #[test]
    fn test_anything_but_yes_selects_no_rain_variant() {
        for verdict in ["No", "yes", "YES", ""] {
            let body = format!(
                r#"{{"will_rain": "{}", "probability_of_rain": "30.00%"}}"#,
                verdict
            );
            let state = resolved_with(&body);
            match result_panel(&state) {
                ResultPanel::Prediction { verdict, .. } => assert_eq!(verdict, Verdict::NoRain),
                other => panic!("expected prediction panel, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_missing_fields_render_blank_without_error() {
        let state = resolved_with("{}");
        match result_panel(&state) {
            ResultPanel::Prediction {
                will_rain, gauge, ..
            } => {
                assert_eq!(will_rain, "");
                assert!(gauge.angle_deg.is_nan());
            }
            other => panic!("expected prediction panel, got {:?}", other),
        }
    }

    #[test]
    fn test_prediction_text_rendering() {
        let state = resolved_with(r#"{"will_rain": "Yes", "probability_of_rain": "50.00%"}"#);
        let text = result_panel(&state).to_string();
        assert!(text.contains("Prediction Result:"));
        assert!(text.contains("Will it rain tomorrow? Yes"));
        assert!(text.contains("[##########----------] 50.00% (rotate(90deg))"), "got {}", text);
    }

    #[test]
    fn test_submit_control_disabled_while_loading() {
        let mut state = ViewState::new();
        assert_eq!(
            submit_control(&state),
            SubmitControl {
                label: SUBMIT_LABEL,
                disabled: false
            }
        );
        state.begin_submit(&FeatureSet::default());
        assert!(submit_control(&state).disabled);
        assert_eq!(submit_control(&state).label, LOADING_LABEL);
    }
}
