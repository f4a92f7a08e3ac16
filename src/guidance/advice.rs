//! Signal Advice — general guidance from sentiment and wearable readings.
//!
//! Independent of the facet ranking: a mood estimate from the sentiment
//! label, one message for the overall health band, and threshold messages
//! for poor sleep and low activity.
//!
//! | Input | Rule |
//! |-------|------|
//! | sentiment label | one message per label, also the mood estimate |
//! | overall health | `≥ 80` good, `≥ 60` moderate, else needs attention |
//! | sleep score | `< 60` sleep hygiene |
//! | activity score | `< 50` daily walking |

use serde::{Deserialize, Serialize};

use crate::scoring::round2;
use crate::signals::{HealthIndices, SentimentLabel, SentimentReading};

pub const POOR_SLEEP_BELOW: f64 = 60.0;
pub const LOW_ACTIVITY_BELOW: f64 = 50.0;

/// Mood estimate plus general recommendations, in rule order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalGuidance {
    pub mood: Option<SentimentLabel>,
    /// Mean of the present health sub-indices, rounded to two decimals.
    pub overall_health: Option<f64>,
    pub recommendations: Vec<String>,
}

/// Build guidance from whichever readings are available.
pub fn signal_guidance(
    sentiment: Option<&SentimentReading>,
    health: Option<&HealthIndices>,
) -> SignalGuidance {
    let mut guidance = SignalGuidance::default();

    if let Some(reading) = sentiment {
        let message = match reading.label {
            SentimentLabel::Positive => "Great! Keep maintaining your positive energy.",
            SentimentLabel::Neutral => "Stay balanced and mindful throughout the day.",
            SentimentLabel::Negative => "Seems you're stressed. Try practicing deep breathing.",
        };
        guidance.recommendations.push(message.to_string());
        guidance.mood = Some(reading.label);
    }

    let Some(health) = health else {
        return guidance;
    };

    guidance.overall_health = health.overall().map(round2);
    if let Some(overall) = guidance.overall_health {
        let message = if overall >= 80.0 {
            "Your physical condition looks great! Keep up the healthy habits."
        } else if overall >= 60.0 {
            "You may need moderate improvements in activity or sleep."
        } else {
            "Your health indicators need attention. Prioritize rest and balanced nutrition."
        };
        guidance.recommendations.push(message.to_string());
    }

    if health.sleep_score.is_some_and(|s| s < POOR_SLEEP_BELOW) {
        guidance
            .recommendations
            .push("Try to improve your sleep hygiene for better mood stability.".to_string());
    }
    if health.activity_score.is_some_and(|a| a < LOW_ACTIVITY_BELOW) {
        guidance
            .recommendations
            .push("Consider adding 20 minutes of walking to your daily routine.".to_string());
    }

    guidance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_readings() {
        assert_eq!(signal_guidance(None, None), SignalGuidance::default());
    }

    #[test]
    fn test_mood_follows_label() {
        let g = signal_guidance(Some(&SentimentReading::from_score(-0.4)), None);
        assert_eq!(g.mood, Some(SentimentLabel::Negative));
        assert_eq!(g.recommendations, vec!["Seems you're stressed. Try practicing deep breathing."]);

        let g = signal_guidance(Some(&SentimentReading::from_score(0.05)), None);
        assert_eq!(g.mood, Some(SentimentLabel::Neutral));
    }

    #[test]
    fn test_health_thresholds() {
        let health = HealthIndices {
            heart_health_index: Some(70.0),
            relaxation_index: Some(80.0),
            sleep_score: Some(55.0),
            activity_score: Some(45.0),
        };
        let g = signal_guidance(None, Some(&health));
        assert_eq!(g.mood, None);
        assert_eq!(g.overall_health, Some(62.5));
        assert_eq!(
            g.recommendations,
            vec![
                "You may need moderate improvements in activity or sleep.",
                "Try to improve your sleep hygiene for better mood stability.",
                "Consider adding 20 minutes of walking to your daily routine.",
            ]
        );
    }

    #[test]
    fn test_good_health_boundary() {
        let health = HealthIndices { sleep_score: Some(80.0), activity_score: Some(50.0), ..Default::default() };
        let g = signal_guidance(Some(&SentimentReading::from_score(0.8)), Some(&health));
        assert_eq!(g.overall_health, Some(65.0));
        assert_eq!(g.recommendations.len(), 2);

        let health = HealthIndices { sleep_score: Some(80.0), ..Default::default() };
        let g = signal_guidance(None, Some(&health));
        assert_eq!(g.recommendations, vec!["Your physical condition looks great! Keep up the healthy habits."]);
    }

    #[test]
    fn test_empty_health_adds_nothing() {
        let g = signal_guidance(None, Some(&HealthIndices::default()));
        assert_eq!(g.overall_health, None);
        assert!(g.recommendations.is_empty());
    }
}
