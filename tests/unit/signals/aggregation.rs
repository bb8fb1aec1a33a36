//! Unit tests for category aggregation and the weighted final score

use btock::indicators::registry::names::*;
use btock::indicators::registry::IndicatorCategory;
use btock::models::indicators::IndicatorSet;
use btock::signals::aggregation::Aggregator;
use btock::signals::categories::{CategoryScores, CategoryWeights};
use btock::signals::scoring::normalize_indicator;

use crate::support::assert_close;

fn uniform_scores(score: f64) -> CategoryScores {
    IndicatorCategory::ALL.into_iter().map(|c| (c, score)).collect()
}

#[test]
fn empty_set_scores_zero_everywhere() {
    let scores = Aggregator::category_scores(&IndicatorSet::new());
    assert_eq!(scores, CategoryScores::default());
}

#[test]
fn category_score_is_mean_of_present_members() {
    let indicators = IndicatorSet::new()
        .with(RSI, 75.0)
        .with(WILLIAMS_R, -10.0)
        .with(ADX, 50.0);

    let momentum = Aggregator::score_category(&indicators, IndicatorCategory::Momentum);
    assert_close(momentum, (5.0 / 30.0 + 0.5) / 2.0);
    assert_eq!(Aggregator::score_category(&indicators, IndicatorCategory::Strength), 1.0);
    assert_eq!(Aggregator::score_category(&indicators, IndicatorCategory::Trend), 0.0);
}

#[test]
fn category_mean_holds_for_any_subset_of_members() {
    let values = [12.0, 35.0, 48.0, 66.0, 91.0, -55.0, 4.0, 58.0];
    let members = IndicatorCategory::Momentum.members();
    for k in 1..=members.len() {
        let indicators: IndicatorSet = members[..k]
            .iter()
            .zip(values)
            .map(|(&name, v)| (name, v))
            .collect();
        let expected = members[..k]
            .iter()
            .zip(values)
            .map(|(&name, v)| normalize_indicator(name, v))
            .sum::<f64>()
            / k as f64;
        assert_close(
            Aggregator::score_category(&indicators, IndicatorCategory::Momentum),
            expected,
        );
    }
}

#[test]
fn non_member_values_are_ignored() {
    let indicators = IndicatorSet::new()
        .with(MA5, 123.0)
        .with(PIVOT_CLASSIC, 99.0)
        .with(MACD_SIGNAL, 4.0);
    assert_eq!(Aggregator::category_scores(&indicators), CategoryScores::default());
}

#[test]
fn indicator_scores_list_present_members_with_category() {
    let indicators = IndicatorSet::new()
        .with(RSI, 60.0)
        .with(NEAREST_PIVOT_DISTANCE, 0.005)
        .with(MA200, 10.0);
    let breakdown = Aggregator::indicator_scores(&indicators);
    assert_eq!(breakdown.len(), 2);
    assert_eq!(breakdown[0].name, RSI);
    assert_eq!(breakdown[0].category, IndicatorCategory::Momentum);
    assert_eq!(breakdown[0].raw_value, 60.0);
    assert_close(breakdown[0].score, 0.5);
    assert_eq!(breakdown[1].category, IndicatorCategory::SupportResistance);
}

#[test]
fn final_score_is_weighted_sum() {
    let score = Aggregator::calculate_final_score(&uniform_scores(0.3), &CategoryWeights::uniform(0.2));
    assert_close(score, 0.3);

    let scores = CategoryScores {
        momentum: 1.0,
        trend: -1.0,
        volatility: 0.5,
        strength: 0.0,
        support_resistance: -0.5,
    };
    let expected = 0.2 * 1.0 + 0.3 * -1.0 + 0.15 * 0.5 + 0.15 * -0.5;
    assert_close(
        Aggregator::calculate_final_score(&scores, &CategoryWeights::default()),
        expected,
    );
}

#[test]
fn final_score_rescales_unnormalized_weights() {
    let scores = CategoryScores {
        momentum: 0.8,
        trend: 0.4,
        volatility: -0.2,
        strength: 0.0,
        support_resistance: 0.6,
    };
    let raw = Aggregator::calculate_final_score(&scores, &CategoryWeights::uniform(3.0));
    let normalized = Aggregator::calculate_final_score(&scores, &CategoryWeights::uniform(0.2));
    assert_close(raw, normalized);
}

#[test]
fn final_score_with_zero_weights_is_zero() {
    let score = Aggregator::calculate_final_score(&uniform_scores(0.9), &CategoryWeights::uniform(0.0));
    assert_eq!(score, 0.0);
}

#[test]
fn final_score_is_bounded() {
    for value in [-1.0, -0.7, 0.0, 0.7, 1.0] {
        for weights in [
            CategoryWeights::default(),
            CategoryWeights::new(1.0, 0.0, 0.0, 0.0, 0.0),
            CategoryWeights::new(0.1, 0.1, 0.1, 0.1, 0.6),
        ] {
            let score = Aggregator::calculate_final_score(&uniform_scores(value), &weights);
            assert!((-1.0..=1.0).contains(&score), "{score}");
        }
    }
}

#[test]
fn nan_category_score_yields_neutral_final() {
    let mut scores = uniform_scores(0.5);
    scores.trend = f64::NAN;
    assert_eq!(
        Aggregator::calculate_final_score(&scores, &CategoryWeights::default()),
        0.0
    );
}
