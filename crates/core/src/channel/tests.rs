//! Tests for channel types and context.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use rstest::rstest;

use super::context::{form_share_percent, ShareAssessment, SpendShare};
use super::types::Channel;

#[rstest]
#[case(Channel::Youtube, dec!(500))]
#[case(Channel::Facebook, dec!(200))]
#[case(Channel::GoogleSearch, dec!(150))]
#[case(Channel::Linkedin, dec!(300))]
#[case(Channel::Other, dec!(200))]
fn test_default_cpas(#[case] channel: Channel, #[case] expected: Decimal) {
    assert_eq!(channel.default_cpa(), expected);
}

#[test]
fn test_channel_display_and_parse() {
    for channel in [
        Channel::Youtube,
        Channel::Facebook,
        Channel::GoogleSearch,
        Channel::Linkedin,
        Channel::Other,
    ] {
        let parsed: Channel = channel.to_string().parse().expect("display should parse");
        assert_eq!(parsed, channel);
    }

    assert_eq!("google_search".parse::<Channel>(), Ok(Channel::GoogleSearch));
    assert!("MySpace".parse::<Channel>().is_err());
}

#[test]
fn test_spend_share_percent() {
    let share = SpendShare::calculate(dec!(30000), dec!(100000));
    assert_eq!(share.share_percent, dec!(30));
    assert_eq!(share.assessment, ShareAssessment::Balanced);
}

#[rstest]
#[case(dec!(5000), dec!(100000), ShareAssessment::LowShare)]
#[case(dec!(10000), dec!(100000), ShareAssessment::Balanced)]
#[case(dec!(50000), dec!(100000), ShareAssessment::Balanced)]
#[case(dec!(60000), dec!(100000), ShareAssessment::HighShare)]
fn test_share_assessment_boundaries(
    #[case] channel_spend: Decimal,
    #[case] total: Decimal,
    #[case] expected: ShareAssessment,
) {
    assert_eq!(SpendShare::calculate(channel_spend, total).assessment, expected);
}

#[test]
fn test_spend_share_zero_total_guard() {
    let share = SpendShare::calculate(dec!(30000), Decimal::ZERO);
    assert_eq!(share.share_percent, Decimal::ZERO);
    assert_eq!(share.assessment, ShareAssessment::LowShare);
}

#[test]
fn test_form_share_percent() {
    // 30000 / 150 = 200 forms out of 4000 total
    assert_eq!(
        form_share_percent(dec!(30000), dec!(150), dec!(4000)),
        dec!(5)
    );
}

#[test]
fn test_form_share_guards() {
    assert_eq!(
        form_share_percent(dec!(30000), Decimal::ZERO, dec!(4000)),
        Decimal::ZERO
    );
    assert_eq!(
        form_share_percent(dec!(30000), dec!(150), Decimal::ZERO),
        Decimal::ZERO
    );
}
