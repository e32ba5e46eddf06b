//! Advisory rules: combo offers when short of the daily goal, ticket
//! feedback when the goal is met.

use rust_decimal::Decimal;

use super::model::{Advice, AdviceKind, ComboSuggestion};
use crate::catalog::SalonService;
use crate::constants::{
    COMBO_DISCOUNT_PERCENT, COMBO_MAIN_SERVICE_MIN_PRICE, COMBO_PRICE_FACTOR,
    DISPLAY_DECIMAL_PRECISION,
};
use crate::settings::{ticket_threshold_for, Neighborhood};

fn format_money(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(DISPLAY_DECIMAL_PRECISION))
}

/// Highest-priced service matching `eligible`; ties keep the earlier entry.
fn most_expensive<'a>(
    services: &'a [SalonService],
    eligible: impl Fn(&SalonService) -> bool,
) -> Option<&'a SalonService> {
    services
        .iter()
        .filter(|s| eligible(s))
        .fold(None, |best: Option<&SalonService>, candidate| match best {
            Some(current) if current.price >= candidate.price => Some(current),
            _ => Some(candidate),
        })
}

/// Picks a main service priced at or above the combo threshold and a cheaper
/// secondary one to bundle with it.
///
/// The main service is the most expensive eligible one. The secondary is the
/// most expensive service under the threshold, or the main service itself
/// when the catalog has nothing cheaper.
pub fn suggest_combo(services: &[SalonService]) -> Option<ComboSuggestion> {
    let main = most_expensive(services, |s| s.price >= COMBO_MAIN_SERVICE_MIN_PRICE)?;
    let secondary =
        most_expensive(services, |s| s.price < COMBO_MAIN_SERVICE_MIN_PRICE).unwrap_or(main);

    let original_price = main.price + secondary.price;
    Some(ComboSuggestion {
        main_service: main.name.clone(),
        secondary_service: secondary.name.clone(),
        original_price,
        combo_price: original_price * COMBO_PRICE_FACTOR,
        discount_percent: COMBO_DISCOUNT_PERCENT,
    })
}

/// Chooses the advice for the current goal gap and average ticket.
///
/// Any positive gap gets a combo offer (or the premium-services hint when no
/// service qualifies). Otherwise the average ticket is compared with the
/// neighborhood bracket.
pub fn build_advice(
    goal_gap: Decimal,
    average_ticket: Decimal,
    services: &[SalonService],
    neighborhood: Option<Neighborhood>,
) -> (Option<Advice>, Option<ComboSuggestion>) {
    if goal_gap > Decimal::ZERO {
        return match suggest_combo(services) {
            Some(combo) => {
                let message = format!(
                    "You are {} short of today's goal. Offer {} + {} together for {} ({}% off) to close the gap.",
                    format_money(goal_gap),
                    combo.main_service,
                    combo.secondary_service,
                    format_money(combo.combo_price),
                    combo.discount_percent.normalize(),
                );
                (
                    Some(Advice {
                        kind: AdviceKind::ComboOffer,
                        message,
                    }),
                    Some(combo),
                )
            }
            None => (
                Some(Advice {
                    kind: AdviceKind::AddPremiumServices,
                    message: format!(
                        "You are {} short of today's goal. Add higher-value services to your catalog so each visit brings in more.",
                        format_money(goal_gap)
                    ),
                }),
                None,
            ),
        };
    }

    let threshold = ticket_threshold_for(neighborhood);
    let advice = if average_ticket >= threshold {
        Advice {
            kind: AdviceKind::StrongTicket,
            message: format!(
                "Daily goal reached! Your average ticket of {} is above the {} expected for your area. Keep it up.",
                format_money(average_ticket),
                format_money(threshold)
            ),
        }
    } else {
        Advice {
            kind: AdviceKind::RaiseTicket,
            message: format!(
                "Daily goal reached, but your average ticket of {} is below the {} expected for your area. Suggest add-on services to raise it.",
                format_money(average_ticket),
                format_money(threshold)
            ),
        }
    };
    (Some(advice), None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn catalog(entries: &[(&str, Decimal)]) -> Vec<SalonService> {
        entries
            .iter()
            .map(|(name, price)| SalonService::new(*name, *price))
            .collect()
    }

    #[test]
    fn test_combo_pairs_most_expensive_with_cheaper_service() {
        let services = catalog(&[("A", dec!(120)), ("B", dec!(40)), ("C", dec!(30))]);
        let combo = suggest_combo(&services).unwrap();

        assert_eq!(combo.main_service, "A");
        assert_eq!(combo.secondary_service, "B");
        assert_eq!(combo.original_price, dec!(160));
        assert_eq!(combo.combo_price, dec!(137.6));
        assert_eq!(combo.discount_percent, dec!(14));
    }

    #[test]
    fn test_combo_falls_back_to_main_service() {
        let services = catalog(&[("Coloring", dec!(90)), ("Cut", dec!(60))]);
        let combo = suggest_combo(&services).unwrap();

        assert_eq!(combo.main_service, "Coloring");
        assert_eq!(combo.secondary_service, "Coloring");
        assert_eq!(combo.original_price, dec!(180));
        assert_eq!(combo.combo_price, dec!(154.8));
    }

    #[test]
    fn test_combo_main_threshold_is_inclusive_and_ties_keep_first() {
        let services = catalog(&[("X", dec!(50)), ("Y", dec!(50)), ("Z", dec!(10))]);
        let combo = suggest_combo(&services).unwrap();
        assert_eq!(combo.main_service, "X");
        assert_eq!(combo.secondary_service, "Z");
    }

    #[test]
    fn test_no_combo_without_premium_service() {
        let services = catalog(&[("Brow", dec!(25)), ("Nails", dec!(49.99))]);
        assert!(suggest_combo(&services).is_none());

        let (advice, combo) = build_advice(dec!(30), dec!(0), &services, None);
        assert_eq!(advice.unwrap().kind, AdviceKind::AddPremiumServices);
        assert!(combo.is_none());
    }

    #[test]
    fn test_combo_advice_quotes_gap_and_price() {
        let services = catalog(&[("A", dec!(120)), ("B", dec!(40))]);
        let (advice, combo) = build_advice(dec!(33.333), dec!(0), &services, None);
        let advice = advice.unwrap();

        assert_eq!(advice.kind, AdviceKind::ComboOffer);
        assert!(advice.message.contains("33.33"));
        assert!(advice.message.contains("A + B"));
        assert!(advice.message.contains("137.60"));
        assert!(advice.message.contains("14%"));
        assert!(combo.is_some());
    }

    #[test]
    fn test_goal_met_compares_ticket_with_bracket() {
        let (advice, combo) = build_advice(dec!(-5), dec!(130), &[], Some(Neighborhood::Media));
        assert_eq!(advice.unwrap().kind, AdviceKind::StrongTicket);
        assert!(combo.is_none());

        let (advice, _) = build_advice(dec!(0), dec!(130), &[], Some(Neighborhood::Rica));
        assert_eq!(advice.unwrap().kind, AdviceKind::RaiseTicket);

        // default bracket of 100, threshold itself clears it
        let (advice, _) = build_advice(dec!(0), dec!(100), &[], None);
        assert_eq!(advice.unwrap().kind, AdviceKind::StrongTicket);
    }
}
