//! Deals without a partner that close soon.

use chrono::NaiveDate;
use pipeline_hygiene_core::NoPartnerOpportunity;

use crate::context::EvaluationContext;

/// A no-partner deal whose close date falls inside the window.
#[derive(Debug, Clone, PartialEq)]
pub struct NoPartnerAlert<'a> {
    pub opportunity: &'a NoPartnerOpportunity,
    pub close_date: NaiveDate,
    pub days_until_close: i64,
}

/// Flags deals closing within `[today, today + no_partner_close_days]`.
///
/// Alerts are ordered by days until close, then opportunity id. Deals
/// without a parseable close date are skipped.
pub fn closing_without_partner<'a>(
    opportunities: &'a [NoPartnerOpportunity],
    ctx: &EvaluationContext,
) -> Vec<NoPartnerAlert<'a>> {
    let window = ctx.windows().no_partner_close_days;
    let mut alerts: Vec<NoPartnerAlert<'a>> = opportunities
        .iter()
        .filter_map(|opportunity| {
            let close_date = opportunity.close_date?;
            ctx.within_next_days(close_date, window).then(|| NoPartnerAlert {
                opportunity,
                close_date,
                days_until_close: ctx.days_from_today(close_date),
            })
        })
        .collect();
    alerts.sort_by(|a, b| {
        a.days_until_close
            .cmp(&b.days_until_close)
            .then_with(|| a.opportunity.id.cmp(&b.opportunity.id))
    });
    alerts
}
