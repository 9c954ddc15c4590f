//! The pure pricing factors. Each maps one input signal to a multiplier;
//! none of them perform I/O.

use chrono::{Datelike, NaiveDate};

/// Demand multiplier used when the route has no traveler supply at all.
/// Doubles as the "no real signal" marker for confidence scoring.
pub const NO_SUPPLY_DEMAND_FACTOR: f64 = 1.50;

/// Route multiplier assigned to a rarely-listed route. Also the "no real
/// signal" marker for confidence scoring.
pub const RARE_ROUTE_FACTOR: f64 = 1.30;

/// Route competition from the number of cards created on the exact route in
/// the trailing month. More competition means a lower multiplier.
pub fn route_factor(monthly_count: i64) -> f64 {
    if monthly_count > 100 {
        0.85
    } else if monthly_count > 50 {
        1.00
    } else if monthly_count > 10 {
        1.15
    } else {
        RARE_ROUTE_FACTOR
    }
}

/// Seasonal multiplier from month and day only (year-independent).
/// Windows are checked in priority order; the year-end holiday window wins
/// over the surrounding winter off-peak months.
pub fn season_factor(date: NaiveDate) -> f64 {
    let md = (date.month(), date.day());

    // Persian New Year travel window
    if md >= (3, 15) && md <= (4, 10) {
        return 1.40;
    }
    // Summer
    if md >= (6, 1) && md <= (9, 30) {
        return 1.25;
    }
    // Year-end holidays
    if md >= (12, 15) || md <= (1, 10) {
        return 1.30;
    }
    // Winter off-peak: Nov, Feb, and the rest of Dec/Jan
    if matches!(md.0, 11 | 2 | 12 | 1) {
        return 0.90;
    }
    1.00
}

/// Surge multiplier from the sender/traveler balance on a route.
/// Piecewise-linear in the senders-per-traveler ratio, capped at 2.0.
pub fn demand_factor(travelers: i64, senders: i64) -> f64 {
    if travelers == 0 {
        return NO_SUPPLY_DEMAND_FACTOR;
    }
    let ratio = senders as f64 / travelers as f64;
    if ratio < 0.5 {
        0.80
    } else if ratio < 1.0 {
        0.90 + (ratio - 0.5) * 0.20
    } else if ratio < 2.0 {
        1.00 + (ratio - 1.0) * 0.30
    } else if ratio < 3.0 {
        1.30 + (ratio - 2.0) * 0.30
    } else {
        (1.60 + (ratio - 3.0) * 0.10).min(2.00)
    }
}

/// Urgency multiplier from whole days until departure. Past dates price
/// like last-minute travel.
pub fn urgency_factor(days_until: i64) -> f64 {
    if days_until < 0 {
        return 1.50;
    }
    if days_until > 30 {
        1.00
    } else if days_until > 14 {
        1.05
    } else if days_until > 7 {
        1.10
    } else if days_until > 3 {
        1.20
    } else if days_until > 1 {
        1.35
    } else {
        1.50
    }
}

/// Weight multiplier: small-package premium below 1 kg, sliding bulk
/// discount from 5 kg up. Bucket lower edges are inclusive.
pub fn weight_factor(weight_kg: f64) -> f64 {
    if weight_kg < 1.0 {
        1.10
    } else if weight_kg < 5.0 {
        1.00
    } else if weight_kg < 10.0 {
        0.98
    } else if weight_kg < 20.0 {
        0.95
    } else {
        0.90
    }
}
