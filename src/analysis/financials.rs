//! Financial metrics calculator - deterministic spreadsheet-style formulas
//!
//! Pure functions of (PropertyRecord, Strategy). No I/O, total for any
//! well-formed record: a zero price is treated as a sentinel and yields 0
//! for every ratio-based field instead of dividing by zero.

use crate::analysis::types::{FinancialMetrics, PropertyRecord, RentRange, Strategy};

/// Round to one decimal place, half away from zero
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Estimate monthly rent: $1.50 per sqft plus a $200 per-bedroom bonus
fn estimate_monthly_rent(property: &PropertyRecord) -> f64 {
    let base_rent = property.square_footage as f64 * 1.5;
    let bedroom_bonus = property.bedrooms as f64 * 200.0;
    (base_rent + bedroom_bonus).floor()
}

/// Estimate monthly holding expenses from price and rent
///
/// Property taxes 1.2%/yr, insurance 0.5%/yr, maintenance 5% of rent,
/// management 10% of rent, vacancy allowance 5% of rent.
fn estimate_monthly_expenses(property: &PropertyRecord, rent: f64) -> f64 {
    let property_taxes = (property.price * 0.012) / 12.0;
    let insurance = (property.price * 0.005) / 12.0;
    let maintenance = rent * 0.05;
    let management = rent * 0.10;
    let vacancy = rent * 0.05;

    (property_taxes + insurance + maintenance + management + vacancy).floor()
}

/// Compute the full metrics set for a property under a given strategy
pub fn compute(property: &PropertyRecord, strategy: Strategy) -> FinancialMetrics {
    let price = property.price;
    let estimated_rent = estimate_monthly_rent(property);
    let monthly_expenses = estimate_monthly_expenses(property, estimated_rent);

    let cash_flow = estimated_rent - monthly_expenses;

    let cap_rate = if price > 0.0 {
        round1((cash_flow * 12.0) / price * 100.0)
    } else {
        0.0
    };

    let cash_on_cash = if strategy == Strategy::Rental && price > 0.0 {
        round1((cash_flow.floor() * 12.0) / (price * 0.25) * 100.0)
    } else {
        0.0
    };

    FinancialMetrics {
        estimated_rent_range: RentRange {
            min: (estimated_rent * 0.9).floor(),
            max: (estimated_rent * 1.1).floor(),
        },
        monthly_cash_flow: cash_flow.floor(),
        cap_rate_percent: cap_rate,
        cash_on_cash_return_percent: cash_on_cash,
        simplified_roi_percent: round1(cap_rate + 3.0),
        monthly_expenses,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::types::PropertyType;

    fn mock_property() -> PropertyRecord {
        PropertyRecord {
            address: "123 Main St, Austin, TX 78701".to_string(),
            price: 300_000.0,
            bedrooms: 3,
            bathrooms: 2.0,
            square_footage: 1800,
            year_built: 2005,
            lot_size_acres: 0.25,
            property_type: PropertyType::SingleFamily,
        }
    }

    #[test]
    fn test_reference_example() {
        // 1800 sqft * 1.5 + 3 br * 200 = 3300 rent
        // taxes 300 + insurance 125 + maintenance 165 + management 330
        // + vacancy 165 = 1085 expenses
        let metrics = compute(&mock_property(), Strategy::Rental);

        assert_eq!(metrics.monthly_expenses, 1085.0);
        assert_eq!(metrics.monthly_cash_flow, 2215.0);
        assert_eq!(metrics.estimated_rent_range.min, 2970.0);
        assert_eq!(metrics.estimated_rent_range.max, 3630.0);
        // (2215 * 12) / 300000 * 100 = 8.86 -> 8.9
        assert_eq!(metrics.cap_rate_percent, 8.9);
        assert_eq!(metrics.simplified_roi_percent, 11.9);
        // (2215 * 12) / 75000 * 100 = 35.44 -> 35.4
        assert_eq!(metrics.cash_on_cash_return_percent, 35.4);
    }

    #[test]
    fn test_deterministic() {
        let property = mock_property();
        let a = compute(&property, Strategy::Rental);
        let b = compute(&property, Strategy::Rental);
        assert_eq!(a, b);
    }

    #[test]
    fn test_cash_on_cash_zero_outside_rental() {
        for strategy in [Strategy::Flip, Strategy::Brrrr, Strategy::Wholesale] {
            let metrics = compute(&mock_property(), strategy);
            assert_eq!(metrics.cash_on_cash_return_percent, 0.0);
            // Rent and expenses do not depend on strategy
            assert_eq!(metrics.monthly_expenses, 1085.0);
        }
    }

    #[test]
    fn test_zero_price_yields_finite_zeros() {
        let mut property = mock_property();
        property.price = 0.0;

        let metrics = compute(&property, Strategy::Rental);

        assert_eq!(metrics.cap_rate_percent, 0.0);
        assert_eq!(metrics.cash_on_cash_return_percent, 0.0);
        assert_eq!(metrics.simplified_roi_percent, 3.0);
        assert!(metrics.monthly_cash_flow.is_finite());
        assert!(metrics.monthly_expenses.is_finite());
        // With no price there are no tax/insurance lines, only rent-based ones
        assert_eq!(metrics.monthly_expenses, 660.0);
    }

    #[test]
    fn test_zero_everything_is_total() {
        let property = PropertyRecord {
            address: "PO Box 1".to_string(),
            price: 0.0,
            bedrooms: 0,
            bathrooms: 0.0,
            square_footage: 1,
            year_built: 0,
            lot_size_acres: 0.0,
            property_type: PropertyType::Land,
        };

        let metrics = compute(&property, Strategy::Wholesale);
        assert!(metrics.cap_rate_percent.is_finite());
        assert!(metrics.cash_on_cash_return_percent.is_finite());
        assert!(metrics.simplified_roi_percent.is_finite());
    }

    #[test]
    fn test_round1_half_away_from_zero() {
        assert_eq!(round1(8.86), 8.9);
        // 0.25 is exactly representable, so the tie is a true tie
        assert_eq!(round1(0.25), 0.3);
        assert_eq!(round1(-0.25), -0.3);
        assert_eq!(round1(4.2), 4.2);
    }

    #[test]
    fn test_negative_cash_flow_cap_rate() {
        // Expensive property with tiny rent potential goes cash-flow negative
        let mut property = mock_property();
        property.price = 2_000_000.0;
        property.square_footage = 600;
        property.bedrooms = 1;

        let metrics = compute(&property, Strategy::Rental);
        assert!(metrics.monthly_cash_flow < 0.0);
        assert!(metrics.cap_rate_percent < 0.0);
    }
}
