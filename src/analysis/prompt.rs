//! Prompt builder - deterministic assembly of the analysis instruction
//!
//! The closing instruction enumerates the exact ten output fields with their
//! value domains spelled out, so the response parser has a well-defined
//! target shape.

use crate::analysis::types::{MarketContext, PropertyRecord, Strategy};

/// Format a dollar amount with thousands separators, e.g. 300000 -> "300,000"
fn format_dollars(value: f64) -> String {
    let whole = value.trunc() as i64;
    let digits = whole.abs().to_string();
    let mut out = String::new();

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }

    if whole < 0 {
        format!("-{}", out)
    } else {
        out
    }
}

fn strategy_block(strategy: Strategy) -> &'static str {
    match strategy {
        Strategy::Rental => {
            "\
RENTAL INVESTMENT FOCUS:
- Analyze rent-to-price ratio and cash flow potential
- Evaluate tenant quality for this neighborhood
- Consider property management requirements
- Assess long-term appreciation vs cash flow strategy
- Review local landlord regulations and rent control laws
- Calculate 1% rule compliance (monthly rent should be 1% of purchase price)
- Evaluate cap rate competitiveness for the market"
        }
        Strategy::Flip => {
            "\
FIX & FLIP FOCUS:
- Estimate renovation costs based on age and condition
- Analyze ARV (After Repair Value) potential
- Review comparable sales of renovated properties
- Assess holding costs and timeline risks
- Evaluate contractor availability and permit requirements
- Calculate potential profit margins (aim for 20%+ ROI)
- Identify highest-value renovation improvements"
        }
        Strategy::Brrrr => {
            "\
BRRRR STRATEGY FOCUS:
- Assess refinance potential after renovation
- Analyze rental income after improvements
- Evaluate forced appreciation opportunities
- Review cash-out refinance requirements (70-80% LTV)
- Consider renovation loan vs cash purchase
- Calculate infinite return potential
- Assess local rental demand for renovated units"
        }
        Strategy::Wholesale => {
            "\
WHOLESALE FOCUS:
- Identify motivated seller indicators
- Calculate maximum allowable offer (MAO) for investors
- Assess assignment fee potential
- Evaluate speed of sale requirements
- Review property's appeal to fix-and-flip investors
- Consider off-market deal potential
- Analyze investor buyer pool in area"
        }
    }
}

/// Build the full analysis prompt for one property under one strategy
pub fn build(property: &PropertyRecord, market: &MarketContext, strategy: Strategy) -> String {
    format!(
        r#"You are a seasoned real estate investment expert with 20+ years of experience analyzing properties for {strategy} investment strategy.

Property Details:
- Address: {address}
- Price: ${price}
- Bedrooms: {bedrooms}
- Bathrooms: {bathrooms}
- Square Feet: {sqft}
- Year Built: {year_built}
- Lot Size: {lot_size} acres
- Property Type: {property_type}

Market Context:
- Median Price: ${median_price}
- Price Appreciation: {appreciation}%
- Average Days on Market: {days_on_market}

{strategy_block}

CRITICAL ANALYSIS REQUIRED:

1. **Valuation Assessment**: Is this home likely over- or under-valued for its neighborhood? Provide specific reasoning based on price per sqft vs comps.

2. **Financing Eligibility**: Would this qualify for FHA financing, conventional loans, or would it likely require cash-only? Consider condition, age, and price point.

3. **Red Flag Analysis**: What's the top red flag that would scare a smart investor? Be brutally honest about the biggest risk.

4. **Market Position**: How does this property compare to similar investments in the area? Is it positioned competitively?

5. **Exit Strategy**: What's the most realistic exit strategy and timeline for this investment?

Please provide a comprehensive analysis in JSON format with:
1. dealScore (1-10): Overall investment potential with harsh grading
2. summary: 2-3 sentence overview highlighting the key opportunity or concern
3. strengths: Array of 3-4 specific positive factors with numbers where possible
4. risks: Array of 3-4 potential risks, with the top red flag first
5. recommendations: Array of 3-4 specific actionable next steps
6. valuationAssessment: "overvalued" | "market" | "undervalued" with reasoning
7. financingLikelihood: "fha-eligible" | "conventional-only" | "cash-required" with explanation
8. topRedFlag: Single biggest concern that could kill this deal
9. marketPosition: How this compares to similar properties (better/worse/average)
10. exitStrategy: Most realistic exit plan and timeline

Be specific, use numbers, and don't sugarcoat problems. Focus on {strategy}-specific insights.
"#,
        strategy = strategy,
        address = property.address,
        price = format_dollars(property.price),
        bedrooms = property.bedrooms,
        bathrooms = property.bathrooms,
        sqft = property.square_footage,
        year_built = property.year_built,
        lot_size = property.lot_size_acres,
        property_type = property.property_type,
        median_price = format_dollars(market.median_price),
        appreciation = market.price_appreciation_percent,
        days_on_market = market.average_days_on_market,
        strategy_block = strategy_block(strategy),
    )
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

    fn mock_market() -> MarketContext {
        MarketContext {
            median_price: 295_000.0,
            price_appreciation_percent: 4.2,
            average_days_on_market: 28,
            comparables: vec![],
        }
    }

    #[test]
    fn test_format_dollars() {
        assert_eq!(format_dollars(300_000.0), "300,000");
        assert_eq!(format_dollars(1_250_000.0), "1,250,000");
        assert_eq!(format_dollars(950.0), "950");
        assert_eq!(format_dollars(0.0), "0");
    }

    #[test]
    fn test_prompt_contains_property_and_market_blocks() {
        let prompt = build(&mock_property(), &mock_market(), Strategy::Rental);

        assert!(prompt.contains("Address: 123 Main St, Austin, TX 78701"));
        assert!(prompt.contains("Price: $300,000"));
        assert!(prompt.contains("Bedrooms: 3"));
        assert!(prompt.contains("Median Price: $295,000"));
        assert!(prompt.contains("Price Appreciation: 4.2%"));
        assert!(prompt.contains("Average Days on Market: 28"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let a = build(&mock_property(), &mock_market(), Strategy::Flip);
        let b = build(&mock_property(), &mock_market(), Strategy::Flip);
        assert_eq!(a, b);
    }

    #[test]
    fn test_strategy_specific_blocks() {
        let rental = build(&mock_property(), &mock_market(), Strategy::Rental);
        assert!(rental.contains("1% rule"));
        assert!(rental.contains("rental investment strategy"));

        let flip = build(&mock_property(), &mock_market(), Strategy::Flip);
        assert!(flip.contains("ARV (After Repair Value)"));

        let brrrr = build(&mock_property(), &mock_market(), Strategy::Brrrr);
        assert!(brrrr.contains("70-80% LTV"));

        let wholesale = build(&mock_property(), &mock_market(), Strategy::Wholesale);
        assert!(wholesale.contains("maximum allowable offer (MAO)"));
    }

    #[test]
    fn test_prompt_enumerates_all_ten_fields() {
        let prompt = build(&mock_property(), &mock_market(), Strategy::Rental);

        for field in [
            "dealScore",
            "summary",
            "strengths",
            "risks",
            "recommendations",
            "valuationAssessment",
            "financingLikelihood",
            "topRedFlag",
            "marketPosition",
            "exitStrategy",
        ] {
            assert!(prompt.contains(field), "prompt missing field {}", field);
        }

        // Value domains are spelled out for the parser's target shape
        assert!(prompt.contains("\"overvalued\" | \"market\" | \"undervalued\""));
        assert!(prompt.contains("\"fha-eligible\" | \"conventional-only\" | \"cash-required\""));
    }
}
