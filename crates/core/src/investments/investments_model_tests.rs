use super::*;

#[test]
fn test_investment_type_db_round_trip_is_case_insensitive() {
    assert_eq!(InvestmentType::from_db_str("Stock"), Some(InvestmentType::Stock));
    assert_eq!(
        InvestmentType::from_db_str("realestate"),
        Some(InvestmentType::RealEstate)
    );
    assert_eq!(InvestmentType::from_db_str(" FUND "), Some(InvestmentType::Fund));
    assert_eq!(InvestmentType::from_db_str("Bond"), None);
}

#[test]
fn test_security_id_ignores_blank_isin() {
    assert_eq!(Investment::stock("S1", Some("US123")).security_id(), Some("US123"));
    assert_eq!(Investment::stock("S1", Some("   ")).security_id(), None);
    assert_eq!(Investment::stock("S1", None).security_id(), None);
    assert_eq!(Investment::fund("F1", Some("FondsA")).security_id(), None);
}

#[test]
fn test_fund_reference_only_for_fund_positions() {
    assert_eq!(
        Investment::fund("FP1", Some("FondsA")).fund_reference(),
        Some("FondsA")
    );
    assert_eq!(Investment::fund("FP1", Some("")).fund_reference(), None);
    assert_eq!(
        Investment::real_estate("R1", Some("Berlin")).fund_reference(),
        None
    );
}

#[test]
fn test_unknown_class_has_no_investment_type() {
    let investment = Investment {
        id: "X1".to_string(),
        class: InvestmentClass::Unknown {
            kind: "Bond".to_string(),
        },
    };
    assert_eq!(investment.investment_type(), None);
    assert_eq!(
        Investment::real_estate("R1", None).investment_type(),
        Some(InvestmentType::RealEstate)
    );
}

#[test]
fn test_investment_serializes_with_flattened_type_tag() {
    let json = serde_json::to_value(Investment::fund("FP1", Some("FondsA"))).unwrap();
    assert_eq!(json["id"], "FP1");
    assert_eq!(json["type"], "Fund");
    assert_eq!(json["fundId"], "FondsA");
}
