use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaritalStatus {
    Single,
    Married,
    RegisteredPartnership,
    Cohabiting,
}

impl MaritalStatus {
    /// The label shown in the form dropdown.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "Ledig",
            Self::Married => "Verheiratet",
            Self::RegisteredPartnership => "eingetragene Partnerschaft",
            Self::Cohabiting => "Konkubinat",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Ledig" => Some(Self::Single),
            "Verheiratet" => Some(Self::Married),
            "eingetragene Partnerschaft" => Some(Self::RegisteredPartnership),
            "Konkubinat" => Some(Self::Cohabiting),
            _ => None,
        }
    }

    /// Whether the federal tariff halves the tax base and doubles the result.
    ///
    /// Every status except `Single` uses the joint tariff, including
    /// `Cohabiting` — this matches the cantonal source data, which only
    /// special-cases unmarried individuals.
    pub fn uses_income_splitting(&self) -> bool {
        !matches!(self, Self::Single)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Religion {
    RomanCatholic,
    Reformed,
    ChristCatholic,
    OtherOrNone,
}

impl Religion {
    /// The label shown in the form dropdown.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RomanCatholic => "Römisch-katholisch",
            Self::Reformed => "Reformiert",
            Self::ChristCatholic => "Christkatholisch",
            Self::OtherOrNone => "Andere/Keine",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Römisch-katholisch" => Some(Self::RomanCatholic),
            "Reformiert" => Some(Self::Reformed),
            "Christkatholisch" => Some(Self::ChristCatholic),
            "Andere/Keine" => Some(Self::OtherOrNone),
            _ => None,
        }
    }

    /// Church tax rate applied to the communal tax.
    pub fn church_tax_rate(&self) -> Decimal {
        match self {
            Self::RomanCatholic => Decimal::new(12, 2),
            Self::Reformed => Decimal::new(10, 2),
            Self::ChristCatholic => Decimal::new(8, 2),
            Self::OtherOrNone => Decimal::ZERO,
        }
    }
}

/// The validated inputs a tax calculation needs for one person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxpayerProfile {
    /// Net yearly salary in CHF.
    pub net_income: Decimal,
    pub marital_status: MaritalStatus,
    pub children: u32,
    pub religion: Religion,
    /// One-way commute distance in km.
    pub commute_km: Decimal,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn marital_status_roundtrips_through_labels() {
        for status in [
            MaritalStatus::Single,
            MaritalStatus::Married,
            MaritalStatus::RegisteredPartnership,
            MaritalStatus::Cohabiting,
        ] {
            assert_eq!(MaritalStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn marital_status_parse_rejects_unknown_label() {
        assert_eq!(MaritalStatus::parse("Verwitwet"), None);
    }

    #[test]
    fn only_single_is_taxed_without_splitting() {
        assert!(!MaritalStatus::Single.uses_income_splitting());
        assert!(MaritalStatus::Married.uses_income_splitting());
        assert!(MaritalStatus::RegisteredPartnership.uses_income_splitting());
        assert!(MaritalStatus::Cohabiting.uses_income_splitting());
    }

    #[test]
    fn church_tax_rates_match_denominations() {
        assert_eq!(Religion::RomanCatholic.church_tax_rate(), dec!(0.12));
        assert_eq!(Religion::Reformed.church_tax_rate(), dec!(0.10));
        assert_eq!(Religion::ChristCatholic.church_tax_rate(), dec!(0.08));
        assert_eq!(Religion::OtherOrNone.church_tax_rate(), Decimal::ZERO);
    }

    #[test]
    fn religion_roundtrips_through_labels() {
        for religion in [
            Religion::RomanCatholic,
            Religion::Reformed,
            Religion::ChristCatholic,
            Religion::OtherOrNone,
        ] {
            assert_eq!(Religion::parse(religion.as_str()), Some(religion));
        }
    }
}
