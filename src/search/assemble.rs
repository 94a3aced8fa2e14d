use rust_decimal::prelude::ToPrimitive;

use super::types::{DetailsRecord, FinancialRecord, ResultRecord};
use crate::models::{Company, CompanyDetails, FinancialData};

/// Map a matched company to its result record
pub fn assemble(company: &Company) -> ResultRecord {
    ResultRecord {
        company_name: company.name.clone(),
        industry: company.industry.clone(),
        country: company.country.clone(),
        details: company.details.as_ref().map(assemble_details),
        financials: company.financials.iter().map(assemble_financial).collect(),
    }
}

fn assemble_details(details: &CompanyDetails) -> DetailsRecord {
    DetailsRecord {
        company_type: non_empty(&details.company_type),
        size: non_empty(&details.size),
        ceo_name: non_empty(&details.ceo_name),
        headquarters: non_empty(&details.headquarters),
    }
}

fn assemble_financial(financial: &FinancialData) -> FinancialRecord {
    FinancialRecord {
        year: financial.year as f64,
        revenue: financial.revenue.to_f64().unwrap_or_default(),
        net_income: financial.net_income.to_f64().unwrap_or_default(),
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn test_company() -> Company {
        Company {
            id: 1,
            name: "Test Company".to_string(),
            country: "USA".to_string(),
            industry: "Technology".to_string(),
            founded_year: 2010,
            details: Some(CompanyDetails {
                company_type: "Public".to_string(),
                size: "Large".to_string(),
                ceo_name: "John Doe".to_string(),
                headquarters: "New York".to_string(),
            }),
            financials: vec![
                FinancialData {
                    id: 1,
                    year: 2022,
                    revenue: Decimal::new(100000000, 2),
                    net_income: Decimal::new(50000000, 2),
                },
                FinancialData {
                    id: 2,
                    year: 2021,
                    revenue: Decimal::new(80000000, 2),
                    net_income: Decimal::new(40000000, 2),
                },
            ],
        }
    }

    #[test]
    fn test_assemble_full_company() {
        let record = assemble(&test_company());

        assert_eq!(record.company_name, "Test Company");
        assert_eq!(record.industry, "Technology");
        assert_eq!(record.country, "USA");

        let details = record.details.unwrap();
        assert_eq!(details.company_type.as_deref(), Some("Public"));
        assert_eq!(details.size.as_deref(), Some("Large"));
        assert_eq!(details.ceo_name.as_deref(), Some("John Doe"));
        assert_eq!(details.headquarters.as_deref(), Some("New York"));

        assert_eq!(record.financials.len(), 2);
        assert_eq!(record.financials[0].year, 2022.0);
        assert_eq!(record.financials[0].revenue, 1000000.0);
        assert_eq!(record.financials[0].net_income, 500000.0);
        assert_eq!(record.financials[1].year, 2021.0);
    }

    #[test]
    fn test_assemble_without_details() {
        let mut company = test_company();
        company.details = None;
        assert!(assemble(&company).details.is_none());
    }

    #[test]
    fn test_assemble_without_financials() {
        let mut company = test_company();
        company.financials.clear();
        assert!(assemble(&company).financials.is_empty());
    }

    #[test]
    fn test_empty_detail_values_become_null() {
        let mut company = test_company();
        company.details = Some(CompanyDetails {
            company_type: String::new(),
            size: "Small".to_string(),
            ceo_name: String::new(),
            headquarters: String::new(),
        });
        let details = assemble(&company).details.unwrap();
        assert_eq!(details.company_type, None);
        assert_eq!(details.size.as_deref(), Some("Small"));
        assert_eq!(details.ceo_name, None);
        assert_eq!(details.headquarters, None);
    }

    #[test]
    fn test_stored_choice_text_passes_through() {
        let mut company = test_company();
        if let Some(details) = company.details.as_mut() {
            details.company_type = "public".to_string();
            details.size = "Enterprise".to_string();
        }
        let details = assemble(&company).details.unwrap();
        assert_eq!(details.company_type.as_deref(), Some("public"));
        assert_eq!(details.size.as_deref(), Some("Enterprise"));
    }

    #[test]
    fn test_fractional_amounts() {
        let mut company = test_company();
        company.financials.truncate(1);
        company.financials[0].net_income = Decimal::new(-123456, 2);
        let record = assemble(&company);
        assert_eq!(record.financials[0].net_income, -1234.56);
    }
}
