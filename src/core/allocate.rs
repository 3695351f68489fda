//! Band allocation - spreads taxable income across the bands of a tax year

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::core::error::TaxError;
use crate::core::rates::{BandKind, YearTaxRates};
use crate::core::uk::TaxYear;

/// Portion of taxable income that fell in one band
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BandAllocation {
    pub band: BandKind,
    pub rate: Decimal,
    pub allocated: Decimal,
    pub tax: Decimal,
}

/// Tax breakdown for a gross salary in a tax year
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllocationResult {
    pub tax_year: TaxYear,
    pub gross_salary: Decimal,
    pub personal_allowance: Decimal,
    /// Gross salary less the personal allowance, never negative
    pub taxable_income: Decimal,
    /// One entry per band present in the year, in canonical order
    pub bands: Vec<BandAllocation>,
}

impl AllocationResult {
    pub fn total_tax(&self) -> Decimal {
        self.bands.iter().map(|b| b.tax).sum()
    }

    pub fn total_allocated(&self) -> Decimal {
        self.bands.iter().map(|b| b.allocated).sum()
    }

    pub fn band(&self, kind: BandKind) -> Option<&BandAllocation> {
        self.bands.iter().find(|b| b.band == kind)
    }
}

/// Allocate the taxable part of `gross_salary` to the bands of `rates`.
///
/// Taxable income is clamped at zero when the allowance exceeds the salary.
/// Each bounded band takes at most `range_end - range_start`, the unbounded
/// band takes whatever remains, and bands reached after the income runs out
/// get a zero allocation. Amounts are exact decimals, so no band absorbs
/// rounding differences.
pub fn allocate(
    tax_year: TaxYear,
    rates: &YearTaxRates,
    gross_salary: u64,
) -> Result<AllocationResult, TaxError> {
    let personal_allowance = rates
        .personal_allowance
        .ok_or(TaxError::MissingData { year: tax_year })?;
    rates.check_rates(tax_year)?;

    let gross_salary = Decimal::from(gross_salary);
    let personal_allowance = Decimal::from(personal_allowance);
    let taxable_income = (gross_salary - personal_allowance).max(Decimal::ZERO);

    log::debug!(
        "Allocating taxable income {} for {} (gross {}, allowance {})",
        taxable_income,
        tax_year,
        gross_salary,
        personal_allowance
    );

    let mut remaining = taxable_income;
    let mut bands = Vec::new();
    for (kind, band) in rates.bands() {
        let allocated = match band.width().map(Decimal::from) {
            Some(width) if remaining > width => width,
            _ => remaining,
        };
        remaining -= allocated;

        let tax = band
            .rate
            .checked_mul(allocated)
            .ok_or(TaxError::Overflow {
                year: tax_year,
                band: kind,
            })?
            / dec!(100);
        log::debug!(
            "{}: {} @ {}% = {} ({} remaining)",
            kind,
            allocated,
            band.rate,
            tax,
            remaining
        );

        bands.push(BandAllocation {
            band: kind,
            rate: band.rate,
            allocated,
            tax,
        });
    }

    if remaining > Decimal::ZERO {
        log::warn!(
            "{} of taxable income exceeds the bands defined for {}",
            remaining,
            tax_year
        );
    }

    Ok(AllocationResult {
        tax_year,
        gross_salary,
        personal_allowance,
        taxable_income,
        bands,
    })
}

/// Allocation for a single band
pub fn allocate_band(
    tax_year: TaxYear,
    rates: &YearTaxRates,
    gross_salary: u64,
    kind: BandKind,
) -> Result<BandAllocation, TaxError> {
    if rates.band(kind).is_none() {
        return Err(TaxError::UnsupportedBand {
            year: tax_year,
            band: kind,
        });
    }
    let result = allocate(tax_year, rates, gross_salary)?;
    result
        .band(kind)
        .cloned()
        .ok_or(TaxError::UnsupportedBand {
            year: tax_year,
            band: kind,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rates::Band;
    use crate::store::defaults::default_rate_table;
    use proptest::prelude::*;

    fn rates(year: i32) -> YearTaxRates {
        default_rate_table().year(TaxYear(year)).unwrap().clone()
    }

    #[test]
    fn basic_rate_only_2016() {
        let result = allocate(TaxYear(2016), &rates(2016), 30000).unwrap();

        assert_eq!(result.personal_allowance, dec!(11000));
        assert_eq!(result.taxable_income, dec!(19000));
        assert_eq!(result.bands.len(), 2);

        let basic = result.band(BandKind::Basic).unwrap();
        assert_eq!(basic.allocated, dec!(19000));
        assert_eq!(basic.tax, dec!(3800));

        let higher = result.band(BandKind::Higher).unwrap();
        assert_eq!(higher.allocated, dec!(0));
        assert_eq!(higher.tax, dec!(0));

        assert_eq!(result.total_tax(), dec!(3800.00));
    }

    #[test]
    fn five_bands_2018() {
        let result = allocate(TaxYear(2018), &rates(2018), 30000).unwrap();

        assert_eq!(result.taxable_income, dec!(18150));

        let expected = [
            (BandKind::Starter, dec!(2000), dec!(380.00)),
            (BandKind::Basic, dec!(10149), dec!(2029.80)),
            (BandKind::Intermediate, dec!(6001), dec!(1260.21)),
            (BandKind::Higher, dec!(0), dec!(0)),
            (BandKind::Top, dec!(0), dec!(0)),
        ];
        for (kind, allocated, tax) in expected {
            let band = result.band(kind).unwrap();
            assert_eq!(band.allocated, allocated, "{kind} allocated");
            assert_eq!(band.tax, tax, "{kind} tax");
        }
        assert_eq!(result.total_tax(), dec!(3670.01));
    }

    #[test]
    fn unbounded_top_band_takes_remainder() {
        let result = allocate(TaxYear(2018), &rates(2018), 200_000).unwrap();
        let top = result.band(BandKind::Top).unwrap();
        // 188150 taxable, bounded bands hold 2000 + 10149 + 19429 + 118419
        assert_eq!(top.allocated, dec!(38153));
        assert_eq!(result.total_allocated(), result.taxable_income);
    }

    #[test]
    fn income_beyond_last_bounded_band_is_not_allocated() {
        let result = allocate(TaxYear(2016), &rates(2016), 200_000).unwrap();
        let higher = result.band(BandKind::Higher).unwrap();
        assert_eq!(higher.allocated, dec!(117999));
        assert!(result.total_allocated() < result.taxable_income);
    }

    #[test]
    fn salary_below_allowance_is_not_taxed() {
        let result = allocate(TaxYear(2016), &rates(2016), 5000).unwrap();
        assert_eq!(result.taxable_income, Decimal::ZERO);
        assert!(result.bands.iter().all(|b| b.allocated.is_zero()));
        assert_eq!(result.total_tax(), Decimal::ZERO);
    }

    #[test]
    fn missing_personal_allowance() {
        let rates = YearTaxRates {
            basic_rate: Some(Band::bounded(dec!(20), 0, 32000)),
            ..Default::default()
        };
        let err = allocate(TaxYear(2016), &rates, 30000).unwrap_err();
        assert!(matches!(err, TaxError::MissingData { year } if year == TaxYear(2016)));
    }

    #[test]
    fn negative_rate_is_rejected() {
        let rates = YearTaxRates {
            personal_allowance: Some(0),
            basic_rate: Some(Band::unbounded(dec!(-20), 0)),
            ..Default::default()
        };
        let err = allocate(TaxYear(2016), &rates, 50).unwrap_err();
        assert!(matches!(
            err,
            TaxError::InvalidRate { band: BandKind::Basic, .. }
        ));
    }

    #[test]
    fn huge_rate_is_an_error_not_a_panic() {
        let rates = YearTaxRates {
            personal_allowance: Some(0),
            top_rate: Some(Band::unbounded(
                "100000000000000000000".parse::<Decimal>().unwrap(),
                0,
            )),
            ..Default::default()
        };
        let err = allocate(TaxYear(2016), &rates, u64::MAX / 2).unwrap_err();
        assert!(matches!(err, TaxError::InvalidRate { band: BandKind::Top, .. }));
    }

    #[test]
    fn largest_salary_at_full_rate() {
        let rates = YearTaxRates {
            personal_allowance: Some(0),
            top_rate: Some(Band::unbounded(dec!(100), 0)),
            ..Default::default()
        };
        let result = allocate(TaxYear(2016), &rates, u64::MAX).unwrap();
        assert_eq!(result.total_tax(), Decimal::from(u64::MAX));
    }

    #[test]
    fn single_band_lookup() {
        let basic = allocate_band(TaxYear(2018), &rates(2018), 30000, BandKind::Basic).unwrap();
        assert_eq!(basic.allocated, dec!(10149));
        assert_eq!(basic.tax, dec!(2029.80));
    }

    #[test]
    fn single_band_absent_for_year() {
        let err =
            allocate_band(TaxYear(2016), &rates(2016), 30000, BandKind::Starter).unwrap_err();
        assert!(matches!(
            err,
            TaxError::UnsupportedBand { band: BandKind::Starter, .. }
        ));
    }

    #[test]
    fn allocation_is_deterministic() {
        let first = allocate(TaxYear(2018), &rates(2018), 54321).unwrap();
        let second = allocate(TaxYear(2018), &rates(2018), 54321).unwrap();
        assert_eq!(first, second);
    }

    proptest! {
        #[test]
        fn allocations_cover_taxable_income(year in 2015i32..=2018, salary in 1u64..1_000_000) {
            let rates = rates(year);
            let result = allocate(TaxYear(year), &rates, salary).unwrap();
            let allowance = rates.personal_allowance.unwrap();
            let expected = Decimal::from(salary.saturating_sub(allowance));

            prop_assert_eq!(result.taxable_income, expected);
            if rates.top_rate.is_some() {
                prop_assert_eq!(result.total_allocated(), expected);
            } else {
                prop_assert!(result.total_allocated() <= expected);
            }
        }

        #[test]
        fn allocations_fit_their_bands(year in 2015i32..=2018, salary in 1u64..1_000_000) {
            let rates = rates(year);
            let result = allocate(TaxYear(year), &rates, salary).unwrap();
            for allocation in &result.bands {
                prop_assert!(allocation.allocated >= Decimal::ZERO);
                let band = rates.band(allocation.band).unwrap();
                if let Some(width) = band.width() {
                    prop_assert!(allocation.allocated <= Decimal::from(width));
                }
            }
        }

        #[test]
        fn total_is_sum_of_band_tax(year in 2015i32..=2018, salary in 1u64..1_000_000) {
            let result = allocate(TaxYear(year), &rates(year), salary).unwrap();
            let expected: Decimal = result
                .bands
                .iter()
                .map(|b| b.rate / dec!(100) * b.allocated)
                .sum();
            prop_assert_eq!(result.total_tax(), expected);
        }
    }
}
