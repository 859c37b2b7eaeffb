//! Integration tests for module exports.
//!
//! Verify that all public modules and types are exported and accessible via
//! absolute paths.

/// Test that option types are accessible via absolute path.
#[test]
fn test_option_module_exports() {
    use optoprice_core::types::option::OptionParameters;
    use optoprice_core::types::option::OptionParametersBuilder;
    use optoprice_core::types::option::OptionSide;
    use optoprice_core::types::option::PricingInput;

    let builder: OptionParametersBuilder = OptionParameters::builder();
    let params = builder
        .spot(100.0)
        .strike(100.0)
        .expiry(1.0)
        .observed_value(8.0)
        .side(OptionSide::Put)
        .build()
        .unwrap();
    assert_eq!(params.input(), PricingInput::ObservedValue(8.0));
}

/// Test that time helpers are accessible via absolute path.
#[test]
fn test_time_module_exports() {
    use optoprice_core::types::time::percent_to_decimal;
    use optoprice_core::types::time::YearBasis;
    use optoprice_core::types::time::CALENDAR_DAYS_PER_YEAR;

    assert_eq!(YearBasis::default().days_in_year(), CALENDAR_DAYS_PER_YEAR);
    assert_eq!(percent_to_decimal(80.0), 0.8);
}

/// Test that error types are accessible via absolute path.
#[test]
fn test_error_module_exports() {
    use optoprice_core::types::error::PricingError;
    use optoprice_core::types::error::SolverError;

    let _ = PricingError::MissingVolatility;
    let _ = SolverError::InvalidConfig {
        message: String::new(),
    };
}

/// Test that module-level re-exports match the full paths.
#[test]
fn test_types_reexports() {
    use optoprice_core::types::{
        percent_to_decimal, OptionParameters, OptionSide, PricingError, YearBasis,
    };

    let basis = YearBasis::new(360.0).unwrap();
    let params = OptionParameters::builder()
        .spot(100.0)
        .strike(90.0)
        .rate(percent_to_decimal(1.0))
        .expiry(basis.year_fraction(9.0))
        .volatility(percent_to_decimal(80.0))
        .build()
        .unwrap();
    assert_eq!(params.side(), OptionSide::Call);
    assert_eq!(params.expiry(), 9.0 / 360.0);

    let err: Result<OptionSide, PricingError> = "both".parse();
    assert!(err.is_err());
}

/// Test that solvers are accessible via absolute path.
#[test]
fn test_solvers_module_exports() {
    use optoprice_core::math::solvers::RatioFixedPointSolver;
    use optoprice_core::math::solvers::SolverConfig;
    use optoprice_core::math::solvers::SolverOutcome;
    use optoprice_core::math::solvers::Termination;

    let solver = RatioFixedPointSolver::new(SolverConfig::fast(), 0.1).unwrap();
    let outcome: SolverOutcome<f64> = solver
        .solve(1.0, 1.0, |x: f64| Ok::<_, ()>(x))
        .unwrap();
    assert_eq!(outcome.termination, Termination::Converged);
}
