use itertools::Itertools;
use root_calculator::{
    calculate, evaluate, hybrid::Hybrid, solve, ConfigError, ConvergenceWarning, Error,
    FunctionSpec, SolverConfig,
};

#[test]
fn shape_mismatch() {
    let res = calculate(2, &[1.0, 2.0], 0.0, 1.5, 100, 1E-7);
    assert_eq!(
        res,
        Err(Error::ShapeMismatch {
            degree: 2,
            expected: 3,
            got: 2
        })
    );
}

#[test]
fn invalid_config() {
    assert_eq!(
        calculate(1, &[1.0, 2.0], 0.0, 1.5, 100, -1E-7),
        Err(Error::InvalidConfig(ConfigError::InvalidTolerance {
            got: -1E-7
        }))
    );
    assert!(matches!(
        calculate(1, &[1.0, 2.0], 0.0, f64::NAN, 100, 1E-7),
        Err(Error::InvalidConfig(ConfigError::NonFiniteInitialGuess { .. }))
    ));
}

/// (x - 1)^2, a double root, so convergence is only linear
#[test]
fn double_root() {
    let _ = simple_logger::init_with_level(log::Level::Debug);
    let res = calculate::<f64>(2, &[1.0, -2.0, 1.0], 0.0, 1.5, 100, 1E-7).unwrap();
    assert!(res.is_converged(), "{:?}", res.warning);
    assert!((res.root - 1.0).abs() < 1E-7, "{}", res.root);
    assert_eq!(res.error_trace.len(), res.iterations_used);
    assert!(res.iterations_used > 1);
    // the derivative probe repeats the initial error, every trial point
    // gets strictly closer
    for (e1, e2) in res.error_trace.iter().dedup().tuple_windows() {
        assert!(e2 < e1, "{:?}", res.error_trace);
    }
    assert_eq!(res.error_trace.get(1), res.error_trace.get(2));
    assert_eq!(res.final_error(), Some(0.0));
}

#[test]
fn cubic_plus_cosine() {
    let _ = simple_logger::init_with_level(log::Level::Debug);
    let coefficients: [f64; 4] = [3.0, -7.0, -1.0, 8.0];
    let res = calculate(3, &coefficients, 8.0, -1.0, 100, 1E-7).unwrap();
    assert!(res.is_converged(), "{:?}", res.warning);

    let spec = FunctionSpec::new(3, coefficients.to_vec(), 8.0).unwrap();
    assert!(evaluate(res.root, &spec).abs() < 1E-7);
    assert!((res.root - -1.173_627_877).abs() < 1E-8, "{}", res.root);
    assert_eq!(res.error_trace.len(), res.iterations_used);
    assert!(res.error_trace.last() <= res.error_trace.first());
}

#[test]
fn single_iteration_budget() {
    let res = calculate::<f64>(3, &[3.0, -7.0, -1.0, 8.0], 8.0, -1.0, 1, 1E-12).unwrap();
    assert_eq!(
        res.warning,
        Some(ConvergenceWarning::MaxIterations { iterations: 1 })
    );
    assert!(!res.is_converged());
    assert_eq!(res.iterations_used, 1);
    assert_eq!(res.error_trace.len(), 1);
    // a single evaluation only looks at the initial guess
    assert_eq!(res.root, -1.0);
    assert_eq!(res.trials, 0);
    assert_eq!(res.final_error(), Some(0.0));
    assert!(res.f_root.abs() > 1E-12);
}

/// `max_iterations` caps every function evaluation, setup included
#[test]
fn evaluation_budget_is_respected() {
    let spec = FunctionSpec::new(3, vec![3.0, -7.0, -1.0, 8.0], 8.0).unwrap();
    for max_iterations in 1..6 {
        let mut calls = 0;
        let config = SolverConfig::new(-1.0, max_iterations, 1E-12).unwrap();
        let mut solver = Hybrid::new(
            |x: f64| {
                calls += 1;
                evaluate(x, &spec)
            },
            &config,
        );
        solver.run(config.max_iterations(), |_| {});
        drop(solver);
        assert_eq!(calls, max_iterations);

        let res = solve(&spec, &config);
        assert_eq!(
            res.warning,
            Some(ConvergenceWarning::MaxIterations {
                iterations: max_iterations
            })
        );
        assert_eq!(res.iterations_used, max_iterations);
        assert_eq!(res.error_trace.len(), max_iterations);
    }
}

/// Growing the budget never changes the iterates that were already taken
#[test]
fn budget_does_not_change_trajectory() {
    let spec = FunctionSpec::<f64>::new(3, vec![3.0, -7.0, -1.0, 8.0], 8.0).unwrap();
    let full = solve(&spec, &SolverConfig::new(-1.0, 100, 1E-7).unwrap());
    let roots = (1..full.iterations_used)
        .map(|n| solve(&spec, &SolverConfig::new(-1.0, n, 1E-7).unwrap()))
        .inspect(|res| assert!(!res.is_converged()))
        .map(|res| res.root)
        .collect_vec();
    // error of the truncated run's root, relative to the converged root,
    // is exactly the trace entry of the full run
    for (n, root) in roots.into_iter().enumerate() {
        assert_eq!(full.error_trace.get(n + 1), Some((root - full.root).abs()));
    }
}

#[test]
fn f32() {
    let res = calculate(2, &[-2.0f32, 0.0, 1.0], 0.0, 1.0, 100, 1E-6).unwrap();
    assert!(res.is_converged());
    assert!((res.root - std::f32::consts::SQRT_2).abs() < 1E-5);
}
