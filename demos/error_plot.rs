//! This example plots the error of every iterate against the iteration
//! number, for a function with a simple root and one with a double root.

use plotly::{
    common::{Marker, MarkerSymbol, Mode},
    Plot, Scatter,
};
use root_calculator::{calculate, RootResult64};

fn main() {
    let _ = simple_logger::init_with_level(log::Level::Debug);

    // 8*cos(x) + 3 - 7x - x^2 + 8x^3
    let simple = calculate(3, &[3.0, -7.0, -1.0, 8.0], 8.0, -1.0, 100, 1E-7)
        .expect("arguments are well formed");
    report("8cos(x) + 3 - 7x - x^2 + 8x^3", &simple);

    // (x - 1)^2
    let double = calculate(2, &[1.0, -2.0, 1.0], 0.0, 1.5, 100, 1E-7)
        .expect("arguments are well formed");
    report("(x - 1)^2", &double);

    let location = std::env::temp_dir().join("error_plot.html");
    let mut plot = Plot::new();
    plot.add_trace(trace(&simple, MarkerSymbol::CircleOpen, "simple root"));
    plot.add_trace(trace(&double, MarkerSymbol::SquareOpen, "double root"));
    plot.write_html(&location);
    println!("wrote {}", location.display());
}

fn report(name: &str, res: &RootResult64) {
    println!(
        "{name}: root = {}, final error = {:?}, iterations = {}, warning = {:?}",
        res.root,
        res.final_error(),
        res.iterations_used,
        res.warning
    );
}

/// Plots `log10` of the error. The last error is always zero, so it is left
/// out.
fn trace(res: &RootResult64, symbol: MarkerSymbol, name: &str) -> Box<Scatter<usize, f64>> {
    let (iterations, errors): (Vec<_>, Vec<_>) = res
        .error_trace
        .iter()
        .enumerate()
        .map(|(i, e)| (i + 1, e))
        .filter(|(_, e)| *e > 0.0)
        .map(|(i, e)| (i, e.log10()))
        .unzip();
    Scatter::new(iterations, errors)
        .mode(Mode::LinesMarkers)
        .marker(Marker::new().symbol(symbol).size(10))
        .name(name)
}
