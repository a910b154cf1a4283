// Example of a regression on a small CSV file.

extern crate lingrad;
extern crate serde_json;

use lingrad::{
    feature_labels, parse_csv, rmse, write_equation, GDParams, LinearModel, TrainDataset,
    VariableNames,
};
use std::io;
use std::time::Instant;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load the data, the last column is the target
    let table = parse_csv(include_str!("../data/sample.csv"), b',')?;
    let train = TrainDataset::split(&table.matrix, table.matrix.n_cols() - 1)?;

    // The gradients are summed over the rows, so the learning rate depends on the size of the data
    let params = GDParams {
        learning_rate: 1e-3,
        max_step: 1e-8,
        ..GDParams::new()
    };
    println!("Params {:?}", params);

    let train_start_time = Instant::now();
    let fit = LinearModel::build(&train, &params)?;
    println!(
        "Training finished after {} iterations (converged: {}). Elapsed: {:.2} secs",
        fit.n_iterations,
        fit.converged,
        train_start_time.elapsed().as_secs_f64()
    );

    let yhat = fit.model.predict_all(&train.features);
    println!("RMSE train {:.8}", rmse(&train.target, &yhat));

    let names = feature_labels(&fit, &table.labels);
    write_equation(&mut io::stdout(), &fit.model, VariableNames::Labels(&names))?;

    println!("{}", serde_json::to_string(&fit.model)?);
    Ok(())
}
