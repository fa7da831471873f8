//! Stratified k-fold cross-validation for the binary classifier.

use chemscreen_common::{BoosterParams, ChemscreenError, Result};
use rayon::prelude::*;

use crate::booster::Loss;
use crate::pipeline::ScaledPipeline;

/// Held-out indices for each of `k` folds. Members of each class are dealt
/// round-robin in corpus order, so every fold sees the class ratio of the
/// whole corpus to within one sample.
pub fn stratified_folds(labels: &[f64], k: usize) -> Result<Vec<Vec<usize>>> {
    if k < 2 {
        return Err(ChemscreenError::Model(format!("cross-validation needs at least 2 folds, got {k}")));
    }
    let mut folds = vec![Vec::new(); k];
    for class in [0.0, 1.0] {
        let members = labels.iter().enumerate().filter(|&(_, &l)| l == class).map(|(i, _)| i);
        for (slot, i) in members.enumerate() {
            folds[slot % k].push(i);
        }
    }
    for fold in &mut folds {
        fold.sort_unstable();
    }
    Ok(folds)
}

/// Mean held-out accuracy over `k` stratified folds. Each fold refits the
/// whole pipeline (scaler included) on the remaining rows. Folds run in
/// parallel.
pub fn cross_val_accuracy(
    x: &[Vec<f64>],
    y: &[f64],
    k: usize,
    params: &BoosterParams,
) -> Result<f64> {
    let folds = stratified_folds(y, k)?;

    let accuracies = folds
        .par_iter()
        .map(|held_out| {
            let mut is_test = vec![false; y.len()];
            for &i in held_out {
                is_test[i] = true;
            }
            let (train_x, train_y): (Vec<Vec<f64>>, Vec<f64>) = x
                .iter()
                .zip(y)
                .zip(&is_test)
                .filter(|&(_, &t)| !t)
                .map(|((row, &label), _)| (row.clone(), label))
                .unzip();

            let model = ScaledPipeline::fit(&train_x, &train_y, Loss::BinomialDeviance, params)?;
            let mut correct = 0usize;
            for &i in held_out {
                let p = model.predict(&x[i])?[0];
                if (p >= 0.5) == (y[i] == 1.0) {
                    correct += 1;
                }
            }
            Ok(correct as f64 / held_out.len().max(1) as f64)
        })
        .collect::<Result<Vec<f64>>>()?;

    Ok(accuracies.iter().sum::<f64>() / accuracies.len() as f64)
}
