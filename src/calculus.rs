//! Finite differences and rectangular integration over sampled series.

use thiserror::Error;

/// Errors raised by the numeric transforms.
#[derive(Debug, PartialEq, Error)]
pub enum CalcError {
    /// Value and time sequences differ in length.
    #[error("value and time sequences must have the same length, but have {values} and {times}")]
    LengthMismatch { values: usize, times: usize },
    /// Two consecutive samples share the same timestamp.
    #[error("time step ending at sample {index} is zero")]
    ZeroTimeStep { index: usize },
}

fn check_len(values: &[f64], times: &[f64]) -> Result<(), CalcError> {
    if values.len() != times.len() {
        return Err(CalcError::LengthMismatch {
            values: values.len(),
            times: times.len(),
        });
    }
    Ok(())
}

/// Estimate speeds from positions using forward differences.
///
/// Element `i` of the result is the slope between samples `i` and `i + 1`,
/// so the result is one element shorter than the input (empty for inputs
/// with fewer than two samples).
///
/// # Errors
/// Returns [`CalcError::LengthMismatch`] if the slices differ in length and
/// [`CalcError::ZeroTimeStep`] if two consecutive timestamps are equal.
pub fn derivative(position: &[f64], time: &[f64]) -> Result<Vec<f64>, CalcError> {
    check_len(position, time)?;

    let mut speeds = Vec::with_capacity(position.len().saturating_sub(1));
    for (i_smp, (pos_w, time_w)) in position.windows(2).zip(time.windows(2)).enumerate() {
        let delta_t = time_w[1] - time_w[0];
        if delta_t == 0.0 {
            return Err(CalcError::ZeroTimeStep { index: i_smp + 1 });
        }
        speeds.push((pos_w[1] - pos_w[0]) / delta_t);
    }
    Ok(speeds)
}

/// Accumulate speeds from accelerations using rectangular integration.
///
/// The interval ending at sample `i` is weighted by the acceleration of
/// sample `i`. The accumulator starts at zero and the result holds its value
/// after each interval.
///
/// # Errors
/// Returns [`CalcError::LengthMismatch`] if the slices differ in length.
pub fn integral(acceleration: &[f64], time: &[f64]) -> Result<Vec<f64>, CalcError> {
    check_len(acceleration, time)?;

    let mut acc_speed = 0.0;
    let speeds = acceleration
        .iter()
        .skip(1)
        .zip(time.windows(2))
        .map(|(&accel, time_w)| {
            acc_speed += accel * (time_w[1] - time_w[0]);
            acc_speed
        })
        .collect();
    Ok(speeds)
}
