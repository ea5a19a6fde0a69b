use crate::Error;

/// Parameters controlling the accuracy/cost trade-off of the Ewald
/// summation.
///
/// The defaults (`accuracy = 6`, `balance = 2`) give around 1e-12 relative
/// accuracy on the energy at a reasonable cost for cells up to a few
/// hundred sites.
#[derive(Debug, Clone, Copy, PartialEq)]
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct EwaldParameters {
    /// Dimensionless accuracy control: both truncation radii scale linearly
    /// with this value, and the truncation error decreases as
    /// `exp(-accuracy²)`. Larger values mean a more accurate and more
    /// expensive summation.
    pub accuracy: f64,
    /// Dimensionless balance between real-space and Fourier-space work:
    /// larger values shrink the Gaussian screening width, moving work from
    /// the Fourier-space sum to the real-space sum. This changes the cost
    /// of the two sums, not the value of the energy.
    pub balance: f64,
}

impl Default for EwaldParameters {
    fn default() -> EwaldParameters {
        EwaldParameters {
            accuracy: 6.0,
            balance: 2.0,
        }
    }
}

impl EwaldParameters {
    /// Read parameters from a JSON string; missing fields take their
    /// default value.
    pub fn from_json(parameters: &str) -> Result<EwaldParameters, Error> {
        let parameters = serde_json::from_str::<EwaldParameters>(parameters)?;
        parameters.validate()?;
        return Ok(parameters);
    }

    /// Validate the parameter values, returning an error for non-positive
    /// or non-finite values
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.accuracy > 0.0 && self.accuracy.is_finite()) {
            return Err(Error::InvalidParameter(format!(
                "expected a positive accuracy parameter, got {}", self.accuracy
            )));
        }

        if !(self.balance > 0.0 && self.balance.is_finite()) {
            return Err(Error::InvalidParameter(format!(
                "expected a positive balance parameter, got {}", self.balance
            )));
        }

        return Ok(());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let parameters = EwaldParameters::default();
        assert_eq!(parameters.accuracy, 6.0);
        assert_eq!(parameters.balance, 2.0);
        parameters.validate().unwrap();
    }

    #[test]
    fn from_json() {
        let parameters = EwaldParameters::from_json("{}").unwrap();
        assert_eq!(parameters, EwaldParameters::default());

        let parameters = EwaldParameters::from_json(r#"{"accuracy": 8.0}"#).unwrap();
        assert_eq!(parameters.accuracy, 8.0);
        assert_eq!(parameters.balance, 2.0);

        assert!(EwaldParameters::from_json("{invalid}").is_err());
    }

    #[test]
    fn validation() {
        let parameters = EwaldParameters { accuracy: 0.0, balance: 2.0 };
        assert!(parameters.validate().is_err());

        let parameters = EwaldParameters { accuracy: 6.0, balance: -1.0 };
        assert!(parameters.validate().is_err());

        let parameters = EwaldParameters { accuracy: f64::NAN, balance: 2.0 };
        assert!(parameters.validate().is_err());

        assert!(EwaldParameters::from_json(r#"{"balance": 0.0}"#).is_err());
    }
}
