use std::env::VarError;

use log::debug;

use crate::utils::{self, Integer};
use crate::InputError;

/// Environment variable read by the `env` source
pub const DEFAULT_ENV_VAR: &str = "n";

/// Reads `n` from the named variable. `lookup` is normally `std::env::var`.
pub fn read_n<F>(var: &str, lookup: F) -> Result<Integer, InputError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    match lookup(var) {
        Ok(value) => {
            debug!("environment variable '{}' = {:?}", var, value);
            utils::parse_int(&value)
        }
        Err(VarError::NotPresent) => Err(InputError::Missing(format!(
            "environment variable '{}'",
            var
        ))),
        Err(VarError::NotUnicode(_)) => Err(InputError::Missing(format!(
            "environment variable '{}' (not valid unicode)",
            var
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::collections::HashMap;
    use std::ffi::OsString;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Result<String, VarError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned().ok_or(VarError::NotPresent)
    }

    #[test]
    fn reads_named_variable() {
        assert_eq!(read_n("n", env_of(&[("n", "12")])), Ok(Integer::from(12)));
        assert_eq!(
            read_n("N_VALUE", env_of(&[("N_VALUE", " -9 ")])),
            Ok(Integer::from(-9))
        );
    }

    #[test]
    fn forty_digit_value() {
        let forty_twos = "2".repeat(40);
        let n = read_n("n", env_of(&[("n", forty_twos.as_str())])).unwrap();
        assert_eq!(n.as_str(), forty_twos);
        assert!(n.is_even());
    }

    #[test]
    fn unset_variable_is_missing() {
        assert_matches!(read_n("n", env_of(&[("m", "2")])), Err(InputError::Missing(_)));
        assert_matches!(
            read_n("n", |_: &str| Err(VarError::NotUnicode(OsString::from("x")))),
            Err(InputError::Missing(_))
        );
    }

    #[test]
    fn non_numeric_value_is_rejected() {
        assert_matches!(
            read_n("n", env_of(&[("n", "four")])),
            Err(InputError::NotAnInteger(_))
        );
        assert_matches!(read_n("n", env_of(&[("n", "")])), Err(InputError::NotAnInteger(_)));
    }
}
