use log::debug;

use crate::utils::{self, Integer};
use crate::InputError;

/// Job option carrying the integer, passed as `--n <value>`
pub const DEFAULT_JOB_OPTION: &str = "n";

const OPTION_PREFIX: &str = "--";

/// Resolves `--name value` or `--name=value` from a job's argument list.
///
/// Unrelated options and positionals are skipped and the last occurrence wins,
/// matching how a batch job runner resolves its named arguments.
pub fn resolve<S: AsRef<str>>(args: &[S], name: &str) -> Result<Option<String>, InputError> {
    let flag = format!("{}{}", OPTION_PREFIX, name);
    let mut resolved = None;

    let mut i = 0;
    while i < args.len() {
        let arg: &str = args[i].as_ref();
        if arg == flag {
            let next: Option<&str> = args.get(i + 1).map(|value| value.as_ref());
            match next {
                Some(value) if !value.starts_with(OPTION_PREFIX) => {
                    resolved = Some(value.to_string());
                    i += 1;
                }
                _ => return Err(InputError::FlagWithoutValue(flag)),
            }
        } else if let Some(value) = arg
            .strip_prefix(flag.as_str())
            .and_then(|rest| rest.strip_prefix('='))
        {
            resolved = Some(value.to_string());
        }
        i += 1;
    }

    Ok(resolved)
}

/// Reads `n` from the resolved job option `name`
pub fn read_n<S: AsRef<str>>(args: &[S], name: &str) -> Result<Integer, InputError> {
    match resolve(args, name)? {
        Some(value) => {
            debug!("job option '{}{}' = {:?}", OPTION_PREFIX, name, value);
            utils::parse_int(&value)
        }
        None => Err(InputError::Missing(format!(
            "job option '{}{}'",
            OPTION_PREFIX, name
        ))),
    }
}
